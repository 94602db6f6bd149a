mod article;
mod comment;
mod topic;
mod user;

pub use article::*;
pub use comment::*;
pub use topic::*;
pub use user::*;
