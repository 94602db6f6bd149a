mod article_service;
mod comment_service;
mod topic_service;
mod user_service;

pub use article_service::*;
pub use comment_service::*;
pub use topic_service::*;
pub use user_service::*;
