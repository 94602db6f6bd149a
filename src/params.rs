//! Query-string validation shared by the listing endpoints.
//!
//! Every value arrives as a raw string so that malformed input is reported
//! with this crate's error messages rather than the extractor's.

use serde::Deserialize;

use crate::error::{AppError, Result};

/// Sort direction for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw {
            None => Ok(SortOrder::default()),
            Some("asc") => Ok(SortOrder::Asc),
            Some("desc") => Ok(SortOrder::Desc),
            Some(_) => Err(AppError::BadRequest(
                "Bad Request - invalid order".to_string(),
            )),
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// A whitelisted sort column for one entity.
pub trait SortColumn: Sized + Copy + Default {
    fn from_name(name: &str) -> Option<Self>;

    /// Qualified column expression; never derived from user input
    fn as_sql(&self) -> &'static str;

    fn parse(raw: Option<&str>) -> Result<Self> {
        match raw {
            None => Ok(Self::default()),
            Some(name) => Self::from_name(name).ok_or_else(|| {
                AppError::BadRequest("Bad Request - invalid sort_by".to_string())
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleSort {
    ArticleId,
    Title,
    Topic,
    Author,
    #[default]
    CreatedAt,
    Votes,
    CommentCount,
}

impl SortColumn for ArticleSort {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "article_id" => Some(ArticleSort::ArticleId),
            "title" => Some(ArticleSort::Title),
            "topic" => Some(ArticleSort::Topic),
            "author" => Some(ArticleSort::Author),
            "created_at" => Some(ArticleSort::CreatedAt),
            "votes" => Some(ArticleSort::Votes),
            "comment_count" => Some(ArticleSort::CommentCount),
            _ => None,
        }
    }

    fn as_sql(&self) -> &'static str {
        match self {
            ArticleSort::ArticleId => "articles.article_id",
            ArticleSort::Title => "articles.title",
            ArticleSort::Topic => "articles.topic",
            ArticleSort::Author => "articles.author",
            ArticleSort::CreatedAt => "articles.created_at",
            ArticleSort::Votes => "articles.votes",
            ArticleSort::CommentCount => "comment_count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentSort {
    CommentId,
    Author,
    Body,
    Votes,
    #[default]
    CreatedAt,
}

impl SortColumn for CommentSort {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "comment_id" => Some(CommentSort::CommentId),
            "author" => Some(CommentSort::Author),
            "body" => Some(CommentSort::Body),
            "votes" => Some(CommentSort::Votes),
            "created_at" => Some(CommentSort::CreatedAt),
            _ => None,
        }
    }

    fn as_sql(&self) -> &'static str {
        match self {
            CommentSort::CommentId => "comment_id",
            CommentSort::Author => "author",
            CommentSort::Body => "body",
            CommentSort::Votes => "votes",
            CommentSort::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<C> {
    pub column: C,
    pub order: SortOrder,
}

impl<C: SortColumn> Sort<C> {
    pub fn parse(sort_by: Option<&str>, order: Option<&str>) -> Result<Self> {
        Ok(Self {
            column: C::parse(sort_by)?,
            order: SortOrder::parse(order)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub page: i64,
}

impl Pagination {
    /// `None` when neither `limit` nor `p` was supplied.
    pub fn parse(
        limit: Option<&str>,
        page: Option<&str>,
        default_limit: u32,
    ) -> Result<Option<Self>> {
        let limit = limit.map(parse_positive).transpose()?;
        let page = page.map(parse_positive).transpose()?;

        Ok(match (limit, page) {
            (None, None) => None,
            (limit, page) => Some(Self {
                limit: limit.unwrap_or(i64::from(default_limit.max(1))),
                page: page.unwrap_or(1),
            }),
        })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn parse_positive(raw: &str) -> Result<i64> {
    match raw.trim().parse::<i64>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(AppError::invalid_value()),
    }
}

/// Parse an integer path identifier.
pub fn parse_id(raw: &str) -> Result<i32> {
    raw.parse::<i32>().map_err(|_| AppError::invalid_value())
}

/// Treat `?author=` the same as an absent filter.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Default, Deserialize)]
pub struct ArticleListQuery {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub author: Option<String>,
    pub topic: Option<String>,
    pub limit: Option<String>,
    #[serde(alias = "page")]
    pub p: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleListParams {
    pub sort: Sort<ArticleSort>,
    pub author: Option<String>,
    pub topic: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ArticleListQuery {
    pub fn into_params(self, default_limit: u32) -> Result<ArticleListParams> {
        Ok(ArticleListParams {
            sort: Sort::parse(self.sort_by.as_deref(), self.order.as_deref())?,
            pagination: Pagination::parse(self.limit.as_deref(), self.p.as_deref(), default_limit)?,
            author: non_empty(self.author),
            topic: non_empty(self.topic),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CommentListQuery {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub limit: Option<String>,
    #[serde(alias = "page")]
    pub p: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentListParams {
    pub sort: Sort<CommentSort>,
    pub pagination: Option<Pagination>,
}

impl CommentListQuery {
    pub fn into_params(self, default_limit: u32) -> Result<CommentListParams> {
        Ok(CommentListParams {
            sort: Sort::parse(self.sort_by.as_deref(), self.order.as_deref())?,
            pagination: Pagination::parse(self.limit.as_deref(), self.p.as_deref(), default_limit)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bad_request_message(err: AppError) -> String {
        match err {
            AppError::BadRequest(msg) => msg,
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults_to_created_at_desc() {
        let params = ArticleListQuery::default().into_params(10).unwrap();
        assert_eq!(params.sort.column, ArticleSort::CreatedAt);
        assert_eq!(params.sort.order, SortOrder::Desc);
        assert_eq!(params.pagination, None);
        assert_eq!(params.author, None);
        assert_eq!(params.topic, None);
    }

    #[test]
    fn test_order_is_case_sensitive() {
        assert_eq!(SortOrder::parse(Some("asc")).unwrap(), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("desc")).unwrap(), SortOrder::Desc);

        let err = SortOrder::parse(Some("ASC")).unwrap_err();
        assert!(bad_request_message(err).contains("Bad Request"));
    }

    #[test]
    fn test_unknown_sort_column_rejected() {
        let err = Sort::<ArticleSort>::parse(Some("banana"), None).unwrap_err();
        assert_eq!(bad_request_message(err), "Bad Request - invalid sort_by");

        // body is sortable on comments but not on the article listing
        assert!(Sort::<ArticleSort>::parse(Some("body"), None).is_err());
        assert!(Sort::<CommentSort>::parse(Some("body"), None).is_ok());
    }

    #[test]
    fn test_article_sort_whitelist() {
        let names = [
            "article_id",
            "title",
            "topic",
            "author",
            "created_at",
            "votes",
            "comment_count",
        ];
        for name in names {
            assert!(ArticleSort::from_name(name).is_some(), "{} should be sortable", name);
        }
        assert_eq!(ArticleSort::Votes.as_sql(), "articles.votes");
    }

    #[test]
    fn test_pagination_offset() {
        let pagination = Pagination::parse(Some("5"), Some("3"), 10).unwrap().unwrap();
        assert_eq!(pagination.limit, 5);
        assert_eq!(pagination.offset(), 10);
    }

    #[test]
    fn test_page_without_limit_uses_default() {
        let pagination = Pagination::parse(None, Some("2"), 10).unwrap().unwrap();
        assert_eq!(pagination.limit, 10);
        assert_eq!(pagination.offset(), 10);
    }

    #[test]
    fn test_limit_without_page_starts_at_first_page() {
        let pagination = Pagination::parse(Some("3"), None, 10).unwrap().unwrap();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn test_pagination_rejects_non_positive_values() {
        for raw in ["0", "-1", "banana", "1.5", ""] {
            let err = Pagination::parse(Some(raw), None, 10).unwrap_err();
            assert_eq!(bad_request_message(err), "Bad Request - invalid value");
        }
        assert!(Pagination::parse(None, Some("0"), 10).is_err());
    }

    #[test]
    fn test_empty_filters_are_ignored() {
        let query = ArticleListQuery {
            author: Some(String::new()),
            topic: Some("mitch".to_string()),
            ..Default::default()
        };
        let params = query.into_params(10).unwrap();
        assert_eq!(params.author, None);
        assert_eq!(params.topic.as_deref(), Some("mitch"));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(parse_id("banana").is_err());
        assert!(parse_id("99999999999").is_err());
    }

    #[test]
    fn test_comment_query_defaults() {
        let params = CommentListQuery::default().into_params(10).unwrap();
        assert_eq!(params.sort.column, CommentSort::CreatedAt);
        assert_eq!(params.sort.order, SortOrder::Desc);
    }
}
