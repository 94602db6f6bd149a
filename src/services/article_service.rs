// Article service - listing, lookup and mutation of articles
use sqlx::{Postgres, QueryBuilder};

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{Article, ArticleSummary, CreateArticle};
use crate::params::{ArticleListParams, SortColumn};
use crate::services::{TopicService, UserService};

pub struct ArticleService {
    db: Database,
}

/// Article columns plus the derived comment count, for a single article
const ARTICLE_WITH_COUNT: &str = r#"
    SELECT
        articles.article_id,
        articles.title,
        articles.body,
        articles.topic,
        articles.author,
        articles.votes,
        articles.created_at,
        COUNT(comments.comment_id) AS comment_count
    FROM articles
    LEFT JOIN comments ON comments.article_id = articles.article_id
    WHERE articles.article_id = $1
    GROUP BY articles.article_id
"#;

impl ArticleService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List articles with filters, sorting and pagination.
    ///
    /// Returns the requested page and the number of articles matching the
    /// filters before pagination. Filter targets are checked for existence
    /// concurrently with the listing; a missing author is reported before a
    /// missing topic.
    pub async fn list_articles(
        &self,
        params: &ArticleListParams,
    ) -> Result<(Vec<ArticleSummary>, i64)> {
        let author_check = async {
            match params.author.as_deref() {
                Some(author) => UserService::new(self.db.clone())
                    .user_exists(author)
                    .await
                    .map(Some),
                None => Ok(None),
            }
        };
        let topic_check = async {
            match params.topic.as_deref() {
                Some(topic) => TopicService::new(self.db.clone())
                    .topic_exists(topic)
                    .await
                    .map(Some),
                None => Ok(None),
            }
        };

        let (author_exists, topic_exists, articles, total_count) = tokio::join!(
            author_check,
            topic_check,
            self.fetch_article_page(params),
            self.count_articles(params)
        );

        if let Some(false) = author_exists? {
            return Err(AppError::not_found("Author Not Found"));
        }
        if let Some(false) = topic_exists? {
            return Err(AppError::not_found("Topic Not Found"));
        }

        Ok((articles?, total_count?))
    }

    async fn fetch_article_page(&self, params: &ArticleListParams) -> Result<Vec<ArticleSummary>> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT
                articles.article_id,
                articles.title,
                articles.topic,
                articles.author,
                articles.votes,
                articles.created_at,
                COUNT(comments.comment_id) AS comment_count
            FROM articles
            LEFT JOIN comments ON comments.article_id = articles.article_id
            "#,
        );
        push_filters(&mut query, params);

        // article_id breaks ties so pages are stable
        query
            .push(" GROUP BY articles.article_id ORDER BY ")
            .push(params.sort.column.as_sql())
            .push(" ")
            .push(params.sort.order.as_sql())
            .push(", articles.article_id ASC");

        if let Some(pagination) = params.pagination {
            query
                .push(" LIMIT ")
                .push_bind(pagination.limit)
                .push(" OFFSET ")
                .push_bind(pagination.offset());
        }

        tracing::debug!(sql = query.sql(), "Listing articles");

        let articles = query
            .build_query_as::<ArticleSummary>()
            .fetch_all(&self.db.pg)
            .await?;

        Ok(articles)
    }

    async fn count_articles(&self, params: &ArticleListParams) -> Result<i64> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM articles");
        push_filters(&mut query, params);

        let total = query
            .build_query_scalar::<i64>()
            .fetch_one(&self.db.pg)
            .await?;

        Ok(total)
    }

    /// Get a single article with its comment count
    pub async fn get_article(&self, article_id: i32) -> Result<Article> {
        let article = sqlx::query_as::<_, Article>(ARTICLE_WITH_COUNT)
            .bind(article_id)
            .fetch_optional(&self.db.pg)
            .await?
            .ok_or_else(|| AppError::not_found("Not Found"))?;

        Ok(article)
    }

    pub async fn article_exists(&self, article_id: i32) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM articles WHERE article_id = $1)")
                .bind(article_id)
                .fetch_one(&self.db.pg)
                .await?;

        Ok(exists)
    }

    /// Add `delta` to the article's votes and return the updated article.
    ///
    /// A zero delta returns the article unchanged.
    pub async fn increment_votes(&self, article_id: i32, delta: i32) -> Result<Article> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            WITH updated AS (
                UPDATE articles
                SET votes = votes + $1
                WHERE article_id = $2
                RETURNING *
            )
            SELECT
                updated.article_id,
                updated.title,
                updated.body,
                updated.topic,
                updated.author,
                updated.votes,
                updated.created_at,
                (SELECT COUNT(*) FROM comments WHERE comments.article_id = updated.article_id)
                    AS comment_count
            FROM updated
            "#,
        )
        .bind(delta)
        .bind(article_id)
        .fetch_optional(&self.db.pg)
        .await?
        .ok_or_else(|| AppError::not_found("Not Found"))?;

        tracing::debug!(article_id, delta, votes = article.votes, "Article votes updated");

        Ok(article)
    }

    /// Insert an article. Unknown author or topic surfaces as a foreign key violation.
    pub async fn create_article(&self, input: CreateArticle) -> Result<Article> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles (title, topic, author, body)
            VALUES ($1, $2, $3, $4)
            RETURNING
                article_id,
                title,
                body,
                topic,
                author,
                votes,
                created_at,
                0::BIGINT AS comment_count
            "#,
        )
        .bind(input.title)
        .bind(input.topic)
        .bind(input.author)
        .bind(input.body)
        .fetch_one(&self.db.pg)
        .await?;

        tracing::info!(article_id = article.article_id, "Article created");

        Ok(article)
    }

    pub async fn delete_article(&self, article_id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM articles WHERE article_id = $1")
            .bind(article_id)
            .execute(&self.db.pg)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Article ID Not Found"));
        }

        tracing::info!(article_id, "Article deleted");

        Ok(())
    }
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, params: &ArticleListParams) {
    let mut separator = " WHERE ";

    if let Some(author) = &params.author {
        query
            .push(separator)
            .push("articles.author = ")
            .push_bind(author.clone());
        separator = " AND ";
    }

    if let Some(topic) = &params.topic {
        query
            .push(separator)
            .push("articles.topic = ")
            .push_bind(topic.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ArticleListQuery, Pagination};

    fn params(query: ArticleListQuery) -> ArticleListParams {
        query.into_params(10).unwrap()
    }

    #[test]
    fn test_filters_are_bound_not_interpolated() {
        let params = params(ArticleListQuery {
            author: Some("butter_bridge'; DROP TABLE articles; --".to_string()),
            topic: Some("mitch".to_string()),
            ..Default::default()
        });

        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM articles");
        push_filters(&mut query, &params);

        assert_eq!(
            query.sql(),
            "SELECT COUNT(*) FROM articles WHERE articles.author = $1 AND articles.topic = $2"
        );
    }

    #[test]
    fn test_topic_only_filter() {
        let params = params(ArticleListQuery {
            topic: Some("cats".to_string()),
            ..Default::default()
        });

        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM articles");
        push_filters(&mut query, &params);

        assert_eq!(
            query.sql(),
            "SELECT COUNT(*) FROM articles WHERE articles.topic = $1"
        );
    }

    #[test]
    fn test_no_filters() {
        let params = params(ArticleListQuery::default());

        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM articles");
        push_filters(&mut query, &params);

        assert_eq!(query.sql(), "SELECT COUNT(*) FROM articles");
        assert_eq!(params.pagination, None::<Pagination>);
    }
}
