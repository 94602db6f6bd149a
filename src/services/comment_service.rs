// Comment service - comments belonging to an article
use sqlx::{Postgres, QueryBuilder};

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{Comment, CreateComment};
use crate::params::{CommentListParams, SortColumn};
use crate::services::ArticleService;

pub struct CommentService {
    db: Database,
}

impl CommentService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List an article's comments.
    ///
    /// An article without comments yields an empty list; a missing article
    /// is `NotFound`, decided by looking the article up rather than by the
    /// absence of comments.
    pub async fn list_comments(
        &self,
        article_id: i32,
        params: &CommentListParams,
    ) -> Result<Vec<Comment>> {
        let articles = ArticleService::new(self.db.clone());

        let (article_exists, comments) = tokio::join!(
            articles.article_exists(article_id),
            self.fetch_comments(article_id, params)
        );

        if !article_exists? {
            return Err(AppError::not_found("Article Not Found"));
        }

        comments
    }

    async fn fetch_comments(
        &self,
        article_id: i32,
        params: &CommentListParams,
    ) -> Result<Vec<Comment>> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT comment_id, article_id, author, body, votes, created_at
            FROM comments
            WHERE article_id = "#,
        );
        query.push_bind(article_id);

        query
            .push(" ORDER BY ")
            .push(params.sort.column.as_sql())
            .push(" ")
            .push(params.sort.order.as_sql())
            .push(", comment_id ASC");

        if let Some(pagination) = params.pagination {
            query
                .push(" LIMIT ")
                .push_bind(pagination.limit)
                .push(" OFFSET ")
                .push_bind(pagination.offset());
        }

        let comments = query
            .build_query_as::<Comment>()
            .fetch_all(&self.db.pg)
            .await?;

        Ok(comments)
    }

    /// Add a comment to an article. Votes start at zero.
    pub async fn create_comment(&self, article_id: i32, input: CreateComment) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (article_id, author, body)
            VALUES ($1, $2, $3)
            RETURNING comment_id, article_id, author, body, votes, created_at
            "#,
        )
        .bind(article_id)
        .bind(input.username)
        .bind(input.body)
        .fetch_one(&self.db.pg)
        .await?;

        tracing::info!(
            comment_id = comment.comment_id,
            article_id,
            "Comment created"
        );

        Ok(comment)
    }

    pub async fn increment_votes(&self, comment_id: i32, delta: i32) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET votes = votes + $1
            WHERE comment_id = $2
            RETURNING comment_id, article_id, author, body, votes, created_at
            "#,
        )
        .bind(delta)
        .bind(comment_id)
        .fetch_optional(&self.db.pg)
        .await?
        .ok_or_else(|| AppError::not_found("Comment Not Found"))?;

        tracing::debug!(comment_id, delta, votes = comment.votes, "Comment votes updated");

        Ok(comment)
    }

    pub async fn delete_comment(&self, comment_id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(comment_id)
            .execute(&self.db.pg)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Comment ID Not Found"));
        }

        tracing::info!(comment_id, "Comment deleted");

        Ok(())
    }
}
