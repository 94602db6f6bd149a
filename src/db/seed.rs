//! Database seeding from a bundled JSON dataset.
//!
//! Used by the `seed` binary and by the database integration tests, which
//! reseed before every test so each one starts from the same rows.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;

use crate::models::{Topic, User};

#[derive(Debug, Clone, Deserialize)]
pub struct SeedArticle {
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    #[serde(default)]
    pub votes: i32,
    pub created_at: DateTime<Utc>,
}

/// `article_id` is the 1-based position of the article in the dataset
#[derive(Debug, Clone, Deserialize)]
pub struct SeedComment {
    pub article_id: i32,
    pub author: String,
    pub body: String,
    #[serde(default)]
    pub votes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SeedData {
    pub topics: Vec<Topic>,
    pub users: Vec<User>,
    pub articles: Vec<SeedArticle>,
    pub comments: Vec<SeedComment>,
}

impl SeedData {
    /// The sample dataset under `data/sample`
    pub fn sample() -> anyhow::Result<Self> {
        Ok(Self {
            topics: serde_json::from_str(include_str!("../../data/sample/topics.json"))?,
            users: serde_json::from_str(include_str!("../../data/sample/users.json"))?,
            articles: serde_json::from_str(include_str!("../../data/sample/articles.json"))?,
            comments: serde_json::from_str(include_str!("../../data/sample/comments.json"))?,
        })
    }
}

/// Replace every row with `data`, restarting the id sequences.
pub async fn seed(pool: &PgPool, data: &SeedData) -> anyhow::Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("TRUNCATE comments, articles, users, topics RESTART IDENTITY CASCADE")
        .execute(&mut *tx)
        .await?;

    for topic in &data.topics {
        sqlx::query("INSERT INTO topics (slug, description) VALUES ($1, $2)")
            .bind(&topic.slug)
            .bind(&topic.description)
            .execute(&mut *tx)
            .await?;
    }

    for user in &data.users {
        sqlx::query("INSERT INTO users (username, name, avatar_url) VALUES ($1, $2, $3)")
            .bind(&user.username)
            .bind(&user.name)
            .bind(&user.avatar_url)
            .execute(&mut *tx)
            .await?;
    }

    for article in &data.articles {
        sqlx::query(
            r#"
            INSERT INTO articles (title, topic, author, body, votes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&article.title)
        .bind(&article.topic)
        .bind(&article.author)
        .bind(&article.body)
        .bind(article.votes)
        .bind(article.created_at)
        .execute(&mut *tx)
        .await?;
    }

    for comment in &data.comments {
        sqlx::query(
            r#"
            INSERT INTO comments (article_id, author, body, votes, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.article_id)
        .bind(&comment.author)
        .bind(&comment.body)
        .bind(comment.votes)
        .bind(comment.created_at)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        topics = data.topics.len(),
        users = data.users.len(),
        articles = data.articles.len(),
        comments = data.comments.len(),
        "Database seeded"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_data_loads() {
        let data = SeedData::sample().unwrap();
        assert_eq!(data.topics.len(), 3);
        assert_eq!(data.users.len(), 4);
        assert_eq!(data.articles.len(), 6);
        assert_eq!(data.comments.len(), 7);
    }

    #[test]
    fn test_sample_references_are_consistent() {
        let data = SeedData::sample().unwrap();
        let article_count = data.articles.len() as i32;

        for article in &data.articles {
            assert!(data.topics.iter().any(|t| t.slug == article.topic));
            assert!(data.users.iter().any(|u| u.username == article.author));
        }
        for comment in &data.comments {
            assert!((1..=article_count).contains(&comment.article_id));
            assert!(data.users.iter().any(|u| u.username == comment.author));
        }
    }
}
