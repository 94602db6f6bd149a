// Topic service - topic listing, creation and existence checks
use crate::db::Database;
use crate::error::Result;
use crate::models::{CreateTopic, Topic};

pub struct TopicService {
    db: Database,
}

impl TopicService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list_topics(&self) -> Result<Vec<Topic>> {
        let topics = sqlx::query_as::<_, Topic>(
            "SELECT slug, description FROM topics ORDER BY slug",
        )
        .fetch_all(&self.db.pg)
        .await?;

        Ok(topics)
    }

    /// Insert a topic. A duplicate slug surfaces as a unique violation.
    pub async fn create_topic(&self, input: CreateTopic) -> Result<Topic> {
        let topic = sqlx::query_as::<_, Topic>(
            r#"
            INSERT INTO topics (slug, description)
            VALUES ($1, $2)
            RETURNING slug, description
            "#,
        )
        .bind(input.slug)
        .bind(input.description)
        .fetch_one(&self.db.pg)
        .await?;

        tracing::info!(slug = %topic.slug, "Topic created");

        Ok(topic)
    }

    pub async fn topic_exists(&self, slug: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM topics WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.db.pg)
            .await?;

        Ok(exists)
    }
}
