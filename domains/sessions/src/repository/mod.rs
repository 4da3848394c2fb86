//! Session store for the Sessions domain
//!
//! Maps a platform user id to its session attributes. Implementations:
//! - DynamoDB (the table layout the skill has always used)
//! - In-memory, for tests and local development

pub mod dynamodb;
pub mod memory;

use voxthread_common::RepositoryError;

use crate::domain::entities::{SessionAttributes, SessionRecord};

pub use dynamodb::DynamoDbSessionRepository;
pub use memory::InMemorySessionRepository;

/// Session store configuration
#[derive(Debug, Clone)]
pub struct RepositoryConfig {
    /// Store provider (dynamodb, memory)
    pub provider: String,
    /// DynamoDB table holding session attributes
    pub table_name: Option<String>,
    /// AWS region of the table
    pub region: String,
    /// AWS endpoint URL (for LocalStack)
    pub endpoint_url: Option<String>,
}

impl RepositoryConfig {
    /// Create store config from environment variables
    pub fn from_env() -> Result<Self, RepositoryError> {
        dotenvy::dotenv().ok();

        let provider =
            std::env::var("SESSION_STORE_PROVIDER").unwrap_or_else(|_| "dynamodb".to_string());

        let table_name = std::env::var("DYNAMODB_PERSISTENCE_TABLE_NAME")
            .ok()
            .filter(|t| !t.trim().is_empty());

        if provider == "dynamodb" && table_name.is_none() {
            return Err(RepositoryError::Configuration(
                "DYNAMODB_PERSISTENCE_TABLE_NAME is required for dynamodb provider".to_string(),
            ));
        }

        let region = std::env::var("DYNAMODB_PERSISTENCE_REGION")
            .or_else(|_| std::env::var("AWS_REGION"))
            .unwrap_or_else(|_| "us-east-1".to_string());

        let endpoint_url = std::env::var("AWS_ENDPOINT_URL").ok();

        Ok(Self {
            provider,
            table_name,
            region,
            endpoint_url,
        })
    }
}

/// Per-user session persistence
#[async_trait::async_trait]
pub trait SessionRepository: Send + Sync {
    /// Raw attributes for a user, as stored
    async fn load(&self, user_id: &str) -> Result<Option<SessionAttributes>, RepositoryError>;

    /// Overwrite a user's attributes
    async fn save(&self, user_id: &str, attributes: &SessionAttributes)
        -> Result<(), RepositoryError>;

    /// Usable session record for a user; partial records count as absent
    async fn get(&self, user_id: &str) -> Result<Option<SessionRecord>, RepositoryError> {
        let Some(attributes) = self.load(user_id).await? else {
            return Ok(None);
        };

        if attributes.is_inconsistent() {
            tracing::warn!(
                user_id = %user_id,
                has_assistant = attributes.assistant_id.is_some(),
                has_thread = attributes.thread_id.is_some(),
                "Inconsistent session record, treating as absent"
            );
        }

        Ok(SessionRecord::from_attributes(&attributes))
    }

    /// Persist a complete session record
    async fn put(&self, user_id: &str, record: &SessionRecord) -> Result<(), RepositoryError> {
        self.save(user_id, &record.to_attributes()).await
    }
}

/// Factory for creating SessionRepository implementations
pub struct SessionRepositoryFactory;

impl SessionRepositoryFactory {
    /// Create a session store based on configuration
    pub async fn create(
        config: RepositoryConfig,
    ) -> Result<Box<dyn SessionRepository>, RepositoryError> {
        match config.provider.as_str() {
            "dynamodb" => {
                tracing::info!(region = %config.region, "Creating DynamoDB session store");
                let repository = DynamoDbSessionRepository::new(config).await?;
                repository.check_table().await;
                Ok(Box::new(repository))
            }
            "memory" => {
                tracing::info!("Creating in-memory session store");
                Ok(Box::new(InMemorySessionRepository::new()))
            }
            provider => Err(RepositoryError::Configuration(format!(
                "Unknown session store provider: {}. Supported providers: dynamodb, memory",
                provider
            ))),
        }
    }
}
