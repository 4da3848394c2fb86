//! DynamoDB session store
//!
//! One item per user, keyed by `id`, with the session attributes nested in an
//! `attributes` map. Works against LocalStack when an endpoint is configured.

use std::collections::HashMap;

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_dynamodb::config::SharedCredentialsProvider;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;

use voxthread_common::RepositoryError;

use super::{RepositoryConfig, SessionRepository};
use crate::domain::entities::SessionAttributes;

/// Partition key of the persistence table
pub const PARTITION_KEY: &str = "id";
/// Map attribute holding the session attributes
pub const ATTRIBUTES_KEY: &str = "attributes";

const ASSISTANT_ID: &str = "assistant_id";
const THREAD_ID: &str = "thread_id";

/// DynamoDB-backed session store
pub struct DynamoDbSessionRepository {
    client: DynamoDbClient,
    table_name: String,
}

impl DynamoDbSessionRepository {
    /// Create a new DynamoDB session store
    pub async fn new(config: RepositoryConfig) -> Result<Self, RepositoryError> {
        let table_name = config.table_name.clone().ok_or_else(|| {
            RepositoryError::Configuration("DynamoDB table name is required".to_string())
        })?;

        let aws_config = match config.endpoint_url.as_ref() {
            Some(endpoint_url) => {
                tracing::info!("Using custom AWS endpoint: {}", endpoint_url);

                // LocalStack accepts any credentials
                let credentials = Credentials::new(
                    "test-access-key",
                    "test-secret-key",
                    None,
                    None,
                    "localstack-session-store",
                );

                aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(config.region.clone()))
                    .endpoint_url(endpoint_url)
                    .credentials_provider(SharedCredentialsProvider::new(credentials))
                    .load()
                    .await
            }
            None => {
                aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(config.region.clone()))
                    .load()
                    .await
            }
        };

        Ok(Self {
            client: DynamoDbClient::new(&aws_config),
            table_name,
        })
    }

    /// Log whether the table is reachable. Never fails; the first real
    /// request surfaces the error if the table is missing.
    pub async fn check_table(&self) {
        match self
            .client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
        {
            Ok(_) => tracing::info!(table = %self.table_name, "Connected to DynamoDB session table"),
            Err(e) => tracing::warn!(
                table = %self.table_name,
                "Failed to describe DynamoDB session table: {}",
                DisplayErrorContext(&e)
            ),
        }
    }
}

#[async_trait::async_trait]
impl SessionRepository for DynamoDbSessionRepository {
    async fn load(&self, user_id: &str) -> Result<Option<SessionAttributes>, RepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY, AttributeValue::S(user_id.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| {
                RepositoryError::Backend(format!(
                    "DynamoDB get_item failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        match output.item() {
            Some(item) => decode_item(item).map(Some),
            None => Ok(None),
        }
    }

    async fn save(
        &self,
        user_id: &str,
        attributes: &SessionAttributes,
    ) -> Result<(), RepositoryError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(encode_item(user_id, attributes)))
            .send()
            .await
            .map_err(|e| {
                RepositoryError::Backend(format!(
                    "DynamoDB put_item failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        tracing::debug!(user_id = %user_id, "Saved session attributes");
        Ok(())
    }
}

/// Build the full item for a user
fn encode_item(user_id: &str, attributes: &SessionAttributes) -> HashMap<String, AttributeValue> {
    let mut map = HashMap::new();
    if let Some(assistant_id) = &attributes.assistant_id {
        map.insert(
            ASSISTANT_ID.to_string(),
            AttributeValue::S(assistant_id.clone()),
        );
    }
    if let Some(thread_id) = &attributes.thread_id {
        map.insert(THREAD_ID.to_string(), AttributeValue::S(thread_id.clone()));
    }

    HashMap::from([
        (
            PARTITION_KEY.to_string(),
            AttributeValue::S(user_id.to_string()),
        ),
        (ATTRIBUTES_KEY.to_string(), AttributeValue::M(map)),
    ])
}

/// Read session attributes out of a stored item
fn decode_item(item: &HashMap<String, AttributeValue>) -> Result<SessionAttributes, RepositoryError> {
    let Some(value) = item.get(ATTRIBUTES_KEY) else {
        return Ok(SessionAttributes::default());
    };

    let map = value.as_m().map_err(|_| {
        RepositoryError::InvalidData(format!("'{}' is not a map", ATTRIBUTES_KEY))
    })?;

    Ok(SessionAttributes {
        assistant_id: string_field(map, ASSISTANT_ID)?,
        thread_id: string_field(map, THREAD_ID)?,
    })
}

fn string_field(
    map: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<Option<String>, RepositoryError> {
    match map.get(key) {
        None | Some(AttributeValue::Null(_)) => Ok(None),
        Some(AttributeValue::S(s)) => Ok(Some(s.clone())),
        Some(_) => Err(RepositoryError::InvalidData(format!(
            "'{}' is not a string",
            key
        ))),
    }
}
