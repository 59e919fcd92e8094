use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::Client;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;

use crate::error::FeedbackError;
use crate::feedback::FeedbackRecord;

/// Persists feedback records. Returns the HTTP status the backend reported for the write.
#[async_trait]
pub(crate) trait FeedbackStore: Send + Sync {
    async fn put_feedback(&self, record: &FeedbackRecord) -> Result<u16, FeedbackError>;
}

pub(crate) struct DynamoFeedbackStore {
    client: Client,
    table_name: String,
}

impl DynamoFeedbackStore {
    pub(crate) fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl FeedbackStore for DynamoFeedbackStore {
    async fn put_feedback(&self, record: &FeedbackRecord) -> Result<u16, FeedbackError> {
        let status = Arc::new(AtomicU16::new(0));
        let observed = Arc::clone(&status);

        // The key is always fresh, so this never replaces an existing item.
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record.to_item()))
            .condition_expression("attribute_not_exists(ID)")
            .customize()
            .mutate_response(move |resp| {
                observed.store(resp.status().as_u16(), Ordering::Relaxed);
            })
            .send()
            .await
            .map_err(|e| {
                FeedbackError::StorageWriteFailure(DisplayErrorContext(&e).to_string())
            })?;

        // The SDK only resolves Ok on a 2xx response.
        Ok(match status.load(Ordering::Relaxed) {
            0 => 200,
            code => code,
        })
    }
}
