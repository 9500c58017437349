use std::sync::Arc;

use common::types::{RecordFormat, StatusAck};
use serde_json::Value;
use tracing::{debug, info};

use super::{auth::AuthGate, render};
use crate::errors::StrengthError;
use crate::storage::StrengthStore;

/// Acknowledgement of an accepted write, shaped by the record format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAck {
    /// Plain-text `success`.
    Text,
    /// `{"status":"success"}`.
    Json(StatusAck),
}

/// The stored record in the representation the service was configured for.
#[derive(Debug, Clone, PartialEq)]
pub enum StrengthView {
    Text(String),
    Html(String),
    Json(Value),
}

/// Secret-gated overwrite and unauthenticated read of the single strength record.
#[derive(Clone)]
pub struct StrengthService {
    gate: AuthGate,
    store: Arc<dyn StrengthStore>,
    format: RecordFormat,
}

impl StrengthService {
    pub fn new(gate: AuthGate, store: Arc<dyn StrengthStore>, format: RecordFormat) -> Self {
        Self { gate, store, format }
    }

    /// Gate, validate, then replace the record in full. A rejected payload never
    /// reaches the store.
    pub async fn update(&self, auth_key: Option<&str>, body: &[u8]) -> Result<UpdateAck, StrengthError> {
        self.gate.check(auth_key)?;

        // text and html accept the same payload; only the read side differs
        let (bytes, ack) = match self.format {
            RecordFormat::Text | RecordFormat::Html => (validate_text(body)?.as_bytes().to_vec(), UpdateAck::Text),
            RecordFormat::Json => {
                let value = validate_json(body)?;
                let pretty = serde_json::to_vec_pretty(&value)
                    .map_err(|e| StrengthError::internal(format!("cannot serialize payload: {e}")))?;
                (pretty, UpdateAck::Json(StatusAck::success()))
            }
        };

        self.store.store(&bytes).await?;
        info!(format = %self.format, bytes = bytes.len(), "strength record updated");
        Ok(ack)
    }

    /// Load the record and represent it for the configured format.
    pub async fn fetch(&self) -> Result<StrengthView, StrengthError> {
        let bytes = self.store.load().await?.ok_or(StrengthError::NotFound)?;
        debug!(format = %self.format, bytes = bytes.len(), "strength record loaded");

        match self.format {
            RecordFormat::Text => Ok(StrengthView::Text(stored_text(bytes)?)),
            RecordFormat::Html => {
                let text = stored_text(bytes)?;
                Ok(StrengthView::Html(render::render_table(&text)?))
            }
            RecordFormat::Json => serde_json::from_slice(&bytes)
                .map(StrengthView::Json)
                .map_err(|e| StrengthError::internal(format!("stored strength data is not valid JSON: {e}"))),
        }
    }
}

fn validate_text(body: &[u8]) -> Result<&str, StrengthError> {
    if body.is_empty() {
        return Err(StrengthError::validation("Request body must be non-empty text"));
    }
    std::str::from_utf8(body).map_err(|_| StrengthError::validation("Request body must be UTF-8 text"))
}

fn validate_json(body: &[u8]) -> Result<Value, StrengthError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| StrengthError::validation(format!("Request body must be valid JSON: {e}")))?;
    // `null` parses but carries no value
    if value.is_null() {
        return Err(StrengthError::validation("Request body must be a non-null JSON value"));
    }
    Ok(value)
}

fn stored_text(bytes: Vec<u8>) -> Result<String, StrengthError> {
    String::from_utf8(bytes).map_err(|_| StrengthError::internal("stored strength data is not UTF-8"))
}
