//! Submission of strategy documents to the backend.

pub mod http;

use async_trait::async_trait;
use log::{info, warn};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::constants::{DEPLOY_ENDPOINT, SAVE_ENDPOINT};
use crate::error::SubmitError;
use crate::strategy::Strategy;

pub use self::http::HttpBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitAction {
    Save,
    Deploy,
}

impl SubmitAction {
    pub fn endpoint(&self) -> &'static str {
        match self {
            SubmitAction::Save => SAVE_ENDPOINT,
            SubmitAction::Deploy => DEPLOY_ENDPOINT,
        }
    }

    /// "saving" / "deploying", as used in error messages.
    pub fn verb(&self) -> &'static str {
        match self {
            SubmitAction::Save => "saving",
            SubmitAction::Deploy => "deploying",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            SubmitAction::Save => "Strategy saved successfully!",
            SubmitAction::Deploy => "Strategy deployed successfully!",
        }
    }
}

impl fmt::Display for SubmitAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitAction::Save => f.write_str("save"),
            SubmitAction::Deploy => f.write_str("deploy"),
        }
    }
}

/// Body the backend answers with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    /// `None` when the field is absent; an explicit `null` is `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<serde_json::Value>,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl SubmitResponse {
    /// The `error` field as text: strings verbatim, other JSON as written,
    /// `undefined` when absent.
    pub fn error_message(&self) -> String {
        match &self.error {
            None => "undefined".to_string(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Transport-level failure: the request never produced a usable response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure(pub String);

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Backend operations - swap in a fake for tests
#[async_trait]
pub trait StrategyBackend: Send + Sync {
    /// Post the document to the endpoint for `action` and decode the reply.
    async fn submit(
        &self,
        action: SubmitAction,
        strategy: &Strategy,
    ) -> Result<SubmitResponse, TransportFailure>;
}

/// Run one save or deploy attempt. No retry.
pub async fn submit_strategy(
    backend: &dyn StrategyBackend,
    action: SubmitAction,
    strategy: &Strategy,
) -> Result<(), SubmitError> {
    info!(
        "Submitting strategy '{}' ({} components) to {}",
        strategy.name,
        strategy.components.len(),
        action.endpoint()
    );

    let response = backend.submit(action, strategy).await.map_err(|e| {
        warn!("Strategy {} failed in transport: {}", action, e);
        SubmitError::Transport {
            action,
            message: e.0,
        }
    })?;

    if response.success {
        info!("Strategy {} succeeded", action);
        Ok(())
    } else {
        let message = response.error_message();
        warn!("Strategy {} rejected by backend: {}", action, message);
        Err(SubmitError::Application { action, message })
    }
}
