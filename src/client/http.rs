use async_trait::async_trait;
use log::debug;

use super::{StrategyBackend, SubmitAction, SubmitResponse, TransportFailure};
use crate::strategy::Strategy;

/// Backend reached over HTTP. One POST per submission, no timeout, no retry.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, action: SubmitAction) -> String {
        format!("{}{}", self.base_url, action.endpoint())
    }
}

#[async_trait]
impl StrategyBackend for HttpBackend {
    async fn submit(
        &self,
        action: SubmitAction,
        strategy: &Strategy,
    ) -> Result<SubmitResponse, TransportFailure> {
        let url = self.url(action);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(strategy)
            .send()
            .await
            .map_err(|e| TransportFailure(e.to_string()))?;

        // The status code is not inspected; only the body decides the outcome
        debug!("{} answered with status {}", url, response.status());
        response
            .json::<SubmitResponse>()
            .await
            .map_err(|e| TransportFailure(e.to_string()))
    }
}
