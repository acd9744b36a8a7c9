//! The form controller tying palette, canvas, property controls and backend
//! together.

use log::{error, info};
use uuid::Uuid;

use crate::canvas::palette::Palette;
use crate::canvas::Canvas;
use crate::client::{submit_strategy, StrategyBackend, SubmitAction};
use crate::error::{BuilderError, SubmitError};
use crate::logging::submission_audit::SubmissionAuditLogger;
use crate::notify::Notifier;
use crate::properties::PropertyControls;
use crate::strategy::{build_strategy, Strategy};

pub struct StrategyBuilder {
    palette: Palette,
    canvas: Canvas,
    properties: PropertyControls,
    name: String,
    backend: Box<dyn StrategyBackend>,
    audit: Option<SubmissionAuditLogger>,
}

impl StrategyBuilder {
    pub fn new(backend: Box<dyn StrategyBackend>, name: impl Into<String>) -> Self {
        Self {
            palette: Palette::default(),
            canvas: Canvas::new(),
            properties: PropertyControls::default(),
            name: name.into(),
            backend,
            audit: None,
        }
    }

    pub fn with_properties(mut self, properties: PropertyControls) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_audit(mut self, audit: Option<SubmissionAuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    /// Start from a previously built document.
    pub fn load_strategy(&mut self, strategy: &Strategy) -> Result<(), BuilderError> {
        let mut canvas = Canvas::new();
        for component in &strategy.components {
            canvas.restore(&component.component_type, &component.name, &component.config)?;
        }
        self.canvas = canvas;
        self.name = strategy.name.clone();
        self.properties = strategy.properties.clone();
        Ok(())
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn properties(&self) -> &PropertyControls {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut PropertyControls {
        &mut self.properties
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Drop a clone of palette item `index` onto the end of the canvas.
    pub fn drop_from_palette(&mut self, index: usize) -> Result<Uuid, BuilderError> {
        let item = self.palette.pick(index)?;
        let placed = self.canvas.drop_item(&item)?;
        info!("Added {} '{}' to canvas", placed.component_type(), placed.display_name);
        Ok(placed.id)
    }

    pub fn edit_field(&mut self, id: Uuid, key: &str, value: &str) -> Result<(), BuilderError> {
        self.canvas.set_field(id, key, value)
    }

    pub fn move_component(&mut self, id: Uuid, index: usize) -> Result<(), BuilderError> {
        self.canvas.move_component(id, index)
    }

    pub fn remove_component(&mut self, id: Uuid) -> Result<(), BuilderError> {
        let removed = self.canvas.remove_component(id)?;
        info!("Removed '{}' from canvas", removed.display_name);
        Ok(())
    }

    /// Document for the current state; rebuilt on every call.
    pub fn build_strategy(&self) -> Strategy {
        build_strategy(&self.canvas, &self.properties, &self.name)
    }

    pub async fn save(&self, notifier: &mut dyn Notifier) -> Result<(), SubmitError> {
        self.submit(SubmitAction::Save, notifier).await
    }

    pub async fn deploy(&self, notifier: &mut dyn Notifier) -> Result<(), SubmitError> {
        self.submit(SubmitAction::Deploy, notifier).await
    }

    /// One best-effort attempt; the outcome is shown to the user and returned.
    pub async fn submit(
        &self,
        action: SubmitAction,
        notifier: &mut dyn Notifier,
    ) -> Result<(), SubmitError> {
        let strategy = self.build_strategy();
        let outcome = submit_strategy(self.backend.as_ref(), action, &strategy).await;

        if let Some(audit) = &self.audit {
            audit.log_outcome(action, &strategy, &outcome);
        }

        match &outcome {
            Ok(()) => notifier.notify(action.success_message()),
            Err(e) => {
                error!("{}", e);
                notifier.notify(&e.to_string());
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::FakeBackend;
    use crate::client::{SubmitResponse, TransportFailure};
    use crate::constants::DEFAULT_STRATEGY_NAME;
    use crate::notify::tests::RecordingNotifier;
    use serde_json::json;
    use std::sync::Arc;

    /// Lets the test inspect the fake after handing it to the builder.
    struct SharedBackend(Arc<FakeBackend>);

    #[async_trait::async_trait]
    impl StrategyBackend for SharedBackend {
        async fn submit(
            &self,
            action: SubmitAction,
            strategy: &Strategy,
        ) -> Result<SubmitResponse, TransportFailure> {
            self.0.submit(action, strategy).await
        }
    }

    fn builder_with(fake: FakeBackend) -> (StrategyBuilder, Arc<FakeBackend>) {
        let fake = Arc::new(fake);
        let builder = StrategyBuilder::new(
            Box::new(SharedBackend(fake.clone())),
            DEFAULT_STRATEGY_NAME,
        );
        (builder, fake)
    }

    fn palette_index(builder: &StrategyBuilder, text: &str) -> usize {
        builder
            .palette()
            .items()
            .iter()
            .position(|i| i.text == text)
            .unwrap()
    }

    #[tokio::test]
    async fn test_drop_rsi_and_save_with_defaults() {
        let (mut builder, fake) = builder_with(FakeBackend::ok());
        let rsi = palette_index(&builder, "RSI");
        builder.drop_from_palette(rsi).unwrap();

        let mut notifier = RecordingNotifier::default();
        builder.save(&mut notifier).await.unwrap();

        assert_eq!(notifier.messages, vec!["Strategy saved successfully!"]);

        let sent = fake.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, SubmitAction::Save);
        let body = serde_json::to_value(&sent[0].1).unwrap();
        assert_eq!(body["name"], "My Strategy");
        assert_eq!(
            body["components"][0],
            json!({
                "type": "indicator",
                "name": "RSI",
                "config": {"period": "14", "overbought": "70", "oversold": "30"}
            })
        );
    }

    #[tokio::test]
    async fn test_save_rejected_by_backend() {
        let (builder, _) = builder_with(FakeBackend::replying(Ok(SubmitResponse {
            success: false,
            error: Some(json!("name required")),
        })));
        let mut notifier = RecordingNotifier::default();

        assert!(builder.save(&mut notifier).await.is_err());
        assert_eq!(notifier.messages, vec!["Error saving strategy: name required"]);
    }

    #[tokio::test]
    async fn test_deploy_transport_failure() {
        let (builder, _) = builder_with(FakeBackend::replying(Err(TransportFailure(
            "error sending request: connection refused".to_string(),
        ))));
        let mut notifier = RecordingNotifier::default();

        let err = builder.deploy(&mut notifier).await.unwrap_err();
        assert_eq!(err.action(), SubmitAction::Deploy);
        assert_eq!(
            notifier.messages,
            vec!["Error deploying strategy: error sending request: connection refused"]
        );
    }

    #[tokio::test]
    async fn test_repeated_clicks_send_independent_requests() {
        let (builder, fake) = builder_with(FakeBackend::ok());
        let mut notifier = RecordingNotifier::default();

        builder.save(&mut notifier).await.unwrap();
        builder.deploy(&mut notifier).await.unwrap();
        builder.save(&mut notifier).await.unwrap();

        let actions: Vec<SubmitAction> = fake.sent.lock().unwrap().iter().map(|s| s.0).collect();
        assert_eq!(
            actions,
            vec![SubmitAction::Save, SubmitAction::Deploy, SubmitAction::Save]
        );
        assert_eq!(notifier.messages.len(), 3);
    }

    #[test]
    fn test_edit_move_remove_through_controller() {
        let (mut builder, _) = builder_with(FakeBackend::ok());
        let ma = builder
            .drop_from_palette(palette_index(&builder, "Moving Average"))
            .unwrap();
        let buy = builder
            .drop_from_palette(palette_index(&builder, "Buy"))
            .unwrap();

        builder.edit_field(ma, "Type", "ema").unwrap();
        builder.move_component(buy, 0).unwrap();
        builder.properties_mut().asset_class = "Crypto".to_string();
        builder.set_name("Trend Follower");

        let strategy = builder.build_strategy();
        assert_eq!(strategy.name, "Trend Follower");
        assert_eq!(strategy.components[0].name, "Buy");
        assert_eq!(strategy.components[1].config["type"], "ema");
        assert_eq!(strategy.properties.asset_class, "Crypto");

        builder.remove_component(buy).unwrap();
        assert_eq!(builder.build_strategy().components.len(), 1);
    }

    #[test]
    fn test_load_strategy_round_trips_document() {
        let (mut builder, _) = builder_with(FakeBackend::ok());
        builder
            .drop_from_palette(palette_index(&builder, "MACD"))
            .unwrap();
        let condition = builder
            .drop_from_palette(palette_index(&builder, "Condition"))
            .unwrap();
        builder.edit_field(condition, "First Value", "rsi").unwrap();
        let original = builder.build_strategy();

        let (mut reopened, _) = builder_with(FakeBackend::ok());
        reopened.load_strategy(&original).unwrap();
        assert_eq!(reopened.build_strategy(), original);
    }
}
