use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod schema;
pub mod types;

use crate::canvas::{Canvas, PlacedComponent};
use crate::error::BuilderError;
use crate::properties::PropertyControls;
use self::schema::schema_for;
use self::types::ComponentKind;

/// One entry of the document's `components` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDoc {
    #[serde(rename = "type")]
    pub component_type: String,
    pub name: String,
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

/// The document posted to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    pub name: String,
    #[serde(default)]
    pub components: Vec<ComponentDoc>,
    pub properties: PropertyControls,
}

/// Snapshot the canvas into a document. Components keep canvas order.
pub fn build_strategy(canvas: &Canvas, properties: &PropertyControls, name: &str) -> Strategy {
    Strategy {
        name: name.to_string(),
        components: canvas
            .components()
            .iter()
            .map(|component| ComponentDoc {
                component_type: component.component_type().to_string(),
                name: component.display_name.clone(),
                config: extract_component_config(component),
            })
            .collect(),
        properties: properties.clone(),
    }
}

pub fn extract_component_config(component: &PlacedComponent) -> BTreeMap<String, String> {
    component.extract_config()
}

impl Strategy {
    pub fn validate(&self) -> Result<(), BuilderError> {
        if self.name.trim().is_empty() {
            return Err(BuilderError::ValidationError(
                "Strategy name must not be empty.".to_string(),
            ));
        }

        for (i, component) in self.components.iter().enumerate() {
            component
                .validate()
                .map_err(|e| BuilderError::ValidationError(format!("component {}: {}", i + 1, e)))?;
        }

        let p = &self.properties;
        for (label, value) in [
            ("riskTolerance", &p.risk_tolerance),
            ("tradingSession", &p.trading_session),
            ("assetClass", &p.asset_class),
        ] {
            if value.trim().is_empty() {
                return Err(BuilderError::ValidationError(format!(
                    "Property {} must not be empty.",
                    label
                )));
            }
        }
        Ok(())
    }
}

impl ComponentDoc {
    /// Check the entry against the schema of the kind it names.
    pub fn validate(&self) -> Result<(), BuilderError> {
        let kind = ComponentKind::resolve(&self.component_type, &self.name)?;
        let schema = schema_for(kind);

        for field in schema {
            let key = field.key();
            let value = self
                .config
                .get(&key)
                .ok_or_else(|| BuilderError::ValidationError(format!("missing field '{}'", key)))?;
            field.check(value)?;
        }

        if let Some(extra) = self
            .config
            .keys()
            .find(|k| !schema.iter().any(|f| &f.key() == *k))
        {
            return Err(BuilderError::UnknownField {
                component: self.name.clone(),
                field: extra.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::palette::PaletteItem;
    use serde_json::json;

    fn strategy_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "required": ["name", "components", "properties"],
            "properties": {
                "name": {"type": "string"},
                "components": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["type", "name", "config"],
                        "properties": {
                            "type": {"enum": ["indicator", "condition", "action"]},
                            "name": {"type": "string"},
                            "config": {
                                "type": "object",
                                "additionalProperties": {"type": "string"}
                            }
                        }
                    }
                },
                "properties": {
                    "type": "object",
                    "required": ["riskTolerance", "tradingSession", "assetClass"],
                    "additionalProperties": false,
                    "properties": {
                        "riskTolerance": {"type": "string"},
                        "tradingSession": {"type": "string"},
                        "assetClass": {"type": "string"}
                    }
                }
            }
        })
    }

    #[test]
    fn test_empty_canvas() {
        let controls = PropertyControls {
            risk_tolerance: "8".to_string(),
            trading_session: "European".to_string(),
            asset_class: "Crypto".to_string(),
        };
        let strategy = build_strategy(&Canvas::new(), &controls, "My Strategy");
        assert!(strategy.components.is_empty());
        assert_eq!(strategy.properties, controls);

        let doc = serde_json::to_value(&strategy).unwrap();
        assert_eq!(doc["components"], json!([]));
        assert_eq!(doc["properties"]["tradingSession"], "European");
    }

    #[test]
    fn test_rsi_document_shape() {
        let mut canvas = Canvas::new();
        canvas
            .drop_item(&PaletteItem::new("indicator", "RSI"))
            .unwrap();
        let strategy = build_strategy(&canvas, &PropertyControls::default(), "My Strategy");

        let doc = serde_json::to_value(&strategy).unwrap();
        assert_eq!(
            doc["components"][0],
            json!({
                "type": "indicator",
                "name": "RSI",
                "config": {"period": "14", "overbought": "70", "oversold": "30"}
            })
        );

        let validator = jsonschema::validator_for(&strategy_schema()).unwrap();
        assert!(validator.is_valid(&doc));
    }

    #[test]
    fn test_components_follow_canvas_order() {
        let mut canvas = Canvas::new();
        canvas
            .drop_item(&PaletteItem::new("condition", "Condition"))
            .unwrap();
        let buy = canvas
            .drop_item(&PaletteItem::new("action", "Buy"))
            .unwrap()
            .id;
        canvas
            .drop_item(&PaletteItem::new("indicator", "MACD"))
            .unwrap();
        canvas.move_component(buy, 0).unwrap();

        let strategy = build_strategy(&canvas, &PropertyControls::default(), "Ordered");
        let names: Vec<&str> = strategy.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Buy", "Condition", "MACD"]);
        assert!(strategy.validate().is_ok());
    }

    #[test]
    fn test_document_reflects_edits_at_call_time() {
        let mut canvas = Canvas::new();
        let id = canvas
            .drop_item(&PaletteItem::new("action", "Buy"))
            .unwrap()
            .id;
        let before = build_strategy(&canvas, &PropertyControls::default(), "S");
        canvas.set_field(id, "Stop Loss (pips)", "25").unwrap();
        let after = build_strategy(&canvas, &PropertyControls::default(), "S");

        assert_eq!(before.components[0].config["stop loss (pips)"], "50");
        assert_eq!(after.components[0].config["stop loss (pips)"], "25");
    }

    #[test]
    fn test_validate_rejects_bad_documents() {
        let mut strategy = build_strategy(&Canvas::new(), &PropertyControls::default(), "  ");
        assert!(strategy.validate().is_err());

        strategy.name = "Valid".to_string();
        strategy.components.push(ComponentDoc {
            component_type: "indicator".to_string(),
            name: "RSI".to_string(),
            config: BTreeMap::from([("period".to_string(), "14".to_string())]),
        });
        let err = strategy.validate().unwrap_err();
        assert!(err.to_string().contains("missing field 'overbought'"));

        strategy.components[0].config.extend([
            ("overbought".to_string(), "70".to_string()),
            ("oversold".to_string(), "30".to_string()),
            ("smoothing".to_string(), "3".to_string()),
        ]);
        assert!(strategy.validate().is_err());

        strategy.components[0].config.remove("smoothing");
        assert!(strategy.validate().is_ok());

        strategy.properties.asset_class = String::new();
        assert!(strategy.validate().is_err());
    }
}
