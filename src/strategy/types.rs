use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BuilderError;

/// The `data-type` carried by palette items and written to the document.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Indicator,
    Condition,
    Action,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Indicator => "indicator",
            ComponentType::Condition => "condition",
            ComponentType::Action => "action",
        }
    }

    pub fn parse(data_type: &str) -> Result<Self, BuilderError> {
        match data_type.trim() {
            "indicator" => Ok(ComponentType::Indicator),
            "condition" => Ok(ComponentType::Condition),
            "action" => Ok(ComponentType::Action),
            other => Err(BuilderError::UnknownComponentType(other.to_string())),
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    MovingAverage,
    Rsi,
    Macd,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 3] = [
        IndicatorKind::MovingAverage,
        IndicatorKind::Rsi,
        IndicatorKind::Macd,
    ];

    /// Label the palette shows for this indicator.
    pub fn label(&self) -> &'static str {
        match self {
            IndicatorKind::MovingAverage => "Moving Average",
            IndicatorKind::Rsi => "RSI",
            IndicatorKind::Macd => "MACD",
        }
    }

    pub fn from_label(text: &str) -> Result<Self, BuilderError> {
        let text = text.trim();
        IndicatorKind::ALL
            .into_iter()
            .find(|kind| kind.label() == text)
            .ok_or_else(|| BuilderError::UnknownIndicator(text.to_string()))
    }
}

/// What a placed component is. Selects its configuration schema.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Indicator(IndicatorKind),
    Condition,
    Action,
}

impl ComponentKind {
    /// Resolve a dropped item's `data-type` and text into a kind.
    ///
    /// Indicators are told apart by their trimmed text; conditions and actions
    /// accept any text.
    pub fn resolve(data_type: &str, text: &str) -> Result<Self, BuilderError> {
        match ComponentType::parse(data_type)? {
            ComponentType::Indicator => Ok(ComponentKind::Indicator(IndicatorKind::from_label(
                first_line(text),
            )?)),
            ComponentType::Condition => Ok(ComponentKind::Condition),
            ComponentType::Action => Ok(ComponentKind::Action),
        }
    }

    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentKind::Indicator(_) => ComponentType::Indicator,
            ComponentKind::Condition => ComponentType::Condition,
            ComponentKind::Action => ComponentType::Action,
        }
    }
}

/// First line of `text`, trimmed.
pub fn first_line(text: &str) -> &str {
    text.trim_start().lines().next().unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_indicators() {
        assert_eq!(
            ComponentKind::resolve("indicator", "  RSI \n").unwrap(),
            ComponentKind::Indicator(IndicatorKind::Rsi)
        );
        assert_eq!(
            ComponentKind::resolve("indicator", "Moving Average").unwrap(),
            ComponentKind::Indicator(IndicatorKind::MovingAverage)
        );
        assert_eq!(
            ComponentKind::resolve("indicator", "MACD").unwrap(),
            ComponentKind::Indicator(IndicatorKind::Macd)
        );
    }

    #[test]
    fn test_resolve_unknown_indicator_is_error() {
        let err = ComponentKind::resolve("indicator", "Bollinger Bands").unwrap_err();
        assert!(matches!(err, BuilderError::UnknownIndicator(ref name) if name == "Bollinger Bands"));
    }

    #[test]
    fn test_resolve_unknown_type_is_error() {
        let err = ComponentKind::resolve("filter", "Volume").unwrap_err();
        assert_eq!(err.to_string(), "Unknown component type: 'filter'");
    }

    #[test]
    fn test_condition_and_action_ignore_text() {
        assert_eq!(
            ComponentKind::resolve("condition", "anything").unwrap(),
            ComponentKind::Condition
        );
        assert_eq!(
            ComponentKind::resolve("action", "Buy").unwrap().component_type(),
            ComponentType::Action
        );
    }

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("\n  RSI  \nPeriod"), "RSI");
        assert_eq!(first_line(""), "");
    }
}
