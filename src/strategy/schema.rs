//! Configuration schemas for each component kind.
//!
//! A schema is the single source for both the form shown to the user and the
//! keys written into the strategy document.

use super::types::{ComponentKind, IndicatorKind};
use crate::error::BuilderError;

/// One selectable option of a choice field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Accepts values in `min..=max`.
    Number { default: f64, min: f64, max: f64 },
    /// Defaults to the first option.
    Choice { options: &'static [FieldOption] },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Key under which the value is written to the document.
    pub fn key(&self) -> String {
        self.label.to_lowercase()
    }

    pub fn default_value(&self) -> String {
        match self.kind {
            FieldKind::Number { default, .. } => format_number(default),
            FieldKind::Choice { options } => options
                .first()
                .map(|o| o.value.to_string())
                .unwrap_or_default(),
        }
    }

    /// Check a user-supplied value. Returns the value as it will be stored.
    pub fn check(&self, value: &str) -> Result<String, BuilderError> {
        let value = value.trim();
        match self.kind {
            FieldKind::Number { min, max, .. } => {
                let number = value
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| BuilderError::InvalidFieldValue {
                        field: self.label.to_string(),
                        value: value.to_string(),
                        reason: "expected a number".to_string(),
                    })?;
                if number < min || number > max {
                    return Err(BuilderError::InvalidFieldValue {
                        field: self.label.to_string(),
                        value: value.to_string(),
                        reason: format!(
                            "expected a number between {} and {}",
                            format_number(min),
                            format_number(max)
                        ),
                    });
                }
                Ok(value.to_string())
            }
            FieldKind::Choice { options } => {
                if options.iter().any(|o| o.value == value) {
                    Ok(value.to_string())
                } else {
                    let allowed: Vec<&str> = options.iter().map(|o| o.value).collect();
                    Err(BuilderError::InvalidFieldValue {
                        field: self.label.to_string(),
                        value: value.to_string(),
                        reason: format!("expected one of {}", allowed.join(", ")),
                    })
                }
            }
        }
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

const fn number(label: &'static str, default: f64, min: f64, max: f64) -> FieldSpec {
    FieldSpec {
        label,
        kind: FieldKind::Number { default, min, max },
    }
}

const fn choice(label: &'static str, options: &'static [FieldOption]) -> FieldSpec {
    FieldSpec {
        label,
        kind: FieldKind::Choice { options },
    }
}

const fn opt(value: &'static str, label: &'static str) -> FieldOption {
    FieldOption { value, label }
}

const MA_TYPES: &[FieldOption] = &[opt("sma", "Simple"), opt("ema", "Exponential")];

const OPERANDS: &[FieldOption] = &[
    opt("price", "Price"),
    opt("ma", "Moving Average"),
    opt("rsi", "RSI"),
];

const OPERATORS: &[FieldOption] = &[
    opt("crosses_above", "Crosses Above"),
    opt("crosses_below", "Crosses Below"),
    opt("greater_than", "Greater Than"),
    opt("less_than", "Less Than"),
];

const MOVING_AVERAGE: &[FieldSpec] = &[
    number("Period", 14.0, 5.0, 200.0),
    choice("Type", MA_TYPES),
];

const RSI: &[FieldSpec] = &[
    number("Period", 14.0, 5.0, 50.0),
    number("Overbought", 70.0, 50.0, 90.0),
    number("Oversold", 30.0, 10.0, 50.0),
];

const MACD: &[FieldSpec] = &[
    number("Fast Period", 12.0, 5.0, 50.0),
    number("Slow Period", 26.0, 10.0, 100.0),
    number("Signal Period", 9.0, 5.0, 50.0),
];

const CONDITION: &[FieldSpec] = &[
    choice("First Value", OPERANDS),
    choice("Condition", OPERATORS),
    choice("Second Value", OPERANDS),
];

const ACTION: &[FieldSpec] = &[
    number("Position Size", 1.0, 0.01, 10.0),
    number("Stop Loss (pips)", 50.0, 10.0, 1000.0),
    number("Take Profit (pips)", 100.0, 10.0, 1000.0),
];

pub fn schema_for(kind: ComponentKind) -> &'static [FieldSpec] {
    match kind {
        ComponentKind::Indicator(IndicatorKind::MovingAverage) => MOVING_AVERAGE,
        ComponentKind::Indicator(IndicatorKind::Rsi) => RSI,
        ComponentKind::Indicator(IndicatorKind::Macd) => MACD,
        ComponentKind::Condition => CONDITION,
        ComponentKind::Action => ACTION,
    }
}
