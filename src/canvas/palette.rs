use serde::{Deserialize, Serialize};

use crate::error::BuilderError;
use crate::strategy::types::{ComponentType, IndicatorKind};

/// A draggable template in the read-only source list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteItem {
    pub data_type: String,
    pub text: String,
}

impl PaletteItem {
    pub fn new(data_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Palette {
    items: Vec<PaletteItem>,
}

impl Palette {
    pub fn items(&self) -> &[PaletteItem] {
        &self.items
    }

    /// Clone of the item at `index`. The palette itself is never depleted.
    pub fn pick(&self, index: usize) -> Result<PaletteItem, BuilderError> {
        self.items
            .get(index)
            .cloned()
            .ok_or(BuilderError::PaletteIndexOutOfRange(index))
    }
}

impl Default for Palette {
    fn default() -> Self {
        let mut items: Vec<PaletteItem> = IndicatorKind::ALL
            .iter()
            .map(|kind| PaletteItem::new(ComponentType::Indicator.as_str(), kind.label()))
            .collect();
        items.push(PaletteItem::new(ComponentType::Condition.as_str(), "Condition"));
        items.push(PaletteItem::new(ComponentType::Action.as_str(), "Buy"));
        items.push(PaletteItem::new(ComponentType::Action.as_str(), "Sell"));
        Self { items }
    }
}

pub fn print_component_help(palette: &Palette) {
    println!("Available Components:\n");
    for (i, item) in palette.items().iter().enumerate() {
        println!("{}. {} (type = '{}')", i + 1, item.text, item.data_type);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        let labels: Vec<&str> = palette.items().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Moving Average", "RSI", "MACD", "Condition", "Buy", "Sell"]
        );
    }

    #[test]
    fn test_pick_clones_without_depleting() {
        let palette = Palette::default();
        let first = palette.pick(1).unwrap();
        let second = palette.pick(1).unwrap();
        assert_eq!(first, second);
        assert_eq!(palette.items().len(), 6);
        assert!(matches!(
            palette.pick(42),
            Err(BuilderError::PaletteIndexOutOfRange(42))
        ));
    }
}
