use serde::{Deserialize, Serialize};

pub const RISK_TOLERANCE_RANGE: std::ops::RangeInclusive<u8> = 1..=10;
pub const DEFAULT_RISK_TOLERANCE: u8 = 5;
pub const TRADING_SESSIONS: &[&str] = &["Asian", "European", "American"];
pub const ASSET_CLASSES: &[&str] = &["Forex", "Crypto", "Commodities"];

/// Current values of the three strategy-wide controls.
///
/// Values are copied into the document as-is; nothing here checks them
/// against the option lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyControls {
    pub risk_tolerance: String,
    pub trading_session: String,
    pub asset_class: String,
}

impl Default for PropertyControls {
    fn default() -> Self {
        Self {
            risk_tolerance: DEFAULT_RISK_TOLERANCE.to_string(),
            trading_session: TRADING_SESSIONS[0].to_string(),
            asset_class: ASSET_CLASSES[0].to_string(),
        }
    }
}
