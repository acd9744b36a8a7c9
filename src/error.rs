use thiserror::Error;

use crate::client::SubmitAction;

#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("Unknown component type: '{0}'")]
    UnknownComponentType(String),
    #[error("Unknown indicator: '{0}'")]
    UnknownIndicator(String),
    #[error("Component {0} is not on the canvas")]
    ComponentNotFound(uuid::Uuid),
    #[error("Component '{component}' has no field '{field}'")]
    UnknownField { component: String, field: String },
    #[error("Invalid value '{value}' for field '{field}': {reason}")]
    InvalidFieldValue {
        field: String,
        value: String,
        reason: String,
    },
    #[error("Palette has no item at position {0}")]
    PaletteIndexOutOfRange(usize),
    #[error("Config error: {0}")]
    ConfigError(#[from] std::io::Error),
    #[error("Parsing error: {0}")]
    ParsingError(#[from] toml::de::Error),
    #[error("Serialization error: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Failure of a save or deploy attempt.
///
/// `Display` renders the exact message shown to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// The backend answered `success: false`.
    #[error("Error {} strategy: {message}", .action.verb())]
    Application {
        action: SubmitAction,
        message: String,
    },
    /// Network failure or a response body that is not the expected JSON.
    #[error("Error {} strategy: {message}", .action.verb())]
    Transport {
        action: SubmitAction,
        message: String,
    },
}

impl SubmitError {
    pub fn action(&self) -> SubmitAction {
        match self {
            SubmitError::Application { action, .. } | SubmitError::Transport { action, .. } => {
                *action
            }
        }
    }
}
