//! Central constants for strategy-builder.
//!
//! Endpoint paths and defaults shared by the controller, the HTTP client and
//! the configuration loader.

// =============================================================================
// BACKEND
// =============================================================================

/// Endpoint that stores a strategy document
pub const SAVE_ENDPOINT: &str = "/api/strategy/save";

/// Endpoint that stores and activates a strategy document
pub const DEPLOY_ENDPOINT: &str = "/api/strategy/deploy";

/// Used when neither the config file nor the environment names a backend
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Environment override for the backend base URL
pub const BACKEND_URL_ENV: &str = "STRATEGY_BACKEND_URL";

// =============================================================================
// DOCUMENT DEFAULTS
// =============================================================================

/// Name given to a strategy nobody renamed
pub const DEFAULT_STRATEGY_NAME: &str = "My Strategy";

/// Directory for the submission audit CSV and application logs
pub const DEFAULT_LOG_DIR: &str = "logs";
