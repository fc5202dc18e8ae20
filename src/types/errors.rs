//! Error types for admin filters

use thiserror::Error;

/// Admin filter error type
#[derive(Debug, Error)]
pub enum AdminError {
	/// A filter was registered or constructed with an invalid configuration.
	/// This is a developer error and surfaces at construction time.
	#[error("Improperly configured: {0}")]
	ImproperlyConfigured(String),

	/// A captured lookup value could not be coerced to the field's type
	#[error("Validation error: {0}")]
	Validation(String),

	/// A lookup referenced a field the model does not declare
	#[error("Unknown lookup '{0}'")]
	UnknownLookup(String),

	/// Payload serialization error
	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

/// Result type for admin filter operations
pub type AdminResult<T> = Result<T, AdminError>;
