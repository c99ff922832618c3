/// Convenience result type used across nftforge.
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum ForgeError {
    /// Invalid user-provided parameters or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A required single-image asset could not be read or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// One or more required asset slots ended up empty.
    #[error("missing required assets: {}", .0.join(", "))]
    MissingAssets(Vec<String>),

    /// Failure while producing one item of a batch.
    #[error("generation error for item #{index:04}: {message}")]
    Generation {
        /// Zero-based index of the failing item.
        index: u32,
        /// Human-readable cause.
        message: String,
    },

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ForgeError {
    /// Build a [`ForgeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ForgeError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ForgeError::Generation`] value for item `index`.
    pub fn generation(index: u32, msg: impl Into<String>) -> Self {
        Self::Generation {
            index,
            message: msg.into(),
        }
    }

    /// Build a [`ForgeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
