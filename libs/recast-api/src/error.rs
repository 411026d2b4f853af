/// Dispatch-time failure, surfaced to callers of `cast`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CastError {
    #[error("no converter for '{from}' => '{to}' among {registry_size} registered")]
    ConversionNotFound {
        from: String,
        to: String,
        registry_size: usize,
    },

    #[error("fail to cast from <{from}> to <{to}> for {{{value}}} because: {cause}")]
    ConversionFailed {
        from: String,
        to: String,
        value: String,
        cause: String,
    },

    /// A primitive target kind with no canonical zero value was asked to
    /// produce one. The zero table covers every kind but `void`, so hitting
    /// this is a programming defect, not a runtime outcome.
    #[error("primitive type '{0}' has no default value")]
    Unsupported(String),
}

/// Failure raised inside a converter body.
///
/// `Cast` carries an already-typed dispatch failure — converters that cast
/// elements recursively produce these, and the dispatcher propagates them
/// unchanged. Everything else is `Other` and gets wrapped into
/// `CastError::ConversionFailed` with full context at the dispatch boundary.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Cast(#[from] CastError),

    #[error("{0}")]
    Other(String),
}

impl ConvertError {
    pub fn other(msg: impl Into<String>) -> Self {
        ConvertError::Other(msg.into())
    }
}

// ---------------------------------------------------------------------------
// From impls: standard error types → ConvertError, so converter bodies use `?`
// ---------------------------------------------------------------------------

impl From<std::num::ParseIntError> for ConvertError {
    fn from(e: std::num::ParseIntError) -> Self {
        ConvertError::Other(e.to_string())
    }
}

impl From<std::num::ParseFloatError> for ConvertError {
    fn from(e: std::num::ParseFloatError) -> Self {
        ConvertError::Other(e.to_string())
    }
}

impl From<std::str::ParseBoolError> for ConvertError {
    fn from(e: std::str::ParseBoolError) -> Self {
        ConvertError::Other(e.to_string())
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(e: serde_json::Error) -> Self {
        ConvertError::Other(e.to_string())
    }
}
