//! Coarse failure taxonomy shared by every layer.

/// The five ways an autopx operation can fail.
///
/// # Examples
///
/// ```
/// use autopx_error::ErrorCategory;
///
/// assert_eq!(ErrorCategory::MalformedOutput.as_str(), "malformed_output");
/// assert_eq!(format!("{}", ErrorCategory::RemoteRejected), "remote_rejected");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ErrorCategory {
    /// Client-side schema violation; never reaches the network.
    #[display("invalid_input")]
    InvalidInput,
    /// A required credential or setting is absent.
    #[display("configuration_missing")]
    ConfigurationMissing,
    /// Network or backend exception.
    #[display("backend_unavailable")]
    BackendUnavailable,
    /// The backend responded but its output violated the declared shape.
    #[display("malformed_output")]
    MalformedOutput,
    /// The target platform returned an error status or body.
    #[display("remote_rejected")]
    RemoteRejected,
}

impl ErrorCategory {
    /// Stable snake_case label, used in API bodies and metric attributes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::ConfigurationMissing => "configuration_missing",
            Self::BackendUnavailable => "backend_unavailable",
            Self::MalformedOutput => "malformed_output",
            Self::RemoteRejected => "remote_rejected",
        }
    }
}
