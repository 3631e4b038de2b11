//! Shared error type across camlink crates.

use thiserror::Error;

/// Stable error codes (safe to log, compare, and expose to clients).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Payload is not valid JSON.
    Malformed,
    /// No integer `event_id` in the payload.
    MissingDiscriminator,
    /// `event_id` is not in the catalog (only raised by strict callers).
    UnknownDiscriminator,
    /// A present field has the wrong shape for its variant.
    TypeMismatch,
    /// A key that does not belong to the matched variant (strict decoders only).
    UnknownField,
    /// Payload exceeds the configured size limit.
    PayloadTooLarge,
    /// An event could not be serialized.
    EncodeFailed,
    /// Invalid configuration.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Malformed => "MALFORMED",
            ErrorCode::MissingDiscriminator => "MISSING_DISCRIMINATOR",
            ErrorCode::UnknownDiscriminator => "UNKNOWN_DISCRIMINATOR",
            ErrorCode::TypeMismatch => "TYPE_MISMATCH",
            ErrorCode::UnknownField => "UNKNOWN_FIELD",
            ErrorCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ErrorCode::EncodeFailed => "ENCODE_FAILED",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, CamlinkError>;

/// Unified error type used by core and router.
#[derive(Debug, Error)]
pub enum CamlinkError {
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("missing or non-integer event_id")]
    MissingDiscriminator,
    #[error("unknown event_id: {0}")]
    UnknownDiscriminator(i128),
    #[error("type mismatch in {event}: {detail}")]
    TypeMismatch { event: &'static str, detail: String },
    #[error("unknown field `{field}` for {event}")]
    UnknownField { event: &'static str, field: String },
    #[error("payload too large: {len} > {max} bytes")]
    PayloadTooLarge { len: usize, max: usize },
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl CamlinkError {
    /// Map an error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            CamlinkError::Malformed(_) => ErrorCode::Malformed,
            CamlinkError::MissingDiscriminator => ErrorCode::MissingDiscriminator,
            CamlinkError::UnknownDiscriminator(_) => ErrorCode::UnknownDiscriminator,
            CamlinkError::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            CamlinkError::UnknownField { .. } => ErrorCode::UnknownField,
            CamlinkError::PayloadTooLarge { .. } => ErrorCode::PayloadTooLarge,
            CamlinkError::Encode(_) => ErrorCode::EncodeFailed,
            CamlinkError::BadConfig(_) => ErrorCode::BadConfig,
            CamlinkError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            CamlinkError::Internal(_) => ErrorCode::Internal,
        }
    }
}
