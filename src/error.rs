//! Error types.

use thiserror::Error;

/// Errors raised at the edges of the crate.
///
/// Pillar derivation and profile analysis never fail on a well-formed
/// [`CivilTime`](crate::civil::CivilTime); these variants cover turning
/// outside input into one, and the collaborators around the core.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The birth instant is not a finite, representable point in time.
    #[error("malformed instant: {0}")]
    MalformedInstant(String),

    /// Civil-time offsets must stay strictly within one day of UTC.
    #[error("utc offset out of range: {0} minutes")]
    OffsetOutOfRange(i32),

    /// Glyph that names no stem or branch.
    #[error("unknown stem or branch symbol: {0:?}")]
    UnknownSymbol(String),

    /// Text that cannot be read back as a pillar.
    #[error("invalid pillar: {0}")]
    InvalidPillar(String),

    #[error("unknown gender: {0:?} (expected \"male\" or \"female\")")]
    UnknownGender(String),

    #[error("configuration error: {0}")]
    Config(String),

    /// A calendar authority could not supply a conversion.
    #[error("calendar authority failed: {0}")]
    Authority(String),
}

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = Error::MalformedInstant("NaN".into());
        assert_eq!(err.to_string(), "malformed instant: NaN");

        let err = Error::OffsetOutOfRange(1500);
        assert_eq!(err.to_string(), "utc offset out of range: 1500 minutes");

        let err = Error::UnknownSymbol("x".into());
        assert_eq!(err.to_string(), "unknown stem or branch symbol: \"x\"");

        let err = Error::UnknownGender("other".into());
        assert_eq!(
            err.to_string(),
            "unknown gender: \"other\" (expected \"male\" or \"female\")"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
