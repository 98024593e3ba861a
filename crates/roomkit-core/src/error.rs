//! Error kinds shared by every roomkit crate.
//!
//! The taxonomy is flat: an [`Error`] is an [`ErrorKind`] plus an
//! optional human-readable message. Server-reported `M_*` codes are folded
//! into the same set via [`ErrorKind::from_errcode`].

use std::fmt;

/// Result type for roomkit operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The symbolic cause of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Talking to the server failed.
    Communication,
    /// Required data is missing.
    Incomplete,
    /// The request was rejected as malformed.
    BadRequest,
    /// The server answered with something we could not use.
    BadResponse,
    /// An identifier is malformed.
    InvalidId,
    /// A type tag is wrong, unregistered, or disagrees with the document.
    InvalidType,
    /// A value has the wrong JSON shape.
    InvalidFormat,
    /// The operation is not supported.
    Unsupported,
    /// The resource is temporarily unavailable.
    Unavailable,
    /// The resource does not exist.
    NotFound,
    /// The resource already exists.
    AlreadyExists,
    /// A field holds a value that has no wire representation.
    UnknownValue,
    /// Anything the SDK cannot classify.
    Unknown,
}

impl ErrorKind {
    /// Returns the stable snake_case name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Communication => "communication_error",
            Self::Incomplete => "incomplete",
            Self::BadRequest => "bad_request",
            Self::BadResponse => "bad_response",
            Self::InvalidId => "invalid_id",
            Self::InvalidType => "invalid_type",
            Self::InvalidFormat => "invalid_format",
            Self::Unsupported => "unsupported",
            Self::Unavailable => "unavailable",
            Self::NotFound => "not_found",
            Self::AlreadyExists => "already_exists",
            Self::UnknownValue => "unknown_value",
            Self::Unknown => "unknown_error",
        }
    }

    /// Returns a human-readable description of this kind.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Communication => "communication with the server failed",
            Self::Incomplete => "incomplete data",
            Self::BadRequest => "bad request",
            Self::BadResponse => "bad response from the server",
            Self::InvalidId => "invalid identifier",
            Self::InvalidType => "invalid type",
            Self::InvalidFormat => "invalid format",
            Self::Unsupported => "operation not supported",
            Self::Unavailable => "resource unavailable",
            Self::NotFound => "not found",
            Self::AlreadyExists => "already exists",
            Self::UnknownValue => "unknown value",
            Self::Unknown => "unknown error",
        }
    }

    /// Maps a server-reported `errcode` onto a kind.
    ///
    /// Codes this SDK has never seen map to [`ErrorKind::Unknown`].
    pub fn from_errcode(errcode: &str) -> Self {
        match errcode {
            "M_NOT_FOUND" => Self::NotFound,
            "M_BAD_JSON" | "M_NOT_JSON" | "M_MISSING_PARAM" | "M_INVALID_PARAM" => {
                Self::BadRequest
            }
            "M_FORBIDDEN" | "M_UNKNOWN_TOKEN" | "M_MISSING_TOKEN" => Self::BadRequest,
            "M_USER_IN_USE" | "M_ROOM_IN_USE" => Self::AlreadyExists,
            "M_INVALID_USERNAME" | "M_INVALID_ROOM_STATE" => Self::InvalidId,
            "M_UNRECOGNIZED" | "M_UNSUPPORTED_ROOM_VERSION" => Self::Unsupported,
            "M_LIMIT_EXCEEDED" | "M_RESOURCE_LIMIT_EXCEEDED" => Self::Unavailable,
            "M_TOO_LARGE" => Self::BadRequest,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error raised anywhere in roomkit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
}

impl Error {
    /// Creates an error of the given kind with a message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
        }
    }

    /// Creates an error of the given kind without a message.
    pub fn bare(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Builds an error from a server `errcode` and its `error` text.
    pub fn from_server(errcode: &str, message: Option<&str>) -> Self {
        let kind = ErrorKind::from_errcode(errcode);
        Self {
            kind,
            message: Some(match message {
                Some(text) => format!("{errcode}: {text}"),
                None => errcode.to_string(),
            }),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns true if this error has the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    pub fn incomplete(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Incomplete, message)
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidId, message)
    }

    pub fn invalid_type(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidType, message)
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidFormat, message)
    }

    pub fn unknown_value(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownValue, message)
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unsupported, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.kind.description(), message),
            None => f.write_str(self.kind.description()),
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::bare(kind)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_format(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_message() {
        let err = Error::incomplete("state_key is not set");
        assert_eq!(err.to_string(), "incomplete data: state_key is not set");
        assert_eq!(err.kind(), ErrorKind::Incomplete);
    }

    #[test]
    fn display_without_message() {
        let err = Error::bare(ErrorKind::NotFound);
        assert_eq!(err.to_string(), "not found");
        assert!(err.message().is_none());
    }

    #[test]
    fn errcode_mapping() {
        assert_eq!(ErrorKind::from_errcode("M_NOT_FOUND"), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_errcode("M_BAD_JSON"), ErrorKind::BadRequest);
        assert_eq!(
            ErrorKind::from_errcode("M_USER_IN_USE"),
            ErrorKind::AlreadyExists
        );
        assert_eq!(
            ErrorKind::from_errcode("M_LIMIT_EXCEEDED"),
            ErrorKind::Unavailable
        );
    }

    #[test]
    fn unseen_errcode_is_unknown() {
        let err = Error::from_server("M_SOMETHING_NEW", Some("brand new"));
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert_eq!(err.message(), Some("M_SOMETHING_NEW: brand new"));
    }

    #[test]
    fn json_errors_are_invalid_format() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: Error = parse.unwrap_err().into();
        assert!(err.is(ErrorKind::InvalidFormat));
    }

    #[test]
    fn kind_names_are_distinct() {
        let kinds = [
            ErrorKind::Communication,
            ErrorKind::Incomplete,
            ErrorKind::BadRequest,
            ErrorKind::BadResponse,
            ErrorKind::InvalidId,
            ErrorKind::InvalidType,
            ErrorKind::InvalidFormat,
            ErrorKind::Unsupported,
            ErrorKind::Unavailable,
            ErrorKind::NotFound,
            ErrorKind::AlreadyExists,
            ErrorKind::UnknownValue,
            ErrorKind::Unknown,
        ];
        let mut names: Vec<_> = kinds.iter().map(ErrorKind::as_str).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), kinds.len());
    }
}
