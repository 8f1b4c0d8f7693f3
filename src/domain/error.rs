//! Domain error types

use thiserror::Error;

/// Errors reported to callers of the toaster facade.
///
/// Every variant carries a fixed human-readable description. `NoError` exists
/// so the full status table can be presented (e.g. by the CLI); no operation
/// ever returns it as an `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ToastError {
    #[error("No error. The process was executed correctly")]
    NoError,

    #[error("The library has not been initialized")]
    NotInitialized,

    #[error("The OS does not support toast notifications")]
    SystemNotSupported,

    #[error("Failed to initialize apartment")]
    ApartmentInitError,

    #[error("The library was not able to create a Shell Link for the app")]
    ShellLinkNotCreated,

    #[error("The AUMI is not a valid one")]
    InvalidAppUserModelID,

    #[error("The parameters used to configure the library are not valid normally because an invalid AUMI or App Name")]
    InvalidParameters,

    #[error("The activation handler is not valid")]
    InvalidHandler,

    #[error("The toast was created correctly but it could not be displayed")]
    NotDisplayed,

    #[error("Unknown error")]
    UnknownError,
}

impl ToastError {
    /// All error kinds, in declaration order
    pub const ALL: [ToastError; 10] = [
        Self::NoError,
        Self::NotInitialized,
        Self::SystemNotSupported,
        Self::ApartmentInitError,
        Self::ShellLinkNotCreated,
        Self::InvalidAppUserModelID,
        Self::InvalidParameters,
        Self::InvalidHandler,
        Self::NotDisplayed,
        Self::UnknownError,
    ];

    /// Stable numeric code (declaration order, `NoError` = 0)
    pub const fn code(&self) -> i32 {
        match self {
            Self::NoError => 0,
            Self::NotInitialized => 1,
            Self::SystemNotSupported => 2,
            Self::ApartmentInitError => 3,
            Self::ShellLinkNotCreated => 4,
            Self::InvalidAppUserModelID => 5,
            Self::InvalidParameters => 6,
            Self::InvalidHandler => 7,
            Self::NotDisplayed => 8,
            Self::UnknownError => 9,
        }
    }
}

/// Failure of a single call into an OS service (COM, WinRT, registry, shell).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("{operation} failed (0x{code:08X}): {message}")]
    Os {
        operation: String,
        code: u32,
        message: String,
    },

    #[error("I/O error during {operation}: {message}")]
    Io { operation: String, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Rejected(String),

    #[error("Toast notifications are not available on this platform")]
    Unsupported,
}

impl PlatformError {
    /// Build an I/O flavoured error from a std error
    pub fn io(operation: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            message: err.to_string(),
        }
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for PlatformError {
    fn from(err: windows::core::Error) -> Self {
        Self::Os {
            operation: "WinRT/COM call".to_string(),
            code: err.code().0 as u32,
            message: err.message(),
        }
    }
}

/// Errors while compiling a template into a toast payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("Payload has no <{0}> element")]
    MissingElement(&'static str),

    #[error("Template declares {declared} text fields but the payload only has {available}")]
    TextFieldMismatch { declared: usize, available: usize },

    #[error("Image path is too long ({length} characters, limit {limit})")]
    PathTooLong { length: usize, limit: usize },

    #[error("Expiration of {milliseconds} ms is out of range")]
    ExpirationOutOfRange { milliseconds: i64 },

    #[error("Malformed toast XML: {0}")]
    Malformed(String),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

/// Error when an unknown shortcut policy name is parsed
#[derive(Debug, Clone, Error)]
#[error("Invalid shortcut policy: \"{input}\". Valid policies are: ignore, require-no-create, require-create")]
pub struct InvalidPolicyError {
    pub input: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_error_has_a_description() {
        for error in ToastError::ALL {
            assert!(!error.to_string().is_empty(), "{:?}", error);
        }
    }

    #[test]
    fn codes_follow_declaration_order() {
        for (index, error) in ToastError::ALL.iter().enumerate() {
            assert_eq!(error.code(), index as i32);
        }
    }

    #[test]
    fn not_initialized_description() {
        assert_eq!(
            ToastError::NotInitialized.to_string(),
            "The library has not been initialized"
        );
    }

    #[test]
    fn payload_error_wraps_platform_error() {
        let err: PayloadError = PlatformError::Unsupported.into();
        assert!(err.to_string().contains("not available"));
    }
}
