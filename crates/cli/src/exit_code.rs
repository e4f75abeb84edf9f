//! Exit code definitions for s3upload
//!
//! Scripts depend on these values. Do not renumber them.

use s3upload_core::Error;

/// Exit codes for the s3upload application.
///
/// Each failure class gets its own code so that scripts can tell a typo on
/// the command line from an unreadable file or a rejected upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// All files uploaded (unreadable files were skipped)
    Success = 0,

    /// User input error: invalid arguments, bad configuration
    UsageError = 1,

    /// Local I/O failure: credentials file or upload source unreadable
    IoError = 2,

    /// Storage service failure: authentication, network, rejected request
    StorageError = 3,

    /// System failure: missing credential, request could not be built
    SystemError = 4,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Create exit code from i32 value
    ///
    /// Returns None if the value doesn't correspond to a known exit code.
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::UsageError),
            2 => Some(Self::IoError),
            3 => Some(Self::StorageError),
            4 => Some(Self::SystemError),
            _ => None,
        }
    }

    /// Get a human-readable description of the exit code
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Operation completed successfully",
            Self::UsageError => "Invalid arguments or configuration",
            Self::IoError => "Local I/O error",
            Self::StorageError => "Storage service error",
            Self::SystemError => "System error",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        Self::from_i32(err.exit_code()).unwrap_or(Self::SystemError)
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}
