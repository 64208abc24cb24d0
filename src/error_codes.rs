//! Machine-readable failures for the `vfxd` command line.
//!
//! Plan generation itself never fails; these codes cover bad CLI input and
//! unusable vocabulary catalogs.

use std::fmt;

use anyhow::Error;
use serde::Serialize;
use serde_json::Value;

/// Exit status for failures that carry no [`CodedError`].
pub const GENERIC_EXIT_CODE: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// `--sample` pointed past the built-in sample prompts.
    InvalidSampleIndex,
    /// A catalog file could not be read, parsed or validated.
    InvalidCatalog,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidSampleIndex => "INVALID_SAMPLE_INDEX",
            Self::InvalidCatalog => "INVALID_CATALOG",
        }
    }

    /// Usage and configuration problems both exit with 2.
    pub fn exit_code(self) -> u8 {
        match self {
            Self::InvalidSampleIndex | Self::InvalidCatalog => 2,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct CodedError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<Value>,
}

impl CodedError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl fmt::Display for CodedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for CodedError {}

/// `{ "ok": false, "error": { code, message, details? } }` as printed on stderr.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<&CodedError> for ErrorEnvelope {
    fn from(coded: &CodedError) -> Self {
        Self {
            ok: false,
            error: ErrorBody {
                code: coded.code.as_str().to_owned(),
                message: coded.message.clone(),
                details: coded.details.clone(),
            },
        }
    }
}

impl ErrorEnvelope {
    /// Uses the coded error in the chain when there is one, otherwise reports
    /// `FAILED` with the full context chain as the message.
    pub fn from_error(error: &Error) -> Self {
        match find_coded_error(error) {
            Some(coded) => Self::from(coded),
            None => Self {
                ok: false,
                error: ErrorBody {
                    code: "FAILED".to_owned(),
                    message: format!("{error:#}"),
                    details: None,
                },
            },
        }
    }
}

pub fn find_coded_error(error: &Error) -> Option<&CodedError> {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<CodedError>())
}

/// Process exit status for `error`.
pub fn exit_code_for(error: &Error) -> u8 {
    find_coded_error(error)
        .map(|coded| coded.code.exit_code())
        .unwrap_or(GENERIC_EXIT_CODE)
}
