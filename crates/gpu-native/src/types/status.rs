use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Category of a native error (`GPU_ErrorEnum`).
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, TryFromPrimitive, IntoPrimitive)]
pub enum ErrorCode {
    #[default]
    NoError = 0,
    BackendError = 1,
    DataError = 2,
    UserError = 3,
    UnsupportedFunction = 4,
    NullArgument = 5,
    FileNotFound = 6,
}

impl ErrorCode {
    /// Same wording as `GPU_GetErrorString`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoError => "NO ERROR",
            Self::BackendError => "BACKEND ERROR",
            Self::DataError => "DATA ERROR",
            Self::UserError => "USER ERROR",
            Self::UnsupportedFunction => "UNSUPPORTED FUNCTION",
            Self::NullArgument => "NULL ARGUMENT",
            Self::FileNotFound => "FILE NOT FOUND",
        }
    }
}

/// One entry of the native error stack.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct ErrorObject {
    pub function: String,
    pub error: ErrorCode,
    pub details: String,
}

impl ErrorObject {
    pub fn new(function: impl Into<String>, error: ErrorCode, details: impl Into<String>) -> Self {
        Self { function: function.into(), error, details: details.into() }
    }
}

impl std::fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.function.is_empty() {
            write!(f, "{}: {}", self.error.as_str(), self.details)
        } else {
            write!(f, "{}: {}: {}", self.function, self.error.as_str(), self.details)
        }
    }
}
