//! Logging utilities.
//!
//! Centralizes logger initialization. Library code only uses the `log`
//! facade; binaries call [`init_logging`] once at startup, and the filter can
//! also be set through the `GPU_LOG` environment variable.

mod init;

pub use init::{GPU_LOG_VAR, LoggingConfig, init_logging};
