//! Process-wide logging setup.

/// Tracing subscriber configuration (filters, output formats).
pub mod tracing;

pub use crate::tracing::{LogFormat, ParseLogFormatError, init_with};

/// Initialize process-wide logging with JSON output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    init_with(LogFormat::default());
}
