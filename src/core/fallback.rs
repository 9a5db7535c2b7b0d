//! Out-of-band error reporting
//!
//! Failures inside the pipeline (sink errors, overflow drops, misuse after
//! close) are never routed back through the pipeline itself. They go to a
//! [`FallbackHandler`], which by default prints one line to stderr.

use super::error::LoggerError;
use std::sync::Arc;

/// Receives pipeline failures outside the delivery channel
pub type FallbackHandler = Arc<dyn Fn(&LoggerError) + Send + Sync>;

/// Handler writing `[LOGGER ERROR] <error>` to stderr
pub fn stderr_fallback() -> FallbackHandler {
    Arc::new(|err: &LoggerError| {
        eprintln!("[LOGGER ERROR] {}", err);
    })
}

/// Alert on the first drop and every 1000th thereafter
#[inline]
pub(crate) fn should_alert(dropped_before: u64) -> bool {
    dropped_before == 0 || (dropped_before + 1) % 1000 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_cadence() {
        assert!(should_alert(0));
        assert!(!should_alert(1));
        assert!(!should_alert(998));
        assert!(should_alert(999));
        assert!(should_alert(1999));
    }
}
