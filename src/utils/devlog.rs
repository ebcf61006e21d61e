//! Developer log lines with a thread-local capture sink.
//!
//! `dev6!` formats a message, records it in the current thread's sink when
//! one is enabled, and forwards it to `log` at trace level under
//! [`DEV6_TARGET`](crate::utils::logger::DEV6_TARGET). Tests enable the sink
//! to assert on timing lines without touching the global logger.

use std::cell::RefCell;

thread_local! {
    static SINK: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

/// Disables the current thread's sink when dropped.
pub struct SinkGuard;

impl Drop for SinkGuard {
    fn drop(&mut self) {
        SINK.with(|s| *s.borrow_mut() = None);
    }
}

pub fn enable_thread_sink() -> SinkGuard {
    SINK.with(|s| *s.borrow_mut() = Some(Vec::new()));
    SinkGuard
}

pub fn write_str(msg: &str) {
    SINK.with(|s| {
        if let Some(buf) = s.borrow_mut().as_mut() {
            buf.push(msg.to_owned());
        }
    });
}

/// Takes the captured lines, leaving the sink enabled and empty.
pub fn drain() -> Vec<String> {
    SINK.with(|s| s.borrow_mut().as_mut().map(std::mem::take).unwrap_or_default())
}

#[macro_export]
macro_rules! dev6 {
    ($($arg:tt)*) => {{
        let __s = format!($($arg)*);
        $crate::utils::devlog::write_str(&__s);
        log::log!(target: $crate::utils::logger::DEV6_TARGET, log::Level::Trace, "{}", __s);
    }};
}
