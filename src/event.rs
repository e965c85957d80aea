//! Showcase lifecycle events and the log callback system.

use std::sync::{Mutex, OnceLock};

/// Something an overlay wants its owner to know about.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShowcaseEvent {
    /// `show()` was called; emitted before the fade-in starts.
    Shown,
    /// `hide()` was called; emitted before the fade-out starts.
    HideRequested,
    /// The fade-out completed and the overlay is gone.
    DidHide,
    /// A touch at (`x`, `y`) was consumed by the overlay.
    TouchBlocked { x: f32, y: f32 },
}

/// Receiver for [`ShowcaseEvent`]s. Closures taking `&ShowcaseEvent` qualify.
pub trait ShowcaseEventListener {
    fn on_event(&mut self, event: &ShowcaseEvent);
}

impl<F> ShowcaseEventListener for F
where
    F: FnMut(&ShowcaseEvent),
{
    fn on_event(&mut self, event: &ShowcaseEvent) {
        self(event);
    }
}

/// Log level for debug callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = log_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Remove the global log callback.
pub fn clear_log_callback() {
    if let Ok(mut guard) = log_callback().lock() {
        *guard = None;
    }
}

/// Emit a log message to `tracing` and to the registered callback, if any.
pub fn emit_log(level: LogLevel, message: &str) {
    match level {
        LogLevel::Debug => tracing::debug!(target: "showcase_overlay", "{message}"),
        LogLevel::Info => tracing::info!(target: "showcase_overlay", "{message}"),
        LogLevel::Warn => tracing::warn!(target: "showcase_overlay", "{message}"),
        LogLevel::Error => tracing::error!(target: "showcase_overlay", "{message}"),
    }
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}
