//! User-facing notification sink.
//!
//! The original screens report problems with blocking alerts. The client
//! keeps that as an injected collaborator so hosts decide how messages are
//! shown (dialog, toast, stderr).

pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str);
}

impl<S: NotificationSink + ?Sized> NotificationSink for std::sync::Arc<S> {
    fn notify(&self, message: &str) {
        (**self).notify(message)
    }
}

/// Sink that forwards messages to the tracing log.
#[derive(Debug, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

/// Sink that collects messages in memory.
///
/// Useful for testing and for hosts that drain messages on their own cadence.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: std::sync::Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(mut msgs) => msgs.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, message: &str) {
        if let Ok(mut msgs) = self.messages.lock() {
            msgs.push(message.to_string());
        }
    }
}
