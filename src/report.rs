//! Diagnostic reporting for recoverable codec anomalies.
//!
//! The codec tolerates a handful of wire conditions that are worth telling
//! somebody about without failing the operation: a nominally-ASCII
//! IA5String carrying UTF-8, an identifier octet outside the SNMP table,
//! a lossy UTF-8 reinterpretation. Those diagnostics flow through the
//! [`Reporter`] trait so applications can route them and tests can assert
//! on them; when no reporter is attached the codec falls back to `tracing`.

use std::sync::{Arc, Mutex};

/// Receives human-readable diagnostics from the codec.
///
/// Implementations must be cheap: the codec calls `report` from the
/// encode/decode hot path, though only on anomalous input.
pub trait Reporter: Send + Sync {
    /// Handle one diagnostic message.
    fn report(&self, message: &str);
}

/// Default reporter that forwards diagnostics to `tracing::warn!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, message: &str) {
        tracing::warn!(target: "snmp_ber", "{message}");
    }
}

/// Reporter that records diagnostics in memory.
///
/// Intended for tests asserting on codec diagnostics:
///
/// ```
/// use std::sync::Arc;
/// use bytes::Bytes;
/// use snmp_ber::ber::EncodeBuf;
/// use snmp_ber::report::RecordingReporter;
/// use snmp_ber::Value;
///
/// let reporter = Arc::new(RecordingReporter::new());
/// let mut buf = EncodeBuf::with_reporter(reporter.clone());
/// Value::IA5String("héllo".into()).encode(&mut buf);
///
/// assert_eq!(reporter.messages().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<String>>,
}

impl RecordingReporter {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder already wrapped in an [`Arc`] for injection.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Snapshot of the recorded messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// True if no diagnostics have been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop all recorded messages.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        // A panicking reporter caller cannot corrupt a Vec<String>; recover.
        self.messages.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, message: &str) {
        self.lock().push(message.to_string());
    }
}

/// Dispatch a diagnostic to `reporter` if present, else to `tracing`.
pub(crate) fn emit(reporter: Option<&Arc<dyn Reporter>>, message: &str) {
    match reporter {
        Some(r) => r.report(message),
        None => TracingReporter.report(message),
    }
}
