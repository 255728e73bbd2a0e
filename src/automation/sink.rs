use std::sync::Mutex;

use serde::Serialize;

pub const SUCCESS_TITLE: &str = "Automação disparada!";
pub const VALIDATION_ERROR_TITLE: &str = "Campos obrigatórios";
pub const DISPATCH_ERROR_TITLE: &str = "Erro ao enviar";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

/// User-facing notification record. The sink renders it (toast, log line,
/// HTTP response); the pipeline only constructs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastEvent {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl ToastEvent {
    pub fn success() -> Self {
        Self {
            title: SUCCESS_TITLE.to_string(),
            description: "Os dados foram enviados com sucesso.".to_string(),
            severity: Severity::Info,
        }
    }

    pub fn validation_error(reason: impl Into<String>) -> Self {
        Self {
            title: VALIDATION_ERROR_TITLE.to_string(),
            description: reason.into(),
            severity: Severity::Error,
        }
    }

    pub fn dispatch_error(message: impl Into<String>) -> Self {
        Self {
            title: DISPATCH_ERROR_TITLE.to_string(),
            description: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.severity == Severity::Info
    }

    pub fn is_validation_error(&self) -> bool {
        self.title == VALIDATION_ERROR_TITLE
    }
}

/// Outbound channel for toasts and route changes - the controller's only
/// side-effect surface besides the webhook itself. Implementations must be
/// non-blocking; both operations are fire-and-forget.
pub trait EventSink: Send + Sync {
    fn notify(&self, event: ToastEvent);
    fn navigate(&self, path: &str);
}

/// Default production sink: structured log lines instead of a UI.
pub struct TracingSink;

impl EventSink for TracingSink {
    fn notify(&self, event: ToastEvent) {
        match event.severity {
            Severity::Info => tracing::info!(title = %event.title, description = %event.description, "toast"),
            Severity::Error => tracing::warn!(title = %event.title, description = %event.description, "toast"),
        }
    }

    fn navigate(&self, path: &str) {
        tracing::info!(path, "navigate");
    }
}

/// Recording sink used by the HTTP handler (to echo the toast back to the
/// client) and by tests.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<ToastEvent>>,
    navigations: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ToastEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }
}

impl EventSink for MemorySink {
    fn notify(&self, event: ToastEvent) {
        self.events.lock().unwrap().push(event);
    }

    fn navigate(&self, path: &str) {
        self.navigations.lock().unwrap().push(path.to_string());
    }
}
