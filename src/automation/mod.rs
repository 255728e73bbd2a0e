// Automation trigger pipeline: form fields in, webhook POST out.
//
// The pipeline is deliberately split so each stage is testable on its own:
// variant/submission (input model + validation), payload (JSON construction),
// webhook (transport), controller (orchestration), sink (user feedback).

pub mod controller;
pub mod payload;
pub mod sink;
pub mod submission;
pub mod variant;
pub mod webhook;

pub use controller::{ControllerConfig, SubmissionController};
pub use sink::{EventSink, MemorySink, Severity, ToastEvent, TracingSink};
pub use submission::Submission;
pub use variant::Variant;
pub use webhook::{DispatchError, HttpTransport, Outcome, WebhookClient, WebhookTransport};
