use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::automation::payload;
use crate::automation::sink::{EventSink, ToastEvent};
use crate::automation::submission;
use crate::automation::variant::Variant;
use crate::automation::webhook::WebhookClient;
use crate::config::AppConfig;

/// Controller-level settings, fixed at construction.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub variant: Variant,
    pub webhook_url: String,
    pub auto_navigate: bool,
    pub navigate_path: String,
    pub success_delay: Duration,
}

impl ControllerConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            variant: config.webhook.variant,
            webhook_url: config.webhook.url.clone(),
            auto_navigate: config.webhook.auto_navigate_on_success,
            navigate_path: config.webhook.navigate_path.clone(),
            success_delay: Duration::from_millis(config.webhook.success_delay_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Submitting,
    PostSuccessDelay,
}

struct Inner {
    state: State,
    torn_down: bool,
    timer: Option<JoinHandle<()>>,
}

/// Orchestrates one submission at a time: validate, build payload, dispatch,
/// emit exactly one event, optionally navigate after a delay.
///
/// Cheap to clone; clones share state. The lock is never held across an
/// await, so event ordering follows submission order trivially (only one
/// submission can be in flight).
#[derive(Clone)]
pub struct SubmissionController {
    config: ControllerConfig,
    client: WebhookClient,
    sink: Arc<dyn EventSink>,
    inner: Arc<Mutex<Inner>>,
}

impl SubmissionController {
    pub fn new(config: ControllerConfig, client: WebhookClient, sink: Arc<dyn EventSink>) -> Self {
        Self {
            config,
            client,
            sink,
            inner: Arc::new(Mutex::new(Inner {
                state: State::Idle,
                torn_down: false,
                timer: None,
            })),
        }
    }

    /// True while a dispatch is in flight or the post-success delay is
    /// pending. The UI disables the submit affordance while busy.
    pub fn busy(&self) -> bool {
        self.inner.lock().unwrap().state != State::Idle
    }

    /// Run one submission to completion. Duplicate calls while busy are
    /// discarded silently; a rejected submission emits a validation-error
    /// event without touching the network.
    pub async fn submit(&self, fields: HashMap<String, String>) {
        let validated = {
            let mut inner = self.inner.lock().unwrap();
            if inner.torn_down || inner.state != State::Idle {
                return;
            }
            match submission::validate(self.config.variant, &fields) {
                Ok(validated) => {
                    inner.state = State::Submitting;
                    validated
                }
                Err(reason) => {
                    drop(inner);
                    self.sink.notify(ToastEvent::validation_error(reason));
                    return;
                }
            }
        };

        let body = payload::build(&validated);
        let outcome = self.client.dispatch(&self.config.webhook_url, &body).await;

        let mut inner = self.inner.lock().unwrap();
        if inner.torn_down {
            // Torn down mid-flight: the outcome is abandoned, no event.
            return;
        }

        match outcome {
            Ok(()) => {
                if self.config.auto_navigate {
                    inner.state = State::PostSuccessDelay;
                    inner.timer = Some(self.spawn_navigation_timer());
                } else {
                    inner.state = State::Idle;
                }
                drop(inner);
                self.sink.notify(ToastEvent::success());
            }
            Err(e) => {
                inner.state = State::Idle;
                drop(inner);
                self.sink.notify(ToastEvent::dispatch_error(e.to_string()));
            }
        }
    }

    fn spawn_navigation_timer(&self) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(this.config.success_delay).await;
            {
                let mut inner = this.inner.lock().unwrap();
                if inner.torn_down || inner.state != State::PostSuccessDelay {
                    return;
                }
                inner.state = State::Idle;
                inner.timer = None;
            }
            this.sink.navigate(&this.config.navigate_path);
        })
    }

    /// Cancel the pending timer and suppress any in-flight outcome.
    /// Idempotent; a torn-down controller ignores further submits.
    pub fn teardown(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.torn_down = true;
        inner.state = State::Idle;
        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::automation::sink::MemorySink;
    use crate::automation::webhook::{TransportFailure, WebhookTransport};

    const URL: &str = "https://example/webhook";

    struct StubTransport {
        result: Result<u16, TransportFailure>,
        gate: Option<Arc<Notify>>,
        posts: Mutex<Vec<(String, String)>>,
    }

    impl StubTransport {
        fn returning(status: u16) -> Arc<Self> {
            Arc::new(Self { result: Ok(status), gate: None, posts: Mutex::new(Vec::new()) })
        }

        fn failing(description: &str) -> Arc<Self> {
            Arc::new(Self {
                result: Err(TransportFailure { description: Some(description.to_string()) }),
                gate: None,
                posts: Mutex::new(Vec::new()),
            })
        }

        /// Holds every response until the gate is notified.
        fn gated(status: u16, gate: Arc<Notify>) -> Arc<Self> {
            Arc::new(Self { result: Ok(status), gate: Some(gate), posts: Mutex::new(Vec::new()) })
        }

        fn post_count(&self) -> usize {
            self.posts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl WebhookTransport for StubTransport {
        async fn post_json(&self, url: &str, body: String) -> Result<u16, TransportFailure> {
            self.posts.lock().unwrap().push((url.to_string(), body));
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.result.clone()
        }
    }

    fn controller(
        transport: Arc<StubTransport>,
        auto_navigate: bool,
    ) -> (SubmissionController, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let config = ControllerConfig {
            variant: Variant::Restricted,
            webhook_url: URL.to_string(),
            auto_navigate,
            navigate_path: "/dashboard".to_string(),
            success_delay: Duration::from_millis(1500),
        };
        let ctrl = SubmissionController::new(
            config,
            WebhookClient::new(transport),
            sink.clone() as Arc<dyn EventSink>,
        );
        (ctrl, sink)
    }

    fn valid_fields() -> HashMap<String, String> {
        HashMap::from([
            ("nicho".to_string(), "Diabetes".to_string()),
            ("nomeProduto".to_string(), "Alpha".to_string()),
            ("funilProdutoChiclete".to_string(), "F1 | Alpha | Chic".to_string()),
        ])
    }

    async fn wait_until_busy(ctrl: &SubmissionController) {
        while !ctrl.busy() {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn happy_path_posts_notifies_and_navigates_after_delay() {
        let transport = StubTransport::returning(200);
        let (ctrl, sink) = controller(transport.clone(), true);

        ctrl.submit(valid_fields()).await;

        let posts = transport.posts.lock().unwrap().clone();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].0, URL);
        assert_eq!(
            posts[0].1,
            r#"{"nicho":"Diabetes","nomeProduto":"Alpha","funilProdutoChiclete":"F1 | Alpha | Chic"}"#
        );
        assert_eq!(sink.events(), vec![ToastEvent::success()]);

        // Still in the post-success delay: busy, no navigation yet.
        assert!(ctrl.busy());
        assert!(sink.navigations().is_empty());

        tokio::time::sleep(Duration::from_millis(1499)).await;
        assert!(sink.navigations().is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(sink.navigations(), vec!["/dashboard"]);
        assert!(!ctrl.busy());
    }

    #[tokio::test]
    async fn missing_field_rejects_without_network_call() {
        let transport = StubTransport::returning(200);
        let (ctrl, sink) = controller(transport.clone(), true);

        let mut fields = valid_fields();
        fields.insert("nomeProduto".to_string(), "".to_string());
        ctrl.submit(fields).await;

        assert_eq!(transport.post_count(), 0);
        assert_eq!(
            sink.events(),
            vec![ToastEvent::validation_error("Preencha todos os campos obrigatórios.")]
        );
        assert!(sink.navigations().is_empty());
        assert!(!ctrl.busy());
    }

    #[tokio::test]
    async fn server_rejection_emits_fixed_message_and_returns_to_idle() {
        let transport = StubTransport::returning(500);
        let (ctrl, sink) = controller(transport.clone(), true);

        ctrl.submit(valid_fields()).await;

        assert_eq!(transport.post_count(), 1);
        assert_eq!(
            sink.events(),
            vec![ToastEvent::dispatch_error("Erro ao enviar dados para o webhook")]
        );
        assert!(sink.navigations().is_empty());
        assert!(!ctrl.busy());
    }

    #[tokio::test]
    async fn network_failure_surfaces_transport_description() {
        let transport = StubTransport::failing("fetch failed");
        let (ctrl, sink) = controller(transport.clone(), true);

        ctrl.submit(valid_fields()).await;

        assert_eq!(transport.post_count(), 1);
        assert_eq!(sink.events(), vec![ToastEvent::dispatch_error("fetch failed")]);
        assert!(sink.navigations().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn duplicate_submit_while_in_flight_is_discarded() {
        let gate = Arc::new(Notify::new());
        let transport = StubTransport::gated(200, gate.clone());
        let (ctrl, sink) = controller(transport.clone(), false);

        let first = tokio::spawn({
            let ctrl = ctrl.clone();
            async move { ctrl.submit(valid_fields()).await }
        });
        wait_until_busy(&ctrl).await;

        // Second submit while the first is awaiting the transport: no-op.
        ctrl.submit(valid_fields()).await;
        assert_eq!(transport.post_count(), 1);
        assert!(sink.events().is_empty());

        gate.notify_one();
        first.await.unwrap();

        assert_eq!(transport.post_count(), 1);
        assert_eq!(sink.events(), vec![ToastEvent::success()]);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_before_outcome_suppresses_all_events() {
        let gate = Arc::new(Notify::new());
        let transport = StubTransport::gated(200, gate.clone());
        let (ctrl, sink) = controller(transport.clone(), true);

        let pending = tokio::spawn({
            let ctrl = ctrl.clone();
            async move { ctrl.submit(valid_fields()).await }
        });
        wait_until_busy(&ctrl).await;

        ctrl.teardown();
        gate.notify_one();
        pending.await.unwrap();

        assert!(sink.events().is_empty());
        assert!(sink.navigations().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_cancels_pending_navigation_timer() {
        let transport = StubTransport::returning(200);
        let (ctrl, sink) = controller(transport.clone(), true);

        ctrl.submit(valid_fields()).await;
        assert!(ctrl.busy());

        ctrl.teardown();
        tokio::time::sleep(Duration::from_millis(2000)).await;

        assert_eq!(sink.events(), vec![ToastEvent::success()]);
        assert!(sink.navigations().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn submit_during_post_success_delay_is_ignored() {
        let transport = StubTransport::returning(200);
        let (ctrl, sink) = controller(transport.clone(), true);

        ctrl.submit(valid_fields()).await;
        assert!(ctrl.busy());

        ctrl.submit(valid_fields()).await;
        assert_eq!(transport.post_count(), 1);
        assert_eq!(sink.events().len(), 1);

        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert_eq!(sink.navigations(), vec!["/dashboard"]);
    }

    #[tokio::test]
    async fn teardown_is_idempotent_and_blocks_further_submits() {
        let transport = StubTransport::returning(200);
        let (ctrl, sink) = controller(transport.clone(), true);

        ctrl.teardown();
        ctrl.teardown();
        ctrl.submit(valid_fields()).await;

        assert_eq!(transport.post_count(), 0);
        assert!(sink.events().is_empty());
    }

    #[tokio::test]
    async fn success_without_auto_navigate_returns_straight_to_idle() {
        let transport = StubTransport::returning(201);
        let (ctrl, sink) = controller(transport.clone(), false);

        ctrl.submit(valid_fields()).await;

        assert_eq!(sink.events(), vec![ToastEvent::success()]);
        assert!(sink.navigations().is_empty());
        assert!(!ctrl.busy());
    }

    #[tokio::test]
    async fn controller_is_reusable_after_an_error() {
        let transport = StubTransport::returning(500);
        let (ctrl, sink) = controller(transport.clone(), false);

        ctrl.submit(valid_fields()).await;
        ctrl.submit(valid_fields()).await;

        assert_eq!(transport.post_count(), 2);
        assert_eq!(sink.events().len(), 2);
    }
}
