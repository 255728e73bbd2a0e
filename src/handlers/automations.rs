use std::collections::HashMap;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::automation::{ControllerConfig, EventSink, MemorySink, SubmissionController};
use crate::config;
use crate::state::AppState;

/// GET /api/automations - the hub's automation catalog
pub async fn automation_list() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": [
            {
                "id": "duplicate-drive",
                "title": "Duplicar Estrutura de Pasta (Drive)",
                "description": "Copia uma pasta modelo no Google Drive mantendo toda a estrutura interna para novos projetos",
                "status": "active",
                "href": "/automations/duplicate-drive"
            },
            {
                "id": "webhook-notify",
                "title": "Webhook Notificador",
                "description": "Dispara notificações via webhook para integrações externas",
                "status": "maintenance"
            },
            {
                "id": "email-sequence",
                "title": "Sequência de E-mails",
                "description": "Automatiza envio de sequências de e-mail para leads",
                "status": "maintenance"
            }
        ]
    }))
}

/// POST /api/automations/duplicate-drive - trigger the duplicate-drive flow
///
/// Runs a per-request controller over the shared webhook client. The toast
/// the controller emits is echoed back for the UI to render; post-success
/// navigation becomes a redirect hint (the 1.5 s delay is a client concern).
pub async fn duplicate_drive_post(
    State(state): State<AppState>,
    Json(fields): Json<HashMap<String, String>>,
) -> impl IntoResponse {
    let webhook = &config::config().webhook;

    let sink = Arc::new(MemorySink::new());
    let controller = SubmissionController::new(
        ControllerConfig {
            auto_navigate: false,
            ..ControllerConfig::from_app_config(config::config())
        },
        state.webhook.clone(),
        sink.clone() as Arc<dyn EventSink>,
    );
    controller.submit(fields).await;

    let Some(toast) = sink.events().into_iter().next() else {
        // One terminal event per submission is a controller invariant.
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"success": false, "error": "no outcome produced"})),
        )
            .into_response();
    };

    if toast.is_success() {
        let redirect = webhook
            .auto_navigate_on_success
            .then(|| webhook.navigate_path.clone());
        return (
            StatusCode::OK,
            Json(json!({"success": true, "data": {"toast": toast, "redirect": redirect}})),
        )
            .into_response();
    }

    let status = if toast.is_validation_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::BAD_GATEWAY
    };
    (
        status,
        Json(json!({
            "success": false,
            "error": toast.description.clone(),
            "data": {"toast": toast}
        })),
    )
        .into_response()
}
