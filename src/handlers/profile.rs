use axum::{extract::State, response::Json, Extension};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::identity::Profile;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /api/profile - current user's display profile
///
/// Falls back to the session's own claims when no profile row exists, the
/// same chain the topbar used before profiles were stored.
pub async fn profile_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    let profile = state.profiles.profile(auth.id).await?.unwrap_or(Profile {
        user_id: auth.id,
        email: auth.email,
        full_name: auth.name,
    });

    Ok(Json(json!({
        "success": true,
        "data": {
            "id": profile.user_id,
            "email": profile.email,
            "name": profile.display_name(),
            "initials": profile.initials()
        }
    })))
}
