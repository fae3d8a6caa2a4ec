use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::auth::resolve_identity;
use crate::error::ApiError;
use crate::state::AppState;

/// Validates the request's authorization header via the registered
/// validators and injects the resolved [`UserInfo`] into the request
/// extensions, where handlers pick it up with `Extension<UserInfo>`.
///
/// [`UserInfo`]: crate::auth::UserInfo
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();

    let user = resolve_identity(&state.validators, header).await?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
