use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::middleware::auth::{AuthError, authenticate};
use crate::middleware::role::authorize;
use crate::state::AppState;

/// Runs authentication then authorization for the matched route.
///
/// The principal is only handed to the handler once both stages have passed.
/// Must be installed with `route_layer` so the matched path is known.
pub async fn guard_chain(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let policy = state.policies.policy(req.method(), &path);

    let authentication =
        authenticate(policy, req.headers(), &state.resolver, state.users.as_ref()).await?;
    authorize(policy, &authentication)?;

    if let Some(principal) = authentication.into_principal() {
        req.extensions_mut().insert(principal);
    }

    Ok(next.run(req).await)
}
