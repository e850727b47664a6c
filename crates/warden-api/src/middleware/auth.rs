//! Subject resolution middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use warden_auth::RequestContext;
use warden_entity::Subject;

use crate::state::ApiState;

/// Subject resolved for the current request, if any.
///
/// Inserted into request extensions by [`resolve_subject`].
#[derive(Debug, Clone, Default)]
pub struct CurrentSubject(pub Option<Subject>);

/// Resolves the request's subject once with the active strategy.
///
/// Never rejects: an unresolvable credential leaves `CurrentSubject(None)`
/// and the handler decides whether that matters.
pub async fn resolve_subject(
    State(state): State<ApiState>,
    mut request: Request,
    next: Next,
) -> Response {
    let ctx = RequestContext::from_headers(request.headers().clone());
    let subject = state.dispatcher.resolve(&ctx).await;

    request.extensions_mut().insert(CurrentSubject(subject));
    next.run(request).await
}
