use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use scopegate_core::{ActorIdentity, AppError, EmployeeId};
use tracing::debug;

use crate::error::ApiResult;
use crate::state::AppState;

/// Header carrying the employee already authenticated by the upstream gateway.
pub const ACTOR_HEADER: &str = "x-actor-employee-id";

pub async fn require_actor(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let employee_id = request
        .headers()
        .get(ACTOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized(format!("{ACTOR_HEADER} header is required")))?
        .parse::<EmployeeId>()
        .map_err(|_| AppError::Unauthorized(format!("{ACTOR_HEADER} header is malformed")))?;

    let employee = state
        .access_admin_service
        .engine()
        .employee(employee_id)
        .map_err(|_| AppError::Unauthorized(format!("unknown actor '{employee_id}'")))?;

    debug!(actor = %employee_id, method = %request.method(), path = %request.uri().path(), "actor resolved");
    request.extensions_mut().insert(ActorIdentity::new(
        employee.id(),
        employee.organization_id(),
        employee.email().as_str(),
    ));
    Ok(next.run(request).await)
}
