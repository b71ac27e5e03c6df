mod cors;

#[cfg(test)]
mod tests;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, put};
use scopegate_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let cors_layer = cors::build_cors_layer(frontend_url)?;

    let protected_routes = Router::new()
        .route("/api/me", get(handlers::employees::current_actor_handler))
        .route("/api/org-chart", get(handlers::employees::org_chart_handler))
        .route(
            "/api/employees/{employee_id}",
            put(handlers::employees::upsert_employee_handler)
                .delete(handlers::employees::remove_employee_handler),
        )
        .route(
            "/api/employees/{employee_id}/effective-permissions",
            get(handlers::employees::effective_permissions_handler),
        )
        .route(
            "/api/employees/{employee_id}/permission-overview",
            get(handlers::employees::permission_overview_handler),
        )
        .route(
            "/api/employees/{employee_id}/matrix",
            get(handlers::employees::matrix_handler).put(handlers::employees::set_matrix_handler),
        )
        .route(
            "/api/employees/{employee_id}/matrix/effective",
            get(handlers::employees::effective_matrix_handler),
        )
        .route(
            "/api/employees/{employee_id}/groups",
            put(handlers::employees::set_employee_groups_handler),
        )
        .route(
            "/api/employees/{employee_id}/manager",
            put(handlers::employees::set_manager_handler),
        )
        .route(
            "/api/authorize",
            get(handlers::authorization::authorize_handler),
        )
        .route(
            "/api/accessible-employees",
            get(handlers::authorization::accessible_employees_handler),
        )
        .route(
            "/api/permission-catalog",
            get(handlers::authorization::catalog_handler),
        )
        .route(
            "/api/permission-groups",
            get(handlers::groups::list_groups_handler).post(handlers::groups::create_group_handler),
        )
        .route(
            "/api/permission-groups/{group_id}",
            get(handlers::groups::get_group_handler)
                .put(handlers::groups::update_group_handler)
                .delete(handlers::groups::delete_group_handler),
        )
        .route(
            "/api/permission-groups/{group_id}/permissions",
            put(handlers::groups::set_group_permissions_handler),
        )
        .route(
            "/api/permission-groups/{group_id}/members",
            get(handlers::groups::group_members_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_actor,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
