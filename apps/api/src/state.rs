use scopegate_application::AccessAdminService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub access_admin_service: AccessAdminService,
}
