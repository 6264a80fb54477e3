// Application state for HTTP handlers
use crate::application::catalog_service::CatalogService;
use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::config::DashboardSettings;

#[derive(Clone)]
pub struct AppState {
    pub catalog_service: CatalogService,
    pub dashboard_service: DashboardService,
    pub defaults: DashboardSettings,
}
