#![forbid(unsafe_code)]

pub mod app_services;
pub mod assessment_service;
pub mod config;
pub mod dashboard_service;
pub mod error;
pub mod roadmap_service;
pub mod telemetry;

pub use app_services::AppServices;
pub use assessment_service::AssessmentService;
pub use config::AppConfig;
pub use dashboard_service::{DashboardOverview, DashboardService};
pub use error::{
    AppServicesError, AssessmentServiceError, ConfigError, DashboardServiceError,
    RoadmapServiceError,
};
pub use roadmap_service::RoadmapService;
pub use telemetry::init_tracing;
