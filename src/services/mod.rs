// Persistence services, one per entity

mod links;

pub mod user_service;
pub mod sport_service;
pub mod health_issue_service;
pub mod label_service;
pub mod session_service;
pub mod gear_service;
pub mod exercise_service;
pub mod activity_service;
pub mod session_health_monitoring_service;
pub mod daily_monitoring_service;

pub use user_service::UserService;
pub use sport_service::SportService;
pub use health_issue_service::HealthIssueService;
pub use label_service::LabelService;
pub use session_service::SessionService;
pub use gear_service::GearService;
pub use exercise_service::ExerciseService;
pub use activity_service::ActivityService;
pub use session_health_monitoring_service::SessionHealthMonitoringService;
pub use daily_monitoring_service::{DailyHealthMonitoringService, DailyMonitoringService};
