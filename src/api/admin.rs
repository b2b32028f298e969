use axum::{middleware, Router};
use sqlx::SqlitePool;

use super::{activities, daily_monitorings, exercises, gears, health_issues, labels, sessions, sports, users};
use crate::auth::{jwt_auth_middleware, staff_only_middleware, AuthService};
use crate::services::*;

/// Shared state for every admin handler
#[derive(Clone)]
pub struct AdminState {
    pub auth_service: AuthService,
    pub users: UserService,
    pub sports: SportService,
    pub health_issues: HealthIssueService,
    pub labels: LabelService,
    pub sessions: SessionService,
    pub gears: GearService,
    pub exercises: ExerciseService,
    pub activities: ActivityService,
    pub session_health: SessionHealthMonitoringService,
    pub daily_monitorings: DailyMonitoringService,
    pub daily_health: DailyHealthMonitoringService,
    pub default_runner_id: i64,
}

impl AdminState {
    pub fn new(db: SqlitePool, auth_service: AuthService, default_runner_id: i64) -> Self {
        Self {
            auth_service,
            users: UserService::new(db.clone()),
            sports: SportService::new(db.clone()),
            health_issues: HealthIssueService::new(db.clone()),
            labels: LabelService::new(db.clone()),
            sessions: SessionService::new(db.clone()),
            gears: GearService::new(db.clone()),
            exercises: ExerciseService::new(db.clone()),
            activities: ActivityService::new(db.clone()),
            session_health: SessionHealthMonitoringService::new(db.clone()),
            daily_monitorings: DailyMonitoringService::new(db.clone()),
            daily_health: DailyHealthMonitoringService::new(db),
            default_runner_id,
        }
    }

    /// Runner for a new record: the one named in the form, else the placeholder
    pub fn runner_for(&self, runner_id: Option<i64>) -> i64 {
        runner_id.unwrap_or(self.default_runner_id)
    }
}

/// Every entity's CRUD routes, restricted to authenticated staff users
pub fn admin_routes(state: AdminState) -> Router {
    let auth_service = state.auth_service.clone();

    Router::new()
        .nest("/users", users::routes())
        .nest("/sports", sports::routes())
        .nest("/health-issues", health_issues::routes())
        .nest("/labels", labels::routes())
        .nest("/sessions", sessions::routes())
        .nest("/gears", gears::routes())
        .nest("/exercises", exercises::routes())
        .nest("/activities", activities::routes())
        .nest("/session-health-monitorings", sessions::health_monitoring_routes())
        .nest("/daily-monitorings", daily_monitorings::routes())
        .nest("/daily-health-monitorings", daily_monitorings::health_monitoring_routes())
        .layer(middleware::from_fn(staff_only_middleware))
        .layer(middleware::from_fn_with_state(auth_service, jwt_auth_middleware))
        .with_state(state)
}
