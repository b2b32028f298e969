// API layer: routing, handlers and error responses

pub mod activities;
pub mod admin;
pub mod auth;
pub mod daily_monitorings;
pub mod error;
pub mod exercises;
pub mod gears;
pub mod health;
pub mod health_issues;
pub mod labels;
pub mod routes;
pub mod sessions;
pub mod sports;
pub mod users;

pub use admin::{admin_routes, AdminState};
pub use error::{ApiError, ErrorBody};
pub use routes::create_routes;

use serde::Deserialize;

use crate::models::{Pagination, ValidationErrors};

/// Query parameters for list endpoints without filters
#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationQuery {
    pub fn pagination(&self) -> Result<Pagination, ValidationErrors> {
        Pagination::from_query(self.limit, self.offset)
    }
}
