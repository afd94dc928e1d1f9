use std::sync::Arc;

use crate::controllers::course;
use crate::ServiceState;
use axum::routing::{get, post};

pub fn add_routers(router: axum::Router<Arc<ServiceState>>) -> axum::Router<Arc<ServiceState>> {
    router
        .route("/api/courses", get(course::list))
        .route(
            "/api/courses/:course_id",
            post(course::book).delete(course::cancel),
        )
}
