use std::sync::Arc;

use crate::controllers::user;
use crate::ServiceState;
use axum::routing::{get, post, put};

pub fn add_routers(router: axum::Router<Arc<ServiceState>>) -> axum::Router<Arc<ServiceState>> {
    router
        .route("/api/users/signup", post(user::signup))
        .route("/api/users/login", post(user::login))
        .route("/api/users/refresh", post(user::refresh))
        .route(
            "/api/users/profile",
            get(user::get_profile).put(user::update_profile),
        )
        .route("/api/users/password", put(user::change_password))
        .route("/api/users/credit-package", get(user::purchase_history))
        .route("/api/users/courses", get(user::course_overview))
}
