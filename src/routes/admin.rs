use std::sync::Arc;

use crate::controllers::admin;
use crate::utils::secret::verify_signature;
use crate::ServiceState;
use axum::{
    middleware,
    routing::{get, post},
};

pub fn add_routers(
    router: axum::Router<Arc<ServiceState>>,
    state: Arc<ServiceState>,
) -> axum::Router<Arc<ServiceState>> {
    router
        .route(
            "/api/admin/coaches",
            get(admin::get_profile).put(admin::update_profile),
        )
        .route(
            "/api/admin/coaches/courses",
            get(admin::list_courses).post(admin::create_course),
        )
        .route(
            "/api/admin/coaches/courses/:course_id",
            get(admin::course_detail).put(admin::update_course),
        )
        .route("/api/admin/coaches/revenue", get(admin::revenue))
        .route(
            "/api/admin/coaches/:user_id",
            post(admin::promote).layer(middleware::from_fn_with_state(state, verify_signature)),
        )
}
