use std::sync::Arc;

use crate::controllers::{coach, skill};
use crate::utils::secret::verify_signature;
use crate::ServiceState;
use axum::{
    middleware,
    routing::{delete, get, post},
};

pub fn add_routers(
    router: axum::Router<Arc<ServiceState>>,
    state: Arc<ServiceState>,
) -> axum::Router<Arc<ServiceState>> {
    router
        .route("/api/coaches", get(coach::list))
        .route("/api/coaches/skill", get(skill::list))
        .route(
            "/api/coaches/skill",
            post(skill::create).layer(middleware::from_fn_with_state(
                state.clone(),
                verify_signature,
            )),
        )
        .route(
            "/api/coaches/skill/:id",
            delete(skill::delete).layer(middleware::from_fn_with_state(state, verify_signature)),
        )
        .route("/api/coaches/:coach_id", get(coach::detail))
        .route("/api/coaches/:coach_id/courses", get(coach::courses))
}
