use std::sync::Arc;

use crate::controllers::credit_package;
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
        .route("/api/credit-package", get(credit_package::list))
        .route(
            "/api/credit-package",
            post(credit_package::create).layer(middleware::from_fn_with_state(
                state.clone(),
                verify_signature,
            )),
        )
        .route("/api/credit-package/:id", post(credit_package::purchase))
        .route(
            "/api/credit-package/:id",
            delete(credit_package::delete).layer(middleware::from_fn_with_state(
                state,
                verify_signature,
            )),
        )
}
