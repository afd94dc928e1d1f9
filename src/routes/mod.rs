mod admin;
mod coach;
mod course;
mod credit_package;
mod user;

use std::sync::Arc;

use crate::ServiceState;
use axum::{routing::get, Router};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

async fn healthcheck() -> &'static str {
    "OK"
}

pub fn create_router(state: Arc<ServiceState>) -> Router {
    let router = Router::new().route("/healthcheck", get(healthcheck));
    let router = user::add_routers(router);
    let router = credit_package::add_routers(router, state.clone());
    let router = coach::add_routers(router, state.clone());
    let router = admin::add_routers(router, state.clone());
    let router = course::add_routers(router);

    router.with_state(state).layer(
        TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default().include_headers(true)),
    )
}
