use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use fitness_booking_service::{
    create_router,
    utils::secret::{sign_body, MAX_SIGNED_BODY, SIGNATURE_HEADER},
    ServiceState,
};

mod support;

async fn send(state: &Arc<ServiceState>, request: Request<Body>) -> (StatusCode, Value) {
    let response = create_router(state.clone())
        .oneshot(request)
        .await
        .expect("router response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("build request")
}

fn signed_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    let raw = body.to_string();
    let signature = sign_body(support::ADMIN_KEY, raw.as_bytes()).expect("sign");
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header(SIGNATURE_HEADER, signature)
        .body(Body::from(raw))
        .expect("build request")
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("build request")
}

async fn signup_and_login(state: &Arc<ServiceState>, email: &str) -> String {
    let (status, _) = send(
        state,
        json_request(
            "POST",
            "/api/users/signup",
            None,
            &json!({ "name": "Mia", "email": email, "password": support::PASSWORD }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        state,
        json_request(
            "POST",
            "/api/users/login",
            None,
            &json!({ "email": email, "password": support::PASSWORD }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["access_token"]
        .as_str()
        .expect("access token")
        .to_string()
}

#[tokio::test]
async fn healthcheck_answers() {
    let state = support::test_state().await;
    let (status, body) = send(&state, get("/healthcheck", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

#[tokio::test]
async fn signup_rejects_duplicates_and_weak_passwords() {
    let state = support::test_state().await;
    signup_and_login(&state, "mia@example.com").await;

    let (status, body) = send(
        &state,
        json_request(
            "POST",
            "/api/users/signup",
            None,
            &json!({ "name": "Mia", "email": "mia@example.com", "password": support::PASSWORD }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "failed");

    let (status, _) = send(
        &state,
        json_request(
            "POST",
            "/api/users/signup",
            None,
            &json!({ "name": "Leo", "email": "leo@example.com", "password": "weak" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn protected_routes_need_a_token() {
    let state = support::test_state().await;
    let (status, body) = send(&state, get("/api/users/profile", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "failed");

    let (status, _) = send(&state, get("/api/users/profile", Some("not-a-jwt"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_routes_need_a_valid_signature() {
    let state = support::test_state().await;
    let package = json!({ "name": "Gold", "credit_amount": 30, "price": 1500 });

    let (status, _) = send(
        &state,
        json_request("POST", "/api/credit-package", None, &package),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut forged = signed_request("POST", "/api/credit-package", &package);
    forged.headers_mut().insert(
        SIGNATURE_HEADER,
        sign_body("wrong-key", package.to_string().as_bytes())
            .expect("sign")
            .parse()
            .expect("header value"),
    );
    let (status, _) = send(&state, forged).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &state,
        signed_request("POST", "/api/credit-package", &package),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["credit_amount"], 30);

    let (status, _) = send(
        &state,
        signed_request("POST", "/api/credit-package", &package),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn malformed_catalog_input_is_a_validation_error() {
    let state = support::test_state().await;

    let fractional = json!({ "name": "Odd", "credit_amount": 1.5, "price": 10 });
    let (status, body) = send(
        &state,
        signed_request("POST", "/api/credit-package", &fractional),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "failed");

    let missing = json!({ "name": "NoPrice", "credit_amount": 10 });
    let (status, body) = send(
        &state,
        signed_request("POST", "/api/credit-package", &missing),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap_or_default().contains("price"));
}

#[tokio::test]
async fn purchase_then_book_over_http() {
    let state = support::test_state().await;
    let db = state.db.as_ref();
    let token = signup_and_login(&state, "member@example.com").await;

    let (_, coach) = support::create_coach(db).await;
    let course = support::create_test_course(db, &coach, 3).await;
    let package_id = support::create_package(db, 2, 200).await;

    let (status, body) = send(
        &state,
        json_request(
            "POST",
            &format!("/api/credit-package/{package_id}"),
            Some(&token),
            &json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["purchased_credits"], 2);

    let (status, _) = send(
        &state,
        json_request(
            "POST",
            &format!("/api/courses/{}", course.id),
            Some(&token),
            &json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&state, get("/api/users/courses", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["credit_remain"], 1);
    assert_eq!(body["data"]["credit_usage"], 1);
    assert_eq!(body["data"]["course_booking"].as_array().map(Vec::len), Some(1));

    let (status, _) = send(
        &state,
        json_request(
            "DELETE",
            &format!("/api/courses/{}", course.id),
            Some(&token),
            &json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &state,
        json_request("POST", "/api/courses/not-a-uuid", Some(&token), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn coach_routes_reject_plain_users() {
    let state = support::test_state().await;
    let token = signup_and_login(&state, "plain@example.com").await;

    let (status, _) = send(&state, get("/api/admin/coaches", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn oversized_admin_bodies_are_refused() {
    let state = support::test_state().await;
    let package = json!({
        "name": "x".repeat(MAX_SIGNED_BODY),
        "credit_amount": 10,
        "price": 100,
    });

    let (status, body) = send(
        &state,
        signed_request("POST", "/api/credit-package", &package),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "failed");
}
