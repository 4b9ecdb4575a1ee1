mod common;

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use serde_json::{Value, json};
use servicehub_api::{models::Role, notify::NoopNotifier, routes::create_router};
use tower::ServiceExt;
use uuid::Uuid;

use common::{create_provider, create_user, setup_state, setup_state_with, strict};

async fn call(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn post_booking(app: &Router, customer: Uuid, provider: Uuid, amount: Value) -> (StatusCode, Value) {
    call(
        app.clone(),
        Method::POST,
        "/api/bookings",
        Some(json!({
            "customer": customer,
            "provider": provider,
            "service": "Plumber",
            "date": "2025-01-10",
            "time": "10:00",
            "address": "123 St",
            "amount": amount
        })),
    )
    .await
}

fn booking_id(body: &Value) -> String {
    body["booking"]["id"].as_str().expect("booking id").to_string()
}

#[tokio::test]
async fn create_booking_returns_created_pending() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let customer = create_user(&state, "Casey", "casey@example.com", Role::Customer).await?;
    let (_, provider) = create_provider(&state, "Pat", "pat@example.com", "Plumber").await?;
    let app = create_router(state);

    let (status, body) = call(
        app,
        Method::POST,
        "/api/bookings",
        Some(json!({
            "customer": customer,
            "provider": provider,
            "service": "Plumber",
            "date": "2025-01-10",
            "time": "10:00",
            "address": "123 St",
            "amount": 500
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Booking created successfully");
    assert_eq!(body["booking"]["customerId"], json!(customer));
    assert_eq!(body["booking"]["providerId"], json!(provider));
    assert_eq!(body["booking"]["status"], "pending");
    assert_eq!(body["booking"]["date"], "2025-01-10");
    assert_eq!(body["booking"]["amount"], 500.0);
    Ok(())
}

#[tokio::test]
async fn create_booking_with_missing_field_is_bad_request() -> anyhow::Result<()> {
    let app = create_router(setup_state().await?);

    let (status, body) = call(
        app,
        Method::POST,
        "/api/bookings",
        Some(json!({ "customer": Uuid::new_v4(), "service": "Plumber" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn delete_unknown_booking_is_not_found() -> anyhow::Result<()> {
    let app = create_router(setup_state().await?);

    let (status, body) = call(
        app,
        Method::DELETE,
        &format!("/api/bookings/{}", Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Booking not found." }));
    Ok(())
}

#[tokio::test]
async fn unknown_status_value_is_rejected() -> anyhow::Result<()> {
    let app = create_router(setup_state().await?);

    let (status, body) = call(
        app,
        Method::PATCH,
        &format!("/api/bookings/status/{}", Uuid::new_v4()),
        Some(json!({ "status": "archived" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn review_rating_out_of_range_is_rejected() -> anyhow::Result<()> {
    let app = create_router(setup_state().await?);

    let (status, _) = call(
        app,
        Method::POST,
        "/api/reviews",
        Some(json!({ "provider": Uuid::new_v4(), "customer": Uuid::new_v4(), "rating": 6 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn reviews_for_unreviewed_provider_are_empty() -> anyhow::Result<()> {
    let app = create_router(setup_state().await?);

    let (status, body) = call(
        app,
        Method::GET,
        &format!("/api/reviews/{}", Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["average"], 0.0);
    assert_eq!(body["breakdown"].as_array().map(Vec::len), Some(5));
    assert_eq!(body["breakdown"][0], json!({ "stars": 5, "count": 0 }));
    Ok(())
}

#[tokio::test]
async fn help_without_message_is_bad_request() -> anyhow::Result<()> {
    let app = create_router(setup_state().await?);

    let (status, body) = call(
        app,
        Method::POST,
        "/api/help",
        Some(json!({ "email": "casey@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Email and message are required" }));
    Ok(())
}

#[tokio::test]
async fn provider_lookup_by_user_includes_owner() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let (owner, provider) = create_provider(&state, "Pat", "pat@example.com", "Plumber").await?;
    let app = create_router(state);

    let (status, body) = call(
        app,
        Method::GET,
        &format!("/api/providers/by-user/{owner}"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(provider));
    assert_eq!(body["user"]["name"], "Pat");
    Ok(())
}

#[tokio::test]
async fn unknown_route_falls_back_to_json_404() -> anyhow::Result<()> {
    let app = create_router(setup_state().await?);

    let (status, body) = call(app, Method::GET, "/api/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["path"], "/api/nope");
    Ok(())
}

#[tokio::test]
async fn health_route_is_mounted() -> anyhow::Result<()> {
    let app = create_router(setup_state().await?);

    let (status, body) = call(app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
    Ok(())
}

#[tokio::test]
async fn fractional_amount_is_echoed() -> anyhow::Result<()> {
    let app = create_router(setup_state().await?);

    let (status, body) = post_booking(&app, Uuid::new_v4(), Uuid::new_v4(), json!(499.5)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["booking"]["amount"], 499.5);
    Ok(())
}

#[tokio::test]
async fn negative_amount_is_rejected() -> anyhow::Result<()> {
    let app = create_router(setup_state().await?);

    let (status, body) = post_booking(&app, Uuid::new_v4(), Uuid::new_v4(), json!(-1)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn accepted_then_completed_shows_in_provider_listing() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let customer = create_user(&state, "Casey", "casey@example.com", Role::Customer).await?;
    let (_, provider) = create_provider(&state, "Pat", "pat@example.com", "Plumber").await?;
    let app = create_router(state);

    let (_, created) = post_booking(&app, customer, provider, json!(500)).await;
    let id = booking_id(&created);

    let (status, body) = call(
        app.clone(),
        Method::PATCH,
        &format!("/api/bookings/status/{id}"),
        Some(json!({ "status": "accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["status"], "accepted");

    let (status, body) = call(
        app.clone(),
        Method::PATCH,
        &format!("/api/bookings/status/{id}"),
        Some(json!({ "status": "completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");

    let (status, body) = call(
        app,
        Method::GET,
        &format!("/api/bookings/provider/{provider}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().expect("booking list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], id.as_str());
    assert_eq!(listed[0]["status"], "completed");
    assert_eq!(listed[0]["service"], "Plumber");
    assert_eq!(listed[0]["customer"]["name"], "Casey");
    assert_eq!(listed[0]["customer"]["email"], "casey@example.com");
    Ok(())
}

#[tokio::test]
async fn customer_listing_nests_provider_and_owner() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let customer = create_user(&state, "Casey", "casey@example.com", Role::Customer).await?;
    let (owner, provider) = create_provider(&state, "Pat", "pat@example.com", "Electrician").await?;
    let app = create_router(state);
    post_booking(&app, customer, provider, json!(500)).await;

    let (status, body) = call(
        app,
        Method::GET,
        &format!("/api/bookings/customer/{customer}"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let first = &body[0];
    assert_eq!(first["status"], "pending");
    assert_eq!(first["customerId"], json!(customer));
    assert_eq!(first["provider"]["id"], json!(provider));
    assert_eq!(first["provider"]["service"], "Electrician");
    assert_eq!(first["provider"]["user"]["id"], json!(owner));
    assert_eq!(first["provider"]["user"]["name"], "Pat");
    Ok(())
}

#[tokio::test]
async fn booking_listing_resolves_both_sides() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let customer = create_user(&state, "Casey", "casey@example.com", Role::Customer).await?;
    let (_, provider) = create_provider(&state, "Pat", "pat@example.com", "Plumber").await?;
    let app = create_router(state);
    post_booking(&app, customer, provider, json!(500)).await;

    let (status, body) = call(app, Method::GET, "/api/bookings", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["address"], "123 St");
    assert_eq!(body[0]["customer"]["name"], "Casey");
    assert_eq!(body[0]["provider"]["id"], json!(provider));
    Ok(())
}

#[tokio::test]
async fn strict_mode_answers_conflict() -> anyhow::Result<()> {
    let app = create_router(setup_state_with(Arc::new(NoopNotifier), strict()).await?);
    let (_, created) = post_booking(&app, Uuid::new_v4(), Uuid::new_v4(), json!(500)).await;
    let id = booking_id(&created);

    let (status, body) = call(
        app,
        Method::PATCH,
        &format!("/api/bookings/status/{id}"),
        Some(json!({ "status": "completed" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body,
        json!({ "error": "Cannot change booking status from pending to completed" })
    );
    Ok(())
}

#[tokio::test]
async fn review_submission_updates_summary_and_rating() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let customer = create_user(&state, "Casey", "casey@example.com", Role::Customer).await?;
    let (_, provider) = create_provider(&state, "Pat", "pat@example.com", "Plumber").await?;
    let app = create_router(state);

    let (status, body) = call(
        app.clone(),
        Method::POST,
        "/api/reviews",
        Some(json!({ "provider": provider, "customer": customer, "rating": 5, "comment": "Great" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Review submitted");
    assert_eq!(body["review"]["rating"], 5);
    assert_eq!(body["review"]["providerId"], json!(provider));

    let (status, body) = call(
        app.clone(),
        Method::GET,
        &format!("/api/reviews/{provider}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["average"], 5.0);
    assert_eq!(body["total"], 1);
    assert_eq!(
        body["breakdown"],
        json!([
            { "stars": 5, "count": 1 },
            { "stars": 4, "count": 0 },
            { "stars": 3, "count": 0 },
            { "stars": 2, "count": 0 },
            { "stars": 1, "count": 0 }
        ])
    );
    assert_eq!(body["reviews"][0]["comment"], "Great");
    assert_eq!(body["reviews"][0]["customer"]["name"], "Casey");

    let (_, body) = call(app, Method::GET, &format!("/api/providers/{provider}"), None).await;
    assert_eq!(body["rating"], 5.0);
    Ok(())
}

#[tokio::test]
async fn provider_profile_uses_camel_case_fields() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let owner = create_user(&state, "Pat", "pat@example.com", Role::Provider).await?;
    let app = create_router(state);

    let (status, body) = call(
        app.clone(),
        Method::POST,
        "/api/providers",
        Some(json!({
            "user": owner,
            "service": "Plumber",
            "hourlyRate": "350.5",
            "totalJobs": 3
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hourlyRate"], "350.5");
    assert_eq!(body["totalJobs"], 3);
    assert_eq!(body["userId"], json!(owner));
    assert_eq!(body["idProof"], json!([]));

    let (status, body) = call(
        app,
        Method::POST,
        "/api/providers/media",
        Some(json!({ "user": owner, "kind": "workPhotos", "files": ["/uploads/sink.jpg"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "kind": "workPhotos", "files": ["/uploads/sink.jpg"] }));
    Ok(())
}
