//! Escenarios contra PostgreSQL real (`TEST_DATABASE_URL`).
//!
//! Sin la variable definida cada test termina sin hacer nada.

mod common;

use axum::body::to_bytes;
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::Router;
use regex::Regex;
use serde_json::{json, Value};
use uuid::Uuid;

use common::{app_with_database, send, unique_email};
use worktop_quoting::controllers::quote_controller::QuoteController;
use worktop_quoting::dto::quote_dto::CreateQuoteRequest;
use worktop_quoting::models::branding::Branding;
use worktop_quoting::models::company::Company;
use worktop_quoting::models::user::User;
use worktop_quoting::repositories::company_repository::CompanyRepository;
use worktop_quoting::utils::errors::AppError;

async fn register(app: &Router, company_name: &str, email: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/register",
        None,
        Some(json!({
            "companyName": company_name,
            "email": email,
            "password": "secret123",
            "firstName": "Ada",
            "lastName": "Stone",
            "postcode": "LS1 4AP"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {}", body);
    body
}

async fn create_quote(app: &Router, token: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/quotes",
        Some(token),
        Some(json!({
            "customerName": "Jane Doe",
            "materialName": "Quartz",
            "tradePriceExVat": 500
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create quote failed: {}", body);
    body
}

#[tokio::test]
async fn test_quote_lifecycle() {
    let Some((app, _)) = app_with_database().await else { return };

    let registered = register(&app, "Acme Worktops", &unique_email("a")).await;
    let token = registered["token"].as_str().unwrap().to_string();
    assert_eq!(registered["company"]["status"], "trial");
    assert_eq!(registered["user"]["role"], "trade_admin");

    let quote = create_quote(&app, &token).await;
    let reference = Regex::new(r"^PW-\d{4}-\d{4}$").unwrap();
    assert!(reference.is_match(quote["reference"].as_str().unwrap()));
    assert_eq!(quote["status"], "draft");
    assert_eq!(quote["createdByName"], "Ada Stone");
    assert_eq!(quote["tradePriceIncVat"], 600.0);
    assert_eq!(quote["customerPriceExVat"], 600.0);
    assert_eq!(quote["customerPriceIncVat"], 720.0);

    let (status, list) = send(&app, Method::GET, "/api/quotes", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let id = quote["id"].as_str().unwrap();
    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/quotes/{}/status", id),
        Some(&token),
        Some(json!({ "status": "sent" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, fetched) = send(&app, Method::GET, &format!("/api/quotes/{}", id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["status"], "sent");
}

#[tokio::test]
async fn test_other_company_cannot_see_quote() {
    let Some((app, _)) = app_with_database().await else { return };

    let company_a = register(&app, "Acme Worktops", &unique_email("a")).await;
    let company_b = register(&app, "Granite & Co", &unique_email("b")).await;
    let token_a = company_a["token"].as_str().unwrap();
    let token_b = company_b["token"].as_str().unwrap();

    let quote = create_quote(&app, token_b).await;
    let id = quote["id"].as_str().unwrap();

    let (status, _) = send(&app, Method::GET, &format!("/api/quotes/{}", id), Some(token_a), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/quotes/{}/status", id),
        Some(token_a),
        Some(json!({ "status": "accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list_a) = send(&app, Method::GET, "/api/quotes", Some(token_a), None).await;
    assert!(list_a.as_array().unwrap().is_empty());

    let (_, fetched) = send(&app, Method::GET, &format!("/api/quotes/{}", id), Some(token_b), None).await;
    assert_eq!(fetched["status"], "draft");
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let Some((app, state)) = app_with_database().await else { return };

    let email = unique_email("dup");
    register(&app, "Acme Worktops", &email).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/register",
        None,
        Some(json!({
            "companyName": "Acme Again",
            "email": email.to_uppercase(),
            "password": "secret456",
            "firstName": "Bob",
            "lastName": "Slate"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_CONFLICT");

    let (companies,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM companies WHERE email = $1")
        .bind(&email)
        .fetch_one(&state.pool)
        .await
        .unwrap();
    let (users,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&state.pool)
        .await
        .unwrap();
    let (brandings,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM branding b JOIN companies c ON c.id = b.company_id WHERE c.email = $1",
    )
    .bind(&email)
    .fetch_one(&state.pool)
    .await
    .unwrap();

    assert_eq!((companies, users, brandings), (1, 1, 1));
}

#[tokio::test]
async fn test_login_and_profile() {
    let Some((app, _)) = app_with_database().await else { return };

    let email = unique_email("login");
    register(&app, "Acme Worktops", &email).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": email, "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid credentials");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": unique_email("nobody"), "password": "secret123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid credentials");

    let (status, logged_in) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": email, "password": "secret123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(logged_in["user"]["lastLoginAt"].is_string());
    assert_eq!(logged_in["company"]["status"], "trial");

    let token = logged_in["token"].as_str().unwrap();
    let (status, me) = send(&app, Method::GET, "/api/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["user"]["email"], email.as_str());
    assert!(me["company"]["trialEndsAt"].is_string());
}

#[tokio::test]
async fn test_inactive_user_cannot_log_in() {
    let Some((app, state)) = app_with_database().await else { return };

    let email = unique_email("inactive");
    register(&app, "Acme Worktops", &email).await;

    sqlx::query("UPDATE users SET is_active = false WHERE email = $1")
        .bind(&email)
        .execute(&state.pool)
        .await
        .unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": email, "password": "secret123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_branding_partial_update() {
    let Some((app, _)) = app_with_database().await else { return };

    let registered = register(&app, "Acme Worktops", &unique_email("brand")).await;
    let token = registered["token"].as_str().unwrap();

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/branding",
        Some(token),
        Some(json!({ "quoteFooterText": "Thank you", "logoUrl": "https://cdn.acme.test/logo.png" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, before) = send(&app, Method::GET, "/api/branding", Some(token), None).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/branding",
        Some(token),
        Some(json!({ "primaryColour": "#ff0000" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, after) = send(&app, Method::GET, "/api/branding", Some(token), None).await;
    assert_eq!(after["primaryColour"], "#ff0000");
    assert_eq!(after["secondaryColour"], before["secondaryColour"]);
    assert_eq!(after["logoUrl"], before["logoUrl"]);
    assert_eq!(after["quoteFooterText"], "Thank you");
    assert_eq!(after["companyName"], "Acme Worktops");
}

#[tokio::test]
async fn test_company_profile_update() {
    let Some((app, _)) = app_with_database().await else { return };

    let registered = register(&app, "Acme Worktops", &unique_email("profile")).await;
    let token = registered["token"].as_str().unwrap();

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/company",
        Some(token),
        Some(json!({ "city": "Leeds", "vatNumber": "GB123456789", "postcode": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, branding) = send(&app, Method::GET, "/api/branding", Some(token), None).await;
    assert_eq!(branding["city"], "Leeds");
    assert_eq!(branding["vatNumber"], "GB123456789");
    assert_eq!(branding["postcode"], Value::Null);
    assert_eq!(branding["companyName"], "Acme Worktops");
}

fn registered_ids(registered: &Value) -> (Uuid, Uuid) {
    let company_id = registered["company"]["id"].as_str().unwrap().parse().unwrap();
    let user_id = registered["user"]["id"].as_str().unwrap().parse().unwrap();
    (company_id, user_id)
}

fn quote_request() -> CreateQuoteRequest {
    serde_json::from_value(json!({
        "customerName": "Jane Doe",
        "materialName": "Quartz",
        "tradePriceExVat": 500
    }))
    .unwrap()
}

fn test_reference() -> String {
    format!("TST-{}", &Uuid::new_v4().simple().to_string()[..12])
}

#[tokio::test]
async fn test_reference_collision_is_retried() {
    let Some((app, state)) = app_with_database().await else { return };

    let registered = register(&app, "Acme Worktops", &unique_email("ref")).await;
    let (company_id, user_id) = registered_ids(&registered);
    let controller = QuoteController::new(state.pool.clone());

    let taken = test_reference();
    let first = controller
        .create_with(company_id, user_id, quote_request(), || taken.clone())
        .await
        .unwrap();
    assert_eq!(first.reference, taken);

    let fresh = test_reference();
    let mut candidates = vec![fresh.clone(), taken.clone()];
    let second = controller
        .create_with(company_id, user_id, quote_request(), move || candidates.pop().unwrap())
        .await
        .unwrap();
    assert_eq!(second.reference, fresh);

    let exhausted = controller
        .create_with(company_id, user_id, quote_request(), || taken.clone())
        .await;
    let error = match exhausted {
        Err(error @ AppError::ReferenceCollision) => error,
        other => panic!("expected a reference collision, got {:?}", other.map(|q| q.reference)),
    };

    let response = error.into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["retryable"], true);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM quotes WHERE reference = $1")
        .bind(&taken)
        .fetch_one(&state.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_failed_registration_leaves_no_tenant_rows() {
    let Some((app, state)) = app_with_database().await else { return };

    let email = unique_email("rollback");
    register(&app, "Acme Worktops", &email).await;

    let company = Company::new("Late Comer Ltd".to_string(), unique_email("late"), None, None);
    let branding = Branding::default_for(company.id);
    let user = User::new_admin(
        company.id,
        email,
        "$2b$04$abcdefghijklmnopqrstuuJ0c4Y3b1hUvH5lQWmYh1m1bQ7a3a6eW".to_string(),
        "Late".to_string(),
        "Comer".to_string(),
    );

    let result = CompanyRepository::new(state.pool.clone())
        .register_tenant(&company, &branding, &user)
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let (companies,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM companies WHERE id = $1")
        .bind(company.id)
        .fetch_one(&state.pool)
        .await
        .unwrap();
    let (brandings,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM branding WHERE company_id = $1")
        .bind(company.id)
        .fetch_one(&state.pool)
        .await
        .unwrap();
    assert_eq!((companies, brandings), (0, 0));
}

#[tokio::test]
async fn test_registration_trims_company_name() {
    let Some((app, _)) = app_with_database().await else { return };

    let registered = register(&app, "  Acme Worktops  ", &unique_email("trim")).await;
    assert_eq!(registered["company"]["name"], "Acme Worktops");
}
