use actix_web::{App, http::StatusCode, test, web};
use chrono::Duration;
use habit_ledger::domain::user::{CreateUser, LoginRequest};
use habit_ledger::infrastructure::security::generate_token;
use habit_ledger::presentation::handlers::AppState;
use habit_ledger::presentation::middleware::RequestIdMiddleware;
use habit_ledger::presentation::routes;

const SECRET: &str = "test-secret-key-for-auth-tests";

macro_rules! setup_auth_test {
    () => {{
        let state = web::Data::new(AppState::in_memory(SECRET.to_string(), Duration::days(30)));

        test::init_service(
            App::new()
                .app_data(state.clone())
                .wrap(RequestIdMiddleware)
                .configure(routes::configure),
        )
        .await
    }};
}

fn signup_body(email: &str, password: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password: password.to_string(),
        name: "Flow Tester".to_string(),
    }
}

#[actix_web::test]
async fn test_full_signup_login_profile_flow() {
    let app = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(signup_body("flow@example.com", "password123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["email"], "flow@example.com");
    assert_eq!(body["user"]["name"], "Flow Tester");
    assert_eq!(body["user"]["is_premium"], false);
    let user_id = body["user"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(LoginRequest {
            email: "flow@example.com".to_string(),
            password: "password123".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["id"], user_id.as_str());
    let token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/user/profile")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let profile: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(profile["id"], user_id.as_str());
    assert_eq!(profile["email"], "flow@example.com");
    assert!(profile["created_at"].as_str().is_some());
}

#[actix_web::test]
async fn test_signup_duplicate_email() {
    let app = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(signup_body("duplicate@example.com", "pass1"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(signup_body("duplicate@example.com", "pass2"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["details"]["message"], "Email already registered");
}

#[actix_web::test]
async fn test_signup_rejects_invalid_email() {
    let app = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(signup_body("not-an-email", "password"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_signup_rejects_missing_field() {
    let app = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(serde_json::json!({ "email": "x@example.com", "password": "pw" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("Validation error"));
}

#[actix_web::test]
async fn test_login_failures_share_one_message() {
    let app = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(signup_body("wrongpass@example.com", "correct"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(LoginRequest {
            email: "wrongpass@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .to_request();
    let wrong_password = test::call_service(&app, req).await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password: serde_json::Value = test::read_body_json(wrong_password).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(LoginRequest {
            email: "nonexistent@example.com".to_string(),
            password: "correct".to_string(),
        })
        .to_request();
    let unknown_user = test::call_service(&app, req).await;
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let unknown_user: serde_json::Value = test::read_body_json(unknown_user).await;

    assert_eq!(wrong_password, unknown_user);
}

#[actix_web::test]
async fn test_password_not_exposed() {
    let app = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(signup_body("plaintext@example.com", "sensitive_password_123"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());
    assert!(!body.to_string().contains("sensitive_password_123"));
}

#[actix_web::test]
async fn test_profile_requires_token() {
    let app = setup_auth_test!();

    let req = test::TestRequest::get().uri("/api/user/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_expired_token_rejected() {
    let app = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(signup_body("expired@example.com", "pw"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let user_id = body["user"]["id"].as_str().unwrap();

    let expired = generate_token(user_id, SECRET, Duration::days(-1)).unwrap();
    let req = test::TestRequest::get()
        .uri("/api/user/profile")
        .insert_header(("Authorization", format!("Bearer {}", expired)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["details"]["message"], "Token expired");
}

#[actix_web::test]
async fn test_tampered_token_rejected() {
    let app = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(signup_body("tamper@example.com", "pw"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let token = body["token"].as_str().unwrap();

    // Flip the last signature character.
    let mut tampered = token.to_string();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let req = test::TestRequest::get()
        .uri("/api/user/profile")
        .insert_header(("Authorization", format!("Bearer {}", tampered)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key("x-request-id"));
}

#[actix_web::test]
async fn test_token_signed_with_other_secret_rejected() {
    let app = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(signup_body("forged@example.com", "pw"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let user_id = body["user"]["id"].as_str().unwrap();

    let forged = generate_token(user_id, "someone-elses-secret", Duration::days(1)).unwrap();
    let req = test::TestRequest::get()
        .uri("/api/user/profile")
        .insert_header(("Authorization", format!("Bearer {}", forged)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_non_bearer_scheme_rejected() {
    let app = setup_auth_test!();

    let req = test::TestRequest::get()
        .uri("/api/user/profile")
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_login_ignores_stale_bearer_header() {
    let app = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(signup_body("stale@example.com", "password123"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let user_id = body["user"]["id"].as_str().unwrap();
    let expired = generate_token(user_id, SECRET, Duration::days(-1)).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("Authorization", format!("Bearer {}", expired)))
        .set_json(LoginRequest {
            email: "stale@example.com".to_string(),
            password: "password123".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let fresh = body["token"].as_str().unwrap();
    let req = test::TestRequest::get()
        .uri("/api/user/profile")
        .insert_header(("Authorization", format!("Bearer {}", fresh)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_signup_ignores_garbage_bearer_header() {
    let app = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .insert_header(("Authorization", "Bearer garbage"))
        .set_json(signup_body("garbage@example.com", "pw"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_email_domain_case_is_ignored() {
    let app = setup_auth_test!();

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(signup_body("mixed@Example.com", "password123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["email"], "mixed@example.com");

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(signup_body("mixed@example.com", "other"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(LoginRequest {
            email: "mixed@EXAMPLE.COM".to_string(),
            password: "password123".to_string(),
        })
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}
