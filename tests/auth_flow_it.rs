//! End-to-end HTTP flow tests over the in-process router.

use axum::http::{header, Method, StatusCode};

use harness::{body_json, make_router, request, CLIENT_URL};

#[tokio::test]
async fn health_returns_ok() {
    let (app, _) = make_router();
    let resp = request(&app, Method::GET, "/health", None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn signup_login_verify_profile_flow() {
    let (app, mailer) = make_router();

    // Signup: account starts unverified, response carries a session token.
    let resp = request(
        &app,
        Method::POST,
        "/api/auth/signup",
        Some(r#"{"email":"a@x.com","name":"A","password":"password-1"}"#),
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], "Signup successful, please verify your email");
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["verified"], false);
    assert!(body["user"]["token"].as_str().is_some());

    // Login works while still unverified.
    let resp = request(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(r#"{"email":"a@x.com","password":"password-1"}"#),
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let session_token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["verified"], false);

    // Profile via bearer token still shows unverified.
    let resp = request(
        &app,
        Method::POST,
        "/api/auth/profile",
        Some(r#"{"email":"a@x.com"}"#),
        Some(&session_token),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["verified"], false);

    // Follow the emailed verification link: redirect to the client root.
    let verification_token = mailer.last_token().unwrap();
    let resp = request(
        &app,
        Method::GET,
        &format!("/api/auth/verify/{verification_token}"),
        None,
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        CLIENT_URL
    );

    // Profile now reports verified.
    let resp = request(
        &app,
        Method::POST,
        "/api/auth/profile",
        Some(r#"{"email":"a@x.com"}"#),
        Some(&session_token),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["verified"], true);

    // The verify link is idempotent while the token is valid.
    let resp = request(
        &app,
        Method::GET,
        &format!("/api/auth/verify/{verification_token}"),
        None,
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn duplicate_signup_is_rejected() {
    let (app, _) = make_router();
    let body = r#"{"email":"a@x.com","name":"A","password":"password-1"}"#;

    let resp = request(&app, Method::POST, "/api/auth/signup", Some(body), None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = request(&app, Method::POST, "/api/auth/signup", Some(body), None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "User already exists");
}

#[tokio::test]
async fn signup_validates_input() {
    let (app, _) = make_router();

    let resp = request(
        &app,
        Method::POST,
        "/api/auth/signup",
        Some(r#"{"email":"a@x.com","name":"A","password":"short"}"#),
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = request(
        &app,
        Method::POST,
        "/api/auth/signup",
        Some(r#"{"email":"not-an-email","name":"A","password":"password-1"}"#),
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_failures_share_one_message() {
    let (app, _) = make_router();
    let resp = request(
        &app,
        Method::POST,
        "/api/auth/signup",
        Some(r#"{"email":"a@x.com","name":"A","password":"password-1"}"#),
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = request(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(r#"{"email":"a@x.com","password":"password-2"}"#),
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let wrong_password = body_json(resp).await;

    let resp = request(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(r#"{"email":"ghost@x.com","password":"password-1"}"#),
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let unknown_email = body_json(resp).await;

    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password["error"], "Invalid email or password");
}

#[tokio::test]
async fn profile_requires_a_session_token() {
    let (app, mailer) = make_router();
    let resp = request(
        &app,
        Method::POST,
        "/api/auth/signup",
        Some(r#"{"email":"a@x.com","name":"A","password":"password-1"}"#),
        None,
    )
    .await;
    let session_token = body_json(resp).await["user"]["token"]
        .as_str()
        .unwrap()
        .to_string();

    // No header at all.
    let resp = request(
        &app,
        Method::POST,
        "/api/auth/profile",
        Some(r#"{"email":"a@x.com"}"#),
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // A verification token is not a session credential.
    let verification_token = mailer.last_token().unwrap();
    let resp = request(
        &app,
        Method::POST,
        "/api/auth/profile",
        Some(r#"{"email":"a@x.com"}"#),
        Some(&verification_token),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Valid session token but unknown account.
    let resp = request(
        &app,
        Method::POST,
        "/api/auth/profile",
        Some(r#"{"email":"ghost@x.com"}"#),
        Some(&session_token),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["error"], "User not found");
}

#[tokio::test]
async fn verify_with_bad_token_is_rejected() {
    let (app, _) = make_router();
    let resp = request(
        &app,
        Method::GET,
        "/api/auth/verify/not-a-real-token",
        None,
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "Invalid or expired token");
}

#[tokio::test]
async fn resend_verification_lifecycle() {
    let (app, mailer) = make_router();

    // Unknown account.
    let resp = request(
        &app,
        Method::POST,
        "/resend-verification",
        Some(r#"{"email":"ghost@x.com"}"#),
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["message"], "User not found.");

    // Missing email.
    let resp = request(&app, Method::POST, "/resend-verification", Some("{}"), None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["message"], "Email is required.");

    // Happy path after signup.
    request(
        &app,
        Method::POST,
        "/api/auth/signup",
        Some(r#"{"email":"a@x.com","name":"A","password":"password-1"}"#),
        None,
    )
    .await;
    let resp = request(
        &app,
        Method::POST,
        "/resend-verification",
        Some(r#"{"email":"a@x.com"}"#),
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["message"], "Verification email sent.");
    assert_eq!(mailer.sent.lock().unwrap().len(), 2);

    // Already verified.
    let token = mailer.last_token().unwrap();
    let resp = request(&app, Method::GET, &format!("/api/auth/verify/{token}"), None, None).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = request(
        &app,
        Method::POST,
        "/resend-verification",
        Some(r#"{"email":"a@x.com"}"#),
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["message"], "User is already verified.");
}
