use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;

use keygate_auth::{Claims, Role, TokenCodec, TOKEN_TTL_SECS};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(jwt_secret: &str) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = keygate_api::app::build_app(jwt_secret);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Mint a token outside the service, the way an attacker or an expired
/// session would present one.
fn mint_token(jwt_secret: &str, subject: &str, role: Role, iat: i64, exp: i64) -> String {
    let claims = Claims {
        sub: subject.to_string(),
        role,
        iat,
        exp,
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .expect("failed to encode token")
}

async fn register(
    client: &reqwest::Client,
    base_url: &str,
    email: &str,
    password: &str,
) -> reqwest::Response {
    client
        .post(format!("{}/register", base_url))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .unwrap()
}

async fn login(
    client: &reqwest::Client,
    base_url: &str,
    email: &str,
    password: &str,
) -> reqwest::Response {
    client
        .post(format!("{}/login", base_url))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn("test-secret").await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn register_mints_a_user_token() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let res = register(&client, &srv.base_url, "A@x.com", "secret1").await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();

    // The stored account is normalized and public-safe.
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password_hash").is_none());

    // The token validates under the shared secret and carries the account.
    let codec = TokenCodec::new(jwt_secret.as_bytes());
    let claims = codec.validate(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.sub, body["user"]["id"].as_str().unwrap());
    assert!(claims.role.matches(&Role::USER));
    assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let res = register(&client, &srv.base_url, "a@x.com", "secret1").await;
    assert_eq!(res.status(), StatusCode::CREATED);

    // Same email modulo normalization.
    let res = register(&client, &srv.base_url, " A@X.COM ", "other-password").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_is_case_normalized_on_email_only() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let res = register(&client, &srv.base_url, "A@x.com", "secret1").await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let registered: serde_json::Value = res.json().await.unwrap();

    // Email case folds to the same account.
    let res = login(&client, &srv.base_url, "a@X.COM", "secret1").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["user"]["id"], registered["user"]["id"]);

    // Password case does not fold.
    let res = login(&client, &srv.base_url, "a@x.com", "SECRET1").await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bad_password_and_unknown_email_are_indistinguishable() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    register(&client, &srv.base_url, "a@x.com", "secret1").await;

    let wrong_password = login(&client, &srv.base_url, "a@x.com", "wrong-password").await;
    let unknown_email = login(&client, &srv.base_url, "nobody@x.com", "secret1").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    // Byte-identical bodies: no account-existence oracle.
    let a = wrong_password.text().await.unwrap();
    let b = unknown_email.text().await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn registration_input_is_validated() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let res = register(&client, &srv.base_url, "a@x.com", "short").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = register(&client, &srv.base_url, "   ", "secret1").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn protected_routes_require_a_valid_bearer_token() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    // No credentials at all.
    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Wrong scheme.
    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .header("authorization", "Token abc")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Garbage token.
    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Token signed under a different secret.
    let now = Utc::now().timestamp();
    let forged = mint_token("some-other-secret", "user-1", Role::ADMIN, now, now + 600);
    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(forged)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn whoami_reflects_the_token_identity() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let res = register(&client, &srv.base_url, "a@x.com", "secret1").await;
    let registered: serde_json::Value = res.json().await.unwrap();
    let token = registered["token"].as_str().unwrap();

    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["subject"], registered["user"]["id"]);
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn admin_routes_distinguish_unauthenticated_from_forbidden() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();
    let now = Utc::now().timestamp();

    // No token: not logged in.
    let res = client
        .get(format!("{}/admin/overview", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Valid token, insufficient role: logged in but forbidden.
    let user_token = mint_token(jwt_secret, "user-1", Role::USER, now, now + 600);
    let res = client
        .get(format!("{}/admin/overview", srv.base_url))
        .bearer_auth(user_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Expired admin token: expiry is checked before role, so this is a 401.
    let expired_admin =
        mint_token(jwt_secret, "admin-1", Role::ADMIN, now - TOKEN_TTL_SECS - 60, now - 60);
    let res = client
        .get(format!("{}/admin/overview", srv.base_url))
        .bearer_auth(expired_admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Live admin token: allowed. Role comparison is case-insensitive.
    let admin_token = mint_token(jwt_secret, "admin-1", Role::new("Admin"), now, now + 600);
    let res = client
        .get(format!("{}/admin/overview", srv.base_url))
        .bearer_auth(admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["subject"], "admin-1");
}
