use portal_gate::{AppConfig, AppState, create_router};
use reqwest::{StatusCode, header, redirect::Policy};
use std::path::PathBuf;
use tokio::net::TcpListener;

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
}

async fn spawn_app() -> TestApp {
    let config = AppConfig {
        assets_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/dist"),
        ..AppConfig::default()
    };
    let router = create_router(AppState::new(config));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp { address }
}

/// Client that reports redirects instead of following them.
fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("client build fail")
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;
    let response = client()
        .get(&format!("{}/health", app.address))
        .send()
        .await
        .expect("req fail");
    assert!(response.status().is_success());
}

#[tokio::test]
async fn test_sign_in_round_trip() {
    let app = spawn_app().await;
    let client = client();

    // 1. Anonymous visit to a protected page is bounced to sign-in.
    let response = client
        .get(&format!("{}/teams/platform", app.address))
        .send()
        .await
        .expect("req fail");
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = response.headers()[header::LOCATION].to_str().unwrap().to_string();
    assert_eq!(location, "/sign-in?redirect=%2Fteams%2Fplatform");

    // 2. The sign-in page itself is reachable without a session.
    let response = client
        .get(&format!("{}{}", app.address, location))
        .send()
        .await
        .expect("req fail");
    assert_eq!(response.status(), StatusCode::OK);

    // 3. After sign-in the auth service sets the cookie; the original page now loads.
    let response = client
        .get(&format!("{}/teams/platform", app.address))
        .header(header::COOKIE, "token=issued-by-auth-service")
        .send()
        .await
        .expect("req fail");
    assert_eq!(response.status(), StatusCode::OK);
}
