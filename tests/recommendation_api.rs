//! HTTP-level tests for the recommendation service.
//!
//! Most tests drive the router directly with `tower::ServiceExt::oneshot`.
//! The `tcp_*` tests bind an ephemeral port and go through a real socket.
//!
//! Run with: cargo test --test recommendation_api
use std::collections::HashSet;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use recommendation_service::http::{bind, serve, ServerError};
use recommendation_service::routes::recommendation::Recommendation;
use recommendation_service::{create_router, AppState, OptionList, LUNCH_OPTIONS};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tower::util::ServiceExt;
use uuid::Uuid;

fn app() -> Router {
    create_router(AppState::default())
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn recommendation_returns_ok_with_json() {
    let response = get(app(), "/recommendation").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("application/json"));
}

#[tokio::test]
async fn recommendation_body_has_single_string_key() {
    let body = body_json(get(app(), "/recommendation").await).await;

    let object = body.as_object().expect("body should be a JSON object");
    assert_eq!(object.len(), 1);
    let value = object
        .get("recommendation")
        .and_then(|v| v.as_str())
        .expect("recommendation should be a string");
    assert!(LUNCH_OPTIONS.contains(&value), "unexpected value {value}");
}

#[tokio::test]
async fn recommendation_ignores_query_and_body() {
    let request = Request::builder()
        .uri("/recommendation?cuisine=french")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"recommendation":"Escargot"}"#))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let value = body["recommendation"].as_str().unwrap();
    assert!(LUNCH_OPTIONS.contains(&value));
}

#[tokio::test]
async fn recommendation_covers_every_option_over_many_requests() {
    let app = app();
    let mut seen = HashSet::new();

    for _ in 0..10_000 {
        let response = get(app.clone(), "/recommendation").await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: Recommendation = serde_json::from_slice(&bytes).unwrap();
        assert!(LUNCH_OPTIONS.contains(&parsed.recommendation.as_str()));
        seen.insert(parsed.recommendation);
        if seen.len() == LUNCH_OPTIONS.len() {
            break;
        }
    }

    assert_eq!(seen.len(), LUNCH_OPTIONS.len());
}

#[tokio::test]
async fn recommendation_uses_state_option_list() {
    let options = OptionList::new(["Dumplings"]).unwrap();
    let app = create_router(AppState::new(options));

    let body = body_json(get(app, "/recommendation").await).await;
    assert_eq!(body, serde_json::json!({ "recommendation": "Dumplings" }));
}

#[tokio::test]
async fn recommendation_is_not_cacheable() {
    let response = get(app(), "/recommendation").await;
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
}

#[tokio::test]
async fn responses_carry_request_id() {
    let first = get(app(), "/recommendation").await;
    let second = get(app(), "/nonexistent").await;

    let first_id = first.headers().get("x-request-id").unwrap().to_str().unwrap();
    let second_id = second.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(Uuid::parse_str(first_id).is_ok());
    assert!(Uuid::parse_str(second_id).is_ok());
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = get(app(), "/nonexistent").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app(), "/").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn post_to_recommendation_is_rejected() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/recommendation")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

/// Serve the default app on 127.0.0.1:0, returning the bound address and a
/// trigger that stops the server.
async fn spawn_server() -> (
    SocketAddr,
    oneshot::Sender<()>,
    tokio::task::JoinHandle<Result<(), ServerError>>,
) {
    let listener = bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(serve(
        listener,
        app(),
        async move {
            let _ = stop_rx.await;
        },
        Duration::from_secs(30),
    ));

    (addr, stop_tx, handle)
}

#[tokio::test]
async fn tcp_recommendation_round_trip() {
    let (addr, stop_tx, handle) = spawn_server().await;

    let response = reqwest::get(format!("http://{addr}/recommendation"))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Recommendation = response.json().await.unwrap();
    assert!(LUNCH_OPTIONS.contains(&body.recommendation.as_str()));

    let response = reqwest::get(format!("http://{addr}/nonexistent"))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    stop_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn tcp_concurrent_requests() {
    let (addr, stop_tx, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let requests = (0..32).map(|_| {
        let client = client.clone();
        let url = format!("http://{addr}/recommendation");
        tokio::spawn(async move {
            let body: Recommendation = client.get(url).send().await?.json().await?;
            Ok::<_, reqwest::Error>(body)
        })
    });

    for request in requests.collect::<Vec<_>>() {
        let body = request.await.unwrap().unwrap();
        assert!(LUNCH_OPTIONS.contains(&body.recommendation.as_str()));
    }

    stop_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn bind_fails_when_port_in_use() {
    let occupied = bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = occupied.local_addr().unwrap();

    let err = bind(addr).await.unwrap_err();
    assert!(matches!(err, ServerError::Bind { addr: a, .. } if a == addr));
}

#[tokio::test]
async fn stalled_connection_is_dropped_after_grace_period() {
    let listener = bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let grace_period = Duration::from_millis(200);

    let handle = tokio::spawn(serve(
        listener,
        app(),
        async move {
            let _ = stop_rx.await;
        },
        grace_period,
    ));

    // Request head without the terminating blank line keeps the connection busy
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /recommendation HTTP/1.1\r\nHost: x\r\n")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let started = Instant::now();
    stop_tx.send(()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("serve should return once the grace period elapses")
        .unwrap();
    assert!(result.is_ok());
    assert!(started.elapsed() >= grace_period);

    drop(stream);
}
