//! Control plane scenarios: HTTP contract on top of a live serializer.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt; // for `oneshot`

use pollwatch_api_http::{make_router, HttpServer, HttpServerConfig};
use pollwatch_core::application::serializer::command_channel;
use pollwatch_core::application::{
    shutdown_channel, Engine, EngineConfig, JobRegistry, RequestSerializer, WorkQueue,
};
use pollwatch_core::domain::{JobSpec, SortMode};
use pollwatch_core::port::item_sink::mocks::RecordingSink;
use pollwatch_core::port::search_provider::mocks::ScriptedSearchProvider;

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// GET /jobs, retrying while the command queue is still full
async fn jobs_json(app: axum::Router) -> serde_json::Value {
    for _ in 0..100 {
        let request = Request::builder().uri("/jobs").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        if response.status() == StatusCode::SERVICE_UNAVAILABLE {
            tokio::time::sleep(Duration::from_millis(10)).await;
            continue;
        }
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        return serde_json::from_slice(&body).unwrap();
    }
    panic!("command queue never drained");
}

#[tokio::test]
async fn test_saturated_command_queue_drops_fourth_request() {
    let registry = JobRegistry::from_specs(vec![
        JobSpec::new("bolsonaro", SortMode::New, 3),
        JobSpec::new("trump", SortMode::New, 3),
        JobSpec::new("nicolás maduro", SortMode::New, 3),
    ])
    .unwrap();
    let queue = WorkQueue::for_jobs(registry.len());
    let (commands, requests) = command_channel(3);
    let (shutdown, _token) = shutdown_channel();
    let app = make_router(commands);

    // serializer not draining yet: three commands fill the queue
    for id in 0..3 {
        let response = app.clone().oneshot(post(&format!("/deactivate/{}", id))).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }
    let response = app.clone().oneshot(post("/activate/0")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    tokio::spawn(RequestSerializer::new(registry, queue.clone(), requests, shutdown).run());

    let json = jobs_json(app).await;
    let jobs = json["jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 3);
    // the dropped activate never reached the registry
    assert!(jobs.iter().all(|job| job["active"] == false));
    assert!(queue.is_empty());
}

#[tokio::test]
async fn test_bad_job_id_never_reaches_engine() {
    let (commands, mut requests) = command_channel(3);
    let app = make_router(commands);

    let response = app.oneshot(post("/activate/nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(requests.try_recv().is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_exit_over_http_stops_engine_and_server() {
    let provider = ScriptedSearchProvider::new().with_delay(Duration::from_millis(10));
    let engine = Engine::new(
        EngineConfig::default(),
        Arc::new(provider),
        Arc::new(RecordingSink::new()),
    );
    let handle = engine
        .start(vec![JobSpec::new("trump", SortMode::New, 3)])
        .await
        .unwrap();

    let config = HttpServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
    };
    let (addr, server) = HttpServer::new(config, handle.commands())
        .start(handle.shutdown_token())
        .await
        .unwrap();

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{}/deactivate/x", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let response = client
        .post(format!("http://{}/exit", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 202);
    drop(client);

    tokio::time::timeout(Duration::from_secs(3), handle.wait_for_exit())
        .await
        .expect("exit should unblock the wait point");
    tokio::time::timeout(Duration::from_secs(3), server)
        .await
        .expect("server should stop after exit")
        .unwrap();

    handle.join(Duration::from_secs(1)).await;
}
