use std::{
    sync::atomic::{AtomicU32, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use liftlog_core::{
    network::{
        network_retry_policy, Locale, MessageCatalog, RawFailure, Request, Response, Transport,
    },
    NetworkErrorClassifier, NetworkErrorKind, ResilientClient, RetryOptions,
};
use serde::Deserialize;

/// Serves a fixed catalog after the connection has dropped `outages` times.
struct CatalogServer {
    outages: AtomicU32,
    requests: AtomicU32,
}

impl CatalogServer {
    fn new(outages: u32) -> Self {
        Self {
            outages: AtomicU32::new(outages),
            requests: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl Transport for CatalogServer {
    async fn send(&self, request: &Request) -> Result<Response, RawFailure> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self
            .outages
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(RawFailure::transport("connection reset by peer"));
        }
        match request.url.as_str() {
            "/exercises" => Ok(Response::new(
                200,
                r#"[{"id":"squat","name":"Back Squat"},{"id":"bench","name":"Bench Press"}]"#,
            )),
            "/admin" => Ok(Response::new(403, "admin only")),
            _ => Ok(Response::new(404, "no such route")),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Exercise {
    id: String,
    name: String,
}

fn options() -> RetryOptions {
    RetryOptions {
        max_retries: 2,
        base_delay_ms: 250,
        max_delay_ms: 1000,
        backoff_factor: 2.0,
    }
}

#[tokio::test(start_paused = true)]
async fn test_fetch_catalog_through_outage() {
    let client = ResilientClient::new(
        CatalogServer::new(2),
        NetworkErrorClassifier::default(),
        options(),
    );

    let started = tokio::time::Instant::now();
    let exercises: Vec<Exercise> = client.get_json("/exercises").await.unwrap();

    assert_eq!(exercises.len(), 2);
    assert_eq!(exercises[1].name, "Bench Press");
    assert_eq!(exercises[0].id, "squat");
    assert_eq!(client.transport().requests.load(Ordering::SeqCst), 3);
    assert_eq!(started.elapsed(), Duration::from_millis(750));
}

#[tokio::test(start_paused = true)]
async fn test_outage_longer_than_budget() {
    let client = ResilientClient::new(
        CatalogServer::new(10),
        NetworkErrorClassifier::default(),
        options(),
    );

    let err = client.execute(&Request::get("/exercises")).await.unwrap_err();

    assert_eq!(err.kind, NetworkErrorKind::NoConnection);
    assert!(err.technical_message.contains("connection reset by peer"));
    assert_eq!(client.transport().requests.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_client_errors_are_final_and_localised() {
    let client = ResilientClient::new(
        CatalogServer::new(0),
        NetworkErrorClassifier::new(MessageCatalog::new(Locale::Spanish)),
        options(),
    );

    let forbidden = client.execute(&Request::get("/admin")).await.unwrap_err();
    assert_eq!(forbidden.kind, NetworkErrorKind::Forbidden);
    assert_eq!(forbidden.title, "Acceso denegado");

    let missing = client.execute(&Request::get("/routines")).await.unwrap_err();
    assert_eq!(missing.kind, NetworkErrorKind::NotFound);
    assert_eq!(missing.status, Some(404));
    assert_eq!(missing.technical_message, "HTTP 404: no such route");

    assert_eq!(client.transport().requests.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_custom_policy_observes_retries() {
    let seen = std::sync::Arc::new(AtomicU32::new(0));
    let counter = seen.clone();
    let client = ResilientClient::new(
        CatalogServer::new(1),
        NetworkErrorClassifier::default(),
        options(),
    )
    .with_retry_policy(network_retry_policy(options()).on_retry(move |event| {
        assert_eq!(event.error.kind, NetworkErrorKind::NoConnection);
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    client.execute(&Request::get("/exercises")).await.unwrap();
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}
