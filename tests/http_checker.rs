//! Socket-level tests for the HTTP checker: canned responses, stalled
//! servers, refused connections and construction failures.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use healthvisor::{Checker, Endpoint, HttpChecker, Status, UNEXPECTED_STATUS_CODE};

const OK: &str = "HTTP/1.1 200 OK\r\ncontent-length: 2\r\nconnection: close\r\n\r\nok";
const CREATED: &str = "HTTP/1.1 201 Created\r\ncontent-length: 0\r\nconnection: close\r\n\r\n";
const SERVER_ERROR: &str =
    "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n";

/// Serves exactly one canned response, reading the request headers first.
/// Returns the bound address and a channel yielding the raw request bytes.
async fn serve_once(response: &'static str) -> (SocketAddr, oneshot::Receiver<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (request_tx, request_rx) = oneshot::channel();

    tokio::spawn(async move {
        if let Ok((mut stream, _)) = listener.accept().await {
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                match stream.read(&mut buf).await {
                    Ok(0) => break,
                    Ok(n) => {
                        request.extend_from_slice(&buf[..n]);
                        if request.windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
            let _ = request_tx.send(request);
        }
    });

    (addr, request_rx)
}

fn endpoint_for(addr: SocketAddr) -> Endpoint {
    Endpoint::new("test", format!("http://{addr}/health")).with_timeout(Duration::from_secs(2))
}

#[tokio::test]
async fn test_success_classifies_up() {
    let (addr, _request) = serve_once(OK).await;
    let report = HttpChecker::new().check(&endpoint_for(addr)).await;

    assert_eq!(report.status, Status::Up);
    assert_eq!(report.status_code, 200);
    assert!(report.error.is_empty());
    assert!(report.messages.is_empty());
}

#[tokio::test]
async fn test_server_error_classifies_down() {
    let (addr, _request) = serve_once(SERVER_ERROR).await;
    let report = HttpChecker::new().check(&endpoint_for(addr)).await;

    assert_eq!(report.status, Status::Down);
    assert_eq!(report.status_code, 500);
}

#[tokio::test]
async fn test_strict_mismatch_degrades_with_message() {
    let (addr, _request) = serve_once(CREATED).await;
    let endpoint = endpoint_for(addr).with_expected_status(200);
    let report = HttpChecker::new().check(&endpoint).await;

    assert_eq!(report.status, Status::Degraded);
    assert_eq!(report.status_code, 201);
    assert_eq!(report.messages, vec![UNEXPECTED_STATUS_CODE]);
}

#[tokio::test]
async fn test_configured_headers_are_sent() {
    let (addr, request) = serve_once(OK).await;
    let endpoint = endpoint_for(addr)
        .with_header("authorization", "Bearer token123")
        .with_header("x-probe", "healthvisor");
    let report = HttpChecker::new().check(&endpoint).await;
    assert_eq!(report.status, Status::Up);

    let raw = String::from_utf8_lossy(&request.await.unwrap()).to_lowercase();
    assert!(raw.contains("authorization: bearer token123"), "{raw}");
    assert!(raw.contains("x-probe: healthvisor"), "{raw}");
}

#[tokio::test]
async fn test_stalled_server_hits_deadline() {
    // Accepts and reads but never answers; the probe must time out.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            tokio::time::sleep(Duration::from_secs(10)).await;
        }
    });

    let endpoint = Endpoint::new("slow", format!("http://{addr}/"))
        .with_timeout(Duration::from_millis(200));
    let report = HttpChecker::new().check(&endpoint).await;

    assert_eq!(report.status, Status::Unreachable);
    assert_eq!(report.status_code, 0);
    assert!(
        report.error.contains("deadline exceeded"),
        "error should reference the deadline: {}",
        report.error
    );
    assert!(report.elapsed >= Duration::from_millis(150));
}

#[tokio::test]
async fn test_connection_refused_is_unreachable() {
    // Bind to grab a free port, then close it again.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let endpoint = Endpoint::new("gone", format!("http://{addr}/"))
        .with_timeout(Duration::from_millis(500));
    let report = HttpChecker::new().check(&endpoint).await;

    assert_eq!(report.status, Status::Unreachable);
    assert!(!report.error.is_empty());
}

#[tokio::test]
async fn test_invalid_url_is_a_construction_error() {
    let endpoint = Endpoint::new("bad", "://nope").with_timeout(Duration::from_secs(1));
    let report = HttpChecker::new().check(&endpoint).await;

    assert_eq!(report.status, Status::Unreachable);
    assert_eq!(report.elapsed, Duration::ZERO);
    assert!(report.error.contains("invalid url"), "{}", report.error);
}

#[tokio::test]
async fn test_invalid_method_is_a_construction_error() {
    let endpoint = Endpoint::new("bad", "http://example.com")
        .with_method("NOT A METHOD")
        .with_timeout(Duration::from_secs(1));
    let report = HttpChecker::new().check(&endpoint).await;

    assert_eq!(report.status, Status::Unreachable);
    assert_eq!(report.elapsed, Duration::ZERO);
    assert!(report.error.contains("invalid method"), "{}", report.error);
}
