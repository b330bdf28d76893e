use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use courtside::config::Config;
use courtside::errors::Error;
use courtside::resolver::StreamResolver;

/// Serve a fixed HTML body on a local socket, counting accepted requests.
async fn serve_fixture(body: &'static str) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else { break };
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::spawn(async move {
                // Drain the request head before answering.
                let mut buf = [0u8; 4096];
                let mut head = Vec::new();
                loop {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => {
                            head.extend_from_slice(&buf[..n]);
                            if head.windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                        }
                    }
                }
                let resp = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(resp.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    (format!("http://{addr}"), hits)
}

fn test_config() -> Config {
    Config {
        max_attempts: 4,
        retry_delay_ms: 100,
        request_timeout_secs: 5,
        ..Default::default()
    }
}

#[tokio::test]
async fn resolves_cdn_manifest_on_first_attempt() {
    let (url, hits) = serve_fixture(
        r#"<html><video src="https://foo.akamaized.net/path/x.m3u8?bar=1"></video></html>"#,
    )
    .await;
    let resolved = StreamResolver::new(&test_config())
        .resolve(&url)
        .await
        .expect("resolve");
    assert_eq!(resolved.url, "https://foo.akamaized.net/path/x.m3u8?bar=1");
    assert_eq!(resolved.attempts, 1);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn globalurl_assignment_resolves_without_cdn_match() {
    let (url, _hits) =
        serve_fixture(r#"<script>var globalurl = "https://cdn.example/y.m3u8";</script>"#).await;
    let resolved = StreamResolver::new(&test_config())
        .resolve(&url)
        .await
        .expect("resolve");
    assert_eq!(resolved.url, "https://cdn.example/y.m3u8");
}

#[tokio::test]
async fn exhausts_attempt_budget_with_spacing() {
    let (url, hits) = serve_fixture("<html><body>Stream starts at tip-off.</body></html>").await;
    let resolver = StreamResolver::new(&test_config());

    let started = Instant::now();
    let err = resolver.resolve(&url).await.expect_err("should exhaust");
    let elapsed = started.elapsed();

    // 4 fetches, 3 pauses of 100ms between them, and no fifth attempt.
    assert_eq!(hits.load(Ordering::SeqCst), 4);
    assert!(elapsed >= Duration::from_millis(300), "elapsed {elapsed:?}");
    match err {
        Error::StreamNotFound { attempts } => assert_eq!(attempts, 4),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn transport_errors_count_as_attempts() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        port
    };
    let config = Config {
        max_attempts: 2,
        retry_delay_ms: 50,
        request_timeout_secs: 2,
        ..Default::default()
    };
    let err = StreamResolver::new(&config)
        .resolve(&format!("http://127.0.0.1:{port}/nba/suns"))
        .await
        .expect_err("nothing is listening");
    match err {
        Error::StreamNotFound { attempts } => assert_eq!(attempts, 2),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn resolution_is_idempotent_for_an_unchanged_page() {
    let (url, hits) = serve_fixture(
        r#"<html><script>globalurl = 'https://live.akamaized.net/nba/gsw/master.m3u8'</script></html>"#,
    )
    .await;
    let resolver = StreamResolver::new(&test_config());
    let first = resolver.resolve(&url).await.expect("first resolve");
    let second = resolver.resolve(&url).await.expect("second resolve");
    assert_eq!(first.url, second.url);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}
