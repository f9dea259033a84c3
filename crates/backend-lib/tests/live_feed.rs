//! Live-feed tests against a real WebSocket connection.
use std::time::Duration;

use futures_util::StreamExt;
use tokio::net::TcpListener;
use tokio::time::{timeout, Instant};
use tokio_tungstenite::connect_async;

use glasshouse_backend_lib::{config::Settings, routes, store::MemoryStore, AppState};

fn test_state() -> AppState<MemoryStore> {
    let settings = Settings {
        hash_cost: 4,
        ..Settings::default()
    };
    AppState::new(MemoryStore::new(), settings)
}

async fn serve(state: &AppState<MemoryStore>) -> std::net::SocketAddr {
    let app = routes::create_router(state.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

type Feed = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

/// The upgrade callback subscribes shortly after the handshake completes;
/// ping until the viewer demonstrably receives something.
async fn wait_until_live(state: &AppState<MemoryStore>, feed: &mut Feed) {
    for _ in 0..50 {
        state.events.console("info", "ping");
        if let Ok(Some(Ok(message))) = timeout(Duration::from_millis(100), feed.next()).await {
            if message.is_text() {
                return;
            }
        }
    }
    panic!("viewer never received a message");
}

/// Collect frames until the predicate matches one, or the deadline passes
async fn find_frame<F>(feed: &mut Feed, deadline: Duration, predicate: F) -> Option<serde_json::Value>
where
    F: Fn(&serde_json::Value) -> bool,
{
    let until = Instant::now() + deadline;
    while Instant::now() < until {
        match timeout(Duration::from_millis(200), feed.next()).await {
            Ok(Some(Ok(message))) if message.is_text() => {
                let frame: serde_json::Value =
                    serde_json::from_str(message.to_text().unwrap()).unwrap();
                if predicate(&frame) {
                    return Some(frame);
                }
            },
            Ok(Some(Ok(_))) | Err(_) => {},
            Ok(Some(Err(_))) | Ok(None) => return None,
        }
    }
    None
}

#[tokio::test]
async fn test_viewer_receives_security_events() {
    let state = test_state();
    let addr = serve(&state).await;

    let (mut feed, _) = connect_async(format!("ws://{addr}/ws")).await.unwrap();
    wait_until_live(&state, &mut feed).await;

    state
        .auth
        .register("alice@example.com".to_string(), "password123".to_string())
        .await
        .unwrap();

    let frame = find_frame(&mut feed, Duration::from_secs(5), |frame| {
        frame["channel"] == "security-event"
            && frame["payload"]["category"] == "AUTHENTICATION"
    })
    .await
    .expect("viewer should receive the registration event");

    assert_eq!(frame["payload"]["action"], "REGISTER");
    assert_eq!(frame["payload"]["status"], "SUCCESS");
    assert_eq!(frame["payload"]["detail"]["identifier"], "alice@example.com");
}

#[tokio::test]
async fn test_late_viewer_misses_earlier_events() {
    let state = test_state();
    let addr = serve(&state).await;

    // the registration happens before anyone is watching
    state
        .auth
        .register("early@example.com".to_string(), "password123".to_string())
        .await
        .unwrap();

    let (mut feed, _) = connect_async(format!("ws://{addr}/ws")).await.unwrap();
    wait_until_live(&state, &mut feed).await;

    // nothing about the earlier registration ever shows up
    let replayed = find_frame(&mut feed, Duration::from_millis(500), |frame| {
        frame["channel"] == "security-event"
            && frame["payload"]["detail"]["identifier"] == "early@example.com"
    })
    .await;
    assert!(replayed.is_none());
}

#[tokio::test]
async fn test_viewer_sees_request_log_entries() {
    let state = test_state();
    let addr = serve(&state).await;

    let (mut feed, _) = connect_async(format!("ws://{addr}/ws")).await.unwrap();
    wait_until_live(&state, &mut feed).await;

    // hit the health endpoint over real HTTP via a second ws-less route:
    // the request-log middleware publishes an entry for it
    let client = tokio::net::TcpStream::connect(addr).await.unwrap();
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    let mut client = client;
    client
        .write_all(
            format!("GET /api/health HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n")
                .as_bytes(),
        )
        .await
        .unwrap();
    let mut sink = Vec::new();
    let _ = client.read_to_end(&mut sink).await;

    let frame = find_frame(&mut feed, Duration::from_secs(5), |frame| {
        frame["channel"] == "network-request" && frame["payload"]["path"] == "/api/health"
    })
    .await
    .expect("viewer should receive the request-log entry");

    assert_eq!(frame["payload"]["method"], "GET");
    assert_eq!(frame["payload"]["status"], 200);
}
