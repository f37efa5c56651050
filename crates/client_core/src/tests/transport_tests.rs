use std::{sync::Arc, time::Duration};

use super::*;
use axum::{
    extract::{
        ws::{Message as WsMessage, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use serde_json::json;
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
    time::timeout,
};

#[derive(Clone)]
struct FakeSimulation {
    received: Arc<Mutex<Option<oneshot::Sender<String>>>>,
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<FakeSimulation>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| serve_socket(socket, state))
}

async fn serve_socket(mut socket: WebSocket, state: FakeSimulation) {
    let update = json!({
        "event": "update_ui",
        "data": {
            "episode": 1,
            "step": 1,
            "waiting_time": 4,
            "reward": -4,
            "epsilon": 1.0,
            "cars_passed": 0,
            "lights": {"North": 1, "South": 1, "East": 0, "West": 0},
            "queues": {"North": 0, "South": 1, "East": 2, "West": 1},
            "action": "Keep",
            "training": false
        }
    });
    let _ = socket
        .send(WsMessage::Text(r#"{"event":"update_ui","data":{"step":"oops"}}"#.to_string()))
        .await;
    let _ = socket.send(WsMessage::Text(update.to_string())).await;

    while let Some(Ok(msg)) = socket.recv().await {
        if let WsMessage::Text(text) = msg {
            if let Some(tx) = state.received.lock().await.take() {
                let _ = tx.send(text);
            }
            break;
        }
    }
    let _ = socket.send(WsMessage::Close(None)).await;
}

async fn spawn_fake_simulation() -> (String, oneshot::Receiver<String>) {
    let (tx, rx) = oneshot::channel();
    let state = FakeSimulation {
        received: Arc::new(Mutex::new(Some(tx))),
    };
    let app = Router::new()
        .route("/ws", get(ws_handler))
        .with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), rx)
}

async fn next_event(channel: &mut EventChannel) -> ChannelEvent {
    timeout(Duration::from_secs(5), channel.events.recv())
        .await
        .expect("event before timeout")
        .expect("channel open")
}

#[test]
fn http_urls_map_to_websocket_schemes() {
    assert_eq!(
        websocket_url("http://127.0.0.1:5000", "/ws").expect("url").as_str(),
        "ws://127.0.0.1:5000/ws"
    );
    assert_eq!(
        websocket_url("https://sim.example/", "events").expect("url").as_str(),
        "wss://sim.example/events"
    );
    assert_eq!(
        websocket_url("ws://localhost:9000", "").expect("url").as_str(),
        "ws://localhost:9000/"
    );
}

#[test]
fn rejects_unsupported_schemes() {
    let err = websocket_url("ftp://sim.example", "/ws").unwrap_err();
    assert!(matches!(err, TransportError::UnsupportedScheme(_)));
}

#[tokio::test]
async fn relays_events_and_requests_over_websocket() {
    let (server_url, received) = spawn_fake_simulation().await;
    let url = websocket_url(&server_url, "/ws").expect("url");
    let mut channel = connect(&url).await.expect("connect");

    assert_eq!(next_event(&mut channel).await, ChannelEvent::Connected);

    let ChannelEvent::Server(ServerEvent::UpdateUi(update)) = next_event(&mut channel).await
    else {
        panic!("expected the valid update_ui after the rejected frame");
    };
    assert_eq!(update.action, "Keep");
    assert_eq!(update.training, Some(false));

    channel
        .requests
        .send(ClientRequest::StartSimulation { training: true })
        .expect("queue request");
    let text = timeout(Duration::from_secs(5), received)
        .await
        .expect("request before timeout")
        .expect("request text");
    let value: serde_json::Value = serde_json::from_str(&text).expect("json");
    assert_eq!(
        value,
        json!({"event": "start_simulation", "data": {"training": true}})
    );

    assert_eq!(next_event(&mut channel).await, ChannelEvent::Disconnected);
}
