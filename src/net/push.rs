//! WebSocket push pump: forwards backend notifications into the [`EventHub`].
//!
//! Frames are `{"topic": "...", "data": "..."}`; `data` is absent for plain
//! refetch triggers. If the socket drops, the pump logs and exits — there is no
//! automatic reconnect, so live updates pause until the next explicit fetch
//! (for example re-selecting the conversation).

use futures::StreamExt;
use gloo_net::websocket::Message as WsMessage;
use gloo_net::websocket::futures::WebSocket;
use serde::Deserialize;

use crate::net::events::EventHub;

#[derive(Deserialize)]
struct PushFrame {
    topic: String,
    #[serde(default)]
    data: Option<String>,
}

/// Connect to the backend's push channel and pump frames into `hub` until the
/// connection closes.
pub fn spawn_push_client(hub: EventHub) {
    leptos::task::spawn_local(run(hub));
}

async fn run(hub: EventHub) {
    let location = web_sys::window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default();
    let ws_proto = if location.starts_with("https") { "wss" } else { "ws" };
    let host = web_sys::window()
        .and_then(|w| w.location().host().ok())
        .unwrap_or_else(|| "localhost:3000".to_owned());
    let url = format!("{ws_proto}://{host}/api/events");

    let ws = match WebSocket::open(&url) {
        Ok(ws) => ws,
        Err(e) => {
            leptos::logging::warn!("push channel failed to open: {e}");
            return;
        }
    };
    let (_write, mut read) = ws.split();

    while let Some(msg) = read.next().await {
        match msg {
            Ok(WsMessage::Text(text)) => match serde_json::from_str::<PushFrame>(&text) {
                Ok(frame) => hub.emit(&frame.topic, frame.data.as_deref()),
                Err(e) => leptos::logging::warn!("undecodable push frame: {e}"),
            },
            Ok(WsMessage::Bytes(_)) => {}
            Err(e) => {
                leptos::logging::warn!("push channel error: {e}");
                break;
            }
        }
    }

    leptos::logging::warn!("push channel closed; live updates paused until next fetch");
}
