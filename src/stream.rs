//! Demonstration listener for the price websocket stream
//!
//! Independent of the HTTP client: different protocol, no shared state.
//! The listener forwards raw text frames to subscribers and reconnects with
//! exponential backoff when the upstream connection drops.

use crate::constants::{PRICE_STREAM_URL, STREAM_INITIAL_BACKOFF_MS, STREAM_MAX_BACKOFF_MS};
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

/// Capacity of the channel between the stream task and subscribers
const CHANNEL_CAPACITY: usize = 256;

/// Price stream listener
///
/// The first `subscribe` call spawns the connection task; every subscriber
/// then receives each raw JSON frame the upstream pushes. Frames sent while
/// no subscriber is listening are dropped.
pub struct PriceStream {
    url: String,
    tx: broadcast::Sender<String>,
    started: AtomicBool,
}

impl PriceStream {
    /// Listener for the CoinMarketCap price stream
    pub fn new() -> Self {
        Self::with_url(PRICE_STREAM_URL)
    }

    /// Listener for a custom stream URL
    pub fn with_url(url: impl Into<String>) -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            url: url.into(),
            tx,
            started: AtomicBool::new(false),
        }
    }

    /// Subscribes to raw frames, starting the connection task on first call
    ///
    /// Must be called from within a tokio runtime.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        if self
            .started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            let url = self.url.clone();
            let tx = self.tx.clone();
            tokio::spawn(run(url, tx));
        }
        self.tx.subscribe()
    }
}

impl Default for PriceStream {
    fn default() -> Self {
        Self::new()
    }
}

/// Connect-and-forward loop with exponential reconnect backoff
async fn run(url: String, tx: broadcast::Sender<String>) {
    let mut backoff_ms = STREAM_INITIAL_BACKOFF_MS;

    loop {
        tracing::info!(%url, "Connecting to price stream");
        match connect_async(url.as_str()).await {
            Ok((mut ws, _)) => {
                backoff_ms = STREAM_INITIAL_BACKOFF_MS;

                while let Some(frame) = ws.next().await {
                    match frame {
                        Ok(Message::Text(text)) => {
                            let _ = tx.send(text.to_string());
                        }
                        // Control and binary frames are not part of the feed
                        Ok(_) => {}
                        Err(e) => {
                            tracing::warn!(error = %e, "Price stream read failed");
                            break;
                        }
                    }
                }
                tracing::warn!(reconnect_in_ms = backoff_ms, "Price stream disconnected");
            }
            Err(e) => {
                tracing::warn!(error = %e, reconnect_in_ms = backoff_ms, "Price stream connect failed");
            }
        }

        tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
        backoff_ms = (backoff_ms * 2).min(STREAM_MAX_BACKOFF_MS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::SinkExt;
    use tokio::net::TcpListener;
    use tokio_tungstenite::accept_async;

    #[tokio::test]
    async fn forwards_text_frames_to_subscribers() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(socket).await.unwrap();
            ws.send(Message::text(r#"{"p":1.0}"#)).await.unwrap();
            ws.send(Message::text(r#"{"p":2.0}"#)).await.unwrap();
        });

        let stream = PriceStream::with_url(format!("ws://{}", addr));
        let mut rx = stream.subscribe();

        assert_eq!(rx.recv().await.unwrap(), r#"{"p":1.0}"#);
        assert_eq!(rx.recv().await.unwrap(), r#"{"p":2.0}"#);
    }
}
