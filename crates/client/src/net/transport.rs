use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use pong::{Transport, TransportError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    Opened,
    Frame(String),
    Closed,
}

/// WebSocket owned by the networked engine. Reading and writing happen on a
/// spawned task that only forwards text frames; dropping the transport aborts
/// the task and closes the socket.
pub struct WsTransport {
    outgoing: UnboundedSender<String>,
    open: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl WsTransport {
    /// Starts connecting to `url`. Lifecycle and inbound frames are reported
    /// on the returned channel.
    pub fn connect(url: String) -> (Self, UnboundedReceiver<SocketEvent>) {
        let (outgoing, outgoing_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let open = Arc::new(AtomicBool::new(false));

        let task = tokio::spawn(run_socket(url, outgoing_rx, events_tx, Arc::clone(&open)));

        let transport = Self {
            outgoing,
            open,
            task,
        };
        (transport, events_rx)
    }
}

impl Transport for WsTransport {
    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn send_text(&mut self, text: String) -> Result<(), TransportError> {
        if !self.is_open() {
            return Err(TransportError::Closed);
        }
        self.outgoing.send(text).map_err(|_| TransportError::Closed)
    }
}

impl Drop for WsTransport {
    fn drop(&mut self) {
        self.open.store(false, Ordering::SeqCst);
        self.task.abort();
    }
}

async fn run_socket(
    url: String,
    mut outgoing: UnboundedReceiver<String>,
    events: UnboundedSender<SocketEvent>,
    open: Arc<AtomicBool>,
) {
    log::info!("Connecting to {}", url);

    let stream = match connect_async(url.as_str()).await {
        Ok((stream, _response)) => stream,
        Err(e) => {
            log::warn!("WS error: {}", e);
            let _ = events.send(SocketEvent::Closed);
            return;
        }
    };

    log::info!("WS connected");
    open.store(true, Ordering::SeqCst);
    let _ = events.send(SocketEvent::Opened);

    let (mut sink, mut source) = stream.split();

    loop {
        tokio::select! {
            message = source.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    log::trace!("WS message {}", text.as_str());
                    if events.send(SocketEvent::Frame(text.as_str().to_owned())).is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    log::warn!("WS error: {}", e);
                    break;
                }
            },
            text = outgoing.recv() => match text {
                Some(text) => {
                    if let Err(e) = sink.send(Message::text(text)).await {
                        log::warn!("WS send failed: {}", e);
                        break;
                    }
                }
                None => break,
            },
        }
    }

    open.store(false, Ordering::SeqCst);
    log::info!("WS closed");
    let _ = events.send(SocketEvent::Closed);
}
