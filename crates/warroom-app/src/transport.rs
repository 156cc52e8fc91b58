//! WebSocket link to the command center.
//!
//! The ground station dials out to the command center and keeps one
//! connection. Every envelope travels as one text frame. A reader thread
//! forwards mission commands to the game loop; a writer thread drains the
//! outbound channel. Both halves share the same TCP socket.

use std::io;
use std::net::TcpStream;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;
use thiserror::Error;
use tracing::{debug, info, warn};
use tungstenite::client::IntoClientRequest;
use tungstenite::handshake::HandshakeError;
use tungstenite::protocol::Role;
use tungstenite::{Message, WebSocket};

use crate::envelope::Envelope;
use crate::state::{LoopCommand, Outbound};

pub type Socket = WebSocket<TcpStream>;

/// The two halves of an established command-center connection.
pub struct Link {
    pub reader: Socket,
    pub writer: Socket,
}

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("invalid command-center url {url:?}: {source}")]
    Url {
        url: String,
        #[source]
        source: tungstenite::Error,
    },
    #[error("unsupported scheme in {0:?}, expected ws://")]
    Scheme(String),
    #[error("failed to reach {url}: {source}")]
    Io {
        url: String,
        #[source]
        source: io::Error,
    },
    #[error("websocket handshake with {url} failed: {source}")]
    Handshake {
        url: String,
        #[source]
        source: tungstenite::Error,
    },
}

/// Dial the command center at `url` and complete the WebSocket handshake.
pub fn connect(url: &str) -> Result<Link, ConnectError> {
    let request = url
        .into_client_request()
        .map_err(|source| ConnectError::Url {
            url: url.to_owned(),
            source,
        })?;
    if request.uri().scheme_str() != Some("ws") {
        return Err(ConnectError::Scheme(url.to_owned()));
    }
    let host = request
        .uri()
        .host()
        .unwrap_or_default()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .to_owned();
    let port = request.uri().port_u16().unwrap_or(80);

    let io_error = |source| ConnectError::Io {
        url: url.to_owned(),
        source,
    };
    let stream = TcpStream::connect((host.as_str(), port)).map_err(io_error)?;
    if let Err(err) = stream.set_nodelay(true) {
        warn!(%err, "failed to set TCP_NODELAY");
    }
    let write_half = stream.try_clone().map_err(io_error)?;

    let (reader, _response) = tungstenite::client(request, stream).map_err(|err| {
        let source = match err {
            HandshakeError::Failure(source) => source,
            HandshakeError::Interrupted(_) => io::Error::from(io::ErrorKind::WouldBlock).into(),
        };
        ConnectError::Handshake {
            url: url.to_owned(),
            source,
        }
    })?;
    let writer = WebSocket::from_raw_socket(write_half, Role::Client, None);

    info!(url, "connected to command center");
    Ok(Link { reader, writer })
}

/// Read frames until the command center hangs up, then stop the game loop.
pub fn spawn_reader(
    socket: Socket,
    commands: mpsc::Sender<LoopCommand>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("warroom-reader".into())
        .spawn(move || {
            read_frames(socket, &commands);
            if commands.send(LoopCommand::Shutdown).is_err() {
                debug!("game loop already stopped");
            }
        })
}

/// Drain `outbound`, one text frame per message.
pub fn spawn_writer(outbound: Receiver<Outbound>, socket: Socket) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("warroom-writer".into())
        .spawn(move || write_frames(&outbound, socket))
}

fn read_frames(mut socket: Socket, commands: &mpsc::Sender<LoopCommand>) {
    loop {
        let forwarded = match socket.read() {
            Ok(Message::Text(text)) => forward(text.as_str(), commands),
            Ok(Message::Binary(bytes)) => match std::str::from_utf8(&bytes) {
                Ok(text) => forward(text, commands),
                Err(err) => {
                    warn!(%err, "dropping non-utf8 binary frame");
                    true
                }
            },
            Ok(Message::Close(frame)) => {
                info!(?frame, "command center closed the connection");
                return;
            }
            Ok(_) => true,
            Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                info!("command-center connection closed");
                return;
            }
            Err(err) => {
                warn!(%err, "command-center read error");
                return;
            }
        };
        if !forwarded {
            return;
        }
    }
}

/// Decode one frame and hand its command to the game loop. False once the
/// game loop is gone.
fn forward(text: &str, commands: &mpsc::Sender<LoopCommand>) -> bool {
    match Envelope::decode(text).and_then(Envelope::into_command) {
        Ok(command) => {
            debug!(mission_uid = command.mission_uid(), "command received");
            commands.send(LoopCommand::Mission(command)).is_ok()
        }
        Err(err) => {
            warn!(%err, "dropping malformed message");
            true
        }
    }
}

fn write_frames(outbound: &Receiver<Outbound>, mut socket: Socket) {
    for message in outbound.iter() {
        let text = match message.to_envelope().and_then(|e| e.encode()) {
            Ok(text) => text,
            Err(err) => {
                warn!(
                    %err,
                    message_type = message.message_type(),
                    "failed to encode message"
                );
                continue;
            }
        };
        if let Err(err) = socket.send(Message::text(text)) {
            warn!(%err, "command-center write failed, writer stopped");
            return;
        }
    }

    debug!("outbound channel closed, closing connection");
    if let Err(err) = socket.close(None).and_then(|()| socket.flush()) {
        debug!(%err, "close handshake not sent");
    }
}
