//! The HTTP trigger boundary.

use futures::StreamExt;
use switch_pad_common::InputSymbol;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_util::codec::{FramedRead, LinesCodec};
use tracing::{debug, error};

use crate::input_tracker::InputTrackerHandle;

/// Every request gets the same answer: triggers are fire-and-forget, and an
/// unknown name is deliberately not an error.
const RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\n\r\n";

/// Serve one client connection.
///
/// Each request line of the form `GET /<symbol> HTTP/1.1` triggers the named
/// symbol. Anything else is answered and ignored, so controller frontends
/// can probe freely without tripping the server.
pub async fn handle_connection(mut stream: TcpStream, tracker: InputTrackerHandle) {
    let peer_addr = match stream.peer_addr() {
        Ok(peer_addr) => peer_addr,
        Err(e) => {
            error!("Error while getting peer address: {e}");
            return;
        }
    };
    debug!("New connection from {peer_addr}");

    let (reader, mut writer) = stream.split();
    let mut lines = FramedRead::new(reader, LinesCodec::new_with_max_length(8192));

    while let Some(request_line) = lines.next().await {
        let request_line = match request_line {
            Ok(line) => line,
            Err(e) => {
                error!("Error while reading from [{peer_addr}]: {e}");
                break;
            }
        };

        // Drain the header block; nothing in it affects a trigger.
        loop {
            match lines.next().await {
                Some(Ok(header)) if !header.is_empty() => continue,
                Some(Ok(_)) => break,
                Some(Err(e)) => {
                    error!("Error while reading from [{peer_addr}]: {e}");
                    return;
                }
                None => return,
            }
        }

        match requested_symbol(&request_line) {
            Some(symbol) => {
                debug!("[{peer_addr}] {}", symbol.name());
                tracker.trigger(symbol).await;
            }
            None => debug!("[{peer_addr}] ignoring request {request_line:?}"),
        }

        if let Err(e) = writer.write_all(RESPONSE).await {
            error!("Error while responding to [{peer_addr}]: {e}");
            break;
        }
    }

    debug!("Closing connection with [{peer_addr}]");
}

/// Pick the triggered symbol out of a `GET /<symbol> HTTP/1.x` request line.
fn requested_symbol(request_line: &str) -> Option<InputSymbol> {
    let mut parts = request_line.split_whitespace();
    if parts.next() != Some("GET") {
        return None;
    }

    let path = parts.next()?;
    InputSymbol::from_name(path.strip_prefix('/')?)
}
