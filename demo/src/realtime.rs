//! Realtime mode: each record is written to the socket as it is produced.
//!
//! One blocking thread per connection. The request head is parsed with
//! `httparse`, negotiated with [`turbosse::can_handle`], and the socket is
//! then handed to an [`Http1Transport`] for the lifetime of the feed.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use anyhow::{Context, bail};
use tracing::{debug, info, warn};
use turbosse::{Http1Transport, RealtimeEventStream, can_handle};

use crate::config::DemoConfig;
use crate::feed;

const MAX_HEAD_BYTES: usize = 16 * 1024;
const MAX_HEADERS: usize = 64;

/// Accept connections forever, one thread per client.
///
/// # Errors
///
/// Returns an error if the address cannot be bound.
pub fn serve(config: DemoConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&config.bind)
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(addr = %listener.local_addr()?, "realtime event-stream server listening");

    for socket in listener.incoming() {
        let socket = match socket {
            Ok(socket) => socket,
            Err(e) => {
                warn!(error = %e, "failed to accept connection");
                continue;
            }
        };
        let config = config.clone();
        thread::spawn(move || {
            let peer = socket.peer_addr().ok();
            if let Err(e) = handle(socket, &config) {
                // Clients hanging up mid-feed end up here.
                debug!(?peer, error = %e, "connection ended with error");
            }
        });
    }
    Ok(())
}

/// Serve one connection.
///
/// # Errors
///
/// Returns an error if the request cannot be read or the feed fails.
pub fn handle(mut socket: TcpStream, config: &DemoConfig) -> anyhow::Result<()> {
    let request = read_request(&mut socket)?;

    if request.uri().path() != "/events" {
        return reject(&mut socket, "404 Not Found");
    }
    if !can_handle(&request) {
        return reject(&mut socket, "406 Not Acceptable");
    }

    let mut stream =
        RealtimeEventStream::realtime(config.feed_stream_config(), Http1Transport::new(socket))?;
    let interval = Duration::from_millis(config.interval_ms);
    info!(stream_id = %stream.id(), "realtime feed started");
    feed::run(&mut stream, config.event_count, || thread::sleep(interval))?;
    info!(stream_id = %stream.id(), "realtime feed finished");
    Ok(())
}

fn read_request(socket: &mut TcpStream) -> anyhow::Result<http::Request<()>> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk)?;
        if n == 0 {
            bail!("connection closed before the request head was complete");
        }
        buf.extend_from_slice(&chunk[..n]);

        let mut headers = [httparse::EMPTY_HEADER; MAX_HEADERS];
        let mut parsed = httparse::Request::new(&mut headers);
        if parsed.parse(&buf)?.is_complete() {
            let mut builder = http::Request::builder()
                .method(parsed.method.unwrap_or("GET"))
                .uri(parsed.path.unwrap_or("/"));
            for header in parsed.headers.iter() {
                builder = builder.header(header.name, header.value);
            }
            return Ok(builder.body(())?);
        }

        if buf.len() > MAX_HEAD_BYTES {
            bail!("request head exceeds {MAX_HEAD_BYTES} bytes");
        }
    }
}

fn reject(socket: &mut TcpStream, status: &str) -> anyhow::Result<()> {
    let response = format!("HTTP/1.1 {status}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
    socket.write_all(response.as_bytes())?;
    socket.flush()?;
    Ok(())
}
