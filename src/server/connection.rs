use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::protocol::{CommandStatus, handle_command, parse_command, responses};
use crate::server::core::GateService;
use crate::session::MemorySessionStore;

/// One request line as read from the peer
#[derive(Debug, PartialEq)]
enum RequestLine {
    Closed,
    Line(Vec<u8>),
    TooLong,
}

/// Reads one line of at most `max_line_length` bytes, newline included.
///
/// Never buffers more than the limit: the rest of an oversized line is
/// discarded up to and including its newline.
async fn read_request_line<R>(
    reader: &mut R,
    max_line_length: usize,
) -> std::io::Result<RequestLine>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let limit = max_line_length as u64 + 1;
    if (&mut *reader).take(limit).read_until(b'\n', &mut buf).await? == 0 {
        return Ok(RequestLine::Closed);
    }

    if buf.len() <= max_line_length {
        return Ok(RequestLine::Line(buf));
    }

    if buf.last() != Some(&b'\n') {
        discard_line(reader).await?;
    }
    Ok(RequestLine::TooLong)
}

async fn discard_line<R>(reader: &mut R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let chunk = reader.fill_buf().await?;
        if chunk.is_empty() {
            return Ok(());
        }
        match chunk.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                reader.consume(pos + 1);
                return Ok(());
            }
            None => {
                let len = chunk.len();
                reader.consume(len);
            }
        }
    }
}

/// Serves one connection until the peer quits or disconnects.
///
/// The connection owns its session store; the session ends with it.
pub async fn handle_connection(
    stream: TcpStream,
    client_addr: SocketAddr,
    service: Arc<GateService>,
    session_max_age: Duration,
    max_line_length: usize,
) -> std::io::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut store = MemorySessionStore::new(session_max_age);
    let remote_ip = client_addr.ip().to_string();

    info!("Client connected: {}", client_addr);

    loop {
        let line = match read_request_line(&mut reader, max_line_length).await? {
            RequestLine::Closed => {
                info!("Connection closed by client {}", client_addr);
                break;
            }
            RequestLine::TooLong => {
                write_half
                    .write_all(responses::error("line too long").as_bytes())
                    .await?;
                continue;
            }
            RequestLine::Line(line) => line,
        };

        let command = parse_command(&line);
        let result = handle_command(service.as_ref(), &mut store, &command, &remote_ip).await;

        if let Some(msg) = &result.message {
            write_half.write_all(msg.as_bytes()).await?;
        }

        if result.status == CommandStatus::CloseConnection {
            info!("Client {} requested to quit", client_addr);
            break;
        }
    }

    write_half.flush().await?;
    info!("Client {} disconnected", client_addr);
    Ok(())
}
