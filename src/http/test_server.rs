use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const HEADER_END: &[u8] = b"\r\n\r\n";
const READ_CHUNK: usize = 1024;

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    /// Statuses served round-robin in arrival order.
    Statuses(Vec<u16>),
    /// A 200 event stream emitting `lines` events `interval` apart.
    EventStream { lines: usize, interval: Duration },
}

pub(crate) struct TestServer {
    pub(crate) url: String,
    hits: Arc<AtomicUsize>,
    captured: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub(crate) fn captured(&self) -> Vec<String> {
        self.captured
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub(crate) async fn spawn_server(reply: Reply) -> Result<TestServer, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;

    let hits = Arc::new(AtomicUsize::new(0));
    let captured = Arc::new(Mutex::new(Vec::new()));
    let server_hits = Arc::clone(&hits);
    let server_captured = Arc::clone(&captured);

    let handle = tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let reply = reply.clone();
            let hits = Arc::clone(&server_hits);
            let captured = Arc::clone(&server_captured);
            tokio::spawn(async move {
                drop(handle_client(stream, reply, hits, captured).await);
            });
        }
    });

    Ok(TestServer {
        url: format!("http://{}/", addr),
        hits,
        captured,
        handle,
    })
}

/// An address nothing listens on.
pub(crate) fn refused_url() -> Result<String, String> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("addr failed: {}", err))?;
    drop(listener);
    Ok(format!("http://{}/", addr))
}

async fn handle_client(
    mut stream: TcpStream,
    reply: Reply,
    hits: Arc<AtomicUsize>,
    captured: Arc<Mutex<Vec<String>>>,
) -> std::io::Result<()> {
    let raw = read_request(&mut stream).await?;
    let index = hits.fetch_add(1, Ordering::SeqCst);
    if let Ok(mut requests) = captured.lock() {
        requests.push(raw);
    }

    match reply {
        Reply::Statuses(statuses) => {
            let status = index
                .checked_rem(statuses.len())
                .and_then(|slot| statuses.get(slot).copied())
                .unwrap_or(200);
            let response = format!(
                "HTTP/1.1 {} Test\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok",
                status
            );
            stream.write_all(response.as_bytes()).await?;
        }
        Reply::EventStream { lines, interval } => {
            stream
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nCache-Control: no-cache\r\nConnection: close\r\n\r\n",
                )
                .await?;
            stream.flush().await?;
            for line in 0..lines {
                tokio::time::sleep(interval).await;
                stream
                    .write_all(format!("data: {}\n\n", line).as_bytes())
                    .await?;
                stream.flush().await?;
            }
        }
    }
    stream.shutdown().await
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<String> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];
    let header_len = loop {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            return Ok(String::from_utf8_lossy(&buffer).into_owned());
        }
        buffer.extend_from_slice(chunk.get(..read).unwrap_or_default());
        if let Some(pos) = buffer
            .windows(HEADER_END.len())
            .position(|window| window == HEADER_END)
        {
            break pos.saturating_add(HEADER_END.len());
        }
    };

    let head = String::from_utf8_lossy(buffer.get(..header_len).unwrap_or_default()).into_owned();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buffer.len() < header_len.saturating_add(content_length) {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(chunk.get(..read).unwrap_or_default());
    }
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
