// Canned-response HTTP fixture for client and controller tests. Listens on
// an ephemeral local port, records each raw request, and answers from a
// scripted list of (status, body) pairs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

pub(crate) struct TestServer {
    pub url: String,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<Vec<u8>>>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn request_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub async fn recorded_requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .await
            .iter()
            .map(|raw| String::from_utf8_lossy(raw).to_string())
            .collect()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Serve the scripted responses in order; the last one repeats once the
/// script is exhausted.
pub(crate) async fn spawn(responses: Vec<(u16, &'static str)>) -> TestServer {
    spawn_inner(responses, false).await
}

/// Accept connections but never respond, so client timeouts can fire.
pub(crate) async fn spawn_stalled() -> TestServer {
    spawn_inner(Vec::new(), true).await
}

async fn spawn_inner(responses: Vec<(u16, &'static str)>, stall: bool) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let requests = Arc::new(Mutex::new(Vec::new()));

    let hits_task = hits.clone();
    let requests_task = requests.clone();
    let handle = tokio::spawn(async move {
        let mut next = 0usize;
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            hits_task.fetch_add(1, Ordering::SeqCst);

            if stall {
                // Drain until the client gives up.
                let mut sink = [0u8; 1024];
                while let Ok(n) = socket.read(&mut sink).await {
                    if n == 0 {
                        break;
                    }
                }
                continue;
            }

            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                match socket.read(&mut chunk).await {
                    Ok(0) => break,
                    Ok(n) => {
                        buf.extend_from_slice(&chunk[..n]);
                        if request_complete(&buf) {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
            requests_task.lock().await.push(buf);

            let (status, body) = responses
                .get(next)
                .or_else(|| responses.last())
                .copied()
                .unwrap_or((200, "{}"));
            next += 1;

            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason(status),
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    TestServer {
        url: format!("http://{}", addr),
        hits,
        requests,
        handle,
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

/// A request is complete once its headers are in and, for multipart bodies,
/// the closing boundary has arrived (for plain bodies, content-length bytes).
fn request_complete(buf: &[u8]) -> bool {
    let Some(header_end) = find_subsequence(buf, b"\r\n\r\n") else {
        return false;
    };
    let headers = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let lowered = headers.to_lowercase();

    if let Some(idx) = lowered.find("boundary=") {
        let boundary: String = headers[idx + "boundary=".len()..]
            .chars()
            .take_while(|c| !c.is_whitespace() && *c != ';' && *c != '"')
            .collect();
        let terminator = format!("--{}--", boundary);
        return find_subsequence(&buf[header_end..], terminator.as_bytes()).is_some();
    }

    if let Some(idx) = lowered.find("content-length:") {
        let length: usize = lowered[idx + "content-length:".len()..]
            .lines()
            .next()
            .unwrap_or("")
            .trim()
            .parse()
            .unwrap_or(0);
        return buf.len() >= header_end + 4 + length;
    }

    true
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
