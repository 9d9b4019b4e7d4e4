//! A minimal HTTP server on tokio that answers with canned responses.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub(crate) struct MockServer {
    listener: TcpListener,
    pub base_url: String,
}

impl MockServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock server");
        let port = listener.local_addr().unwrap().port();
        let base_url = format!("http://127.0.0.1:{port}");
        Self { listener, base_url }
    }

    /// Accept one connection, answer with the given status and JSON body, and
    /// return the raw request bytes.
    pub async fn respond_once(self, status_code: u16, body: &str) -> Vec<u8> {
        serve_one(&self.listener, status_code, body).await
    }
}

async fn serve_one(listener: &TcpListener, status_code: u16, body: &str) -> Vec<u8> {
    let (mut stream, _) = listener.accept().await.unwrap();

    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if request_complete(&buf) {
            break;
        }
    }

    let reason = match status_code {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    };
    let response = format!(
        "HTTP/1.1 {status_code} {reason}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n\
         {body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await.unwrap();
    stream.shutdown().await.unwrap();

    buf
}

fn request_complete(buf: &[u8]) -> bool {
    let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    buf.len() >= header_end + 4 + content_length
}

/// The body of a raw HTTP request.
pub(crate) fn request_body(request: &[u8]) -> &[u8] {
    request
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map_or(&[][..], |pos| &request[pos + 4..])
}

/// The body of a raw HTTP request parsed as JSON.
pub(crate) fn request_json(request: &[u8]) -> serde_json::Value {
    serde_json::from_slice(request_body(request)).expect("request body is not JSON")
}
