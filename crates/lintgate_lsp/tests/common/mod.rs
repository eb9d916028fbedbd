#![allow(dead_code)]

use std::time::Duration;

use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

use lintgate_lsp::{ServerOptions, build_service};

pub async fn send_msg<W: AsyncWriteExt + Unpin>(writer: &mut W, msg: &str) {
    let content = format!("Content-Length: {}\r\n\r\n{}", msg.len(), msg);
    writer.write_all(content.as_bytes()).await.unwrap();
    writer.flush().await.unwrap();
}

pub async fn recv_msg<R: AsyncReadExt + Unpin>(reader: &mut R) -> Option<String> {
    // Read headers until \r\n\r\n, then a body of Content-Length bytes
    let mut buffer = Vec::new();
    let mut content_length = 0;

    loop {
        let byte = reader.read_u8().await.ok()?;
        buffer.push(byte);
        if buffer.ends_with(b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buffer);
            for line in headers.lines() {
                if line.to_lowercase().starts_with("content-length:") {
                    let parts: Vec<&str> = line.split(':').collect();
                    if parts.len() == 2 {
                        content_length = parts[1].trim().parse().unwrap_or_else(|e| {
                            panic!("Failed to parse Content-Length: {e}, header: {line}")
                        });
                    }
                }
            }
            break;
        }
    }

    if content_length == 0 {
        return None;
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await.ok()?;

    Some(String::from_utf8(body).unwrap())
}

/// Editor side of an in-process server connection.
///
/// Messages that do not match an [`expect`](TestClient::expect) call are
/// kept for later ones, since notifications and responses may interleave.
pub struct TestClient {
    writer: DuplexStream,
    rx: UnboundedReceiver<Value>,
    pending: Vec<Value>,
    next_id: i64,
}

impl TestClient {
    /// Starts a server in the background and connects to it.
    pub fn start(options: ServerOptions) -> Self {
        let (client_read, server_write) = tokio::io::duplex(64 * 1024);
        let (server_read, client_write) = tokio::io::duplex(64 * 1024);

        let (service, socket) = build_service(options);
        tokio::spawn(async move {
            tower_lsp::Server::new(server_read, server_write, socket)
                .serve(service)
                .await;
        });

        let (tx, rx) = unbounded_channel();
        tokio::spawn(async move {
            let mut reader = tokio::io::BufReader::new(client_read);
            while let Some(msg) = recv_msg(&mut reader).await {
                let value: Value = serde_json::from_str(&msg).unwrap();
                if tx.send(value).is_err() {
                    break;
                }
            }
        });

        Self {
            writer: client_write,
            rx,
            pending: Vec::new(),
            next_id: 1,
        }
    }

    /// Sends a request and returns its id.
    pub async fn request(&mut self, method: &str, params: Value) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        let msg = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });
        send_msg(&mut self.writer, &msg.to_string()).await;
        id
    }

    pub async fn notify(&mut self, method: &str, params: Value) {
        let msg = json!({ "jsonrpc": "2.0", "method": method, "params": params });
        send_msg(&mut self.writer, &msg.to_string()).await;
    }

    /// Answers a request the server sent to the client.
    pub async fn respond(&mut self, id: &Value, result: Value) {
        let msg = json!({ "jsonrpc": "2.0", "id": id, "result": result });
        send_msg(&mut self.writer, &msg.to_string()).await;
    }

    /// Waits for the first message satisfying `pred`.
    pub async fn expect(&mut self, what: &str, pred: impl Fn(&Value) -> bool) -> Value {
        if let Some(pos) = self.pending.iter().position(&pred) {
            return self.pending.remove(pos);
        }

        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        loop {
            let msg = tokio::time::timeout_at(deadline, self.rx.recv())
                .await
                .unwrap_or_else(|_| panic!("Timed out waiting for {what}; got {:?}", self.pending))
                .unwrap_or_else(|| panic!("Server closed while waiting for {what}"));
            if pred(&msg) {
                return msg;
            }
            self.pending.push(msg);
        }
    }

    /// Waits for the response to request `id`.
    pub async fn response(&mut self, id: i64) -> Value {
        self.expect(&format!("response {id}"), |msg| {
            msg["id"] == json!(id) && msg.get("method").is_none()
        })
        .await
    }

    /// Waits for a server-to-client message with `method`.
    pub async fn method(&mut self, method: &str, pred: impl Fn(&Value) -> bool) -> Value {
        self.expect(method, |msg| msg["method"] == method && pred(msg))
            .await
    }

    /// Runs the `initialize` handshake against `root_uri`.
    pub async fn initialize(&mut self, root_uri: &str) -> Value {
        let id = self
            .request(
                "initialize",
                json!({ "capabilities": {}, "rootUri": root_uri }),
            )
            .await;
        let response = self.response(id).await;
        self.notify("initialized", json!({})).await;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recv_msg_success() {
        let payload = r#"{"jsonrpc":"2.0","method":"abc","params":{}}"#;
        let data = format!("Content-Length: {}\r\n\r\n{}", payload.len(), payload);
        let mut cursor = std::io::Cursor::new(data.into_bytes());

        let result = recv_msg(&mut cursor).await;
        assert_eq!(result.unwrap(), payload);
    }
}
