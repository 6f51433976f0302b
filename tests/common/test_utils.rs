use chat_relay::{
    config::{GenerationConfig, UpstreamConfig},
    relay::{RESPONSE_HEADERS, ResponseEnvelope},
};
use serde_json::{Value, json};
use std::time::Duration;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

/// Upstream config pointing at the given URL with a short timeout
pub fn upstream_config(url: &str) -> UpstreamConfig {
    UpstreamConfig {
        url: url.to_string(),
        timeout_ms: 2_000,
        generation: GenerationConfig::default(),
    }
}

/// Build an authorized invocation event carrying the given raw body
pub fn authorized_event(body: &str) -> Value {
    json!({
        "requestContext": {
            "authorizer": {
                "claims": {
                    "email": "tester@example.com",
                    "cognito:username": "tester"
                }
            }
        },
        "body": body
    })
}

/// Build an authorized invocation event with no body at all
pub fn authorized_event_without_body() -> Value {
    json!({
        "requestContext": {
            "authorizer": { "claims": { "email": "tester@example.com" } }
        }
    })
}

/// Serve one connection with a hand-written HTTP response, optionally
/// holding the socket open afterwards. Returns the base URL.
pub async fn spawn_raw_upstream(response: &'static [u8], hold: Option<Duration>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;
        socket.write_all(response).await.unwrap();
        socket.flush().await.unwrap();
        if let Some(hold) = hold {
            tokio::time::sleep(hold).await;
        }
    });

    format!("http://{}/", addr)
}

/// Consume request headers and a Content-Length body.
async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

/// Build an authorized invocation event for a chat message
pub fn chat_event(message: &str) -> Value {
    authorized_event(&json!({ "message": message }).to_string())
}

/// Decode the JSON string held in an envelope's body
pub fn envelope_body(envelope: &ResponseEnvelope) -> Value {
    serde_json::from_str(&envelope.body).expect("envelope body is JSON")
}

/// Assert the fixed header set is present and nothing else
pub fn assert_standard_headers(envelope: &ResponseEnvelope) {
    assert_eq!(envelope.headers.len(), RESPONSE_HEADERS.len());
    for (name, value) in RESPONSE_HEADERS {
        assert_eq!(
            envelope.headers.get(name).map(String::as_str),
            Some(value),
            "header {} mismatch",
            name
        );
    }
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
upstream:
  url: "https://llm.example.com/generate"
  timeout_ms: 5000
  generation:
    max_new_tokens: 256
    do_sample: false
    temperature: 0.3
    top_p: 0.8

server:
  host: "127.0.0.1"
  port: 9000
  logs:
    level: "debug"
"#;

/// Configuration YAML relying on defaults for everything but the URL
pub const MINIMAL_CONFIG_YAML: &str = r#"
upstream:
  url: "http://localhost:8000/"
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
upstream:
  url: "http://localhost:8000/"
  timeout_ms: "soon"
"#;
