#![allow(dead_code)]

use async_trait::async_trait;
use mcp_pachca::api::{ApiRequest, Transport};
use mcp_pachca::error::{PachcaError, Result};
use serde_json::Value;
use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Transport double: replays queued replies and records every request.
#[derive(Default)]
pub struct RecordingTransport {
    replies: Mutex<VecDeque<Result<Option<Value>>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, body: Value) -> Self {
        self.replies.lock().unwrap().push_back(Ok(Some(body)));
        self
    }

    pub fn reply_no_content(self) -> Self {
        self.replies.lock().unwrap().push_back(Ok(None));
        self
    }

    pub fn fail(self, error: PachcaError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn only_request(&self) -> ApiRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request: {:?}", requests);
        requests.into_iter().next().unwrap()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Option<Value>> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no reply queued"))
    }
}

/// One canned HTTP reply.
#[derive(Clone)]
pub struct StubReply {
    pub status: u16,
    pub body: Option<String>,
    pub delay: Option<Duration>,
}

impl StubReply {
    pub fn json(status: u16, body: Value) -> Self {
        Self::text(status, body.to_string())
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: Some(body.into()),
            delay: None,
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: 204,
            body: None,
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Minimal HTTP/1.1 server on a loopback port. Serves the replies in order,
/// one connection each, and keeps the raw text of every request it reads.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub fn start(replies: Vec<StubReply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}/api/v3", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        thread::spawn(move || {
            for reply in replies {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let raw = read_request(&mut stream);
                seen.lock().unwrap().push(raw);

                if let Some(delay) = reply.delay {
                    thread::sleep(delay);
                }
                let _ = stream.write_all(render(&reply).as_bytes());
                let _ = stream.flush();
            }
        });

        Self { base_url, requests }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn read_request(stream: &mut impl Read) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        data.extend_from_slice(&buf[..n]);

        let text = String::from_utf8_lossy(&data);
        if let Some(end) = text.find("\r\n\r\n") {
            let content_length = text[..end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if data.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).into_owned()
}

fn render(reply: &StubReply) -> String {
    let reason = match reply.status {
        200 => "OK",
        204 => "No Content",
        401 => "Unauthorized",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "Status",
    };
    match &reply.body {
        Some(body) => format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            reply.status,
            reason,
            body.len(),
            body
        ),
        None => format!(
            "HTTP/1.1 {} {}\r\nConnection: close\r\n\r\n",
            reply.status, reason
        ),
    }
}
