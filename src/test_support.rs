//! Canned HTTP responder for exercising the API client without the network.

use crate::api::ApiClient;
use crate::config::AppConfig;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[derive(Clone)]
struct Route {
    prefix: String,
    status: u16,
    body: String,
}

/// Answers every request whose target starts with a route prefix with that
/// route's status and body; unknown targets get a 404. Request targets
/// (path and query) are recorded in arrival order.
pub struct MockServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    pub async fn start(status: u16, body: &str) -> Self {
        Self::with_routes(&[("/", status, body)]).await
    }

    pub async fn with_routes(routes: &[(&str, u16, &str)]) -> Self {
        let routes: Arc<Vec<Route>> = Arc::new(
            routes
                .iter()
                .map(|(prefix, status, body)| Route {
                    prefix: prefix.to_string(),
                    status: *status,
                    body: body.to_string(),
                })
                .collect(),
        );
        let requests = Arc::new(Mutex::new(Vec::new()));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let recorded = requests.clone();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let routes = routes.clone();
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    loop {
                        let n = socket.read(&mut chunk).await.unwrap_or(0);
                        if n == 0 {
                            break;
                        }
                        buf.extend_from_slice(&chunk[..n]);
                        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }

                    let head = String::from_utf8_lossy(&buf);
                    let target = head.split_whitespace().nth(1).unwrap_or("").to_string();
                    recorded.lock().unwrap().push(target.clone());

                    let (status, body) = routes
                        .iter()
                        .find(|r| target.starts_with(&r.prefix))
                        .map(|r| (r.status, r.body.clone()))
                        .unwrap_or((404, "{}".to_string()));
                    let reason = reqwest::StatusCode::from_u16(status)
                        .ok()
                        .and_then(|s| s.canonical_reason())
                        .unwrap_or("");
                    let response = format!(
                        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        reason,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn test_config(server: &MockServer) -> AppConfig {
    AppConfig {
        api_base_url: server.base_url.clone(),
        ..AppConfig::default()
    }
}

pub fn client_for(server: &MockServer, key: Option<&str>) -> ApiClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    let mut client = ApiClient::with_http(http, &test_config(server));
    client.set_api_key(key.map(str::to_string));
    client
}
