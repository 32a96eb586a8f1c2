//! Mock Apps Script server for testing
//!
//! Serves the same `action`-dispatched endpoint as the real web app and
//! records every request it receives, so tests can assert on the exact
//! method, query string and body the client sent.
//!
//! - GET  ?action=getUsers returns the configured roster as a JSON array
//! - GET  ?action=getTotalCoffee&username=U returns a bare JSON number
//! - POST ?action=logCoffee&... returns a text confirmation
//! - POST ?action=resetUserData&username=U returns a text confirmation

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use url::form_urlencoded;

/// Path the mock serves, mirroring the web app's `/exec`
const EXEC_PATH: &str = "/exec";

/// A request as seen by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Raw query string, exactly as sent
    pub query: String,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Decoded query pairs, in order
    pub fn params(&self) -> Vec<(String, String)> {
        form_urlencoded::parse(self.query.as_bytes())
            .into_owned()
            .collect()
    }

    /// First value for `key`
    pub fn param(&self, key: &str) -> Option<String> {
        self.params()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

/// Canned behavior for the mock backend
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Raw JSON served for getUsers
    pub users_json: Option<String>,
    /// Raw JSON served for getTotalCoffee, per username
    pub totals: HashMap<String, String>,
    /// Answer every request with this status and an error page
    pub fail_status: Option<u16>,
    /// Announce a longer error page than is sent, then hang up
    pub truncate_error_body: bool,
}

impl MockConfig {
    pub fn with_users(mut self, users_json: &str) -> Self {
        self.users_json = Some(users_json.to_string());
        self
    }

    pub fn with_total(mut self, username: &str, total_json: &str) -> Self {
        self.totals
            .insert(username.to_string(), total_json.to_string());
        self
    }

    pub fn failing_with(mut self, status: u16) -> Self {
        self.fail_status = Some(status);
        self
    }

    pub fn with_truncated_error_body(mut self) -> Self {
        self.truncate_error_body = true;
        self
    }
}

/// Mock Apps Script server for testing
pub struct MockAppsScriptServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl MockAppsScriptServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(Mutex::new(Vec::new()));

        // Non-blocking so the accept loop can notice shutdown
        listener.set_nonblocking(true)?;

        let running_clone = running.clone();
        let requests_clone = requests.clone();
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let log = requests_clone.clone();
                        thread::spawn(move || {
                            handle_connection(stream, &cfg, &log);
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    /// Endpoint to hand to the client
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}{}", self.port, EXEC_PATH)
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockAppsScriptServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(
    mut stream: TcpStream,
    config: &MockConfig,
    log: &Mutex<Vec<RecordedRequest>>,
) {
    let _ = stream.set_nonblocking(false);
    let Some(request) = read_request(&mut stream) else {
        send_response(&mut stream, 400, "Bad Request", "text/plain", "Invalid request");
        return;
    };

    if let Ok(mut requests) = log.lock() {
        requests.push(request.clone());
    }

    if let Some(status) = config.fail_status {
        if config.truncate_error_body {
            let head = format!(
                "HTTP/1.1 {} Error\r\nContent-Type: text/html\r\nContent-Length: 100\r\nConnection: close\r\n\r\n<html",
                status
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.flush();
            let _ = stream.shutdown(std::net::Shutdown::Both);
            return;
        }
        send_response(
            &mut stream,
            status,
            "Error",
            "text/html",
            "<html><body>Script error</body></html>",
        );
        return;
    }

    if request.path != EXEC_PATH {
        send_response(&mut stream, 404, "Not Found", "text/plain", "Not found");
        return;
    }

    let action = request.param("action").unwrap_or_default();
    let username = request.param("username").unwrap_or_default();

    match (request.method.as_str(), action.as_str()) {
        ("GET", "getUsers") => {
            let body = config.users_json.as_deref().unwrap_or("[]");
            send_response(&mut stream, 200, "OK", "application/json", body);
        }
        ("GET", "getTotalCoffee") => {
            let body = config.totals.get(&username).map(String::as_str).unwrap_or("0");
            send_response(&mut stream, 200, "OK", "application/json", body);
        }
        ("POST", "logCoffee") => {
            let count = request.param("coffeeCount").unwrap_or_default();
            let body = format!("Logged {} coffee(s) for {}", count, username);
            send_response(&mut stream, 200, "OK", "text/plain", &body);
        }
        ("POST", "resetUserData") => {
            let body = format!("Data reset for {}", username);
            send_response(&mut stream, 200, "OK", "text/plain", &body);
        }
        _ => {
            send_response(
                &mut stream,
                405,
                "Method Not Allowed",
                "text/plain",
                "Unsupported action",
            );
        }
    }
}

/// Read the request head, then as much body as Content-Length announces
fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut data = Vec::new();
    let mut buffer = [0; 4096];

    let head_end = loop {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buffer[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&data[..head_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = data[head_end..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&buffer[..n]);
    }

    let first_line = head.lines().next()?;
    let mut parts = first_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?;
    let (path, query) = target.split_once('?').unwrap_or((target, ""));

    Some(RecordedRequest {
        method,
        path: path.to_string(),
        query: query.to_string(),
        body,
    })
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, content_type: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        content_type,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::apps_script::AppsScriptClient;
    use crate::domain::result::Error;
    use crate::domain::{format_log_date, User};
    use crate::ports::CoffeeBackend;
    use chrono::{Local, TimeZone};
    use rust_decimal::Decimal;

    fn client_for(server: &MockAppsScriptServer) -> AppsScriptClient {
        AppsScriptClient::new(&server.base_url()).unwrap()
    }

    #[tokio::test]
    async fn test_get_users_preserves_order() {
        let server = MockAppsScriptServer::start(
            MockConfig::default().with_users(r#"[{"username":"a"},{"username":"b"}]"#),
        )
        .unwrap();

        let users = client_for(&server).get_users().await.unwrap();
        assert_eq!(users, vec![User::new("a"), User::new("b")]);

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].query, "action=getUsers");
    }

    #[tokio::test]
    async fn test_get_users_rejects_server_error() {
        let server = MockAppsScriptServer::start(MockConfig::default().failing_with(500)).unwrap();

        let err = client_for(&server).get_users().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(matches!(err, Error::Http { .. }));
    }

    #[tokio::test]
    async fn test_server_error_with_cut_off_body_keeps_status() {
        let server = MockAppsScriptServer::start(
            MockConfig::default()
                .failing_with(500)
                .with_truncated_error_body(),
        )
        .unwrap();
        let client = client_for(&server);

        let err = client.get_users().await.unwrap_err();
        assert!(matches!(err, Error::Http { status: 500, .. }), "got {:?}", err);
        assert_eq!(err.status(), Some(500));

        let err = client.reset_user_data("too").await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_get_users_rejects_malformed_json() {
        let server =
            MockAppsScriptServer::start(MockConfig::default().with_users("<html>login</html>"))
                .unwrap();

        let err = client_for(&server).get_users().await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_get_total_coffee_single_get() {
        let server = MockAppsScriptServer::start(
            MockConfig::default().with_total("o'brien", "17"),
        )
        .unwrap();

        let total = client_for(&server)
            .get_total_coffee("o'brien")
            .await
            .unwrap();
        assert_eq!(total, Decimal::from(17));

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].query, "action=getTotalCoffee&username=o%27brien");
        assert_eq!(requests[0].param("username").as_deref(), Some("o'brien"));
    }

    #[tokio::test]
    async fn test_get_total_coffee_rejects_non_number() {
        let server = MockAppsScriptServer::start(
            MockConfig::default().with_total("mandar", r#"{"total":3}"#),
        )
        .unwrap();

        let err = client_for(&server)
            .get_total_coffee("mandar")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[tokio::test]
    async fn test_log_coffee_posts_params_in_query_only() {
        let server = MockAppsScriptServer::start(MockConfig::default()).unwrap();
        let date = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();

        let reply = client_for(&server)
            .log_coffee("mandar", &date, 2)
            .await
            .unwrap();
        assert_eq!(reply, "Logged 2 coffee(s) for mandar");

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, "POST");
        assert!(request.body.is_empty());
        assert_eq!(
            request.params(),
            vec![
                ("action".to_string(), "logCoffee".to_string()),
                ("username".to_string(), "mandar".to_string()),
                ("date".to_string(), format_log_date(&date)),
                ("coffeeCount".to_string(), "2".to_string()),
            ]
        );
        assert_eq!(request.param("date").as_deref(), Some("2024-03-05  2:07:09 PM"));
    }

    #[tokio::test]
    async fn test_reset_user_data_posts() {
        let server = MockAppsScriptServer::start(MockConfig::default()).unwrap();

        let reply = client_for(&server).reset_user_data("too").await.unwrap();
        assert_eq!(reply, "Data reset for too");

        let requests = server.requests();
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].query, "action=resetUserData&username=too");
        assert!(requests[0].body.is_empty());
    }

    #[tokio::test]
    async fn test_write_operations_reject_server_error() {
        let server = MockAppsScriptServer::start(MockConfig::default().failing_with(403)).unwrap();
        let client = client_for(&server);

        let err = client.reset_user_data("too").await.unwrap_err();
        assert_eq!(err.status(), Some(403));

        let err = client
            .log_coffee("too", &Local::now(), 1)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(403));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let mut server = MockAppsScriptServer::start(MockConfig::default()).unwrap();
        let base_url = server.base_url();
        server.stop();
        drop(server);

        let client = AppsScriptClient::new(&base_url).unwrap();
        let err = client.get_users().await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)), "got {:?}", err);
        assert_eq!(err.status(), None);
    }
}
