//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed route table. HEAD gets the headers a GET would get, minus the
//! body. Unknown paths get 404.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: &'static str,
    pub content_type: Option<&'static str>,
    /// Overrides the advertised `Content-Length` on HEAD (bodies always send their real length).
    pub head_length: Option<u64>,
    pub location: Option<&'static str>,
    pub body: Vec<u8>,
}

impl Route {
    pub fn ok(content_type: &'static str, body: &[u8]) -> Self {
        Self {
            status: "200 OK",
            content_type: Some(content_type),
            head_length: None,
            location: None,
            body: body.to_vec(),
        }
    }

    pub fn redirect(to: &'static str) -> Self {
        Self {
            status: "302 Found",
            content_type: Some("text/html"),
            head_length: None,
            location: Some(to),
            body: Vec::new(),
        }
    }
}

/// Starts a server in a background thread. Returns the base URL without a
/// trailing slash (e.g. "http://127.0.0.1:12345"). Runs until the process exits.
pub fn start(routes: Vec<(&'static str, Route)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<&'static str, Route>> = Arc::new(routes.into_iter().collect());
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

/// A base URL nothing is listening on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: std::net::TcpStream, routes: &HashMap<&'static str, Route>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut first = request.lines().next().unwrap_or("").split_whitespace();
    let method = first.next().unwrap_or("");
    let target = first.next().unwrap_or("/");
    let path = target.split('?').next().unwrap_or("/");

    let Some(route) = routes.get(path) else {
        let _ = stream.write_all(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        return;
    };

    let is_head = method.eq_ignore_ascii_case("HEAD");
    let length = match (is_head, route.head_length) {
        (true, Some(l)) => l,
        _ => route.body.len() as u64,
    };
    let mut response = format!("HTTP/1.1 {}\r\nContent-Length: {}\r\n", route.status, length);
    if let Some(ct) = route.content_type {
        response.push_str(&format!("Content-Type: {}\r\n", ct));
    }
    if let Some(loc) = route.location {
        response.push_str(&format!("Location: {}\r\n", loc));
    }
    response.push_str("Connection: close\r\n\r\n");
    let _ = stream.write_all(response.as_bytes());
    if !is_head {
        let _ = stream.write_all(&route.body);
    }
}
