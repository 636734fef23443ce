use std::io::{ErrorKind, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use wildpath::server::{AppService, HttpServer, ServerHandle};
use wildpath::{Dispatcher, EndpointBinding, MethodSet, Registry};

fn free_addr() -> String {
    // Grab a free port, then release it for the server to bind.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr.to_string()
}

fn start_server(registry: Registry) -> (ServerHandle, String) {
    let addr = free_addr();
    let service = AppService::new(Dispatcher::new(Arc::new(registry)));
    let handle = HttpServer(service).start(&addr).unwrap();
    handle.wait_ready().unwrap();
    (handle, addr)
}

fn send_request(addr: &str, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.write_all(request.as_bytes()).unwrap();
    // may_minihttp keeps connections alive regardless of `Connection: close`
    // (and errors out on a half-closed peer), so read with a timeout instead
    // of waiting for EOF.
    stream
        .set_read_timeout(Some(std::time::Duration::from_millis(500)))
        .unwrap();
    let mut response = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        match stream.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => response.extend_from_slice(&buf[..n]),
            Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut => break,
            Err(e) => panic!("read error: {e}"),
        }
    }
    String::from_utf8(response).unwrap()
}

fn get(addr: &str, path: &str) -> String {
    send_request(
        addr,
        &format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"),
    )
}

fn sample_registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .register(EndpointBinding::new(
            "hello",
            "/hello",
            MethodSet::GET,
            |ctx| ctx.send_text("hello there", 200),
        ))
        .unwrap();
    registry
        .register(EndpointBinding::new(
            "echo_path",
            "/echo/*",
            MethodSet::ALLOW_ALL,
            |ctx| {
                let path = ctx.path().to_string();
                ctx.send_text(&path, 200);
            },
        ))
        .unwrap();
    registry
}

#[test]
fn test_server_serves_literal_endpoint() {
    let (handle, addr) = start_server(sample_registry());
    let response = get(&addr, "/hello");
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.contains("hello there"), "{response}");
    handle.stop();
}

#[test]
fn test_server_serves_wildcard_endpoint() {
    let (handle, addr) = start_server(sample_registry());
    let response = get(&addr, "/echo/deep/path");
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.contains("/echo/deep/path"), "{response}");
    handle.stop();
}

#[test]
fn test_server_strips_query_string_before_matching() {
    let (handle, addr) = start_server(sample_registry());
    let response = get(&addr, "/hello?name=world");
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    handle.stop();
}

#[test]
fn test_server_default_404() {
    let (handle, addr) = start_server(sample_registry());
    let response = get(&addr, "/missing");
    assert!(response.starts_with("HTTP/1.1 404"), "{response}");
    assert!(response.contains("404"), "{response}");
    handle.stop();
}

#[test]
fn test_server_default_405() {
    let (handle, addr) = start_server(sample_registry());
    let response = send_request(
        &addr,
        "DELETE /hello HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    );
    assert!(response.starts_with("HTTP/1.1 405"), "{response}");
    handle.stop();
}

#[test]
fn test_server_custom_not_found_hook() {
    let mut registry = sample_registry();
    registry.set_not_found_handler(|ctx| ctx.send_html("<h1>nothing here</h1>", 404));
    let (handle, addr) = start_server(registry);
    let response = get(&addr, "/missing");
    assert!(response.starts_with("HTTP/1.1 404"), "{response}");
    assert!(response.contains("<h1>nothing here</h1>"), "{response}");
    assert!(response.contains("text/html"), "{response}");
    handle.stop();
}

#[test]
fn test_server_redirect_carries_location_header() {
    let mut registry = Registry::new();
    registry
        .register(EndpointBinding::new(
            "root",
            "/",
            MethodSet::ALLOW_ALL,
            |ctx| ctx.redirect("/index"),
        ))
        .unwrap();
    let (handle, addr) = start_server(registry);
    let response = get(&addr, "/");
    assert!(response.starts_with("HTTP/1.1 302"), "{response}");
    assert!(response.contains("Location: /index"), "{response}");
    handle.stop();
}

#[test]
fn test_server_gate_veto_yields_empty_response() {
    let mut registry = Registry::new();
    registry
        .register(
            EndpointBinding::new("guarded", "/guarded", MethodSet::GET, |ctx| {
                ctx.send_text("secret", 200)
            })
            .with_gate(|ctx| ctx.header("x-api-key") == Some("letmein")),
        )
        .unwrap();
    let (handle, addr) = start_server(registry);

    let denied = get(&addr, "/guarded");
    assert!(!denied.contains("secret"), "{denied}");

    let allowed = send_request(
        &addr,
        "GET /guarded HTTP/1.1\r\nHost: localhost\r\nX-Api-Key: letmein\r\nConnection: close\r\n\r\n",
    );
    assert!(allowed.starts_with("HTTP/1.1 200"), "{allowed}");
    assert!(allowed.contains("secret"), "{allowed}");
    handle.stop();
}

#[test]
fn test_server_reads_request_body() {
    let mut registry = Registry::new();
    registry
        .register(EndpointBinding::new(
            "upload",
            "/upload",
            MethodSet::POST,
            |ctx| {
                let size = ctx.body().len().to_string();
                ctx.send_text(&size, 200);
            },
        ))
        .unwrap();
    let (handle, addr) = start_server(registry);

    let body = "some payload";
    let response = send_request(
        &addr,
        &format!(
            "POST /upload HTTP/1.1\r\nHost: localhost\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ),
    );
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.contains(&body.len().to_string()), "{response}");
    handle.stop();
}
