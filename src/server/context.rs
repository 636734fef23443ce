use super::request::ParsedRequest;
use crate::static_files;
use std::io;
use std::path::Path;

/// The response a gate or handler built, waiting to be written to the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseParts {
    pub status: u16,
    pub content_type: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Default for ResponseParts {
    fn default() -> Self {
        Self {
            status: 200,
            content_type: None,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }
}

/// Per-request context handed to gates and handlers.
///
/// Wraps the parsed request plus the response under construction. Handlers
/// respond through the `send_*` builders; the transport writes the finished
/// parts to the socket after dispatch returns. The routing core itself never
/// writes a response through this type except for the default 404/405
/// outcomes.
#[derive(Debug)]
pub struct RequestContext {
    request: ParsedRequest,
    response: ResponseParts,
    responded: bool,
}

impl RequestContext {
    #[must_use]
    pub fn new(request: ParsedRequest) -> Self {
        Self {
            request,
            response: ResponseParts::default(),
            responded: false,
        }
    }

    // --- request side ---

    #[must_use]
    pub fn request(&self) -> &ParsedRequest {
        &self.request
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.request.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.request.path
    }

    /// Header lookup by lowercase name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.request.headers.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.request.cookies.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.request.query_params.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.request.body
    }

    // --- response side ---

    /// Whether any `send_*` builder has run. Gates that veto a request may
    /// leave this false; the transport then writes an empty response.
    #[must_use]
    pub fn responded(&self) -> bool {
        self.responded
    }

    #[must_use]
    pub fn response(&self) -> &ResponseParts {
        &self.response
    }

    pub(crate) fn into_response(self) -> ResponseParts {
        self.response
    }

    /// Add a response header. Independent of the `send_*` builders; call in
    /// any order.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.response
            .headers
            .push((name.to_string(), value.to_string()));
    }

    /// Respond with raw bytes and an explicit content type.
    pub fn send_bytes(&mut self, body: Vec<u8>, status: u16, content_type: Option<&str>) {
        self.response.status = status;
        self.response.content_type = content_type.map(str::to_string);
        self.response.body = body;
        self.responded = true;
    }

    /// Respond with plain text (`text/plain; charset=utf-8`).
    pub fn send_text(&mut self, body: &str, status: u16) {
        self.send_bytes(
            body.as_bytes().to_vec(),
            status,
            Some("text/plain; charset=utf-8"),
        );
    }

    /// Respond with an HTML document.
    pub fn send_html(&mut self, body: &str, status: u16) {
        self.send_bytes(
            body.as_bytes().to_vec(),
            status,
            Some("text/html; charset=utf-8"),
        );
    }

    /// Respond with a CSS stylesheet.
    pub fn send_css(&mut self, body: &str, status: u16) {
        self.send_bytes(
            body.as_bytes().to_vec(),
            status,
            Some("text/css; charset=utf-8"),
        );
    }

    /// Respond with JavaScript source.
    pub fn send_js(&mut self, body: &str, status: u16) {
        self.send_bytes(
            body.as_bytes().to_vec(),
            status,
            Some("application/javascript; charset=utf-8"),
        );
    }

    /// Respond with a serialized JSON value.
    pub fn send_json(&mut self, body: &serde_json::Value, status: u16) {
        self.send_bytes(body.to_string().into_bytes(), status, Some("application/json"));
    }

    /// Respond with a file's contents, content type inferred from the
    /// extension. Fails without touching the response if the file cannot be
    /// read.
    pub fn send_file(&mut self, path: &Path, status: u16) -> io::Result<()> {
        let bytes = std::fs::read(path)?;
        let content_type = static_files::content_type(path);
        self.send_bytes(bytes, status, Some(content_type));
        Ok(())
    }

    /// Respond with a 302 redirect to `location`.
    pub fn redirect(&mut self, location: &str) {
        self.set_header("Location", location);
        self.send_bytes(Vec::new(), 302, None);
    }
}
