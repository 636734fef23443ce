use super::context::ResponseParts;
use may_minihttp::Response;
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, PoisonError};

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        302 => "Found",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

// may_minihttp headers are 'static "Name: value" strings; dynamic values are
// leaked once per distinct header line and reused afterwards, so memory
// grows with the set of distinct header values, not with request volume.
fn leaked_header(name: &str, value: &str) -> &'static str {
    static CACHE: OnceLock<Mutex<HashMap<String, &'static str>>> = OnceLock::new();
    let header = format!("{name}: {value}");
    let mut cache = CACHE
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    match cache.get(header.as_str()) {
        Some(leaked) => leaked,
        None => {
            let leaked: &'static str = Box::leak(header.clone().into_boxed_str());
            cache.insert(header, leaked);
            leaked
        }
    }
}

fn push_header(res: &mut Response, name: &str, value: &str) {
    res.header(leaked_header(name, value));
}

/// Write the parts a handler built onto the wire response.
pub fn write_response(res: &mut Response, parts: ResponseParts) {
    res.status_code(parts.status as usize, status_reason(parts.status));
    match parts.content_type.as_deref() {
        Some("text/plain; charset=utf-8") => {
            res.header("Content-Type: text/plain; charset=utf-8");
        }
        Some("text/html; charset=utf-8") => {
            res.header("Content-Type: text/html; charset=utf-8");
        }
        Some("application/json") => {
            res.header("Content-Type: application/json");
        }
        Some(other) => push_header(res, "Content-Type", other),
        None => {}
    }
    for (name, value) in &parts.headers {
        push_header(res, name, value);
    }
    res.body_vec(parts.body);
}
