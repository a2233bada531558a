// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Minimal HTTP/1.1 framing for the sealing API.
//
// The API surface is three small JSON endpoints, so this module parses just
// enough HTTP to route them: the request line, the end of headers, and
// Content-Length. Responses are written with permissive CORS headers on
// every reply so browser clients can call the API cross-origin.

use serde_json::Value;

/// Parsed head of an HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    /// Request method, uppercase (e.g. "GET", "POST", "OPTIONS").
    pub method: String,
    /// Path component of the request target, query string stripped.
    pub path: String,
    /// Content-Length value, if present.
    pub content_length: Option<usize>,
    /// Offset where the body begins (just past the blank line).
    pub body_offset: usize,
}

/// Parse the request line and headers out of `data`.
///
/// Returns `None` until the double CRLF terminating the headers has been
/// received, or if the request line is malformed.
pub fn parse_request_head(data: &[u8]) -> Option<RequestHead> {
    let header_end = find_subsequence(data, b"\r\n\r\n")?;
    let body_offset = header_end + 4;

    let head = std::str::from_utf8(&data[..header_end]).ok()?;
    let mut lines = head.lines();

    // Request line: METHOD SP request-target SP HTTP-version
    let request_line = lines.next()?;
    let mut parts = request_line.split_ascii_whitespace();
    let method = parts.next()?.to_ascii_uppercase();
    let target = parts.next()?;
    parts.next()?; // HTTP version must be present

    // Route on the path alone; the query string is not used by any endpoint.
    let path = target.split('?').next().unwrap_or(target).to_owned();

    let content_length = lines
        .find(|line| line.to_ascii_lowercase().starts_with("content-length:"))
        .and_then(|line| line.split(':').nth(1))
        .and_then(|value| value.trim().parse::<usize>().ok());

    Some(RequestHead {
        method,
        path,
        content_length,
        body_offset,
    })
}

/// Find the first occurrence of `needle` in `haystack`.
fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Render a JSON response with CORS headers.
pub fn json_response(status: u16, body: &Value) -> Vec<u8> {
    let payload = body.to_string();
    let mut response = format!(
        "HTTP/1.1 {status} {}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n",
        reason_phrase(status),
        payload.len()
    );
    push_cors_headers(&mut response);
    response.push_str("Connection: close\r\n\r\n");
    response.push_str(&payload);
    response.into_bytes()
}

/// Render an empty response (CORS preflight) with CORS headers.
pub fn empty_response(status: u16) -> Vec<u8> {
    let mut response = format!(
        "HTTP/1.1 {status} {}\r\nContent-Length: 0\r\n",
        reason_phrase(status)
    );
    push_cors_headers(&mut response);
    response.push_str("Connection: close\r\n\r\n");
    response.into_bytes()
}

fn push_cors_headers(response: &mut String) {
    response.push_str("Access-Control-Allow-Origin: *\r\n");
    response.push_str("Access-Control-Allow-Methods: GET,POST,OPTIONS\r\n");
    response.push_str("Access-Control-Allow-Headers: content-type\r\n");
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_get_request() {
        let data = b"GET /nonce HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let head = parse_request_head(data).expect("parse");
        assert_eq!(head.method, "GET");
        assert_eq!(head.path, "/nonce");
        assert_eq!(head.content_length, None);
        assert_eq!(head.body_offset, data.len());
    }

    #[test]
    fn parse_post_with_body() {
        let data =
            b"POST /verify HTTP/1.1\r\nContent-Type: application/json\r\nContent-Length: 13\r\n\r\n{\"nonce\":\"N\"}";
        let head = parse_request_head(data).expect("parse");
        assert_eq!(head.method, "POST");
        assert_eq!(head.path, "/verify");
        assert_eq!(head.content_length, Some(13));
        assert_eq!(&data[head.body_offset..], b"{\"nonce\":\"N\"}");
    }

    #[test]
    fn incomplete_head_returns_none() {
        assert!(parse_request_head(b"GET /nonce HTTP/1.1\r\nHost: x\r\n").is_none());
        assert!(parse_request_head(b"").is_none());
    }

    #[test]
    fn query_string_is_stripped() {
        let data = b"GET /health?probe=1 HTTP/1.1\r\n\r\n";
        let head = parse_request_head(data).expect("parse");
        assert_eq!(head.path, "/health");
    }

    #[test]
    fn content_length_header_is_case_insensitive() {
        let data = b"POST /verify HTTP/1.1\r\ncontent-length: 2\r\n\r\n{}";
        let head = parse_request_head(data).expect("parse");
        assert_eq!(head.content_length, Some(2));
    }

    #[test]
    fn json_response_carries_cors_and_body() {
        let bytes = json_response(400, &json!({"ok": false, "error": "bad_json"}));
        let text = String::from_utf8(bytes).expect("utf8");
        assert!(text.starts_with("HTTP/1.1 400 Bad Request\r\n"));
        assert!(text.contains("Access-Control-Allow-Origin: *\r\n"));
        assert!(text.ends_with(r#"{"error":"bad_json","ok":false}"#));
    }

    #[test]
    fn preflight_response_is_empty_with_cors() {
        let bytes = empty_response(200);
        let text = String::from_utf8(bytes).expect("utf8");
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Access-Control-Allow-Methods: GET,POST,OPTIONS\r\n"));
        assert!(text.ends_with("\r\n\r\n"));
    }
}
