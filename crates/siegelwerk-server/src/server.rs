// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Embedded HTTP server for the sealing API.
//
// The server listens on a configurable TCP port for incoming JSON requests.
// Routing is deliberately small — four routes — so the framing in `http`
// parses just enough HTTP/1.1 to dispatch them.
//
// # Routes
//
//   - GET  /            health check (also /health)
//   - GET  /nonce       issue a single-use anti-replay nonce
//   - POST /verify      seal a validated submission into a signed token
//   - POST /validate-token  re-verify a previously sealed token
//
// The service itself is stateless across workers: the only shared mutable
// resource is the nonce ledger, whose redeem operation is an atomic
// check-and-delete. Everything else (encode, sign, verify, validate) is
// pure.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use siegelwerk_core::config::SealConfig;
use siegelwerk_core::error::{Result, SiegelwerkError};
use siegelwerk_core::types::{SealRequest, ServerStatus, Tier, ValidateTokenRequest};
use siegelwerk_seal::{
    AuditLog, MemoryNonceStore, NonceLedger, Sealer, SigningSecret, token_fingerprint,
};

use crate::http::{empty_response, json_response, parse_request_head};
use crate::turnstile::TurnstileVerifier;

/// Maximum bytes to read from a connection before rejecting it.
/// A full 28-indicator submission is a few KiB; anything near this bound is
/// not a legitimate client.
const MAX_REQUEST_BYTES: usize = 1024 * 1024; // 1 MiB

/// How often the in-memory nonce store reclaims entries past retention.
const PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Service name reported by the health endpoint.
const SERVICE_NAME: &str = "Siegelwerk Anti-Tamper API";

// ---------------------------------------------------------------------------
// Shared state passed to connection handlers
// ---------------------------------------------------------------------------

/// State shared across all connection-handling tasks.
pub struct SharedState {
    /// Service configuration (TTLs are read by the issue handler).
    config: SealConfig,
    /// The sealing service (holds the signing secret).
    sealer: Sealer,
    /// Single-use nonce ledger.
    ledger: NonceLedger<MemoryNonceStore>,
    /// Outbound bot-verification collaborator.
    bot: TurnstileVerifier,
    /// Optional append-only audit trail. `rusqlite` connections are `Send`
    /// but not `Sync`, hence the mutex.
    audit: Option<Mutex<AuditLog>>,
    /// Counter of active connections.
    active_connections: AtomicU32,
}

impl SharedState {
    /// Build the full service state from configuration.
    ///
    /// Fails fast when the signing secret is absent — the service must never
    /// start in a state where it could emit unsigned-looking responses.
    pub fn from_config(config: SealConfig) -> Result<Self> {
        let secret = SigningSecret::from_config(config.hmac_secret.as_deref())?;
        let sealer = Sealer::new(secret);
        let ledger = NonceLedger::new(MemoryNonceStore::new(), &config);
        let bot = TurnstileVerifier::new(
            config.turnstile_secret.clone(),
            Duration::from_millis(config.verify_timeout_ms),
        );
        let audit = match &config.audit_path {
            Some(path) => Some(Mutex::new(AuditLog::open(path)?)),
            None => None,
        };

        Ok(Self {
            config,
            sealer,
            ledger,
            bot,
            audit,
            active_connections: AtomicU32::new(0),
        })
    }

    /// Record an audit entry, if auditing is enabled. Audit failures are
    /// logged but never fail the request.
    fn record_audit(&self, operation: &str, nonce: &str, success: bool, detail: Option<&str>) {
        let Some(audit) = &self.audit else { return };
        match audit.lock() {
            Ok(log) => {
                if let Err(e) = log.record(operation, nonce, success, detail) {
                    warn!(error = %e, operation, "audit record failed");
                }
            }
            Err(e) => warn!(error = %e, "audit log lock poisoned"),
        }
    }
}

// ---------------------------------------------------------------------------
// SealServer
// ---------------------------------------------------------------------------

/// Embedded HTTP server for the sealing API.
pub struct SealServer {
    /// The TCP port to listen on.
    port: u16,
    /// Current lifecycle state of the server.
    status: ServerStatus,
    /// Notification handle used to signal a graceful shutdown.
    shutdown_signal: Arc<Notify>,
    /// Handle to the Tokio task running the accept loop.
    task_handle: Option<JoinHandle<()>>,
    /// State shared with connection handlers.
    shared: Arc<SharedState>,
}

impl SealServer {
    /// Create a new server from configuration.
    ///
    /// The server is created in `Stopped` state. Call [`SealServer::start`]
    /// to begin accepting connections.
    pub fn new(config: SealConfig) -> Result<Self> {
        let port = config.port;
        let shared = Arc::new(SharedState::from_config(config)?);
        Ok(Self {
            port,
            status: ServerStatus::Stopped,
            shutdown_signal: Arc::new(Notify::new()),
            task_handle: None,
            shared,
        })
    }

    /// Return the port this server will bind to (or is bound to).
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Return the current server status.
    pub fn status(&self) -> ServerStatus {
        self.status
    }

    /// Return the number of currently active client connections.
    pub fn active_connections(&self) -> u32 {
        self.shared.active_connections.load(Ordering::Relaxed)
    }

    /// Start the server.
    ///
    /// Binds a TCP listener on `0.0.0.0:{port}` and spawns a Tokio task that
    /// accepts incoming connections. Each connection is handled in its own
    /// spawned task. The same loop periodically reclaims expired nonces.
    ///
    /// # Errors
    ///
    /// Returns an error if the port is already in use or the listener cannot
    /// be created.
    pub async fn start(&mut self) -> Result<()> {
        if self.status == ServerStatus::Running {
            debug!(port = self.port, "server already running");
            return Ok(());
        }

        self.status = ServerStatus::Starting;

        let bind_addr: SocketAddr = ([0, 0, 0, 0], self.port).into();
        let listener = TcpListener::bind(bind_addr)
            .await
            .map_err(|e| SiegelwerkError::Server(format!("bind {bind_addr}: {e}")))?;

        info!(port = self.port, "sealing API listening");

        let shutdown = Arc::clone(&self.shutdown_signal);
        let shared = Arc::clone(&self.shared);
        let port = self.port;

        let handle = tokio::spawn(async move {
            Self::accept_loop(listener, shutdown, port, shared).await;
        });

        self.task_handle = Some(handle);
        self.status = ServerStatus::Running;
        Ok(())
    }

    /// Gracefully stop the server.
    ///
    /// Signals the accept loop to exit and awaits its completion. Existing
    /// connections that are mid-request are allowed to finish.
    pub async fn stop(&mut self) -> Result<()> {
        if self.status != ServerStatus::Running {
            return Ok(());
        }

        info!(port = self.port, "stopping sealing API");
        self.shutdown_signal.notify_one();

        if let Some(handle) = self.task_handle.take() {
            handle
                .await
                .map_err(|e| SiegelwerkError::Server(format!("task join: {e}")))?;
        }

        self.status = ServerStatus::Stopped;
        info!(port = self.port, "sealing API stopped");
        Ok(())
    }

    /// The main accept loop.
    ///
    /// Runs until the shutdown signal is received. Each incoming connection
    /// is handed off to [`Self::handle_connection`] in a separate task. A
    /// periodic tick purges nonces past their retention bound.
    async fn accept_loop(
        listener: TcpListener,
        shutdown: Arc<Notify>,
        port: u16,
        shared: Arc<SharedState>,
    ) {
        let mut purge_timer = tokio::time::interval(PURGE_INTERVAL);

        loop {
            tokio::select! {
                // Wait for the shutdown signal.
                _ = shutdown.notified() => {
                    debug!(port, "accept loop received shutdown signal");
                    break;
                }

                // Reclaim expired nonces.
                _ = purge_timer.tick() => {
                    match shared.ledger.purge_expired(Utc::now()) {
                        Ok(0) => {}
                        Ok(purged) => debug!(purged, "expired nonces reclaimed"),
                        Err(e) => warn!(error = %e, "nonce purge failed"),
                    }
                }

                // Accept a new connection.
                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((stream, peer_addr)) => {
                            debug!(peer = %peer_addr, "incoming connection");
                            let state = Arc::clone(&shared);
                            tokio::spawn(async move {
                                state.active_connections.fetch_add(1, Ordering::Relaxed);
                                if let Err(e) = Self::handle_connection(stream, peer_addr, &state).await {
                                    warn!(
                                        peer = %peer_addr,
                                        error = %e,
                                        "connection handler error"
                                    );
                                }
                                state.active_connections.fetch_sub(1, Ordering::Relaxed);
                            });
                        }
                        Err(e) => {
                            error!(error = %e, "failed to accept connection");
                        }
                    }
                }
            }
        }
    }

    /// Handle a single incoming TCP connection.
    ///
    /// Reads the request head, then exactly Content-Length body bytes,
    /// dispatches to the route handler, and writes the JSON response.
    async fn handle_connection(
        mut stream: tokio::net::TcpStream,
        peer_addr: SocketAddr,
        state: &Arc<SharedState>,
    ) -> Result<()> {
        let mut buf = Vec::with_capacity(8192);
        let mut chunk = [0u8; 8192];

        // Read until the headers are complete.
        let head = loop {
            if let Some(head) = parse_request_head(&buf) {
                break head;
            }
            if buf.len() > MAX_REQUEST_BYTES {
                send_all(&mut stream, &json_response(400, &json!({"ok": false, "error": "bad_json"}))).await?;
                return Ok(());
            }
            let n = stream
                .read(&mut chunk)
                .await
                .map_err(|e| SiegelwerkError::Server(format!("read from {peer_addr}: {e}")))?;
            if n == 0 {
                debug!(peer = %peer_addr, "connection closed before a full request");
                return Ok(());
            }
            buf.extend_from_slice(&chunk[..n]);
        };

        // CORS preflight short-circuits before any body handling.
        if head.method == "OPTIONS" {
            send_all(&mut stream, &empty_response(200)).await?;
            return Ok(());
        }

        // Read the body, bounded.
        let body_len = head.content_length.unwrap_or(0);
        if body_len > MAX_REQUEST_BYTES {
            send_all(&mut stream, &json_response(400, &json!({"ok": false, "error": "bad_json"}))).await?;
            return Ok(());
        }
        while buf.len() < head.body_offset + body_len {
            let n = stream
                .read(&mut chunk)
                .await
                .map_err(|e| SiegelwerkError::Server(format!("read from {peer_addr}: {e}")))?;
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let body_end = (head.body_offset + body_len).min(buf.len());
        let body = &buf[head.body_offset..body_end];

        let (status, reply) =
            dispatch(state, &head.method, &head.path, body, Some(peer_addr.ip())).await;

        info!(
            peer = %peer_addr,
            method = %head.method,
            path = %head.path,
            status,
            "request handled"
        );

        send_all(&mut stream, &json_response(status, &reply)).await
    }
}

async fn send_all(stream: &mut tokio::net::TcpStream, response: &[u8]) -> Result<()> {
    stream
        .write_all(response)
        .await
        .map_err(|e| SiegelwerkError::Server(format!("write response: {e}")))?;
    stream
        .flush()
        .await
        .map_err(|e| SiegelwerkError::Server(format!("flush: {e}")))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Route dispatch
// ---------------------------------------------------------------------------

/// Route a parsed request to the appropriate handler.
pub(crate) async fn dispatch(
    state: &SharedState,
    method: &str,
    path: &str,
    body: &[u8],
    remote_ip: Option<std::net::IpAddr>,
) -> (u16, Value) {
    match (method, path) {
        ("GET", "/") | ("GET", "/health") => (
            200,
            json!({
                "ok": true,
                "service": SERVICE_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            }),
        ),
        ("GET", "/nonce") => handle_issue(state),
        ("POST", "/verify") => handle_seal(state, body, remote_ip).await,
        ("POST", "/validate-token") => handle_unseal(state, body),
        _ => error_reply(&SiegelwerkError::RouteNotFound),
    }
}

/// GET /nonce — issue a new anti-replay nonce.
fn handle_issue(state: &SharedState) -> (u16, Value) {
    let now = Utc::now();
    match state.ledger.issue(now) {
        Ok(issued) => {
            state.record_audit("issue", &issued.nonce, true, None);
            (
                200,
                json!({
                    "ok": true,
                    "nonce": issued.nonce,
                    "timestamp": issued.issued_at.timestamp_millis(),
                    "expires_at": issued.expires_at.timestamp_millis(),
                    "expires_in": state.config.nonce_validity_secs,
                }),
            )
        }
        Err(e) => {
            error!(error = %e, "nonce issuance failed");
            error_reply(&e)
        }
    }
}

/// POST /verify — validate a submission and seal it into a signed token.
async fn handle_seal(
    state: &SharedState,
    body: &[u8],
    remote_ip: Option<std::net::IpAddr>,
) -> (u16, Value) {
    let Ok(request) = serde_json::from_slice::<SealRequest>(body) else {
        return error_reply(&SiegelwerkError::BadJson);
    };

    let now = Utc::now();
    match state
        .sealer
        .seal(&state.ledger, &state.bot, &request, remote_ip, now)
        .await
    {
        Ok(sealed) => {
            let tier = Tier::for_iq(sealed.record.iq);
            state.record_audit(
                "seal",
                &request.nonce,
                true,
                Some(&token_fingerprint(&sealed.token)),
            );
            (
                200,
                json!({
                    "ok": true,
                    "token": sealed.token,
                    "iq": sealed.record.iq,
                    "tier": sealed.record.tier,
                    "roast": tier.commentary(),
                }),
            )
        }
        Err(e) => {
            state.record_audit("seal", &request.nonce, false, Some(&e.wire_code()));
            error_reply(&e)
        }
    }
}

/// POST /validate-token — re-verify a previously sealed token.
fn handle_unseal(state: &SharedState, body: &[u8]) -> (u16, Value) {
    let Ok(request) = serde_json::from_slice::<ValidateTokenRequest>(body) else {
        return error_reply(&SiegelwerkError::BadJson);
    };
    let Some(token) = request.token else {
        return error_reply(&SiegelwerkError::MissingToken);
    };

    match state.sealer.unseal(&token) {
        Ok(unsealed) => {
            state.record_audit("unseal", "", true, Some(&token_fingerprint(&token)));
            (
                200,
                json!({
                    "ok": true,
                    "valid": true,
                    "iq": unsealed.iq,
                    "tier": unsealed.tier,
                    "timestamp": unsealed.timestamp,
                }),
            )
        }
        Err(e) => {
            state.record_audit("unseal", "", false, Some(&e.wire_code()));
            error_reply(&e)
        }
    }
}

/// Render an error as its wire form: `{ok: false, error: code}`, plus the
/// explicit tamper flag for signature failures.
fn error_reply(err: &SiegelwerkError) -> (u16, Value) {
    let mut body = json!({
        "ok": false,
        "error": err.wire_code(),
    });
    if err.is_tampered() {
        body["tampered"] = json!(true);
    }
    (err.http_status(), body)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;
    use siegelwerk_core::types::INDICATOR_KEYS;

    /// Service state with a fixed secret, no Turnstile, no audit file.
    fn test_state() -> SharedState {
        let config = SealConfig {
            hmac_secret: Some("test-signing-secret".into()),
            ..SealConfig::default()
        };
        SharedState::from_config(config).expect("build state")
    }

    fn profile_json(score: &str, nonce: &str) -> String {
        let mut profile = Map::new();
        for key in INDICATOR_KEYS {
            profile.insert(key.to_string(), json!(score));
        }
        serde_json::to_string(&json!({
            "nonce": nonce,
            "context_messages": 24,
            "analysis_summary": "steady across the board",
            "profile": profile,
        }))
        .expect("serialize submission")
    }

    fn seal_body(nonce: &str, score: &str) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "nonce": nonce,
            "timestamp": 1_764_000_000_000_i64,
            "profile_json": profile_json(score, nonce),
            "turnstile_token": "tt-test",
        }))
        .expect("serialize request")
    }

    async fn issue_nonce(state: &SharedState) -> String {
        let (status, reply) = dispatch(state, "GET", "/nonce", b"", None).await;
        assert_eq!(status, 200);
        reply["nonce"].as_str().expect("nonce").to_owned()
    }

    #[tokio::test]
    async fn health_reports_service_identity() {
        let state = test_state();
        let (status, reply) = dispatch(&state, "GET", "/health", b"", None).await;
        assert_eq!(status, 200);
        assert_eq!(reply["ok"], json!(true));
        assert_eq!(reply["service"], json!(SERVICE_NAME));
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let state = test_state();
        let (status, reply) = dispatch(&state, "GET", "/leaderboard", b"", None).await;
        assert_eq!(status, 404);
        assert_eq!(reply["error"], json!("not_found"));
    }

    #[tokio::test]
    async fn nonce_issue_reports_both_horizons() {
        let state = test_state();
        let (status, reply) = dispatch(&state, "GET", "/nonce", b"", None).await;
        assert_eq!(status, 200);

        let nonce = reply["nonce"].as_str().expect("nonce");
        assert_eq!(nonce.len(), 32);
        assert_eq!(reply["expires_in"], json!(120));

        let issued = reply["timestamp"].as_i64().expect("timestamp");
        let expires = reply["expires_at"].as_i64().expect("expires_at");
        assert_eq!(expires - issued, 120_000);
    }

    #[tokio::test]
    async fn full_seal_and_validate_flow() {
        let state = test_state();
        let nonce = issue_nonce(&state).await;

        let (status, reply) =
            dispatch(&state, "POST", "/verify", &seal_body(&nonce, "50.0000"), None).await;
        assert_eq!(status, 200, "seal failed: {reply}");
        assert_eq!(reply["iq"], json!(115));
        assert_eq!(reply["tier"], json!("smart"));
        assert!(reply["roast"].as_str().expect("roast").contains("Above average"));

        let token = reply["token"].as_str().expect("token");
        let body = serde_json::to_vec(&json!({ "token": token })).expect("body");
        let (status, reply) = dispatch(&state, "POST", "/validate-token", &body, None).await;
        assert_eq!(status, 200);
        assert_eq!(reply["valid"], json!(true));
        assert_eq!(reply["iq"], json!(115));
        assert_eq!(reply["tier"], json!("smart"));
    }

    #[tokio::test]
    async fn sealing_twice_with_one_nonce_fails() {
        let state = test_state();
        let nonce = issue_nonce(&state).await;
        let body = seal_body(&nonce, "50.0000");

        let (status, _) = dispatch(&state, "POST", "/verify", &body, None).await;
        assert_eq!(status, 200);

        let (status, reply) = dispatch(&state, "POST", "/verify", &body, None).await;
        assert_eq!(status, 400);
        assert_eq!(reply["error"], json!("nonce_invalid"));
    }

    #[tokio::test]
    async fn malformed_body_is_bad_json() {
        let state = test_state();
        let (status, reply) = dispatch(&state, "POST", "/verify", b"{not json", None).await;
        assert_eq!(status, 400);
        assert_eq!(reply["error"], json!("bad_json"));

        // Missing required fields is the same malformed-request class.
        let (status, reply) =
            dispatch(&state, "POST", "/verify", br#"{"nonce":"N"}"#, None).await;
        assert_eq!(status, 400);
        assert_eq!(reply["error"], json!("bad_json"));
    }

    #[tokio::test]
    async fn missing_turnstile_token_is_403() {
        let state = test_state();
        let nonce = issue_nonce(&state).await;

        let body = serde_json::to_vec(&json!({
            "nonce": nonce,
            "timestamp": 0,
            "profile_json": profile_json("50.0000", &nonce),
        }))
        .expect("serialize");

        let (status, reply) = dispatch(&state, "POST", "/verify", &body, None).await;
        assert_eq!(status, 403);
        assert_eq!(reply["error"], json!("bot_suspected"));
    }

    #[tokio::test]
    async fn check_digit_violation_reaches_the_wire() {
        let state = test_state();
        let nonce = issue_nonce(&state).await;

        // 28 scores with check digit 0, then corrupt one fractional digit.
        let mut profile = Map::new();
        for key in INDICATOR_KEYS {
            profile.insert(key.to_string(), json!("50.0000"));
        }
        profile.insert("creativity".into(), json!("50.0100"));
        let submission = serde_json::to_string(&json!({
            "nonce": nonce,
            "context_messages": 1,
            "analysis_summary": "x",
            "profile": profile,
        }))
        .expect("serialize");

        let body = serde_json::to_vec(&json!({
            "nonce": nonce,
            "timestamp": 0,
            "profile_json": submission,
            "turnstile_token": "tt",
        }))
        .expect("serialize");

        let (status, reply) = dispatch(&state, "POST", "/verify", &body, None).await;
        assert_eq!(status, 400);
        assert_eq!(reply["error"], json!("check_digit_mismatch"));
    }

    #[tokio::test]
    async fn tampered_token_reports_flag_and_never_a_score() {
        let state = test_state();
        let nonce = issue_nonce(&state).await;

        let (_, reply) =
            dispatch(&state, "POST", "/verify", &seal_body(&nonce, "50.0000"), None).await;
        let token = reply["token"].as_str().expect("token").to_owned();

        // Flip one hex character inside the embedded signature.
        use base64::Engine;
        use base64::engine::general_purpose::STANDARD as BASE64;
        let bytes = BASE64
            .decode(token.strip_prefix("DNA2::").expect("prefix"))
            .expect("decode");
        let mut record: Value = serde_json::from_slice(&bytes).expect("parse");
        let sig = record["sig"].as_str().expect("sig").to_owned();
        let flipped = if sig.starts_with('a') {
            format!("b{}", &sig[1..])
        } else {
            format!("a{}", &sig[1..])
        };
        record["sig"] = json!(flipped);
        let forged = format!(
            "DNA2::{}",
            BASE64.encode(serde_json::to_string(&record).expect("serialize"))
        );

        let body = serde_json::to_vec(&json!({ "token": forged })).expect("body");
        let (status, reply) = dispatch(&state, "POST", "/validate-token", &body, None).await;
        assert_eq!(status, 400);
        assert_eq!(reply["error"], json!("signature_invalid"));
        assert_eq!(reply["tampered"], json!(true));
        assert!(reply.get("iq").is_none());
    }

    #[tokio::test]
    async fn validate_without_token_field() {
        let state = test_state();
        let (status, reply) = dispatch(&state, "POST", "/validate-token", b"{}", None).await;
        assert_eq!(status, 400);
        assert_eq!(reply["error"], json!("missing_token"));
    }

    #[tokio::test]
    async fn bad_token_prefix_is_format_error() {
        let state = test_state();
        let body = serde_json::to_vec(&json!({ "token": "NOT-A-SEALED-TOKEN" })).expect("body");
        let (status, reply) = dispatch(&state, "POST", "/validate-token", &body, None).await;
        assert_eq!(status, 400);
        assert_eq!(reply["error"], json!("invalid_token_format"));
    }

    #[tokio::test]
    async fn audit_trail_records_the_lifecycle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = SealConfig {
            hmac_secret: Some("test-signing-secret".into()),
            audit_path: Some(dir.path().join("audit.db")),
            ..SealConfig::default()
        };
        let state = SharedState::from_config(config).expect("build state");

        let nonce = issue_nonce(&state).await;
        let (status, _) =
            dispatch(&state, "POST", "/verify", &seal_body(&nonce, "50.0000"), None).await;
        assert_eq!(status, 200);

        let audit = state.audit.as_ref().expect("audit enabled");
        let log = audit.lock().expect("lock");
        let entries = log.entries_for_nonce(&nonce).expect("entries");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, "issue");
        assert_eq!(entries[1].operation, "seal");
        assert!(entries[1].success);
    }
}
