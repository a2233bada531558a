// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Turnstile bot-verification collaborator.
//
// Fail-closed: a missing client token, a network error, a timeout, or a
// non-success reply all report failure. The one deliberate exception is an
// unconfigured secret — then every request with a token passes, which is an
// operational bypass for deployments that have not enabled bot control.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use siegelwerk_seal::BotVerifier;
use tracing::{debug, warn};

/// Cloudflare Turnstile siteverify endpoint.
pub const SITEVERIFY_URL: &str = "https://challenges.cloudflare.com/turnstile/v0/siteverify";

/// Outbound Turnstile verification client.
pub struct TurnstileVerifier {
    secret: Option<String>,
    endpoint: String,
    timeout: Duration,
    client: reqwest::Client,
}

/// The subset of the siteverify reply we act on.
#[derive(Debug, Deserialize)]
struct SiteverifyReply {
    #[serde(default)]
    success: bool,
}

impl TurnstileVerifier {
    /// Build a verifier against the production siteverify endpoint.
    pub fn new(secret: Option<String>, timeout: Duration) -> Self {
        Self::with_endpoint(secret, SITEVERIFY_URL, timeout)
    }

    /// Build a verifier against a custom endpoint (used by tests).
    pub fn with_endpoint(secret: Option<String>, endpoint: &str, timeout: Duration) -> Self {
        Self {
            secret,
            endpoint: endpoint.to_owned(),
            timeout,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl BotVerifier for TurnstileVerifier {
    async fn verify(&self, token: Option<&str>, remote_ip: Option<IpAddr>) -> bool {
        let Some(token) = token else {
            debug!("no turnstile token supplied");
            return false;
        };
        let Some(secret) = &self.secret else {
            debug!("turnstile unconfigured — verification bypassed");
            return true;
        };

        let mut form = vec![
            ("secret", secret.clone()),
            ("response", token.to_owned()),
        ];
        if let Some(ip) = remote_ip {
            form.push(("remoteip", ip.to_string()));
        }

        let result = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .timeout(self.timeout)
            .send()
            .await;

        match result {
            Ok(response) => match response.json::<SiteverifyReply>().await {
                Ok(reply) => {
                    debug!(success = reply.success, "siteverify reply");
                    reply.success
                }
                Err(e) => {
                    warn!(error = %e, "siteverify reply unparseable — failing closed");
                    false
                }
            },
            Err(e) => {
                warn!(error = %e, "siteverify call failed — failing closed");
                false
            }
        }
    }
}
