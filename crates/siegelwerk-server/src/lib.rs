// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// siegelwerk-server — HTTP surface for the sealing service.
//
// Minimal HTTP/1.1 framing over raw TCP, CORS for browser clients, and the
// Turnstile bot-verification collaborator. The protocol itself lives in
// `siegelwerk-seal`; this crate only routes, decodes, and encodes.

pub mod http;
pub mod server;
pub mod turnstile;

pub use server::{SealServer, SharedState};
pub use turnstile::TurnstileVerifier;
