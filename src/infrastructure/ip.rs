//! Best-effort client address resolution.
//!
//! The gateway accepts a placeholder address but rejects a malformed one, so
//! resolution never fails: it falls back to loopback and leaves a diagnostic
//! trail on the `vnpay::diagnostics` target instead of the payment audit log.

use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};

pub const LOOPBACK: &str = "127.0.0.1";

const MIN_IP_LEN: usize = 7;
const MAX_IP_LEN: usize = 45;

static FALLBACKS: AtomicU64 = AtomicU64::new(0);

/// Number of times resolution fell back to [`LOOPBACK`] in this process.
pub fn fallback_count() -> u64 {
    FALLBACKS.load(Ordering::Relaxed)
}

fn plausible(candidate: &str) -> Option<String> {
    let candidate = candidate.trim().trim_matches(|c: char| c == '[' || c == ']');
    if !(MIN_IP_LEN..=MAX_IP_LEN).contains(&candidate.len()) {
        return None;
    }
    candidate.parse::<IpAddr>().ok().map(|ip| ip.to_string())
}

/// First plausible address among the candidates. Comma separated values
/// (`X-Forwarded-For` style) are split and tried left to right.
pub fn resolve_client_ip<S: AsRef<str>>(candidates: &[S]) -> String {
    let resolved = candidates
        .iter()
        .flat_map(|c| c.as_ref().split(','))
        .find_map(plausible);

    match resolved {
        Some(ip) => ip,
        None => {
            let total = FALLBACKS.fetch_add(1, Ordering::Relaxed) + 1;
            tracing::warn!(
                target: "vnpay::diagnostics",
                candidates = candidates.len(),
                fallbacks_total = total,
                "client IP unresolved, using loopback"
            );
            LOOPBACK.to_string()
        }
    }
}
