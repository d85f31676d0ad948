//! Identifier Generation
//!
//! Short random base-36 suffixes for session and plan identifiers. No
//! uniqueness guarantee beyond the random suffix.

use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random part of a session id
const SESSION_SUFFIX_LEN: usize = 8;

/// Length of the random part of a hardening plan id
const PLAN_SUFFIX_LEN: usize = 6;

fn random_base36(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

/// Generate a session id of the form `sess_xxxxxxxx`
pub fn session_id() -> String {
    format!("sess_{}", random_base36(SESSION_SUFFIX_LEN))
}

/// Generate a hardening plan id of the form `hp_xxxxxx`
pub fn plan_id() -> String {
    format!("hp_{}", random_base36(PLAN_SUFFIX_LEN))
}
