use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use rand::{Rng, distr::Alphanumeric};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Length of the OAuth `state` parameter generated at login.
pub const STATE_TOKEN_LENGTH: usize = 43;

/// Length of the opaque session identifiers carried by the session cookie.
pub const SESSION_ID_LENGTH: usize = 32;

pub fn generate_token(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn generate_state() -> String {
    generate_token(STATE_TOKEN_LENGTH)
}

pub fn generate_session_id() -> String {
    generate_token(SESSION_ID_LENGTH)
}

/// HMAC-SHA256 of `value` under `secret`, URL-safe base64 without padding.
pub fn sign(secret: &str, value: &str) -> String {
    let mut mac = mac_for(secret);
    mac.update(value.as_bytes());
    URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
}

/// Checks a signature produced by [`sign`] in constant time.
pub fn verify(secret: &str, value: &str, signature: &str) -> bool {
    let Ok(expected) = URL_SAFE_NO_PAD.decode(signature) else {
        return false;
    };

    let mut mac = mac_for(secret);
    mac.update(value.as_bytes());
    mac.verify_slice(&expected).is_ok()
}

fn mac_for(secret: &str) -> HmacSha256 {
    // HMAC accepts keys of any length
    <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC-SHA256 takes keys of any size"))
}
