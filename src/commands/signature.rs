use crate::commands::consts::{MAX_REQUEST_AGE_SECS, SIGNATURE_VERSION};
use crate::commands::responses::VerificationFailureReason;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Checks a Slack request signature: `v0=` followed by the hex HMAC-SHA256
/// of `v0:<timestamp>:<body>` keyed with the signing secret.
pub fn verify(
    secret: &str,
    timestamp: &str,
    body: &[u8],
    signature: &str,
    now_secs: u64,
) -> Result<(), VerificationFailureReason> {
    let sent_at: u64 = timestamp
        .parse()
        .map_err(|_| VerificationFailureReason::InvalidSignature)?;
    if now_secs.abs_diff(sent_at) > MAX_REQUEST_AGE_SECS {
        return Err(VerificationFailureReason::StaleRequest);
    }

    let digest = signature
        .strip_prefix(SIGNATURE_VERSION)
        .and_then(|rest| rest.strip_prefix('='))
        .and_then(|hex_digest| hex::decode(hex_digest).ok())
        .ok_or(VerificationFailureReason::InvalidSignature)?;

    signing_mac(secret, timestamp, body)
        .verify_slice(&digest)
        .map_err(|_| VerificationFailureReason::InvalidSignature)
}

#[cfg(test)]
pub fn sign(secret: &str, timestamp: &str, body: &[u8]) -> String {
    let digest = signing_mac(secret, timestamp, body).finalize().into_bytes();
    format!("{SIGNATURE_VERSION}={}", hex::encode(digest))
}

fn signing_mac(secret: &str, timestamp: &str, body: &[u8]) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(SIGNATURE_VERSION.as_bytes());
    mac.update(b":");
    mac.update(timestamp.as_bytes());
    mac.update(b":");
    mac.update(body);
    mac
}
