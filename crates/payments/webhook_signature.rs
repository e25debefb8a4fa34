use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Checks a hex encoded HMAC-SHA256 of `payload` keyed with `secret`.
pub fn verify_signature(secret: &str, payload: &[u8], signature_hex: &str) -> bool {
    let Ok(provided) = hex::decode(signature_hex.trim()) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(payload);

    // verify_slice compares in constant time
    mac.verify_slice(&provided).is_ok()
}

pub fn sign(secret: &str, payload: &[u8]) -> anyhow::Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())?;
    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "webhook-secret";
    const BODY: &[u8] = br#"{"payment_id":"pay_1","status":"approved"}"#;

    #[test]
    fn accepts_signature_computed_with_same_secret() {
        let signature = sign(SECRET, BODY).unwrap();
        assert!(verify_signature(SECRET, BODY, &signature));
        assert!(verify_signature(SECRET, BODY, &signature.to_uppercase()));
    }

    #[test]
    fn rejects_other_secret_tampered_body_and_garbage() {
        let signature = sign(SECRET, BODY).unwrap();
        assert!(!verify_signature("other", BODY, &signature));
        assert!(!verify_signature(SECRET, br#"{"payment_id":"pay_2"}"#, &signature));
        assert!(!verify_signature(SECRET, BODY, "not-hex"));
        assert!(!verify_signature(SECRET, BODY, ""));
    }
}
