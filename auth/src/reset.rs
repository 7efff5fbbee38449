use rand::Rng;

/// Reset tokens stay valid for this long after issuance.
pub const RESET_TOKEN_TTL_MINUTES: i64 = 15;

/// Generate an opaque password reset token.
///
/// 32 random bytes, hex encoded (64 characters). The token carries no claims
/// and is compared by equality against the stored value, so it cannot be
/// forged offline.
pub fn generate_reset_token() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();

    bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_64_hex_chars() {
        let token = generate_reset_token();

        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        // Hex encoding keeps it lowercase
        assert_eq!(token, token.to_lowercase());
    }

    #[test]
    fn test_tokens_are_unique() {
        let first = generate_reset_token();
        let second = generate_reset_token();

        assert_ne!(first, second);
    }
}
