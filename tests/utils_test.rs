use sporlyrics::utils::*;

#[test]
fn test_generate_token() {
    let token = generate_token(64);

    // Should be exactly the requested length
    assert_eq!(token.len(), 64);

    // Should contain only alphanumeric characters
    assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated tokens should be different
    let token2 = generate_token(64);
    assert_ne!(token, token2);
}

#[test]
fn test_generate_state_and_session_id_lengths() {
    assert_eq!(generate_state().len(), STATE_TOKEN_LENGTH);
    assert_eq!(generate_session_id().len(), SESSION_ID_LENGTH);
    assert_ne!(generate_state(), generate_state());
}

#[test]
fn test_sign() {
    let signature = sign("secret", "session-id");

    // Should not be empty
    assert!(!signature.is_empty());

    // Should be deterministic - same input produces same output
    assert_eq!(signature, sign("secret", "session-id"));

    // Different value or secret should produce different output
    assert_ne!(signature, sign("secret", "other-session"));
    assert_ne!(signature, sign("other-secret", "session-id"));

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        signature
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );

    // HMAC-SHA256 is 32 bytes, 43 characters unpadded
    assert_eq!(signature.len(), 43);
}

#[test]
fn test_verify() {
    let signature = sign("secret", "session-id");

    assert!(verify("secret", "session-id", &signature));
    assert!(!verify("secret", "session-ie", &signature));
    assert!(!verify("other-secret", "session-id", &signature));
    assert!(!verify("secret", "session-id", "not base64 !"));
    assert!(!verify("secret", "session-id", ""));
}
