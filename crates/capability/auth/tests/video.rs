use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;
use icctv_auth::{AuthError, VideoTokenPayload, VideoTokenSigner};

#[test]
fn video_token_round_trips() {
    let signer = VideoTokenSigner::new("video-secret".to_string());
    let token = signer
        .issue("B-100", vec!["cam1".to_string(), "cam2".to_string()])
        .expect("token");

    let payload = signer.verify(&token).expect("verify");
    assert_eq!(payload.site_id, "B-100");
    assert_eq!(payload.channels, vec!["cam1", "cam2"]);
    assert_eq!(payload.exp, payload.iat + 86_400);
}

#[test]
fn token_shape_is_payload_dot_hex_signature() {
    let signer = VideoTokenSigner::new("video-secret".to_string());
    let token = signer.issue("B-100", vec!["cam1".to_string()]).expect("token");

    let (payload_b64, signature_hex) = token.split_once('.').expect("two parts");
    let payload_bytes = URL_SAFE.decode(payload_b64).expect("base64url");
    let payload: serde_json::Value = serde_json::from_slice(&payload_bytes).expect("json");
    assert_eq!(payload["site_id"], "B-100");
    // HMAC-SHA256 的十六进制表示为 64 字符
    assert_eq!(signature_hex.len(), 64);
    assert!(signature_hex.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn flipped_signature_byte_rejected() {
    let signer = VideoTokenSigner::new("video-secret".to_string());
    let token = signer.issue("B-100", vec!["cam1".to_string()]).expect("token");

    // 在十六进制字母表内翻转签名段最后一个字符，保持可解码
    let mut tampered = token.clone();
    let last = tampered.pop().expect("non-empty");
    tampered.push(if last == '0' { '1' } else { '0' });

    assert!(matches!(
        signer.verify(&tampered),
        Err(AuthError::InvalidSignature)
    ));
}

#[test]
fn tampered_payload_rejected() {
    let signer = VideoTokenSigner::new("video-secret".to_string());
    let token = signer.issue("B-100", vec!["cam1".to_string()]).expect("token");
    let (_, signature_hex) = token.split_once('.').expect("two parts");

    let forged_payload = serde_json::json!({
        "channels": ["cam1"],
        "site_id": "B-200",
        "iat": 0,
        "exp": i64::MAX,
    });
    let forged = format!(
        "{}.{}",
        URL_SAFE.encode(serde_json::to_vec(&forged_payload).expect("json")),
        signature_hex
    );
    assert!(matches!(
        signer.verify(&forged),
        Err(AuthError::InvalidSignature)
    ));
}

#[test]
fn expired_token_rejected() {
    let signer = VideoTokenSigner::new("video-secret".to_string());
    let token = signer
        .sign(&VideoTokenPayload {
            channels: vec!["cam1".to_string()],
            site_id: "B-100".to_string(),
            iat: 0,
            exp: 1,
        })
        .expect("token");
    assert!(matches!(signer.verify(&token), Err(AuthError::TokenExpired)));
}

#[test]
fn wrong_secret_rejected() {
    let signer = VideoTokenSigner::new("video-secret".to_string());
    let other = VideoTokenSigner::new("other-secret".to_string());
    let token = signer.issue("B-100", vec!["cam1".to_string()]).expect("token");
    assert!(matches!(
        other.verify(&token),
        Err(AuthError::InvalidSignature)
    ));
}

#[test]
fn malformed_token_rejected() {
    let signer = VideoTokenSigner::new("video-secret".to_string());
    assert!(matches!(
        signer.verify("no-separator"),
        Err(AuthError::TokenInvalid)
    ));
    assert!(matches!(
        signer.verify("!!!.not-hex"),
        Err(AuthError::TokenInvalid)
    ));
}
