use icctv_auth::{AuthError, JwtManager};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;

#[test]
fn jwt_issue_and_decode() {
    let jwt = JwtManager::new("secret".to_string(), 3600);
    let token = jwt.issue(7, "admin").expect("token");
    assert!(token.expires_at > 0);

    let ctx = jwt.decode(&token.access_token).expect("decode");
    assert_eq!(ctx.admin_id, 7);
    assert_eq!(ctx.username, "admin");
}

#[test]
fn tampered_signature_rejected() {
    let jwt = JwtManager::new("secret".to_string(), 3600);
    let token = jwt.issue(7, "admin").expect("token").access_token;

    // 改动签名段最后一个字节
    let mut tampered = token.clone();
    let last = tampered.pop().expect("non-empty");
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    assert!(matches!(jwt.decode(&tampered), Err(AuthError::TokenInvalid)));
}

#[test]
fn wrong_secret_rejected() {
    let jwt = JwtManager::new("secret".to_string(), 3600);
    let other = JwtManager::new("other-secret".to_string(), 3600);
    let token = jwt.issue(7, "admin").expect("token").access_token;
    assert!(matches!(other.decode(&token), Err(AuthError::TokenInvalid)));
}

#[derive(Serialize)]
struct RawClaims {
    sub: String,
    #[serde(rename = "adminId")]
    admin_id: i64,
    username: String,
    iat: usize,
    exp: usize,
}

fn raw_claims(exp: usize) -> RawClaims {
    RawClaims {
        sub: "7".to_string(),
        admin_id: 7,
        username: "admin".to_string(),
        iat: 1,
        exp,
    }
}

#[test]
fn expired_token_rejected_even_with_valid_signature() {
    let jwt = JwtManager::new("secret".to_string(), 3600);
    // 用同一密钥直接构造一个已过期的 token
    let expired = jsonwebtoken::encode(
        &Header::default(),
        &raw_claims(2),
        &EncodingKey::from_secret(b"secret"),
    )
    .expect("encode");
    assert!(matches!(jwt.decode(&expired), Err(AuthError::TokenExpired)));
}

#[test]
fn non_hs256_algorithm_rejected() {
    let jwt = JwtManager::new("secret".to_string(), 3600);
    let foreign = jsonwebtoken::encode(
        &Header::new(Algorithm::HS384),
        &raw_claims(usize::MAX / 2),
        &EncodingKey::from_secret(b"secret"),
    )
    .expect("encode");
    assert!(matches!(jwt.decode(&foreign), Err(AuthError::TokenInvalid)));
}

#[test]
fn malformed_token_rejected() {
    let jwt = JwtManager::new("secret".to_string(), 3600);
    assert!(matches!(
        jwt.decode("not-a-jwt"),
        Err(AuthError::TokenInvalid)
    ));
}
