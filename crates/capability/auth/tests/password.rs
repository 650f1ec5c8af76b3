use icctv_auth::{hash_password, verify_password};

#[test]
fn argon2_hash_verifies() {
    let hash = hash_password("123456").expect("hash");
    let check = verify_password(&hash, "123456").expect("check");
    assert!(check.verified);
    assert!(check.upgrade_hash.is_none());
}

#[test]
fn legacy_plaintext_upgrades() {
    let stored = "123456";
    let check = verify_password(stored, "123456").expect("check");
    assert!(check.verified);
    assert!(
        check
            .upgrade_hash
            .as_deref()
            .unwrap_or_default()
            .starts_with("$argon2")
    );
}

#[test]
fn wrong_password_rejected() {
    let hash = hash_password("123456").expect("hash");
    let check = verify_password(&hash, "bad").expect("check");
    assert!(!check.verified);

    let check = verify_password("123456", "bad").expect("check");
    assert!(!check.verified);
    assert!(check.upgrade_hash.is_none());
}
