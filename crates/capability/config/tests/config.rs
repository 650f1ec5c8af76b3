use icctv_config::{AppConfig, ConfigError};

// 环境变量为进程级共享状态，所有用例放在一个测试函数内顺序执行。
#[test]
fn config_from_env() {
    unsafe {
        std::env::remove_var("ICCTV_DATABASE_URL");
        std::env::remove_var("ICCTV_JWT_SECRET");
        std::env::remove_var("ICCTV_VIDEO_TOKEN_SECRET");
        std::env::remove_var("ICCTV_JWT_TTL_MINUTES");
        std::env::remove_var("ICCTV_HTTP_ADDR");
    }

    // 缺少必填项时报 Missing
    match AppConfig::from_env() {
        Err(ConfigError::Missing(key)) => assert_eq!(key, "ICCTV_DATABASE_URL"),
        other => panic!("unexpected: {other:?}"),
    }

    unsafe {
        std::env::set_var("ICCTV_DATABASE_URL", "postgresql://icctv@localhost/icctv");
        std::env::set_var("ICCTV_JWT_SECRET", "jwt-secret");
        std::env::set_var("ICCTV_VIDEO_TOKEN_SECRET", "video-secret");
    }

    // 可选项取默认值
    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.http_addr, "127.0.0.1:8080");
    assert_eq!(config.jwt_ttl_minutes, 120);

    // 非法数字报 Invalid
    unsafe {
        std::env::set_var("ICCTV_JWT_TTL_MINUTES", "abc");
    }
    match AppConfig::from_env() {
        Err(ConfigError::Invalid(key, value)) => {
            assert_eq!(key, "ICCTV_JWT_TTL_MINUTES");
            assert_eq!(value, "abc");
        }
        other => panic!("unexpected: {other:?}"),
    }

    unsafe {
        std::env::set_var("ICCTV_JWT_TTL_MINUTES", "30");
    }
    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.jwt_ttl_minutes, 30);
}
