#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use camlink_router::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
decoder:
  max_payload_bytez: 123 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.decoder.max_payload_bytes, 64 * 1024);
    assert!(!cfg.decoder.deny_unknown_fields);
    assert_eq!(cfg.log.filter, "info");
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
decoder:
  max_payload_bytes: 1024
  deny_unknown_fields: true
log:
  filter: "camlink_router=debug"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.decoder.max_payload_bytes, 1024);
    assert!(cfg.decoder.deny_unknown_fields);
    assert_eq!(cfg.log.filter, "camlink_router=debug");
}

#[test]
fn rejects_bad_values() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");

    let err = config::load_from_str("version: 1\ndecoder:\n  max_payload_bytes: 0\n")
        .expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");

    let err = config::load_from_str("version: 1\nlog:\n  filter: \"  \"\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn missing_file_is_bad_config() {
    let err = config::load_from_file("does/not/exist.yaml").expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}
