use nbs_core::errors::{ErrorInfo, NbsError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("node", 3)
        .with_context("reason", "example")
}

#[test]
fn configuration_error_surface() {
    let err = NbsError::Configuration(sample_info("edge-budget-exceeded", "too many edges"));
    assert_eq!(err.code(), "edge-budget-exceeded");
    assert_eq!(err.context("node"), Some("3"));
}

#[test]
fn decoding_error_surface() {
    let err = NbsError::Decoding(sample_info("missing-parents", "node 2 has no parents"));
    assert_eq!(err.code(), "missing-parents");
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn invalid_topology_error_surface() {
    let err = NbsError::InvalidTopology(sample_info("not-upper-triangular", "backward edge"));
    assert_eq!(err.code(), "not-upper-triangular");
}

#[test]
fn oracle_error_surface() {
    let err = NbsError::Oracle(sample_info("unknown-architecture", "not in table"));
    assert_eq!(err.code(), "unknown-architecture");
    assert_eq!(err.family(), "Oracle");
    assert_eq!(err.context("missing"), None);
}

#[test]
fn display_without_context_or_hint_is_bare() {
    let err = NbsError::Serde(ErrorInfo::new("deserialize-bytes", "truncated input"));
    assert_eq!(err.to_string(), "serde error: truncated input (code: deserialize-bytes)");
}

#[test]
fn family_matches_serialized_tag() {
    for err in [
        NbsError::Configuration(ErrorInfo::new("a", "a")),
        NbsError::Decoding(ErrorInfo::new("b", "b")),
        NbsError::InvalidTopology(ErrorInfo::new("c", "c")),
        NbsError::Serde(ErrorInfo::new("d", "d")),
    ] {
        let json = serde_json::to_string(&err).expect("serialize");
        assert!(json.contains(&format!("\"family\":\"{}\"", err.family())));
    }
}

#[test]
fn display_includes_context_and_hint() {
    let err = NbsError::Configuration(
        ErrorInfo::new("edge-budget-exceeded", "cell has too many edges")
            .with_context("total", 10)
            .with_hint("lower a fan-in"),
    );
    let rendered = err.to_string();
    assert!(rendered.starts_with("configuration error: cell has too many edges"));
    assert!(rendered.contains("context: [total=10]"));
    assert!(rendered.contains("hint: lower a fan-in"));
}

#[test]
fn errors_round_trip_json() {
    let err = NbsError::Oracle(sample_info("timeout", "oracle did not answer"));
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"family\":\"Oracle\""));
    let decoded: NbsError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}
