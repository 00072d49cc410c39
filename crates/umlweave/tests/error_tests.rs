//! Tests for core error types

use umlweave::core::FragmentError;

#[test]
fn test_no_multiplicity_error() {
    let error = FragmentError::no_multiplicity("A Car has 2 Wheels .");
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("No multiplicity phrase found"));
    assert!(error_msg.contains("A Car has 2 Wheels ."));
}

#[test]
fn test_ambiguous_group_key() {
    let error = "Garage-rel1".parse::<umlweave::FragmentKey>().unwrap_err();
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Ambiguous group key"));
    assert!(error_msg.contains("Garage-rel1"));
    assert!(error_msg.contains("<document>_<class|rel><index>"));
}

#[test]
fn test_empty_pattern_set() {
    let error = FragmentError::EmptyPatternSet;
    assert_eq!(format!("{}", error), "Pattern set is empty");
}

#[test]
fn test_invalid_pattern() {
    let error = FragmentError::invalid_pattern("copula-class: duplicate node id");
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Invalid pattern"));
    assert!(error_msg.contains("duplicate node id"));
}

#[test]
fn test_invalid_multiplicity() {
    let error = "2..4".parse::<umlweave::Multiplicity>().unwrap_err();
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Invalid multiplicity"));
    assert!(error_msg.contains("2..4"));
}

#[test]
fn test_parser_and_notation_errors() {
    let error = FragmentError::parser_error("empty sentence");
    assert!(format!("{}", error).contains("Dependency parse error"));

    let error = FragmentError::notation_error("unexpected arrow");
    assert!(format!("{}", error).contains("Notation error"));
}

#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<umlweave::Model>("{").unwrap_err();
    let error: FragmentError = json_err.into();
    assert!(format!("{}", error).contains("JSON error"));
}

#[test]
fn test_errors_cross_anyhow_boundary() {
    let error = anyhow::Error::new(FragmentError::unsupported_kind("attr"));
    assert!(matches!(
        error.downcast_ref::<FragmentError>(),
        Some(FragmentError::UnsupportedSentenceKind { label }) if label == "attr"
    ));
}
