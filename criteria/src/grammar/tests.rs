//! Tests for the criterion grammar.

use super::*;
use crate::error::DecodeError;

fn decode(segment_tail: &str) -> Result<Constraint, DecodeError> {
    decode_tail(&tokens(segment_tail))
}

#[test]
fn test_segments_skip_empty() {
    let parts: Vec<&str> = segments("a.b~~c.d~").collect();
    assert_eq!(parts, vec!["a.b", "c.d"]);
}

#[test]
fn test_segments_empty_input() {
    assert_eq!(segments("").count(), 0);
}

#[test]
fn test_tokens_plain() {
    assert_eq!(tokens("metadata.Yes.No"), vec!["metadata", "Yes", "No"]);
}

#[test]
fn test_tokens_rejoin_decimal_bound() {
    assert_eq!(
        tokens("metadata.ge-3.le-0.24"),
        vec!["metadata", "ge-3", "le-0.24"]
    );
    assert_eq!(tokens("score.ge0.le0.24"), vec!["score", "ge0", "le0.24"]);
}

#[test]
fn test_tokens_decimal_on_both_bounds() {
    assert_eq!(tokens("ge0.5.le1.75"), vec!["ge0.5", "le1.75"]);
}

#[test]
fn test_tokens_plain_numbers_not_joined() {
    // Only bounds absorb a following digit token
    assert_eq!(tokens("rating.1.2"), vec!["rating", "1", "2"]);
}

#[test]
fn test_tokens_drop_empty() {
    assert_eq!(tokens("a..b."), vec!["a", "b"]);
}

#[test]
fn test_parse_number() {
    assert_eq!(parse_number("3").unwrap(), 3.0);
    assert_eq!(parse_number("-3").unwrap(), -3.0);
    assert_eq!(parse_number("-0.24").unwrap(), -0.24);
    assert!(parse_number("").is_err());
    assert!(parse_number("-").is_err());
    assert!(parse_number("3.").is_err());
    assert!(parse_number(".5").is_err());
    assert!(parse_number("1e3").is_err());
    assert!(parse_number("3x").is_err());
}

#[test]
fn test_parse_number_out_of_range() {
    let huge = "9".repeat(400);
    assert!(parse_number(&huge).is_err());
    assert!(parse_number(&format!("-{}", huge)).is_err());
}

#[test]
fn test_decode_out_of_range_bound_fails() {
    let tail = format!("ge{}.le3", "9".repeat(400));
    assert!(matches!(
        decode(&tail),
        Err(DecodeError::MalformedNumber(_))
    ));
}

#[test]
fn test_range_bound_recognition() {
    assert_eq!(range_bound("ge-3"), Some(Ok(Bound::Ge(-3.0))));
    assert_eq!(range_bound("le0.24"), Some(Ok(Bound::Le(0.24))));
    assert_eq!(range_bound("gender"), None);
    assert_eq!(range_bound("level"), None);
    assert_eq!(range_bound("ge"), None);
    assert!(matches!(
        range_bound("ge3x"),
        Some(Err(DecodeError::MalformedNumber(_)))
    ));
}

#[test]
fn test_decode_range() {
    let value = decode("ge-3.le-0.24").unwrap();
    assert_eq!(
        value,
        Constraint::Range(Range {
            ge: Some(-3.0),
            le: Some(-0.24)
        })
    );
}

#[test]
fn test_decode_range_reversed_order() {
    let value = decode("le5.ge1").unwrap();
    assert_eq!(value, Constraint::Range(Range::between(1.0, 5.0)));
}

#[test]
fn test_decode_range_single_bound() {
    let value = decode("le3").unwrap();
    assert_eq!(
        value,
        Constraint::Range(Range {
            ge: None,
            le: Some(3.0)
        })
    );
}

#[test]
fn test_decode_range_ignores_trailing_tokens() {
    let value = decode("ge0.le0.24.extra").unwrap();
    assert_eq!(value, Constraint::Range(Range::between(0.0, 0.24)));
}

#[test]
fn test_decode_range_first_bound_wins() {
    let value = decode("ge1.ge2.le9").unwrap();
    assert_eq!(value, Constraint::Range(Range::between(1.0, 9.0)));
}

#[test]
fn test_decode_malformed_range_fails() {
    assert!(matches!(
        decode("ge1x.le3"),
        Err(DecodeError::MalformedNumber(_))
    ));
}

#[test]
fn test_decode_terms() {
    let value = decode("Yes.No").unwrap();
    assert_eq!(
        value,
        Constraint::Terms(vec!["Yes".to_string(), "No".to_string()])
    );
}

#[test]
fn test_decode_terms_numeric_stay_strings() {
    let value = decode("1.2").unwrap();
    assert_eq!(value.as_terms(), Some(&["1".to_string(), "2".to_string()][..]));
}

#[test]
fn test_decode_operator_terms() {
    let value = decode("operator.and.values.hate.pii").unwrap();
    let terms = value.as_operator_terms().unwrap();
    assert_eq!(terms.operator, Some(Operator::And));
    assert_eq!(terms.values, vec!["hate", "pii"]);
}

#[test]
fn test_decode_values_without_operator() {
    let value = decode("values.hate.pii").unwrap();
    let terms = value.as_operator_terms().unwrap();
    assert_eq!(terms.operator, None);
    assert_eq!(terms.values, vec!["hate", "pii"]);
}

#[test]
fn test_operator_key_absent_when_serialized() {
    let value = decode("values.hate.pii").unwrap();
    let json = serde_json::to_value(&value).unwrap();
    assert!(json.get("operator").is_none());
    assert_eq!(json["values"], serde_json::json!(["hate", "pii"]));
}

#[test]
fn test_operator_key_present_when_serialized() {
    let value = decode("operator.or.values.a").unwrap();
    let json = serde_json::to_value(&value).unwrap();
    assert_eq!(json["operator"], "or");
}

#[test]
fn test_range_serialized_shape() {
    let value = decode("ge0.le0.24").unwrap();
    let json = serde_json::to_value(&value).unwrap();
    assert_eq!(json, serde_json::json!({"ge": 0.0, "le": 0.24}));
}

#[test]
fn test_decode_operator_errors() {
    assert!(matches!(
        decode("operator.xor.values.a"),
        Err(DecodeError::UnknownOperator(_))
    ));
    assert!(matches!(
        decode("operator.and.a.b"),
        Err(DecodeError::MissingValuesMarker(_))
    ));
    assert!(matches!(
        decode("operator.and.values"),
        Err(DecodeError::EmptyValues)
    ));
    assert!(matches!(decode("operator"), Err(DecodeError::UnknownOperator(_))));
    assert!(matches!(decode("values"), Err(DecodeError::EmptyValues)));
}

#[test]
fn test_decode_empty_tail() {
    assert_eq!(decode_tail(&[]), Err(DecodeError::EmptyTail));
}

#[test]
fn test_encode_is_inverse() {
    for tail in [
        "ge-3.le-0.24",
        "ge1",
        "le7.5",
        "Yes.No",
        "values.hate.pii",
        "operator.and.values.hate.pii",
        "operator.or.values.x",
    ] {
        let value = decode(tail).unwrap();
        assert_eq!(value.to_string(), tail, "canonical form of {tail}");
    }
}

#[test]
fn test_encode_integral_bounds_without_fraction() {
    let value = Constraint::Range(Range::between(1.0, 3.0));
    assert_eq!(value.to_string(), "ge1.le3");
}
