use super::*;
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use std::collections::BTreeMap;
use std::sync::Arc;

fn table() -> RecordBatch {
    let schema = Schema::new(vec![
        Field::new("income", DataType::Float64, true),
        Field::new("zip", DataType::Utf8, true),
        Field::new("comment", DataType::Utf8, true),
        Field::new("label", DataType::Utf8, true),
    ]);
    RecordBatch::try_new(
        Arc::new(schema),
        vec![
            Arc::new(Float64Array::from(vec![1200.0, 3400.5])),
            Arc::new(StringArray::from(vec!["75001", "10115"])),
            Arc::new(StringArray::from(vec!["fine", "late payment"])),
            Arc::new(StringArray::from(vec!["ok", "default"])),
        ],
    )
    .unwrap()
}

fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn valid_dataset() -> Dataset {
    Dataset::new(table())
        .with_name("loans")
        .with_target("label")
        .with_feature_types(map(&[
            ("income", "numeric"),
            ("zip", "category"),
            ("comment", "text"),
        ]))
        .with_column_types(map(&[
            ("income", "float64"),
            ("zip", "object"),
            ("comment", "object"),
            ("label", "object"),
        ]))
}

fn status_of<'a>(report: &'a ValidationReport, name: &str) -> &'a CheckStatus {
    &report
        .checks
        .iter()
        .find(|c| c.name == name)
        .unwrap()
        .status
}

#[test]
fn test_valid_dataset_passes() {
    let report = check_dataset(&valid_dataset());
    assert!(!report.has_failures(), "{}", report);
    assert!(!report.has_warnings(), "{}", report);
    assert_eq!(report.subject, "loans");
    assert!(SchemaValidator.validate(&valid_dataset()).is_ok());
}

#[test]
fn test_unknown_target_fails() {
    let dataset = valid_dataset().with_target("churn");
    let report = check_dataset(&dataset);
    assert!(matches!(status_of(&report, "Target column"), CheckStatus::Failed(_)));
    assert!(matches!(
        SchemaValidator.validate(&dataset),
        Err(ValidationError::Invalid(_))
    ));
}

#[test]
fn test_feature_not_in_table_fails() {
    let dataset = valid_dataset().with_feature_types(map(&[("age", "numeric")]));
    let report = check_dataset(&dataset);
    assert!(matches!(status_of(&report, "Feature columns"), CheckStatus::Failed(_)));
}

#[test]
fn test_unsupported_feature_type_fails() {
    let dataset = valid_dataset().with_feature_types(map(&[("zip", "ordinal")]));
    let report = check_dataset(&dataset);
    match status_of(&report, "Feature types") {
        CheckStatus::Failed(msg) => assert!(msg.contains("zip=ordinal")),
        other => panic!("unexpected status: {other:?}"),
    }
}

#[test]
fn test_bad_column_types_fail() {
    let dataset = valid_dataset().with_column_types(map(&[("zip", "complex128"), ("ghost", "int64")]));
    let report = check_dataset(&dataset);
    match status_of(&report, "Column types") {
        CheckStatus::Failed(msg) => {
            assert!(msg.contains("ghost"));
            assert!(msg.contains("complex128"));
        }
        other => panic!("unexpected status: {other:?}"),
    }
}

#[test]
fn test_numeric_text_feature_is_accepted() {
    let dataset = valid_dataset().with_feature_types(map(&[
        ("income", "numeric"),
        ("zip", "numeric"),
        ("comment", "text"),
    ]));
    let report = check_dataset(&dataset);
    assert_eq!(status_of(&report, "Numeric features"), &CheckStatus::Ok);
}

#[test]
fn test_non_numeric_feature_fails() {
    let dataset = valid_dataset().with_feature_types(map(&[
        ("income", "numeric"),
        ("zip", "category"),
        ("comment", "numeric"),
    ]));
    let report = check_dataset(&dataset);
    match status_of(&report, "Numeric features") {
        CheckStatus::Failed(msg) => assert!(msg.contains("comment")),
        other => panic!("unexpected status: {other:?}"),
    }
}

#[test]
fn test_uncovered_columns_warn_only() {
    let dataset = valid_dataset().with_feature_types(map(&[("income", "numeric")]));
    let report = check_dataset(&dataset);

    assert!(!report.has_failures());
    match status_of(&report, "Feature coverage") {
        CheckStatus::Warning(msg) => {
            assert!(msg.contains("zip"));
            assert!(msg.contains("comment"));
            assert!(!msg.contains("label"));
        }
        other => panic!("unexpected status: {other:?}"),
    }
    assert!(SchemaValidator.validate(&dataset).is_ok());
}

#[test]
fn test_report_display() {
    let mut report = ValidationReport::new("demo");
    report.add_check(ValidationCheck::ok("Check 1"));
    report.add_check(ValidationCheck::warning("Check 2", "careful"));
    report.add_check(ValidationCheck::failed("Check 3", "broken"));

    let output = format!("{}", report);
    assert!(output.contains("[OK] Check 1"));
    assert!(output.contains("[WARN] Check 2 - careful"));
    assert!(output.contains("[FAIL] Check 3 - broken"));
    assert!(output.contains("1 passed, 1 warnings, 1 failed"));
    assert!(output.contains("Validation FAILED"));
    assert_eq!(report.failure_summary(), "Check 3: broken");
}

#[test]
fn test_feature_type_parsing() {
    assert_eq!("numeric".parse::<FeatureType>(), Ok(FeatureType::Numeric));
    assert_eq!(FeatureType::Category.to_string(), "category");
    assert!("Numeric".parse::<FeatureType>().is_err());
}
