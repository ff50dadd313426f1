//! CSV 내보내기 테스트.
use std::fs;
use std::path::PathBuf;

use capital_budgeting::budgeting::{evaluate_dcf, DiscountedCashFlowRow};
use capital_budgeting::config::Config;
use capital_budgeting::export::{
    default_export_path, export_discounted_cash_flows, ExportError, EXPORT_FILE_NAME,
};

#[test]
fn writes_header_and_two_decimal_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(EXPORT_FILE_NAME);
    let summary = evaluate_dcf(1000.0, &[400.0, 400.0, 400.0], 10.0).unwrap();

    let written = export_discounted_cash_flows(summary.rows(), &path).unwrap();
    assert_eq!(written, path);
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "Year,Discounted Cash Flow\n1,363.64\n2,330.58\n3,300.53\n"
    );
}

#[test]
fn empty_rows_write_nothing_and_warn() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(EXPORT_FILE_NAME);

    let err = export_discounted_cash_flows(&[], &path).unwrap_err();
    assert!(matches!(err, ExportError::NothingToExport));
    assert!(err.is_warning());
    assert!(!path.exists());
}

#[test]
fn creates_missing_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("out.csv");
    let rows = [DiscountedCashFlowRow {
        period: 1,
        value: -12.345,
    }];

    export_discounted_cash_flows(&rows, &path).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.ends_with("1,-12.35\n") || content.ends_with("1,-12.34\n"));
}

#[test]
fn configured_export_dir_wins() {
    let cfg = Config {
        export_dir: Some(PathBuf::from("/tmp/reports")),
        ..Config::default()
    };
    assert_eq!(
        default_export_path(&cfg),
        PathBuf::from("/tmp/reports").join(EXPORT_FILE_NAME)
    );
}

#[test]
fn default_path_uses_fixed_file_name() {
    let path = default_export_path(&Config::default());
    assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);
}
