//! End-to-end behavior of `TabularPreprocessor`.

use proptest::prelude::*;
use tabular_preprocessor::preprocessing::{OutputColumn, StandardScaler};
use tabular_preprocessor::{
    Column, FittedState, HandleUnknown, ImputeStrategy, PreprocessingError, PreprocessorConfig,
    SerializableParams, Table, TabularPreprocessor, Value,
};

fn numeric_output<'a>(out: &'a tabular_preprocessor::TransformedTable, name: &str) -> &'a [f64] {
    out.column(name)
        .and_then(OutputColumn::as_numeric)
        .unwrap_or_else(|| panic!("no numeric output column {:?}", name))
}

fn mean_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

fn people() -> Table {
    Table::new(vec![
        Column::new("age", [Some(25.0), Some(30.0), None, Some(41.0)]),
        Column::new("income", [Some(52_000.0), Some(48_500.0), Some(61_000.0), None]),
        Column::new("color", [Some("red"), Some("blue"), None, Some("red")]),
    ])
    .unwrap()
}

#[test]
fn test_no_missing_no_scaling_is_identity() {
    let table = Table::new(vec![
        Column::new("a", [1.5, -2.0, 7.25]),
        Column::new("b", [0.0, 10.0, 20.0]),
    ])
    .unwrap();

    let mut preprocessor = TabularPreprocessor::new(PreprocessorConfig::default().with_scaling(false));
    let out = preprocessor.fit_transform(&table).unwrap();

    assert_eq!(numeric_output(&out, "a"), &[1.5, -2.0, 7.25]);
    assert_eq!(numeric_output(&out, "b"), &[0.0, 10.0, 20.0]);
}

#[test]
fn test_scaling_standardizes_training_data() {
    let table = Table::new(vec![
        Column::new("x", [3.0, 9.0, 4.0, 12.0, 1.0]),
        Column::new("constant", [5.0, 5.0, 5.0, 5.0, 5.0]),
    ])
    .unwrap();

    let mut preprocessor = TabularPreprocessor::default();
    let out = preprocessor.fit_transform(&table).unwrap();

    let (mean, std) = mean_std(numeric_output(&out, "x"));
    assert!(mean.abs() < 1e-9);
    assert!((std - 1.0).abs() < 1e-9);

    assert_eq!(preprocessor.state().unwrap().scaling("constant"), Some((5.0, 1.0)));
    assert!(numeric_output(&out, "constant").iter().all(|v| v.abs() < 1e-12));
}

#[test]
fn test_transform_is_idempotent() {
    let mut preprocessor = TabularPreprocessor::default();
    preprocessor.fit(&people()).unwrap();

    let first = preprocessor.transform(&people()).unwrap();
    let second = preprocessor.transform(&people()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unseen_category_encodes_as_zeros() {
    let train = Table::new(vec![Column::new("color", ["red", "blue"])]).unwrap();
    let test = Table::new(vec![Column::new("color", ["green"])]).unwrap();

    let mut preprocessor = TabularPreprocessor::default();
    preprocessor.fit(&train).unwrap();
    let out = preprocessor.transform(&test).unwrap();

    assert_eq!(numeric_output(&out, "color_red"), &[0.0]);
    assert_eq!(numeric_output(&out, "color_blue"), &[0.0]);
}

#[test]
fn test_unseen_category_errors_when_configured() {
    let train = Table::new(vec![Column::new("color", ["red", "blue"])]).unwrap();
    let test = Table::new(vec![Column::new("color", ["green"])]).unwrap();

    let config = PreprocessorConfig::default().with_handle_unknown(HandleUnknown::Error);
    let mut preprocessor = TabularPreprocessor::new(config);
    preprocessor.fit(&train).unwrap();

    match preprocessor.transform(&test) {
        Err(PreprocessingError::UnknownCategory { column, value }) => {
            assert_eq!(column, "color");
            assert_eq!(value, "green");
        }
        other => panic!("expected UnknownCategory, got {:?}", other),
    }
}

#[test]
fn test_mean_imputation() {
    let table = Table::new(vec![Column::new("age", [Some(25.0), Some(30.0), None])]).unwrap();

    let config = PreprocessorConfig::default()
        .with_strategy(ImputeStrategy::Mean)
        .with_scaling(false);
    let mut preprocessor = TabularPreprocessor::new(config);
    let out = preprocessor.fit_transform(&table).unwrap();

    assert_eq!(numeric_output(&out, "age")[2], 27.5);
}

#[test]
fn test_extreme_values_stay_finite() {
    let table = Table::new(vec![
        Column::new("constant", [f64::MAX; 3]),
        Column::new("gappy", [Some(f64::MAX), Some(f64::MAX), None]),
    ])
    .unwrap();

    let mut preprocessor = TabularPreprocessor::default();
    let out = preprocessor.fit_transform(&table).unwrap();

    assert_eq!(numeric_output(&out, "constant"), &[0.0, 0.0, 0.0]);
    assert_eq!(numeric_output(&out, "gappy"), &[0.0, 0.0, 0.0]);
    assert_eq!(
        preprocessor.state().unwrap().imputation_statistic("gappy"),
        Some(f64::MAX)
    );
}

#[test]
fn test_median_and_most_frequent_imputation() {
    let table = Table::new(vec![Column::new(
        "rooms",
        [Some(2.0), Some(3.0), Some(3.0), Some(10.0), None],
    )])
    .unwrap();

    for (strategy, expected) in [
        (ImputeStrategy::Median, 3.0),
        (ImputeStrategy::MostFrequent, 3.0),
        (ImputeStrategy::Constant(-1.0), -1.0),
    ] {
        let config = PreprocessorConfig::default()
            .with_strategy(strategy)
            .with_scaling(false);
        let state = TabularPreprocessor::new(config).fit_state(&table).unwrap();
        assert_eq!(state.imputation_statistic("rooms"), Some(expected));
    }
}

#[test]
fn test_missing_required_column_is_schema_mismatch() {
    let train = Table::new(vec![
        Column::new("age", [20.0, 30.0]),
        Column::new("income", [1.0, 2.0]),
    ])
    .unwrap();
    let test = Table::new(vec![Column::new("age", [25.0])]).unwrap();

    let mut preprocessor = TabularPreprocessor::default();
    preprocessor.fit(&train).unwrap();

    match preprocessor.transform(&test) {
        Err(PreprocessingError::SchemaMismatch { missing }) => {
            assert_eq!(missing, vec!["income".to_string()]);
        }
        other => panic!("expected SchemaMismatch, got {:?}", other),
    }
}

#[test]
fn test_transform_before_fit_is_not_fitted() {
    let preprocessor = TabularPreprocessor::default();
    assert!(matches!(
        preprocessor.transform(&people()),
        Err(PreprocessingError::NotFitted)
    ));
}

#[test]
fn test_fit_rejects_empty_dataset() {
    let empty = Table::new(vec![Column::new("age", Vec::<f64>::new())]).unwrap();
    let mut preprocessor = TabularPreprocessor::default();
    assert!(matches!(
        preprocessor.fit(&empty),
        Err(PreprocessingError::EmptyDataset(_))
    ));
    assert!(!preprocessor.is_fitted());
}

#[test]
fn test_table_rejects_ragged_columns() {
    let result = Table::new(vec![
        Column::new("a", [1.0, 2.0]),
        Column::new("b", [1.0]),
    ]);
    assert!(matches!(result, Err(PreprocessingError::InvalidInput(_))));
}

#[test]
fn test_output_preserves_row_count_and_order() {
    let mut preprocessor = TabularPreprocessor::new(PreprocessorConfig::default().with_scaling(false));
    preprocessor.fit(&people()).unwrap();

    let test = Table::new(vec![
        Column::new("color", [Value::from("blue"), Value::Missing, Value::from("red")]),
        Column::new("income", [1.0, 2.0, 3.0]),
        Column::new("age", [Value::Missing, Value::from(50.0), Value::from(60.0)]),
    ])
    .unwrap();
    let out = preprocessor.transform(&test).unwrap();

    assert_eq!(out.n_rows(), 3);
    assert_eq!(
        out.feature_names().unwrap(),
        ["age", "income", "color_blue", "color_red"]
    );
    // Missing age takes the fitted mean of [25, 30, 41]
    assert_eq!(numeric_output(&out, "age"), &[32.0, 50.0, 60.0]);
    // Missing color takes the fitted mode "red"
    assert_eq!(numeric_output(&out, "color_red"), &[0.0, 1.0, 1.0]);
}

#[test]
fn test_transform_accepts_different_row_count() {
    let mut preprocessor = TabularPreprocessor::default();
    preprocessor.fit(&people()).unwrap();

    let single = Table::new(vec![
        Column::new("age", [33.0]),
        Column::new("income", [50_000.0]),
        Column::new("color", ["blue"]),
    ])
    .unwrap();
    let out = preprocessor.transform(&single).unwrap();
    assert_eq!(out.to_array2().unwrap().shape(), &[1, 4]);
}

#[test]
fn test_duplicate_feature_names_fall_back_to_unnamed_output() {
    let table = Table::new(vec![
        Column::new("color_red", [0.5, 1.5]),
        Column::new("color", ["red", "blue"]),
    ])
    .unwrap();

    let mut preprocessor = TabularPreprocessor::default();
    let out = preprocessor.fit_transform(&table).unwrap();

    assert!(out.feature_names().is_none());
    assert_eq!(out.n_columns(), 3);
    assert_eq!(out.to_array2().unwrap().shape(), &[2, 3]);
}

#[test]
fn test_fitted_state_round_trips_through_bytes() {
    let mut preprocessor = TabularPreprocessor::default();
    let expected = preprocessor.fit_transform(&people()).unwrap();

    let bytes = preprocessor.state().unwrap().to_bytes().unwrap();
    let state = FittedState::from_bytes(&bytes).unwrap();
    assert_eq!(Some(&state), preprocessor.state());

    let restored = TabularPreprocessor::from_state(state);
    assert_eq!(restored.transform(&people()).unwrap(), expected);
}

#[test]
fn test_config_from_json_drives_fit() {
    let config = PreprocessorConfig::from_json(
        r#"{
            "strategy": "median",
            "scale": false,
            "encode": false,
            "numeric_columns": ["age"],
            "categorical_columns": ["color"]
        }"#,
    )
    .unwrap();

    let mut preprocessor = TabularPreprocessor::new(config);
    let out = preprocessor.fit_transform(&people()).unwrap();

    assert_eq!(out.feature_names().unwrap(), ["age", "color"]);
    assert_eq!(numeric_output(&out, "age")[2], 30.0);
    assert_eq!(
        out.column("color").and_then(OutputColumn::as_text).unwrap()[2],
        "red"
    );
    assert!(matches!(
        out.to_array2(),
        Err(PreprocessingError::InvalidInput(_))
    ));
}

#[test]
fn test_building_blocks_agree_with_preprocessor() {
    use tabular_preprocessor::preprocessing::{ColumnBlock, Transformer};

    let block = ColumnBlock::new(vec!["x".to_string()], vec![vec![1.0, 2.0, 6.0]]).unwrap();
    let scaled = StandardScaler::new().fit_transform(&block).unwrap();

    let table = Table::new(vec![Column::new("x", [1.0, 2.0, 6.0])]).unwrap();
    let out = TabularPreprocessor::default().fit_state(&table).unwrap().transform(&table).unwrap();

    assert_eq!(numeric_output(&out, "x"), scaled.columns()[0].as_slice());
}

fn finite_column() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::weighted(0.8, -1.0e6..1.0e6f64), 2..40)
}

proptest! {
    #[test]
    fn prop_transform_is_deterministic(values in finite_column()) {
        prop_assume!(values.iter().any(Option::is_some));
        let table = Table::new(vec![Column::new("x", values)]).unwrap();

        let mut preprocessor = TabularPreprocessor::default();
        preprocessor.fit(&table).unwrap();
        prop_assert_eq!(
            preprocessor.transform(&table).unwrap(),
            preprocessor.transform(&table).unwrap()
        );
    }

    #[test]
    fn prop_scaled_output_is_standardized(values in prop::collection::vec(-1.0e3..1.0e3f64, 2..40)) {
        let (_, raw_std) = mean_std(&values);
        prop_assume!(raw_std > 1e-1);

        let table = Table::new(vec![Column::new("x", values)]).unwrap();
        let mut preprocessor = TabularPreprocessor::default();
        let out = preprocessor.fit_transform(&table).unwrap();

        let (mean, std) = mean_std(numeric_output(&out, "x"));
        prop_assert!(mean.abs() < 1e-6);
        prop_assert!((std - 1.0).abs() < 1e-6);
    }

    #[test]
    fn prop_one_hot_rows_sum_to_at_most_one(
        train in prop::collection::vec("[a-d]", 1..20),
        test in prop::collection::vec("[a-f]", 1..20),
    ) {
        let mut preprocessor = TabularPreprocessor::default();
        preprocessor
            .fit(&Table::new(vec![Column::new("c", train.clone())]).unwrap())
            .unwrap();
        let out = preprocessor
            .transform(&Table::new(vec![Column::new("c", test.clone())]).unwrap())
            .unwrap();

        let matrix = out.to_array2().unwrap();
        for (row, value) in test.iter().enumerate() {
            let sum: f64 = matrix.row(row).sum();
            let expected = if train.contains(value) { 1.0 } else { 0.0 };
            prop_assert_eq!(sum, expected);
        }
    }
}
