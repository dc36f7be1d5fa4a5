//! House price features: mixed-type preprocessing end to end.
//!
//! - Column `sqft`: numeric, needs scaling
//! - Column `bedrooms`: numeric, has missing values
//! - Column `neighborhood`: categorical, one-hot encoded
//! - Column `condition`: categorical with a missing value
//!
//! Run with: RUST_LOG=debug cargo run --example house_prices

use std::error::Error;
use tabular_preprocessor::preprocessing::OutputColumn;
use tabular_preprocessor::{
    Column, FittedState, ImputeStrategy, PreprocessorConfig, SerializableParams, Table,
    TabularPreprocessor,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== House Price Preprocessing ===\n");

    // 1. Training data with missing values
    let train = Table::new(vec![
        Column::new(
            "sqft",
            [1500.0, 2000.0, 1200.0, 1800.0, 2200.0, 1100.0, 2500.0, 1400.0],
        ),
        Column::new(
            "bedrooms",
            [Some(3.0), Some(4.0), Some(2.0), None, Some(4.0), Some(2.0), Some(5.0), None],
        ),
        Column::new(
            "neighborhood",
            ["downtown", "suburban", "rural", "downtown", "suburban", "rural", "downtown", "suburban"],
        ),
        Column::new(
            "condition",
            [Some("good"), Some("excellent"), Some("fair"), Some("excellent"), Some("good"), None, Some("excellent"), Some("fair")],
        ),
    ])?;
    println!("Training data: {} rows", train.columns()[0].len());

    // 2. Configure and fit
    let config = PreprocessorConfig::default().with_strategy(ImputeStrategy::Median);
    let mut preprocessor = TabularPreprocessor::new(config);
    preprocessor.fit(&train)?;

    let state = preprocessor.state().ok_or("preprocessor is not fitted")?;
    println!("\nLearned parameters:");
    println!("  bedrooms fill value: {:?}", state.imputation_statistic("bedrooms"));
    println!("  sqft (mean, std):    {:?}", state.scaling("sqft"));
    println!("  condition mode:      {:?}", state.mode("condition"));
    println!("  neighborhoods:       {:?}", state.vocabulary("neighborhood"));

    // 3. Transform the training data
    let out = preprocessor.transform(&train)?;
    println!("\nOutput features: {:?}", out.feature_names());
    let matrix = out.to_array2()?;
    println!("Output matrix shape: {:?}", matrix.shape());

    // 4. Round-trip the fitted state through bytes
    let bytes = state.to_bytes()?;
    println!("\nFitted state encoded into {} bytes", bytes.len());
    let restored = TabularPreprocessor::from_state(FittedState::from_bytes(&bytes)?);

    // 5. Inference on new data, including an unseen neighborhood
    let new_houses = Table::new(vec![
        Column::new("neighborhood", ["rural", "harbor"]),
        Column::new("sqft", [1300.0, 2100.0]),
        Column::new("bedrooms", [None, Some(3.0)]),
        Column::new("condition", ["good", "poor"]),
    ])?;
    let predicted = restored.transform(&new_houses)?;

    println!("\nNew houses:");
    let names = predicted.feature_names().unwrap_or_default();
    for (name, column) in names.iter().zip(predicted.columns()) {
        if let OutputColumn::Numeric(values) = column {
            println!("  {:<24} {:?}", name, values);
        }
    }

    println!("\n=== Done ===");
    Ok(())
}
