//! Extraction of structured results from analysis output
//!
//! Parsing is best-effort: unknown lines are ignored and values that fail to
//! convert leave their field empty. It never fails.

pub mod matchers;

use crate::models::TrendResults;

pub use matchers::{FieldUpdate, LineMatcher, MATCHERS};

/// Parse the full standard output of the analysis process
///
/// Lines are scanned once, top to bottom. Scalar fields take the value of the
/// last line that matched them; predictions keep their source order.
///
/// # Example
///
/// ```
/// use asgard_trends::parser::parse_output;
///
/// let results = parse_output("Coeficiente (pendiente): 2.15\nTiempo 101: Tendencia predicha = 227.38");
/// assert_eq!(results.model_info.slope, Some(2.15));
/// assert_eq!(results.predictions.len(), 1);
/// ```
#[must_use]
pub fn parse_output(output: &str) -> TrendResults {
    let mut results = TrendResults::default();

    for line in output.lines() {
        if let Some(update) = match_line(line) {
            apply(&mut results, update);
        }
    }

    results
}

/// Run the matchers against one line, returning the first hit
#[must_use]
pub fn match_line(line: &str) -> Option<FieldUpdate> {
    MATCHERS.iter().find_map(|matcher| matcher(line))
}

/// Assign a single update into `results`
pub fn apply(results: &mut TrendResults, update: FieldUpdate) {
    match update {
        FieldUpdate::Slope(v) => results.model_info.slope = Some(v),
        FieldUpdate::Intercept(v) => results.model_info.intercept = Some(v),
        FieldUpdate::MeanSquaredError(v) => results.model_info.mean_squared_error = Some(v),
        FieldUpdate::Prediction(p) => results.predictions.push(p),
        FieldUpdate::DataPoints(n) => results.summary.data_point_count = Some(n),
        FieldUpdate::TrainingSize(n) => results.summary.training_sample_count = Some(n),
        FieldUpdate::TestSize(n) => results.summary.test_sample_count = Some(n),
    }
}
