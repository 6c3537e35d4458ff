//! Line matchers for the analysis script output
//!
//! Each matcher is a pure function from a single line to an optional field
//! update. A matcher first checks for its marker substring and only then runs
//! its capture pattern, so most lines cost a handful of `contains` calls.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::Prediction;

pub const SLOPE_MARKER: &str = "Coeficiente (pendiente):";
pub const INTERCEPT_MARKER: &str = "Intercepción:";
pub const MSE_MARKER: &str = "Error cuadrático medio (MSE)";
pub const TIME_MARKER: &str = "Tiempo";
pub const PREDICTED_MARKER: &str = "Tendencia predicha =";
pub const DATA_POINTS_MARKER: &str = "Datos generados:";
pub const TRAINING_SIZE_MARKER: &str = "Tamaño del conjunto de entrenamiento:";
pub const TEST_SIZE_MARKER: &str = "Tamaño del conjunto de prueba:";

static SLOPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Coeficiente \(pendiente\): ([\d.-]+)").unwrap());

static INTERCEPT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Intercepción: ([\d.-]+)").unwrap());

static MSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Error cuadrático medio \(MSE\) en el conjunto de prueba: ([\d.-]+)").unwrap()
});

static PREDICTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Tiempo (\d+): Tendencia predicha = ([\d.-]+)").unwrap());

static DATA_POINTS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Datos generados: (\d+) puntos de tiempo").unwrap());

static TRAINING_SIZE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Tamaño del conjunto de entrenamiento: (\d+) muestras").unwrap()
});

static TEST_SIZE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Tamaño del conjunto de prueba: (\d+) muestras").unwrap());

/// A single assignment produced by one output line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldUpdate {
    Slope(f64),
    Intercept(f64),
    MeanSquaredError(f64),
    Prediction(Prediction),
    DataPoints(u64),
    TrainingSize(u64),
    TestSize(u64),
}

/// Signature shared by all matchers
pub type LineMatcher = fn(&str) -> Option<FieldUpdate>;

/// Every matcher, in the order they are tried against a line
pub const MATCHERS: [LineMatcher; 7] = [
    match_slope,
    match_intercept,
    match_mse,
    match_prediction,
    match_data_points,
    match_training_size,
    match_test_size,
];

/// First capture group of `re` in `line`, parsed as `T`
fn capture<T: std::str::FromStr>(re: &Regex, line: &str) -> Option<T> {
    re.captures(line)?.get(1)?.as_str().parse().ok()
}

pub fn match_slope(line: &str) -> Option<FieldUpdate> {
    if !line.contains(SLOPE_MARKER) {
        return None;
    }
    capture(&SLOPE_REGEX, line).map(FieldUpdate::Slope)
}

pub fn match_intercept(line: &str) -> Option<FieldUpdate> {
    if !line.contains(INTERCEPT_MARKER) {
        return None;
    }
    capture(&INTERCEPT_REGEX, line).map(FieldUpdate::Intercept)
}

pub fn match_mse(line: &str) -> Option<FieldUpdate> {
    if !line.contains(MSE_MARKER) {
        return None;
    }
    capture(&MSE_REGEX, line).map(FieldUpdate::MeanSquaredError)
}

pub fn match_prediction(line: &str) -> Option<FieldUpdate> {
    if !(line.contains(TIME_MARKER) && line.contains(PREDICTED_MARKER)) {
        return None;
    }
    let caps = PREDICTION_REGEX.captures(line)?;
    let time_index = caps.get(1)?.as_str().parse().ok()?;
    let predicted_value = caps.get(2)?.as_str().parse().ok()?;
    Some(FieldUpdate::Prediction(Prediction::new(
        time_index,
        predicted_value,
    )))
}

pub fn match_data_points(line: &str) -> Option<FieldUpdate> {
    if !line.contains(DATA_POINTS_MARKER) {
        return None;
    }
    capture(&DATA_POINTS_REGEX, line).map(FieldUpdate::DataPoints)
}

pub fn match_training_size(line: &str) -> Option<FieldUpdate> {
    if !line.contains(TRAINING_SIZE_MARKER) {
        return None;
    }
    capture(&TRAINING_SIZE_REGEX, line).map(FieldUpdate::TrainingSize)
}

pub fn match_test_size(line: &str) -> Option<FieldUpdate> {
    if !line.contains(TEST_SIZE_MARKER) {
        return None;
    }
    capture(&TEST_SIZE_REGEX, line).map(FieldUpdate::TestSize)
}
