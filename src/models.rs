//! Core data structures for trend reports
//!
//! Every value here is built fresh for a single request and dropped once the
//! response is serialized. Field names on the wire follow the JSON consumed by
//! the storefront's predictive trends panel.

use serde::{Deserialize, Serialize};

/// Dataset sizes reported by the analysis process
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSummary {
    /// Number of generated time points
    #[serde(rename = "dataPoints", skip_serializing_if = "Option::is_none")]
    pub data_point_count: Option<u64>,

    /// Samples used to fit the model
    #[serde(rename = "trainingSize", skip_serializing_if = "Option::is_none")]
    pub training_sample_count: Option<u64>,

    /// Samples held out for evaluation
    #[serde(rename = "testSize", skip_serializing_if = "Option::is_none")]
    pub test_sample_count: Option<u64>,
}

/// Parameters of the fitted linear model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slope: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub intercept: Option<f64>,

    /// Mean squared error on the test set
    #[serde(rename = "mse", skip_serializing_if = "Option::is_none")]
    pub mean_squared_error: Option<f64>,
}

/// A single forecast point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "time")]
    pub time_index: u32,

    #[serde(rename = "predictedValue")]
    pub predicted_value: f64,
}

impl Prediction {
    #[must_use]
    pub fn new(time_index: u32, predicted_value: f64) -> Self {
        Self {
            time_index,
            predicted_value,
        }
    }
}

/// Structured fields extracted from the analysis output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendResults {
    pub summary: TrendSummary,

    /// Forecasts in the order they appeared in the output
    pub predictions: Vec<Prediction>,

    #[serde(rename = "modelInfo")]
    pub model_info: ModelInfo,
}

/// Response envelope returned by the bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub success: bool,

    /// Verbatim standard output of the analysis process
    #[serde(rename = "output")]
    pub raw_output: String,

    pub results: TrendResults,

    /// Set only on simulated payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TrendReport {
    /// Build a successful report from raw output and its parsed fields
    #[must_use]
    pub fn new(raw_output: impl Into<String>, results: TrendResults) -> Self {
        Self {
            success: true,
            raw_output: raw_output.into(),
            results,
            note: None,
        }
    }

    /// Attach an informational note
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_are_omitted() {
        let report = TrendReport::new("", TrendResults::default());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["results"]["summary"], serde_json::json!({}));
        assert_eq!(json["results"]["modelInfo"], serde_json::json!({}));
        assert_eq!(json["results"]["predictions"], serde_json::json!([]));
        assert!(json.get("note").is_none());
    }

    #[test]
    fn test_wire_field_names() {
        let results = TrendResults {
            summary: TrendSummary {
                data_point_count: Some(100),
                training_sample_count: Some(80),
                test_sample_count: Some(20),
            },
            predictions: vec![Prediction::new(101, 227.38)],
            model_info: ModelInfo {
                slope: Some(2.15),
                intercept: Some(10.23),
                mean_squared_error: Some(225.67),
            },
        };
        let report = TrendReport::new("raw", results).with_note("simulated");
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["output"], "raw");
        assert_eq!(json["note"], "simulated");
        assert_eq!(json["results"]["summary"]["dataPoints"], 100);
        assert_eq!(json["results"]["summary"]["trainingSize"], 80);
        assert_eq!(json["results"]["summary"]["testSize"], 20);
        assert_eq!(json["results"]["modelInfo"]["mse"], 225.67);
        assert_eq!(json["results"]["predictions"][0]["time"], 101);
        assert_eq!(json["results"]["predictions"][0]["predictedValue"], 227.38);
    }

    #[test]
    fn test_report_deserializes_from_wire_format() {
        let body = r#"{
            "success": true,
            "output": "x",
            "results": {
                "summary": {"dataPoints": 3},
                "predictions": [{"time": 4, "predictedValue": 1.5}],
                "modelInfo": {"slope": 0.5}
            }
        }"#;
        let report: TrendReport = serde_json::from_str(body).unwrap();

        assert_eq!(report.results.summary.data_point_count, Some(3));
        assert_eq!(report.results.summary.training_sample_count, None);
        assert_eq!(report.results.predictions, vec![Prediction::new(4, 1.5)]);
        assert_eq!(report.results.model_info.slope, Some(0.5));
        assert!(report.note.is_none());
    }
}
