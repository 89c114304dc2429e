//! Published shape of an aggregation.
//!
//! Field names serialize to the camelCase keys the dashboard charts read;
//! the per-sequence records keep their snake_case keys.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::mock::ModelPerformance;

/// One valid input row, summarised.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceSummary {
    /// `SEQ<n>`, n being the 1-based position among non-blank data lines.
    pub id: String,
    pub sequence: String,
    pub gc_content: f64,
    #[serde(serialize_with = "offsets_as_strings")]
    pub mutations: Vec<usize>,
    pub risk_score: f64,
}

fn offsets_as_strings<S: Serializer>(offsets: &[usize], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(offsets.iter().map(|o| o.to_string()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMetric {
    pub count: usize,
    pub avg_risk: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetrics {
    pub total_samples: usize,
    pub disease_counts: IndexMap<String, f64>,
    pub location_metrics: IndexMap<String, LocationMetric>,
    pub model_performance: Vec<ModelPerformance>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseCount {
    pub disease: String,
    pub count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionRisk {
    pub region: String,
    pub risk: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterAverage {
    pub parameter: String,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelAccuracy {
    pub model: String,
    pub accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimePoint {
    pub year: i32,
    pub cases: f64,
}

/// Everything the dashboard charts consume.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedResult {
    pub metrics: AnalysisMetrics,
    pub sequences: Vec<SequenceSummary>,
    pub disease_distribution: Vec<DiseaseCount>,
    pub location_risk: Vec<RegionRisk>,
    pub parameter_averages: Vec<ParameterAverage>,
    pub model_accuracy: Vec<ModelAccuracy>,
    pub time_series_data: Vec<TimePoint>,
}

impl ProcessedResult {
    /// The "no data" value: every collection empty, every count zero.
    pub fn empty() -> Self {
        ProcessedResult::default()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.total_samples == 0
            && self.sequences.is_empty()
            && self.disease_distribution.is_empty()
            && self.location_risk.is_empty()
            && self.parameter_averages.is_empty()
            && self.model_accuracy.is_empty()
            && self.time_series_data.is_empty()
            && self.metrics.model_performance.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_serializes_to_empty_schema() {
        let value = serde_json::to_value(ProcessedResult::empty()).unwrap();
        assert_eq!(
            value,
            json!({
                "metrics": {
                    "totalSamples": 0,
                    "diseaseCounts": {},
                    "locationMetrics": {},
                    "modelPerformance": []
                },
                "sequences": [],
                "diseaseDistribution": [],
                "locationRisk": [],
                "parameterAverages": [],
                "modelAccuracy": [],
                "timeSeriesData": []
            })
        );
        assert!(ProcessedResult::empty().is_empty());
    }

    #[test]
    fn test_sequence_summary_keys_and_mutations() {
        let summary = SequenceSummary {
            id: "SEQ1".to_string(),
            sequence: "ATCGATCG".to_string(),
            gc_content: 0.5,
            mutations: vec![2, 3, 4],
            risk_score: 26.5,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["mutations"], json!(["2", "3", "4"]));
        assert_eq!(value["gc_content"], json!(0.5));
        assert_eq!(value["risk_score"], json!(26.5));
    }

    #[test]
    fn test_nan_serializes_as_null() {
        let risk = RegionRisk {
            region: "Delhi".to_string(),
            risk: f64::NAN,
        };
        let value = serde_json::to_value(&risk).unwrap();
        assert!(value["risk"].is_null());
    }

    #[test]
    fn test_location_metric_keys() {
        let value = serde_json::to_value(LocationMetric {
            count: 2,
            avg_risk: 0.25,
        })
        .unwrap();
        assert_eq!(value, json!({ "count": 2, "avgRisk": 0.25 }));
    }
}
