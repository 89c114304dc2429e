//! Per-row analysis and the accumulator fold.
//!
//! Rows are analysed independently (and may be analysed in parallel), then
//! folded left to right into [`Accumulators`]. Each fold step consumes the
//! accumulator and returns the updated one, so nothing else can observe a
//! half-updated state.

use indexmap::IndexMap;

use super::result::{
    AnalysisMetrics, DiseaseCount, LocationMetric, ModelAccuracy, ParameterAverage,
    ProcessedResult, RegionRisk, SequenceSummary, TimePoint,
};
use super::row::CsvRow;
use crate::bio::{self, Disease};
use crate::config::AggregatorConfig;
use crate::mock;

/// The three synthetic parameter series, in publication order.
pub const PARAMETER_NAMES: [&str; 3] = ["DNA Mutation Rate", "Gene Expression", "Biomarker Level"];

/// A parsed row with its derived statistics attached.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedRow {
    pub summary: SequenceSummary,
    pub disease: String,
    pub location: String,
    /// Parameter-based risk averaged per location. Unrelated to `summary.risk_score`.
    pub location_risk: f64,
    /// Disease-adjusted values, one per entry of [`PARAMETER_NAMES`].
    pub parameter_values: [f64; 3],
}

/// `((p1 * 1.2) + (p2 * 0.8) + (p3 * 1.5)) * severity / 3.5`
pub fn location_risk(params: &[f64; 3], disease: Disease) -> f64 {
    (params[0] * 1.2 + params[1] * 0.8 + params[2] * 1.5) * disease.severity() / 3.5
}

pub fn analyze_row(row: &CsvRow, reference: &str) -> AnalyzedRow {
    let disease = Disease::from_label(&row.disease);
    let stats = bio::analyze_sequence(&row.sequence, reference);
    let risk_score = bio::risk_score(stats.gc_content, stats.mutations.len(), disease);

    AnalyzedRow {
        summary: SequenceSummary {
            id: format!("SEQ{}", row.index),
            sequence: row.sequence.clone(),
            gc_content: stats.gc_content,
            mutations: stats.mutations,
            risk_score,
        },
        disease: row.disease.clone(),
        location: row.location.clone(),
        location_risk: location_risk(&row.params, disease),
        parameter_values: [
            row.params[0] * disease.parameter_multiplier(),
            row.params[1] * 1.2,
            row.params[2] * 0.9,
        ],
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationAccumulator {
    pub risks: Vec<f64>,
    pub count: usize,
}

impl LocationAccumulator {
    fn average(&self) -> f64 {
        mean(&self.risks)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accumulators {
    /// Disease label to running sum of disease weights.
    pub diseases: IndexMap<String, f64>,
    pub locations: IndexMap<String, LocationAccumulator>,
    pub parameters: IndexMap<&'static str, Vec<f64>>,
    pub sequences: Vec<SequenceSummary>,
}

impl Accumulators {
    /// Folds one analysed row in.
    pub fn absorb(mut self, row: AnalyzedRow) -> Self {
        let weight = Disease::from_label(&row.disease).weight();
        *self.diseases.entry(row.disease).or_insert(0.0) += weight;

        let location = self.locations.entry(row.location).or_default();
        location.risks.push(row.location_risk);
        location.count += 1;

        for (name, value) in PARAMETER_NAMES.iter().zip(row.parameter_values) {
            self.parameters.entry(*name).or_default().push(value);
        }

        self.sequences.push(row.summary);
        self
    }

    /// Converts the accumulators to the published result.
    pub fn finish(self, config: &AggregatorConfig) -> ProcessedResult {
        let total_samples = self.sequences.len();
        let model_performance = mock::model_performance();

        let disease_distribution: Vec<DiseaseCount> = self
            .diseases
            .iter()
            .map(|(disease, count)| DiseaseCount {
                disease: disease.clone(),
                count: *count,
            })
            .collect();

        let location_risk = self
            .locations
            .iter()
            .map(|(region, acc)| RegionRisk {
                region: region.clone(),
                risk: acc.average(),
            })
            .collect();

        let location_metrics = self
            .locations
            .iter()
            .map(|(region, acc)| {
                (
                    region.clone(),
                    LocationMetric {
                        count: acc.count,
                        avg_risk: acc.average(),
                    },
                )
            })
            .collect();

        let parameter_averages = self
            .parameters
            .iter()
            .map(|(name, values)| ParameterAverage {
                parameter: name.to_string(),
                average: mean(values),
            })
            .collect();

        let model_accuracy = model_performance
            .iter()
            .map(|m| ModelAccuracy {
                model: m.model.clone(),
                accuracy: m.overall_accuracy,
            })
            .collect();

        // One point per distinct disease; only the index and the sample
        // count feed into it.
        let time_series_data = (0..self.diseases.len())
            .map(|i| TimePoint {
                year: config.time_series_base_year + i as i32,
                cases: total_samples as f64 * (1.0 + i as f64 * 0.1),
            })
            .collect();

        ProcessedResult {
            metrics: AnalysisMetrics {
                total_samples,
                disease_counts: self.diseases,
                location_metrics,
                model_performance,
            },
            sequences: self.sequences,
            disease_distribution,
            location_risk,
            parameter_averages,
            model_accuracy,
            time_series_data,
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
