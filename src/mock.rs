//! Shared mock tables for the dashboard.
//!
//! Every hardcoded number the dashboard shows lives here, so the aggregator
//! and the CLI views read a single copy. The random generators take an
//! `Rng` so callers can seed them.

use indexmap::IndexMap;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;

use crate::bio::{Disease, CANONICAL_BASES};

/// Accuracy summary for one model, with per-disease breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPerformance {
    pub model: String,
    pub overall_accuracy: f64,
    pub disease_specific: IndexMap<String, f64>,
}

/// Mock classifier scores, as shown by the model selector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelScores {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub scores: ModelScores,
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelValue {
    pub label: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseReport {
    pub name: &'static str,
    pub dna_sequence: &'static str,
    pub probability: u32,
    pub time_until_increase: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionCases {
    pub region: &'static str,
    pub disease: &'static str,
    pub cases: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CityCoordinates {
    pub city: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearCases {
    pub year: i32,
    pub cases: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusterPoint {
    pub x: f64,
    pub y: f64,
    pub cluster: &'static str,
}

/// Everything the visualization pages draw, static and random parts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMock {
    pub model_accuracy: Vec<LabelValue>,
    pub region_risk: Vec<LabelValue>,
    pub feature_importance: Vec<LabelValue>,
    pub radar_metrics: Vec<LabelValue>,
    pub disease_reports: Vec<DiseaseReport>,
    pub top_regions: Vec<RegionCases>,
    pub cities: Vec<CityCoordinates>,
    pub time_series: Vec<YearCases>,
    pub clusters: Vec<ClusterPoint>,
    pub confidence: Vec<f64>,
}

/// Locations used when generating mock rows.
pub const REGIONS: [&str; 5] = ["Delhi", "Mumbai", "Bangalore", "Hyderabad", "Chennai"];

// (model, overall, [Cancer, Alzheimer's, Cystic Fibrosis, Sickle Cell])
const PERFORMANCE: [(&str, f64, [f64; 4]); 2] = [
    ("SVM", 92.0, [94.0, 91.0, 89.0, 88.0]),
    ("Random Forest", 89.0, [91.0, 88.0, 87.0, 86.0]),
];

const CATALOG: [(&str, &str, f64, f64, f64); 9] = [
    ("svm", "Support Vector Machine (SVM)", 0.92, 0.93, 0.91),
    ("knn", "K-Nearest Neighbors (KNN)", 0.85, 0.86, 0.84),
    ("naive-bayes", "Naive Bayes", 0.80, 0.81, 0.79),
    ("cnn", "Convolutional Neural Network (CNN)", 0.95, 0.96, 0.94),
    ("lstm", "Long Short-Term Memory (LSTM)", 0.96, 0.97, 0.95),
    ("hmm", "Hidden Markov Model (HMM)", 0.78, 0.79, 0.77),
    ("bayesian", "Bayesian Model", 0.82, 0.83, 0.81),
    ("dbscan", "DBSCAN Clustering", 0.75, 0.76, 0.74),
    ("hybrid", "Hybrid (SVM+CNN+HMM)", 0.97, 0.98, 0.96),
];

/// Static model performance table published with every aggregation result.
pub fn model_performance() -> Vec<ModelPerformance> {
    PERFORMANCE
        .iter()
        .map(|(model, overall, per_disease)| ModelPerformance {
            model: model.to_string(),
            overall_accuracy: *overall,
            disease_specific: Disease::KNOWN
                .iter()
                .zip(per_disease.iter())
                .map(|(d, acc)| (d.label().to_string(), *acc))
                .collect(),
        })
        .collect()
}

pub fn model_catalog() -> Vec<CatalogEntry> {
    CATALOG
        .iter()
        .map(|&(id, name, accuracy, precision, recall)| CatalogEntry {
            id,
            name,
            scores: ModelScores {
                accuracy,
                precision,
                recall,
            },
        })
        .collect()
}

pub fn lookup_model(id: &str) -> Option<CatalogEntry> {
    model_catalog().into_iter().find(|entry| entry.id == id)
}

fn label_values(rows: &[(&'static str, f64)]) -> Vec<LabelValue> {
    rows.iter()
        .map(|&(label, value)| LabelValue { label, value })
        .collect()
}

/// Static tables shown on the visualization and reports pages.
fn static_tables() -> DashboardMock {
    DashboardMock {
        model_accuracy: label_values(&[
            ("SVM", 92.0),
            ("KNN", 85.0),
            ("Naive Bayes", 80.0),
            ("CNN", 95.0),
            ("LSTM", 96.0),
            ("HMMs", 78.0),
            ("Bayesian", 82.0),
            ("DBSCAN", 75.0),
        ]),
        region_risk: label_values(&[
            ("Delhi", 0.87),
            ("Mumbai", 0.65),
            ("Bangalore", 0.74),
            ("Hyderabad", 0.91),
            ("Chennai", 0.58),
        ]),
        feature_importance: label_values(&[
            ("GeneX", 0.9),
            ("MutationY", 0.75),
            ("SNP123", 0.65),
            ("GeneZ", 0.55),
            ("FeatureA", 0.45),
        ]),
        radar_metrics: label_values(&[
            ("Precision", 0.89),
            ("Recall", 0.85),
            ("F1-Score", 0.88),
            ("AUC-ROC", 0.9),
        ]),
        disease_reports: vec![
            DiseaseReport {
                name: "GeneFlare-1",
                dna_sequence: "ATGCTAGCTAGCTAGCTA",
                probability: 78,
                time_until_increase: "6 months",
            },
            DiseaseReport {
                name: "NeuroMut-5",
                dna_sequence: "CGTAGCTAGGTCGATGCA",
                probability: 62,
                time_until_increase: "1 year",
            },
            DiseaseReport {
                name: "CellMorph-X",
                dna_sequence: "GATCGATGCTAGCTAGCA",
                probability: 88,
                time_until_increase: "3 months",
            },
        ],
        top_regions: vec![
            RegionCases {
                region: "Hyderabad",
                disease: "CellMorph-X",
                cases: 920,
            },
            RegionCases {
                region: "Delhi",
                disease: "GeneFlare-1",
                cases: 850,
            },
            RegionCases {
                region: "Bangalore",
                disease: "NeuroMut-5",
                cases: 800,
            },
        ],
        cities: vec![
            CityCoordinates {
                city: "Delhi",
                latitude: 28.6139,
                longitude: 77.209,
            },
            CityCoordinates {
                city: "Mumbai",
                latitude: 19.076,
                longitude: 72.8777,
            },
            CityCoordinates {
                city: "Bangalore",
                latitude: 12.9716,
                longitude: 77.5946,
            },
        ],
        time_series: Vec::new(),
        clusters: Vec::new(),
        confidence: Vec::new(),
    }
}

/// Static tables plus freshly drawn random series.
pub fn dashboard<R: Rng + ?Sized>(rng: &mut R) -> DashboardMock {
    let mut mock = static_tables();

    mock.time_series = (0..10)
        .map(|i| YearCases {
            year: 2015 + i,
            cases: rng.random_range(500..1000),
        })
        .collect();

    mock.clusters = (0..100)
        .map(|_| ClusterPoint {
            x: rng.random(),
            y: rng.random(),
            cluster: if rng.random::<f64>() > 0.5 {
                "Cluster 1"
            } else {
                "Cluster 2"
            },
        })
        .collect();

    mock.confidence = (0..100).map(|_| rng.random()).collect();
    mock
}

/// A random sequence over the canonical alphabet.
pub fn random_sequence<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| CANONICAL_BASES[rng.random_range(0..CANONICAL_BASES.len())] as char)
        .collect()
}

/// One mock input row in the aggregator's six-column layout.
#[derive(Debug, Clone, Serialize)]
pub struct MockRow {
    pub sequence: String,
    pub disease: &'static str,
    pub param1: f64,
    pub param2: f64,
    pub param3: f64,
    pub location: &'static str,
}

/// Generates `samples` rows with random sequences, labels and parameters.
pub fn mock_rows<R: Rng + ?Sized>(rng: &mut R, samples: usize, length: usize) -> Vec<MockRow> {
    let diseases: Vec<&'static str> = Disease::KNOWN.iter().map(|d| d.label()).collect();

    (0..samples)
        .map(|_| MockRow {
            sequence: random_sequence(rng, length),
            // Both label lists are non-empty constants.
            disease: diseases.choose(rng).copied().unwrap_or("Cancer"),
            param1: round2(rng.random_range(0.0..1.0)),
            param2: round2(rng.random_range(0.0..10.0)),
            param3: round2(rng.random_range(0.0..5.0)),
            location: REGIONS.choose(rng).copied().unwrap_or(REGIONS[0]),
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
