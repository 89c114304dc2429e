//! Fixed per-disease coefficients.
//!
//! The dashboard knows four disease labels by name; anything else falls
//! back to [`Disease::Other`] and the default coefficients.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disease {
    Cancer,
    AlzheimersDisease,
    CysticFibrosis,
    SickleCellAnemia,
    Other,
}

impl Disease {
    /// The four labels with dedicated coefficients, in display order.
    pub const KNOWN: [Disease; 4] = [
        Disease::Cancer,
        Disease::AlzheimersDisease,
        Disease::CysticFibrosis,
        Disease::SickleCellAnemia,
    ];

    /// Exact, case-sensitive match on the label.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Cancer" => Disease::Cancer,
            "Alzheimer's Disease" => Disease::AlzheimersDisease,
            "Cystic Fibrosis" => Disease::CysticFibrosis,
            "Sickle Cell Anemia" => Disease::SickleCellAnemia,
            _ => Disease::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Disease::Cancer => "Cancer",
            Disease::AlzheimersDisease => "Alzheimer's Disease",
            Disease::CysticFibrosis => "Cystic Fibrosis",
            Disease::SickleCellAnemia => "Sickle Cell Anemia",
            Disease::Other => "Other",
        }
    }

    /// Weight added to the disease's running count for every row.
    pub fn weight(&self) -> f64 {
        match self {
            Disease::Cancer => 2.5,
            Disease::AlzheimersDisease => 1.8,
            Disease::CysticFibrosis => 1.2,
            Disease::SickleCellAnemia | Disease::Other => 1.0,
        }
    }

    /// Severity coefficient in (0, 1] for the location risk formula.
    pub fn severity(&self) -> f64 {
        match self {
            Disease::Cancer => 0.9,
            Disease::AlzheimersDisease => 0.85,
            Disease::CysticFibrosis => 0.75,
            Disease::SickleCellAnemia => 0.7,
            Disease::Other => 0.6,
        }
    }

    /// Multiplier applied to the sequence risk score.
    pub fn risk_multiplier(&self) -> f64 {
        match self {
            Disease::Cancer => 1.5,
            Disease::AlzheimersDisease => 1.3,
            Disease::CysticFibrosis => 1.2,
            Disease::SickleCellAnemia | Disease::Other => 1.0,
        }
    }

    /// Multiplier applied to the first parameter ("DNA Mutation Rate").
    pub fn parameter_multiplier(&self) -> f64 {
        match self {
            Disease::Cancer => 1.3,
            Disease::AlzheimersDisease => 1.1,
            Disease::CysticFibrosis => 0.9,
            Disease::SickleCellAnemia | Disease::Other => 0.8,
        }
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
