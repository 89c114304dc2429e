//! Sequence statistics module.
//!
//! Groups the per-sequence measurements used by the aggregator and the
//! disease coefficient tables that bias them.

pub mod disease;

pub use disease::Disease;

/// Default reference window scanned for "mutations".
pub const REFERENCE_WINDOW: &str = "ATCG";

/// Nucleotide alphabet used when generating mock sequences.
pub const CANONICAL_BASES: &[u8] = b"ACGT";

/// Per-sequence summary produced before any aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceStats {
    pub gc_content: f64,
    /// 1-based start offsets of windows that differ from the reference.
    pub mutations: Vec<usize>,
}

/// Fraction of characters that are `G` or `C`. Case-sensitive.
///
/// An empty sequence yields `NaN` (0 / 0); callers are expected to filter
/// empty sequences before reaching this point.
pub fn gc_content(sequence: &str) -> f64 {
    let mut total = 0usize;
    let mut gc = 0usize;
    for c in sequence.chars() {
        total += 1;
        if c == 'G' || c == 'C' {
            gc += 1;
        }
    }
    gc as f64 / total as f64
}

/// Slides a window the length of `reference` across `sequence` and records
/// the 1-based offset of every window that is not a literal match.
///
/// This is a plain string comparison, not a variant caller: any window that
/// is not exactly the reference counts.
pub fn mutation_offsets(sequence: &str, reference: &str) -> Vec<usize> {
    let seq: Vec<char> = sequence.chars().collect();
    let reference: Vec<char> = reference.chars().collect();
    if reference.is_empty() || seq.len() < reference.len() {
        return Vec::new();
    }

    seq.windows(reference.len())
        .enumerate()
        .filter(|(_, window)| *window != reference.as_slice())
        .map(|(i, _)| i + 1)
        .collect()
}

/// Computes both statistics for one sequence.
pub fn analyze_sequence(sequence: &str, reference: &str) -> SequenceStats {
    SequenceStats {
        gc_content: gc_content(sequence),
        mutations: mutation_offsets(sequence, reference),
    }
}

/// Bounded sequence risk: `min(100, (gc * 50 + mutations * 0.5) * multiplier)`.
pub fn risk_score(gc_content: f64, mutation_count: usize, disease: Disease) -> f64 {
    let base = gc_content * 50.0 + mutation_count as f64 * 0.5;
    // f64::min would turn NaN into 100.
    let scaled = base * disease.risk_multiplier();
    if scaled > 100.0 {
        100.0
    } else {
        scaled
    }
}
