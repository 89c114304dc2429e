use crate::aggregate::{AggregateStatus, Aggregation};

/// Generate a formatted text report from an aggregation.
pub fn generate_report(aggregation: &Aggregation) -> String {
    let result = &aggregation.result;
    let mut report = String::new();

    report.push_str("DNA Sequence Analysis Summary\n");
    report.push_str("=============================\n\n");

    match &aggregation.status {
        AggregateStatus::Complete { rows, skipped_rows } => {
            report.push_str(&format!(
                "Samples analysed: {} ({} rows skipped)\n\n",
                rows, skipped_rows
            ));
        }
        AggregateStatus::NoData { skipped_rows } => {
            report.push_str(&format!(
                "No valid samples found ({} rows skipped).\n",
                skipped_rows
            ));
            return report;
        }
        AggregateStatus::Failed { reason } => {
            report.push_str(&format!("Aggregation failed: {}\n", reason));
            return report;
        }
    }

    report.push_str("Disease Distribution (weighted):\n");
    for entry in &result.disease_distribution {
        report.push_str(&format!("  {:<24} {:>8.2}\n", entry.disease, entry.count));
    }
    report.push('\n');

    report.push_str("Location Risk:\n");
    for (region, metric) in &result.metrics.location_metrics {
        report.push_str(&format!(
            "  {:<24} {:>8.4} (n={})\n",
            region, metric.avg_risk, metric.count
        ));
    }
    report.push('\n');

    report.push_str("Parameter Averages:\n");
    for entry in &result.parameter_averages {
        report.push_str(&format!("  {:<24} {:>8.4}\n", entry.parameter, entry.average));
    }
    report.push('\n');

    // Highest sequence risk first
    let mut ranked: Vec<_> = result.sequences.iter().collect();
    ranked.sort_by(|a, b| {
        b.risk_score
            .partial_cmp(&a.risk_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    report.push_str("Top Sequences by Risk Score:\n");
    for seq in ranked.iter().take(5) {
        report.push_str(&format!(
            "  {:<8} GC {:>5.1}%  mutations {:>5}  risk {:>6.2}\n",
            seq.id,
            seq.gc_content * 100.0,
            seq.mutations.len(),
            seq.risk_score
        ));
    }
    report.push('\n');

    report.push_str("Model Accuracy (static):\n");
    for model in &result.model_accuracy {
        report.push_str(&format!("  {:<24} {:>6.1}%\n", model.model, model.accuracy));
    }

    report
}
