//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the estimator and prediction code stays free of presentation concerns
//! - output changes are localized

use nalgebra::Complex;

use crate::domain::{Prediction, PolePrediction};
use crate::models::ModelBundle;

/// Format a bundle summary (source, load time, one line per artifact).
pub fn format_bundle_summary(bundle: &ModelBundle) -> String {
    let mut out = String::new();

    out.push_str("=== poles - model bundle ===\n");
    if let Some(dir) = bundle.source_dir() {
        out.push_str(&format!("Source: {}\n", dir.display()));
    }
    out.push_str(&format!("Loaded: {}\n", bundle.loaded_at().to_rfc3339()));
    out.push_str(&format!("Features: {}\n", bundle.n_features()));
    out.push_str(&format!(
        "Classes: {:?}\n",
        bundle.classifier().classes()
    ));

    out.push_str("\nArtifacts:\n");
    out.push_str(&format!("  {:<22} {:<14} {:>8}\n", "file", "kind", "features"));
    for s in bundle.summary() {
        out.push_str(&format!("  {:<22} {:<14} {:>8}\n", s.file, s.kind, s.n_features));
    }

    out
}

/// Format predictions as a table with one row per input vector.
pub fn format_predictions(prediction: &Prediction) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>4}  {:<12} {:>5}  {:>26}  {:>26}\n",
        "#", "type", "label", "s1", "s2"
    ));
    for (idx, p) in prediction.iter().enumerate() {
        out.push_str(&format_row(idx + 1, p));
    }
    out
}

fn format_row(idx: usize, p: &PolePrediction) -> String {
    format!(
        "{:>4}  {:<12} {:>5}  {:>26}  {:>26}\n",
        idx,
        p.damping.display_name(),
        p.label,
        format_pole(p.s1),
        format_pole(p.s2),
    )
}

/// Render a pole as `a + bi` / `a - bi`.
pub fn format_pole(pole: Complex<f64>) -> String {
    let sign = if pole.im.is_sign_negative() { '-' } else { '+' };
    format!("{:.6} {sign} {:.6}i", pole.re, pole.im.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DampingType;
    use crate::models::fixtures;

    #[test]
    fn pole_format_shows_sign_of_imaginary_part() {
        assert_eq!(format_pole(Complex::new(-0.5, 3.0)), "-0.500000 + 3.000000i");
        assert_eq!(format_pole(Complex::new(-0.5, -3.0)), "-0.500000 - 3.000000i");
    }

    #[test]
    fn prediction_table_has_one_line_per_row() {
        let row = PolePrediction {
            damping: DampingType::Overdamped,
            label: 1,
            s1: Complex::new(-3.0, 0.0),
            s2: Complex::new(-7.0, 0.0),
        };
        let table = format_predictions(&Prediction::Batch(vec![row, row]));
        assert_eq!(table.lines().count(), 3);
        assert!(table.contains("overdamped"));
    }

    #[test]
    fn bundle_summary_lists_every_artifact() {
        let summary = format_bundle_summary(&fixtures::bundle());
        for file in crate::models::ARTIFACT_FILES {
            assert!(summary.contains(file), "{file} missing from:\n{summary}");
        }
        assert!(summary.contains("Features: 3"));
    }
}
