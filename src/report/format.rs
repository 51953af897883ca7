//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the selection code stays clean and testable
//! - output changes are localized

use crate::domain::{PlateResult, SelectConfig};
use crate::io::ingest::PlateStats;
use crate::select::{Check, PhaseStatus, WellEvaluation};

/// Format the run header: input counts + thresholds in effect.
pub fn format_run_summary(stats: &PlateStats, config: &SelectConfig) -> String {
    let mut out = String::new();

    out.push_str("=== phasesel - growth phase selection ===\n");
    out.push_str(&format!(
        "Plate: wells={} | phases={} | excluded={}\n",
        stats.n_wells, stats.n_phases, stats.n_excluded
    ));
    out.push_str(&format!(
        "Thresholds: max_slope={} | min_length={} | max_abs_baseline={} | max_baseline_dev={} | time_cutoff={}\n",
        config.max_slope,
        config.phase_length_cutoff,
        config.max_abs_baseline,
        config.max_baseline_dev,
        config
            .time_cutoff
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string()),
    ));
    out.push('\n');

    out
}

/// Format the per-well result table plus a growth/no-growth footer.
pub fn format_plate_table(plate: &PlateResult) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<12} {:<6} {:>10} {:>10} {:>10} {:>10}",
            "well", "growth", "slope", "intercept", "baseline", "start"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(&format!(
        "{:-<12} {:-<6} {:-<10} {:-<10} {:-<10} {:-<10}\n",
        "", "", "", "", "", ""
    ));

    for (name, r) in plate.iter() {
        let growth = if r.growth { "yes" } else { "no" };
        out.push_str(&format!(
            "{:<12} {:<6} {:>10.4} {:>10.4} {:>10.4} {:>10}\n",
            truncate(name, 12),
            growth,
            r.slope,
            r.intercept,
            r.baseline,
            fmt_start(r.start),
        ));
    }

    let growing = plate.growth_count();
    out.push_str(&format!(
        "\nWells: {} | growth: {} | no growth: {}\n",
        plate.len(),
        growing,
        plate.len() - growing
    ));

    out
}

/// Format one row per phase with its verdict.
pub fn format_phase_verdicts(evaluations: &[WellEvaluation]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<12} {:>5} {:>8} {:<10} {}\n",
        "well", "phase", "rank", "status", "failed checks"
    ));
    out.push_str(&format!("{:-<12} {:-<5} {:-<8} {:-<10} {:-<13}\n", "", "", "", "", ""));

    for eval in evaluations {
        if eval.verdicts.is_empty() {
            out.push_str(&format!("{:<12} {:>5}\n", truncate(&eval.well, 12), "-"));
            continue;
        }
        for v in &eval.verdicts {
            let (status, detail) = match &v.status {
                PhaseStatus::Excluded => ("excluded", String::new()),
                PhaseStatus::Qualified if eval.selected == Some(v.index) => ("selected", String::new()),
                PhaseStatus::Qualified => ("ok", String::new()),
                PhaseStatus::Rejected(rejections) => {
                    let parts: Vec<String> = rejections
                        .iter()
                        .map(|r| format!("{}={:.4} (limit {})", r.check.label(), r.observed, r.limit))
                        .collect();
                    ("rejected", parts.join("; "))
                }
            };
            out.push_str(
                format!(
                    "{:<12} {:>5} {:>8.2} {:<10} {}",
                    truncate(&eval.well, 12),
                    v.index,
                    v.rank,
                    status,
                    detail
                )
                .trim_end(),
            );
            out.push('\n');
        }
    }

    let total: usize = evaluations.iter().map(|e| e.verdicts.len()).sum();
    let qualified: usize = evaluations.iter().map(|e| e.qualified_count()).sum();
    out.push_str(&format!("\nPhases: {total} | qualified: {qualified}\n"));

    let by_check: Vec<String> = Check::ALL
        .iter()
        .filter_map(|&check| {
            let n = rejected_by(evaluations, check);
            (n > 0).then(|| format!("{}={n}", check.label()))
        })
        .collect();
    if !by_check.is_empty() {
        out.push_str(&format!("Rejected by: {}\n", by_check.join(" | ")));
    }

    out
}

/// Number of phases that failed `check` (a phase failing several checks counts once per check).
fn rejected_by(evaluations: &[WellEvaluation], check: Check) -> usize {
    evaluations
        .iter()
        .flat_map(|e| e.verdicts.iter())
        .filter(|v| match &v.status {
            PhaseStatus::Rejected(rejections) => rejections.iter().any(|r| r.check == check),
            _ => false,
        })
        .count()
}

fn fmt_start(start: f64) -> String {
    if start.is_nan() {
        "-".to_string()
    } else {
        format!("{start:.2}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GrowthPhase, WellRecord, WellResult, WellSeries};
    use crate::select::evaluate_well;

    #[test]
    fn plate_table_counts_growth() {
        let mut plate = PlateResult::new();
        plate.push(
            "A1".to_string(),
            WellResult {
                slope: 0.5,
                intercept: 0.0,
                baseline: 0.1,
                growth: true,
                start: 3.0,
            },
        );
        plate.push("A2".to_string(), WellResult::no_growth());

        let table = format_plate_table(&plate);
        assert!(table.contains("A1"));
        assert!(table.contains("3.00"));
        assert!(table.contains("Wells: 2 | growth: 1 | no growth: 1"));
    }

    #[test]
    fn verdicts_mark_selected_and_rejected_phases() {
        let times: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let well = WellRecord {
            name: "B1".to_string(),
            series: WellSeries {
                values: vec![0.1; times.len()],
                times,
            },
            phases: vec![
                GrowthPhase {
                    start: 0.0,
                    end: 10.0,
                    slope: 1.0,
                    intercept: 0.0,
                    baseline_value: 0.1,
                    rank: 2.0,
                    exclude: false,
                },
                GrowthPhase {
                    start: 5.0,
                    end: 15.0,
                    slope: 4.0,
                    intercept: 0.0,
                    baseline_value: 0.1,
                    rank: 9.0,
                    exclude: false,
                },
            ],
        };
        let eval = evaluate_well(&well, &SelectConfig::default()).unwrap();
        let text = format_phase_verdicts(&[eval]);
        assert!(text.contains("selected"));
        assert!(text.contains("rejected"));
        assert!(text.contains("slope=4.0000 (limit 1.5)"));
        assert!(text.contains("Phases: 2 | qualified: 1"));
        assert!(text.contains("Rejected by: slope=1\n"));
    }

    #[test]
    fn rejection_footer_follows_check_order() {
        let times: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let bad = GrowthPhase {
            start: 0.0,
            end: 2.0,
            slope: 4.0,
            intercept: 0.0,
            baseline_value: 0.1,
            rank: 1.0,
            exclude: false,
        };
        let well = WellRecord {
            name: "C3".to_string(),
            series: WellSeries {
                values: vec![0.1; times.len()],
                times,
            },
            phases: vec![bad.clone(), GrowthPhase { end: 10.0, ..bad }],
        };
        let eval = evaluate_well(&well, &SelectConfig::default()).unwrap();
        let text = format_phase_verdicts(&[eval]);
        assert!(text.contains("Rejected by: slope=2 | length=1\n"), "{text}");
    }

    #[test]
    fn no_rejection_footer_when_everything_qualifies() {
        let text = format_phase_verdicts(&[]);
        assert!(text.contains("Phases: 0 | qualified: 0"));
        assert!(!text.contains("Rejected by"));
    }

    #[test]
    fn truncate_long_names() {
        assert_eq!(truncate("plate1-A1", 12), "plate1-A1");
        assert_eq!(truncate("a-very-long-well-name", 6), "a-ver.");
    }
}
