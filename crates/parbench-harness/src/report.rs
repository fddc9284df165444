//! Result rows and their text rendering.

use std::fmt::Write;

use serde::Serialize;
use sort::{Algorithm, Variant};

/// One timed sort run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Measurement {
    pub algorithm: Algorithm,
    pub variant: Variant,
    pub seconds: f64,
    pub correct: bool,
    /// Sequential time over this run's time; parallel rows only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speedup: Option<f64>,
}

/// Give every parallel row the speedup against the sequential row of the
/// same algorithm. Rows without a sequential partner keep `None`.
pub fn fill_speedups(rows: &mut [Measurement]) {
    let baselines: Vec<(Algorithm, f64)> = rows
        .iter()
        .filter(|m| m.variant == Variant::Sequential)
        .map(|m| (m.algorithm, m.seconds))
        .collect();

    for m in rows.iter_mut().filter(|m| m.variant == Variant::Parallel) {
        m.speedup = baselines
            .iter()
            .find(|(a, _)| *a == m.algorithm)
            .filter(|_| m.seconds > 0.0)
            .map(|(_, base)| base / m.seconds);
    }
}

/// Row with the lowest time.
pub fn fastest(rows: &[Measurement]) -> Option<&Measurement> {
    rows.iter().min_by(|a, b| a.seconds.total_cmp(&b.seconds))
}

/// Fixed-width table: algorithm, variant, seconds, correctness, speedup.
pub fn render_table(rows: &[Measurement]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<15}{:<12}{:<14}{:<10}{:<10}",
        "Algorithm", "Variant", "Time(s)", "Correct", "Speedup"
    );
    let _ = writeln!(out, "{}", "-".repeat(61));

    for m in rows {
        let speedup = match m.speedup {
            Some(s) => format!("{s:.2}x"),
            None => "-".to_string(),
        };
        let _ = writeln!(
            out,
            "{:<15}{:<12}{:<14.6}{:<10}{:<10}",
            format!("{} sort", m.algorithm),
            m.variant.name(),
            m.seconds,
            if m.correct { "yes" } else { "NO" },
            speedup
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(algorithm: Algorithm, variant: Variant, seconds: f64) -> Measurement {
        Measurement {
            algorithm,
            variant,
            seconds,
            correct: true,
            speedup: None,
        }
    }

    #[test]
    fn test_fill_speedups() {
        let mut rows = vec![
            row(Algorithm::Merge, Variant::Sequential, 0.8),
            row(Algorithm::Merge, Variant::Parallel, 0.2),
            row(Algorithm::Quick, Variant::Parallel, 0.1),
        ];
        fill_speedups(&mut rows);
        assert_eq!(rows[0].speedup, None);
        assert_eq!(rows[1].speedup, Some(4.0));
        assert_eq!(rows[2].speedup, None);
    }

    #[test]
    fn test_fastest() {
        let rows = vec![
            row(Algorithm::Bubble, Variant::Sequential, 2.0),
            row(Algorithm::Quick, Variant::Sequential, 0.5),
            row(Algorithm::Merge, Variant::Parallel, 0.7),
        ];
        assert_eq!(fastest(&rows).unwrap().algorithm, Algorithm::Quick);
        assert!(fastest(&[]).is_none());
    }

    #[test]
    fn test_render_table() {
        let mut rows = vec![
            row(Algorithm::Merge, Variant::Sequential, 0.5),
            row(Algorithm::Merge, Variant::Parallel, 0.25),
        ];
        fill_speedups(&mut rows);
        let table = render_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Algorithm"));
        assert!(lines[2].starts_with("merge sort"));
        assert!(lines[2].contains("0.500000"));
        assert!(lines[2].trim_end().ends_with('-'));
        assert!(lines[3].contains("2.00x"));
    }

    #[test]
    fn test_serialize_skips_missing_speedup() {
        let json = serde_json::to_value(row(Algorithm::Bubble, Variant::Sequential, 1.0)).unwrap();
        assert_eq!(json["algorithm"], "bubble");
        assert_eq!(json["variant"], "sequential");
        assert!(json.get("speedup").is_none());
    }
}
