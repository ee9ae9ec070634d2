//! Page geometry and text for generated reports, kept free of any PDF types so
//! it can be checked on its own.

use analytics::{FieldStats, RiskEntry};
use core_types::{Field, SensorKind};

/// A rectangle on the page, in millimetres from the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

/// `Report Gas - 09/03/2024 - 15/03/2024`. The built-in PDF fonts have no en
/// dash, so range labels are flattened to a hyphen.
pub fn document_title(kind: SensorKind, label: &str) -> String {
    format!("Report {} - {}", kind.display_name(), label.replace('\u{2013}', "-"))
}

fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

/// One summary line, e.g. `LPG: mean=812.40, min=300.10, max=950.00, risk=40.0%`.
///
/// A field without a risk entry is shown at `0.0%`.
pub fn stats_line(field: Field, stats: &FieldStats, risk: Option<&RiskEntry>) -> String {
    format!(
        "{}: mean={}, min={}, max={}, risk={:.1}%",
        field.label(),
        fmt_value(stats.mean),
        fmt_value(stats.min),
        fmt_value(stats.max),
        risk.map_or(0.0, RiskEntry::percent),
    )
}

/// How many sampled values sit at or below the threshold, and how many above.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskSplit {
    pub safe: usize,
    pub critical: usize,
}

impl RiskSplit {
    /// Without a threshold every value is safe.
    pub fn of(values: &[f64], threshold: Option<f64>) -> Self {
        let critical = threshold.map_or(0, |t| values.iter().filter(|&&v| v > t).count());
        Self {
            safe: values.len() - critical,
            critical,
        }
    }

    pub fn total(&self) -> usize {
        self.safe + self.critical
    }

    /// Share of safe values in `[0, 1]`; an empty split counts as all safe.
    pub fn safe_share(&self) -> f64 {
        if self.total() == 0 {
            1.0
        } else {
            self.safe as f64 / self.total() as f64
        }
    }
}

/// Maps `values` onto `frame`: evenly spaced along x in series order, y scaled
/// between the smallest and largest value. A flat series sits at mid height.
pub fn plot_points(values: &[f64], frame: Frame) -> Vec<(f32, f32)> {
    let Some((min, max)) = value_range(values) else {
        return Vec::new();
    };
    let span = max - min;
    let steps = values.len().saturating_sub(1);

    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = if steps == 0 {
                frame.x + frame.width / 2.0
            } else {
                frame.x + frame.width * (i as f32 / steps as f32)
            };
            let y = if span == 0.0 {
                frame.y + frame.height / 2.0
            } else {
                frame.y + frame.height * ((v - min) / span) as f32
            };
            (x, y)
        })
        .collect()
}

/// Smallest and largest of `values`, or `None` for an empty slice.
pub fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
