//! Plain-text chart rendering
//!
//! Draws a completion-rate series as one horizontal bar per date, so charts
//! work in any terminal.

use crate::analytics::CompletionPoint;
use crate::domain::format_date;

/// Something that can draw a completion-rate series
pub trait ChartRenderer {
    /// Render `series` under the title `label`
    fn render(&self, label: &str, series: &[CompletionPoint]) -> String;
}

/// Horizontal bar chart made of text
#[derive(Debug, Clone)]
pub struct TextChart {
    /// Bar length for a rate of 1.0
    pub width: usize,
}

impl Default for TextChart {
    fn default() -> Self {
        Self { width: 40 }
    }
}

impl TextChart {
    pub fn new(width: usize) -> Self {
        Self { width: width.max(1) }
    }

    fn bar(&self, rate: f64) -> String {
        let filled = (rate.clamp(0.0, 1.0) * self.width as f64).round() as usize;
        format!("{}{}", "#".repeat(filled), ".".repeat(self.width - filled))
    }
}

impl ChartRenderer for TextChart {
    fn render(&self, label: &str, series: &[CompletionPoint]) -> String {
        let mut out = format!("{} Completion Rate Over Time\n", label);

        if series.is_empty() {
            out.push_str("  (no data)\n");
            return out;
        }

        for point in series {
            out.push_str(&format!(
                "  {} |{}| {:.3}\n",
                format_date(point.date),
                self.bar(point.rate),
                point.rate
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_render_series() {
        let chart = TextChart::new(10);
        let series = vec![
            CompletionPoint { date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(), rate: 1.0 },
            CompletionPoint { date: NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(), rate: 0.5 },
        ];

        let rendered = chart.render("read", &series);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "read Completion Rate Over Time");
        assert_eq!(lines[1], "  01.02.2024 |##########| 1.000");
        assert_eq!(lines[2], "  02.02.2024 |#####.....| 0.500");
    }

    #[test]
    fn test_render_empty_series() {
        let rendered = TextChart::default().render("All Habits", &[]);
        assert!(rendered.contains("(no data)"));
    }
}
