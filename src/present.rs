// Result presentation. Predictions are shown in the order the service
// returned them and the first one is the headline.

use crate::prediction::Prediction;
use crossterm::style::Stylize;
use std::io::{self, Write};

pub const SUBHEADING: &str = "Predictions:";
pub const NO_PREDICTIONS: &str = "No predictions available.";

/// `label: 95.12%` for each prediction, in received order.
pub fn prediction_lines(predictions: &[Prediction]) -> Vec<String> {
    predictions
        .iter()
        .map(|p| format!("{}: {}", p.label, percent(p.confidence)))
        .collect()
}

pub fn percent(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

/// Label of the first prediction. This trusts the service's ranking and
/// does not look for a maximum.
pub fn top_label(predictions: &[Prediction]) -> Option<&str> {
    predictions.first().map(|p| p.label.as_str())
}

pub fn headline(label: &str) -> String {
    format!("Yay! It's a {} 🐶", label)
}

/// The prediction block as plain lines: subheading, one line per
/// prediction, then the headline. An empty slice yields the subheading and
/// `NO_PREDICTIONS`.
pub fn render_predictions(predictions: &[Prediction]) -> Vec<String> {
    let mut lines = vec![SUBHEADING.to_string()];
    match top_label(predictions) {
        Some(label) => {
            lines.extend(prediction_lines(predictions).into_iter().map(|l| format!("  {}", l)));
            lines.push(headline(label));
        }
        None => lines.push(NO_PREDICTIONS.to_string()),
    }
    lines
}

/// Write the rendered block with terminal styling.
pub fn print_predictions<W: Write>(out: &mut W, predictions: &[Prediction]) -> io::Result<()> {
    let lines = render_predictions(predictions);
    let last = lines.len() - 1;
    for (i, line) in lines.into_iter().enumerate() {
        if i == 0 {
            writeln!(out, "{}", line.bold())?;
        } else if i == last && !predictions.is_empty() {
            writeln!(out, "{}", line.bold().green())?;
        } else {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}
