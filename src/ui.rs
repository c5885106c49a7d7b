// UI layer: provides a simple interactive menu using `dialoguer`.
// The functions are small and synchronous to make the flow easy to follow.

use crate::api::ImageClassifier;
use crate::input::ImageSource;
use crate::pipeline;
use crate::present::print_predictions;
use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

pub const TITLE: &str = "Dog Breed Prediction App";

/// Main interactive menu. Runs a select loop until the user chooses
/// "Exit"; every pass is an independent interaction.
///
/// Note: `Select::interact()` is keyboard-driven: you can use arrow keys
/// and Enter to choose an option.
pub fn main_menu(http: &Client, classifier: &dyn ImageClassifier) -> Result<()> {
    println!("{}", TITLE.bold());
    loop {
        let items = vec!["Upload Image", "Image URL", "Exit"];
        let selection = Select::new()
            .with_prompt("Choose Input Option")
            .items(&items)
            .default(0)
            .interact()?;
        let source = match selection {
            0 => {
                let path: String = Input::new()
                    .with_prompt("Choose an image (jpg, jpeg, png)")
                    .interact_text()?;
                ImageSource::Upload(PathBuf::from(path.trim()))
            }
            1 => {
                let url: String = Input::new().with_prompt("Enter Image URL").interact_text()?;
                ImageSource::Url(url.trim().to_string())
            }
            _ => break,
        };
        // Errors are reported and the menu continues.
        let mut stdout = io::stdout();
        if !classify_and_show(&mut stdout, &source, http, classifier)? {
            tracing::debug!("interaction ended without predictions");
        }
    }
    Ok(())
}

/// Run one interaction and write the preview, then the predictions or the
/// error. The preview is written as soon as the image is loaded, so it is
/// shown even when classification fails. Returns whether predictions were
/// shown.
pub fn classify_and_show<W: Write>(
    out: &mut W,
    source: &ImageSource,
    http: &Client,
    classifier: &dyn ImageClassifier,
) -> Result<bool> {
    let spinner = start_spinner("Loading image...")?;
    let acquired = pipeline::acquire(source, http);
    spinner.finish_and_clear();

    let (input, preview) = match acquired {
        Ok(pair) => pair,
        Err(e) => {
            writeln!(out, "{}", e.to_string().red())?;
            return Ok(false);
        }
    };
    writeln!(out, "{}", preview.to_string().dim())?;

    let spinner = start_spinner("Classifying...")?;
    let result = pipeline::classify(&input, classifier);
    spinner.finish_and_clear();

    match result {
        Ok(predictions) => {
            print_predictions(out, &predictions)?;
            Ok(true)
        }
        Err(e) => {
            tracing::error!(error = %e, "classification failed");
            writeln!(out, "{}", e.to_string().red())?;
            Ok(false)
        }
    }
}

fn start_spinner(message: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
}
