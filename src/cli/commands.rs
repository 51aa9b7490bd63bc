//! Subcommand handlers for render, formats and config actions.

use anyhow::{bail, Context};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use super::args::{ConfigAction, RenderArgs};
use crate::ascii::{CharSet, ConversionResult};
use crate::config::{default_path, Config};
use crate::patterns;
use crate::pipeline::{FramePipeline, RunOutcome};

/// Convert the requested pattern and print each frame to stdout.
pub async fn render(args: &RenderArgs, config: &Config) -> anyhow::Result<()> {
    let conversion = args.conversion(config.conversion);
    let sequence = patterns::sequence(
        args.pattern.into(),
        args.width,
        args.height,
        args.frames,
        args.delay.map(Duration::from_millis),
    )
    .context("Failed to build source pattern")?;

    let pipeline = FramePipeline::with_capacity(config.cache.capacity);
    let animated = sequence.is_animated();
    let outcome = pipeline
        .submit(&sequence, conversion, |percent| {
            if animated {
                log::info!("Converting... {}%", percent);
            }
        })
        .await
        .context("Conversion failed")?;

    let RunOutcome::Completed { frames, .. } = outcome else {
        bail!("Conversion was cancelled");
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (index, frame) in frames.iter().enumerate() {
        if animated {
            writeln!(out, "--- frame {} ({} ms)", index, frame.delay.as_millis())?;
        }
        let text = if frame.result.raster.is_some() {
            ansi_text(&frame.result)
        } else {
            frame.result.text.clone()
        };
        out.write_all(text.as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

/// Glyph text with a 24-bit ANSI color per glyph, sampled from the raster.
///
/// Falls back to the plain text when the result carries no raster.
pub fn ansi_text(result: &ConversionResult) -> String {
    let Some(raster) = &result.raster else {
        return result.text.clone();
    };

    let mut out = String::with_capacity(result.text.len() * 4);
    for (row, line) in result.text.lines().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            match raster.sample_cell(col as u32, row as u32) {
                Some(c) => {
                    out.push_str(&format!("\x1b[38;2;{};{};{}m{}", c.r, c.g, c.b, ch));
                }
                None => out.push(ch),
            }
        }
        out.push_str("\x1b[0m\n");
    }
    out
}

/// List available glyph formats and print them to stdout.
pub fn list_formats() {
    println!("Available formats:");
    for charset in CharSet::ALL {
        let sample: String = charset.chars().iter().take(12).collect();
        if charset.is_braille() {
            println!("  {:<10} {:<16} 2x4 dots per glyph", charset.name(), charset.label());
        } else {
            println!(
                "  {:<10} {:<16} {} levels  {}",
                charset.name(),
                charset.label(),
                charset.chars().len(),
                sample
            );
        }
    }
    println!();
    println!("Use --format <name> to select a format.");
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, path: Option<&Path>) -> anyhow::Result<()> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(&config_path))?;
            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found, using defaults)", config_path.display());
            }
            println!();
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Init => {
            if config_path.exists() {
                bail!(
                    "Config file already exists: {}\nUse 'glyphcast config show' to view current settings.",
                    config_path.display()
                );
            }
            Config::default().save(&config_path)?;
            println!("Created config file: {}", config_path.display());
        }
    }
    Ok(())
}
