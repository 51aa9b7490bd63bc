//! CLI argument parsing with clap.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{CharacterSet, PatternKind};
use crate::ascii::{ConversionConfig, MAX_RESOLUTION, MIN_RESOLUTION};

/// Parse and validate resolution (20-400)
fn parse_resolution(s: &str) -> Result<u32, String> {
    let value: u32 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&value) {
        return Err(format!(
            "Resolution must be between {} and {}, got {}",
            MIN_RESOLUTION, MAX_RESOLUTION, value
        ));
    }
    Ok(value)
}

/// Parse and validate braille threshold (1-254)
fn parse_threshold(s: &str) -> Result<u8, String> {
    let value: u8 = s.parse().map_err(|_| format!("'{}' is not a valid threshold", s))?;
    if !(1..=254).contains(&value) {
        return Err(format!("Threshold must be between 1 and 254, got {}", value));
    }
    Ok(value)
}

/// Parse and validate a contrast or brightness percentage (50-200)
fn parse_percent(s: &str) -> Result<u16, String> {
    let value: u16 = s
        .trim_end_matches('%')
        .parse()
        .map_err(|_| format!("'{}' is not a valid percentage", s))?;
    if !(50..=200).contains(&value) {
        return Err(format!("Percentage must be between 50 and 200, got {}", value));
    }
    Ok(value)
}

/// Render procedural images as glyph art
#[derive(Parser, Debug)]
#[command(name = "glyphcast")]
#[command(version, about = "Convert images and animations into glyph art", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a procedural pattern and print every frame
    Render(RenderArgs),
    /// List available glyph formats
    Formats,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RenderArgs {
    /// Source pattern
    #[arg(default_value = "gradient")]
    pub pattern: PatternKind,

    /// Number of frames (1 = still image)
    #[arg(long, short = 'n', default_value = "1")]
    pub frames: usize,

    /// Source width in pixels
    #[arg(long, default_value = "320")]
    pub width: u32,

    /// Source height in pixels
    #[arg(long, default_value = "240")]
    pub height: u32,

    /// Frame delay in milliseconds for animations
    #[arg(long)]
    pub delay: Option<u64>,

    /// Glyph format
    #[arg(long, short)]
    pub format: Option<CharacterSet>,

    /// Output width driver (20-400, 200 max for animations)
    #[arg(long, short, value_parser = parse_resolution)]
    pub resolution: Option<u32>,

    /// Braille dot threshold (1-254)
    #[arg(long, value_parser = parse_threshold)]
    pub threshold: Option<u8>,

    /// Contrast percentage (50-200)
    #[arg(long, value_parser = parse_percent)]
    pub contrast: Option<u16>,

    /// Brightness percentage (50-200)
    #[arg(long, value_parser = parse_percent)]
    pub brightness: Option<u16>,

    /// Invert brightness (for light terminals)
    #[arg(long)]
    pub invert: bool,

    /// Disable Floyd-Steinberg dithering
    #[arg(long)]
    pub no_dither: bool,

    /// Emit 24-bit ANSI color per glyph
    #[arg(long)]
    pub color: bool,
}

impl RenderArgs {
    /// Apply command-line overrides on top of configured defaults.
    pub fn conversion(&self, defaults: ConversionConfig) -> ConversionConfig {
        let mut config = defaults;
        if let Some(format) = self.format {
            config.format = format.into();
        }
        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(contrast) = self.contrast {
            config.contrast = contrast;
        }
        if let Some(brightness) = self.brightness {
            config.brightness = brightness;
        }
        config.invert |= self.invert;
        if self.no_dither {
            config.dithering = false;
        }
        config.colorized |= self.color;
        config
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::CharSet;

    fn render_args(argv: &[&str]) -> RenderArgs {
        let mut full = vec!["glyphcast", "render"];
        full.extend_from_slice(argv);
        match Args::parse_from(full).command {
            Command::Render(args) => args,
            other => panic!("Expected Render subcommand, got {:?}", other),
        }
    }

    #[test]
    fn test_render_defaults() {
        let args = render_args(&[]);
        assert_eq!(args.pattern, PatternKind::Gradient);
        assert_eq!(args.frames, 1);
        assert_eq!((args.width, args.height), (320, 240));
        assert!(args.format.is_none());
        assert!(args.resolution.is_none());
        assert!(!args.invert);
        assert!(!args.no_dither);
        assert!(!args.color);
    }

    #[test]
    fn test_render_pattern_and_frames() {
        let args = render_args(&["rings", "-n", "12", "--delay", "40"]);
        assert_eq!(args.pattern, PatternKind::Rings);
        assert_eq!(args.frames, 12);
        assert_eq!(args.delay, Some(40));
    }

    #[test]
    fn test_overrides_apply_on_defaults() {
        let args = render_args(&[
            "--format",
            "blocks",
            "-r",
            "80",
            "--contrast",
            "150%",
            "--no-dither",
            "--color",
        ]);
        let config = args.conversion(ConversionConfig::default());
        assert_eq!(config.format, CharSet::Blocks);
        assert_eq!(config.resolution, 80);
        assert_eq!(config.contrast, 150);
        assert_eq!(config.brightness, 100);
        assert!(!config.dithering);
        assert!(config.colorized);
    }

    #[test]
    fn test_missing_overrides_keep_defaults() {
        let defaults = ConversionConfig {
            format: CharSet::Dense,
            invert: true,
            ..Default::default()
        };
        let config = render_args(&[]).conversion(defaults);
        assert_eq!(config, defaults);
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert!(Args::try_parse_from(["glyphcast", "render", "-r", "10"]).is_err());
        assert!(Args::try_parse_from(["glyphcast", "render", "-r", "401"]).is_err());
        assert!(Args::try_parse_from(["glyphcast", "render", "--threshold", "0"]).is_err());
        assert!(Args::try_parse_from(["glyphcast", "render", "--brightness", "49"]).is_err());
    }

    #[test]
    fn test_parse_percent_accepts_suffix() {
        assert_eq!(parse_percent("120%"), Ok(120));
        assert_eq!(parse_percent("200"), Ok(200));
        assert!(parse_percent("abc").is_err());
    }

    #[test]
    fn test_formats_subcommand() {
        let args = Args::parse_from(["glyphcast", "formats"]);
        assert!(matches!(args.command, Command::Formats));
    }

    #[test]
    fn test_config_subcommands() {
        let args = Args::parse_from(["glyphcast", "config", "show"]);
        assert!(matches!(
            args.command,
            Command::Config {
                action: ConfigAction::Show
            }
        ));

        let args = Args::parse_from(["glyphcast", "config", "init"]);
        assert!(matches!(
            args.command,
            Command::Config {
                action: ConfigAction::Init
            }
        ));
    }

    #[test]
    fn test_global_config_option() {
        let args = Args::parse_from(["glyphcast", "formats", "-c", "/tmp/test.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/test.toml")));
    }
}
