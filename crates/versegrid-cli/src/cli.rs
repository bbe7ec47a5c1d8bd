//! CLI argument definitions using Clap v4

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

use versegrid::{types::BaseDirection, Options, RenderParams, ShapingParams, UniformPolicy};

/// Render a `field|field|text` verse corpus as a grayscale byte image
#[derive(Parser, Debug)]
#[command(name = "versegrid")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Corpus file, one `field|field|text` record per line
    pub input: PathBuf,

    /// Image to write; the extension picks the format (png, pgm, bmp, tiff, jpg, gif)
    #[arg(default_value = "quran_visualization.png")]
    pub output: PathBuf,

    /// Number of grid rows (default: floor of the square root of the byte count)
    #[arg(long = "height", value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    /// Paragraph direction for bidi reordering
    #[arg(short = 'd', long = "direction", value_enum, default_value_t = DirectionArg::Auto)]
    pub direction: DirectionArg,

    /// Map code points in logical order, without contextual forms or reordering
    #[arg(long = "no-shaping", action = ArgAction::SetTrue)]
    pub no_shaping: bool,

    /// Keep Arabic diacritics instead of stripping them before shaping
    #[arg(long = "keep-harakat", action = ArgAction::SetTrue)]
    pub keep_harakat: bool,

    /// Do not fold lam-alef pairs into ligatures
    #[arg(long = "no-ligatures", action = ArgAction::SetTrue)]
    pub no_ligatures: bool,

    /// What to do when every cell of the grid holds the same byte
    #[arg(long = "on-uniform", value_enum, default_value_t = UniformArg::Zero)]
    pub on_uniform: UniformArg,

    /// Suppress the status lines printed on success
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log pipeline progress to stderr (repeat for more detail)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Auto,
    Ltr,
    Rtl,
}

impl From<DirectionArg> for BaseDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Auto => BaseDirection::Auto,
            DirectionArg::Ltr => BaseDirection::LeftToRight,
            DirectionArg::Rtl => BaseDirection::RightToLeft,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum UniformArg {
    /// Write an all-black image
    Zero,
    /// Fail the run
    Error,
}

impl From<UniformArg> for UniformPolicy {
    fn from(arg: UniformArg) -> Self {
        match arg {
            UniformArg::Zero => UniformPolicy::Zero,
            UniformArg::Error => UniformPolicy::Error,
        }
    }
}

impl Cli {
    /// Library options equivalent to these arguments
    pub fn options(&self) -> Options {
        Options {
            shaping: !self.no_shaping,
            shaping_params: ShapingParams {
                direction: self.direction.into(),
                delete_harakat: !self.keep_harakat,
                ligatures: !self.no_ligatures,
            },
            grid_height: self.height,
            render_params: RenderParams {
                uniform: self.on_uniform.into(),
            },
        }
    }

    /// Default log filter when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        match Cli::try_parse_from(args) {
            Ok(cli) => cli,
            Err(e) => unreachable!("{args:?} rejected: {e}"),
        }
    }

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["versegrid", "quran.txt"]);
        assert_eq!(cli.input, PathBuf::from("quran.txt"));
        assert_eq!(cli.output, PathBuf::from("quran_visualization.png"));
        assert_eq!(cli.options(), Options::default());
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn test_all_flags() {
        let cli = parse(&[
            "versegrid",
            "in.txt",
            "out.pgm",
            "--height",
            "12",
            "--direction",
            "rtl",
            "--no-shaping",
            "--keep-harakat",
            "--no-ligatures",
            "--on-uniform",
            "error",
            "-vv",
        ]);
        let options = cli.options();
        assert!(!options.shaping);
        assert_eq!(options.grid_height, Some(12));
        assert_eq!(options.shaping_params.direction, BaseDirection::RightToLeft);
        assert!(!options.shaping_params.delete_harakat);
        assert!(!options.shaping_params.ligatures);
        assert_eq!(options.render_params.uniform, UniformPolicy::Error);
        assert_eq!(cli.log_filter(), "debug");
    }

    #[test]
    fn test_zero_height_rejected() {
        assert!(Cli::try_parse_from(["versegrid", "in.txt", "--height", "0"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["versegrid", "in.txt", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_input_required() {
        assert!(Cli::try_parse_from(["versegrid"]).is_err());
    }
}
