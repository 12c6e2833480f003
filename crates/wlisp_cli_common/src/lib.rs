#![doc = include_str!("../README.md")]

use clap::{value_parser, ArgAction, Args, ValueEnum};
use std::io::{stderr, IsTerminal};
use tracing::level_filters::LevelFilter;

mod logging;

pub use logging::init_logging;

/// Common way to set logging levels
#[derive(Debug, Clone, Copy, Args)]
pub struct LoggingArgs {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[clap(short = 'v', value_parser = value_parser!(u8).range(0..=2), action=ArgAction::Count, conflicts_with="quiet")]
    verbose: u8,
    /// Decrease log verbosity (-q for errors only, -qq for nothing)
    #[clap(short = 'q', value_parser = value_parser!(u8).range(0..=2), action=ArgAction::Count, conflicts_with="verbose")]
    quiet: u8,
}

impl LoggingArgs {
    /// Gets the logging level based on whether `-v[v]` or `-q[q]` has been used,
    pub fn log_level_filter(&self) -> LevelFilter {
        let sum = self.verbose as i8 - self.quiet as i8;
        match sum {
            i8::MIN..=-2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            2..=i8::MAX => LevelFilter::TRACE,
        }
    }
}

/// When to use colored output
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color output when writing to a terminal
    #[default]
    Auto,
    Always,
    Never,
}

/// Common way to control colored output
#[derive(Debug, Clone, Copy, Args)]
pub struct ColorArgs {
    /// Controls when colored output is used
    #[clap(long, value_enum, default_value_t = ColorChoice::Auto, value_name = "WHEN")]
    color: ColorChoice,
}

impl ColorArgs {
    /// The requested color choice
    pub fn choice(&self) -> ColorChoice {
        self.color
    }

    /// Applies this choice to [owo_colors] and returns whether logging should emit ANSI escapes.
    pub fn apply(&self) -> bool {
        match self.color {
            ColorChoice::Auto => {
                owo_colors::unset_override();
                stderr().is_terminal()
            }
            ColorChoice::Always => {
                owo_colors::set_override(true);
                true
            }
            ColorChoice::Never => {
                owo_colors::set_override(false);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestArgs {
        #[command(flatten)]
        logging: LoggingArgs,
        #[command(flatten)]
        color: ColorArgs,
    }

    fn parse(line: &str) -> TestArgs {
        TestArgs::try_parse_from(line.split_whitespace()).expect("could not parse test string")
    }

    #[test]
    fn test_default_level() {
        let args = parse("test");
        assert_eq!(args.logging.log_level_filter(), LevelFilter::INFO);
        assert_eq!(args.color.choice(), ColorChoice::Auto);
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(parse("test -v").logging.log_level_filter(), LevelFilter::DEBUG);
        assert_eq!(parse("test -vv").logging.log_level_filter(), LevelFilter::TRACE);
        assert_eq!(parse("test -q").logging.log_level_filter(), LevelFilter::ERROR);
        assert_eq!(parse("test -qq").logging.log_level_filter(), LevelFilter::OFF);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(TestArgs::try_parse_from(["test", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_color_choice() {
        assert_eq!(parse("test --color never").color.choice(), ColorChoice::Never);
        assert_eq!(parse("test --color always").color.choice(), ColorChoice::Always);
        assert!(TestArgs::try_parse_from(["test", "--color", "sometimes"]).is_err());
    }
}
