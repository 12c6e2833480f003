//! the args for running wlispc

use std::num::NonZeroUsize;
use std::path::PathBuf;
use wlisp_cli_common::{ColorArgs, LoggingArgs};
use wlispc::FailurePolicy;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "An indentation-based Lisp syntax transpiler")]
pub struct Args {
    #[command(flatten)]
    logging: LoggingArgs,
    #[command(flatten)]
    color: ColorArgs,

    /// The input file or directory
    #[clap(default_value = ".", value_name = "input", value_hint = clap::ValueHint::AnyPath)]
    pub input: PathBuf,
    /// Specify where to place compiled lisp files, mirroring the layout of the input. Compiled
    /// files are placed next to their sources by default.
    #[clap(short = 'd', long = "output-directory", value_hint = clap::ValueHint::DirPath)]
    pub output_directory: Option<PathBuf>,
    /// The maximum number of files compiled at once. Defaults to the number of cpus.
    #[clap(short = 'j', long, env = "WLISPC_JOBS")]
    pub jobs: Option<NonZeroUsize>,
    /// Keep compiling the remaining files after one of them fails
    #[clap(long)]
    keep_going: bool,
}

impl Args {
    pub fn logging(&self) -> &LoggingArgs {
        &self.logging
    }

    pub fn color(&self) -> &ColorArgs {
        &self.color
    }

    /// Gets what to do when a file fails to compile
    pub fn failure_policy(&self) -> FailurePolicy {
        if self.keep_going {
            FailurePolicy::KeepGoing
        } else {
            FailurePolicy::FailFast
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn test_args_parsing() {
        let test = "wlispc file.wlisp";
        let args = Args::try_parse_from(test.split(" ")).expect("could not parse test string");
        assert_eq!(args.input, Path::new("file.wlisp"));
        assert_eq!(args.output_directory, None);
        assert_eq!(args.failure_policy(), FailurePolicy::FailFast);
    }

    #[test]
    fn test_input_defaults_to_current_directory() {
        let args = Args::try_parse_from(["wlispc"]).expect("could not parse test string");
        assert_eq!(args.input, Path::new("."));
    }

    #[test]
    fn test_options() {
        let test = "wlispc src -d out -j 4 --keep-going";
        let args = Args::try_parse_from(test.split(" ")).expect("could not parse test string");
        assert_eq!(args.input, Path::new("src"));
        assert_eq!(args.output_directory.as_deref(), Some(Path::new("out")));
        assert_eq!(args.jobs.map(NonZeroUsize::get), Some(4));
        assert_eq!(args.failure_policy(), FailurePolicy::KeepGoing);
    }

    #[test]
    fn test_zero_jobs_rejected() {
        assert!(Args::try_parse_from(["wlispc", "-j", "0"]).is_err());
    }
}
