//! CLI argument definitions using clap

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Run the executable scripts shipped with this package
///
/// Only the first token is interpreted (`-h`, `--help`, `--list` or a
/// script name); everything else goes to the script untouched. The
/// package root and log verbosity come from `XSHEEL_ROOT` and
/// `XSHEEL_DEBUG` so no leading flag can shadow a script name.
#[derive(Parser, Debug)]
#[command(name = "xsheel")]
#[command(author, about, long_about = None)]
#[command(disable_help_flag = true, disable_help_subcommand = true)]
pub struct DispatchCli {
    /// Script name followed by its arguments, or -h/--help/--list
    #[arg(
        value_name = "SCRIPT",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub argv: Vec<OsString>,
}

/// Regenerate the manifest's command mapping from the package scripts
#[derive(Parser, Debug)]
#[command(name = "xsheel-sync")]
#[command(author, version, about, long_about = None)]
pub struct SyncCli {
    /// Package root (default: parent of the executable's directory)
    #[arg(short = 'C', long, env = "XSHEEL_ROOT", value_hint = ValueHint::DirPath)]
    pub package_root: Option<PathBuf>,

    /// Increase log verbosity (-d, -dd, -ddd)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Print the regenerated manifest instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        DispatchCli::command().debug_assert();
        SyncCli::command().debug_assert();
    }

    fn argv(args: &[&str]) -> Vec<OsString> {
        let mut full = vec!["xsheel"];
        full.extend_from_slice(args);
        DispatchCli::try_parse_from(full).unwrap().argv
    }

    #[test]
    fn given_script_with_flags_when_parsing_then_captured_verbatim() {
        assert_eq!(
            argv(&["mwt", "--list", "-h", "x"]),
            vec!["mwt", "--list", "-h", "x"]
        );
    }

    #[rstest]
    #[case(&["-h"])]
    #[case(&["--help"])]
    #[case(&["--list"])]
    #[case(&["-V"])]
    #[case(&["--version"])]
    #[case(&["-d", "deploy"])]
    #[case(&["-C", "/pkg", "deploy"])]
    #[case(&["--bogus"])]
    #[case(&["help"])]
    #[case(&[""])]
    fn given_any_leading_token_when_parsing_then_left_for_dispatch(#[case] args: &[&str]) {
        assert_eq!(argv(args), args.to_vec());
    }

    #[test]
    fn given_no_args_when_parsing_then_empty() {
        assert!(argv(&[]).is_empty());
    }
}
