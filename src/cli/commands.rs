use std::ffi::OsString;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{DispatchCli, SyncCli};
use crate::cli::output;
use crate::cli::CliResult;
use crate::config::Settings;
use crate::domain::{DomainError, RunOutcome, ScriptName, ScriptSet};
use crate::exitcode;
use crate::infrastructure::{InfraError, ServiceContainer};
use crate::util::path::package_root_of;

/// Environment variable overriding the package root.
pub const ROOT_ENV: &str = "XSHEEL_ROOT";

/// What a dispatcher command line asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    /// `-h`/`--help`: usage, success
    Help,
    /// `--list`: script names on stdout
    List,
    /// No (or an empty) script name: usage, failure
    Usage,
    /// A name no script can carry; reported like a failed lookup
    Unknown(String),
    /// A validated script name and the arguments it receives
    Run {
        name: ScriptName,
        args: Vec<OsString>,
    },
}

impl Invocation {
    /// Interpret the first token. Script names are validated here, before
    /// anything looks at the filesystem.
    pub fn from_cli(cli: &DispatchCli) -> CliResult<Self> {
        let Some((first, rest)) = cli.argv.split_first() else {
            return Ok(Invocation::Usage);
        };
        let Some(raw) = first.to_str() else {
            return Ok(Invocation::Unknown(first.to_string_lossy().into_owned()));
        };
        match raw {
            "" => Ok(Invocation::Usage),
            "-h" | "--help" => Ok(Invocation::Help),
            "--list" => Ok(Invocation::List),
            _ => Ok(Invocation::Run {
                name: ScriptName::parse(raw)?,
                args: rest.to_vec(),
            }),
        }
    }
}

/// Usage block listing the currently available scripts.
pub fn usage(scripts: &ScriptSet) -> String {
    let listing = if scripts.is_empty() {
        "  (none found)".to_string()
    } else {
        scripts
            .names()
            .map(|n| format!("  {}", n))
            .join("\n")
    };

    [
        "Usage:",
        "  xsheel <script> [args...]",
        "  xsheel --list",
        "",
        "Scripts:",
        &listing,
        "",
        "Examples:",
        "  xsheel <script> --help",
        "  xsheel --list",
    ]
    .join("\n")
        + "\n"
}

/// Explicit root if given, else derived from the executable location.
pub fn resolve_root(explicit: Option<&Path>) -> CliResult<PathBuf> {
    match explicit {
        Some(root) => Ok(root.to_path_buf()),
        None => {
            let exe = std::env::current_exe()
                .and_then(|p| p.canonicalize())
                .map_err(InfraError::CurrentExe)?;
            package_root_of(&exe).ok_or_else(|| InfraError::RootlessExe(exe).into())
        }
    }
}

fn build_container(root: &Path) -> CliResult<ServiceContainer> {
    let settings = Settings::load(root)?;
    debug!("settings: {:?}", settings);
    Ok(ServiceContainer::new(settings))
}

fn root_from_env() -> Option<PathBuf> {
    std::env::var_os(ROOT_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Run the dispatcher and return the process exit code.
#[instrument(skip(cli))]
pub fn execute_dispatch(cli: &DispatchCli) -> CliResult<i32> {
    let invocation = Invocation::from_cli(cli)?;
    let root = resolve_root(root_from_env().as_deref())?;
    let container = build_container(&root)?;
    let dispatch = &container.dispatch;

    match invocation {
        Invocation::Help => {
            output::diagnostic(&usage(&dispatch.list(&root)));
            Ok(exitcode::OK)
        }
        Invocation::Usage => {
            output::diagnostic(&usage(&dispatch.list(&root)));
            Ok(exitcode::FAILURE)
        }
        Invocation::Unknown(name) => {
            output::error(&DomainError::UnknownScript(name));
            output::diagnostic(&usage(&dispatch.list(&root)));
            Ok(exitcode::FAILURE)
        }
        Invocation::List => {
            for name in dispatch.list(&root).names() {
                output::info(name);
            }
            Ok(exitcode::OK)
        }
        Invocation::Run { name, args } => match dispatch.run(&root, &name, &args) {
            Ok(RunOutcome::SpawnFailed { path, source }) => {
                output::error(&format!("failed to run {}: {}", path.display(), source));
                Ok(exitcode::FAILURE)
            }
            Ok(outcome) => Ok(outcome.exit_code()),
            Err(e) if e.is_unknown_script() => {
                output::error(&e);
                output::diagnostic(&usage(&dispatch.list(&root)));
                Ok(exitcode::FAILURE)
            }
            Err(e) => Err(e.into()),
        },
    }
}

/// Report a command line clap could not parse, followed by the usage block.
pub fn execute_parse_failure(err: clap::Error) -> i32 {
    output::diagnostic(&err);

    // Best effort: a broken root only loses the script listing.
    let scripts = resolve_root(root_from_env().as_deref())
        .and_then(|root| build_container(&root).map(|c| c.dispatch.list(&root)))
        .unwrap_or_default();
    output::diagnostic(&usage(&scripts));
    exitcode::FAILURE
}

/// Run the manifest synchronizer.
#[instrument(skip(cli))]
pub fn execute_sync(cli: &SyncCli) -> CliResult<()> {
    let root = resolve_root(cli.package_root.as_deref())?;
    let container = build_container(&root)?;

    if cli.dry_run {
        let report = container.manifest.plan(&root)?;
        output::info(report.content.trim_end());
        return Ok(());
    }

    let report = container.manifest.sync(&root)?;
    if report.changed {
        // The dispatcher's own entry is not a discovered script.
        let scripts = report.entries.len().saturating_sub(1);
        output::action(
            "synced",
            &format!("{} scripts into {}", scripts, report.path.display()),
        );
    } else {
        output::action("unchanged", &format!("{} already up to date", report.path.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn invocation(args: &[&str]) -> CliResult<Invocation> {
        Invocation::from_cli(&DispatchCli {
            argv: args.iter().map(OsString::from).collect(),
        })
    }

    #[rstest]
    #[case(&[], Invocation::Usage)]
    #[case(&[""], Invocation::Usage)]
    #[case(&["", "x"], Invocation::Usage)]
    #[case(&["-h"], Invocation::Help)]
    #[case(&["--help", "x"], Invocation::Help)]
    #[case(&["--list"], Invocation::List)]
    fn given_leading_token_when_interpreting_then_builtin(
        #[case] args: &[&str],
        #[case] expected: Invocation,
    ) {
        assert_eq!(invocation(args).unwrap(), expected);
    }

    #[rstest]
    #[case("-V")]
    #[case("-d")]
    #[case("-C")]
    #[case("--list2")]
    #[case("help")]
    fn given_other_token_when_interpreting_then_looked_up_as_script(#[case] token: &str) {
        let Invocation::Run { name, args } = invocation(&[token, "x"]).unwrap() else {
            panic!("expected script invocation");
        };
        assert_eq!(name.as_str(), token);
        assert_eq!(args, vec![OsString::from("x")]);
    }

    #[test]
    fn given_path_separator_when_interpreting_then_rejected() {
        assert!(invocation(&["../b"]).is_err());
        assert!(invocation(&["a\\b"]).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn given_non_utf8_name_when_interpreting_then_unknown() {
        use std::os::unix::ffi::OsStringExt;
        let cli = DispatchCli {
            argv: vec![OsString::from_vec(vec![b'x', 0xff])],
        };

        assert!(matches!(
            Invocation::from_cli(&cli).unwrap(),
            Invocation::Unknown(_)
        ));
    }

    #[test]
    fn given_no_scripts_when_rendering_usage_then_none_found() {
        assert!(usage(&ScriptSet::default()).contains("Scripts:\n  (none found)\n"));
    }
}
