//! Command-line argument parsing and help for gotry.
//!
//! `gotry [--path DIR] [--no-git] [--no-commit] [QUERY|URL]` launches the picker (or clones
//! when the argument is a repository URL). `init`, `config` and `version` are subcommands.

use crate::core::git::is_repository_url;
use crate::utils::shell::Shell;

use std::path::PathBuf;

/// Options shared by the picker and the clone flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Overrides `[workspace] path`.
    pub path: Option<PathBuf>,
    pub no_git: bool,
    pub no_commit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    /// Launch the picker with an initial query.
    Run { query: String, options: RunOptions },
    /// Clone a repository into a new dated directory.
    Clone { url: String, options: RunOptions },
    /// Print the shell integration script.
    Init(Shell),
    ShowConfig,
    InitConfig,
    Version,
    Help,
    /// Bad invocation; the message is printed with the usage hint.
    Usage(String),
}

/// Reads the process arguments.
pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_args(&args)
}

/// Parses arguments, excluding the program name.
pub fn parse_args(args: &[String]) -> CliAction {
    match args.first().map(String::as_str) {
        Some("init") => return parse_init(&args[1..]),
        Some("config") => {
            return match &args[1..] {
                [] => CliAction::ShowConfig,
                [flag] if flag == "--init" => CliAction::InitConfig,
                [other, ..] => CliAction::Usage(format!("unexpected argument to config: {other}")),
            };
        }
        Some("version") if args.len() == 1 => return CliAction::Version,
        _ => {}
    }

    let mut options = RunOptions::default();
    let mut positional: Vec<String> = Vec::new();
    let mut iter = args.iter();
    let mut flags_done = false;

    while let Some(arg) = iter.next() {
        if flags_done || !arg.starts_with('-') || arg == "-" {
            positional.push(arg.clone());
            continue;
        }

        match arg.as_str() {
            "--" => flags_done = true,
            "-h" | "--help" => return CliAction::Help,
            "-v" | "--version" => return CliAction::Version,
            "--no-git" => options.no_git = true,
            "--no-commit" => options.no_commit = true,
            "--path" => match iter.next() {
                Some(dir) => options.path = Some(PathBuf::from(dir)),
                None => return CliAction::Usage("--path needs a directory".into()),
            },
            other => match other.strip_prefix("--path=") {
                Some(dir) if !dir.is_empty() => options.path = Some(PathBuf::from(dir)),
                _ => return CliAction::Usage(format!("unknown argument: {other}")),
            },
        }
    }

    match positional.as_slice() {
        [] => CliAction::Run {
            query: String::new(),
            options,
        },
        [arg] if is_repository_url(arg) => CliAction::Clone {
            url: arg.clone(),
            options,
        },
        [arg] => CliAction::Run {
            query: arg.clone(),
            options,
        },
        _ => CliAction::Usage(format!(
            "expected at most one name, url or query, got {}",
            positional.len()
        )),
    }
}

fn parse_init(rest: &[String]) -> CliAction {
    match rest {
        [name] => match Shell::from_name(name) {
            Some(shell) => CliAction::Init(shell),
            None => CliAction::Usage(format!(
                "unsupported shell: {name} (supported: bash, zsh, fish, powershell)"
            )),
        },
        _ => CliAction::Usage("usage: gotry init [bash|zsh|fish|powershell]".into()),
    }
}

pub fn print_version() {
    println!("gotry version {}", env!("CARGO_PKG_VERSION"));
}

pub fn print_usage_error(message: &str) {
    eprintln!("gotry: {message}");
    eprintln!("Try 'gotry --help' for more information.");
}

pub fn print_help() {
    println!(
        r#"gotry (gt) - Ephemeral workspace manager

Manage experimental project directories: fuzzy-search, create, clone and delete
dated directories under one workspace.

USAGE:
  gotry [OPTIONS] [NAME|URL|QUERY]
  gotry init <bash|zsh|fish|powershell>
  gotry config [--init]
  gotry version

ARGS:
  NAME|QUERY              Initial search text; press enter on no match to create it
  URL                     Repository to clone into a new dated directory

OPTIONS:
      --path <DIR>        Override the workspace path
      --no-git            Skip git initialization
      --no-commit         Skip the initial commit
  -h, --help              Print help information
  -v, --version           Print the version

KEYS:
  enter                   Select / create / confirm
  up, ctrl+p              Move up
  down, ctrl+n            Move down
  ctrl+d                  Delete mode, then toggle mark
  space                   Toggle mark (delete mode)
  esc, ctrl+c             Back / quit

ENVIRONMENT:
  GOTRY_CONFIG            Override the default config path
  GOTRY_LOG               Enable logging with a filter (e.g. "debug")
  GOTRY_LOG_FILE          Override the log file location
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliAction {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        parse_args(&args)
    }

    #[test]
    fn no_args_runs_picker() {
        assert_eq!(
            parse(&[]),
            CliAction::Run {
                query: String::new(),
                options: RunOptions::default()
            }
        );
    }

    #[test]
    fn flags_and_query() {
        let expected = CliAction::Run {
            query: "my idea".into(),
            options: RunOptions {
                path: Some(PathBuf::from("/tmp/w")),
                no_git: true,
                no_commit: true,
            },
        };
        assert_eq!(
            parse(&["--no-git", "my idea", "--path", "/tmp/w", "--no-commit"]),
            expected
        );
        assert_eq!(
            parse(&["--path=/tmp/w", "--no-commit", "--no-git", "my idea"]),
            expected
        );
    }

    #[test]
    fn url_argument_clones() {
        assert_eq!(
            parse(&["git@github.com:a/b.git"]),
            CliAction::Clone {
                url: "git@github.com:a/b.git".into(),
                options: RunOptions::default()
            }
        );
    }

    #[test]
    fn subcommands() {
        assert_eq!(parse(&["init", "fish"]), CliAction::Init(Shell::Fish));
        assert!(matches!(parse(&["init", "tcsh"]), CliAction::Usage(_)));
        assert!(matches!(parse(&["init"]), CliAction::Usage(_)));
        assert_eq!(parse(&["config"]), CliAction::ShowConfig);
        assert_eq!(parse(&["config", "--init"]), CliAction::InitConfig);
        assert_eq!(parse(&["version"]), CliAction::Version);
        assert_eq!(parse(&["--version"]), CliAction::Version);
        assert_eq!(parse(&["-h"]), CliAction::Help);
    }

    #[test]
    fn usage_errors() {
        assert!(matches!(parse(&["a", "b"]), CliAction::Usage(_)));
        assert!(matches!(parse(&["--path"]), CliAction::Usage(_)));
        assert!(matches!(parse(&["--bogus"]), CliAction::Usage(_)));
    }

    #[test]
    fn double_dash_allows_dash_queries() {
        assert_eq!(
            parse(&["--", "--weird"]),
            CliAction::Run {
                query: "--weird".into(),
                options: RunOptions::default()
            }
        );
    }
}
