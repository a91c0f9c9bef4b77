//! main.rs
//! Entry point for gotry

use gotry_tui::commands::{self, GitPolicy};
use gotry_tui::config::Config;
use gotry_tui::core::Result;
use gotry_tui::utils::cli::{self, CliAction, RunOptions, handle_args};
use gotry_tui::utils::init_logging;

use std::process::ExitCode;

fn main() -> ExitCode {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stderr = std::io::stderr();
        let _ = crossterm::execute!(
            stderr,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[gotry] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    init_logging();

    let action = handle_args();
    if let CliAction::Usage(message) = &action {
        cli::print_usage_error(message);
        return ExitCode::from(2);
    }

    match run(action) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "gotry failed");
            eprintln!("gotry: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(action: CliAction) -> Result<()> {
    match action {
        CliAction::Help => cli::print_help(),
        CliAction::Version => cli::print_version(),
        CliAction::Usage(_) => {}
        CliAction::Init(shell) => print!("{}", shell.script()),
        CliAction::ShowConfig => {
            let path = Config::default_path();
            let config = if path.exists() {
                Config::from_file(&path)?
            } else {
                Config::default()
            };
            print!("{}", config.describe(&path));
        }
        CliAction::InitConfig => {
            let path = Config::default_path();
            Config::generate_default(&path).map_err(|e| gotry_tui::core::Error::Config {
                path: path.clone(),
                message: e.to_string(),
            })?;
            eprintln!("Default config written to {}", path.display());
        }
        CliAction::Clone { url, options } => {
            let (_, base) = prepare(&options)?;
            let dest = commands::clone_workspace(&base, &url)?;
            println!("{}", dest.display());
        }
        CliAction::Run { query, options } => {
            let (config, base) = prepare(&options)?;
            let outcome = commands::pick(&base, &query, &config)?;
            let policy = GitPolicy::resolve(&config, options.no_git, options.no_commit);
            if let Some(path) = commands::resolve_outcome(outcome, &base, policy)? {
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}

/// Loads the config and makes sure the workspace directory exists.
fn prepare(options: &RunOptions) -> Result<(Config, std::path::PathBuf)> {
    let config = Config::load();
    let base = options
        .path
        .clone()
        .unwrap_or_else(|| config.workspace().path().to_path_buf());
    commands::ensure_workspace(&base)?;
    tracing::debug!(base = %base.display(), "workspace ready");
    Ok((config, base))
}
