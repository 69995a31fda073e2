//! # Command Handlers
//!
//! `run()` parses arguments, installs the log subscriber, builds the
//! [`BarcodeApi`] and dispatches. Handlers call the API and hand the
//! resulting `CmdResult` to the printing helpers; nothing here decides
//! business outcomes.
//!
//! The operator console (`session`) keeps one `AppContext` for the life of
//! the process. Errors inside the console are printed and the loop goes on;
//! errors from one-shot commands bubble up to `main`.

use super::console::{parse_line, ConsoleCommand, HELP};
use super::print::{print_config, print_error, print_listing, print_messages, print_stats};
use super::setup::{Cli, Commands};
use super::viewer::open_in_viewer;
use clap::Parser;
use directories::ProjectDirs;
use scansheet::api::{BarcodeApi, CmdMessage, ConfigAction};
use scansheet::config::SheetConfig;
use scansheet::error::Result;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: BarcodeApi,
    /// Most recent sheet written in this process, for `open`
    last_sheet: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Generate {
            count,
            output,
            open,
        }) => handle_generate(&mut ctx, count, output.as_deref(), open),
        Some(Commands::Session) | None => handle_session(&mut ctx),
        Some(Commands::Config) => handle_config(&ctx),
        Some(Commands::Init) => handle_init(&ctx),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = cli.config_dir.clone().unwrap_or_else(default_config_dir);
    let config = SheetConfig::load(&config_dir)?;
    tracing::debug!(dir = %config_dir.display(), "configuration loaded");

    Ok(AppContext {
        api: BarcodeApi::new(config, config_dir)?,
        last_sheet: None,
    })
}

fn default_config_dir() -> PathBuf {
    ProjectDirs::from("com", "scansheet", "scansheet")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".scansheet"))
}

fn handle_generate(
    ctx: &mut AppContext,
    count: i64,
    output: Option<&Path>,
    open: bool,
) -> Result<()> {
    let result = ctx.api.generate(count)?;
    print_messages(&result.messages);
    handle_print(ctx, output, open)
}

fn handle_print(ctx: &mut AppContext, output: Option<&Path>, open: bool) -> Result<()> {
    let result = ctx.api.print(output)?;
    print_messages(&result.messages);

    if let Some(sheet) = result.sheet {
        if open {
            open_sheet(&sheet.path);
        }
        ctx.last_sheet = Some(sheet.path);
    }
    Ok(())
}

/// A viewer that fails to start never undoes the written sheet.
fn open_sheet(path: &Path) {
    if let Err(e) = open_in_viewer(path) {
        print_error(&e.to_string());
    }
}

fn handle_session(ctx: &mut AppContext) -> Result<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        print_messages(&[CmdMessage::info("Type 'help' for commands.")]);
    }

    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }
        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        match parse_line(&line) {
            ConsoleCommand::Quit => break,
            command => {
                if let Err(e) = handle_console_command(ctx, command) {
                    print_error(&e.to_string());
                }
            }
        }
    }
    Ok(())
}

fn handle_console_command(ctx: &mut AppContext, command: ConsoleCommand) -> Result<()> {
    match command {
        ConsoleCommand::Generate(count) => {
            let result = ctx.api.generate_from_input(&count)?;
            print_messages(&result.messages);
        }
        ConsoleCommand::Scan(input) => {
            let result = ctx.api.confirm(&input)?;
            print_messages(&result.messages);
        }
        ConsoleCommand::List => {
            let result = ctx.api.list()?;
            print_listing(&result.listed);
            print_messages(&result.messages);
        }
        ConsoleCommand::Stats => {
            let result = ctx.api.stats()?;
            if let Some(stats) = result.stats {
                print_stats(&stats, ctx.api.session().generated_at());
            }
        }
        ConsoleCommand::Print(output) => handle_print(ctx, output.as_deref(), false)?,
        ConsoleCommand::Open => match &ctx.last_sheet {
            Some(path) => open_sheet(path),
            None => print_messages(&[CmdMessage::info("Nothing printed yet.")]),
        },
        ConsoleCommand::Help => println!("{}", HELP),
        ConsoleCommand::Quit | ConsoleCommand::Empty => {}
    }
    Ok(())
}

fn handle_config(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.config(ConfigAction::Show)?;
    if let Some(config) = &result.config {
        print_config(config);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.config(ConfigAction::Init)?;
    print_messages(&result.messages);
    Ok(())
}
