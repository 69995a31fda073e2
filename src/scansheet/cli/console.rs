use std::path::PathBuf;

pub(super) const HELP: &str = "\
Commands:
  generate N      Replace the session with N fresh barcodes
  scan CODE       Check a scanned code (a bare line is a scan too)
  list            Show generated codes and their scan state
  stats           Total, scanned and remaining counts
  print [FILE]    Write the PDF sheet
  open            Open the last printed sheet
  help            Show this help
  quit            Leave the session";

/// One line typed into the operator console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ConsoleCommand {
    /// Raw count text, parsed by the API
    Generate(String),
    Scan(String),
    List,
    Stats,
    Print(Option<PathBuf>),
    Open,
    Help,
    Quit,
    Empty,
}

pub(super) fn parse_line(line: &str) -> ConsoleCommand {
    let line = line.trim();
    if line.is_empty() {
        return ConsoleCommand::Empty;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "generate" | "gen" => ConsoleCommand::Generate(rest.to_string()),
        "scan" => ConsoleCommand::Scan(rest.to_string()),
        "list" | "ls" => ConsoleCommand::List,
        "stats" => ConsoleCommand::Stats,
        "print" if rest.is_empty() => ConsoleCommand::Print(None),
        "print" => ConsoleCommand::Print(Some(PathBuf::from(rest))),
        "open" => ConsoleCommand::Open,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" | "q" => ConsoleCommand::Quit,
        _ => ConsoleCommand::Scan(line.to_string()),
    }
}
