//! iocview - IoC scan report viewer
//!
//! Lists the files of a scan report and opens each one in an indicator
//! panel: paginated indicator table plus recommended fixes.
//!
//! Usage: iocview [FILE] [--help] [--version]
//! Pipe:  curl -s localhost:8000/api/analyze ... | iocview

mod app;
mod config;
mod logging;
mod modules;
mod report;
mod types;
mod ui;

use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use report::Report;
use std::io::{self, stdout, IsTerminal, Read};
use std::path::Path;
use std::time::Duration;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--version" || a == "-v") {
        println!("iocview {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(args: &[String]) -> Result<()> {
    let config = config::Config::load().context("Failed to load configuration")?;

    if let Err(e) = logging::init(&config.log_level) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    let report = load_report(args)?;
    if report.is_empty() {
        log::warn!("Report contains no files");
    }
    let app = App::new(config, report);
    run_app(app)
}

/// First argument that is not a flag
fn report_path(args: &[String]) -> Option<&str> {
    args.iter().map(String::as_str).find(|a| !a.starts_with('-'))
}

fn load_report(args: &[String]) -> Result<Report> {
    if let Some(path) = report_path(args) {
        return Report::load(Path::new(path));
    }

    match read_piped_input()? {
        Some(input) => {
            let report = Report::parse(&input, "stdin")?;
            reattach_stdin_to_tty()
                .context("Failed to reattach stdin to terminal. Are you running in a TTY?")?;
            Ok(report)
        }
        None => anyhow::bail!("No report given. Usage: iocview <FILE> (or pipe JSON into iocview)"),
    }
}

const MAX_PIPE_SIZE: u64 = 4 * 1024 * 1024;

/// Read all of stdin if it's a pipe (not a terminal).
/// Returns None if stdin is a terminal or the pipe was empty.
fn read_piped_input() -> Result<Option<String>> {
    if io::stdin().is_terminal() {
        return Ok(None);
    }

    let input = read_capped(io::stdin(), MAX_PIPE_SIZE).context("Could not read stdin")?;

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    Ok(Some(trimmed.to_string()))
}

/// Read `reader` to the end, failing if it holds more than `limit` bytes.
fn read_capped(reader: impl Read, limit: u64) -> Result<String> {
    let mut bytes = Vec::new();
    reader.take(limit + 1).read_to_end(&mut bytes)?;
    if bytes.len() as u64 > limit {
        anyhow::bail!("input exceeds {} bytes; pass the report as a file instead", limit);
    }
    String::from_utf8(bytes).context("input is not valid UTF-8")
}

/// After reading piped stdin, reopen /dev/tty as fd 0 so crossterm
/// can read keyboard events.
#[cfg(unix)]
fn reattach_stdin_to_tty() -> Result<()> {
    use std::os::unix::io::AsRawFd;

    let tty = std::fs::File::open("/dev/tty")
        .context("Cannot open /dev/tty: pipe mode requires a controlling terminal")?;

    let result = unsafe { libc::dup2(tty.as_raw_fd(), libc::STDIN_FILENO) };
    if result == -1 {
        anyhow::bail!("dup2 failed: could not reattach stdin to /dev/tty");
    }

    // fd 0 keeps its own copy of /dev/tty
    drop(tty);

    Ok(())
}

#[cfg(not(unix))]
fn reattach_stdin_to_tty() -> Result<()> {
    anyhow::bail!("Pipe mode is only supported on Unix systems (Linux, macOS)")
}

fn print_help() {
    println!(
        r#"iocview - IoC scan report viewer

USAGE:
    iocview <FILE>
    cat results.json | iocview

OPTIONS:
    -h, --help       Print help information
    -v, --version    Print version information

REPORT FORMAT (JSON):
    {{ "file": "...", "indicators": [...], "recommendedFixes": [...] }}
    an array of such objects, or {{ "results": [...] }}

KEYBINDINGS:
    j/k              Select file / scroll fixes
    Enter            Open file / activate button
    Tab, Shift-Tab   Move focus inside the panel
    h/l              Previous / next indicator page
    g                Show more / fewer fix groups
    Esc              Close panel
    t                Cycle theme
    q                Quit

CONFIG:
    ~/.config/iocview/config.toml

LOG:
    ~/.cache/iocview/iocview.log (level via RUST_LOG or log_level)
"#
    );
}

fn run_app(mut app: App) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Restore the terminal on panic (raw mode + alternate screen)
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        let _ = execute!(std::io::stdout(), crossterm::cursor::Show);
        original_hook(info);
    }));

    let result = main_loop(&mut terminal, &mut app);

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        app.update_timers();

        // Poll with timeout so flash messages expire without input
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
