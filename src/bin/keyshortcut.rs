// Keyshortcut Demo CLI
// Binds a handful of shortcuts and dispatches terminal key presses through them

#[path = "../terminal/mod.rs"]
mod terminal;

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use keyshortcut_core::settings::default_settings_content;
use keyshortcut_core::{
    Binding, Dispatcher, EventPump, KeyEvent, KeyShortcut, Modifier, Settings,
};

/// Terminal keyboard shortcut dispatcher demo
#[derive(Parser, Debug)]
#[command(name = "keyshortcut")]
#[command(author = "keyshortcut contributors")]
#[command(version)]
#[command(about = "Dispatch terminal key presses through keyboard shortcuts", long_about = None)]
struct Args {
    /// TOML settings file
    #[arg(short, long, value_name = "SETTINGS")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Log every key press together with the shortcuts it fired
    #[arg(short, long)]
    log_shortcuts: bool,

    /// Print the default settings file and exit
    #[arg(long)]
    print_default_settings: bool,
}

/// Print a line that survives raw mode
fn say(message: &str) {
    let mut stdout = std::io::stdout();
    let _ = write!(stdout, "{}\r\n", message);
    let _ = stdout.flush();
}

fn open_palette(_event: &KeyEvent) {
    say("palette opened");
}

fn print_page(_event: &KeyEvent) {
    say("printing page");
}

fn show_help(_event: &KeyEvent) {
    say("shortcuts: q / Ctrl-c quit, h help, p print, Ctrl-Alt-p palette, Esc swallowed");
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| write!(buf, "[{}] {}\r\n", record.level(), record.args()))
        .init();
}

fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    match &args.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display())),
        None => Settings::load_default().context("loading default settings"),
    }
}

/// Mount the demo shortcuts; they stay registered while the returned guards live
fn mount_shortcuts<'d>(
    dispatcher: &'d Dispatcher,
    running: &Arc<AtomicBool>,
    log_shortcuts: bool,
) -> anyhow::Result<Vec<KeyShortcut<'d>>> {
    let quit = {
        let running = running.clone();
        move |_: &KeyEvent| running.store(false, Ordering::SeqCst)
    };

    let help = Binding::new("h").with_action(show_help);
    let help = if log_shortcuts { help.with_log() } else { help };

    let bindings = vec![
        Binding::new("q")
            .with_action(quit.clone())
            .with_label("quit")
            .with_stop_propagation(),
        Binding::parse("Ctrl-c")?
            .with_action(quit)
            .with_label("quit")
            .with_prevent_default()
            .with_stop_propagation(),
        help,
        Binding::new("p").with_action(print_page),
        Binding::new("p")
            .with_modifier(Modifier::Ctrl)
            .with_modifier(Modifier::Alt)
            .with_action(open_palette),
        Binding::new("Escape").with_label("escape").with_stop_propagation(),
    ];

    bindings
        .into_iter()
        .map(|binding| KeyShortcut::attach(dispatcher, binding).map_err(Into::into))
        .collect()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if args.print_default_settings {
        print!("{}", default_settings_content());
        return Ok(());
    }

    init_logging(args.verbose);
    let settings = load_settings(&args)?;
    if let Some(path) = settings.source_path() {
        log::debug!("loaded settings from {}", path.display());
    }

    let dispatcher = Dispatcher::with_config(settings.to_dispatcher_config());
    log::debug!("dispatcher config: {:?}", dispatcher.config());
    let running = Arc::new(AtomicBool::new(true));
    let shortcuts = mount_shortcuts(&dispatcher, &running, args.log_shortcuts)?;
    log::debug!("mounted {} shortcut(s)", shortcuts.len());

    say("press h for help, q to quit");
    let stats = {
        let _raw = terminal::RawModeGuard::enable().context("enabling raw mode")?;
        let mut source = terminal::CrosstermSource::new(running.clone());
        EventPump::new(&dispatcher).run(&mut source)?
    };

    drop(shortcuts);
    dispatcher.close();
    log::info!(
        "{} key event(s), {} dispatched, {} shortcut(s) fired",
        stats.received,
        stats.dispatched,
        stats.fired
    );
    Ok(())
}
