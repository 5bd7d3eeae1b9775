use std::io::{self, BufRead, IsTerminal, Write};
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use hbnb::console::{Console, Flow};
use hbnb::construct::Registry;
use hbnb::error::Result;
use hbnb::settings::Settings;

/// Logs go to stderr so that stdout carries nothing but command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hbnb=warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run() -> Result<()> {
    let settings = Settings::load()?;
    let registry = Registry::open(settings.persistence_mode())?;
    info!(records = registry.len(), mode = ?registry.persistor().mode(), "registry opened");

    let mut console = Console::new(registry);
    // the prompt is only useful to someone typing
    let interactive = io::stdin().is_terminal();
    let mut input = io::stdin().lock();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        if interactive {
            write!(stdout, "{}", settings.prompt)?;
            stdout.flush()?;
        }
        line.clear();
        if input.read_line(&mut line)? == 0 {
            if interactive {
                writeln!(stdout)?;
            }
            break;
        }
        if console.execute(&line, &mut stdout)? == Flow::Stop {
            break;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "console stopped");
            eprintln!("hbnb: {e}");
            ExitCode::FAILURE
        }
    }
}
