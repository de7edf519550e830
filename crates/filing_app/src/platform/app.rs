use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use chrono::Datelike;
use clap::Parser;
use filing_core::{update, year_options, AppState, Msg, EARLIEST_YEAR};
use filing_logging::{filing_debug, filing_info};

use super::config::{AppConfig, Cli};
use super::effects::EffectRunner;
use super::logging;
use super::ui::input::{parse_command, InputCommand, HELP};
use super::ui::render::{render, render_years};

/// Everything the main loop reacts to.
pub enum UiEvent {
    Msg(Msg),
    Input(InputCommand),
    InputError(String),
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli)?;
    logging::initialize(config.log_destination);
    filing_info!("Starting filing client against {}", config.base_url);

    let current_year = u16::try_from(chrono::Local::now().year()).unwrap_or(EARLIEST_YEAR);
    let (ui_tx, ui_rx) = mpsc::channel::<UiEvent>();
    let effects = EffectRunner::new(config.engine_config()?, ui_tx.clone())
        .context("starting download engine")?;

    spawn_input_reader(ui_tx.clone(), current_year);

    // Background tick to coalesce rendering.
    thread::spawn(move || {
        let interval = Duration::from_millis(75);
        while ui_tx.send(UiEvent::Msg(Msg::Tick)).is_ok() {
            thread::sleep(interval);
        }
    });

    let mut out = io::stdout().lock();
    writeln!(out, "{HELP}")?;
    let mut state = AppState::new();
    print_lines(&mut out, render(&state.view()))?;

    while let Ok(event) = ui_rx.recv() {
        match event {
            UiEvent::Msg(Msg::Tick) => {
                if state.consume_dirty() {
                    print_lines(&mut out, render(&state.view()))?;
                }
            }
            UiEvent::Msg(msg) => state = dispatch_msg(state, msg, &effects),
            UiEvent::Input(InputCommand::Msgs(msgs)) => {
                for msg in msgs {
                    state = dispatch_msg(state, msg, &effects);
                }
            }
            UiEvent::Input(InputCommand::ToggleRow(report_id)) => {
                // The checkbox flips first; the state machine is told the result.
                let checked = !state.table().is_checked(&report_id);
                state = dispatch_msg(state, Msg::RowToggled { report_id, checked }, &effects);
            }
            UiEvent::Input(InputCommand::Help) => writeln!(out, "{HELP}")?,
            UiEvent::Input(InputCommand::Years) => {
                writeln!(out, "{}", render_years(&year_options(current_year)))?;
            }
            UiEvent::InputError(message) => writeln!(out, "{message}")?,
            UiEvent::Input(InputCommand::Quit) | UiEvent::Quit => break,
        }
    }

    filing_info!("Filing client shutting down");
    Ok(())
}

fn dispatch_msg(state: AppState, msg: Msg, effects: &EffectRunner) -> AppState {
    filing_debug!("dispatch {:?}", msg);
    let (state, pending) = update(state, msg);
    effects.enqueue(pending);
    state
}

fn spawn_input_reader(ui_tx: mpsc::Sender<UiEvent>, current_year: u16) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let event = match parse_command(&line, current_year) {
                Ok(Some(command)) => UiEvent::Input(command),
                Ok(None) => continue,
                Err(err) => UiEvent::InputError(err.to_string()),
            };
            if ui_tx.send(event).is_err() {
                return;
            }
        }
        let _ = ui_tx.send(UiEvent::Quit);
    });
}

fn print_lines(out: &mut impl Write, lines: Vec<String>) -> io::Result<()> {
    writeln!(out)?;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
