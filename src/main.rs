use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;

use notepilot::backend::worker::spawn_worker;
use notepilot::backend::{CompletionBackend, HttpBackend};
use notepilot::config;
use notepilot::context::NotebookContext;
use notepilot::draft::DraftBuffer;
use notepilot::panel::PanelState;

/// Terminal copilot panel for notebook drafts
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Notebook identifier embedded in prompts
    #[arg(long, default_value = "scratch")]
    notebook: String,

    /// Markdown draft file; edits and accepted suggestions are written back
    #[arg(long)]
    draft: Option<PathBuf>,

    /// JSON file with notebook context records ({"sources": [], "notes": []})
    #[arg(long)]
    context: Option<PathBuf>,

    /// Config file (defaults to ~/.config/notepilot/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    #[cfg(debug_assertions)]
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    };

    let context = match &cli.context {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str::<NotebookContext>(&content)?
        }
        None => NotebookContext::default(),
    };

    let mut draft = match cli.draft.clone() {
        Some(path) => DraftBuffer::from_path(path),
        None => DraftBuffer::default(),
    };

    // Worker thread owns the HTTP client; the UI never blocks on the network
    let (request_tx, request_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();
    let backend =
        HttpBackend::new(&config.backend).map(|b| Box::new(b) as Box<dyn CompletionBackend>);
    spawn_worker(backend, request_rx, response_tx);

    let mut panel = PanelState::new(&config, cli.notebook, context, request_tx, response_rx);

    let terminal = ratatui::init();
    let result = run(terminal, &mut panel, &mut draft);
    ratatui::restore();
    result
}

fn run(mut terminal: DefaultTerminal, panel: &mut PanelState, draft: &mut DraftBuffer) -> Result<()> {
    loop {
        // Apply any completion outcomes that arrived since the last tick
        panel.poll_outcomes(draft);

        terminal.draw(|frame| panel.render(frame, draft))?;

        // Poll so pending outcomes keep the UI live without a keypress
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (avoid duplicates)
                if key.kind == KeyEventKind::Press {
                    panel.handle_key_event(key, draft);
                }
            }
        }

        if panel.should_quit {
            break;
        }
    }

    Ok(())
}
