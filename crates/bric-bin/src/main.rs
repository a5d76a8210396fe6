//! bric entrypoint.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::{handle_key, open_file};
use core_config::load_from;
use core_input::Decoder;
use core_render::render;
use core_state::{EditorState, HELP_MESSAGE, Settings};
use core_terminal::{CrosstermBackend, StdTerminal, TerminalGuard, get_window_size};
use core_text::Document;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Instant;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "bric.log";

#[derive(Parser, Debug)]
#[command(name = "bric", version, about = "bric terminal text editor")]
struct Args {
    /// File to open. A missing file starts empty and is created on first save.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `bric.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    /// Parse arguments, set up logging and load the document before the
    /// terminal enters raw mode, so `--help` and load errors print normally.
    fn run(&mut self) -> Result<EditorRuntime<'_>> {
        let args = Args::parse();
        self.configure_logging()?;
        Self::install_panic_hook();

        info!(target: "runtime", "startup");
        let state = Self::load_editor_state(&args)?;
        let decoder = Decoder::new(state.settings.escape_timeout);

        let mut guard = self.backend.enter_guard()?;
        guard.set_title("bric")?;
        let term = StdTerminal::spawn().context("failed to start the stdin reader")?;

        Ok(EditorRuntime {
            state,
            decoder,
            term,
            _terminal_guard: guard,
        })
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_ansi(false)
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }

        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                // Leave raw mode first so the panic message is readable.
                core_terminal::restore_terminal();
                tracing::error!(target: "runtime", ?info, "panic");
                default_panic(info);
            }));
        });
    }

    fn load_editor_state(args: &Args) -> Result<EditorState> {
        let config = load_from(args.config.clone())?;
        let settings = Settings::from_config(&config);
        let doc = match args.path.as_deref() {
            Some(path) => open_file(path, settings.tab_width)
                .with_context(|| format!("cannot open {}", path.display()))?,
            None => Document::new(settings.tab_width),
        };

        info!(
            target: "runtime",
            path = ?args.path,
            rows = doc.row_count(),
            syntax = doc.syntax().map(|s| s.name),
            config = ?config.source,
            "bootstrap_complete"
        );
        let mut state = EditorState::new(doc, settings);
        state.set_status(HELP_MESSAGE);
        Ok(state)
    }
}

struct EditorRuntime<'a> {
    state: EditorState,
    decoder: Decoder,
    term: StdTerminal,
    _terminal_guard: TerminalGuard<'a>,
}

impl EditorRuntime<'_> {
    /// Render, block for one key, apply it; repeat until a quit is confirmed.
    fn run(&mut self) -> Result<()> {
        let (rows, cols) = get_window_size(&mut self.term)?;
        self.state.set_screen_size(rows as usize, cols as usize);
        info!(target: "runtime", rows, cols, "window_size");

        let mut needs_render = true;
        loop {
            needs_render |= self.sync_window_size();
            needs_render |= self.state.tick_status(Instant::now());
            if needs_render {
                render(&mut self.state, &mut self.term)?;
            }
            let key = self.decoder.read_key(&mut self.term)?;
            let result = handle_key(&mut self.state, key);
            if result.quit {
                break;
            }
            needs_render = result.dirty;
        }
        info!(target: "runtime", dirty = self.state.doc.is_dirty(), "shutdown");
        Ok(())
    }

    /// Pick up terminal resizes between keys. Returns true when the size changed.
    fn sync_window_size(&mut self) -> bool {
        let Ok((cols, rows)) = crossterm::terminal::size() else {
            return false;
        };
        let (rows, cols) = (rows as usize, cols as usize);
        if rows == 0 || cols == 0 || (rows, cols) == (self.state.screen_rows, self.state.screen_cols) {
            return false;
        }
        debug!(target: "runtime", rows, cols, "resize");
        self.state.set_screen_size(rows, cols);
        true
    }
}

fn main() -> Result<()> {
    let mut startup = AppStartup::new();
    let mut runtime = startup.run()?;
    runtime.run()
}
