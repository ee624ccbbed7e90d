//! oxnano entrypoint.
//!
//! Startup order: logging, panic hook, configuration, session, terminal. The
//! event loop is single-threaded: render when something changed, block on
//! the next input event, translate it, dispatch it.
use anyhow::Result;
use clap::Parser;
use core_actions::{KeyTranslator, UiState, dispatch};
use core_config::{Config, ConfigContext, load_from};
use core_events::InputEvent;
use core_model::{EditError, EditorSession, FsStore};
use core_render::{CHROME_ROWS, RenderContext, Renderer, ScreenLayout};
use core_state::StatusMessage;
use core_terminal::{CrosstermBackend, TerminalBackend, TerminalSize, enter_guard};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "oxnano.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "oxnano", version, about = "A small nano-style text editor")]
struct Args {
    /// File to edit. Created on first save when it does not exist.
    pub path: Option<PathBuf>,
    /// Configuration file (overrides discovery of `oxnano.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownReason {
    Quit,
    InputError,
}

impl ShutdownReason {
    fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::Quit => "quit",
            ShutdownReason::InputError => "input_error",
        }
    }
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            core_terminal::restore();
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn text_area(size: TerminalSize) -> (usize, usize) {
    let layout = ScreenLayout::new(size.cols, size.rows);
    (
        usize::from(layout.text_height()),
        usize::from(layout.cols()),
    )
}

/// Open `path` (or an empty buffer). Read failures leave an empty, unnamed
/// buffer with the error on the message line.
fn open_session(path: Option<&Path>, size: TerminalSize) -> EditorSession {
    let (height, width) = text_area(size);
    let Some(path) = path else {
        return EditorSession::new(height, width);
    };
    match EditorSession::open(&FsStore, path, height, width) {
        Ok(session) => session,
        Err(e) => {
            warn!(target: "runtime.startup", error = %e, "open_failed");
            let reason = match &e {
                EditError::FileUnreadable { source, .. } => source.to_string(),
                other => other.to_string(),
            };
            let mut session = EditorSession::new(height, width);
            session.set_status(StatusMessage::error(format!(
                "Error reading {}: {reason}",
                path.display()
            )));
            session
        }
    }
}

struct EditorRuntime {
    session: EditorSession,
    ui: UiState,
    translator: KeyTranslator,
    renderer: Renderer,
    config: Config,
    layout: ScreenLayout,
}

impl EditorRuntime {
    fn new(session: EditorSession, config: Config, size: TerminalSize) -> Self {
        let mut runtime = Self {
            session,
            ui: UiState::new(),
            translator: KeyTranslator::new(config.tab_width()),
            renderer: Renderer::new(),
            config,
            layout: ScreenLayout::new(size.cols, size.rows),
        };
        let margin = runtime
            .config
            .apply_context(ConfigContext::new(size.rows, CHROME_ROWS));
        runtime.session.set_scroll_margin(usize::from(margin));
        runtime
    }

    fn run(&mut self) -> Result<ShutdownReason> {
        let mut needs_render = true;
        loop {
            if needs_render {
                self.render()?;
                needs_render = false;
            }
            let event = match core_input::read_event() {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(e) => {
                    error!(target: "runtime", error = %e, "input_read_failed");
                    return Ok(ShutdownReason::InputError);
                }
            };
            if let InputEvent::Resize(cols, rows) = event {
                self.handle_resize(cols, rows);
                needs_render = true;
                continue;
            }
            let Some(action) = self.translator.translate_event(self.ui.context(), &event) else {
                continue;
            };
            let result = dispatch(action, &mut self.session, &mut self.ui, &FsStore);
            if result.quit {
                return Ok(ShutdownReason::Quit);
            }
            needs_render |= result.dirty;
        }
    }

    fn render(&mut self) -> Result<()> {
        let prompt = self.ui.prompt().map(|p| p.display());
        let ctx = RenderContext {
            session: &self.session,
            prompt: prompt.as_deref(),
            help_visible: self.ui.help_visible(),
        };
        self.renderer.render(&ctx, self.layout)
    }

    fn handle_resize(&mut self, cols: u16, rows: u16) {
        info!(target: "runtime", cols, rows, "resize");
        self.layout = ScreenLayout::new(cols, rows);
        let (height, width) = text_area(TerminalSize { cols, rows });
        self.session.resize(height, width);
        if let Some(margin) = self
            .config
            .recompute_with_context(ConfigContext::new(rows, CHROME_ROWS))
        {
            self.session.set_scroll_margin(usize::from(margin));
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let config = load_from(args.config.clone())?;
    let mut backend = CrosstermBackend::new();
    let size = backend.size();
    let session = open_session(args.path.as_deref(), size);
    info!(
        target: "runtime.startup",
        path = args.path.as_ref().map(|p| p.display().to_string()).as_deref(),
        config_override = args.config.is_some(),
        cols = size.cols,
        rows = size.rows,
        "bootstrap_complete"
    );

    backend.set_title("oxnano")?;
    let reason = {
        let _guard = enter_guard(&mut backend)?;
        let mut runtime = EditorRuntime::new(session, config, size);
        runtime.run()
    };
    match &reason {
        Ok(r) => info!(target: "runtime.shutdown", reason = r.as_str(), "shutdown"),
        Err(e) => error!(target: "runtime.shutdown", error = %e, "shutdown_error"),
    }
    reason.map(|_| ())
}
