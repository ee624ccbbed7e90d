//! Configuration loading and parsing.
//!
//! Reads `oxnano.toml` (or an override path passed by the binary):
//!
//! ```toml
//! [scroll.margin]
//! vertical = 0
//! [editor]
//! tab_width = 4
//! ```
//!
//! Missing files and parse errors fall back to defaults; unknown keys are
//! ignored. The vertical margin is clamped against the current text area in
//! `Config::apply_context`, keeping the raw value so a resize can re-clamp.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "oxnano.toml";
const MAX_TAB_WIDTH: u8 = 16;

/// Screen geometry the configuration is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigContext {
    pub viewport_rows: u16,
    /// Rows taken by title, message, status and help bars.
    pub chrome_rows: u16,
}

impl ConfigContext {
    pub fn new(viewport_rows: u16, chrome_rows: u16) -> Self {
        Self {
            viewport_rows,
            chrome_rows,
        }
    }

    pub fn text_rows(&self) -> u16 {
        self.viewport_rows.saturating_sub(self.chrome_rows)
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct MarginConfig {
    #[serde(default)]
    pub vertical: u16,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScrollConfig {
    #[serde(default)]
    pub margin: MarginConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_tab_width")]
    pub tab_width: u8,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: Self::default_tab_width(),
        }
    }
}

impl EditorConfig {
    const fn default_tab_width() -> u8 {
        4
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub editor: EditorConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub source: Option<PathBuf>,        // file the values came from
    pub file: ConfigFile,               // parsed (or default) data
    pub effective_vertical_margin: u16, // clamped to the text area
}

/// Config path: `oxnano.toml` in the working directory, else the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("oxnano").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                source: Some(path),
                file,
                effective_vertical_margin: 0, // computed later
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Spaces inserted by Tab, at least 1.
    pub fn tab_width(&self) -> usize {
        usize::from(self.file.editor.tab_width.clamp(1, MAX_TAB_WIDTH))
    }

    /// Clamp the vertical margin to `(text_rows - 2) / 2`; tiny text areas get 0.
    /// Returns the effective value.
    pub fn apply_context(&mut self, ctx: ConfigContext) -> u16 {
        let raw = self.file.scroll.margin.vertical;
        let text_rows = ctx.text_rows();
        let (clamped, max) = if text_rows <= 3 {
            (0, 0)
        } else {
            let max = (text_rows.saturating_sub(2)) / 2;
            (raw.min(max), max)
        };

        if clamped != raw {
            info!(
                target: "config",
                raw,
                clamped,
                max,
                text_rows,
                viewport_rows = ctx.viewport_rows,
                "scroll_margin_vertical_clamped"
            );
        }
        self.effective_vertical_margin = clamped;
        clamped
    }

    /// Re-clamp after a resize. `Some(new_margin)` when the effective value changed.
    pub fn recompute_with_context(&mut self, ctx: ConfigContext) -> Option<u16> {
        let prev = self.effective_vertical_margin;
        let current = self.apply_context(ctx);
        if current != prev { Some(current) } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    fn ctx_with_text_rows(rows: u16) -> ConfigContext {
        ConfigContext::new(rows, 0)
    }

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl Write for LockedWriter<'_> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), body).unwrap();
        tmp
    }

    #[test]
    fn defaults_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__no_such_oxnano__.toml"))).unwrap();
        assert_eq!(cfg.file.scroll.margin.vertical, 0);
        assert_eq!(cfg.tab_width(), 4);
        assert!(cfg.source.is_none());
    }

    #[test]
    fn parses_all_keys() {
        let tmp = write_config("[scroll.margin]\nvertical = 3\n[editor]\ntab_width = 8\n");
        let mut cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.scroll.margin.vertical, 3);
        assert_eq!(cfg.tab_width(), 8);
        assert_eq!(cfg.source.as_deref(), Some(tmp.path()));
        cfg.apply_context(ctx_with_text_rows(40));
        assert_eq!(cfg.effective_vertical_margin, 3);
    }

    #[test]
    fn parse_error_falls_back_to_defaults() {
        let tmp = write_config("[editor\ntab_width = ");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.tab_width(), 4);
        assert!(cfg.source.is_none());
    }

    #[test]
    fn tab_width_is_clamped() {
        let tmp = write_config("[editor]\ntab_width = 0\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.tab_width(), 1);
        let tmp = write_config("[editor]\ntab_width = 200\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.tab_width(), 16);
    }

    #[test]
    fn clamps_margin_to_text_area() {
        let tmp = write_config("[scroll.margin]\nvertical = 50\n");
        let mut cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        // 20 text rows -> max = (20 - 2) / 2 = 9
        assert_eq!(cfg.apply_context(ctx_with_text_rows(20)), 9);
        assert_eq!(cfg.apply_context(ConfigContext::new(6, 4)), 0);
    }

    #[test]
    fn recompute_reports_changes_only() {
        let tmp = write_config("[scroll.margin]\nvertical = 10\n");
        let mut cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        cfg.apply_context(ctx_with_text_rows(50));
        assert_eq!(cfg.effective_vertical_margin, 10);
        assert_eq!(cfg.recompute_with_context(ctx_with_text_rows(10)), Some(4));
        assert_eq!(cfg.recompute_with_context(ctx_with_text_rows(11)), None);
    }

    #[test]
    fn clamp_logging_uses_config_target() {
        let tmp = write_config("[scroll.margin]\nvertical = 8\n");
        let mut cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        with_default(subscriber, || {
            // 10 rows minus 4 chrome rows -> max = (6 - 2) / 2 = 2
            cfg.apply_context(ConfigContext::new(10, 4));
        });

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("INFO config:"));
        assert!(log_output.contains("scroll_margin_vertical_clamped"));
        assert_eq!(cfg.effective_vertical_margin, 2);
    }
}
