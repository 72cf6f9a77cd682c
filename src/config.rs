use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::display::{parse_hex_color, Palette};
use crate::layout::{HeapLayout, MAX_CANVAS_PIXELS};

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level viewer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>,      // e.g., "info" | "debug"
    pub legacy_scale: Option<bool>,     // use the superseded scale table
    /// grid geometry & background
    pub canvas: Option<CanvasConfig>,
    /// box colors per allocator, "#RRGGBB"
    pub palette: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CanvasConfig {
    pub columns: Option<u32>,
    pub rows: Option<u32>,
    pub row_height: Option<u32>,
    pub background: Option<String>, // "#RRGGBB"
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "heaplog-viewer", version, about = "Render a heap allocation log as a grid of colored boxes")]
pub struct Cli {
    /// Heap log written by the engine's JSON logger
    #[arg(value_hint = ValueHint::FilePath)]
    pub log: Option<PathBuf>,
    /// PNG file to write
    #[arg(short, long, default_value = "heap.png", value_hint = ValueHint::FilePath)]
    pub output: PathBuf,
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// Enable debug log level
    #[arg(short = 'v', long, alias = "verbose", action = ArgAction::SetTrue)]
    pub debug: bool,
    #[arg(long)]
    pub columns: Option<u32>,
    #[arg(long)]
    pub rows: Option<u32>,
    #[arg(long)]
    pub row_height: Option<u32>,
    /// Use the superseded scale table
    #[arg(long, action = ArgAction::SetTrue)]
    pub legacy_scale: bool,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

impl Config {
    /// Grid geometry, defaults for anything unset
    pub fn layout(&self) -> HeapLayout {
        let mut layout = HeapLayout::default();
        if let Some(canvas) = self.canvas.as_ref() {
            if let Some(c) = canvas.columns    { layout.columns = c; }
            if let Some(r) = canvas.rows       { layout.rows = r; }
            if let Some(h) = canvas.row_height { layout.row_height = h; }
        }
        layout
    }

    pub fn palette(&self) -> Result<Palette, ConfigError> {
        match self.palette.as_deref() {
            Some(entries) => Palette::from_hex(entries).map_err(|bad| {
                ConfigError::Validation(format!("palette entry '{}' is not a #RRGGBB color", bad))
            }),
            None => Ok(Palette::default()),
        }
    }

    /// Canvas background, white unless configured
    pub fn background(&self) -> Result<Rgb888, ConfigError> {
        match self.canvas.as_ref().and_then(|c| c.background.as_deref()) {
            Some(text) => parse_hex_color(text).ok_or_else(|| {
                ConfigError::Validation(format!("canvas background '{}' is not a #RRGGBB color", text))
            }),
            None => Ok(Rgb888::WHITE),
        }
    }

    pub fn legacy_scale(&self) -> bool {
        self.legacy_scale.unwrap_or(false)
    }
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<(Config, Cli), ConfigError> {
    let cli = Cli::parse();
    let cfg = load_with(&cli)?;
    Ok((cfg, cli))
}

/// Same as [`load`] for an already parsed command line.
pub fn load_with(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;

    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/heaplog-viewer/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/heaplog-viewer/config.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["heaplog-viewer.yaml", "config/heaplog-viewer.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

pub fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some()    { dst.log_level = src.log_level; }
    if src.legacy_scale.is_some() { dst.legacy_scale = src.legacy_scale; }
    if src.palette.is_some()      { dst.palette = src.palette; }
    match (&mut dst.canvas, src.canvas) {
        (None, Some(c)) => dst.canvas = Some(c),
        (Some(d), Some(s)) => merge_canvas(d, s),
        _ => {}
    }
}

fn merge_canvas(dst: &mut CanvasConfig, src: CanvasConfig) {
    if src.columns.is_some()    { dst.columns = src.columns; }
    if src.rows.is_some()       { dst.rows = src.rows; }
    if src.row_height.is_some() { dst.row_height = src.row_height; }
    if src.background.is_some() { dst.background = src.background; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some() { cfg.log_level = cli.log_level.clone(); }
    if cli.legacy_scale        { cfg.legacy_scale = Some(true); }

    let any_canvas = cli.columns.is_some() || cli.rows.is_some() || cli.row_height.is_some();
    if any_canvas && cfg.canvas.is_none() {
        cfg.canvas = Some(CanvasConfig::default());
    }
    if let Some(canvas) = cfg.canvas.as_mut() {
        if cli.columns.is_some()    { canvas.columns = cli.columns; }
        if cli.rows.is_some()       { canvas.rows = cli.rows; }
        if cli.row_height.is_some() { canvas.row_height = cli.row_height; }
    }
}

/// Put any invariants here (required fields, ranges, etc.)
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(canvas) = cfg.canvas.as_ref() {
        for (name, value) in [("columns", canvas.columns), ("rows", canvas.rows), ("row_height", canvas.row_height)] {
            if value == Some(0) {
                return Err(ConfigError::Validation(format!("canvas {} must be > 0", name)));
            }
        }
    }
    let layout = cfg.layout();
    if !layout.is_drawable() {
        return Err(ConfigError::Validation(format!(
            "canvas {}x{} rows of {}px is too large (max {} pixels)",
            layout.columns, layout.rows, layout.row_height, MAX_CANVAS_PIXELS
        )));
    }
    cfg.background()?;
    cfg.palette()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("heaplog-viewer-{}-{}.yaml", name, std::process::id()));
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.layout(), HeapLayout::default());
        assert_eq!(cfg.background().unwrap(), Rgb888::WHITE);
        assert_eq!(cfg.palette().unwrap(), Palette::default());
        assert!(!cfg.legacy_scale());
    }

    #[test]
    fn test_yaml_then_cli_overrides() {
        let path = write_temp(
            "layered",
            "log_level: debug\ncanvas:\n  columns: 512\n  rows: 16\n  background: \"#101010\"\npalette: [\"#ff0000\"]\n",
        );
        let cli = Cli { config: Some(path.clone()), rows: Some(8), legacy_scale: true, ..Default::default() };
        let cfg = load_with(&cli).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
        assert_eq!(cfg.layout(), HeapLayout { columns: 512, rows: 8, row_height: 10 });
        assert_eq!(cfg.background().unwrap(), Rgb888::new(0x10, 0x10, 0x10));
        assert_eq!(cfg.palette().unwrap().for_allocator(3), Rgb888::RED);
        assert!(cfg.legacy_scale());
    }

    #[test]
    fn test_missing_explicit_config() {
        let cli = Cli { config: Some(PathBuf::from("/nonexistent/heaplog.yaml")), ..Default::default() };
        assert!(matches!(load_with(&cli), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validation() {
        let mut cfg = Config::default();
        cfg.canvas = Some(CanvasConfig { rows: Some(0), ..Default::default() });
        assert!(validate(&cfg).is_err());

        let mut cfg = Config::default();
        cfg.palette = Some(vec!["#00ff00".into(), "green".into()]);
        assert!(validate(&cfg).is_err());

        let mut cfg = Config::default();
        cfg.canvas = Some(CanvasConfig { background: Some("#12".into()), ..Default::default() });
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn test_oversized_canvas_rejected() {
        let cli = Cli { rows: Some(u32::MAX), row_height: Some(u32::MAX), ..Default::default() };
        let mut cfg = Config::default();
        apply_cli_overrides(&mut cfg, &cli);
        assert!(matches!(validate(&cfg), Err(ConfigError::Validation(_))));

        let mut cfg = Config::default();
        cfg.canvas = Some(CanvasConfig { columns: Some(4096), rows: Some(2048), ..Default::default() });
        assert!(validate(&cfg).is_err());

        let mut cfg = Config::default();
        cfg.canvas = Some(CanvasConfig { columns: Some(2048), rows: Some(64), ..Default::default() });
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn test_bad_yaml() {
        let path = write_temp("bad", "canvas: [1, 2\n");
        let cli = Cli { config: Some(path.clone()), ..Default::default() };
        let res = load_with(&cli);
        fs::remove_file(&path).ok();
        assert!(matches!(res, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["heaplog-viewer", "oge_log.json", "-o", "out.png", "--rows", "4", "-v"]).unwrap();
        assert_eq!(cli.log, Some(PathBuf::from("oge_log.json")));
        assert_eq!(cli.output, PathBuf::from("out.png"));
        assert_eq!(cli.rows, Some(4));
        assert!(cli.debug);
        assert!(!cli.legacy_scale);
    }
}
