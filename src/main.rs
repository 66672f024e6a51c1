mod app;
mod config;
mod theme;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::App;
use chrono::{Local, NaiveDate};
use config::AppConfig;
use datepick::Picker;
use theme::ThemeConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        // ── dpick grid [YYYY-MM-DD] ───────────────────────────────────────────
        Some("grid") => cmd_grid(args.get(2).map(|s| s.as_str())),
        // ── dpick (TUI) ───────────────────────────────────────────────────────
        None => run_tui(),
        Some(other) => Err(anyhow!("unknown command {other:?}\nUsage: dpick [grid [YYYY-MM-DD]]")),
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

// ─── Grid command ─────────────────────────────────────────────────────────────

fn cmd_grid(date: Option<&str>) -> Result<()> {
    // Logging to stderr so it doesn't interfere with the printed grid
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let anchor = match date {
        Some(s) => s.parse::<NaiveDate>()
            .with_context(|| format!("invalid date {s:?}, expected YYYY-MM-DD"))?,
        None => Local::now().date_naive(),
    };

    let cfg = AppConfig::load()?;
    let mut picker = Picker::new(anchor);
    cfg.apply(&mut picker)?;

    for line in ui::grid_text(&picker.open()) {
        println!("{line}");
    }
    Ok(())
}

// ─── TUI ─────────────────────────────────────────────────────────────────────

fn run_tui() -> Result<()> {
    let log_dir = dirs::data_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("datepick");
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "datepick.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    tracing::info!("Starting datepick");

    let cfg = AppConfig::load()?;
    cfg.check().with_context(|| {
        format!("bad [picker] settings in {}", config::config_dir().join("config.toml").display())
    })?;

    let theme = match cfg.theme.as_deref() {
        Some(name) => ThemeConfig::by_name(name).unwrap_or_else(|| {
            tracing::warn!("unknown theme {name:?}, using the default");
            ThemeConfig::default()
        }),
        None => ThemeConfig::load()?,
    };

    let mut app = App::new(cfg, theme, Local::now().date_naive());
    app.run()
}
