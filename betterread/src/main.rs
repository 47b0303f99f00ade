use std::{
    fs::{self, File},
    panic,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn, LevelFilter};
use simplelog::{Config, WriteLogger};
use ui::App;
use viewer_core::{
    config::{self, Settings},
    pdf::PdfRenderer,
    upload::accept_path,
    ObjectUrls, RenderWorker,
};

/// Terminal PDF viewer with highlights and an Ask AI hook.
#[derive(Parser, Debug)]
#[command(name = "betterread", version, about)]
struct Args {
    /// PDF or EPUB file to open. Without it the upload screen is shown.
    path: Option<PathBuf>,

    /// Width, in cells, pages are laid out at
    #[arg(long)]
    page_width: Option<u16>,

    /// Log file (defaults to betterread.log in the config directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// off, error, warn, info, debug or trace
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = config::load_settings();
    let mut settings = loaded.as_ref().cloned().unwrap_or_else(|_| Settings::default());
    if let Some(width) = args.page_width {
        settings = settings.with_page_width(width);
    }
    if let Some(level) = &args.log_level {
        settings.log_level = level.clone();
    }

    if let Some(path) = args.log_file.clone().or_else(config::log_path) {
        init_logging(&path, &settings.log_level)?;
    }
    if let Err(err) = &loaded {
        warn!("using default settings: {}", err);
    }
    info!("starting betterread {}", env!("CARGO_PKG_VERSION"));
    install_panic_hook();

    let urls = ObjectUrls::new();
    let worker = RenderWorker::spawn(Box::new(PdfRenderer::new()), urls.clone())
        .context("failed to start the render worker")?;
    let mut app = App::new(settings, worker, urls).with_ask_ai_hook(|selection| {
        info!(
            "ask AI (page {}, {}): {}",
            selection.page_number(),
            selection.id(),
            selection.text()
        );
    });
    if let Some(path) = &args.path {
        let file = accept_path(path).with_context(|| format!("cannot open {}", path.display()))?;
        app.open_file(file);
    }

    app.run().context("terminal session failed")?;
    info!("shutting down");
    Ok(())
}

fn init_logging(path: &Path, level: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    let level = level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info);
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    WriteLogger::init(level, Config::default(), file).context("logger already initialised")?;
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        ui::restore_terminal();
        default_hook(panic_info);
    }));
}
