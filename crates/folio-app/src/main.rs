mod cli;
mod run;

use std::process::ExitCode;

use folio_common::ThemeId;
use folio_config::FolioConfig;
use tracing_subscriber::EnvFilter;

fn init_logging(directive: &str) {
    let filter = EnvFilter::from_default_env().add_directive(
        directive
            .parse()
            .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
    );
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn list_themes() {
    for theme in ThemeId::all() {
        println!("{:<10} {}", theme.id(), theme.name());
    }
}

fn main() -> ExitCode {
    let args = cli::parse();

    // Config is read first so its [logging] level can seed the filter.
    let (config, config_error) = match folio_config::load_config(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (FolioConfig::default(), Some(e)),
    };
    let directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.as_directive().to_string());
    init_logging(&directive);

    tracing::info!("folio-backdrop v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_error {
        tracing::warn!("config load failed, using defaults: {e}");
    }

    if args.list {
        list_themes();
        return ExitCode::SUCCESS;
    }

    match run::run(&args, config) {
        Ok(summary) => {
            tracing::info!(view = ?summary.view, frames = summary.frames_drawn, "done");
            if let Some(path) = &summary.output {
                println!("{}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("run failed: {e}");
            ExitCode::FAILURE
        }
    }
}
