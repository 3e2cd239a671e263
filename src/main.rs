use std::error::Error;
use std::fs;
use std::sync::{mpsc, Arc};
use std::thread;

use clap::Parser;
use tiny_http::Server;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod locales;
mod model;
mod protocol;
mod services;

use config::{Config, Mode};
use protocol::Api;
use services::glotpress::{GlotPress, Remote};
use services::index::Index;
use services::package::PackageBuilder;
use services::sync::Synchronizer;

fn main() {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(config) {
        error!(error = %e, "fatal");
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<(), Box<dyn Error + Send + Sync>> {
    config.validate()?;

    fs::create_dir_all(&config.downloads_path)
        .map_err(|e| format!("cannot create {}: {e}", config.downloads_path.display()))?;

    // Volatile: rebuilt from GlotPress on every start.
    let index = Arc::new(Index::new());

    let server = Server::http(&config.listen)
        .map_err(|e| format!("cannot listen on {}: {e}", config.listen))?;

    // Keeps the synchronizer running for as long as `run` does.
    let (_stop, stop_rx) = mpsc::channel::<()>();

    match config.mode {
        Mode::Poll => {
            let remote: Arc<dyn Remote> = Arc::new(GlotPress::new(
                &config.api_url,
                &config.export_url,
                config.http_timeout,
            )?);
            let builder = PackageBuilder::new(Arc::clone(&remote), config.root(), &config.downloads_path);
            let sync = Synchronizer::new(remote, builder, Arc::clone(&index), config.root());
            let interval = config.poll_interval;

            thread::Builder::new()
                .name("synchronizer".into())
                .spawn(move || sync.run(interval, stop_rx))?;
        }
        Mode::Notified => {
            info!(
                update_key_set = !config.update_key.is_empty(),
                "notified mode: polling disabled, /api/v1/update is not implemented"
            );
        }
    }

    info!(listen = %config.listen, "listening");
    info!(mode = ?config.mode, "update mode");
    info!(path = %config.downloads_path.display(), "serving /downloads/");

    let workers = thread::available_parallelism().map(|n| n.get()).unwrap_or(4);
    let api = Arc::new(Api::new(index, &config.downloads_path, config.mode, config.expose_db));
    protocol::http::serve(Arc::new(server), api, workers);

    Ok(())
}
