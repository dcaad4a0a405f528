//! Opening the application for a single command.

use flashcarder_core::config::Config;
use flashcarder_core::notice::Notice;
use flashcarder_core::{App, Notices};
use flashcarder_storage::json::JsonStorage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

/// The loaded application plus what a command needs around it.
pub struct AppContext {
    pub app: App,
    pub config: Config,
    notices: broadcast::Receiver<Notice>,
}

impl AppContext {
    /// Load config from `cwd` and open the data directory.
    ///
    /// `data_dir` overrides the configured directory.
    pub async fn open(cwd: &Path, data_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let (config, sources) = Config::load(Some(cwd)).await?;
        debug!(sources = sources.len(), "Loaded configuration");

        let dir = match data_dir {
            Some(dir) => dir,
            None => config.data_dir()?,
        };
        debug!(path = %dir.display(), "Opening data directory");

        let notices = Notices::new();
        let rx = notices.subscribe();
        let app = App::open_with_notices(Arc::new(JsonStorage::new(dir)), notices).await;

        Ok(Self {
            app,
            config,
            notices: rx,
        })
    }

    /// Wait for pending writes and print any notices to stderr.
    pub async fn finish(mut self) {
        self.app.flush().await;
        while let Ok(notice) = self.notices.try_recv() {
            eprintln!("Warning: {}", notice.message);
        }
    }
}
