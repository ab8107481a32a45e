use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::level_filters::LevelFilter;

use crate::DEFAULT_DATA_FILE;
use crate::DEFAULT_PORT;
use crate::DEFAULT_UI_PATH;

#[derive(Debug, Clone)]
pub struct Server {
    pub host: SocketAddr,
}

#[derive(Debug, Clone)]
pub struct Data {
    /// JSON file holding the project collection.
    pub path: PathBuf,
    /// Directory served as static assets.
    pub ui_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Log {
    pub level: LevelFilter,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: Server,
    pub data: Data,
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: Server {
                host: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            },
            data: Data {
                path: PathBuf::from(DEFAULT_DATA_FILE),
                ui_path: PathBuf::from(DEFAULT_UI_PATH),
            },
            log: Log {
                level: LevelFilter::INFO,
            },
        }
    }
}
