use std::net::SocketAddr;
use std::path::PathBuf;

use clap::ValueEnum;
use common::DEFAULT_DATA_FILE;
use common::DEFAULT_PORT;
use common::DEFAULT_UI_PATH;
use serde_derive::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing::Level;

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Server {
    pub host: SocketAddr,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Data {
    pub path: PathBuf,
    pub ui_path: PathBuf,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_FILE),
            ui_path: PathBuf::from(DEFAULT_UI_PATH),
        }
    }
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Log {
    pub level: LogLevel,
}

/// On-disk shape of the config file. Every section is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub server: Server,
    pub data: Data,
    pub log: Log,
}

impl From<Config> for common::config::Config {
    fn from(cfg: Config) -> Self {
        common::config::Config {
            server: common::config::Server {
                host: cfg.server.host,
            },
            data: common::config::Data {
                path: cfg.data.path,
                ui_path: cfg.data.ui_path,
            },
            log: common::config::Log {
                level: cfg.log.level.into(),
            },
        }
    }
}

#[derive(Deserialize, Copy, Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    #[serde(rename = "trace")]
    Trace,
    #[serde(rename = "debug")]
    Debug,
    #[default]
    #[serde(rename = "info")]
    Info,
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "error")]
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
        .into()
    }
}
