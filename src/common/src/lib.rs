pub mod config;
pub mod http;

pub const DEFAULT_PORT: u16 = 9000;
pub const DEFAULT_DATA_FILE: &str = "projects.json";
pub const DEFAULT_UI_PATH: &str = ".";
