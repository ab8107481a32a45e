pub mod error;
pub mod http;
pub mod projects;

use std::sync::Arc;

pub use error::PlatformError;
pub use error::Result;
use serde::Deserialize;
use serde::Serialize;

use crate::projects::Projects;

pub struct PlatformProvider {
    pub projects: Arc<Projects>,
}

impl PlatformProvider {
    pub fn new(md_projects: Arc<metadata::projects::Projects>) -> Self {
        Self {
            projects: Arc::new(Projects::new(md_projects)),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
