use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;
use metadata::error::MetadataError;
use metadata::projects::Projects as MDProjects;
use metadata::timestamp;
use serde::Deserialize;
use serde::Serialize;
use tracing::error;
use tracing::info;

use crate::PlatformError;
use crate::Result;

const ERR_REQUIRED: &str = "Name and link are required";
const ERR_NOT_FOUND: &str = "Project not found";

// Storage failures are logged with their cause but reported to the client
// with an operation-specific message only.
fn storage_error(op: &'static str) -> impl Fn(MetadataError) -> PlatformError {
    move |err| match err {
        MetadataError::NotFound(_) => PlatformError::NotFound(ERR_NOT_FOUND.to_string()),
        MetadataError::BadRequest(msg) => PlatformError::BadRequest(msg),
        other => {
            error!("{op}: {other}");
            PlatformError::from(other).wrap_into(PlatformError::Internal(op.to_string()))
        }
    }
}

fn required(name: Option<String>, link: Option<String>) -> Result<(String, String)> {
    match (name, link) {
        (Some(name), Some(link)) if !name.is_empty() && !link.is_empty() => Ok((name, link)),
        _ => Err(PlatformError::BadRequest(ERR_REQUIRED.to_string())),
    }
}

pub struct Projects {
    prov: Arc<MDProjects>,
}

impl Projects {
    pub fn new(prov: Arc<MDProjects>) -> Self {
        Self { prov }
    }

    pub async fn list(&self) -> Result<Vec<Project>> {
        let projects = self
            .prov
            .list()
            .map_err(storage_error("Failed to read projects"))?;

        Ok(projects.into_iter().map(|v| v.into()).collect())
    }

    pub async fn get_by_id(&self, project_id: u64) -> Result<Project> {
        Ok(self
            .prov
            .get_by_id(project_id)
            .map_err(storage_error("Failed to read projects"))?
            .into())
    }

    pub async fn create(&self, req: CreateProjectRequest) -> Result<Project> {
        let (name, link) = required(req.name, req.link)?;

        let md = metadata::projects::CreateProjectRequest { name, link };
        let project = self
            .prov
            .create(md)
            .map_err(storage_error("Failed to add project"))?;
        info!(id = project.id, "project created");

        Ok(project.into())
    }

    pub async fn update(&self, project_id: u64, req: UpdateProjectRequest) -> Result<Project> {
        let (name, link) = required(req.name, req.link)?;

        let md = metadata::projects::UpdateProjectRequest { name, link };
        let project = self
            .prov
            .update(project_id, md)
            .map_err(storage_error("Failed to update project"))?;

        Ok(project.into())
    }

    /// Only the ids of `projects` are used; the stored records keep their
    /// contents and are rearranged into the given order.
    pub async fn reorder(&self, projects: Vec<Project>) -> Result<()> {
        self.prov
            .reorder(projects.into_iter().map(|v| v.id).collect())
            .map_err(storage_error("Failed to reorder projects"))
    }

    pub async fn toggle_favorite(&self, project_id: u64) -> Result<Project> {
        Ok(self
            .prov
            .toggle_favorite(project_id)
            .map_err(storage_error("Failed to update favorite"))?
            .into())
    }

    pub async fn delete(&self, project_id: u64) -> Result<()> {
        self.prov
            .delete(project_id)
            .map_err(storage_error("Failed to delete project"))?;
        info!(id = project_id, "project deleted");

        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub link: String,
    #[serde(default)]
    pub favorite: bool,
    #[serde(serialize_with = "timestamp::serialize")]
    pub created: DateTime<Utc>,
    #[serde(
        default,
        serialize_with = "timestamp::serialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<DateTime<Utc>>,
}

impl From<metadata::projects::Project> for Project {
    fn from(value: metadata::projects::Project) -> Self {
        Project {
            id: value.id,
            name: value.name,
            link: value.link,
            favorite: value.favorite,
            created: value.created,
            updated: value.updated,
        }
    }
}

/// Missing fields deserialize as `None` so they fail the same required
/// check as empty ones.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateProjectRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}
