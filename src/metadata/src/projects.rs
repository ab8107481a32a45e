use std::collections::HashMap;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::DateTime;
use chrono::SubsecRound;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::error::MetadataError;
use crate::timestamp;
use crate::Result;

const EMPTY_COLLECTION: &[u8] = b"[]";

#[derive(Clone)]
struct State {
    projects: Vec<Project>,
    last_id: u64,
}

impl State {
    fn next_id(&mut self, now: DateTime<Utc>) -> Result<u64> {
        let next = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| MetadataError::Internal("project id overflow".to_string()))?;
        let id = (now.timestamp_millis().max(0) as u64).max(next);
        self.last_id = id;

        Ok(id)
    }

    fn position(&self, project_id: u64) -> Result<usize> {
        self.projects
            .iter()
            .position(|p| p.id == project_id)
            .ok_or_else(|| MetadataError::NotFound(format!("project {project_id}")))
    }
}

/// Ordered project collection persisted as a single JSON document.
///
/// Every mutation runs under one lock: the collection is copied, changed,
/// written to disk and only then swapped in, so a failed write leaves both
/// memory and the file untouched.
pub struct Projects {
    path: PathBuf,
    state: Mutex<State>,
}

impl Projects {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.try_exists()? {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(&path, EMPTY_COLLECTION)?;
        }

        let data = fs::read(&path)?;
        let projects: Vec<Project> = serde_json::from_slice(&data)?;
        let last_id = projects.iter().map(|p| p.id).max().unwrap_or_default();

        Ok(Projects {
            path,
            state: Mutex::new(State { projects, last_id }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write<F, R>(&self, f: F) -> Result<R>
    where F: FnOnce(&mut State) -> Result<R> {
        let mut state = self.state.lock()?;
        let mut tx = state.clone();
        let ret = f(&mut tx)?;
        persist(&self.path, &tx.projects)?;
        *state = tx;

        Ok(ret)
    }

    pub fn list(&self) -> Result<Vec<Project>> {
        Ok(self.state.lock()?.projects.clone())
    }

    pub fn get_by_id(&self, project_id: u64) -> Result<Project> {
        let state = self.state.lock()?;
        let idx = state.position(project_id)?;

        Ok(state.projects[idx].clone())
    }

    pub fn create(&self, req: CreateProjectRequest) -> Result<Project> {
        self.write(|tx| {
            let created = Utc::now().trunc_subsecs(3);
            let project = Project {
                id: tx.next_id(created)?,
                name: req.name,
                link: req.link,
                favorite: false,
                created,
                updated: None,
            };
            tx.projects.push(project.clone());

            Ok(project)
        })
    }

    pub fn update(&self, project_id: u64, req: UpdateProjectRequest) -> Result<Project> {
        self.write(|tx| {
            let idx = tx.position(project_id)?;
            let project = &mut tx.projects[idx];
            project.name = req.name;
            project.link = req.link;
            project.updated = Some(Utc::now().trunc_subsecs(3));

            Ok(project.clone())
        })
    }

    pub fn toggle_favorite(&self, project_id: u64) -> Result<Project> {
        self.write(|tx| {
            let idx = tx.position(project_id)?;
            let project = &mut tx.projects[idx];
            project.favorite = !project.favorite;

            Ok(project.clone())
        })
    }

    /// Rearranges the stored projects into the order of `ids`, which must
    /// hold exactly the stored ids. Records themselves are left untouched.
    pub fn reorder(&self, ids: Vec<u64>) -> Result<()> {
        self.write(|tx| {
            let unique: HashSet<u64> = ids.iter().copied().collect();
            let existing: HashSet<u64> = tx.projects.iter().map(|p| p.id).collect();
            if unique.len() != ids.len() || unique != existing {
                return Err(MetadataError::BadRequest(
                    "Reorder must contain exactly the existing projects".to_string(),
                ));
            }

            let mut stored: HashMap<u64, Project> =
                tx.projects.drain(..).map(|p| (p.id, p)).collect();
            tx.projects = ids.iter().filter_map(|id| stored.remove(id)).collect();

            Ok(())
        })
    }

    /// Removes every project with the given id. Unknown ids are not an error.
    pub fn delete(&self, project_id: u64) -> Result<()> {
        self.write(|tx| {
            tx.projects.retain(|p| p.id != project_id);

            Ok(())
        })
    }
}

fn persist(path: &Path, projects: &[Project]) -> Result<()> {
    let data = serde_json::to_vec_pretty(projects)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)?;

    Ok(())
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
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

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateProjectRequest {
    pub name: String,
    pub link: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UpdateProjectRequest {
    pub name: String,
    pub link: String,
}
