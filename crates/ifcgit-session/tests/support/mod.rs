#![allow(dead_code)]

use ifcgit_core::domain::*;
use ifcgit_core::error::{Error, ErrorKind};
use ifcgit_core::services::{EntityModel, IfcBackend, IfcRepository, MergeOutcome, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

pub fn commit(id: &str, seconds: u64) -> Commit {
    Commit {
        id: CommitId(id.to_string()),
        parent_ids: Vec::new(),
        message: format!("commit {id}"),
        author: "you".to_string(),
        time: SystemTime::UNIX_EPOCH + Duration::from_secs(seconds),
    }
}

/// Scripted repository for session workflow tests, recording every
/// mutating call.
pub struct FakeRepo {
    pub spec: RepoSpec,
    pub head: CommitId,
    pub current_branch: String,
    pub detached: bool,
    pub branches: Vec<Branch>,
    pub tags: Vec<Tag>,
    pub commits: Vec<Commit>,
    pub relevant: Vec<CommitId>,
    pub patch: String,
    pub merge_conflicts: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeRepo {
    pub fn new(workdir: &Path) -> Self {
        Self {
            spec: RepoSpec {
                workdir: workdir.to_path_buf(),
            },
            head: CommitId("0".to_string()),
            current_branch: "main".to_string(),
            detached: false,
            branches: Vec::new(),
            tags: Vec::new(),
            commits: Vec::new(),
            relevant: Vec::new(),
            patch: String::new(),
            merge_conflicts: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

impl IfcRepository for FakeRepo {
    fn spec(&self) -> &RepoSpec {
        &self.spec
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.current_branch.clone())
    }

    fn head_detached(&self) -> Result<bool> {
        Ok(self.detached)
    }

    fn list_branches(&self) -> Result<Vec<Branch>> {
        Ok(self.branches.clone())
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.tags.clone())
    }

    fn revision_walk(&self, branch: &str) -> Result<Vec<Commit>> {
        if !self.branches.iter().any(|b| b.name == branch) {
            return Ok(Vec::new());
        }
        Ok(self.commits.clone())
    }

    fn revision_walk_path(&self, branch: &str, _path: &Path) -> Result<Vec<Commit>> {
        if !self.branches.iter().any(|b| b.name == branch) {
            return Ok(Vec::new());
        }
        Ok(self
            .commits
            .iter()
            .filter(|c| self.relevant.contains(&c.id))
            .cloned()
            .collect())
    }

    fn resolve_revision(&self, rev: &str) -> Result<Commit> {
        let id = if rev == "HEAD" {
            self.head.clone()
        } else {
            CommitId(rev.to_string())
        };
        self.commits
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| Error::new(ErrorKind::Backend(format!("unknown revision {rev}"))))
    }

    fn diff_unified(
        &self,
        _from: &RevisionSelector,
        _to: &RevisionSelector,
        _path: &Path,
    ) -> Result<String> {
        Ok(self.patch.clone())
    }

    fn is_dirty(&self, _path: &Path) -> Result<bool> {
        Ok(false)
    }

    fn is_tracked(&self, _path: &Path) -> Result<bool> {
        Ok(true)
    }

    fn stage(&self, path: &Path) -> Result<()> {
        self.record(format!(
            "stage {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        ));
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record(format!("commit {message}"));
        Ok(())
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        self.record(format!("create_branch {name}"));
        Ok(())
    }

    fn checkout_branch(&self, name: &str) -> Result<()> {
        self.record(format!("checkout_branch {name}"));
        Ok(())
    }

    fn checkout_commit(&self, id: &CommitId) -> Result<()> {
        self.record(format!("checkout_commit {}", id.as_ref()));
        Ok(())
    }

    fn discard_path(&self, path: &Path) -> Result<()> {
        self.record(format!(
            "discard {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        ));
        Ok(())
    }

    fn merge_branch(&self, name: &str) -> Result<MergeOutcome> {
        self.record(format!("merge {name}"));
        if self.merge_conflicts {
            Ok(MergeOutcome::Conflict)
        } else {
            Ok(MergeOutcome::Clean)
        }
    }

    fn merge_abort(&self) -> Result<()> {
        self.record("merge_abort");
        Ok(())
    }

    fn run_merge_tool(&self, tool: &str) -> Result<()> {
        self.record(format!("mergetool {tool}"));
        Ok(())
    }

    fn has_merge_tool(&self, _name: &str) -> Result<bool> {
        Ok(true)
    }

    fn write_merge_tool(&self, config: &MergeToolConfig) -> Result<()> {
        self.record(format!("write_merge_tool {}", config.name));
        Ok(())
    }
}

/// Backend that opens one scripted repository at one directory.
pub struct FakeBackend {
    pub root: PathBuf,
    pub repo: Arc<FakeRepo>,
}

impl IfcBackend for FakeBackend {
    fn open(&self, workdir: &Path) -> Result<Arc<dyn IfcRepository>> {
        if workdir == self.root {
            Ok(Arc::clone(&self.repo) as Arc<dyn IfcRepository>)
        } else {
            Err(Error::new(ErrorKind::NotARepository))
        }
    }
}

/// Model whose shape ownership table is fixed up front and whose loads are
/// recorded.
#[derive(Default)]
pub struct FakeModel {
    pub shapes: Vec<(u64, u64)>,
    pub loads: Vec<PathBuf>,
}

impl EntityModel for FakeModel {
    fn class_of(&self, id: u64) -> Option<String> {
        self.shapes
            .iter()
            .any(|(shape, _)| *shape == id)
            .then(|| "IfcProductDefinitionShape".to_string())
    }

    fn product_of_shape(&self, id: u64) -> Option<u64> {
        self.shapes
            .iter()
            .find(|(shape, _)| *shape == id)
            .map(|(_, product)| *product)
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        self.loads.push(path.to_path_buf());
        Ok(())
    }
}
