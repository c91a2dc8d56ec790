use ifcgit_core::domain::{EntityDelta, MergeToolConfig, RevisionEntry, RevisionFilter};
use ifcgit_core::entity_diff;
use ifcgit_core::error::{Error, ErrorKind};
use ifcgit_core::locate::RepoLocator;
use ifcgit_core::merge::{MergeOrchestrator, MergeReport};
use ifcgit_core::refindex;
use ifcgit_core::refname::is_valid_ref_name;
use ifcgit_core::revlist;
use ifcgit_core::services::{EntityModel, IfcBackend, IfcRepository, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Synchronous facade over one tracked model file in one repository.
///
/// Every operation runs to completion before returning; there are no
/// background threads or callbacks here. Callers wanting a responsive UI
/// offload whole calls to a worker, never sub-steps.
pub struct IfcGitSession {
    locator: RepoLocator,
    repo: Option<Arc<dyn IfcRepository>>,
    file: Option<PathBuf>,
    display_branch: Option<String>,
    filter: RevisionFilter,
    entries: Vec<RevisionEntry>,
    selected: usize,
    commit_message: String,
    merge_tool: MergeToolConfig,
    last_error: Option<String>,
}

impl IfcGitSession {
    pub fn new(backend: Arc<dyn IfcBackend>) -> Self {
        Self {
            locator: RepoLocator::new(backend),
            repo: None,
            file: None,
            display_branch: None,
            filter: RevisionFilter::All,
            entries: Vec::new(),
            selected: 0,
            commit_message: String::new(),
            merge_tool: MergeToolConfig::default(),
            last_error: None,
        }
    }

    /// Bind the session to a model file. Returns false when no enclosing
    /// repository exists; that is an empty state, not an error.
    pub fn open(&mut self, file: &Path) -> bool {
        self.file = Some(file.to_path_buf());
        self.entries.clear();
        self.selected = 0;
        self.last_error = None;

        match self.locator.resolve(file) {
            Some(repo) => {
                self.display_branch = repo.current_branch().ok().filter(|b| b != "HEAD");
                self.repo = Some(repo);
                true
            }
            None => {
                self.repo = None;
                self.display_branch = None;
                false
            }
        }
    }

    /// Create a repository in the model file's directory and bind to it.
    pub fn init_repo(&mut self, file: &Path) -> Result<()> {
        let dir = file
            .parent()
            .ok_or_else(|| Error::new(ErrorKind::Backend("file has no parent directory".into())))?;
        let result = self.locator.backend().init(dir);
        match result {
            Ok(repo) => {
                self.file = Some(file.to_path_buf());
                self.display_branch = None;
                self.repo = Some(repo);
                self.locator.invalidate();
                Ok(())
            }
            Err(e) => self.note(Err(e)),
        }
    }

    pub fn repo(&self) -> Option<&Arc<dyn IfcRepository>> {
        self.repo.as_ref()
    }

    pub fn entries(&self) -> &[RevisionEntry] {
        &self.entries
    }

    pub fn select(&mut self, index: usize) {
        if index < self.entries.len() {
            self.selected = index;
        }
    }

    pub fn selected_entry(&self) -> Option<&RevisionEntry> {
        self.entries.get(self.selected)
    }

    pub fn display_branch(&self) -> Option<&str> {
        self.display_branch.as_deref()
    }

    pub fn set_display_branch(&mut self, name: &str) {
        self.display_branch = Some(name.to_string());
    }

    pub fn filter(&self) -> RevisionFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: RevisionFilter) {
        self.filter = filter;
    }

    /// Suggested commit message, e.g. after a merge.
    pub fn commit_message(&self) -> &str {
        &self.commit_message
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Rebuild the revision list wholesale and reset the selection.
    pub fn refresh(&mut self) -> Result<()> {
        let result = self.refresh_inner();
        self.note(result)
    }

    fn refresh_inner(&mut self) -> Result<()> {
        let (repo, file) = self.bound()?;
        let Some(branch) = self.display_branch.clone() else {
            self.entries.clear();
            self.selected = 0;
            return Ok(());
        };

        self.entries = revlist::build_list(repo.as_ref(), &branch, self.filter, &file)?;
        self.selected = 0;
        Ok(())
    }

    /// Entity delta between the selected revision and the current one, with
    /// shape-representation records resolved to their owning products. The
    /// older revision is always the `from` side; selecting the current
    /// revision yields an empty delta.
    pub fn selected_delta(&mut self, model: &dyn EntityModel) -> Result<EntityDelta> {
        let result = self.selected_delta_inner(model);
        self.note(result)
    }

    fn selected_delta_inner(&mut self, model: &dyn EntityModel) -> Result<EntityDelta> {
        let (repo, file) = self.bound()?;
        let selected = self
            .selected_entry()
            .ok_or_else(|| Error::new(ErrorKind::Backend("no revision selected".into())))?
            .commit
            .clone();
        let current = repo.resolve_revision("HEAD")?;

        let mut delta = entity_diff::delta_between(repo.as_ref(), &selected, &current, &file)?;

        // Substituting owners can collide with ids the diff already lists,
        // so re-establish disjointness with modified taking precedence.
        delta.modified = entity_diff::resolve_indirect(model, &delta.modified);
        delta.added.retain(|id| !delta.modified.contains(id));
        delta.removed.retain(|id| !delta.modified.contains(id));
        Ok(delta)
    }

    /// Entity delta of the working tree against the current revision.
    pub fn uncommitted_delta(&mut self) -> Result<EntityDelta> {
        let result = self.uncommitted_delta_inner();
        self.note(result)
    }

    fn uncommitted_delta_inner(&mut self) -> Result<EntityDelta> {
        use ifcgit_core::domain::RevisionSelector;

        let (repo, file) = self.bound()?;
        let head = repo.resolve_revision("HEAD")?;
        entity_diff::diff(
            repo.as_ref(),
            &RevisionSelector::WorkingTree,
            &RevisionSelector::Commit(head.id),
            &file,
        )
    }

    /// Check out the selected revision and reload the model. A selection
    /// whose hash carries the displayed branch checks out that branch;
    /// anything else is a detached checkout of the commit.
    pub fn switch_revision(&mut self, model: &mut dyn EntityModel) -> Result<()> {
        let result = self.switch_revision_inner(model);
        self.note(result)
    }

    fn switch_revision_inner(&mut self, model: &mut dyn EntityModel) -> Result<()> {
        let (repo, file) = self.bound()?;
        let selected = self
            .selected_entry()
            .ok_or_else(|| Error::new(ErrorKind::Backend("no revision selected".into())))?
            .commit
            .clone();

        let lookup = refindex::branches_by_revision(repo.as_ref())?;
        let branch = lookup
            .get(&selected.id)
            .and_then(|names| {
                names
                    .iter()
                    .find(|name| Some(name.as_str()) == self.display_branch.as_deref())
            })
            .cloned();

        match branch {
            Some(name) => repo.checkout_branch(&name)?,
            None => repo.checkout_commit(&selected.id)?,
        }

        model.load(&file)?;
        self.refresh_inner()
    }

    /// Merge the branch behind the selected revision into the current one,
    /// falling back to the configured semantic merge tool on conflict.
    pub fn merge_selected(&mut self, model: &mut dyn EntityModel) -> MergeReport {
        let (repo, file) = match self.bound() {
            Ok(bound) => bound,
            Err(e) => {
                let report = MergeReport::Failed {
                    rolled_back: false,
                    message: e.to_string(),
                };
                self.last_error = Some(e.to_string());
                return report;
            }
        };
        let Some(selected) = self.selected_entry().map(|e| e.commit.id.clone()) else {
            return MergeReport::NotABranch;
        };
        let Some(display_branch) = self.display_branch.clone() else {
            return MergeReport::NotABranch;
        };

        let mut orchestrator = MergeOrchestrator::new();
        let report = orchestrator.run(
            repo.as_ref(),
            &selected,
            &display_branch,
            &file,
            &self.merge_tool,
        );

        match &report {
            MergeReport::Merged {
                commit_message,
                active_branch,
                ..
            } => {
                self.commit_message = commit_message.clone();
                self.display_branch = Some(active_branch.clone());
                if let Err(e) = model.load(&file) {
                    log::warn!("model reload after merge failed: {e}");
                }
                let _ = self.refresh_inner();
            }
            MergeReport::NotABranch => {}
            MergeReport::Failed { message, .. } => {
                self.last_error = Some(message.clone());
            }
        }
        report
    }

    /// Stage and commit the tracked file. On a detached HEAD the commit is
    /// anchored by a new branch named `new_branch_name`, validated before
    /// any backend call and rejected if a branch of that name exists.
    pub fn commit_changes(&mut self, message: &str, new_branch_name: &str) -> Result<()> {
        let result = self.commit_changes_inner(message, new_branch_name);
        self.note(result)
    }

    fn commit_changes_inner(&mut self, message: &str, new_branch_name: &str) -> Result<()> {
        let (repo, file) = self.bound()?;
        let detached = repo.head_detached()?;

        if detached {
            if !is_valid_ref_name(new_branch_name) {
                return Err(Error::new(ErrorKind::InvalidRefName(
                    new_branch_name.to_string(),
                )));
            }
            let exists = repo
                .list_branches()?
                .iter()
                .any(|b| b.name == new_branch_name);
            if exists {
                return Err(Error::new(ErrorKind::Backend(format!(
                    "branch {new_branch_name:?} already exists"
                ))));
            }
        }

        repo.stage(&file)?;
        repo.commit(message)?;
        self.commit_message.clear();

        if detached {
            repo.create_branch(new_branch_name)?;
            repo.checkout_branch(new_branch_name)?;
            self.display_branch = Some(new_branch_name.to_string());
        }

        self.refresh_inner()
    }

    /// Throw away uncommitted changes to the tracked file and reload.
    pub fn discard_uncommitted(&mut self, model: &mut dyn EntityModel) -> Result<()> {
        let result = self.discard_uncommitted_inner(model);
        self.note(result)
    }

    fn discard_uncommitted_inner(&mut self, model: &mut dyn EntityModel) -> Result<()> {
        let (repo, file) = self.bound()?;
        repo.discard_path(&file)?;
        model.load(&file)
    }

    /// Put the tracked file under version control with an initial commit.
    pub fn add_file(&mut self) -> Result<()> {
        let result = self.add_file_inner();
        self.note(result)
    }

    fn add_file_inner(&mut self) -> Result<()> {
        let (repo, file) = self.bound()?;
        let name = file
            .strip_prefix(&repo.spec().workdir)
            .unwrap_or(&file)
            .display()
            .to_string();

        repo.stage(&file)?;
        repo.commit(&format!("Added {name}"))
    }

    fn bound(&self) -> Result<(Arc<dyn IfcRepository>, PathBuf)> {
        let repo = self
            .repo
            .as_ref()
            .map(Arc::clone)
            .ok_or_else(|| Error::new(ErrorKind::NotARepository))?;
        let file = self
            .file
            .clone()
            .ok_or_else(|| Error::new(ErrorKind::Backend("no model file bound".into())))?;
        Ok((repo, file))
    }

    fn note<T>(&mut self, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(e) => {
                log::warn!("session operation failed: {e}");
                self.last_error = Some(e.to_string());
            }
        }
        result
    }
}
