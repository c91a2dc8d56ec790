use crate::repo::GixRepo;
use ifcgit_core::error::{Error, ErrorKind};
use ifcgit_core::services::{IfcBackend, IfcRepository, Result};
use std::path::Path;
use std::sync::Arc;

#[derive(Default)]
pub struct GixBackend;

impl IfcBackend for GixBackend {
    fn open(&self, workdir: &Path) -> Result<Arc<dyn IfcRepository>> {
        let workdir = workdir
            .canonicalize()
            .map_err(|e| Error::new(ErrorKind::Io(e.kind())))?;

        let repo = gix::open(&workdir).map_err(|e| match e {
            gix::open::Error::NotARepository { .. } => Error::new(ErrorKind::NotARepository),
            gix::open::Error::Io(io) => Error::new(ErrorKind::Io(io.kind())),
            e => Error::new(ErrorKind::Backend(format!("gix open: {e}"))),
        })?;

        Ok(Arc::new(GixRepo::new(workdir, repo.into_sync())))
    }

    fn init(&self, workdir: &Path) -> Result<Arc<dyn IfcRepository>> {
        let repo = gix::init(workdir)
            .map_err(|e| Error::new(ErrorKind::Backend(format!("gix init: {e}"))))?;

        let workdir = workdir
            .canonicalize()
            .map_err(|e| Error::new(ErrorKind::Io(e.kind())))?;

        Ok(Arc::new(GixRepo::new(workdir, repo.into_sync())))
    }
}
