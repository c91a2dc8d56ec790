use crate::domain::{Commit, EntityDelta, RevisionSelector};
use crate::services::{EntityModel, IfcRepository, Result};
use rustc_hash::FxHashSet;
use std::path::Path;

/// STEP class whose records are owned by a product entity; viewers
/// highlight the product, not the shape record itself.
pub const PRODUCT_SHAPE_CLASS: &str = "IfcProductDefinitionShape";

/// Reduce a unified patch to the sets of STEP identifiers it touches.
///
/// A record that is both deleted and re-inserted under the same identifier
/// changed content but kept its identity, so it is modified, not
/// added+removed. The other two sets are the leftovers of that
/// intersection, which keeps all three pairwise disjoint.
pub fn entity_delta_from_patch(patch: &str) -> EntityDelta {
    let mut inserted = FxHashSet::default();
    let mut deleted = FxHashSet::default();

    for line in patch.lines() {
        if let Some(id) = record_id(line, '+') {
            inserted.insert(id);
        } else if let Some(id) = record_id(line, '-') {
            deleted.insert(id);
        }
    }

    let modified: FxHashSet<u64> = inserted.intersection(&deleted).copied().collect();
    let added = inserted.difference(&modified).copied().collect();
    let removed = deleted.difference(&modified).copied().collect();

    EntityDelta {
        added,
        removed,
        modified,
    }
}

/// Matches `<marker>#<digits>=` at the start of a patch line. The `+++`
/// and `---` file headers fail the `#` check and contribute nothing.
fn record_id(line: &str, marker: char) -> Option<u64> {
    let rest = line.strip_prefix(marker)?.strip_prefix('#')?;
    let digits_end = rest.find(|c: char| !c.is_ascii_digit())?;
    if digits_end == 0 || rest.as_bytes()[digits_end] != b'=' {
        return None;
    }
    rest[..digits_end].parse().ok()
}

/// Entity delta between two selectors, restricted to `path`.
pub fn diff(
    repo: &dyn IfcRepository,
    from: &RevisionSelector,
    to: &RevisionSelector,
    path: &Path,
) -> Result<EntityDelta> {
    let patch = repo.diff_unified(from, to, path)?;
    Ok(entity_delta_from_patch(&patch))
}

/// Entity delta between two revisions with the older one on the `from`
/// side. Identical revisions short-circuit without touching the backend.
pub fn delta_between(
    repo: &dyn IfcRepository,
    a: &Commit,
    b: &Commit,
    path: &Path,
) -> Result<EntityDelta> {
    if a.id == b.id {
        return Ok(EntityDelta::default());
    }

    let (older, newer) = if a.time <= b.time { (a, b) } else { (b, a) };
    diff(
        repo,
        &RevisionSelector::Commit(older.id.clone()),
        &RevisionSelector::Commit(newer.id.clone()),
        path,
    )
}

/// Map indirectly-affected identifiers to the semantically relevant entity:
/// a shape-representation record is reported as its owning product, every
/// other identifier passes through unchanged.
pub fn resolve_indirect(model: &dyn EntityModel, modified: &FxHashSet<u64>) -> FxHashSet<u64> {
    let mut resolved = FxHashSet::default();
    for &id in modified {
        let owner = match model.class_of(id) {
            Some(class) if class == PRODUCT_SHAPE_CLASS => model.product_of_shape(id),
            _ => None,
        };
        resolved.insert(owner.unwrap_or(id));
    }
    resolved
}
