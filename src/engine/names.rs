// Display-name policy.
//
// Two sources disagree about what a process is called: the OS (trusted, but
// the process may already be gone) and the kernel-observed thread names
// (always present, but often generic per-thread labels). The policy below
// is data so it can be tested and extended on its own.

use crate::model::{NameSource, ProcessEntity};
use crate::process::ProcessNameOracle;

/// Marker used when no source produced a name.
pub const UNKNOWN_NAME: &str = "unknown";

/// A thread-name shape that says nothing about which program it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NamePattern {
    Exact(&'static str),
    Prefix(&'static str),
}

impl NamePattern {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(s) => name == *s,
            Self::Prefix(p) => name.starts_with(p),
        }
    }
}

/// Known low-information names, checked in order.
pub const LOW_INFO_PATTERNS: &[NamePattern] = &[
    NamePattern::Exact(UNKNOWN_NAME),
    // Firefox/Gecko network thread.
    NamePattern::Exact("Socket Thread"),
    // Gecko resolver threads, truncated by TASK_COMM_LEN ("DNS Res~ver #N").
    NamePattern::Prefix("DNS Res"),
];

pub fn is_low_information(name: &str) -> bool {
    LOW_INFO_PATTERNS.iter().any(|p| p.matches(name))
}

/// Pick the most descriptive thread-name candidate.
///
/// First candidate that is not a low-information label wins; otherwise the
/// first non-empty candidate; `None` only when there is nothing at all.
pub fn pick_candidate(candidates: &[String]) -> Option<&str> {
    let mut fallback = None;
    for name in candidates.iter().filter(|n| !n.is_empty()) {
        if !is_low_information(name) {
            return Some(name.as_str());
        }
        fallback.get_or_insert(name.as_str());
    }
    fallback
}

/// Whether the entity's name may still be replaced.
///
/// OS-reported names are final. Anything else is replaced only while it is
/// empty or one of the generic labels above.
pub fn needs_resolution(entity: &ProcessEntity) -> bool {
    entity.name_source != NameSource::Oracle
        && (entity.name.is_empty() || is_low_information(&entity.name))
}

/// Run one resolution attempt for `entity` against this tick's candidates.
///
/// A failed oracle lookup is not retried here; the next tick tries again
/// as long as the name is still a placeholder.
pub fn resolve<O>(entity: &mut ProcessEntity, candidates: &[String], oracle: &O)
where
    O: ProcessNameOracle + ?Sized,
{
    if !needs_resolution(entity) {
        return;
    }

    if let Some(name) = oracle.lookup(entity.pid).filter(|n| !n.is_empty()) {
        log::debug!("pid {}: name {:?} from os", entity.pid, name);
        entity.name = name;
        entity.name_source = NameSource::Oracle;
        return;
    }

    match pick_candidate(candidates) {
        Some(name) => {
            if entity.name != name {
                log::debug!("pid {}: name {:?} from thread names", entity.pid, name);
                entity.name = name.to_string();
            }
            entity.name_source = if is_low_information(name) {
                NameSource::Unresolved
            } else {
                NameSource::Candidate
            };
        }
        // Nothing new this tick; keep whatever placeholder we already have.
        None if entity.name.is_empty() => {
            entity.name = UNKNOWN_NAME.to_string();
        }
        None => {}
    }
}
