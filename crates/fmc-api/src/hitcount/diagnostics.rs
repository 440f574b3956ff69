// Non-fatal outcomes of criteria changes.
//
// Setters hand these back instead of logging on their own; callers decide
// whether to show, log or ignore them. `Diagnostic::log` routes one to
// `tracing` at its level.

use std::fmt;

use tracing::{info, warn};

use super::criteria::Identifier;
use crate::lookup::ResourceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Info,
    Warning,
}

/// One soft outcome of a setter call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Name or id did not resolve; criteria left unchanged.
    NotFound {
        kind: ResourceKind,
        identifier: Identifier,
    },
    /// Prefilter id already in the filter; not added twice.
    DuplicatePrefilter { id: String },
    PrefilterAdded { id: String },
    PrefilterRemoved { id: String },
    /// Remove asked for an id the filter does not hold.
    PrefilterNotPresent { id: String },
    /// Remove on an empty prefilter list.
    PrefiltersEmpty,
    PrefiltersCleared { count: usize },
}

/// Diagnostics produced by one call, in the order they happened.
pub type Diagnostics = Vec<Diagnostic>;

impl Diagnostic {
    pub fn level(&self) -> DiagnosticLevel {
        match self {
            Self::NotFound { .. } | Self::DuplicatePrefilter { .. } => DiagnosticLevel::Warning,
            Self::PrefilterAdded { .. }
            | Self::PrefilterRemoved { .. }
            | Self::PrefilterNotPresent { .. }
            | Self::PrefiltersEmpty
            | Self::PrefiltersCleared { .. } => DiagnosticLevel::Info,
        }
    }

    pub fn is_warning(&self) -> bool {
        self.level() == DiagnosticLevel::Warning
    }

    /// Emit through `tracing` at the diagnostic's level.
    pub fn log(&self) {
        match self.level() {
            DiagnosticLevel::Warning => warn!("{self}"),
            DiagnosticLevel::Info => info!("{self}"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { kind, identifier } => {
                write!(f, "{} {identifier} not found", kind.label())
            }
            Self::DuplicatePrefilter { id } => {
                write!(f, "prefilter {id} already in filter, not duplicating")
            }
            Self::PrefilterAdded { id } => write!(f, "added prefilter {id} to filter"),
            Self::PrefilterRemoved { id } => write!(f, "removed prefilter {id} from filter"),
            Self::PrefilterNotPresent { id } => {
                write!(f, "prefilter {id} not in filter, nothing to remove")
            }
            Self::PrefiltersEmpty => f.write_str("no prefilters in filter, nothing to remove"),
            Self::PrefiltersCleared { count } => write!(f, "cleared {count} prefilter(s)"),
        }
    }
}
