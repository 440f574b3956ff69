// fmc-api: Async Rust client for Firepower Management Center hit counts

pub mod auth;
pub mod client;
pub mod error;
pub mod hitcount;
pub mod lookup;
pub mod models;
pub mod transport;
pub mod version;

pub use auth::ClientConfig;
pub use client::{DEFAULT_LIMIT, FmcClient};
pub use error::Error;
pub use hitcount::{
    Diagnostic, DiagnosticLevel, Diagnostics, FilterCriteria, GetOutcome, HitCount, HitCountQuery,
    Identifier, MIN_HITCOUNT_VERSION, Outcome, PlannedRequest, PrefilterAction,
};
pub use lookup::ResourceKind;
pub use models::{HitCountPage, HitCountRecord, Links, Paging, Reference};
pub use transport::{TlsMode, TransportConfig};
pub use version::ServerVersion;
