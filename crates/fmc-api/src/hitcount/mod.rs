// Hit-count resource
//
// Rule usage statistics for one access control policy, scoped to a device
// and/or a set of prefilter policies. Criteria are mutated through the
// setters below and the request URL is derived from them on every call.

mod criteria;
mod diagnostics;

use reqwest::Method;
use tracing::{debug, info};
use url::Url;

use crate::client::FmcClient;
use crate::error::Error;
use crate::lookup::ResourceKind;
use crate::models::{HitCountPage, Paging};
use crate::version::ServerVersion;

pub use criteria::{FilterCriteria, Identifier};
pub use diagnostics::{Diagnostic, DiagnosticLevel, Diagnostics};

/// First management center release with the hit-count API.
pub const MIN_HITCOUNT_VERSION: &str = "6.4";

/// Change to the prefilter policy list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefilterAction {
    Add(Identifier),
    Remove(Identifier),
    Clear,
}

/// Criteria overrides merged in by [`HitCount::apply`] and [`HitCount::get`].
#[derive(Debug, Clone, Default)]
pub struct HitCountQuery {
    pub policy: Option<Identifier>,
    pub device: Option<Identifier>,
    pub prefilters: Vec<Identifier>,
    pub fetch_zero_hit_count: Option<bool>,
    pub limit: Option<u32>,
}

/// A request that dry-run mode reported instead of sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRequest {
    pub method: Method,
    pub url: String,
}

/// Result of a request-issuing call.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    Sent(T),
    DryRun(PlannedRequest),
}

impl<T> Outcome<T> {
    /// The response, if a request was actually sent.
    pub fn into_sent(self) -> Option<T> {
        match self {
            Self::Sent(v) => Some(v),
            Self::DryRun(_) => None,
        }
    }
}

pub type GetOutcome = Outcome<HitCountPage>;

/// Hit counts for one access control policy.
pub struct HitCount<'a> {
    client: &'a FmcClient,
    criteria: FilterCriteria,
    paging: Option<Paging>,
}

impl<'a> HitCount<'a> {
    /// New resource with empty criteria and the client's default page size.
    pub fn new(client: &'a FmcClient) -> Self {
        let mut criteria = FilterCriteria::new();
        criteria.set_page_limit(Some(client.limit()));
        Self {
            client,
            criteria,
            paging: None,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Paging metadata from the last successful `get`.
    pub fn paging(&self) -> Option<&Paging> {
        self.paging.as_ref()
    }

    // ── Criteria setters ─────────────────────────────────────────────

    /// Scope to an access control policy. Ids are stored as given; names
    /// are resolved and left unset with a warning when nothing matches.
    pub async fn set_policy(&mut self, policy: Identifier) -> Result<Diagnostics, Error> {
        policy.ensure_present("access control policy")?;
        match self.resolve_direct(ResourceKind::AccessPolicy, policy).await? {
            Ok(id) => {
                self.criteria.set_policy_id(id);
                Ok(Vec::new())
            }
            Err(diag) => Ok(vec![diag]),
        }
    }

    /// Scope to a device, same contract as [`set_policy`](Self::set_policy).
    pub async fn set_device(&mut self, device: Identifier) -> Result<Diagnostics, Error> {
        device.ensure_present("device")?;
        match self.resolve_direct(ResourceKind::Device, device).await? {
            Ok(id) => {
                self.criteria.set_device_id(id);
                Ok(Vec::new())
            }
            Err(diag) => Ok(vec![diag]),
        }
    }

    /// Add, remove or clear prefilter policies. Both ids and names are
    /// checked against the server before add/remove.
    pub async fn manage_prefilters(&mut self, action: PrefilterAction) -> Result<Diagnostics, Error> {
        let (adding, ident) = match action {
            PrefilterAction::Clear => {
                let count = self.criteria.clear_prefilters();
                return Ok(if count > 0 {
                    vec![Diagnostic::PrefiltersCleared { count }]
                } else {
                    Vec::new()
                });
            }
            PrefilterAction::Add(ident) => (true, ident),
            PrefilterAction::Remove(ident) => (false, ident),
        };
        ident.ensure_present("prefilter policy")?;

        let found = match &ident {
            Identifier::ById(id) => {
                self.client
                    .find_by_id(ResourceKind::PrefilterPolicy, id)
                    .await?
            }
            Identifier::ByName(name) => {
                self.client
                    .find_by_name(ResourceKind::PrefilterPolicy, name)
                    .await?
            }
        };
        let Some(found) = found else {
            return Ok(vec![Diagnostic::NotFound {
                kind: ResourceKind::PrefilterPolicy,
                identifier: ident,
            }]);
        };

        let id = found.id;
        let diag = if adding {
            if self.criteria.push_prefilter(id.clone()) {
                Diagnostic::PrefilterAdded { id }
            } else {
                Diagnostic::DuplicatePrefilter { id }
            }
        } else if self.criteria.prefilter_ids().is_empty() {
            Diagnostic::PrefiltersEmpty
        } else if self.criteria.remove_prefilter(&id) {
            Diagnostic::PrefilterRemoved { id }
        } else {
            Diagnostic::PrefilterNotPresent { id }
        };
        Ok(vec![diag])
    }

    pub fn set_fetch_zero_hit_count(&mut self, value: bool) {
        self.criteria.set_fetch_zero_hit_count(value);
    }

    /// Page size for the next request; `None` omits `&limit=`.
    pub fn set_page_limit(&mut self, limit: Option<u32>) {
        self.criteria.set_page_limit(limit);
    }

    /// Merge override criteria through the regular setters.
    ///
    /// All or nothing: if any override fails, the criteria are restored to
    /// what they were before the call.
    pub async fn apply(&mut self, query: HitCountQuery) -> Result<Diagnostics, Error> {
        let snapshot = self.criteria.clone();
        let applied = self.apply_overrides(query).await;
        if applied.is_err() {
            self.criteria = snapshot;
        }
        applied
    }

    async fn apply_overrides(&mut self, query: HitCountQuery) -> Result<Diagnostics, Error> {
        if let Some(policy) = &query.policy {
            policy.ensure_present("access control policy")?;
        }
        if let Some(device) = &query.device {
            device.ensure_present("device")?;
        }
        for prefilter in &query.prefilters {
            prefilter.ensure_present("prefilter policy")?;
        }

        let mut diags = Vec::new();
        if let Some(policy) = query.policy {
            diags.extend(self.set_policy(policy).await?);
        }
        if let Some(device) = query.device {
            diags.extend(self.set_device(device).await?);
        }
        for prefilter in query.prefilters {
            diags.extend(self.manage_prefilters(PrefilterAction::Add(prefilter)).await?);
        }
        if let Some(value) = query.fetch_zero_hit_count {
            self.set_fetch_zero_hit_count(value);
        }
        if let Some(limit) = query.limit {
            self.set_page_limit(Some(limit));
        }
        Ok(diags)
    }

    // ── Requests ─────────────────────────────────────────────────────

    /// Full hit-count URL for the current criteria.
    pub fn url(&self) -> Result<String, Error> {
        let policy = self.criteria.policy_id().ok_or_else(|| Error::Validation {
            message: "an access control policy id is required".into(),
            diagnostics: Vec::new(),
        })?;
        Ok(format!(
            "{}/{}/{policy}/operational/hitcounts{}",
            self.client.configuration_url(),
            ResourceKind::AccessPolicy.path(),
            self.criteria.query_suffix()
        ))
    }

    /// Fetch hit counts, merging `query` into the criteria first.
    ///
    /// Refused without a request when the server predates 6.4 or the
    /// criteria lack a policy, or lack both a device and prefilters. The
    /// diagnostics from merging `query` come back with the outcome, or on
    /// the `Validation` error when the merge left the criteria incomplete.
    pub async fn get(
        &mut self,
        query: Option<HitCountQuery>,
    ) -> Result<(GetOutcome, Diagnostics), Error> {
        let diagnostics = match query {
            Some(query) => self.apply(query).await?,
            None => Vec::new(),
        };

        let outcome: GetOutcome = match self.send::<HitCountPage>(Method::GET).await {
            Ok(outcome) => outcome,
            Err(Error::Validation { message, .. }) => {
                return Err(Error::Validation {
                    message,
                    diagnostics,
                });
            }
            Err(e) => return Err(e),
        };
        if let Outcome::Sent(page) = &outcome {
            debug!(items = page.items.len(), "hit counts received");
            self.paging.clone_from(&page.paging);
        }
        Ok((outcome, diagnostics))
    }

    /// Ask the server to recompute hit counts for the current criteria.
    pub async fn refresh(&self) -> Result<Outcome<serde_json::Value>, Error> {
        self.send(Method::PUT).await
    }

    /// Reset hit counts for the current criteria.
    pub async fn clear_counts(&self) -> Result<Outcome<serde_json::Value>, Error> {
        self.send(Method::DELETE).await
    }

    /// Hit counts are computed by the server and cannot be created.
    pub fn post(&self) -> Result<(), Error> {
        info!(
            policy = self.criteria.policy_id().unwrap_or("-"),
            "POST is not supported for hit counts"
        );
        Err(Error::UnsupportedOperation(
            "hit counts are read-only and cannot be created",
        ))
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Check preconditions and return the URL to call.
    fn checked_url(&self) -> Result<String, Error> {
        let required = ServerVersion::parse(MIN_HITCOUNT_VERSION);
        let found = self.client.server_version();
        if !found.supports(&required) {
            return Err(Error::UnsupportedVersion {
                found: found.to_string(),
                required: required.to_string(),
            });
        }

        if self.criteria.policy_id().is_none() {
            return Err(Error::Validation {
                message: "an access control policy id is required".into(),
                diagnostics: Vec::new(),
            });
        }
        if !self.criteria.has_scope() {
            return Err(Error::Validation {
                message: "a device or at least one prefilter policy is required".into(),
                diagnostics: Vec::new(),
            });
        }

        self.url()
    }

    async fn send<T: serde::de::DeserializeOwned>(&self, method: Method) -> Result<Outcome<T>, Error> {
        let url = self.checked_url()?;

        if self.client.dry_run() {
            info!("dry run enabled, not sending to the management center");
            info!("\tmethod = {method}");
            info!("\turl = {url}");
            return Ok(Outcome::DryRun(PlannedRequest { method, url }));
        }

        let parsed = Url::parse(&url)?;
        Ok(Outcome::Sent(self.client.send_to_api(method, parsed).await?))
    }

    /// Policy and device ids are taken as given; only names hit the server.
    async fn resolve_direct(
        &self,
        kind: ResourceKind,
        ident: Identifier,
    ) -> Result<Result<String, Diagnostic>, Error> {
        match ident {
            Identifier::ById(id) => Ok(Ok(id)),
            Identifier::ByName(name) => match self.client.find_by_name(kind, &name).await? {
                Some(found) => Ok(Ok(found.id)),
                None => Ok(Err(Diagnostic::NotFound {
                    kind,
                    identifier: Identifier::ByName(name),
                })),
            },
        }
    }
}
