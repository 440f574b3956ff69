// Filter criteria and the query string derived from them.

use std::fmt;

use crate::error::Error;

/// A reference to a management center object, either by backend id or by
/// the display name to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    ById(String),
    ByName(String),
}

impl Identifier {
    /// Build from a pair of optional inputs, preferring the id.
    ///
    /// Blank strings count as absent.
    pub fn from_parts(
        id: Option<String>,
        name: Option<String>,
        target: &'static str,
    ) -> Result<Self, Error> {
        let non_blank = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
        if let Some(id) = non_blank(id) {
            return Ok(Self::ById(id));
        }
        non_blank(name)
            .map(Self::ByName)
            .ok_or(Error::MissingIdentifier { target })
    }

    /// The raw id or name.
    pub fn value(&self) -> &str {
        match self {
            Self::ById(v) | Self::ByName(v) => v,
        }
    }

    pub(crate) fn ensure_present(&self, target: &'static str) -> Result<(), Error> {
        if self.value().trim().is_empty() {
            Err(Error::MissingIdentifier { target })
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ById(id) => write!(f, "id {id}"),
            Self::ByName(name) => write!(f, "\"{name}\""),
        }
    }
}

/// What a hit-count query is scoped to.
///
/// Holds resolved backend ids only; names are resolved by
/// [`HitCount`](super::HitCount) before they land here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    policy_id: Option<String>,
    device_id: Option<String>,
    prefilter_ids: Vec<String>,
    fetch_zero_hit_count: bool,
    page_limit: Option<u32>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn policy_id(&self) -> Option<&str> {
        self.policy_id.as_deref()
    }

    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    pub fn prefilter_ids(&self) -> &[String] {
        &self.prefilter_ids
    }

    pub fn fetch_zero_hit_count(&self) -> bool {
        self.fetch_zero_hit_count
    }

    pub fn page_limit(&self) -> Option<u32> {
        self.page_limit
    }

    pub fn set_policy_id(&mut self, id: impl Into<String>) {
        self.policy_id = Some(id.into());
    }

    pub fn set_device_id(&mut self, id: impl Into<String>) {
        self.device_id = Some(id.into());
    }

    /// Append a prefilter id. Returns `false` if it was already present.
    pub fn push_prefilter(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.prefilter_ids.contains(&id) {
            return false;
        }
        self.prefilter_ids.push(id);
        true
    }

    /// Remove a prefilter id. Returns `false` if it was not present.
    pub fn remove_prefilter(&mut self, id: &str) -> bool {
        let before = self.prefilter_ids.len();
        self.prefilter_ids.retain(|p| p != id);
        self.prefilter_ids.len() != before
    }

    /// Drop all prefilter ids, returning how many there were.
    pub fn clear_prefilters(&mut self) -> usize {
        let count = self.prefilter_ids.len();
        self.prefilter_ids.clear();
        count
    }

    pub fn set_fetch_zero_hit_count(&mut self, value: bool) {
        self.fetch_zero_hit_count = value;
    }

    pub fn set_page_limit(&mut self, limit: Option<u32>) {
        self.page_limit = limit;
    }

    /// Whether the query is scoped to a device or to prefilter policies.
    pub fn has_scope(&self) -> bool {
        self.device_id.is_some() || !self.prefilter_ids.is_empty()
    }

    /// Derive `?filter="..."&expanded=true[&limit=n]`.
    ///
    /// Clause order is fixed: `deviceId`, `ids`, `fetchZeroHitCount`. Only
    /// set fields produce a clause and the last clause carries no `;`.
    pub fn query_suffix(&self) -> String {
        let mut clauses = Vec::with_capacity(3);
        if let Some(device) = &self.device_id {
            clauses.push(format!("deviceId:{device}"));
        }
        if !self.prefilter_ids.is_empty() {
            clauses.push(format!("ids:{}", self.prefilter_ids.join(",")));
        }
        if self.fetch_zero_hit_count {
            clauses.push("fetchZeroHitCount:true".to_owned());
        }

        let mut suffix = format!("?filter=\"{}\"&expanded=true", clauses.join(";"));
        if let Some(limit) = self.page_limit {
            suffix.push_str(&format!("&limit={limit}"));
        }
        suffix
    }
}
