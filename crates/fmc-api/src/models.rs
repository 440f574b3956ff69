// REST API response types
//
// Models for the management center's JSON API. List endpoints share the
// `{ items, paging, links }` page shape. Fields use `#[serde(default)]`
// liberally because field presence varies across FMC releases.

use serde::{Deserialize, Serialize};

// ── Page envelope ────────────────────────────────────────────────────

/// Standard list response.
///
/// `items` is omitted by the server when the result is empty; it always
/// deserializes to an empty `Vec` in that case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub paging: Option<Paging>,
    #[serde(default)]
    pub links: Option<Links>,
}

/// Paging metadata attached to list responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub pages: u64,
    #[serde(default)]
    pub next: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self", default)]
    pub self_link: Option<String>,
}

// ── References ───────────────────────────────────────────────────────

/// Minimal `{ id, name, type }` object returned by lookups and embedded
/// in hit-count metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

// ── Hit counts ───────────────────────────────────────────────────────

/// Hit-count page from `operational/hitcounts`.
pub type HitCountPage = Page<HitCountRecord>;

/// One rule's hit statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitCountRecord {
    #[serde(default)]
    pub rule: Option<Reference>,
    #[serde(default)]
    pub hit_count: u64,
    #[serde(default)]
    pub first_hit_time_stamp: Option<String>,
    #[serde(default)]
    pub last_hit_time_stamp: Option<String>,
    #[serde(default)]
    pub last_fetch_time_stamp: Option<String>,
    #[serde(default)]
    pub metadata: Option<HitCountMetadata>,
    /// Catch-all for fields not modelled above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl HitCountRecord {
    /// Rule name, falling back to the rule id.
    pub fn rule_label(&self) -> &str {
        self.rule
            .as_ref()
            .map_or("", |r| r.name.as_deref().unwrap_or(&r.id))
    }
}

/// Policy and device the counts were collected for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HitCountMetadata {
    #[serde(default)]
    pub policy: Option<Reference>,
    #[serde(default)]
    pub device: Option<Reference>,
}
