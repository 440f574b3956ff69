// Name/id lookups for the objects a hit-count filter refers to.
//
// By-id lookups are a single GET; by-name lookups page through the
// collection until an exact name match turns up.

use reqwest::Method;
use tracing::debug;

use crate::client::FmcClient;
use crate::error::Error;
use crate::models::{Page, Reference};

/// Largest page the management center serves, whatever `limit` asks for.
const SERVER_PAGE_CAP: u32 = 1000;

/// Object collections a hit-count filter can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    AccessPolicy,
    Device,
    PrefilterPolicy,
}

impl ResourceKind {
    /// Collection path under the configuration root.
    pub fn path(self) -> &'static str {
        match self {
            Self::AccessPolicy => "policy/accesspolicies",
            Self::Device => "devices/devicerecords",
            Self::PrefilterPolicy => "policy/prefilterpolicies",
        }
    }

    /// Human-readable name for diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Self::AccessPolicy => "access control policy",
            Self::Device => "device",
            Self::PrefilterPolicy => "prefilter policy",
        }
    }
}

impl FmcClient {
    /// Fetch one object by id. A 404 is `Ok(None)`.
    pub async fn find_by_id(&self, kind: ResourceKind, id: &str) -> Result<Option<Reference>, Error> {
        let url = self.config_url(&format!("{}/{id}", kind.path()))?;
        match self.send_to_api::<Reference>(Method::GET, url).await {
            Ok(found) => Ok(Some(found)),
            Err(e) if e.is_not_found() => {
                debug!(kind = kind.label(), id, "lookup by id found nothing");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Find an object by exact name, paging through the collection.
    pub async fn find_by_name(
        &self,
        kind: ResourceKind,
        name: &str,
    ) -> Result<Option<Reference>, Error> {
        let limit = self.limit().clamp(1, SERVER_PAGE_CAP);
        let mut offset: u64 = 0;

        loop {
            let mut url = self.config_url(kind.path())?;
            url.query_pairs_mut()
                .append_pair("offset", &offset.to_string())
                .append_pair("limit", &limit.to_string());

            let page: Page<Reference> = self.send_to_api(Method::GET, url).await?;
            let received = u64::try_from(page.items.len()).unwrap_or(u64::MAX);

            if let Some(found) = page
                .items
                .into_iter()
                .find(|r| r.name.as_deref() == Some(name))
            {
                return Ok(Some(found));
            }

            // Pages can be shorter than `limit` before the last one.
            offset = offset.saturating_add(received);
            let total = page.paging.map_or(0, |p| p.count);
            if received == 0 || offset >= total {
                break;
            }
        }

        debug!(kind = kind.label(), name, "lookup by name found nothing");
        Ok(None)
    }
}
