//! Management center version parsing and comparison.
//!
//! The server reports versions like `"6.6.0 (build 90)"`. Only the dotted
//! numeric prefix matters for feature gating; components are compared
//! numerically so `6.10` sorts after `6.4`.

use std::cmp::Ordering;
use std::fmt;

/// A parsed management center version.
#[derive(Debug, Clone)]
pub struct ServerVersion {
    raw: String,
    parts: Vec<u32>,
}

impl ServerVersion {
    /// Parse the dotted numeric prefix of a version string.
    ///
    /// Parsing stops at the first non-numeric component, so an unparseable
    /// string yields a version with no components (older than anything).
    pub fn parse(raw: &str) -> Self {
        let head = raw
            .trim()
            .split(|c: char| c.is_whitespace() || c == '(' || c == '-')
            .next()
            .unwrap_or_default();
        let parts = head
            .split('.')
            .map_while(|p| p.parse::<u32>().ok())
            .collect();
        Self {
            raw: raw.trim().to_owned(),
            parts,
        }
    }

    /// The string as reported by the server.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether this version is at least `minimum`.
    pub fn supports(&self, minimum: &ServerVersion) -> bool {
        self.cmp_parts(minimum) != Ordering::Less
    }

    fn cmp_parts(&self, other: &ServerVersion) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        for i in 0..len {
            let a = self.parts.get(i).copied().unwrap_or(0);
            let b = other.parts.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialEq for ServerVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_parts(other) == Ordering::Equal
    }
}

impl Eq for ServerVersion {}

impl PartialOrd for ServerVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ServerVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_parts(other)
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
