//! Reference string parsing.
//!
//! Resolves raw reference strings ("Patient/123", absolute URLs, versioned
//! references, bare ids) into a structured [`ParsedReference`]. Contained
//! (`#...`) and `urn:` references are deliberately not indexable, and any
//! string matching none of the recognized layouts parses to `None` — a single
//! bad reference must not abort extraction of the rest of the resource.

use std::sync::LazyLock;

use regex::Regex;

use crate::value::SearchValue;

/// `[base/]Type/id[/_history/version]`, with an absolute http(s) base
/// captured separately. Resource type names start with an uppercase letter,
/// which is what distinguishes the type segment from trailing base path
/// segments. Ids and version ids follow the FHIR id grammar (1-64 chars).
static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?P<base>https?://[^?#]*?)/)?(?P<type>[A-Z][A-Za-z]*)/(?P<id>[A-Za-z0-9\-\.]{1,64})(?:/_history/(?P<version>[A-Za-z0-9\-\.]{1,64}))?$",
    )
    .expect("reference pattern is valid")
});

static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-\.]{1,64}$").expect("id pattern is valid"));

/// A reference string resolved into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReference {
    /// Service base URL, when the reference was absolute.
    pub base: Option<String>,
    /// Target resource type. `None` for bare ids, where the caller has
    /// independently constrained the target type.
    pub resource_type: Option<String>,
    /// Target resource id.
    pub id: String,
    /// Version id, for `_history` references.
    pub version: Option<String>,
}

impl From<ParsedReference> for SearchValue {
    fn from(parsed: ParsedReference) -> Self {
        SearchValue::Reference {
            base: parsed.base,
            resource_type: parsed.resource_type,
            id: parsed.id,
            version: parsed.version,
        }
    }
}

/// Parses a raw reference string.
///
/// Returns `None` for contained (`#...`) references, `urn:` references, and
/// anything that matches neither the `[base/]Type/id[/_history/version]`
/// layout nor a bare id.
pub fn parse_reference(raw: &str) -> Option<ParsedReference> {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with('#') || raw.starts_with("urn:") {
        return None;
    }

    if let Some(caps) = REFERENCE_RE.captures(raw) {
        return Some(ParsedReference {
            base: caps.name("base").map(|m| m.as_str().to_string()),
            resource_type: Some(caps["type"].to_string()),
            id: caps["id"].to_string(),
            version: caps.name("version").map(|m| m.as_str().to_string()),
        });
    }

    // A bare id is acceptable where the caller already knows the target type.
    if ID_RE.is_match(raw) {
        return Some(ParsedReference {
            base: None,
            resource_type: None,
            id: raw.to_string(),
            version: None,
        });
    }

    None
}
