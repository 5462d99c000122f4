//! Extractors that produce Reference values.
//!
//! All of them funnel through [`parse_reference`], so contained (`#...`),
//! `urn:`, and unparseable strings uniformly extract to nothing.

use lumen_element::ElementNode;

use crate::error::ExtractionError;
use crate::reference::parse_reference;
use crate::value::SearchValue;

use super::{SearchValueExtractor, child_str, guard_source_type};

fn reference_value(raw: &str) -> Option<SearchValue> {
    parse_reference(raw).map(SearchValue::from)
}

/// Reference → Reference, from the `reference` child.
pub struct ReferenceExtractor;

impl SearchValueExtractor for ReferenceExtractor {
    fn name(&self) -> &'static str {
        "ReferenceExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["Reference", "ResourceReference"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        Ok(child_str(node, "reference")
            .and_then(reference_value)
            .into_iter()
            .collect())
    }
}

/// id → Reference. The target type is implied by the search parameter the
/// caller is compiling, so the parsed reference carries none.
pub struct IdReferenceExtractor;

impl SearchValueExtractor for IdReferenceExtractor {
    fn name(&self) -> &'static str {
        "IdReferenceExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["id"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        Ok(node.as_str().and_then(reference_value).into_iter().collect())
    }
}

/// uri/url → Reference.
pub struct UriReferenceExtractor;

impl SearchValueExtractor for UriReferenceExtractor {
    fn name(&self) -> &'static str {
        "UriReferenceExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["uri", "url"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        Ok(node.as_str().and_then(reference_value).into_iter().collect())
    }
}

/// canonical → Reference. A `|version` suffix is not part of the target
/// location and is cut before parsing.
pub struct CanonicalReferenceExtractor;

impl SearchValueExtractor for CanonicalReferenceExtractor {
    fn name(&self) -> &'static str {
        "CanonicalReferenceExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["canonical"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        Ok(node
            .as_str()
            .map(|raw| raw.split('|').next().unwrap_or(raw).trim())
            .filter(|raw| !raw.is_empty())
            .and_then(reference_value)
            .into_iter()
            .collect())
    }
}

/// CodeableReference → Reference from its `reference` side.
pub struct CodeableReferenceReferenceExtractor;

impl SearchValueExtractor for CodeableReferenceReferenceExtractor {
    fn name(&self) -> &'static str {
        "CodeableReferenceReferenceExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["CodeableReference"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        Ok(node
            .child("reference")
            .and_then(|r| child_str(r, "reference"))
            .and_then(reference_value)
            .into_iter()
            .collect())
    }
}
