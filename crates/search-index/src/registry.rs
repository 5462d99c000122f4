//! Extractor registry.
//!
//! Two orthogonal lookup tables, both built once at startup from an explicit
//! registration list and read-only thereafter:
//!
//! 1. runtime type name → extractor, for generic-node extraction while
//!    walking a tree;
//! 2. (declared type name, desired kind) → extractor, for compiler-driven
//!    extraction where the desired output kind disambiguates a multi-kind
//!    source type (Range feeding a number vs a quantity parameter).
//!
//! When two registrations claim the same slot, the first in the list wins;
//! the list order below is therefore part of the contract. A lookup miss is
//! an ordinary `None` — the search-parameter compiler decides whether an
//! unmapped type is a configuration bug or an expected gap.

use std::collections::HashMap;
use std::sync::Arc;

use crate::code_systems::CodeSystemResolver;
use crate::extract::SearchValueExtractor;
use crate::extract::datetime::{DateTimeExtractor, PeriodExtractor, TimingExtractor};
use crate::extract::extension::{
    ExtensionExtractor, ExtensionValueExtractor, TypeKindTable, TypeTable,
};
use crate::extract::primitive::{
    BooleanTokenExtractor, CanonicalUriExtractor, CodeTokenExtractor, DecimalNumberExtractor,
    IdTokenExtractor, IntegerNumberExtractor, StringExtractor, UriExtractor,
};
use crate::extract::quantity::{MoneyExtractor, QuantityExtractor};
use crate::extract::range::{RangeNumberExtractor, RangeQuantityExtractor};
use crate::extract::reference::{
    CanonicalReferenceExtractor, CodeableReferenceReferenceExtractor, IdReferenceExtractor,
    ReferenceExtractor, UriReferenceExtractor,
};
use crate::extract::strings::{AddressExtractor, HumanNameExtractor};
use crate::extract::token::{
    CodeableConceptExtractor, CodeableReferenceTokenExtractor, CodingExtractor,
    ContactPointExtractor, IdentifierExtractor,
};
use crate::value::SearchValueKind;

/// Immutable lookup structure mapping source types to extractors.
///
/// Building is cheap and happens once during process composition; afterwards
/// the registry is freely shareable across request threads — nothing in it
/// mutates and lookups do no I/O.
pub struct ExtractorRegistry {
    by_type: TypeTable,
    by_type_and_kind: TypeKindTable,
}

impl ExtractorRegistry {
    /// Builds the registry with the bundled code-system table.
    pub fn new() -> Self {
        Self::with_resolver(Arc::new(CodeSystemResolver::new()))
    }

    /// Builds the registry with a custom code-system resolver.
    pub fn with_resolver(resolver: Arc<CodeSystemResolver>) -> Self {
        // The registration list. Order is the tie-break everywhere: when a
        // source type serves several kinds, the entry listed first is what
        // generic tree-walking dispatch sees (uri indexes as a URI, id as a
        // token, Range as a quantity, CodeableReference by its concept).
        let registrations: Vec<(SearchValueKind, Arc<dyn SearchValueExtractor>)> = vec![
            (SearchValueKind::String, Arc::new(StringExtractor)),
            (SearchValueKind::Token, Arc::new(IdTokenExtractor)),
            (SearchValueKind::Token, Arc::new(BooleanTokenExtractor)),
            (
                SearchValueKind::Token,
                Arc::new(CodeTokenExtractor::new(resolver)),
            ),
            (SearchValueKind::Number, Arc::new(DecimalNumberExtractor)),
            (SearchValueKind::Number, Arc::new(IntegerNumberExtractor)),
            (SearchValueKind::Uri, Arc::new(UriExtractor)),
            (SearchValueKind::Uri, Arc::new(CanonicalUriExtractor)),
            (SearchValueKind::Date, Arc::new(DateTimeExtractor)),
            (SearchValueKind::Date, Arc::new(PeriodExtractor)),
            (SearchValueKind::Date, Arc::new(TimingExtractor)),
            (SearchValueKind::Quantity, Arc::new(QuantityExtractor)),
            (SearchValueKind::Quantity, Arc::new(MoneyExtractor)),
            (SearchValueKind::Quantity, Arc::new(RangeQuantityExtractor)),
            (SearchValueKind::Number, Arc::new(RangeNumberExtractor)),
            (SearchValueKind::Token, Arc::new(CodingExtractor)),
            (SearchValueKind::Token, Arc::new(CodeableConceptExtractor)),
            (SearchValueKind::Token, Arc::new(IdentifierExtractor)),
            (SearchValueKind::Token, Arc::new(ContactPointExtractor)),
            (SearchValueKind::String, Arc::new(AddressExtractor)),
            (SearchValueKind::String, Arc::new(HumanNameExtractor)),
            (SearchValueKind::Reference, Arc::new(ReferenceExtractor)),
            (
                SearchValueKind::Token,
                Arc::new(CodeableReferenceTokenExtractor),
            ),
            (
                SearchValueKind::Reference,
                Arc::new(CodeableReferenceReferenceExtractor),
            ),
            (SearchValueKind::Reference, Arc::new(IdReferenceExtractor)),
            (SearchValueKind::Reference, Arc::new(UriReferenceExtractor)),
            (
                SearchValueKind::Reference,
                Arc::new(CanonicalReferenceExtractor),
            ),
        ];

        let mut by_type: TypeTable = HashMap::new();
        let mut by_type_and_kind: TypeKindTable = HashMap::new();
        for (kind, extractor) in &registrations {
            for source_type in extractor.source_types().iter().copied() {
                by_type
                    .entry(source_type)
                    .or_insert_with(|| Arc::clone(extractor));
                by_type_and_kind
                    .entry(source_type)
                    .or_default()
                    .entry(*kind)
                    .or_insert_with(|| Arc::clone(extractor));
            }
        }

        // Extension indirection re-dispatches through the frozen base tables,
        // so extensions never chain into other extensions.
        let base_by_type = Arc::new(by_type.clone());
        let base_by_type_and_kind = Arc::new(by_type_and_kind.clone());

        by_type.insert(
            "Extension",
            Arc::new(ExtensionValueExtractor::new(Arc::clone(&base_by_type))),
        );
        let mut kinds_seen: Vec<SearchValueKind> = Vec::new();
        for (kind, _) in &registrations {
            if !kinds_seen.contains(kind) {
                kinds_seen.push(*kind);
            }
        }
        let extension_slot = by_type_and_kind.entry("Extension").or_default();
        for kind in kinds_seen {
            extension_slot.insert(
                kind,
                Arc::new(ExtensionExtractor::new(
                    kind,
                    Arc::clone(&base_by_type_and_kind),
                )),
            );
        }

        tracing::debug!(
            extractors = registrations.len(),
            source_types = by_type.len(),
            "search extractor registry built"
        );

        Self {
            by_type,
            by_type_and_kind,
        }
    }

    /// The extractor for a runtime type name, for generic-node extraction.
    pub fn extractor_for(&self, type_name: &str) -> Option<&Arc<dyn SearchValueExtractor>> {
        self.by_type.get(type_name)
    }

    /// The extractor for a declared type name and desired output kind.
    pub fn extractor_for_kind(
        &self,
        type_name: &str,
        kind: SearchValueKind,
    ) -> Option<&Arc<dyn SearchValueExtractor>> {
        self.by_type_and_kind.get(type_name)?.get(&kind)
    }

    /// Number of source types with at least one extractor.
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    /// Returns true if no extractors are registered.
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_element::ElementNode;

    use crate::value::SearchValue;

    fn registry() -> ExtractorRegistry {
        ExtractorRegistry::new()
    }

    #[test]
    fn test_lookup_by_type() {
        let registry = registry();
        assert_eq!(
            registry.extractor_for("string").unwrap().name(),
            "StringExtractor"
        );
        assert_eq!(
            registry.extractor_for("CodeableConcept").unwrap().name(),
            "CodeableConceptExtractor"
        );
        assert!(registry.extractor_for("Signature").is_none());
    }

    #[test]
    fn test_registration_order_decides_generic_dispatch() {
        let registry = registry();
        // Multi-kind source types resolve to the first registration.
        assert_eq!(registry.extractor_for("uri").unwrap().name(), "UriExtractor");
        assert_eq!(registry.extractor_for("id").unwrap().name(), "IdTokenExtractor");
        assert_eq!(
            registry.extractor_for("Range").unwrap().name(),
            "RangeQuantityExtractor"
        );
        assert_eq!(
            registry.extractor_for("CodeableReference").unwrap().name(),
            "CodeableReferenceTokenExtractor"
        );
    }

    #[test]
    fn test_kind_disambiguates_multi_kind_sources() {
        let registry = registry();
        assert_eq!(
            registry
                .extractor_for_kind("Range", SearchValueKind::Number)
                .unwrap()
                .name(),
            "RangeNumberExtractor"
        );
        assert_eq!(
            registry
                .extractor_for_kind("Range", SearchValueKind::Quantity)
                .unwrap()
                .name(),
            "RangeQuantityExtractor"
        );
        assert_eq!(
            registry
                .extractor_for_kind("uri", SearchValueKind::Reference)
                .unwrap()
                .name(),
            "UriReferenceExtractor"
        );
        assert_eq!(
            registry
                .extractor_for_kind("canonical", SearchValueKind::Uri)
                .unwrap()
                .name(),
            "CanonicalUriExtractor"
        );
        // A kind the type cannot produce is a miss, not an error.
        assert!(
            registry
                .extractor_for_kind("HumanName", SearchValueKind::Quantity)
                .is_none()
        );
        assert!(
            registry
                .extractor_for_kind("Signature", SearchValueKind::Token)
                .is_none()
        );
    }

    fn extension(value: ElementNode) -> ElementNode {
        ElementNode::composite("Extension")
            .with_child(
                "url",
                ElementNode::primitive("uri", "http://example.org/ext"),
            )
            .with_child("value", value)
    }

    #[test]
    fn test_extension_redispatches_by_value_type() {
        let registry = registry();
        let node = extension(ElementNode::primitive("boolean", true));
        let values = registry
            .extractor_for_kind("Extension", SearchValueKind::Token)
            .unwrap()
            .extract(&node)
            .unwrap();
        assert_eq!(values.len(), 1);
        assert!(matches!(values[0], SearchValue::Token { .. }));

        let values = registry
            .extractor_for("Extension")
            .unwrap()
            .extract(&node)
            .unwrap();
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_extension_kind_mismatch_emits_nothing() {
        let registry = registry();
        let node = extension(ElementNode::primitive("string", "hello"));
        let values = registry
            .extractor_for_kind("Extension", SearchValueKind::Date)
            .unwrap()
            .extract(&node)
            .unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_extension_without_value_emits_nothing() {
        let registry = registry();
        let node = ElementNode::composite("Extension").with_child(
            "url",
            ElementNode::primitive("uri", "http://example.org/ext"),
        );
        let values = registry
            .extractor_for("Extension")
            .unwrap()
            .extract(&node)
            .unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>(_: &T) {}
        assert_send_sync(&registry());
    }
}
