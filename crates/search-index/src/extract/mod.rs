//! Per-type search-value extractors.
//!
//! One extraction rule per source data shape, each a pure function from a
//! typed element node to a small, finite list of [`SearchValue`]s:
//!
//! - [`primitive`] - string, markdown, boolean, code, id, numbers, uris
//! - [`datetime`] - date, dateTime, instant, Period, Timing
//! - [`quantity`] - Quantity and its profiles, Money
//! - [`range`] - Range, feeding either number or quantity parameters
//! - [`token`] - Coding, CodeableConcept, Identifier, ContactPoint,
//!   CodeableReference (concept side)
//! - [`strings`] - Address, HumanName
//! - [`reference`] - Reference, id/uri/canonical as references,
//!   CodeableReference (reference side)
//! - [`extension`] - unwraps extension wrappers and re-dispatches
//!
//! Extractors never mutate the node, never emit placeholder entries, and
//! silently emit nothing for absent or empty data. Handing an extractor a
//! node of a runtime type it does not accept is a registry wiring bug and
//! panics.

pub mod datetime;
pub mod extension;
pub mod primitive;
pub mod quantity;
pub mod range;
pub mod reference;
pub mod strings;
pub mod token;

use lumen_element::ElementNode;
use rust_decimal::Decimal;

use crate::error::ExtractionError;
use crate::value::SearchValue;

/// A single extraction rule.
///
/// `extract` is pure and restartable: calling it twice on the same node
/// yields element-wise equal results. The returned list is always finite and
/// usually has at most a handful of entries.
pub trait SearchValueExtractor: Send + Sync {
    /// Name used in dispatch-bug panics and trace output.
    fn name(&self) -> &'static str;

    /// Runtime type names this extractor accepts.
    fn source_types(&self) -> &'static [&'static str];

    /// Extracts search values from `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node`'s runtime type is not one of [`source_types`](Self::source_types) —
    /// that is a registry wiring bug, not bad data.
    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError>;
}

/// Panics when a node of the wrong runtime type reaches an extractor.
pub(crate) fn guard_source_type(name: &str, accepted: &[&str], node: &ElementNode) {
    if !accepted.iter().any(|t| *t == node.type_name()) {
        panic!(
            "{} dispatched against a '{}' node; accepts {:?}",
            name,
            node.type_name(),
            accepted
        );
    }
}

/// Trimmed text of the named child, `None` when absent or empty.
pub(crate) fn child_str<'a>(node: &'a ElementNode, name: &str) -> Option<&'a str> {
    node.child(name).and_then(|c| c.as_str())
}

/// Decimal scalar of the named child, `None` when absent.
pub(crate) fn child_decimal(node: &ElementNode, name: &str) -> Option<Decimal> {
    node.child(name).and_then(|c| c.as_decimal())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "dispatched against")]
    fn test_guard_panics_on_wrong_type() {
        let node = ElementNode::primitive("Quantity", "x");
        guard_source_type("StringExtractor", &["string", "markdown"], &node);
    }

    #[test]
    fn test_guard_accepts_listed_types() {
        let node = ElementNode::primitive("markdown", "x");
        guard_source_type("StringExtractor", &["string", "markdown"], &node);
    }
}
