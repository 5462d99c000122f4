//! Range extractors.
//!
//! A Range can feed either a number or a quantity search parameter; the
//! search-parameter compiler disambiguates by asking the registry for the
//! kind it wants, so two independent extractors share the source type.

use lumen_element::ElementNode;
use rust_decimal::Decimal;

use crate::error::ExtractionError;
use crate::value::SearchValue;

use super::{SearchValueExtractor, child_decimal, child_str, guard_source_type};

fn bound(node: &ElementNode, name: &str) -> Option<Decimal> {
    node.child(name).and_then(|q| child_decimal(q, "value"))
}

/// Range → Number range.
pub struct RangeNumberExtractor;

impl SearchValueExtractor for RangeNumberExtractor {
    fn name(&self) -> &'static str {
        "RangeNumberExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["Range"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        let low = bound(node, "low");
        let high = bound(node, "high");
        if low.is_none() && high.is_none() {
            return Ok(Vec::new());
        }
        Ok(vec![SearchValue::number_range(low, high)])
    }
}

/// Range → Quantity range.
///
/// The low and high sub-quantities are required by the FHIR spec to share
/// unit/system/code; that is trusted, not re-validated, and the
/// representative system/code is taken from whichever bound is present,
/// preferring low.
pub struct RangeQuantityExtractor;

impl SearchValueExtractor for RangeQuantityExtractor {
    fn name(&self) -> &'static str {
        "RangeQuantityExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["Range"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        let low = bound(node, "low");
        let high = bound(node, "high");
        if low.is_none() && high.is_none() {
            return Ok(Vec::new());
        }

        let representative = if low.is_some() {
            node.child("low")
        } else {
            node.child("high")
        };
        let system = representative
            .and_then(|q| child_str(q, "system"))
            .map(ToString::to_string);
        let code = representative
            .and_then(|q| child_str(q, "code"))
            .map(ToString::to_string);

        Ok(vec![SearchValue::quantity_range(system, code, low, high)])
    }
}
