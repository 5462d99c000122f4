//! Extractors for Quantity-shaped element types.

use lumen_element::ElementNode;

use crate::code_systems::CURRENCY_SYSTEM;
use crate::error::ExtractionError;
use crate::value::SearchValue;

use super::{SearchValueExtractor, child_decimal, child_str, guard_source_type};

/// Quantity and its profiles → Quantity (point value).
pub struct QuantityExtractor;

impl SearchValueExtractor for QuantityExtractor {
    fn name(&self) -> &'static str {
        "QuantityExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["Quantity", "SimpleQuantity", "Age", "Duration", "Count", "Distance"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        let Some(value) = child_decimal(node, "value") else {
            return Ok(Vec::new());
        };
        let system = child_str(node, "system").map(ToString::to_string);
        let code = child_str(node, "code").map(ToString::to_string);
        Ok(vec![SearchValue::quantity(system, code, value)])
    }
}

/// Money → Quantity in the fixed ISO 4217 currency system.
pub struct MoneyExtractor;

impl SearchValueExtractor for MoneyExtractor {
    fn name(&self) -> &'static str {
        "MoneyExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["Money"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        let Some(value) = child_decimal(node, "value") else {
            return Ok(Vec::new());
        };
        let currency = child_str(node, "currency").map(ToString::to_string);
        Ok(vec![SearchValue::quantity(
            Some(CURRENCY_SYSTEM.to_string()),
            currency,
            value,
        )])
    }
}
