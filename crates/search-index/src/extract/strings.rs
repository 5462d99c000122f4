//! Extractors for string-producing composite types.

use lumen_element::ElementNode;

use crate::error::ExtractionError;
use crate::value::SearchValue;

use super::{SearchValueExtractor, child_str, guard_source_type};

fn push_str(values: &mut Vec<SearchValue>, node: &ElementNode, name: &str) {
    if let Some(text) = child_str(node, name) {
        values.push(SearchValue::string(text));
    }
}

fn push_all(values: &mut Vec<SearchValue>, node: &ElementNode, name: &str) {
    for child in node.children(name) {
        if let Some(text) = child.as_str() {
            values.push(SearchValue::string(text));
        }
    }
}

/// Address → one String per populated part, in exactly this order:
/// city, country, district, line (each), postalCode, state, text.
pub struct AddressExtractor;

impl SearchValueExtractor for AddressExtractor {
    fn name(&self) -> &'static str {
        "AddressExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["Address"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        let mut values = Vec::new();
        push_str(&mut values, node, "city");
        push_str(&mut values, node, "country");
        push_str(&mut values, node, "district");
        push_all(&mut values, node, "line");
        push_str(&mut values, node, "postalCode");
        push_str(&mut values, node, "state");
        push_str(&mut values, node, "text");
        Ok(values)
    }
}

/// HumanName → one String per populated part, in exactly this order:
/// given (each), family, prefix (each), suffix (each), text.
pub struct HumanNameExtractor;

impl SearchValueExtractor for HumanNameExtractor {
    fn name(&self) -> &'static str {
        "HumanNameExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["HumanName"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        let mut values = Vec::new();
        push_all(&mut values, node, "given");
        push_str(&mut values, node, "family");
        push_all(&mut values, node, "prefix");
        push_all(&mut values, node, "suffix");
        push_str(&mut values, node, "text");
        Ok(values)
    }
}
