//! Extractors for token-producing composite types.

use lumen_element::ElementNode;

use crate::error::ExtractionError;
use crate::value::SearchValue;

use super::{SearchValueExtractor, child_str, guard_source_type};

/// The token a single Coding yields, or `None` when system, code, and
/// display are all empty.
fn coding_token(coding: &ElementNode) -> Option<SearchValue> {
    let system = child_str(coding, "system");
    let code = child_str(coding, "code");
    let display = child_str(coding, "display");
    if system.is_none() && code.is_none() && display.is_none() {
        return None;
    }
    Some(SearchValue::token(
        system.map(ToString::to_string),
        code.map(ToString::to_string),
        display.map(ToString::to_string),
    ))
}

/// One token per coding in document order, then a trailing text-only token
/// when the concept text adds something no coding display already says
/// (compared case-insensitively).
pub(crate) fn codeable_concept_tokens(concept: &ElementNode) -> Vec<SearchValue> {
    let mut values = Vec::new();
    let mut displays: Vec<&str> = Vec::new();

    for coding in concept.children("coding") {
        if let Some(token) = coding_token(coding) {
            if let Some(display) = child_str(coding, "display") {
                displays.push(display);
            }
            values.push(token);
        }
    }

    if let Some(text) = child_str(concept, "text") {
        if !displays.iter().any(|d| d.eq_ignore_ascii_case(text)) {
            values.push(SearchValue::token(None, None, Some(text.to_string())));
        }
    }

    values
}

/// Coding → Token.
pub struct CodingExtractor;

impl SearchValueExtractor for CodingExtractor {
    fn name(&self) -> &'static str {
        "CodingExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["Coding"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        Ok(coding_token(node).into_iter().collect())
    }
}

/// CodeableConcept → Tokens.
pub struct CodeableConceptExtractor;

impl SearchValueExtractor for CodeableConceptExtractor {
    fn name(&self) -> &'static str {
        "CodeableConceptExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["CodeableConcept"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        Ok(codeable_concept_tokens(node))
    }
}

/// Identifier → a plain token plus one identifier-of-type value per fully
/// coded type.coding entry. The two emissions are independent.
pub struct IdentifierExtractor;

impl SearchValueExtractor for IdentifierExtractor {
    fn name(&self) -> &'static str {
        "IdentifierExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["Identifier"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        let Some(value) = child_str(node, "value") else {
            return Ok(Vec::new());
        };

        let mut values = Vec::new();
        let system = child_str(node, "system").map(ToString::to_string);
        let type_text = node
            .child("type")
            .and_then(|t| child_str(t, "text"))
            .map(ToString::to_string);
        values.push(SearchValue::token(
            system,
            Some(value.to_string()),
            type_text,
        ));

        if let Some(id_type) = node.child("type") {
            for coding in id_type.children("coding") {
                if let (Some(type_system), Some(type_code)) =
                    (child_str(coding, "system"), child_str(coding, "code"))
                {
                    values.push(SearchValue::identifier_of_type(type_system, type_code, value));
                }
            }
        }

        Ok(values)
    }
}

/// ContactPoint → Token keyed by use.
pub struct ContactPointExtractor;

impl SearchValueExtractor for ContactPointExtractor {
    fn name(&self) -> &'static str {
        "ContactPointExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["ContactPoint"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        let Some(value) = child_str(node, "value") else {
            return Ok(Vec::new());
        };
        let contact_use = child_str(node, "use").map(ToString::to_string);
        Ok(vec![SearchValue::token(
            contact_use,
            Some(value.to_string()),
            None,
        )])
    }
}

/// CodeableReference → Tokens from its `concept` side.
pub struct CodeableReferenceTokenExtractor;

impl SearchValueExtractor for CodeableReferenceTokenExtractor {
    fn name(&self) -> &'static str {
        "CodeableReferenceTokenExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["CodeableReference"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        Ok(node
            .child("concept")
            .map(codeable_concept_tokens)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coding(system: Option<&str>, code: Option<&str>, display: Option<&str>) -> ElementNode {
        let mut node = ElementNode::composite("Coding");
        if let Some(system) = system {
            node = node.with_child("system", ElementNode::primitive("uri", system));
        }
        if let Some(code) = code {
            node = node.with_child("code", ElementNode::primitive("code", code));
        }
        if let Some(display) = display {
            node = node.with_child("display", ElementNode::primitive("string", display));
        }
        node
    }

    fn concept(codings: Vec<ElementNode>, text: Option<&str>) -> ElementNode {
        let mut node = ElementNode::composite("CodeableConcept");
        for c in codings {
            node = node.with_child("coding", c);
        }
        if let Some(text) = text {
            node = node.with_child("text", ElementNode::primitive("string", text));
        }
        node
    }

    #[test]
    fn test_coding_token() {
        let values = CodingExtractor
            .extract(&coding(Some("http://loinc.org"), Some("8867-4"), Some("Heart rate")))
            .unwrap();
        assert_eq!(
            values,
            vec![SearchValue::token(
                Some("http://loinc.org".to_string()),
                Some("8867-4".to_string()),
                Some("Heart rate".to_string())
            )]
        );
    }

    #[test]
    fn test_all_empty_coding_yields_nothing() {
        let values = CodingExtractor
            .extract(&coding(None, None, None))
            .unwrap();
        assert!(values.is_empty());

        let values = CodingExtractor
            .extract(&coding(Some("  "), Some(""), None))
            .unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_concept_text_matching_a_display_is_suppressed() {
        let node = concept(
            vec![
                coding(Some("s1"), Some("c1"), Some("blue")),
                coding(Some("s2"), Some("c2"), Some("blue")),
            ],
            Some("blue"),
        );
        let values = CodeableConceptExtractor.extract(&node).unwrap();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_concept_text_differing_from_displays_is_emitted_last() {
        let node = concept(
            vec![
                coding(Some("s1"), Some("c1"), Some("blue")),
                coding(Some("s2"), Some("c2"), Some("blue")),
            ],
            Some("Blue Eyes"),
        );
        let values = CodeableConceptExtractor.extract(&node).unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(
            values[2],
            SearchValue::token(None, None, Some("Blue Eyes".to_string()))
        );
    }

    #[test]
    fn test_concept_text_comparison_is_case_insensitive() {
        let node = concept(
            vec![coding(Some("s1"), Some("c1"), Some("Heart Rate"))],
            Some("heart rate"),
        );
        let values = CodeableConceptExtractor.extract(&node).unwrap();
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_concept_skips_empty_codings_keeps_order() {
        let node = concept(
            vec![
                coding(None, None, None),
                coding(Some("s2"), Some("c2"), None),
            ],
            Some("words"),
        );
        let values = CodeableConceptExtractor.extract(&node).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(
            values[0],
            SearchValue::token(Some("s2".to_string()), Some("c2".to_string()), None)
        );
    }

    #[test]
    fn test_text_only_concept() {
        let node = concept(vec![], Some("free text"));
        let values = CodeableConceptExtractor.extract(&node).unwrap();
        assert_eq!(
            values,
            vec![SearchValue::token(None, None, Some("free text".to_string()))]
        );
    }

    fn identifier_with_type() -> ElementNode {
        ElementNode::composite("Identifier")
            .with_child("system", ElementNode::primitive("uri", "sys"))
            .with_child("value", ElementNode::primitive("string", "123"))
            .with_child(
                "type",
                concept(vec![coding(Some("ts"), Some("tc"), None)], Some("MR")),
            )
    }

    #[test]
    fn test_identifier_emits_plain_and_typed_tokens() {
        let values = IdentifierExtractor.extract(&identifier_with_type()).unwrap();
        assert_eq!(
            values,
            vec![
                SearchValue::token(
                    Some("sys".to_string()),
                    Some("123".to_string()),
                    Some("MR".to_string())
                ),
                SearchValue::identifier_of_type("ts", "tc", "123"),
            ]
        );
    }

    #[test]
    fn test_identifier_without_value_yields_nothing() {
        let node = ElementNode::composite("Identifier")
            .with_child("system", ElementNode::primitive("uri", "sys"))
            .with_child(
                "type",
                concept(vec![coding(Some("ts"), Some("tc"), None)], None),
            );
        assert!(IdentifierExtractor.extract(&node).unwrap().is_empty());
    }

    #[test]
    fn test_identifier_type_coding_requires_system_and_code() {
        let node = ElementNode::composite("Identifier")
            .with_child("value", ElementNode::primitive("string", "123"))
            .with_child(
                "type",
                concept(vec![coding(None, Some("tc"), None)], None),
            );
        let values = IdentifierExtractor.extract(&node).unwrap();
        // Plain token only; the half-coded type entry is skipped.
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_contact_point() {
        let node = ElementNode::composite("ContactPoint")
            .with_child("use", ElementNode::primitive("code", "home"))
            .with_child("value", ElementNode::primitive("string", "555-1234"));
        let values = ContactPointExtractor.extract(&node).unwrap();
        assert_eq!(
            values,
            vec![SearchValue::token(
                Some("home".to_string()),
                Some("555-1234".to_string()),
                None
            )]
        );

        let node = ElementNode::composite("ContactPoint")
            .with_child("use", ElementNode::primitive("code", "home"));
        assert!(ContactPointExtractor.extract(&node).unwrap().is_empty());
    }

    #[test]
    fn test_codeable_reference_concept_side() {
        let node = ElementNode::composite("CodeableReference").with_child(
            "concept",
            concept(vec![coding(Some("s"), Some("c"), None)], None),
        );
        let values = CodeableReferenceTokenExtractor.extract(&node).unwrap();
        assert_eq!(values.len(), 1);

        let node = ElementNode::composite("CodeableReference");
        assert!(CodeableReferenceTokenExtractor.extract(&node).unwrap().is_empty());
    }
}
