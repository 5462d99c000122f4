//! Extractors for primitive element types.

use std::sync::Arc;

use lumen_element::ElementNode;

use crate::code_systems::{CodeSystemResolver, SPECIAL_VALUES_SYSTEM};
use crate::error::ExtractionError;
use crate::value::SearchValue;

use super::{SearchValueExtractor, guard_source_type};

/// string/markdown → String.
pub struct StringExtractor;

impl SearchValueExtractor for StringExtractor {
    fn name(&self) -> &'static str {
        "StringExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["string", "markdown"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        Ok(node
            .as_str()
            .map(SearchValue::string)
            .into_iter()
            .collect())
    }
}

/// boolean → Token("true"/"false" in the special-values system).
pub struct BooleanTokenExtractor;

impl SearchValueExtractor for BooleanTokenExtractor {
    fn name(&self) -> &'static str {
        "BooleanTokenExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["boolean"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        Ok(node
            .as_bool()
            .map(|b| {
                SearchValue::token(
                    Some(SPECIAL_VALUES_SYSTEM.to_string()),
                    Some(if b { "true" } else { "false" }.to_string()),
                    None,
                )
            })
            .into_iter()
            .collect())
    }
}

/// code → Token, with the implicit system looked up by element location when
/// the code carries none of its own.
pub struct CodeTokenExtractor {
    resolver: Arc<CodeSystemResolver>,
}

impl CodeTokenExtractor {
    /// Creates the extractor with the given resolver.
    pub fn new(resolver: Arc<CodeSystemResolver>) -> Self {
        Self { resolver }
    }
}

impl SearchValueExtractor for CodeTokenExtractor {
    fn name(&self) -> &'static str {
        "CodeTokenExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["code"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        let Some(code) = node.as_str() else {
            return Ok(Vec::new());
        };
        let system = self
            .resolver
            .resolve(node.location())
            .map(ToString::to_string);
        Ok(vec![SearchValue::token(
            system,
            Some(code.to_string()),
            None,
        )])
    }
}

/// id → Token(no system).
pub struct IdTokenExtractor;

impl SearchValueExtractor for IdTokenExtractor {
    fn name(&self) -> &'static str {
        "IdTokenExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["id"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        Ok(node
            .as_str()
            .map(|id| SearchValue::token(None, Some(id.to_string()), None))
            .into_iter()
            .collect())
    }
}

/// decimal → Number (point value).
pub struct DecimalNumberExtractor;

impl SearchValueExtractor for DecimalNumberExtractor {
    fn name(&self) -> &'static str {
        "DecimalNumberExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["decimal"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        Ok(node
            .as_decimal()
            .map(SearchValue::number)
            .into_iter()
            .collect())
    }
}

/// integer/positiveInt/unsignedInt → Number (point value).
pub struct IntegerNumberExtractor;

impl SearchValueExtractor for IntegerNumberExtractor {
    fn name(&self) -> &'static str {
        "IntegerNumberExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["integer", "positiveInt", "unsignedInt"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        Ok(node
            .as_decimal()
            .map(SearchValue::number)
            .into_iter()
            .collect())
    }
}

/// uri/url/oid → URI.
pub struct UriExtractor;

impl SearchValueExtractor for UriExtractor {
    fn name(&self) -> &'static str {
        "UriExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["uri", "url", "oid"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        Ok(node.as_str().map(SearchValue::uri).into_iter().collect())
    }
}

/// canonical → URI flagged as a reference candidate, so downstream indexing
/// can treat it as a resolvable target.
pub struct CanonicalUriExtractor;

impl SearchValueExtractor for CanonicalUriExtractor {
    fn name(&self) -> &'static str {
        "CanonicalUriExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["canonical"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        Ok(node
            .as_str()
            .map(SearchValue::uri_reference_candidate)
            .into_iter()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SearchValueKind;

    #[test]
    fn test_string_extractor() {
        let values = StringExtractor
            .extract(&ElementNode::primitive("string", "Smith"))
            .unwrap();
        assert_eq!(values, vec![SearchValue::string("Smith")]);

        let values = StringExtractor
            .extract(&ElementNode::primitive("markdown", "# heading"))
            .unwrap();
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_string_extractor_skips_empty() {
        let values = StringExtractor
            .extract(&ElementNode::primitive("string", "   "))
            .unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_boolean_token() {
        let values = BooleanTokenExtractor
            .extract(&ElementNode::primitive("boolean", true))
            .unwrap();
        assert_eq!(
            values,
            vec![SearchValue::token(
                Some(SPECIAL_VALUES_SYSTEM.to_string()),
                Some("true".to_string()),
                None
            )]
        );

        let values = BooleanTokenExtractor
            .extract(&ElementNode::primitive("boolean", false))
            .unwrap();
        assert_eq!(values[0], SearchValue::token(
            Some(SPECIAL_VALUES_SYSTEM.to_string()),
            Some("false".to_string()),
            None
        ));
    }

    #[test]
    fn test_code_token_resolves_implicit_system() {
        let extractor = CodeTokenExtractor::new(Arc::new(CodeSystemResolver::new()));

        let node = ElementNode::primitive("code", "female").with_location("Patient.gender");
        let values = extractor.extract(&node).unwrap();
        assert_eq!(
            values,
            vec![SearchValue::token(
                Some("http://hl7.org/fhir/administrative-gender".to_string()),
                Some("female".to_string()),
                None
            )]
        );
    }

    #[test]
    fn test_code_token_without_known_location() {
        let extractor = CodeTokenExtractor::new(Arc::new(CodeSystemResolver::new()));

        let node = ElementNode::primitive("code", "xyz").with_location("Basic.code");
        let values = extractor.extract(&node).unwrap();
        assert_eq!(
            values,
            vec![SearchValue::token(None, Some("xyz".to_string()), None)]
        );

        // Empty code: nothing at all, even though the location is known.
        let node = ElementNode::primitive("code", "").with_location("Patient.gender");
        assert!(extractor.extract(&node).unwrap().is_empty());
    }

    #[test]
    fn test_integer_and_decimal_numbers() {
        use rust_decimal::Decimal;

        let values = IntegerNumberExtractor
            .extract(&ElementNode::primitive("positiveInt", 3))
            .unwrap();
        assert_eq!(values, vec![SearchValue::number(Decimal::from(3))]);

        let values = DecimalNumberExtractor
            .extract(&ElementNode::primitive("decimal", Decimal::new(25, 1)))
            .unwrap();
        assert_eq!(values, vec![SearchValue::number(Decimal::new(25, 1))]);
    }

    #[test]
    fn test_uri_and_canonical() {
        let values = UriExtractor
            .extract(&ElementNode::primitive("uri", "http://example.org/x"))
            .unwrap();
        assert_eq!(values[0].kind(), SearchValueKind::Uri);
        assert_eq!(values[0], SearchValue::uri("http://example.org/x"));

        let values = CanonicalUriExtractor
            .extract(&ElementNode::primitive(
                "canonical",
                "http://example.org/StructureDefinition/x",
            ))
            .unwrap();
        if let SearchValue::Uri {
            reference_candidate,
            ..
        } = &values[0]
        {
            assert!(reference_candidate);
        } else {
            panic!("expected Uri variant");
        }
    }

    #[test]
    fn test_null_scalar_yields_nothing() {
        // A primitive-typed node with no scalar at all (e.g., an element that
        // carried only an extension) extracts to an empty sequence.
        let node = ElementNode::composite("string");
        assert!(StringExtractor.extract(&node).unwrap().is_empty());

        let node = ElementNode::composite("boolean");
        assert!(BooleanTokenExtractor.extract(&node).unwrap().is_empty());

        let node = ElementNode::composite("decimal");
        assert!(DecimalNumberExtractor.extract(&node).unwrap().is_empty());
    }
}
