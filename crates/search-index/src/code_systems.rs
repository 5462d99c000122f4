//! Implicit coding systems for untyped `code` elements.
//!
//! FHIR `code` primitives carry no system of their own; the system is implied
//! by where the element sits in the resource ("Patient.gender" is always
//! administrative-gender). The resolver maps an element's structural location
//! to that implied system. A miss is not an error — the token is simply
//! indexed without a system.

use std::collections::HashMap;

/// System used for boolean token values.
pub const SPECIAL_VALUES_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/special-values";

/// Fixed coding system for Money currency codes.
pub const CURRENCY_SYSTEM: &str = "urn:iso:std:iso:4217";

/// Spec-bound `code` element locations and their implied systems. Only
/// consulted when the element has no explicit system and a non-empty code.
const BUILTIN_SYSTEMS: &[(&str, &str)] = &[
    ("Patient.gender", "http://hl7.org/fhir/administrative-gender"),
    ("Patient.contact.gender", "http://hl7.org/fhir/administrative-gender"),
    ("Person.gender", "http://hl7.org/fhir/administrative-gender"),
    ("Practitioner.gender", "http://hl7.org/fhir/administrative-gender"),
    ("RelatedPerson.gender", "http://hl7.org/fhir/administrative-gender"),
    ("Observation.status", "http://hl7.org/fhir/observation-status"),
    ("Encounter.status", "http://hl7.org/fhir/encounter-status"),
    ("Condition.severity", "http://hl7.org/fhir/condition-severity"),
    ("AllergyIntolerance.type", "http://hl7.org/fhir/allergy-intolerance-type"),
    ("AllergyIntolerance.category", "http://hl7.org/fhir/allergy-intolerance-category"),
    ("AllergyIntolerance.criticality", "http://hl7.org/fhir/allergy-intolerance-criticality"),
    ("MedicationRequest.status", "http://hl7.org/fhir/CodeSystem/medicationrequest-status"),
    ("MedicationRequest.intent", "http://hl7.org/fhir/CodeSystem/medicationrequest-intent"),
    ("DiagnosticReport.status", "http://hl7.org/fhir/diagnostic-report-status"),
    ("DocumentReference.status", "http://hl7.org/fhir/document-reference-status"),
    ("CarePlan.status", "http://hl7.org/fhir/request-status"),
    ("CarePlan.intent", "http://hl7.org/fhir/request-intent"),
    ("ServiceRequest.status", "http://hl7.org/fhir/request-status"),
    ("ServiceRequest.intent", "http://hl7.org/fhir/request-intent"),
    ("Procedure.status", "http://hl7.org/fhir/event-status"),
    ("Attachment.contentType", "urn:ietf:bcp:13"),
    ("Attachment.language", "urn:ietf:bcp:47"),
];

/// Resolves an element location to its implied coding system.
///
/// Built once, read-only thereafter; lookups are pure in-memory hash lookups
/// with no I/O.
#[derive(Debug, Clone)]
pub struct CodeSystemResolver {
    systems: HashMap<String, String>,
}

impl CodeSystemResolver {
    /// Creates a resolver with the bundled location table.
    pub fn new() -> Self {
        Self {
            systems: BUILTIN_SYSTEMS
                .iter()
                .map(|(location, system)| (location.to_string(), system.to_string()))
                .collect(),
        }
    }

    /// Adds or overrides an entry, for deployment-specific code elements.
    pub fn with_entry(mut self, location: impl Into<String>, system: impl Into<String>) -> Self {
        self.systems.insert(location.into(), system.into());
        self
    }

    /// The implied coding system for the element at `location`, if any.
    pub fn resolve(&self, location: &str) -> Option<&str> {
        self.systems.get(location).map(String::as_str)
    }

    /// Number of known locations.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Returns true if the resolver has no entries.
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

impl Default for CodeSystemResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let resolver = CodeSystemResolver::new();
        assert_eq!(
            resolver.resolve("Patient.gender"),
            Some("http://hl7.org/fhir/administrative-gender")
        );
        assert_eq!(resolver.resolve("Patient.name"), None);
        assert_eq!(resolver.resolve(""), None);
    }

    #[test]
    fn test_with_entry_overrides() {
        let resolver = CodeSystemResolver::new()
            .with_entry("Basic.code", "http://example.org/custom")
            .with_entry("Patient.gender", "http://example.org/local-gender");
        assert_eq!(resolver.resolve("Basic.code"), Some("http://example.org/custom"));
        assert_eq!(resolver.resolve("Patient.gender"), Some("http://example.org/local-gender"));
    }
}
