//! Typed search values.
//!
//! Every extractor produces values from this one closed set, so the
//! downstream indexer can handle them uniformly no matter which source
//! element shape they came from.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of search parameter a value feeds.
///
/// See: https://build.fhir.org/search.html#ptypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchValueKind {
    /// A simple string, like a name or description.
    String,
    /// A code from a code system, a boolean, or an identifier.
    Token,
    /// A date, dateTime, or period.
    Date,
    /// A number or number range.
    Number,
    /// A quantity, with a number and units.
    Quantity,
    /// A reference to another resource.
    Reference,
    /// A URI.
    Uri,
}

impl fmt::Display for SearchValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchValueKind::String => write!(f, "string"),
            SearchValueKind::Token => write!(f, "token"),
            SearchValueKind::Date => write!(f, "date"),
            SearchValueKind::Number => write!(f, "number"),
            SearchValueKind::Quantity => write!(f, "quantity"),
            SearchValueKind::Reference => write!(f, "reference"),
            SearchValueKind::Uri => write!(f, "uri"),
        }
    }
}

impl FromStr for SearchValueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" => Ok(SearchValueKind::String),
            "token" => Ok(SearchValueKind::Token),
            "date" => Ok(SearchValueKind::Date),
            "number" => Ok(SearchValueKind::Number),
            "quantity" => Ok(SearchValueKind::Quantity),
            "reference" => Ok(SearchValueKind::Reference),
            "uri" => Ok(SearchValueKind::Uri),
            _ => Err(format!("unknown search value kind: {}", s)),
        }
    }
}

/// A normalized, typed unit of indexable content.
///
/// Values are constructed by extractors, handed to the indexer, and never
/// retained here. Constructors do not re-validate "meaningful content" rules
/// (a Token must have at least one of system/code/text populated, a Number at
/// least one bound); extractor call sites guard those before constructing,
/// and the test suite verifies the call sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchValue {
    /// A string value.
    String {
        /// The text payload.
        value: String,
    },

    /// A coded value (code with optional system), a boolean, an identifier,
    /// or free text standing in for a code.
    Token {
        /// Code system URI (e.g., "http://loinc.org").
        system: Option<String>,
        /// Code value.
        code: Option<String>,
        /// Display or free text (Coding.display, CodeableConcept.text,
        /// Identifier.type.text).
        text: Option<String>,
    },

    /// An identifier value scoped to its identifier-type coding, for the
    /// :of-type composite slot. Kept distinct from [`SearchValue::Token`]
    /// because it feeds a different composite search-parameter slot.
    IdentifierOfType {
        /// System of the identifier-type coding.
        type_system: String,
        /// Code of the identifier-type coding.
        type_code: String,
        /// The identifier value itself.
        value: String,
    },

    /// A date/time range. A point in time has `start == end` at the
    /// precision the source carried; open-ended Periods use
    /// [`DateTime::<Utc>::MIN_UTC`] / [`MAX_UTC`](DateTime::<Utc>::MAX_UTC)
    /// sentinels.
    Date {
        /// Inclusive range start.
        start: DateTime<Utc>,
        /// Inclusive range end.
        end: DateTime<Utc>,
    },

    /// A number or number range. Point numbers have `low == high`.
    Number {
        /// Lower bound, if present.
        low: Option<Decimal>,
        /// Upper bound, if present.
        high: Option<Decimal>,
    },

    /// A quantity or quantity range.
    Quantity {
        /// Unit system URI (e.g., "http://unitsofmeasure.org").
        system: Option<String>,
        /// Unit code (e.g., "kg").
        code: Option<String>,
        /// Lower bound, if present.
        low: Option<Decimal>,
        /// Upper bound, if present.
        high: Option<Decimal>,
    },

    /// A URI value.
    Uri {
        /// The URI text.
        value: String,
        /// True when produced by a reference-aware extractor (canonical), so
        /// downstream indexing can treat the value as a resolvable target.
        reference_candidate: bool,
    },

    /// A resolved pointer to another resource. Produced exclusively via
    /// [`crate::reference::parse_reference`]; contained (`#...`) and `urn:`
    /// references never become one.
    Reference {
        /// Service base URL, for absolute references.
        base: Option<String>,
        /// Target resource type, when the reference carried one.
        resource_type: Option<String>,
        /// Target resource id.
        id: String,
        /// Version id, for versioned references.
        version: Option<String>,
    },
}

impl SearchValue {
    /// Creates a string search value.
    pub fn string(value: impl Into<String>) -> Self {
        SearchValue::String {
            value: value.into(),
        }
    }

    /// Creates a token search value.
    pub fn token(system: Option<String>, code: Option<String>, text: Option<String>) -> Self {
        SearchValue::Token { system, code, text }
    }

    /// Creates an identifier-of-type search value.
    pub fn identifier_of_type(
        type_system: impl Into<String>,
        type_code: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        SearchValue::IdentifierOfType {
            type_system: type_system.into(),
            type_code: type_code.into(),
            value: value.into(),
        }
    }

    /// Creates a date range search value.
    pub fn date_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        SearchValue::Date { start, end }
    }

    /// Creates a point number search value (`low == high`).
    pub fn number(value: Decimal) -> Self {
        SearchValue::Number {
            low: Some(value),
            high: Some(value),
        }
    }

    /// Creates a number range search value.
    pub fn number_range(low: Option<Decimal>, high: Option<Decimal>) -> Self {
        SearchValue::Number { low, high }
    }

    /// Creates a point quantity search value (`low == high`).
    pub fn quantity(system: Option<String>, code: Option<String>, value: Decimal) -> Self {
        SearchValue::Quantity {
            system,
            code,
            low: Some(value),
            high: Some(value),
        }
    }

    /// Creates a quantity range search value.
    pub fn quantity_range(
        system: Option<String>,
        code: Option<String>,
        low: Option<Decimal>,
        high: Option<Decimal>,
    ) -> Self {
        SearchValue::Quantity {
            system,
            code,
            low,
            high,
        }
    }

    /// Creates a URI search value.
    pub fn uri(value: impl Into<String>) -> Self {
        SearchValue::Uri {
            value: value.into(),
            reference_candidate: false,
        }
    }

    /// Creates a URI search value flagged as a reference candidate.
    pub fn uri_reference_candidate(value: impl Into<String>) -> Self {
        SearchValue::Uri {
            value: value.into(),
            reference_candidate: true,
        }
    }

    /// The search-parameter kind this value feeds.
    ///
    /// Identifier-of-type values feed token parameters; the distinct variant
    /// only routes them into a different composite slot downstream.
    pub fn kind(&self) -> SearchValueKind {
        match self {
            SearchValue::String { .. } => SearchValueKind::String,
            SearchValue::Token { .. } => SearchValueKind::Token,
            SearchValue::IdentifierOfType { .. } => SearchValueKind::Token,
            SearchValue::Date { .. } => SearchValueKind::Date,
            SearchValue::Number { .. } => SearchValueKind::Number,
            SearchValue::Quantity { .. } => SearchValueKind::Quantity,
            SearchValue::Uri { .. } => SearchValueKind::Uri,
            SearchValue::Reference { .. } => SearchValueKind::Reference,
        }
    }

    /// Returns the string payload if this is a String variant.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            SearchValue::String { value } => Some(value),
            _ => None,
        }
    }
}
