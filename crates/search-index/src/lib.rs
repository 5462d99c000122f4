//! FHIR search-value extraction.
//!
//! This crate walks typed clinical element trees and deterministically
//! extracts normalized, typed search values ready for indexing:
//!
//! - [`value`] - the closed set of search-value variants and their kinds
//! - [`reference`] - raw reference string parsing
//! - [`code_systems`] - implicit coding systems for untyped `code` elements
//! - [`date`] - strict partial-precision date/time parsing
//! - [`extract`] - one extraction rule per source data shape
//! - [`registry`] - the immutable, dual-keyed extractor lookup tables
//! - [`error`] - extraction error types
//!
//! # Extraction lifecycle
//!
//! ```text
//! 1. Process composition
//!    └── ExtractorRegistry::new() builds both lookup tables once
//!
//! 2. Per resource, per search-parameter path (driven by the compiler)
//!    └── registry.extractor_for_kind(node_type, desired_kind)
//!    └── extractor.extract(node) → zero or more SearchValues
//!    └── values handed to the indexer
//!
//! 3. Generic tree walking (no target kind known)
//!    └── registry.extractor_for(node_type)
//! ```
//!
//! Extraction is total and defensive: absent or empty data yields nothing
//! rather than failing, unresolvable references yield nothing, and only a
//! malformed date/time string surfaces an error. Handing a node of the wrong
//! runtime type to a type-specific extractor is a wiring bug and panics.
//!
//! # Example
//!
//! ```
//! use lumen_element::ElementNode;
//! use lumen_search_index::{ExtractorRegistry, SearchValue, SearchValueKind};
//!
//! let registry = ExtractorRegistry::new();
//!
//! let name = ElementNode::composite("HumanName")
//!     .with_child("given", ElementNode::primitive("string", "John"))
//!     .with_child("family", ElementNode::primitive("string", "Smith"));
//!
//! let extractor = registry
//!     .extractor_for_kind("HumanName", SearchValueKind::String)
//!     .expect("HumanName feeds string parameters");
//! let values = extractor.extract(&name).unwrap();
//! assert_eq!(values.len(), 2);
//! assert_eq!(values[0], SearchValue::string("John"));
//! ```

pub mod code_systems;
pub mod date;
pub mod error;
pub mod extract;
pub mod reference;
pub mod registry;
pub mod value;

// Re-export main types
pub use code_systems::{CURRENCY_SYSTEM, CodeSystemResolver, SPECIAL_VALUES_SYSTEM};
pub use date::{DatePrecision, InvalidDateError, PartialDateTime};
pub use error::ExtractionError;
pub use extract::SearchValueExtractor;
pub use reference::{ParsedReference, parse_reference};
pub use registry::ExtractorRegistry;
pub use value::{SearchValue, SearchValueKind};
