//! Extension indirection.
//!
//! Extension wrapper nodes carry an arbitrary `value` child whose runtime
//! type is only known at extraction time. These extractors unwrap that child
//! and re-dispatch through the frozen base tables, which makes custom
//! elements searchable without any extension-specific wiring. When several
//! extractors could serve the value's type and kind, registration order
//! decided which one is in the table, so dispatch is deterministic.

use std::collections::HashMap;
use std::sync::Arc;

use lumen_element::ElementNode;

use crate::error::ExtractionError;
use crate::value::{SearchValue, SearchValueKind};

use super::SearchValueExtractor;

/// Base lookup table keyed by runtime type name.
pub(crate) type TypeTable = HashMap<&'static str, Arc<dyn SearchValueExtractor>>;

/// Base lookup table keyed by runtime type name, then desired kind.
pub(crate) type TypeKindTable =
    HashMap<&'static str, HashMap<SearchValueKind, Arc<dyn SearchValueExtractor>>>;

/// Typed-element trees normalize the `value[x]` choice element to a child
/// named `value` whose node carries the concrete runtime type.
fn extension_value(node: &ElementNode) -> Option<&ElementNode> {
    node.child("value")
}

/// Extension → values of one fixed kind, installed once per distinct kind
/// the base extractors produce.
pub struct ExtensionExtractor {
    kind: SearchValueKind,
    table: Arc<TypeKindTable>,
}

impl ExtensionExtractor {
    pub(crate) fn new(kind: SearchValueKind, table: Arc<TypeKindTable>) -> Self {
        Self { kind, table }
    }
}

impl SearchValueExtractor for ExtensionExtractor {
    fn name(&self) -> &'static str {
        "ExtensionExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["Extension"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        super::guard_source_type(self.name(), self.source_types(), node);
        let Some(value) = extension_value(node) else {
            return Ok(Vec::new());
        };
        match self
            .table
            .get(value.type_name())
            .and_then(|by_kind| by_kind.get(&self.kind))
        {
            Some(extractor) => extractor.extract(value),
            None => {
                tracing::trace!(
                    value_type = value.type_name(),
                    kind = %self.kind,
                    "no extractor for extension value"
                );
                Ok(Vec::new())
            }
        }
    }
}

/// Extension → whatever its value's runtime type yields, for generic
/// tree-walking dispatch where no target kind is known.
pub struct ExtensionValueExtractor {
    table: Arc<TypeTable>,
}

impl ExtensionValueExtractor {
    pub(crate) fn new(table: Arc<TypeTable>) -> Self {
        Self { table }
    }
}

impl SearchValueExtractor for ExtensionValueExtractor {
    fn name(&self) -> &'static str {
        "ExtensionValueExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["Extension"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        super::guard_source_type(self.name(), self.source_types(), node);
        let Some(value) = extension_value(node) else {
            return Ok(Vec::new());
        };
        match self.table.get(value.type_name()) {
            Some(extractor) => extractor.extract(value),
            None => {
                tracing::trace!(
                    value_type = value.type_name(),
                    "no extractor for extension value"
                );
                Ok(Vec::new())
            }
        }
    }
}
