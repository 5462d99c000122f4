//! Extraction error types.
//!
//! Almost nothing here is an error: absent or empty data means an extractor
//! emits nothing, an unresolvable reference emits nothing, and a registry
//! miss is an ordinary `None`. The one data-quality problem that propagates
//! is a malformed date/time string, because the caller needs to know about it
//! (typically to reject the resource). Dispatching a node of the wrong
//! runtime type to an extractor is a wiring bug and panics instead.

use thiserror::Error;

use crate::date::InvalidDateError;

/// Error raised during search-value extraction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// A date, dateTime, instant, Period bound, or Timing event could not be
    /// parsed. Propagated uniformly from every date-consuming extractor.
    #[error(transparent)]
    InvalidDate(#[from] InvalidDateError),
}
