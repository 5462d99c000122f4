//! Extractors for date-bearing element types.

use chrono::{DateTime, Utc};
use lumen_element::ElementNode;

use crate::date::PartialDateTime;
use crate::error::ExtractionError;
use crate::value::SearchValue;

use super::{SearchValueExtractor, child_str, guard_source_type};

/// date/dateTime/instant → Date range spanning the implied precision.
pub struct DateTimeExtractor;

impl SearchValueExtractor for DateTimeExtractor {
    fn name(&self) -> &'static str {
        "DateTimeExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["date", "dateTime", "instant"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        let Some(raw) = node.as_str() else {
            return Ok(Vec::new());
        };
        let parsed = PartialDateTime::parse(raw)?;
        Ok(vec![SearchValue::date_range(parsed.start(), parsed.end())])
    }
}

/// Period → Date range; a missing bound leaves that side open.
pub struct PeriodExtractor;

impl SearchValueExtractor for PeriodExtractor {
    fn name(&self) -> &'static str {
        "PeriodExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["Period"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        Ok(vec![period_range(node)?])
    }
}

/// The open-ended range a Period covers. An all-empty Period is fully open
/// on both sides.
fn period_range(node: &ElementNode) -> Result<SearchValue, ExtractionError> {
    let start = match child_str(node, "start") {
        Some(raw) => PartialDateTime::parse(raw)?.start(),
        None => DateTime::<Utc>::MIN_UTC,
    };
    let end = match child_str(node, "end") {
        Some(raw) => PartialDateTime::parse(raw)?.end(),
        None => DateTime::<Utc>::MAX_UTC,
    };
    Ok(SearchValue::date_range(start, end))
}

/// Timing → one Date range per `event` in document order, then the
/// `repeat.boundsPeriod` if present.
pub struct TimingExtractor;

impl SearchValueExtractor for TimingExtractor {
    fn name(&self) -> &'static str {
        "TimingExtractor"
    }

    fn source_types(&self) -> &'static [&'static str] {
        &["Timing"]
    }

    fn extract(&self, node: &ElementNode) -> Result<Vec<SearchValue>, ExtractionError> {
        guard_source_type(self.name(), self.source_types(), node);
        let mut values = Vec::new();
        for event in node.children("event") {
            if let Some(raw) = event.as_str() {
                let parsed = PartialDateTime::parse(raw)?;
                values.push(SearchValue::date_range(parsed.start(), parsed.end()));
            }
        }
        if let Some(bounds) = node.child("repeat").and_then(|r| r.child("boundsPeriod")) {
            values.push(period_range(bounds)?);
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn period(start: Option<&str>, end: Option<&str>) -> ElementNode {
        let mut node = ElementNode::composite("Period");
        if let Some(start) = start {
            node = node.with_child("start", ElementNode::primitive("dateTime", start));
        }
        if let Some(end) = end {
            node = node.with_child("end", ElementNode::primitive("dateTime", end));
        }
        node
    }

    #[test]
    fn test_point_datetime_collapses_to_its_span() {
        let values = DateTimeExtractor
            .extract(&ElementNode::primitive("dateTime", "2020-03-04T10:00:00Z"))
            .unwrap();
        assert_eq!(
            values,
            vec![SearchValue::date_range(
                utc("2020-03-04T10:00:00Z"),
                utc("2020-03-04T10:00:00.999999999Z")
            )]
        );
    }

    #[test]
    fn test_year_only_date_spans_the_year() {
        let values = DateTimeExtractor
            .extract(&ElementNode::primitive("date", "1980"))
            .unwrap();
        assert_eq!(
            values,
            vec![SearchValue::date_range(
                utc("1980-01-01T00:00:00Z"),
                utc("1980-12-31T23:59:59.999999999Z")
            )]
        );
    }

    #[test]
    fn test_malformed_date_propagates() {
        let result = DateTimeExtractor.extract(&ElementNode::primitive("date", "80-01-01"));
        assert!(result.is_err());
    }

    #[test]
    fn test_period_missing_end_is_open_ended() {
        let values = PeriodExtractor
            .extract(&period(Some("2020-01-01"), None))
            .unwrap();
        assert_eq!(
            values,
            vec![SearchValue::date_range(
                utc("2020-01-01T00:00:00Z"),
                DateTime::<Utc>::MAX_UTC
            )]
        );
    }

    #[test]
    fn test_empty_period_is_fully_open() {
        let values = PeriodExtractor.extract(&period(None, None)).unwrap();
        assert_eq!(
            values,
            vec![SearchValue::date_range(
                DateTime::<Utc>::MIN_UTC,
                DateTime::<Utc>::MAX_UTC
            )]
        );
    }

    #[test]
    fn test_period_end_covers_its_whole_day() {
        let values = PeriodExtractor
            .extract(&period(Some("2020-01-01"), Some("2020-01-31")))
            .unwrap();
        assert_eq!(
            values,
            vec![SearchValue::date_range(
                utc("2020-01-01T00:00:00Z"),
                utc("2020-01-31T23:59:59.999999999Z")
            )]
        );
    }

    #[test]
    fn test_timing_events_then_bounds() {
        let timing = ElementNode::composite("Timing")
            .with_child("event", ElementNode::primitive("dateTime", "2021-05-01"))
            .with_child("event", ElementNode::primitive("dateTime", "2021-05-02"))
            .with_child(
                "repeat",
                ElementNode::composite("Element")
                    .with_child("boundsPeriod", period(Some("2021-05-01"), Some("2021-05-31"))),
            );
        let values = TimingExtractor.extract(&timing).unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(
            values[0],
            SearchValue::date_range(
                utc("2021-05-01T00:00:00Z"),
                utc("2021-05-01T23:59:59.999999999Z")
            )
        );
        assert_eq!(
            values[2],
            SearchValue::date_range(
                utc("2021-05-01T00:00:00Z"),
                utc("2021-05-31T23:59:59.999999999Z")
            )
        );
    }

    #[test]
    fn test_empty_timing_yields_nothing() {
        let values = TimingExtractor
            .extract(&ElementNode::composite("Timing"))
            .unwrap();
        assert!(values.is_empty());
    }
}
