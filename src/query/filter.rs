//! Validated filter state

use chrono::NaiveDate;
use serde::Serialize;
use super::error::FilterError;

/// The validated, normalized filter state for one query.
///
/// Empty lists and absent bounds mean "no restriction". When both bounds
/// are present `date_start <= date_end` holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSet {
    region: Vec<String>,
    categories: Vec<String>,
    date_start: Option<NaiveDate>,
    date_end: Option<NaiveDate>,
}

impl FilterSet {
    pub fn builder() -> FilterSetBuilder {
        FilterSetBuilder::default()
    }

    /// A filter set with no restriction
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn region(&self) -> &[String] {
        &self.region
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn date_start(&self) -> Option<NaiveDate> {
        self.date_start
    }

    pub fn date_end(&self) -> Option<NaiveDate> {
        self.date_end
    }

    /// Both bounds, if both are set
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.date_start?, self.date_end?))
    }

    pub fn is_unrestricted(&self) -> bool {
        self.region.is_empty()
            && self.categories.is_empty()
            && self.date_start.is_none()
            && self.date_end.is_none()
    }
}

/// Builder for [`FilterSet`]. Validation happens in `build`.
#[derive(Debug, Clone, Default)]
pub struct FilterSetBuilder {
    region: Vec<String>,
    categories: Vec<String>,
    date_start: Option<NaiveDate>,
    date_end: Option<NaiveDate>,
}

impl FilterSetBuilder {
    pub fn regions<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.region.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn categories<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn date_start(mut self, date: NaiveDate) -> Self {
        self.date_start = Some(date);
        self
    }

    pub fn date_end(mut self, date: NaiveDate) -> Self {
        self.date_end = Some(date);
        self
    }

    pub fn date_range(self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_start(start).date_end(end)
    }

    pub fn build(self) -> Result<FilterSet, FilterError> {
        if let (Some(start), Some(end)) = (self.date_start, self.date_end) {
            if start > end {
                return Err(FilterError::InvalidDateRange { start, end });
            }
        }

        Ok(FilterSet {
            region: normalize(self.region),
            categories: normalize(self.categories),
            date_start: self.date_start,
            date_end: self.date_end,
        })
    }
}

/// Trim, drop blanks and deduplicate, keeping first-seen order
fn normalize(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let trimmed = value.trim();
        if !trimmed.is_empty() && !out.iter().any(|v| v == trimmed) {
            out.push(trimmed.to_string());
        }
    }
    out
}
