//! Ordering for category groupings
//!
//! Sorting is done in two separate stable passes: first by name, then (when
//! sorting by count) by count. Because the second pass is stable, categories
//! with the same count keep the name order from the first pass, which runs in
//! the same direction. `count desc` therefore breaks ties by name descending.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::collate::locale_compare;
use crate::grouping::CategoryGrouping;

/// Field to sort category groupings by
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Name,
    Count,
}

/// Sort direction
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flip(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Sort directive: which field, which direction
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortingOptions {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortingOptions {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Lenient parse of loosely-typed input (query strings, tool arguments)
    ///
    /// Anything other than `"count"` means name, anything other than
    /// `"desc"` means ascending.
    pub fn sanitize(field: Option<&str>, order: Option<&str>) -> Self {
        let field = match field {
            Some("count") => SortField::Count,
            _ => SortField::Name,
        };
        let order = match order {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        };
        Self { field, order }
    }

    /// Select `field`: re-selecting the active field flips the order,
    /// switching fields keeps it.
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.order.flip())
        } else {
            Self::new(field, self.order)
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::Name => f.write_str("name"),
            SortField::Count => f.write_str("count"),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

impl fmt::Display for SortingOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.order)
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "count" => Ok(SortField::Count),
            other => Err(format!("Invalid sort field: {other}. Valid fields: name, count")),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("Invalid sort order: {other}. Valid orders: asc, desc")),
        }
    }
}

/// Parses `"<field>:<order>"`, e.g. `"count:desc"`. A bare field means ascending.
impl FromStr for SortingOptions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, order) = match s.split_once(':') {
            Some((field, order)) => (field.parse()?, order.parse()?),
            None => (s.parse()?, SortOrder::Asc),
        };
        Ok(Self { field, order })
    }
}

/// Return a sorted copy of `groupings`
///
/// The input slice is left untouched.
pub fn get_sorted_category_grouping(
    groupings: &[CategoryGrouping],
    options: SortingOptions,
) -> Vec<CategoryGrouping> {
    let mut sorted = groupings.to_vec();

    sorted.sort_by(|a, b| match options.order {
        SortOrder::Asc => locale_compare(&a.category, &b.category),
        SortOrder::Desc => locale_compare(&b.category, &a.category),
    });

    if options.field == SortField::Count {
        sorted.sort_by(|a, b| match options.order {
            SortOrder::Asc => a.count.cmp(&b.count),
            SortOrder::Desc => b.count.cmp(&a.count),
        });
    }

    sorted
}
