//! Date-range filter condition for the question bank list.
//!
//! Restricts listed questions by creation time. The condition renders to a SQL
//! fragment over `q.timecreated` plus named parameters in unix seconds.

use std::collections::BTreeMap;

use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Key the filter framework uses to identify this condition.
pub const CONDITION_KEY: &str = "date";

/// Column the condition filters on.
pub const TIME_COLUMN: &str = "q.timecreated";

/// How the selected date(s) restrict the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateJoin {
    Before = 0,
    After = 1,
    #[default]
    Between = 2,
}

impl DateJoin {
    pub fn label(self) -> &'static str {
        match self {
            DateJoin::Before => "Before",
            DateJoin::After => "After",
            DateJoin::Between => "Between",
        }
    }
}

impl From<DateJoin> for i64 {
    fn from(join: DateJoin) -> Self {
        join as i64
    }
}

impl TryFrom<i64> for DateJoin {
    type Error = anyhow::Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(DateJoin::Before),
            1 => Ok(DateJoin::After),
            2 => Ok(DateJoin::Between),
            other => Err(anyhow!("unknown date join type {}", other)),
        }
    }
}

/// Options advertised to the filter UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub name: String,
    pub title: String,
    pub custom: bool,
    pub multiple: bool,
    pub filterclass: Option<String>,
    pub values: Vec<String>,
    pub allowempty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateRange {
    Before(DateTime<Utc>),
    After(DateTime<Utc>),
    Between(DateTime<Utc>, DateTime<Utc>),
}

/// Date filter. An unbounded condition matches everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateCondition {
    range: Option<DateRange>,
}

impl DateCondition {
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Questions created strictly before `bound`.
    pub fn before(bound: DateTime<Utc>) -> Self {
        Self {
            range: Some(DateRange::Before(bound)),
        }
    }

    /// Questions created strictly after `bound`.
    pub fn after(bound: DateTime<Utc>) -> Self {
        Self {
            range: Some(DateRange::After(bound)),
        }
    }

    /// Questions created within `from..=to`.
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self> {
        if from > to {
            bail!("date range start {} is after end {}", from, to);
        }
        Ok(Self {
            range: Some(DateRange::Between(from, to)),
        })
    }

    pub fn condition_key(&self) -> &'static str {
        CONDITION_KEY
    }

    pub fn join(&self) -> DateJoin {
        match self.range {
            Some(DateRange::Before(_)) => DateJoin::Before,
            Some(DateRange::After(_)) => DateJoin::After,
            Some(DateRange::Between(..)) | None => DateJoin::default(),
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.range.is_some()
    }

    /// SQL fragment for the listing query. Empty when unbounded.
    pub fn where_clause(&self) -> String {
        match self.range {
            None => String::new(),
            Some(DateRange::Before(_)) => format!("{} < :datebefore", TIME_COLUMN),
            Some(DateRange::After(_)) => format!("{} > :dateafter", TIME_COLUMN),
            Some(DateRange::Between(..)) => {
                format!("{col} >= :datefrom AND {col} <= :dateto", col = TIME_COLUMN)
            }
        }
    }

    /// Parameters bound by [`Self::where_clause`], in unix seconds.
    pub fn params(&self) -> BTreeMap<&'static str, i64> {
        let mut params = BTreeMap::new();
        match self.range {
            None => {}
            Some(DateRange::Before(bound)) => {
                params.insert("datebefore", bound.timestamp());
            }
            Some(DateRange::After(bound)) => {
                params.insert("dateafter", bound.timestamp());
            }
            Some(DateRange::Between(from, to)) => {
                params.insert("datefrom", from.timestamp());
                params.insert("dateto", to.timestamp());
            }
        }
        params
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            name: CONDITION_KEY.to_string(),
            title: "Date".to_string(),
            custom: false,
            multiple: true,
            filterclass: None,
            values: Vec::new(),
            allowempty: true,
        }
    }

    /// Join types offered by the filter, Between first.
    pub fn join_list(&self) -> Vec<(DateJoin, &'static str)> {
        [DateJoin::Between, DateJoin::Before, DateJoin::After]
            .into_iter()
            .map(|join| (join, join.label()))
            .collect()
    }
}
