//! Modal date-picker form feeding the date filter condition.

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Days, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date_condition::{DateCondition, DateJoin};

/// Start of the range (date and time).
pub const FIELD_START: &str = "assesstimestart";
/// End of the range (date only).
pub const FIELD_FINISH: &str = "assesstimefinish";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    DateTimeSelector,
    DateSelector,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub label: &'static str,
}

/// Context the form is submitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormContext {
    System,
}

/// Arguments the page passes when opening the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DatePickerArgs {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub jointype: Option<i64>,
}

/// Submitted selector values, in unix seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DatePickerSubmission {
    #[serde(default)]
    pub assesstimestart: Option<i64>,
    #[serde(default)]
    pub assesstimefinish: Option<i64>,
}

impl DatePickerSubmission {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("parse date picker submission")
    }
}

#[derive(Debug, Clone)]
pub struct DatePickerForm {
    args: DatePickerArgs,
}

impl DatePickerForm {
    pub fn new(args: DatePickerArgs) -> Self {
        Self { args }
    }

    pub fn definition(&self) -> Vec<FormField> {
        vec![
            FormField {
                name: FIELD_START,
                kind: FieldKind::DateTimeSelector,
                label: "From",
            },
            FormField {
                name: FIELD_FINISH,
                kind: FieldKind::DateSelector,
                label: "To",
            },
        ]
    }

    pub fn context(&self) -> FormContext {
        FormContext::System
    }

    /// Page the form returns to.
    pub fn page_url(&self) -> Result<&str> {
        match self.args.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(url),
            _ => bail!("date picker requires a page url"),
        }
    }

    /// Requested join type; Between when not given.
    pub fn join(&self) -> Result<DateJoin> {
        self.args
            .jointype
            .map_or(Ok(DateJoin::default()), DateJoin::try_from)
    }

    /// Build the filter condition from submitted values.
    ///
    /// Between spans from the start instant to the end of the finish day.
    /// Before excludes the finish day itself; After is relative to the start
    /// instant.
    pub fn process_submission(&self, data: &DatePickerSubmission) -> Result<DateCondition> {
        let join = self.join()?;
        debug!(join = join.label(), "processing date picker submission");
        match join {
            DateJoin::Before => {
                let finish = day_start(required(data.assesstimefinish, FIELD_FINISH)?)?;
                Ok(DateCondition::before(finish))
            }
            DateJoin::After => {
                let start = timestamp(required(data.assesstimestart, FIELD_START)?)?;
                Ok(DateCondition::after(start))
            }
            DateJoin::Between => {
                let start = timestamp(required(data.assesstimestart, FIELD_START)?)?;
                let finish = day_end(required(data.assesstimefinish, FIELD_FINISH)?)?;
                DateCondition::between(start, finish)
            }
        }
    }
}

fn required(value: Option<i64>, field: &str) -> Result<i64> {
    value.ok_or_else(|| anyhow!("missing {}", field))
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| anyhow!("timestamp {} out of range", secs))
}

fn day_start(secs: i64) -> Result<DateTime<Utc>> {
    Ok(timestamp(secs)?
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc())
}

fn day_end(secs: i64) -> Result<DateTime<Utc>> {
    let next_day = day_start(secs)?
        .checked_add_days(Days::new(1))
        .ok_or_else(|| anyhow!("timestamp {} out of range", secs))?;
    Ok(next_day - TimeDelta::seconds(1))
}
