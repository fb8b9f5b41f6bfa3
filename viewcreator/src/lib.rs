//! Question bank view extras: a date-range filter condition and the
//! date-picker form that feeds it.

pub mod date_condition;
pub mod datepicker;
