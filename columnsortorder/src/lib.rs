//! Column ordering for the question bank list.
//!
//! Persists which columns are enabled (and in what order) and which are
//! disabled, as two comma-joined lists in a plugin config store, and merges
//! the persisted order with the columns the question bank currently offers.
//!
//! - **[`core`]**: Pure ordering logic (parsing, normalization, merge).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Config store implementations and the column catalog file.
//! - **[`manager`]**: Ties core logic to an injected store and column source.

pub mod core;
pub mod io;
pub mod logging;
pub mod manager;
pub mod source;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
