//! Deterministic, pure logic for question bank column ordering.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! lists and maps and return deterministic outputs suitable for tests.

pub mod identifier;
pub mod order;
pub mod positions;
pub mod sort;
