//! Search orchestration: concurrent provider fan-out, scoring,
//! filtering, best-offer selection.

pub mod search;
