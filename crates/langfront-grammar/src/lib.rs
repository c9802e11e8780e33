//! NULLABLE/FIRST/FOLLOW analysis, LL(1) parse-table construction, and the
//! iterative LL(1) parser driver.
//!
//! `GrammarError` lives here rather than in `langfront-common`, since it is
//! raised only during the analysis this crate performs.

mod analyzer;
mod ll1;
mod sets;

pub use analyzer::{GrammarAnalyzer, GrammarError};
pub use ll1::LL1Parser;
pub use sets::{ChangeTrackingMap, ChangeTrackingSet};
