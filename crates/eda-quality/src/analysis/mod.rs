//! Table-wide analyses that run independently of the summary: numeric
//! correlation and categorical frequency ranking.

mod categories;
mod correlation;

pub use categories::CategoryRanker;
pub use correlation::CorrelationAnalyzer;
