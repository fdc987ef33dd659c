//! zenbudget-core: transaction model, week boundaries, per-category
//! aggregation and the budget reallocation heuristic.

pub mod aggregate;
pub mod reallocate;
pub mod record;
pub mod week;

pub use aggregate::{
    AggregationStats, CategoryAggregate, CategoryTotals, aggregate, aggregate_with_stats,
};
pub use reallocate::{NO_REALLOCATION_MESSAGE, Reallocation, Suggestion, reallocate, round_cents};
pub use record::{FlowType, TransactionRecord};
pub use week::{WeekRule, today_in};
