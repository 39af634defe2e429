pub mod document;
pub mod records;

pub use document::{MatchableDocument, Pool, ValueMetric};
pub use records::{
    ComponentRecord, ProjectAggregate, ProjectRecord, SourceRecord, WorkOrderRecord,
};
