//! Stored record shapes consumed from the storage collaborator.
//!
//! Each pool has an explicit schema; the three variants are carried as
//! a tagged union rather than duck-typed maps. Technology/skill/keyword
//! fields arrive as serialized JSON arrays (the storage layer's
//! layout) and are parsed leniently by the normalizer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reusable resume text snippet (summary, skill block, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub section_type: Option<String>,
    /// Serialized JSON array of curated keywords.
    pub keywords: Option<String>,
}

/// A single completed job/task with client, date, pay, and technical
/// detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrderRecord {
    pub id: Uuid,
    pub title: String,
    pub company_name: Option<String>,
    pub work_description: Option<String>,
    pub challenges: Option<String>,
    pub solutions: Option<String>,
    pub lessons_learned: Option<String>,
    /// Serialized JSON array.
    pub technologies_used: Option<String>,
    /// Serialized JSON array.
    pub skills_demonstrated: Option<String>,
    pub work_category: Option<String>,
    pub pay_amount: Option<f64>,
    pub service_date: Option<NaiveDate>,
    pub state: Option<String>,
    pub satisfaction_rating: Option<f64>,
}

/// Pre-computed rollups attached to a stored project. The engine
/// treats these as opaque display/tie-break values — it never
/// recalculates them (the grouping advisor computes *proposed*
/// aggregates for unsaved candidate groupings instead).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectAggregate {
    pub work_order_count: u32,
    pub total_earnings: f64,
    pub average_rating: Option<f64>,
}

/// A curated grouping of work orders telling one coherent narrative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub project_name: String,
    pub description: Option<String>,
    pub scope: Option<String>,
    pub achievements: Option<String>,
    pub business_impact: Option<String>,
    pub lessons_learned: Option<String>,
    /// Serialized JSON array.
    pub technologies_used: Option<String>,
    /// Serialized JSON array.
    pub skills_demonstrated: Option<String>,
    pub project_type: Option<String>,
    pub client_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub aggregate: ProjectAggregate,
}

/// Tagged union over the three record pools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "pool", rename_all = "snake_case")]
pub enum SourceRecord {
    Component(ComponentRecord),
    WorkRecord(WorkOrderRecord),
    Project(ProjectRecord),
}

impl SourceRecord {
    pub fn id(&self) -> Uuid {
        match self {
            SourceRecord::Component(c) => c.id,
            SourceRecord::WorkRecord(w) => w.id,
            SourceRecord::Project(p) => p.id,
        }
    }
}
