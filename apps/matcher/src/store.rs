//! Storage collaborator seam. The engine never talks to a database
//! directly — it consumes the three record pools through this trait,
//! and any backend (SQL, HTTP, in-memory) maps its own failures into
//! `EngineError::Store`.

use async_trait::async_trait;

use crate::errors::EngineError;
use crate::models::{ComponentRecord, ProjectRecord, SourceRecord, WorkOrderRecord};

/// Read-only access to the job-seeker's stored work history.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn components(&self) -> Result<Vec<ComponentRecord>, EngineError>;
    async fn work_orders(&self) -> Result<Vec<WorkOrderRecord>, EngineError>;
    async fn projects(&self) -> Result<Vec<ProjectRecord>, EngineError>;
}

/// In-memory store backing the demo binary and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    components: Vec<ComponentRecord>,
    work_orders: Vec<WorkOrderRecord>,
    projects: Vec<ProjectRecord>,
}

impl InMemoryStore {
    pub fn from_records(records: Vec<SourceRecord>) -> Self {
        let mut store = Self::default();
        for record in records {
            match record {
                SourceRecord::Component(c) => store.components.push(c),
                SourceRecord::WorkRecord(w) => store.work_orders.push(w),
                SourceRecord::Project(p) => store.projects.push(p),
            }
        }
        store
    }

    pub fn len(&self) -> usize {
        self.components.len() + self.work_orders.len() + self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl HistoryStore for InMemoryStore {
    async fn components(&self) -> Result<Vec<ComponentRecord>, EngineError> {
        Ok(self.components.clone())
    }

    async fn work_orders(&self) -> Result<Vec<WorkOrderRecord>, EngineError> {
        Ok(self.work_orders.clone())
    }

    async fn projects(&self) -> Result<Vec<ProjectRecord>, EngineError> {
        Ok(self.projects.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_from_records_partitions_by_pool() {
        let records = vec![
            SourceRecord::Component(ComponentRecord {
                id: Uuid::new_v4(),
                title: "Summary".to_string(),
                content: "Desktop support specialist".to_string(),
                section_type: None,
                keywords: None,
            }),
            SourceRecord::WorkRecord(WorkOrderRecord {
                id: Uuid::new_v4(),
                title: "Printer fleet swap".to_string(),
                company_name: None,
                work_description: None,
                challenges: None,
                solutions: None,
                lessons_learned: None,
                technologies_used: None,
                skills_demonstrated: None,
                work_category: None,
                pay_amount: None,
                service_date: None,
                state: None,
                satisfaction_rating: None,
            }),
        ];
        let store = InMemoryStore::from_records(records);
        assert_eq!(store.len(), 2);
        assert_eq!(store.components().await.unwrap().len(), 1);
        assert_eq!(store.work_orders().await.unwrap().len(), 1);
        assert!(store.projects().await.unwrap().is_empty());
    }
}
