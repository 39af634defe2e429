//! MatchEngine — the facade tying the pipeline together: fetch the
//! three pools from the store, normalize, extract, score, rank; or
//! run the grouping advisor over the work-record pool.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::Config;
use crate::errors::EngineError;
use crate::grouping::{propose_groups, GroupingStrategy, ProjectProposal};
use crate::matching::{extract_keywords, normalize, rank, Lexicon, MatchReport};
use crate::models::{MatchableDocument, SourceRecord};
use crate::store::HistoryStore;

pub struct MatchEngine {
    lexicon: Arc<Lexicon>,
    config: Config,
}

impl MatchEngine {
    pub fn new(config: Config) -> Self {
        Self::with_lexicon(config, Arc::new(Lexicon::default()))
    }

    /// Constructs the engine with a caller-supplied lexicon (the
    /// dictionaries are versioned configuration, loaded once).
    pub fn with_lexicon(config: Config, lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Matches a job posting against all three content pools and
    /// returns per-pool ranked results. Empty posting text is valid:
    /// every document scores 0.
    pub async fn match_job(
        &self,
        store: &dyn HistoryStore,
        job_text: &str,
    ) -> Result<MatchReport, EngineError> {
        let documents = self.load_documents(store).await?;
        let keywords = extract_keywords(&self.lexicon, job_text);
        debug!(
            terms = keywords.required_terms.len(),
            technologies = keywords.technology_terms.len(),
            "extracted job posting keywords"
        );

        let report = rank(&documents, &keywords, &self.config.weights);
        info!(
            documents = documents.len(),
            results = report.total_results(),
            "ranked job match"
        );
        Ok(report)
    }

    /// Proposes project groupings of the raw work-record pool.
    pub async fn propose_groups(
        &self,
        store: &dyn HistoryStore,
        strategy: GroupingStrategy,
    ) -> Result<Vec<ProjectProposal>, EngineError> {
        let records: Vec<MatchableDocument> = store
            .work_orders()
            .await?
            .into_iter()
            .map(|w| normalize(&self.lexicon, &SourceRecord::WorkRecord(w)))
            .collect();

        let proposals = propose_groups(&records, strategy, &self.config.grouping);
        info!(
            %strategy,
            records = records.len(),
            proposals = proposals.len(),
            "proposed project groupings"
        );
        Ok(proposals)
    }

    async fn load_documents(
        &self,
        store: &dyn HistoryStore,
    ) -> Result<Vec<MatchableDocument>, EngineError> {
        let mut documents = Vec::new();
        for component in store.components().await? {
            documents.push(normalize(&self.lexicon, &SourceRecord::Component(component)));
        }
        for work_order in store.work_orders().await? {
            documents.push(normalize(&self.lexicon, &SourceRecord::WorkRecord(work_order)));
        }
        for project in store.projects().await? {
            documents.push(normalize(&self.lexicon, &SourceRecord::Project(project)));
        }
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ComponentRecord, ProjectAggregate, ProjectRecord, WorkOrderRecord};
    use crate::store::InMemoryStore;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn sample_store() -> InMemoryStore {
        InMemoryStore::from_records(vec![
            SourceRecord::Component(ComponentRecord {
                id: Uuid::from_u128(1),
                title: "Technical summary".to_string(),
                content: "Desktop support specialist with Active Directory background"
                    .to_string(),
                section_type: Some("summary".to_string()),
                keywords: Some(r#"["Customer Service"]"#.to_string()),
            }),
            SourceRecord::WorkRecord(WorkOrderRecord {
                id: Uuid::from_u128(2),
                title: "Windows 10 rollout".to_string(),
                company_name: Some("Acme".to_string()),
                work_description: Some(
                    "Deployed Windows 10 images with Group Policy baselines".to_string(),
                ),
                challenges: None,
                solutions: None,
                lessons_learned: None,
                technologies_used: Some(r#"["Windows 10", "Group Policy"]"#.to_string()),
                skills_demonstrated: Some(r#"["Imaging"]"#.to_string()),
                work_category: Some("deployment".to_string()),
                pay_amount: Some(600.0),
                service_date: NaiveDate::from_ymd_opt(2023, 5, 2),
                state: Some("TX".to_string()),
                satisfaction_rating: Some(5.0),
            }),
            SourceRecord::Project(ProjectRecord {
                id: Uuid::from_u128(3),
                project_name: "Acme workstation refresh".to_string(),
                description: Some("Quarterly refresh of 150 workstations".to_string()),
                scope: None,
                achievements: None,
                business_impact: None,
                lessons_learned: None,
                technologies_used: Some(r#"["Active Directory"]"#.to_string()),
                skills_demonstrated: None,
                project_type: Some("deployment".to_string()),
                client_name: Some("Acme".to_string()),
                start_date: NaiveDate::from_ymd_opt(2023, 4, 1),
                end_date: NaiveDate::from_ymd_opt(2023, 6, 30),
                aggregate: ProjectAggregate {
                    work_order_count: 14,
                    total_earnings: 8400.0,
                    average_rating: Some(4.9),
                },
            }),
        ])
    }

    #[tokio::test]
    async fn test_match_job_covers_all_pools() {
        let engine = MatchEngine::new(Config::default());
        let report = engine
            .match_job(
                &sample_store(),
                "Desktop Support Technician with Active Directory and Windows 10",
            )
            .await
            .unwrap();
        assert_eq!(report.components.len(), 1);
        assert_eq!(report.work_records.len(), 1);
        assert_eq!(report.projects.len(), 1);
        assert!(report.components[0].score > 0.0);
        assert!(report.work_records[0].technology_bonus_applied);
    }

    #[tokio::test]
    async fn test_match_job_empty_posting_is_zero_signal() {
        let engine = MatchEngine::new(Config::default());
        let report = engine.match_job(&sample_store(), "   ").await.unwrap();
        assert!(report.keywords.is_empty());
        assert!(report
            .components
            .iter()
            .chain(&report.work_records)
            .chain(&report.projects)
            .all(|r| r.score == 0.0));
    }

    #[tokio::test]
    async fn test_propose_groups_uses_work_record_pool_only() {
        let engine = MatchEngine::new(Config::default());
        let proposals = engine
            .propose_groups(&sample_store(), GroupingStrategy::CompanyTime)
            .await
            .unwrap();
        // One work order: one singleton proposal, reported not dropped.
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].member_ids, vec![Uuid::from_u128(2)]);
    }
}
