//! Auto-Grouping Advisor — proposes project groupings of raw work
//! records by client/time proximity, dominant technology, or
//! geography. Proposals are advisory previews: aggregates are
//! recomputed fresh on every call and nothing is persisted.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::EngineError;
use crate::models::MatchableDocument;

// ────────────────────────────────────────────────────────────────────────────
// Strategy and configuration
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingStrategy {
    CompanyTime,
    Technology,
    Location,
}

impl FromStr for GroupingStrategy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "company_time" => Ok(GroupingStrategy::CompanyTime),
            "technology" => Ok(GroupingStrategy::Technology),
            "location" => Ok(GroupingStrategy::Location),
            other => Err(EngineError::UnknownStrategy(other.to_string())),
        }
    }
}

impl std::fmt::Display for GroupingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            GroupingStrategy::CompanyTime => "company_time",
            GroupingStrategy::Technology => "technology",
            GroupingStrategy::Location => "location",
        };
        f.write_str(label)
    }
}

/// Tunables for the company/time strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Width of one time bucket in months. Default quarterly.
    pub bucket_months: u32,
    /// Buckets below this size are folded into the nearest adjacent
    /// bucket for the same client instead of being dropped.
    pub min_bucket_size: usize,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            bucket_months: 3,
            min_bucket_size: 2,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Proposal model
// ────────────────────────────────────────────────────────────────────────────

/// Preview aggregates for an unsaved candidate grouping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposedAggregate {
    pub record_count: usize,
    pub total_value: f64,
    pub mean_rating: Option<f64>,
}

/// One candidate project grouping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectProposal {
    pub strategy: GroupingStrategy,
    pub name: String,
    pub member_ids: Vec<Uuid>,
    pub aggregate: ProposedAggregate,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

// ────────────────────────────────────────────────────────────────────────────
// Grouping algorithms
// ────────────────────────────────────────────────────────────────────────────

/// Proposes project groupings for `records` under `strategy`.
/// Deterministic: identical inputs yield identical proposals in
/// identical order (total value descending, name ascending).
pub fn propose_groups(
    records: &[MatchableDocument],
    strategy: GroupingStrategy,
    config: &GroupingConfig,
) -> Vec<ProjectProposal> {
    let mut proposals = match strategy {
        GroupingStrategy::CompanyTime => group_by_company_time(records, config),
        GroupingStrategy::Technology => group_by_technology(records),
        GroupingStrategy::Location => group_by_location(records),
    };

    proposals.sort_by(|a, b| {
        b.aggregate
            .total_value
            .partial_cmp(&a.aggregate.total_value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    proposals
}

/// Partitions by exact client name, then into fixed time buckets of
/// `bucket_months` per client. Undersized buckets fold into the
/// nearest adjacent bucket for the same client; undated records form
/// their own per-client bucket. No record is ever dropped.
fn group_by_company_time(
    records: &[MatchableDocument],
    config: &GroupingConfig,
) -> Vec<ProjectProposal> {
    let bucket_months = config.bucket_months.max(1) as i32;

    // client → period index → members (BTreeMaps for stable order).
    let mut clients: BTreeMap<String, BTreeMap<i32, Vec<&MatchableDocument>>> = BTreeMap::new();
    let mut undated: BTreeMap<String, Vec<&MatchableDocument>> = BTreeMap::new();

    for record in records {
        let client = record
            .client
            .clone()
            .unwrap_or_else(|| "Unassigned".to_string());
        match record.date_range {
            Some((start, _)) => {
                let period = (start.year() * 12 + start.month0() as i32) / bucket_months;
                clients
                    .entry(client)
                    .or_default()
                    .entry(period)
                    .or_default()
                    .push(record);
            }
            None => undated.entry(client).or_default().push(record),
        }
    }

    let mut proposals = Vec::new();

    for (client, periods) in &clients {
        let mut buckets: Vec<(i32, Vec<&MatchableDocument>)> = periods
            .iter()
            .map(|(period, members)| (*period, members.clone()))
            .collect();

        // Fold undersized buckets into the nearest surviving neighbor
        // (ties resolve to the earlier bucket). A client whose only
        // bucket is undersized keeps it: reported, never dropped.
        loop {
            let Some(small) = buckets
                .iter()
                .position(|(_, members)| members.len() < config.min_bucket_size)
                .filter(|_| buckets.len() > 1)
            else {
                break;
            };
            let small_period = buckets[small].0;
            let target = buckets
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != small)
                .min_by_key(|(_, (period, _))| ((period - small_period).abs(), *period))
                .map(|(i, _)| i)
                .unwrap_or(small);
            let (_, members) = buckets.remove(small);
            let target = if target > small { target - 1 } else { target };
            buckets[target].1.extend(members);
        }

        for (period, members) in buckets {
            let name = format!("{client} - {} Support", period_label(period, bucket_months));
            proposals.push(build_proposal(
                GroupingStrategy::CompanyTime,
                name,
                &members,
            ));
        }
    }

    for (client, members) in &undated {
        let name = format!("{client} - General Support");
        proposals.push(build_proposal(
            GroupingStrategy::CompanyTime,
            name,
            members,
        ));
    }

    proposals
}

/// Partitions by each record's dominant technology token: the one most
/// frequent across the whole record set, ties broken by first-listed
/// position. Records without technologies group under "General".
fn group_by_technology(records: &[MatchableDocument]) -> Vec<ProjectProposal> {
    let mut corpus_frequency: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        for tech in &record.technologies {
            *corpus_frequency.entry(tech.as_str()).or_default() += 1;
        }
    }

    let mut groups: BTreeMap<String, Vec<&MatchableDocument>> = BTreeMap::new();
    for record in records {
        let dominant = record
            .technologies
            .iter()
            .enumerate()
            .min_by_key(|(index, tech)| {
                let freq = corpus_frequency.get(tech.as_str()).copied().unwrap_or(0);
                (std::cmp::Reverse(freq), *index)
            })
            .map(|(_, tech)| tech.clone());
        let key = dominant.unwrap_or_else(|| "general".to_string());
        groups.entry(key).or_default().push(record);
    }

    groups
        .iter()
        .map(|(tech, members)| {
            let name = format!("{} Engagements", title_case(tech));
            build_proposal(GroupingStrategy::Technology, name, members)
        })
        .collect()
}

/// Partitions by the state/region field verbatim.
fn group_by_location(records: &[MatchableDocument]) -> Vec<ProjectProposal> {
    let mut groups: BTreeMap<String, Vec<&MatchableDocument>> = BTreeMap::new();
    for record in records {
        let key = record
            .location
            .clone()
            .unwrap_or_else(|| "Unspecified".to_string());
        groups.entry(key).or_default().push(record);
    }

    groups
        .iter()
        .map(|(location, members)| {
            let name = format!("{location} Regional Work");
            build_proposal(GroupingStrategy::Location, name, members)
        })
        .collect()
}

fn build_proposal(
    strategy: GroupingStrategy,
    name: String,
    members: &[&MatchableDocument],
) -> ProjectProposal {
    let total_value: f64 = members.iter().map(|m| m.value.earnings).sum();
    let ratings: Vec<f64> = members.iter().filter_map(|m| m.rating).collect();
    let mean_rating = if ratings.is_empty() {
        None
    } else {
        Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
    };

    let mut date_range: Option<(NaiveDate, NaiveDate)> = None;
    for member in members {
        if let Some((start, end)) = member.date_range {
            date_range = Some(match date_range {
                Some((lo, hi)) => (lo.min(start), hi.max(end)),
                None => (start, end),
            });
        }
    }

    ProjectProposal {
        strategy,
        name,
        member_ids: members.iter().map(|m| m.id).collect(),
        aggregate: ProposedAggregate {
            record_count: members.len(),
            total_value,
            mean_rating,
        },
        date_range,
    }
}

/// Human label for a time bucket: "Q2 2023" at the quarterly default,
/// otherwise the bucket's starting month.
fn period_label(period: i32, bucket_months: i32) -> String {
    let start_month0 = period * bucket_months;
    let year = start_month0.div_euclid(12);
    let month0 = start_month0.rem_euclid(12);
    if bucket_months == 3 {
        format!("Q{} {}", month0 / 3 + 1, year)
    } else {
        const MONTHS: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        format!("{} {}", MONTHS[month0 as usize], year)
    }
}

fn title_case(term: &str) -> String {
    term.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
