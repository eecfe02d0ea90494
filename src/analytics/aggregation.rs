//! Grouped churn statistics over the customer dataset

use crate::analytics::error::{AnalyticsError, AnalyticsResult};
use crate::dataset::Dataset;
use crate::models::CustomerRow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// Derived age bucket computed from the numeric Age column.
///
/// Bins are left-inclusive and right-exclusive, except the final bin which
/// is closed on both ends. Ages outside [18, 100] land in the reported
/// `Unassigned` bucket rather than being dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AgeGroup {
    From18To24,
    From25To34,
    From35To44,
    From45To54,
    From55To64,
    From65Plus,
    Unassigned,
}

impl AgeGroup {
    /// All bucket labels, in bin order
    pub const LABELS: [&'static str; 7] = [
        "18-24",
        "25-34",
        "35-44",
        "45-54",
        "55-64",
        "65+",
        "unassigned",
    ];

    /// Assign an age to its bucket
    pub fn from_age(age: f64) -> Self {
        if age >= 18.0 && age < 25.0 {
            AgeGroup::From18To24
        } else if age >= 25.0 && age < 35.0 {
            AgeGroup::From25To34
        } else if age >= 35.0 && age < 45.0 {
            AgeGroup::From35To44
        } else if age >= 45.0 && age < 55.0 {
            AgeGroup::From45To54
        } else if age >= 55.0 && age < 65.0 {
            AgeGroup::From55To64
        } else if age >= 65.0 && age <= 100.0 {
            AgeGroup::From65Plus
        } else {
            AgeGroup::Unassigned
        }
    }

    /// Bucket label used in summaries
    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::From18To24 => "18-24",
            AgeGroup::From25To34 => "25-34",
            AgeGroup::From35To44 => "35-44",
            AgeGroup::From45To54 => "45-54",
            AgeGroup::From55To64 => "55-64",
            AgeGroup::From65Plus => "65+",
            AgeGroup::Unassigned => "unassigned",
        }
    }
}

/// Per-bucket churn statistics
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct GroupSummary {
    /// Customers in the bucket
    pub count: u64,

    /// Churned customers in the bucket
    pub churned: u64,

    /// Churned / count, 0 for an empty bucket
    pub churn_rate: f64,
}

/// Global scalars over the whole dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Overview {
    pub total_customers: u64,
    pub churned_customers: u64,
    pub churn_rate: f64,
    pub retention_rate: f64,
}

/// Churn rates bucketed by demographic dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Demographics {
    pub gender: BTreeMap<String, GroupSummary>,
    pub income: BTreeMap<String, GroupSummary>,
    pub marital_status: BTreeMap<String, GroupSummary>,
    pub age_group: BTreeMap<String, GroupSummary>,
}

/// Mean of a financial column split by churned vs retained customers
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChurnComparator {
    pub churned: f64,
    pub retained: f64,
}

/// Contract breakdown plus financial comparators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessMetrics {
    pub contract: BTreeMap<String, GroupSummary>,
    pub avg_monthly_charges: ChurnComparator,
    pub avg_tenure: ChurnComparator,
}

/// Full analytics payload for dashboard consumption
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub overview: Overview,
    pub demographics: Demographics,
    pub business_metrics: BusinessMetrics,
}

/// Computes grouped statistical summaries over the full dataset.
///
/// Summaries are recomputed fresh on every call; the dataset is immutable
/// for the lifetime of the service, so no caching layer sits in between.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsAggregator;

impl AnalyticsAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Compute the full analytics summary
    pub fn summarize(&self, dataset: &Dataset) -> AnalyticsResult<AnalyticsSummary> {
        let rows = dataset.rows();
        if rows.is_empty() {
            return Err(AnalyticsError::EmptyDataset(
                "cannot aggregate an empty dataset".to_string(),
            ));
        }

        let total = rows.len() as u64;
        let churned = rows.iter().filter(|r| r.churned()).count() as u64;
        let churn_rate = churned as f64 / total as f64;

        let overview = Overview {
            total_customers: total,
            churned_customers: churned,
            churn_rate,
            retention_rate: 1.0 - churn_rate,
        };

        let demographics = Demographics {
            gender: group_by(rows, crate::models::Gender::iter(), |r| {
                r.gender.to_string()
            }),
            income: group_by(rows, crate::models::IncomeLevel::iter(), |r| {
                r.income_level.to_string()
            }),
            marital_status: group_by(rows, crate::models::MaritalStatus::iter(), |r| {
                r.marital_status.to_string()
            }),
            age_group: age_group_summaries(rows),
        };

        let business_metrics = BusinessMetrics {
            contract: group_by(rows, crate::models::Contract::iter(), |r| {
                r.contract.to_string()
            }),
            avg_monthly_charges: comparator(rows, |r| r.monthly_charges),
            avg_tenure: comparator(rows, |r| r.tenure),
        };

        Ok(AnalyticsSummary {
            overview,
            demographics,
            business_metrics,
        })
    }
}

/// Group-by-aggregate reduction over one categorical dimension.
///
/// Every category of the dimension is present in the output, including
/// empty ones, so per-bucket counts always sum to the row count.
fn group_by<K, I, F>(rows: &[CustomerRow], categories: I, key: F) -> BTreeMap<String, GroupSummary>
where
    K: ToString,
    I: Iterator<Item = K>,
    F: Fn(&CustomerRow) -> String,
{
    let mut buckets: BTreeMap<String, GroupSummary> = categories
        .map(|c| (c.to_string(), GroupSummary::default()))
        .collect();

    for row in rows {
        let summary = buckets.entry(key(row)).or_default();
        summary.count += 1;
        if row.churned() {
            summary.churned += 1;
        }
    }

    finalize_rates(&mut buckets);
    buckets
}

fn age_group_summaries(rows: &[CustomerRow]) -> BTreeMap<String, GroupSummary> {
    let mut buckets: BTreeMap<String, GroupSummary> = AgeGroup::LABELS
        .iter()
        .map(|label| (label.to_string(), GroupSummary::default()))
        .collect();

    for row in rows {
        let label = AgeGroup::from_age(row.age).label();
        let summary = buckets.entry(label.to_string()).or_default();
        summary.count += 1;
        if row.churned() {
            summary.churned += 1;
        }
    }

    finalize_rates(&mut buckets);
    buckets
}

fn finalize_rates(buckets: &mut BTreeMap<String, GroupSummary>) {
    for summary in buckets.values_mut() {
        if summary.count > 0 {
            summary.churn_rate = summary.churned as f64 / summary.count as f64;
        }
    }
}

/// Mean of a column over the churned and retained subsets. An empty subset
/// yields 0 so the summary stays finite and serializable.
fn comparator<F: Fn(&CustomerRow) -> f64>(rows: &[CustomerRow], column: F) -> ChurnComparator {
    ChurnComparator {
        churned: subset_mean(rows, &column, true),
        retained: subset_mean(rows, &column, false),
    }
}

fn subset_mean<F: Fn(&CustomerRow) -> f64>(
    rows: &[CustomerRow],
    column: &F,
    churned: bool,
) -> f64 {
    let values: Vec<f64> = rows
        .iter()
        .filter(|r| r.churned() == churned)
        .map(column)
        .collect();

    if values.is_empty() {
        return 0.0;
    }

    values.iter().sum::<f64>() / values.len() as f64
}
