//! Aggregate metrics over complaint and sentiment subsets.
//!
//! Every function here is pure and accepts an empty slice, returning the
//! empty value of its result type instead of failing.

use crate::types::{
    Complaint, ComplaintPatterns, DepartmentSentiment, GroupColumn, GroupPerformance, KpiMetrics,
    MonthlyTrend, PerformanceCategory, SentimentAnalysis, SentimentLabel, SentimentPost,
};
use crate::util::{average, round_to};
use chrono::Datelike;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

pub const SATISFACTION_WEIGHT: f64 = 0.6;
pub const SPEED_WEIGHT: f64 = 0.4;
pub const MAX_SATISFACTION: f64 = 5.0;
pub const EXCELLENT_THRESHOLD: f64 = 0.8;
pub const GOOD_THRESHOLD: f64 = 0.6;
pub const RESOLUTION_TARGET_PCT: f64 = 85.0;
pub const RESOLUTION_TIME_TARGET_DAYS: f64 = 15.0;

pub fn kpis(complaints: &[Complaint]) -> KpiMetrics {
    let total = complaints.len();
    let satisfaction: Vec<f64> = complaints
        .iter()
        .map(|c| f64::from(c.satisfaction_score))
        .collect();
    // Only resolved complaints count towards resolution time; with none
    // resolved the average is 0.
    let resolved_times: Vec<f64> = complaints
        .iter()
        .filter(|c| c.is_resolved())
        .map(|c| f64::from(c.resolution_time_days))
        .collect();
    let resolved = resolved_times.len();
    let resolution_rate = if total == 0 {
        0.0
    } else {
        resolved as f64 / total as f64 * 100.0
    };

    KpiMetrics {
        total_complaints: total,
        resolved_complaints: resolved,
        resolution_rate: round_to(resolution_rate, 1),
        avg_satisfaction: round_to(average(&satisfaction), 1),
        avg_resolution_time: round_to(average(&resolved_times), 1),
    }
}

impl KpiMetrics {
    pub fn resolution_target_met(&self) -> bool {
        self.resolution_rate >= RESOLUTION_TARGET_PCT
    }

    pub fn resolution_time_target_met(&self) -> bool {
        self.avg_resolution_time <= RESOLUTION_TIME_TARGET_DAYS
    }

    pub fn satisfaction_rating(&self) -> &'static str {
        if self.avg_satisfaction >= 4.0 {
            "Excellent"
        } else if self.avg_satisfaction >= 3.0 {
            "Good"
        } else {
            "Poor"
        }
    }
}

/// Strict thresholds: a score of exactly 0.8 is Good, exactly 0.6 is
/// Needs Improvement.
pub fn categorize(efficiency: f64) -> PerformanceCategory {
    if efficiency > EXCELLENT_THRESHOLD {
        PerformanceCategory::Excellent
    } else if efficiency > GOOD_THRESHOLD {
        PerformanceCategory::Good
    } else {
        PerformanceCategory::NeedsImprovement
    }
}

pub fn efficiency_score(avg_satisfaction: f64, avg_resolution_time: f64, max_time: f64) -> f64 {
    let satisfaction = avg_satisfaction / MAX_SATISFACTION;
    if max_time > 0.0 {
        SATISFACTION_WEIGHT * satisfaction + SPEED_WEIGHT * (1.0 - avg_resolution_time / max_time)
    } else {
        satisfaction
    }
}

/// Group complaints by `column`, score every group and rank them.
///
/// Groups are visited in ascending key order; the descending sort on
/// efficiency is stable so equal scores keep that order.
pub fn group_performance(complaints: &[Complaint], column: GroupColumn) -> Vec<GroupPerformance> {
    #[derive(Default)]
    struct Acc {
        count: usize,
        satisfaction: Vec<f64>,
        times: Vec<f64>,
    }

    let mut map: BTreeMap<&str, Acc> = BTreeMap::new();
    for c in complaints {
        let e = map.entry(column.key(c)).or_default();
        e.count += 1;
        e.satisfaction.push(f64::from(c.satisfaction_score));
        e.times.push(f64::from(c.resolution_time_days));
    }
    if map.is_empty() {
        return Vec::new();
    }

    // Group means are rounded before scoring, as they are displayed.
    let prepared: Vec<(String, usize, f64, f64)> = map
        .into_iter()
        .map(|(key, acc)| {
            (
                key.to_string(),
                acc.count,
                round_to(average(&acc.satisfaction), 2),
                round_to(average(&acc.times), 2),
            )
        })
        .collect();
    let max_time = prepared.iter().map(|p| p.3).fold(0.0_f64, f64::max);

    let mut scored: Vec<GroupPerformance> = prepared
        .into_iter()
        .map(|(group, count, sat, time)| {
            let efficiency = efficiency_score(sat, time, max_time);
            GroupPerformance {
                rank: 0,
                group,
                total_complaints: count,
                avg_satisfaction: sat,
                avg_resolution_time: time,
                efficiency_score: efficiency,
                performance_category: categorize(efficiency),
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.efficiency_score
            .partial_cmp(&a.efficiency_score)
            .unwrap_or(Ordering::Equal)
    });
    for (idx, row) in scored.iter_mut().enumerate() {
        row.rank = idx + 1;
    }
    log::debug!("{:?} analysis produced {} groups", column, scored.len());
    scored
}

pub fn department_analysis(complaints: &[Complaint]) -> Vec<GroupPerformance> {
    group_performance(complaints, GroupColumn::Department)
}

pub fn regional_analysis(complaints: &[Complaint]) -> Vec<GroupPerformance> {
    group_performance(complaints, GroupColumn::District)
}

/// Count occurrences, ordered by count descending with ties kept in
/// first-encountered order.
fn ranked_counts<K, I>(values: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();
    for v in values {
        match index.get(&v) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(v.clone(), counts.len());
                counts.push((v, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Most frequent complaint category; ties go to the first one seen.
pub fn most_common_category(complaints: &[Complaint]) -> Option<String> {
    ranked_counts(complaints.iter().filter_map(|c| c.category.as_deref()))
        .into_iter()
        .next()
        .map(|(category, _)| category.to_string())
}

pub fn complaint_patterns(complaints: &[Complaint]) -> ComplaintPatterns {
    if complaints.is_empty() {
        return ComplaintPatterns::default();
    }

    let category_distribution = ranked_counts(complaints.iter().filter_map(|c| c.category.as_deref()))
        .into_iter()
        .map(|(category, n)| (category.to_string(), n))
        .collect();

    let mut by_score: BTreeMap<u8, usize> = BTreeMap::new();
    for c in complaints {
        *by_score.entry(c.satisfaction_score).or_insert(0) += 1;
    }

    let mut by_month: BTreeMap<(i32, u32), Vec<f64>> = BTreeMap::new();
    for c in complaints {
        let key = (c.complaint_date.year(), c.complaint_date.month());
        by_month
            .entry(key)
            .or_default()
            .push(f64::from(c.satisfaction_score));
    }
    let monthly_trends = by_month
        .into_iter()
        .map(|((year, month), scores)| MonthlyTrend {
            month: format!("{year:04}-{month:02}"),
            complaint_count: scores.len(),
            avg_satisfaction: round_to(average(&scores), 2),
        })
        .collect();

    ComplaintPatterns {
        category_distribution,
        satisfaction_distribution: by_score.into_iter().collect(),
        monthly_trends,
    }
}

pub fn sentiment_analysis(posts: &[SentimentPost]) -> SentimentAnalysis {
    if posts.is_empty() {
        return SentimentAnalysis::default();
    }

    let distribution = ranked_counts(posts.iter().map(|p| p.label));
    let total = posts.len();
    let share = |label: SentimentLabel| {
        let n = posts.iter().filter(|p| p.label == label).count();
        round_to(n as f64 / total as f64 * 100.0, 1)
    };
    let positive_rate = share(SentimentLabel::Positive);
    let negative_rate = share(SentimentLabel::Negative);

    let mut by_pair: BTreeMap<(&str, SentimentLabel), usize> = BTreeMap::new();
    for p in posts {
        *by_pair.entry((p.department.as_str(), p.label)).or_insert(0) += 1;
    }
    let by_department = by_pair
        .into_iter()
        .map(|((department, sentiment), count)| DepartmentSentiment {
            department: department.to_string(),
            sentiment,
            count,
        })
        .collect();

    SentimentAnalysis {
        total_posts: total,
        positive_rate,
        negative_rate,
        distribution,
        by_department,
    }
}
