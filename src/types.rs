use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tabled::Tabled;

use crate::util::format_number;

// Raw rows mirror the CSV headers one-to-one. Every field is read as text so
// the loader can report exactly which column failed to parse.

#[derive(Debug, Deserialize)]
pub struct RawComplaintRow {
    pub complaint_id: Option<String>,
    pub department: Option<String>,
    pub district: Option<String>,
    pub service_type: Option<String>,
    #[serde(default)]
    pub complaint_category: Option<String>,
    pub complaint_date: Option<String>,
    pub resolution_date: Option<String>,
    pub resolution_time_days: Option<String>,
    pub status: Option<String>,
    pub satisfaction_score: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawEmployeeRow {
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub district: Option<String>,
    pub cases_handled_per_day: Option<String>,
    pub avg_processing_time_minutes: Option<String>,
    pub attendance_rate_percent: Option<String>,
    pub protocol_violations: Option<String>,
    pub years_of_service: Option<String>,
    pub efficiency_rating: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawSentimentRow {
    pub post_id: Option<String>,
    pub department: Option<String>,
    pub district: Option<String>,
    pub post_date: Option<String>,
    pub sentiment_label: Option<String>,
    pub sentiment_score: Option<String>,
    pub sample_text: Option<String>,
    pub platform: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawDepartmentRow {
    pub department: Option<String>,
    pub total_complaints_last_year: Option<String>,
    pub resolved_complaints: Option<String>,
    pub pending_complaints: Option<String>,
    pub avg_resolution_time_days: Option<String>,
    pub avg_satisfaction_score: Option<String>,
    pub total_employees: Option<String>,
    pub efficiency_category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ComplaintStatus {
    Resolved,
    Pending,
}

impl FromStr for ComplaintStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Resolved" => Ok(Self::Resolved),
            "Pending" => Ok(Self::Pending),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl FromStr for Priority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        f.write_str(s)
    }
}

/// Tone of a social-media post. Variants are declared alphabetically so the
/// derived `Ord` matches label order when sentiment rows are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl FromStr for SentimentLabel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Positive" => Ok(Self::Positive),
            "Negative" => Ok(Self::Negative),
            "Neutral" => Ok(Self::Neutral),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EfficiencyCategory {
    High,
    Medium,
    Low,
}

impl FromStr for EfficiencyCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "High" => Ok(Self::High),
            "Medium" => Ok(Self::Medium),
            "Low" => Ok(Self::Low),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Complaint {
    pub id: String,
    pub department: String,
    pub district: String,
    pub service_type: String,
    pub category: Option<String>,
    pub complaint_date: NaiveDate,
    pub resolution_date: Option<NaiveDate>,
    pub resolution_time_days: u32,
    pub status: ComplaintStatus,
    pub satisfaction_score: u8,
    pub priority: Priority,
}

impl Complaint {
    pub fn is_resolved(&self) -> bool {
        self.status == ComplaintStatus::Resolved
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: String,
    pub department: String,
    pub district: String,
    pub cases_handled_per_day: f64,
    pub avg_processing_time_minutes: f64,
    pub attendance_rate_percent: f64,
    pub protocol_violations: u32,
    pub years_of_service: u32,
    pub efficiency_rating: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentimentPost {
    pub id: String,
    pub department: String,
    pub district: String,
    pub post_date: NaiveDate,
    pub label: SentimentLabel,
    pub score: f64,
    pub text: String,
    pub platform: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentSummary {
    pub department: String,
    pub total_complaints_last_year: u32,
    pub resolved_complaints: u32,
    pub pending_complaints: u32,
    pub avg_resolution_time_days: f64,
    pub avg_satisfaction_score: f64,
    pub total_employees: u32,
    pub efficiency_category: EfficiencyCategory,
}

/// The four base tables owned by the data store.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub complaints: Vec<Complaint>,
    pub employees: Vec<Employee>,
    pub sentiment: Vec<SentimentPost>,
    pub departments: Vec<DepartmentSummary>,
}

/// Column a complaint subset can be grouped or enumerated by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupColumn {
    Department,
    District,
}

impl GroupColumn {
    pub fn key<'a>(&self, complaint: &'a Complaint) -> &'a str {
        match self {
            Self::Department => &complaint.department,
            Self::District => &complaint.district,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PerformanceCategory {
    Excellent,
    Good,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

// Display icons are kept apart from the thresholds in `metrics`.
static CATEGORY_ICONS: Lazy<HashMap<PerformanceCategory, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (PerformanceCategory::Excellent, "🏆"),
        (PerformanceCategory::Good, "👍"),
        (PerformanceCategory::NeedsImprovement, "⚠️"),
    ])
});

impl PerformanceCategory {
    pub fn icon(&self) -> &'static str {
        CATEGORY_ICONS.get(self).copied().unwrap_or("")
    }
}

impl fmt::Display for PerformanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::NeedsImprovement => "Needs Improvement",
        };
        f.write_str(s)
    }
}

fn fmt2(v: &f64) -> String {
    format_number(*v, 2)
}

fn fmt3(v: &f64) -> String {
    format_number(*v, 3)
}

/// One ranked row of a department or district performance table.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct GroupPerformance {
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[tabled(rename = "Group")]
    pub group: String,
    #[tabled(rename = "Complaints")]
    pub total_complaints: usize,
    #[tabled(rename = "AvgSatisfaction", display_with = "fmt2")]
    pub avg_satisfaction: f64,
    #[tabled(rename = "AvgResolutionDays", display_with = "fmt2")]
    pub avg_resolution_time: f64,
    #[tabled(rename = "EfficiencyScore", display_with = "fmt3")]
    pub efficiency_score: f64,
    #[tabled(rename = "Category")]
    pub performance_category: PerformanceCategory,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct KpiMetrics {
    pub total_complaints: usize,
    pub resolved_complaints: usize,
    pub resolution_rate: f64,
    pub avg_satisfaction: f64,
    pub avg_resolution_time: f64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct MonthlyTrend {
    #[tabled(rename = "Month")]
    pub month: String,
    #[tabled(rename = "Complaints")]
    pub complaint_count: usize,
    #[tabled(rename = "AvgSatisfaction", display_with = "fmt2")]
    pub avg_satisfaction: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct ComplaintPatterns {
    pub category_distribution: Vec<(String, usize)>,
    pub satisfaction_distribution: Vec<(u8, usize)>,
    pub monthly_trends: Vec<MonthlyTrend>,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct DepartmentSentiment {
    #[tabled(rename = "Department")]
    pub department: String,
    #[tabled(rename = "Sentiment")]
    pub sentiment: SentimentLabel,
    #[tabled(rename = "Posts")]
    pub count: usize,
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct SentimentAnalysis {
    pub total_posts: usize,
    /// Share of posts labelled Positive, in percent (1 decimal).
    pub positive_rate: f64,
    pub negative_rate: f64,
    pub distribution: Vec<(SentimentLabel, usize)>,
    pub by_department: Vec<DepartmentSentiment>,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct ActionItem {
    #[tabled(rename = "Priority")]
    pub priority: Priority,
    #[tabled(rename = "Action")]
    pub action: String,
    #[tabled(rename = "Timeline")]
    pub timeline: String,
    #[tabled(rename = "ExpectedImpact")]
    pub expected_impact: Priority,
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct Insights {
    pub key_findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub action_items: Vec<ActionItem>,
}

/// Closed date interval `[start, end]`.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DataSummary {
    pub complaints_count: usize,
    pub employees_count: usize,
    pub sentiment_posts: usize,
    pub departments_count: usize,
    pub date_range: Option<DateRange>,
}
