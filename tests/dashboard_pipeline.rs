use chrono::NaiveDate;
use gov_service_analytics::config::DataSources;
use gov_service_analytics::filter::{filter, FilterSelection};
use gov_service_analytics::insights::generate_insights;
use gov_service_analytics::metrics;
use gov_service_analytics::output;
use gov_service_analytics::store::DataStore;
use gov_service_analytics::types::{DateRange, GroupColumn, PerformanceCategory};
use std::fs;
use tempfile::TempDir;

// ── Test helpers ────────────────────────────────────────────────────────────

const COMPLAINTS: &str = "\
complaint_id,department,district,service_type,complaint_category,complaint_date,resolution_date,resolution_time_days,status,satisfaction_score,priority
C001,Health,Colombo,Clinic Appointment,Long Wait,2024-01-03,2024-01-05,2,Resolved,5,Medium
C002,Health,Kandy,Clinic Appointment,Staff Behaviour,2024-01-17,2024-01-21,4,Resolved,4,Low
C003,Transport,Colombo,License Renewal,Long Wait,2024-02-02,,25,Pending,1,High
C004,Transport,Galle,Vehicle Registration,Documentation,2024-02-14,2024-03-05,20,Resolved,2,Medium
C005,Education,Kandy,School Admission,Long Wait,2024-03-09,2024-03-19,10,Resolved,3,High
C006,Education,Galle,Exam Certificates,Documentation,2024-03-28,,15,Pending,3,Low
";

const EMPLOYEES: &str = "\
employee_id,department,district,cases_handled_per_day,avg_processing_time_minutes,attendance_rate_percent,protocol_violations,years_of_service,efficiency_rating
E001,Health,Colombo,14,22.5,97.1,0,9,4.4
E002,Transport,Galle,9,41.0,88.3,2,3,2.9
";

const SENTIMENT: &str = "\
post_id,department,district,post_date,sentiment_label,sentiment_score,sample_text,platform
P001,Health,Colombo,2024-01-04,Positive,0.8,Quick and friendly service,Facebook
P002,Transport,Colombo,2024-02-03,Negative,-0.7,Waited all day for a licence,Twitter
P003,Transport,Galle,2024-02-20,Negative,-0.4,Too many forms,Facebook
P004,Education,Kandy,2024-03-10,Neutral,0.0,Admission process was okay,Instagram
";

const DEPARTMENTS: &str = "\
department,total_complaints_last_year,resolved_complaints,pending_complaints,avg_resolution_time_days,avg_satisfaction_score,total_employees,efficiency_category
Health,1500,1350,150,4.2,4.1,120,High
Transport,2100,1400,700,18.5,2.3,95,Low
Education,900,700,200,9.8,3.2,80,Medium
";

fn write_dataset(dir: &TempDir) -> DataSources {
    let sources = DataSources::from_dir(dir.path());
    fs::write(&sources.complaints, COMPLAINTS).unwrap();
    fs::write(&sources.employees, EMPLOYEES).unwrap();
    fs::write(&sources.sentiment, SENTIMENT).unwrap();
    fs::write(&sources.departments, DEPARTMENTS).unwrap();
    sources
}

fn loaded_store(dir: &TempDir) -> DataStore {
    let mut store = DataStore::new(write_dataset(dir));
    let (ok, message) = store.load();
    assert!(ok, "load failed: {message}");
    store
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Unfiltered run over the whole fixture: KPIs, ranking and insights agree.
#[test]
fn full_dataset_report() {
    let dir = TempDir::new().unwrap();
    let store = loaded_store(&dir);
    let data = filter(&store, &FilterSelection::default()).unwrap();

    let k = metrics::kpis(&data.complaints);
    assert_eq!(k.total_complaints, 6);
    assert_eq!(k.resolved_complaints, 4);
    assert_eq!(k.resolution_rate, 66.7);
    assert_eq!(k.avg_satisfaction, 3.0);
    // (2 + 4 + 20 + 10) / 4 resolved
    assert_eq!(k.avg_resolution_time, 9.0);

    let depts = metrics::department_analysis(&data.complaints);
    let order: Vec<&str> = depts.iter().map(|d| d.group.as_str()).collect();
    assert_eq!(order, vec!["Health", "Education", "Transport"]);
    assert_eq!(depts[0].performance_category, PerformanceCategory::Excellent);
    assert_eq!(depts[2].performance_category, PerformanceCategory::NeedsImprovement);
    assert_eq!(depts[2].avg_resolution_time, 22.5);

    let insights = generate_insights(&data.complaints, &depts);
    assert!(insights
        .key_findings
        .contains(&"Most common complaint: Long Wait".to_string()));
    assert_eq!(
        insights.action_items[0].action,
        "Address performance issues in Transport"
    );
}

/// A department/district/date selection narrows both complaint and
/// sentiment subsets and the analyses follow.
#[test]
fn filtered_report() {
    let dir = TempDir::new().unwrap();
    let store = loaded_store(&dir);
    let selection = FilterSelection::new(
        ["Transport", "Education"],
        Vec::<String>::new(),
        Some(DateRange::new(date(2024, 2, 1), date(2024, 2, 29))),
    );
    let data = filter(&store, &selection).unwrap();

    let ids: Vec<&str> = data.complaints.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["C003", "C004"]);
    assert_eq!(data.sentiment.len(), 2);

    let regions = metrics::regional_analysis(&data.complaints);
    let groups: Vec<&str> = regions.iter().map(|r| r.group.as_str()).collect();
    assert_eq!(groups, vec!["Galle", "Colombo"]);

    let sentiment = metrics::sentiment_analysis(&data.sentiment);
    assert_eq!(sentiment.by_department.len(), 1);
    assert_eq!(sentiment.by_department[0].count, 2);
}

/// Selecting every known department and district returns every row.
#[test]
fn full_selection_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = loaded_store(&dir);
    let selection = FilterSelection::new(
        store.unique_values(GroupColumn::Department),
        store.unique_values(GroupColumn::District),
        None,
    );
    let data = filter(&store, &selection).unwrap();
    let base = store.datasets().unwrap();
    assert_eq!(data.complaints, base.complaints);
    assert_eq!(data.sentiment, base.sentiment);
}

/// A selection matching nothing produces empty, not failing, analyses.
#[test]
fn selection_matching_nothing_is_empty_everywhere() {
    let dir = TempDir::new().unwrap();
    let store = loaded_store(&dir);
    let data = filter(&store, &FilterSelection::new(["Fisheries"], ["Jaffna"], None)).unwrap();

    assert!(data.complaints.is_empty());
    assert_eq!(metrics::kpis(&data.complaints).resolution_rate, 0.0);
    assert!(metrics::department_analysis(&data.complaints).is_empty());
    assert!(metrics::complaint_patterns(&data.complaints)
        .category_distribution
        .is_empty());
    assert!(metrics::sentiment_analysis(&data.sentiment)
        .distribution
        .is_empty());
    assert!(generate_insights(&data.complaints, &[]).key_findings.is_empty());
}

/// Exports land on disk with one CSV row per ranked department.
#[test]
fn exports_department_ranking() {
    let dir = TempDir::new().unwrap();
    let store = loaded_store(&dir);
    let data = filter(&store, &FilterSelection::default()).unwrap();
    let depts = metrics::department_analysis(&data.complaints);

    let path = dir.path().join("department_analysis.csv");
    output::write_csv(&path, &depts).unwrap();
    let body = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("rank,group,total_complaints"));
    assert!(lines[1].starts_with("1,Health,2,"));
}

/// A malformed file reports the failure and leaves nothing loaded.
#[test]
fn malformed_input_fails_load() {
    let dir = TempDir::new().unwrap();
    let sources = write_dataset(&dir);
    fs::write(
        &sources.departments,
        DEPARTMENTS.replace("High\n", "Excellent-ish\n"),
    )
    .unwrap();

    let mut store = DataStore::new(sources);
    let (ok, message) = store.load();
    assert!(!ok);
    assert!(message.contains("efficiency_category"), "{message}");
    assert!(!store.is_loaded());
    assert!(filter(&store, &FilterSelection::default()).is_none());
}
