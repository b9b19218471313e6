// Entry point and high-level CLI flow.
//
// Loads the four CSV tables once, applies the department/district/date
// selection from the command line, and prints every analysis as markdown
// tables. With `--export-dir` the same results are also written as CSV and
// JSON files.
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use gov_service_analytics::config::DataSources;
use gov_service_analytics::filter::{self, FilterSelection, FilteredData};
use gov_service_analytics::insights::generate_insights;
use gov_service_analytics::metrics;
use gov_service_analytics::output;
use gov_service_analytics::store::DataStore;
use gov_service_analytics::types::{
    DataSummary, DateRange, GroupPerformance, Insights, KpiMetrics,
};
use gov_service_analytics::util::{format_int, format_number};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "gov-analytics",
    about = "Government service efficiency and citizen satisfaction report",
    version
)]
struct Cli {
    /// Directory containing the four input CSV files
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,
    /// Override the complaints file
    #[arg(long)]
    complaints: Option<PathBuf>,
    /// Override the employee performance file
    #[arg(long)]
    employees: Option<PathBuf>,
    /// Override the social media sentiment file
    #[arg(long)]
    sentiment: Option<PathBuf>,
    /// Override the department summary file
    #[arg(long)]
    departments_file: Option<PathBuf>,
    /// Restrict to a department (repeatable; none means all)
    #[arg(long = "department")]
    departments: Vec<String>,
    /// Restrict to a district (repeatable; none means all)
    #[arg(long = "district")]
    districts: Vec<String>,
    /// First day of the date range (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date, requires = "to")]
    from: Option<NaiveDate>,
    /// Last day of the date range, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date, requires = "from")]
    to: Option<NaiveDate>,
    /// Write CSV/JSON exports into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,
    /// Rows shown per table preview
    #[arg(long, default_value_t = 10)]
    preview_rows: usize,
}

impl Cli {
    fn sources(&self) -> DataSources {
        let mut sources = DataSources::from_dir(&self.data_dir);
        if let Some(p) = &self.complaints {
            sources.complaints = p.clone();
        }
        if let Some(p) = &self.employees {
            sources.employees = p.clone();
        }
        if let Some(p) = &self.sentiment {
            sources.sentiment = p.clone();
        }
        if let Some(p) = &self.departments_file {
            sources.departments = p.clone();
        }
        sources
    }

    fn selection(&self) -> FilterSelection {
        let date_range = match (self.from, self.to) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)),
            _ => None,
        };
        FilterSelection::new(self.departments.clone(), self.districts.clone(), date_range)
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{value}': {e}"))
}

/// Everything written to `summary.json`.
#[derive(Serialize)]
struct ReportSummary<'a> {
    data: &'a DataSummary,
    selection: SelectionSummary<'a>,
    kpis: &'a KpiMetrics,
    insights: &'a Insights,
}

#[derive(Serialize)]
struct SelectionSummary<'a> {
    departments: Vec<&'a str>,
    districts: Vec<&'a str>,
    date_range: Option<DateRange>,
}

fn print_overview(summary: &DataSummary) {
    println!("Dataset Overview");
    println!(
        "Complaints: {} | Employees: {} | Social Posts: {} | Departments: {}",
        format_int(summary.complaints_count),
        format_int(summary.employees_count),
        format_int(summary.sentiment_posts),
        format_int(summary.departments_count)
    );
    if let Some(range) = summary.date_range {
        println!("Complaint dates: {} to {}", range.start, range.end);
    }
    println!();
}

fn print_kpis(k: &KpiMetrics) {
    println!("Key Performance Indicators\n");
    println!(
        "Total Complaints:   {} ({} resolved)",
        format_int(k.total_complaints),
        format_int(k.resolved_complaints)
    );
    println!(
        "Resolution Rate:    {}% ({})",
        format_number(k.resolution_rate, 1),
        if k.resolution_target_met() {
            "meets target"
        } else {
            "below target"
        }
    );
    println!(
        "Satisfaction:       {}/5 ({} rating)",
        format_number(k.avg_satisfaction, 1),
        k.satisfaction_rating()
    );
    println!(
        "Avg Resolution:     {} days ({})\n",
        format_number(k.avg_resolution_time, 1),
        if k.resolution_time_target_met() {
            "within target"
        } else {
            "exceeds target"
        }
    );
}

fn print_ranking(title: &str, rows: &[GroupPerformance], max_rows: usize) {
    output::preview_table(title, Some("ranked by efficiency score"), rows, max_rows);
    for r in rows.iter().take(max_rows) {
        println!(
            "{} #{} {}: {}",
            r.performance_category.icon(),
            r.rank,
            r.group,
            r.performance_category
        );
    }
    println!();
}

fn print_insights(insights: &Insights) {
    println!("Key Findings\n");
    for f in &insights.key_findings {
        println!("- {f}");
    }
    println!("\nRecommendations\n");
    for (i, r) in insights.recommendations.iter().enumerate() {
        println!("{}. {r}", i + 1);
    }
    println!();
    output::preview_table(
        "Action Items",
        None,
        &insights.action_items,
        insights.action_items.len(),
    );
}

fn export(dir: &Path, data: &FilteredData, summary: ReportSummary<'_>) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating export directory {}", dir.display()))?;
    let patterns = metrics::complaint_patterns(&data.complaints);
    let sentiment = metrics::sentiment_analysis(&data.sentiment);

    output::write_csv(
        &dir.join("department_analysis.csv"),
        &metrics::department_analysis(&data.complaints),
    )?;
    output::write_csv(
        &dir.join("regional_analysis.csv"),
        &metrics::regional_analysis(&data.complaints),
    )?;
    output::write_csv(&dir.join("monthly_trends.csv"), &patterns.monthly_trends)?;
    output::write_csv(
        &dir.join("department_sentiment.csv"),
        &sentiment.by_department,
    )?;
    output::write_csv(&dir.join("action_items.csv"), &summary.insights.action_items)?;
    output::write_json(&dir.join("summary.json"), &summary)?;
    log::info!("exports written to {}", dir.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut store = DataStore::new(cli.sources());
    let (loaded, message) = store.load();
    if !loaded {
        bail!("{message}");
    }
    let Some(data_summary) = store.summary() else {
        bail!("data store reported success but holds no data");
    };
    print_overview(&data_summary);

    let selection = cli.selection();
    let Some(data) = filter::filter(&store, &selection) else {
        bail!("data store is not loaded");
    };
    let rows = cli.preview_rows;

    let k = metrics::kpis(&data.complaints);
    print_kpis(&k);

    let departments = metrics::department_analysis(&data.complaints);
    print_ranking("Department Performance Ranking", &departments, rows);

    let regions = metrics::regional_analysis(&data.complaints);
    output::preview_table("Regional Performance", None, &regions, rows);

    let patterns = metrics::complaint_patterns(&data.complaints);
    output::preview_pairs(
        "Complaint Categories",
        ("Category", "Count"),
        &patterns.category_distribution,
    );
    output::preview_pairs(
        "Satisfaction Scores",
        ("Score", "Count"),
        &patterns.satisfaction_distribution,
    );
    output::preview_table("Monthly Trends", None, &patterns.monthly_trends, rows);

    let sentiment = metrics::sentiment_analysis(&data.sentiment);
    println!(
        "Total Posts: {} | Positive Rate: {}% | Negative Rate: {}%\n",
        format_int(sentiment.total_posts),
        format_number(sentiment.positive_rate, 1),
        format_number(sentiment.negative_rate, 1)
    );
    output::preview_pairs(
        "Social Media Sentiment",
        ("Sentiment", "Posts"),
        &sentiment.distribution,
    );
    output::preview_table("Sentiment by Department", None, &sentiment.by_department, rows);

    let insights = generate_insights(&data.complaints, &departments);
    print_insights(&insights);

    if let Some(dir) = &cli.export_dir {
        let summary = ReportSummary {
            data: &data_summary,
            selection: SelectionSummary {
                departments: selection.departments.iter().map(String::as_str).collect(),
                districts: selection.districts.iter().map(String::as_str).collect(),
                date_range: selection.date_range,
            },
            kpis: &k,
            insights: &insights,
        };
        export(dir, &data, summary)?;
        println!("(Full tables exported to {})", dir.display());
    }
    Ok(())
}
