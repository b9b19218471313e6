use crate::config::DataSources;
use crate::error::{LoadError, LoadResult};
use crate::types::{
    Complaint, DepartmentSummary, Datasets, Employee, RawComplaintRow, RawDepartmentRow,
    RawEmployeeRow, RawSentimentRow, SentimentPost,
};
use crate::util::{non_blank, parse_date_safe, parse_f64_safe, parse_u32_safe};
use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::str::FromStr;

pub const COMPLAINT_COLUMNS: &[&str] = &[
    "complaint_id",
    "department",
    "district",
    "service_type",
    "complaint_date",
    "resolution_date",
    "resolution_time_days",
    "status",
    "satisfaction_score",
    "priority",
];

pub const EMPLOYEE_COLUMNS: &[&str] = &[
    "employee_id",
    "department",
    "district",
    "cases_handled_per_day",
    "avg_processing_time_minutes",
    "attendance_rate_percent",
    "protocol_violations",
    "years_of_service",
    "efficiency_rating",
];

pub const SENTIMENT_COLUMNS: &[&str] = &[
    "post_id",
    "department",
    "district",
    "post_date",
    "sentiment_label",
    "sentiment_score",
    "sample_text",
    "platform",
];

pub const DEPARTMENT_COLUMNS: &[&str] = &[
    "department",
    "total_complaints_last_year",
    "resolved_complaints",
    "pending_complaints",
    "avg_resolution_time_days",
    "avg_satisfaction_score",
    "total_employees",
    "efficiency_category",
];

/// Position of a data row, used to build field-level errors.
struct RowCtx<'a> {
    path: &'a Path,
    line: u64,
}

impl RowCtx<'_> {
    fn text(&self, field: &'static str, value: Option<String>) -> LoadResult<String> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
            _ => Err(LoadError::MissingField {
                path: self.path.to_path_buf(),
                line: self.line,
                field,
            }),
        }
    }

    fn parse<T>(
        &self,
        field: &'static str,
        value: Option<&str>,
        parser: impl Fn(Option<&str>) -> Option<T>,
    ) -> LoadResult<T> {
        let Some(raw) = non_blank(value) else {
            return Err(LoadError::MissingField {
                path: self.path.to_path_buf(),
                line: self.line,
                field,
            });
        };
        parser(Some(raw)).ok_or_else(|| LoadError::InvalidField {
            path: self.path.to_path_buf(),
            line: self.line,
            field,
            value: raw.to_string(),
        })
    }

    fn enum_value<T: FromStr>(&self, field: &'static str, value: Option<&str>) -> LoadResult<T> {
        self.parse(field, value, |s| s.and_then(|s| s.parse::<T>().ok()))
    }

    fn optional_date(
        &self,
        field: &'static str,
        value: Option<&str>,
    ) -> LoadResult<Option<chrono::NaiveDate>> {
        match non_blank(value) {
            None => Ok(None),
            Some(_) => self.parse(field, value, parse_date_safe).map(Some),
        }
    }
}

/// Read every row of `path` as `R`, converting each into a clean record.
///
/// Any failure aborts the whole file: a half-read table is never returned.
fn read_table<R, T>(
    path: &Path,
    required: &[&'static str],
    convert: impl Fn(R, &RowCtx<'_>) -> LoadResult<T>,
) -> LoadResult<Vec<T>>
where
    R: DeserializeOwned,
{
    let csv_err = |source: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(csv_err)?;

    let headers = rdr.headers().map_err(csv_err)?.clone();
    for &column in required {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let mut out = Vec::new();
    for (idx, result) in rdr.deserialize::<R>().enumerate() {
        let row = result.map_err(csv_err)?;
        // Header occupies line 1.
        let ctx = RowCtx {
            path,
            line: idx as u64 + 2,
        };
        out.push(convert(row, &ctx)?);
    }
    Ok(out)
}

pub fn load_complaints(path: &Path) -> LoadResult<Vec<Complaint>> {
    read_table(path, COMPLAINT_COLUMNS, |row: RawComplaintRow, ctx| {
        Ok(Complaint {
            id: ctx.text("complaint_id", row.complaint_id)?,
            department: ctx.text("department", row.department)?,
            district: ctx.text("district", row.district)?,
            service_type: ctx.text("service_type", row.service_type)?,
            category: row
                .complaint_category
                .as_deref()
                .and_then(|c| non_blank(Some(c)))
                .map(str::to_string),
            complaint_date: ctx.parse(
                "complaint_date",
                row.complaint_date.as_deref(),
                parse_date_safe,
            )?,
            resolution_date: ctx.optional_date("resolution_date", row.resolution_date.as_deref())?,
            resolution_time_days: ctx.parse(
                "resolution_time_days",
                row.resolution_time_days.as_deref(),
                parse_u32_safe,
            )?,
            status: ctx.enum_value("status", row.status.as_deref())?,
            satisfaction_score: ctx.parse(
                "satisfaction_score",
                row.satisfaction_score.as_deref(),
                |s| parse_u32_safe(s).filter(|v| (1..=5).contains(v)).map(|v| v as u8),
            )?,
            priority: ctx.enum_value("priority", row.priority.as_deref())?,
        })
    })
}

pub fn load_employees(path: &Path) -> LoadResult<Vec<Employee>> {
    read_table(path, EMPLOYEE_COLUMNS, |row: RawEmployeeRow, ctx| {
        Ok(Employee {
            id: ctx.text("employee_id", row.employee_id)?,
            department: ctx.text("department", row.department)?,
            district: ctx.text("district", row.district)?,
            cases_handled_per_day: ctx.parse(
                "cases_handled_per_day",
                row.cases_handled_per_day.as_deref(),
                parse_f64_safe,
            )?,
            avg_processing_time_minutes: ctx.parse(
                "avg_processing_time_minutes",
                row.avg_processing_time_minutes.as_deref(),
                parse_f64_safe,
            )?,
            attendance_rate_percent: ctx.parse(
                "attendance_rate_percent",
                row.attendance_rate_percent.as_deref(),
                parse_f64_safe,
            )?,
            protocol_violations: ctx.parse(
                "protocol_violations",
                row.protocol_violations.as_deref(),
                parse_u32_safe,
            )?,
            years_of_service: ctx.parse(
                "years_of_service",
                row.years_of_service.as_deref(),
                parse_u32_safe,
            )?,
            efficiency_rating: ctx.parse(
                "efficiency_rating",
                row.efficiency_rating.as_deref(),
                parse_f64_safe,
            )?,
        })
    })
}

pub fn load_sentiment(path: &Path) -> LoadResult<Vec<SentimentPost>> {
    read_table(path, SENTIMENT_COLUMNS, |row: RawSentimentRow, ctx| {
        Ok(SentimentPost {
            id: ctx.text("post_id", row.post_id)?,
            department: ctx.text("department", row.department)?,
            district: ctx.text("district", row.district)?,
            post_date: ctx.parse("post_date", row.post_date.as_deref(), parse_date_safe)?,
            label: ctx.enum_value("sentiment_label", row.sentiment_label.as_deref())?,
            score: ctx.parse("sentiment_score", row.sentiment_score.as_deref(), |s| {
                parse_f64_safe(s).filter(|v| (-1.0..=1.0).contains(v))
            })?,
            text: row.sample_text.unwrap_or_default(),
            platform: ctx.text("platform", row.platform)?,
        })
    })
}

pub fn load_departments(path: &Path) -> LoadResult<Vec<DepartmentSummary>> {
    read_table(path, DEPARTMENT_COLUMNS, |row: RawDepartmentRow, ctx| {
        Ok(DepartmentSummary {
            department: ctx.text("department", row.department)?,
            total_complaints_last_year: ctx.parse(
                "total_complaints_last_year",
                row.total_complaints_last_year.as_deref(),
                parse_u32_safe,
            )?,
            resolved_complaints: ctx.parse(
                "resolved_complaints",
                row.resolved_complaints.as_deref(),
                parse_u32_safe,
            )?,
            pending_complaints: ctx.parse(
                "pending_complaints",
                row.pending_complaints.as_deref(),
                parse_u32_safe,
            )?,
            avg_resolution_time_days: ctx.parse(
                "avg_resolution_time_days",
                row.avg_resolution_time_days.as_deref(),
                parse_f64_safe,
            )?,
            avg_satisfaction_score: ctx.parse(
                "avg_satisfaction_score",
                row.avg_satisfaction_score.as_deref(),
                parse_f64_safe,
            )?,
            total_employees: ctx.parse(
                "total_employees",
                row.total_employees.as_deref(),
                parse_u32_safe,
            )?,
            efficiency_category: ctx
                .enum_value("efficiency_category", row.efficiency_category.as_deref())?,
        })
    })
}

/// Load all four tables in order. The first failing file aborts the rest.
pub fn load_all(sources: &DataSources) -> LoadResult<Datasets> {
    let complaints = load_complaints(&sources.complaints)?;
    let employees = load_employees(&sources.employees)?;
    let sentiment = load_sentiment(&sources.sentiment)?;
    let departments = load_departments(&sources.departments)?;
    Ok(Datasets {
        complaints,
        employees,
        sentiment,
        departments,
    })
}
