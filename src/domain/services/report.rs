use crate::domain::{models::attendance::AttendanceDetail, ports::AttendanceRepository};
use crate::error::AppError;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use tera::{Context, Tera};

pub const REPORT_TEMPLATE: &str = "attendance_report.html";

/// Loads the templates used by the printable report.
pub fn templates() -> Result<Tera, AppError> {
    let mut tera = Tera::default();
    tera.add_raw_template(REPORT_TEMPLATE, include_str!("../../templates/attendance_report.html"))
        .map_err(|e| AppError::Internal(format!("Failed to load report template: {}", e)))?;
    Ok(tera)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Html,
    Csv,
}

impl FromStr for ReportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(ReportFormat::Html),
            "csv" => Ok(ReportFormat::Csv),
            other => Err(AppError::Validation(format!("Unsupported report format '{}'", other))),
        }
    }
}

impl ReportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Html => "text/html; charset=utf-8",
            ReportFormat::Csv => "text/csv; charset=utf-8",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Csv => "csv",
        }
    }
}

/// Records of one event, in the order they were listed.
#[derive(Debug)]
pub struct EventGroup<'a> {
    pub event_id: i64,
    pub event_name: &'a str,
    pub attendees: Vec<&'a AttendanceDetail>,
}

/// Groups records by event. Events appear in first-seen order and each
/// group keeps the input order of its records.
pub fn group_by_event(records: &[AttendanceDetail]) -> Vec<EventGroup<'_>> {
    let mut groups: Vec<EventGroup<'_>> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for record in records {
        let slot = *index.entry(record.event_id).or_insert_with(|| {
            groups.push(EventGroup {
                event_id: record.event_id,
                event_name: &record.event_name,
                attendees: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].attendees.push(record);
    }

    groups
}

pub fn attendance_type(is_online: bool) -> &'static str {
    if is_online { "Online" } else { "In-Person" }
}

/// Renders a timestamp the way an en-US viewer in `tz` reads it.
pub fn format_timestamp(ts: DateTime<Utc>, tz: Tz) -> String {
    ts.with_timezone(&tz).format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

#[derive(Debug)]
pub struct RenderedReport {
    pub file_name: String,
    pub body: String,
}

/// Renders `records` as a printable document or a CSV export.
///
/// Returns `AppError::NothingToExport` for an empty record set.
pub fn render(
    tera: &Tera,
    records: &[AttendanceDetail],
    format: ReportFormat,
    tz: Tz,
    generated_at: DateTime<Utc>,
) -> Result<RenderedReport, AppError> {
    if records.is_empty() {
        return Err(AppError::NothingToExport);
    }

    let body = match format {
        ReportFormat::Html => render_html(tera, records, tz, generated_at)?,
        ReportFormat::Csv => render_csv(records, tz)?,
    };

    Ok(RenderedReport {
        file_name: format!(
            "attendance-report-{}.{}",
            generated_at.with_timezone(&tz).format("%Y-%m-%d"),
            format.extension()
        ),
        body,
    })
}

/// Renders every attendance record and writes the report to `out`.
///
/// Nothing is written when there are no records; the caller gets
/// `AppError::NothingToExport` instead. Returns the number of records exported.
pub async fn write_report(
    repo: &dyn AttendanceRepository,
    tera: &Tera,
    format: ReportFormat,
    tz: Tz,
    out: &Path,
) -> Result<usize, AppError> {
    let records = repo.list().await?;
    let rendered = render(tera, &records, format, tz, Utc::now())?;

    tokio::fs::write(out, rendered.body.as_bytes())
        .await
        .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", out.display(), e)))?;

    Ok(records.len())
}

#[derive(Serialize)]
struct HtmlRow<'a> {
    seq: usize,
    person_name: &'a str,
    is_online: bool,
    attendance_type: &'static str,
    marked_at: String,
}

#[derive(Serialize)]
struct HtmlSection<'a> {
    event_name: &'a str,
    attendee_count: usize,
    rows: Vec<HtmlRow<'a>>,
}

fn render_html(
    tera: &Tera,
    records: &[AttendanceDetail],
    tz: Tz,
    generated_at: DateTime<Utc>,
) -> Result<String, AppError> {
    let sections: Vec<HtmlSection<'_>> = group_by_event(records)
        .into_iter()
        .map(|group| HtmlSection {
            event_name: group.event_name,
            attendee_count: group.attendees.len(),
            rows: group.attendees
                .iter()
                .enumerate()
                .map(|(i, r)| HtmlRow {
                    seq: i + 1,
                    person_name: &r.person_name,
                    is_online: r.is_online,
                    attendance_type: if r.is_online { "🌐 Online" } else { "👤 In-Person" },
                    marked_at: format_timestamp(r.marked_at, tz),
                })
                .collect(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("generated_on", &generated_at.with_timezone(&tz).format("%-m/%-d/%Y").to_string());
    context.insert("total", &records.len());
    context.insert("sections", &sections);

    tera.render(REPORT_TEMPLATE, &context)
        .map_err(|e| AppError::Internal(format!("Failed to render report: {}", e)))
}

fn render_csv(records: &[AttendanceDetail], tz: Tz) -> Result<String, AppError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(["Event", "Person", "Attendance Type", "Marked At"])
        .map_err(|e| AppError::Internal(e.to_string()))?;

    for group in group_by_event(records) {
        for r in group.attendees {
            wtr.write_record([
                r.event_name.as_str(),
                r.person_name.as_str(),
                attendance_type(r.is_online),
                format_timestamp(r.marked_at, tz).as_str(),
            ])
            .map_err(|e| AppError::Internal(e.to_string()))?;
        }
    }

    let bytes = wtr.into_inner().map_err(|e| AppError::Internal(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(e.to_string()))
}
