//! Spreadsheet downloads: the submissions CSV export and the printable
//! per-record summary.

use chrono::{NaiveDateTime, Utc};
use thiserror::Error;

use crate::domain::submission::Submission;
use crate::dto::submissions::{format_date_value, format_field_label};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadFormat {
    Csv,
    Xlsx,
}

impl TryFrom<&str> for DownloadFormat {
    type Error = DownloadError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            other => Err(DownloadError::InvalidFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DownloadFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("invalid download format: {0}")]
    InvalidFormat(String),
    #[error("failed to render csv")]
    CsvRender,
    #[error("failed to render xlsx")]
    XlsxRender,
}

pub fn render_download_file(
    base_name: &str,
    format: DownloadFormat,
    headers: &[&str],
    rows: &[Vec<String>],
) -> Result<DownloadFile, DownloadError> {
    match format {
        DownloadFormat::Csv => {
            let mut writer = csv::Writer::from_writer(vec![]);
            writer
                .write_record(headers)
                .map_err(|_| DownloadError::CsvRender)?;
            for row in rows {
                let escaped_row: Vec<String> =
                    row.iter().map(|value| escape_csv_cell(value)).collect();
                writer
                    .write_record(&escaped_row)
                    .map_err(|_| DownloadError::CsvRender)?;
            }
            let bytes = writer.into_inner().map_err(|_| DownloadError::CsvRender)?;
            Ok(DownloadFile {
                file_name: format!("{base_name}.csv"),
                content_type: "text/csv; charset=utf-8",
                bytes,
            })
        }
        DownloadFormat::Xlsx => {
            let mut workbook = rust_xlsxwriter::Workbook::new();
            let worksheet = workbook.add_worksheet();

            for (col_idx, header) in headers.iter().enumerate() {
                worksheet
                    .write_string(0, col_idx as u16, *header)
                    .map_err(|_| DownloadError::XlsxRender)?;
            }

            for (row_idx, row) in rows.iter().enumerate() {
                let sheet_row = (row_idx + 1) as u32;
                for (col_idx, value) in row.iter().enumerate() {
                    worksheet
                        .write_string(sheet_row, col_idx as u16, value)
                        .map_err(|_| DownloadError::XlsxRender)?;
                }
            }

            let bytes = workbook
                .save_to_buffer()
                .map_err(|_| DownloadError::XlsxRender)?;
            Ok(DownloadFile {
                file_name: format!("{base_name}.xlsx"),
                content_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                bytes,
            })
        }
    }
}

fn escape_csv_cell(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some('=' | '+' | '-' | '@') => format!("'{value}"),
        _ => value.to_string(),
    }
}

fn format_timestamp(value: Option<NaiveDateTime>) -> String {
    value
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Render the dashboard export: one row per submission, with the full JSON
/// serialization in the trailing `Details` column.
pub fn submissions_export(submissions: &[Submission]) -> Result<DownloadFile, DownloadError> {
    let rows = submissions
        .iter()
        .map(|submission| {
            let details =
                serde_json::to_string(submission).map_err(|_| DownloadError::CsvRender)?;
            Ok(vec![
                submission.form_type().formatted_name().to_string(),
                format_timestamp(submission.created_at),
                submission.display_name(),
                submission.status.as_str().to_string(),
                details,
            ])
        })
        .collect::<Result<Vec<_>, DownloadError>>()?;

    let base_name = format!("submissions_{}", Utc::now().format("%Y-%m-%dT%H:%M:%SZ"));
    render_download_file(
        &base_name,
        DownloadFormat::Csv,
        &["Form Type", "Submitted At", "Name/Title", "Status", "Details"],
        &rows,
    )
}

/// Render the printable field/value summary for one submission.
///
/// Identity and audit columns appear as fixed header rows; uploaded documents
/// are left out entirely.
pub fn submission_summary(
    submission: &Submission,
    format: DownloadFormat,
) -> Result<DownloadFile, DownloadError> {
    let mut rows = vec![
        vec![
            "Form Type".to_string(),
            submission.form_type().label().to_string(),
        ],
        vec!["Name/Title".to_string(), submission.display_name()],
        vec![
            "Status".to_string(),
            submission.status.as_str().to_string(),
        ],
        vec![
            "Submitted At".to_string(),
            format_timestamp(submission.created_at),
        ],
    ];
    for field in submission.details.fields() {
        let value = match &field.value {
            Some(value) if field.is_date => format_date_value(value),
            Some(value) => value.clone(),
            None => "N/A".to_string(),
        };
        rows.push(vec![format_field_label(field.key), value]);
    }

    let base_name = format!(
        "{}_{}_summary",
        submission.form_type().as_str(),
        submission.id
    );
    render_download_file(&base_name, format, &["Field", "Value"], &rows)
}
