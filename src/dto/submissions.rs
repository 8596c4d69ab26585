//! Template-facing views of submissions.
//!
//! Raw column keys and timestamps are formatted here so the templates only
//! ever interpolate ready-made strings.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::submission::Submission;

/// Turn a snake_case column key into a human label, `first_name` becoming
/// `First Name`.
pub fn format_field_label(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format an ISO date string for display, passing through anything that
/// does not parse.
pub fn format_date_value(value: &str) -> String {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|date| date.format("%d %b %Y").to_string())
        .unwrap_or_else(|_| value.to_string())
}

fn format_timestamp(value: Option<NaiveDateTime>) -> String {
    value
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// One row of the submissions table.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRowDto {
    pub id: i32,
    pub form_type: String,
    pub form_label: String,
    pub display_name: String,
    pub status: String,
    pub approved: bool,
    pub submitted_at: String,
}

impl From<&Submission> for SubmissionRowDto {
    fn from(value: &Submission) -> Self {
        Self {
            id: value.id.get(),
            form_type: value.form_type().as_str().to_string(),
            form_label: value.form_type().formatted_name().to_string(),
            display_name: value.display_name(),
            status: value.status.as_str().to_string(),
            approved: value.is_approved(),
            submitted_at: format_timestamp(value.created_at),
        }
    }
}

/// One formatted field on the detail page.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDto {
    pub label: String,
    pub value: String,
}

/// One uploaded document link on the detail page.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentDto {
    pub label: String,
    pub url: String,
}

/// Full detail view of a single submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionDetailDto {
    pub id: i32,
    pub form_type: String,
    pub form_label: String,
    pub display_name: String,
    pub status: String,
    pub approved: bool,
    pub submitted_at: String,
    pub updated_at: String,
    pub fields: Vec<FieldDto>,
    pub documents: Vec<DocumentDto>,
}

impl From<&Submission> for SubmissionDetailDto {
    fn from(value: &Submission) -> Self {
        let fields = value
            .details
            .fields()
            .into_iter()
            .map(|field| FieldDto {
                label: format_field_label(field.key),
                value: match &field.value {
                    Some(v) if field.is_date => format_date_value(v),
                    Some(v) => v.clone(),
                    None => "N/A".to_string(),
                },
            })
            .collect();
        let documents = value
            .details
            .documents()
            .into_iter()
            .map(|doc| DocumentDto {
                label: format_field_label(doc.key),
                url: doc.url,
            })
            .collect();

        Self {
            id: value.id.get(),
            form_type: value.form_type().as_str().to_string(),
            form_label: value.form_type().formatted_name().to_string(),
            display_name: value.display_name(),
            status: value.status.as_str().to_string(),
            approved: value.is_approved(),
            submitted_at: format_timestamp(value.created_at),
            updated_at: format_timestamp(value.updated_at),
            fields,
            documents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::submission::{FormDetails, PassportDetails};
    use crate::domain::types::{SubmissionId, SubmissionStatus};
    use chrono::NaiveDate;

    #[test]
    fn field_labels_are_title_cased() {
        assert_eq!(format_field_label("first_name"), "First Name");
        assert_eq!(format_field_label("date_of_birth"), "Date Of Birth");
        assert_eq!(format_field_label("ghana_card"), "Ghana Card");
    }

    #[test]
    fn date_values_format_or_pass_through() {
        assert_eq!(format_date_value("1991-01-30"), "30 Jan 1991");
        assert_eq!(format_date_value("not a date"), "not a date");
    }

    #[test]
    fn detail_dto_splits_fields_and_documents() {
        let submission = Submission {
            id: SubmissionId::new(4).unwrap(),
            status: SubmissionStatus::Pending,
            created_at: NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0),
            updated_at: None,
            details: FormDetails::Passport(PassportDetails {
                first_name: "Esi".to_string(),
                surname: "Owusu".to_string(),
                date_of_birth: Some("1991-01-30".to_string()),
                ghana_card: Some("/files/passport_uploads/4_card.png".to_string()),
                ..Default::default()
            }),
        };

        let dto = SubmissionDetailDto::from(&submission);
        assert_eq!(dto.display_name, "Esi Owusu");
        assert!(dto.fields.iter().any(|f| f.value == "30 Jan 1991"));
        assert!(dto.fields.iter().all(|f| f.label != "Ghana Card"));
        assert_eq!(dto.documents.len(), 1);
        assert_eq!(dto.documents[0].label, "Ghana Card");
        assert_eq!(dto.updated_at, "N/A");
    }
}
