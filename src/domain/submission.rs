//! Intake submissions and their per-form payloads.
//!
//! Submissions are written by the public intake portal, so every free-form
//! field is carried as an optional plain string. Only the identifying name
//! fields are required; anything else may be missing from historic rows and
//! must render as "N/A" rather than fail.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{FormType, SubmissionId, SubmissionStatus};

/// A single field shown on the submission detail grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    /// Raw snake_case key the intake portal used.
    pub key: &'static str,
    pub value: Option<String>,
    /// Whether the value should be rendered as a calendar date.
    pub is_date: bool,
}

/// An uploaded document attached to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentField {
    pub key: &'static str,
    /// Public URL of the stored object.
    pub url: String,
}

/// Fields captured by a passport application.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PassportDetails {
    pub first_name: String,
    pub surname: String,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub place_of_birth: Option<String>,
    pub nationality: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub residential_address: Option<String>,
    /// URL of the uploaded Ghana Card scan.
    pub ghana_card: Option<String>,
    /// URL of the uploaded passport photo.
    pub passport_photo: Option<String>,
}

/// Fields captured by a birth certificate request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BirthCertificateDetails {
    pub first_name: String,
    pub surname: String,
    pub date_of_birth: Option<String>,
    pub place_of_birth: Option<String>,
    pub gender: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub phone_number: Option<String>,
    /// URL of the uploaded supporting document.
    pub supporting_document: Option<String>,
}

/// Fields captured by a company registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompanyDetails {
    pub business_name_1: String,
    pub business_name_2: Option<String>,
    pub business_name_3: Option<String>,
    pub nature_of_business: Option<String>,
    pub registered_address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub director_name: Option<String>,
    /// URL of the uploaded director identification document.
    pub director_id: Option<String>,
}

/// Fields captured by a sole proprietorship registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SoleProprietorshipDetails {
    pub business_name_1: String,
    pub owner_name: Option<String>,
    pub nature_of_business: Option<String>,
    pub business_address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    /// URL of the uploaded owner identification document.
    pub owner_id: Option<String>,
}

/// Form-specific payload of a submission, tagged by its table name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "form_type")]
pub enum FormDetails {
    #[serde(rename = "passport_applications")]
    Passport(PassportDetails),
    #[serde(rename = "birth_certificates")]
    BirthCertificate(BirthCertificateDetails),
    #[serde(rename = "company_applications")]
    Company(CompanyDetails),
    #[serde(rename = "sole_proprietorship_applications")]
    SoleProprietorship(SoleProprietorshipDetails),
}

fn field(key: &'static str, value: &Option<String>) -> DetailField {
    DetailField {
        key,
        value: value.clone(),
        is_date: key.contains("date"),
    }
}

fn required_field(key: &'static str, value: &str) -> DetailField {
    DetailField {
        key,
        value: Some(value.to_string()),
        is_date: false,
    }
}

fn document(key: &'static str, url: &Option<String>) -> Option<DocumentField> {
    url.as_ref().map(|url| DocumentField {
        key,
        url: url.clone(),
    })
}

impl FormDetails {
    /// Which form family this payload belongs to.
    pub const fn form_type(&self) -> FormType {
        match self {
            Self::Passport(_) => FormType::Passport,
            Self::BirthCertificate(_) => FormType::BirthCertificate,
            Self::Company(_) => FormType::Company,
            Self::SoleProprietorship(_) => FormType::SoleProprietorship,
        }
    }

    /// Name shown in listings: applicant for personal forms, first business
    /// name for registrations, "N/A" when nothing is filled in.
    pub fn display_name(&self) -> String {
        let name = match self {
            Self::Passport(d) => format!("{} {}", d.first_name, d.surname),
            Self::BirthCertificate(d) => format!("{} {}", d.first_name, d.surname),
            Self::Company(d) => d.business_name_1.clone(),
            Self::SoleProprietorship(d) => d.business_name_1.clone(),
        };
        let name = name.trim();
        if name.is_empty() {
            "N/A".to_string()
        } else {
            name.to_string()
        }
    }

    /// Non-document fields in intake order, for the detail grid.
    pub fn fields(&self) -> Vec<DetailField> {
        match self {
            Self::Passport(d) => vec![
                required_field("first_name", &d.first_name),
                required_field("surname", &d.surname),
                field("date_of_birth", &d.date_of_birth),
                field("gender", &d.gender),
                field("place_of_birth", &d.place_of_birth),
                field("nationality", &d.nationality),
                field("phone_number", &d.phone_number),
                field("email", &d.email),
                field("residential_address", &d.residential_address),
            ],
            Self::BirthCertificate(d) => vec![
                required_field("first_name", &d.first_name),
                required_field("surname", &d.surname),
                field("date_of_birth", &d.date_of_birth),
                field("place_of_birth", &d.place_of_birth),
                field("gender", &d.gender),
                field("father_name", &d.father_name),
                field("mother_name", &d.mother_name),
                field("phone_number", &d.phone_number),
            ],
            Self::Company(d) => vec![
                required_field("business_name_1", &d.business_name_1),
                field("business_name_2", &d.business_name_2),
                field("business_name_3", &d.business_name_3),
                field("nature_of_business", &d.nature_of_business),
                field("registered_address", &d.registered_address),
                field("phone_number", &d.phone_number),
                field("email", &d.email),
                field("director_name", &d.director_name),
            ],
            Self::SoleProprietorship(d) => vec![
                required_field("business_name_1", &d.business_name_1),
                field("owner_name", &d.owner_name),
                field("nature_of_business", &d.nature_of_business),
                field("business_address", &d.business_address),
                field("phone_number", &d.phone_number),
                field("email", &d.email),
            ],
        }
    }

    /// Uploaded documents attached to this submission.
    pub fn documents(&self) -> Vec<DocumentField> {
        match self {
            Self::Passport(d) => [
                document("ghana_card", &d.ghana_card),
                document("passport_photo", &d.passport_photo),
            ]
            .into_iter()
            .flatten()
            .collect(),
            Self::BirthCertificate(d) => document("supporting_document", &d.supporting_document)
                .into_iter()
                .collect(),
            Self::Company(d) => document("director_id", &d.director_id).into_iter().collect(),
            Self::SoleProprietorship(d) => {
                document("owner_id", &d.owner_id).into_iter().collect()
            }
        }
    }
}

/// A normalized intake submission as the console works with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Submission {
    pub id: SubmissionId,
    pub status: SubmissionStatus,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub details: FormDetails,
}

impl Submission {
    pub fn form_type(&self) -> FormType {
        self.details.form_type()
    }

    pub fn display_name(&self) -> String {
        self.details.display_name()
    }

    pub fn is_approved(&self) -> bool {
        self.status.is_approved()
    }

    /// Timestamp used for ordering and last-write-wins comparisons.
    ///
    /// Rows without any timestamp sort as the oldest possible entry.
    pub fn sort_key(&self) -> Option<NaiveDateTime> {
        self.updated_at.or(self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::SubmissionId;
    use chrono::NaiveDate;

    fn sample_passport() -> Submission {
        Submission {
            id: SubmissionId::new(1).unwrap(),
            status: SubmissionStatus::Pending,
            created_at: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0),
            updated_at: None,
            details: FormDetails::Passport(PassportDetails {
                first_name: "Ama".to_string(),
                surname: "Mensah".to_string(),
                date_of_birth: Some("1990-04-12".to_string()),
                ghana_card: Some("/files/passport_uploads/1_card.png".to_string()),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn display_name_joins_applicant_names() {
        assert_eq!(sample_passport().display_name(), "Ama Mensah");
    }

    #[test]
    fn display_name_falls_back_to_na() {
        let details = FormDetails::Company(CompanyDetails {
            business_name_1: "   ".to_string(),
            ..Default::default()
        });
        assert_eq!(details.display_name(), "N/A");
    }

    #[test]
    fn sort_key_prefers_updated_at() {
        let mut submission = sample_passport();
        assert_eq!(submission.sort_key(), submission.created_at);
        let updated = NaiveDate::from_ymd_opt(2024, 3, 2)
            .unwrap()
            .and_hms_opt(10, 0, 0);
        submission.updated_at = updated;
        assert_eq!(submission.sort_key(), updated);
    }

    #[test]
    fn documents_skip_missing_uploads() {
        let docs = sample_passport().details.documents();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].key, "ghana_card");
    }

    #[test]
    fn date_fields_are_flagged_for_formatting() {
        let fields = sample_passport().details.fields();
        let dob = fields
            .iter()
            .find(|f| f.key == "date_of_birth")
            .expect("passport payload has a date of birth field");
        assert!(dob.is_date);
        assert!(!fields[0].is_date);
    }

    #[test]
    fn serialized_submission_carries_form_type_tag() {
        let json = serde_json::to_value(sample_passport()).unwrap();
        assert_eq!(json["form_type"], "passport_applications");
        assert_eq!(json["first_name"], "Ama");
        assert_eq!(json["status"], "pending");
    }
}
