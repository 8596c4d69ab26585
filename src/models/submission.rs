//! Diesel models for the four intake tables.
//!
//! Each table maps into the shared [`Submission`] domain type; the only way
//! conversion can fail is a non-positive identifier, so every row the intake
//! portal ever wrote normalizes cleanly.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::submission::{
    BirthCertificateDetails, CompanyDetails, FormDetails, PassportDetails,
    SoleProprietorshipDetails, Submission,
};
use crate::domain::types::{SubmissionStatus, TypeConstraintError};

/// Diesel model representing the `passport_applications` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::passport_applications)]
pub struct PassportApplication {
    pub id: i32,
    pub first_name: String,
    pub surname: String,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub place_of_birth: Option<String>,
    pub nationality: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub residential_address: Option<String>,
    pub ghana_card: Option<String>,
    pub passport_photo: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Diesel model representing the `birth_certificates` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::birth_certificates)]
pub struct BirthCertificate {
    pub id: i32,
    pub first_name: String,
    pub surname: String,
    pub date_of_birth: Option<String>,
    pub place_of_birth: Option<String>,
    pub gender: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub phone_number: Option<String>,
    pub supporting_document: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Diesel model representing the `company_applications` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::company_applications)]
pub struct CompanyApplication {
    pub id: i32,
    pub business_name_1: String,
    pub business_name_2: Option<String>,
    pub business_name_3: Option<String>,
    pub nature_of_business: Option<String>,
    pub registered_address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub director_name: Option<String>,
    pub director_id: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Diesel model representing the `sole_proprietorship_applications` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::sole_proprietorship_applications)]
pub struct SoleProprietorshipApplication {
    pub id: i32,
    pub business_name_1: String,
    pub owner_name: Option<String>,
    pub nature_of_business: Option<String>,
    pub business_address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub owner_id: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl TryFrom<PassportApplication> for Submission {
    type Error = TypeConstraintError;

    fn try_from(row: PassportApplication) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.try_into()?,
            status: SubmissionStatus::parse_lossy(row.status.as_deref()),
            created_at: row.created_at,
            updated_at: row.updated_at,
            details: FormDetails::Passport(PassportDetails {
                first_name: row.first_name,
                surname: row.surname,
                date_of_birth: row.date_of_birth,
                gender: row.gender,
                place_of_birth: row.place_of_birth,
                nationality: row.nationality,
                phone_number: row.phone_number,
                email: row.email,
                residential_address: row.residential_address,
                ghana_card: row.ghana_card,
                passport_photo: row.passport_photo,
            }),
        })
    }
}

impl TryFrom<BirthCertificate> for Submission {
    type Error = TypeConstraintError;

    fn try_from(row: BirthCertificate) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.try_into()?,
            status: SubmissionStatus::parse_lossy(row.status.as_deref()),
            created_at: row.created_at,
            updated_at: row.updated_at,
            details: FormDetails::BirthCertificate(BirthCertificateDetails {
                first_name: row.first_name,
                surname: row.surname,
                date_of_birth: row.date_of_birth,
                place_of_birth: row.place_of_birth,
                gender: row.gender,
                father_name: row.father_name,
                mother_name: row.mother_name,
                phone_number: row.phone_number,
                supporting_document: row.supporting_document,
            }),
        })
    }
}

impl TryFrom<CompanyApplication> for Submission {
    type Error = TypeConstraintError;

    fn try_from(row: CompanyApplication) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.try_into()?,
            status: SubmissionStatus::parse_lossy(row.status.as_deref()),
            created_at: row.created_at,
            updated_at: row.updated_at,
            details: FormDetails::Company(CompanyDetails {
                business_name_1: row.business_name_1,
                business_name_2: row.business_name_2,
                business_name_3: row.business_name_3,
                nature_of_business: row.nature_of_business,
                registered_address: row.registered_address,
                phone_number: row.phone_number,
                email: row.email,
                director_name: row.director_name,
                director_id: row.director_id,
            }),
        })
    }
}

impl TryFrom<SoleProprietorshipApplication> for Submission {
    type Error = TypeConstraintError;

    fn try_from(row: SoleProprietorshipApplication) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.try_into()?,
            status: SubmissionStatus::parse_lossy(row.status.as_deref()),
            created_at: row.created_at,
            updated_at: row.updated_at,
            details: FormDetails::SoleProprietorship(SoleProprietorshipDetails {
                business_name_1: row.business_name_1,
                owner_name: row.owner_name,
                nature_of_business: row.nature_of_business,
                business_address: row.business_address,
                phone_number: row.phone_number,
                email: row.email,
                owner_id: row.owner_id,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::FormType;

    #[test]
    fn unknown_status_normalizes_to_pending() {
        let row = PassportApplication {
            id: 1,
            first_name: "Kofi".to_string(),
            surname: "Boateng".to_string(),
            date_of_birth: None,
            gender: None,
            place_of_birth: None,
            nationality: None,
            phone_number: None,
            email: None,
            residential_address: None,
            ghana_card: None,
            passport_photo: None,
            status: Some("archived".to_string()),
            created_at: None,
            updated_at: None,
        };
        let submission = Submission::try_from(row).unwrap();
        assert_eq!(submission.status, SubmissionStatus::Pending);
        assert_eq!(submission.form_type(), FormType::Passport);
    }
}
