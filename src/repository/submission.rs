use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::db::DbConnection;
use crate::domain::submission::Submission;
use crate::domain::types::{FormType, SubmissionId, SubmissionStatus};
use crate::models::submission::{
    BirthCertificate, CompanyApplication, PassportApplication, SoleProprietorshipApplication,
};
use crate::repository::{DieselRepository, RepositoryResult, SubmissionReader, SubmissionWriter};

fn load_passports(conn: &mut DbConnection) -> RepositoryResult<Vec<Submission>> {
    use crate::schema::passport_applications;

    let rows = passport_applications::table.load::<PassportApplication>(conn)?;
    Ok(rows
        .into_iter()
        .map(TryInto::try_into)
        .collect::<Result<Vec<Submission>, _>>()?)
}

fn load_birth_certificates(conn: &mut DbConnection) -> RepositoryResult<Vec<Submission>> {
    use crate::schema::birth_certificates;

    let rows = birth_certificates::table.load::<BirthCertificate>(conn)?;
    Ok(rows
        .into_iter()
        .map(TryInto::try_into)
        .collect::<Result<Vec<Submission>, _>>()?)
}

fn load_companies(conn: &mut DbConnection) -> RepositoryResult<Vec<Submission>> {
    use crate::schema::company_applications;

    let rows = company_applications::table.load::<CompanyApplication>(conn)?;
    Ok(rows
        .into_iter()
        .map(TryInto::try_into)
        .collect::<Result<Vec<Submission>, _>>()?)
}

fn load_sole_proprietorships(conn: &mut DbConnection) -> RepositoryResult<Vec<Submission>> {
    use crate::schema::sole_proprietorship_applications;

    let rows =
        sole_proprietorship_applications::table.load::<SoleProprietorshipApplication>(conn)?;
    Ok(rows
        .into_iter()
        .map(TryInto::try_into)
        .collect::<Result<Vec<Submission>, _>>()?)
}

fn load_table(conn: &mut DbConnection, form_type: FormType) -> RepositoryResult<Vec<Submission>> {
    match form_type {
        FormType::Passport => load_passports(conn),
        FormType::BirthCertificate => load_birth_certificates(conn),
        FormType::Company => load_companies(conn),
        FormType::SoleProprietorship => load_sole_proprietorships(conn),
    }
}

impl SubmissionReader for DieselRepository {
    fn list_submissions(&self, form_type: Option<FormType>) -> RepositoryResult<Vec<Submission>> {
        let mut conn = self.conn()?;

        match form_type {
            Some(form_type) => load_table(&mut conn, form_type),
            None => {
                let mut all = Vec::new();
                for form_type in FormType::ALL {
                    all.extend(load_table(&mut conn, form_type)?);
                }
                Ok(all)
            }
        }
    }

    fn get_submission(
        &self,
        form_type: FormType,
        id: SubmissionId,
    ) -> RepositoryResult<Option<Submission>> {
        let mut conn = self.conn()?;

        let submission = match form_type {
            FormType::Passport => {
                use crate::schema::passport_applications;

                passport_applications::table
                    .filter(passport_applications::id.eq(id.get()))
                    .first::<PassportApplication>(&mut conn)
                    .optional()?
                    .map(TryInto::try_into)
                    .transpose()?
            }
            FormType::BirthCertificate => {
                use crate::schema::birth_certificates;

                birth_certificates::table
                    .filter(birth_certificates::id.eq(id.get()))
                    .first::<BirthCertificate>(&mut conn)
                    .optional()?
                    .map(TryInto::try_into)
                    .transpose()?
            }
            FormType::Company => {
                use crate::schema::company_applications;

                company_applications::table
                    .filter(company_applications::id.eq(id.get()))
                    .first::<CompanyApplication>(&mut conn)
                    .optional()?
                    .map(TryInto::try_into)
                    .transpose()?
            }
            FormType::SoleProprietorship => {
                use crate::schema::sole_proprietorship_applications;

                sole_proprietorship_applications::table
                    .filter(sole_proprietorship_applications::id.eq(id.get()))
                    .first::<SoleProprietorshipApplication>(&mut conn)
                    .optional()?
                    .map(TryInto::try_into)
                    .transpose()?
            }
        };

        Ok(submission)
    }
}

impl SubmissionWriter for DieselRepository {
    fn approve_submission(
        &self,
        form_type: FormType,
        id: SubmissionId,
        updated_at: NaiveDateTime,
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let approved = SubmissionStatus::Approved.as_str();

        let affected = match form_type {
            FormType::Passport => {
                use crate::schema::passport_applications;

                diesel::update(
                    passport_applications::table.filter(passport_applications::id.eq(id.get())),
                )
                .set((
                    passport_applications::status.eq(approved),
                    passport_applications::updated_at.eq(updated_at),
                ))
                .execute(&mut conn)?
            }
            FormType::BirthCertificate => {
                use crate::schema::birth_certificates;

                diesel::update(
                    birth_certificates::table.filter(birth_certificates::id.eq(id.get())),
                )
                .set((
                    birth_certificates::status.eq(approved),
                    birth_certificates::updated_at.eq(updated_at),
                ))
                .execute(&mut conn)?
            }
            FormType::Company => {
                use crate::schema::company_applications;

                diesel::update(
                    company_applications::table.filter(company_applications::id.eq(id.get())),
                )
                .set((
                    company_applications::status.eq(approved),
                    company_applications::updated_at.eq(updated_at),
                ))
                .execute(&mut conn)?
            }
            FormType::SoleProprietorship => {
                use crate::schema::sole_proprietorship_applications;

                diesel::update(
                    sole_proprietorship_applications::table
                        .filter(sole_proprietorship_applications::id.eq(id.get())),
                )
                .set((
                    sole_proprietorship_applications::status.eq(approved),
                    sole_proprietorship_applications::updated_at.eq(updated_at),
                ))
                .execute(&mut conn)?
            }
        };

        Ok(affected)
    }
}
