use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;

use cct_console::domain::blog::{NewBlog, UpdateBlog};
use cct_console::domain::category::NewCategory;
use cct_console::domain::types::{
    BlogTitle, CategoryName, FormType, SubmissionId, SubmissionStatus, UserEmail, UserName,
};
use cct_console::domain::user::NewUser;
use cct_console::notify::ChangeBus;
use cct_console::repository::{
    BlogReader, BlogWriter, CategoryReader, CategoryWriter, DieselRepository, SubmissionReader,
    SubmissionWriter, UserReader, UserWriter,
};
use cct_console::schema::{
    birth_certificates, company_applications, passport_applications,
    sole_proprietorship_applications,
};
use cct_console::services::store::SubmissionStore;
use cct_console::services::submissions::{ApproveOutcome, approve};

mod common;

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn seed_passport(conn: &mut SqliteConnection, name: &str, status: &str, created: NaiveDateTime) {
    diesel::insert_into(passport_applications::table)
        .values((
            passport_applications::first_name.eq(name),
            passport_applications::surname.eq("Mensah"),
            passport_applications::status.eq(status),
            passport_applications::created_at.eq(created),
        ))
        .execute(conn)
        .expect("should insert passport application");
}

fn seed_birth_certificate(conn: &mut SqliteConnection, name: &str, created: NaiveDateTime) {
    diesel::insert_into(birth_certificates::table)
        .values((
            birth_certificates::first_name.eq(name),
            birth_certificates::surname.eq("Owusu"),
            birth_certificates::status.eq("pending"),
            birth_certificates::created_at.eq(created),
        ))
        .execute(conn)
        .expect("should insert birth certificate");
}

fn seed_company(conn: &mut SqliteConnection, business: &str, created: NaiveDateTime) {
    diesel::insert_into(company_applications::table)
        .values((
            company_applications::business_name_1.eq(business),
            company_applications::status.eq("approved"),
            company_applications::created_at.eq(created),
        ))
        .execute(conn)
        .expect("should insert company application");
}

fn seed_sole_proprietorship(conn: &mut SqliteConnection, business: &str, created: NaiveDateTime) {
    diesel::insert_into(sole_proprietorship_applications::table)
        .values((
            sole_proprietorship_applications::business_name_1.eq(business),
            sole_proprietorship_applications::status.eq("pending"),
            sole_proprietorship_applications::created_at.eq(created),
        ))
        .execute(conn)
        .expect("should insert sole proprietorship application");
}

#[test]
fn list_submissions_normalizes_every_table() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let mut conn = test_db.pool().get().expect("should acquire DB connection");

    seed_passport(&mut conn, "Kofi", "pending", at(1, 9));
    // A status the intake portal never documented still loads as pending.
    seed_passport(&mut conn, "Ama", "archived", at(2, 9));
    seed_birth_certificate(&mut conn, "Yaw", at(3, 9));
    seed_company(&mut conn, "Accra Tools Ltd", at(4, 9));
    seed_sole_proprietorship(&mut conn, "Adjoa Catering", at(5, 9));

    let submissions = repo
        .list_submissions(None)
        .expect("should list submissions");
    assert_eq!(submissions.len(), 5);

    // "archived" is not a status the console knows; it reads back as pending.
    let approved = submissions
        .iter()
        .filter(|s| s.status == SubmissionStatus::Approved)
        .count();
    assert_eq!(approved, 1);

    let passports = repo
        .list_submissions(Some(FormType::Passport))
        .expect("should list passports");
    assert_eq!(passports.len(), 2);
}

#[test]
fn snapshot_orders_mixed_tables_newest_first() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let mut conn = test_db.pool().get().expect("should acquire DB connection");

    seed_passport(&mut conn, "Kofi", "pending", at(5, 9));
    seed_passport(&mut conn, "Ama", "pending", at(3, 9));
    seed_passport(&mut conn, "Esi", "pending", at(1, 9));
    seed_birth_certificate(&mut conn, "Yaw", at(4, 9));
    seed_birth_certificate(&mut conn, "Adjoa", at(2, 9));

    let store = SubmissionStore::new();
    let snapshot = store.snapshot(&repo).expect("should load snapshot");

    assert_eq!(snapshot.len(), 5);
    let created: Vec<NaiveDateTime> = snapshot.iter().filter_map(|s| s.created_at).collect();
    assert_eq!(created, vec![at(5, 9), at(4, 9), at(3, 9), at(2, 9), at(1, 9)]);
    assert_eq!(snapshot[0].form_type(), FormType::Passport);
    assert_eq!(snapshot[1].form_type(), FormType::BirthCertificate);
}

#[test]
fn approve_updates_exactly_one_row() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let mut conn = test_db.pool().get().expect("should acquire DB connection");

    seed_passport(&mut conn, "Kofi", "pending", at(1, 9));
    seed_passport(&mut conn, "Ama", "pending", at(2, 9));

    let approved_at = at(10, 12);
    let updated = repo
        .approve_submission(FormType::Passport, SubmissionId::new(1).unwrap(), approved_at)
        .expect("should approve");
    assert_eq!(updated, 1);

    let first = repo
        .get_submission(FormType::Passport, SubmissionId::new(1).unwrap())
        .expect("should load submission")
        .expect("submission should exist");
    assert!(first.is_approved());
    assert_eq!(first.updated_at, Some(approved_at));

    let second = repo
        .get_submission(FormType::Passport, SubmissionId::new(2).unwrap())
        .expect("should load submission")
        .expect("submission should exist");
    assert!(!second.is_approved());
}

#[test]
fn second_approval_is_a_warning_not_a_write() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let mut conn = test_db.pool().get().expect("should acquire DB connection");

    seed_passport(&mut conn, "Kofi", "pending", at(1, 9));

    let store = SubmissionStore::new();
    let bus = ChangeBus::new();
    let id = SubmissionId::new(1).unwrap();

    let first = approve(FormType::Passport, id, &repo, &store, &bus).expect("first approve");
    assert_eq!(first, ApproveOutcome::Approved);

    let stamped = repo
        .get_submission(FormType::Passport, id)
        .expect("should load submission")
        .expect("submission should exist")
        .updated_at;

    let second = approve(FormType::Passport, id, &repo, &store, &bus).expect("second approve");
    assert_eq!(second, ApproveOutcome::AlreadyApproved);

    let after = repo
        .get_submission(FormType::Passport, id)
        .expect("should load submission")
        .expect("submission should exist")
        .updated_at;
    assert_eq!(after, stamped);
}

#[test]
fn blog_repository_crud() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let now = Utc::now().naive_utc();
    repo.create_category(&NewCategory {
        name: CategoryName::new("Announcements".to_string()).expect("valid category name"),
        created_at: now,
    })
    .expect("should create category");
    let categories = repo.list_categories().expect("should list categories");
    let category = categories
        .iter()
        .find(|c| c.name.as_str() == "Announcements")
        .expect("inserted category should exist");

    let blog = repo
        .create_blog(&NewBlog {
            title: BlogTitle::new("Office hours".to_string()).expect("valid title"),
            content: "<p>We open at 8am.</p>".to_string(),
            category_id: category.id,
            published: false,
            created_at: now,
            updated_at: now,
        })
        .expect("should create blog");
    assert!(!blog.published);

    let updated_at = now + chrono::Duration::minutes(5);
    let updated = repo
        .update_blog(
            blog.id,
            &UpdateBlog {
                title: BlogTitle::new("Revised office hours".to_string()).expect("valid title"),
                content: "<p>We open at 9am.</p>".to_string(),
                category_id: category.id,
                published: false,
                updated_at,
            },
        )
        .expect("should update blog");
    assert_eq!(updated, 1);

    let published = repo
        .publish_blog(blog.id, updated_at + chrono::Duration::minutes(5))
        .expect("should publish blog");
    assert_eq!(published, 1);

    let reloaded = repo
        .get_blog_by_id(blog.id)
        .expect("should load blog")
        .expect("blog should exist");
    assert!(reloaded.published);
    assert_eq!(reloaded.title.as_str(), "Revised office hours");

    let deleted = repo.delete_blog(blog.id).expect("should delete blog");
    assert_eq!(deleted, 1);
    assert!(
        repo.get_blog_by_id(blog.id)
            .expect("should query blog")
            .is_none()
    );
}

#[test]
fn categories_list_in_name_order() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let now = Utc::now().naive_utc();
    for name in ["Notices", "Announcements", "Events"] {
        repo.create_category(&NewCategory {
            name: CategoryName::new(name.to_string()).expect("valid category name"),
            created_at: now,
        })
        .expect("should create category");
    }

    let names: Vec<String> = repo
        .list_categories()
        .expect("should list categories")
        .into_iter()
        .map(|c| c.name.into_inner())
        .collect();
    assert_eq!(names, vec!["Announcements", "Events", "Notices"]);
}

#[test]
fn user_lookup_by_email() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let email = UserEmail::new("clerk@cct.gov.gh".to_string()).expect("valid email");
    repo.create_user(&NewUser {
        email: email.clone(),
        name: UserName::new("Esi Clerk".to_string()).expect("valid name"),
        password_hash: "$argon2id$fake-hash".to_string(),
        created_at: Utc::now().naive_utc(),
    })
    .expect("should create user");

    let user = repo
        .get_user_by_email(&email)
        .expect("should query user")
        .expect("user should exist");
    assert_eq!(user.name.as_str(), "Esi Clerk");

    let missing = UserEmail::new("nobody@cct.gov.gh".to_string()).expect("valid email");
    assert!(
        repo.get_user_by_email(&missing)
            .expect("should query user")
            .is_none()
    );
}
