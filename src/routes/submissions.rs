use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::domain::types::{FormType, SubmissionId};
use crate::dto::submissions::{SubmissionDetailDto, SubmissionRowDto};
use crate::notify::ChangeBus;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::analytics::{
    StatusFilter, daily_activity, filter_submissions, monthly_counts, page_slice,
    parse_type_filter, recent, status_distribution, type_distribution, year_range,
};
use crate::services::export::{DownloadFile, DownloadFormat, submission_summary, submissions_export};
use crate::services::store::SubmissionStore;
use crate::services::submissions::{
    ApproveOutcome, approve as approve_service, get_submission as get_submission_service,
};

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub form_type: Option<String>,
    pub status: Option<String>,
    pub q: Option<String>,
    pub page: Option<usize>,
    pub year: Option<i32>,
}

#[derive(Deserialize)]
pub struct SummaryQuery {
    pub format: Option<String>,
}

fn parse_path(form_type: &str, id: i32) -> Option<(FormType, SubmissionId)> {
    let form_type = FormType::try_from(form_type).ok()?;
    let id = SubmissionId::new(id).ok()?;
    Some((form_type, id))
}

fn download_response(file: DownloadFile) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(file.content_type)
        .insert_header((
            actix_web::http::header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.file_name),
        ))
        .body(file.bytes)
}

/// Options for the form-type select, value and label pairs.
fn form_type_options() -> Vec<(&'static str, &'static str)> {
    FormType::ALL
        .iter()
        .map(|ft| (ft.as_str(), ft.short_label()))
        .collect()
}

#[get("/dashboard")]
pub async fn dashboard(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    store: web::Data<SubmissionStore>,
    tera: web::Data<Tera>,
    query: web::Query<DashboardQuery>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, &user, "dashboard");
    context.insert("form_types", &form_type_options());

    let snapshot = match store.snapshot(repo.get_ref()) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            log::error!("Failed to load dashboard: {err}");
            context.insert("load_error", "Failed to load submissions. Please try again.");
            return render_template(&tera, "submissions/dashboard.html", &context);
        }
    };

    let form_type = parse_type_filter(query.form_type.as_deref());
    let status = StatusFilter::parse(query.status.as_deref());
    let filtered = filter_submissions(&snapshot, form_type, status, query.q.as_deref());

    let page = query.page.unwrap_or(1).max(1);
    let (rows, pages) = page_slice(&filtered, page);
    let rows: Vec<SubmissionRowDto> = rows.iter().map(SubmissionRowDto::from).collect();
    let recent_rows: Vec<SubmissionRowDto> = recent(&snapshot, 5)
        .iter()
        .map(SubmissionRowDto::from)
        .collect();

    let year = query.year.unwrap_or_else(|| Utc::now().year());

    context.insert("submissions", &rows);
    context.insert("total", &filtered.len());
    context.insert("pages", &pages);
    context.insert("page", &page);
    context.insert(
        "selected_type",
        form_type.map(FormType::as_str).unwrap_or("all"),
    );
    context.insert("selected_status", status.as_str());
    context.insert("search", query.q.as_deref().unwrap_or(""));
    context.insert("recent", &recent_rows);
    context.insert("daily_activity", &daily_activity(&snapshot));
    context.insert("monthly_counts", &monthly_counts(&snapshot, year));
    context.insert("year", &year);
    context.insert("years", &year_range(&snapshot, year));
    context.insert("status_distribution", &status_distribution(&filtered));
    context.insert("type_distribution", &type_distribution(&snapshot));
    render_template(&tera, "submissions/dashboard.html", &context)
}

/// Download the filtered submission list as a spreadsheet.
#[get("/dashboard/export")]
pub async fn export_submissions(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<SubmissionStore>,
    query: web::Query<DashboardQuery>,
) -> impl Responder {
    let snapshot = match store.snapshot(repo.get_ref()) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            log::error!("Failed to export submissions: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let form_type = parse_type_filter(query.form_type.as_deref());
    let status = StatusFilter::parse(query.status.as_deref());
    let filtered = filter_submissions(&snapshot, form_type, status, query.q.as_deref());

    match submissions_export(&filtered) {
        Ok(file) => download_response(file),
        Err(err) => {
            log::error!("Failed to render submissions export: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/submissions/{form_type}/{id}")]
pub async fn show_submission(
    path: web::Path<(String, i32)>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (raw_type, raw_id) = path.into_inner();
    let Some((form_type, id)) = parse_path(&raw_type, raw_id) else {
        return HttpResponse::NotFound().finish();
    };

    match get_submission_service(form_type, id, repo.get_ref()) {
        Ok(submission) => {
            let detail = SubmissionDetailDto::from(&submission);
            let mut context = base_context(&flash_messages, &user, "dashboard");
            context.insert("submission", &detail);
            render_template(&tera, "submissions/view.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render submission page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/submissions/{form_type}/{id}/approve")]
pub async fn approve_submission(
    path: web::Path<(String, i32)>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<SubmissionStore>,
    bus: web::Data<ChangeBus>,
) -> impl Responder {
    let (raw_type, raw_id) = path.into_inner();
    let Some((form_type, id)) = parse_path(&raw_type, raw_id) else {
        return HttpResponse::NotFound().finish();
    };

    match approve_service(form_type, id, repo.get_ref(), store.get_ref(), bus.get_ref()) {
        Ok(ApproveOutcome::Approved) => {
            FlashMessage::success("Submission approved successfully").send();
        }
        Ok(ApproveOutcome::AlreadyApproved) => {
            FlashMessage::warning("This submission is already approved").send();
        }
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to approve submission: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&format!("/submissions/{raw_type}/{raw_id}"))
}

/// Download a printable field/value summary for one submission.
#[get("/submissions/{form_type}/{id}/summary")]
pub async fn download_summary(
    path: web::Path<(String, i32)>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    query: web::Query<SummaryQuery>,
) -> impl Responder {
    let (raw_type, raw_id) = path.into_inner();
    let Some((form_type, id)) = parse_path(&raw_type, raw_id) else {
        return HttpResponse::NotFound().finish();
    };

    let format = match DownloadFormat::try_from(query.format.as_deref().unwrap_or("csv")) {
        Ok(format) => format,
        Err(err) => {
            log::error!("Rejected summary download: {err}");
            return HttpResponse::BadRequest().finish();
        }
    };

    let submission = match get_submission_service(form_type, id, repo.get_ref()) {
        Ok(submission) => submission,
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load submission for summary: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match submission_summary(&submission, format) {
        Ok(file) => download_response(file),
        Err(err) => {
            log::error!("Failed to render submission summary: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
