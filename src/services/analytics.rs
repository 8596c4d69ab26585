//! Filtering, pagination, and chart aggregation for the dashboard views.
//!
//! Everything here is a pure function over the cached snapshot, so the
//! routes can compose filters freely and the tests need no database.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::blog::Blog;
use crate::domain::submission::Submission;
use crate::domain::types::{FormType, SubmissionStatus};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, total_pages};

/// Status facet selected in the dashboard toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Approved,
}

impl StatusFilter {
    /// Parse the query-string value; anything unrecognized means "all".
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("approved") => Self::Approved,
            Some(v) if v.eq_ignore_ascii_case("pending") => Self::Pending,
            _ => Self::All,
        }
    }

    pub fn matches(self, status: SubmissionStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pending => status == SubmissionStatus::Pending,
            Self::Approved => status == SubmissionStatus::Approved,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Approved => "approved",
        }
    }
}

/// Parse the form-type facet; `None` and `"all"` select every table.
pub fn parse_type_filter(value: Option<&str>) -> Option<FormType> {
    let value = value.map(str::trim)?;
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        return None;
    }
    FormType::try_from(value).ok()
}

/// Apply the toolbar facets and free-text search to the snapshot.
///
/// The search term matches case-insensitively against the form type name,
/// the display name, and the full serialized record, so any stored field
/// value is reachable.
pub fn filter_submissions(
    submissions: &[Submission],
    form_type: Option<FormType>,
    status: StatusFilter,
    search: Option<&str>,
) -> Vec<Submission> {
    let needle = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    submissions
        .iter()
        .filter(|s| form_type.is_none_or(|ft| s.form_type() == ft))
        .filter(|s| status.matches(s.status))
        .filter(|s| {
            let Some(needle) = needle.as_deref() else {
                return true;
            };
            if s.form_type().formatted_name().to_lowercase().contains(needle)
                || s.display_name().to_lowercase().contains(needle)
            {
                return true;
            }
            serde_json::to_string(s)
                .map(|json| json.to_lowercase().contains(needle))
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// One page of the filtered list plus the page count for the pager.
pub fn page_slice(submissions: &[Submission], page: usize) -> (Vec<Submission>, usize) {
    let pages = total_pages(submissions.len(), DEFAULT_ITEMS_PER_PAGE);
    let page = page.max(1);
    let slice = submissions
        .iter()
        .skip((page - 1) * DEFAULT_ITEMS_PER_PAGE)
        .take(DEFAULT_ITEMS_PER_PAGE)
        .cloned()
        .collect();
    (slice, pages)
}

/// The newest `count` submissions for the dashboard sidebar.
pub fn recent(submissions: &[Submission], count: usize) -> Vec<Submission> {
    let mut sorted: Vec<Submission> = submissions.to_vec();
    sorted.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
    sorted.truncate(count);
    sorted
}

/// A single point on the daily-activity line chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub label: String,
    pub count: usize,
}

/// One chart bucket holding a count per form type, in [`FormType::ALL`]
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeBucket {
    pub label: String,
    pub counts: [usize; FormType::ALL.len()],
}

/// Position of a form type within [`FormType::ALL`].
fn type_index(form_type: FormType) -> usize {
    match form_type {
        FormType::Passport => 0,
        FormType::BirthCertificate => 1,
        FormType::Company => 2,
        FormType::SoleProprietorship => 3,
    }
}

/// Per-type submission counts for the last seven days that saw any
/// activity, oldest first. Days with no submissions are skipped rather
/// than plotted as zeroes.
pub fn daily_activity(submissions: &[Submission]) -> Vec<TypeBucket> {
    let mut by_day: BTreeMap<NaiveDate, [usize; FormType::ALL.len()]> = BTreeMap::new();
    for submission in submissions {
        if let Some(created) = submission.created_at {
            by_day.entry(created.date()).or_default()[type_index(submission.form_type())] += 1;
        }
    }

    let mut days: Vec<TypeBucket> = by_day
        .into_iter()
        .rev()
        .take(7)
        .map(|(day, counts)| TypeBucket {
            label: day.format("%b %d").to_string(),
            counts,
        })
        .collect();
    days.reverse();
    days
}

/// Per-type submission counts for each month of one calendar year,
/// January first. Empty months stay at zero so the chart axis is a full
/// year.
pub fn monthly_counts(
    submissions: &[Submission],
    year: i32,
) -> [[usize; FormType::ALL.len()]; 12] {
    let mut counts = [[0usize; FormType::ALL.len()]; 12];
    for submission in submissions {
        if let Some(created) = submission.created_at
            && created.year() == year
        {
            counts[created.month0() as usize][type_index(submission.form_type())] += 1;
        }
    }
    counts
}

/// Every year that has at least one submission, ascending. Empty data
/// falls back to the given year so the selector is never blank.
pub fn year_range(submissions: &[Submission], fallback: i32) -> Vec<i32> {
    let mut years: Vec<i32> = submissions
        .iter()
        .filter_map(|s| s.created_at.map(|ts| ts.year()))
        .collect();
    years.sort_unstable();
    years.dedup();
    if years.is_empty() {
        years.push(fallback);
    }
    years
}

/// Approved/pending split for the status doughnut chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusDistribution {
    pub approved: usize,
    pub pending: usize,
}

pub fn status_distribution(submissions: &[Submission]) -> StatusDistribution {
    let approved = submissions.iter().filter(|s| s.is_approved()).count();
    StatusDistribution {
        approved,
        pending: submissions.len() - approved,
    }
}

/// One slice of the form-type pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub label: &'static str,
    pub count: usize,
}

/// Submission counts per form type, in the fixed form-type order.
pub fn type_distribution(submissions: &[Submission]) -> Vec<TypeCount> {
    FormType::ALL
        .iter()
        .map(|ft| TypeCount {
            label: ft.short_label(),
            count: submissions.iter().filter(|s| s.form_type() == *ft).count(),
        })
        .collect()
}

/// Headline numbers for the blog console dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlogMetrics {
    pub total: usize,
    pub published: usize,
    pub drafts: usize,
    pub categories: usize,
}

pub fn blog_metrics(blogs: &[Blog], category_count: usize) -> BlogMetrics {
    let published = blogs.iter().filter(|b| b.published).count();
    BlogMetrics {
        total: blogs.len(),
        published,
        drafts: blogs.len() - published,
        categories: category_count,
    }
}

/// Daily post counts for the console activity chart, oldest first.
pub fn posts_per_day(blogs: &[Blog]) -> Vec<DailyCount> {
    let mut by_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for blog in blogs {
        *by_day.entry(blog.created_at.date()).or_default() += 1;
    }
    by_day
        .into_iter()
        .map(|(day, count)| DailyCount {
            label: day.format("%b %d").to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::submission::{BirthCertificateDetails, FormDetails, PassportDetails};
    use crate::domain::types::SubmissionId;
    use chrono::NaiveDate;

    fn passport(id: i32, day: u32, status: SubmissionStatus) -> Submission {
        Submission {
            id: SubmissionId::new(id).unwrap(),
            status,
            created_at: NaiveDate::from_ymd_opt(2024, 5, day)
                .unwrap()
                .and_hms_opt(12, 0, 0),
            updated_at: None,
            details: FormDetails::Passport(PassportDetails {
                first_name: "Kofi".to_string(),
                surname: "Asante".to_string(),
                ..Default::default()
            }),
        }
    }

    fn birth_certificate(id: i32, day: u32) -> Submission {
        Submission {
            id: SubmissionId::new(id).unwrap(),
            status: SubmissionStatus::Pending,
            created_at: NaiveDate::from_ymd_opt(2024, 5, day)
                .unwrap()
                .and_hms_opt(9, 0, 0),
            updated_at: None,
            details: FormDetails::BirthCertificate(BirthCertificateDetails {
                first_name: "Abena".to_string(),
                surname: "Boateng".to_string(),
                ..Default::default()
            }),
        }
    }

    fn sample_set() -> Vec<Submission> {
        vec![
            passport(1, 1, SubmissionStatus::Pending),
            passport(2, 2, SubmissionStatus::Approved),
            birth_certificate(3, 3),
            birth_certificate(4, 4),
            passport(5, 5, SubmissionStatus::Approved),
        ]
    }

    #[test]
    fn status_filter_parse_ignores_case_and_unknown_values() {
        assert_eq!(StatusFilter::parse(Some("Approved")), StatusFilter::Approved);
        assert_eq!(StatusFilter::parse(Some(" pending ")), StatusFilter::Pending);
        assert_eq!(StatusFilter::parse(Some("bogus")), StatusFilter::All);
        assert_eq!(StatusFilter::parse(None), StatusFilter::All);
    }

    #[test]
    fn type_filter_treats_all_as_no_filter() {
        assert_eq!(parse_type_filter(Some("all")), None);
        assert_eq!(parse_type_filter(Some("")), None);
        assert_eq!(parse_type_filter(None), None);
        assert_eq!(
            parse_type_filter(Some("passport_applications")),
            Some(FormType::Passport)
        );
    }

    #[test]
    fn type_filter_partitions_the_snapshot() {
        let all = sample_set();
        let passports = filter_submissions(&all, Some(FormType::Passport), StatusFilter::All, None);
        let certificates =
            filter_submissions(&all, Some(FormType::BirthCertificate), StatusFilter::All, None);

        assert_eq!(passports.len() + certificates.len(), all.len());
        assert!(passports.iter().all(|s| s.form_type() == FormType::Passport));
    }

    #[test]
    fn clearing_filters_restores_the_full_set() {
        let all = sample_set();
        let unfiltered = filter_submissions(&all, None, StatusFilter::All, None);
        assert_eq!(unfiltered, all);
    }

    #[test]
    fn search_matches_name_and_serialized_fields() {
        let all = sample_set();
        let by_name = filter_submissions(&all, None, StatusFilter::All, Some("abena"));
        assert_eq!(by_name.len(), 2);

        let by_type_name = filter_submissions(&all, None, StatusFilter::All, Some("birth certif"));
        assert_eq!(by_type_name.len(), 2);

        let by_json = filter_submissions(&all, None, StatusFilter::All, Some("asante"));
        assert_eq!(by_json.len(), 3);
    }

    #[test]
    fn pagination_concatenates_back_to_the_filtered_list() {
        let many: Vec<Submission> = (1..=23)
            .map(|id| passport(id, (id as u32 % 28) + 1, SubmissionStatus::Pending))
            .collect();

        let (_, pages) = page_slice(&many, 1);
        assert_eq!(pages, 3);

        let mut reassembled = Vec::new();
        for page in 1..=pages {
            let (slice, _) = page_slice(&many, page);
            assert!(slice.len() <= DEFAULT_ITEMS_PER_PAGE);
            reassembled.extend(slice);
        }
        assert_eq!(reassembled, many);
    }

    #[test]
    fn daily_activity_keeps_last_seven_active_days_ascending() {
        let submissions: Vec<Submission> = (1..=9)
            .map(|day| passport(day, day as u32, SubmissionStatus::Pending))
            .collect();

        let days = daily_activity(&submissions);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].label, "May 03");
        assert_eq!(days[6].label, "May 09");
        assert!(days.iter().all(|d| d.counts == [1, 0, 0, 0]));
    }

    #[test]
    fn daily_activity_splits_counts_by_form_type() {
        let submissions = vec![
            passport(1, 5, SubmissionStatus::Pending),
            passport(2, 5, SubmissionStatus::Approved),
            birth_certificate(3, 5),
        ];

        let days = daily_activity(&submissions);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].counts, [2, 1, 0, 0]);
    }

    #[test]
    fn monthly_counts_only_include_the_selected_year() {
        let mut submissions = sample_set();
        submissions[0].created_at = NaiveDate::from_ymd_opt(2023, 12, 31)
            .unwrap()
            .and_hms_opt(23, 0, 0);

        let counts = monthly_counts(&submissions, 2024);
        assert_eq!(counts[4], [2, 2, 0, 0]);
        let total: usize = counts.iter().flatten().sum();
        assert_eq!(total, 4);
        assert_eq!(year_range(&submissions, 2024), vec![2023, 2024]);
    }

    #[test]
    fn distributions_cover_every_record() {
        let all = sample_set();
        let status = status_distribution(&all);
        assert_eq!(status.approved, 2);
        assert_eq!(status.pending, 3);

        let types = type_distribution(&all);
        assert_eq!(types.iter().map(|t| t.count).sum::<usize>(), all.len());
        assert_eq!(types[0].label, "Passport");
    }

    #[test]
    fn recent_returns_newest_first() {
        let all = sample_set();
        let newest = recent(&all, 2);
        assert_eq!(newest[0].id.get(), 5);
        assert_eq!(newest[1].id.get(), 4);
    }
}
