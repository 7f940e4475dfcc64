//! Sync pipeline: fetch the day's Toggl report, match it against the Runn
//! directories, and post one actual per matched (project, person) pair.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tokio::task::JoinSet;

use timebridge_core::{
    find_by_reference, millis_to_minutes, ActualRecord, ConversionError, ForeignId, TargetPerson,
    TargetProject, WeeklyReport,
};

use crate::error::SyncError;
use crate::runn::RunnClient;
use crate::toggl::TogglClient;

/// Current calendar date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Inputs for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Report window (`since == until`) and the date stamped on every actual.
    pub date: NaiveDate,
    /// Runn custom field holding the Toggl id.
    pub reference_key: String,
    /// Plan and log, but post nothing.
    pub dry_run: bool,
}

impl SyncOptions {
    pub fn today(reference_key: impl Into<String>) -> Self {
        Self {
            date: today_utc(),
            reference_key: reference_key.into(),
            dry_run: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipKind {
    Person,
    Project,
}

impl fmt::Display for SkipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipKind::Person => write!(f, "person"),
            SkipKind::Project => write!(f, "project"),
        }
    }
}

/// A report pair with no Runn counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skip {
    pub kind: SkipKind,
    /// Toggl display title of the unmatched person or project.
    pub name: String,
    pub reference_key: String,
    /// `None` when Toggl reported time without a project.
    pub foreign_id: Option<ForeignId>,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self
            .foreign_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "none".to_string());
        write!(
            f,
            "could not find {} \"{}\" in Runn, looking for reference \"{}={}\"",
            self.kind, self.name, self.reference_key, id
        )
    }
}

/// A record ready to post, with the names used for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedActual {
    pub record: ActualRecord,
    pub project_name: String,
    pub person_name: String,
    pub role_name: String,
}

impl fmt::Display for PlannedActual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({}) @ {} minutes",
            self.project_name, self.person_name, self.role_name, self.record.billable_minutes
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub actuals: Vec<PlannedActual>,
    pub skipped: Vec<Skip>,
}

/// Resolve every (project, person) pair of `report` against the directories.
///
/// The person is looked up first; a pair is skipped on the first miss. Pure:
/// no I/O and no logging. A bad weekly total fails the whole plan.
pub fn plan(
    report: &WeeklyReport,
    projects: &[TargetProject],
    people: &[TargetPerson],
    reference_key: &str,
    date: NaiveDate,
) -> Result<Plan, ConversionError> {
    let mut plan = Plan::default();

    for entry in &report.data {
        for person in &entry.details {
            let Some(runn_person) = find_by_reference(people, reference_key, &person.uid) else {
                plan.skipped.push(Skip {
                    kind: SkipKind::Person,
                    name: person.user_title().to_owned(),
                    reference_key: reference_key.to_owned(),
                    foreign_id: Some(person.uid),
                });
                continue;
            };

            let runn_project = entry
                .pid
                .and_then(|pid| find_by_reference(projects, reference_key, &pid));
            let Some(runn_project) = runn_project else {
                plan.skipped.push(Skip {
                    kind: SkipKind::Project,
                    name: entry.project_title().to_owned(),
                    reference_key: reference_key.to_owned(),
                    foreign_id: entry.pid,
                });
                continue;
            };

            let billable_minutes = millis_to_minutes(person.weekly_total()?)?;

            plan.actuals.push(PlannedActual {
                record: ActualRecord {
                    date,
                    project_id: runn_project.id.clone(),
                    person_id: runn_person.id.clone(),
                    role_id: runn_person.role_id.clone(),
                    billable_minutes,
                },
                project_name: runn_project.name.clone(),
                person_name: runn_person.name.clone(),
                role_name: runn_person.role_name().to_owned(),
            });
        }
    }

    Ok(plan)
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// A planned actual that Runn did not accept.
#[derive(Debug, Serialize)]
pub struct SubmissionFailure {
    pub planned: PlannedActual,
    pub message: String,
    pub status: Option<u16>,
    pub body: Option<String>,
    #[serde(skip)]
    pub error: SyncError,
}

impl SubmissionFailure {
    fn new(planned: PlannedActual, error: SyncError) -> Self {
        Self {
            planned,
            message: error.to_string(),
            status: error.status(),
            body: error.response_body().map(str::to_owned),
            error,
        }
    }
}

/// Post every planned actual concurrently and wait for all of them.
///
/// Each post runs as its own task; a failed post never cancels the others.
/// Returns the failures ordered as in `planned`.
pub async fn submit_all(runn: &RunnClient, planned: &[PlannedActual]) -> Vec<SubmissionFailure> {
    let mut join_set = JoinSet::new();
    for (index, item) in planned.iter().enumerate() {
        let runn = runn.clone();
        let record = item.record.clone();
        join_set.spawn(async move { (index, runn.post_actual(&record).await) });
    }

    let mut pending: BTreeSet<usize> = (0..planned.len()).collect();
    let mut failures: Vec<(usize, SubmissionFailure)> = Vec::new();
    let mut join_errors = Vec::new();

    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, result)) => {
                pending.remove(&index);
                let item = &planned[index];
                match result {
                    Ok(_) => tracing::debug!(actual = %item, "posted actual"),
                    Err(err) => {
                        tracing::error!(actual = %item, error = %err, "posting actual failed");
                        failures.push((index, SubmissionFailure::new(item.clone(), err)));
                    }
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "submission task join failure");
                join_errors.push(err);
            }
        }
    }

    // Whatever never reported back belongs to a task that panicked.
    for (index, err) in pending.into_iter().zip(join_errors) {
        failures.push((index, SubmissionFailure::new(planned[index].clone(), err.into())));
    }

    failures.sort_by_key(|(index, _)| *index);
    failures.into_iter().map(|(_, failure)| failure).collect()
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Outcome of one pipeline run.
#[derive(Debug, Serialize)]
pub struct SyncReport {
    pub date: NaiveDate,
    pub dry_run: bool,
    /// Every matched pair, posted or (in dry-run) merely planned.
    pub planned: Vec<PlannedActual>,
    pub skipped: Vec<Skip>,
    pub failures: Vec<SubmissionFailure>,
}

impl SyncReport {
    /// Actuals Runn accepted.
    pub fn submitted_count(&self) -> usize {
        if self.dry_run {
            0
        } else {
            self.planned.len() - self.failures.len()
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run the whole sync for `options.date`.
///
/// The three fetches run concurrently and any fetch failure aborts the run.
/// Lookup misses are logged and skipped. Submission failures are collected
/// in [`SyncReport::failures`] rather than returned as `Err`.
pub async fn run(
    toggl: &TogglClient,
    runn: &RunnClient,
    options: &SyncOptions,
) -> Result<SyncReport, SyncError> {
    let (report, projects, people) = tokio::try_join!(
        toggl.weekly_report(options.date),
        runn.projects(),
        runn.people()
    )?;

    tracing::info!(
        date = %options.date,
        pairs = report.pair_count(),
        projects = projects.len(),
        people = people.len(),
        "fetched report and directories"
    );

    let plan = plan(
        &report,
        &projects,
        &people,
        &options.reference_key,
        options.date,
    )?;

    for skip in &plan.skipped {
        tracing::warn!(kind = %skip.kind, "{skip}");
    }
    for actual in &plan.actuals {
        tracing::info!("{actual}");
    }

    let failures = if options.dry_run {
        tracing::info!(count = plan.actuals.len(), "[dry-run] not posting actuals");
        Vec::new()
    } else {
        submit_all(runn, &plan.actuals).await
    };

    Ok(SyncReport {
        date: options.date,
        dry_run: options.dry_run,
        planned: plan.actuals,
        skipped: plan.skipped,
        failures,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    fn report(value: serde_json::Value) -> WeeklyReport {
        serde_json::from_value(value).expect("report")
    }

    fn people() -> Vec<TargetPerson> {
        serde_json::from_value(json!([
            {"id": "p1", "name": "Grace", "role_id": "r1", "role": {"name": "Engineer"},
             "references": {"Custom1": {"external_id": "55"}}}
        ]))
        .unwrap()
    }

    fn projects() -> Vec<TargetProject> {
        serde_json::from_value(json!([
            {"id": "proj1", "name": "Website", "references": {"Custom1": {"external_id": "100"}}}
        ]))
        .unwrap()
    }

    #[test]
    fn matched_pair_becomes_actual() {
        let report = report(json!({"data": [
            {"pid": 100, "title": {"project": "Web"}, "details": [
                {"uid": 55, "title": {"user": "Grace"}, "totals": [0, 0, 0, 0, 0, 0, 0, 3600000]}
            ]}
        ]}));
        let plan = plan(&report, &projects(), &people(), "Custom1", date()).unwrap();
        assert!(plan.skipped.is_empty());
        assert_eq!(plan.actuals.len(), 1);
        let actual = &plan.actuals[0];
        assert_eq!(actual.record.billable_minutes, 60);
        assert_eq!(actual.record.role_id.to_string(), "r1");
        assert_eq!(actual.to_string(), "Website: Grace (Engineer) @ 60 minutes");
    }

    #[test]
    fn unknown_person_is_skipped_before_project_lookup() {
        let report = report(json!({"data": [
            {"pid": 999, "title": {"project": "Nope"}, "details": [
                {"uid": 77, "title": {"user": "Stranger"}, "totals": [0, 0, 0, 0, 0, 0, 0, 60000]}
            ]}
        ]}));
        let plan = plan(&report, &projects(), &people(), "Custom1", date()).unwrap();
        assert!(plan.actuals.is_empty());
        assert_eq!(plan.skipped.len(), 1);
        assert_eq!(plan.skipped[0].kind, SkipKind::Person);
        assert_eq!(
            plan.skipped[0].to_string(),
            "could not find person \"Stranger\" in Runn, looking for reference \"Custom1=77\""
        );
    }

    #[test]
    fn entry_without_project_is_skipped() {
        let report = report(json!({"data": [
            {"pid": null, "title": {"project": null}, "details": [
                {"uid": 55, "title": {"user": "Grace"}, "totals": [0, 0, 0, 0, 0, 0, 0, 60000]}
            ]}
        ]}));
        let plan = plan(&report, &projects(), &people(), "Custom1", date()).unwrap();
        assert_eq!(plan.skipped[0].kind, SkipKind::Project);
        assert_eq!(plan.skipped[0].foreign_id, None);
        assert!(plan.skipped[0].to_string().ends_with("\"Custom1=none\""));
    }

    #[test]
    fn negative_total_fails_the_plan() {
        let report = report(json!({"data": [
            {"pid": 100, "details": [
                {"uid": 55, "totals": [0, 0, 0, 0, 0, 0, 0, -5]}
            ]}
        ]}));
        let err = plan(&report, &projects(), &people(), "Custom1", date()).unwrap_err();
        assert_eq!(err, ConversionError::Negative(-5));
    }

    #[test]
    fn submitted_count_is_zero_for_dry_run() {
        let report = SyncReport {
            date: date(),
            dry_run: true,
            planned: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
        };
        assert_eq!(report.submitted_count(), 0);
        assert!(report.is_success());
    }
}
