//! `timebridge sync`: post the day's Toggl totals to Runn as actuals.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Args;
use colored::Colorize;

use timebridge_sync::{pipeline, today_utc, SyncOptions, SyncReport};

use crate::config::{HttpArgs, RunnArgs, TogglArgs};

/// Arguments for `timebridge sync`.
///
/// Actuals are not deduplicated: syncing the same date twice posts the
/// same records twice.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Day to sync instead of today (UTC).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    /// Match and report, but post nothing to Runn.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit the run report as JSON on stdout.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub toggl: TogglArgs,

    #[command(flatten)]
    pub runn: RunnArgs,

    #[command(flatten)]
    pub http: HttpArgs,
}

impl SyncArgs {
    pub async fn run(self) -> Result<()> {
        let toggl = self.toggl.client(&self.http).context("invalid Toggl settings")?;
        let runn = self.runn.client(&self.http).context("invalid Runn settings")?;
        let options = SyncOptions {
            date: self.date.unwrap_or_else(today_utc),
            reference_key: self.runn.reference_key.clone(),
            dry_run: self.dry_run,
        };

        let report = pipeline::run(&toggl, &runn, &options)
            .await
            .with_context(|| format!("sync failed for {}", options.date))?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("failed to serialize sync report")?
            );
        } else {
            print_report(&report);
        }

        for failure in &report.failures {
            match failure.body.as_deref() {
                Some(body) => tracing::error!(
                    actual = %failure.planned,
                    error = %failure.message,
                    response_body = body,
                    "actual was not created"
                ),
                None => tracing::error!(
                    actual = %failure.planned,
                    error = %failure.message,
                    "actual was not created"
                ),
            }
        }

        if !report.is_success() {
            bail!(
                "{} of {} actuals failed to post for {}",
                report.failures.len(),
                report.planned.len(),
                report.date
            );
        }
        Ok(())
    }
}

fn print_report(report: &SyncReport) {
    let prefix = if report.dry_run { "[dry-run] " } else { "" };
    let verb = if report.dry_run { "planned" } else { "posted" };
    let count = if report.dry_run {
        report.planned.len()
    } else {
        report.submitted_count()
    };

    let glyph = if report.is_success() {
        "✓".green()
    } else {
        "✗".red()
    };
    println!(
        "{prefix}{glyph} {}: {count} actuals {verb}, {} skipped, {} failed",
        report.date,
        report.skipped.len(),
        report.failures.len()
    );

    let failed: Vec<_> = report.failures.iter().map(|f| &f.planned).collect();
    for actual in &report.planned {
        if failed.contains(&actual) {
            println!("  {}  {actual}", "✗".red());
        } else if report.dry_run {
            println!("  ~  {actual}");
        } else {
            println!("  ✎  {actual}");
        }
    }
    for skip in &report.skipped {
        println!("  {}  {skip}", "·".bright_black());
    }
}
