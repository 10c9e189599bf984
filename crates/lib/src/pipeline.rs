use std::fmt::Display;

use tracing::{info, warn};

use crate::{
    publish::{publish, Destination, PublishOutcome},
    render::{render, RenderError},
    Record, RecordId, RecordSummary, Site,
};

/// Read-only access to the remote issues.
pub trait RecordSource {
    type Error: Display;

    fn list_records(&self) -> Result<Vec<RecordSummary>, Self::Error>;
    fn get_record_detail(&self, id: &RecordId) -> Result<Record, Self::Error>;
}

/// What happened to one listed record.
#[derive(Debug)]
pub enum RecordOutcome {
    MissingId,
    FetchFailed(String),
    Published(PublishOutcome),
}

#[derive(Debug, Default)]
pub struct Report {
    /// Newly written documents.
    pub written: usize,
    pub outcomes: Vec<(Option<RecordId>, RecordOutcome)>,
}

impl Report {
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Published(PublishOutcome::Skipped)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                RecordOutcome::FetchFailed(_)
                    | RecordOutcome::Published(PublishOutcome::WriteFailed(_))
            )
        })
    }

    fn count(&self, pred: impl Fn(&RecordOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

fn preview(title: &str) -> String {
    title.chars().take(50).collect()
}

/// Fetch every listed record and publish the ones that are new.
///
/// Transport and write failures are logged and the run moves on to the next
/// record. A record with unparseable timestamps aborts the whole run; files
/// written before it stay where they are.
pub fn run<S, D>(source: &S, site: &Site, dest: &D) -> Result<Report, RenderError>
where
    S: RecordSource + ?Sized,
    D: Destination + ?Sized,
{
    info!("listing issues of {}/{}", site.owner, site.repo);
    let summaries = source.list_records().unwrap_or_else(|e| {
        warn!("failed to list issues: {e}");
        Vec::new()
    });
    if summaries.is_empty() {
        info!("no issues found, nothing to do");
        return Ok(Report::default());
    }
    info!("found {} issues", summaries.len());

    let mut report = Report::default();
    for summary in summaries {
        let Some(id) = summary.id().cloned() else {
            report.outcomes.push((None, RecordOutcome::MissingId));
            continue;
        };
        info!(
            "processing issue #{id}: {}...",
            preview(summary.title.as_deref().unwrap_or_default())
        );

        let record = match source.get_record_detail(&id) {
            Ok(record) => record,
            Err(e) => {
                warn!("failed to fetch issue {id}: {e}");
                report
                    .outcomes
                    .push((Some(id), RecordOutcome::FetchFailed(e.to_string())));
                continue;
            }
        };

        let document = render(site, &record)?;
        let outcome = publish(dest, &document);
        if matches!(outcome, PublishOutcome::Written) {
            report.written += 1;
        }
        report
            .outcomes
            .push((Some(id), RecordOutcome::Published(outcome)));
    }
    Ok(report)
}
