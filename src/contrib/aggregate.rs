use crate::error::Result;
use crate::forge::RepoSource;
use crate::model::{Commit, Issue, PullRequest};
use crate::table::{ContributionColumn, YearTable};
use chrono::{DateTime, Utc};
use tracing::info;

/// Commits, pull requests and issues per contribution year.
pub fn contributions<S: RepoSource + ?Sized>(
    source: &S,
    buckets: &[DateTime<Utc>],
) -> Result<YearTable<ContributionColumn>> {
    let commits = source.commits(None)?;
    let pulls = source.pull_requests()?;
    let issues = source.issues()?;
    info!(
        commits = commits.len(),
        pulls = pulls.len(),
        issues = issues.len(),
        "fetched contribution history"
    );
    tally_contributions(buckets, &commits, &pulls, &issues)
}

pub fn tally_contributions(
    buckets: &[DateTime<Utc>],
    commits: &[Commit],
    pulls: &[PullRequest],
    issues: &[Issue],
) -> Result<YearTable<ContributionColumn>> {
    let table = YearTable::new(buckets)?;

    let table = commits
        .iter()
        .try_fold(table, |t, c| t.accumulate(&c.authored_at, ContributionColumn::CommitNb))?;

    let table = pulls
        .iter()
        .try_fold(table, |t, pr| t.accumulate(&pr.created_at, ContributionColumn::PullRequest))?;

    // The issues endpoint lists pull requests too; those are already counted.
    issues
        .iter()
        .filter(|issue| !issue.is_pull_request)
        .try_fold(table, |t, issue| t.accumulate(&issue.created_at, ContributionColumn::Issue))
}
