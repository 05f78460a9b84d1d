use crate::cli::CommonArgs;
use crate::error::Result;
use crate::export::OutputPaths;
use crate::forge::{GitHubClient, RepoSource};
use crate::model::RepoInfo;
use crate::period::report_range;
use chrono::{DateTime, Utc};
use tracing::info;

/// Validated configuration plus a connected client for one run.
pub struct Session {
    pub client: GitHubClient,
    pub paths: OutputPaths,
}

impl Session {
    /// Fails on bad configuration before any request is made.
    pub fn open(common: &CommonArgs) -> Result<Self> {
        common.validate()?;
        let client = GitHubClient::new(&common.api_url, &common.owner, &common.repo, &common.token)?;
        info!(repository = %client.full_name(), api = %common.api_url, "session opened");
        Ok(Self {
            client,
            paths: OutputPaths::new(&common.out_dir),
        })
    }

    pub fn timeline(&self, now: DateTime<Utc>) -> Result<Timeline> {
        Timeline::fetch(&self.client, now)
    }
}

/// The repository and the contribution years every report is indexed by.
#[derive(Debug, Clone)]
pub struct Timeline {
    pub repository: RepoInfo,
    pub now: DateTime<Utc>,
    pub buckets: Vec<DateTime<Utc>>,
}

impl Timeline {
    pub fn fetch<S: RepoSource + ?Sized>(source: &S, now: DateTime<Utc>) -> Result<Self> {
        let repository = source.repository()?;
        let buckets = report_range(&repository.created_at, &now)?;
        info!(
            repository = %repository.full_name,
            created_at = %repository.created_at,
            years = buckets.len(),
            "timeline resolved"
        );
        Ok(Self {
            repository,
            now,
            buckets,
        })
    }
}
