pub mod github;

pub use github::GitHubClient;

use crate::error::Result;
use crate::model::{Commit, ContentEntry, Contributor, Issue, PullRequest, RepoInfo};
use std::io::Write;

/// Read-only view of one hosted repository.
pub trait RepoSource {
    fn repository(&self) -> Result<RepoInfo>;

    /// Full commit history, or only commits touching `path` when given.
    fn commits(&self, path: Option<&str>) -> Result<Vec<Commit>>;

    /// Pull requests in every state.
    fn pull_requests(&self) -> Result<Vec<PullRequest>>;

    /// Issues in every state, pull requests included and flagged.
    fn issues(&self) -> Result<Vec<Issue>>;

    fn contributors(&self) -> Result<Vec<Contributor>>;

    fn dir_contents(&self, path: &str) -> Result<Vec<ContentEntry>>;

    /// Stream the resource at `url` into `sink`, returning the byte count.
    fn download(&self, url: &str, sink: &mut dyn Write) -> Result<u64>;
}
