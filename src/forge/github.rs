use super::RepoSource;
use crate::error::{GhstatsError, Result};
use crate::model::{Commit, ContentEntry, Contributor, Issue, PullRequest, RepoInfo};
use crate::util::spinner;
use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Write;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const PER_PAGE: usize = 100;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct WireCommit {
    sha: String,
    commit: WireCommitDetail,
}

#[derive(Debug, Deserialize)]
struct WireCommitDetail {
    author: WireSignature,
}

#[derive(Debug, Deserialize)]
struct WireSignature {
    date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct WireIssue {
    number: u64,
    created_at: DateTime<Utc>,
    pull_request: Option<serde_json::Value>,
}

/// Blocking GitHub REST client bound to one repository.
pub struct GitHubClient {
    api: Client,
    downloads: Client,
    base_url: String,
    owner: String,
    repo: String,
}

impl GitHubClient {
    pub fn new(base_url: &str, owner: &str, repo: &str, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| GhstatsError::Config(format!("Invalid token: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let api = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;
        // Avatar hosts never see the token.
        let downloads = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            api,
            downloads,
            base_url: base_url.trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    fn repo_url(&self, endpoint: &str) -> String {
        let endpoint = endpoint.trim_start_matches('/');
        if endpoint.is_empty() {
            format!("{}/repos/{}/{}", self.base_url, self.owner, self.repo)
        } else {
            format!("{}/repos/{}/{}/{}", self.base_url, self.owner, self.repo, endpoint)
        }
    }

    /// Each path segment is percent-encoded on its own, so `#` or `?` in a name stays in the path.
    fn contents_url(&self, path: &str) -> Result<String> {
        let mut url = Url::parse(&self.repo_url("contents"))
            .map_err(|e| GhstatsError::Config(format!("Invalid API URL {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| GhstatsError::Config(format!("Invalid API URL {}", self.base_url)))?
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url.to_string())
    }

    fn send(&self, url: &str, query: &[(&str, String)]) -> Result<Response> {
        debug!(url, ?query, "GET");
        let response = self.api.get(url).query(query).send()?;
        check_status(url, response)
    }

    fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.repo_url(endpoint);
        Ok(self.send(&url, &[])?.json()?)
    }

    /// Fetch every page of a list endpoint; a short page ends the walk.
    fn get_paginated<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = self.repo_url(endpoint);
        let pb = spinner(&format!("Fetching {endpoint}..."));
        let mut items = Vec::new();
        let mut page = 1usize;

        loop {
            let mut params = query.to_vec();
            params.push(("per_page", PER_PAGE.to_string()));
            params.push(("page", page.to_string()));

            let batch: Vec<T> = match self.send(&url, &params) {
                Ok(response) => response.json()?,
                Err(e) => {
                    pb.abandon_with_message(format!("Failed to fetch {endpoint}"));
                    return Err(e);
                }
            };
            let is_last_page = batch.len() < PER_PAGE;
            items.extend(batch);
            pb.set_message(format!("Fetching {endpoint}... {} so far", items.len()));

            if is_last_page {
                break;
            }
            page += 1;
        }

        pb.finish_and_clear();
        debug!(endpoint, count = items.len(), pages = page, "pagination done");
        Ok(items)
    }
}

fn check_status(url: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(GhstatsError::Status {
        url: url.to_string(),
        status,
        body,
    })
}

impl RepoSource for GitHubClient {
    fn repository(&self) -> Result<RepoInfo> {
        self.get_json("")
    }

    fn commits(&self, path: Option<&str>) -> Result<Vec<Commit>> {
        let query: Vec<(&str, String)> = path.map(|p| ("path", p.to_string())).into_iter().collect();
        let wire: Vec<WireCommit> = self.get_paginated("commits", &query)?;
        Ok(wire
            .into_iter()
            .map(|c| Commit {
                sha: c.sha,
                authored_at: c.commit.author.date,
            })
            .collect())
    }

    fn pull_requests(&self) -> Result<Vec<PullRequest>> {
        self.get_paginated("pulls", &[("state", "all".to_string())])
    }

    fn issues(&self) -> Result<Vec<Issue>> {
        let wire: Vec<WireIssue> = self.get_paginated("issues", &[("state", "all".to_string())])?;
        Ok(wire
            .into_iter()
            .map(|i| Issue {
                number: i.number,
                created_at: i.created_at,
                is_pull_request: i.pull_request.is_some(),
            })
            .collect())
    }

    fn contributors(&self) -> Result<Vec<Contributor>> {
        self.get_paginated("contributors", &[])
    }

    fn dir_contents(&self, path: &str) -> Result<Vec<ContentEntry>> {
        let url = self.contents_url(path)?;
        Ok(self.send(&url, &[])?.json()?)
    }

    fn download(&self, url: &str, sink: &mut dyn Write) -> Result<u64> {
        debug!(url, "download");
        let mut response = check_status(url, self.downloads.get(url).send()?)?;
        Ok(response.copy_to(sink)?)
    }
}
