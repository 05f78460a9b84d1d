#![allow(dead_code)]

pub mod stub;

use chrono::{DateTime, TimeZone, Utc};
use ghstats::error::{GhstatsError, Result};
use ghstats::forge::RepoSource;
use ghstats::model::{Commit, ContentEntry, Contributor, Issue, PullRequest, RepoInfo};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::Write;

pub fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, mi, s).unwrap()
}

pub fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    at(y, m, d, 12, 0, 0)
}

/// July 1st 00:00:01 of `year`.
pub fn fy(year: i32) -> DateTime<Utc> {
    at(year, 7, 1, 0, 0, 1)
}

pub fn commit(sha: &str, authored_at: DateTime<Utc>) -> Commit {
    Commit {
        sha: sha.to_string(),
        authored_at,
    }
}

/// In-memory repository used in place of the GitHub API.
#[derive(Default)]
pub struct FakeForge {
    pub repo: Option<RepoInfo>,
    pub commits: Vec<Commit>,
    pub path_commits: HashMap<String, Vec<Commit>>,
    pub pulls: Vec<PullRequest>,
    pub issues: Vec<Issue>,
    pub contributors: Vec<Contributor>,
    pub dirs: HashMap<String, Vec<ContentEntry>>,
    pub avatars: HashMap<String, Vec<u8>>,
    pub failing_paths: Vec<String>,
    pub fail_issues: bool,
    pub downloads: Cell<usize>,
    pub listed_dirs: RefCell<Vec<String>>,
}

impl FakeForge {
    pub fn with_dir(mut self, path: &str, entries: Vec<ContentEntry>) -> Self {
        self.dirs.insert(path.to_string(), entries);
        self
    }

    pub fn with_history(mut self, path: &str, dates: &[DateTime<Utc>]) -> Self {
        let commits = dates
            .iter()
            .enumerate()
            .map(|(i, d)| commit(&format!("{path}-{i}"), *d))
            .collect();
        self.path_commits.insert(path.to_string(), commits);
        self
    }

    pub fn with_avatar(mut self, login: &str, bytes: Vec<u8>) -> Self {
        let url = format!("https://avatars.example.com/{login}");
        self.contributors.push(Contributor {
            login: login.to_string(),
            avatar_url: url.clone(),
        });
        self.avatars.insert(url, bytes);
        self
    }
}

impl RepoSource for FakeForge {
    fn repository(&self) -> Result<RepoInfo> {
        self.repo
            .clone()
            .ok_or_else(|| GhstatsError::Other("no repository".to_string()))
    }

    fn commits(&self, path: Option<&str>) -> Result<Vec<Commit>> {
        match path {
            None => Ok(self.commits.clone()),
            Some(p) if self.failing_paths.iter().any(|f| f == p) => {
                Err(GhstatsError::Other(format!("commits for {p} unavailable")))
            }
            Some(p) => Ok(self.path_commits.get(p).cloned().unwrap_or_default()),
        }
    }

    fn pull_requests(&self) -> Result<Vec<PullRequest>> {
        Ok(self.pulls.clone())
    }

    fn issues(&self) -> Result<Vec<Issue>> {
        if self.fail_issues {
            return Err(GhstatsError::Other("rate limited".to_string()));
        }
        Ok(self.issues.clone())
    }

    fn contributors(&self) -> Result<Vec<Contributor>> {
        Ok(self.contributors.clone())
    }

    fn dir_contents(&self, path: &str) -> Result<Vec<ContentEntry>> {
        self.listed_dirs.borrow_mut().push(path.to_string());
        self.dirs
            .get(path)
            .cloned()
            .ok_or_else(|| GhstatsError::Other(format!("no directory {path}")))
    }

    fn download(&self, url: &str, sink: &mut dyn Write) -> Result<u64> {
        let bytes = self
            .avatars
            .get(url)
            .ok_or_else(|| GhstatsError::Other(format!("404 for {url}")))?;
        self.downloads.set(self.downloads.get() + 1);
        sink.write_all(bytes)?;
        Ok(bytes.len() as u64)
    }
}
