use super::classify::{is_wrapper, skips_subdir};
use crate::error::Result;
use crate::forge::RepoSource;
use crate::model::ContentEntry;
use crate::table::{ChangeColumn, ChangeNb, YearTable};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Top-level directories walked by the change report.
#[derive(Debug, Clone)]
pub struct TreeLayout {
    pub tools_dir: String,
    pub data_managers_dir: String,
}

impl Default for TreeLayout {
    fn default() -> Self {
        Self {
            tools_dir: "tools".to_string(),
            data_managers_dir: "data_managers".to_string(),
        }
    }
}

/// Commit activity on a single path.
#[derive(Debug, Clone)]
pub struct ContentHistory {
    /// Earliest author date touching the path, or the run time when none does.
    pub created_at: DateTime<Utc>,
    pub activity: YearTable<ChangeNb>,
}

impl ContentHistory {
    pub fn change_count(&self) -> u64 {
        self.activity.total(ChangeNb)
    }
}

#[derive(Debug, Clone)]
pub struct ChangeReport {
    pub table: YearTable<ChangeColumn>,
    pub wrappers: Vec<String>,
}

pub fn content_history<S: RepoSource + ?Sized>(
    source: &S,
    buckets: &[DateTime<Utc>],
    path: &str,
    now: DateTime<Utc>,
) -> Result<ContentHistory> {
    let commits = source.commits(Some(path))?;
    let created_at = commits
        .iter()
        .map(|c| c.authored_at)
        .min()
        .map_or(now, |earliest| earliest.min(now));

    let activity = commits
        .iter()
        .try_fold(YearTable::new(buckets)?, |t, c| t.accumulate(&c.authored_at, ChangeNb))?;

    debug!(path, commits = commits.len(), %created_at, "content history");
    Ok(ContentHistory {
        created_at,
        activity,
    })
}

/// Count the entry as added in its creation year and changed in every year it saw a commit.
fn tally(
    table: YearTable<ChangeColumn>,
    history: &ContentHistory,
    added: ChangeColumn,
    changed: ChangeColumn,
) -> Result<YearTable<ChangeColumn>> {
    Ok(table
        .accumulate(&history.created_at, added)?
        .mark_active(&history.activity, ChangeNb, changed))
}

/// Wrapper files of one tool directory, looking one subdirectory level deep.
pub fn find_wrappers<S: RepoSource + ?Sized>(source: &S, tool: &ContentEntry) -> Result<Vec<ContentEntry>> {
    let mut wrappers = Vec::new();
    for entry in source.dir_contents(&tool.path)? {
        if is_wrapper(&entry) {
            wrappers.push(entry);
        } else if entry.is_dir() && !skips_subdir(&entry) {
            wrappers.extend(
                source
                    .dir_contents(&entry.path)?
                    .into_iter()
                    .filter(is_wrapper),
            );
        }
    }
    Ok(wrappers)
}

/// Tools, wrappers and data managers added and changed per contribution year.
pub fn content_changes<S: RepoSource + ?Sized>(
    source: &S,
    buckets: &[DateTime<Utc>],
    layout: &TreeLayout,
    now: DateTime<Utc>,
) -> Result<ChangeReport> {
    let mut table = YearTable::new(buckets)?;
    let mut wrappers = Vec::new();

    let tools = source.dir_contents(&layout.tools_dir)?;
    info!(dir = %layout.tools_dir, entries = tools.len(), "walking tools");
    for tool in &tools {
        let history = content_history(source, buckets, &tool.path, now)?;
        table = tally(table, &history, ChangeColumn::ToolsAdded, ChangeColumn::ToolsChanged)?;

        if !tool.is_dir() {
            continue;
        }
        for wrapper in find_wrappers(source, tool)? {
            let history = content_history(source, buckets, &wrapper.path, now)?;
            table = tally(table, &history, ChangeColumn::WrapperAdded, ChangeColumn::WrapperChanged)?;
            wrappers.push(wrapper.name);
        }
    }

    let managers = source.dir_contents(&layout.data_managers_dir)?;
    info!(dir = %layout.data_managers_dir, entries = managers.len(), "walking data managers");
    for manager in &managers {
        let history = content_history(source, buckets, &manager.path, now)?;
        table = tally(
            table,
            &history,
            ChangeColumn::DataManagerAdded,
            ChangeColumn::DataManagerChanged,
        )?;
    }

    info!(
        tools = tools.len(),
        wrappers = wrappers.len(),
        data_managers = managers.len(),
        "content changes counted"
    );
    Ok(ChangeReport { table, wrappers })
}
