use crate::error::{GhstatsError, Result};
use crate::model::{ReportOutput, ReportRow, SCHEMA_VERSION};
use crate::period::{bucket_start, format_bucket_label, nearest_index};
use chrono::{DateTime, Utc};
use std::marker::PhantomData;

/// A fixed set of counter columns for one report.
pub trait Column: Copy + 'static {
    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    fn index(self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributionColumn {
    CommitNb,
    PullRequest,
    Issue,
}

impl Column for ContributionColumn {
    const ALL: &'static [Self] = &[Self::CommitNb, Self::PullRequest, Self::Issue];

    fn name(self) -> &'static str {
        match self {
            Self::CommitNb => "commit_nb",
            Self::PullRequest => "pull_request",
            Self::Issue => "issue",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeColumn {
    ToolsChanged,
    ToolsAdded,
    WrapperChanged,
    WrapperAdded,
    DataManagerChanged,
    DataManagerAdded,
}

impl Column for ChangeColumn {
    const ALL: &'static [Self] = &[
        Self::ToolsChanged,
        Self::ToolsAdded,
        Self::WrapperChanged,
        Self::WrapperAdded,
        Self::DataManagerChanged,
        Self::DataManagerAdded,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::ToolsChanged => "tools_changed",
            Self::ToolsAdded => "tools_added",
            Self::WrapperChanged => "wrapper_changed",
            Self::WrapperAdded => "wrapper_added",
            Self::DataManagerChanged => "data_manager_changed",
            Self::DataManagerAdded => "data_manager_added",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Single unnamed counter, used for per-path change activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeNb;

impl Column for ChangeNb {
    const ALL: &'static [Self] = &[ChangeNb];

    fn name(self) -> &'static str {
        "change_nb"
    }

    fn index(self) -> usize {
        0
    }
}

/// Zero-filled counters, one row per fiscal-year bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearTable<C: Column> {
    buckets: Vec<DateTime<Utc>>,
    rows: Vec<Vec<u64>>,
    _columns: PhantomData<C>,
}

impl<C: Column> YearTable<C> {
    pub fn new(buckets: &[DateTime<Utc>]) -> Result<Self> {
        if buckets.is_empty() {
            return Err(GhstatsError::InvalidDate(
                "A report needs at least one year bucket".to_string(),
            ));
        }
        Ok(Self {
            buckets: buckets.to_vec(),
            rows: vec![vec![0; C::ALL.len()]; buckets.len()],
            _columns: PhantomData,
        })
    }

    pub fn buckets(&self) -> &[DateTime<Utc>] {
        &self.buckets
    }

    /// Row the event at `at` is attributed to: its fiscal-year start matched
    /// to the nearest bucket, so events outside the range clamp to an end.
    pub fn row_for(&self, at: &DateTime<Utc>) -> Result<usize> {
        let snapped = bucket_start(at)?;
        nearest_index(&self.buckets, &snapped)
            .ok_or_else(|| GhstatsError::Other("Empty year table".to_string()))
    }

    pub fn accumulate(self, at: &DateTime<Utc>, column: C) -> Result<Self> {
        let row = self.row_for(at)?;
        Ok(self.increment(row, column))
    }

    fn increment(mut self, row: usize, column: C) -> Self {
        self.rows[row][column.index()] += 1;
        self
    }

    /// Add one to `column` in every bucket where `activity` has a non-zero count.
    pub fn mark_active<A: Column>(mut self, activity: &YearTable<A>, source: A, column: C) -> Self {
        for (own, counts) in self.rows.iter_mut().zip(&activity.rows) {
            if counts[source.index()] > 0 {
                own[column.index()] += 1;
            }
        }
        self
    }

    pub fn get(&self, bucket: &DateTime<Utc>, column: C) -> Option<u64> {
        let row = self.buckets.iter().position(|b| b == bucket)?;
        Some(self.rows[row][column.index()])
    }

    pub fn column(&self, column: C) -> Vec<u64> {
        self.rows.iter().map(|counts| counts[column.index()]).collect()
    }

    pub fn total(&self, column: C) -> u64 {
        self.rows.iter().map(|counts| counts[column.index()]).sum()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&DateTime<Utc>, &[u64])> {
        self.buckets.iter().zip(self.rows.iter().map(|r| r.as_slice()))
    }

    pub fn column_names() -> Vec<&'static str> {
        C::ALL.iter().map(|c| c.name()).collect()
    }

    /// Header `,col1,col2,...` then one `label,n1,n2,...` line per bucket.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        out.push(',');
        out.push_str(&Self::column_names().join(","));
        out.push('\n');
        for (bucket, counts) in self.rows() {
            out.push_str(&format_bucket_label(bucket));
            for count in counts {
                out.push(',');
                out.push_str(&count.to_string());
            }
            out.push('\n');
        }
        out
    }

    pub fn to_output(&self, repository: &str, generated_at: DateTime<Utc>) -> ReportOutput {
        ReportOutput {
            version: SCHEMA_VERSION,
            generated_at,
            repository: repository.to_string(),
            columns: Self::column_names().into_iter().map(String::from).collect(),
            rows: self
                .rows()
                .map(|(bucket, counts)| ReportRow {
                    period: format_bucket_label(bucket),
                    counts: counts.to_vec(),
                })
                .collect(),
        }
    }
}
