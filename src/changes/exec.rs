use super::{content_changes, TreeLayout};
use crate::cli::{CommonArgs, TreeArgs};
use crate::export::{output_json, output_table, write_artifacts, Artifact};
use crate::session::Session;
use anyhow::Context;
use chrono::Utc;
use console::style;

impl From<TreeArgs> for TreeLayout {
    fn from(args: TreeArgs) -> Self {
        Self {
            tools_dir: args.tools_dir,
            data_managers_dir: args.data_managers_dir,
        }
    }
}

pub fn exec(common: CommonArgs, tree: TreeArgs, json: bool) -> anyhow::Result<()> {
    let session = Session::open(&common).context("Failed to start session")?;
    let timeline = session
        .timeline(Utc::now())
        .context("Failed to fetch repository metadata")?;

    let layout = TreeLayout::from(tree);
    let report = content_changes(&session.client, &timeline.buckets, &layout, timeline.now)
        .context("Failed to count content changes")?;

    write_artifacts(&[
        Artifact::csv(&session.paths.content_changes, &report.table),
        Artifact::lines(&session.paths.wrappers, &report.wrappers),
    ])
    .context("Failed to write content change reports")?;

    if json {
        output_json(&report.table, &timeline.repository.full_name)?;
    } else {
        output_table("Content changes per year", &report.table);
        println!("Wrappers found: {}", style(report.wrappers.len()).cyan());
    }
    Ok(())
}
