use super::contributions;
use crate::cli::CommonArgs;
use crate::export::{output_json, output_table, write_artifacts, Artifact};
use crate::session::Session;
use anyhow::Context;
use chrono::Utc;

pub fn exec(common: CommonArgs, json: bool) -> anyhow::Result<()> {
    let session = Session::open(&common).context("Failed to start session")?;
    let timeline = session
        .timeline(Utc::now())
        .context("Failed to fetch repository metadata")?;

    let table = contributions(&session.client, &timeline.buckets)
        .context("Failed to count contributions")?;

    write_artifacts(&[Artifact::csv(&session.paths.contributions, &table)])
        .context("Failed to write contributions report")?;

    if json {
        output_json(&table, &timeline.repository.full_name)?;
    } else {
        output_table("Contributions per year", &table);
    }
    Ok(())
}
