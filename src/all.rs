use crate::changes::{content_changes, TreeLayout};
use crate::cli::{CommonArgs, MosaicArgs, TreeArgs};
use crate::contrib::contributions;
use crate::export::{output_table, write_artifacts, Artifact};
use crate::session::Session;
use anyhow::Context;
use chrono::Utc;
use console::style;

/// Build every report and the mosaic in memory; touch the output directory only once all succeeded.
pub fn exec(common: CommonArgs, tree: TreeArgs, mosaic: MosaicArgs) -> anyhow::Result<()> {
    mosaic.validate().context("Invalid mosaic size")?;
    let session = Session::open(&common).context("Failed to start session")?;
    let timeline = session
        .timeline(Utc::now())
        .context("Failed to fetch repository metadata")?;

    let contrib = contributions(&session.client, &timeline.buckets)
        .context("Failed to count contributions")?;

    let layout = TreeLayout::from(tree);
    let changes = content_changes(&session.client, &timeline.buckets, &layout, timeline.now)
        .context("Failed to count content changes")?;

    let image = crate::avatar::render(&session, &mosaic)?;

    let paths = &session.paths;
    let artifacts = vec![
        Artifact::csv(&paths.contributions, &contrib),
        Artifact::csv(&paths.content_changes, &changes.table),
        Artifact::lines(&paths.wrappers, &changes.wrappers),
        Artifact::png(&paths.mosaic, &image)?,
    ];
    write_artifacts(&artifacts).context("Failed to write outputs")?;

    output_table("Contributions per year", &contrib);
    output_table("Content changes per year", &changes.table);
    println!("Wrappers found: {}", style(changes.wrappers.len()).cyan());
    println!(
        "Mosaic written to {}",
        style(paths.mosaic.display()).cyan()
    );
    Ok(())
}
