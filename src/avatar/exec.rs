use super::{build_mosaic, fetch_avatars, load_tile};
use crate::cache::AvatarCache;
use crate::cli::{CommonArgs, MosaicArgs};
use crate::error::Result;
use crate::export::{write_artifacts, Artifact};
use crate::forge::RepoSource;
use crate::session::Session;
use anyhow::Context;
use console::style;
use image::RgbImage;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

pub fn exec(common: CommonArgs, mosaic: MosaicArgs) -> anyhow::Result<()> {
    mosaic.validate().context("Invalid mosaic size")?;
    let session = Session::open(&common).context("Failed to start session")?;

    let image = render(&session, &mosaic)?;
    write_artifacts(&[Artifact::png(&session.paths.mosaic, &image)?])
        .context("Failed to write contributor mosaic")?;

    println!(
        "Mosaic written to {} ({}x{})",
        style(session.paths.mosaic.display()).cyan(),
        image.width(),
        image.height()
    );
    Ok(())
}

/// Fetch contributor avatars into the cache and composite them, without writing the mosaic.
pub fn render(session: &Session, mosaic: &MosaicArgs) -> anyhow::Result<RgbImage> {
    let contributors = session
        .client
        .contributors()
        .context("Failed to list contributors")?;
    info!(count = contributors.len(), "contributors listed");

    let cache = AvatarCache::new(&session.paths.avatar_dir).context("Failed to create avatar cache")?;
    let report = fetch_avatars(&session.client, &cache, &contributors)
        .context("Failed to download avatars")?;

    let tiles = report
        .paths
        .iter()
        .map(|path| load_tile(path))
        .collect::<Result<Vec<_>>>()
        .context("Failed to decode avatars")?;

    let image = match mosaic.seed {
        Some(seed) => build_mosaic(mosaic.width, mosaic.height, tiles, &mut StdRng::seed_from_u64(seed)),
        None => build_mosaic(mosaic.width, mosaic.height, tiles, &mut rand::thread_rng()),
    }
    .context("Failed to build mosaic")?;
    Ok(image)
}
