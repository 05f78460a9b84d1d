use crate::cache::AvatarCache;
use crate::error::Result;
use crate::forge::RepoSource;
use crate::model::Contributor;
use crate::util::progress_bar;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// One cached file per contributor, in contributor order.
    pub paths: Vec<PathBuf>,
    pub downloaded: usize,
    pub cached: usize,
}

/// Make sure every contributor's avatar is on disk, downloading only the missing ones.
pub fn fetch_avatars<S: RepoSource + ?Sized>(
    source: &S,
    cache: &AvatarCache,
    contributors: &[Contributor],
) -> Result<FetchReport> {
    let pb = progress_bar(contributors.len() as u64, "Fetching avatars");
    let mut report = FetchReport::default();

    for contributor in contributors {
        let path = if cache.contains(&contributor.login) {
            report.cached += 1;
            cache.path_for(&contributor.login)
        } else {
            let path = cache.store_with(&contributor.login, |sink| {
                source.download(&contributor.avatar_url, sink)
            })?;
            debug!(login = %contributor.login, path = %path.display(), "avatar downloaded");
            report.downloaded += 1;
            path
        };
        report.paths.push(path);
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!(
        dir = %cache.dir().display(),
        downloaded = report.downloaded,
        cached = report.cached,
        "avatars ready"
    );
    Ok(report)
}
