use crate::error::{GhstatsError, Result};
use crate::period::format_bucket_label;
use crate::table::{Column, YearTable};
use chrono::Utc;
use console::style;
use image::{ImageFormat, RgbImage};
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile, TempPath};
use tracing::{debug, warn};

/// Where every artifact of a run lands.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub contributions: PathBuf,
    pub content_changes: PathBuf,
    pub wrappers: PathBuf,
    pub mosaic: PathBuf,
    pub avatar_dir: PathBuf,
}

impl OutputPaths {
    pub fn new(out_dir: &Path) -> Self {
        let data = out_dir.join("data");
        let images = out_dir.join("images");
        Self {
            contributions: data.join("contributions.csv"),
            content_changes: data.join("content_changes.csv"),
            wrappers: data.join("wrappers"),
            mosaic: images.join("contributors.png"),
            avatar_dir: images.join("avatars"),
        }
    }
}

/// A fully rendered output file waiting to be written.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(path: &Path, bytes: Vec<u8>) -> Self {
        Self {
            path: path.to_path_buf(),
            bytes,
        }
    }

    pub fn csv<C: Column>(path: &Path, table: &YearTable<C>) -> Self {
        Self::new(path, table.to_csv().into_bytes())
    }

    pub fn lines(path: &Path, lines: &[String]) -> Self {
        let mut text = String::new();
        for line in lines {
            text.push_str(line);
            text.push('\n');
        }
        Self::new(path, text.into_bytes())
    }

    pub fn png(path: &Path, image: &RgbImage) -> Result<Self> {
        let mut buf = Cursor::new(Vec::new());
        image.write_to(&mut buf, ImageFormat::Png)?;
        Ok(Self::new(path, buf.into_inner()))
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// A destination that has been swapped in, with the file it replaced.
struct Placed<'a> {
    path: &'a Path,
    backup: Option<TempPath>,
}

impl Placed<'_> {
    fn undo(self) {
        let restored = match self.backup {
            Some(backup) => fs::rename(&backup, self.path),
            None => fs::remove_file(self.path),
        };
        if let Err(e) = restored {
            warn!(path = %self.path.display(), error = %e, "rollback failed");
        }
    }
}

/// Stage every artifact in a temp file next to its destination, then rename
/// them all into place. Either every destination holds its new content or
/// every destination is left as it was.
pub fn write_artifacts(artifacts: &[Artifact]) -> Result<()> {
    for artifact in artifacts {
        if artifact.path.is_dir() {
            return Err(GhstatsError::Other(format!(
                "{} is a directory",
                artifact.path.display()
            )));
        }
    }

    let mut staged = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let dir = parent_dir(&artifact.path);
        fs::create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&artifact.bytes)?;
        tmp.as_file().sync_all()?;
        staged.push((tmp, artifact.path.as_path()));
    }

    let mut placed: Vec<Placed> = Vec::with_capacity(staged.len());
    for (tmp, path) in staged {
        match place(tmp, path) {
            Ok(done) => placed.push(done),
            Err(e) => {
                for done in placed.into_iter().rev() {
                    done.undo();
                }
                return Err(e);
            }
        }
    }

    for done in placed {
        debug!(path = %done.path.display(), "written");
    }
    Ok(())
}

/// Move any existing file at `path` aside, then rename the staged file over it.
fn place(tmp: NamedTempFile, path: &Path) -> Result<Placed<'_>> {
    let backup = if path.exists() {
        let aside = Builder::new()
            .prefix(".ghstats-prev")
            .tempfile_in(parent_dir(path))?
            .into_temp_path();
        fs::rename(path, &aside)?;
        Some(aside)
    } else {
        None
    };

    match tmp.persist(path) {
        Ok(_) => Ok(Placed { path, backup }),
        Err(e) => {
            if let Some(aside) = backup {
                if let Err(restore) = fs::rename(&aside, path) {
                    warn!(path = %path.display(), error = %restore, "rollback failed");
                }
            }
            Err(e.into())
        }
    }
}

pub fn output_table<C: Column>(title: &str, table: &YearTable<C>) {
    let names = YearTable::<C>::column_names();
    println!("{}", style(title).bold());

    let mut header = format!("{:<17}", style("Period").bold());
    for name in &names {
        header.push_str(&format!(" {:>width$}", style(name).bold(), width = name.len()));
    }
    println!("{header}");
    println!("{}", "─".repeat(17 + names.iter().map(|n| n.len() + 1).sum::<usize>()));

    for (bucket, counts) in table.rows() {
        let mut line = format!("{:<17}", format_bucket_label(bucket));
        for (name, count) in names.iter().zip(counts) {
            line.push_str(&format!(" {:>width$}", count, width = name.len()));
        }
        println!("{line}");
    }
    println!();
}

pub fn output_json<C: Column>(table: &YearTable<C>, repository: &str) -> Result<()> {
    let output = table.to_output(repository, Utc::now());
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
