mod common;

use common::{day, fy};
use ghstats::export::{write_artifacts, Artifact, OutputPaths};
use ghstats::table::{ChangeColumn, ContributionColumn, YearTable};
use image::{Rgb, RgbImage};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

fn contributions_table() -> YearTable<ContributionColumn> {
    YearTable::new(&[fy(2014), fy(2015)])
        .unwrap()
        .accumulate(&day(2014, 8, 1), ContributionColumn::CommitNb)
        .unwrap()
        .accumulate(&day(2014, 9, 1), ContributionColumn::CommitNb)
        .unwrap()
        .accumulate(&day(2016, 1, 1), ContributionColumn::Issue)
        .unwrap()
}

#[test]
fn csv_has_header_and_labelled_rows() {
    assert_eq!(
        contributions_table().to_csv(),
        ",commit_nb,pull_request,issue\n7/2014 - 6/2015,2,0,0\n7/2015 - 6/2016,0,0,1\n"
    );
}

#[test]
fn change_report_columns() {
    let table = YearTable::<ChangeColumn>::new(&[fy(2020)]).unwrap();
    assert_eq!(
        table.to_csv().lines().next(),
        Some(",tools_changed,tools_added,wrapper_changed,wrapper_added,data_manager_changed,data_manager_added")
    );
}

#[test]
fn json_output_mirrors_the_table() {
    let output = contributions_table().to_output("galaxyproject/tools-iuc", day(2020, 1, 1));
    let value = serde_json::to_value(&output).unwrap();
    assert_eq!(value["columns"][0], "commit_nb");
    assert_eq!(value["rows"][1]["period"], "7/2015 - 6/2016");
    assert_eq!(value["rows"][0]["counts"], serde_json::json!([2, 0, 0]));
}

#[test]
fn artifacts_land_in_their_directories() {
    let dir = tempdir().unwrap();
    let paths = OutputPaths::new(dir.path());
    let image = RgbImage::from_pixel(30, 20, Rgb([1, 2, 3]));

    write_artifacts(&[
        Artifact::csv(&paths.contributions, &contributions_table()),
        Artifact::lines(&paths.wrappers, &["bwa.xml".to_string(), "samtools.xml".to_string()]),
        Artifact::png(&paths.mosaic, &image).unwrap(),
    ])
    .unwrap();

    assert!(paths.contributions.ends_with("data/contributions.csv"));
    assert_eq!(fs::read_to_string(&paths.wrappers).unwrap(), "bwa.xml\nsamtools.xml\n");
    let decoded = image::open(&paths.mosaic).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (30, 20));
}

#[test]
fn rewrite_replaces_previous_output() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("wrappers.txt");
    fs::write(&target, "a much longer previous run\nwith lines\n").unwrap();

    write_artifacts(&[Artifact::lines(&target, &["tool.xml".to_string()])]).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "tool.xml\n");
    let entries = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn empty_wrapper_list_writes_empty_file() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("wrappers.txt");
    write_artifacts(&[Artifact::lines(&target, &[])]).unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "");
}

#[test]
fn blocked_destination_leaves_every_output_untouched() {
    let dir = tempdir().unwrap();
    let paths = OutputPaths::new(dir.path());
    fs::create_dir_all(paths.contributions.parent().unwrap()).unwrap();
    fs::write(&paths.contributions, "previous run\n").unwrap();
    fs::create_dir_all(paths.mosaic.join("occupied")).unwrap();
    let image = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));

    let result = write_artifacts(&[
        Artifact::csv(&paths.contributions, &contributions_table()),
        Artifact::lines(&paths.wrappers, &["bwa.xml".to_string()]),
        Artifact::png(&paths.mosaic, &image).unwrap(),
    ]);

    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&paths.contributions).unwrap(), "previous run\n");
    assert!(!paths.wrappers.exists());
    let data_entries = fs::read_dir(paths.contributions.parent().unwrap()).unwrap().count();
    assert_eq!(data_entries, 1);
}

#[test]
fn rewrite_keeps_no_backup_of_the_previous_file() {
    let dir = tempdir().unwrap();
    let paths = OutputPaths::new(dir.path());
    fs::create_dir_all(paths.wrappers.parent().unwrap()).unwrap();
    fs::write(&paths.contributions, "old table\n").unwrap();
    fs::write(&paths.wrappers, "old.xml\n").unwrap();

    write_artifacts(&[
        Artifact::csv(&paths.contributions, &contributions_table()),
        Artifact::lines(&paths.wrappers, &["new.xml".to_string()]),
    ])
    .unwrap();

    assert_eq!(fs::read_to_string(&paths.wrappers).unwrap(), "new.xml\n");
    assert!(fs::read_to_string(&paths.contributions).unwrap().starts_with(",commit_nb"));
    let data_entries = fs::read_dir(paths.wrappers.parent().unwrap()).unwrap().count();
    assert_eq!(data_entries, 2);
}
