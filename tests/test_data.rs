use chrono::{NaiveDate, NaiveDateTime};
use energy_forecast::data::{Reading, SourceLoader, TimeSeries};
use energy_forecast::error::ForecastError;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

fn ts(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 1, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn reading(day: u32, hour: u32, value: f64) -> Reading {
    Reading {
        timestamp: ts(day, hour),
        value,
    }
}

#[test]
fn test_batches_are_sorted_and_unique() {
    let batches = vec![
        vec![reading(2, 0, 20.0), reading(1, 5, 15.0)],
        vec![reading(1, 0, 10.0), reading(1, 23, 18.0)],
    ];

    let series = TimeSeries::from_batches(batches).unwrap();
    let timestamps = series.timestamps();

    assert_eq!(series.len(), 4);
    assert_eq!(
        timestamps,
        vec![ts(1, 0), ts(1, 5), ts(1, 23), ts(2, 0)]
    );
    assert_eq!(series.last_timestamp(), ts(2, 0));
}

#[test]
fn test_overlapping_batches_keep_last_reading() {
    let batches = vec![
        vec![reading(1, 0, 10.0), reading(1, 1, 11.0)],
        vec![reading(1, 1, 99.0)],
    ];

    let series = TimeSeries::from_batches(batches).unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(series.values(), vec![10.0, 99.0]);
}

#[test]
fn test_empty_input_is_fatal() {
    let result = TimeSeries::from_batches(vec![]);
    assert!(matches!(result, Err(ForecastError::NoSourceData(_))));

    let result = TimeSeries::from_batches(vec![vec![], vec![]]);
    assert!(matches!(result, Err(ForecastError::NoSourceData(_))));
}

#[test]
fn test_loader_combines_directory_sources() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("january.csv"),
        "date,hour,energy\n2023-01-01,0,100.0\n2023-01-01,1,101.5\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("february.csv"),
        "date,hour,energy\n2023-01-01,2,103.0\n2023-01-01,3,104.5\n",
    )
    .unwrap();

    let series = SourceLoader::load_dir(dir.path()).unwrap();

    assert_eq!(series.len(), 4);
    assert_eq!(series.values(), vec![100.0, 101.5, 103.0, 104.5]);
}

#[test]
fn test_loader_accepts_clock_style_hours() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("clock.csv"),
        "date,hour,energy\n2023-01-01,13:00,250.0\n",
    )
    .unwrap();

    let series = SourceLoader::load_dir(dir.path()).unwrap();

    assert_eq!(series.timestamps(), vec![ts(1, 13)]);
}

#[test]
fn test_loader_skips_unreadable_source() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("bad.csv"),
        "date,hour,energy\nnot-a-date,zz,oops\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("good.csv"),
        "date,hour,energy\n2023-01-01,0,100.0\n",
    )
    .unwrap();

    let series = SourceLoader::load_dir(dir.path()).unwrap();

    assert_eq!(series.len(), 1);
    assert_eq!(series.values(), vec![100.0]);
}

#[test]
fn test_loader_fails_when_all_sources_fail() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("bad.csv"),
        "date,hour,energy\nnot-a-date,zz,oops\n",
    )
    .unwrap();

    let result = SourceLoader::load_dir(dir.path());
    assert!(matches!(result, Err(ForecastError::NoSourceData(_))));
}

#[test]
fn test_loader_fails_on_empty_directory() {
    let dir = tempdir().unwrap();
    let result = SourceLoader::load_dir(dir.path());
    assert!(matches!(result, Err(ForecastError::NoSourceData(_))));
}

#[test]
fn test_missing_actuals_degrades_to_empty() {
    let dir = tempdir().unwrap();
    let actuals = SourceLoader::load_actuals(dir.path().join("missing.csv")).unwrap();
    assert!(actuals.is_empty());
}
