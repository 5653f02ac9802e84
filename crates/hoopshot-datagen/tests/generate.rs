use std::io::Write;

use hoopshot_core::constants::RIM_CENTRE_X;
use hoopshot_datagen::{DatagenConfig, TraceRecord, generate};

fn single_point(release_x: f64, height: f64, angle: f64) -> DatagenConfig {
    DatagenConfig {
        angle_min: angle,
        angle_max: angle,
        angle_step: 1.0,
        release_x_min: release_x,
        release_x_max: release_x,
        release_x_step: 1.0,
        release_height: height,
        ..Default::default()
    }
}

#[test]
fn drop_shot_writes_one_row_and_trace() {
    let config = single_point(RIM_CENTRE_X, 5.0, 89.0);
    let mut rows = csv::Writer::from_writer(Vec::new());
    let mut traces = Vec::new();

    let summary = generate(&config, &mut rows, Some(&mut traces as &mut dyn Write)).unwrap();
    assert_eq!(summary.attempted, 1);
    assert_eq!(summary.accepted, 1);

    let data = String::from_utf8(rows.into_inner().unwrap()).unwrap();
    let mut lines = data.lines();
    assert_eq!(lines.next(), Some("force,angle,releaseX,distanceFromRim,score"));
    let row: Vec<&str> = lines.next().unwrap().split(',').collect();
    assert_eq!(row[1], "89");
    assert_eq!(row[3], "0");
    assert!(row[4].parse::<f64>().unwrap() >= 999_900.0);
    assert_eq!(row[0].split('.').nth(1).map(str::len), Some(5));
    assert!(lines.next().is_none());

    let text = String::from_utf8(traces).unwrap();
    let records: Vec<TraceRecord> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 1);
    assert!(!records[0].events.is_empty());
}

#[test]
fn unreachable_shot_writes_header_only() {
    let config = single_point(20.0, 2.25, 20.0);
    let mut rows = csv::Writer::from_writer(Vec::new());

    let summary = generate(&config, &mut rows, None).unwrap();
    assert_eq!(summary.infeasible, 1);
    assert_eq!(summary.accepted, 0);

    let data = String::from_utf8(rows.into_inner().unwrap()).unwrap();
    assert_eq!(data.lines().count(), 1);
}

#[test]
fn csv_file_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shots.csv");
    let config = single_point(20.0, 2.25, 20.0);

    let mut rows = csv::Writer::from_path(&path).unwrap();
    generate(&config, &mut rows, None).unwrap();
    drop(rows);

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.len(), 5);
    assert_eq!(&headers[2], "releaseX");
}
