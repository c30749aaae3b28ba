use std::io::Write;
use std::path::PathBuf;

use weathervane::data::chart::{direction_frequency, histogram, time_series, COMPASS_ORDER};
use weathervane::data::classify::classify;
use weathervane::data::error::DataError;
use weathervane::data::filter::{distinct_values, filter_by_location, limit_rows, RowWindow};
use weathervane::data::loader::load_csv;
use weathervane::data::model::CellValue;

/// Write a 500-row weather CSV with three stations and return its path.
/// Station and gust direction repeat on fixed cycles so expected counts are
/// easy to derive.
fn write_weather_fixture(dir: &tempfile::TempDir) -> PathBuf {
    let stations = ["Alpha", "Beta", "Gamma"];
    let directions = ["N", "SW", "ENE", "N", "SSW"];

    let path = dir.path().join("weather.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "Date,Station,MinTemp,MaxTemp,WindGustDir").unwrap();
    for i in 0..500 {
        writeln!(
            file,
            "2024-{:02}-{:02},{},{:.1},{:.1},{}",
            (i / 28) % 12 + 1,
            i % 28 + 1,
            stations[i % 3],
            -2.0 + (i % 25) as f64,
            8.0 + (i % 25) as f64,
            directions[i % 5],
        )
        .unwrap();
    }
    path
}

#[test]
fn date_graph_scenario_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let table = load_csv(&write_weather_fixture(&dir)).unwrap();
    assert_eq!(table.n_rows(), 500);

    let roles = classify(&table);
    assert_eq!(roles.location.as_deref(), Some("Station"));
    let date = roles.date.clone().unwrap();
    assert_eq!(date.name, "Date");
    assert!(!date.needs_coercion);
    assert_eq!(roles.wind_gust_dir, vec!["WindGustDir".to_string()]);

    let domain = distinct_values(&table, "Station");
    assert_eq!(domain.len(), 3);
    assert_eq!(domain[0], CellValue::Text("Alpha".into()));

    let filtered =
        filter_by_location(&table, "Station", &CellValue::Text("Alpha".into())).unwrap();
    assert!(filtered.n_rows() <= table.n_rows());

    let limited = limit_rows(
        &filtered,
        RowWindow {
            limit: 50,
            unbounded: false,
        },
    )
    .unwrap();
    assert_eq!(limited.n_rows(), 50.min(filtered.n_rows()));

    let series = time_series(&limited, "Date", &["MinTemp".into(), "MaxTemp".into()]).unwrap();
    assert_eq!(series.points.len(), 50);
    assert!(series.points.iter().all(|p| p.values.len() == 2));
    assert_eq!(series.series_names, vec!["MinTemp", "MaxTemp"]);
}

#[test]
fn direction_frequency_scenario_zero_fills_the_compass() {
    let dir = tempfile::tempdir().unwrap();
    let table = load_csv(&write_weather_fixture(&dir)).unwrap();

    let freq = direction_frequency(&table, "WindGustDir").unwrap();
    assert_eq!(freq.len(), 16);
    assert_eq!(
        freq.iter().map(|d| d.direction).collect::<Vec<_>>(),
        COMPASS_ORDER.to_vec()
    );
    // 500 rows over a 5-value cycle: N appears twice per cycle.
    assert_eq!(freq.iter().find(|d| d.direction == "N").unwrap().count, 200);
    assert_eq!(freq.iter().find(|d| d.direction == "SW").unwrap().count, 100);
    assert_eq!(freq.iter().find(|d| d.direction == "E").unwrap().count, 0);
    assert_eq!(freq.iter().map(|d| d.count).sum::<usize>(), 500);
}

#[test]
fn histogram_counts_are_conserved_through_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let table = load_csv(&write_weather_fixture(&dir)).unwrap();

    let filtered =
        filter_by_location(&table, "Station", &CellValue::Text("Beta".into())).unwrap();
    let limited = limit_rows(
        &filtered,
        RowWindow {
            limit: 80,
            unbounded: false,
        },
    )
    .unwrap();

    for bins in [5, 20, 100] {
        let hist = histogram(&limited, "MaxTemp", bins).unwrap();
        assert_eq!(hist.len(), bins);
        assert_eq!(hist.iter().map(|b| b.count).sum::<usize>(), 80);
    }
}

#[test]
fn filtering_by_an_unknown_station_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let table = load_csv(&write_weather_fixture(&dir)).unwrap();

    let err = filter_by_location(&table, "Station", &CellValue::Text("Delta".into()))
        .unwrap_err();
    assert!(matches!(err, DataError::InvalidSelection { .. }));
}

#[test]
fn malformed_upload_fails_at_ingestion() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    std::fs::write(&path, "a,b\n1,2,3,4\n\"unterminated\n").unwrap();

    assert!(matches!(load_csv(&path), Err(DataError::Ingest(_))));
}
