//! End-to-end tests from feed records to written documents.

use super::*;
use crate::feed::{RawFlightRecord, normalize};
use crate::netex::model::Frames;
use crate::schedule::ChainConfig;
use std::collections::HashSet;
use tempfile::tempdir;

fn published() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn board_row(
    id: &str,
    flight: &str,
    arr_dep: &str,
    queried: &str,
    remote: &str,
    time: &str,
) -> RawFlightRecord {
    RawFlightRecord {
        unique_id: id.to_string(),
        airline: flight[..2].to_string(),
        flight_id: flight.to_string(),
        schedule_time: time.to_string(),
        arr_dep: arr_dep.to_string(),
        airport: remote.to_string(),
        queried_airport: queried.to_string(),
        service_type: Some("J".to_string()),
        dom_int: Some("D".to_string()),
    }
}

/// Both board rows for one leg.
fn leg_rows(id: &str, flight: &str, from: &str, to: &str, dep: &str, arr: &str) -> Vec<RawFlightRecord> {
    vec![
        board_row(id, flight, "D", from, to, dep),
        board_row(id, flight, "A", to, from, arr),
    ]
}

/// Two days of WF149 OSL-HOV-SOG, one DY602 OSL-BGO, and a stray
/// single-event leg.
fn feed() -> Vec<RawFlightRecord> {
    let mut rows = Vec::new();
    for (day, base_id) in [(1, 10), (2, 20)] {
        rows.extend(leg_rows(
            &(base_id + 1).to_string(),
            "WF149",
            "OSL",
            "HOV",
            &format!("2024-01-0{day}T08:00:00Z"),
            &format!("2024-01-0{day}T08:50:00Z"),
        ));
        rows.extend(leg_rows(
            &(base_id + 2).to_string(),
            "WF149",
            "HOV",
            "SOG",
            &format!("2024-01-0{day}T09:15:00Z"),
            &format!("2024-01-0{day}T09:45:00Z"),
        ));
    }
    rows.extend(leg_rows(
        "100",
        "DY602",
        "OSL",
        "BGO",
        "2024-01-01T07:00:00Z",
        "2024-01-01T07:50:00Z",
    ));
    rows.push(board_row("500", "SK4000", "D", "OSL", "TRD", "2024-01-01T10:00:00Z"));
    rows
}

fn events() -> Vec<FlightEvent> {
    normalize(&feed(), chrono_tz::Europe::Oslo)
}

fn all_stops() -> Arc<StopReferenceData> {
    Arc::new(StopReferenceData::build(
        &DerivedStopRegistry::default(),
        known_airports(),
    ))
}

fn converter(stops: Arc<StopReferenceData>) -> Converter {
    Converter::new(ConverterConfig::default(), stops, published())
}

fn frames(doc: &LineDocument) -> &Frames {
    doc.document.frames().unwrap()
}

#[test]
fn feed_to_lines() {
    let lines = build_lines(&events(), &ConverterConfig::default());
    let ids: Vec<_> = lines.iter().map(LineDataSet::local_id).collect();
    assert_eq!(ids, vec!["DY_OSL-BGO", "WF_OSL-SOG"]);

    let wf = &lines[1];
    assert_eq!(wf.routes.len(), 1);
    assert_eq!(wf.routes[0].route_designation, "OSL-HOV-SOG");
    assert_eq!(wf.itineraries().count(), 2);
    assert_eq!(wf.availability_period, AvailabilityPeriod::new(date(1), date(2)));
}

#[test]
fn short_layover_limit_splits_itineraries() {
    let config = ConverterConfig {
        chain: ChainConfig::new(20),
        ..ConverterConfig::default()
    };
    let lines = build_lines(&events(), &config);
    let wf: Vec<_> = lines.iter().filter(|l| l.airline.as_str() == "WF").collect();
    // 25 minutes on the ground at HOV exceeds the limit
    assert_eq!(wf.len(), 2);
    assert!(wf.iter().all(|l| l.routes.iter().all(|r| r.airports.len() == 2)));
}

#[test]
fn convert_all_lines() {
    let lines = build_lines(&events(), &ConverterConfig::default());
    let report = converter(all_stops()).convert_all(&lines);

    assert!(report.failures.is_empty());
    assert_eq!(report.documents.len(), 2);

    let wf = &report.documents[1];
    assert_eq!(wf.line_id, "WF_OSL-SOG");
    let frames = frames(wf);
    let journeys = &frames.timetable_frame.as_ref().unwrap().vehicle_journeys;
    assert_eq!(journeys.len(), 2);
    assert_eq!(journeys[0].passing_times.len(), 3);
}

#[test]
fn same_stop_times_on_two_dates_give_two_day_types() {
    let lines = build_lines(&events(), &ConverterConfig::default());
    let report = converter(all_stops()).convert_all(&lines);
    let calendar = frames(&report.documents[1])
        .service_calendar_frame
        .as_ref()
        .unwrap();

    assert_eq!(calendar.day_types.len(), 2);
    assert_eq!(calendar.day_type_assignments.len(), 2);
    let refs: HashSet<_> = calendar
        .day_type_assignments
        .iter()
        .map(|a| a.day_type_ref.as_str())
        .collect();
    assert_eq!(refs.len(), 2);
    let dates: Vec<_> = calendar.day_type_assignments.iter().map(|a| a.date).collect();
    assert_eq!(dates, vec![date(1), date(2)]);
}

#[test]
fn destination_display_ids_unique() {
    let lines = build_lines(&events(), &ConverterConfig::default());
    let report = converter(all_stops()).convert_all(&lines);

    for doc in &report.documents {
        let displays = &frames(doc)
            .service_frame
            .as_ref()
            .unwrap()
            .destination_displays;
        let ids: HashSet<_> = displays.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), displays.len());
    }
}

#[test]
fn missing_stop_fails_only_its_line() {
    let registry = JsonStopRegistry::from_json(
        r#"[
            {"airport": "OSL", "stopPlaceId": "AVI:StopPlace:OSL",
             "stopPointId": "AVI:ScheduledStopPoint:OSL", "routePointId": "AVI:RoutePoint:OSL"},
            {"airport": "BGO", "stopPlaceId": "AVI:StopPlace:BGO",
             "stopPointId": "AVI:ScheduledStopPoint:BGO", "routePointId": "AVI:RoutePoint:BGO"},
            {"airport": "SOG", "stopPlaceId": "AVI:StopPlace:SOG",
             "stopPointId": "AVI:ScheduledStopPoint:SOG", "routePointId": "AVI:RoutePoint:SOG"}
        ]"#,
    )
    .unwrap();
    let stops = Arc::new(StopReferenceData::build(&registry, known_airports()));
    let lines = build_lines(&events(), &ConverterConfig::default());
    let report = converter(stops).convert_all(&lines);

    assert_eq!(report.documents.len(), 1);
    assert_eq!(report.documents[0].line_id, "DY_OSL-BGO");
    assert_eq!(report.failures.len(), 1);
    let (line_id, err) = &report.failures[0];
    assert_eq!(line_id, "WF_OSL-SOG");
    assert!(err.to_string().contains("HOV"));
}

#[test]
fn common_document_covers_line_span() {
    let lines = build_lines(&events(), &ConverterConfig::default());
    let common = converter(all_stops()).convert_common(&lines).unwrap();
    let validity = &common.data_objects[0].validity_conditions[0];
    assert_eq!(validity.from_date, date(1));
    assert_eq!(validity.to_date, date(2));
}

#[test]
fn common_document_without_lines_uses_publication_date() {
    let common = converter(all_stops()).convert_common(&[]).unwrap();
    let validity = &common.data_objects[0].validity_conditions[0];
    assert_eq!(validity.from_date, date(1));
    assert_eq!(validity.to_date, date(1));
}

#[test]
fn feed_window_follows_local_midnight() {
    let window = feed_window(
        Some(AvailabilityPeriod::new(date(1), date(2))),
        chrono_tz::Europe::Oslo,
    );
    assert_eq!(window.from, Utc.with_ymd_and_hms(2023, 12, 31, 23, 0, 0).unwrap());
    assert_eq!(window.to, Utc.with_ymd_and_hms(2024, 1, 2, 22, 59, 59).unwrap());

    let open = feed_window(None, chrono_tz::Europe::Oslo);
    assert!(open.contains(published()));
}

#[tokio::test]
async fn concurrent_conversion_keeps_order() {
    let lines = build_lines(&events(), &ConverterConfig::default());
    let sequential = converter(all_stops()).convert_all(&lines);
    let concurrent = convert_concurrently(Arc::new(converter(all_stops())), lines).await;

    let ids = |r: &ConversionReport| -> Vec<String> {
        r.documents.iter().map(|d| d.line_id.clone()).collect()
    };
    assert_eq!(ids(&sequential), ids(&concurrent));
    for (a, b) in sequential.documents.iter().zip(&concurrent.documents) {
        assert_eq!(a.document, b.document);
    }
}

/// Write the test feed into `dir` and return a run config for it.
fn app_config(dir: &std::path::Path) -> AppConfig {
    let feed_path = dir.join("feed.json");
    let rows: Vec<serde_json::Value> = feed()
        .iter()
        .map(|r| {
            serde_json::json!({
                "uniqueId": r.unique_id,
                "airline": r.airline,
                "flightId": r.flight_id,
                "scheduleTime": r.schedule_time,
                "arrDep": r.arr_dep,
                "airport": r.airport,
                "queriedAirport": r.queried_airport,
                "serviceType": r.service_type,
                "domInt": r.dom_int,
            })
        })
        .collect();
    std::fs::write(&feed_path, serde_json::to_string(&rows).unwrap()).unwrap();

    AppConfig {
        feed_path,
        stop_registry_path: None,
        quay_map_path: None,
        output_dir: dir.join("out"),
        converter: ConverterConfig::default(),
    }
}

#[tokio::test]
async fn run_writes_documents() {
    let dir = tempdir().unwrap();
    let config = app_config(dir.path());
    let output_dir = config.output_dir.clone();

    let summary = run(&config, published()).await.unwrap();
    assert_eq!(summary.lines_written, 2);
    assert!(summary.failed_lines.is_empty());
    assert!(summary.common_written);
    assert!(summary.is_complete());
    assert!(output_dir.join("_avi_shared_data.json").exists());
    assert!(output_dir.join("AVI_DY_OSL-BGO.json").exists());
    assert!(output_dir.join("AVI_WF_OSL-SOG.json").exists());
}

#[tokio::test]
async fn common_write_failure_keeps_lines() {
    let dir = tempdir().unwrap();
    let config = app_config(dir.path());
    let output_dir = config.output_dir.clone();
    // A directory in the way makes the rename onto the common file fail
    std::fs::create_dir_all(output_dir.join("_avi_shared_data.json")).unwrap();

    let summary = run(&config, published()).await.unwrap();
    assert!(!summary.common_written);
    assert!(!summary.is_complete());
    assert_eq!(summary.lines_written, 2);
    assert!(output_dir.join("AVI_DY_OSL-BGO.json").is_file());
    assert!(output_dir.join("AVI_WF_OSL-SOG.json").is_file());
}

#[tokio::test]
async fn line_write_failure_keeps_other_lines() {
    let dir = tempdir().unwrap();
    let config = app_config(dir.path());
    let output_dir = config.output_dir.clone();
    std::fs::create_dir_all(output_dir.join("AVI_DY_OSL-BGO.json")).unwrap();

    let summary = run(&config, published()).await.unwrap();
    assert!(summary.common_written);
    assert_eq!(summary.lines_written, 1);
    assert_eq!(summary.failed_lines, vec!["DY_OSL-BGO".to_string()]);
    assert!(output_dir.join("AVI_WF_OSL-SOG.json").is_file());
}

#[tokio::test]
async fn panicked_conversion_fails_its_line() {
    let joined = tokio::task::spawn_blocking(|| -> Result<LineDocument, ConversionError> {
        panic!("conversion worker died")
    })
    .await;

    let mut report = ConversionReport::default();
    report.record_joined("DY_OSL-BGO".to_string(), joined);
    assert!(report.documents.is_empty());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, "DY_OSL-BGO");
    assert!(matches!(report.failures[0].1, ConversionError::Aborted(_)));
}

#[tokio::test]
async fn run_fails_without_feed() {
    let dir = tempdir().unwrap();
    let config = AppConfig {
        feed_path: dir.path().join("missing.json"),
        stop_registry_path: None,
        quay_map_path: None,
        output_dir: dir.path().join("out"),
        converter: ConverterConfig::default(),
    };
    let err = run(&config, published()).await.unwrap_err();
    assert!(matches!(err, RunError::Feed(_)));
}
