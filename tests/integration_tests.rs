use bikeshare_explorer::error::ExploreError;
use bikeshare_explorer::filter::{DayFilter, MonthFilter};
use bikeshare_explorer::loader::{LoadOptions, load_and_filter, load_table};
use bikeshare_explorer::preview;
use bikeshare_explorer::registry::{City, DatasetRegistry};
use bikeshare_explorer::stats::{
    StatsReport, SubStat, Unavailable, station_stats, temporal_stats, user_stats,
};
use chrono::{Datelike, Weekday};

fn registry() -> DatasetRegistry {
    DatasetRegistry::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}

fn load(city: &str, month: &str, day: &str) -> bikeshare_explorer::loader::TripTable {
    load_and_filter(
        &registry(),
        City::parse(city).unwrap(),
        MonthFilter::parse(month).unwrap(),
        DayFilter::parse(day).unwrap(),
        LoadOptions::default(),
    )
    .expect("Failed to load fixture")
}

#[test]
fn test_full_pipeline() {
    let table = load("chicago", "all", "all");
    assert_eq!(table.len(), 10);

    let report = StatsReport::compute(&table);

    let temporal = report.temporal.result.as_ref().unwrap();
    assert_eq!(temporal.month.value, 1);
    assert_eq!(temporal.month.count, 3);
    // Monday, Wednesday, Thursday and Friday all have two trips
    assert_eq!(temporal.day_of_week.value, Weekday::Mon);
    // 9h and 14h both have two trips
    assert_eq!(temporal.hour.value, 9);

    let stations = report.stations.result.as_ref().unwrap();
    assert_eq!(stations.start_station.value, "Lake Shore Dr & Monroe St");
    assert_eq!(stations.end_station.value, "Streeter Dr & Grand Ave");
    assert_eq!(
        stations.trip.value,
        "Lake Shore Dr & Monroe St - Streeter Dr & Grand Ave"
    );
    assert_eq!(stations.trip.count, 2);

    let durations = report.durations.result.as_ref().unwrap();
    assert_eq!(durations.total, 6085.0);
    assert_eq!(durations.mean_rounded, 608.0);

    let users = report.users.result.as_ref().unwrap();
    assert_eq!(
        users.user_types,
        vec![("Subscriber".to_string(), 7), ("Customer".to_string(), 3)]
    );
    assert_eq!(
        users.genders,
        SubStat::Available(vec![("Male".to_string(), 5), ("Female".to_string(), 2)])
    );
    let years = users.birth_years.available().unwrap();
    assert_eq!(
        (years.earliest, years.most_recent, years.most_common),
        (1975, 1992, 1992)
    );
}

#[test]
fn test_filters_restrict_rows() {
    let all = load("chicago", "all", "all");
    let selections = [
        ("january", "all"),
        ("all", "monday"),
        ("january", "saturday"),
        ("june", "friday"),
    ];
    for (month, day) in selections {
        let filtered = load("chicago", month, day);
        assert!(filtered.len() <= all.len());

        let month_filter = MonthFilter::parse(month).unwrap();
        let day_filter = DayFilter::parse(day).unwrap();
        for record in &filtered.records {
            assert!(month_filter.matches(record.start_time.month()));
            assert!(day_filter.matches(record.start_time.weekday()));
        }
    }

    let january = load("chicago", "January", "all");
    let indices: Vec<usize> = january.records.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![9031, 45207, 65924]);

    let saturday = load("chicago", "january", "Saturday");
    assert_eq!(saturday.len(), 1);
    assert_eq!(saturday.records[0].index, 65924);
}

#[test]
fn test_unfiltered_load_matches_source() {
    let raw = load_table(&registry().resolve(City::Chicago), LoadOptions::default()).unwrap();
    let table = load("chicago", "all", "all");
    assert_eq!(table, raw);
    assert_eq!(table.filtered(MonthFilter::All, DayFilter::All), table);
}

#[test]
fn test_month_tie_resolves_to_earlier_month() {
    // May and June both have two trips
    let table = load("new york", "all", "all");
    let temporal = temporal_stats(&table).unwrap();
    assert_eq!(temporal.month.value, 5);
    assert_eq!(temporal.day_of_week.value, Weekday::Wed);
    assert_eq!(temporal.day_of_week.count, 3);
}

#[test]
fn test_washington_has_no_demographics() {
    let table = load("washington", "all", "all");
    let report = StatsReport::compute(&table);

    let users = report.users.result.as_ref().unwrap();
    assert_eq!(users.genders, SubStat::Unavailable(Unavailable::MissingColumn));
    assert_eq!(users.birth_years, SubStat::Unavailable(Unavailable::MissingColumn));
    assert_eq!(users.user_types[0], ("Subscriber".to_string(), 4));

    let durations = report.durations.result.as_ref().unwrap();
    assert!((durations.total - 4905.634).abs() < 1e-6);
    assert_eq!(durations.mean_rounded, 981.0);
    assert!(report.temporal.result.is_ok());
}

#[test]
fn test_empty_selection_isolates_failures() {
    let table = load("washington", "december", "all");
    assert!(table.is_empty());

    assert!(matches!(
        temporal_stats(&table),
        Err(ExploreError::EmptyTable { .. })
    ));
    assert!(station_stats(&table).is_err());
    assert!(user_stats(&table).user_types.is_empty());
    assert!(preview::page(&table, 0).is_empty());
}

#[test]
fn test_preview_pages() {
    let table = load("chicago", "all", "all");
    assert_eq!(preview::page(&table, 0).len(), 5);
    assert_eq!(preview::page(&table, 1).len(), 5);
    assert!(preview::page(&table, 2).is_empty());
    assert_eq!(preview::slice(&table, 8, 5).len(), 2);
    assert!(preview::slice(&table, 50, 5).is_empty());
    assert_eq!(preview::page(&table, 1)[0].index, 1473887);
}

#[test]
fn test_unknown_dataset() {
    assert!(matches!(
        registry().resolve_name("boston"),
        Err(ExploreError::UnknownDataset(_))
    ));
}
