//! Output formatting for statistics reports and preview rows.
//!
//! Supports plain-text rendering, JSON serialization, and debug logging.

use anyhow::Result;
use std::io::{self, Write};
use tracing::debug;

use crate::filter::{month_name, weekday_name};
use crate::loader::{Schema, TripRecord};
use crate::stats::report::Timed;
use crate::stats::users::{SubStat, Unavailable};
use crate::stats::{DurationStats, StationStats, StatsReport, TemporalStats, UserStats};

const RULE: &str = "----------------------------------------";

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &StatsReport) {
    debug!("{:#?}", report);
}

/// Serializes a report as pretty-printed JSON.
pub fn to_json(report: &StatsReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes every statistic group as text, each followed by its timing.
pub fn write_report<W: Write>(out: &mut W, report: &StatsReport) -> io::Result<()> {
    write_group(
        out,
        "Calculating The Most Frequent Times of Travel...",
        &report.temporal,
        write_temporal,
    )?;
    write_group(
        out,
        "Calculating The Most Popular Stations and Trip...",
        &report.stations,
        write_stations,
    )?;
    write_group(
        out,
        "Calculating Trip Duration...",
        &report.durations,
        write_durations,
    )?;
    write_group(
        out,
        "Calculating User Stats...",
        &report.users,
        write_users,
    )
}

fn write_group<W: Write, T>(
    out: &mut W,
    heading: &str,
    timed: &Timed<T>,
    body: fn(&mut W, &T) -> io::Result<()>,
) -> io::Result<()> {
    writeln!(out, "\n{heading}\n")?;
    match &timed.result {
        Ok(value) => body(out, value)?,
        Err(e) => writeln!(out, "Not available: {e}")?,
    }
    writeln!(out, "\nThat took {} seconds.", timed.elapsed.as_secs_f64())?;
    writeln!(out, "{RULE}")
}

fn write_temporal<W: Write>(out: &mut W, stats: &TemporalStats) -> io::Result<()> {
    let month = month_name(stats.month.value).unwrap_or_else(|| stats.month.value.to_string());
    writeln!(out, "Most Popular Month: {month}")?;
    writeln!(
        out,
        "\nMost Popular Day: {}",
        weekday_name(stats.day_of_week.value)
    )?;
    writeln!(out, "\nMost Popular Hour: {}", stats.hour.value)
}

fn write_stations<W: Write>(out: &mut W, stats: &StationStats) -> io::Result<()> {
    writeln!(
        out,
        "The most common start station: {}",
        stats.start_station.value
    )?;
    writeln!(
        out,
        "\nThe most common end station: {}",
        stats.end_station.value
    )?;
    writeln!(
        out,
        "\nThe most frequent combination of trips are {} ({} trips).",
        stats.trip.value, stats.trip.count
    )
}

fn write_durations<W: Write>(out: &mut W, stats: &DurationStats) -> io::Result<()> {
    writeln!(out, "The total trip duration: {}", stats.total)?;
    writeln!(out, "The average trip duration: {}", stats.mean_rounded)
}

fn write_users<W: Write>(out: &mut W, stats: &UserStats) -> io::Result<()> {
    writeln!(out, "What is the breakdown of users?")?;
    write_counts(out, &stats.user_types)?;

    match &stats.genders {
        SubStat::Available(counts) => {
            writeln!(out, "\nWhat is the breakdown of gender?")?;
            write_counts(out, counts)?;
        }
        SubStat::Unavailable(_) => writeln!(out, "\nThere is no gender.")?,
    }

    match &stats.birth_years {
        SubStat::Available(years) => writeln!(
            out,
            "\nWhat is the earliest, most recent, and most popular year of birth?\n({},{},{})",
            years.earliest, years.most_recent, years.most_common
        ),
        SubStat::Unavailable(Unavailable::MissingColumn) => {
            writeln!(out, "\nThere are no birth year details in this file.")
        }
        SubStat::Unavailable(Unavailable::NoValues) => {
            writeln!(out, "\nNo trips in this selection have a birth year.")
        }
    }
}

fn write_counts<W: Write>(out: &mut W, counts: &[(String, usize)]) -> io::Result<()> {
    let width = counts.iter().map(|(v, _)| v.len()).max().unwrap_or(0);
    for (value, count) in counts {
        writeln!(out, "{value:<width$}  {count}")?;
    }
    Ok(())
}

/// Writes preview rows as an aligned table, showing only the columns the source has.
pub fn write_rows<W: Write>(out: &mut W, schema: &Schema, rows: &[TripRecord]) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "No more rows.");
    }

    let mut header = vec!["", "Start Time"];
    if schema.has_end_time {
        header.push("End Time");
    }
    header.extend(["Trip Duration", "Start Station", "End Station", "User Type"]);
    if schema.has_gender {
        header.push("Gender");
    }
    if schema.has_birth_year {
        header.push("Birth Year");
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            let mut row = vec![
                r.index.to_string(),
                r.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            ];
            if schema.has_end_time {
                row.push(r.end_time.clone().unwrap_or_default());
            }
            row.extend([
                r.trip_duration.to_string(),
                r.start_station.clone(),
                r.end_station.clone(),
                r.user_type.clone().unwrap_or_default(),
            ]);
            if schema.has_gender {
                row.push(r.gender.clone().unwrap_or_default());
            }
            if schema.has_birth_year {
                row.push(r.birth_year.map(|y| y.to_string()).unwrap_or_default());
            }
            row
        })
        .collect();

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain([h.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |values: Vec<&str>| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(v, &w)| format!("{v:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    writeln!(out, "{}", line(header.clone()))?;
    for row in &cells {
        writeln!(out, "{}", line(row.iter().map(String::as_str).collect()))?;
    }
    Ok(())
}
