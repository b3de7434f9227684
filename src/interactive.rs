//! Prompt-driven exploration loop: pick a city and filters, page through raw
//! rows, read the statistics, repeat.

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{error, info};

use bikeshare_explorer::error::ExploreError;
use bikeshare_explorer::filter::{DayFilter, MonthFilter};
use bikeshare_explorer::loader::{LoadOptions, TripTable, load_and_filter};
use bikeshare_explorer::output::{write_report, write_rows};
use bikeshare_explorer::preview;
use bikeshare_explorer::registry::{City, DatasetRegistry};
use bikeshare_explorer::stats::StatsReport;

const RULE: &str = "----------------------------------------";

pub struct Session<'a, R, W> {
    input: R,
    out: W,
    registry: &'a DatasetRegistry,
    options: LoadOptions,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(input: R, out: W, registry: &'a DatasetRegistry, options: LoadOptions) -> Self {
        Self {
            input,
            out,
            registry,
            options,
        }
    }

    /// Runs rounds until the user declines to restart or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.out, "Hello! Let's explore some US bikeshare data!")?;

            let Some(city) = self.ask(
                "Would you like to see data for Chicago, New York, or Washington?",
                City::parse,
            )?
            else {
                return Ok(());
            };
            let Some(month) = self.ask(
                "Which month would you like to filter? Please type name of month or type \"all\" if no filter.",
                MonthFilter::parse,
            )?
            else {
                return Ok(());
            };
            let Some(day) = self.ask(
                "Which day would you like to filter? Please type the fullname of weekday or \"all\" if no filter!",
                DayFilter::parse,
            )?
            else {
                return Ok(());
            };
            writeln!(self.out, "{RULE}")?;

            info!(%city, %month, %day, "Starting round");
            writeln!(self.out, "\nLoading data...")?;
            match load_and_filter(self.registry, city, month, day, self.options) {
                Ok(table) => {
                    if !self.show_rows(&table)? {
                        return Ok(());
                    }
                    write_report(&mut self.out, &StatsReport::compute(&table))?;
                }
                Err(e) => {
                    error!(error = %e, "Failed to load trips");
                    writeln!(self.out, "\nCould not load {city}: {e}")?;
                }
            }

            writeln!(self.out, "\nWould you like to restart? Enter yes or no.")?;
            match self.read_answer()? {
                Some(answer) if answer == "yes" => continue,
                _ => return Ok(()),
            }
        }
    }

    /// Re-prompts until `parse` accepts the answer. `None` means input ended.
    fn ask<T>(
        &mut self,
        question: &str,
        parse: fn(&str) -> Result<T, ExploreError>,
    ) -> Result<Option<T>> {
        loop {
            writeln!(self.out, "\n{question}")?;
            let Some(answer) = self.read_answer()? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(_) => {
                    writeln!(self.out, "\nPlease check your input and try again!")?;
                    writeln!(self.out, "\nRestarting...")?;
                }
            }
        }
    }

    /// Offers the raw-row preview, five rows per "yes". Returns `false` if input ended.
    fn show_rows(&mut self, table: &TripTable) -> Result<bool> {
        loop {
            writeln!(self.out, "\nWould you like to preview dataset?")?;
            match self.read_answer()?.as_deref() {
                None => return Ok(false),
                Some("no") => break,
                Some("yes") => {
                    let mut page = 0;
                    loop {
                        write_rows(&mut self.out, &table.schema, preview::page(table, page))?;
                        writeln!(self.out, "\nWould you like to see more?")?;
                        match self.read_answer()?.as_deref() {
                            Some("yes") => page += 1,
                            None => return Ok(false),
                            Some(_) => break,
                        }
                    }
                    break;
                }
                Some(_) => {
                    writeln!(self.out, "\nPlease check your input and try again!")?;
                    writeln!(self.out, "\nRestarting...")?;
                }
            }
        }
        writeln!(self.out, "{RULE}")?;
        Ok(true)
    }

    fn read_answer(&mut self) -> Result<Option<String>> {
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_ascii_lowercase()))
    }
}
