//! Interactive prompt loop: ask for filters, print statistics, page raw rows.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use bikeshare_stats::analyzers::{Timed, duration_stats, station_stats, time_stats, timed, user_stats};
use bikeshare_stats::output::{RULE, render_elapsed, render_page};
use bikeshare_stats::{City, DatasetRegistry, DayFilter, FilterSpec, MonthFilter, Table, load, next_page};
use tracing::{error, info};

pub struct Shell<R, W> {
    input: R,
    output: W,
    registry: DatasetRegistry,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, registry: DatasetRegistry) -> Self {
        Self {
            input,
            output,
            registry,
        }
    }

    /// Runs sessions until the user declines a restart or input ends.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;

        loop {
            let Some(spec) = self.prompt_filters()? else {
                break;
            };
            self.run_session(&spec)?;

            let answer = self.ask("\nWould you like to restart? Enter \"Yes\" or \"No\".")?;
            if !answer.is_some_and(|a| a.eq_ignore_ascii_case("yes")) {
                break;
            }
        }

        Ok(())
    }

    fn prompt_filters(&mut self) -> Result<Option<FilterSpec>> {
        let Some(city) = self.prompt_until::<City>(
            "Would you like to see data for Chicago, New York or Washington?",
            "The city you have chosen has not been recognised, please try again",
        )?
        else {
            return Ok(None);
        };
        let Some(month) = self.prompt_until::<MonthFilter>(
            "Which month out of the following do you want to analyse? \n\
             January, February, March, April, May, June or type 'All' to analyze all months. ",
            "You have selected an incorrect month, please try again",
        )?
        else {
            return Ok(None);
        };
        let Some(day) = self.prompt_until::<DayFilter>(
            "Please specify the day of the week you would like to analyze. \
             Or type 'All' to analyze all days of the week \n\
             Enter day of week in the following format (Monday, Tuesday, Wednesday, \
             Thursday, Friday, Saturday or Sunday)",
            "The day of the week you have chosen has not been recognised, please try again",
        )?
        else {
            return Ok(None);
        };

        Ok(Some(FilterSpec { city, month, day }))
    }

    #[tracing::instrument(skip(self))]
    fn run_session(&mut self, spec: &FilterSpec) -> Result<()> {
        let path = self.registry.path_for(spec.city);
        let table = match load(&path) {
            Ok(table) => spec.apply(&table),
            Err(e) => {
                error!(error = %e, "Failed to load trip data");
                writeln!(self.output, "Could not load data for {}: {e}", spec.city)?;
                return Ok(());
            }
        };
        info!(trips = table.len(), "Session table ready");

        writeln!(self.output, "{RULE}")?;
        self.print_block(
            "Calculating The Most Frequent Times of Travel...",
            "time",
            || time_stats(&table),
        )?;
        self.print_block(
            "Calculating The Most Popular Stations and Trip...",
            "stations",
            || station_stats(&table),
        )?;
        self.print_block(
            "Calculating Trip Duration...",
            "duration",
            || duration_stats(&table),
        )?;
        self.print_block(
            "Calculating User Stats...",
            "users",
            || user_stats(&table),
        )?;

        self.page_raw_rows(&table)
    }

    fn print_block<T: Display>(
        &mut self,
        heading: &str,
        label: &str,
        compute: impl FnOnce() -> T,
    ) -> Result<()> {
        let Timed { value, elapsed } = timed(label, compute);
        writeln!(self.output, "\n{heading}\n")?;
        write!(self.output, "{value}")?;
        writeln!(self.output, "\n{}", render_elapsed(elapsed))?;
        writeln!(self.output, "{RULE}")?;
        Ok(())
    }

    fn page_raw_rows(&mut self, table: &Table) -> Result<()> {
        let mut offset = 0;
        loop {
            let answer =
                self.ask("\nWould you like to view individual trip data? Enter \"Yes\" or \"No\"")?;
            if !answer.is_some_and(|a| a.eq_ignore_ascii_case("yes")) {
                return Ok(());
            }

            let (rows, next) = next_page(table, offset);
            if rows.is_empty() {
                writeln!(self.output, "No more trip data to display.")?;
                return Ok(());
            }
            write!(self.output, "{}", render_page(rows)?)?;
            offset = next;
        }
    }

    /// Asks until the answer parses. `None` when input ends.
    fn prompt_until<T: FromStr>(&mut self, question: &str, complaint: &str) -> Result<Option<T>> {
        loop {
            let Some(answer) = self.ask(question)? else {
                return Ok(None);
            };
            match answer.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "{complaint}")?,
            }
        }
    }

    /// Prints `question` and reads one trimmed line. `None` on end of input.
    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        writeln!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
