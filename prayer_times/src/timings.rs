use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use thiserror::Error as ThisError;

/// The six daily events a record carries, in day order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum Prayer {
    Imsak,
    Subuh,
    Dzuhur,
    Ashar,
    Maghrib,
    Isya,
}

impl Prayer {
    pub const ALL: [Prayer; 6] = [
        Prayer::Imsak,
        Prayer::Subuh,
        Prayer::Dzuhur,
        Prayer::Ashar,
        Prayer::Maghrib,
        Prayer::Isya,
    ];

    /// Events that can be "next". Imsak is informational only.
    pub const CANDIDATES: [Prayer; 5] = [
        Prayer::Subuh,
        Prayer::Dzuhur,
        Prayer::Ashar,
        Prayer::Maghrib,
        Prayer::Isya,
    ];
}

#[derive(ThisError, Debug, PartialEq, Eq)]
#[error("`{0}` is not a HH:MM time of day")]
pub struct InvalidTimeOfDay(pub String);

/// A 24-hour `HH:MM` time, without seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// This time of day on `date`, seconds zeroed.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.0)
    }
}

impl FromStr for TimeOfDay {
    type Err = InvalidTimeOfDay;

    /// Accepts `HH:MM` with an optional trailing zone marker such as
    /// `04:30 (WIB)`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref TIME_OF_DAY_REGEX: Regex =
                Regex::new(r"^\s*(\d{1,2}):(\d{2})(\s*\(.*\))?\s*$")
                    .expect("TIME_OF_DAY_REGEX to compile");
        }

        let invalid = || InvalidTimeOfDay(value.to_owned());
        let captures = TIME_OF_DAY_REGEX.captures(value).ok_or_else(invalid)?;
        let hour = captures[1].parse::<u32>().map_err(|_| invalid())?;
        let minute = captures[2].parse::<u32>().map_err(|_| invalid())?;
        TimeOfDay::new(hour, minute).ok_or_else(invalid)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// One day's timings for a region, as handed to the display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimingsRecord {
    pub imsak: TimeOfDay,
    pub subuh: TimeOfDay,
    pub dzuhur: TimeOfDay,
    pub ashar: TimeOfDay,
    pub maghrib: TimeOfDay,
    pub isya: TimeOfDay,
    /// `Hari Ini` for today, otherwise the long Indonesian date.
    pub date: String,
}

impl TimingsRecord {
    pub fn time_of(&self, prayer: Prayer) -> TimeOfDay {
        match prayer {
            Prayer::Imsak => self.imsak,
            Prayer::Subuh => self.subuh,
            Prayer::Dzuhur => self.dzuhur,
            Prayer::Ashar => self.ashar,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isya => self.isya,
        }
    }

    pub fn schedule(&self) -> Vec<(Prayer, TimeOfDay)> {
        Prayer::ALL
            .iter()
            .map(|prayer| (*prayer, self.time_of(*prayer)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{InvalidTimeOfDay, TimeOfDay};
    use rstest::rstest;

    #[rstest]
    #[case("04:30", "04:30")]
    #[case("4:05", "04:05")]
    #[case("19:00 (WIB)", "19:00")]
    #[case(" 11:45 ", "11:45")]
    #[case("23:59", "23:59")]
    fn test_valid_times_are_normalised(#[case] input: &str, #[case] expected: &str) {
        let time = input.parse::<TimeOfDay>().unwrap();
        assert_eq!(time.to_string(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("24:00")]
    #[case("12:60")]
    #[case("noon")]
    #[case("12-30")]
    #[case("12:30:15")]
    fn test_invalid_times_are_rejected(#[case] input: &str) {
        assert_eq!(
            input.parse::<TimeOfDay>(),
            Err(InvalidTimeOfDay(input.to_owned()))
        );
    }
}
