use crate::timings::{Prayer, TimeOfDay, TimingsRecord};
use chrono::NaiveDateTime;

pub const TOMORROW_QUALIFIER: &str = "(besok)";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NextPrayer {
    pub prayer: Prayer,
    pub name: String,
    pub time: String,
    pub is_tomorrow: bool,
}

impl NextPrayer {
    fn today(prayer: Prayer, time: TimeOfDay) -> Self {
        Self {
            prayer,
            name: prayer.to_string(),
            time: time.to_string(),
            is_tomorrow: false,
        }
    }

    fn tomorrow(prayer: Prayer, time: TimeOfDay) -> Self {
        Self {
            prayer,
            name: format!("{prayer} {TOMORROW_QUALIFIER}"),
            time: time.to_string(),
            is_tomorrow: true,
        }
    }
}

/// The first of Subuh, Dzuhur, Ashar, Maghrib and Isya that has not passed
/// at `now`. Once Isya has passed this is tomorrow's Subuh, shown with
/// today's Subuh time.
pub fn resolve_next(record: Option<&TimingsRecord>, now: NaiveDateTime) -> Option<NextPrayer> {
    let record = record?;
    let next = Prayer::CANDIDATES
        .iter()
        .copied()
        .find(|prayer| !has_passed(record.time_of(*prayer), now))
        .map(|prayer| NextPrayer::today(prayer, record.time_of(prayer)))
        .unwrap_or_else(|| NextPrayer::tomorrow(Prayer::Subuh, record.subuh));
    Some(next)
}

/// Times are always placed on `now`'s calendar day, whatever day the record
/// was fetched for.
pub fn has_passed(time: TimeOfDay, now: NaiveDateTime) -> bool {
    now > time.on(now.date())
}
