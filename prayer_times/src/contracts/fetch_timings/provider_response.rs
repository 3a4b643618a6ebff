use crate::timings::{InvalidTimeOfDay, TimingsRecord};
use serde::Deserialize;

/// Only the fields we read; everything else in the payload is ignored.
#[derive(Deserialize, Debug)]
pub(crate) struct TimingsApiResponse {
    pub code: u16,
    pub data: Option<TimingsApiData>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct TimingsApiData {
    pub timings: ApiTimings,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ApiTimings {
    pub imsak: String,
    pub fajr: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

impl ApiTimings {
    pub(crate) fn into_record(self, date: String) -> Result<TimingsRecord, InvalidTimeOfDay> {
        Ok(TimingsRecord {
            imsak: self.imsak.parse()?,
            subuh: self.fajr.parse()?,
            dzuhur: self.dhuhr.parse()?,
            ashar: self.asr.parse()?,
            maghrib: self.maghrib.parse()?,
            isya: self.isha.parse()?,
            date,
        })
    }
}
