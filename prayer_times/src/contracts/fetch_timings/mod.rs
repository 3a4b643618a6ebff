mod provider_response;

use crate::config::TimingsProviderConfig;
use crate::notifications::{Notification, Notifier};
use crate::regions::RegionTable;
use crate::timings::TimingsRecord;
use chrono::NaiveDate;
use shared_kernel::clock::Clock;
use shared_kernel::http_client::HttpClient;
use std::sync::Arc;
use thiserror::Error as ThisError;

pub const TODAY_LABEL: &str = "Hari Ini";

#[derive(ThisError, Debug)]
pub enum FetchTimingsError {
    #[error("Failed to build the timings url")]
    InvalidUrl(#[from] url::ParseError),
    #[error("The timings provider could not be reached")]
    Transport(#[source] shared_kernel::http_client::HttpClientError),
    #[error("The timings provider returned a malformed response: {0}")]
    MalformedResponse(String),
}

/// Turns a region and a date into one day's [`TimingsRecord`].
pub struct TimingsFetcher {
    client: HttpClient,
    provider: TimingsProviderConfig,
    regions: Arc<RegionTable>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
}

impl TimingsFetcher {
    pub fn new(
        provider: TimingsProviderConfig,
        regions: Arc<RegionTable>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> anyhow::Result<Self> {
        let client = HttpClient::new(provider.timeout())?;
        Ok(Self {
            client,
            provider,
            regions,
            clock,
            notifier,
        })
    }

    /// Fetches timings for `region` on `date` (today when `None`).
    ///
    /// Any failure is logged, reported once through the notifier, and
    /// returned as `None`.
    #[tracing::instrument(skip(self), level = "info")]
    pub async fn fetch_timings(
        &self,
        region: &str,
        date: Option<NaiveDate>,
    ) -> Option<TimingsRecord> {
        let date = date.unwrap_or_else(|| self.clock.today());
        match fetch::execute(self, region, date).await {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::error!(error = ?err, "Error fetching prayer times");
                self.notifier.notify(Notification::TimingsUnavailable);
                None
            }
        }
    }
}

pub(crate) mod fetch {
    use super::provider_response::TimingsApiResponse;
    use super::{FetchTimingsError, TimingsFetcher, TODAY_LABEL};
    use crate::timings::TimingsRecord;
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
    use shared_kernel::http_client::HttpClientError;
    use url::Url;

    const SUCCESS_CODE: u16 = 200;

    pub(crate) async fn execute(
        fetcher: &TimingsFetcher,
        region: &str,
        date: NaiveDate,
    ) -> Result<TimingsRecord, FetchTimingsError> {
        let coordinate = fetcher.regions.coordinate_for(region);
        let url = Url::parse_with_params(
            &format!(
                "{}/v1/timings/{}",
                fetcher.provider.host.trim_end_matches('/'),
                request_date(date)
            ),
            &[
                ("latitude", coordinate.latitude.to_string()),
                ("longitude", coordinate.longitude.to_string()),
                ("method", fetcher.provider.calculation_method.to_string()),
            ],
        )?;

        let response = fetcher
            .client
            .get_json::<TimingsApiResponse>(url)
            .await
            .map_err(|err| match err {
                HttpClientError::Decode { source, .. } => {
                    FetchTimingsError::MalformedResponse(source.to_string())
                }
                err => FetchTimingsError::Transport(err),
            })?;

        if response.code != SUCCESS_CODE {
            return Err(FetchTimingsError::MalformedResponse(format!(
                "unexpected code {}",
                response.code
            )));
        }
        let data = response
            .data
            .ok_or_else(|| FetchTimingsError::MalformedResponse("missing data".to_string()))?;

        data.timings
            .into_record(display_date(date, fetcher.clock.today()))
            .map_err(|err| FetchTimingsError::MalformedResponse(err.to_string()))
    }

    /// `dd-MM-yyyy`, as the provider expects in the path.
    pub(crate) fn request_date(date: NaiveDate) -> String {
        date.format("%d-%m-%Y").to_string()
    }

    pub(crate) fn display_date(date: NaiveDate, today: NaiveDate) -> String {
        if date == today {
            return TODAY_LABEL.to_string();
        }
        Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
            .format_localized("%A, %-d %B %Y", chrono::Locale::id_ID)
            .to_string()
    }

}
