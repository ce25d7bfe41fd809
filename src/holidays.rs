use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_API_URL: &str = "https://api-harilibur.vercel.app/api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const LOCAL_HOLIDAY_JSON: &str = include_str!("../data/holiday.json");

#[derive(Debug, Clone, Deserialize)]
pub struct HolidayRecord {
    #[serde(default)]
    pub holiday_date: Option<String>,
    #[serde(default)]
    pub holiday_name: Option<String>,
}

impl HolidayRecord {
    // The API serves dates with unpadded month/day components, so this
    // accepts both "2024-06-07" and "2024-6-7".
    pub fn date(&self) -> Option<NaiveDate> {
        let raw = self.holiday_date.as_deref()?;
        let mut parts = raw.splitn(3, '-');
        let year = parts.next()?.trim().parse::<i32>().ok()?;
        let month = parts.next()?.trim().parse::<u32>().ok()?;
        let day = parts.next()?.trim().parse::<u32>().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

// Process-lifetime cache of public holidays: year -> date -> display name.
// Entries are only ever added; a year key with no dates still counts as
// populated, which is what suppresses refetches after an empty result.
#[derive(Debug, Default)]
pub struct HolidayCache {
    years: HashMap<i32, BTreeMap<NaiveDate, String>>,
}

impl HolidayCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.years.contains_key(&year)
    }

    pub fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        self.years.get(&date.year())?.get(&date).map(String::as_str)
    }

    pub fn mark_year(&mut self, year: i32) {
        self.years.entry(year).or_default();
    }

    // Records land under the year parsed from their own date, and a later
    // record overwrites an earlier one for the same date.
    pub fn insert_records(&mut self, records: &[HolidayRecord]) {
        for record in records {
            let Some(date) = record.date() else {
                continue;
            };
            let Some(name) = record.holiday_name.clone() else {
                continue;
            };
            self.years.entry(date.year()).or_default().insert(date, name);
        }
    }

    pub fn entries_for_year(&self, year: i32) -> Vec<(NaiveDate, &str)> {
        self.years
            .get(&year)
            .map(|dates| {
                dates
                    .iter()
                    .map(|(date, name)| (*date, name.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug)]
pub enum FetchError {
    Http(reqwest::Error),
    UnexpectedShape,
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Http(err) => write!(f, "holiday request failed: {err}"),
            FetchError::UnexpectedShape => write!(f, "holiday response is not an array"),
        }
    }
}

impl std::error::Error for FetchError {}

pub struct HolidayFetcher {
    client: reqwest::blocking::Client,
    api_url: String,
}

impl HolidayFetcher {
    pub fn new(api_url: String) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(FetchError::Http)?;

        Ok(Self { client, api_url })
    }

    pub fn fetch_year(&self, year: i32) -> Result<Vec<HolidayRecord>, FetchError> {
        let payload: Value = self
            .client
            .get(&self.api_url)
            .query(&[("year", year)])
            .send()
            .map_err(FetchError::Http)?
            .json()
            .map_err(FetchError::Http)?;

        records_from_payload(payload)
    }

    // Month view population: remote only. On failure the cache stays
    // untouched so revisiting the year retries.
    pub fn populate_year(&self, cache: &mut HolidayCache, year: i32) -> Result<(), FetchError> {
        let records = self.fetch_year(year)?;
        cache.mark_year(year);
        cache.insert_records(&records);
        Ok(())
    }

    // Year view population: remote results first, then the bundled local
    // document filtered to the year, so local entries win on the same date.
    // A remote failure degrades to local-only and is returned for logging.
    pub fn populate_year_merged(
        &self,
        cache: &mut HolidayCache,
        year: i32,
    ) -> Option<FetchError> {
        let (mut records, remote_error) = match self.fetch_year(year) {
            Ok(records) => (records, None),
            Err(err) => (Vec::new(), Some(err)),
        };
        records.extend(local_holidays(year));

        cache.mark_year(year);
        cache.insert_records(&records);
        remote_error
    }
}

fn records_from_payload(payload: Value) -> Result<Vec<HolidayRecord>, FetchError> {
    let Value::Array(items) = payload else {
        return Err(FetchError::UnexpectedShape);
    };

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        if let Ok(record) = serde_json::from_value::<HolidayRecord>(item) {
            records.push(record);
        }
    }

    Ok(records)
}

pub fn local_holidays(year: i32) -> Vec<HolidayRecord> {
    let parsed: LocalHolidayFile = match serde_json::from_str(LOCAL_HOLIDAY_JSON) {
        Ok(parsed) => parsed,
        Err(_) => return Vec::new(),
    };

    let prefix = format!("{year}-");
    parsed
        .holiday
        .into_iter()
        .filter(|record| {
            record
                .holiday_date
                .as_deref()
                .is_some_and(|date| date.starts_with(&prefix))
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct LocalHolidayFile {
    #[serde(default)]
    holiday: Vec<HolidayRecord>,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::{FetchError, HolidayCache, HolidayRecord, local_holidays, records_from_payload};

    fn record(date: &str, name: &str) -> HolidayRecord {
        HolidayRecord {
            holiday_date: Some(date.to_string()),
            holiday_name: Some(name.to_string()),
        }
    }

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("date should parse")
    }

    #[test]
    fn parses_unpadded_date_components() {
        assert_eq!(record("2024-6-7", "x").date(), Some(date("2024-06-07")));
        assert_eq!(record("2024-06-17", "x").date(), Some(date("2024-06-17")));
        assert_eq!(record("garbage", "x").date(), None);
        assert_eq!(record("2024-13-01", "x").date(), None);
    }

    #[test]
    fn cached_holiday_resolves_by_date() {
        let mut cache = HolidayCache::new();
        cache.insert_records(&[record("2024-06-17", "Hari Raya Idul Adha")]);

        assert!(cache.contains_year(2024));
        assert_eq!(
            cache.holiday_name(date("2024-06-17")),
            Some("Hari Raya Idul Adha")
        );
        assert_eq!(cache.holiday_name(date("2024-06-18")), None);
        assert_eq!(cache.holiday_name(date("2023-06-17")), None);
    }

    #[test]
    fn records_cache_under_their_own_year() {
        let mut cache = HolidayCache::new();
        cache.insert_records(&[record("2023-12-25", "Hari Raya Natal")]);

        assert!(cache.contains_year(2023));
        assert!(!cache.contains_year(2024));
        assert_eq!(
            cache.holiday_name(date("2023-12-25")),
            Some("Hari Raya Natal")
        );
    }

    #[test]
    fn later_record_overwrites_earlier_for_same_date() {
        let mut cache = HolidayCache::new();
        cache.insert_records(&[
            record("2024-06-17", "From API"),
            record("2024-06-17", "From local file"),
        ]);

        assert_eq!(
            cache.holiday_name(date("2024-06-17")),
            Some("From local file")
        );
    }

    #[test]
    fn records_without_usable_dates_are_skipped() {
        let mut cache = HolidayCache::new();
        cache.insert_records(&[
            HolidayRecord {
                holiday_date: None,
                holiday_name: Some("nameless date".to_string()),
            },
            record("not-a-date", "broken"),
        ]);

        assert!(!cache.contains_year(2024));
    }

    #[test]
    fn non_array_payload_is_rejected_and_caches_nothing() {
        let payload = json!({ "error": "year parameter missing" });
        let result = records_from_payload(payload);
        assert!(matches!(result, Err(FetchError::UnexpectedShape)));

        let cache = HolidayCache::new();
        assert!(!cache.contains_year(2024));
        assert!(cache.entries_for_year(2024).is_empty());
    }

    #[test]
    fn array_payload_tolerates_extra_fields() {
        let payload = json!([
            {
                "holiday_date": "2024-6-17",
                "holiday_name": "Hari Raya Idul Adha",
                "is_national_holiday": true
            }
        ]);
        let records = records_from_payload(payload).expect("payload should parse");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date(), Some(date("2024-06-17")));
    }

    #[test]
    fn empty_success_still_marks_the_year_populated() {
        let mut cache = HolidayCache::new();
        cache.mark_year(2024);
        cache.insert_records(&[]);

        assert!(cache.contains_year(2024));
        assert!(cache.entries_for_year(2024).is_empty());
    }

    #[test]
    fn local_fallback_filters_by_year() {
        let holidays = local_holidays(2024);
        assert!(!holidays.is_empty());
        assert!(holidays.iter().all(|record| {
            record
                .holiday_date
                .as_deref()
                .is_some_and(|date| date.starts_with("2024-"))
        }));

        let idul_adha = holidays
            .iter()
            .find(|record| record.date() == Some(date("2024-06-17")))
            .expect("bundled data should cover Idul Adha 2024");
        assert_eq!(
            idul_adha.holiday_name.as_deref(),
            Some("Hari Raya Idul Adha")
        );
    }
}
