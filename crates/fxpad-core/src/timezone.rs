//! Timezone → country resolution over a static dataset.
//!
//! The dataset maps IANA timezone names to compact entries:
//!
//! | Key | Meaning | Default |
//! |-----|---------|---------|
//! | `u` | UTC offset in minutes | `0` |
//! | `d` | DST offset in minutes | the UTC offset |
//! | `a` | canonical timezone this name is an alias of | none |
//! | `c` | country codes using the timezone | the alias's countries |
//! | `r` | deprecated marker | not deprecated |
//!
//! A record reports `deprecated` only for a non-zero `r`, but any entry that
//! carries `r` at all is left out of a country's current timezone list.
//!
//! Records are built on first request and memoized for the lifetime of the
//! resolver. The dataset never changes, so the caches are insert-only and
//! skipping them would only cost time.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::CoreError;

const BUNDLED_TIMEZONES: &str = include_str!("../data/timezones.json");

/// Raw timezone entry as stored in the dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimezoneEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub u: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<u8>,
}

impl TimezoneEntry {
    fn is_deprecated(&self) -> bool {
        self.r.is_some_and(|flag| flag != 0)
    }

    fn is_current(&self) -> bool {
        self.r.is_none()
    }
}

/// Static timezone dataset: country names plus timezone entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimezoneDataset {
    pub countries: BTreeMap<String, String>,
    pub timezones: BTreeMap<String, TimezoneEntry>,
}

/// Resolved timezone with alias fields merged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimezoneRecord {
    pub name: String,
    pub countries: Vec<String>,
    pub utc_offset: i32,
    pub utc_offset_str: String,
    pub dst_offset: i32,
    pub dst_offset_str: String,
    pub alias_of: Option<String>,
    pub deprecated: bool,
}

/// Country with both its current and its full timezone lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Country {
    pub id: String,
    pub name: String,
    pub timezones: Vec<String>,
    pub all_timezones: Vec<String>,
}

/// Country as handed to callers: one timezone list, chosen by [`CountryOptions`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryView {
    pub id: String,
    pub name: String,
    pub timezones: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountryOptions {
    /// Deliver every timezone, including deprecated names.
    pub include_deprecated: bool,
}

impl CountryOptions {
    pub const fn with_deprecated() -> Self {
        Self {
            include_deprecated: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CountryTimezones {
    current: Vec<String>,
    all: Vec<String>,
}

/// Memoizing resolver over a [`TimezoneDataset`].
#[derive(Debug)]
pub struct TimezoneResolver {
    dataset: TimezoneDataset,
    index: OnceLock<BTreeMap<String, CountryTimezones>>,
    timezones: Mutex<HashMap<String, TimezoneRecord>>,
    countries: Mutex<HashMap<String, Country>>,
    index_builds: AtomicUsize,
    timezone_builds: AtomicUsize,
    country_builds: AtomicUsize,
}

impl TimezoneResolver {
    pub fn new(dataset: TimezoneDataset) -> Self {
        Self {
            dataset,
            index: OnceLock::new(),
            timezones: Mutex::new(HashMap::new()),
            countries: Mutex::new(HashMap::new()),
            index_builds: AtomicUsize::new(0),
            timezone_builds: AtomicUsize::new(0),
            country_builds: AtomicUsize::new(0),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Process-wide resolver over the dataset compiled into the crate.
    pub fn bundled() -> &'static Self {
        static BUNDLED: OnceLock<TimezoneResolver> = OnceLock::new();
        BUNDLED.get_or_init(|| {
            Self::from_json(BUNDLED_TIMEZONES).expect("bundled timezone dataset must be valid")
        })
    }

    /// Look up a timezone by IANA name.
    pub fn timezone(&self, name: &str) -> Option<TimezoneRecord> {
        let mut cache = self
            .timezones
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(record) = cache.get(name) {
            return Some(record.clone());
        }

        let record = self.build_timezone(name)?;
        cache.insert(name.to_owned(), record.clone());
        Some(record)
    }

    /// Look up a country by its two-letter id.
    pub fn country(&self, id: &str, options: CountryOptions) -> Option<CountryView> {
        let mut cache = self
            .countries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(country) = cache.get(id) {
            return Some(deliver_country(country, options));
        }

        let country = self.build_country(id)?;
        let view = deliver_country(&country, options);
        cache.insert(id.to_owned(), country);
        Some(view)
    }

    /// Countries using `name`, in dataset order. Codes without a known
    /// country name come back as `None`; an unknown timezone yields an
    /// empty list.
    pub fn countries_for_timezone(
        &self,
        name: &str,
        options: CountryOptions,
    ) -> Vec<Option<CountryView>> {
        let Some(timezone) = self.timezone(name) else {
            return Vec::new();
        };

        timezone
            .countries
            .iter()
            .map(|id| self.country(id, options))
            .collect()
    }

    /// Best-guess country for a timezone: the first one it lists.
    pub fn country_for_timezone(&self, name: &str, options: CountryOptions) -> Option<CountryView> {
        self.countries_for_timezone(name, options)
            .into_iter()
            .next()
            .flatten()
    }

    pub fn index_build_count(&self) -> usize {
        self.index_builds.load(Ordering::Relaxed)
    }

    pub fn timezone_build_count(&self) -> usize {
        self.timezone_builds.load(Ordering::Relaxed)
    }

    pub fn country_build_count(&self) -> usize {
        self.country_builds.load(Ordering::Relaxed)
    }

    fn build_timezone(&self, name: &str) -> Option<TimezoneRecord> {
        let entry = self.dataset.timezones.get(name)?;
        self.timezone_builds.fetch_add(1, Ordering::Relaxed);

        let alias_of = entry.a.clone();
        let alias = alias_of
            .as_deref()
            .and_then(|alias| self.dataset.timezones.get(alias));

        // Alias fields first, then the entry's own fields win.
        let mut merged = alias.cloned().unwrap_or_default();
        if entry.u.is_some() {
            merged.u = entry.u;
        }
        if entry.d.is_some() {
            merged.d = entry.d;
        }
        if entry.c.is_some() {
            merged.c = entry.c.clone();
        }

        let utc_offset = merged.u.unwrap_or(0);
        let dst_offset = merged
            .d
            .filter(|offset| offset.is_finite() && offset.fract() == 0.0)
            .map_or(utc_offset, |offset| offset as i32);

        debug!(timezone = name, alias = ?alias_of, "built timezone record");
        Some(TimezoneRecord {
            name: name.to_owned(),
            countries: merged.c.unwrap_or_default(),
            utc_offset,
            utc_offset_str: offset_string(utc_offset),
            dst_offset,
            dst_offset_str: offset_string(dst_offset),
            alias_of,
            deprecated: entry.is_deprecated(),
        })
    }

    fn build_country(&self, id: &str) -> Option<Country> {
        let name = self.dataset.countries.get(id)?;
        self.country_builds.fetch_add(1, Ordering::Relaxed);

        let timezones = self.index().get(id).cloned().unwrap_or_default();
        Some(Country {
            id: id.to_owned(),
            name: name.clone(),
            timezones: timezones.current,
            all_timezones: timezones.all,
        })
    }

    fn index(&self) -> &BTreeMap<String, CountryTimezones> {
        self.index.get_or_init(|| {
            self.index_builds.fetch_add(1, Ordering::Relaxed);
            let index = build_index(&self.dataset);
            debug!(countries = index.len(), "built timezone country index");
            index
        })
    }
}

fn build_index(dataset: &TimezoneDataset) -> BTreeMap<String, CountryTimezones> {
    let mut index: BTreeMap<String, CountryTimezones> = BTreeMap::new();

    for (name, entry) in &dataset.timezones {
        let alias_countries = entry
            .a
            .as_deref()
            .and_then(|alias| dataset.timezones.get(alias))
            .and_then(|alias| alias.c.as_ref());
        let Some(countries) = entry.c.as_ref().or(alias_countries) else {
            continue;
        };

        for country in countries {
            let slot = index.entry(country.clone()).or_default();
            if entry.is_current() {
                slot.current.push(name.clone());
            }
            slot.all.push(name.clone());
        }
    }

    index
}

fn deliver_country(country: &Country, options: CountryOptions) -> CountryView {
    let timezones = if options.include_deprecated {
        &country.all_timezones
    } else {
        &country.timezones
    };

    CountryView {
        id: country.id.clone(),
        name: country.name.clone(),
        timezones: timezones.clone(),
    }
}

/// Render an offset in minutes as `±HH:MM`.
pub fn offset_string(offset: i32) -> String {
    let sign = if offset < 0 { '-' } else { '+' };
    let minutes = offset.unsigned_abs();
    format!("{sign}{:02}:{:02}", minutes / 60, minutes % 60)
}
