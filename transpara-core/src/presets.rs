//! Named date presets and the global token registry that resolves them.

use crate::selection::DateRange;
use chrono::{Datelike, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::RwLock;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Preset {
    Today,
    #[strum(serialize = "last 7 days")]
    Last7Days,
    #[strum(serialize = "last 30 days")]
    Last30Days,
    #[strum(serialize = "this year")]
    ThisYear,
    #[strum(serialize = "last year")]
    LastYear,
}

pub struct Presets;

impl Presets {
    /// Returns the global preset registry (input token, canonical preset).
    ///
    /// Initialized once on first access, thread-safe behind an `RwLock`,
    /// with all keys stored lowercased for case-insensitive lookups.
    /// Besides the canonical spellings, compact aliases (`last7`, `last30`)
    /// are seeded; [`extend`](Self::extend) adds user-defined synonyms from
    /// the config file.
    fn registry() -> &'static RwLock<HashMap<String, Preset>> {
        static REGISTRY: Lazy<RwLock<HashMap<String, Preset>>> = Lazy::new(|| {
            let mut m = HashMap::new();
            m.insert("today".to_string(), Preset::Today);
            m.insert("last 7 days".to_string(), Preset::Last7Days);
            m.insert("last7".to_string(), Preset::Last7Days);
            m.insert("last 30 days".to_string(), Preset::Last30Days);
            m.insert("last30".to_string(), Preset::Last30Days);
            m.insert("this year".to_string(), Preset::ThisYear);
            m.insert("last year".to_string(), Preset::LastYear);

            RwLock::new(m)
        });
        &REGISTRY
    }

    /// Extends the global registry with user-defined synonyms.
    ///
    /// Each pair is `(alias, target)`. The target must already be a known
    /// token; unknown targets are ignored silently. Keys are lowercased to
    /// keep lookups case-insensitive. Typical call site: `Config::load()`,
    /// after reading `[synonyms]` from `config.toml`.
    pub fn extend(synonyms: &[(String, String)]) {
        let mut reg = Self::registry().write().unwrap();
        for (alias, target) in synonyms {
            if let Some(&canonical) = reg.get(&normalize(target)) {
                reg.insert(normalize(alias), canonical);
            }
        }
    }

    /// Returns `true` if `word` is a canonical preset spelling (e.g. "today").
    pub fn is_canonical(word: &str) -> bool {
        Preset::iter().any(|p| p.as_ref() == word)
    }

    /// Returns `true` if `input` names the given preset, canonically or via
    /// a registered synonym. Case- and whitespace-insensitive.
    pub fn matches(preset: Preset, input: &str) -> bool {
        Self::parse(input) == Some(preset)
    }

    /// Looks a token up in the registry.
    ///
    /// # Examples
    ///
    /// ```
    /// # use transpara_core::presets::{Preset, Presets};
    /// assert_eq!(Presets::parse("Last  30  Days"), Some(Preset::Last30Days));
    /// assert_eq!(Presets::parse("last30"), Some(Preset::Last30Days));
    /// assert_eq!(Presets::parse("fortnight"), None);
    /// ```
    pub fn parse(input: &str) -> Option<Preset> {
        let reg = Self::registry().read().unwrap();
        reg.get(&normalize(input)).copied()
    }
}

/// Lowercases and collapses runs of whitespace so `"Last  7 days"` and
/// `"last 7 days"` hit the same registry key.
fn normalize(input: &str) -> String {
    static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
    SPACES
        .replace_all(input.trim(), " ")
        .to_ascii_lowercase()
        .to_string()
}

/// Resolves a preset into a concrete range anchored at `reference_date`.
///
/// Resolution is pure: passing the same anchor always yields the same
/// range, so callers (and tests) never depend on the wall clock.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use transpara_core::presets::{resolve, Preset};
/// let anchor = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
/// let r = resolve(Preset::Last30Days, anchor);
/// assert_eq!(r.start, NaiveDate::from_ymd_opt(2024, 1, 3));
/// assert_eq!(r.end, Some(anchor));
/// ```
pub fn resolve(preset: Preset, reference_date: NaiveDate) -> DateRange {
    match preset {
        Preset::Today => DateRange::new(Some(reference_date), Some(reference_date)),
        Preset::Last7Days => DateRange::new(
            Some(reference_date - Duration::days(6)),
            Some(reference_date),
        ),
        Preset::Last30Days => DateRange::new(
            Some(reference_date - Duration::days(29)),
            Some(reference_date),
        ),
        Preset::ThisYear => year_range(reference_date.year()),
        Preset::LastYear => year_range(reference_date.year() - 1),
    }
}

fn year_range(year: i32) -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn canonical_tokens_parse() {
        assert_eq!(Presets::parse("today"), Some(Preset::Today));
        assert_eq!(Presets::parse("last 7 days"), Some(Preset::Last7Days));
        assert_eq!(Presets::parse("this year"), Some(Preset::ThisYear));
        assert_eq!(Presets::parse("last year"), Some(Preset::LastYear));
    }

    #[test]
    fn parse_is_case_and_spacing_insensitive() {
        assert_eq!(Presets::parse("TODAY"), Some(Preset::Today));
        assert_eq!(Presets::parse("  Last   30   Days "), Some(Preset::Last30Days));
    }

    #[test]
    fn compact_aliases_are_seeded() {
        assert_eq!(Presets::parse("last7"), Some(Preset::Last7Days));
        assert_eq!(Presets::parse("last30"), Some(Preset::Last30Days));
    }

    #[test]
    fn synonyms_extend() {
        Presets::extend(&[
            ("l30".into(), "last 30 days".into()),
            ("ytd".into(), "this year".into()),
            ("bogus".into(), "next century".into()),
        ]);
        assert!(Presets::matches(Preset::Last30Days, "l30"));
        assert!(Presets::matches(Preset::ThisYear, "YTD"));
        assert_eq!(Presets::parse("bogus"), None);
    }

    #[test]
    fn today_resolves_to_the_anchor_on_both_sides() {
        let anchor = d(2024, 2, 1);
        let r = resolve(Preset::Today, anchor);
        assert_eq!(r.start, Some(anchor));
        assert_eq!(r.end, Some(anchor));
    }

    #[test]
    fn last_seven_days_includes_the_anchor() {
        let anchor = d(2024, 2, 1);
        let r = resolve(Preset::Last7Days, anchor);
        assert_eq!(r.start, Some(d(2024, 1, 26)));
        assert_eq!(r.end, Some(anchor));
    }

    #[test]
    fn last_thirty_days_crosses_the_year_boundary_when_needed() {
        let anchor = d(2024, 1, 10);
        let r = resolve(Preset::Last30Days, anchor);
        assert_eq!(r.start, Some(d(2023, 12, 12)));
        assert_eq!(r.end, Some(anchor));
    }

    #[test]
    fn year_presets_span_whole_years() {
        let anchor = d(2024, 2, 1);
        let this_year = resolve(Preset::ThisYear, anchor);
        assert_eq!(this_year.start, Some(d(2024, 1, 1)));
        assert_eq!(this_year.end, Some(d(2024, 12, 31)));

        let last_year = resolve(Preset::LastYear, anchor);
        assert_eq!(last_year.start, Some(d(2023, 1, 1)));
        assert_eq!(last_year.end, Some(d(2023, 12, 31)));
    }
}
