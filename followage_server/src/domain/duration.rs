use chrono::{DateTime, Utc};

// Fixed-ratio unit ladder. A year is 365 days and a month is a twelfth of it,
// so twelve months always carry into a year.
const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;
const YEAR: u64 = 365 * DAY;
const MONTH: u64 = YEAR / 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl TimeUnit {
    // Largest first; decomposition walks this order.
    pub const LADDER: [TimeUnit; 7] = [
        TimeUnit::Year,
        TimeUnit::Month,
        TimeUnit::Week,
        TimeUnit::Day,
        TimeUnit::Hour,
        TimeUnit::Minute,
        TimeUnit::Second,
    ];

    pub fn seconds(self) -> u64 {
        match self {
            TimeUnit::Year => YEAR,
            TimeUnit::Month => MONTH,
            TimeUnit::Week => WEEK,
            TimeUnit::Day => DAY,
            TimeUnit::Hour => HOUR,
            TimeUnit::Minute => MINUTE,
            TimeUnit::Second => 1,
        }
    }

    // Selector letter used by the `format` query parameter.
    pub fn letter(self) -> char {
        match self {
            TimeUnit::Year => 'y',
            TimeUnit::Month => 'm',
            TimeUnit::Week => 'w',
            TimeUnit::Day => 'd',
            TimeUnit::Hour => 'h',
            TimeUnit::Minute => 'i',
            TimeUnit::Second => 's',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        Self::LADDER.into_iter().find(|unit| unit.letter() == letter)
    }

    pub fn name(self) -> &'static str {
        match self {
            TimeUnit::Year => "year",
            TimeUnit::Month => "month",
            TimeUnit::Week => "week",
            TimeUnit::Day => "day",
            TimeUnit::Hour => "hour",
            TimeUnit::Minute => "minute",
            TimeUnit::Second => "second",
        }
    }

    fn indefinite_article(self) -> &'static str {
        match self {
            TimeUnit::Hour => "an",
            _ => "a",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Selects which units a rendered duration may contain.
///
/// Parsed from a string of unit letters (`y m w d h i s`, minutes are `i`).
/// The default enables every unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatOption {
    enabled: [bool; 7],
}

impl Default for FormatOption {
    fn default() -> Self {
        Self { enabled: [true; 7] }
    }
}

impl FormatOption {
    /// Parses a selector such as `ymdhis`. Letters may come in any order but
    /// must not repeat. Returns `None` for an empty or unknown selector.
    pub fn parse(selector: &str) -> Option<Self> {
        let mut enabled = [false; 7];
        for letter in selector.chars() {
            let unit = TimeUnit::from_letter(letter.to_ascii_lowercase())?;
            if enabled[unit.index()] {
                return None;
            }
            enabled[unit.index()] = true;
        }

        if enabled.iter().any(|on| *on) {
            Some(Self { enabled })
        } else {
            None
        }
    }

    /// Resolves the optional `format` query value, falling back to the default.
    pub fn from_query(selector: Option<&str>) -> Self {
        selector
            .map(str::trim)
            .and_then(Self::parse)
            .unwrap_or_default()
    }

    pub fn includes(&self, unit: TimeUnit) -> bool {
        self.enabled[unit.index()]
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    // Canonical ladder-ordered selector, e.g. `ymdhis`.
    pub fn selector(&self) -> String {
        self.units().map(TimeUnit::letter).collect()
    }

    pub fn units(&self) -> impl Iterator<Item = TimeUnit> + '_ {
        TimeUnit::LADDER
            .into_iter()
            .filter(move |unit| self.includes(*unit))
    }

    fn smallest(&self) -> TimeUnit {
        self.units().last().unwrap_or(TimeUnit::Second)
    }
}

/// Per-unit decomposition of an elapsed duration. Disabled units are `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DurationBreakdown {
    pub years: Option<u64>,
    pub months: Option<u64>,
    pub weeks: Option<u64>,
    pub days: Option<u64>,
    pub hours: Option<u64>,
    pub minutes: Option<u64>,
    pub seconds: Option<u64>,
}

impl DurationBreakdown {
    pub fn get(&self, unit: TimeUnit) -> Option<u64> {
        match unit {
            TimeUnit::Year => self.years,
            TimeUnit::Month => self.months,
            TimeUnit::Week => self.weeks,
            TimeUnit::Day => self.days,
            TimeUnit::Hour => self.hours,
            TimeUnit::Minute => self.minutes,
            TimeUnit::Second => self.seconds,
        }
    }

    fn set(&mut self, unit: TimeUnit, value: u64) {
        let slot = match unit {
            TimeUnit::Year => &mut self.years,
            TimeUnit::Month => &mut self.months,
            TimeUnit::Week => &mut self.weeks,
            TimeUnit::Day => &mut self.days,
            TimeUnit::Hour => &mut self.hours,
            TimeUnit::Minute => &mut self.minutes,
            TimeUnit::Second => &mut self.seconds,
        };
        *slot = Some(value);
    }

    // Seconds represented by the enabled fields.
    pub fn total_seconds(&self) -> u64 {
        TimeUnit::LADDER
            .into_iter()
            .filter_map(|unit| self.get(unit).map(|value| value * unit.seconds()))
            .sum()
    }
}

/// Whole seconds between two instants, regardless of order. Sub-second
/// remainders are truncated.
pub fn elapsed_between(now: DateTime<Utc>, then: DateTime<Utc>) -> u64 {
    (now - then).num_seconds().unsigned_abs()
}

/// Greedy decomposition over the enabled units, largest first. Time held by
/// a disabled unit stays in the remainder for the next enabled unit below it.
pub fn breakdown(elapsed_seconds: u64, option: &FormatOption) -> DurationBreakdown {
    let mut remaining = elapsed_seconds;
    let mut result = DurationBreakdown::default();

    for unit in option.units() {
        let value = remaining / unit.seconds();
        remaining -= value * unit.seconds();
        result.set(unit, value);
    }

    result
}

/// Rendered non-zero units in ladder order, e.g. `["1 year", "2 days"]`.
/// Empty when every enabled unit is zero.
pub fn format_parts(elapsed_seconds: u64, option: &FormatOption) -> Vec<String> {
    let data = breakdown(elapsed_seconds, option);

    TimeUnit::LADDER
        .into_iter()
        .filter_map(|unit| match data.get(unit) {
            Some(value) if value > 0 => Some(pluralize(value, unit)),
            _ => None,
        })
        .collect()
}

/// Joined duration such as `1 year, 2 months, 5 seconds`. A duration shorter
/// than the smallest enabled unit renders as `less than a <unit>`.
pub fn format(elapsed_seconds: u64, option: &FormatOption) -> String {
    let parts = format_parts(elapsed_seconds, option);
    if parts.is_empty() {
        let unit = option.smallest();
        return format!("less than {} {}", unit.indefinite_article(), unit.name());
    }

    parts.join(", ")
}

fn pluralize(value: u64, unit: TimeUnit) -> String {
    let suffix = if value == 1 { "" } else { "s" };
    format!("{value} {}{suffix}", unit.name())
}
