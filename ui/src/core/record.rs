//! Typed purchase records and the normalizer that builds them from raw CSV rows.

use std::collections::HashMap;
use std::fmt;

use dioxus::logger::tracing::debug;

/// One untyped row keyed by header name.
pub type RawRow = HashMap<String, String>;

/// Header names recognised in the purchase dataset.
pub mod columns {
    pub const CATEGORY: &str = "Category";
    pub const GENDER: &str = "Gender";
    pub const AMOUNT: &str = "Purchase Amount (USD)";
    pub const AGE: &str = "Age";
    pub const SEASON: &str = "Season";
    pub const SHIPPING: &str = "Shipping Type";
    pub const SUBSCRIPTION: &str = "Subscription Status";
    pub const DISCOUNT: &str = "Discount Applied";
    pub const PREVIOUS: &str = "Previous Purchases";
    pub const FREQUENCY: &str = "Frequency of Purchases";

    /// Columns whose absence makes the whole file unusable.
    pub const REQUIRED: [&str; 2] = [CATEGORY, AMOUNT];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// Canonical display order.
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    pub fn label(self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|season| season.label() == raw.trim())
    }

    /// Position in the canonical order.
    pub fn rank(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed age buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeGroup {
    Under18,
    From18To24,
    From25To34,
    From35To44,
    From45To54,
    From55To64,
    From65,
}

impl AgeGroup {
    pub fn from_age(age: u32) -> Self {
        match age {
            0..=17 => AgeGroup::Under18,
            18..=24 => AgeGroup::From18To24,
            25..=34 => AgeGroup::From25To34,
            35..=44 => AgeGroup::From35To44,
            45..=54 => AgeGroup::From45To54,
            55..=64 => AgeGroup::From55To64,
            _ => AgeGroup::From65,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::Under18 => "<18",
            AgeGroup::From18To24 => "18–24",
            AgeGroup::From25To34 => "25–34",
            AgeGroup::From35To44 => "35–44",
            AgeGroup::From45To54 => "45–54",
            AgeGroup::From55To64 => "55–64",
            AgeGroup::From65 => "65+",
        }
    }
}

/// Recognised purchase frequencies. Anything else in the dataset is treated as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Weekly,
    Fortnightly,
    Monthly,
    Quarterly,
    Annually,
}

impl Frequency {
    pub const ALL: [Frequency; 5] = [
        Frequency::Weekly,
        Frequency::Fortnightly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Annually,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Weekly => "Weekly",
            Frequency::Fortnightly => "Fortnightly",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Annually => "Annually",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|frequency| frequency.label() == raw.trim())
    }
}

/// One consumer transaction after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub category: String,
    pub gender: String,
    pub amount: f64,
    pub age: Option<u32>,
    /// Derived from `age` once, at normalization time.
    pub age_group: Option<AgeGroup>,
    pub season: String,
    pub shipping: String,
    pub subscription: String,
    pub discount: String,
    pub previous_purchases: Option<u32>,
    pub frequency: String,
}

impl Record {
    /// Builds a record from a raw row, or `None` when the category is blank or the amount is not
    /// a finite, non-negative number.
    pub fn from_row(row: &RawRow) -> Option<Self> {
        let category = text(row, columns::CATEGORY);
        if category.is_empty() {
            return None;
        }
        let amount = parse_amount(row.get(columns::AMOUNT).map(String::as_str))?;
        let age = parse_whole(row.get(columns::AGE).map(String::as_str));

        Some(Self {
            category,
            gender: text(row, columns::GENDER),
            amount,
            age,
            age_group: age.map(AgeGroup::from_age),
            season: text(row, columns::SEASON),
            shipping: text(row, columns::SHIPPING),
            subscription: text(row, columns::SUBSCRIPTION),
            discount: text(row, columns::DISCOUNT),
            previous_purchases: parse_whole(row.get(columns::PREVIOUS).map(String::as_str)),
            frequency: text(row, columns::FREQUENCY),
        })
    }

    pub fn season_kind(&self) -> Option<Season> {
        Season::parse(&self.season)
    }

    pub fn frequency_kind(&self) -> Option<Frequency> {
        Frequency::parse(&self.frequency)
    }
}

/// Converts raw rows into records, silently skipping rows that fail validation.
pub fn normalize(rows: &[RawRow]) -> Vec<Record> {
    let records: Vec<Record> = rows.iter().filter_map(Record::from_row).collect();
    let dropped = rows.len() - records.len();
    if dropped > 0 {
        debug!(dropped, kept = records.len(), "normalizer skipped invalid rows");
    }
    records
}

fn text(row: &RawRow, column: &str) -> String {
    row.get(column)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

fn parse_amount(raw: Option<&str>) -> Option<f64> {
    let value: f64 = raw?.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

fn parse_whole(raw: Option<&str>) -> Option<u32> {
    let value: f64 = raw?.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0 && value <= u32::MAX as f64).then_some(value as u32)
}
