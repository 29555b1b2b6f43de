//! Pivot aggregation of transaction amounts by group, category and calendar month.
//!
//! Amounts are summed with plain floating point addition, which is fine for display but not
//! for exact accounting.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
};

use time::Date;

/// The group name used for transactions without a group.
pub const UNKNOWN_GROUP: &str = "Unknown Group";
/// The category name used for transactions without a category.
pub const UNKNOWN_CATEGORY: &str = "Unknown Category";

const INVALID_DATE: &str = "Invalid Date";

/// The calendar month a transaction falls into.
///
/// Transactions whose date is missing or could not be parsed are all bucketed under
/// [MonthKey::Invalid] rather than being dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthKey {
    /// A month of a specific year.
    Calendar {
        /// The calendar year.
        year: i32,
        /// The month of the year.
        month: time::Month,
    },
    /// The bucket for transactions without a usable date.
    Invalid,
}

impl MonthKey {
    /// The month `date` falls in, or [MonthKey::Invalid] if there is no date.
    pub fn from_date(date: Option<Date>) -> Self {
        match date {
            Some(date) => MonthKey::Calendar {
                year: date.year(),
                month: date.month(),
            },
            None => MonthKey::Invalid,
        }
    }

    /// The sortable key, e.g. "2024-03".
    pub fn key(&self) -> String {
        match self {
            MonthKey::Calendar { year, month } => format!("{year:04}-{:02}", u8::from(*month)),
            MonthKey::Invalid => INVALID_DATE.to_owned(),
        }
    }

    /// The display name, e.g. "March 2024".
    pub fn label(&self) -> String {
        match self {
            MonthKey::Calendar { year, month } => format!("{month} {year}"),
            MonthKey::Invalid => INVALID_DATE.to_owned(),
        }
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

// Keys are ordered as text so that the invalid bucket sorts consistently with the rest.
impl Ord for MonthKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for MonthKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A column of the pivot table.
#[derive(Debug, Clone, PartialEq)]
pub struct Month {
    /// The month the column sums.
    pub key: MonthKey,
    /// The column heading, e.g. "March 2024".
    pub name: String,
}

/// The fields of a transaction that the pivot needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTransaction {
    /// `None` if the stored date could not be parsed.
    pub date: Option<Date>,
    /// The amount to add, treated as zero if absent.
    pub amount: Option<f64>,
    /// The name of the transaction's group.
    pub group: Option<String>,
    /// The name of the transaction's category.
    pub category: Option<String>,
}

type MonthAmounts = BTreeMap<MonthKey, f64>;

/// Summed amounts keyed by group name, then category name, then month.
///
/// Groups and categories iterate in name order. Cells that were never added to read as zero
/// through [PivotTable::amount_or_zero].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PivotTable {
    groups: BTreeMap<String, BTreeMap<String, MonthAmounts>>,
}

impl PivotTable {
    /// Add `amount` to the cell for `group`, `category` and `month`, creating it if needed.
    pub fn add(&mut self, group: &str, category: &str, month: MonthKey, amount: f64) {
        *self
            .groups
            .entry(group.to_owned())
            .or_default()
            .entry(category.to_owned())
            .or_default()
            .entry(month)
            .or_insert(0.0) += amount;
    }

    /// The summed amount for a cell, or `None` if nothing was added to it.
    pub fn get(&self, group: &str, category: &str, month: &MonthKey) -> Option<f64> {
        self.groups.get(group)?.get(category)?.get(month).copied()
    }

    /// The summed amount for a cell, or zero if nothing was added to it.
    pub fn amount_or_zero(&self, group: &str, category: &str, month: &MonthKey) -> f64 {
        self.get(group, category, month).unwrap_or(0.0)
    }

    /// The sum over all categories of `group` for `month`.
    pub fn group_total(&self, group: &str, month: &MonthKey) -> f64 {
        self.groups
            .get(group)
            .into_iter()
            .flat_map(BTreeMap::values)
            .filter_map(|months| months.get(month))
            .sum()
    }

    /// The sum over all groups for `month`.
    pub fn month_total(&self, month: &MonthKey) -> f64 {
        self.groups
            .keys()
            .map(|group| self.group_total(group, month))
            .sum()
    }

    /// The group names in name order.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// The category names of `group` in name order.
    pub fn categories<'a>(&'a self, group: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.groups
            .get(group)
            .into_iter()
            .flat_map(|categories| categories.keys().map(String::as_str))
    }

    /// Whether nothing has been added to the table.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// The result of aggregating transactions: the month columns, most recent first, and the
/// table of amounts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pivot {
    /// The month columns, most recent first.
    pub months: Vec<Month>,
    /// The summed amounts.
    pub table: PivotTable,
}

/// Sum transaction amounts by group, category and month.
///
/// A missing amount counts as zero. Missing or blank group and category names are bucketed
/// under [UNKNOWN_GROUP] and [UNKNOWN_CATEGORY]. The input order does not matter.
pub fn build_pivot(transactions: &[PivotTransaction]) -> Pivot {
    let mut month_keys = BTreeSet::new();
    let mut table = PivotTable::default();

    for transaction in transactions {
        let month = MonthKey::from_date(transaction.date);
        let group = name_or(&transaction.group, UNKNOWN_GROUP);
        let category = name_or(&transaction.category, UNKNOWN_CATEGORY);

        month_keys.insert(month);
        table.add(group, category, month, transaction.amount.unwrap_or(0.0));
    }

    let months = month_keys
        .into_iter()
        .rev()
        .map(|key| Month {
            name: key.label(),
            key,
        })
        .collect();

    Pivot { months, table }
}

fn name_or<'a>(name: &'a Option<String>, default: &'a str) -> &'a str {
    name.as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(default)
}
