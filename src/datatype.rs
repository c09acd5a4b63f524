// used to build the duration pattern once
use lazy_static::lazy_static;
// used for dates held by date fields
use chrono::NaiveDateTime;
// used for currency amounts
use bigdecimal::BigDecimal;
// used when parsing durations such as "5d" or "2.5eh"
use regex::Regex;

// used when parsing a string to a BigDecimal
use std::str::FromStr;
// used to print out readable forms of a data type
use std::fmt;
// used to give decimals their arithmetic surface
use std::ops;

lazy_static! {
    static ref DURATION: Regex =
        Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*(emo|em|eh|ed|ew|ey|mo|m|h|d|w|y|%)\s*$").unwrap();
}

/// The semantic category of a field's value.
///
/// Every field in a [`crate::catalog::FieldCatalog`] is tagged with exactly one
/// declared type, and every [`Value`] stored for that field must carry the
/// matching variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeclaredType {
    Date,
    Currency,
    Number,
    Integer,
    Percentage,
    String,
    Boolean,
    Duration,
    /// Values with no intrinsic presentation rule, such as priorities or
    /// constraint types. They are carried as their textual form.
    Opaque,
}

impl DeclaredType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Currency => "Currency",
            Self::Number => "Number",
            Self::Integer => "Integer",
            Self::Percentage => "Percentage",
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Duration => "Duration",
            Self::Opaque => "Opaque",
        }
    }
}
impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ------------- Values --------------
/// A non-null field value. Null is represented by absence.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Date(NaiveDateTime),
    Currency(Decimal),
    Number(f64),
    Integer(i64),
    Percentage(f64),
    String(String),
    Boolean(bool),
    Duration(Duration),
    Opaque(String),
}

impl Value {
    /// Builds a currency value from a floating point amount, as loaders
    /// usually receive them. Returns `None` for NaN and infinities.
    pub fn currency(amount: f64) -> Option<Value> {
        Decimal::from_f64(amount).map(Value::Currency)
    }
    pub fn declared_type(&self) -> DeclaredType {
        match self {
            Self::Date(_) => DeclaredType::Date,
            Self::Currency(_) => DeclaredType::Currency,
            Self::Number(_) => DeclaredType::Number,
            Self::Integer(_) => DeclaredType::Integer,
            Self::Percentage(_) => DeclaredType::Percentage,
            Self::String(_) => DeclaredType::String,
            Self::Boolean(_) => DeclaredType::Boolean,
            Self::Duration(_) => DeclaredType::Duration,
            Self::Opaque(_) => DeclaredType::Opaque,
        }
    }
    /// True when the value is what an untouched field would hold: `false`,
    /// zero amounts and durations, or an empty string.
    pub fn is_default(&self) -> bool {
        match self {
            Self::Date(_) => false,
            Self::Currency(d) => d.0 == BigDecimal::from(0),
            Self::Number(n) | Self::Percentage(n) => *n == 0.0,
            Self::Integer(i) => *i == 0,
            Self::String(s) | Self::Opaque(s) => s.is_empty(),
            Self::Boolean(b) => !b,
            Self::Duration(d) => d.amount() == 0.0,
        }
    }
}

/// The "raw" textual form of a value, independent of any locale.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Date(d) => write!(f, "{}", d),
            Self::Currency(d) => write!(f, "{}", d),
            Self::Number(n) | Self::Percentage(n) => write!(f, "{}", n),
            Self::Integer(i) => write!(f, "{}", i),
            Self::String(s) | Self::Opaque(s) => write!(f, "{}", s),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Duration(d) => write!(f, "{}", d),
        }
    }
}

// Special types below
#[derive(Eq, PartialEq, Hash, PartialOrd, Ord, Clone, Debug)]
pub struct Decimal (BigDecimal);

impl Decimal {
    pub fn from_str(s: &str) -> Option<Decimal> {
        match BigDecimal::from_str(s.trim()) {
            Ok(decimal) => Some(Decimal (decimal)),
            _ => None
        }
    }
    // going through the shortest round-trip text keeps 1234.5 as 1234.5
    // rather than its binary expansion
    pub fn from_f64(n: f64) -> Option<Decimal> {
        if n.is_finite() {
            Decimal::from_str(&n.to_string())
        } else {
            None
        }
    }
}
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl ops::Deref for Decimal {
    type Target = BigDecimal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Units a [`Duration`] may be expressed in. Elapsed units count calendar
/// time rather than working time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
    Percent,
    ElapsedMinutes,
    ElapsedHours,
    ElapsedDays,
    ElapsedWeeks,
    ElapsedMonths,
    ElapsedYears,
}

impl TimeUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Minutes => "m",
            Self::Hours => "h",
            Self::Days => "d",
            Self::Weeks => "w",
            Self::Months => "mo",
            Self::Years => "y",
            Self::Percent => "%",
            Self::ElapsedMinutes => "em",
            Self::ElapsedHours => "eh",
            Self::ElapsedDays => "ed",
            Self::ElapsedWeeks => "ew",
            Self::ElapsedMonths => "emo",
            Self::ElapsedYears => "ey",
        }
    }
    pub fn from_suffix(s: &str) -> Option<TimeUnit> {
        let unit = match s {
            "m" => Self::Minutes,
            "h" => Self::Hours,
            "d" => Self::Days,
            "w" => Self::Weeks,
            "mo" => Self::Months,
            "y" => Self::Years,
            "%" => Self::Percent,
            "em" => Self::ElapsedMinutes,
            "eh" => Self::ElapsedHours,
            "ed" => Self::ElapsedDays,
            "ew" => Self::ElapsedWeeks,
            "emo" => Self::ElapsedMonths,
            "ey" => Self::ElapsedYears,
            _ => return None,
        };
        Some(unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Duration {
    amount: f64,
    units: TimeUnit,
}

impl Duration {
    pub fn new(amount: f64, units: TimeUnit) -> Self {
        Self { amount, units }
    }
    /// Parses the textual form produced by `Display`, e.g. `5d` or `2.5 eh`.
    pub fn from_str(s: &str) -> Option<Duration> {
        let captures = DURATION.captures(s)?;
        let amount = captures[1].parse::<f64>().ok()?;
        let units = TimeUnit::from_suffix(&captures[2])?;
        Some(Duration { amount, units })
    }
    pub fn amount(&self) -> f64 {
        self.amount
    }
    pub fn units(&self) -> TimeUnit {
        self.units
    }
}
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.units.suffix())
    }
}
