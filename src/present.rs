use std::fmt::Write;

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::NaiveDateTime;
use chrono::format::{Item, StrftimeItems};

// our own stuff that we need
use crate::catalog::{FieldCatalog, FieldId};
use crate::datatype::{Decimal, DeclaredType, Value};
use crate::error::{ProjfieldsError, Result};
use crate::settings::Locale;

/// Turns field values into display text according to their declared type.
///
/// Rendering is a pure function of the locale and its inputs. Dates,
/// currencies, numbers, percentages, booleans, durations and strings each
/// have a rule. Opaque values have none and are refused with
/// [`ProjfieldsError::UnsupportedPresentationType`]; callers wanting a generic
/// form use the value's `Display` instead.
#[derive(Debug, Clone)]
pub struct ValuePresenter {
    locale: Locale,
}

impl Default for ValuePresenter {
    fn default() -> Self {
        Self { locale: Locale::default() }
    }
}

impl ValuePresenter {
    /// Fails with [`ProjfieldsError::Config`] when the locale's date format
    /// does not parse or needs more than a naive date and time (`%z`, `%Z`).
    pub fn new(locale: Locale) -> Result<Self> {
        if StrftimeItems::new(&locale.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(invalid_date_format(&locale.date_format));
        }
        format_date(&NaiveDateTime::default(), &locale.date_format)?;
        Ok(Self { locale })
    }
    pub fn locale(&self) -> &Locale {
        &self.locale
    }
    pub fn render(&self, declared_type: DeclaredType, value: &Value) -> Result<String> {
        self.render_as("value", declared_type, value)
    }
    /// Renders `value` as the given field of `catalog`.
    pub fn render_field(&self, catalog: &FieldCatalog, field: FieldId, value: &Value) -> Result<String> {
        let definition = catalog.definition(field)?;
        self.render_as(definition.name(), definition.declared_type(), value)
    }
    fn render_as(&self, name: &str, declared_type: DeclaredType, value: &Value) -> Result<String> {
        if value.declared_type() != declared_type {
            return Err(ProjfieldsError::TypeMismatch {
                field: name.to_owned(),
                expected: declared_type,
                found: value.declared_type(),
            });
        }
        let text = match value {
            Value::Date(d) => format_date(d, &self.locale.date_format)?,
            Value::Currency(d) => self.currency(d),
            Value::Number(n) => self.number(*n),
            Value::Integer(i) => i.to_string(),
            Value::Percentage(p) => format!("{}%", self.number(*p)),
            Value::String(s) => s.clone(),
            Value::Boolean(true) => self.locale.true_text.clone(),
            Value::Boolean(false) => self.locale.false_text.clone(),
            Value::Duration(d) => format!("{}{}", self.number(d.amount()), d.units().suffix()),
            Value::Opaque(_) => return Err(ProjfieldsError::UnsupportedPresentationType(declared_type)),
        };
        Ok(text)
    }
    fn number(&self, n: f64) -> String {
        n.to_string().replace('.', &self.locale.decimal_separator)
    }
    // two places, half-up, grouped thousands, symbol on the configured side
    fn currency(&self, amount: &Decimal) -> String {
        let rounded = amount.with_scale_round(2, RoundingMode::HalfUp);
        let negative = rounded < BigDecimal::from(0);
        let (cents, _) = rounded.abs().as_bigint_and_exponent();
        let mut digits = cents.to_string();
        while digits.len() < 3 {
            digits.insert(0, '0');
        }
        let (whole, fraction) = digits.split_at(digits.len() - 2);
        let amount = format!(
            "{}{}{}",
            group_thousands(whole, &self.locale.thousands_separator),
            self.locale.decimal_separator,
            fraction
        );
        let sign = if negative { "-" } else { "" };
        if self.locale.currency_suffix {
            format!("{}{} {}", sign, amount, self.locale.currency_symbol)
        } else {
            format!("{}{}{}", sign, self.locale.currency_symbol, amount)
        }
    }
}

fn group_thousands(digits: &str, separator: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(c);
    }
    grouped
}

// chrono reports a specifier it cannot fill (e.g. an offset) as a fmt::Error
fn format_date(date: &NaiveDateTime, date_format: &str) -> Result<String> {
    let mut text = String::new();
    write!(text, "{}", date.format(date_format)).map_err(|_| invalid_date_format(date_format))?;
    Ok(text)
}

fn invalid_date_format(date_format: &str) -> ProjfieldsError {
    ProjfieldsError::Config(format!("invalid date format '{}'", date_format))
}
