use chrono::NaiveDate;
use projfields::ProjfieldsError;
use projfields::catalog::FieldCatalog;
use projfields::datatype::{Decimal, DeclaredType, Duration, TimeUnit, Value};
use projfields::present::ValuePresenter;
use projfields::settings::Locale;

fn euro() -> ValuePresenter {
    ValuePresenter::new(Locale {
        currency_symbol: "€".to_string(),
        currency_suffix: true,
        thousands_separator: ".".to_string(),
        decimal_separator: ",".to_string(),
        date_format: "%d.%m.%Y %H:%M".to_string(),
        ..Locale::default()
    })
    .expect("valid locale")
}

#[test]
fn currency_two_places_us_convention() {
    let presenter = ValuePresenter::default();
    let value = Value::currency(1234.5).unwrap();
    assert_eq!(presenter.render(DeclaredType::Currency, &value).unwrap(), "$1,234.50");
    let value = Value::currency(-1234.5).unwrap();
    assert_eq!(presenter.render(DeclaredType::Currency, &value).unwrap(), "-$1,234.50");
    let value = Value::currency(1234567.891).unwrap();
    assert_eq!(presenter.render(DeclaredType::Currency, &value).unwrap(), "$1,234,567.89");
    let value = Value::currency(0.0).unwrap();
    assert_eq!(presenter.render(DeclaredType::Currency, &value).unwrap(), "$0.00");
}

#[test]
fn currency_rounds_half_up() {
    let presenter = ValuePresenter::default();
    let value = Value::Currency(Decimal::from_str("0.005").unwrap());
    assert_eq!(presenter.render(DeclaredType::Currency, &value).unwrap(), "$0.01");
    let value = Value::Currency(Decimal::from_str("999.994").unwrap());
    assert_eq!(presenter.render(DeclaredType::Currency, &value).unwrap(), "$999.99");
}

#[test]
fn currency_with_suffix_locale() {
    let value = Value::currency(1234.5).unwrap();
    assert_eq!(euro().render(DeclaredType::Currency, &value).unwrap(), "1.234,50 €");
}

#[test]
fn dates_use_locale_format() {
    let morning = Value::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap().and_hms_opt(8, 0, 0).unwrap());
    let afternoon = Value::Date(NaiveDate::from_ymd_opt(2024, 11, 25).unwrap().and_hms_opt(14, 30, 0).unwrap());
    let presenter = ValuePresenter::default();
    assert_eq!(presenter.render(DeclaredType::Date, &morning).unwrap(), "1/5/2024 8:00:00 AM");
    assert_eq!(presenter.render(DeclaredType::Date, &afternoon).unwrap(), "11/25/2024 2:30:00 PM");
    assert_eq!(euro().render(DeclaredType::Date, &morning).unwrap(), "05.01.2024 08:00");
}

#[test]
fn strings_pass_through() {
    let presenter = ValuePresenter::default();
    let value = Value::String("  Task A\t".to_string());
    assert_eq!(presenter.render(DeclaredType::String, &value).unwrap(), "  Task A\t");
}

#[test]
fn other_rules() {
    let presenter = ValuePresenter::default();
    assert_eq!(presenter.render(DeclaredType::Integer, &Value::Integer(42)).unwrap(), "42");
    assert_eq!(presenter.render(DeclaredType::Number, &Value::Number(3.25)).unwrap(), "3.25");
    assert_eq!(euro().render(DeclaredType::Number, &Value::Number(3.25)).unwrap(), "3,25");
    assert_eq!(presenter.render(DeclaredType::Percentage, &Value::Percentage(50.0)).unwrap(), "50%");
    assert_eq!(presenter.render(DeclaredType::Boolean, &Value::Boolean(true)).unwrap(), "True");
    assert_eq!(presenter.render(DeclaredType::Boolean, &Value::Boolean(false)).unwrap(), "False");
    let work = Value::Duration(Duration::new(2.5, TimeUnit::Days));
    assert_eq!(presenter.render(DeclaredType::Duration, &work).unwrap(), "2.5d");
    assert_eq!(euro().render(DeclaredType::Duration, &work).unwrap(), "2,5d");
}

#[test]
fn opaque_values_have_no_rule() {
    let presenter = ValuePresenter::default();
    let priority = Value::Opaque("500".to_string());
    let err = presenter.render(DeclaredType::Opaque, &priority).unwrap_err();
    assert!(matches!(err, ProjfieldsError::UnsupportedPresentationType(DeclaredType::Opaque)));
    // the raw form is always available
    assert_eq!(priority.to_string(), "500");
}

#[test]
fn mismatched_declared_type_is_refused() {
    let presenter = ValuePresenter::default();
    let err = presenter.render(DeclaredType::Date, &Value::String("2024-01-05".into())).unwrap_err();
    assert!(matches!(err, ProjfieldsError::TypeMismatch { expected: DeclaredType::Date, found: DeclaredType::String, .. }));
}

#[test]
fn render_is_idempotent() {
    let presenter = ValuePresenter::default();
    let values = [
        (DeclaredType::Currency, Value::currency(19.999).unwrap()),
        (DeclaredType::Date, Value::Date(NaiveDate::from_ymd_opt(2023, 7, 1).unwrap().and_hms_opt(17, 5, 9).unwrap())),
        (DeclaredType::String, Value::String("Task A".into())),
    ];
    for (declared_type, value) in &values {
        let first = presenter.render(*declared_type, value).unwrap();
        let second = presenter.render(*declared_type, value).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn render_field_uses_catalog_type() {
    let presenter = ValuePresenter::default();
    let tasks = FieldCatalog::tasks();
    let cost = tasks.field("Cost").unwrap();
    let text = presenter.render_field(&tasks, cost, &Value::currency(12.0).unwrap()).unwrap();
    assert_eq!(text, "$12.00");
    let err = presenter.render_field(&tasks, cost, &Value::Number(12.0)).unwrap_err();
    match err {
        ProjfieldsError::TypeMismatch { field, .. } => assert_eq!(field, "Cost"),
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn invalid_date_format_is_a_config_error() {
    let locale = Locale { date_format: "%Q".to_string(), ..Locale::default() };
    assert!(matches!(ValuePresenter::new(locale), Err(ProjfieldsError::Config(_))));
}

#[test]
fn date_format_needing_an_offset_is_a_config_error() {
    for date_format in ["%Y-%m-%d %z", "%Y-%m-%d %:z", "%d.%m.%Y %Z"] {
        let locale = Locale { date_format: date_format.to_string(), ..Locale::default() };
        assert!(matches!(ValuePresenter::new(locale), Err(ProjfieldsError::Config(_))), "{date_format}");
    }
}
