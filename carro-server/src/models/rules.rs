//! Declarative field rules for car input
//!
//! A [`Schema`] is a table of [`FieldRule`]s interpreted by [`validate`].
//! Violations come back in table order, with the object-level
//! "at least one field" check last.

use serde_json::{Map, Value};

use super::ValidationError;

/// Earliest accepted model year
pub const MIN_YEAR: i64 = 1900;

/// Decimal places a price is rounded to
pub const PRICE_PRECISION: u32 = 10;

/// Value type a field must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-empty string
    Text,
    /// Whole number
    Integer,
    /// Any JSON number
    Number,
}

/// Numeric bound, fixed or resolved when validation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Fixed(i64),
    CurrentYear,
}

impl Bound {
    fn resolve(self, current_year: i64) -> i64 {
        match self {
            Self::Fixed(v) => v,
            Self::CurrentYear => current_year,
        }
    }
}

/// Rule for a single input field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub min: Option<Bound>,
    pub max: Option<Bound>,
    /// Decimal places the value is rounded to once accepted
    pub precision: Option<u32>,
}

impl FieldRule {
    const fn text(name: &'static str, required: bool) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            required,
            min: None,
            max: None,
            precision: None,
        }
    }

    const fn year(name: &'static str, required: bool) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
            required,
            min: Some(Bound::Fixed(MIN_YEAR)),
            max: Some(Bound::CurrentYear),
            precision: None,
        }
    }

    const fn price(name: &'static str, required: bool) -> Self {
        Self {
            name,
            kind: FieldKind::Number,
            required,
            min: None,
            max: None,
            precision: Some(PRICE_PRECISION),
        }
    }

    /// Apply the rule's precision to an accepted number.
    pub fn round(&self, n: f64) -> f64 {
        self.precision.map_or(n, |places| round_to_places(n, places))
    }
}

/// A set of field rules plus object-level constraints
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub rules: &'static [FieldRule],
    /// Require at least one of the ruled fields to be present
    pub at_least_one: bool,
}

impl Schema {
    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.name == name)
    }
}

/// Every car field must be present
pub const CREATE_SCHEMA: Schema = Schema {
    rules: &[
        FieldRule::text("brand", true),
        FieldRule::text("model", true),
        FieldRule::year("year", true),
        FieldRule::text("color", true),
        FieldRule::price("price", true),
    ],
    at_least_one: false,
};

/// Any subset of car fields, but not none
pub const UPDATE_SCHEMA: Schema = Schema {
    rules: &[
        FieldRule::text("brand", false),
        FieldRule::text("model", false),
        FieldRule::year("year", false),
        FieldRule::text("color", false),
        FieldRule::price("price", false),
    ],
    at_least_one: true,
};

/// Validate an input object against a schema.
///
/// Each field contributes at most one violation. Keys not named by the
/// schema are ignored.
///
/// # Example
///
/// ```
/// use carro_server::models::rules::{validate, CREATE_SCHEMA};
/// use serde_json::json;
///
/// let body = json!({"brand": "Toyota", "model": "Corolla", "year": 1899, "color": "red", "price": 1.5});
/// let errors = validate(body.as_object().unwrap(), &CREATE_SCHEMA, 2024);
/// assert_eq!(errors[0].to_string(), "\"year\" must be greater than or equal to 1900");
/// ```
pub fn validate(
    input: &Map<String, Value>,
    schema: &Schema,
    current_year: i64,
) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = schema
        .rules
        .iter()
        .filter_map(|rule| check_field(rule, input.get(rule.name), current_year))
        .collect();

    if schema.at_least_one && !schema.rules.iter().any(|r| input.contains_key(r.name)) {
        errors.push(ValidationError::MissingAny {
            fields: schema.rules.iter().map(|r| r.name).collect(),
        });
    }

    errors
}

fn check_field(rule: &FieldRule, value: Option<&Value>, current_year: i64) -> Option<ValidationError> {
    let field = rule.name;
    let Some(value) = value else {
        return rule.required.then_some(ValidationError::Required { field });
    };

    match rule.kind {
        FieldKind::Text => match value.as_str() {
            None => Some(ValidationError::NotAString { field }),
            Some("") => Some(ValidationError::Empty { field }),
            Some(_) => None,
        },
        FieldKind::Integer => {
            let Some(n) = numeric_value(value) else {
                return Some(ValidationError::NotANumber { field });
            };
            if integer_value(value).is_none() {
                return Some(ValidationError::NotAnInteger { field });
            }
            check_bounds(rule, n, current_year)
        }
        FieldKind::Number => {
            let Some(n) = numeric_value(value) else {
                return Some(ValidationError::NotANumber { field });
            };
            check_bounds(rule, n, current_year)
        }
    }
}

fn check_bounds(rule: &FieldRule, n: f64, current_year: i64) -> Option<ValidationError> {
    if let Some(min) = rule.min.map(|b| b.resolve(current_year)) {
        if n < min as f64 {
            return Some(ValidationError::BelowMin { field: rule.name, min });
        }
    }
    if let Some(max) = rule.max.map(|b| b.resolve(current_year)) {
        if n > max as f64 {
            return Some(ValidationError::AboveMax { field: rule.name, max });
        }
    }
    None
}

/// Numeric view of a JSON value.
///
/// Numbers pass through and strings holding a finite decimal number are
/// parsed, so `"2020"` and `" 15000.5 "` both count as numbers.
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Whole-number view of a JSON value; `2020.0` and `"2020"` count as `2020`.
pub fn integer_value(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = numeric_value(value)?;
    (f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

/// Round `n` to at most `places` decimal places.
///
/// Values already within the limit come back unchanged.
pub fn round_to_places(n: f64, places: u32) -> f64 {
    if decimal_places(n) <= places as usize {
        return n;
    }
    let scale = 10f64.powi(places as i32);
    (n * scale).round() / scale
}

/// Count of digits after the decimal point in the shortest form of `n`.
fn decimal_places(n: f64) -> usize {
    let repr = n.to_string();
    repr.split_once('.').map_or(0, |(_, frac)| frac.len())
}
