// ABOUTME: Field-level coercion of loosely-typed JSON input into typed model values.
// ABOUTME: Fields wraps one input object and reports failures as ValidationError with the field name.

use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};

use crate::duration::parse_duration_seconds;
use crate::error::{Rule, ValidationError};
use crate::models::Category;
use crate::timestamp::{from_unix_seconds, parse_timestamp};

/// A closed set of string values accepted by an enum field.
pub(crate) trait Choice: Sized {
    const ALLOWED: &'static [&'static str];

    fn from_name(name: &str) -> Option<Self>;
}

/// Borrowed view of one input object. Null values count as absent.
pub(crate) struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    /// Fails with an empty field path so callers can name the object.
    pub fn object(value: &'a Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Ok(Self { map }),
            other => Err(mismatch("", "object", other)),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    fn require(&self, key: &str) -> Result<&'a Value, ValidationError> {
        self.get(key).ok_or_else(|| ValidationError::missing(key))
    }

    pub fn string(&self, key: &str) -> Result<String, ValidationError> {
        let value = self.require(key)?;
        coerce_text(value).ok_or_else(|| mismatch(key, "text", value))
    }

    pub fn optional_string(&self, key: &str) -> Result<Option<String>, ValidationError> {
        self.get(key)
            .map(|value| coerce_text(value).ok_or_else(|| mismatch(key, "text", value)))
            .transpose()
    }

    pub fn string_or(&self, key: &str, default: &str) -> Result<String, ValidationError> {
        Ok(self
            .optional_string(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    pub fn bool(&self, key: &str) -> Result<bool, ValidationError> {
        let value = self.require(key)?;
        value.as_bool().ok_or_else(|| mismatch(key, "boolean", value))
    }

    pub fn optional_bool(&self, key: &str) -> Result<Option<bool>, ValidationError> {
        self.get(key)
            .map(|value| value.as_bool().ok_or_else(|| mismatch(key, "boolean", value)))
            .transpose()
    }

    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool, ValidationError> {
        Ok(self.optional_bool(key)?.unwrap_or(default))
    }

    /// Non-negative integer (byte sizes, durations).
    pub fn size(&self, key: &str) -> Result<u64, ValidationError> {
        let value = self.require(key)?;
        non_negative(key, value)
    }

    /// Positive integer that fits in `u32` (episode and season numbers).
    pub fn optional_ordinal(&self, key: &str) -> Result<Option<u32>, ValidationError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let n = integer(key, value)?;
        match u32::try_from(n) {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(out_of_range(key, n, "a positive integer")),
        }
    }

    /// Seconds as an integer, or a clock/span string normalized to seconds.
    pub fn optional_duration(&self, key: &str) -> Result<Option<u64>, ValidationError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => parse_duration_seconds(s)
                .map(Some)
                .ok_or_else(|| ValidationError::new(key, Rule::InvalidDuration(s.clone()))),
            Some(value) => non_negative(key, value).map(Some),
        }
    }

    pub fn optional_choice<T: Choice>(&self, key: &str) -> Result<Option<T>, ValidationError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let name = coerce_text(value).ok_or_else(|| mismatch(key, "text", value))?;
        T::from_name(&name).map(Some).ok_or_else(|| {
            ValidationError::new(
                key,
                Rule::InvalidEnum {
                    value: name,
                    allowed: T::ALLOWED,
                },
            )
        })
    }

    pub fn optional_timestamp(
        &self,
        key: &str,
    ) -> Result<Option<DateTime<FixedOffset>>, ValidationError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let parsed = match value {
            Value::String(s) => parse_timestamp(s),
            Value::Number(n) => n.as_i64().and_then(from_unix_seconds),
            other => return Err(mismatch(key, "timestamp", other)),
        };
        parsed
            .map(Some)
            .ok_or_else(|| ValidationError::new(key, Rule::InvalidDate(text_of(value))))
    }

    /// A single category name, or a non-empty list of names and `[primary, secondary]` pairs.
    pub fn categories(&self, key: &str) -> Result<Vec<Category>, ValidationError> {
        let value = self.require(key)?;
        let Value::Array(entries) = value else {
            return category_name(value)
                .map(|name| vec![Category::Single(name)])
                .map_err(|rule| ValidationError::new(key, rule));
        };
        if entries.is_empty() {
            return Err(ValidationError::new(
                key,
                Rule::InvalidCategory("list must not be empty".into()),
            ));
        }
        entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                category_entry(entry)
                    .map_err(|rule| ValidationError::new(format!("{}[{}]", key, idx), rule))
            })
            .collect()
    }

    pub fn list(&self, key: &str) -> Result<&'a [Value], ValidationError> {
        let value = self.require(key)?;
        value
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| mismatch(key, "list", value))
    }
}

/// Text coercion: strings as-is, numbers and booleans via their display form.
pub(crate) fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn category_entry(value: &Value) -> Result<Category, Rule> {
    let Value::Array(names) = value else {
        return category_name(value).map(Category::Single);
    };
    match names.as_slice() {
        [] => Err(Rule::InvalidCategory("entry must not be empty".into())),
        [name] => category_name(name).map(Category::Single),
        [primary, secondary] => Ok(Category::Pair(
            category_name(primary)?,
            category_name(secondary)?,
        )),
        more => Err(Rule::InvalidCategory(format!(
            "entry has {} names, at most 2 are allowed",
            more.len()
        ))),
    }
}

fn category_name(value: &Value) -> Result<String, Rule> {
    coerce_text(value).ok_or(Rule::TypeMismatch {
        expected: "category name",
        found: kind(value),
    })
}

/// Integers from JSON numbers, whole floats, or numeric strings.
fn integer(key: &str, value: &Value) -> Result<i128, ValidationError> {
    let parsed = match value {
        Value::Number(n) => n
            .as_u64()
            .map(i128::from)
            .or_else(|| n.as_i64().map(i128::from))
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                    .map(|f| f as i128)
            }),
        Value::String(s) => s.trim().parse::<i128>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| mismatch(key, "integer", value))
}

fn non_negative(key: &str, value: &Value) -> Result<u64, ValidationError> {
    let n = integer(key, value)?;
    u64::try_from(n).map_err(|_| out_of_range(key, n, "a non-negative integer"))
}

fn mismatch(key: &str, expected: &'static str, value: &Value) -> ValidationError {
    ValidationError::new(
        key,
        Rule::TypeMismatch {
            expected,
            found: kind(value),
        },
    )
}

fn out_of_range(key: &str, n: i128, expected: &'static str) -> ValidationError {
    ValidationError::new(
        key,
        Rule::OutOfRange {
            value: n.to_string(),
            expected,
        },
    )
}

fn text_of(value: &Value) -> String {
    coerce_text(value).unwrap_or_else(|| value.to_string())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
