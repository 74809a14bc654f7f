//! Query string validation for the level endpoint.
//!
//! Failures are reported the way a schema validator with "abort early"
//! semantics reports them: only the first failing field, checked in
//! declaration order (`thumbnail`, then `difficulty`).

use serde::Serialize;
use std::{collections::HashMap, fmt};

#[derive(Serialize, Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub name: &'static str,
    pub message: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub value: Option<String>,
    pub errors: Vec<String>,
}

impl ValidationError {
    fn new(path: &str, kind: &'static str, value: Option<&str>, message: String) -> Self {
        Self {
            name: "ValidationError",
            errors: vec![message.clone()],
            message,
            path: path.to_string(),
            kind,
            value: value.map(str::to_string),
        }
    }

    fn required(path: &str, value: Option<&str>) -> Self {
        Self::new(
            path,
            "required",
            value,
            format!("{path} is a required field"),
        )
    }

    fn not_a_number(path: &str, raw: &str) -> Self {
        Self::new(
            path,
            "typeError",
            Some(raw),
            format!(
                "{path} must be a `number` type, but the final value was: `NaN` (cast from the value `\"{raw}\"`)."
            ),
        )
    }
}

/// Numeric difficulty level.
///
/// Displays as the key its icon asset is named by: integral values have no
/// fractional part (`3`, not `3.0`) and negative zero is `0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty(f64);

impl Difficulty {
    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v == 0.0 {
            write!(f, "0")
        } else if v.fract() == 0.0 && v.abs() < 1e21 {
            write!(f, "{v:.0}")
        } else {
            write!(f, "{v}")
        }
    }
}

impl TryFrom<f64> for Difficulty {
    type Error = ();

    fn try_from(v: f64) -> Result<Self, Self::Error> {
        if v.is_finite() { Ok(Self(v)) } else { Err(()) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelQuery {
    pub thumbnail: String,
    pub difficulty: Difficulty,
}

impl LevelQuery {
    pub fn validate(query: &HashMap<String, String>) -> Result<Self, ValidationError> {
        let thumbnail = match query.get("thumbnail") {
            Some(v) if !v.is_empty() => v.clone(),
            v => return Err(ValidationError::required("thumbnail", v.map(String::as_str))),
        };

        let raw = query
            .get("difficulty")
            .ok_or_else(|| ValidationError::required("difficulty", None))?;

        let difficulty = parse_number(raw)
            .and_then(|v| Difficulty::try_from(v).ok())
            .ok_or_else(|| ValidationError::not_a_number("difficulty", raw))?;

        Ok(Self {
            thumbnail,
            difficulty,
        })
    }
}

// Plain decimal notation only; "inf", "nan" and friends are not numbers here.
fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let plain = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));

    if plain { s.parse::<f64>().ok() } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_valid_query() {
        let q = LevelQuery::validate(&query(&[
            ("thumbnail", "https://example.com/bg.png"),
            ("difficulty", " 4 "),
        ]))
        .unwrap();

        assert_eq!(q.thumbnail, "https://example.com/bg.png");
        assert_eq!(q.difficulty.value(), 4.0);
        assert_eq!(q.difficulty.key(), "4");
    }

    #[test]
    fn test_missing_thumbnail() {
        let err = LevelQuery::validate(&query(&[("difficulty", "1")])).unwrap_err();

        assert_eq!(err.path, "thumbnail");
        assert_eq!(err.kind, "required");
        assert_eq!(err.message, "thumbnail is a required field");
        assert_eq!(err.errors, vec![err.message.clone()]);
    }

    #[test]
    fn test_empty_thumbnail_is_missing() {
        let err =
            LevelQuery::validate(&query(&[("thumbnail", ""), ("difficulty", "1")])).unwrap_err();
        assert_eq!(err.kind, "required");
        assert_eq!(err.value.as_deref(), Some(""));
    }

    #[test]
    fn test_thumbnail_checked_first() {
        let err = LevelQuery::validate(&HashMap::new()).unwrap_err();
        assert_eq!(err.path, "thumbnail");
    }

    #[test]
    fn test_missing_difficulty() {
        let err = LevelQuery::validate(&query(&[("thumbnail", "a.png")])).unwrap_err();

        assert_eq!(err.path, "difficulty");
        assert_eq!(err.message, "difficulty is a required field");
    }

    #[test]
    fn test_difficulty_not_a_number() {
        for raw in ["hard", "", "nan", "inf", "1.2.3"] {
            let err = LevelQuery::validate(&query(&[("thumbnail", "a.png"), ("difficulty", raw)]))
                .unwrap_err();

            assert_eq!(err.kind, "typeError", "{raw}");
            assert!(err.message.contains("must be a `number` type"));
            assert!(err.message.contains(&format!("`\"{raw}\"`")));
        }
    }

    #[test]
    fn test_validation_error_json() {
        let err = LevelQuery::validate(&query(&[("difficulty", "1")])).unwrap_err();
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["name"], "ValidationError");
        assert_eq!(json["type"], "required");
        assert_eq!(json["path"], "thumbnail");
        assert_eq!(json["errors"][0], "thumbnail is a required field");
    }

    #[test]
    fn test_difficulty_key_format() {
        let key = |v: f64| Difficulty::try_from(v).unwrap().key();

        assert_eq!(key(3.0), "3");
        assert_eq!(key(2.5), "2.5");
        assert_eq!(key(-1.0), "-1");
        assert_eq!(key(-0.0), "0");
        assert_eq!(key(999.0), "999");
        assert!(Difficulty::try_from(f64::NAN).is_err());
    }
}
