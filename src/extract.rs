//! Typed lookups over a resolved [`ConfigMap`].
//!
//! A key that is present with the wrong type is treated exactly like a
//! missing key: the caller's default wins and nothing is reported.

use serde_json::Value;

use crate::resolve::ConfigMap;

pub fn get_str<'a>(map: &'a ConfigMap, key: &str) -> Option<&'a str> {
    match map.get(key) {
        Some(Value::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

pub fn get_string(map: &ConfigMap, key: &str, default: &str) -> String {
    get_str(map, key).unwrap_or(default).to_string()
}

pub fn get_bool(map: &ConfigMap, key: &str, default: bool) -> bool {
    match map.get(key) {
        Some(Value::Bool(b)) => *b,
        _ => default,
    }
}

/// Only integral JSON numbers that fit in an `i64` count.
pub fn get_i64(map: &ConfigMap, key: &str, default: i64) -> i64 {
    map.get(key).and_then(Value::as_i64).unwrap_or(default)
}

pub fn get_f64(map: &ConfigMap, key: &str, default: f64) -> f64 {
    map.get(key).and_then(Value::as_f64).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(v: Value) -> ConfigMap {
        match v {
            Value::Object(m) => m,
            _ => panic!("test fixture must be an object"),
        }
    }

    #[test]
    fn string_present() {
        let m = map(json!({"KAKAO_NATIVE_APP_KEY": "abc123"}));
        assert_eq!(get_string(&m, "KAKAO_NATIVE_APP_KEY", ""), "abc123");
        assert_eq!(get_str(&m, "KAKAO_NATIVE_APP_KEY"), Some("abc123"));
    }

    #[test]
    fn wrong_type_falls_back() {
        let m = map(json!({
            "KAKAO_NATIVE_APP_KEY": 12345,
            "flag": "true",
            "count": "3",
            "ratio": null,
        }));
        assert_eq!(get_string(&m, "KAKAO_NATIVE_APP_KEY", "dflt"), "dflt");
        assert!(!get_bool(&m, "flag", false));
        assert_eq!(get_i64(&m, "count", 7), 7);
        assert_eq!(get_f64(&m, "ratio", 0.5), 0.5);
    }

    #[test]
    fn absent_falls_back() {
        let m = ConfigMap::new();
        assert_eq!(get_string(&m, "x", ""), "");
        assert_eq!(get_str(&m, "x"), None);
        assert!(get_bool(&m, "x", true));
    }

    #[test]
    fn numbers() {
        let m = map(json!({"n": 3, "f": 2.5, "big": 1.0e300}));
        assert_eq!(get_i64(&m, "n", 0), 3);
        assert_eq!(get_i64(&m, "f", -1), -1);
        assert_eq!(get_f64(&m, "f", 0.0), 2.5);
        assert_eq!(get_f64(&m, "n", 0.0), 3.0);
        assert_eq!(get_i64(&m, "big", 0), 0);
        assert_eq!(get_f64(&m, "big", 0.0), 1.0e300);
    }
}
