//! Encoding and decoding of flat query strings.
//!
//! Search and pagination state lives in the URL. Values are text, numbers,
//! or comma-joined lists; which keys are numbers or lists is decided by the
//! caller through a [`QuerySchema`].

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    Text(String),
    Number(i64),
    List(Vec<String>),
}

impl QueryValue {
    fn is_empty(&self) -> bool {
        match self {
            QueryValue::Text(text) => text.is_empty(),
            QueryValue::Number(_) => false,
            QueryValue::List(items) => items.join(",").is_empty(),
        }
    }

    fn encode(&self) -> String {
        match self {
            QueryValue::Text(text) => urlencoding::encode(text).into_owned(),
            QueryValue::Number(number) => number.to_string(),
            QueryValue::List(items) => urlencoding::encode(&items.join(",")).into_owned(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            QueryValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            QueryValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            QueryValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(text: &str) -> Self {
        QueryValue::Text(text.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(text: String) -> Self {
        QueryValue::Text(text)
    }
}

impl From<i64> for QueryValue {
    fn from(number: i64) -> Self {
        QueryValue::Number(number)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(items: Vec<String>) -> Self {
        QueryValue::List(items)
    }
}

pub type QueryMap = BTreeMap<String, QueryValue>;

/// Keys whose values are decoded as something other than text
#[derive(Debug, Clone, Copy, Default)]
pub struct QuerySchema<'a> {
    pub numeric: &'a [&'a str],
    pub lists: &'a [&'a str],
}

/// Builds `?key=value&...`, or an empty string when every value is empty.
///
/// Empty text and empty lists are left out. Lists are joined with commas.
pub fn encode(params: &QueryMap) -> String {
    let pairs: Vec<String> = params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), value.encode()))
        .collect();

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Parses a query string, with or without its leading `?`
pub fn decode(query: &str, schema: &QuerySchema) -> QueryMap {
    let query = query.strip_prefix('?').unwrap_or(query);

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(raw_key);
            let value = decode_component(raw_value);

            let value = if schema.lists.contains(&key.as_str()) {
                if value.is_empty() {
                    QueryValue::List(Vec::new())
                } else {
                    QueryValue::List(value.split(',').map(str::to_string).collect())
                }
            } else if schema.numeric.contains(&key.as_str()) {
                match value.trim().parse::<i64>() {
                    Ok(number) => QueryValue::Number(number),
                    Err(_) => QueryValue::Text(value),
                }
            } else {
                QueryValue::Text(value)
            };

            (key, value)
        })
        .collect()
}
