//! Global render data: config tables flattened, plus build-time values.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::config::SiteConfig;

/// The clock value embedded into the render data.
///
/// This is the only non-deterministic input to a build; pinning it makes
/// repeated builds byte-identical.
#[derive(Debug, Clone, Copy)]
pub struct BuildStamp(pub DateTime<Utc>);

impl BuildStamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

/// The flattened data mapping shared by every page render in one build.
///
/// Assembled once, never mutated afterwards; front matter and layout
/// injections are merged over a clone per page.
#[derive(Debug, Clone)]
pub struct GlobalData {
    values: Map<String, Value>,
}

impl GlobalData {
    /// Merge the `[data.*]` tables flat in declaration order (layout,
    /// header, footer, menu — later tables win on key conflict) and add
    /// the computed `year` and `buildTime` values.
    pub fn assemble(config: &SiteConfig, stamp: &BuildStamp) -> Self {
        let mut values = Map::new();

        let tables = [
            &config.data.layout,
            &config.data.header,
            &config.data.footer,
            &config.data.menu,
        ];
        for table in tables {
            for (key, value) in table {
                values.insert(key.clone(), toml_to_json(value));
            }
        }

        values.insert("year".to_string(), Value::from(stamp.year()));
        values.insert(
            "buildTime".to_string(),
            Value::from(stamp.0.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );

        Self { values }
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }
}

fn toml_to_json(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::from(s.clone()),
        toml::Value::Integer(i) => Value::from(*i),
        toml::Value::Float(f) => Value::from(*f),
        toml::Value::Boolean(b) => Value::from(*b),
        toml::Value::Datetime(d) => Value::from(d.to_string()),
        toml::Value::Array(items) => Value::Array(items.iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_json(v)))
                .collect(),
        ),
    }
}
