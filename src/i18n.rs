//! Translation lookup.
//!
//! Locale files are TOML tables embedded at compile time. Nested tables are
//! flattened into dotted keys, so `[participate.errors] required = "..."`
//! answers to `participate.errors.required`.

use std::collections::HashMap;
use std::fmt;

use clap::ValueEnum;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Maps a translation key to display text. Must not fail.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
    Uz,
}

impl Locale {
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
            Self::Uz => "uz",
        }
    }

    const fn source(self) -> &'static str {
        match self {
            Self::En => include_str!("../locales/en.toml"),
            Self::Ru => include_str!("../locales/ru.toml"),
            Self::Uz => include_str!("../locales/uz.toml"),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Translations of one locale with English as fallback.
///
/// Lookup order is the selected locale, then English, then the key itself.
pub struct Catalog {
    locale: Locale,
    entries: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Catalog {
    pub fn new(locale: Locale) -> Result<Self> {
        let entries = parse(locale)?;
        let fallback = if locale == Locale::En {
            HashMap::new()
        } else {
            parse(Locale::En)?
        };
        debug!(%locale, keys = entries.len(), "Loaded translations");
        Ok(Self {
            locale,
            entries,
            fallback,
        })
    }

    pub const fn locale(&self) -> Locale {
        self.locale
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        if let Some(text) = self.entries.get(key).or_else(|| self.fallback.get(key)) {
            return text.clone();
        }
        trace!(key, locale = %self.locale, "Missing translation");
        key.to_string()
    }
}

fn parse(locale: Locale) -> Result<HashMap<String, String>> {
    let table: toml::Table = toml::from_str(locale.source())
        .wrap_err_with(|| format!("Invalid locale file for {locale}"))?;
    let mut entries = HashMap::new();
    flatten("", &table, &mut entries);
    Ok(entries)
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut HashMap<String, String>) {
    for (key, value) in table {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::String(text) => {
                out.insert(path, text.clone());
            }
            toml::Value::Table(nested) => flatten(&path, nested, out),
            other => {
                out.insert(path, other.to_string());
            }
        }
    }
}
