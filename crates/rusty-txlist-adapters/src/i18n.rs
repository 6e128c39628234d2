//! Locale catalogs in the extension's `messages.json` layout.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use serde::Deserialize;

use rusty_txlist_core::{PortError, Translator};

const BUNDLED_LOCALES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en/messages.json")),
    ("es", include_str!("../locales/es/messages.json")),
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocaleMessage {
    pub message: String,
    #[serde(default)]
    pub description: Option<String>,
}

pub type LocaleMessages = BTreeMap<String, LocaleMessage>;

#[derive(Debug)]
struct ActiveLocale {
    code: String,
    messages: LocaleMessages,
}

/// Active locale with a fixed fallback. Clones share the active locale, so
/// switching it is visible to every holder.
#[derive(Debug, Clone)]
pub struct LocaleCatalog {
    active: Arc<RwLock<ActiveLocale>>,
    fallback: Arc<LocaleMessages>,
}

impl LocaleCatalog {
    pub fn bundled(code: &str, fallback_code: &str) -> Result<Self, PortError> {
        Self::from_json(code, bundled_json(code)?, bundled_json(fallback_code)?)
    }

    pub fn from_json(code: &str, json: &str, fallback_json: &str) -> Result<Self, PortError> {
        Ok(Self {
            active: Arc::new(RwLock::new(ActiveLocale {
                code: code.to_owned(),
                messages: parse_messages(code, json)?,
            })),
            fallback: Arc::new(parse_messages("fallback", fallback_json)?),
        })
    }

    pub fn available_locales() -> impl Iterator<Item = &'static str> {
        BUNDLED_LOCALES.iter().map(|(code, _)| *code)
    }

    pub fn locale_code(&self) -> Result<String, PortError> {
        let active = self
            .active
            .read()
            .map_err(|_| PortError::Poisoned("i18n.active"))?;
        Ok(active.code.clone())
    }

    /// Switches to a bundled locale.
    pub fn set_locale(&self, code: &str) -> Result<(), PortError> {
        let messages = parse_messages(code, bundled_json(code)?)?;
        let mut active = self
            .active
            .write()
            .map_err(|_| PortError::Poisoned("i18n.active"))?;
        active.code = code.to_owned();
        active.messages = messages;
        tracing::info!(locale = code, "locale switched");
        Ok(())
    }

    /// Looks `key` up in the active locale, then the fallback, replacing
    /// `$1`, `$2`, ... with `substitutions`.
    pub fn message(&self, key: &str, substitutions: &[&str]) -> Option<String> {
        let from_active = self
            .active
            .read()
            .ok()
            .and_then(|active| active.messages.get(key).map(|m| m.message.clone()));
        let template = match from_active {
            Some(template) => template,
            None => self.fallback.get(key)?.message.clone(),
        };
        Some(substitute(&template, substitutions))
    }
}

impl Translator for LocaleCatalog {
    fn translate(&self, key: &str) -> String {
        self.message(key, &[]).unwrap_or_else(|| {
            tracing::warn!(key, "no translation in active or fallback locale");
            key.to_owned()
        })
    }
}

fn bundled_json(code: &str) -> Result<&'static str, PortError> {
    BUNDLED_LOCALES
        .iter()
        .find(|(bundled, _)| *bundled == code)
        .map(|(_, json)| *json)
        .ok_or_else(|| PortError::NotFound(format!("locale {code}")))
}

fn parse_messages(code: &str, json: &str) -> Result<LocaleMessages, PortError> {
    serde_json::from_str(json)
        .map_err(|e| PortError::Validation(format!("locale {code}: {e}")))
}

fn substitute(template: &str, substitutions: &[&str]) -> String {
    // highest index first so `$1` never eats the prefix of `$10`
    substitutions
        .iter()
        .enumerate()
        .rev()
        .fold(template.to_owned(), |text, (index, value)| {
            text.replace(&format!("${}", index + 1), value)
        })
}
