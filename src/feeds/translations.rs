use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::LanguageCode;
use crate::error::{ChartError, ChartResult};

use super::FeedKind;

/// UI strings keyed by language, then by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations(IndexMap<LanguageCode, IndexMap<String, String>>);

const STAT_DEFAULTS: [(&str, &str, &str); 3] = [
    ("statATH", "All Time High (ATH)", "Máximo Histórico (ATH)"),
    ("statCurrentPrice", "Latest Price", "Precio Reciente"),
    ("statDaysGenesis", "Days since Genesis", "Días desde Genesis"),
];

impl Translations {
    /// Parses the translations feed and fills in missing stats labels.
    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        let mut translations: Self =
            serde_json::from_str(json).map_err(|e| ChartError::FeedLoad {
                feed: FeedKind::Translations,
                reason: e.to_string(),
            })?;
        translations.insert_stat_defaults();
        Ok(translations)
    }

    fn insert_stat_defaults(&mut self) {
        for (key, en, es) in STAT_DEFAULTS {
            for (language, text) in [("en", en), ("es", es)] {
                if let Some(table) = self.0.get_mut(language) {
                    table.entry(key.to_owned()).or_insert_with(|| text.to_owned());
                }
            }
        }
    }

    pub fn insert(
        &mut self,
        language: impl Into<LanguageCode>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.0
            .entry(language.into())
            .or_default()
            .insert(key.into(), text.into());
    }

    #[must_use]
    pub fn has_language(&self, language: &str) -> bool {
        self.0.contains_key(language)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    /// Looks up `key` for `language`; unknown languages or keys yield the key.
    #[must_use]
    pub fn get<'a>(&'a self, language: &str, key: &'a str) -> &'a str {
        self.0
            .get(language)
            .and_then(|table| table.get(key))
            .map_or(key, String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::Translations;

    #[test]
    fn stats_labels_are_filled_and_missing_keys_echo() {
        let translations =
            Translations::from_json_str(r#"{"en": {"reset": "Reset zoom"}, "es": {"statATH": "ATH"}}"#)
                .expect("feed should parse");
        assert_eq!(translations.get("en", "reset"), "Reset zoom");
        assert_eq!(translations.get("en", "statATH"), "All Time High (ATH)");
        assert_eq!(translations.get("es", "statATH"), "ATH");
        assert_eq!(translations.get("fr", "reset"), "reset");
        assert_eq!(translations.get("en", "nope"), "nope");
    }
}
