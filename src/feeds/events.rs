use serde_json::{Map, Value};

use crate::core::primitives::parse_calendar_date;
use crate::core::{Event, EventCategory, EventLink, LocalizedText};
use crate::error::{ChartError, ChartResult};

use super::FeedKind;

const TITLE_PREFIX: &str = "title_";
const TOOLTIP_PREFIX: &str = "description_tooltip_";
const BODY_PREFIX: &str = "description_full_";
const LINK_TEXT_PREFIX: &str = "text_";

/// Parses the event feed.
///
/// Per-language fields (`title_en`, `title_es`, ...) are folded into
/// [`LocalizedText`] maps once here, so nothing downstream looks up property
/// names by language.
pub fn parse_event_feed(json: &str) -> ChartResult<Vec<Event>> {
    let raw: Vec<Map<String, Value>> = serde_json::from_str(json).map_err(|e| feed_error(e.to_string()))?;
    raw.iter()
        .enumerate()
        .map(|(index, object)| {
            parse_event(object).map_err(|reason| feed_error(format!("event #{index}: {reason}")))
        })
        .collect()
}

fn parse_event(object: &Map<String, Value>) -> Result<Event, String> {
    let date = required_str(object, "date")?;
    let time = parse_calendar_date(date).map_err(|e| e.to_string())?;
    let category: EventCategory = required_str(object, "category")?
        .parse()
        .map_err(|e: ChartError| e.to_string())?;

    let links = match object.get("links") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(parse_link).collect::<Result<_, _>>()?,
        Some(_) => return Err("`links` must be an array".to_owned()),
    };

    Ok(Event {
        time,
        category,
        title: localized(object, TITLE_PREFIX),
        tooltip: localized(object, TOOLTIP_PREFIX),
        body: localized(object, BODY_PREFIX),
        links,
    })
}

fn parse_link(value: &Value) -> Result<EventLink, String> {
    let object = value
        .as_object()
        .ok_or_else(|| "link must be an object".to_owned())?;
    Ok(EventLink {
        url: required_str(object, "url")?.to_owned(),
        label: localized(object, LINK_TEXT_PREFIX),
    })
}

fn localized(object: &Map<String, Value>, prefix: &str) -> LocalizedText {
    let mut text = LocalizedText::new();
    for (key, value) in object {
        if let (Some(language), Some(content)) = (key.strip_prefix(prefix), value.as_str()) {
            if !language.is_empty() {
                text.insert(language, content);
            }
        }
    }
    text
}

fn required_str<'a>(object: &'a Map<String, Value>, key: &str) -> Result<&'a str, String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("missing string field `{key}`"))
}

fn feed_error(reason: String) -> ChartError {
    ChartError::FeedLoad {
        feed: FeedKind::Events,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::parse_event_feed;
    use crate::core::EventCategory;

    #[test]
    fn localized_fields_are_grouped_by_language() {
        let events = parse_event_feed(
            r#"[{
                "date": "2009-01-03",
                "category": "Technology",
                "title_en": "Genesis block",
                "title_es": "Bloque génesis",
                "description_tooltip_en": "Block 0 is mined",
                "description_full_en": "First.\n\nSecond.",
                "links": [{"url": "https://bitcoin.org", "text_en": "Site"}]
            }]"#,
        )
        .expect("feed should parse");

        let event = &events[0];
        assert_eq!(event.time, 1_230_940_800_000.0);
        assert_eq!(event.category, EventCategory::Technology);
        assert_eq!(event.title.get("es"), Some("Bloque génesis"));
        assert_eq!(event.body_paragraphs("en", "en"), vec!["First.", "Second."]);
        assert_eq!(event.links[0].label.resolve("es", "en"), "Site");
    }

    #[test]
    fn unknown_category_fails_the_feed() {
        let result = parse_event_feed(r#"[{"date": "2010-05-22", "category": "Pizza"}]"#);
        assert!(result.is_err());
    }
}
