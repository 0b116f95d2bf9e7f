use std::fs;
use std::path::PathBuf;

use history_chart::ChartError;
use history_chart::core::{CycleKind, EventCategory};
use history_chart::feeds::{
    CYCLES_FILE, EVENTS_FILE, FeedBundle, FeedKind, PRICES_FILE, TRANSLATIONS_FILE,
    parse_event_feed, parse_price_feed, parse_simple_price_quote,
};

const PRICES: &str = r#"{"prices": [[1279324800000, 0.0858], [1279411200000, 0.0808], ["bad", 1.0]]}"#;
const EVENTS: &str = r#"[
    {
        "date": "2009-01-03",
        "category": "Technology",
        "title_en": "Genesis Block",
        "title_es": "Bloque Génesis",
        "description_tooltip_en": "The first block is mined.",
        "description_full_en": "Satoshi mines block 0.\n\nIt embeds a headline.",
        "links": [{"url": "https://example.org/genesis", "text_en": "Read more", "text_es": "Leer más"}]
    },
    {
        "date": "2012-11-28",
        "category": "Halving",
        "title_en": "First halving"
    }
]"#;
const CYCLES: &str = r#"[
    {"startDate": "2010-07-17", "endDate": "2011-06-08", "type": "bull"},
    {"startDate": "2011-06-08", "endDate": "2011-11-18", "type": "bear"}
]"#;
const TRANSLATIONS: &str = r#"{"en": {"resetZoom": "Reset zoom"}, "es": {"resetZoom": "Restablecer zoom"}}"#;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "history-chart-{name}-{}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

#[test]
fn bundle_parses_all_feeds() {
    let bundle = FeedBundle::from_json_strs(PRICES, EVENTS, CYCLES, TRANSLATIONS).expect("bundle");

    assert_eq!(
        bundle.raw_prices,
        vec![(1_279_324_800_000.0, 0.0858), (1_279_411_200_000.0, 0.0808)]
    );

    assert_eq!(bundle.events.len(), 2);
    let genesis = &bundle.events[0];
    assert_eq!(genesis.time, 1_230_940_800_000.0);
    assert_eq!(genesis.title.resolve("es", "en"), "Bloque Génesis");
    assert_eq!(genesis.tooltip.resolve("es", "en"), "The first block is mined.");
    assert_eq!(genesis.body_paragraphs("en", "en").len(), 2);
    assert_eq!(genesis.links[0].url, "https://example.org/genesis");
    assert_eq!(genesis.links[0].label.resolve("es", "en"), "Leer más");
    assert_eq!(bundle.events[1].category, EventCategory::Halving);
    assert!(bundle.events[1].links.is_empty());

    assert_eq!(bundle.cycles.len(), 2);
    assert_eq!(bundle.cycles[0].kind, CycleKind::Bull);
    assert_eq!(bundle.cycles[1].kind, CycleKind::Bear);

    assert_eq!(bundle.translations.get("es", "resetZoom"), "Restablecer zoom");
    assert_eq!(bundle.translations.get("es", "statATH"), "Máximo Histórico (ATH)");
    assert_eq!(bundle.translations.get("de", "resetZoom"), "resetZoom");
    assert!(bundle.translations.has_language("es"));
    assert!(!bundle.translations.has_language("de"));
    let languages: Vec<&str> = bundle.translations.languages().collect();
    assert_eq!(languages, vec!["en", "es"]);
}

#[test]
fn load_from_dir_reads_standard_file_names() {
    let dir = scratch_dir("ok");
    fs::write(dir.join(PRICES_FILE), PRICES).expect("write prices");
    fs::write(dir.join(EVENTS_FILE), EVENTS).expect("write events");
    fs::write(dir.join(CYCLES_FILE), CYCLES).expect("write cycles");
    fs::write(dir.join(TRANSLATIONS_FILE), TRANSLATIONS).expect("write translations");

    let bundle = FeedBundle::load_from_dir(&dir).expect("bundle");
    assert_eq!(bundle.raw_prices.len(), 2);
    assert_eq!(bundle.events.len(), 2);

    fs::remove_dir_all(&dir).expect("cleanup");
}

#[test]
fn missing_feed_file_names_the_feed() {
    let dir = scratch_dir("missing");
    fs::write(dir.join(PRICES_FILE), PRICES).expect("write prices");

    let err = FeedBundle::load_from_dir(&dir).expect_err("events missing");
    match err {
        ChartError::FeedLoad { feed, reason } => {
            assert_eq!(feed, FeedKind::Events);
            assert!(reason.contains(EVENTS_FILE));
        }
        other => panic!("unexpected error: {other}"),
    }

    fs::remove_dir_all(&dir).expect("cleanup");
}

#[test]
fn malformed_feeds_fail_with_their_kind() {
    let err = FeedBundle::from_json_strs("[]", EVENTS, CYCLES, TRANSLATIONS).expect_err("prices");
    assert!(matches!(err, ChartError::FeedLoad { feed: FeedKind::Prices, .. }));

    let err = FeedBundle::from_json_strs(PRICES, EVENTS, r#"[{"startDate": "2010-01-01"}]"#, TRANSLATIONS)
        .expect_err("cycles");
    assert!(matches!(err, ChartError::FeedLoad { feed: FeedKind::Cycles, .. }));

    let err = FeedBundle::from_json_strs(PRICES, EVENTS, CYCLES, "[]").expect_err("translations");
    assert!(matches!(err, ChartError::FeedLoad { feed: FeedKind::Translations, .. }));
}

#[test]
fn event_without_date_is_rejected() {
    let err = parse_event_feed(r#"[{"category": "Market"}]"#).expect_err("no date");
    assert!(err.to_string().contains("date"));
}

#[test]
fn price_rows_are_best_effort() {
    let rows = parse_price_feed(r#"{"prices": [[1, 2], [3], [4, "5"], [6, 7]]}"#).expect("rows");
    assert_eq!(rows, vec![(1.0, 2.0), (6.0, 7.0)]);
}

#[test]
fn quote_parsing_checks_value() {
    assert_eq!(
        parse_simple_price_quote(r#"{"bitcoin": {"usd": 100}}"#, "bitcoin", "usd").ok(),
        Some(100.0)
    );
    assert!(parse_simple_price_quote(r#"{"bitcoin": {"usd": -1}}"#, "bitcoin", "usd").is_err());
    assert!(parse_simple_price_quote("oops", "bitcoin", "usd").is_err());
}
