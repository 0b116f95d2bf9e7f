use chrono::NaiveDate;
use history_chart::core::{Series, SeriesTuning, StatsSummary, genesis_date};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn padded_series() -> Series {
    Series::load(
        vec![(100.0, 4.0), (200.0, 9.0), (300.0, 7.0)],
        Some(0.0),
        SeriesTuning::default(),
    )
    .expect("series")
    .series
}

#[test]
fn stats_ignore_lead_in_points() {
    let stats = StatsSummary::from_series(&padded_series(), None, date(2009, 1, 3)).expect("stats");
    assert_eq!(stats.all_time_high, 9.0);
    assert_eq!(stats.current_price, 7.0);
    assert!(!stats.is_live);
    assert_eq!(stats.days_since_genesis, 0);
}

#[test]
fn live_price_must_be_positive_to_count() {
    let series = padded_series();
    let live = StatsSummary::from_series(&series, Some(12.5), date(2010, 1, 3)).expect("stats");
    assert_eq!(live.current_price, 12.5);
    assert!(live.is_live);
    assert_eq!(live.days_since_genesis, 365);

    let bogus = StatsSummary::from_series(&series, Some(f64::NAN), date(2010, 1, 3)).expect("stats");
    assert_eq!(bogus.current_price, 7.0);
    assert!(!bogus.is_live);
}

#[test]
fn genesis_is_the_first_block_date() {
    assert_eq!(genesis_date(), date(2009, 1, 3));
}
