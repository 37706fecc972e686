use super::{EncodeUtils, ExpiryUtils, FileUtils, TimeUnit};
use crate::config::Expiration;
use std::path::PathBuf;
use std::time::{Duration, UNIX_EPOCH};

#[test]
fn encode_component_matches_uri_component_rules() {
    assert_eq!(EncodeUtils::encode_component("abc-_.!~*'()"), "abc-_.!~*'()");
    assert_eq!(EncodeUtils::encode_component("a b;c=d"), "a%20b%3Bc%3Dd");
    assert_eq!(EncodeUtils::encode_component("{\"a\":1}"), "%7B%22a%22%3A1%7D");
    assert_eq!(EncodeUtils::encode_component("é"), "%C3%A9");
    assert_eq!(EncodeUtils::encode_component("a+b/c"), "a%2Bb%2Fc");
}

#[test]
fn decode_component_reverses_encoding() {
    let original = "ümlaut; value=1 & more";
    let encoded = EncodeUtils::encode_component(original);
    assert_eq!(
        EncodeUtils::decode_component(&encoded).as_deref(),
        Some(original)
    );
    assert_eq!(EncodeUtils::decode_component("a+b").as_deref(), Some("a+b"));
}

#[test]
fn decode_or_raw_keeps_invalid_utf8_sequences() {
    assert_eq!(EncodeUtils::decode_component("%FF"), None);
    assert_eq!(EncodeUtils::decode_or_raw("%FF"), "%FF");
}

#[test]
fn time_unit_suffixes_are_case_insensitive() {
    assert_eq!(TimeUnit::from_suffix("MIN"), Some(TimeUnit::Minute));
    assert_eq!(TimeUnit::from_suffix("Y"), Some(TimeUnit::Year));
    assert_eq!(TimeUnit::from_suffix("w"), None);
    assert_eq!(TimeUnit::from_suffix("mins"), None);
}

#[test]
fn split_relative_requires_digits_and_known_unit() {
    assert_eq!(ExpiryUtils::split_relative("10d"), Some(("10", TimeUnit::Day)));
    assert_eq!(
        ExpiryUtils::split_relative("30min"),
        Some(("30", TimeUnit::Minute))
    );
    assert_eq!(ExpiryUtils::split_relative("d"), None);
    assert_eq!(ExpiryUtils::split_relative("-1d"), None);
    assert_eq!(ExpiryUtils::split_relative("10"), None);
    assert_eq!(ExpiryUtils::split_relative("1.5h"), None);
}

#[test]
fn clause_converts_relative_units_to_max_age() {
    let clause = |text: &str| ExpiryUtils::clause(Some(&Expiration::from(text)));
    assert_eq!(clause("10d"), "; max-age=864000");
    assert_eq!(clause("2h"), "; max-age=7200");
    assert_eq!(clause("1y"), "; max-age=31104000");
    assert_eq!(clause("3M"), "; max-age=7776000");
    assert_eq!(clause("5min"), "; max-age=300");
    assert_eq!(clause("45s"), "; max-age=45");
}

#[test]
fn clause_handles_numeric_and_infinite_policies() {
    let far_future = "; expires=Fri, 31 Dec 9999 23:59:59 GMT";
    assert_eq!(ExpiryUtils::clause(Some(&Expiration::Never)), far_future);
    assert_eq!(ExpiryUtils::clause(Some(&Expiration::Seconds(-1))), far_future);
    assert_eq!(
        ExpiryUtils::clause(Some(&Expiration::Seconds(120))),
        "; max-age=120"
    );
    assert_eq!(
        ExpiryUtils::clause(Some(&Expiration::Seconds(-5))),
        "; max-age=-5"
    );
}

#[test]
fn clause_overflowing_relative_expiration_never_expires() {
    let clause = ExpiryUtils::clause(Some(&Expiration::from("99999999999999y")));
    assert_eq!(clause, "; expires=Fri, 31 Dec 9999 23:59:59 GMT");
}

#[test]
fn clause_passes_literal_dates_through() {
    let clause = ExpiryUtils::clause(Some(&Expiration::from("Wed, 21 Oct 2015 07:28:00 GMT")));
    assert_eq!(clause, "; expires=Wed, 21 Oct 2015 07:28:00 GMT");
}

#[test]
fn clause_formats_points_in_time_as_http_dates() {
    let at = UNIX_EPOCH + Duration::from_secs(1_445_412_480);
    assert_eq!(
        ExpiryUtils::clause(Some(&Expiration::At(at))),
        "; expires=Wed, 21 Oct 2015 07:28:00 GMT"
    );
}

#[test]
fn clause_without_expiration_defaults_to_one_day() {
    assert_eq!(ExpiryUtils::clause(None), "; max-age=86400");
}

#[test]
fn http_date_clamps_out_of_range_times() {
    assert_eq!(
        ExpiryUtils::http_date(UNIX_EPOCH - Duration::from_secs(10)),
        ExpiryUtils::EPOCH
    );
    assert_eq!(
        ExpiryUtils::http_date(UNIX_EPOCH + Duration::from_secs(400_000_000_000)),
        ExpiryUtils::FAR_FUTURE
    );
}

#[test]
fn expand_path_expands_home() {
    let home = dirs::home_dir().expect("home dir");
    let path = FileUtils::expand_path("~/cookiekit-test").expect("expanded");
    assert_eq!(path, home.join("cookiekit-test"));
}

#[test]
fn expand_path_leaves_non_tilde_unchanged() {
    let path = FileUtils::expand_path("/tmp/cookiekit").expect("expanded");
    assert_eq!(path, PathBuf::from("/tmp/cookiekit"));
}
