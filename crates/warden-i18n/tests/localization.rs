//! End-to-end checks of the translation and time-localization contracts,
//! exercised the way a command handler assembles a notification message.

use chrono::{TimeZone, Utc};
use warden_i18n::{
    format_for_language, get_translation, localize, supported_languages, Language,
};

#[test]
fn notification_message_assembles_in_every_language() {
    let kickoff = Utc.with_ymd_and_hms(2024, 6, 8, 18, 0, 0).unwrap();
    let localized = localize(kickoff);

    for code in supported_languages() {
        let language = Language::resolve(code);
        let title = get_translation("match_notification", code);
        let time_label = get_translation("match_time", code);
        let display = format_for_language(&localized[&language], code);

        let message = format!("{title}\n{time_label}: {display}");

        assert!(!title.is_empty());
        assert!(message.contains(&display));
        // The year and minutes survive every per-language pattern.
        assert!(display.contains("2024"), "{code}: {display}");
        assert!(display.contains(":00"), "{code}: {display}");
    }
}

#[test]
fn lookup_chain_degrades_without_failing() {
    // Unknown language -> English text.
    assert_eq!(
        get_translation("moderation_action", "de"),
        get_translation("moderation_action", "en")
    );

    // Unknown key -> key itself, for any language.
    for code in supported_languages() {
        assert_eq!(get_translation("no_such_key", code), "no_such_key");
    }
}

#[test]
fn conversion_is_lossless_round_trip() {
    let instants = [
        Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap(),
        // Spain DST boundary: clocks jump forward at 02:00 local.
        Utc.with_ymd_and_hms(2024, 3, 31, 1, 30, 0).unwrap(),
    ];

    for instant in instants {
        for (_, local) in localize(instant) {
            assert_eq!(local.with_timezone(&Utc), instant);
        }
    }
}

#[test]
fn supported_set_is_exactly_en_pt_es() {
    let mut codes = supported_languages();
    codes.sort_unstable();
    assert_eq!(codes, ["en", "es", "pt"]);
}

#[test]
fn winter_and_summer_offsets_differ_for_madrid() {
    let winter = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
    let summer = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();

    let winter_local = localize(winter)[&Language::Spanish];
    let summer_local = localize(summer)[&Language::Spanish];

    assert_eq!(winter_local.format("%H:%M").to_string(), "13:00");
    assert_eq!(summer_local.format("%H:%M").to_string(), "14:00");
}
