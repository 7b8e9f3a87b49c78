//! Timezone conversion and per-language date-time rendering

use crate::Language;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::collections::HashMap;

const PT_MONTHS: &[(&str, &str)] = &[
    ("January", "janeiro"),
    ("February", "fevereiro"),
    ("March", "março"),
    ("April", "abril"),
    ("May", "maio"),
    ("June", "junho"),
    ("July", "julho"),
    ("August", "agosto"),
    ("September", "setembro"),
    ("October", "outubro"),
    ("November", "novembro"),
    ("December", "dezembro"),
];

const PT_WEEKDAYS: &[(&str, &str)] = &[
    ("Monday", "segunda-feira"),
    ("Tuesday", "terça-feira"),
    ("Wednesday", "quarta-feira"),
    ("Thursday", "quinta-feira"),
    ("Friday", "sexta-feira"),
    ("Saturday", "sábado"),
    ("Sunday", "domingo"),
];

const ES_MONTHS: &[(&str, &str)] = &[
    ("January", "enero"),
    ("February", "febrero"),
    ("March", "marzo"),
    ("April", "abril"),
    ("May", "mayo"),
    ("June", "junio"),
    ("July", "julio"),
    ("August", "agosto"),
    ("September", "septiembre"),
    ("October", "octubre"),
    ("November", "noviembre"),
    ("December", "diciembre"),
];

const ES_WEEKDAYS: &[(&str, &str)] = &[
    ("Monday", "lunes"),
    ("Tuesday", "martes"),
    ("Wednesday", "miércoles"),
    ("Thursday", "jueves"),
    ("Friday", "viernes"),
    ("Saturday", "sábado"),
    ("Sunday", "domingo"),
];

fn date_pattern(language: Language) -> &'static str {
    match language {
        Language::English => "%A, %B %d, %Y at %I:%M %p %Z",
        Language::Portuguese => "%A, %d de %B de %Y às %H:%M %Z",
        Language::Spanish => "%A, %d de %B de %Y a las %H:%M %Z",
    }
}

fn month_names(language: Language) -> &'static [(&'static str, &'static str)] {
    match language {
        Language::English => &[],
        Language::Portuguese => PT_MONTHS,
        Language::Spanish => ES_MONTHS,
    }
}

fn weekday_names(language: Language) -> &'static [(&'static str, &'static str)] {
    match language {
        Language::English => &[],
        Language::Portuguese => PT_WEEKDAYS,
        Language::Spanish => ES_WEEKDAYS,
    }
}

/// Convert a UTC instant into every supported language's timezone.
///
/// The absolute instant is preserved for each entry; only the wall-clock
/// representation changes.
pub fn localize(instant: DateTime<Utc>) -> HashMap<Language, DateTime<Tz>> {
    Language::all()
        .iter()
        .map(|&language| (language, instant.with_timezone(&language.timezone())))
        .collect()
}

/// Convert a naive instant, interpreting it as UTC.
///
/// An instant with no timezone information is never treated as local time.
pub fn localize_naive(instant: NaiveDateTime) -> HashMap<Language, DateTime<Tz>> {
    localize(Utc.from_utc_datetime(&instant))
}

/// Convert an instant carrying an arbitrary fixed offset, normalizing to UTC
/// first.
pub fn localize_fixed(instant: DateTime<FixedOffset>) -> HashMap<Language, DateTime<Tz>> {
    localize(instant.with_timezone(&Utc))
}

/// Replace canonical English month and weekday names in `text` with the
/// localized terms for `language`.
///
/// The replacement is purely textual: any occurrence of a canonical name in
/// the string is substituted, including ones that are not calendar tokens.
/// A name with no localized entry stays in English.
pub fn localize_calendar_names(text: &str, language: Language) -> String {
    let mut result = text.to_string();

    for (english, local) in month_names(language) {
        result = result.replace(english, local);
    }
    for (english, local) in weekday_names(language) {
        result = result.replace(english, local);
    }

    result
}

/// Render a localized instant as a human-readable string in the given
/// language's fixed pattern (weekday, day, month name, year, hour:minute,
/// timezone abbreviation).
///
/// Unrecognized language codes use the English pattern.
pub fn format_for_language(instant: &DateTime<Tz>, language: &str) -> String {
    let language = Language::resolve(language);
    let formatted = instant.format(date_pattern(language)).to_string();
    localize_calendar_names(&formatted, language)
}

/// Current wall-clock time in the timezone associated with `language`
/// (UTC when unrecognized).
pub fn current_time_for_language(language: &str) -> DateTime<Tz> {
    Utc::now().with_timezone(&Language::resolve(language).timezone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Offset;

    fn sample_instant() -> DateTime<Utc> {
        // Monday 2024-01-15 14:30 UTC
        Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_localize_covers_every_language() {
        let localized = localize(sample_instant());
        assert_eq!(localized.len(), Language::all().len());
    }

    #[test]
    fn test_localize_preserves_the_instant() {
        let instant = sample_instant();
        for (_, local) in localize(instant) {
            assert_eq!(local.with_timezone(&Utc), instant);
        }
    }

    #[test]
    fn test_naive_input_is_interpreted_as_utc() {
        let instant = sample_instant();
        let from_naive = localize_naive(instant.naive_utc());
        let from_utc = localize(instant);

        for language in Language::all() {
            assert_eq!(from_naive[&language], from_utc[&language]);
        }
    }

    #[test]
    fn test_fixed_offset_input_is_normalized_to_utc() {
        let instant = sample_instant();
        // Same absolute instant expressed as 11:30 -03:00.
        let offset = FixedOffset::west_opt(3 * 3600).unwrap();
        let shifted = instant.with_timezone(&offset);

        assert_eq!(localize_fixed(shifted), localize(instant));
    }

    #[test]
    fn test_wall_clock_shift_matches_timezone() {
        let localized = localize(sample_instant());

        // Sao Paulo is UTC-3 in January (no DST since 2019).
        let pt = localized[&Language::Portuguese];
        assert_eq!(pt.format("%H:%M").to_string(), "11:30");

        // Madrid is UTC+1 in January.
        let es = localized[&Language::Spanish];
        assert_eq!(es.format("%H:%M").to_string(), "15:30");
    }

    #[test]
    fn test_format_portuguese_uses_local_calendar_names() {
        let localized = localize(sample_instant());
        let display = format_for_language(&localized[&Language::Portuguese], "pt");

        assert!(display.contains("janeiro"), "got: {display}");
        assert!(display.contains("segunda-feira"), "got: {display}");
        assert!(!display.contains("January"), "got: {display}");
        assert!(!display.contains("Monday"), "got: {display}");
    }

    #[test]
    fn test_format_spanish_uses_local_calendar_names() {
        let localized = localize(sample_instant());
        let display = format_for_language(&localized[&Language::Spanish], "es");

        assert!(display.contains("enero"), "got: {display}");
        assert!(display.contains("lunes"), "got: {display}");
        assert!(display.contains("15:30"), "got: {display}");
    }

    #[test]
    fn test_format_unknown_language_uses_english_pattern() {
        let localized = localize(sample_instant());
        let display = format_for_language(&localized[&Language::English], "xx_invalid");

        assert!(display.contains("January"), "got: {display}");
        assert!(display.contains("02:30 PM"), "got: {display}");
    }

    #[test]
    fn test_substitution_replaces_every_occurrence() {
        // Substitution is an exact substring match, so a canonical name
        // embedded in unrelated text is replaced too.
        let text = "May May-themed";
        assert_eq!(
            localize_calendar_names(text, Language::Spanish),
            "mayo mayo-themed"
        );
    }

    #[test]
    fn test_current_time_offsets_are_consistent() {
        let en = current_time_for_language("en");
        let pt = current_time_for_language("pt");

        // Same absolute instant, within scheduling slack of two clock reads.
        let drift = (en.with_timezone(&Utc) - pt.with_timezone(&Utc))
            .num_seconds()
            .abs();
        assert!(drift < 2, "clock reads drifted {drift}s apart");

        // The wall-clock difference equals Sao Paulo's current UTC offset.
        let expected = pt.offset().fix().local_minus_utc();
        let actual =
            pt.naive_local().and_utc().timestamp() - pt.with_timezone(&Utc).timestamp();
        assert_eq!(actual, i64::from(expected));
    }
}
