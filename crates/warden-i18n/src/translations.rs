//! Static translation table and fallback-chain lookup

use crate::Language;
use once_cell::sync::Lazy;
use std::collections::HashMap;

const EN: &[(&str, &str)] = &[
    ("match_notification", "Match Notification"),
    ("match_teams", "Teams"),
    ("match_time", "Time"),
    ("match_date", "Date"),
    ("translated_message", "This message has been translated"),
    ("reminder_10min", "Match starts in 10 minutes!"),
    ("reminder_3min", "Match starts in 3 minutes!"),
    ("match_ended", "Match has ended"),
    ("bot_activity", "Bot Activity"),
    ("announcement", "Announcement"),
    ("server_info", "Server Information"),
    ("private_message", "Private Message from Server Admin"),
    ("server", "Server"),
    ("from", "From"),
    ("moderation_action", "Moderation Action"),
    ("member", "Member"),
    ("moderator", "Moderator"),
    ("reason", "Reason"),
    ("duration", "Duration"),
    ("role", "Role"),
    ("channel", "Channel"),
    ("created_by", "Created by kokex | Contact: kokexe"),
];

const PT: &[(&str, &str)] = &[
    ("match_notification", "Notificação de Partida"),
    ("match_teams", "Equipes"),
    ("match_time", "Hora"),
    ("match_date", "Data"),
    ("translated_message", "Esta mensagem foi traduzida"),
    ("reminder_10min", "A partida começa em 10 minutos!"),
    ("reminder_3min", "A partida começa em 3 minutos!"),
    ("match_ended", "A partida terminou"),
    ("bot_activity", "Atividade do Bot"),
    ("announcement", "Anúncio"),
    ("server_info", "Informações do Servidor"),
    ("private_message", "Mensagem Privada do Admin do Servidor"),
    ("server", "Servidor"),
    ("from", "De"),
    ("moderation_action", "Ação de Moderação"),
    ("member", "Membro"),
    ("moderator", "Moderador"),
    ("reason", "Motivo"),
    ("duration", "Duração"),
    ("role", "Cargo"),
    ("channel", "Canal"),
    ("created_by", "Criado por kokex | Contato: kokexe"),
];

const ES: &[(&str, &str)] = &[
    ("match_notification", "Notificación de Partido"),
    ("match_teams", "Equipos"),
    ("match_time", "Hora"),
    ("match_date", "Fecha"),
    ("translated_message", "Este mensaje ha sido traducido"),
    ("reminder_10min", "¡El partido comienza en 10 minutos!"),
    ("reminder_3min", "¡El partido comienza en 3 minutos!"),
    ("match_ended", "El partido ha terminado"),
    ("bot_activity", "Actividad del Bot"),
    ("announcement", "Anuncio"),
    ("server_info", "Información del Servidor"),
    ("private_message", "Mensaje Privado del Admin del Servidor"),
    ("server", "Servidor"),
    ("from", "De"),
    ("moderation_action", "Acción de Moderación"),
    ("member", "Miembro"),
    ("moderator", "Moderador"),
    ("reason", "Razón"),
    ("duration", "Duración"),
    ("role", "Rol"),
    ("channel", "Canal"),
    ("created_by", "Creado por kokex | Contacto: kokexe"),
];

/// Immutable (language -> key -> text) table, built once on first access.
static TRANSLATIONS: Lazy<HashMap<Language, HashMap<&'static str, &'static str>>> =
    Lazy::new(|| {
        let mut table = HashMap::new();
        table.insert(Language::English, EN.iter().copied().collect());
        table.insert(Language::Portuguese, PT.iter().copied().collect());
        table.insert(Language::Spanish, ES.iter().copied().collect());
        table
    });

fn lookup(language: Language, key: &str) -> Option<&'static str> {
    TRANSLATIONS
        .get(&language)
        .and_then(|entries| entries.get(key))
        .copied()
}

/// Get the display text for a key in the given language.
///
/// Unrecognized language codes are treated as English. A key missing for the
/// requested language falls back to the English text, and a key missing there
/// too comes back verbatim, so this never fails.
pub fn get_translation(key: &str, language: &str) -> String {
    let language = Language::resolve(language);

    lookup(language, key)
        .or_else(|| lookup(Language::English, key))
        .map(str::to_string)
        .unwrap_or_else(|| key.to_string())
}

/// The fixed set of supported language codes, for language selectors.
pub fn supported_languages() -> Vec<&'static str> {
    Language::all().iter().map(Language::code).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_english_key_resolves_in_all_languages() {
        for (key, _) in EN {
            for language in Language::all() {
                let text = get_translation(key, language.code());
                assert!(!text.is_empty(), "empty text for {key} in {language:?}");
            }
        }
    }

    #[test]
    fn test_missing_key_returns_key_verbatim() {
        assert_eq!(
            get_translation("nonexistent_key_xyz", "en"),
            "nonexistent_key_xyz"
        );
        assert_eq!(
            get_translation("nonexistent_key_xyz", "pt"),
            "nonexistent_key_xyz"
        );
    }

    #[test]
    fn test_unknown_language_equals_english() {
        for (key, _) in EN {
            assert_eq!(
                get_translation(key, "xx_invalid"),
                get_translation(key, "en")
            );
        }
    }

    #[test]
    fn test_localized_entries_differ_where_translated() {
        assert_eq!(get_translation("reason", "pt"), "Motivo");
        assert_eq!(get_translation("reason", "es"), "Razón");
        assert_eq!(get_translation("match_date", "es"), "Fecha");
    }

    #[test]
    fn test_supported_languages_exact_set() {
        let mut codes = supported_languages();
        codes.sort_unstable();
        assert_eq!(codes, vec!["en", "es", "pt"]);
    }
}
