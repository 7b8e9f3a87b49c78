//! Match scheduling commands
//!
//! Matches are stored as plain rows; the embeds echo the kickoff time in
//! every supported language via the localization tables, so the same
//! notification reads correctly for each audience.

use crate::support::{self, COLOR_INFO, COLOR_SUCCESS};
use crate::{Context, Error};
use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, TimeZone, Utc};
use poise::serenity_prelude::{self as serenity, Mentionable};
use warden_i18n::{format_for_language, get_translation, localize, Language};
use warden_store::NewMatch;

/// Parse a kickoff time, interpreted as UTC.
///
/// Accepts `YYYY-MM-DD HH:MM`, or a bare `HH:MM` meaning the next occurrence
/// of that wall-clock time.
fn parse_match_time(input: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(datetime) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        return Some(Utc.from_utc_datetime(&datetime));
    }

    if let Ok(time) = NaiveTime::parse_from_str(input, "%H:%M") {
        let candidate = Utc.from_utc_datetime(&now.date_naive().and_time(time));
        return Some(if candidate > now {
            candidate
        } else {
            candidate + Duration::days(1)
        });
    }

    None
}

fn default_language(ctx: &Context<'_>) -> String {
    ctx.data().config.discord.default_language.clone()
}

/// Create a scheduled match
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_EVENTS")]
pub async fn create_match(
    ctx: Context<'_>,
    #[description = "First team name"] team1: String,
    #[description = "Second team name"] team2: String,
    #[description = "Match time, UTC (e.g. '14:30' or '2024-06-08 18:00')"] time: String,
    #[description = "Match description"] description: Option<String>,
) -> Result<(), Error> {
    let description = description.unwrap_or_else(|| "No description".to_string());
    let guild_id = ctx.guild_id().ok_or("create_match outside a guild")?;

    let Some(match_date) = parse_match_time(&time, Utc::now()) else {
        return support::refuse(
            &ctx,
            "Invalid time. Use 'HH:MM' or 'YYYY-MM-DD HH:MM' (UTC).",
        )
        .await;
    };

    let guild_name = ctx
        .guild()
        .map(|guild| guild.name.clone())
        .unwrap_or_else(|| guild_id.to_string());

    let store = &ctx.data().store;
    let server_id = store
        .upsert_server(&guild_id.to_string(), &guild_name)
        .await?;
    let match_id = store
        .create_match(&NewMatch {
            server_id,
            team1: team1.clone(),
            team2: team2.clone(),
            match_date,
            channel_id: ctx.channel_id().to_string(),
            created_by: ctx.author().id.to_string(),
            role_mentions: None,
        })
        .await?;

    let lang = default_language(&ctx);
    let localized = localize(match_date);

    let mut embed = serenity::CreateEmbed::new()
        .title(format!("⚽ {}", get_translation("match_notification", &lang)))
        .description(format!("**{team1}** vs **{team2}**"))
        .colour(COLOR_SUCCESS)
        .field("Match ID", match_id.to_string(), true)
        .field("Created by", ctx.author().mention().to_string(), true)
        .timestamp(serenity::Timestamp::now());

    for language in Language::all() {
        let code = language.code();
        embed = embed.field(
            format!(
                "{} ({})",
                get_translation("match_time", code),
                language.display_name()
            ),
            format_for_language(&localized[&language], code),
            false,
        );
    }

    embed = embed.field("Description", description.as_str(), false);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    support::log_usage(
        &ctx,
        "create_match",
        Some(format!("{team1} vs {team2} at {time}")),
    )
    .await;
    Ok(())
}

/// List active matches for this server
#[poise::command(slash_command, guild_only)]
pub async fn list_matches(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("list_matches outside a guild")?;
    let matches = ctx
        .data()
        .store
        .active_matches(&guild_id.to_string())
        .await?;

    let lang = default_language(&ctx);
    let language = Language::resolve(&lang);

    let mut embed = serenity::CreateEmbed::new()
        .title("⚽ Active Matches")
        .colour(COLOR_INFO)
        .timestamp(serenity::Timestamp::now());

    if matches.is_empty() {
        embed = embed.description("No active matches found.").field(
            "Info",
            "Use `/create_match` to create new matches",
            false,
        );
    } else {
        for entry in &matches {
            let local = entry.match_date.with_timezone(&language.timezone());
            embed = embed.field(
                format!("#{} {} vs {}", entry.id, entry.team1, entry.team2),
                format!(
                    "{}: {}",
                    get_translation("match_date", &lang),
                    format_for_language(&local, &lang)
                ),
                false,
            );
        }
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    support::log_usage(&ctx, "list_matches", None).await;
    Ok(())
}

/// End a match by ID
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_EVENTS")]
pub async fn end_match(
    ctx: Context<'_>,
    #[description = "The ID of the match to end"] match_id: i64,
) -> Result<(), Error> {
    let ended = ctx.data().store.end_match(match_id).await?;
    if !ended {
        return support::refuse(&ctx, "Match not found or already ended.").await;
    }

    let lang = default_language(&ctx);

    let embed = serenity::CreateEmbed::new()
        .title("✅ Match Ended")
        .description(format!(
            "{} (#{match_id})",
            get_translation("match_ended", &lang)
        ))
        .colour(COLOR_SUCCESS)
        .field("Ended by", ctx.author().mention().to_string(), true)
        .timestamp(serenity::Timestamp::now());

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    support::log_usage(&ctx, "end_match", Some(format!("Ended match #{match_id}"))).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_parse_full_datetime() {
        let now = at(2024, 6, 1, 12, 0);
        assert_eq!(
            parse_match_time("2024-06-08 18:00", now),
            Some(at(2024, 6, 8, 18, 0))
        );
    }

    #[test]
    fn test_parse_bare_time_later_today() {
        let now = at(2024, 6, 1, 12, 0);
        assert_eq!(parse_match_time("14:30", now), Some(at(2024, 6, 1, 14, 30)));
    }

    #[test]
    fn test_parse_bare_time_already_past_rolls_to_tomorrow() {
        let now = at(2024, 6, 1, 12, 0);
        assert_eq!(parse_match_time("09:00", now), Some(at(2024, 6, 2, 9, 0)));
    }

    #[test]
    fn test_parse_garbage_is_rejected() {
        let now = at(2024, 6, 1, 12, 0);
        assert_eq!(parse_match_time("soon", now), None);
        assert_eq!(parse_match_time("25:99", now), None);
        assert_eq!(parse_match_time("", now), None);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let now = at(2024, 6, 1, 12, 0);
        assert_eq!(
            parse_match_time("  14:30  ", now),
            Some(at(2024, 6, 1, 14, 30))
        );
    }
}
