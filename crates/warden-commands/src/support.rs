//! Shared helpers for command handlers

use crate::{Context, Error};
use poise::serenity_prelude as serenity;
use tracing::warn;
use warden_store::NewCommandLog;

pub(crate) const COLOR_INFO: u32 = 0x0099ff;
pub(crate) const COLOR_SUCCESS: u32 = 0x00ff00;
pub(crate) const COLOR_KICK: u32 = 0xff6b6b;
pub(crate) const COLOR_BAN: u32 = 0xff0000;
pub(crate) const COLOR_TIMEOUT: u32 = 0xffa500;
pub(crate) const COLOR_WARN: u32 = 0xffaa00;
pub(crate) const COLOR_EIGHT_BALL: u32 = 0x8b0000;

/// Record a command invocation in the log table.
///
/// Logging must never block a moderation action or a reply from being sent;
/// a failed insert is traced and swallowed.
pub(crate) async fn log_usage(ctx: &Context<'_>, command: &str, details: Option<String>) {
    let entry = NewCommandLog {
        server_id: ctx
            .guild_id()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "0".to_string()),
        user_id: ctx.author().id.to_string(),
        username: ctx.author().name.clone(),
        command: command.to_string(),
        channel_id: ctx.channel_id().to_string(),
        details,
    };

    if let Err(err) = ctx.data().store.record_command(&entry).await {
        warn!(command, "Failed to record command usage: {}", err);
    }
}

/// Reply with an ephemeral refusal message
pub(crate) async fn refuse(ctx: &Context<'_>, message: &str) -> Result<(), Error> {
    ctx.send(
        poise::CreateReply::default()
            .content(format!("❌ {message}"))
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Whether the invoking member sits above the target in the role hierarchy.
/// The guild owner outranks everyone.
pub(crate) async fn author_outranks(
    ctx: &Context<'_>,
    target: &serenity::Member,
) -> Result<bool, Error> {
    let author = ctx
        .author_member()
        .await
        .ok_or("could not resolve the invoking member")?;

    let Some(guild) = ctx.guild() else {
        return Ok(false);
    };

    if author.user.id == guild.owner_id {
        return Ok(true);
    }

    let author_position = guild
        .member_highest_role(&author)
        .map(|role| role.position)
        .unwrap_or_default();
    let target_position = guild
        .member_highest_role(target)
        .map(|role| role.position)
        .unwrap_or_default();

    Ok(author_position > target_position)
}

/// Parse a hex color like `#ff0000`, falling back to the standard info blue
pub(crate) fn parse_embed_color(input: &str) -> u32 {
    let trimmed = input.trim().trim_start_matches('#');
    u32::from_str_radix(trimmed, 16).unwrap_or(COLOR_INFO)
}

/// Bound check shared by moderation commands taking numeric arguments
pub(crate) fn within(value: i64, min: i64, max: i64) -> bool {
    (min..=max).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_embed_color_variants() {
        assert_eq!(parse_embed_color("#ff0000"), 0xff0000);
        assert_eq!(parse_embed_color("00ff00"), 0x00ff00);
        assert_eq!(parse_embed_color(" #0099FF "), 0x0099ff);
    }

    #[test]
    fn test_parse_embed_color_fallback() {
        assert_eq!(parse_embed_color("not-a-color"), COLOR_INFO);
        assert_eq!(parse_embed_color(""), COLOR_INFO);
        assert_eq!(parse_embed_color("#zzzzzz"), COLOR_INFO);
    }

    #[test]
    fn test_within_bounds() {
        assert!(within(1, 1, 100));
        assert!(within(100, 1, 100));
        assert!(!within(0, 1, 100));
        assert!(!within(101, 1, 100));
    }
}
