//! Moderation commands
//!
//! Each command validates the invoker's permission flag declaratively, checks
//! the role hierarchy where a member is targeted, performs exactly one
//! Discord call, and reports the outcome in a templated embed with the
//! labels drawn from the translation table.

use crate::support::{self, COLOR_BAN, COLOR_KICK, COLOR_SUCCESS, COLOR_TIMEOUT, COLOR_WARN};
use crate::{Context, Error};
use chrono::{Duration, Utc};
use poise::serenity_prelude::{self as serenity, Mentionable};
use warden_i18n::get_translation;

/// Maximum timeout Discord accepts: 28 days, in minutes
const MAX_TIMEOUT_MINUTES: i64 = 40_320;

fn label(ctx: &Context<'_>, key: &str) -> String {
    get_translation(key, &ctx.data().config.discord.default_language)
}

async fn target_member(
    ctx: &Context<'_>,
    user: &serenity::User,
) -> Result<Option<serenity::Member>, Error> {
    let guild_id = ctx.guild_id().ok_or("moderation outside a guild")?;

    match guild_id.member(ctx.http(), user.id).await {
        Ok(member) => Ok(Some(member)),
        Err(_) => Ok(None),
    }
}

/// Kick a member from the server
#[poise::command(slash_command, guild_only, required_permissions = "KICK_MEMBERS")]
pub async fn kick(
    ctx: Context<'_>,
    #[description = "The member to kick"] user: serenity::User,
    #[description = "Reason for the kick"] reason: Option<String>,
) -> Result<(), Error> {
    let reason = reason.unwrap_or_else(|| "No reason provided".to_string());

    let Some(member) = target_member(&ctx, &user).await? else {
        return support::refuse(&ctx, "That user is not a member of this server.").await;
    };
    if !support::author_outranks(&ctx, &member).await? {
        return support::refuse(&ctx, "You cannot kick this member (role hierarchy).").await;
    }

    if member.kick_with_reason(ctx.http(), &reason).await.is_err() {
        return support::refuse(&ctx, "I don't have permission to kick this member.").await;
    }

    let embed = serenity::CreateEmbed::new()
        .title("👢 Member Kicked")
        .colour(COLOR_KICK)
        .field(
            label(&ctx, "member"),
            format!("{} ({})", user.mention(), user.tag()),
            false,
        )
        .field(label(&ctx, "moderator"), ctx.author().mention().to_string(), true)
        .field(label(&ctx, "reason"), reason.as_str(), false)
        .timestamp(serenity::Timestamp::now());

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    support::log_usage(&ctx, "kick", Some(format!("Kicked {}: {}", user.tag(), reason))).await;
    Ok(())
}

/// Ban a member from the server
#[poise::command(slash_command, guild_only, required_permissions = "BAN_MEMBERS")]
pub async fn ban(
    ctx: Context<'_>,
    #[description = "The member to ban"] user: serenity::User,
    #[description = "Reason for the ban"] reason: Option<String>,
    #[description = "Days of message history to delete (0-7)"] delete_days: Option<i64>,
) -> Result<(), Error> {
    let reason = reason.unwrap_or_else(|| "No reason provided".to_string());
    let delete_days = delete_days.unwrap_or(0);

    if !support::within(delete_days, 0, 7) {
        return support::refuse(&ctx, "Delete days must be between 0 and 7.").await;
    }

    let Some(member) = target_member(&ctx, &user).await? else {
        return support::refuse(&ctx, "That user is not a member of this server.").await;
    };
    if !support::author_outranks(&ctx, &member).await? {
        return support::refuse(&ctx, "You cannot ban this member (role hierarchy).").await;
    }

    if member
        .ban_with_reason(ctx.http(), delete_days as u8, &reason)
        .await
        .is_err()
    {
        return support::refuse(&ctx, "I don't have permission to ban this member.").await;
    }

    let embed = serenity::CreateEmbed::new()
        .title("🔨 Member Banned")
        .colour(COLOR_BAN)
        .field(
            label(&ctx, "member"),
            format!("{} ({})", user.mention(), user.tag()),
            false,
        )
        .field(label(&ctx, "moderator"), ctx.author().mention().to_string(), true)
        .field(label(&ctx, "reason"), reason.as_str(), false)
        .field("Messages Deleted", format!("{delete_days} days"), true)
        .timestamp(serenity::Timestamp::now());

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    support::log_usage(&ctx, "ban", Some(format!("Banned {}: {}", user.tag(), reason))).await;
    Ok(())
}

/// Unban a user by ID
#[poise::command(slash_command, guild_only, required_permissions = "BAN_MEMBERS")]
pub async fn unban(
    ctx: Context<'_>,
    #[description = "The ID of the user to unban"] user_id: String,
    #[description = "Reason for the unban"] reason: Option<String>,
) -> Result<(), Error> {
    let reason = reason.unwrap_or_else(|| "No reason provided".to_string());
    let guild_id = ctx.guild_id().ok_or("unban outside a guild")?;

    let id = match user_id.trim().parse::<u64>() {
        Ok(id) if id > 0 => id,
        _ => return support::refuse(&ctx, "Invalid user ID provided.").await,
    };

    let Ok(user) = ctx.http().get_user(serenity::UserId::new(id)).await else {
        return support::refuse(&ctx, "User not found or not banned.").await;
    };

    if guild_id.unban(ctx.http(), user.id).await.is_err() {
        return support::refuse(&ctx, "User not found or not banned.").await;
    }

    let embed = serenity::CreateEmbed::new()
        .title("✅ User Unbanned")
        .colour(COLOR_SUCCESS)
        .field(
            "User",
            format!("{} ({})", user.mention(), user.tag()),
            false,
        )
        .field(label(&ctx, "moderator"), ctx.author().mention().to_string(), true)
        .field(label(&ctx, "reason"), reason.as_str(), false)
        .timestamp(serenity::Timestamp::now());

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    support::log_usage(&ctx, "unban", Some(format!("Unbanned {}: {}", user.tag(), reason))).await;
    Ok(())
}

/// Timeout a member
#[poise::command(slash_command, guild_only, required_permissions = "MODERATE_MEMBERS")]
pub async fn timeout(
    ctx: Context<'_>,
    #[description = "The member to timeout"] user: serenity::User,
    #[description = "Duration in minutes"] duration: i64,
    #[description = "Reason for the timeout"] reason: Option<String>,
) -> Result<(), Error> {
    let reason = reason.unwrap_or_else(|| "No reason provided".to_string());

    if !support::within(duration, 1, MAX_TIMEOUT_MINUTES) {
        return support::refuse(
            &ctx,
            "Duration must be between 1 minute and 28 days (40320 minutes).",
        )
        .await;
    }

    let Some(mut member) = target_member(&ctx, &user).await? else {
        return support::refuse(&ctx, "That user is not a member of this server.").await;
    };
    if !support::author_outranks(&ctx, &member).await? {
        return support::refuse(&ctx, "You cannot timeout this member (role hierarchy).").await;
    }

    let until = Utc::now() + Duration::minutes(duration);
    let until_ts = serenity::Timestamp::from_unix_timestamp(until.timestamp())?;

    if member
        .disable_communication_until_datetime(ctx.http(), until_ts)
        .await
        .is_err()
    {
        return support::refuse(&ctx, "I don't have permission to timeout this member.").await;
    }

    let embed = serenity::CreateEmbed::new()
        .title("⏰ Member Timed Out")
        .colour(COLOR_TIMEOUT)
        .field(
            label(&ctx, "member"),
            format!("{} ({})", user.mention(), user.tag()),
            false,
        )
        .field(label(&ctx, "moderator"), ctx.author().mention().to_string(), true)
        .field(
            label(&ctx, "duration"),
            warden_common::utils::format_minutes(duration as u32),
            true,
        )
        .field("Until", format!("<t:{}:F>", until.timestamp()), true)
        .field(label(&ctx, "reason"), reason.as_str(), false)
        .timestamp(serenity::Timestamp::now());

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    support::log_usage(
        &ctx,
        "timeout",
        Some(format!(
            "Timed out {} for {} minutes: {}",
            user.tag(),
            duration,
            reason
        )),
    )
    .await;
    Ok(())
}

/// Remove a timeout from a member
#[poise::command(slash_command, guild_only, required_permissions = "MODERATE_MEMBERS")]
pub async fn untimeout(
    ctx: Context<'_>,
    #[description = "The member to remove the timeout from"] user: serenity::User,
    #[description = "Reason for removing the timeout"] reason: Option<String>,
) -> Result<(), Error> {
    let reason = reason.unwrap_or_else(|| "No reason provided".to_string());

    let Some(mut member) = target_member(&ctx, &user).await? else {
        return support::refuse(&ctx, "That user is not a member of this server.").await;
    };

    let timed_out = member
        .communication_disabled_until
        .map(|until| until.unix_timestamp() > Utc::now().timestamp())
        .unwrap_or(false);
    if !timed_out {
        return support::refuse(&ctx, "This member is not timed out.").await;
    }

    if member.enable_communication(ctx.http()).await.is_err() {
        return support::refuse(
            &ctx,
            "I don't have permission to remove the timeout from this member.",
        )
        .await;
    }

    let embed = serenity::CreateEmbed::new()
        .title("✅ Timeout Removed")
        .colour(COLOR_SUCCESS)
        .field(
            label(&ctx, "member"),
            format!("{} ({})", user.mention(), user.tag()),
            false,
        )
        .field(label(&ctx, "moderator"), ctx.author().mention().to_string(), true)
        .field(label(&ctx, "reason"), reason.as_str(), false)
        .timestamp(serenity::Timestamp::now());

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    support::log_usage(
        &ctx,
        "untimeout",
        Some(format!("Removed timeout from {}: {}", user.tag(), reason)),
    )
    .await;
    Ok(())
}

/// Warn a member, attempting a DM first
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn warn(
    ctx: Context<'_>,
    #[description = "The member to warn"] user: serenity::User,
    #[description = "Reason for the warning"] reason: Option<String>,
) -> Result<(), Error> {
    let reason = reason.unwrap_or_else(|| "No reason provided".to_string());
    let guild_name = ctx
        .guild()
        .map(|guild| guild.name.clone())
        .unwrap_or_else(|| "this server".to_string());

    let dm_embed = serenity::CreateEmbed::new()
        .title("⚠️ Warning")
        .description(format!("You have been warned in **{guild_name}**"))
        .colour(COLOR_WARN)
        .field(label(&ctx, "reason"), reason.as_str(), false)
        .field(label(&ctx, "moderator"), ctx.author().tag(), true)
        .timestamp(serenity::Timestamp::now());

    let dm_sent = user
        .direct_message(ctx.http(), serenity::CreateMessage::new().embed(dm_embed))
        .await
        .is_ok();

    let embed = serenity::CreateEmbed::new()
        .title("⚠️ Member Warned")
        .colour(COLOR_WARN)
        .field(
            label(&ctx, "member"),
            format!("{} ({})", user.mention(), user.tag()),
            false,
        )
        .field(label(&ctx, "moderator"), ctx.author().mention().to_string(), true)
        .field(label(&ctx, "reason"), reason.as_str(), false)
        .field(
            "DM Sent",
            if dm_sent { "Yes" } else { "No (DMs disabled)" },
            true,
        )
        .timestamp(serenity::Timestamp::now());

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    support::log_usage(&ctx, "warn", Some(format!("Warned {}: {}", user.tag(), reason))).await;
    Ok(())
}

/// Clear messages from the current channel
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn clear(
    ctx: Context<'_>,
    #[description = "Number of messages to clear (1-100)"] amount: Option<i64>,
) -> Result<(), Error> {
    let amount = amount.unwrap_or(5);

    if !support::within(amount, 1, 100) {
        return support::refuse(&ctx, "Please specify a number between 1 and 100.").await;
    }

    let messages = ctx
        .channel_id()
        .messages(
            ctx.http(),
            serenity::GetMessages::new().limit(amount as u8),
        )
        .await?;
    let ids: Vec<serenity::MessageId> = messages.iter().map(|message| message.id).collect();
    let deleted = ids.len();

    let result = match deleted {
        0 => Ok(()),
        1 => messages[0].delete(ctx.http()).await,
        _ => ctx.channel_id().delete_messages(ctx.http(), ids).await,
    };
    if result.is_err() {
        return support::refuse(
            &ctx,
            "I don't have permission to delete messages in this channel.",
        )
        .await;
    }

    let embed = serenity::CreateEmbed::new()
        .title("🧹 Messages Cleared")
        .description(format!("Successfully deleted {deleted} messages."))
        .colour(COLOR_SUCCESS)
        .field("Cleared by", ctx.author().mention().to_string(), true)
        .field("Amount", deleted.to_string(), true)
        .timestamp(serenity::Timestamp::now());

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    support::log_usage(&ctx, "clear", Some(format!("Cleared {deleted} messages"))).await;
    Ok(())
}
