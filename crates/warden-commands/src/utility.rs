//! Utility commands for server staff

use crate::support::{self, COLOR_INFO, COLOR_SUCCESS};
use crate::{Context, Error};
use poise::serenity_prelude::{self as serenity, Mentionable};
use warden_common::utils::truncate_for_embed;

/// Make the bot say something
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn say(
    ctx: Context<'_>,
    #[description = "The message to say"] message: String,
    #[description = "Channel to send to (optional)"] channel: Option<serenity::GuildChannel>,
) -> Result<(), Error> {
    let target = channel
        .map(|channel| channel.id)
        .unwrap_or_else(|| ctx.channel_id());

    if target.say(ctx.http(), message.as_str()).await.is_err() {
        return support::refuse(
            &ctx,
            "I don't have permission to send messages in that channel.",
        )
        .await;
    }

    let embed = serenity::CreateEmbed::new()
        .title("✅ Message Sent")
        .description(format!("Message sent to {}", target.mention()))
        .colour(COLOR_SUCCESS)
        .field("Message", truncate_for_embed(&message, 1000), false)
        .timestamp(serenity::Timestamp::now());

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    support::log_usage(&ctx, "say", Some(format!("Channel: {target}"))).await;
    Ok(())
}

/// Create a custom embed message
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn embed(
    ctx: Context<'_>,
    #[description = "Embed title"] title: String,
    #[description = "Embed description"] description: String,
    #[description = "Hex color (e.g., #ff0000)"] color: Option<String>,
) -> Result<(), Error> {
    let color = support::parse_embed_color(color.as_deref().unwrap_or("#0099ff"));

    let embed = serenity::CreateEmbed::new()
        .title(title.as_str())
        .description(description.as_str())
        .colour(color)
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Created by {}",
            ctx.author().name
        )))
        .timestamp(serenity::Timestamp::now());

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    support::log_usage(&ctx, "embed", Some(format!("Title: {title}"))).await;
    Ok(())
}

/// Show detailed role information
#[poise::command(slash_command, guild_only)]
pub async fn roleinfo(
    ctx: Context<'_>,
    #[description = "The role to get information about"] role: serenity::Role,
) -> Result<(), Error> {
    let members_with_role = {
        ctx.guild()
            .map(|guild| {
                guild
                    .members
                    .values()
                    .filter(|member| member.roles.contains(&role.id))
                    .count()
            })
            .unwrap_or(0)
    };

    let mut key_permissions = Vec::new();
    if role.permissions.administrator() {
        key_permissions.push("Administrator");
    }
    if role.permissions.manage_guild() {
        key_permissions.push("Manage Server");
    }
    if role.permissions.manage_channels() {
        key_permissions.push("Manage Channels");
    }
    if role.permissions.manage_messages() {
        key_permissions.push("Manage Messages");
    }
    if role.permissions.kick_members() {
        key_permissions.push("Kick Members");
    }
    if role.permissions.ban_members() {
        key_permissions.push("Ban Members");
    }

    let mut embed = serenity::CreateEmbed::new()
        .title(format!("📋 Role Information: {}", role.name))
        .colour(role.colour)
        .field("Name", role.name.as_str(), true)
        .field("ID", role.id.to_string(), true)
        .field("Color", format!("#{:06x}", role.colour.0), true)
        .field("Position", role.position.to_string(), true)
        .field("Members", members_with_role.to_string(), true)
        .field("Mentionable", if role.mentionable { "Yes" } else { "No" }, true)
        .field("Hoisted", if role.hoist { "Yes" } else { "No" }, true)
        .field("Managed", if role.managed { "Yes" } else { "No" }, true)
        .field(
            "Created",
            format!("<t:{}:F>", role.id.created_at().unix_timestamp()),
            true,
        )
        .timestamp(serenity::Timestamp::now());

    if !key_permissions.is_empty() {
        let shown = key_permissions
            .iter()
            .take(5)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        embed = embed.field("Key Permissions", shown, false);
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    support::log_usage(&ctx, "roleinfo", Some(format!("Role: {}", role.name))).await;
    Ok(())
}

/// Show channel information
#[poise::command(slash_command, guild_only)]
pub async fn channelinfo(
    ctx: Context<'_>,
    #[description = "The channel to get info about"] channel: Option<serenity::GuildChannel>,
) -> Result<(), Error> {
    let channel = match channel {
        Some(channel) => channel,
        None => match ctx.guild_channel().await {
            Some(channel) => channel,
            None => {
                return support::refuse(&ctx, "This command only works in server channels.").await
            }
        },
    };

    let category = {
        ctx.guild()
            .and_then(|guild| {
                channel
                    .parent_id
                    .and_then(|parent| guild.channels.get(&parent).map(|c| c.name.clone()))
            })
            .unwrap_or_else(|| "None".to_string())
    };

    let mut embed = serenity::CreateEmbed::new()
        .title(format!("📺 Channel Information: #{}", channel.name))
        .colour(COLOR_INFO)
        .field("Name", channel.name.as_str(), true)
        .field("ID", channel.id.to_string(), true)
        .field("Type", format!("{:?}", channel.kind), true)
        .field("Category", category, true)
        .field("Position", channel.position.to_string(), true)
        .field("NSFW", if channel.nsfw { "Yes" } else { "No" }, true)
        .field(
            "Created",
            format!("<t:{}:F>", channel.id.created_at().unix_timestamp()),
            true,
        )
        .timestamp(serenity::Timestamp::now());

    if let Some(topic) = &channel.topic {
        if !topic.is_empty() {
            embed = embed.field("Topic", truncate_for_embed(topic, 1000), false);
        }
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    support::log_usage(&ctx, "channelinfo", Some(format!("Channel: {}", channel.name))).await;
    Ok(())
}
