//! Informational commands available to every user

use crate::support::{self, COLOR_EIGHT_BALL, COLOR_INFO, COLOR_SUCCESS};
use crate::{Context, Error};
use poise::serenity_prelude as serenity;
use rand::seq::SliceRandom;

/// Check bot latency and status
#[poise::command(slash_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let latency = ctx.ping().await;
    let guilds = ctx.serenity_context().cache.guilds().len();

    let embed = serenity::CreateEmbed::new()
        .title("🏓 Pong!")
        .description(format!("Bot latency: **{}ms**", latency.as_millis()))
        .colour(COLOR_SUCCESS)
        .field("Status", "Online", true)
        .field("Servers", guilds.to_string(), true)
        .timestamp(serenity::Timestamp::now());

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    support::log_usage(&ctx, "ping", None).await;
    Ok(())
}

/// Display server information
#[poise::command(slash_command, guild_only)]
pub async fn serverinfo(ctx: Context<'_>) -> Result<(), Error> {
    struct Snapshot {
        name: String,
        owner_id: serenity::UserId,
        member_count: u64,
        channels: usize,
        roles: usize,
        premium_tier: u8,
        icon_url: Option<String>,
        created_at: serenity::Timestamp,
    }

    let snapshot = {
        let Some(guild) = ctx.guild() else {
            return support::refuse(&ctx, "This command only works in servers.").await;
        };
        Snapshot {
            name: guild.name.clone(),
            owner_id: guild.owner_id,
            member_count: guild.member_count,
            channels: guild.channels.len(),
            roles: guild.roles.len(),
            premium_tier: match guild.premium_tier {
                serenity::PremiumTier::Tier1 => 1,
                serenity::PremiumTier::Tier2 => 2,
                serenity::PremiumTier::Tier3 => 3,
                _ => 0,
            },
            icon_url: guild.icon_url(),
            created_at: guild.id.created_at(),
        }
    };

    let mut embed = serenity::CreateEmbed::new()
        .title(format!("📊 {} Server Information", snapshot.name))
        .colour(COLOR_INFO)
        .field("Owner", format!("<@{}>", snapshot.owner_id), true)
        .field("Members", snapshot.member_count.to_string(), true)
        .field(
            "Created",
            format!("<t:{}:F>", snapshot.created_at.unix_timestamp()),
            true,
        )
        .field("Channels", snapshot.channels.to_string(), true)
        .field("Roles", snapshot.roles.to_string(), true)
        .field("Boost Level", snapshot.premium_tier.to_string(), true)
        .timestamp(serenity::Timestamp::now());

    if let Some(icon) = snapshot.icon_url {
        embed = embed.thumbnail(icon);
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    support::log_usage(&ctx, "serverinfo", None).await;
    Ok(())
}

/// Show user information
#[poise::command(slash_command, guild_only)]
pub async fn userinfo(
    ctx: Context<'_>,
    #[description = "The member to get info about"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let user = user.unwrap_or_else(|| ctx.author().clone());
    let guild_id = ctx.guild_id().ok_or("userinfo outside a guild")?;

    let member = guild_id.member(ctx.http(), user.id).await.ok();

    let top_role = {
        let guild = ctx.guild();
        guild
            .as_ref()
            .zip(member.as_ref())
            .and_then(|(guild, member)| {
                guild.member_highest_role(member).map(|role| role.name.clone())
            })
    };

    let mut embed = serenity::CreateEmbed::new()
        .title(format!("👤 {}", user.name))
        .colour(COLOR_INFO)
        .thumbnail(user.face())
        .field("Username", user.tag(), true)
        .field("ID", user.id.to_string(), true)
        .field(
            "Account Created",
            format!("<t:{}:F>", user.created_at().unix_timestamp()),
            true,
        )
        .timestamp(serenity::Timestamp::now());

    if let Some(member) = &member {
        if let Some(joined) = member.joined_at {
            embed = embed.field("Joined Server", format!("<t:{}:F>", joined.unix_timestamp()), true);
        }
        embed = embed.field("Roles", member.roles.len().to_string(), true);
    }
    if let Some(role) = top_role {
        embed = embed.field("Top Role", role, true);
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    support::log_usage(&ctx, "userinfo", Some(format!("Target: {}", user.tag()))).await;
    Ok(())
}

/// Display a user's avatar
#[poise::command(slash_command)]
pub async fn avatar(
    ctx: Context<'_>,
    #[description = "The member to show the avatar for"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let user = user.unwrap_or_else(|| ctx.author().clone());
    let avatar_url = user.face();

    let embed = serenity::CreateEmbed::new()
        .title(format!("🖼️ {}'s Avatar", user.name))
        .colour(COLOR_INFO)
        .image(avatar_url.clone())
        .field("Direct Link", format!("[Click here]({avatar_url})"), false)
        .timestamp(serenity::Timestamp::now());

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    support::log_usage(&ctx, "avatar", Some(format!("Target: {}", user.tag()))).await;
    Ok(())
}

const EIGHT_BALL_RESPONSES: [&str; 20] = [
    "It is certain",
    "It is decidedly so",
    "Without a doubt",
    "Yes definitely",
    "You may rely on it",
    "As I see it, yes",
    "Most likely",
    "Outlook good",
    "Yes",
    "Signs point to yes",
    "Reply hazy, try again",
    "Ask again later",
    "Better not tell you now",
    "Cannot predict now",
    "Concentrate and ask again",
    "Don't count on it",
    "My reply is no",
    "My sources say no",
    "Outlook not so good",
    "Very doubtful",
];

/// Ask the magic 8-ball
#[poise::command(slash_command, rename = "8ball")]
pub async fn eightball(
    ctx: Context<'_>,
    #[description = "Your question for the 8-ball"] question: String,
) -> Result<(), Error> {
    let answer = *EIGHT_BALL_RESPONSES
        .choose(&mut rand::thread_rng())
        .unwrap_or(&EIGHT_BALL_RESPONSES[0]);

    let embed = serenity::CreateEmbed::new()
        .title("🎱 Magic 8-Ball")
        .colour(COLOR_EIGHT_BALL)
        .field("Question", question.as_str(), false)
        .field("Answer", answer, false)
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Asked by {}",
            ctx.author().name
        )))
        .timestamp(serenity::Timestamp::now());

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    support::log_usage(&ctx, "8ball", Some(format!("Question: {question}"))).await;
    Ok(())
}

/// Show all available commands
#[poise::command(slash_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    // Interaction members carry their computed permissions, so no cache
    // lookup is needed here.
    let can_moderate = ctx
        .author_member()
        .await
        .and_then(|member| member.permissions)
        .map(|permissions| permissions.manage_messages())
        .unwrap_or(false);

    let mut embed = serenity::CreateEmbed::new()
        .title("🤖 Bot Commands Help")
        .description("Here are all available commands:")
        .colour(COLOR_INFO)
        .field(
            "🔧 Basic Commands",
            "`/ping` - Check bot latency\n\
             `/help` - Show this help message\n\
             `/serverinfo` - Get server information\n\
             `/userinfo` - Get user information\n\
             `/avatar` - Show user's avatar\n\
             `/8ball` - Ask the magic 8-ball",
            false,
        )
        .timestamp(serenity::Timestamp::now());

    if can_moderate {
        embed = embed.field(
            "🛡️ Moderation Commands",
            "`/kick` - Kick a member\n\
             `/ban` - Ban a member\n\
             `/unban` - Unban a user by ID\n\
             `/timeout` - Timeout a member\n\
             `/untimeout` - Remove timeout\n\
             `/warn` - Warn a member (with DM)\n\
             `/clear` - Clear messages",
            false,
        );
    }

    embed = embed
        .field(
            "🔧 Utility Commands",
            "`/say` - Make bot say something\n\
             `/embed` - Create custom embed\n\
             `/roleinfo` - Show role information\n\
             `/channelinfo` - Show channel info",
            false,
        )
        .field(
            "⚽ Match Commands",
            "`/create_match` - Create a match\n\
             `/list_matches` - List active matches\n\
             `/end_match` - End a match",
            false,
        )
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Warden v{}",
            env!("CARGO_PKG_VERSION")
        )));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    support::log_usage(&ctx, "help", None).await;
    Ok(())
}
