use poise::serenity_prelude::{
    self as serenity, ChannelId, CreateAttachment, CreateEmbed, GetMessages, Message, MessageId,
};
use tracing::info;

use crate::{
    chatlog::{
        ChatLog, LogMessage, LogUser, format_discriminator, page_sizes, render_chat_log,
        top_role_colour, with_unix_timestamp,
    },
    constants::{DEFAULT_LOG_AMOUNT, MESSAGES_PER_PAGE},
    models::{Context, Error},
    utils::validation::{ValidationError, clamp_log_amount, require_guild},
};

/// Shows you the avatar of a given user
#[poise::command(prefix_command, slash_command)]
pub async fn avatar(
    ctx: Context<'_>,
    #[description = "The user whose avatar to show"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let user = user.as_ref().unwrap_or_else(|| ctx.author());
    let colour = rand::random::<u32>() & 0xFF_FFFF;

    let embed = CreateEmbed::new()
        .title(user.name.clone())
        .image(user.face())
        .colour(colour);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Create an HTML log of recent chat in this channel
#[poise::command(prefix_command, slash_command, guild_only)]
pub async fn createlog(
    ctx: Context<'_>,
    #[description = "How many messages to include (1-250)"] amount: Option<i64>,
) -> Result<(), Error> {
    let guild_id = require_guild(ctx.guild_id())?;
    let amount = clamp_log_amount(amount.unwrap_or(DEFAULT_LOG_AMOUNT));
    ctx.defer().await?;

    let messages = fetch_recent_messages(ctx, ctx.channel_id(), amount).await?;
    let channel = ctx.guild_channel().await;

    let log = {
        let guild = ctx
            .cache()
            .guild(guild_id)
            .ok_or(ValidationError::MissingCachedGuild(guild_id))?;

        let channel_name = channel
            .as_ref()
            .map_or_else(|| ctx.channel_id().to_string(), |c| c.name.clone());
        let category_name = channel
            .as_ref()
            .and_then(|c| c.parent_id)
            .and_then(|parent_id| guild.channels.get(&parent_id))
            .map(|category| category.name.clone());
        let mut log = ChatLog::new(channel_name, category_name, guild.name.clone(), guild.icon_url());

        for message in &messages {
            for user in message.mentions.iter().chain(std::iter::once(&message.author)) {
                let member = guild.members.get(&user.id);
                let roles: Vec<(u16, u32)> = member
                    .map(|m| {
                        m.roles
                            .iter()
                            .filter_map(|role_id| guild.roles.get(role_id))
                            .map(|role| (role.position, role.colour.0))
                            .collect()
                    })
                    .unwrap_or_default();
                let display_name = member
                    .and_then(|m| m.nick.clone())
                    .unwrap_or_else(|| user.display_name().to_string());

                log.add_user(
                    user.id.get(),
                    LogUser {
                        username: user.name.clone(),
                        discriminator: format_discriminator(user.discriminator.map(|d| d.get())),
                        avatar_url: user.face(),
                        bot: user.bot,
                        display_name,
                        color: top_role_colour(&roles),
                    },
                );
            }
        }

        log.set_messages_newest_first(messages.iter().map(log_message).collect());
        log
    };

    let html = render_chat_log(&ctx.data().http_client, &ctx.data().chatlog_api_url, &log).await?;
    let filename = format!("Logs-{}.html", ctx.created_at().unix_timestamp());

    info!(
        "Created chat log of {} messages for channel {} in guild {}",
        log.messages.len(),
        ctx.channel_id(),
        guild_id
    );

    ctx.send(
        poise::CreateReply::default().attachment(CreateAttachment::bytes(html.into_bytes(), filename)),
    )
    .await?;
    Ok(())
}

/// Fetch up to `amount` of the most recent messages, newest first
async fn fetch_recent_messages(
    ctx: Context<'_>,
    channel_id: ChannelId,
    amount: u16,
) -> Result<Vec<Message>, Error> {
    let mut messages: Vec<Message> = Vec::with_capacity(amount as usize);
    let mut before: Option<MessageId> = None;

    for size in page_sizes(amount, MESSAGES_PER_PAGE) {
        let mut request = GetMessages::new().limit(size);
        if let Some(before) = before {
            request = request.before(before);
        }

        let page = channel_id.messages(ctx.serenity_context(), request).await?;
        let page_len = page.len();
        before = page.last().map(|m| m.id);
        messages.extend(page);

        if page_len < size as usize {
            break;
        }
    }

    Ok(messages)
}

fn log_message(message: &Message) -> LogMessage {
    LogMessage {
        id: message.id.get(),
        content: message.content.clone(),
        author_id: message.author.id.get(),
        timestamp: message.timestamp.unix_timestamp(),
        attachments: message.attachments.iter().map(|a| a.url.clone()).collect(),
        embeds: message
            .embeds
            .iter()
            .map(|embed| {
                let value = serde_json::to_value(embed).unwrap_or_default();
                with_unix_timestamp(value, embed.timestamp.map(|t| t.unix_timestamp()))
            })
            .collect(),
    }
}
