use poise::CreateReply;

use crate::commands::Context;
use crate::error::Result;
use crate::messages;
use crate::prompt;

// Posts the enlistment prompt with the application button into the invoking
// channel, then removes the invoking message to keep the channel clean.
#[poise::command(prefix_command, guild_only, check = "crate::commands::staff_only")]
pub async fn setup(ctx: Context<'_>) -> Result<()> {
    let reply = CreateReply::default()
        .embed(messages::enlistment_prompt_embed())
        .components(vec![prompt::apply_action_row()]);
    ctx.send(reply).await?;

    if let poise::Context::Prefix(prefix_ctx) = ctx {
        prefix_ctx.msg.delete(ctx.serenity_context()).await?;
    }

    Ok(())
}

// Closes the application ticket the command was invoked in. Refused outside
// of ticket channels.
#[poise::command(prefix_command, guild_only, check = "crate::commands::staff_only")]
pub async fn close(ctx: Context<'_>) -> Result<()> {
    let Some(channel) = ctx.guild_channel().await else {
        ctx.say("This command can only be used in application channels.")
            .await?;
        return Ok(());
    };

    let deleted = ctx
        .data()
        .tickets
        .close(ctx.serenity_context(), channel.id, &channel.name)
        .await?;
    if !deleted {
        ctx.say("This command can only be used in application channels.")
            .await?;
    }

    Ok(())
}
