use serenity::all::{
    ButtonStyle, ComponentInteraction, Context, CreateActionRow, CreateButton,
    CreateInteractionResponse, CreateInteractionResponseMessage, Mentionable,
};
use tracing::error;

use crate::config::BotConfig;
use crate::error::Error;
use crate::tickets::TicketManager;

// The fixed control identifier keeps the button working across process
// restarts, as long as the prompt message itself survives.
pub const APPLY_BUTTON_ID: &str = "apply_button";

pub fn apply_button() -> CreateButton {
    CreateButton::new(APPLY_BUTTON_ID)
        .label("Apply Now")
        .style(ButtonStyle::Primary)
}

pub fn apply_action_row() -> CreateActionRow {
    CreateActionRow::Buttons(vec![apply_button()])
}

// Runs the full click flow: open a ticket for the clicking member and answer
// with an ephemeral notice. Duplicate and creation failures get their own
// notices; anything else is logged without a user-facing message.
pub async fn handle_apply(
    ctx: &Context,
    interaction: &ComponentInteraction,
    config: &BotConfig,
    tickets: &TicketManager,
) {
    let Some(guild_id) = interaction.guild_id else {
        return;
    };
    let display_name = interaction
        .member
        .as_ref()
        .map(|member| member.display_name().to_string())
        .unwrap_or_else(|| interaction.user.display_name().to_string());

    let notice = match tickets
        .open(ctx, guild_id, &interaction.user, &display_name, config)
        .await
    {
        Ok(channel) => format!(
            "Your application channel has been created: {}",
            channel.mention()
        ),
        Err(err @ (Error::DuplicateTicket | Error::ChannelCreationFailed)) => err.to_string(),
        Err(err) => {
            error!(
                "Can't process the application of '{}': {}",
                interaction.user.name,
                err.to_string()
            );
            return;
        }
    };

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(notice)
            .ephemeral(true),
    );
    if let Err(err) = interaction.create_response(&ctx.http, response).await {
        error!(
            "Can't respond to the application button: {}",
            err.to_string()
        );
    }
}
