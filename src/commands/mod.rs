pub mod application;

use std::sync::Arc;

use poise::{BoxFuture, Context as PoiseContext, FrameworkError};
use tracing::{error, info};

use crate::config::BotConfig;
use crate::error::Error;
use crate::tickets::TicketManager;

// User data, which is stored and accessible in all command invocations
pub struct UserData {
    pub config: Arc<BotConfig>,
    pub tickets: Arc<TicketManager>,
}

// Generic context available across Poise commands
pub type Context<'a> = PoiseContext<'a, UserData, Error>;

// Passes when the invoker holds at least one of the configured staff roles.
pub async fn staff_only(ctx: Context<'_>) -> Result<bool, Error> {
    let Some(member) = ctx.author_member().await else {
        return Err(Error::MissingPermission);
    };

    let staff_roles = &ctx.data().config.staff_roles;
    match member
        .roles
        .iter()
        .any(|role_id| staff_roles.contains(role_id))
    {
        true => Ok(true),
        false => Err(Error::MissingPermission),
    }
}

pub fn pre_command(ctx: Context<'_>) -> BoxFuture<'_, ()> {
    Box::pin(async move {
        info!(
            "Got command '{}' by user '{}'",
            ctx.command().name,
            ctx.author().name
        );
    })
}

// Central error translation for the command surface: permission failures get
// an in-channel reply, unknown commands are dropped, everything else is
// logged without a user-facing message.
pub fn on_error(error: FrameworkError<'_, UserData, Error>) -> BoxFuture<'_, ()> {
    Box::pin(async move {
        match error {
            FrameworkError::CommandCheckFailed { error, ctx, .. } => {
                let notice = error.unwrap_or(Error::MissingPermission).to_string();
                if let Err(err) = ctx.say(notice).await {
                    error!(
                        "Can't report the failed permission check: {}",
                        err.to_string()
                    );
                }
            }
            FrameworkError::UnknownCommand { .. } => {}
            FrameworkError::Command { error, ctx, .. } => {
                error!(
                    "Command '{}' failed: {}",
                    ctx.command().name,
                    error.to_string()
                );
            }
            other => {
                if let Err(err) = poise::builtins::on_error(other).await {
                    error!("Can't handle the framework error: {}", err.to_string());
                }
            }
        }
    })
}
