pub mod commands;
pub mod config;
pub mod error;
pub mod keep_alive;
pub mod messages;
pub mod prompt;
pub mod tickets;

use std::sync::Arc;

use poise::serenity_prelude::GatewayIntents;
use serenity::all::{ActivityData, CreateMessage, GuildId, Interaction, Member, User};
use serenity::async_trait;
use serenity::client::{Client, Context, EventHandler};
use serenity::model::gateway::Ready;
use tracing::{error, info};

use crate::commands::UserData;
use crate::config::BotConfig;
use crate::error::Error;
use crate::tickets::TicketManager;

pub struct Handler {
    config: Arc<BotConfig>,
    tickets: Arc<TicketManager>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
        ctx.set_activity(Some(ActivityData::watching("Applications")));
    }

    async fn guild_member_addition(&self, ctx: Context, member: Member) {
        // The welcome channel is optional. A missing channel skips the
        // greeting without disturbing the rest of the bot.
        let Ok(channel) = self.config.welcome_channel.to_channel(&ctx).await else {
            return;
        };

        let greeting = CreateMessage::new().embed(messages::welcome_embed(&member));
        if let Err(err) = channel.id().send_message(&ctx.http, greeting).await {
            error!(
                "Can't greet the new member '{}': {}",
                member.user.name,
                err.to_string()
            );
        }
    }

    async fn guild_member_removal(
        &self,
        ctx: Context,
        guild_id: GuildId,
        user: User,
        member: Option<Member>,
    ) {
        let display_name = member
            .as_ref()
            .map(|member| member.display_name().to_string())
            .unwrap_or_else(|| user.display_name().to_string());
        self.tickets
            .cleanup_on_departure(&ctx, guild_id, &user, &display_name)
            .await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Component(component) = interaction {
            if component.data.custom_id == prompt::APPLY_BUTTON_ID {
                prompt::handle_apply(&ctx, &component, &self.config, &self.tickets).await;
            }
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match BotConfig::from_env() {
        Ok(config) => Arc::new(config),
        Err(err) => {
            error!("Can't load the configuration: {}", err.to_string());
            std::process::exit(1);
        }
    };

    if let Err(err) = keep_alive::serve(config.liveness_addr).await {
        error!("Can't start the liveness endpoint: {}", err.to_string());
        std::process::exit(1);
    }

    let tickets = Arc::new(TicketManager::new());

    let user_data_config = Arc::clone(&config);
    let user_data_tickets = Arc::clone(&tickets);
    let framework = poise::Framework::<UserData, Error>::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::application::setup(),
                commands::application::close(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(config.command_prefix.clone()),
                ..Default::default()
            },
            pre_command: commands::pre_command,
            on_error: commands::on_error,
            ..Default::default()
        })
        .setup(|_ctx, _ready, _framework| {
            Box::pin(async move {
                Ok(UserData {
                    config: user_data_config,
                    tickets: user_data_tickets,
                })
            })
        })
        .build();

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::MESSAGE_CONTENT;
    let mut client = Client::builder(&config.token, intents)
        .event_handler(Handler {
            config: Arc::clone(&config),
            tickets: Arc::clone(&tickets),
        })
        .framework(framework)
        .await
        .expect("Cannot create a Discord client");

    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
    }
}
