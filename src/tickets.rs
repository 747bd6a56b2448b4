use std::collections::HashMap;

use dashmap::DashMap;
use serenity::all::{
    ChannelId, ChannelType, Context, CreateChannel, CreateMessage, GuildChannel, GuildId,
    PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId, User, UserId,
};
use tracing::{error, info};

use crate::config::{self, BotConfig};
use crate::error::{Error, Result};
use crate::messages;

// Builds the channel name for an applicant, truncated to the Discord limit.
pub fn ticket_channel_name(unique_name: &str) -> String {
    format!("{}{}", config::TICKET_PREFIX, unique_name)
        .chars()
        .take(config::MAX_CHANNEL_NAME_LEN)
        .collect()
}

pub fn is_ticket_channel(channel_name: &str) -> bool {
    channel_name.starts_with(config::TICKET_PREFIX)
}

// Matches a ticket by either of the two applicant name fields. The unique
// name and the display name can diverge; both prefixes are checked.
pub fn belongs_to_applicant(channel_name: &str, unique_name: &str, display_name: &str) -> bool {
    channel_name.starts_with(&format!("{}{}", config::TICKET_PREFIX, unique_name))
        || channel_name.starts_with(&format!("{}{}", config::TICKET_PREFIX, display_name))
}

pub fn has_open_ticket<'a>(
    mut channel_names: impl Iterator<Item = &'a str>,
    unique_name: &str,
    display_name: &str,
) -> bool {
    channel_names.any(|name| belongs_to_applicant(name, unique_name, display_name))
}

// Permission grants for a fresh ticket: the channel is hidden from everyone
// and opened up for the applicant and the resolvable staff roles.
pub fn ticket_overwrites(
    guild_id: GuildId,
    applicant_id: UserId,
    staff_roles: &[RoleId],
) -> Vec<PermissionOverwrite> {
    let member_access =
        Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES | Permissions::READ_MESSAGE_HISTORY;

    let mut overwrites = vec![
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            kind: PermissionOverwriteType::Role(RoleId::new(guild_id.get())),
        },
        PermissionOverwrite {
            allow: member_access,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(applicant_id),
        },
    ];

    for role_id in staff_roles {
        overwrites.push(PermissionOverwrite {
            allow: member_access,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Role(*role_id),
        });
    }

    overwrites
}

fn applications_category(channels: &HashMap<ChannelId, GuildChannel>) -> Option<ChannelId> {
    channels
        .values()
        .find(|channel| {
            channel.kind == ChannelType::Category && channel.name == config::APPLICATIONS_CATEGORY
        })
        .map(|channel| channel.id)
}

pub struct TicketManager {
    // Applicants with a creation currently in flight. Holding an entry here
    // fails a second activation before any channel exists.
    creating: DashMap<UserId, ()>,
}

struct CreationGuard<'a> {
    locks: &'a DashMap<UserId, ()>,
    applicant_id: UserId,
}

impl Drop for CreationGuard<'_> {
    fn drop(&mut self) {
        self.locks.remove(&self.applicant_id);
    }
}

impl TicketManager {
    pub fn new() -> Self {
        TicketManager {
            creating: DashMap::new(),
        }
    }

    fn begin_creation(&self, applicant_id: UserId) -> Option<CreationGuard<'_>> {
        match self.creating.insert(applicant_id, ()) {
            None => Some(CreationGuard {
                locks: &self.creating,
                applicant_id,
            }),
            Some(()) => None,
        }
    }

    // Opens a private application ticket for the applicant. Fails without
    // creating anything when the applicant already has an open ticket.
    pub async fn open(
        &self,
        ctx: &Context,
        guild_id: GuildId,
        applicant: &User,
        display_name: &str,
        config: &BotConfig,
    ) -> Result<GuildChannel> {
        let _guard = self
            .begin_creation(applicant.id)
            .ok_or(Error::DuplicateTicket)?;

        let channels = guild_id.channels(&ctx.http).await?;
        let text_channel_names = channels
            .values()
            .filter(|channel| channel.kind == ChannelType::Text)
            .map(|channel| channel.name.as_str());
        if has_open_ticket(text_channel_names, &applicant.name, display_name) {
            return Err(Error::DuplicateTicket);
        }

        let guild_roles = guild_id.roles(&ctx.http).await?;
        let resolved_staff_roles = config
            .staff_roles
            .iter()
            .copied()
            .filter(|role_id| guild_roles.contains_key(role_id))
            .collect::<Vec<RoleId>>();

        let mut builder = CreateChannel::new(ticket_channel_name(&applicant.name))
            .kind(ChannelType::Text)
            .topic(format!("Application ticket for {}", applicant.tag()))
            .permissions(ticket_overwrites(guild_id, applicant.id, &resolved_staff_roles));
        if let Some(category_id) = applications_category(&channels) {
            builder = builder.category(category_id);
        }

        let channel = match guild_id.create_channel(&ctx.http, builder).await {
            Ok(channel) => channel,
            Err(err) => {
                error!(
                    "Can't create an application channel for '{}': {}",
                    applicant.name,
                    err.to_string()
                );
                return Err(Error::ChannelCreationFailed);
            }
        };

        channel
            .id
            .say(
                &ctx.http,
                messages::ticket_mention_line(applicant.id, &config.staff_roles),
            )
            .await?;
        channel
            .id
            .send_message(
                &ctx.http,
                CreateMessage::new().embed(messages::ticket_instructions_embed()),
            )
            .await?;
        channel
            .id
            .send_message(
                &ctx.http,
                CreateMessage::new().embed(messages::staff_tools_embed()),
            )
            .await?;

        info!(
            "Opened the application ticket '{}' for '{}'",
            channel.name, applicant.name
        );
        Ok(channel)
    }

    // Deletes the given channel when it is an application ticket. Returns
    // whether anything was deleted.
    pub async fn close(
        &self,
        ctx: &Context,
        channel_id: ChannelId,
        channel_name: &str,
    ) -> Result<bool> {
        if !is_ticket_channel(channel_name) {
            return Ok(false);
        }

        channel_id.delete(&ctx.http).await?;
        info!("Closed the application ticket '{}'", channel_name);
        Ok(true)
    }

    // Deletes every ticket matching the departed applicant. Failures are
    // logged and the scan continues.
    pub async fn cleanup_on_departure(
        &self,
        ctx: &Context,
        guild_id: GuildId,
        applicant: &User,
        display_name: &str,
    ) {
        let channels = match guild_id.channels(&ctx.http).await {
            Ok(channels) => channels,
            Err(err) => {
                error!(
                    "Can't fetch the channel list for the departure cleanup: {}",
                    err.to_string()
                );
                return;
            }
        };

        for channel in channels.values() {
            let matches = channel.kind == ChannelType::Text
                && belongs_to_applicant(&channel.name, &applicant.name, display_name);
            if !matches {
                continue;
            }

            match channel.id.delete(&ctx.http).await {
                Ok(_) => info!(
                    "Deleted the application ticket '{}' after '{}' left",
                    channel.name, applicant.name
                ),
                Err(err) => error!(
                    "Can't delete the application ticket '{}': {}",
                    channel.name,
                    err.to_string()
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serenity::all::{GuildId, PermissionOverwriteType, Permissions, RoleId, UserId};

    use crate::tickets::{
        belongs_to_applicant, has_open_ticket, is_ticket_channel, ticket_channel_name,
        ticket_overwrites, TicketManager,
    };

    #[test]
    fn test_ticket_channel_name_uses_the_unique_name() {
        assert_eq!(ticket_channel_name("rex"), "apply-rex");
    }

    #[test]
    fn test_ticket_channel_name_is_truncated_to_the_discord_limit() {
        let long_name = "x".repeat(120);
        let channel_name = ticket_channel_name(&long_name);

        assert_eq!(channel_name.chars().count(), 100);
        assert!(channel_name.starts_with("apply-"));
    }

    #[test]
    fn test_is_ticket_channel_checks_the_prefix() {
        assert!(is_ticket_channel("apply-rex"));
        assert!(!is_ticket_channel("general"));
        assert!(!is_ticket_channel("re-apply-rex"));
    }

    #[test]
    fn test_belongs_to_applicant_matches_both_name_fields() {
        assert!(belongs_to_applicant("apply-rex", "rex", "Rex the Brave"));
        assert!(belongs_to_applicant(
            "apply-Rex the Brave",
            "rex",
            "Rex the Brave"
        ));
        assert!(!belongs_to_applicant("apply-alice", "rex", "Rex the Brave"));
        assert!(!belongs_to_applicant("general", "rex", "Rex the Brave"));
    }

    #[test]
    fn test_has_open_ticket_scans_the_channel_list() {
        let channel_names = ["general", "apply-rex", "memes"];

        assert!(has_open_ticket(channel_names.iter().copied(), "rex", "rex"));
        assert!(!has_open_ticket(
            channel_names.iter().copied(),
            "alice",
            "alice"
        ));
    }

    #[test]
    fn test_ticket_overwrites_hide_the_channel_from_everyone() {
        let staff_roles = [RoleId::new(1), RoleId::new(2)];
        let overwrites = ticket_overwrites(GuildId::new(10), UserId::new(42), &staff_roles);

        assert_eq!(overwrites.len(), 4);
        assert_eq!(overwrites[0].deny, Permissions::VIEW_CHANNEL);
        assert_eq!(
            overwrites[0].kind,
            PermissionOverwriteType::Role(RoleId::new(10))
        );
    }

    #[test]
    fn test_ticket_overwrites_grant_access_to_the_applicant_and_staff() {
        let staff_roles = [RoleId::new(1)];
        let overwrites = ticket_overwrites(GuildId::new(10), UserId::new(42), &staff_roles);
        let member_access = Permissions::VIEW_CHANNEL
            | Permissions::SEND_MESSAGES
            | Permissions::READ_MESSAGE_HISTORY;

        assert_eq!(
            overwrites[1].kind,
            PermissionOverwriteType::Member(UserId::new(42))
        );
        assert_eq!(overwrites[1].allow, member_access);
        assert_eq!(
            overwrites[2].kind,
            PermissionOverwriteType::Role(RoleId::new(1))
        );
        assert_eq!(overwrites[2].allow, member_access);
    }

    #[test]
    fn test_the_creation_lock_admits_a_single_holder() {
        let manager = TicketManager::new();
        let applicant_id = UserId::new(1);

        let guard = manager.begin_creation(applicant_id);
        assert!(guard.is_some());
        assert!(manager.begin_creation(applicant_id).is_none());

        drop(guard);
        assert!(manager.begin_creation(applicant_id).is_some());
    }

    #[test]
    fn test_the_creation_lock_is_scoped_per_applicant() {
        let manager = TicketManager::new();

        let first = manager.begin_creation(UserId::new(1));
        let second = manager.begin_creation(UserId::new(2));

        assert!(first.is_some());
        assert!(second.is_some());
    }
}
