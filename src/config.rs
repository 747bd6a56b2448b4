use std::env;
use std::net::SocketAddr;

use lazy_static::lazy_static;
use serenity::all::{ChannelId, Colour, RoleId};

use crate::error::{Error, Result};

// Role identifiers of the command staff, in rank order.
pub const STAFF_ROLES: [RoleId; 5] = [
    RoleId::new(1409997551385706587), // Overlord/owner
    RoleId::new(1409998319572226228), // Warlord/co-owner
    RoleId::new(1409998422437658806), // high-council
    RoleId::new(1409998531200290876), // Commander
    RoleId::new(1409998743973007471), // Enforcer
];

pub const WELCOME_CHANNEL: ChannelId = ChannelId::new(1410001110844051456);

pub const EMBED_COLOR: Colour = Colour::new(0x3C3C3C);

pub const WELCOME_THUMBNAIL_URL: &str = "https://cdn.discordapp.com/attachments/1403687541634367559/1409997093753589800/a6a4ddd9-50dd-4699-8748-bc9842210888.jpg";

// Tickets live under this category when the server has one with this name.
pub const APPLICATIONS_CATEGORY: &str = "Applications";

pub const TICKET_PREFIX: &str = "apply-";

// The Discord limit for channel names.
pub const MAX_CHANNEL_NAME_LEN: usize = 100;

pub const APPLICATION_QUESTIONS: [&str; 10] = [
    "1. Roblox Username:",
    "2. Discord Username:",
    "3. Timezone:",
    "4. Age (optional if preferred private, but recommended):",
    "5. Why do you want to join the Automata Alliance?",
    "6. Do you have prior experience in other clans or factions? If so, which?",
    "7. Are you willing to attend trainings, deployments, and follow the chain of command?",
    "8. How active are you on Roblox/Discord weekly (estimate hours)?",
    "9. Who, if anyone, referred you to the Alliance?",
    "10. Do you agree to follow the Automata Alliance rules and Code of Conduct?",
];

// Staff fill the {username} placeholder by hand when pasting a template.
pub const ACCEPTANCE_TEMPLATE: &str = "
**Application Accepted**

Welcome to the Automata Alliance, {username}!

Your application has been reviewed and accepted by the command staff. You will now be granted the recruit role and given access to our training channels. Please check the server information channel for next steps.

*Discipline begins with truth.*
";

pub const DENIAL_TEMPLATE: &str = "
**Application Denied**

Thank you for your interest in the Automata Alliance, {username}.

After review by our command staff, we've decided not to move forward with your application at this time. This decision may be based on experience level, activity requirements, or other factors that don't align with our current needs.

You may reapply in 30 days if circumstances change.

*Discipline begins with truth.*
";

lazy_static! {
    // The questions joined into a single embed field, rendered once.
    pub static ref QUESTION_BLOCK: String = APPLICATION_QUESTIONS.join("\n");
}

// The application context built once at startup and handed to every handler.
#[derive(Debug)]
pub struct BotConfig {
    pub token: String,
    pub command_prefix: String,
    pub staff_roles: Vec<RoleId>,
    pub welcome_channel: ChannelId,
    pub liveness_addr: SocketAddr,
}

impl BotConfig {
    pub fn from_env() -> Result<Self> {
        let token = env::var("BOT_TOKEN").map_err(|_| {
            Error::Configuration("Expected a BOT_TOKEN in the environment".to_string())
        })?;

        Ok(BotConfig {
            token,
            command_prefix: "!".to_string(),
            staff_roles: STAFF_ROLES.to_vec(),
            welcome_channel: WELCOME_CHANNEL,
            liveness_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{
        ACCEPTANCE_TEMPLATE, APPLICATION_QUESTIONS, DENIAL_TEMPLATE, QUESTION_BLOCK, STAFF_ROLES,
    };

    #[test]
    fn test_the_question_list_is_complete() {
        assert_eq!(APPLICATION_QUESTIONS.len(), 10);
        assert_eq!(APPLICATION_QUESTIONS[0], "1. Roblox Username:");
        assert_eq!(
            APPLICATION_QUESTIONS[9],
            "10. Do you agree to follow the Automata Alliance rules and Code of Conduct?"
        );
    }

    #[test]
    fn test_the_question_block_keeps_the_original_ordering() {
        assert_eq!(QUESTION_BLOCK.lines().count(), 10);
        assert!(QUESTION_BLOCK.starts_with("1. Roblox Username:"));
        assert!(QUESTION_BLOCK.ends_with(
            "10. Do you agree to follow the Automata Alliance rules and Code of Conduct?"
        ));
    }

    #[test]
    fn test_the_response_templates_are_kept_verbatim() {
        assert!(ACCEPTANCE_TEMPLATE.contains("**Application Accepted**"));
        assert!(ACCEPTANCE_TEMPLATE.contains("{username}"));
        assert!(ACCEPTANCE_TEMPLATE.trim_end().ends_with("*Discipline begins with truth.*"));

        assert!(DENIAL_TEMPLATE.contains("**Application Denied**"));
        assert!(DENIAL_TEMPLATE.contains("{username}"));
        assert!(DENIAL_TEMPLATE.contains("You may reapply in 30 days if circumstances change."));
        assert!(DENIAL_TEMPLATE.trim_end().ends_with("*Discipline begins with truth.*"));
    }

    #[test]
    fn test_the_staff_role_set_is_fixed() {
        assert_eq!(STAFF_ROLES.len(), 5);
    }
}
