use serenity::all::{CreateEmbed, CreateEmbedFooter, Member, Mentionable, RoleId, UserId};

use crate::config;

// The first message of a fresh ticket: pings the applicant and the whole
// command staff, resolvable or not.
pub fn ticket_mention_line(applicant_id: UserId, staff_roles: &[RoleId]) -> String {
    let staff_mentions = staff_roles
        .iter()
        .map(|role_id| format!("<@&{}>", role_id))
        .collect::<Vec<String>>()
        .join(", ");
    format!("<@{}> {}", applicant_id, staff_mentions)
}

// The prompt posted by the setup command, with the apply button underneath.
pub fn enlistment_prompt_embed() -> CreateEmbed {
    CreateEmbed::new()
        .title("Automata Alliance – Enlistment Application")
        .description(
            "__**Instructions**__\nOpen a ticket to begin your enlistment process. Copy and answer the following questions inside your ticket. Incomplete applications will be denied.",
        )
        .colour(config::EMBED_COLOR)
        .field("Application Questions", config::QUESTION_BLOCK.as_str(), false)
        .field(
            "Reminder",
            "Failure to answer truthfully or meet basic standards may result in denial of entry.",
            false,
        )
        .footer(CreateEmbedFooter::new(
            "Answer honestly. Discipline begins with truth.",
        ))
}

// The in-ticket copy of the questions.
pub fn ticket_instructions_embed() -> CreateEmbed {
    CreateEmbed::new()
        .title("Automata Alliance – Enlistment Application")
        .description(
            "Please copy and answer the following questions in this channel. Incomplete applications will be denied.",
        )
        .colour(config::EMBED_COLOR)
        .field("Application Questions", config::QUESTION_BLOCK.as_str(), false)
        .footer(CreateEmbedFooter::new(
            "Answer honestly. Discipline begins with truth.",
        ))
}

// Response templates for the reviewing staff. Posted into the ticket, so the
// applicant sees them too; there is no staff-only sub-channel.
pub fn staff_tools_embed() -> CreateEmbed {
    CreateEmbed::new()
        .title("Staff Tools")
        .description("Use the following templates to respond to applications:")
        .colour(config::EMBED_COLOR)
        .field(
            "Acceptance Template",
            format!("```{}```", config::ACCEPTANCE_TEMPLATE),
            false,
        )
        .field(
            "Denial Template",
            format!("```{}```", config::DENIAL_TEMPLATE),
            false,
        )
}

pub fn welcome_embed(member: &Member) -> CreateEmbed {
    CreateEmbed::new()
        .title("Welcome to Automata Alliance!")
        .description(format!(
            "Welcome {} to the Automata Alliance Discord server!\n\nPlease read the rules and check out the application process if you're interested in joining our clan.",
            member.mention()
        ))
        .colour(config::EMBED_COLOR)
        .thumbnail(config::WELCOME_THUMBNAIL_URL)
        .footer(CreateEmbedFooter::new("Discipline begins with truth."))
}

#[cfg(test)]
mod tests {
    use serenity::all::{RoleId, UserId};

    use crate::messages::ticket_mention_line;

    #[test]
    fn test_ticket_mention_line_pings_the_applicant_and_staff() {
        let staff_roles = [RoleId::new(1), RoleId::new(2)];
        let line = ticket_mention_line(UserId::new(42), &staff_roles);

        assert_eq!(line, "<@42> <@&1>, <@&2>");
    }

    #[test]
    fn test_ticket_mention_line_with_a_single_staff_role() {
        let line = ticket_mention_line(UserId::new(7), &[RoleId::new(9)]);

        assert_eq!(line, "<@7> <@&9>");
    }
}
