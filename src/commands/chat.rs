//! Interactive chat mode handler.
//!
//! Opens (or resumes) a conversation and runs a readline loop that sends
//! each line to the companion and prints the reply.

use super::Context;
use crate::companion::{ChatSession, Message, Role};
use crate::error::{Result, SoulCareError};
use crate::storage::KeyValueStore;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Inputs handled locally instead of being sent to the companion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Show remaining requests
    Quota,
    /// Show available commands
    Help,
    /// Leave the chat
    Exit,
    /// Not a special command
    None,
}

/// Classify a line of chat input
pub fn parse_special_command(input: &str) -> SpecialCommand {
    match input.trim().to_lowercase().as_str() {
        "/quota" => SpecialCommand::Quota,
        "/help" | "/?" => SpecialCommand::Help,
        "/exit" | "/quit" | "exit" | "quit" => SpecialCommand::Exit,
        _ => SpecialCommand::None,
    }
}

/// Start interactive chat mode
///
/// # Arguments
///
/// * `ctx` - Stores and gateway
/// * `resume` - Continue the stored conversation with this id
/// * `topic` - Have the companion open a new conversation on this topic
///
/// # Errors
///
/// Returns error if the conversation to resume does not exist or the
/// terminal cannot be read
pub async fn run_chat<S: KeyValueStore>(
    ctx: &Context<S>,
    resume: Option<u64>,
    topic: Option<String>,
) -> Result<()> {
    let session = match (resume, topic) {
        (Some(id), _) => ChatSession::resume(&ctx.conversations, id)?,
        (None, Some(topic)) => {
            println!("{}", format!("Opening a conversation about {}...", topic).dimmed());
            ChatSession::start_with_topic(&ctx.conversations, &ctx.gateway, &topic).await?
        }
        (None, None) => ChatSession::start(&ctx.conversations),
    };

    run_session(ctx, session).await
}

/// Run the readline loop for an already opened session
pub async fn run_session<S: KeyValueStore>(
    ctx: &Context<S>,
    mut session: ChatSession,
) -> Result<()> {
    let mut rl = DefaultEditor::new().map_err(SoulCareError::from)?;

    print_banner(&session, ctx.gateway.remaining_requests());
    for message in session.messages() {
        print_message(message);
    }

    loop {
        match rl.readline(&format!("{} ", "you>".bold().green())) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match parse_special_command(trimmed) {
                    SpecialCommand::Quota => {
                        super::show_quota(ctx);
                        continue;
                    }
                    SpecialCommand::Help => {
                        print_help();
                        continue;
                    }
                    SpecialCommand::Exit => break,
                    SpecialCommand::None => {}
                }

                rl.add_history_entry(trimmed).map_err(SoulCareError::from)?;

                match session.send(&ctx.conversations, &ctx.gateway, trimmed).await {
                    Ok(reply) => print_message(&Message::assistant(reply)),
                    Err(e) => match e.downcast_ref::<SoulCareError>() {
                        Some(SoulCareError::EmptyMessage) => continue,
                        _ => {
                            // The reply is still in the session; only the save failed
                            tracing::warn!("Failed to save conversation: {:#}", e);
                            if let Some(last) = session.messages().last() {
                                print_message(last);
                            }
                            eprintln!(
                                "{}",
                                "Warning: this conversation could not be saved.".yellow()
                            );
                        }
                    },
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(SoulCareError::from(e).into()),
        }
    }

    println!(
        "\n{} {}\n",
        "Take care.".cyan(),
        format!("Resume with: soulcare chat --resume {}", session.id()).dimmed()
    );
    Ok(())
}

fn print_banner(session: &ChatSession, remaining: u32) {
    println!();
    println!("{}", session.title().bold().magenta());
    println!(
        "{}",
        format!(
            "{} AI requests left today. Type /help for commands.",
            remaining
        )
        .dimmed()
    );
    println!();
}

fn print_message(message: &Message) {
    match message.role {
        Role::Assistant => println!("{} {}\n", "soulcare>".bold().magenta(), message.content),
        Role::User => println!("{} {}\n", "you>".bold().green(), message.content),
    }
}

fn print_help() {
    println!();
    println!("{}", "Chat commands".bold());
    println!("  /quota   Show how many AI requests remain today");
    println!("  /help    Show this help");
    println!("  /exit    Leave the chat (also: exit, quit, Ctrl-D)");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_special_commands() {
        assert_eq!(parse_special_command("/quota"), SpecialCommand::Quota);
        assert_eq!(parse_special_command(" /HELP "), SpecialCommand::Help);
        assert_eq!(parse_special_command("/?"), SpecialCommand::Help);
        assert_eq!(parse_special_command("exit"), SpecialCommand::Exit);
        assert_eq!(parse_special_command("/quit"), SpecialCommand::Exit);
    }

    #[test]
    fn test_regular_input_is_not_special() {
        assert_eq!(
            parse_special_command("I want to quit my job"),
            SpecialCommand::None
        );
        assert_eq!(parse_special_command("/unknown"), SpecialCommand::None);
    }
}
