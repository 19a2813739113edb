//! History subcommands: list, show, delete, and clear stored conversations

use super::Context;
use crate::cli::HistoryCommand;
use crate::companion::{Conversation, Role};
use crate::error::{Result, SoulCareError};
use crate::storage::KeyValueStore;
use colored::Colorize;
use prettytable::{format, Table};
use std::io::{self, BufRead, Write};

const TITLE_WIDTH: usize = 40;

/// Handle history commands
pub fn handle_history<S: KeyValueStore>(ctx: &Context<S>, command: HistoryCommand) -> Result<()> {
    let store = &ctx.conversations;

    match command {
        HistoryCommand::List => {
            let chats = store.get_all_chats();

            if chats.is_empty() {
                println!("{}", "No conversation history found.".yellow());
                return Ok(());
            }

            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

            table.add_row(prettytable::row![
                "ID".bold(),
                "Title".bold(),
                "Preview".bold(),
                "Messages".bold(),
                "Last Updated".bold()
            ]);

            for chat in chats {
                table.add_row(prettytable::row![
                    chat.id.to_string().cyan(),
                    truncate(&chat.title, TITLE_WIDTH),
                    truncate(&chat.preview, TITLE_WIDTH),
                    chat.messages.len(),
                    last_updated(&chat)
                ]);
            }

            println!("\nConversation History:");
            table.printstd();
            println!();
            println!(
                "Use {} to resume a conversation.",
                "soulcare chat --resume <ID>".cyan()
            );
            println!();
        }
        HistoryCommand::Show { id } => {
            let chat = store
                .get_chat(id)
                .ok_or(SoulCareError::ConversationNotFound(id))?;

            println!("\n{} {}", chat.title.bold(), format!("({})", last_updated(&chat)).dimmed());
            println!();
            for message in &chat.messages {
                let who = match message.role {
                    Role::User => "you".green(),
                    Role::Assistant => "soulcare".magenta(),
                };
                let at = message.timestamp.with_timezone(&chrono::Local).format("%H:%M");
                println!("{} {} {}", format!("[{}]", at).dimmed(), who.bold(), message.content);
            }
            println!();
        }
        HistoryCommand::Delete { id } => {
            if store.get_chat(id).is_none() {
                return Err(SoulCareError::ConversationNotFound(id).into());
            }
            store.delete_chat(id)?;
            println!("{}", format!("Deleted conversation {}", id).green());
        }
        HistoryCommand::Clear { yes } => {
            if !yes && !confirm("Delete every stored conversation?")? {
                println!("Nothing deleted.");
                return Ok(());
            }
            store.clear_all_chats()?;
            println!("{}", "Cleared conversation history".green());
        }
    }

    Ok(())
}

/// Shorten `text` to at most `width` characters, marking the cut with "..."
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn last_updated(chat: &Conversation) -> String {
    chat.last_updated
        .map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush().map_err(SoulCareError::from)?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(SoulCareError::from)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
