//! Stress assessment handler.
//!
//! Asks each question, shows the score and the companion's analysis, and
//! optionally starts a chat on one of the suggested topics.

use super::Context;
use crate::assessment::{Assessment, AssessmentResult, MAX_ANSWER};
use crate::companion::ChatSession;
use crate::error::{Result, SoulCareError};
use crate::storage::KeyValueStore;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Convert a 1-based menu choice into an answer index
///
/// # Examples
///
/// ```
/// use soulcare::commands::assess::parse_answer;
///
/// assert_eq!(parse_answer("1"), Some(0));
/// assert_eq!(parse_answer("4"), Some(3));
/// assert_eq!(parse_answer("5"), None);
/// ```
pub fn parse_answer(input: &str) -> Option<u8> {
    match input.trim().parse::<u8>() {
        Ok(choice) if (1..=MAX_ANSWER + 1).contains(&choice) => Some(choice - 1),
        _ => None,
    }
}

/// Run the assessment
///
/// # Arguments
///
/// * `ctx` - Stores and gateway
/// * `offer_chat` - After the results, offer to chat about a suggested topic
pub async fn run_assess<S: KeyValueStore>(ctx: &Context<S>, offer_chat: bool) -> Result<()> {
    let mut rl = DefaultEditor::new().map_err(SoulCareError::from)?;
    let mut assessment = Assessment::new();

    println!("\n{}", "Stress Assessment".bold().magenta());
    println!(
        "{}\n",
        "This quick check-in helps us understand what support would help you most.".dimmed()
    );

    while let Some(question) = assessment.current_question() {
        println!(
            "{} {}",
            format!("Question {} of 4", question.id).dimmed(),
            question.question.bold()
        );
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }

        let answer = loop {
            match rl.readline("> ") {
                Ok(line) => match parse_answer(&line) {
                    Some(answer) => break answer,
                    None => println!("{}", "Please enter a number from 1 to 4.".yellow()),
                },
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!("Assessment cancelled.");
                    return Ok(());
                }
                Err(e) => return Err(SoulCareError::from(e).into()),
            }
        };
        assessment.answer(answer)?;
        println!();
    }

    println!("{}", "Analyzing your responses...".dimmed());
    let analysis = ctx.gateway.generate_test_response(&assessment.request()).await;
    let result = assessment.result()?;

    print_result(&result, &analysis);

    if offer_chat {
        if let Some(topic) = choose_topic(&mut rl, &result)? {
            let session =
                ChatSession::start_with_topic(&ctx.conversations, &ctx.gateway, topic).await?;
            super::chat::run_session(ctx, session).await?;
        }
    }

    Ok(())
}

fn print_result(result: &AssessmentResult, analysis: &str) {
    let level = result.level.to_string();
    let level = match result.level {
        crate::assessment::StressLevel::Low => level.green(),
        crate::assessment::StressLevel::Moderate => level.yellow(),
        crate::assessment::StressLevel::High => level.red(),
    };

    println!();
    println!("Your stress level is: {} ({:.0}/100)", level.bold(), result.score);
    println!();
    println!("{}", analysis);
    println!();
    println!("{}", "Suggested topics".bold());
    for (i, topic) in result.level.suggestions().iter().enumerate() {
        println!("  {}. {}", i + 1, topic);
    }
    println!();
}

fn choose_topic(rl: &mut DefaultEditor, result: &AssessmentResult) -> Result<Option<&'static str>> {
    let suggestions = result.level.suggestions();
    match rl.readline("Start a chat on a topic? Enter its number, or press Enter to finish: ") {
        Ok(line) => {
            let choice = line
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| suggestions.get(i).copied());
            Ok(choice)
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(SoulCareError::from(e).into()),
    }
}
