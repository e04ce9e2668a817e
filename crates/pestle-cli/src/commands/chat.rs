use std::io::{self, BufRead, Write};

use anyhow::Result;
use colored::*;

use pestle_config::PestleConfig;

use super::ask;

/// Interactive question loop over stdin.
///
/// Reads one question per line, answers it, and repeats until `exit`,
/// `quit`, or end of input.
pub async fn execute(config: PestleConfig) -> Result<()> {
    let show_query = config.qa.show_query;
    let chain = ask::build_chain(&config).await?;

    println!("pestle chat: ask about drugs, their conditions, side effects, classes, and brands.");
    println!("Type 'exit' or 'quit' (or press Ctrl+D) to leave.\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{} ", "pestle>".bold());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;
        let question = line.trim();

        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }

        match chain.ask(question).await {
            Ok(answer) => {
                ask::print_answer(&answer, show_query)?;
                println!();
            }
            Err(e) => eprintln!("{} {}\n", "error:".red().bold(), e),
        }
    }

    Ok(())
}
