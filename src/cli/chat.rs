use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::ai::chat::AssistantSession;
use crate::core::AppConfig;

pub async fn run(config: AppConfig) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let session = AssistantSession::from_config(&config)?;
    tracing::debug!("Started assistant session {}", session.id());

    if let Some(greeting) = session.transcript().first() {
        println!("{}", greeting.text);
    }

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                let submission = session.submit(&line);
                if !submission.is_accepted() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                submission.finished().await?;
                if let Some(turn) = session.transcript().last() {
                    println!("{}", turn.text);
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
