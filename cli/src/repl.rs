//! Interactive REPL loop: read a line, run the graph, print each snapshot,
//! repeat until EOF or a quit command.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::StreamExt;

use skein::{AgentState, GraphEngine, Message, RunEvent};

/// Returns true when the input ends the session.
fn is_quit_command(line: &str) -> bool {
    matches!(
        line.trim().to_lowercase().as_str(),
        "quit" | "exit" | "q"
    )
}

/// Prints one snapshot: node banner plus its last message. Pending tool calls
/// are listed by name with pretty-printed arguments.
fn print_step(node_id: &str, state: &AgentState) {
    println!("{}", "*".repeat(50));
    println!("Node: {}\n", node_id);
    match state.last_message() {
        Some(Message::Agent {
            content,
            tool_calls,
        }) if !tool_calls.is_empty() => {
            if !content.is_empty() {
                println!("{}\n", content);
            }
            for call in tool_calls {
                println!("Tool call: {}", call.name);
                let args = serde_json::to_string_pretty(&call.arguments)
                    .unwrap_or_else(|_| call.arguments.to_string());
                println!("Arguments: {}\n", args);
            }
        }
        Some(Message::ToolResult { name, content }) => {
            println!("Tool {} result:\n{}", name, content);
        }
        Some(message) => println!("{}", message.content()),
        None => println!("(no messages)"),
    }
}

/// Runs the REPL loop: prompt, read line, run one graph turn, print, repeat.
///
/// Exits on EOF (Ctrl+D) or case-insensitive `quit` / `exit` / `q`. A failed
/// run is reported to stderr and the loop continues.
pub async fn run_repl_loop(engine: &GraphEngine) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("Prompt (or 'quit' to exit): ");
        std::io::stdout().flush()?;

        let line = match reader.next_line().await? {
            None => break,
            Some(s) if is_quit_command(&s) => break,
            Some(s) if s.trim().is_empty() => {
                println!("Please enter a prompt.");
                continue;
            }
            Some(s) => s,
        };

        let mut events = engine.run(AgentState::new(line));
        while let Some(event) = events.next().await {
            match event {
                RunEvent::Step { node_id, state } => print_step(&node_id, &state),
                RunEvent::Done { .. } => println!("{}", "*".repeat(50)),
                RunEvent::StepLimit { limit, .. } => {
                    eprintln!("run aborted: step limit of {} exceeded", limit);
                }
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}
