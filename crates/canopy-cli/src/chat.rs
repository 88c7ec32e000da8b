use canopy_core::AppConfig;
use canopy_storefront::{ChatSession, ScriptedResponder};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Interactive concierge session on stdin/stdout. An empty line is ignored;
/// `exit`, `quit`, or end of input ends the session.
pub(crate) async fn run_chat(config: &AppConfig) -> anyhow::Result<()> {
    let mut session = ChatSession::new(ScriptedResponder, config.chat_reply_delay());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Concierge: Hi! Ask me about flower, vapes, or edibles. Type `exit` to leave.");
    while let Some(line) = lines.next_line().await? {
        if is_exit(&line) {
            break;
        }
        if let Some(reply) = session.send(&line).await {
            println!("Concierge: {}", reply.text);
        }
    }
    Ok(())
}

pub(crate) fn is_exit(line: &str) -> bool {
    matches!(line.trim(), "exit" | "quit")
}
