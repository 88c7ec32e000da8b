//! The concierge chat widget.
//!
//! Replies are scripted. A message is appended as soon as it is sent, the
//! widget shows a typing indicator for a fixed delay, then the reply lands
//! and the transcript asks to be scrolled to the bottom.

use std::time::Duration;

/// Produces the bot's reply to a user message.
pub trait Responder {
    fn respond(&self, message: &str) -> String;
}

/// Keyword-matched canned replies. The first matching group wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedResponder;

const SCRIPT: &[(&[&str], &str)] = &[
    (
        &["flower", "strain"],
        "I'd be happy to help you find the perfect flower! Are you looking for something to \
         help you relax, energize, or find balance? I can recommend strains based on your \
         preferred effects.",
    ),
    (
        &["vape", "cartridge"],
        "Great choice! Our vape cartridges are very popular. Are you interested in live resin, \
         distillate, or rosin cartridges? I can help you find the perfect one for your needs.",
    ),
    (
        &["edible"],
        "Edibles are perfect for longer-lasting effects! Are you new to edibles or experienced? \
         I can recommend the right dosage and products for you.",
    ),
    (
        &["help", "recommend"],
        "I'm here to help! I can assist with product recommendations, add items to your cart, \
         and even help you checkout. What are you looking for today?",
    ),
];

const FALLBACK: &str = "Thanks for your message! I can help you find products, make \
                        recommendations, and complete your purchase. What would you like to \
                        explore today?";

/// Prompt sent by the "Help me choose" quick action.
pub const HELP_PROMPT: &str = "I need help finding the right products for me";

impl Responder for ScriptedResponder {
    fn respond(&self, message: &str) -> String {
        let lower = message.to_lowercase();
        SCRIPT
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
            .map_or(FALLBACK, |(_, reply)| *reply)
            .to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChatStatus {
    #[default]
    Idle,
    /// The user message has been appended; no reply is pending yet.
    Sending,
    /// Waiting out the reply delay; the typing indicator is shown.
    Typing,
}

pub struct ChatSession<R> {
    responder: R,
    reply_delay: Duration,
    messages: Vec<ChatMessage>,
    status: ChatStatus,
    scroll_requested: bool,
}

impl<R: Responder> ChatSession<R> {
    pub fn new(responder: R, reply_delay: Duration) -> Self {
        Self {
            responder,
            reply_delay,
            messages: Vec::new(),
            status: ChatStatus::Idle,
            scroll_requested: false,
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn status(&self) -> ChatStatus {
        self.status
    }

    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.status == ChatStatus::Typing
    }

    /// Appends a user message. Blank input is ignored and returns `false`.
    pub fn submit(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.messages.push(ChatMessage {
            sender: Sender::User,
            text: text.to_string(),
        });
        self.status = ChatStatus::Sending;
        true
    }

    /// Appends the scripted reply to `text` and returns to idle.
    pub fn deliver(&mut self, text: &str) {
        let reply = self.responder.respond(text);
        self.messages.push(ChatMessage {
            sender: Sender::Bot,
            text: reply,
        });
        self.status = ChatStatus::Idle;
        self.scroll_requested = true;
    }

    /// Full round trip: append, type for the reply delay, then answer.
    /// Returns the reply, or `None` for blank input.
    pub async fn send(&mut self, text: &str) -> Option<&ChatMessage> {
        if !self.submit(text) {
            return None;
        }
        self.status = ChatStatus::Typing;
        tracing::debug!(delay = ?self.reply_delay, "concierge typing");
        tokio::time::sleep(self.reply_delay).await;
        self.deliver(text);
        self.messages.last()
    }

    /// Returns and clears the pending scroll-to-bottom request.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(1500);

    #[test]
    fn keyword_priority_order() {
        let bot = ScriptedResponder;
        assert!(bot.respond("Any FLOWER or vape deals?").contains("perfect flower"));
        assert!(bot.respond("vape edible").contains("vape cartridges"));
        assert!(bot.respond("I need help with edibles").starts_with("Edibles are perfect"));
        assert!(bot.respond("can you help").starts_with("I'm here to help"));
        assert_eq!(bot.respond("hello"), FALLBACK);
    }

    #[tokio::test(start_paused = true)]
    async fn edible_question_gets_exactly_one_reply_after_delay() {
        let mut chat = ChatSession::new(ScriptedResponder, DELAY);
        let started = tokio::time::Instant::now();

        let reply = chat
            .send("I need help with edibles")
            .await
            .expect("reply")
            .clone();

        assert!(started.elapsed() >= DELAY);
        assert_eq!(reply.sender, Sender::Bot);
        assert!(reply.text.contains("edibles"));
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(
            chat.messages().iter().filter(|m| m.sender == Sender::Bot).count(),
            1
        );
        assert_eq!(chat.status(), ChatStatus::Idle);
        assert!(chat.take_scroll_request());
        assert!(!chat.take_scroll_request());
    }

    #[tokio::test(start_paused = true)]
    async fn blank_input_appends_nothing() {
        let mut chat = ChatSession::new(ScriptedResponder, DELAY);
        assert!(chat.send("   ").await.is_none());
        assert!(chat.messages().is_empty());
        assert_eq!(chat.status(), ChatStatus::Idle);
        assert!(!chat.take_scroll_request());
    }

    #[test]
    fn submit_shows_user_message_before_reply() {
        let mut chat = ChatSession::new(ScriptedResponder, DELAY);
        assert!(chat.submit(HELP_PROMPT));
        assert_eq!(chat.status(), ChatStatus::Sending);
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].sender, Sender::User);

        chat.deliver(HELP_PROMPT);
        assert_eq!(chat.messages().len(), 2);
        assert!(chat.messages()[1].text.starts_with("I'm here to help"));
    }
}
