//! Conversation session state.
//!
//! Append-only turn sequence owned by one conversation context. Only the
//! most recent turns feed the prompt; older turns stay stored but are
//! excluded from the window.

use pedisafe_prompt::ConversationTurn;

/// Number of trailing turns included in the prompt.
const HISTORY_WINDOW: usize = 6;

/// One caregiver conversation. Not shared between conversations.
#[derive(Debug, Default, Clone)]
pub struct Session {
    turns: Vec<ConversationTurn>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// Full ordered history.
    pub fn history(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// The trailing window used as prompt context.
    pub fn window(&self) -> &[ConversationTurn] {
        let start = self.turns.len().saturating_sub(HISTORY_WINDOW);
        &self.turns[start..]
    }

    pub fn reset(&mut self) {
        self.turns.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_limits_to_six_turns() {
        let mut session = Session::new();
        for i in 0..10 {
            session.push(ConversationTurn::user(format!("message {i}")));
        }

        assert_eq!(session.history().len(), 10);
        let window = session.window();
        assert_eq!(window.len(), 6);
        assert_eq!(window[0].content, "message 4");
        assert_eq!(window[5].content, "message 9");
    }

    #[test]
    fn test_window_smaller_than_limit() {
        let mut session = Session::new();
        session.push(ConversationTurn::user("hi"));
        assert_eq!(session.window().len(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = Session::new();
        session.push(ConversationTurn::user("hi"));
        session.push(ConversationTurn::assistant("hello"));
        session.reset();
        assert!(session.is_empty());
        assert!(session.window().is_empty());
    }
}
