//! Bot user entity.

/// A chat user who has received at least one referral link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotUser {
    pub telegram_id: i64,
    pub is_admin: bool,
    pub has_blocked_bot: bool,
}

impl BotUser {
    /// Creates a regular, reachable user.
    pub fn new(telegram_id: i64) -> Self {
        Self {
            telegram_id,
            is_admin: false,
            has_blocked_bot: false,
        }
    }

    /// Returns true if broadcasts may be delivered to this user.
    pub fn is_reachable(&self) -> bool {
        !self.has_blocked_bot
    }
}
