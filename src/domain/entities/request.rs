//! Referral link request entity.

use chrono::{DateTime, Utc};

/// A referral link handed out to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRequest {
    pub id: i64,
    pub telegram_id: i64,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl LinkRequest {
    pub fn new(id: i64, telegram_id: i64, url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            telegram_id,
            url,
            created_at,
        }
    }
}

/// Input data for recording a new request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLinkRequest {
    pub telegram_id: i64,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_creation() {
        let now = Utc::now();
        let request = LinkRequest::new(3, 777000, "https://bit.ly/abc".to_string(), now);

        assert_eq!(request.id, 3);
        assert_eq!(request.telegram_id, 777000);
        assert_eq!(request.url, "https://bit.ly/abc");
        assert_eq!(request.created_at, now);
    }
}
