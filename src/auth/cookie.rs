use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
}

/// The session marker written after a successful password check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub max_age_secs: u64,
    /// Absolute expiry, seconds since the Unix epoch. Fixed at issue time.
    pub expires_at: u64,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
}

impl SessionCookie {
    pub fn issue(
        name: &str,
        value: &str,
        domain: &str,
        max_age: Duration,
        secure: bool,
        now: SystemTime,
    ) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            domain: domain.to_string(),
            max_age_secs: max_age.as_secs(),
            expires_at: unix_secs(now) + max_age.as_secs(),
            http_only: true,
            secure,
            same_site: SameSite::Strict,
        }
    }

    pub fn is_expired(&self, now: SystemTime) -> bool {
        unix_secs(now) >= self.expires_at
    }

    /// Header form, e.g. `pitchdeck_auth=authenticated; Domain=localhost; ...`.
    pub fn to_set_cookie(&self) -> String {
        let mut header = format!(
            "{}={}; Domain={}; Path=/; Max-Age={}",
            self.name, self.value, self.domain, self.max_age_secs
        );
        if self.http_only {
            header.push_str("; HttpOnly");
        }
        header.push_str(match self.same_site {
            SameSite::Strict => "; SameSite=Strict",
        });
        if self.secure {
            header.push_str("; Secure");
        }
        header
    }
}

fn unix_secs(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}
