use std::time::{Duration, SystemTime};

use tracing::{debug, info};

use crate::auth::cookie::SessionCookie;
use crate::auth::jar::CookieJar;
use crate::constants::*;

/// Decides whether a submitted password is acceptable.
pub trait PasswordVerifier {
    fn matches(&self, candidate: &str) -> bool;
}

/// A single static shared secret. Not a security mechanism.
#[derive(Debug, Clone)]
pub struct SharedSecret {
    secret: String,
}

impl SharedSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }
}

impl Default for SharedSecret {
    fn default() -> Self {
        Self::new(ACCESS_PASSWORD)
    }
}

impl PasswordVerifier for SharedSecret {
    fn matches(&self, candidate: &str) -> bool {
        candidate == self.secret
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOutcome {
    pub success: bool,
}

/// Attributes of the marker written on success.
#[derive(Debug, Clone)]
pub struct MarkerPolicy {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub max_age: Duration,
    pub secure: bool,
}

impl MarkerPolicy {
    pub fn new(domain: impl Into<String>, secure: bool) -> Self {
        Self {
            name: SESSION_COOKIE.to_string(),
            value: SESSION_VALUE.to_string(),
            domain: domain.into(),
            max_age: Duration::from_secs(SESSION_MAX_AGE_SECS),
            secure,
        }
    }
}

pub struct AccessGate<V, J> {
    verifier: V,
    jar: J,
    policy: MarkerPolicy,
}

impl<V: PasswordVerifier, J: CookieJar> AccessGate<V, J> {
    pub fn new(verifier: V, jar: J, policy: MarkerPolicy) -> Self {
        Self { verifier, jar, policy }
    }

    pub fn verify(&mut self, password: &str) -> VerifyOutcome {
        self.verify_at(password, SystemTime::now())
    }

    pub fn verify_at(&mut self, password: &str, now: SystemTime) -> VerifyOutcome {
        if !self.verifier.matches(password) {
            debug!("password rejected");
            return VerifyOutcome { success: false };
        }

        let cookie = SessionCookie::issue(
            &self.policy.name,
            &self.policy.value,
            &self.policy.domain,
            self.policy.max_age,
            self.policy.secure,
            now,
        );
        info!(marker = %cookie.to_set_cookie(), "session marker issued");
        self.jar.set(cookie);
        VerifyOutcome { success: true }
    }

    pub fn check(&self) -> bool {
        self.check_at(SystemTime::now())
    }

    /// True while an unexpired marker with the expected value is present.
    pub fn check_at(&self, now: SystemTime) -> bool {
        self.jar
            .get(&self.policy.name, now)
            .is_some_and(|cookie| cookie.value == self.policy.value)
    }

    #[cfg(test)]
    pub fn jar(&self) -> &J {
        &self.jar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jar::MemoryJar;
    use std::time::UNIX_EPOCH;

    fn gate() -> AccessGate<SharedSecret, MemoryJar> {
        AccessGate::new(SharedSecret::default(), MemoryJar::new(), MarkerPolicy::new("localhost", false))
    }

    fn noon() -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    }

    #[test]
    fn test_correct_password_sets_marker() {
        let mut gate = gate();
        assert!(!gate.check_at(noon()));
        assert_eq!(gate.verify_at("ownersnetwork", noon()), VerifyOutcome { success: true });
        assert!(gate.check_at(noon()));
    }

    #[test]
    fn test_wrong_passwords_never_set_marker() {
        let mut gate = gate();
        for attempt in ["wrong", "", "OWNERSNETWORK", "ownersnetwork ", " ownersnetwork"] {
            assert!(!gate.verify_at(attempt, noon()).success, "{attempt:?} should fail");
        }
        assert_eq!(gate.jar().len(), 0);
        assert!(!gate.check_at(noon()));
    }

    #[test]
    fn test_failure_does_not_reveal_existing_marker() {
        let mut gate = gate();
        gate.verify_at("ownersnetwork", noon());
        assert_eq!(gate.verify_at("wrong", noon()), VerifyOutcome { success: false });
        assert!(gate.check_at(noon()));
    }

    #[test]
    fn test_marker_expires_after_a_day() {
        let mut gate = gate();
        gate.verify_at("ownersnetwork", noon());
        let day = Duration::from_secs(SESSION_MAX_AGE_SECS);
        assert!(gate.check_at(noon() + day - Duration::from_secs(1)));
        assert!(!gate.check_at(noon() + day));
    }

    #[test]
    fn test_check_has_no_side_effects() {
        let gate = gate();
        assert!(!gate.check_at(noon()));
        assert!(!gate.check_at(noon()));
        assert_eq!(gate.jar().len(), 0);
    }

    #[test]
    fn test_marker_attributes() {
        let mut gate = AccessGate::new(
            SharedSecret::default(),
            MemoryJar::new(),
            MarkerPolicy::new("deck.example.com", true),
        );
        gate.verify_at("ownersnetwork", noon());
        let cookie = gate.jar().get(SESSION_COOKIE, noon()).unwrap();
        assert!(cookie.http_only);
        assert!(cookie.secure);
        assert_eq!(cookie.domain, "deck.example.com");
        assert_eq!(cookie.max_age_secs, 86_400);
    }
}
