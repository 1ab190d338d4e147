//! Verification codes issued for registration and email binding.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (30 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 30;

/// Wrong submissions tolerated before an issued code is discarded
pub const MAX_ATTEMPTS: u32 = 5;

/// What an issued code may be used for
///
/// Each purpose has its own slot in the session, so a registration code can
/// never satisfy an email-binding form and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodePurpose {
    Register,
    BindEmail,
}

impl CodePurpose {
    pub const ALL: [CodePurpose; 2] = [CodePurpose::Register, CodePurpose::BindEmail];

    /// Key under which the code is kept in session state
    pub fn session_key(&self) -> &'static str {
        match self {
            CodePurpose::Register => "register_code",
            CodePurpose::BindEmail => "bind_email_code",
        }
    }
}

impl std::str::FromStr for CodePurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "register" => Ok(CodePurpose::Register),
            "bind_email" => Ok(CodePurpose::BindEmail),
            _ => Err(format!("Unknown code purpose: {}", s)),
        }
    }
}

/// A code issued to one session for one purpose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    pub purpose: CodePurpose,

    /// The 6-digit verification code
    pub code: String,

    /// Address the code is meant to be delivered to
    pub email: String,

    /// Wrong submissions recorded against this code
    #[serde(default)]
    pub attempts: u32,

    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl VerificationCode {
    /// Creates a new code with a CSPRNG-generated value
    pub fn issue(purpose: CodePurpose, email: String, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            purpose,
            code: Self::generate_code(),
            email,
            attempts: 0,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_seconds),
        }
    }

    /// Generates a random 6-digit code from the operating system RNG
    pub(crate) fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(0..1_000_000);
        format!("{:0width$}", code, width = CODE_LENGTH)
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Whole seconds left before expiry, zero once expired
    pub fn remaining_ttl_seconds(&self) -> u64 {
        (self.expires_at - Utc::now()).num_seconds().max(0) as u64
    }

    pub fn attempts_exhausted(&self) -> bool {
        self.attempts >= MAX_ATTEMPTS
    }

    pub fn remaining_attempts(&self) -> u32 {
        MAX_ATTEMPTS.saturating_sub(self.attempts)
    }

    /// Compares a submitted value against this code
    ///
    /// A wrong value counts as one attempt. Once the attempts are used up,
    /// or the code has expired, even the right value is refused.
    pub fn verify(&mut self, supplied: &str) -> bool {
        if self.is_expired() || self.attempts_exhausted() {
            return false;
        }
        if codes_match(&self.code, supplied) {
            return true;
        }
        self.attempts += 1;
        false
    }
}

/// Exact comparison between a stored and a submitted code
///
/// An empty stored code never matches, so a session that was never issued a
/// code cannot be satisfied by an empty submission.
pub fn codes_match(stored: &str, supplied: &str) -> bool {
    !stored.is_empty() && constant_time_eq(stored.as_bytes(), supplied.as_bytes())
}
