//! Job identifier validation.
//!
//! CATCH identifies every search job with a version-4 UUID. The API accepts
//! the 32-character hexadecimal form (no hyphens) in `/caught/{id}` and
//! `/status/{id}` routes, while users typically hold the 36-character
//! hyphenated form printed by the search response.

use crate::error::{CatchError, CatchResult};
use std::fmt;
use uuid::Uuid;

/// Length of a hyphenated UUID string
const HYPHENATED_LEN: usize = 36;

/// Number of hex characters used for stream prefix matching
pub const PREFIX_LEN: usize = 8;

/// A validated CATCH job identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(Uuid);

impl JobId {
    /// Parse a job ID from its 36-character hyphenated form.
    ///
    /// Fails with [`CatchError::InvalidJobId`] for anything that is not a
    /// syntactically valid version-4 UUID. Other UUID textual forms
    /// (braced, URN, bare hex) are rejected so that user input mistakes
    /// surface early.
    pub fn parse(input: &str) -> CatchResult<Self> {
        let invalid = || CatchError::InvalidJobId {
            input: input.to_string(),
        };

        if input.len() != HYPHENATED_LEN {
            return Err(invalid());
        }

        let uuid = Uuid::parse_str(input).map_err(|_| invalid())?;

        if uuid.get_version_num() != 4 {
            return Err(invalid());
        }

        Ok(JobId(uuid))
    }

    /// The 32-character lowercase hexadecimal form, no hyphens.
    ///
    /// This is the form the API expects in route paths.
    pub fn as_simple(&self) -> String {
        self.0.simple().to_string()
    }

    /// The hyphenated form as reported by the search response.
    pub fn as_hyphenated(&self) -> String {
        self.0.hyphenated().to_string()
    }

    /// First 8 hex characters, used to match stream messages to this job.
    pub fn prefix(&self) -> String {
        let simple = self.as_simple();
        simple[..PREFIX_LEN].to_string()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
