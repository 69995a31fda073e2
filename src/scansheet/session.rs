//! # Session State
//!
//! A [`Session`] owns the codes generated for one operator run and the subset
//! of them confirmed by scanning. It lives as long as the process; nothing is
//! persisted.
//!
//! ## Invariants
//!
//! - `scanned ⊆ set(generated)` at all times.
//! - `generate` replaces the generated sequence and clears `scanned`.
//! - `confirm` only ever grows `scanned`.
//!
//! ## Duplicates
//!
//! Generation does not enforce uniqueness. Two identical codes are two entries
//! in `generated` (both count toward `total`) but a single member of `scanned`
//! once confirmed, because scans are tracked by value, not by position. A
//! session holding a duplicate therefore never reaches `remaining == 0`.
//!
//! ## Concurrency
//!
//! `Session` has no internal synchronization. Callers sharing one between
//! threads must serialize `generate`/`confirm` themselves.

use crate::error::{Result, SheetError};
use crate::model::{Code, ConfirmResult, ListedCode, SessionStats};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    generated: Vec<Code>,
    scanned: HashSet<Code>,
    generated_at: Option<DateTime<Utc>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            generated: Vec::new(),
            scanned: HashSet::new(),
            generated_at: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// When the current sequence was generated, `None` before the first call.
    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated_at
    }

    /// Generates `count` fresh codes with the thread-local RNG.
    pub fn generate(&mut self, count: i64) -> Result<&[Code]> {
        self.generate_with(count, &mut rand::thread_rng())
    }

    /// Replaces the generated sequence with `count` random codes and clears
    /// all confirmations. Negative counts are rejected, zero is allowed.
    pub fn generate_with<R: Rng + ?Sized>(&mut self, count: i64, rng: &mut R) -> Result<&[Code]> {
        let count = usize::try_from(count).map_err(|_| {
            SheetError::InvalidInput(format!("barcode count must not be negative, got {}", count))
        })?;

        self.generated = (0..count).map(|_| Code::random(rng)).collect();
        self.scanned.clear();
        self.generated_at = Some(Utc::now());
        Ok(&self.generated)
    }

    pub fn confirm(&mut self, code: &Code) -> ConfirmResult {
        if !self.generated.contains(code) {
            return ConfirmResult::NotFound;
        }
        if self.scanned.insert(code.clone()) {
            ConfirmResult::Confirmed
        } else {
            ConfirmResult::AlreadyConfirmed
        }
    }

    /// Confirms raw operator input. Input that is not a well-formed code
    /// cannot be in the session and is reported as `NotFound`.
    pub fn confirm_input(&mut self, input: &str) -> ConfirmResult {
        match input.trim().parse::<Code>() {
            Ok(code) => self.confirm(&code),
            Err(_) => ConfirmResult::NotFound,
        }
    }

    pub fn stats(&self) -> SessionStats {
        let total = self.generated.len();
        let confirmed = self.scanned.len();
        SessionStats {
            total,
            confirmed,
            remaining: total - confirmed,
        }
    }

    pub fn codes(&self) -> &[Code] {
        &self.generated
    }

    pub fn is_scanned(&self, code: &Code) -> bool {
        self.scanned.contains(code)
    }

    pub fn listing(&self) -> Vec<ListedCode> {
        self.generated
            .iter()
            .enumerate()
            .map(|(i, code)| ListedCode {
                position: i + 1,
                code: code.clone(),
                scanned: self.scanned.contains(code),
            })
            .collect()
    }

    #[cfg(any(test, feature = "test_utils"))]
    pub(crate) fn with_codes(codes: Vec<Code>) -> Self {
        Self {
            generated: codes,
            generated_at: Some(Utc::now()),
            ..Self::new()
        }
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    pub struct SessionFixture {
        pub session: Session,
        rng: StdRng,
    }

    impl Default for SessionFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SessionFixture {
        pub fn new() -> Self {
            Self {
                session: Session::new(),
                rng: StdRng::seed_from_u64(0x5ca7),
            }
        }

        pub fn with_generated(mut self, count: i64) -> Self {
            self.session.generate_with(count, &mut self.rng).unwrap();
            self
        }

        pub fn with_codes(mut self, codes: &[&str]) -> Self {
            self.session = Session::with_codes(codes.iter().map(|c| c.parse().unwrap()).collect());
            self
        }

        pub fn with_confirmed(mut self, count: usize) -> Self {
            let codes: Vec<Code> = self.session.codes().iter().take(count).cloned().collect();
            for code in &codes {
                self.session.confirm(code);
            }
            self
        }
    }
}
