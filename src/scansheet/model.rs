use crate::error::SheetError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of decimal digits in every generated code.
pub const CODE_LEN: usize = 12;

const CODE_MIN: u64 = 100_000_000_000;
const CODE_MAX: u64 = 999_999_999_999;

/// A barcode payload: exactly twelve decimal digits, no leading zero when generated.
///
/// The code is both the identity used for scan confirmation and the payload
/// encoded into the printed symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code(String);

impl Code {
    /// Samples uniformly over `[10^11, 10^12 - 1]`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(CODE_MIN..=CODE_MAX).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Code {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != CODE_LEN {
            return Err(SheetError::InvalidCode(format!(
                "expected {} digits, got {:?}",
                CODE_LEN, s
            )));
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SheetError::InvalidCode(format!(
                "only decimal digits are allowed: {:?}",
                s
            )));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for Code {
    type Error = SheetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.0
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of confirming a scanned code against the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmResult {
    NotFound,
    AlreadyConfirmed,
    Confirmed,
}

impl ConfirmResult {
    /// Operator-facing feedback line.
    pub fn feedback(&self) -> &'static str {
        match self {
            ConfirmResult::NotFound => "Invalid barcode",
            ConfirmResult::AlreadyConfirmed => "Already scanned",
            ConfirmResult::Confirmed => "Valid and scanned",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionStats {
    pub total: usize,
    pub confirmed: usize,
    pub remaining: usize,
}

/// One entry of the generated list, as shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedCode {
    /// 1-based position in generation order
    pub position: usize,
    pub code: Code,
    pub scanned: bool,
}
