use crate::{
    Result,
    constants::{DEFAULT_IDENTIFIERS, GRANTED_MARKER, IDENTIFIER_LENGTH},
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::{Choice, ConstantTimeEq};

/// Access identifier (exactly 4 ASCII digits)
///
/// # Security
/// This type implements constant-time comparison to prevent timing attacks
/// when comparing identifiers during authentication.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Create a new identifier with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidIdentifier` if the value is not exactly
    /// [`IDENTIFIER_LENGTH`] ASCII digits.
    pub fn new(value: &str) -> Result<Self> {
        if value.len() != IDENTIFIER_LENGTH {
            return Err(Error::InvalidIdentifier(format!(
                "Identifier must be {IDENTIFIER_LENGTH} digits, got {} chars",
                value.len()
            )));
        }

        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidIdentifier(format!(
                "Identifier must contain only digits: {value}"
            )));
        }

        Ok(Identifier(value.to_string()))
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Identifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Identifier::new(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Identifier::new(&value)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl ConstantTimeEq for Identifier {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.as_bytes().ct_eq(other.0.as_bytes())
    }
}

/// Constant-time comparison implementation for Identifier
impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl std::hash::Hash for Identifier {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// Immutable set of identifiers accepted by the gate.
///
/// Built once at startup; there is no way to add or remove members
/// afterwards. Membership checks visit every member so the time taken does
/// not reveal which entry matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Identifier>", into = "Vec<Identifier>")]
pub struct IdentifierSet(Vec<Identifier>);

impl IdentifierSet {
    /// Build a set from already validated identifiers.
    ///
    /// Duplicates are collapsed.
    ///
    /// # Errors
    /// Returns `Error::EmptyIdentifierSet` if no identifiers are given.
    pub fn new(identifiers: impl IntoIterator<Item = Identifier>) -> Result<Self> {
        let mut members: Vec<Identifier> = Vec::new();
        for id in identifiers {
            if !members.contains(&id) {
                members.push(id);
            }
        }

        if members.is_empty() {
            return Err(Error::EmptyIdentifierSet);
        }

        Ok(IdentifierSet(members))
    }

    /// Parse and build a set from string values.
    ///
    /// # Errors
    /// Returns the first `Error::InvalidIdentifier` found, or
    /// `Error::EmptyIdentifierSet` if `values` is empty.
    pub fn parse<'a>(values: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let identifiers = values
            .into_iter()
            .map(Identifier::new)
            .collect::<Result<Vec<_>>>()?;
        Self::new(identifiers)
    }

    /// Exact membership test.
    #[must_use]
    pub fn contains(&self, candidate: &Identifier) -> bool {
        let found = self
            .0
            .iter()
            .fold(Choice::from(0), |acc, member| acc | member.ct_eq(candidate));
        found.into()
    }

    /// Membership test for a raw keypad buffer.
    ///
    /// Anything that is not a well-formed identifier is never a member.
    #[must_use]
    pub fn contains_str(&self, candidate: &str) -> bool {
        Identifier::new(candidate).is_ok_and(|id| self.contains(&id))
    }

    /// Number of identifiers in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; an empty set cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the members.
    pub fn iter(&self) -> impl Iterator<Item = &Identifier> {
        self.0.iter()
    }
}

impl Default for IdentifierSet {
    fn default() -> Self {
        IdentifierSet(
            DEFAULT_IDENTIFIERS
                .iter()
                .map(|id| Identifier((*id).to_string()))
                .collect(),
        )
    }
}

impl TryFrom<Vec<Identifier>> for IdentifierSet {
    type Error = Error;

    fn try_from(value: Vec<Identifier>) -> Result<Self> {
        IdentifierSet::new(value)
    }
}

impl From<IdentifierSet> for Vec<Identifier> {
    fn from(set: IdentifierSet) -> Self {
        set.0
    }
}

/// Answer read from the verification host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationResult {
    /// The host sent the granted marker.
    Granted,
    /// The host sent any other byte.
    Denied { byte: u8 },
}

impl VerificationResult {
    /// Interpret a result byte. Only [`GRANTED_MARKER`] grants.
    #[must_use]
    pub fn from_byte(byte: u8) -> Self {
        if byte == GRANTED_MARKER {
            VerificationResult::Granted
        } else {
            VerificationResult::Denied { byte }
        }
    }

    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, VerificationResult::Granted)
    }
}

/// Outcome of one verification window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// A result byte arrived within the window.
    Answered(VerificationResult),
    /// Nothing arrived before the deadline.
    TimedOut,
}

impl VerificationOutcome {
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, VerificationOutcome::Answered(result) if result.is_granted())
    }
}
