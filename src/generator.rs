use crate::charset::{self, COMBINED, CharacterClass};
use crate::error::DeriveError;
use crate::hash::{HashPrimitive, Sha256Hex};
use crate::kdf::{derive_salt, derive_seed};
use crate::lcg::LcgStream;
use std::fmt;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Characters guaranteed from each class.
pub const MIN_PER_CLASS: usize = 3;

/// Length of the guaranteed-minimum pass. Shorter requests still get this
/// many characters.
pub const MIN_COMPOSITION_LEN: usize = MIN_PER_CLASS * CharacterClass::ALL.len();

/// Result of one derivation plus what the caller needs to report on it.
pub struct Derivation {
    pub password: Zeroizing<String>,
    pub requested_length: usize,
}

impl fmt::Debug for Derivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derivation")
            .field("password", &"<redacted>")
            .field("produced_length", &self.produced_length())
            .field("requested_length", &self.requested_length)
            .finish()
    }
}

impl Derivation {
    pub fn produced_length(&self) -> usize {
        self.password.len()
    }

    /// True when the request was below [`MIN_COMPOSITION_LEN`] and the
    /// password came out longer than asked for.
    pub fn is_over_length(&self) -> bool {
        self.produced_length() > self.requested_length
    }

    pub fn class_counts(&self) -> [usize; 4] {
        charset::class_counts(&self.password)
    }
}

/// Draws the guaranteed minimum from every class, then fills up to
/// `length` from the combined alphabet.
pub fn compose(stream: &mut LcgStream, length: usize) -> Zeroizing<Vec<u8>> {
    let mut chars = Zeroizing::new(Vec::with_capacity(length.max(MIN_COMPOSITION_LEN)));

    for _ in 0..MIN_PER_CLASS {
        for class in CharacterClass::ALL {
            let alphabet = class.alphabet();
            chars.push(alphabet[stream.next_index(alphabet.len())]);
        }
    }

    while chars.len() < length {
        chars.push(COMBINED[stream.next_index(COMBINED.len())]);
    }

    chars
}

/// Fisher–Yates over the whole slice, continuing `stream`.
pub fn shuffle(stream: &mut LcgStream, chars: &mut [u8]) {
    for i in (1..chars.len()).rev() {
        let j = stream.next_index(i + 1);
        chars.swap(i, j);
    }
}

/// Runs the full pipeline with the given hash.
pub fn derive<H: HashPrimitive>(
    hasher: &H,
    first: &str,
    second: &str,
    length: usize,
) -> Result<Derivation, DeriveError> {
    debug!(length, "deriving salt and seed");

    let salt = Zeroizing::new(derive_salt(hasher, first, second)?);
    let seed = derive_seed(hasher, first, second, &salt)?;
    let mut stream = LcgStream::new(seed)?;

    if length < MIN_COMPOSITION_LEN {
        warn!(
            requested = length,
            produced = MIN_COMPOSITION_LEN,
            "requested length is below the composition minimum; password will be longer"
        );
    }

    let mut chars = compose(&mut stream, length);
    shuffle(&mut stream, &mut chars);

    debug!(produced = chars.len(), "password assembled");

    let password: String = chars.iter().map(|&b| char::from(b)).collect();

    Ok(Derivation {
        password: Zeroizing::new(password),
        requested_length: length,
    })
}

pub fn derive_password_with<H: HashPrimitive>(
    hasher: &H,
    first: &str,
    second: &str,
    length: usize,
) -> Result<Zeroizing<String>, DeriveError> {
    derive(hasher, first, second, length).map(|d| d.password)
}

/// Derives the password for `(first, second, length)` using SHA-256.
///
/// The same three inputs always produce the same password. For
/// `length >= 12` it contains at least three characters from each class;
/// shorter requests return 12 characters.
pub fn derive_password(
    first: &str,
    second: &str,
    length: usize,
) -> Result<Zeroizing<String>, DeriveError> {
    derive_password_with(&Sha256Hex, first, second, length)
}
