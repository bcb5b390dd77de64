//! Character classes used by the composition pass.

pub const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &[u8] = b"0123456789";
pub const SPECIAL: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Every class concatenated in [`CharacterClass::ALL`] order.
pub const COMBINED: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()_+-=[]{}|;:,.<>?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    Uppercase,
    Lowercase,
    Digit,
    Special,
}

impl CharacterClass {
    /// Order of the guaranteed-minimum pass.
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Uppercase,
        CharacterClass::Lowercase,
        CharacterClass::Digit,
        CharacterClass::Special,
    ];

    pub const fn alphabet(self) -> &'static [u8] {
        match self {
            CharacterClass::Uppercase => UPPERCASE,
            CharacterClass::Lowercase => LOWERCASE,
            CharacterClass::Digit => DIGITS,
            CharacterClass::Special => SPECIAL,
        }
    }

    pub fn of(byte: u8) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|class| class.alphabet().contains(&byte))
    }

    pub const fn name(self) -> &'static str {
        match self {
            CharacterClass::Uppercase => "upper",
            CharacterClass::Lowercase => "lower",
            CharacterClass::Digit => "digit",
            CharacterClass::Special => "special",
        }
    }
}

/// Per-class character counts of a password, indexed like
/// [`CharacterClass::ALL`].
pub fn class_counts(password: &str) -> [usize; 4] {
    CharacterClass::ALL.map(|class| {
        password
            .bytes()
            .filter(|b| class.alphabet().contains(b))
            .count()
    })
}
