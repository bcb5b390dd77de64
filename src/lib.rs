pub mod charset;
pub mod error;
pub mod generator;
pub mod hash;
pub mod kdf;
pub mod lcg;

pub use charset::CharacterClass;
pub use error::{DeriveError, ValidationError};
pub use generator::{Derivation, derive, derive_password, derive_password_with};
pub use hash::{HashPrimitive, Sha256Hex};
pub use kdf::{derive_salt, derive_seed};
pub use lcg::LcgStream;
