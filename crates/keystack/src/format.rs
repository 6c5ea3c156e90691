//! Output prefix framing.
//!
//! Every non-RAW key frames its output with a 5-byte identifier: a fixed tag
//! byte followed by the big-endian key id. The tag byte is the same for
//! TINK, LEGACY and CRUNCHY keys, so a consumer can strip the prefix without
//! knowing which prefix type produced it. RAW keys have an empty identifier.
//!
//! ```text
//! output = identifier ++ primitive_output
//!
//! RAW                   identifier = []
//! TINK/LEGACY/CRUNCHY   identifier = [0x01, id >> 24, id >> 16, id >> 8, id]
//! ```
//!
//! LEGACY keys additionally authenticate `input ++ [LEGACY_START_BYTE]`.
//! That adjustment is applied by the wrappers, not here.

use std::fmt::{self, Display};

use keystack_types::{KeyId, KeystackError, OutputPrefixType, Result};

/// Length of a non-RAW identifier.
pub const NON_RAW_PREFIX_SIZE: usize = 5;

/// Identifier of RAW keys.
pub const RAW_PREFIX: &[u8] = &[];

/// Leading byte of every non-RAW identifier.
pub const IDENTIFIER_TAG: u8 = 0x01;

/// Byte appended to the input of LEGACY keys before the primitive runs.
pub const LEGACY_START_BYTE: u8 = 0x00;

/// The routing key of a primitive set bucket.
///
/// `Raw` and `Prefixed` are distinct variants, so an empty identifier can
/// never collide with a 5-byte one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identifier {
    Raw,
    Prefixed([u8; NON_RAW_PREFIX_SIZE]),
}

impl Identifier {
    /// The bytes prepended to output.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Identifier::Raw => RAW_PREFIX,
            Identifier::Prefixed(bytes) => bytes,
        }
    }

    /// Parses an identifier from its wire bytes: empty or exactly 5 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes.len() {
            0 => Some(Identifier::Raw),
            NON_RAW_PREFIX_SIZE => {
                let mut prefix = [0u8; NON_RAW_PREFIX_SIZE];
                prefix.copy_from_slice(bytes);
                Some(Identifier::Prefixed(prefix))
            }
            _ => None,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Identifier::Raw)
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_raw()
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Raw => f.write_str("raw"),
            Identifier::Prefixed(bytes) => {
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}

/// Derives the identifier for a key.
///
/// # Errors
///
/// `InvalidArgument` for [`OutputPrefixType::UnknownPrefix`].
pub fn identifier_for(key_id: KeyId, prefix_type: OutputPrefixType) -> Result<Identifier> {
    match prefix_type {
        OutputPrefixType::Raw => Ok(Identifier::Raw),
        OutputPrefixType::Tink | OutputPrefixType::Legacy | OutputPrefixType::Crunchy => {
            let id = key_id.to_be_bytes();
            Ok(Identifier::Prefixed([
                IDENTIFIER_TAG,
                id[0],
                id[1],
                id[2],
                id[3],
            ]))
        }
        OutputPrefixType::UnknownPrefix => Err(KeystackError::invalid_argument(format!(
            "unknown output prefix type for key {key_id}"
        ))),
    }
}

/// Splits a framed value into its candidate identifier and body.
///
/// Returns `None` unless the input is strictly longer than a prefix.
pub fn split_prefix(input: &[u8]) -> Option<(Identifier, &[u8])> {
    if input.len() <= NON_RAW_PREFIX_SIZE {
        return None;
    }
    let (prefix, body) = input.split_at(NON_RAW_PREFIX_SIZE);
    Identifier::from_bytes(prefix).map(|identifier| (identifier, body))
}

/// Prepends `identifier` to `output`.
pub fn frame(identifier: &Identifier, output: &[u8]) -> Vec<u8> {
    let prefix = identifier.as_bytes();
    let mut framed = Vec::with_capacity(prefix.len() + output.len());
    framed.extend_from_slice(prefix);
    framed.extend_from_slice(output);
    framed
}
