//! Wrappers that present a [`PrimitiveSet`] as a single primitive.
//!
//! Producers (`compute_mac`, `sign`, `encrypt`) always use the primary entry
//! and prepend its identifier. Consumers (`verify_mac`, `verify`, `decrypt`)
//! strip a 5-byte candidate identifier, try every entry stored under it, and
//! then try every RAW entry against the unstripped input. Consumer failures
//! are reported uniformly and never reveal whether an identifier matched.

use std::borrow::Cow;

use keystack_types::{KeystackError, OutputPrefixType, Result};
use tracing::debug;

use crate::format::{LEGACY_START_BYTE, split_prefix};
use crate::primitive_set::{Entry, PrimitiveSet};

pub mod aead;
pub mod mac;
pub mod sign;
pub mod verify;

pub use aead::AeadWrapper;
pub use mac::MacWrapper;
pub use sign::PublicKeySignWrapper;
pub use verify::PublicKeyVerifyWrapper;

/// Takes ownership of `set`, checking it is present and has a primary.
pub(crate) fn accept_set<P: ?Sized>(
    set: Option<PrimitiveSet<P>>,
    name: &str,
) -> Result<PrimitiveSet<P>> {
    let set = set.ok_or_else(|| KeystackError::internal(format!("{name} must be non-NULL")))?;
    if set.primary().is_none() {
        return Err(KeystackError::invalid_argument(format!(
            "{name} has no primary"
        )));
    }
    Ok(set)
}

pub(crate) fn primary_of<'a, P: ?Sized>(set: &'a PrimitiveSet<P>, name: &str) -> Result<&'a Entry<P>> {
    set.primary()
        .ok_or_else(|| KeystackError::internal(format!("{name} lost its primary")))
}

/// `data ++ [LEGACY_START_BYTE]` for LEGACY keys, `data` otherwise.
pub(crate) fn legacy_adjusted(data: &[u8], prefix_type: OutputPrefixType) -> Cow<'_, [u8]> {
    if prefix_type == OutputPrefixType::Legacy {
        let mut adjusted = Vec::with_capacity(data.len() + 1);
        adjusted.extend_from_slice(data);
        adjusted.push(LEGACY_START_BYTE);
        Cow::Owned(adjusted)
    } else {
        Cow::Borrowed(data)
    }
}

/// Runs `attempt` over prefix-matched entries, then over RAW entries, and
/// returns the first success.
///
/// Prefixed candidates receive the input without its prefix; RAW candidates
/// receive the full input.
pub(crate) fn first_accepting<P: ?Sized, T>(
    set: &PrimitiveSet<P>,
    input: &[u8],
    mut attempt: impl FnMut(&Entry<P>, &[u8]) -> Result<T>,
) -> Option<T> {
    if let Some((identifier, body)) = split_prefix(input) {
        if let Ok(entries) = set.primitives(&identifier) {
            for entry in entries {
                match attempt(entry, body) {
                    Ok(value) => return Some(value),
                    Err(error) => debug!(
                        key_id = %entry.key_id(),
                        %error,
                        "prefix-matched key rejected input"
                    ),
                }
            }
        }
    }

    let raw_entries = set.raw_primitives().unwrap_or_default();
    if !raw_entries.is_empty() {
        debug!(candidates = raw_entries.len(), "falling back to raw keys");
    }
    for entry in raw_entries {
        if let Ok(value) = attempt(entry, input) {
            return Some(value);
        }
    }
    None
}
