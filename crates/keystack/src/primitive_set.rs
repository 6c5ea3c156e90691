//! Multi-key primitive containers.
//!
//! A [`PrimitiveSetBuilder`] collects one primitive per key, grouped by the
//! key's [`Identifier`]. Additions take `&self` and are serialized by an
//! internal mutex, so several threads may populate the same builder.
//! [`PrimitiveSetBuilder::build`] consumes the builder and yields an
//! immutable [`PrimitiveSet`] that needs no locking to read.
//!
//! ```
//! use keystack::primitive_set::PrimitiveSetBuilder;
//! use keystack::{KeyId, KeyStatus, Mac, OutputPrefixType};
//! use keystack_crypto::HmacPrimitive;
//! use keystack_types::HashType;
//!
//! let builder = PrimitiveSetBuilder::<dyn Mac>::new();
//! let mac = HmacPrimitive::new(HashType::Sha256, 16, &[1u8; 32]).unwrap();
//! let entry = builder
//!     .add_primitive(Box::new(mac), KeyId::new(42), KeyStatus::Enabled, OutputPrefixType::Tink)
//!     .unwrap();
//! builder.set_primary(entry).unwrap();
//!
//! let set = builder.build().unwrap();
//! assert_eq!(set.primary().unwrap().key_id(), KeyId::new(42));
//! ```

use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::Mutex;

use keystack_types::{KeyId, KeyStatus, KeystackError, OutputPrefixType, Result};

use crate::format::{Identifier, identifier_for};

/// One key's primitive together with the metadata used to route to it.
pub struct Entry<P: ?Sized> {
    primitive: Box<P>,
    identifier: Identifier,
    key_id: KeyId,
    status: KeyStatus,
    output_prefix_type: OutputPrefixType,
}

impl<P: ?Sized> Entry<P> {
    pub fn primitive(&self) -> &P {
        &self.primitive
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn key_id(&self) -> KeyId {
        self.key_id
    }

    pub fn status(&self) -> KeyStatus {
        self.status
    }

    pub fn output_prefix_type(&self) -> OutputPrefixType {
        self.output_prefix_type
    }
}

impl<P: ?Sized> Debug for Entry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("identifier", &self.identifier)
            .field("key_id", &self.key_id)
            .field("status", &self.status)
            .field("output_prefix_type", &self.output_prefix_type)
            .finish_non_exhaustive()
    }
}

/// Refers to an entry added to a builder; used to mark it primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryHandle {
    identifier: Identifier,
    position: usize,
    key_id: KeyId,
}

impl EntryHandle {
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn key_id(&self) -> KeyId {
        self.key_id
    }
}

// ============================================================================
// Builder
// ============================================================================

struct BuildState<P: ?Sized> {
    buckets: HashMap<Identifier, Vec<Entry<P>>>,
    primary: Option<EntryHandle>,
}

impl<P: ?Sized> BuildState<P> {
    fn contains(&self, handle: &EntryHandle) -> bool {
        self.buckets
            .get(&handle.identifier)
            .and_then(|bucket| bucket.get(handle.position))
            .is_some_and(|entry| entry.key_id == handle.key_id)
    }
}

/// Mutable, thread-safe build phase of a [`PrimitiveSet`].
pub struct PrimitiveSetBuilder<P: ?Sized> {
    state: Mutex<BuildState<P>>,
}

impl<P: ?Sized> PrimitiveSetBuilder<P> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BuildState {
                buckets: HashMap::new(),
                primary: None,
            }),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BuildState<P>>> {
        self.state
            .lock()
            .map_err(|_| KeystackError::internal("primitive set lock poisoned"))
    }

    /// Adds `primitive` under the identifier derived from `key_id` and
    /// `output_prefix_type`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the prefix type has no identifier.
    pub fn add_primitive(
        &self,
        primitive: Box<P>,
        key_id: KeyId,
        status: KeyStatus,
        output_prefix_type: OutputPrefixType,
    ) -> Result<EntryHandle> {
        let identifier = identifier_for(key_id, output_prefix_type)?;
        let entry = Entry {
            primitive,
            identifier,
            key_id,
            status,
            output_prefix_type,
        };

        let mut state = self.lock()?;
        let bucket = state.buckets.entry(identifier).or_default();
        let position = bucket.len();
        bucket.push(entry);

        Ok(EntryHandle {
            identifier,
            position,
            key_id,
        })
    }

    /// Handles of every entry stored under `identifier`, in insertion order.
    ///
    /// # Errors
    ///
    /// `NotFound` if nothing was added under `identifier`.
    pub fn primitives(&self, identifier: &Identifier) -> Result<Vec<EntryHandle>> {
        let state = self.lock()?;
        let bucket = state.buckets.get(identifier).ok_or_else(|| {
            KeystackError::not_found(format!("no primitives found for identifier {identifier}"))
        })?;
        Ok(bucket
            .iter()
            .enumerate()
            .map(|(position, entry)| EntryHandle {
                identifier: *identifier,
                position,
                key_id: entry.key_id,
            })
            .collect())
    }

    pub fn raw_primitives(&self) -> Result<Vec<EntryHandle>> {
        self.primitives(&Identifier::Raw)
    }

    /// Marks the entry behind `handle` as the primary.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `handle` came from a different builder.
    pub fn set_primary(&self, handle: EntryHandle) -> Result<()> {
        let mut state = self.lock()?;
        if !state.contains(&handle) {
            return Err(KeystackError::invalid_argument(format!(
                "key {} is not part of this primitive set",
                handle.key_id
            )));
        }
        state.primary = Some(handle);
        Ok(())
    }

    pub fn primary(&self) -> Result<Option<EntryHandle>> {
        Ok(self.lock()?.primary)
    }

    /// Freezes the builder.
    pub fn build(self) -> Result<PrimitiveSet<P>> {
        let state = self
            .state
            .into_inner()
            .map_err(|_| KeystackError::internal("primitive set lock poisoned"))?;
        Ok(PrimitiveSet {
            buckets: state.buckets,
            primary: state.primary,
        })
    }
}

impl<P: ?Sized> Default for PrimitiveSetBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ?Sized> Debug for PrimitiveSetBuilder<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimitiveSetBuilder").finish_non_exhaustive()
    }
}

// ============================================================================
// Frozen set
// ============================================================================

/// Immutable multi-key container.
pub struct PrimitiveSet<P: ?Sized> {
    buckets: HashMap<Identifier, Vec<Entry<P>>>,
    primary: Option<EntryHandle>,
}

impl<P: ?Sized> PrimitiveSet<P> {
    /// Entries stored under `identifier`, in insertion order.
    ///
    /// # Errors
    ///
    /// `NotFound` if no bucket exists for `identifier`.
    pub fn primitives(&self, identifier: &Identifier) -> Result<&[Entry<P>]> {
        self.buckets
            .get(identifier)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                KeystackError::not_found(format!("no primitives found for identifier {identifier}"))
            })
    }

    pub fn raw_primitives(&self) -> Result<&[Entry<P>]> {
        self.primitives(&Identifier::Raw)
    }

    /// Looks up an entry by the bytes a producer prepended.
    pub fn primitives_for_prefix(&self, prefix: &[u8]) -> Result<&[Entry<P>]> {
        let identifier = Identifier::from_bytes(prefix).ok_or_else(|| {
            KeystackError::not_found(format!(
                "a {}-byte prefix is not an identifier",
                prefix.len()
            ))
        })?;
        self.primitives(&identifier)
    }

    pub fn primary(&self) -> Option<&Entry<P>> {
        let handle = self.primary?;
        self.buckets.get(&handle.identifier)?.get(handle.position)
    }

    /// Every entry, bucket by bucket.
    pub fn entries(&self) -> impl Iterator<Item = &Entry<P>> {
        self.buckets.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<P: ?Sized> Debug for PrimitiveSet<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimitiveSet")
            .field("len", &self.len())
            .field("primary", &self.primary().map(Entry::key_id))
            .finish_non_exhaustive()
    }
}
