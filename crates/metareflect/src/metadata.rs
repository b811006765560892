//! Metadata Storage for Reflection
//!
//! Key/value storage for annotations. Metadata can be attached to:
//! - Targets directly (class-level metadata)
//! - Named members of a target (member-level metadata)
//!
//! Targets are identified by [`TargetKey`]: class ids for constructors and
//! prototypes, object identity tokens for instances. Keys and members keep
//! their first-definition order, so enumeration is deterministic.
//!
//! Lookups come in two flavours. The `own_*` operations read one target.
//! The inherited ones walk the target's chain most derived first, the
//! way a prototype lookup would, and are provided by [`MetadataSource`]
//! for any store that can answer the `own_*` questions.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashMap;

use metareflect_value::Value;

use crate::class_registry::ClassRegistry;
use crate::target::{Target, TargetKey};

/// A key for metadata - any string
pub type MetadataKey = String;

/// A member key - the name of a property or method on a target
pub type MemberKey = String;

/// Metadata storage for a single target
#[derive(Debug, Default)]
struct TargetMetadata {
    /// Direct metadata on the target (key -> value)
    direct: IndexMap<MetadataKey, Value>,
    /// Member-level metadata (member -> key -> value)
    members: IndexMap<MemberKey, IndexMap<MetadataKey, Value>>,
}

impl TargetMetadata {
    fn entries(&self, member: Option<&str>) -> Option<&IndexMap<MetadataKey, Value>> {
        match member {
            None => Some(&self.direct),
            Some(name) => self.members.get(name),
        }
    }

    fn entries_mut(&mut self, member: Option<&str>) -> &mut IndexMap<MetadataKey, Value> {
        match member {
            None => &mut self.direct,
            Some(name) => self.members.entry(name.to_string()).or_default(),
        }
    }
}

/// Read access to annotation metadata
///
/// Implementors answer the own-target questions; the inherited lookups
/// are derived from them by walking [`Target::chain`].
pub trait MetadataSource {
    /// Keys defined directly on `(target, member)`, in definition order
    fn own_metadata_keys(&self, target: TargetKey, member: Option<&str>) -> Vec<MetadataKey>;

    /// Value defined directly on `(target, member)` under `key`
    fn own_metadata(&self, key: &str, target: TargetKey, member: Option<&str>) -> Option<Value>;

    /// Whether `(target, member)` itself defines `key`
    fn has_own_metadata(&self, key: &str, target: TargetKey, member: Option<&str>) -> bool {
        self.own_metadata(key, target, member).is_some()
    }

    /// Keys visible on `(target, member)` along its chain
    ///
    /// Own keys come first, then each ancestor's keys that were not seen
    /// yet, so every key appears once.
    fn metadata_keys(
        &self,
        classes: &ClassRegistry,
        target: Target<'_>,
        member: Option<&str>,
    ) -> Vec<MetadataKey> {
        let mut keys = IndexSet::new();
        for level in target.chain(classes) {
            keys.extend(self.own_metadata_keys(level.key(), member));
        }
        keys.into_iter().collect()
    }

    /// Most derived value of `key` on `(target, member)` along its chain
    fn metadata(
        &self,
        key: &str,
        classes: &ClassRegistry,
        target: Target<'_>,
        member: Option<&str>,
    ) -> Option<Value> {
        target
            .chain(classes)
            .find_map(|level| self.own_metadata(key, level.key(), member))
    }

    /// Whether `key` is visible on `(target, member)` along its chain
    fn has_metadata(
        &self,
        key: &str,
        classes: &ClassRegistry,
        target: Target<'_>,
        member: Option<&str>,
    ) -> bool {
        self.metadata(key, classes, target, member).is_some()
    }
}

/// Annotation metadata store
///
/// Written at declaration time by decorators, read by the resolver.
#[derive(Debug, Default)]
pub struct MetadataStore {
    /// Map from target identity to its metadata
    targets: FxHashMap<TargetKey, TargetMetadata>,
}

impl MetadataStore {
    /// Create a new empty metadata store
    pub fn new() -> Self {
        Self {
            targets: FxHashMap::default(),
        }
    }

    /// Define metadata on a target or one of its members
    ///
    /// Redefining a key replaces its value but keeps its position.
    pub fn define_metadata(
        &mut self,
        key: impl Into<MetadataKey>,
        value: impl Into<Value>,
        target: impl Into<TargetKey>,
        member: Option<&str>,
    ) {
        self.targets
            .entry(target.into())
            .or_default()
            .entries_mut(member)
            .insert(key.into(), value.into());
    }

    /// Delete metadata from a target or one of its members
    ///
    /// Returns true if the metadata existed and was deleted
    pub fn delete_metadata(
        &mut self,
        key: &str,
        target: impl Into<TargetKey>,
        member: Option<&str>,
    ) -> bool {
        let Some(entry) = self.targets.get_mut(&target.into()) else {
            return false;
        };
        match member {
            None => entry.direct.shift_remove(key).is_some(),
            Some(name) => entry
                .members
                .get_mut(name)
                .is_some_and(|m| m.shift_remove(key).is_some()),
        }
    }

    /// Members of a target that carry metadata, in definition order
    pub fn annotated_members(&self, target: impl Into<TargetKey>) -> Vec<MemberKey> {
        self.targets
            .get(&target.into())
            .map(|e| e.members.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Clear all metadata for a target
    pub fn clear_target(&mut self, target: impl Into<TargetKey>) -> bool {
        self.targets.remove(&target.into()).is_some()
    }

    /// Get total number of targets with metadata
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }
}

impl MetadataSource for MetadataStore {
    fn own_metadata_keys(&self, target: TargetKey, member: Option<&str>) -> Vec<MetadataKey> {
        self.targets
            .get(&target)
            .and_then(|e| e.entries(member))
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn own_metadata(&self, key: &str, target: TargetKey, member: Option<&str>) -> Option<Value> {
        self.targets
            .get(&target)?
            .entries(member)?
            .get(key)
            .cloned()
    }
}
