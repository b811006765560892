//! Annotation resolution
//!
//! Collects the annotations of a member along its target's inheritance
//! chain and collapses repeated keys so the most derived value wins.
//!
//! ```text
//! resolve_member("TEST_", child, "prop0")
//!
//!   level 0  child instance     design:type, TEST_KEY2, TEST_KEY   (type kept)
//!   level 1  Child prototype    TEST_KEY2, TEST_KEY                (type dropped)
//!   level 2  Parent prototype   TEST_KEY
//!   level 3  GrandParent proto  TEST_KEY
//!   ----------------------------------------------------------------
//!   dedup    [design:type, KEY2, KEY]
//! ```
//!
//! Each level reads keys through the store's inherited lookup, so an
//! ancestor's value shows up again once the walk climbs past the class
//! that overrode it. Equal repeats vanish silently. Differing repeats are
//! reported to the [`DiagnosticSink`] and dropped.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::trace;

use metareflect_value::{is_equal, Value};

use crate::class_registry::ClassRegistry;
use crate::diagnostics::DiagnosticSink;
use crate::members::list_members;
use crate::metadata::{MetadataSource, MetadataStore};
use crate::options::ReflectOptions;
use crate::target::{Target, TargetKey};
use crate::type_check::{evaluate_design_types_with, TypeSpec};

/// A resolved annotation: reported key and its payload
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Key with the prefix stripped; the type key is reported verbatim
    pub key: String,
    /// Stored payload
    pub props: Value,
}

impl Annotation {
    /// Create an annotation
    pub fn new(key: impl Into<String>, props: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            props: props.into(),
        }
    }
}

/// Resolved annotations of one member, most derived first
#[derive(Debug, Clone, PartialEq)]
pub struct MemberAnnotations {
    /// Member name
    pub member: String,
    /// Annotations after deduplication
    pub annotations: Vec<Annotation>,
}

impl MemberAnnotations {
    /// Whether nothing was resolved
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Payload of the annotation reported under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.annotations
            .iter()
            .find(|a| a.key == key)
            .map(|a| &a.props)
    }

    /// Reported keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.annotations.iter().map(|a| a.key.as_str())
    }
}

/// Member name to its resolved annotations, in member order
pub type AnnotationMap = IndexMap<String, Vec<Annotation>>;

/// Read-only resolution over a class registry and a metadata source
pub struct Resolver<'a, M: MetadataSource + ?Sized = MetadataStore> {
    classes: &'a ClassRegistry,
    store: &'a M,
    options: &'a ReflectOptions,
    sink: &'a dyn DiagnosticSink,
}

impl<'a, M: MetadataSource + ?Sized> Resolver<'a, M> {
    /// Create a resolver
    pub fn new(
        classes: &'a ClassRegistry,
        store: &'a M,
        options: &'a ReflectOptions,
        sink: &'a dyn DiagnosticSink,
    ) -> Self {
        Self {
            classes,
            store,
            options,
            sink,
        }
    }

    /// Annotations of `member` whose keys start with `prefix`, plus the type
    /// annotation, gathered along the whole chain
    pub fn resolve_member(&self, prefix: &str, target: Target<'_>, member: &str) -> MemberAnnotations {
        self.resolve_member_with(prefix, target, member, true, true)
    }

    /// [`resolve_member`](Self::resolve_member) with explicit type inclusion
    /// and climbing
    ///
    /// The type annotation is only ever taken from the first level.
    pub fn resolve_member_with(
        &self,
        prefix: &str,
        target: Target<'_>,
        member: &str,
        include_type: bool,
        climb: bool,
    ) -> MemberAnnotations {
        let mut collected = Vec::new();
        self.collect(prefix, target, member, include_type, climb, &mut collected);
        MemberAnnotations {
            member: member.to_string(),
            annotations: self.dedup(target, member, collected),
        }
    }

    fn collect(
        &self,
        prefix: &str,
        target: Target<'_>,
        member: &str,
        include_type: bool,
        climb: bool,
        acc: &mut Vec<Annotation>,
    ) {
        let keys = self.store.metadata_keys(self.classes, target, Some(member));
        trace!(
            target: "metareflect::resolve",
            level = %target.key(),
            member,
            keys = keys.len(),
            "collecting annotations"
        );

        for key in keys {
            let is_type = key == self.options.type_key;
            if !(include_type && is_type) && !key.starts_with(prefix) {
                continue;
            }
            let props = self
                .store
                .metadata(&key, self.classes, target, Some(member))
                .unwrap_or_default();
            let reported = if is_type {
                key
            } else {
                key[prefix.len()..].to_string()
            };
            acc.push(Annotation {
                key: reported,
                props,
            });
        }

        if !climb {
            return;
        }
        if let Some(parent) = target.parent(self.classes).filter(|p| !p.is_root()) {
            self.collect(prefix, parent, member, false, climb, acc);
        }
    }

    /// Keep the first annotation per reported key
    fn dedup(&self, target: Target<'_>, member: &str, items: Vec<Annotation>) -> Vec<Annotation> {
        let mut seen: FxHashMap<String, Value> = FxHashMap::default();
        let mut kept = Vec::with_capacity(items.len());

        for item in items {
            if let Some(original) = seen.get(&item.key) {
                if !is_equal(&item.props, original, &[]) {
                    let class = target.type_name(self.classes).unwrap_or("<unknown>");
                    self.sink.warn(&format!(
                        "conflicting annotation for key {} on {}.{}, original kept",
                        item.key, class, member
                    ));
                }
                continue;
            }
            seen.insert(item.key.clone(), item.props.clone());
            kept.push(item);
        }
        kept
    }

    /// Annotations of every own member of `model` for each prefix
    ///
    /// The first prefix resolves with the type annotation along the whole
    /// chain; every later prefix reads the first level only and skips the
    /// type annotation. Members without annotations are left out. Returns
    /// `None` for an empty prefix list or when nothing resolved.
    pub fn resolve_all_members(&self, model: Target<'_>, prefixes: &[&str]) -> Option<AnnotationMap> {
        let (first, rest) = prefixes.split_first()?;
        let mut result = AnnotationMap::new();

        for member in self.list_members(model, false) {
            let mut annotations = self
                .resolve_member_with(first, model, &member, true, true)
                .annotations;
            for prefix in rest {
                annotations.extend(
                    self.resolve_member_with(prefix, model, &member, false, false)
                        .annotations,
                );
            }
            if !annotations.is_empty() {
                result.insert(member, annotations);
            }
        }

        (!result.is_empty()).then_some(result)
    }

    /// Class-level annotations of the target's class, own keys only
    pub fn resolve_class_annotations(&self, prefix: &str, target: Target<'_>) -> Vec<Annotation> {
        let class = TargetKey::Class(target.class_id());
        self.store
            .own_metadata_keys(class, None)
            .into_iter()
            .filter_map(|key| {
                let reported = key.strip_prefix(prefix)?.to_string();
                let props = self.store.own_metadata(&key, class, None).unwrap_or_default();
                Some(Annotation {
                    key: reported,
                    props,
                })
            })
            .collect()
    }

    /// Declared type name of `member`; `None` when missing or `Function`
    pub fn resolve_declared_type(&self, model: Target<'_>, member: &str) -> Option<String> {
        let type_key = self.options.type_key.as_str();
        let resolved = self.resolve_member_with(type_key, model, member, true, false);
        let annotation = resolved.annotations.iter().find(|a| a.key == type_key)?;
        let name = declared_name(&annotation.props)?;
        (name != self.options.function_type_name).then(|| name.to_string())
    }

    /// Whether `value` fits the declared type of `member`
    ///
    /// Members without a type annotation accept anything.
    pub fn matches_declared_type(&self, model: Target<'_>, member: &str, value: &Value) -> bool {
        match self
            .store
            .metadata(&self.options.type_key, self.classes, model, Some(member))
        {
            Some(declared) => evaluate_design_types_with(
                value,
                &TypeSpec::from_value(&declared),
                &self.options.root_type_name,
            ),
            None => true,
        }
    }

    /// Member names of `target`, climbing up to the root class when asked
    pub fn list_members(&self, target: Target<'_>, climb: bool) -> Vec<String> {
        list_members(self.classes, target, climb, &self.options.root_type_name)
    }
}

/// Name carried by a type payload: a function's name or an object's `name`
fn declared_name(props: &Value) -> Option<&str> {
    match props {
        Value::Function(f) => Some(f.name()),
        Value::Object(obj) => obj.get("name").and_then(Value::as_str),
        _ => None,
    }
}
