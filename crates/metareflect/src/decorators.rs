//! Decorators
//!
//! A decorator runs once per declaration site, at class definition time,
//! and writes into the [`MetadataStore`]. Sites route to storage targets:
//!
//! | Site                  | Target              | Member        |
//! |-----------------------|---------------------|---------------|
//! | class                 | `Class(id)`         | none          |
//! | instance member       | `Prototype(id)`     | member name   |
//! | static member         | `Class(id)`         | member name   |

use metareflect_value::{ClassId, Value};

use crate::class_registry::MemberKind;
use crate::metadata::MetadataStore;
use crate::target::TargetKey;

/// Where a decorator is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecoratorSite {
    /// The class itself
    Class(ClassId),
    /// A property or method of the class
    Member {
        /// Declaring class
        class: ClassId,
        /// Member name
        name: String,
        /// Property or method
        kind: MemberKind,
        /// Declared on the constructor rather than the prototype
        is_static: bool,
    },
}

impl DecoratorSite {
    /// Declaring class
    pub fn class(&self) -> ClassId {
        match self {
            DecoratorSite::Class(id) => *id,
            DecoratorSite::Member { class, .. } => *class,
        }
    }

    /// Storage target metadata for this site is written to
    pub fn target_key(&self) -> TargetKey {
        match self {
            DecoratorSite::Class(id) => TargetKey::Class(*id),
            DecoratorSite::Member {
                class,
                is_static: true,
                ..
            } => TargetKey::Class(*class),
            DecoratorSite::Member { class, .. } => TargetKey::Prototype(*class),
        }
    }

    /// Member name, `None` for class sites
    pub fn member(&self) -> Option<&str> {
        match self {
            DecoratorSite::Class(_) => None,
            DecoratorSite::Member { name, .. } => Some(name.as_str()),
        }
    }
}

/// Something that annotates a declaration site
pub trait Decorator {
    /// Write this decorator's metadata for `site`
    fn decorate(&self, store: &mut MetadataStore, site: &DecoratorSite);
}

impl<F> Decorator for F
where
    F: Fn(&mut MetadataStore, &DecoratorSite),
{
    fn decorate(&self, store: &mut MetadataStore, site: &DecoratorSite) {
        self(store, site)
    }
}

/// Decorator attaching one key/value pair; see [`metadata`]
#[derive(Debug, Clone)]
pub struct Metadata {
    key: String,
    value: Value,
}

impl Decorator for Metadata {
    fn decorate(&self, store: &mut MetadataStore, site: &DecoratorSite) {
        store.define_metadata(
            self.key.clone(),
            self.value.clone(),
            site.target_key(),
            site.member(),
        );
    }
}

/// Attach `value` under `key` wherever the decorator is applied
pub fn metadata(key: impl Into<String>, value: impl Into<Value>) -> Metadata {
    Metadata {
        key: key.into(),
        value: value.into(),
    }
}

/// Decorator applying several decorators to one site; see [`apply`]
#[derive(Default)]
pub struct Apply {
    decorators: Vec<Box<dyn Decorator>>,
}

impl Apply {
    /// Empty composition
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a decorator
    pub fn then(mut self, decorator: impl Decorator + 'static) -> Self {
        self.decorators.push(Box::new(decorator));
        self
    }

    /// Number of composed decorators
    pub fn len(&self) -> usize {
        self.decorators.len()
    }

    /// Whether nothing is composed
    pub fn is_empty(&self) -> bool {
        self.decorators.is_empty()
    }
}

impl Decorator for Apply {
    fn decorate(&self, store: &mut MetadataStore, site: &DecoratorSite) {
        for decorator in &self.decorators {
            decorator.decorate(store, site);
        }
    }
}

impl std::fmt::Debug for Apply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Apply")
            .field("decorators", &self.decorators.len())
            .finish()
    }
}

/// Compose decorators, applied to the same site in order
pub fn apply(decorators: impl IntoIterator<Item = Box<dyn Decorator>>) -> Apply {
    Apply {
        decorators: decorators.into_iter().collect(),
    }
}
