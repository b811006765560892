//! Reflection context
//!
//! Owns the class registry, the metadata store, the options and the
//! diagnostic sink. Classes are defined through it, which is where
//! decorators run; resolution borrows it read-only through a [`Resolver`].

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashSet;
use tracing::debug;

use metareflect_value::{ClassId, ObjectValue};

use crate::class_registry::{Class, ClassRegistry};
use crate::declaration::{ClassDecl, TypeRef};
use crate::decorators::DecoratorSite;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::{ReflectError, Result};
use crate::metadata::MetadataStore;
use crate::options::ReflectOptions;
use crate::resolve::Resolver;

/// Classes, their metadata and the settings used to resolve it
pub struct ReflectionContext {
    classes: ClassRegistry,
    metadata: MetadataStore,
    options: ReflectOptions,
    sink: Arc<dyn DiagnosticSink>,
}

impl ReflectionContext {
    /// Create a context with default options, reporting through `tracing`
    pub fn new() -> Self {
        Self::with_options(ReflectOptions::default())
    }

    /// Create a context with the given options
    pub fn with_options(options: ReflectOptions) -> Self {
        Self {
            classes: ClassRegistry::with_root(&options.root_type_name),
            metadata: MetadataStore::new(),
            options,
            sink: Arc::new(TracingSink),
        }
    }

    /// Replace the diagnostic sink
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the diagnostic sink in place
    pub fn set_sink(&mut self, sink: Arc<dyn DiagnosticSink>) {
        self.sink = sink;
    }

    /// Registered classes
    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    /// Metadata store
    pub fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }

    /// Metadata store, for attaching metadata outside of class definition
    pub fn metadata_mut(&mut self) -> &mut MetadataStore {
        &mut self.metadata
    }

    /// Active options
    pub fn options(&self) -> &ReflectOptions {
        &self.options
    }

    /// Look up a class by name
    pub fn class_by_name(&self, name: &str) -> Option<&Class> {
        self.classes.get_class_by_name(name)
    }

    /// Register a class and run its decorators
    ///
    /// For every decorated member the type annotation is written first,
    /// then the member's decorators in attachment order. Class decorators
    /// run last. The declaration is validated before anything is written,
    /// so a failed definition leaves the context untouched.
    pub fn define_class(&mut self, decl: ClassDecl) -> Result<ClassId> {
        self.validate(&decl)?;
        let ClassDecl {
            name,
            parent,
            members,
            decorators,
        } = decl;

        let id = self.classes.register_class(&name, parent)?;
        for member in &members {
            self.classes
                .add_member(id, &member.name, member.kind, member.is_static)?;
        }
        debug!(
            class = %name,
            id = %id,
            members = members.len(),
            "Class defined"
        );

        for member in members {
            if member.decorators.is_empty() {
                continue;
            }
            let site = DecoratorSite::Member {
                class: id,
                name: member.name.clone(),
                kind: member.kind,
                is_static: member.is_static,
            };
            if let Some(declared) = member.annotation_type().to_value(&self.classes) {
                self.metadata.define_metadata(
                    self.options.type_key.clone(),
                    declared,
                    site.target_key(),
                    site.member(),
                );
            }
            for decorator in &member.decorators {
                decorator.decorate(&mut self.metadata, &site);
            }
        }

        let site = DecoratorSite::Class(id);
        for decorator in &decorators {
            decorator.decorate(&mut self.metadata, &site);
        }
        Ok(id)
    }

    fn validate(&self, decl: &ClassDecl) -> Result<()> {
        if self.classes.get_class_by_name(&decl.name).is_some() {
            return Err(ReflectError::DuplicateClass {
                name: decl.name.clone(),
            });
        }
        if let Some(parent) = decl.parent {
            if self.classes.get_class(parent).is_none() {
                return Err(ReflectError::UnknownClass(parent));
            }
        }

        let mut seen = FxHashSet::default();
        for member in &decl.members {
            if !seen.insert((member.name.as_str(), member.is_static)) {
                return Err(ReflectError::DuplicateMember {
                    class: decl.name.clone(),
                    member: member.name.clone(),
                });
            }
            if let Some(TypeRef::Class(ty)) = member.declared_type {
                if self.classes.get_class(ty).is_none() {
                    return Err(ReflectError::UnknownClass(ty));
                }
            }
        }
        Ok(())
    }

    /// Create an instance of a registered class
    pub fn instantiate(&self, class: ClassId) -> Result<ObjectValue> {
        self.classes.instantiate(class)
    }

    /// Resolver over this context
    pub fn resolver(&self) -> Resolver<'_, MetadataStore> {
        Resolver::new(&self.classes, &self.metadata, &self.options, self.sink.as_ref())
    }
}

impl Default for ReflectionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReflectionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReflectionContext")
            .field("classes", &self.classes.len())
            .field("targets", &self.metadata.target_count())
            .field("options", &self.options)
            .finish()
    }
}

static GLOBAL: Lazy<RwLock<ReflectionContext>> = Lazy::new(|| RwLock::new(ReflectionContext::new()));

/// Process-wide context, created on first use
pub fn global() -> &'static RwLock<ReflectionContext> {
    &GLOBAL
}
