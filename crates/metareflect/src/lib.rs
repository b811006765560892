//! Metareflect
//!
//! Decorator metadata for class hierarchies: attach annotations to
//! classes and members at definition time, then resolve them along the
//! inheritance chain with the most derived value winning.

#![warn(missing_docs)]

pub mod class_registry;
pub mod context;
pub mod declaration;
pub mod decorators;
pub mod defaults;
pub mod diagnostics;
pub mod error;
pub mod members;
pub mod metadata;
pub mod options;
pub mod resolve;
pub mod target;
pub mod type_check;

pub use class_registry::{Class, ClassRegistry, MemberKind};
pub use context::{global, ReflectionContext};
pub use declaration::{ClassDecl, MemberDecl, TypeRef};
pub use decorators::{apply, metadata, Apply, Decorator, DecoratorSite, Metadata};
pub use diagnostics::{DiagnosticSink, NullSink, RecordingSink, TracingSink};
pub use error::{ReflectError, Result};
pub use members::{list_members, own_member_names};
pub use metadata::{MetadataSource, MetadataStore};
pub use options::ReflectOptions;
pub use resolve::{Annotation, AnnotationMap, MemberAnnotations, Resolver};
pub use target::{Target, TargetKey};
pub use type_check::{check_type, check_types, evaluate_design_types, evaluate_design_types_with, TypeSpec};

pub use metareflect_value::{is_equal, ClassId, FunctionRef, ObjectValue, Value};
