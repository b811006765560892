//! Reflection targets
//!
//! A [`Target`] is what annotations hang off: a class constructor, a class
//! prototype, or a live instance. Its [`TargetKey`] is the identity the
//! metadata store indexes by. Class ids stand in for constructors and
//! prototypes, and instances are keyed by their object identity token.
//!
//! Chains follow the inheritance graph:
//!
//! ```text
//! Instance(child) -> Prototype(Child) -> Prototype(Parent) -> Prototype(Object)
//! Class(Child)    -> Class(Parent)    -> Class(Object)
//! ```

use std::fmt;

use metareflect_value::{ClassId, ObjectId, ObjectValue};

use crate::class_registry::ClassRegistry;

/// Identity under which metadata is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKey {
    /// A class constructor (class-level and static member metadata)
    Class(ClassId),
    /// A class prototype (instance member metadata)
    Prototype(ClassId),
    /// A single instance
    Instance(ObjectId),
}

impl fmt::Display for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKey::Class(id) => write!(f, "class {}", id),
            TargetKey::Prototype(id) => write!(f, "prototype {}", id),
            TargetKey::Instance(id) => write!(f, "instance {:?}", id),
        }
    }
}

/// A readable target in the inheritance graph
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// A class constructor
    Class(ClassId),
    /// A class prototype
    Prototype(ClassId),
    /// An instance
    Instance(&'a ObjectValue),
}

impl<'a> Target<'a> {
    /// Storage identity of this target
    pub fn key(&self) -> TargetKey {
        match self {
            Target::Class(id) => TargetKey::Class(*id),
            Target::Prototype(id) => TargetKey::Prototype(*id),
            Target::Instance(obj) => TargetKey::Instance(obj.id()),
        }
    }

    /// Class this target belongs to
    pub fn class_id(&self) -> ClassId {
        match self {
            Target::Class(id) | Target::Prototype(id) => *id,
            Target::Instance(obj) => obj.class().id,
        }
    }

    /// Whether this is the constructor or prototype of the root class
    pub fn is_root(&self) -> bool {
        match self {
            Target::Class(id) | Target::Prototype(id) => *id == ClassId::OBJECT,
            Target::Instance(_) => false,
        }
    }

    /// Next target up the chain; `None` past the root or for unknown classes
    pub fn parent(&self, classes: &ClassRegistry) -> Option<Target<'a>> {
        match self {
            Target::Instance(obj) => {
                let id = obj.class().id;
                classes.get_class(id).map(|_| Target::Prototype(id))
            }
            Target::Prototype(id) => classes.parent_of(*id).map(Target::Prototype),
            Target::Class(id) => classes.parent_of(*id).map(Target::Class),
        }
    }

    /// This target followed by every ancestor, most derived first
    pub fn chain(self, classes: &'a ClassRegistry) -> impl Iterator<Item = Target<'a>> + 'a {
        std::iter::successors(Some(self), move |target| target.parent(classes))
    }

    /// Name of the class the target belongs to
    pub fn type_name<'r>(&self, classes: &'r ClassRegistry) -> Option<&'r str>
    where
        'a: 'r,
    {
        match self {
            Target::Instance(obj) => Some(&*obj.class().name),
            Target::Class(id) | Target::Prototype(id) => {
                classes.get_class(*id).map(|class| class.name.as_str())
            }
        }
    }
}

impl<'a> From<&'a ObjectValue> for Target<'a> {
    fn from(obj: &'a ObjectValue) -> Self {
        Target::Instance(obj)
    }
}

impl From<Target<'_>> for TargetKey {
    fn from(target: Target<'_>) -> Self {
        target.key()
    }
}

impl From<&ObjectValue> for TargetKey {
    fn from(obj: &ObjectValue) -> Self {
        TargetKey::Instance(obj.id())
    }
}
