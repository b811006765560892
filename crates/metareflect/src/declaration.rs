//! Class declarations
//!
//! Builders describing a class before it is registered: its parent, its
//! members with their declared types, and the decorators on each. A
//! declaration is consumed by
//! [`ReflectionContext::define_class`](crate::ReflectionContext::define_class).

use metareflect_value::{ClassId, FunctionRef, Value};

use crate::class_registry::{ClassRegistry, MemberKind};
use crate::decorators::Decorator;

/// Declared type of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRef {
    /// A builtin constructor such as `String`
    Builtin(&'static str),
    /// A registered class
    Class(ClassId),
}

impl TypeRef {
    /// `String`
    pub const STRING: TypeRef = TypeRef::Builtin("String");
    /// `Number`
    pub const NUMBER: TypeRef = TypeRef::Builtin("Number");
    /// `Boolean`
    pub const BOOLEAN: TypeRef = TypeRef::Builtin("Boolean");
    /// `Object`, the type of members declared without one
    pub const OBJECT: TypeRef = TypeRef::Builtin("Object");
    /// `Array`
    pub const ARRAY: TypeRef = TypeRef::Builtin("Array");
    /// `Date`
    pub const DATE: TypeRef = TypeRef::Builtin("Date");
    /// `Function`, the type of every method
    pub const FUNCTION: TypeRef = TypeRef::Builtin("Function");

    /// Constructor value stored as the type annotation
    pub fn to_value(self, classes: &ClassRegistry) -> Option<Value> {
        match self {
            TypeRef::Builtin(name) => Some(FunctionRef::builtin(name).into()),
            TypeRef::Class(id) => classes.constructor_ref(id).map(Value::from),
        }
    }
}

/// A declared property or method
pub struct MemberDecl {
    pub(crate) name: String,
    pub(crate) kind: MemberKind,
    pub(crate) is_static: bool,
    pub(crate) declared_type: Option<TypeRef>,
    pub(crate) decorators: Vec<Box<dyn Decorator>>,
}

impl MemberDecl {
    fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_static: false,
            declared_type: None,
            decorators: Vec::new(),
        }
    }

    /// A data property
    pub fn property(name: impl Into<String>) -> Self {
        Self::new(name, MemberKind::Property)
    }

    /// A method
    pub fn method(name: impl Into<String>) -> Self {
        Self::new(name, MemberKind::Method)
    }

    /// Declare on the constructor instead of the prototype
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Set the declared type; ignored for methods, which are always `Function`
    pub fn typed(mut self, ty: TypeRef) -> Self {
        self.declared_type = Some(ty);
        self
    }

    /// Attach a decorator; decorators run in attachment order
    pub fn decorate(mut self, decorator: impl Decorator + 'static) -> Self {
        self.decorators.push(Box::new(decorator));
        self
    }

    /// Member name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type recorded in the type annotation
    pub fn annotation_type(&self) -> TypeRef {
        match self.kind {
            MemberKind::Method => TypeRef::FUNCTION,
            MemberKind::Property => self.declared_type.unwrap_or(TypeRef::OBJECT),
        }
    }
}

impl std::fmt::Debug for MemberDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberDecl")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("is_static", &self.is_static)
            .field("declared_type", &self.declared_type)
            .field("decorators", &self.decorators.len())
            .finish()
    }
}

/// A class waiting to be defined
pub struct ClassDecl {
    pub(crate) name: String,
    pub(crate) parent: Option<ClassId>,
    pub(crate) members: Vec<MemberDecl>,
    pub(crate) decorators: Vec<Box<dyn Decorator>>,
}

impl ClassDecl {
    /// A class extending the root class
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            members: Vec::new(),
            decorators: Vec::new(),
        }
    }

    /// Set the parent class
    pub fn extends(mut self, parent: ClassId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Add a member
    pub fn member(mut self, member: MemberDecl) -> Self {
        self.members.push(member);
        self
    }

    /// Attach a class decorator; applied after every member decorator
    pub fn decorate(mut self, decorator: impl Decorator + 'static) -> Self {
        self.decorators.push(Box::new(decorator));
        self
    }

    /// Class name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for ClassDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassDecl")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("members", &self.members)
            .field("decorators", &self.decorators.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_types() {
        assert_eq!(MemberDecl::property("a").annotation_type(), TypeRef::OBJECT);
        assert_eq!(
            MemberDecl::property("a").typed(TypeRef::STRING).annotation_type(),
            TypeRef::STRING
        );
        assert_eq!(
            MemberDecl::method("m").typed(TypeRef::STRING).annotation_type(),
            TypeRef::FUNCTION
        );
    }

    #[test]
    fn test_type_values() {
        let mut classes = ClassRegistry::new();
        let id = classes.register_class("Model", None).unwrap();

        let string = TypeRef::STRING.to_value(&classes).unwrap();
        assert_eq!(string.as_function().map(|f| f.name()), Some("String"));

        let model = TypeRef::Class(id).to_value(&classes).unwrap();
        assert_eq!(model, Value::from(classes.constructor_ref(id).unwrap()));
        assert!(TypeRef::Class(ClassId(77)).to_value(&classes).is_none());
    }

    #[test]
    fn test_builder() {
        let decl = ClassDecl::new("Child")
            .extends(ClassId(3))
            .member(MemberDecl::property("p").as_static());
        assert_eq!(decl.name(), "Child");
        assert_eq!(decl.parent, Some(ClassId(3)));
        assert!(decl.members[0].is_static);
    }
}
