//! Class registry
//!
//! Arena of class descriptors with explicit parent pointers. The root
//! class (`Object` unless renamed) is registered at [`ClassId::OBJECT`] on creation, and
//! every other class names an already registered parent, so every chain
//! is finite and ends at the root.

use rustc_hash::FxHashMap;

use metareflect_value::{ClassId, ClassRef, FunctionRef, ObjectValue, Value};

use crate::defaults::ROOT_TYPE_NAME;
use crate::error::{ReflectError, Result};

/// Kind of a declared class member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Data property
    Property,
    /// Method
    Method,
}

/// A registered class
#[derive(Debug, Clone)]
pub struct Class {
    /// Class ID (position in the registry)
    pub id: ClassId,
    /// Class name
    pub name: String,
    /// Parent class ID (None only for the root)
    pub parent_id: Option<ClassId>,
    /// Instance properties, in declaration order
    pub properties: Vec<String>,
    /// Instance methods, in declaration order
    pub methods: Vec<String>,
    /// Static properties, in declaration order
    pub static_properties: Vec<String>,
    /// Static methods, in declaration order
    pub static_methods: Vec<String>,
}

impl Class {
    fn new(id: ClassId, name: String, parent_id: Option<ClassId>) -> Self {
        Self {
            id,
            name,
            parent_id,
            properties: Vec::new(),
            methods: Vec::new(),
            static_properties: Vec::new(),
            static_methods: Vec::new(),
        }
    }

    /// Reference used by values of this class
    pub fn class_ref(&self) -> ClassRef {
        ClassRef::new(self.id, self.name.as_str())
    }

    /// Whether this is the root class
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether a member with this name is declared on this class
    pub fn has_member(&self, name: &str, is_static: bool) -> bool {
        let (properties, methods) = if is_static {
            (&self.static_properties, &self.static_methods)
        } else {
            (&self.properties, &self.methods)
        };
        properties.iter().chain(methods).any(|m| m == name)
    }
}

/// Registry of classes indexed by ID and name
#[derive(Debug, Clone)]
pub struct ClassRegistry {
    /// Classes indexed by ID
    classes: Vec<Class>,
    /// Class name to ID mapping
    name_to_id: FxHashMap<String, ClassId>,
}

impl ClassRegistry {
    /// Create a registry holding only the root class
    pub fn new() -> Self {
        Self::with_root(ROOT_TYPE_NAME)
    }

    /// Create a registry whose root class is called `root_name`
    pub fn with_root(root_name: &str) -> Self {
        let root = Class::new(ClassId::OBJECT, root_name.to_string(), None);
        let mut name_to_id = FxHashMap::default();
        name_to_id.insert(root.name.clone(), root.id);
        Self {
            classes: vec![root],
            name_to_id,
        }
    }

    /// Register a new class; a missing parent means the root class
    pub fn register_class(&mut self, name: &str, parent: Option<ClassId>) -> Result<ClassId> {
        if self.name_to_id.contains_key(name) {
            return Err(ReflectError::DuplicateClass {
                name: name.to_string(),
            });
        }
        let parent = parent.unwrap_or(ClassId::OBJECT);
        if self.get_class(parent).is_none() {
            return Err(ReflectError::UnknownClass(parent));
        }

        let id = ClassId(self.classes.len() as u32);
        self.classes.push(Class::new(id, name.to_string(), Some(parent)));
        self.name_to_id.insert(name.to_string(), id);
        Ok(id)
    }

    /// Declare a member on a registered class
    pub fn add_member(
        &mut self,
        class: ClassId,
        name: &str,
        kind: MemberKind,
        is_static: bool,
    ) -> Result<()> {
        let entry = self
            .classes
            .get_mut(class.index())
            .ok_or(ReflectError::UnknownClass(class))?;
        if entry.has_member(name, is_static) {
            return Err(ReflectError::DuplicateMember {
                class: entry.name.clone(),
                member: name.to_string(),
            });
        }
        let list = match (kind, is_static) {
            (MemberKind::Property, false) => &mut entry.properties,
            (MemberKind::Method, false) => &mut entry.methods,
            (MemberKind::Property, true) => &mut entry.static_properties,
            (MemberKind::Method, true) => &mut entry.static_methods,
        };
        list.push(name.to_string());
        Ok(())
    }

    /// Get class by ID
    pub fn get_class(&self, id: ClassId) -> Option<&Class> {
        self.classes.get(id.index())
    }

    /// Get class by name
    pub fn get_class_by_name(&self, name: &str) -> Option<&Class> {
        self.name_to_id
            .get(name)
            .and_then(|id| self.classes.get(id.index()))
    }

    /// The root class
    pub fn root(&self) -> &Class {
        &self.classes[ClassId::OBJECT.index()]
    }

    /// Parent of a class; None for the root or an unknown id
    pub fn parent_of(&self, id: ClassId) -> Option<ClassId> {
        self.get_class(id).and_then(|c| c.parent_id)
    }

    /// The class followed by each of its ancestors, ending at the root
    pub fn ancestors(&self, id: ClassId) -> impl Iterator<Item = &Class> + '_ {
        std::iter::successors(self.get_class(id), move |class| {
            class.parent_id.and_then(|parent| self.get_class(parent))
        })
    }

    /// Check if a class is a subclass of (or the same as) another class
    pub fn is_subclass_of(&self, sub: ClassId, sup: ClassId) -> bool {
        self.ancestors(sub).any(|class| class.id == sup)
    }

    /// Reference used by values of a class
    pub fn class_ref(&self, id: ClassId) -> Option<ClassRef> {
        self.get_class(id).map(Class::class_ref)
    }

    /// Constructor function of a class
    pub fn constructor_ref(&self, id: ClassId) -> Option<FunctionRef> {
        self.class_ref(id).map(|class| FunctionRef::constructor(&class))
    }

    /// Create an instance whose own fields are every instance property
    /// along the chain, base class first, all `undefined`
    pub fn instantiate(&self, id: ClassId) -> Result<ObjectValue> {
        let class = self.get_class(id).ok_or(ReflectError::UnknownClass(id))?;
        let lineage: Vec<&Class> = self.ancestors(id).collect();

        let mut instance = ObjectValue::new(class.class_ref());
        for ancestor in lineage.iter().rev() {
            for property in &ancestor.properties {
                instance.set(property.as_str(), Value::Undefined);
            }
        }
        Ok(instance)
    }

    /// Number of registered classes, root included
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Always false: the root class is registered on creation
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterate over all classes
    pub fn iter(&self) -> impl Iterator<Item = &Class> {
        self.classes.iter()
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_levels() -> (ClassRegistry, ClassId, ClassId, ClassId) {
        let mut registry = ClassRegistry::new();
        let gp = registry.register_class("GrandParent", None).unwrap();
        let parent = registry.register_class("Parent", Some(gp)).unwrap();
        let child = registry.register_class("Child", Some(parent)).unwrap();
        (registry, gp, parent, child)
    }

    #[test]
    fn test_root_registered() {
        let registry = ClassRegistry::new();
        assert_eq!(registry.len(), 1);
        assert!(registry.root().is_root());
        assert_eq!(registry.root().name, "Object");
        assert_eq!(
            registry.get_class_by_name("Object").map(|c| c.id),
            Some(ClassId::OBJECT)
        );
    }

    #[test]
    fn test_renamed_root() {
        let mut registry = ClassRegistry::with_root("Base");
        assert_eq!(registry.root().name, "Base");
        assert_eq!(registry.get_class_by_name("Base").map(|c| c.id), Some(ClassId::OBJECT));
        assert!(matches!(
            registry.register_class("Base", None),
            Err(ReflectError::DuplicateClass { .. })
        ));
        let model = registry.register_class("Model", None).unwrap();
        assert_eq!(registry.parent_of(model), Some(ClassId::OBJECT));
    }

    #[test]
    fn test_register_and_lookup() {
        let (registry, gp, parent, child) = three_levels();
        assert_eq!(registry.parent_of(child), Some(parent));
        assert_eq!(registry.parent_of(gp), Some(ClassId::OBJECT));
        assert_eq!(registry.parent_of(ClassId::OBJECT), None);
        assert_eq!(registry.get_class_by_name("Parent").map(|c| c.id), Some(parent));
    }

    #[test]
    fn test_duplicate_and_unknown() {
        let (mut registry, gp, _, _) = three_levels();
        assert!(matches!(
            registry.register_class("GrandParent", None),
            Err(ReflectError::DuplicateClass { .. })
        ));
        assert!(matches!(
            registry.register_class("Orphan", Some(ClassId(99))),
            Err(ReflectError::UnknownClass(ClassId(99)))
        ));
        registry.add_member(gp, "prop", MemberKind::Property, false).unwrap();
        assert!(matches!(
            registry.add_member(gp, "prop", MemberKind::Method, false),
            Err(ReflectError::DuplicateMember { .. })
        ));
        // Same name on the static side is a different member
        assert!(registry.add_member(gp, "prop", MemberKind::Property, true).is_ok());
    }

    #[test]
    fn test_ancestors_and_subclass() {
        let (registry, gp, parent, child) = three_levels();
        let names: Vec<&str> = registry.ancestors(child).map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Child", "Parent", "GrandParent", "Object"]);

        assert!(registry.is_subclass_of(child, gp));
        assert!(registry.is_subclass_of(child, child));
        assert!(registry.is_subclass_of(parent, ClassId::OBJECT));
        assert!(!registry.is_subclass_of(gp, child));
    }

    #[test]
    fn test_instantiate_base_fields_first() {
        let (mut registry, gp, parent, child) = three_levels();
        registry.add_member(gp, "prop1", MemberKind::Property, false).unwrap();
        registry.add_member(gp, "prop0", MemberKind::Property, false).unwrap();
        registry.add_member(parent, "prop2", MemberKind::Property, false).unwrap();
        registry.add_member(child, "prop3", MemberKind::Property, false).unwrap();
        registry.add_member(child, "prop0", MemberKind::Property, false).unwrap();
        registry.add_member(child, "run", MemberKind::Method, false).unwrap();

        let instance = registry.instantiate(child).unwrap();
        let fields: Vec<&str> = instance.field_names().collect();
        assert_eq!(fields, vec!["prop1", "prop0", "prop2", "prop3"]);
        assert_eq!(instance.class().name.as_ref(), "Child");
    }

    #[test]
    fn test_constructor_ref_identity() {
        let (registry, gp, _, child) = three_levels();
        assert_eq!(registry.constructor_ref(child), registry.constructor_ref(child));
        assert_ne!(registry.constructor_ref(child), registry.constructor_ref(gp));
        assert_eq!(registry.constructor_ref(child).unwrap().name(), "Child");
    }
}
