//! Member enumeration
//!
//! Lists the member names visible on a target. Instances expose their own
//! fields, prototypes their methods, constructors their static members.

use indexmap::IndexSet;

use crate::class_registry::ClassRegistry;
use crate::target::Target;

/// Names declared directly on `target`, in declaration order
pub fn own_member_names(classes: &ClassRegistry, target: Target<'_>) -> Vec<String> {
    match target {
        Target::Instance(obj) => obj.field_names().map(str::to_string).collect(),
        Target::Prototype(id) => classes
            .get_class(id)
            .map(|class| class.methods.clone())
            .unwrap_or_default(),
        Target::Class(id) => classes
            .get_class(id)
            .map(|class| {
                class
                    .static_properties
                    .iter()
                    .chain(&class.static_methods)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default(),
    }
}

/// Member names of `target`, optionally climbing its chain
///
/// Climbing stops before the first ancestor whose type name is `stop_at`,
/// or when the chain ends. Each name appears once, at its first position.
pub fn list_members(
    classes: &ClassRegistry,
    target: Target<'_>,
    climb: bool,
    stop_at: &str,
) -> Vec<String> {
    let mut names = IndexSet::new();
    let mut current = Some(target);

    while let Some(level) = current {
        names.extend(own_member_names(classes, level));
        if !climb {
            break;
        }
        current = level
            .parent(classes)
            .filter(|parent| parent.type_name(classes) != Some(stop_at));
    }

    names.into_iter().collect()
}
