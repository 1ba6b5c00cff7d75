use crate::model::{GlobalData, TypeDescriptor};

/// Copy a global-scope provider's members into the receiver-less bucket.
/// Method lists are appended onto any existing overload set; the other
/// collections are keyed and replace.
pub(crate) fn promote(global: &mut GlobalData, descriptor: &TypeDescriptor) {
    for (name, overloads) in &descriptor.methods {
        global.append_methods(name, overloads);
    }
    for (name, property) in &descriptor.properties {
        global.properties.insert(name.clone(), property.clone());
    }
    for (name, constant) in &descriptor.constants {
        global.constants.insert(name.clone(), constant.clone());
    }
    for (name, enum_descriptor) in &descriptor.enums {
        global
            .enums
            .entry(name.clone())
            .or_default()
            .push(enum_descriptor.clone());
    }
}
