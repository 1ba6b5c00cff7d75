//! Name conventions on both sides of the crosswalk.
//!
//! Binary names are PascalCase, logical names snake_case (members) or
//! SCREAMING_SNAKE_CASE (constants). Signature types are translated to
//! the names the scripting side uses for them.

use crate::model::TypeReference;

/// `add_child` -> `AddChild`
pub fn to_pascal_case(logical: &str) -> String {
    logical
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// `AddChild` -> `add_child`, `GetRID` -> `get_rid`, `Vector2D` -> `vector2d`
pub fn to_snake_case(binary: &str) -> String {
    let chars: Vec<char> = binary.chars().collect();
    let mut out = String::with_capacity(binary.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                None | Some('_') => false,
                Some(p) if p.is_lowercase() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                Some(_) => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// Logical (scripting) name for a binary signature type.
pub fn logical_type_name(binary: &TypeReference) -> String {
    let logical = match binary.full_name.as_str() {
        "System.Void" => "void",
        "System.Boolean" => "bool",
        "System.SByte" | "System.Byte" | "System.Int16" | "System.UInt16" | "System.Int32"
        | "System.UInt32" | "System.Int64" | "System.UInt64" => "int",
        "System.Single" | "System.Double" => "float",
        "System.String" => "String",
        "System.Object" | "Godot.Variant" => "Variant",
        "Godot.GodotObject" => "Object",
        "Godot.Collections.Array" => "Array",
        "Godot.Collections.Dictionary" => "Dictionary",
        full if full.starts_with("Godot.Collections.Array`") => "Array",
        full if full.starts_with("Godot.Collections.Dictionary`") => "Dictionary",
        full if full.ends_with("[]") => return packed_array_name(binary),
        _ => return binary.name.clone(),
    };
    logical.to_string()
}

fn packed_array_name(binary: &TypeReference) -> String {
    let element = binary.full_name.trim_end_matches("[]");
    match element {
        "System.Byte" => "PackedByteArray",
        "System.Int32" => "PackedInt32Array",
        "System.Int64" => "PackedInt64Array",
        "System.Single" => "PackedFloat32Array",
        "System.Double" => "PackedFloat64Array",
        "System.String" => "PackedStringArray",
        "Godot.Vector2" => "PackedVector2Array",
        "Godot.Vector3" => "PackedVector3Array",
        "Godot.Color" => "PackedColorArray",
        _ => "Array",
    }
    .to_string()
}
