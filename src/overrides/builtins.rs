//! Hand-curated global-scope symbols that extraction cannot recover.
//!
//! Built once per process and never mutated.

use super::builders::{constant, proxy, static_property, EnumBuilder, MethodBuilder};
use super::OverrideSet;
use crate::model::{EnumDescriptor, MethodDescriptor};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

const GD: &str = "Godot.GD";
const MATHF: &str = "Godot.Mathf";

static BUILTIN_OVERRIDES: Lazy<OverrideSet> = Lazy::new(|| OverrideSet {
    enums: group_enums(global_enums()),
    methods: group_methods(global_methods()),
    constants: [
        constant("PI", "Pi", "System.Double", MATHF, "3.141592653589793"),
        constant("TAU", "Tau", "System.Double", MATHF, "6.283185307179586"),
        constant("INF", "Inf", "System.Double", MATHF, "Infinity"),
        constant("NAN", "NaN", "System.Double", MATHF, "NaN"),
    ]
    .into_iter()
    .map(|c| (c.logical_name.clone(), c))
    .collect(),
    global_types: [
        proxy("bool", "System.Boolean"),
        proxy("int", "System.Int64"),
        proxy("float", "System.Double"),
        proxy("String", "System.String"),
        proxy("StringName", "Godot.StringName"),
        proxy("NodePath", "Godot.NodePath"),
        proxy("Vector2", "Godot.Vector2"),
        proxy("Vector2i", "Godot.Vector2I"),
        proxy("Vector3", "Godot.Vector3"),
        proxy("Vector3i", "Godot.Vector3I"),
        proxy("Rect2", "Godot.Rect2"),
        proxy("Transform2D", "Godot.Transform2D"),
        proxy("Color", "Godot.Color"),
        proxy("Callable", "Godot.Callable"),
        proxy("Signal", "Godot.Signal"),
        proxy("Array", "Godot.Collections.Array"),
        proxy("Dictionary", "Godot.Collections.Dictionary"),
        proxy("Variant", "Godot.Variant"),
    ]
    .into_iter()
    .map(|p| (p.logical_name.clone(), p))
    .collect(),
    properties: [static_property(
        "Engine",
        "Singleton",
        "Godot.EngineInstance",
        "Godot.Engine",
    )]
    .into_iter()
    .map(|p| (p.logical_name.clone(), p))
    .collect(),
    builtins: group_methods(language_builtins()),
});

/// The process-wide curated override set.
pub fn builtin_overrides() -> &'static OverrideSet {
    &BUILTIN_OVERRIDES
}

fn global_enums() -> Vec<EnumDescriptor> {
    vec![
        EnumBuilder::new("Error", "Godot.Error")
            .named_value("OK", "Ok", 0)
            .named_value("FAILED", "Failed", 1)
            .prefix("ERR_")
            .value("ERR_UNAVAILABLE", 2)
            .value("ERR_UNCONFIGURED", 3)
            .value("ERR_UNAUTHORIZED", 4)
            .value("ERR_PARAMETER_RANGE_ERROR", 5)
            .value("ERR_OUT_OF_MEMORY", 6)
            .value("ERR_FILE_NOT_FOUND", 7)
            .build(),
        EnumBuilder::new("Side", "Godot.Side")
            .prefix("SIDE_")
            .value("SIDE_LEFT", 0)
            .value("SIDE_TOP", 1)
            .value("SIDE_RIGHT", 2)
            .value("SIDE_BOTTOM", 3)
            .build(),
        EnumBuilder::new("Corner", "Godot.Corner")
            .prefix("CORNER_")
            .value("CORNER_TOP_LEFT", 0)
            .value("CORNER_TOP_RIGHT", 1)
            .value("CORNER_BOTTOM_RIGHT", 2)
            .value("CORNER_BOTTOM_LEFT", 3)
            .build(),
        EnumBuilder::new("Orientation", "Godot.Orientation")
            .value("VERTICAL", 1)
            .value("HORIZONTAL", 0)
            .build(),
        EnumBuilder::new("ClockDirection", "Godot.ClockDirection")
            .value("CLOCKWISE", 0)
            .value("COUNTERCLOCKWISE", 1)
            .build(),
        EnumBuilder::new("HorizontalAlignment", "Godot.HorizontalAlignment")
            .prefix("HORIZONTAL_ALIGNMENT_")
            .value("HORIZONTAL_ALIGNMENT_LEFT", 0)
            .value("HORIZONTAL_ALIGNMENT_CENTER", 1)
            .value("HORIZONTAL_ALIGNMENT_RIGHT", 2)
            .value("HORIZONTAL_ALIGNMENT_FILL", 3)
            .build(),
        EnumBuilder::new("VerticalAlignment", "Godot.VerticalAlignment")
            .prefix("VERTICAL_ALIGNMENT_")
            .value("VERTICAL_ALIGNMENT_TOP", 0)
            .value("VERTICAL_ALIGNMENT_CENTER", 1)
            .value("VERTICAL_ALIGNMENT_BOTTOM", 2)
            .value("VERTICAL_ALIGNMENT_FILL", 3)
            .build(),
        EnumBuilder::new("MouseButtonMask", "Godot.MouseButtonMask")
            .flags()
            .prefix("MOUSE_BUTTON_MASK_")
            .value("MOUSE_BUTTON_MASK_LEFT", 1)
            .value("MOUSE_BUTTON_MASK_RIGHT", 2)
            .value("MOUSE_BUTTON_MASK_MIDDLE", 4)
            .build(),
    ]
}

fn global_methods() -> Vec<MethodDescriptor> {
    vec![
        MethodBuilder::new("abs", MATHF)
            .param("s", "System.Int32")
            .returns("System.Int32")
            .build(),
        MethodBuilder::new("sign", MATHF)
            .param("s", "System.Int32")
            .returns("System.Int32")
            .build(),
        MethodBuilder::new("clamp", MATHF)
            .param("value", "System.Int32")
            .param("min", "System.Int32")
            .param("max", "System.Int32")
            .returns("System.Int32")
            .build(),
        MethodBuilder::new("lerp", MATHF)
            .param("from", "System.Double")
            .param("to", "System.Double")
            .param("weight", "System.Double")
            .returns("System.Double")
            .build(),
        MethodBuilder::new("is_equal_approx", MATHF)
            .param("a", "System.Double")
            .param("b", "System.Double")
            .returns("System.Boolean")
            .build(),
        MethodBuilder::new("print", GD)
            .params_array("what", "System.Object")
            .build(),
        MethodBuilder::new("push_error", GD)
            .param("message", "System.String")
            .build(),
        MethodBuilder::new("push_warning", GD)
            .param("message", "System.String")
            .build(),
        MethodBuilder::new("randi", GD).returns("System.UInt32").build(),
        MethodBuilder::new("randf", GD).returns("System.Single").build(),
        MethodBuilder::named("randf_range", "RandRange", GD)
            .param("from", "System.Double")
            .param("to", "System.Double")
            .returns("System.Double")
            .build(),
        MethodBuilder::named("randi_range", "RandRange", GD)
            .param("from", "System.Int32")
            .param("to", "System.Int32")
            .returns("System.Int32")
            .build(),
        MethodBuilder::for_binary("VarToStr", GD)
            .param("var", "Godot.Variant")
            .returns("System.String")
            .build(),
        MethodBuilder::for_binary("InstanceFromId", GD)
            .param("instanceId", "System.UInt64")
            .returns("Godot.GodotObject")
            .build(),
    ]
}

fn language_builtins() -> Vec<MethodDescriptor> {
    vec![
        MethodBuilder::new("range", GD)
            .param("end", "System.Int32")
            .returns("Godot.Collections.Array")
            .build(),
        MethodBuilder::new("range", GD)
            .param("start", "System.Int32")
            .param("end", "System.Int32")
            .returns("Godot.Collections.Array")
            .build(),
        MethodBuilder::new("range", GD)
            .param("start", "System.Int32")
            .param("end", "System.Int32")
            .param("step", "System.Int32")
            .returns("Godot.Collections.Array")
            .build(),
        MethodBuilder::new("load", GD)
            .param("path", "System.String")
            .returns("Godot.Resource")
            .build(),
        MethodBuilder::named("preload", "Load", GD)
            .param("path", "System.String")
            .returns("Godot.Resource")
            .build(),
        MethodBuilder::named("type_exists", "ClassExists", "Godot.ClassDB")
            .param("class", "Godot.StringName")
            .returns("System.Boolean")
            .build(),
        MethodBuilder::named("assert", "Assert", "System.Diagnostics.Debug")
            .param("condition", "System.Boolean")
            .optional_param("message", "System.String", "\"\"")
            .build(),
    ]
}

fn group_methods(methods: Vec<MethodDescriptor>) -> BTreeMap<String, Vec<MethodDescriptor>> {
    let mut grouped: BTreeMap<String, Vec<MethodDescriptor>> = BTreeMap::new();
    for method in methods {
        grouped
            .entry(method.logical_name.clone())
            .or_default()
            .push(method);
    }
    grouped
}

fn group_enums(enums: Vec<EnumDescriptor>) -> BTreeMap<String, Vec<EnumDescriptor>> {
    let mut grouped: BTreeMap<String, Vec<EnumDescriptor>> = BTreeMap::new();
    for descriptor in enums {
        grouped
            .entry(descriptor.logical_name.clone())
            .or_default()
            .push(descriptor);
    }
    grouped
}
