// Shared fixtures for crosswalk integration tests
#![allow(dead_code)]

use symbol_crosswalk::host::{HostClass, HostEnum, StaticHostRegistry};
use symbol_crosswalk::model::TypeReference;
use symbol_crosswalk::reflection::{
    LiteralField, ModuleManifest, ReflectedEnumValue, ReflectedMethod, ReflectedParameter,
    ReflectedProperty, ReflectedType, METHOD_NAME_TABLE, PROPERTY_NAME_TABLE,
};
use symbol_crosswalk::scanner::{CilBody, InitializerBody, Instruction};

pub const HOST_VERSION: &str = "4.3.stable";

pub fn type_ref(full_name: &str) -> TypeReference {
    TypeReference::from_full_name(full_name)
}

/// Nested name table whose initializer binds each `(logical, field)` pair
/// through the usual `ldstr` / `call op_Implicit` / `stsfld` sequence.
pub fn name_table(table: &str, owner: &str, pairs: &[(&str, &str)]) -> ReflectedType {
    let instructions = pairs
        .iter()
        .flat_map(|(logical, field)| {
            [
                Instruction::LoadString((*logical).to_string()),
                Instruction::Other(0x28),
                Instruction::StoreStaticField((*field).to_string()),
            ]
        })
        .chain(std::iter::once(Instruction::Other(0x2A)))
        .collect();

    ReflectedType {
        name: table.to_string(),
        namespace: "Godot".to_string(),
        declaring_type: Some(owner.to_string()),
        is_static: true,
        static_initializer: Some(InitializerBody::Instructions(instructions)),
        ..Default::default()
    }
}

/// Same table, but as raw CIL bytes with token tables.
pub fn cil_name_table(table: &str, owner: &str, pairs: &[(&str, &str)]) -> ReflectedType {
    let mut body = CilBody::default();
    for (i, (logical, field)) in pairs.iter().enumerate() {
        let string_token = 0x7000_0001 + i as u32;
        let field_token = 0x0400_0001 + i as u32;
        body.code.push(0x72);
        body.code.extend_from_slice(&string_token.to_le_bytes());
        body.code.push(0x28);
        body.code.extend_from_slice(&0x0A00_0010u32.to_le_bytes());
        body.code.push(0x80);
        body.code.extend_from_slice(&field_token.to_le_bytes());
        body = body
            .with_user_string(string_token, *logical)
            .with_field(field_token, *field);
    }
    body.code.push(0x2A);

    ReflectedType {
        static_initializer: Some(InitializerBody::Cil(body)),
        ..name_table(table, owner, &[])
    }
}

pub fn static_method(name: &str, ret: &str, params: &[(&str, &str)]) -> ReflectedMethod {
    ReflectedMethod {
        name: name.to_string(),
        return_type: type_ref(ret),
        is_static: true,
        parameters: params
            .iter()
            .enumerate()
            .map(|(position, (pname, ptype))| ReflectedParameter {
                name: (*pname).to_string(),
                position,
                parameter_type: type_ref(ptype),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

pub fn literal(name: &str, value: i64) -> LiteralField {
    LiteralField {
        name: name.to_string(),
        field_type: type_ref("System.Int64"),
        value: value.to_string(),
    }
}

/// `Godot.Mathf` with one scanned `abs` overload taking a double.
pub fn mathf() -> ReflectedType {
    ReflectedType {
        name: "Mathf".to_string(),
        namespace: "Godot".to_string(),
        is_static: true,
        methods: vec![
            static_method("Abs", "System.Double", &[("s", "System.Double")]),
            static_method("Floor", "System.Double", &[("s", "System.Double")]),
        ],
        nested_types: vec![name_table(
            METHOD_NAME_TABLE,
            "Godot.Mathf",
            &[("abs", "Abs"), ("floor", "Floor")],
        )],
        ..Default::default()
    }
}

/// `Godot.Node` with a `ProcessModeEnum` nested enum and `literal_count`
/// public literal fields.
pub fn node(literal_count: usize) -> ReflectedType {
    let process_mode = ReflectedType {
        name: "ProcessModeEnum".to_string(),
        namespace: "Godot".to_string(),
        declaring_type: Some("Godot.Node".to_string()),
        is_enum: true,
        enum_values: ["Inherit", "Pausable", "WhenPaused", "Always", "Disabled"]
            .iter()
            .enumerate()
            .map(|(i, name)| ReflectedEnumValue {
                name: (*name).to_string(),
                value: i as i64,
            })
            .collect(),
        ..Default::default()
    };

    ReflectedType {
        name: "Node".to_string(),
        namespace: "Godot".to_string(),
        base_type: Some("Godot.GodotObject".to_string()),
        methods: vec![
            ReflectedMethod {
                name: "AddChild".to_string(),
                return_type: type_ref("System.Void"),
                parameters: vec![ReflectedParameter {
                    name: "node".to_string(),
                    position: 0,
                    parameter_type: type_ref("Godot.Node"),
                    ..Default::default()
                }],
                ..Default::default()
            },
            ReflectedMethod {
                name: "QueueFree".to_string(),
                return_type: type_ref("System.Void"),
                ..Default::default()
            },
        ],
        properties: vec![ReflectedProperty {
            name: "Name".to_string(),
            property_type: type_ref("Godot.StringName"),
            can_read: true,
            can_write: true,
            is_static: false,
        }],
        literal_fields: (0..literal_count)
            .map(|i| literal(&format!("Notification{i}"), i as i64))
            .collect(),
        nested_types: vec![
            cil_name_table(
                METHOD_NAME_TABLE,
                "Godot.Node",
                &[("add_child", "AddChild"), ("queue_free", "QueueFree")],
            ),
            name_table(PROPERTY_NAME_TABLE, "Godot.Node", &[("name", "Name")]),
            process_mode,
        ],
        ..Default::default()
    }
}

pub fn node_constant_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("NOTIFICATION_{i}")).collect()
}

pub fn process_mode_constants() -> Vec<String> {
    [
        "PROCESS_MODE_INHERIT",
        "PROCESS_MODE_PAUSABLE",
        "PROCESS_MODE_WHEN_PAUSED",
        "PROCESS_MODE_ALWAYS",
        "PROCESS_MODE_DISABLED",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Host that knows `host_constant_count` plain integer constants on `Node`,
/// plus the `ProcessMode` enum.
pub fn host(host_constant_count: usize) -> StaticHostRegistry {
    let mut integer_constants = node_constant_names(host_constant_count);
    integer_constants.extend(process_mode_constants());

    StaticHostRegistry::new(HOST_VERSION)
        .with_class(
            "Node",
            HostClass {
                enums: vec![HostEnum {
                    name: "ProcessMode".to_string(),
                    constants: process_mode_constants(),
                }],
                integer_constants,
                methods: vec!["add_child".to_string(), "queue_free".to_string()],
            },
        )
        .with_class(
            "Mathf",
            HostClass {
                methods: vec!["abs".to_string(), "floor".to_string()],
                ..Default::default()
            },
        )
}

pub fn module(types: Vec<ReflectedType>) -> ModuleManifest {
    ModuleManifest {
        assembly_name: "GodotSharp".to_string(),
        host_version: Some(HOST_VERSION.to_string()),
        types,
    }
}
