//! Crosswalk resolver.
//!
//! For one compiled type, combines three sources into a [`TypeDescriptor`]:
//!
//! 1. name-table bindings recovered by a [`BindingScanner`] (methods,
//!    properties, signals),
//! 2. the host registry's enum and integer-constant lists,
//! 3. the type's reflected members for binary-side shape.
//!
//! Anything that cannot be reconciled is recorded in the
//! [`UnresolvedTracker`] and left out of the descriptor; resolution itself
//! never fails.

mod constants;
mod enums;
mod global_scope;
mod members;

use crate::config::ExtractionConfig;
use crate::host::HostRegistry;
use crate::model::{Registry, TypeDescriptor};
use crate::observability::{set_current_type, set_phase, PipelinePhase};
use crate::reflection::{
    ReflectedType, METHOD_NAME_TABLE, PROPERTY_NAME_TABLE, SIGNAL_NAME_TABLE,
};
use crate::scanner::{BindingScanner, LiteralStoreScanner, NameBinding};
use crate::unresolved::UnresolvedTracker;
use std::collections::HashMap;
use tracing::{debug, warn};

pub struct CrosswalkResolver<'a, S = LiteralStoreScanner> {
    host: &'a dyn HostRegistry,
    config: &'a ExtractionConfig,
    scanner: S,
    /// Binary full name -> logical name, for types that own nested enums
    owner_names: HashMap<String, String>,
}

impl<'a> CrosswalkResolver<'a, LiteralStoreScanner> {
    pub fn new(host: &'a dyn HostRegistry, config: &'a ExtractionConfig) -> Self {
        Self::with_scanner(host, config, LiteralStoreScanner)
    }
}

impl<'a, S: BindingScanner> CrosswalkResolver<'a, S> {
    pub fn with_scanner(
        host: &'a dyn HostRegistry,
        config: &'a ExtractionConfig,
        scanner: S,
    ) -> Self {
        Self {
            host,
            config,
            scanner,
            owner_names: HashMap::new(),
        }
    }

    /// Logical names of potential declaring types, keyed by binary full name.
    pub fn with_owner_names(mut self, owner_names: HashMap<String, String>) -> Self {
        self.owner_names = owner_names;
        self
    }

    /// Crosswalk one compiled type.
    pub fn resolve_type(
        &self,
        ty: &ReflectedType,
        logical_name: &str,
        unresolved: &mut UnresolvedTracker,
    ) -> TypeDescriptor {
        let _ty = set_current_type(ty.full_name());

        let mut descriptor = TypeDescriptor {
            logical_name: logical_name.to_string(),
            binary_name: ty.name.clone(),
            namespace: ty.namespace.clone(),
            declaring_type: ty.declaring_type.clone(),
            base_type: ty.base_type.clone(),
            is_enum: ty.is_enum,
            is_static: ty.is_static,
            is_builtin_value_type: ty.is_value_type && !ty.is_enum,
            ..Default::default()
        };

        if ty.is_enum {
            let owner = ty
                .declaring_type
                .as_deref()
                .map(|outer| self.owner_logical_name(outer));
            let owner_resolved = ty
                .declaring_type
                .as_deref()
                .is_some_and(|outer| self.owner_names.contains_key(outer));
            let host_enum_name = self.host_enum_name(&ty.name);
            descriptor.constants = constants::enum_type_constants(
                self.host,
                ty,
                owner,
                owner_resolved,
                host_enum_name,
                logical_name,
                unresolved,
            );
            return descriptor;
        }

        let method_bindings = self.bindings(ty, METHOD_NAME_TABLE);
        let property_bindings = self.bindings(ty, PROPERTY_NAME_TABLE);
        let signal_bindings = self.bindings(ty, SIGNAL_NAME_TABLE);

        descriptor.methods = members::resolve_methods(ty, &method_bindings);
        descriptor.properties = members::resolve_properties(ty, &property_bindings);
        descriptor.signals = members::resolve_signals(ty, &signal_bindings);
        descriptor.enums =
            enums::resolve_enums(self.host, self.config, ty, logical_name, unresolved);
        descriptor.constants =
            constants::resolve_constants(self.host, ty, logical_name, unresolved);

        debug!(
            ty = %ty.full_name(),
            methods = descriptor.method_count(),
            properties = descriptor.properties.len(),
            signals = descriptor.signals.len(),
            enums = descriptor.enums.len(),
            constants = descriptor.constants.len(),
            "Resolved type"
        );

        descriptor
    }

    /// Resolve, promote into the global bucket when the type is a
    /// global-scope provider, and insert into `registry`.
    pub fn resolve_into(
        &self,
        ty: &ReflectedType,
        logical_name: &str,
        registry: &mut Registry,
        unresolved: &mut UnresolvedTracker,
    ) -> bool {
        let descriptor = self.resolve_type(ty, logical_name, unresolved);
        if self.config.is_global_scope_provider(&ty.name) {
            debug!(ty = %ty.full_name(), "Promoting global-scope provider");
            global_scope::promote(&mut registry.global, &descriptor);
        }
        registry.insert_type(descriptor)
    }

    /// Bindings from one nested name table. A missing table or initializer
    /// yields nothing; a body that fails to decode is logged and skipped.
    pub fn bindings(&self, ty: &ReflectedType, table: &str) -> Vec<NameBinding> {
        let Some(body) = ty
            .nested_type(table)
            .and_then(|t| t.static_initializer.as_ref())
        else {
            return Vec::new();
        };

        let _phase = set_phase(PipelinePhase::Scanning);
        match self.scanner.scan(body) {
            Ok(bindings) => bindings,
            Err(e) => {
                warn!(ty = %ty.full_name(), table, error = %e, "Failed to scan name table");
                Vec::new()
            }
        }
    }

    fn owner_logical_name<'n>(&'n self, outer_full_name: &'n str) -> &'n str {
        self.owner_names
            .get(outer_full_name)
            .map(String::as_str)
            .unwrap_or_else(|| {
                let simple = outer_full_name
                    .rsplit(['.', '+'])
                    .next()
                    .unwrap_or(outer_full_name);
                simple
            })
    }

    /// `ProcessModeEnum` -> `ProcessMode`
    fn host_enum_name<'n>(&self, binary_name: &'n str) -> &'n str {
        binary_name
            .strip_suffix(self.config.enum_suffix.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(binary_name)
    }
}
