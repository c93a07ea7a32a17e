//! Knobs the projectors read. The CLI fills these from configuration.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::extensions::RequirednessPolicy;

/// Table projector settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Column names that get a `UNIQUE` constraint.
    pub unique_columns: BTreeSet<String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            unique_columns: ["username", "email"].into_iter().map(String::from).collect(),
        }
    }
}

/// DDL projector settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdlOptions {
    pub database_name: String,
    pub extensions: Vec<String>,
    pub timestamp_trigger: bool,
}

impl Default for DdlOptions {
    fn default() -> Self {
        Self {
            database_name: "app".into(),
            extensions: vec!["uuid-ossp".into()],
            timestamp_trigger: false,
        }
    }
}

/// Server (Spring) projector settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOptions {
    pub base_package: String,
    pub controller_package: String,
    pub dto_package: String,
    pub enum_package: String,
    /// Package holding the `@UnitCheck*` annotation types.
    pub validation_package: String,
    /// Emit bean-validation annotations on fields without custom rules.
    pub validation_annotations: bool,
    /// Per-API `base_package` overrides.
    pub api_base_packages: BTreeMap<String, String>,
}

impl ServerOptions {
    pub fn base_package_for(&self, api_name: &str) -> &str {
        self.api_base_packages
            .get(api_name)
            .map_or(self.base_package.as_str(), String::as_str)
    }

    pub fn controller_package_for(&self, api_name: &str) -> String {
        join_package(self.base_package_for(api_name), &self.controller_package)
    }

    pub fn dto_package_for(&self, api_name: &str) -> String {
        join_package(self.base_package_for(api_name), &self.dto_package)
    }

    pub fn enum_package_for(&self, api_name: &str) -> String {
        join_package(self.base_package_for(api_name), &self.enum_package)
    }
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            base_package: "com.example.api".into(),
            controller_package: "controller".into(),
            dto_package: "dto".into(),
            enum_package: "enums".into(),
            validation_package: "com.example.validation".into(),
            validation_annotations: true,
            api_base_packages: BTreeMap::new(),
        }
    }
}

/// Client (Angular) projector settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub api_base_url: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".into(),
        }
    }
}

/// Everything the domain layer needs for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionOptions {
    pub requiredness: RequirednessPolicy,
    pub table: TableOptions,
    pub ddl: DdlOptions,
    pub server: ServerOptions,
    pub client: ClientOptions,
}

fn join_package(base: &str, sub: &str) -> String {
    match (base.is_empty(), sub.is_empty()) {
        (true, _) => sub.to_owned(),
        (_, true) => base.to_owned(),
        _ => format!("{base}.{sub}"),
    }
}
