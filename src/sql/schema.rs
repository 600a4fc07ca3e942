//! Table definitions collected from entities, rendered to CREATE/DROP statements per dialect.
//! Tables are kept in registration order so foreign keys always point at an earlier table.

use super::dialect::{quoted, Dialect};
use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    /// Auto-assigned 64-bit primary key.
    Serial,
    BigInt,
    Varchar(u32),
    Text,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
    pub unique: bool,
    /// (table, column) this column points at.
    pub references: Option<(&'static str, &'static str)>,
}

impl ColumnDef {
    pub fn new(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            nullable: false,
            unique: false,
            references: None,
        }
    }

    pub fn serial(name: &'static str) -> Self {
        Self::new(name, ColumnType::Serial)
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn references(mut self, table: &'static str, column: &'static str) -> Self {
        self.references = Some((table, column));
        self
    }

    fn render(&self, dialect: Dialect) -> String {
        let ty = match self.ty {
            ColumnType::Serial => return format!("{} {}", quoted(self.name), dialect.serial_primary_key()),
            ColumnType::BigInt => dialect.bigint().to_string(),
            ColumnType::Varchar(n) => format!("VARCHAR({})", n),
            ColumnType::Text => "TEXT".to_string(),
        };
        let mut def = format!("{} {}", quoted(self.name), ty);
        if !self.nullable {
            def.push_str(" NOT NULL");
        }
        if self.unique {
            def.push_str(" UNIQUE");
        }
        if let Some((table, column)) = self.references {
            def.push_str(&format!(" REFERENCES {} ({})", quoted(table), quoted(column)));
        }
        def
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: Vec<ColumnDef>,
}

impl TableDef {
    pub fn new(name: &'static str, columns: Vec<ColumnDef>) -> Self {
        Self { name, columns }
    }

    pub fn create_sql(&self, dialect: Dialect) -> String {
        let cols: Vec<String> = self.columns.iter().map(|c| c.render(dialect)).collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
            quoted(self.name),
            cols.join(",\n  ")
        )
    }

    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {}", quoted(self.name))
    }
}

/// Record types the store knows about. Implemented by every persisted model.
pub trait Entity {
    const TABLE: &'static str;

    fn table() -> TableDef;
}

/// Ordered set of table definitions. Built once (define), then handed to the
/// persistence and migration bindings (bind).
#[derive(Clone, Debug, Default)]
pub struct Schema {
    tables: Vec<TableDef>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<E: Entity>(self) -> Result<Self, ConfigError> {
        self.with_table(E::table())
    }

    pub fn with_table(mut self, table: TableDef) -> Result<Self, ConfigError> {
        if self.table(table.name).is_some() {
            return Err(ConfigError::DuplicateTable(table.name.to_string()));
        }
        for col in &table.columns {
            if let Some((target, target_col)) = col.references {
                let known = self
                    .table(target)
                    .map(|t| t.columns.iter().any(|c| c.name == target_col))
                    .unwrap_or(false);
                if !known {
                    return Err(ConfigError::MissingReference {
                        kind: "table",
                        id: format!("{}.{}", target, target_col),
                    });
                }
            }
        }
        self.tables.push(table);
        Ok(self)
    }

    pub fn tables(&self) -> &[TableDef] {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&TableDef> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// CREATE statements in dependency order.
    pub fn create_statements(&self, dialect: Dialect) -> Vec<String> {
        self.tables.iter().map(|t| t.create_sql(dialect)).collect()
    }

    /// DROP statements, dependents first.
    pub fn drop_statements(&self) -> Vec<String> {
        self.tables.iter().rev().map(|t| t.drop_sql()).collect()
    }
}
