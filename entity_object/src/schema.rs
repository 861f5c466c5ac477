//! Entity schemas
//!
//! An [`EntitySchema`] is built once per entity type from its declared fields.
//! It settles the primary key, the order of the non-key columns, and the SQL
//! every repository operation on that type runs.

use crate::dialect::Dialect;
use crate::errors::EntityError;
use crate::field::FieldDescriptor;
use crate::validation::Identifier;
use std::collections::HashMap;
use tracing::info;

#[derive(Debug)]
pub struct EntitySchema {
    entity_name: String,
    table_name: String,
    dialect: Dialect,
    primary_key: String,
    fields: Vec<String>,
    descriptors: HashMap<String, FieldDescriptor>,
    columns: HashMap<String, String>,
    attributes_by_column: HashMap<String, String>,
    select_sql: String,
    insert_sql: String,
    update_sql: String,
    delete_sql: String,
    find_by_key_sql: String,
}

impl EntitySchema {
    /// Build the schema from `(attribute, descriptor)` pairs in declaration order
    pub fn build<I, S>(
        entity_name: &str,
        table_name: Option<&str>,
        declared_fields: I,
        dialect: Dialect,
    ) -> Result<Self, EntityError>
    where
        I: IntoIterator<Item = (S, FieldDescriptor)>,
        S: Into<String>,
    {
        let table_name = table_name.unwrap_or(entity_name).to_string();
        info!("Found model: {} (table: {})", entity_name, table_name);

        let table = Identifier::table(&table_name)
            .map_err(|e| EntityError::schema(format!("Invalid mapping for {}: {}", entity_name, e)))?;

        let mut primary_key: Option<String> = None;
        let mut fields = Vec::new();
        let mut descriptors = HashMap::new();
        let mut columns = HashMap::new();
        let mut attributes_by_column = HashMap::new();

        for (attribute, descriptor) in declared_fields {
            let attribute = attribute.into();
            let column = descriptor.column_name(&attribute).to_string();
            info!("  Found mapping: {} ==> {}", attribute, descriptor);

            Identifier::column(&column).map_err(|e| {
                EntityError::schema(format!(
                    "Invalid mapping for {}.{}: {}",
                    entity_name, attribute, e
                ))
            })?;

            if descriptors.contains_key(&attribute) {
                return Err(EntityError::schema(format!(
                    "Duplicate field: {}",
                    attribute
                )));
            }
            if attributes_by_column.contains_key(&column) {
                return Err(EntityError::schema(format!(
                    "Duplicate column name: {}",
                    column
                )));
            }

            if descriptor.is_primary_key() {
                if primary_key.is_some() {
                    return Err(EntityError::schema(format!(
                        "Duplicate primary key for field: {}",
                        attribute
                    )));
                }
                primary_key = Some(attribute.clone());
            } else {
                fields.push(attribute.clone());
            }

            attributes_by_column.insert(column.clone(), attribute.clone());
            columns.insert(attribute.clone(), column);
            descriptors.insert(attribute, descriptor);
        }

        let primary_key =
            primary_key.ok_or_else(|| EntityError::schema("Primary key not found"))?;

        let quote = |attribute: &str| dialect.quote_identifier(&columns[attribute]);
        let quoted_table = table.quoted(dialect);
        let quoted_pk = quote(&primary_key);
        let quoted_fields: Vec<String> = fields.iter().map(|f| quote(f)).collect();

        let select_sql = if quoted_fields.is_empty() {
            format!("select {} from {}", quoted_pk, quoted_table)
        } else {
            format!(
                "select {}, {} from {}",
                quoted_pk,
                quoted_fields.join(", "),
                quoted_table
            )
        };

        let mut insert_columns = quoted_fields.clone();
        insert_columns.push(quoted_pk.clone());
        let insert_sql = format!(
            "insert into {} ({}) values ({})",
            quoted_table,
            insert_columns.join(", "),
            vec!["?"; insert_columns.len()].join(", ")
        );

        let assignments = if quoted_fields.is_empty() {
            format!("{}={}", quoted_pk, quoted_pk)
        } else {
            quoted_fields
                .iter()
                .map(|f| format!("{}=?", f))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let update_sql = format!(
            "update {} set {} where {}=?",
            quoted_table, assignments, quoted_pk
        );

        let delete_sql = format!("delete from {} where {}=?", quoted_table, quoted_pk);
        let find_by_key_sql = format!("{} where {}=?", select_sql, quoted_pk);

        Ok(Self {
            entity_name: entity_name.to_string(),
            table_name: table.as_str().to_string(),
            dialect,
            primary_key,
            fields,
            descriptors,
            columns,
            attributes_by_column,
            select_sql,
            insert_sql,
            update_sql,
            delete_sql,
            find_by_key_sql,
        })
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn quoted_table_name(&self) -> String {
        self.dialect.quote_identifier(&self.table_name)
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Attribute name of the primary key
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Non-key attribute names in declaration order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn descriptor(&self, attribute: &str) -> Option<&FieldDescriptor> {
        self.descriptors.get(attribute)
    }

    pub fn column_for(&self, attribute: &str) -> Option<&str> {
        self.columns.get(attribute).map(String::as_str)
    }

    pub fn attribute_for_column(&self, column: &str) -> Option<&str> {
        self.attributes_by_column.get(column).map(String::as_str)
    }

    /// `select <pk>, <fields...> from <table>`
    pub fn select_sql(&self) -> &str {
        &self.select_sql
    }

    /// Non-key columns first, key last
    pub fn insert_sql(&self) -> &str {
        &self.insert_sql
    }

    pub fn update_sql(&self) -> &str {
        &self.update_sql
    }

    pub fn delete_sql(&self) -> &str {
        &self.delete_sql
    }

    pub fn find_by_key_sql(&self) -> &str {
        &self.find_by_key_sql
    }

    pub fn create_table_sql(&self) -> String {
        let pk_descriptor = &self.descriptors[&self.primary_key];
        let quoted_pk = self.dialect.quote_identifier(&self.columns[&self.primary_key]);

        let mut definitions = vec![format!(
            "{} {} not null",
            quoted_pk,
            self.dialect.column_type(pk_descriptor.sql_type())
        )];
        for attribute in &self.fields {
            definitions.push(format!(
                "{} {}",
                self.dialect.quote_identifier(&self.columns[attribute]),
                self.dialect.column_type(self.descriptors[attribute].sql_type())
            ));
        }
        definitions.push(format!("primary key ({})", quoted_pk));

        format!(
            "create table if not exists {} ({})",
            self.quoted_table_name(),
            definitions.join(", ")
        )
    }

    pub fn drop_table_sql(&self) -> String {
        format!("drop table if exists {}", self.quoted_table_name())
    }
}
