use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::Error;
use crate::client::Client;
use crate::newtypes::{DataSourceId, GroupId};
use crate::schema::ConfigurationSchema;

/// A query backend registered with the server. `options` is free-form
/// because each data source type declares its own fields; they are checked
/// against the server's descriptor before any write.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DataSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DataSourceId>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_queue_name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub groups: BTreeMap<GroupId, bool>,
}

/// Server-side descriptor for a data source type, as returned by
/// `/api/data_sources/types`.
#[derive(Clone, Debug, Deserialize)]
pub struct DataSourceType {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub configuration_schema: ConfigurationSchema,
}

/// Schema violations caught client-side before a payload is submitted.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Required field missing: {0}")]
    MissingRequiredField(String),
    #[error("Invalid field {field:?} for type {kind:?}")]
    UnknownField { field: String, kind: String },
    #[error("Invalid value type for {field:?}: expected {expected}")]
    InvalidFieldType { field: String, expected: String },
    #[error("No type descriptor for {0:?}")]
    UnknownType(String),
}

/// Checks an options map against the schema its type declares.
///
/// Every required field must be present. Fields the schema does not declare
/// fail in strict mode and are dropped with a warning otherwise. Declared
/// fields must hold the JSON kind the schema names for them.
pub fn sanitize_options(
    options: &mut Map<String, Value>,
    kind: &str,
    schema: &ConfigurationSchema,
    strict: bool,
) -> Result<(), Error> {
    for required in &schema.required {
        if !options.contains_key(required) {
            return Err(ValidationError::MissingRequiredField(required.clone()).into());
        }
    }

    let fields: Vec<String> = options.keys().cloned().collect();
    for field in fields {
        let Some(property) = schema.properties.get(&field) else {
            if strict {
                return Err(ValidationError::UnknownField {
                    field,
                    kind: kind.to_string(),
                }
                .into());
            }
            warn!(%field, %kind, "dropping option the type descriptor does not declare");
            options.remove(&field);
            continue;
        };

        let matches = match &options[field.as_str()] {
            Value::Number(_) => property.kind == "number",
            Value::String(_) => property.kind == "string",
            Value::Bool(_) => property.kind == "boolean",
            _ => false,
        };
        if !matches {
            return Err(ValidationError::InvalidFieldType {
                field,
                expected: property.kind.clone(),
            }
            .into());
        }
    }

    Ok(())
}

impl Client {
    pub async fn list_data_sources(&self) -> Result<Vec<DataSource>, Error> {
        self.get_json("/api/data_sources", &[]).await
    }

    pub async fn get_data_source(&self, id: DataSourceId) -> Result<DataSource, Error> {
        self.get_json(&format!("/api/data_sources/{id}"), &[]).await
    }

    /// Lists the data source types the server supports together with the
    /// option schema each one expects.
    pub async fn list_data_source_types(&self) -> Result<Vec<DataSourceType>, Error> {
        self.get_json("/api/data_sources/types", &[]).await
    }

    /// Returns a copy of `data_source` whose options have been checked
    /// against the server's descriptor for its type. Fetches the descriptor
    /// list, so this costs one round trip.
    pub async fn sanitize_data_source_options(
        &self,
        data_source: &DataSource,
    ) -> Result<DataSource, Error> {
        let types = self.list_data_source_types().await?;
        let Some(descriptor) = types.into_iter().find(|t| t.kind == data_source.kind) else {
            return Err(ValidationError::UnknownType(data_source.kind.clone()).into());
        };

        let mut sanitized = data_source.clone();
        sanitize_options(
            &mut sanitized.options,
            &data_source.kind,
            &descriptor.configuration_schema,
            self.is_strict(),
        )?;
        Ok(sanitized)
    }

    /// Sanitizes the payload's options, then submits it.
    pub async fn create_data_source(&self, data_source: &DataSource) -> Result<DataSource, Error> {
        let payload = self.sanitize_data_source_options(data_source).await?;
        self.post_json("/api/data_sources", &payload).await
    }

    /// Sanitizes the payload's options, then submits it.
    pub async fn update_data_source(
        &self,
        id: DataSourceId,
        data_source: &DataSource,
    ) -> Result<DataSource, Error> {
        let payload = self.sanitize_data_source_options(data_source).await?;
        self.post_json(&format!("/api/data_sources/{id}"), &payload)
            .await
    }

    pub async fn delete_data_source(&self, id: DataSourceId) -> Result<(), Error> {
        self.delete(&format!("/api/data_sources/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pg_schema() -> ConfigurationSchema {
        serde_json::from_value(json!({
            "type": "object",
            "properties": {
                "host": {"type": "string"},
                "port": {"type": "number"},
                "user": {"type": "string"},
                "password": {"type": "string"},
                "dbname": {"type": "string", "title": "Database Name"},
                "sslmode": {"type": "string", "title": "SSL Mode", "default": "prefer"},
            },
            "required": ["dbname"],
            "secret": ["password"],
            "order": ["host", "port", "user", "password"],
        }))
        .unwrap()
    }

    fn options(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other:?}"),
        }
    }

    #[test]
    fn accepts_declared_options() {
        let mut opts = options(json!({
            "host": "db.example.com",
            "port": 5432,
            "dbname": "metrics",
        }));
        sanitize_options(&mut opts, "pg", &pg_schema(), true).unwrap();
        assert_eq!(opts.len(), 3);
    }

    #[test]
    fn missing_required_field_fails() {
        let mut opts = options(json!({"host": "db.example.com"}));
        let err = sanitize_options(&mut opts, "pg", &pg_schema(), false).unwrap_err();
        assert!(
            matches!(
                err,
                Error::Validation(ValidationError::MissingRequiredField(ref f)) if f == "dbname"
            ),
            "got {err:?}"
        );
    }

    #[test]
    fn strict_mode_rejects_undeclared_field() {
        let mut opts = options(json!({"dbname": "metrics", "flavor": "spicy"}));
        let err = sanitize_options(&mut opts, "pg", &pg_schema(), true).unwrap_err();
        assert!(
            matches!(
                err,
                Error::Validation(ValidationError::UnknownField { ref field, ref kind })
                    if field == "flavor" && kind == "pg"
            ),
            "got {err:?}"
        );
    }

    #[test]
    fn lenient_mode_drops_undeclared_field() {
        let mut opts = options(json!({"dbname": "metrics", "flavor": "spicy"}));
        sanitize_options(&mut opts, "pg", &pg_schema(), false).unwrap();
        assert!(!opts.contains_key("flavor"));
        assert!(opts.contains_key("dbname"));
    }

    #[test]
    fn declared_field_with_wrong_value_kind_fails() {
        let mut opts = options(json!({"dbname": "metrics", "port": "5432"}));
        let err = sanitize_options(&mut opts, "pg", &pg_schema(), false).unwrap_err();
        assert!(
            matches!(
                err,
                Error::Validation(ValidationError::InvalidFieldType { ref field, ref expected })
                    if field == "port" && expected == "number"
            ),
            "got {err:?}"
        );
    }

    #[test]
    fn non_scalar_value_fails() {
        let mut opts = options(json!({"dbname": "metrics", "host": ["a", "b"]}));
        let err = sanitize_options(&mut opts, "pg", &pg_schema(), false).unwrap_err();
        assert!(
            matches!(
                err,
                Error::Validation(ValidationError::InvalidFieldType { ref field, .. })
                    if field == "host"
            ),
            "got {err:?}"
        );
    }

    #[test]
    fn schema_helpers_reflect_required_and_secret() {
        let schema = pg_schema();
        assert!(schema.is_required("dbname"));
        assert!(!schema.is_required("host"));
        assert!(schema.is_secret("password"));
        assert!(!schema.is_secret("host"));
    }
}
