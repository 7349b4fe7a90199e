use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Option schema the server publishes for each destination and data source
/// type, naming the fields the type accepts.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ConfigurationSchema {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertySchema>,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub secret: Vec<String>,
    #[serde(default)]
    pub order: Vec<String>,
    #[serde(default)]
    pub extra_options: Vec<String>,
}

impl ConfigurationSchema {
    pub fn is_required(&self, field: &str) -> bool {
        self.required.iter().any(|name| name == field)
    }

    /// Secret fields are write-only; the server redacts them in responses.
    pub fn is_secret(&self, field: &str) -> bool {
        self.secret.iter().any(|name| name == field)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct PropertySchema {
    /// JSON kind of the field value. Redash uses "string", "number" and
    /// "boolean".
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub default: Option<Value>,
}
