use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Cloud credentials registered with the registry. Immutable once created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub id: String,

    pub name: String,

    /// Provider type (e.g. "openstack", "aws")
    #[serde(rename = "type", default)]
    pub cloud_type: String,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub authentication: Value,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub config: Value,
}

impl Cloud {
    pub fn label(&self) -> String {
        super::menu_label(&self.name, &self.id)
    }
}
