use serde::Deserialize;

use super::managererror::ManagerError;

/// The `name` every configured object carries.
#[derive(Clone, Debug, Deserialize)]
pub struct NamedJsonObject {
    name: String
}

impl NamedJsonObject {
    /// Reads only the name, leaving the rest of the object to its loader.
    pub fn from_json(json_value: &serde_json::Value) -> Result<NamedJsonObject, ManagerError> {
        Ok(NamedJsonObject::deserialize(json_value)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
