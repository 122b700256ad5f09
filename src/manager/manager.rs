use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;

use super::managererror::{ManagerError, parse_json_value};

/// Named objects collected while loading, looked up by entries that
/// depend on earlier ones.
pub struct ManagerBuilder<V> {
    map: HashMap<String, V>
}

impl<V: Clone> ManagerBuilder<V> {
    pub fn new() -> ManagerBuilder<V> {
        ManagerBuilder { map: HashMap::new() }
    }

    pub fn insert(&mut self, name: String, value: V) {
        self.map.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Result<V, ManagerError> {
        self.map
            .get(name)
            .cloned()
            .ok_or_else(|| ManagerError::map_elem_not_found(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn build(self) -> Manager<V> {
        Manager { map: self.map }
    }
}

impl<V: Clone> Default for ManagerBuilder<V> {
    fn default() -> Self {
        ManagerBuilder::new()
    }
}

/// Read-only registry of loaded objects. `get` hands out clones, so
/// callers may mutate what they get without affecting the registry.
#[derive(Clone, Debug)]
pub struct Manager<V> {
    map: HashMap<String, V>
}

impl<V: Clone> Manager<V> {
    pub fn get(&self, name: &str) -> Result<V, ManagerError> {
        self.map
            .get(name)
            .cloned()
            .ok_or_else(|| ManagerError::map_elem_not_found(name))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.map.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Loads named objects of type `V` from JSON. `S` is whatever the loader
/// needs besides the JSON itself.
pub trait IManager<V: Clone, S> {

    fn insert_obj_from_json(
        &self,
        builder: &mut ManagerBuilder<V>,
        json_value: serde_json::Value,
        supports: &S
    ) -> Result<(), ManagerError>;

    fn insert_obj_from_json_vec(
        &self,
        builder: &mut ManagerBuilder<V>,
        json_vec: &[serde_json::Value],
        supports: &S
    ) -> Result<(), ManagerError> {
        for json_value in json_vec.iter() {
            self.insert_obj_from_json(builder, json_value.clone(), supports)?;
        }
        Ok(())
    }

    /// An array loads every element, anything else loads as one object.
    fn from_json_value(&self, json_value: serde_json::Value, supports: &S) -> Result<Manager<V>, ManagerError> {
        let mut builder = ManagerBuilder::new();
        if json_value.is_array() {
            let json_array: Vec<serde_json::Value> = parse_json_value(json_value)?;
            self.insert_obj_from_json_vec(&mut builder, &json_array, supports)?;
        } else {
            self.insert_obj_from_json(&mut builder, json_value, supports)?;
        }
        Ok(builder.build())
    }

    fn from_reader<P: AsRef<Path>>(&self, file_path: P, supports: &S) -> Result<Manager<V>, ManagerError> {
        let file = File::open(file_path.as_ref())?;
        let json_value: serde_json::Value = serde_json::from_reader(BufReader::new(file))?;
        let manager = self.from_json_value(json_value, supports)?;
        info!("loaded {} objects from {}", manager.len(), file_path.as_ref().display());
        Ok(manager)
    }
}
