//! Parameter Storage
//!
//! Name/value store behind every configuration block. Values are registered
//! once with defaults, edited at runtime (ground station, scripts), and read
//! back by the typed `*Params::from_store` loaders.

use super::error::ParameterError;
use bitflags::bitflags;
use heapless::index_map::FnvIndexMap;
use heapless::String;

/// Maximum parameter name length (MAVLink limit)
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters
pub const MAX_PARAMS: usize = 32;

bitflags! {
    /// Parameter flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Parameter is hidden from parameter listings
        const HIDDEN = 0b00000001;
        /// Parameter is read-only (cannot be modified at runtime)
        const READ_ONLY = 0b00000010;
    }
}

/// Parameter value types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// Boolean parameter
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit floating point
    Float(f32),
}

impl ParamValue {
    /// Numeric view of the value, booleans map to 0.0 / 1.0
    pub fn as_f32(&self) -> f32 {
        match *self {
            ParamValue::Bool(v) => {
                if v {
                    1.0
                } else {
                    0.0
                }
            }
            ParamValue::Int(v) => v as f32,
            ParamValue::Float(v) => v,
        }
    }

    /// Integer view of the value, floats truncate toward zero
    pub fn as_i32(&self) -> i32 {
        match *self {
            ParamValue::Bool(v) => v as i32,
            ParamValue::Int(v) => v,
            ParamValue::Float(v) => v as i32,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ParamEntry {
    value: ParamValue,
    flags: ParamFlags,
}

/// Parameter store for configuration management
pub struct ParameterStore {
    entries: FnvIndexMap<String<PARAM_NAME_LEN>, ParamEntry, MAX_PARAMS>,
    /// Set on every change, cleared by whoever persists the store
    dirty: bool,
}

fn make_key(name: &str) -> Result<String<PARAM_NAME_LEN>, ParameterError> {
    let mut key = String::new();
    key.push_str(name)
        .map_err(|_| ParameterError::NameTooLong)?;
    Ok(key)
}

impl ParameterStore {
    /// Create a new empty parameter store
    pub fn new() -> Self {
        Self {
            entries: FnvIndexMap::new(),
            dirty: false,
        }
    }

    /// Get parameter value
    pub fn get(&self, name: &str) -> Option<ParamValue> {
        let key = make_key(name).ok()?;
        self.entries.get(&key).map(|entry| entry.value)
    }

    /// Read a numeric parameter, falling back to `default` when missing
    pub fn get_f32(&self, name: &str, default: f32) -> f32 {
        self.get(name).map_or(default, |v| v.as_f32())
    }

    /// Read an integer parameter, falling back to `default` when missing
    pub fn get_i32(&self, name: &str, default: i32) -> i32 {
        self.get(name).map_or(default, |v| v.as_i32())
    }

    /// Set parameter value
    ///
    /// The parameter must already be registered and writable.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = make_key(name)?;
        let entry = self
            .entries
            .get_mut(&key)
            .ok_or(ParameterError::UnknownParameter)?;

        if entry.flags.contains(ParamFlags::READ_ONLY) {
            return Err(ParameterError::ReadOnly);
        }

        entry.value = value;
        self.dirty = true;
        Ok(())
    }

    /// Register a new parameter with default value and flags
    ///
    /// Registering an existing name keeps its current value.
    pub fn register(
        &mut self,
        name: &str,
        default_value: ParamValue,
        flags: ParamFlags,
    ) -> Result<(), ParameterError> {
        let key = make_key(name)?;
        if self.entries.contains_key(&key) {
            return Ok(());
        }

        self.entries
            .insert(
                key,
                ParamEntry {
                    value: default_value,
                    flags,
                },
            )
            .map_err(|_| ParameterError::StoreFull)?;
        self.dirty = true;
        Ok(())
    }

    /// Check if parameter is hidden
    pub fn is_hidden(&self, name: &str) -> bool {
        make_key(name)
            .ok()
            .and_then(|key| self.entries.get(&key))
            .is_some_and(|entry| entry.flags.contains(ParamFlags::HIDDEN))
    }

    /// Names of all visible parameters
    pub fn iter_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.flags.contains(ParamFlags::HIDDEN))
            .map(|(name, _)| name.as_str())
    }

    /// Visible parameter count
    pub fn count(&self) -> usize {
        self.iter_names().count()
    }

    /// Check if store has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear dirty flag after the store has been persisted
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Total parameter count (including hidden parameters)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}
