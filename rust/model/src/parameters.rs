// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed, named parameters of family symbols and instances.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::keys::ElementId;

/// A typed parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Int(i64),
    Double(f64),
    String(String),
    ElementId(ElementId),
}

impl ParamValue {
    /// Storage type name, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Int(_) => "Int",
            ParamValue::Double(_) => "Double",
            ParamValue::String(_) => "String",
            ParamValue::ElementId(_) => "ElementId",
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            ParamValue::Double(v) => Some(*v),
            _ => None,
        }
    }
}

/// Parameters keyed by display name.
pub type Parameters = FxHashMap<String, ParamValue>;

/// Overwrites an existing parameter, keeping its storage type.
///
/// Parameters cannot be added this way: the set of names is fixed by the
/// family.
pub fn set_parameter(params: &mut Parameters, name: &str, value: ParamValue) -> Result<()> {
    let slot = params
        .get_mut(name)
        .ok_or_else(|| Error::ParameterNotFound(name.to_string()))?;

    if std::mem::discriminant(slot) != std::mem::discriminant(&value) {
        return Err(Error::ParameterType {
            name: name.to_string(),
            expected: slot.type_name(),
            found: value.type_name(),
        });
    }

    *slot = value;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opening_parameters() -> Parameters {
        let mut params = Parameters::default();
        params.insert("Width".to_string(), ParamValue::Double(0.0));
        params.insert("Height".to_string(), ParamValue::Double(0.0));
        params.insert("Mark".to_string(), ParamValue::String(String::new()));
        params
    }

    #[test]
    fn set_existing_parameter() {
        let mut params = opening_parameters();
        set_parameter(&mut params, "Width", ParamValue::Double(0.25)).unwrap();
        assert_eq!(params.get("Width").and_then(ParamValue::as_double), Some(0.25));
    }

    #[test]
    fn unknown_parameter_is_rejected() {
        let mut params = opening_parameters();
        let err = set_parameter(&mut params, "Ширина", ParamValue::Double(0.25)).unwrap_err();
        assert!(matches!(err, Error::ParameterNotFound(name) if name == "Ширина"));
        assert!(!params.contains_key("Ширина"));
    }

    #[test]
    fn storage_type_is_kept() {
        let mut params = opening_parameters();
        let err = set_parameter(&mut params, "Mark", ParamValue::Double(1.0)).unwrap_err();
        assert!(matches!(
            err,
            Error::ParameterType { expected: "String", found: "Double", .. }
        ));
    }

    #[test]
    fn values_serialize_tagged() {
        let json = serde_json::to_string(&ParamValue::Double(0.2)).unwrap();
        assert_eq!(json, r#"{"Double":0.2}"#);
        let back: ParamValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ParamValue::Double(0.2));
    }
}
