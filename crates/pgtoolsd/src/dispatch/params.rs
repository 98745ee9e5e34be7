//! Parameter bags and per-method binding.
//!
//! A request may carry positional (`[...]`) or named (`{...}`) parameters.
//! Each handler declares its field names in order; [`Params::bind`] maps
//! positional values onto those names, rejects anything undeclared, and then
//! deserialises the result into the handler's typed parameter struct.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::errors::{HandlerError, RpcError};

/// Parameters of a single request.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Params {
    /// No `params` member (or `null`).
    #[default]
    None,
    /// Array parameters, matched to declared fields by position.
    Positional(Vec<Value>),
    /// Object parameters, matched to declared fields by name.
    Named(Map<String, Value>),
}

impl Params {
    /// Classifies the raw `params` member of a request.
    ///
    /// # Errors
    ///
    /// Returns an invalid request error when `params` is a scalar.
    pub fn from_value(value: Option<Value>) -> Result<Self, RpcError> {
        match value {
            None | Some(Value::Null) => Ok(Self::None),
            Some(Value::Array(values)) => Ok(Self::Positional(values)),
            Some(Value::Object(map)) => Ok(Self::Named(map)),
            Some(other) => Err(RpcError::invalid_request(format!(
                "params must be an array or object, got {other}"
            ))),
        }
    }

    /// Returns `true` when no parameter values were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Positional(values) => values.is_empty(),
            Self::Named(map) => map.is_empty(),
        }
    }

    /// Binds the bag to `fields` and deserialises it into `T`.
    ///
    /// # Errors
    ///
    /// Returns `HandlerError::InvalidParams` when there are more positional
    /// values than fields, when a named parameter is not declared, or when
    /// the bound object does not deserialise into `T`.
    pub fn bind<T: DeserializeOwned>(self, fields: &[&str]) -> Result<T, HandlerError> {
        let named = self.into_named(fields)?;
        serde_json::from_value(Value::Object(named))
            .map_err(|error| HandlerError::invalid_params(error.to_string()))
    }

    /// Asserts that a method declared without parameters received none.
    ///
    /// # Errors
    ///
    /// Returns `HandlerError::InvalidParams` when values were supplied.
    pub fn expect_none(self) -> Result<(), HandlerError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(HandlerError::invalid_params("method takes no parameters"))
        }
    }

    fn into_named(self, fields: &[&str]) -> Result<Map<String, Value>, HandlerError> {
        match self {
            Self::None => Ok(Map::new()),
            Self::Positional(values) => {
                if values.len() > fields.len() {
                    return Err(HandlerError::invalid_params(format!(
                        "expected at most {} parameters, got {}",
                        fields.len(),
                        values.len()
                    )));
                }
                Ok(fields
                    .iter()
                    .map(|field| (*field).to_owned())
                    .zip(values)
                    .collect())
            }
            Self::Named(map) => {
                if let Some(unknown) = map.keys().find(|key| !fields.contains(&key.as_str())) {
                    return Err(HandlerError::invalid_params(format!(
                        "unexpected parameter '{unknown}'"
                    )));
                }
                Ok(map)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct HostParams {
        host_name: String,
        host_version: Option<String>,
    }

    const FIELDS: &[&str] = &["hostName", "hostVersion"];

    #[rstest]
    #[case::absent(None)]
    #[case::null(Some(Value::Null))]
    fn absent_params_are_empty(#[case] raw: Option<Value>) {
        let params = Params::from_value(raw).expect("classify");
        assert_eq!(params, Params::None);
        assert!(params.is_empty());
    }

    #[rstest]
    fn rejects_scalar_params() {
        let error = Params::from_value(Some(json!(42))).expect_err("scalar");
        assert_eq!(error.code, crate::dispatch::INVALID_REQUEST);
    }

    #[rstest]
    fn binds_positional_values_in_declared_order() {
        let params = Params::from_value(Some(json!(["Test", "1.0"]))).expect("classify");
        let bound: HostParams = params.bind(FIELDS).expect("bind");
        assert_eq!(
            bound,
            HostParams {
                host_name: "Test".to_owned(),
                host_version: Some("1.0".to_owned()),
            }
        );
    }

    #[rstest]
    fn binds_named_values_and_defaults_optional_fields() {
        let params = Params::from_value(Some(json!({"hostName": "Test"}))).expect("classify");
        let bound: HostParams = params.bind(FIELDS).expect("bind");
        assert_eq!(bound.host_version, None);
    }

    #[rstest]
    fn rejects_surplus_positional_values() {
        let params = Params::Positional(vec![json!("a"), json!("b"), json!("c")]);
        let result: Result<HostParams, _> = params.bind(FIELDS);
        assert!(matches!(result, Err(HandlerError::InvalidParams { .. })));
    }

    #[rstest]
    fn rejects_undeclared_named_values() {
        let params =
            Params::from_value(Some(json!({"hostName": "x", "extra": 1}))).expect("classify");
        let result: Result<HostParams, _> = params.bind(FIELDS);
        assert!(matches!(result, Err(HandlerError::InvalidParams { .. })));
    }

    #[rstest]
    fn rejects_missing_required_values() {
        let result: Result<HostParams, _> = Params::None.bind(FIELDS);
        assert!(matches!(result, Err(HandlerError::InvalidParams { .. })));
    }

    #[rstest]
    #[case::none(Params::None)]
    #[case::empty_array(Params::Positional(Vec::new()))]
    #[case::empty_object(Params::Named(Map::new()))]
    fn expect_none_accepts_empty_bags(#[case] params: Params) {
        assert!(params.expect_none().is_ok());
    }

    #[rstest]
    fn expect_none_rejects_values() {
        let params = Params::Positional(vec![json!(1)]);
        assert!(params.expect_none().is_err());
    }
}
