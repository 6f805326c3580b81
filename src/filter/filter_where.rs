use serde_json::Value;
use url::form_urlencoded::byte_serialize;

use super::error::FilterError;
use super::filter::is_identifier;
use super::types::{FilterOp, FilterWhereInfo};

pub struct FilterWhere;

impl FilterWhere {
    /// Render each condition as a `column=op.value` clause, values percent-encoded
    pub fn generate(conditions: &[FilterWhereInfo]) -> Result<Vec<String>, FilterError> {
        conditions.iter().map(Self::build_condition).collect()
    }

    fn build_condition(condition: &FilterWhereInfo) -> Result<String, FilterError> {
        if !is_identifier(&condition.column) {
            return Err(FilterError::InvalidColumn(condition.column.clone()));
        }

        let (operator, value) = match condition.operator {
            FilterOp::Eq if condition.data.is_null() => (FilterOp::Is, "null".to_string()),
            FilterOp::Eq => (FilterOp::Eq, Self::scalar(&condition.data)?),
            FilterOp::Is => (FilterOp::Is, Self::is_value(&condition.data)?),
        };

        Ok(format!(
            "{}={}.{}",
            condition.column,
            operator.to_postgrest(),
            encode(&value)
        ))
    }

    fn scalar(value: &Value) -> Result<String, FilterError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(FilterError::InvalidOperatorData(format!(
                "expected a scalar value, got {}",
                other
            ))),
        }
    }

    fn is_value(value: &Value) -> Result<String, FilterError> {
        match value {
            Value::Null => Ok("null".to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(FilterError::InvalidOperatorData(format!(
                "is accepts null, true or false, got {}",
                other
            ))),
        }
    }
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}
