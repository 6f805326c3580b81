use serde_json::Value;

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::pagination::Pagination;
use super::types::{FilterOp, FilterOrderInfo, FilterWhereInfo};

/// A serialized-on-demand conjunction of row conditions plus projection,
/// ordering and paging, rendered in the BaaS REST query-string dialect.
///
/// ```text
/// Filter::new().select(["author_id"]).eq("id", post_id)
///     -> select=author_id&id=eq.<post_id>
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    select_columns: Vec<String>,
    conditions: Vec<FilterWhereInfo>,
    order_data: Vec<FilterOrderInfo>,
    limit: Option<u32>,
    offset: Option<u32>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn where_op(mut self, column: impl Into<String>, operator: FilterOp, data: impl Into<Value>) -> Self {
        self.conditions.push(FilterWhereInfo {
            column: column.into(),
            operator,
            data: data.into(),
        });
        self
    }

    pub fn eq(self, column: impl Into<String>, data: impl Into<Value>) -> Self {
        self.where_op(column, FilterOp::Eq, data)
    }

    pub fn order(mut self, order_spec: &str) -> Self {
        self.order_data.extend(FilterOrder::parse(order_spec));
        self
    }

    pub fn limit(mut self, limit: u32, offset: Option<u32>) -> Self {
        self.limit = Some(limit);
        self.offset = offset;
        self
    }

    pub fn paginate(self, page: Pagination) -> Self {
        self.limit(page.limit, Some(page.offset))
    }

    pub fn select_columns(&self) -> &[String] {
        &self.select_columns
    }

    pub fn conditions(&self) -> &[FilterWhereInfo] {
        &self.conditions
    }

    pub fn order_by(&self) -> &[FilterOrderInfo] {
        &self.order_data
    }

    pub fn limit_value(&self) -> Option<u32> {
        self.limit
    }

    pub fn offset_value(&self) -> Option<u32> {
        self.offset
    }

    /// Render `select`, conditions, `order`, `limit` and `offset` joined by `&`.
    /// An empty filter renders as an empty string.
    pub fn to_query_string(&self) -> Result<String, FilterError> {
        let mut parts = Vec::new();

        if !self.select_columns.is_empty() {
            Self::validate_select_columns(&self.select_columns)?;
            parts.push(format!("select={}", self.select_columns.join(",")));
        }

        parts.extend(FilterWhere::generate(&self.conditions)?);

        if let Some(order) = FilterOrder::generate(&self.order_data)? {
            parts.push(order);
        }

        if let Some(limit) = self.limit {
            parts.push(format!("limit={}", limit));
        }
        if let Some(offset) = self.offset {
            parts.push(format!("offset={}", offset));
        }

        Ok(parts.join("&"))
    }

    pub fn validate_table_name(name: &str) -> Result<(), FilterError> {
        if name.is_empty() { return Err(FilterError::InvalidTableName("Table name cannot be empty".to_string())); }
        if !is_identifier(name) {
            return Err(FilterError::InvalidTableName(format!("Invalid table name format: {}", name)));
        }
        Ok(())
    }

    fn validate_select_columns(columns: &[String]) -> Result<(), FilterError> {
        for column in columns {
            if column == "*" { continue; }
            if column.is_empty() { return Err(FilterError::InvalidColumn("Column name cannot be empty".to_string())); }
            if !is_identifier(column) {
                return Err(FilterError::InvalidColumn(format!("Invalid column name format: {}", column)));
            }
        }
        Ok(())
    }
}

/// Identifiers are `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
