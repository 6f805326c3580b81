use super::error::FilterError;
use super::filter::is_identifier;
use super::types::{FilterOrderInfo, SortDirection};

pub struct FilterOrder;

impl FilterOrder {
    /// Parse `"created_at desc, name"` into order entries; direction defaults to asc
    pub fn parse(spec: &str) -> Vec<FilterOrderInfo> {
        let mut out = Vec::new();
        for part in spec.split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() { continue; }
            let mut it = trimmed.split_whitespace();
            if let Some(col) = it.next() {
                let dir = it.next().unwrap_or("asc");
                let sort = if dir.eq_ignore_ascii_case("desc") { SortDirection::Desc } else { SortDirection::Asc };
                out.push(FilterOrderInfo { column: col.to_string(), sort });
            }
        }
        out
    }

    /// Render as a single `order=col.dir,col.dir` clause
    pub fn generate(infos: &[FilterOrderInfo]) -> Result<Option<String>, FilterError> {
        if infos.is_empty() { return Ok(None); }
        let parts = infos
            .iter()
            .map(|i| {
                if !is_identifier(&i.column) {
                    return Err(FilterError::InvalidColumn(i.column.clone()));
                }
                Ok(format!("{}.{}", i.column, i.sort.to_postgrest()))
            })
            .collect::<Result<Vec<_>, FilterError>>()?;
        Ok(Some(format!("order={}", parts.join(","))))
    }
}
