use serde::Deserialize;

/// Sort direction for `order=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

/// A PostgREST read: column list, equality filters, ordering and limit.
#[derive(Debug, Clone)]
pub struct SelectQuery {
    pub columns: String,
    pub eq_filters: Vec<(String, String)>,
    pub order: Option<(String, Order)>,
    pub limit: Option<usize>,
}

impl Default for SelectQuery {
    fn default() -> Self {
        Self {
            columns: "*".to_string(),
            eq_filters: Vec::new(),
            order: None,
            limit: None,
        }
    }
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    /// Add a `column=eq.value` filter.
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.eq_filters.push((column.into(), value.into()));
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, order: Order) -> Self {
        self.order = Some((column.into(), order));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Render as query-string pairs.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.columns.clone())];

        for (column, value) in &self.eq_filters {
            params.push((column.clone(), format!("eq.{}", value)));
        }

        if let Some((column, order)) = &self.order {
            let dir = match order {
                Order::Ascending => "asc",
                Order::Descending => "desc",
            };
            params.push(("order".to_string(), format!("{}.{}", column, dir)));
        }

        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }
}

/// PostgREST error body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PostgrestError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_selects_everything() {
        assert_eq!(
            SelectQuery::new().to_params(),
            vec![("select".to_string(), "*".to_string())]
        );
    }

    #[test]
    fn test_query_params_in_order() {
        let params = SelectQuery::new()
            .eq("bank_name", "BRAC Bank")
            .order_by("created_at", Order::Descending)
            .limit(20)
            .to_params();

        assert_eq!(
            params,
            vec![
                ("select".to_string(), "*".to_string()),
                ("bank_name".to_string(), "eq.BRAC Bank".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
                ("limit".to_string(), "20".to_string()),
            ]
        );
    }
}
