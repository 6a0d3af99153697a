/// Filter query builder for the backend's auto-generated REST API
///
/// Expresses the PostgREST dialect (`column=eq.value`, `select`, `order`, `limit`)
/// as a value, so call sites never hand-assemble query strings.

use std::fmt;

/// Resources exposed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Counties,
    Projects,
    ProjectStatus,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Counties => "counties",
            Resource::Projects => "projects",
            Resource::ProjectStatus => "project_status",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A read/update/delete target: resource plus equality filters
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    resource: Resource,
    filters: Vec<(String, String)>,
    select: Option<String>,
    order: Option<(String, bool)>,
    limit: Option<usize>,
}

impl Query {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            filters: Vec::new(),
            select: None,
            order: None,
            limit: None,
        }
    }

    /// Shorthand for the `id=eq.<id>` filter used by targeted reads and mutations
    pub fn by_id(resource: Resource, id: impl fmt::Display) -> Self {
        Self::new(resource).eq("id", id)
    }

    /// Add an equality filter; filters are emitted in insertion order
    pub fn eq(mut self, column: &str, value: impl fmt::Display) -> Self {
        self.filters.push((column.to_string(), format!("eq.{}", value)));
        self
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.to_string());
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.order = Some((column.to_string(), ascending));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Path relative to the REST root, e.g. "/projects"
    pub fn path(&self) -> String {
        format!("/{}", self.resource.as_str())
    }

    /// Query-string pairs, ready for `reqwest::RequestBuilder::query`
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = self.filters.clone();
        if let Some(select) = &self.select {
            params.push(("select".to_string(), select.clone()));
        }
        if let Some((column, ascending)) = &self.order {
            let direction = if *ascending { "asc" } else { "desc" };
            params.push(("order".to_string(), format!("{}.{}", column, direction)));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}
