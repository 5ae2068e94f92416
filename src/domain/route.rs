// Route domain model
use serde::{Deserialize, Serialize};

use super::traffic::ByteCount;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Route {
    pub id: String,
    pub name: String,
}

impl Route {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Name shown on charts, falling back to the id for unnamed routes.
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() { self.id.as_str() } else { name }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteSummary {
    pub route: Route,
    pub total: ByteCount,
}
