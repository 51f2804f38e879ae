//! Request DTOs for the task API
//!
//! Defines the structure of incoming HTTP request bodies and list query
//! parameters. The same types are serialized by the client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::TaskStatus;

/// Request body for POST /api/tasks
///
/// Fields are untyped at the wire level so that every missing, empty or
/// wrongly typed field can be reported at once by validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    /// Defaults to `todo` when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
}

impl CreateTaskRequest {
    /// Creates a request with title and description and the default status.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(Value::String(title.into())),
            description: Some(Value::String(description.into())),
            status: None,
        }
    }

    /// Sets an explicit initial status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(Value::from(status.as_str()));
        self
    }
}

/// Request body for PUT /api/tasks/:id
///
/// A present field replaces the stored value; an omitted or `null` field
/// keeps it. A present field of the wrong type fails validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
}

impl UpdateTaskRequest {
    /// An update that only changes the status.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(Value::from(status.as_str())),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(Value::String(title.into()));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Value::String(description.into()));
        self
    }
}

// == Sorting ==
/// Field a task listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    Title,
    Status,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "createdAt",
            SortField::Title => "title",
            SortField::Status => "status",
        }
    }

    /// Parses a `sortBy` value; anything unrecognized orders by creation time.
    pub fn parse(value: &str) -> Self {
        match value {
            "title" => SortField::Title,
            "status" => SortField::Status,
            _ => SortField::CreatedAt,
        }
    }
}

/// Direction of a task listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Parses an `order` value. Only the literal `desc` is descending.
    pub fn parse(value: &str) -> Self {
        if value == "desc" {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// Query parameters for GET /api/tasks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a query from raw `key=value` pairs.
    ///
    /// A repeated key joins its values with commas, which matches no status,
    /// sort field or `desc`, so the repeated parameter falls back like any
    /// other unrecognized value. Unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "status" => &mut query.status,
                "sortBy" => &mut query.sort_by,
                "order" => &mut query.order,
                _ => continue,
            };
            match slot {
                Some(existing) => {
                    existing.push(',');
                    existing.push_str(&value);
                }
                None => *slot = Some(value),
            }
        }
        query
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status.as_str().to_string());
        self
    }

    pub fn sorted_by(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort_by = Some(field.as_str().to_string());
        self.order = Some(order.as_str().to_string());
        self
    }

    /// Status filter, ignoring values that are not a known status.
    pub fn status_filter(&self) -> Option<TaskStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_by
            .as_deref()
            .map(SortField::parse)
            .unwrap_or_default()
    }

    pub fn sort_order(&self) -> SortOrder {
        self.order.as_deref().map(SortOrder::parse).unwrap_or_default()
    }
}
