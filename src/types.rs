use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            Priority::Low => "badge badge-priority-low",
            Priority::Medium => "badge badge-priority-medium",
            Priority::High => "badge badge-priority-high",
        }
    }
}

/// Dashboard filter; maps onto the backend's optional `completed` query
/// parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    pub fn completed_param(self) -> Option<bool> {
        match self {
            TaskFilter::All => None,
            TaskFilter::Active => Some(false),
            TaskFilter::Completed => Some(true),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskFilter::All => "All",
            TaskFilter::Active => "Active",
            TaskFilter::Completed => "Completed",
        }
    }
}

/// A server-owned task. Instances only ever come from backend responses;
/// the id is assigned there.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub completed: bool,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub due_date: Option<Date>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TaskCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
}

/// Identity decoded from the bearer token payload; never fetched from a
/// dedicated endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub database: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Conversation {
    pub id: i64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    pub message_count: u32,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ConversationListResponse {
    #[serde(default)]
    pub conversations: Vec<Conversation>,
}

/// A persisted chat message as the backend returns it from the history
/// endpoint. The enclosing response names the conversation; the rows don't
/// repeat it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MessageRecord {
    pub id: i64,
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ConversationHistory {
    #[serde(default)]
    pub messages: Vec<MessageRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<i64>,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ToolCall {
    pub tool: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
    #[serde(default)]
    pub result: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatResponse {
    pub conversation_id: i64,
    pub response: String,
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCall>>,
}

/// Transcript identifier. Optimistic entries carry a process-local `Pending`
/// id until a history reload replaces them with server rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageId {
    Pending(u64),
    Confirmed(i64),
}

/// A chat message as the transcript holds it.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub conversation_id: Option<i64>,
    pub created_at: Option<OffsetDateTime>,
    /// Names of backend tools that ran while producing an assistant reply.
    pub tool_calls: Vec<String>,
}
