//! Static tool declarations: names, descriptions and argument schemas.

use crate::mcp::types::McpTool;
use crate::tools::handlers::{chats, messages};
use serde_json::{json, Value};

fn tool(name: &str, description: &str, input_schema: Value) -> McpTool {
    McpTool {
        name: name.to_string(),
        description: Some(description.to_string()),
        input_schema,
    }
}

fn id_schema(description: &str) -> Value {
    json!({ "type": "integer", "minimum": 0, "description": description })
}

fn limit_schema() -> Value {
    json!({ "type": "integer", "minimum": 1, "maximum": 50, "description": "Results per page (max 50)" })
}

fn cursor_schema() -> Value {
    json!({ "type": "string", "description": "Pagination cursor (next_cursor from the previous response)" })
}

fn id_list_schema(description: &str) -> Value {
    json!({
        "type": "array",
        "items": { "type": "integer", "minimum": 0 },
        "minItems": 1,
        "description": description
    })
}

pub fn get_profile() -> McpTool {
    tool(
        "pachca_get_profile",
        "Get the profile of the logged-in Pachca user.",
        json!({ "type": "object", "properties": {} }),
    )
}

pub fn list_users() -> McpTool {
    tool(
        "pachca_list_users",
        "List users (employees) in the Pachca workspace with cursor pagination.",
        json!({
            "type": "object",
            "properties": {
                "limit": limit_schema(),
                "cursor": cursor_schema()
            }
        }),
    )
}

pub fn search_users() -> McpTool {
    tool(
        "pachca_search_users",
        "Search users by first name, last name, email, phone number or nickname.",
        json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "minLength": 1, "description": "Search text" },
                "limit": limit_schema(),
                "cursor": cursor_schema()
            },
            "required": ["query"]
        }),
    )
}

pub fn get_user() -> McpTool {
    tool(
        "pachca_get_user",
        "Get a single user by ID.",
        json!({
            "type": "object",
            "properties": { "id": id_schema("User ID") },
            "required": ["id"]
        }),
    )
}

pub fn get_users() -> McpTool {
    tool(
        "pachca_get_users",
        "Get several users at once by their IDs.",
        json!({
            "type": "object",
            "properties": { "ids": id_list_schema("User IDs") },
            "required": ["ids"]
        }),
    )
}

pub fn get_private_chat() -> McpTool {
    tool(
        "pachca_get_private_chat",
        "Resolve a user ID to the private (direct message) chat with that user.",
        json!({
            "type": "object",
            "properties": { "user_id": id_schema("User ID") },
            "required": ["user_id"]
        }),
    )
}

pub fn list_chats() -> McpTool {
    tool(
        "pachca_list_chats",
        "List chats (discussions, channels) with filtering and cursor pagination.",
        json!({
            "type": "object",
            "properties": {
                "availability": {
                    "type": "string",
                    "enum": chats::AVAILABILITY,
                    "description": "is_member = chats you belong to, public = public chats"
                },
                "sort": {
                    "type": "string",
                    "enum": chats::SORT_ORDERS,
                    "description": "Sort order"
                },
                "personal": {
                    "type": "boolean",
                    "description": "true = personal chats only, false = group chats only"
                },
                "limit": limit_schema(),
                "cursor": cursor_schema()
            }
        }),
    )
}

pub fn get_chat() -> McpTool {
    tool(
        "pachca_get_chat",
        "Get a single chat by ID.",
        json!({
            "type": "object",
            "properties": { "id": id_schema("Chat ID") },
            "required": ["id"]
        }),
    )
}

pub fn get_chat_members() -> McpTool {
    tool(
        "pachca_get_chat_members",
        "List members of a chat, optionally filtered by role.",
        json!({
            "type": "object",
            "properties": {
                "id": id_schema("Chat ID"),
                "role": {
                    "type": "string",
                    "enum": chats::MEMBER_ROLES,
                    "description": "Filter by role (default: all)"
                },
                "limit": limit_schema(),
                "cursor": cursor_schema()
            },
            "required": ["id"]
        }),
    )
}

pub fn list_folders() -> McpTool {
    tool(
        "pachca_list_folders",
        "List chat folders. Each folder has a kind usable with pachca_list_folder_chats.",
        json!({ "type": "object", "properties": {} }),
    )
}

pub fn list_folder_chats() -> McpTool {
    tool(
        "pachca_list_folder_chats",
        "List chats in the folder of the given kind (e.g. unread, personal).",
        json!({
            "type": "object",
            "properties": {
                "kind": { "type": "string", "minLength": 1, "description": "Folder kind" },
                "cursor": cursor_schema()
            },
            "required": ["kind"]
        }),
    )
}

pub fn list_messages() -> McpTool {
    tool(
        "pachca_list_messages",
        "List messages in a chat. Pass message_id with direction to page before, after or around a message.",
        json!({
            "type": "object",
            "properties": {
                "chat_id": id_schema("Chat ID"),
                "message_id": id_schema("Anchor message ID"),
                "direction": {
                    "type": "string",
                    "enum": messages::DIRECTIONS,
                    "description": "Direction relative to message_id (requires message_id)"
                },
                "limit": limit_schema()
            },
            "required": ["chat_id"]
        }),
    )
}

pub fn get_message() -> McpTool {
    tool(
        "pachca_get_message",
        "Get a single message by ID.",
        json!({
            "type": "object",
            "properties": { "id": id_schema("Message ID") },
            "required": ["id"]
        }),
    )
}

pub fn send_message() -> McpTool {
    tool(
        "pachca_send_message",
        "Send a message to a chat, user or thread.",
        json!({
            "type": "object",
            "properties": {
                "entity_id": id_schema("Target ID: chat ID, user ID or thread ID"),
                "content": { "type": "string", "minLength": 1, "description": "Message text" },
                "entity_type": {
                    "type": "string",
                    "enum": messages::ENTITY_TYPES,
                    "description": "Target type: discussion (chat, default), user (DM), thread"
                },
                "parent_message_id": id_schema("Reply to this message ID")
            },
            "required": ["entity_id", "content"]
        }),
    )
}

pub fn get_thread() -> McpTool {
    tool(
        "pachca_get_thread",
        "Get thread details by ID.",
        json!({
            "type": "object",
            "properties": { "id": id_schema("Thread ID") },
            "required": ["id"]
        }),
    )
}

pub fn create_thread() -> McpTool {
    tool(
        "pachca_create_thread",
        "Open a thread under a message. Returns the thread to send replies into.",
        json!({
            "type": "object",
            "properties": { "message_id": id_schema("Message ID") },
            "required": ["message_id"]
        }),
    )
}

pub fn search_messages() -> McpTool {
    tool(
        "pachca_search_messages",
        "Full-text search over messages, optionally restricted to some chats.",
        json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "minLength": 1, "description": "Search text" },
                "chat_ids": {
                    "type": "array",
                    "items": { "type": "integer", "minimum": 0 },
                    "description": "Only search these chats"
                },
                "limit": limit_schema(),
                "cursor": cursor_schema()
            },
            "required": ["query"]
        }),
    )
}

pub fn get_presence() -> McpTool {
    tool(
        "pachca_get_presence",
        "Get online presence for the given users.",
        json!({
            "type": "object",
            "properties": { "user_ids": id_list_schema("User IDs") },
            "required": ["user_ids"]
        }),
    )
}

pub fn list_tags() -> McpTool {
    tool(
        "pachca_list_tags",
        "List group tags with page pagination.",
        json!({
            "type": "object",
            "properties": {
                "page": { "type": "integer", "minimum": 1, "description": "Page number (default 1)" },
                "per": { "type": "integer", "minimum": 1, "maximum": 50, "description": "Results per page (max 50)" }
            }
        }),
    )
}
