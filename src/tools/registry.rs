use super::args::ToolArgs;
use super::catalogue;
use super::handlers::{chats, folders, messages, presence, profile, search, tags, threads, users};
use crate::api::Transport;
use crate::error::{PachcaError, Result};
use crate::mcp::types::McpTool;
use futures::future::BoxFuture;
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use std::collections::BTreeMap;

pub type HandlerFuture<'a> = BoxFuture<'a, Result<Value>>;
pub type HandlerFn = for<'a> fn(&'a dyn Transport, &'a ToolArgs) -> HandlerFuture<'a>;

macro_rules! handler {
    ($f:path) => {{
        let handler: HandlerFn = |api, args| Box::pin($f(api, args));
        handler
    }};
}

pub struct RegisteredTool {
    pub definition: McpTool,
    pub handler: HandlerFn,
}

/// Tool name to handler mapping. Built once at startup and never mutated afterwards.
pub struct ToolRegistry {
    tools: BTreeMap<String, RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            tools: BTreeMap::new(),
        };

        registry.register(catalogue::get_profile(), handler!(profile::get_profile));

        registry.register(catalogue::list_users(), handler!(users::list_users));
        registry.register(catalogue::search_users(), handler!(users::search_users));
        registry.register(catalogue::get_user(), handler!(users::get_user));
        registry.register(catalogue::get_users(), handler!(users::get_users));
        registry.register(catalogue::get_private_chat(), handler!(users::get_private_chat));

        registry.register(catalogue::list_chats(), handler!(chats::list_chats));
        registry.register(catalogue::get_chat(), handler!(chats::get_chat));
        registry.register(catalogue::get_chat_members(), handler!(chats::get_chat_members));

        registry.register(catalogue::list_folders(), handler!(folders::list_folders));
        registry.register(catalogue::list_folder_chats(), handler!(folders::list_folder_chats));

        registry.register(catalogue::list_messages(), handler!(messages::list_messages));
        registry.register(catalogue::get_message(), handler!(messages::get_message));
        registry.register(catalogue::send_message(), handler!(messages::send_message));

        registry.register(catalogue::get_thread(), handler!(threads::get_thread));
        registry.register(catalogue::create_thread(), handler!(threads::create_thread));

        registry.register(catalogue::search_messages(), handler!(search::search_messages));
        registry.register(catalogue::get_presence(), handler!(presence::get_presence));
        registry.register(catalogue::list_tags(), handler!(tags::list_tags));

        registry
    }

    fn register(&mut self, definition: McpTool, handler: HandlerFn) {
        self.tools.insert(
            definition.name.clone(),
            RegisteredTool {
                definition,
                handler,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.get(name)
    }

    pub fn definitions(&self) -> Vec<McpTool> {
        self.tools.values().map(|t| t.definition.clone()).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Checks `arguments` against the tool's declared input schema.
    pub fn validate_arguments(&self, tool_name: &str, arguments: &Value) -> Result<()> {
        let tool = self
            .tools
            .get(tool_name)
            .ok_or_else(|| PachcaError::Other(format!("Unknown tool: {}", tool_name)))?;

        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&tool.definition.input_schema)
            .map_err(|e| PachcaError::Other(format!("Invalid tool schema for {}: {}", tool_name, e)))?;

        if let Err(errors) = schema.validate(arguments) {
            let error_messages: Vec<String> = errors
                .map(|e| {
                    let path = e.instance_path.to_string();
                    if path.is_empty() {
                        e.to_string()
                    } else {
                        format!("{}: {}", path, e)
                    }
                })
                .collect();
            return Err(PachcaError::InvalidArgument(error_messages.join("; ")));
        }

        Ok(())
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_tool_is_prefixed_and_described() {
        let registry = ToolRegistry::new();
        assert_eq!(registry.len(), 19);
        for tool in registry.definitions() {
            assert!(tool.name.starts_with("pachca_"), "{}", tool.name);
            assert!(tool.description.as_deref().is_some_and(|d| !d.is_empty()));
            assert_eq!(tool.input_schema["type"], "object");
        }
    }

    #[test]
    fn every_schema_compiles() {
        let registry = ToolRegistry::new();
        for name in registry.names() {
            let schema = &registry.get(name).unwrap().definition.input_schema;
            assert!(
                JSONSchema::options().with_draft(Draft::Draft7).compile(schema).is_ok(),
                "schema for {} does not compile",
                name
            );
        }
    }

    #[test]
    fn required_arguments_are_enforced() {
        let registry = ToolRegistry::new();
        let err = registry
            .validate_arguments("pachca_get_presence", &json!({}))
            .unwrap_err();
        match err {
            PachcaError::InvalidArgument(msg) => assert!(msg.contains("user_ids"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(registry
            .validate_arguments("pachca_get_presence", &json!({"user_ids": [1]}))
            .is_ok());
    }

    #[test]
    fn unknown_arguments_are_tolerated() {
        let registry = ToolRegistry::new();
        assert!(registry
            .validate_arguments("pachca_list_users", &json!({"verbose": true}))
            .is_ok());
    }
}
