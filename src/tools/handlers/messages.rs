use crate::api::response::{self, decode, Anchor, ResponseShape};
use crate::api::{ApiRequest, Transport};
use crate::error::{PachcaError, Result};
use crate::tools::args::{self, ToolArgs};
use serde_json::{json, Map, Value};
use uuid::Uuid;

pub const DIRECTIONS: &[&str] = &["before", "after", "around"];
pub const ENTITY_TYPES: &[&str] = &["discussion", "user", "thread"];

/// Messages of a chat, optionally paged relative to an anchor message.
///
/// `direction` only makes sense together with `message_id`; supplying it alone
/// is rejected instead of sending an ambiguous request.
pub async fn list_messages(api: &dyn Transport, args: &ToolArgs) -> Result<Value> {
    let chat_id = args::required_u64(args, "chat_id")?;
    let message_id = args::optional_u64(args, "message_id")?;
    let direction = args::optional_enum(args, "direction", DIRECTIONS)?;

    if direction.is_some() && message_id.is_none() {
        return Err(PachcaError::invalid_argument(
            "'direction' requires 'message_id' to anchor the page",
        ));
    }

    let request = ApiRequest::get(format!("/chats/{}/messages", chat_id))
        .query_opt("message_id", message_id)
        .query_opt("direction", direction.as_deref())
        .query_opt("limit", args::optional_u64(args, "limit")?);

    let anchor = message_id.map(|message_id| Anchor {
        message_id,
        direction,
    });
    let page = response::anchor_page(api.execute(request).await?, anchor)?;
    Ok(serde_json::to_value(page)?)
}

pub async fn get_message(api: &dyn Transport, args: &ToolArgs) -> Result<Value> {
    let id = args::required_u64(args, "id")?;
    decode(
        ResponseShape::Singleton,
        api.execute(ApiRequest::get(format!("/messages/{}", id))).await?,
    )
}

/// Sends a message with a fresh idempotency `uuid`. A `204` reply is turned
/// into an acknowledgment carrying that `uuid` and the target.
pub async fn send_message(api: &dyn Transport, args: &ToolArgs) -> Result<Value> {
    let entity_id = args::required_u64(args, "entity_id")?;
    let content = args::required_str(args, "content")?;
    let entity_type = args::optional_enum(args, "entity_type", ENTITY_TYPES)?;
    let parent_message_id = args::optional_u64(args, "parent_message_id")?;

    let mut message = Map::new();
    message.insert("entity_id".to_string(), json!(entity_id));
    message.insert("content".to_string(), json!(content));
    if let Some(entity_type) = &entity_type {
        message.insert("entity_type".to_string(), json!(entity_type));
    }
    if let Some(parent) = parent_message_id {
        message.insert("parent_message_id".to_string(), json!(parent));
    }

    let uuid = Uuid::new_v4().to_string();
    let request = ApiRequest::post("/messages").body(json!({
        "uuid": uuid,
        "message": message,
    }));

    match api.execute(request).await? {
        Some(body) => decode(ResponseShape::Singleton, Some(body)),
        None => {
            let mut ack = json!({
                "sent": true,
                "uuid": uuid,
                "entity_id": entity_id,
            });
            if let Some(entity_type) = entity_type {
                ack["entity_type"] = json!(entity_type);
            }
            Ok(ack)
        }
    }
}
