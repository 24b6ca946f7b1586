use crate::api::response::{self, decode, ResponseShape};
use crate::api::{ApiRequest, Transport};
use crate::error::{PachcaError, Result};
use crate::tools::args::{self, ToolArgs};
use serde_json::Value;

pub async fn list_users(api: &dyn Transport, args: &ToolArgs) -> Result<Value> {
    let request = ApiRequest::get("/users")
        .query_opt("limit", args::optional_u64(args, "limit")?)
        .query_opt("cursor", args::optional_str(args, "cursor")?);
    decode(ResponseShape::CursorPage, api.execute(request).await?)
}

/// Same endpoint as [`list_users`], but `query` is mandatory.
pub async fn search_users(api: &dyn Transport, args: &ToolArgs) -> Result<Value> {
    let request = ApiRequest::get("/users")
        .query("query", args::required_str(args, "query")?)
        .query_opt("limit", args::optional_u64(args, "limit")?)
        .query_opt("cursor", args::optional_str(args, "cursor")?);
    decode(ResponseShape::CursorPage, api.execute(request).await?)
}

/// Users are only exposed through the bulk endpoint, so filter it to one id.
pub async fn get_user(api: &dyn Transport, args: &ToolArgs) -> Result<Value> {
    let id = args::required_u64(args, "id")?;
    let request = ApiRequest::get("/users").repeated("ids", &[id]);
    let users = response::list(api.execute(request).await?)?;

    users
        .into_iter()
        .find(|user| user.get("id").and_then(Value::as_u64) == Some(id))
        .ok_or_else(|| PachcaError::not_found("User", id))
}

pub async fn get_users(api: &dyn Transport, args: &ToolArgs) -> Result<Value> {
    let ids = args::required_id_list(args, "ids")?;
    let request = ApiRequest::get("/users").repeated("ids", &ids);
    decode(ResponseShape::List, api.execute(request).await?)
}

/// Resolves a user id to the id of the private chat with that user.
pub async fn get_private_chat(api: &dyn Transport, args: &ToolArgs) -> Result<Value> {
    let user_id = args::required_u64(args, "user_id")?;
    let request = ApiRequest::get(format!("/users/{}/chat", user_id));
    Ok(api.execute(request).await?.unwrap_or(Value::Null))
}
