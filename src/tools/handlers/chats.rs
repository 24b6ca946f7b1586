use crate::api::response::{decode, ResponseShape};
use crate::api::{ApiRequest, Transport};
use crate::error::{PachcaError, Result};
use crate::tools::args::{self, ToolArgs};
use serde_json::Value;

pub const AVAILABILITY: &[&str] = &["is_member", "public"];
pub const MEMBER_ROLES: &[&str] = &["all", "owner", "admin", "editor", "member"];
pub const SORT_ORDERS: &[&str] = &[
    "id_asc",
    "id_desc",
    "last_message_at_asc",
    "last_message_at_desc",
];

/// `last_message_at_desc` becomes `("sort[last_message_at]", "desc")`.
fn sort_param(sort: &str) -> Result<(String, String)> {
    let (field, order) = sort
        .rsplit_once('_')
        .filter(|(field, order)| {
            matches!(*field, "id" | "last_message_at") && matches!(*order, "asc" | "desc")
        })
        .ok_or_else(|| PachcaError::invalid_argument(format!("unsupported sort order: {}", sort)))?;
    Ok((format!("sort[{}]", field), order.to_string()))
}

pub async fn list_chats(api: &dyn Transport, args: &ToolArgs) -> Result<Value> {
    let mut request = ApiRequest::get("/chats")
        .query_opt(
            "availability",
            args::optional_enum(args, "availability", AVAILABILITY)?,
        )
        .query_opt("personal", args::optional_bool(args, "personal")?);

    if let Some(sort) = args::optional_enum(args, "sort", SORT_ORDERS)? {
        let (key, order) = sort_param(&sort)?;
        request = request.query(&key, order);
    }

    let request = request
        .query_opt("limit", args::optional_u64(args, "limit")?)
        .query_opt("cursor", args::optional_str(args, "cursor")?);
    decode(ResponseShape::CursorPage, api.execute(request).await?)
}

pub async fn get_chat(api: &dyn Transport, args: &ToolArgs) -> Result<Value> {
    let id = args::required_u64(args, "id")?;
    decode(
        ResponseShape::Singleton,
        api.execute(ApiRequest::get(format!("/chats/{}", id))).await?,
    )
}

pub async fn get_chat_members(api: &dyn Transport, args: &ToolArgs) -> Result<Value> {
    let id = args::required_u64(args, "id")?;
    let request = ApiRequest::get(format!("/chats/{}/members", id))
        .query_opt("role", args::optional_enum(args, "role", MEMBER_ROLES)?)
        .query_opt("limit", args::optional_u64(args, "limit")?)
        .query_opt("cursor", args::optional_str(args, "cursor")?);
    decode(ResponseShape::CursorPage, api.execute(request).await?)
}
