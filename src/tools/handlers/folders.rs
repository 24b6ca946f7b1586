use crate::api::response::{self, decode, ResponseShape};
use crate::api::{ApiRequest, Transport};
use crate::error::{PachcaError, Result};
use crate::tools::args::{self, ToolArgs};
use serde_json::Value;

pub async fn list_folders(api: &dyn Transport, _args: &ToolArgs) -> Result<Value> {
    decode(
        ResponseShape::List,
        api.execute(ApiRequest::get("/folders")).await?,
    )
}

fn folder_id(folder: &Value) -> Option<String> {
    match folder.get("id")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Chats in the folder whose `kind` matches. The kind is resolved through the
/// folder directory first; only the cursor is forwarded to the second call.
pub async fn list_folder_chats(api: &dyn Transport, args: &ToolArgs) -> Result<Value> {
    let kind = args::required_str(args, "kind")?;
    let cursor = args::optional_str(args, "cursor")?;

    let folders = response::list(api.execute(ApiRequest::get("/folders")).await?)?;
    let folder = folders
        .iter()
        .find(|folder| folder.get("kind").and_then(Value::as_str) == Some(kind.as_str()));

    let Some(folder) = folder else {
        let available = folders
            .iter()
            .filter_map(|folder| folder.get("kind").and_then(Value::as_str))
            .map(str::to_string)
            .collect();
        return Err(PachcaError::NotFound {
            resource: "Folder kind",
            key: kind,
            available,
        });
    };

    let id = folder_id(folder).ok_or_else(|| PachcaError::MalformedResponse {
        status: 200,
        excerpt: format!("folder without id: {}", folder),
    })?;

    let request = ApiRequest::get(format!("/folders/{}/chats", id)).query_opt("cursor", cursor);
    decode(ResponseShape::CursorPage, api.execute(request).await?)
}
