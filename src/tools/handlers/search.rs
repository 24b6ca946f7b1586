use crate::api::response::{decode, ResponseShape};
use crate::api::{ApiRequest, Transport};
use crate::error::Result;
use crate::tools::args::{self, ToolArgs};
use serde_json::Value;

pub async fn search_messages(api: &dyn Transport, args: &ToolArgs) -> Result<Value> {
    let query = args::required_str(args, "query")?;
    let chat_ids = args::optional_id_list(args, "chat_ids")?;

    let request = ApiRequest::get("/search/messages")
        .query("query", query)
        .repeated("chat_ids", &chat_ids)
        .query_opt("limit", args::optional_u64(args, "limit")?)
        .query_opt("cursor", args::optional_str(args, "cursor")?);
    decode(ResponseShape::CursorPage, api.execute(request).await?)
}
