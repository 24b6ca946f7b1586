use crate::api::response::{decode, ResponseShape};
use crate::api::{ApiRequest, Transport};
use crate::error::Result;
use crate::tools::args::{self, ToolArgs};
use serde_json::Value;

/// Group tags, page pagination (`page` + `per`).
pub async fn list_tags(api: &dyn Transport, args: &ToolArgs) -> Result<Value> {
    let request = ApiRequest::get("/group_tags")
        .query_opt("page", args::optional_u64(args, "page")?)
        .query_opt("per", args::optional_u64(args, "per")?);
    decode(ResponseShape::List, api.execute(request).await?)
}
