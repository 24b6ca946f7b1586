use crate::api::response::{decode, ResponseShape};
use crate::api::{ApiRequest, Transport};
use crate::error::Result;
use crate::tools::args::{self, ToolArgs};
use serde_json::Value;

pub async fn get_presence(api: &dyn Transport, args: &ToolArgs) -> Result<Value> {
    let user_ids = args::required_id_list(args, "user_ids")?;
    let request = ApiRequest::get("/presence").repeated("user_ids", &user_ids);
    decode(ResponseShape::List, api.execute(request).await?)
}
