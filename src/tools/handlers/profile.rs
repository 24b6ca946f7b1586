use crate::api::response::{decode, ResponseShape};
use crate::api::{ApiRequest, Transport};
use crate::error::Result;
use crate::tools::args::ToolArgs;
use serde_json::Value;

pub async fn get_profile(api: &dyn Transport, _args: &ToolArgs) -> Result<Value> {
    decode(
        ResponseShape::Singleton,
        api.execute(ApiRequest::get("/profile")).await?,
    )
}
