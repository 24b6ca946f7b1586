use crate::api::response::{decode, ResponseShape};
use crate::api::{ApiRequest, Transport};
use crate::error::Result;
use crate::tools::args::{self, ToolArgs};
use serde_json::{json, Value};
use uuid::Uuid;

pub async fn get_thread(api: &dyn Transport, args: &ToolArgs) -> Result<Value> {
    let id = args::required_u64(args, "id")?;
    decode(
        ResponseShape::Singleton,
        api.execute(ApiRequest::get(format!("/threads/{}", id))).await?,
    )
}

/// Opens (or returns the existing) thread under a message.
pub async fn create_thread(api: &dyn Transport, args: &ToolArgs) -> Result<Value> {
    let message_id = args::required_u64(args, "message_id")?;
    let uuid = Uuid::new_v4().to_string();
    let request =
        ApiRequest::post(format!("/messages/{}/thread", message_id)).body(json!({ "uuid": uuid }));

    match api.execute(request).await? {
        Some(body) => decode(ResponseShape::Singleton, Some(body)),
        None => Ok(json!({
            "created": true,
            "uuid": uuid,
            "message_id": message_id,
        })),
    }
}
