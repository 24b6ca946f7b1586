pub mod client;
pub mod request;
pub mod response;

pub use client::PachcaClient;
pub use request::{ApiRequest, Transport};
pub use response::{Anchor, AnchorPage, CursorPage, ResponseShape};
