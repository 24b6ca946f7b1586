//! One module per Pachca resource. Every handler takes the transport and the
//! tool arguments and returns the value serialized back to the caller.

pub mod chats;
pub mod folders;
pub mod messages;
pub mod presence;
pub mod profile;
pub mod search;
pub mod tags;
pub mod threads;
pub mod users;
