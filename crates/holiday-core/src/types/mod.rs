mod id;
mod timestamp;

pub use id::{Id, MessageId, RequestId};
pub use timestamp::Timestamp;
