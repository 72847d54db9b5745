//! Data transfer objects for the board API.

mod extract;
mod request;

pub use extract::Payload;
pub use request::{
    CreateReplyRequest, CreateThreadRequest, DeleteReplyRequest, DeleteThreadRequest,
    ReportReplyRequest, ReportThreadRequest, ThreadQuery,
};
