/// Data Transfer Objects for application layer
///
/// DTOs carry the caller's options into the collection use case and the
/// collected records back out.
mod collect_request;
mod collect_response;

pub use collect_request::{CollectRequest, DEFAULT_COMMAND_TIMEOUT};
pub use collect_response::CollectResponse;
