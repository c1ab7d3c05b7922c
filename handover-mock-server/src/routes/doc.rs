use crate::routes::{health, message};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "handover-mock-server",
    description = "Mock chat-agent endpoint with random handover",
    version = "0.1.0"
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(message::MessageApi::openapi());
    root
}
