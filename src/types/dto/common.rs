use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Generic success message body
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
