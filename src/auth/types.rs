//! Request payloads for the login endpoint. They carry the plaintext password,
//! so they must never be logged.

use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}
