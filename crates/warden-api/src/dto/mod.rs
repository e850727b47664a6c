//! Request and response DTOs.

pub mod request;
pub mod response;

pub use request::{ChangePasswordRequest, LoginRequest, ResetRequest};
pub use response::{ApiResponse, StatusResponse};
