pub mod response;

pub use response::{accepted, ok, ApiResponse};
