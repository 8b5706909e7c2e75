use serde::Serialize;

pub mod reservation;

/// Success envelope; the failure counterpart is produced by the error
/// type's `IntoResponse`.
#[derive(Serialize)]
pub struct ApiSuccess<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiSuccess<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
