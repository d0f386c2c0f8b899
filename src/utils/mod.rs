//! Utility modules
//!
//! Image normalization, MIME sniffing, API key checks and cancellation.

pub mod api_key;
pub mod cancel;
pub mod image;
pub mod mime;

pub use api_key::can_be_valid_api_key;
pub use cancel::{CancelHandle, new_cancel_handle};
pub use image::{ImageData, ImageMimeType, as_image_data};
pub use mime::guess_image_mime;
