pub mod domain;
pub mod landing;
