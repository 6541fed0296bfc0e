pub mod cloudinary;
mod mappers;

pub use cloudinary::CloudinaryObjectStorage;
