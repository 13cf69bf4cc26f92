pub mod generate_image;

pub use generate_image::{
    GenerateImageRequest, GenerateImageToolRequest, GeneratedImage, generate_image,
};
