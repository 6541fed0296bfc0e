pub mod download_qr;
pub mod generate_custom_qr;
pub mod generate_qr;
