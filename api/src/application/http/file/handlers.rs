pub mod list_files;
pub mod list_files_api;
