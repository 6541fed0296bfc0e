pub mod api_entities;
pub mod app_state;
pub mod http_server;
pub mod openapi;
pub mod templates;

#[cfg(test)]
pub mod test_support;
