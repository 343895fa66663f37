pub mod api_client;
pub mod resource;

pub use api_client::ApiClient;
pub use resource::Resource;
