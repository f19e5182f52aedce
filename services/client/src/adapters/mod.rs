pub mod http;
pub mod token;

pub use http::HttpApiAdapter;
pub use token::StaticTokenProvider;
