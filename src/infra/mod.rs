pub mod http_client;
pub mod warner;

pub use http_client::ReqwestHttp;
pub use warner::{CollectingWarner, TracingWarner};
