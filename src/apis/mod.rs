pub mod nordvpn;

pub use nordvpn::NordVpnApi;

use crate::app::ports::CatalogSource;
use crate::config::CatalogConfig;
use crate::constants::NORDVPN_PROVIDER;
use crate::error::FetchError;
use crate::infra::ReqwestHttp;

/// Build the catalog source for `provider`, or `None` if it is unknown.
pub fn create_source(
    provider: &str,
    config: &CatalogConfig,
) -> Result<Option<Box<dyn CatalogSource>>, FetchError> {
    match provider {
        NORDVPN_PROVIDER => {
            let http = ReqwestHttp::new(config.timeout(), &config.user_agent)?;
            let source: Box<dyn CatalogSource> = Box::new(NordVpnApi::with_url(
                Box::new(http),
                config.api_url.clone(),
            ));
            Ok(Some(source))
        }
        _ => Ok(None),
    }
}

/// Get all supported provider names
pub fn get_supported_providers() -> Vec<&'static str> {
    vec![NORDVPN_PROVIDER]
}
