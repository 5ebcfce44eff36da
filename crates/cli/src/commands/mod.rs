//! CLI command implementations.

pub mod products;
pub mod seed;

use secrecy::ExposeSecret;

use mango_stand_storefront::backend::{Backend, HostedBackend};
use mango_stand_storefront::config::StorefrontConfig;

/// Build a backend client from the environment and sign in with the
/// service credential.
///
/// Every command needs an authenticated session: reads technically work
/// without one, but failing fast here surfaces credential problems before
/// any rows are touched.
pub(crate) async fn connect() -> Result<HostedBackend, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = StorefrontConfig::from_env()?;
    let backend = HostedBackend::new(&config.backend);

    backend
        .sign_in(
            &config.backend.service_email,
            config.backend.service_password.expose_secret(),
        )
        .await?;

    tracing::info!("Signed in to hosted backend");
    Ok(backend)
}
