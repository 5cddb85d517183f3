//! Server binary. Configuration comes entirely from the environment; a
//! missing signing key or database URL aborts startup.

use aac_core::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    aac_core::log();
    let settings = Settings::from_env()?;
    aac_server::run(settings).await
}
