//! quarry-server: standalone search server.

use anyhow::Context;
use quarry_core::build_info::{wants_version, BUILD_INFO};
use quarry_core::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if wants_version() {
        println!("{}", BUILD_INFO.version_line("quarry-server"));
        return Ok(());
    }

    quarry_core::logging::init();

    let config = Config::load_or_default().context("loading configuration")?;
    config.ensure_index_dir()?;

    quarry_server::serve(config).await?;
    Ok(())
}
