//! Binary entry point for the quilld daemon.
//!
//! The runtime logic lives in `quilld::server`, so this binary only
//! delegates to the shared library code.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> { quilld::server::run().await }
