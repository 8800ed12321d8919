//! Facet summation server binary

use core::net::SocketAddr;
use std::env::var;

use clap::Parser;
use color_eyre::install;
use eyre::Result as EyreResult;
use facetsum_server::{addr_from_str, FacetService, ServerConfig, DEFAULT_ADDR};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{registry, EnvFilter};

/// Sums the counts beneath every facet of a JSON facet tree
#[derive(Debug, Parser)]
#[command(name = "facetsumd", version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Sets the address to listen on [default: 0.0.0.0:8080]
    /// Valid: `8080`, `:8080`, `127.0.0.1`, `127.0.0.1:8080` [env: PORT]
    #[clap(short, long, visible_alias = "addr", value_name = "URI")]
    #[clap(verbatim_doc_comment, value_parser = addr_from_str)]
    #[clap(default_value_t = DEFAULT_ADDR)]
    pub listen: SocketAddr,
}

#[tokio::main]
async fn main() -> EyreResult<()> {
    setup()?;

    let cli = Cli::parse();

    let config = ServerConfig::new(cli.listen);
    let service = FacetService::new(config);

    service.start().await
}

fn setup() -> EyreResult<()> {
    registry()
        .with(EnvFilter::builder().parse(format!(
            "facetsumd=info,facetsum_=info,tower_http=info,{}",
            var("RUST_LOG").unwrap_or_default()
        ))?)
        .with(layer())
        .init();

    install()?;

    Ok(())
}
