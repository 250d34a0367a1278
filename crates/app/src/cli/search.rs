use std::time::Duration;

use alero::pricing::to_money;
use alero_app::domain::catalog::{
    CachedCatalogService, CatalogConfig, CatalogService, HttpCatalogClient,
};
use clap::Args;
use reqwest::Client;
use tabled::{builder::Builder, settings::Style};

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    /// Search terms; any term may match
    #[arg(long)]
    query: String,

    /// Catalog backend base URL
    #[arg(long, env = "CATALOG_BASE_URL")]
    catalog_url: String,

    /// Path of the public product list
    #[arg(long, env = "CATALOG_PUBLIC_PATH", default_value = "/api/productos/publicos")]
    public_path: String,
}

pub(crate) async fn run(args: SearchArgs) -> Result<(), String> {
    let http = Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .map_err(|error| format!("failed to build http client: {error}"))?;

    let client = HttpCatalogClient::new(
        CatalogConfig {
            base_url: args.catalog_url,
            listing_path: String::new(),
            public_path: args.public_path,
        },
        http,
    );

    let catalog = CachedCatalogService::new(std::sync::Arc::new(client));

    if catalog.refresh().await == 0 {
        return Err("catalog returned no products".to_string());
    }

    let results = catalog.search(&args.query).await;

    if results.is_empty() {
        println!("no products match {:?}", args.query);
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Code", "Name", "Category", "Thickness", "Color", "Price"]);

    for entry in results {
        let price = to_money(entry.price).to_string();

        builder.push_record([
            entry.code,
            entry.name,
            entry.category,
            entry.thickness,
            entry.color,
            price,
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());

    println!("{table}");

    Ok(())
}
