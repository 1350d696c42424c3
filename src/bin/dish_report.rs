//! Prints what was eaten in each of the user's dishes
//! Usage: cargo run --bin dish_report -- [last_sync_at]

use std::collections::BTreeMap;

use tracing_subscriber::EnvFilter;

use mfr::api::{DishQuery, LastSync};
use mfr::build_info;
use mfr::models::{new_installation_uuid, Login, User};
use mfr::{ClientConfig, MfrClient};

const LANGUAGE: &str = "en";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("mfr=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner("dish report");

    let config = ClientConfig::from_env()?;
    let uuid = config
        .installation_uuid
        .clone()
        .unwrap_or_else(new_installation_uuid);

    let mut client = MfrClient::new(&config)?;
    client.report_installation(&uuid, BTreeMap::new()).await?;
    client.log_in(&User::new(Login::anonymous())).await?;

    let query = match std::env::args().nth(1) {
        Some(since) => DishQuery::since(LastSync::Raw(since)),
        None => DishQuery::default(),
    };
    let dishes = client.get_dishes(None, &query).await?.data.dishes;
    println!("Found {} dishes", dishes.len());

    for dish in &dishes {
        println!(
            "\n{} - {} [{}]",
            dish.eaten_at,
            dish.name.as_deref().unwrap_or("(unnamed)"),
            dish.status.as_str()
        );
        for dish_food in &dish.dish_foods {
            let name = dish_food.food.display_name(LANGUAGE).unwrap_or("?");
            let eaten = dish_food
                .eaten_display()
                .unwrap_or_else(|| "unknown quantity".to_string());
            println!("  {}: {}", name, eaten);
        }
    }

    client.log_out().await?;
    Ok(())
}
