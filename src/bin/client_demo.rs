//! Drives a running `anime-api` through every route.
//!
//! ```bash
//! ANIME_API_BASE_URL=http://localhost:8080 cargo run --bin anime-client -- [id]
//! ```

use anime_service::infra::{logging, ClientConfig};
use anime_service::{AnimeClient, AnimePostRequestBody, AnimePutRequestBody};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init("info");

    let lookup_id: i64 = match std::env::args().nth(1) {
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("id must be an integer, got '{}'", raw))?,
        None => 1,
    };

    let config = ClientConfig::from_env()?;
    let client = AnimeClient::new(config.base_url)?;
    info!(base_url = client.base_url(), "anime client starting");

    // GET
    match client.find_by_id(lookup_id).await {
        Ok(anime) => info!(?anime, "found by id"),
        Err(e) => warn!(id = lookup_id, error = %e, "lookup by id failed"),
    }

    let animes = client.list_all().await?;
    info!(count = animes.len(), ?animes, "all anime");

    // POST
    let saved = client
        .save(&AnimePostRequestBody::new("Samurai Shamploo"))
        .await?;
    info!(?saved, "saved anime");

    // PUT
    let new_name = "Samurai Shamploo 2";
    let to_update = AnimePutRequestBody::new(saved.id, new_name);
    client.replace(&to_update).await?;
    info!(id = to_update.id, "updated anime");

    let renamed = client.find_by_name(new_name).await?;
    info!(?renamed, "found by name");

    // DELETE
    client.delete(to_update.id).await?;
    info!(id = to_update.id, "deleted anime");

    Ok(())
}
