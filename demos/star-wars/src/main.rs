/* demos/star-wars/src/main.rs */

use anyhow::Result;
use star_wars_prerender::{SwapiSource, on_before_prerender_start};

#[tokio::main]
async fn main() -> Result<()> {
  let url = std::env::args().nth(1);
  let source = url.map_or_else(SwapiSource::default, SwapiSource::new);
  let entries = on_before_prerender_start(&source).await?;
  println!("{}", serde_json::to_string_pretty(&entries)?);
  Ok(())
}
