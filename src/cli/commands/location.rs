use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_location(config: Config, query: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;
    let location = state.locations.resolve(query).await?;

    println!("{}", location.formatted_query);
    println!("{:-<60}", "");
    println!("  ID:        {}", location.id);
    println!("  Query:     {}", location.search_query);
    println!("  Latitude:  {}", location.latitude);
    println!("  Longitude: {}", location.longitude);

    Ok(())
}
