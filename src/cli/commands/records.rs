use crate::clients::RecordProvider;
use crate::config::Config;
use crate::domain::Domain;
use crate::models::Location;
use crate::services::RecordService;
use crate::state::SharedState;

pub async fn cmd_records(config: Config, domain: Domain, query: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;
    let location = state.locations.resolve(query).await?;

    println!("{} for {}", domain, location.formatted_query);
    println!("{:-<60}", "");

    match domain {
        Domain::Weather => print_records(&state.weather, &location).await,
        Domain::Restaurants => print_records(&state.restaurants, &location).await,
        Domain::Movies => print_records(&state.movies, &location).await,
        Domain::Meetups => print_records(&state.meetups, &location).await,
        Domain::Trails => print_records(&state.trails, &location).await,
    }
}

async fn print_records<P: RecordProvider>(
    service: &RecordService<P>,
    location: &Location,
) -> anyhow::Result<()> {
    let records = service.get_records(location).await?;

    if records.is_empty() {
        println!("No records found.");
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&records)?);
    println!();
    println!("{} record(s)", records.len());

    Ok(())
}
