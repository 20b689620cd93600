// Ad-hoc probe against the live endpoints. Fetches the admissions feed,
// prints both rankings, and geocodes an optional place argument.

use antagning_tui::api;
use antagning_tui::config::init_endpoints;
use antagning_tui::domain::{rank, Category, RankedDataset, TOP_COURSES, TOP_PROGRAMS};
use color_eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let endpoints = init_endpoints();
    let client = api::build_client()?;

    println!("GET {}", endpoints.admissions_url);
    let records = api::fetch_admissions(&client, &endpoints.admissions_url).await?;
    println!("{} records", records.len());

    print_ranking("Kurser", &rank(&records, Category::Course, TOP_COURSES));
    print_ranking("Program", &rank(&records, Category::Program, TOP_PROGRAMS));

    if let Some(query) = std::env::args().nth(1) {
        println!("\nGeocoding {query:?}");
        match api::geocode(&client, &endpoints.nominatim_url, query.trim()).await? {
            Some(place) => println!("{} -> {}, {}", place.display_name, place.lat, place.lon),
            None => println!("no match"),
        }
    }

    Ok(())
}

fn print_ranking(title: &str, dataset: &RankedDataset) {
    println!("\n{title}:");
    for (label, value) in dataset.labels.iter().zip(&dataset.values) {
        println!("- {label}: {value}");
    }
}
