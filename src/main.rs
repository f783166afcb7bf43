use std::fs;

use anyhow::Result;

mod country;
mod fetch;
mod merge;

/// Natural Earth 1:110m admin-0 country boundaries.
const WORLD_URL: &str =
    "https://raw.githubusercontent.com/nvkelso/natural-earth-vector/master/geojson/ne_110m_admin_0_countries.geojson";

/// DataMeet composite India, including disputed areas.
const INDIA_URL: &str =
    "https://raw.githubusercontent.com/datameet/maps/master/Country/india-composite.geojson";

/// Neighbours that share disputed territory with the composite geometry.
const NEIGHBOURS: &[&str] = &["PAK", "CHN"];

const OUTPUT: &str = "world_with_complete_india_lowres.geojson";

fn main() -> Result<()> {
    let agent = fetch::agent();

    eprintln!("Fetching world boundaries...");
    let world = fetch::feature_collection(&agent, WORLD_URL)?;
    eprintln!("Fetching India boundaries...");
    let india = fetch::feature_collection(&agent, INDIA_URL)?;

    let world = country::read_countries(world)?;
    let india = merge::dissolve(country::read_geometries(india)?, "India", "IND")?;
    let world = merge::replace(world, india, NEIGHBOURS);

    let mut output = serde_json::to_string_pretty(&country::to_collection(&world))?;
    output.push('\n');
    fs::write(OUTPUT, &output)?;
    println!("Saved {OUTPUT}");

    Ok(())
}
