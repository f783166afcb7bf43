use anyhow::{Context, Result};
use geojson::FeatureCollection;
use ureq::{Agent, AgentBuilder};

pub fn agent() -> Agent {
    AgentBuilder::new()
        .user_agent("worldmap (+https://github.com/worldmap/worldmap)")
        .build()
}

/// Fetches a remote GeoJSON document. Any transport failure, non-2xx status
/// or malformed payload is fatal; there is no retry.
pub fn feature_collection(agent: &Agent, url: &str) -> Result<FeatureCollection> {
    agent
        .get(url)
        .call()
        .with_context(|| format!("failed to fetch {url}"))?
        .into_json()
        .with_context(|| format!("invalid GeoJSON from {url}"))
}
