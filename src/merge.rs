use anyhow::{Context, Result};
use geo::{BooleanOps, HasDimensions, MultiPolygon};

use crate::country::Country;

/// Dissolves the replacement-country features into a single country. A
/// single-feature source is used as-is; multiple features are unioned,
/// removing shared internal boundaries.
pub fn dissolve(geometries: Vec<MultiPolygon>, name: &str, code: &str) -> Result<Country> {
    let mut geometries = geometries.into_iter();
    let first = geometries
        .next()
        .with_context(|| format!("no polygon features for {code}"))?;

    Ok(Country {
        name: name.to_string(),
        code: code.to_string(),
        geometry: geometries.fold(first, |merged, x| merged.union(&x)),
    })
}

/// Subtracts the country's overlap from each listed neighbour, in place and
/// independently. A code with no match in the world set is skipped; an empty
/// intersection leaves the neighbour untouched.
pub fn carve_neighbours(world: &mut [Country], country: &Country, neighbours: &[&str]) {
    for code in neighbours {
        let Some(neighbour) = world.iter_mut().find(|x| x.code == *code) else {
            continue;
        };

        let overlap = neighbour.geometry.intersection(&country.geometry);
        if !overlap.is_empty() {
            neighbour.geometry = neighbour.geometry.difference(&overlap);
        }
    }
}

/// Replaces a country in the world set: drops every feature carrying its
/// code, carves its neighbours, then appends it at the end.
pub fn replace(mut world: Vec<Country>, country: Country, neighbours: &[&str]) -> Vec<Country> {
    world.retain(|x| x.code != country.code);
    carve_neighbours(&mut world, &country, neighbours);
    world.push(country);
    world
}
