use anyhow::{bail, Context, Result};
use geo::{Geometry, MultiPolygon};
use geojson::{Feature, FeatureCollection, JsonObject};
use serde_json::json;

/// One country boundary. Coordinates are WGS84 longitude/latitude degrees
/// throughout; nothing in the pipeline reprojects.
#[derive(Clone, Debug, PartialEq)]
pub struct Country {
    pub name: String,
    pub code: String,
    pub geometry: MultiPolygon,
}

/// Reads a world collection into countries, keeping feature order. Missing
/// `NAME`/`ISO_A3` properties read as the empty string.
pub fn read_countries(collection: FeatureCollection) -> Result<Vec<Country>> {
    collection
        .features
        .into_iter()
        .map(|feature| {
            Ok(Country {
                name: string_property(&feature, "NAME"),
                code: string_property(&feature, "ISO_A3"),
                geometry: multi_polygon(feature)?,
            })
        })
        .collect()
}

/// Reads only the geometries, discarding all properties. Used for the
/// replacement-country source, whose properties are replaced wholesale.
pub fn read_geometries(collection: FeatureCollection) -> Result<Vec<MultiPolygon>> {
    collection
        .features
        .into_iter()
        .map(multi_polygon)
        .collect()
}

/// Re-emits the world set as a FeatureCollection with exactly two properties
/// per feature, `NAME` and `ISO_A3`.
pub fn to_collection(world: &[Country]) -> FeatureCollection {
    let features = world
        .iter()
        .map(|country| {
            let mut properties = JsonObject::new();
            properties.insert("NAME".to_string(), json!(country.name));
            properties.insert("ISO_A3".to_string(), json!(country.code));
            Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::from(&country.geometry)),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn string_property(feature: &Feature, key: &str) -> String {
    feature
        .property(key)
        .and_then(|x| x.as_str())
        .unwrap_or_default()
        .to_string()
}

// Polygons are widened to single-member multi-polygons so set operations
// work over one type.
fn multi_polygon(feature: Feature) -> Result<MultiPolygon> {
    let geometry = feature.geometry.context("feature has no geometry")?;
    match Geometry::try_from(geometry.value)? {
        Geometry::Polygon(x) => Ok(MultiPolygon(vec![x])),
        Geometry::MultiPolygon(x) => Ok(x),
        _ => bail!("feature geometry is not a polygon or multi-polygon"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "NAME": "Testland", "ISO_A3": "TST", "POP_EST": 1234 },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [0.0, 0.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[5.0, 0.0], [6.0, 0.0], [6.0, 1.0], [5.0, 1.0], [5.0, 0.0]]],
                        [[[7.0, 0.0], [8.0, 0.0], [8.0, 1.0], [7.0, 1.0], [7.0, 0.0]]]
                    ]
                }
            }
        ]
    }"#;

    #[test]
    fn read_world() {
        let world = read_countries(serde_json::from_str(WORLD).unwrap()).unwrap();

        assert_eq!(world.len(), 2);
        assert_eq!(world[0].name, "Testland");
        assert_eq!(world[0].code, "TST");
        assert_eq!(world[0].geometry.0.len(), 1);

        // missing properties default to empty strings
        assert_eq!(world[1].name, "");
        assert_eq!(world[1].code, "");
        assert_eq!(world[1].geometry.0.len(), 2);
    }

    #[test]
    fn read_rejects_non_areal_geometry() {
        let collection: FeatureCollection = serde_json::from_str(
            r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": { "type": "Point", "coordinates": [1.0, 2.0] }
                }
            ]
        }"#,
        )
        .unwrap();

        assert!(read_countries(collection).is_err());
    }

    #[test]
    fn read_rejects_missing_geometry() {
        let collection: FeatureCollection = serde_json::from_str(
            r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "NAME": "Nowhere", "ISO_A3": "NWH" },
                    "geometry": null
                }
            ]
        }"#,
        )
        .unwrap();

        assert!(read_countries(collection).is_err());
    }

    #[test]
    fn round_trip() {
        let world = read_countries(serde_json::from_str(WORLD).unwrap()).unwrap();
        let output = serde_json::to_string_pretty(&to_collection(&world)).unwrap();

        let reparsed: FeatureCollection = serde_json::from_str(&output).unwrap();
        assert_eq!(reparsed.features.len(), 2);
        for feature in &reparsed.features {
            assert!(feature.geometry.is_some());
            let properties = feature.properties.as_ref().unwrap();
            assert_eq!(properties.len(), 2);
            assert!(properties.contains_key("NAME"));
            assert!(properties.contains_key("ISO_A3"));
        }

        assert_eq!(read_countries(reparsed).unwrap(), world);
    }
}
