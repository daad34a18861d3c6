use bevy::prelude::*;
use geojson::{GeoJson, Geometry, Value};
use serde_json::Value as JsonValue;

use crate::error::{GlobeError, GlobeResult};

const GEOMETRY_TYPES: [&str; 7] = [
    "Point",
    "MultiPoint",
    "LineString",
    "Polygon",
    "MultiLineString",
    "MultiPolygon",
    "GeometryCollection",
];

/// Parses GeoJSON text, rejecting anything that is not a Feature,
/// FeatureCollection or GeometryCollection before decoding the geometries.
pub fn parse_document(data: &str) -> GlobeResult<GeoJson> {
    let raw: JsonValue = serde_json::from_str(data)?;

    match type_of(&raw) {
        "Feature" => check_geometry(raw.get("geometry"))?,
        "FeatureCollection" => {
            if let Some(features) = raw.get("features").and_then(JsonValue::as_array) {
                for feature in features {
                    check_geometry(feature.get("geometry"))?;
                }
            }
        }
        "GeometryCollection" => {
            if let Some(geometries) = raw.get("geometries").and_then(JsonValue::as_array) {
                for geometry in geometries {
                    check_geometry(Some(geometry))?;
                }
            }
        }
        other => return Err(GlobeError::InvalidDocumentShape(other.to_string())),
    }

    Ok(GeoJson::from_json_value(raw)?)
}

/// Flattens a document into the geometries to draw, in input order.
pub fn flatten(document: GeoJson) -> GlobeResult<Vec<Geometry>> {
    match document {
        GeoJson::Feature(feature) => Ok(feature.geometry.into_iter().collect()),
        GeoJson::FeatureCollection(collection) => {
            let total = collection.features.len();
            let geometries: Vec<Geometry> = collection
                .features
                .into_iter()
                .filter_map(|feature| feature.geometry)
                .collect();
            if geometries.len() < total {
                warn!(
                    "Skipped {} features without geometry",
                    total - geometries.len()
                );
            }
            Ok(geometries)
        }
        GeoJson::Geometry(Geometry {
            value: Value::GeometryCollection(geometries),
            ..
        }) => Ok(geometries),
        GeoJson::Geometry(geometry) => Err(GlobeError::InvalidDocumentShape(
            kind_name(&geometry.value).to_string(),
        )),
    }
}

/// GeoJSON `type` tag of a decoded geometry.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn type_of(value: &JsonValue) -> &str {
    value.get("type").and_then(JsonValue::as_str).unwrap_or("")
}

// Null geometries are allowed on features; flatten() drops them.
fn check_geometry(geometry: Option<&JsonValue>) -> GlobeResult<()> {
    match geometry {
        None | Some(JsonValue::Null) => Ok(()),
        Some(geometry) => {
            let kind = type_of(geometry);
            if GEOMETRY_TYPES.contains(&kind) {
                Ok(())
            } else {
                Err(GlobeError::InvalidGeometryType(kind.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(geometry: &str) -> String {
        format!(r#"{{ "type": "Feature", "properties": {{}}, "geometry": {geometry} }}"#)
    }

    #[test]
    fn single_feature_yields_one_geometry() {
        let doc = parse_document(&feature(r#"{ "type": "Point", "coordinates": [1, 2] }"#)).unwrap();
        let geometries = flatten(doc).unwrap();
        assert_eq!(geometries.len(), 1);
        assert_eq!(geometries[0].value, Value::Point(vec![1.0, 2.0]));
    }

    #[test]
    fn feature_collection_keeps_order() {
        let features: Vec<String> = (0..4)
            .map(|i| feature(&format!(r#"{{ "type": "Point", "coordinates": [{i}, 0] }}"#)))
            .collect();
        let text = format!(
            r#"{{ "type": "FeatureCollection", "features": [{}] }}"#,
            features.join(",")
        );

        let geometries = flatten(parse_document(&text).unwrap()).unwrap();
        assert_eq!(geometries.len(), 4);
        for (i, geometry) in geometries.iter().enumerate() {
            assert_eq!(geometry.value, Value::Point(vec![i as f64, 0.0]));
        }
    }

    #[test]
    fn geometry_collection_yields_members() {
        let text = r#"{
            "type": "GeometryCollection",
            "geometries": [
                { "type": "LineString", "coordinates": [[0, 0], [1, 1]] },
                { "type": "Point", "coordinates": [3, 4] }
            ]
        }"#;
        let geometries = flatten(parse_document(text).unwrap()).unwrap();
        assert_eq!(geometries.len(), 2);
        assert_eq!(kind_name(&geometries[0].value), "LineString");
        assert_eq!(kind_name(&geometries[1].value), "Point");
    }

    #[test]
    fn unknown_document_type_is_rejected() {
        let err = parse_document(r#"{ "type": "Unknown", "coordinates": [] }"#).unwrap_err();
        assert!(matches!(err, GlobeError::InvalidDocumentShape(ref t) if t == "Unknown"));
    }

    #[test]
    fn bare_geometry_is_rejected() {
        let err = parse_document(r#"{ "type": "Point", "coordinates": [0, 0] }"#).unwrap_err();
        assert!(matches!(err, GlobeError::InvalidDocumentShape(ref t) if t == "Point"));
    }

    #[test]
    fn unknown_geometry_type_is_rejected() {
        let err = parse_document(&feature(r#"{ "type": "Circle", "coordinates": [0, 0] }"#))
            .unwrap_err();
        assert!(matches!(err, GlobeError::InvalidGeometryType(ref t) if t == "Circle"));
    }

    #[test]
    fn null_geometry_is_skipped() {
        let text = format!(
            r#"{{ "type": "FeatureCollection", "features": [{}, {}] }}"#,
            feature("null"),
            feature(r#"{ "type": "Point", "coordinates": [0, 0] }"#)
        );
        let geometries = flatten(parse_document(&text).unwrap()).unwrap();
        assert_eq!(geometries.len(), 1);
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(
            parse_document("{ not json"),
            Err(GlobeError::Json(_))
        ));
    }
}
