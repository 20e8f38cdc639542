//! Yandex geocoder JSON response (`format=json`).

use serde::Deserialize;

use super::{GeocodeError, Geocoded};
use crate::models::GeoPoint;

#[derive(Debug, Deserialize)]
struct YandexResponse {
    response: ResponseBody,
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    #[serde(rename = "GeoObjectCollection")]
    collection: GeoObjectCollection,
}

#[derive(Debug, Deserialize)]
struct GeoObjectCollection {
    #[serde(rename = "metaDataProperty")]
    meta: CollectionMeta,
    #[serde(rename = "featureMember", default)]
    members: Vec<FeatureMember>,
}

#[derive(Debug, Deserialize)]
struct CollectionMeta {
    #[serde(rename = "GeocoderResponseMetaData")]
    data: ResponseMetaData,
}

#[derive(Debug, Deserialize)]
struct ResponseMetaData {
    found: Count,
}

/// The provider sends counts as strings; accept plain numbers too
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Count {
    Number(u64),
    Text(String),
}

impl Count {
    fn value(&self) -> Result<u64, GeocodeError> {
        match self {
            Count::Number(n) => Ok(*n),
            Count::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| GeocodeError::Decode(format!("invalid found count '{}'", s))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FeatureMember {
    #[serde(rename = "GeoObject")]
    object: GeoObject,
}

#[derive(Debug, Deserialize)]
struct GeoObject {
    #[serde(rename = "Point")]
    point: Option<PointPos>,
}

#[derive(Debug, Deserialize)]
struct PointPos {
    /// "lon lat"
    pos: String,
}

/// Decode a geocoder body into the match count and first position
pub fn parse_response(body: &str) -> Result<Geocoded, GeocodeError> {
    let parsed: YandexResponse =
        serde_json::from_str(body).map_err(|e| GeocodeError::Decode(e.to_string()))?;
    let collection = parsed.response.collection;
    let found = collection.meta.data.found.value()?;

    if found == 0 {
        return Ok(Geocoded::not_found());
    }

    let position = match collection
        .members
        .first()
        .and_then(|m| m.object.point.as_ref())
    {
        Some(point) => Some(GeoPoint::from_lon_lat_str(&point.pos).ok_or_else(|| {
            GeocodeError::Decode(format!("invalid position '{}'", point.pos))
        })?),
        None => None,
    };

    Ok(Geocoded { found, position })
}
