//! Geocoding port and its implementations.
//!
//! `HttpGeocoder` talks to a LocationIQ/Nominatim-style provider over HTTP;
//! `StaticGeocoder` answers from an in-memory table and is meant for tests
//! and local development without an API key.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use super::geometry::calculate_distance;
use super::models::Coordinates;
use super::services::MapError;

/// Forward and reverse address lookup.
///
/// `Ok(None)` means the provider answered but found nothing.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn search(&self, query: &str) -> Result<Option<Coordinates>, MapError>;

    async fn reverse(&self, coordinates: &Coordinates) -> Result<Option<String>, MapError>;
}

/// Provider value that may arrive as a JSON string or a number
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Text(String),
    Number(f64),
}

impl Degrees {
    fn value(&self) -> Result<f64, MapError> {
        match self {
            Degrees::Number(n) => Ok(*n),
            Degrees::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| MapError::InvalidResponse(format!("bad coordinate '{}'", s))),
        }
    }
}

/// One forward search hit; only the fields we consume
#[derive(Debug, Deserialize)]
struct SearchPlace {
    lat: Degrees,
    lon: Degrees,
}

/// Reverse lookup payload
#[derive(Debug, Deserialize)]
struct ReversePlace {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP geocoding client.
///
/// Sends `GET {base_url}/search?key=..&q=..&format=json` and
/// `GET {base_url}/reverse?key=..&lat=..&lon=..&format=json`.
#[derive(Clone)]
pub struct HttpGeocoder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpGeocoder {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn search(&self, query: &str) -> Result<Option<Coordinates>, MapError> {
        let response = self
            .client
            .get(self.endpoint("search"))
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query),
                ("format", "json"),
            ])
            .send()
            .await?;

        // The provider reports "no match" as 404
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(MapError::Status(response.status().as_u16()));
        }

        let places: Vec<SearchPlace> = response.json().await?;
        match places.first() {
            Some(place) => Ok(Some(Coordinates {
                latitude: place.lat.value()?,
                longitude: place.lon.value()?,
            })),
            None => Ok(None),
        }
    }

    async fn reverse(&self, coordinates: &Coordinates) -> Result<Option<String>, MapError> {
        let lat = coordinates.latitude.to_string();
        let lon = coordinates.longitude.to_string();

        let response = self
            .client
            .get(self.endpoint("reverse"))
            .query(&[
                ("key", self.api_key.as_str()),
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(MapError::Status(response.status().as_u16()));
        }

        let place: ReversePlace = response.json().await?;
        if let Some(error) = place.error {
            tracing::debug!("Reverse geocode returned error payload: {}", error);
            return Ok(None);
        }
        Ok(place.display_name.filter(|name| !name.is_empty()))
    }
}

/// In-memory geocoder backed by a fixed address table.
///
/// Reverse lookups return the nearest known place within `reverse_radius_km`.
#[derive(Debug, Clone)]
pub struct StaticGeocoder {
    places: HashMap<String, (Coordinates, String)>,
    reverse_radius_km: f64,
    unavailable: bool,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self {
            places: HashMap::new(),
            reverse_radius_km: 0.5,
            unavailable: false,
        }
    }

    /// Register an address (matched case-insensitively)
    pub fn with_place(mut self, address: &str, coordinates: Coordinates) -> Self {
        self.places.insert(
            normalize_query(address),
            (coordinates, address.trim().to_string()),
        );
        self
    }

    /// Make every lookup fail as if the provider were down
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    fn check_available(&self) -> Result<(), MapError> {
        if self.unavailable {
            Err(MapError::Status(503))
        } else {
            Ok(())
        }
    }
}

impl Default for StaticGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn search(&self, query: &str) -> Result<Option<Coordinates>, MapError> {
        self.check_available()?;
        Ok(self
            .places
            .get(&normalize_query(query))
            .map(|(coordinates, _)| *coordinates))
    }

    async fn reverse(&self, coordinates: &Coordinates) -> Result<Option<String>, MapError> {
        self.check_available()?;
        let nearest = self
            .places
            .values()
            .map(|(point, name)| (calculate_distance(coordinates, point), name))
            .filter(|(distance, _)| *distance <= self.reverse_radius_km)
            .min_by(|a, b| a.0.total_cmp(&b.0));
        Ok(nearest.map(|(_, name)| name.clone()))
    }
}

/// Lower-cased, whitespace-collapsed form of an address query
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
