// Current-weather tool: geocoding plus forecast lookup

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, Tool};
use anyhow::{Context, Result};
use daybrief_core::config::{HttpConfig, WeatherConfig};
use serde::Deserialize;
use std::time::Duration;

/// Resolves a city name to coordinates and reports the current weather.
///
/// Geocoding is the one place with retry: transient upstream failures are
/// retried within the configured bounds. A city that simply does not resolve
/// is a domain error, reported once without retrying. Either way the caller
/// receives text; no fault crosses the tool boundary.
pub struct WeatherTool {
    client: reqwest::Client,
    config: WeatherConfig,
}

#[derive(Debug, thiserror::Error)]
enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Transient(String),

    #[error("Could not find coordinates for '{0}'. Check the city name.")]
    CityNotFound(String),
}

#[derive(Debug, Deserialize)]
struct GeocodePlace {
    lat: String,
    lon: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeather>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: i64,
    time: String,
}

impl WeatherTool {
    pub fn new(http: HttpConfig, config: WeatherConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(http.user_agent)
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client, config }
    }

    /// One geocoding attempt. An empty result set is a domain error, not a
    /// transient one.
    async fn geocode_once(&self, city: &str) -> Result<(f64, f64), GeocodeError> {
        let response = self
            .client
            .get(&self.config.geocode_url)
            .query(&[("q", city), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| GeocodeError::Transient(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Transient(format!("HTTP {}", status.as_u16())));
        }

        let places: Vec<GeocodePlace> = response
            .json()
            .await
            .map_err(|e| GeocodeError::Transient(format!("invalid geocode payload: {e}")))?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::CityNotFound(city.to_string()))?;

        let lat: f64 = place
            .lat
            .parse()
            .map_err(|_| GeocodeError::Transient(format!("bad latitude: {}", place.lat)))?;
        let lon: f64 = place
            .lon
            .parse()
            .map_err(|_| GeocodeError::Transient(format!("bad longitude: {}", place.lon)))?;

        tracing::info!(city, lat, lon, "coordinates resolved");
        Ok((lat, lon))
    }

    async fn geocode(&self, city: &str) -> Result<(f64, f64), GeocodeError> {
        self.config
            .retry
            .run(
                || self.geocode_once(city),
                |e| matches!(e, GeocodeError::Transient(_)),
            )
            .await
    }

    async fn fetch_current(&self, lat: f64, lon: f64) -> Result<CurrentWeather, String> {
        let response = self
            .client
            .get(&self.config.forecast_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current_weather", "true".to_string()),
                ("timezone", self.config.timezone.clone()),
            ])
            .send()
            .await
            .map_err(|e| format!("forecast request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("forecast API returned HTTP {}", status.as_u16()));
        }

        let parsed: ForecastResponse = response
            .json()
            .await
            .map_err(|e| format!("invalid forecast payload: {e}"))?;

        parsed
            .current_weather
            .ok_or_else(|| "forecast payload had no current weather section".to_string())
    }

    fn format_report(city: &str, weather: &CurrentWeather) -> String {
        let summary = serde_json::json!({
            "city": city,
            "temperature": format!("{}°C", weather.temperature),
            "wind_speed": format!("{} km/h", weather.windspeed),
            "weather_code": weather.weathercode,
            "time": weather.time,
        });
        serde_json::to_string_pretty(&summary).unwrap_or_else(|_| summary.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct WeatherArgs {
    city_name: String,
}

#[async_trait::async_trait]
impl Tool for WeatherTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_weather".to_string(),
            description: "Get the current weather for a city: temperature, wind speed, \
                          weather code and observation time."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "city_name": json_schema_string("Name of the city to look up")
                }),
                vec!["city_name"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: WeatherArgs =
            serde_json::from_value(arguments).context("Invalid arguments for get_weather")?;

        tracing::info!(city = %args.city_name, "weather lookup");

        let (lat, lon) = match self.geocode(&args.city_name).await {
            Ok(coords) => coords,
            Err(e) => return Ok(CallToolResult::error(e.to_string())),
        };

        match self.fetch_current(lat, lon).await {
            Ok(weather) => Ok(CallToolResult::text(Self::format_report(
                &args.city_name,
                &weather,
            ))),
            Err(msg) => Ok(CallToolResult::error(format!("Weather lookup failed: {msg}"))),
        }
    }
}
