use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolved public IP of the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpInfo {
    pub ip: String,
}

/// Geolocation record as returned by ip-api.com for a single IP.
///
/// `status` is "success" or "fail"; on failure `message` carries the
/// upstream's own explanation and the location fields are meaningless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoLocation {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub country: String,
    #[serde(rename = "countryCode", default)]
    pub country_code: String,
    #[serde(default)]
    pub region: String,
    #[serde(rename = "regionName", default)]
    pub region_name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub isp: String,
    #[serde(default)]
    pub org: String,
    #[serde(rename = "as", default)]
    pub asn: String,
    #[serde(default)]
    pub query: String,
}

impl GeoLocation {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Current conditions plus a 7-day daily series, as served by Open-Meteo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub current: CurrentWeather,
    pub daily: DailyForecast,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub time: String,
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    pub apparent_temperature: f64,
    pub is_day: u8,
    pub precipitation: f64,
    pub rain: f64,
    pub weather_code: u16,
    pub cloud_cover: f64,
    pub wind_speed_10m: f64,
    pub wind_direction_10m: f64,
    pub wind_gusts_10m: f64,
    pub surface_pressure: f64,
    pub visibility: f64,
    pub uv_index: f64,
}

/// Parallel arrays, one entry per forecast day, index-aligned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    pub time: Vec<String>,
    pub weather_code: Vec<u16>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub precipitation_sum: Vec<f64>,
    pub wind_speed_10m_max: Vec<f64>,
    pub uv_index_max: Vec<f64>,
    pub sunrise: Vec<String>,
    pub sunset: Vec<String>,
    pub daylight_duration: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQuality {
    pub current: CurrentAirQuality,
}

/// Pollutant concentrations in µg/m³ plus the two AQI scales.
/// Either AQI index may be missing for locations one model doesn't cover.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAirQuality {
    pub time: String,
    pub pm10: f64,
    pub pm2_5: f64,
    pub carbon_monoxide: f64,
    pub nitrogen_dioxide: f64,
    pub ozone: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub european_aqi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub us_aqi: Option<f64>,
}

/// Country facts from REST Countries, keyed by the 2-letter country code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryProfile {
    pub name: CountryName,
    #[serde(default)]
    pub capital: Vec<String>,
    pub population: u64,
    pub area: f64,
    #[serde(default)]
    pub currencies: HashMap<String, Currency>,
    #[serde(default)]
    pub languages: HashMap<String, String>,
    pub flags: CountryFlags,
    #[serde(default)]
    pub timezones: Vec<String>,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub subregion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    pub official: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryFlags {
    #[serde(default)]
    pub png: String,
    #[serde(default)]
    pub svg: String,
    #[serde(default)]
    pub alt: String,
}

/// The merged payload served by `GET /api/all`. Produced atomically:
/// either every section is present or the request failed as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub ip: IpInfo,
    pub geo: GeoLocation,
    pub weather: WeatherSnapshot,
    #[serde(rename = "airQuality")]
    pub air_quality: AirQuality,
    pub country: CountryProfile,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[test]
    fn geo_failure_payload_decodes() {
        let json = r#"{"status":"fail","message":"private range","query":"192.168.0.1"}"#;
        let geo: GeoLocation = serde_json::from_str(json).expect("fail payload should decode");
        assert!(!geo.is_success());
        assert_eq!(geo.message.as_deref(), Some("private range"));
    }

    #[test]
    fn air_quality_tolerates_missing_aqi() {
        let json = r#"{"current":{"time":"2025-06-01T12:00","pm10":12.0,"pm2_5":5.3,
            "carbon_monoxide":190.0,"nitrogen_dioxide":9.1,"ozone":61.0,"us_aqi":42}}"#;
        let air: AirQuality = serde_json::from_str(json).expect("partial AQI should decode");
        assert_eq!(air.current.us_aqi, Some(42.0));
        assert_eq!(air.current.european_aqi, None);
    }

    #[test]
    fn dashboard_serializes_air_quality_in_camel_case() {
        let json = serde_json::to_string(&sample_dashboard()).expect("serialize");
        assert!(json.contains("\"airQuality\""));
        assert!(!json.contains("air_quality"));
    }

    pub(crate) fn sample_geo() -> GeoLocation {
        serde_json::from_str(
            r#"{"status":"success","country":"United States","countryCode":"US",
                "region":"CA","regionName":"California","city":"Mountain View",
                "zip":"94043","lat":37.4056,"lon":-122.0775,
                "timezone":"America/Los_Angeles","isp":"Google LLC","org":"Google Public DNS",
                "as":"AS15169 Google LLC","query":"8.8.8.8"}"#,
        )
        .expect("sample geo")
    }

    pub(crate) fn sample_dashboard() -> Dashboard {
        Dashboard {
            ip: IpInfo { ip: "8.8.8.8".into() },
            geo: sample_geo(),
            weather: sample_weather(),
            air_quality: sample_air(),
            country: sample_country(),
        }
    }

    pub(crate) fn sample_weather() -> WeatherSnapshot {
        serde_json::from_str(
            r#"{"latitude":37.4056,"longitude":-122.0775,"timezone":"America/Los_Angeles",
                "current":{"time":"2025-06-01T12:00","temperature_2m":21.4,
                    "relative_humidity_2m":48,"apparent_temperature":20.9,"is_day":1,
                    "precipitation":0.0,"rain":0.0,"weather_code":1,"cloud_cover":20,
                    "wind_speed_10m":11.2,"wind_direction_10m":290,"wind_gusts_10m":19.1,
                    "surface_pressure":1014.2,"visibility":24140.0,"uv_index":6.1},
                "daily":{"time":["2025-06-01","2025-06-02","2025-06-03","2025-06-04",
                        "2025-06-05","2025-06-06","2025-06-07"],
                    "weather_code":[1,2,3,61,1,0,2],
                    "temperature_2m_max":[22.5,23.1,21.0,18.4,20.2,24.0,25.3],
                    "temperature_2m_min":[12.1,12.8,11.4,10.9,11.2,12.5,13.0],
                    "precipitation_sum":[0.0,0.0,0.2,4.1,0.0,0.0,0.0],
                    "wind_speed_10m_max":[15.0,14.2,16.8,21.3,13.9,12.1,11.8],
                    "uv_index_max":[7.1,7.3,6.2,4.8,6.9,7.5,7.6],
                    "sunrise":["2025-06-01T05:48","2025-06-02T05:48","2025-06-03T05:47",
                        "2025-06-04T05:47","2025-06-05T05:47","2025-06-06T05:47","2025-06-07T05:46"],
                    "sunset":["2025-06-01T20:22","2025-06-02T20:23","2025-06-03T20:24",
                        "2025-06-04T20:24","2025-06-05T20:25","2025-06-06T20:25","2025-06-07T20:26"],
                    "daylight_duration":[52440.0,52500.0,52560.0,52620.0,52680.0,52740.0,52800.0]}}"#,
        )
        .expect("sample weather")
    }

    pub(crate) fn sample_air() -> AirQuality {
        serde_json::from_str(
            r#"{"current":{"time":"2025-06-01T12:00","pm10":14.0,"pm2_5":6.2,
                "carbon_monoxide":201.0,"nitrogen_dioxide":12.4,"ozone":68.0,
                "european_aqi":31,"us_aqi":39}}"#,
        )
        .expect("sample air")
    }

    pub(crate) fn sample_country() -> CountryProfile {
        serde_json::from_str(
            r#"{"name":{"common":"United States","official":"United States of America"},
                "capital":["Washington, D.C."],"population":329484123,"area":9372610.0,
                "currencies":{"USD":{"name":"United States dollar","symbol":"$"}},
                "languages":{"eng":"English"},
                "flags":{"png":"https://flagcdn.com/w320/us.png",
                    "svg":"https://flagcdn.com/us.svg","alt":"The flag of the United States"},
                "timezones":["UTC-12:00","UTC-05:00"],"region":"Americas",
                "subregion":"North America"}"#,
        )
        .expect("sample country")
    }
}
