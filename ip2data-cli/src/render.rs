//! Plain-text rendering of the dashboard payload.

use chrono::NaiveDate;
use ip2data_core::model::{CurrentAirQuality, Dashboard};

/// WMO weather interpretation codes.
pub fn weather_description(code: u16) -> &'static str {
    match code {
        0 => "Clear Sky",
        1 => "Mainly Clear",
        2 => "Partly Cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Icy Fog",
        51 => "Light Drizzle",
        53 => "Moderate Drizzle",
        55 => "Dense Drizzle",
        61 => "Slight Rain",
        63 => "Moderate Rain",
        65 => "Heavy Rain",
        71 => "Slight Snow",
        73 => "Moderate Snow",
        75 => "Heavy Snow",
        77 => "Snow Grains",
        80 => "Slight Showers",
        81 => "Moderate Showers",
        82 => "Violent Showers",
        85 => "Slight Snow Showers",
        86 => "Heavy Snow Showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm w/ Hail",
        99 => "Thunderstorm w/ Heavy Hail",
        _ => "Unknown",
    }
}

/// Wind direction as a 16-point compass label.
pub fn compass(deg: f64) -> &'static str {
    const DIRS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];
    DIRS[((deg / 22.5).round() as usize) % 16]
}

/// Daylight duration in seconds as "Xh Ym".
pub fn format_daylight(seconds: f64) -> String {
    let total = seconds as u64;
    format!("{}h {}m", total / 3600, (total % 3600) / 60)
}

/// Compact large-number formatting: 1.3K, 2.5M, 1.4B.
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.1}B", n as f64 / 1e9)
    } else if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1e6)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1e3)
    } else {
        n.to_string()
    }
}

pub fn aqi_level(aqi: f64) -> &'static str {
    if aqi <= 50.0 {
        "Good"
    } else if aqi <= 100.0 {
        "Moderate"
    } else if aqi <= 150.0 {
        "Unhealthy for Sensitive"
    } else if aqi <= 200.0 {
        "Unhealthy"
    } else if aqi <= 300.0 {
        "Very Unhealthy"
    } else {
        "Hazardous"
    }
}

/// AQI display with scale fallback: the US index when present, otherwise the
/// European one, otherwise an honest "n/a".
pub fn display_aqi(air: &CurrentAirQuality) -> String {
    match (air.us_aqi, air.european_aqi) {
        (Some(us), _) => format!("{us:.0} US ({})", aqi_level(us)),
        (None, Some(eu)) => format!("{eu:.0} EU ({})", aqi_level(eu)),
        (None, None) => "n/a".to_string(),
    }
}

/// "Today", "Tomorrow", or a short weekday name, relative to `today`.
pub fn day_name(date_str: &str, today: NaiveDate) -> String {
    let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") else {
        return date_str.to_string();
    };

    if date == today {
        "Today".to_string()
    } else if date == today.succ_opt().unwrap_or(today) {
        "Tomorrow".to_string()
    } else {
        date.format("%a").to_string()
    }
}

pub fn print_dashboard(d: &Dashboard, today: NaiveDate) {
    let geo = &d.geo;
    let cur = &d.weather.current;
    let air = &d.air_quality.current;
    let country = &d.country;

    println!();
    println!("{}, {}, {} ({})", geo.city, geo.region_name, geo.country, geo.zip);
    println!("{:.4}, {:.4} · {}", geo.lat, geo.lon, geo.timezone);
    println!("IP {} · {} · {}", d.ip.ip, geo.isp, geo.asn);

    println!();
    println!(
        "Now: {:.1}°C (feels {:.1}°C), {}",
        cur.temperature_2m,
        cur.apparent_temperature,
        weather_description(cur.weather_code)
    );
    println!(
        "Humidity {:.0}% · Wind {:.1} km/h {} · Pressure {:.0} hPa",
        cur.relative_humidity_2m,
        cur.wind_speed_10m,
        compass(cur.wind_direction_10m),
        cur.surface_pressure
    );
    println!("Visibility {:.1} km · UV index {:.1}", cur.visibility / 1000.0, cur.uv_index);

    println!();
    println!("Air quality: {}", display_aqi(air));
    println!(
        "PM2.5 {:.1} · PM10 {:.1} · O3 {:.0} · NO2 {:.1} · CO {:.0} µg/m³",
        air.pm2_5, air.pm10, air.ozone, air.nitrogen_dioxide, air.carbon_monoxide
    );

    println!();
    println!("7-day forecast:");
    let daily = &d.weather.daily;
    for (i, date) in daily.time.iter().enumerate() {
        println!(
            "  {:<9} {:>5.1}° / {:<5.1}°  {:<22} rain {:.1} mm · daylight {}",
            day_name(date, today),
            daily.temperature_2m_max[i],
            daily.temperature_2m_min[i],
            weather_description(daily.weather_code[i]),
            daily.precipitation_sum[i],
            format_daylight(daily.daylight_duration[i]),
        );
    }

    println!();
    println!("{} ({})", country.name.official, country.region);
    if let Some(capital) = country.capital.first() {
        println!("Capital {capital} · {}", country.subregion);
    }
    println!(
        "Population {} · Area {} km²",
        format_number(country.population),
        format_number(country.area as u64)
    );

    let currencies: Vec<String> = country
        .currencies
        .values()
        .map(|c| format!("{} ({})", c.name, c.symbol))
        .collect();
    if !currencies.is_empty() {
        println!("Currency: {}", currencies.join(", "));
    }

    let languages: Vec<&str> = country.languages.values().map(String::as_str).collect();
    if !languages.is_empty() {
        println!("Languages: {}", languages.join(", "));
    }
}
