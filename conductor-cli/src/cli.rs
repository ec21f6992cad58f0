use anyhow::Result;
use clap::Parser;
use inquire::{InquireError, Text};

use conductor_core::{Conductor, HttpBackend, SUGGESTIONS, map::MapView};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "conductor", version, about = "Bakı bus-route assistant, in the terminal")]
pub struct Cli {
    /// Base URL of the Conductor backend.
    #[arg(long, default_value = "http://localhost:8000")]
    pub server: String,

    /// Initial latitude, e.g. 40.4093.
    #[arg(long, requires = "lng")]
    pub lat: Option<f64>,

    /// Initial longitude, e.g. 49.8671.
    #[arg(long, requires = "lat")]
    pub lng: Option<f64>,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut conductor = Conductor::new(Box::new(HttpBackend::new(self.server)));

        let greeting = match conductor.start(self.lat.zip(self.lng)).await {
            Ok(greeting) => greeting,
            Err(err) => {
                eprintln!("Xəta baş verdi. Zəhmət olmasa yenidən cəhd edin. ({err})");
                return Err(err.into());
            }
        };

        println!("{greeting}");
        print_stops(conductor.map());

        println!();
        println!("Təkliflər: {}", SUGGESTIONS.join(" · "));
        println!("(/location <lat> <lng> yerinizi yeniləyir, boş sətir çıxışdır)");

        loop {
            let line = match Text::new(">").prompt() {
                Ok(line) => line,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
                Err(err) => return Err(err.into()),
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                break;
            }

            if let Some(rest) = trimmed.strip_prefix("/location") {
                match parse_coords(rest) {
                    Some((lat, lng)) => match conductor.update_location(lat, lng).await {
                        Ok(()) => {
                            println!("Yeriniz yeniləndi.");
                            print_stops(conductor.map());
                        }
                        Err(err) => eprintln!("Yer məlumatını yeniləyə bilmədik. ({err})"),
                    },
                    None => eprintln!("İstifadə: /location <lat> <lng>"),
                }
                continue;
            }

            match conductor.send(trimmed).await {
                Ok(reply) => {
                    println!("{}", reply.reply);
                    print_stops(conductor.map());
                }
                Err(err) => {
                    eprintln!("Bağlantı xətası. İnternet bağlantınızı yoxlayın. ({err})");
                }
            }
        }

        Ok(())
    }
}

fn parse_coords(rest: &str) -> Option<(f64, f64)> {
    let mut parts = rest.split_whitespace();
    let lat = parts.next()?.parse().ok()?;
    let lng = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((lat, lng))
}

fn print_stops(map: &MapView) {
    if map.markers().is_empty() {
        return;
    }

    println!();
    println!("Xəritədə:");
    for marker in map.markers() {
        match marker.distance_meters {
            Some(distance) => {
                println!("  • {} ({:.0} m)", marker.name, distance);
            }
            None => println!("  • {}", marker.name),
        }
    }
}
