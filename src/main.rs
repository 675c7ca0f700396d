use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hotelscope::config::HotelScopeConfig;
use hotelscope::dashboard::{ComparisonView, HotelOverview, NearbyView};
use hotelscope::logging::init_tracing;
use hotelscope::{HotelDashboard, HotelScopeError, Region, TourApiClient};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Hotel proximity dashboard: nearby attractions and regional hotel comparison
#[derive(Parser, Debug)]
#[command(name = "hotelscope", version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print views as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the hotel roster of a region
    Hotels {
        /// seoul, busan or jeju
        #[arg(short, long)]
        region: Region,
    },
    /// Show one hotel with its nearby POI count and photos
    Overview {
        #[arg(short, long)]
        region: Region,
        /// Exact hotel name as listed by `hotels`
        #[arg(long)]
        hotel: String,
        /// Search radius in meters
        #[arg(long)]
        radius: Option<u32>,
    },
    /// List the POIs around one hotel
    Nearby {
        #[arg(short, long)]
        region: Region,
        #[arg(long)]
        hotel: String,
        #[arg(long)]
        radius: Option<u32>,
        /// How many nearest POIs to highlight
        #[arg(long)]
        top: Option<usize>,
    },
    /// Compare price, rating and nearby POIs across the roster
    Compare {
        #[arg(short, long)]
        region: Region,
        #[arg(long)]
        radius: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<HotelScopeError>() {
                Some(err) => eprintln!("{}\n  caused by: {err}", err.user_message()),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = HotelScopeConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    init_tracing(&config.logging, cli.verbose)?;

    if let Command::Nearby { top: Some(top), .. } = &cli.command {
        config.defaults.nearest_count = (*top).max(1);
    }

    let client = TourApiClient::new(&config.provider)?;
    let dashboard = HotelDashboard::from_config(Arc::new(client), &config);
    let default_radius = config.defaults.radius_m;

    match cli.command {
        Command::Hotels { region } => {
            let hotels = dashboard.hotels(region).await?;
            if cli.json {
                print_json(hotels.as_ref())?;
            } else {
                println!("{} hotels in {}", hotels.len(), region);
                for hotel in hotels.iter() {
                    println!(
                        "  {:<40} {:>9} KRW  {:.1}  ({})",
                        hotel.name,
                        hotel.price,
                        hotel.rating,
                        hotel.coordinate.format_coordinates()
                    );
                }
            }
        }
        Command::Overview {
            region,
            hotel,
            radius,
        } => {
            let view = dashboard
                .overview(region, &hotel, radius.unwrap_or(default_radius))
                .await?;
            if cli.json {
                print_json(&view)?;
            } else {
                print_overview(&view);
            }
        }
        Command::Nearby {
            region,
            hotel,
            radius,
            ..
        } => {
            let view = dashboard
                .nearby(region, &hotel, radius.unwrap_or(default_radius))
                .await?;
            if cli.json {
                print_json(&view)?;
            } else {
                print_nearby(&view);
            }
        }
        Command::Compare { region, radius } => {
            let view = dashboard
                .comparison(region, radius.unwrap_or(default_radius))
                .await?;
            if cli.json {
                print_json(&view)?;
            } else {
                print_comparison(&view);
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_overview(view: &HotelOverview) {
    let hotel = &view.hotel;
    println!("{} ({})", hotel.name, view.region);
    println!("  Price:   {} KRW", hotel.price);
    println!("  Rating:  {:.1}", hotel.rating);
    println!(
        "  POIs within {}m: {}",
        view.radius_m,
        hotel.tourist_count.unwrap_or(0)
    );
    if view.image_urls.is_empty() {
        println!("  No photos available.");
    }
    for url in &view.image_urls {
        println!("  Photo: {url}");
    }
}

fn print_nearby(view: &NearbyView) {
    println!(
        "POIs within {}m of {} ({})",
        view.radius_m, view.hotel.name, view.region
    );
    if view.pois.is_empty() {
        if view.data_available {
            println!("  No points of interest nearby.");
        } else {
            println!("  No data: the tourism service could not be reached.");
        }
        return;
    }

    for classified in &view.pois {
        let category = &classified.category;
        if category.is_uncategorized() {
            println!(
                "  {:<40} {} (type {})",
                classified.poi.name, category.display_name, category.id
            );
        } else {
            println!("  {:<40} {}", classified.poi.name, category.display_name);
        }
    }

    println!("\nBy category:");
    for (name, count) in &view.category_counts {
        println!("  {name:<28} {count:>4}");
    }

    println!("\nNearest:");
    for (rank, poi) in view.nearest.iter().enumerate() {
        println!(
            "  {}. {} ({})",
            rank + 1,
            poi.name,
            poi.category().display_name
        );
    }
}

fn print_comparison(view: &ComparisonView) {
    println!(
        "{} hotels in {} (POIs within {}m)",
        view.hotels.len(),
        view.region,
        view.radius_m
    );
    println!("  {:<40} {:>9} {:>6} {:>6}", "Name", "Price", "Rating", "POIs");
    for hotel in &view.hotels {
        println!(
            "  {:<40} {:>9} {:>6.1} {:>6}",
            hotel.name,
            hotel.price,
            hotel.rating,
            hotel.tourist_count.unwrap_or(0)
        );
    }
}
