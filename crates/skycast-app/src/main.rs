//! Skycast CLI: one refresh cycle, printed as a dashboard.

use std::sync::Arc;

use anyhow::Result;

use skycast_app::DataOrchestrator;
use skycast_core::settings::celsius_to_fahrenheit;
use skycast_core::{Config, TemperatureUnit};
use skycast_location::{Coordinates, LocationGateway, StaticLocationService};
use skycast_news::NewsClient;
use skycast_weather::types::{describe_weather_code, weather_code_icon};
use skycast_weather::WeatherClient;

#[tokio::main]
async fn main() -> Result<()> {
    skycast_core::init()?;

    let (config, _validation) = Config::load_validated()?;

    let service = StaticLocationService::new(Coordinates {
        latitude: config.location.latitude,
        longitude: config.location.longitude,
    });
    let gateway = Arc::new(LocationGateway::new(Arc::new(service)));
    let weather = WeatherClient::new(config.weather.base_url.clone());
    let news = NewsClient::new(
        config.news.effective_api_key(),
        config.news.keyed_base_url.clone(),
        config.news.free_base_url.clone(),
    );

    let orchestrator = DataOrchestrator::new(gateway, weather, news, config.news.page_size);
    orchestrator.initialize().await;
    orchestrator.refresh(false).await;

    let state = orchestrator.state();

    if let Some(notice) = &state.notice {
        println!("Error: {}", notice.message);
        return Ok(());
    }
    if let Some(message) = &state.location_error {
        println!("Location: {message}");
    }

    let unit = state.settings.temperature_unit;
    let display = |c: f64| match unit {
        TemperatureUnit::Celsius => c,
        TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(c),
    };

    match &state.weather {
        Some(snapshot) => {
            println!("Current Weather");
            println!(
                "  {:.1}°{} {} {}",
                display(snapshot.current.temperature_c),
                unit.label(),
                weather_code_icon(snapshot.current.weather_code),
                describe_weather_code(snapshot.current.weather_code),
            );
            println!("\n{}-Day Forecast", snapshot.forecast.len());
            for day in &snapshot.forecast {
                println!(
                    "  {}  {:>3.0}° / {:>3.0}°{}  {}",
                    day.date,
                    display(day.min_temp_c),
                    display(day.max_temp_c),
                    unit.label(),
                    describe_weather_code(day.weather_code),
                );
            }
        }
        None => println!("No weather data available."),
    }

    println!("\nHeadlines");
    for article in &state.news {
        println!("  {} ({})", article.title, article.source);
    }

    Ok(())
}
