use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::ArtifactStore;
use llm_client::{
    AccommodationForm, AccommodationType, Activity, Ambiance, Cuisine, DietaryRestriction,
    DiningExperience, FoodForm, ItineraryRequest, LocalCuisine, Proximity, PublicTransport,
    RentalService, TransportForm, TransportMode, TravelParty, TripForm,
};
use pipeline::RecommendationCombiner;
use rand::Rng;
use server::{describe_place, present, CityRecommendation, Config};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Travel Recs - City Recommendation Engine
#[derive(Parser)]
#[command(name = "travel-recs")]
#[command(about = "City recommendations and AI trip planning", long_about = None)]
struct Cli {
    /// Path to the artifact directory (defaults to ARTIFACTS_DIR or "artifacts")
    #[arg(short, long)]
    artifacts_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the cities recommendations can be requested for
    Places {
        /// Only show cities whose name contains this text (case-insensitive)
        #[arg(long)]
        filter: Option<String>,
    },

    /// Get city recommendations
    Recommend {
        /// City to get recommendations for
        #[arg(long)]
        city: String,

        /// Show which lookup suggested each city
        #[arg(long)]
        explain: bool,
    },

    /// Show country, population and area for a city
    Info {
        #[arg(long)]
        city: String,
    },

    /// Ask the language model to plan part of a trip
    Plan {
        #[command(subcommand)]
        section: PlanCommand,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[derive(Subcommand)]
enum PlanCommand {
    /// Day-by-day itinerary
    Trip {
        #[arg(long)]
        location: String,
        /// e.g. Low, Medium, High
        #[arg(long, default_value = "Medium")]
        budget: String,
        /// e.g. "5 days", "1 week"
        #[arg(long, default_value = "1 week")]
        dates: String,
        #[arg(long, default_value = "Solo")]
        party: TravelParty,
        #[arg(long, value_delimiter = ',')]
        activities: Vec<Activity>,
    },

    /// Where to stay
    Accommodation {
        #[arg(long)]
        location: String,
        #[arg(long, default_value = "Medium")]
        budget: String,
        #[arg(long = "type", default_value = "Hotels")]
        accommodation_type: AccommodationType,
        #[arg(long, value_delimiter = ',')]
        proximity: Vec<Proximity>,
        #[arg(long, default_value = "Solo")]
        party: TravelParty,
    },

    /// How to get around
    Transport {
        #[arg(long)]
        location: String,
        #[arg(long, default_value = "Train")]
        mode: TransportMode,
        #[arg(long, value_delimiter = ',')]
        rentals: Vec<RentalService>,
        #[arg(long, value_delimiter = ',')]
        public_transport: Vec<PublicTransport>,
        #[arg(long, default_value = "Solo")]
        party: TravelParty,
    },

    /// Where and what to eat
    Food {
        #[arg(long)]
        location: String,
        #[arg(long, value_delimiter = ',')]
        diet: Vec<DietaryRestriction>,
        #[arg(long, value_delimiter = ',')]
        local_cuisine: Vec<LocalCuisine>,
        #[arg(long, default_value = "Casual Dining")]
        dining: DiningExperience,
        #[arg(long, default_value = "Trendy")]
        ambiance: Ambiance,
        #[arg(long, value_delimiter = ',')]
        cuisines: Vec<Cuisine>,
    },
}

impl From<PlanCommand> for ItineraryRequest {
    fn from(command: PlanCommand) -> Self {
        match command {
            PlanCommand::Trip {
                location,
                budget,
                dates,
                party,
                activities,
            } => ItineraryRequest::Trip(TripForm {
                location,
                budget,
                travel_dates: dates,
                travel_party: party,
                activities,
            }),
            PlanCommand::Accommodation {
                location,
                budget,
                accommodation_type,
                proximity,
                party,
            } => ItineraryRequest::Accommodation(AccommodationForm {
                location,
                budget,
                accommodation_type,
                proximity,
                travel_party: party,
            }),
            PlanCommand::Transport {
                location,
                mode,
                rentals,
                public_transport,
                party,
            } => ItineraryRequest::Transport(TransportForm {
                location,
                mode,
                rental_services: rentals,
                public_transport,
                travel_party: party,
            }),
            PlanCommand::Food {
                location,
                diet,
                local_cuisine,
                dining,
                ambiance,
                cuisines,
            } => ItineraryRequest::Food(FoodForm {
                location,
                dietary_restrictions: diet,
                local_cuisine,
                dining_experience: dining,
                ambiance,
                cuisines,
            }),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let artifacts_dir = cli
        .artifacts_dir
        .unwrap_or_else(|| config.artifacts_dir.clone());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Places { filter } => handle_places(load_store(&artifacts_dir)?, filter),
        Commands::Recommend { city, explain } => {
            handle_recommend(load_store(&artifacts_dir)?, &city, explain)
        }
        Commands::Info { city } => handle_info(load_store(&artifacts_dir)?, &city),
        Commands::Plan { section } => handle_plan(&config, section.into()).await,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(load_store(&artifacts_dir)?, requests, concurrent).await,
    }
}

/// Load the artifacts (this may take a moment)
fn load_store(artifacts_dir: &Path) -> Result<Arc<ArtifactStore>> {
    println!("Loading artifacts from {}...", artifacts_dir.display());
    let start = Instant::now();
    let store = ArtifactStore::load_from_dir(artifacts_dir).context("Failed to load artifacts")?;
    println!("{} Loaded artifacts in {:?}", "✓".green(), start.elapsed());
    Ok(Arc::new(store))
}

/// Handle the 'places' command
fn handle_places(store: Arc<ArtifactStore>, filter: Option<String>) -> Result<()> {
    let names = filter_places(store.catalog().names(), filter.as_deref());

    println!(
        "{}",
        format!("{} of {} places:", names.len(), store.catalog().len())
            .bold()
            .blue()
    );
    for name in names {
        println!("{}{}", "• ".green(), name);
    }
    Ok(())
}

fn filter_places<'a>(names: &'a [String], filter: Option<&str>) -> Vec<&'a str> {
    let needle = filter.map(str::to_lowercase).unwrap_or_default();
    names
        .iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}

/// Handle the 'recommend' command
fn handle_recommend(store: Arc<ArtifactStore>, city: &str, explain: bool) -> Result<()> {
    if !store.catalog().contains(city) {
        println!(
            "{} {} is not in the catalog, results will be empty",
            "!".yellow(),
            city
        );
    }

    let combiner = RecommendationCombiner::new(store.clone());
    let recommendations = present(&store, combiner.combine_candidates(city));

    print_recommendations(city, &recommendations, explain);
    Ok(())
}

/// Handle the 'info' command
fn handle_info(store: Arc<ArtifactStore>, city: &str) -> Result<()> {
    let details = describe_place(&store, city).ok_or_else(|| anyhow!("Unknown place {}", city))?;

    println!("{}", details.name.bold().blue());
    match details.info {
        Some(info) => {
            println!("{}Country: {}", "• ".green(), info.country);
            println!("{}Population: {}", "• ".green(), info.population);
            println!("{}Area: {} sq mi", "• ".green(), info.area_sq_mi);
        }
        None => println!("{}No info available", "• ".green()),
    }
    println!("{}Link: {}", "• ".cyan(), details.url);
    Ok(())
}

/// Handle the 'plan' command
async fn handle_plan(config: &Config, request: ItineraryRequest) -> Result<()> {
    request.validate().map_err(|reason| anyhow!(reason))?;

    let client = config
        .gemini_client()
        .context("The planner needs GOOGLE_API_KEY to be set")?;

    println!("Asking {} for {} advice...", client.model(), request.section());
    let answer = llm_client::plan(&client, &request)
        .await
        .context("Planner request failed")?;

    println!("{}", format!("{}:", answer.heading).bold().blue());
    println!("{}", answer.response);
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    store: Arc<ArtifactStore>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    let catalog = store.catalog().names().to_vec();
    if catalog.is_empty() || requests == 0 {
        return Err(anyhow!("Nothing to benchmark"));
    }

    let combiner = RecommendationCombiner::new(store);

    // Pick random catalog cities
    let cities: Vec<String> = {
        let mut rng = rand::rng();
        (0..requests)
            .map(|_| catalog[rng.random_range(0..catalog.len())].clone())
            .collect()
    };

    let start = Instant::now();
    let mut timings = Vec::with_capacity(requests);
    for batch in cities.chunks(concurrent.max(1)) {
        let mut handles = vec![];
        for city in batch {
            let combiner = combiner.clone();
            let city = city.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                let start = Instant::now();
                combiner.combine(&city);
                start.elapsed()
            }));
        }
        for handle in handles {
            timings.push(handle.await?);
        }
    }
    let total_time = start.elapsed();

    let avg_latency = timings.iter().sum::<Duration>() / (timings.len() as u32);
    timings.sort();
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(&timings, 0.50));
    println!("P95 latency: {:?}", percentile(&timings, 0.95));
    println!("P99 latency: {:?}", percentile(&timings, 0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Nearest-rank percentile of sorted timings
fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let idx = ((sorted.len() as f64 * p) as usize).min(sorted.len() - 1);
    sorted[idx]
}

/// Helper function to format and print recommendations
fn print_recommendations(city: &str, recommendations: &[CityRecommendation], explain: bool) {
    println!(
        "{}",
        format!("Cities similar to {}:", city).bold().blue()
    );
    if recommendations.is_empty() {
        println!("  (none)");
        return;
    }

    for (i, rec) in recommendations.iter().enumerate() {
        println!("{}. {} {}", (i + 1).to_string().green(), rec.name.bold(), rec.url.dimmed());
        for line in rec.tooltip.lines() {
            println!("   {}", line);
        }
        if explain {
            let sources = rec
                .sources
                .iter()
                .map(|s| s.label())
                .collect::<Vec<_>>()
                .join(" + ");
            println!("   {} {}", "from".cyan(), sources);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_places() {
        let names = vec!["Lisbon".to_string(), "London".to_string(), "Paris".to_string()];

        assert_eq!(filter_places(&names, None).len(), 3);
        assert_eq!(filter_places(&names, Some("lo")), vec!["London"]);
        assert_eq!(filter_places(&names, Some("L")), vec!["Lisbon", "London"]);
        assert!(filter_places(&names, Some("tokyo")).is_empty());
    }

    #[test]
    fn test_percentile() {
        let timings: Vec<Duration> = (1..=100).map(Duration::from_millis).collect();

        assert_eq!(percentile(&timings, 0.50), Duration::from_millis(51));
        assert_eq!(percentile(&timings, 0.99), Duration::from_millis(100));
        assert_eq!(percentile(&[], 0.5), Duration::ZERO);
    }

    #[test]
    fn test_plan_arguments() {
        let cli = Cli::try_parse_from([
            "travel-recs",
            "plan",
            "food",
            "--location",
            "Bangkok",
            "--diet",
            "vegan,gluten-free",
            "--cuisines",
            "Thai",
        ])
        .unwrap();

        let Commands::Plan { section } = cli.command else {
            panic!("expected plan command");
        };
        let request: ItineraryRequest = section.into();
        let rendered = request.render_input();

        assert!(rendered.contains("Dietary Restrictions: Vegan, Gluten-Free"));
        assert!(rendered.contains("Dining Experience: Casual Dining"));
        assert!(rendered.contains("Ambiance Preferences: Trendy"));
    }

    #[tokio::test]
    async fn test_plan_rejects_blank_location() {
        let cli = Cli::try_parse_from(["travel-recs", "plan", "trip", "--location", "   "]).unwrap();
        let Commands::Plan { section } = cli.command else {
            panic!("expected plan command");
        };

        // Checked before the API key, so no key is needed to see it
        let config = Config::from_vars(Vec::new()).unwrap();
        let err = handle_plan(&config, section.into()).await.unwrap_err();
        assert_eq!(err.to_string(), "Location cannot be empty");
    }
}
