//! cinescout - film lookup and nearby cinema search CLI.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, OmdbConfig, PlacesConfig, resolve_config_path};
use cinescout_api::omdb::{
    LocalMovieApi, MediaType, MovieClient, MovieDetailParams, SearchMoviesParams,
};
use cinescout_api::places::{CinemaClient, LocalCinemaApi, NearbySearchParams};
use cinescout_api::{ApiKey, GOOGLE_API_KEY_ENV, OMDB_API_KEY_ENV};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Query the OMDb API.
    Movies(MoviesCommand),
    /// Query the Google Places API.
    Cinemas(CinemasCommand),
}

/// Arguments for the `movies` subcommand.
#[derive(clap::Args)]
struct MoviesCommand {
    /// Movies subcommand to run.
    #[command(subcommand)]
    command: MoviesSubcommands,
}

/// Available movies subcommands.
#[derive(Subcommand)]
enum MoviesSubcommands {
    /// Search titles by term.
    Search(SearchArgs),
    /// Show details for one IMDb id.
    Details(DetailsArgs),
}

/// Title kinds accepted by `--type`.
#[derive(Clone, Copy, ValueEnum)]
enum TypeArg {
    Movie,
    Series,
    Episode,
}

impl From<TypeArg> for MediaType {
    fn from(value: TypeArg) -> Self {
        match value {
            TypeArg::Movie => Self::Movie,
            TypeArg::Series => Self::Series,
            TypeArg::Episode => Self::Episode,
        }
    }
}

/// Arguments for the `movies search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search term (e.g. "Batman").
    #[arg(long, required = true)]
    term: String,
    /// Result page (10 results per page).
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Filter by release year.
    #[arg(long)]
    year: Option<u32>,
    /// Filter by title kind.
    #[arg(long = "type", value_enum)]
    media_type: Option<TypeArg>,
}

/// Arguments for the `movies details` subcommand.
#[derive(clap::Args)]
struct DetailsArgs {
    /// IMDb id (e.g. "tt0372784").
    #[arg(long, required = true)]
    id: String,
    /// Request the full plot instead of the short one.
    #[arg(long)]
    full_plot: bool,
}

/// Arguments for the `cinemas` subcommand.
#[derive(clap::Args)]
struct CinemasCommand {
    /// Cinemas subcommand to run.
    #[command(subcommand)]
    command: CinemasSubcommands,
}

/// Available cinemas subcommands.
#[derive(Subcommand)]
enum CinemasSubcommands {
    /// List movie theaters around a point.
    Nearby(NearbyArgs),
}

/// Arguments for the `cinemas nearby` subcommand.
#[derive(clap::Args)]
struct NearbyArgs {
    /// Latitude in decimal degrees.
    #[arg(long, required = true, allow_negative_numbers = true)]
    lat: f64,
    /// Longitude in decimal degrees.
    #[arg(long, required = true, allow_negative_numbers = true)]
    lon: f64,
    /// Search radius in meters (default: config `default_radius`, else 5000).
    #[arg(long)]
    radius: Option<u32>,
}

/// Loads the config file for `dir`.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let path = resolve_config_path(dir)?;
    AppConfig::load(&path)
}

/// Builds a `MovieClient` from `OMDB_API_KEY` and the `[omdb]` section.
///
/// # Errors
///
/// Returns an error if the key is missing or the client fails to build.
#[instrument(skip_all)]
fn build_movie_client(config: &OmdbConfig) -> Result<MovieClient> {
    let api_key = ApiKey::from_env(OMDB_API_KEY_ENV)?;

    let mut builder = MovieClient::builder().api_key(api_key);
    if let Some(url) = config.base_url()? {
        builder = builder.base_url(url);
    }
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build().context("failed to build OMDb client")
}

/// Builds a `CinemaClient` from `GOOGLE_API_KEY` and the `[places]` section.
///
/// # Errors
///
/// Returns an error if the key is missing or the client fails to build.
#[instrument(skip_all)]
fn build_cinema_client(config: &PlacesConfig) -> Result<CinemaClient> {
    let api_key = ApiKey::from_env(GOOGLE_API_KEY_ENV)?;

    let mut builder = CinemaClient::builder().api_key(api_key);
    if let Some(url) = config.base_url()? {
        builder = builder.base_url(url);
    }
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build().context("failed to build Places client")
}

/// Runs the `movies search` subcommand.
///
/// # Errors
///
/// Returns an error if the config is invalid or the client fails to build.
#[instrument(skip_all)]
async fn run_movies_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_movie_client(&config.omdb)?;

    let mut params = SearchMoviesParams::new(&args.term).page(args.page);
    if let Some(year) = args.year {
        params = params.year(year);
    }
    if let Some(media_type) = args.media_type {
        params = params.media_type(media_type.into());
    }

    let Some(result) = client
        .search_movies(&params)
        .await
        .context("OMDb search request failed")?
    else {
        tracing::warn!("OMDb search is unavailable; no results");
        return Ok(());
    };

    tracing::info!("Total results: {}", result.total_results);
    tracing::info!("ID\t\tYear\tType\tTitle");
    for movie in &result.movies {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            movie.imdb_id,
            movie.year,
            movie.media_type.as_str(),
            movie.title,
        );
    }

    Ok(())
}

/// Runs the `movies details` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_movies_details(args: &DetailsArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_movie_client(&config.omdb)?;

    let params = MovieDetailParams::new(&args.id).full_plot(args.full_plot);
    let Some(detail) = client
        .movie_details_with(&params)
        .await
        .context("OMDb details request failed")?
    else {
        tracing::warn!(imdb_id = %args.id, "No details found");
        return Ok(());
    };

    let or_dash = |v: Option<&String>| v.map_or("-", String::as_str).to_owned();
    tracing::info!("ID:       {}", detail.imdb_id);
    tracing::info!("Title:    {}", detail.title);
    tracing::info!("Type:     {}", detail.media_type.as_str());
    tracing::info!("Released: {}", or_dash(detail.released.as_ref()));
    tracing::info!("Runtime:  {}", or_dash(detail.runtime.as_ref()));
    tracing::info!("Genre:    {}", or_dash(detail.genre.as_ref()));
    tracing::info!("Country:  {}", or_dash(detail.country.as_ref()));
    tracing::info!("Language: {}", or_dash(detail.language.as_ref()));
    tracing::info!("Actors:   {}", or_dash(detail.actors.as_ref()));
    tracing::info!("Poster:   {}", or_dash(detail.poster_url.as_ref()));
    tracing::info!("Plot:     {}", or_dash(detail.plot.as_ref()));
    for rating in &detail.ratings {
        tracing::info!("Rating:   {} ({})", rating.value, rating.source);
    }

    Ok(())
}

/// Runs the `cinemas nearby` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_cinemas_nearby(args: &NearbyArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_cinema_client(&config.places)?;

    let radius = args.radius.unwrap_or_else(|| config.places.radius());
    let params = NearbySearchParams::new(args.lat, args.lon, radius);

    let cinemas = client
        .nearby_cinemas(&params)
        .await
        .context("Places nearby search failed")?;

    tracing::info!("Cinemas within {radius} m: {}", cinemas.len());
    tracing::info!("Rating\tReviews\tName\t\tAddress\t\tLink");
    for cinema in &cinemas {
        tracing::info!(
            "{}\t{}\t{}\t{}\t{}",
            cinema
                .rating
                .map_or_else(|| String::from("-"), |r| format!("{r:.1}")),
            cinema
                .user_ratings_count
                .map_or_else(|| String::from("-"), |n| n.to_string()),
            cinema.name,
            cinema.address,
            cinema.google_maps_link,
        );
    }

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    match cli.command {
        Commands::Movies(cmd) => match cmd.command {
            MoviesSubcommands::Search(args) => run_movies_search(&args, cli.dir.as_ref()).await,
            MoviesSubcommands::Details(args) => run_movies_details(&args, cli.dir.as_ref()).await,
        },
        Commands::Cinemas(cmd) => match cmd.command {
            CinemasSubcommands::Nearby(args) => run_cinemas_nearby(&args, cli.dir.as_ref()).await,
        },
    }
}
