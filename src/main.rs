//! Command-line client for the CATCH survey-search API.
//!
//! Result data goes to stdout; job progress and diagnostics go to stderr,
//! so output can be piped or redirected cleanly.

use catch_client::{
    create_client, observability::init_logging, output, ApiLayout, CatchClient, CatchConfig,
    CatchResult, Caught, CaughtService, FixedService, FixedTargetQuery, Format, IntersectionType,
    JobId, MovingTargetQuery, SearchService, StatusService, StreamProtocolVersion,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use futures::StreamExt;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "catch", version, about = "Search survey data for comets and asteroids via the CATCH API")]
struct Cli {
    /// Base URL for the CATCH API
    #[arg(long, global = true, env = "CATCH_BASE_URL", default_value = catch_client::DEFAULT_BASE_URL)]
    base: String,

    /// Enable debug diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search for a moving target
    Catch(MovingArgs),
    /// Search for a moving target via the legacy query/moving layout
    QueryMoving(MovingArgs),
    /// Search observations of a fixed sky position
    Fixed(FixedArgs),
    /// Retrieve results of a completed job
    Caught {
        /// Job UUID, e.g. 00112233-4455-4677-8899-aabbccddeeff
        job_id: String,
        #[arg(long, value_enum, default_value = "json")]
        format: FormatArg,
    },
    /// Retrieve the status of a job
    Status {
        /// Job UUID
        job_id: String,
        #[arg(long, value_enum, default_value = "json")]
        format: FormatArg,
    },
    /// Show the source database summary
    Sources {
        #[arg(long, value_enum, default_value = "json")]
        format: FormatArg,
    },
    /// Print the raw notification stream until interrupted
    Stream,
}

#[derive(Args)]
struct MovingArgs {
    /// Moving target designation, e.g. 65P
    target: String,

    /// Search this data source (repeatable)
    #[arg(long = "source")]
    sources: Vec<String>,

    /// Only observations taken after this date (YYYY-MM-DD, UTC)
    #[arg(long)]
    start_date: Option<String>,

    /// Only observations taken before this date (YYYY-MM-DD, UTC)
    #[arg(long)]
    stop_date: Option<String>,

    /// Pad the ephemeris (arcmin)
    #[arg(long)]
    padding: Option<f64>,

    /// Search using ephemeris uncertainty
    #[arg(long)]
    uncertainty_ellipse: bool,

    /// Do not use cached results; force a new search
    #[arg(long)]
    force: bool,

    #[arg(long, value_enum, default_value = "json")]
    format: FormatArg,
}

#[derive(Args)]
struct FixedArgs {
    /// Right ascension, sexagesimal or decimal (hour angle assumed when unitless)
    ra: String,

    /// Declination, sexagesimal or decimal (degrees assumed when unitless)
    dec: String,

    /// Search this data source (repeatable)
    #[arg(long = "source")]
    sources: Vec<String>,

    /// Areal search radius around RA, Dec (arcmin)
    #[arg(long)]
    radius: Option<f64>,

    /// Areal search intersection requirement
    #[arg(long, value_enum)]
    intersection_type: Option<IntersectionArg>,

    /// Only observations taken after this date (YYYY-MM-DD, UTC)
    #[arg(long)]
    start_date: Option<String>,

    /// Only observations taken before this date (YYYY-MM-DD, UTC)
    #[arg(long)]
    stop_date: Option<String>,

    #[arg(long, value_enum, default_value = "json")]
    format: FormatArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Table,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Format::Json,
            FormatArg::Table => Format::Table,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum IntersectionArg {
    ImageIntersectsArea,
    ImageContainsArea,
    AreaContainsImage,
}

impl From<IntersectionArg> for IntersectionType {
    fn from(arg: IntersectionArg) -> Self {
        match arg {
            IntersectionArg::ImageIntersectsArea => IntersectionType::ImageIntersectsArea,
            IntersectionArg::ImageContainsArea => IntersectionType::ImageContainsArea,
            IntersectionArg::AreaContainsImage => IntersectionType::AreaContainsImage,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CatchResult<()> {
    match cli.command {
        Command::Catch(args) => {
            let client = client(
                &cli.base,
                ApiLayout::V3,
                StreamProtocolVersion::PrefixStatus,
            )?;
            moving(&client, args).await
        }
        Command::QueryMoving(args) => {
            let client = client(
                &cli.base,
                ApiLayout::V2Moving,
                StreamProtocolVersion::BareJobId,
            )?;
            moving(&client, args).await
        }
        Command::Fixed(args) => {
            let client = default_client(&cli.base)?;
            fixed(&client, args).await
        }
        Command::Caught { job_id, format } => {
            let format = Format::from(format);
            output::ensure_supported(format)?;
            let client = default_client(&cli.base)?;
            let job_id = JobId::parse(&job_id)?;
            let caught = client.caught().caught(&job_id).await?.into_results()?;
            print_caught(&caught, format)
        }
        Command::Status { job_id, format } => {
            let format = Format::from(format);
            output::ensure_supported(format)?;
            let client = default_client(&cli.base)?;
            let job_id = JobId::parse(&job_id)?;
            status(&client, &job_id, format).await
        }
        Command::Sources { format } => {
            let format = Format::from(format);
            output::ensure_supported(format)?;
            let client = default_client(&cli.base)?;
            let summary = client.status().sources().await?;
            println!("{}", output::render(&summary, format)?);
            Ok(())
        }
        Command::Stream => {
            let client = default_client(&cli.base)?;
            stream(&client).await
        }
    }
}

fn client(
    base: &str,
    layout: ApiLayout,
    protocol: StreamProtocolVersion,
) -> CatchResult<CatchClient> {
    let config = CatchConfig::from_env()?
        .with_base_url(base)
        .with_layout(layout)
        .with_stream_protocol(protocol);
    create_client(config)
}

fn default_client(base: &str) -> CatchResult<CatchClient> {
    client(base, ApiLayout::V3, StreamProtocolVersion::PrefixStatus)
}

/// Submit a moving-target search, await completion, print results.
async fn moving(client: &CatchClient, args: MovingArgs) -> CatchResult<()> {
    let format = Format::from(args.format);
    output::ensure_supported(format)?;

    let mut query = MovingTargetQuery::new(args.target);
    for source in args.sources {
        query = query.with_source(source);
    }
    if let Some(date) = args.start_date {
        query = query.with_start_date(date);
    }
    if let Some(date) = args.stop_date {
        query = query.with_stop_date(date);
    }
    if let Some(padding) = args.padding {
        query = query.with_padding(padding);
    }
    if args.uncertainty_ellipse {
        query = query.with_uncertainty_ellipse();
    }
    if args.force {
        query = query.force();
    }

    let response = client.search().query(&query).await?;

    eprintln!("Job ID: {}", response.job_id);
    if let Some(queue_full) = response.queue_full {
        eprintln!("Queue full: {}", queue_full);
    }
    eprintln!("Queued: {}", response.queued);
    if let Some(message) = &response.message {
        eprintln!("Message: {}", message);
    }
    if let Some(results) = &response.results {
        eprintln!("Results URL: {}", results);
    }

    let caught = client.watcher().await_completion(&response).await?;
    print_caught(&caught, format)
}

/// Run a fixed-position search and print results.
async fn fixed(client: &CatchClient, args: FixedArgs) -> CatchResult<()> {
    let format = Format::from(args.format);
    output::ensure_supported(format)?;

    let mut query = FixedTargetQuery::new(args.ra, args.dec);
    for source in args.sources {
        query = query.with_source(source);
    }
    if let Some(radius) = args.radius {
        query = query.with_radius(radius);
    }
    if let Some(intersection) = args.intersection_type {
        query = query.with_intersection_type(intersection.into());
    }
    if let Some(date) = args.start_date {
        query = query.with_start_date(date);
    }
    if let Some(date) = args.stop_date {
        query = query.with_stop_date(date);
    }

    let caught = client.fixed().query(&query).await?.into_results()?;
    print_caught(&caught, format)
}

/// Print job status: a parameter header, then the per-source rows.
async fn status(client: &CatchClient, job_id: &JobId, format: Format) -> CatchResult<()> {
    let status = client.status().job(job_id).await?;

    if let Some(id) = &status.job_id {
        println!("# job_id: {}", id);
    }
    if let Some(Value::Object(parameters)) = &status.parameters {
        for (key, value) in parameters {
            println!("# {}: {}", key, value);
        }
    }

    match &status.status {
        Some(rows) => println!("{}", output::render(rows, format)?),
        None => eprintln!("No status reported."),
    }
    Ok(())
}

/// Dump raw stream payloads until ctrl-c or server disconnect.
async fn stream(client: &CatchClient) -> CatchResult<()> {
    let mut events = client.subscribe_stream().await?;
    eprintln!("Listening to CATCH notification stream.  Use ctrl-c to stop.");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            next = events.next() => match next {
                Some(Ok(payload)) => {
                    if !payload.is_empty() {
                        println!("{}", payload);
                    }
                }
                Some(Err(err)) => return Err(err),
                None => break,
            },
        }
    }
    Ok(())
}

fn print_caught(caught: &Caught, format: Format) -> CatchResult<()> {
    if caught.is_empty() {
        eprintln!("Nothing found.");
        return Ok(());
    }

    let data = Value::Array(caught.data.clone());
    println!("{}", output::render(&data, format)?);
    Ok(())
}
