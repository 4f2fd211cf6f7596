use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "mirror-sync")]
#[command(about = "Log in to Gitee and sync repository mirrors from upstream")]
#[command(version)]
struct Cli {
    /// Config file to run (built-in Gitee defaults when omitted)
    config: Option<PathBuf>,

    /// Run in headless mode (overrides config)
    #[arg(long)]
    headless: bool,

    /// Set a parameter (can be used multiple times)
    #[arg(short = 'P', long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// Verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Validate config without running
    #[arg(long)]
    check: bool,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,

    /// Quiet mode (only errors)
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> mirror_sync::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    // Parse parameters
    let params = mirror_sync::Params::from_args(&cli.params)?;

    // Load config, or resolve the built-in defaults when none was given
    let mut config = match cli.config {
        Some(ref path) => mirror_sync::Config::load_with_params(path, &params)?,
        None => mirror_sync::Config::with_params(&params)?,
    };

    if cli.check {
        println!("Config valid: {}", config.name);
        println!("  Login: {}", config.site.login_url);
        println!("  Mirrors: {}", config.repos.len());
        for repo in &config.repos {
            println!("    - {}", repo);
        }
        if let Some(ref on_failure) = config.on_failure {
            if let Some(ref path) = on_failure.screenshot {
                println!("  Failure screenshot: {}", path);
            }
        }
        return Ok(());
    }

    // Override headless if specified
    if cli.headless {
        config.browser.headless = true;
    }

    println!("Running: {}", config.name);

    let mut runner = mirror_sync::Runner::new(&config.browser).await?;
    let report = runner.run(&config).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        if report.success {
            println!("✓ Synced {}/{} mirrors", report.repos_synced, report.repos_total);
        } else {
            println!("✗ Failed");
            if let Some(ref error) = report.error {
                println!("  Error: {}", error);
            }
        }
        println!("  Duration: {}ms", report.duration_ms);
    }

    runner.close().await?;

    if !report.success {
        std::process::exit(1);
    }

    Ok(())
}
