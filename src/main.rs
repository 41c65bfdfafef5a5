use astroline::app::App;
use astroline::config::Config;
use astroline::error::Result;
use astroline::models::{SlotMode, Style, ZodiacSign};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (only show warnings and errors by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    // Load configuration
    let config = Config::load()?;
    let app = App::new(&config)?;

    let force = args.iter().any(|a| a == "--force");

    if args.iter().any(|a| a == "--seed-today") {
        app.run_seed(1, force).await?;
        return Ok(());
    }

    if let Some(days) = flag_value(&args, "--seed-days") {
        let days: usize = days
            .parse()
            .map_err(|_| anyhow::anyhow!("--seed-days expects a number, got {days}"))?;
        app.run_seed(days, force).await?;
        return Ok(());
    }

    if args.iter().any(|a| a == "--set-sign" || a == "--set-style" || a == "--set-mode") {
        set_preferences(&app, &args).await?;
        return Ok(());
    }

    if args.iter().any(|a| a == "--reset") {
        app.reset()?;
        return Ok(());
    }

    if args.iter().any(|a| a == "--status") {
        app.status()?;
        return Ok(());
    }

    if args.iter().any(|a| a == "--refresh") {
        app.refresh().await?;
        return Ok(());
    }

    // Default: show today's horoscope
    app.show_current().await
}

/// Apply `--set-sign/--set-style/--set-mode`, falling back to the stored
/// value for anything not given on the command line.
async fn set_preferences(app: &App, args: &[String]) -> Result<()> {
    let sign = match flag_value(args, "--set-sign") {
        Some(token) => token.to_uppercase().parse::<ZodiacSign>()?,
        None => app
            .store
            .preferred_sign()
            .ok_or_else(|| anyhow::anyhow!("no sign chosen yet; pass --set-sign"))?,
    };
    let style = match flag_value(args, "--set-style") {
        Some(token) => token.to_uppercase().parse::<Style>()?,
        None => app
            .store
            .preferred_style()
            .ok_or_else(|| anyhow::anyhow!("no style chosen yet; pass --set-style"))?,
    };
    let mode = match flag_value(args, "--set-mode") {
        Some(token) => token.to_uppercase().parse::<SlotMode>()?,
        None => app.store.preferred_slot_mode(),
    };

    app.set_preferences(sign, style, mode).await
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
}

fn print_usage() {
    println!("astroline - deterministic daily horoscopes");
    println!();
    println!("USAGE:");
    println!("  astroline                 Show today's horoscope");
    println!("  astroline --refresh       Fetch fresh content, bypassing the cache");
    println!("  astroline --status        Show what the widget would render");
    println!("  astroline --set-sign SIGN --set-style STYLE [--set-mode daily|triple]");
    println!("  astroline --seed-today [--force]");
    println!("  astroline --seed-days N [--force]");
    println!("  astroline --reset         Clear all local data");
}
