use anyhow::Context;
use clap::Parser;
use shipping_lookup::utils::{logger, validation::Validate};
use shipping_lookup::{
    ApiRoot, CliArgs, ClientConfig, Command, LookupError, ShippingMethodLookup,
    ShippingMethodsService,
};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting shipping-lookup CLI");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    if let Err(e) = run(args).await {
        let exit_code = match e.downcast_ref::<LookupError>() {
            Some(lookup_error) => {
                tracing::error!("❌ {}", lookup_error);
                tracing::error!("💡 Recovery suggestion: {}", lookup_error.recovery_suggestion());
                eprintln!("❌ {}", lookup_error.user_friendly_message());
                eprintln!("💡 {}", lookup_error.recovery_suggestion());

                lookup_error.exit_code()
            }
            None => {
                tracing::error!("❌ {:#}", e);
                eprintln!("❌ {:#}", e);
                1
            }
        };
        std::process::exit(exit_code);
    }
}

async fn run(args: CliArgs) -> anyhow::Result<()> {
    let config = ClientConfig::from_file(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    config.validate()?;

    let api_root = Arc::new(ApiRoot::connect(&config).await?);
    let lookup: Arc<dyn ShippingMethodLookup> = Arc::new(ShippingMethodsService::new(api_root));

    match args.command {
        Command::List => {
            let page = lookup.get_all_shipping_methods().await?;
            tracing::info!("Fetched {} of {:?} shipping methods", page.count, page.total());
            print_json(&page)?;
        }
        Command::Get { key } => {
            let method = lookup.get_shipping_method_by_key(&key).await?;
            print_json(&method)?;
        }
        Command::Exists { key } => {
            lookup.check_shipping_method_exists(&key).await?;
            println!("✅ Shipping method '{}' exists", key);
        }
        Command::ByLocation { country } => {
            let page = lookup.get_shipping_methods_by_location(&country).await?;
            tracing::info!("{} shipping methods match country {}", page.count, country);
            print_json(&page)?;
        }
        Command::MatchingCart { store_key, cart_id } => {
            let page = lookup
                .get_matching_shipping_methods(&store_key, &cart_id)
                .await?;
            tracing::info!(
                "{} shipping methods match cart {} in store {}",
                page.count,
                cart_id,
                store_key
            );
            print_json(&page)?;
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
