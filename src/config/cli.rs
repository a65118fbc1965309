use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "shipping-lookup")]
#[command(about = "Query shipping methods of a commerce platform project")]
pub struct CliArgs {
    #[arg(long, short, default_value = "shipping-lookup.toml")]
    pub config: PathBuf,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List all shipping methods with zone rates expanded
    List,
    /// Fetch one shipping method by key
    Get { key: String },
    /// Check that a shipping method key exists
    Exists { key: String },
    /// Shipping methods available for a country
    ByLocation { country: String },
    /// Shipping methods matching a cart in a store
    MatchingCart {
        #[arg(long)]
        store_key: String,
        #[arg(long)]
        cart_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matching_cart() {
        let args = CliArgs::parse_from([
            "shipping-lookup",
            "--config",
            "ctp.toml",
            "matching-cart",
            "--store-key",
            "main-store",
            "--cart-id",
            "cart-123",
        ]);

        assert_eq!(args.config, PathBuf::from("ctp.toml"));
        match args.command {
            Command::MatchingCart { store_key, cart_id } => {
                assert_eq!(store_key, "main-store");
                assert_eq!(cart_id, "cart-123");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_by_location_defaults() {
        let args = CliArgs::parse_from(["shipping-lookup", "by-location", "DE"]);
        assert_eq!(args.config, PathBuf::from("shipping-lookup.toml"));
        assert!(!args.verbose);
        assert!(matches!(args.command, Command::ByLocation { ref country } if country == "DE"));
    }
}
