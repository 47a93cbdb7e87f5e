use clap::{Parser, Subcommand};
use office_functions::{function_declarations, Config, FunctionCall, Functions};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Office assistant functions for LLM function calling.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Print the function declarations as JSON.
  Schema,
  /// Invoke a function by name.
  Call {
    /// Function name, e.g. is_business_open
    name: String,
    /// Arguments as a JSON object
    #[arg(long, default_value = "{}")]
    args: String,
  },
}

#[tokio::main]
async fn main() -> HandlerResult {
  let env_filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy();
  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  match cli.command {
    Command::Schema => {
      println!("{}", serde_json::to_string_pretty(function_declarations())?);
    }
    Command::Call { name, args } => {
      let config = Config::from_env()?;
      info!(
        business_timezone = config.business_timezone.name(),
        search_enabled = config.serpapi_api_key.is_some(),
        "loaded configuration"
      );
      let functions = Functions::new(&config);
      let call = FunctionCall::new(&name, serde_json::from_str(&args)?);
      println!("{}", functions.call(&call).await?);
    }
  }

  Ok(())
}
