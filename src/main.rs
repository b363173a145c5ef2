use clap::Parser;
use todo_memory_sync::cli::Cli;
use todo_memory_sync::config::Config;
use todo_memory_sync::sync;
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr; stdout carries the report and status lines.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_memory_sync=warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            println!("❌ 配置错误: {e}");
            return;
        }
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = sync::run_with_config(&config, &mut stdout) {
        tracing::warn!(error = %e, "failed to write output");
    }
}
