//! `wpdeps` 바이너리 진입점.

use wpdeps::interface::cli::{AppComposition, Cli, CliAction};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let action = match Cli::parse_action() {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(2);
        }
    };

    let composition = AppComposition::default();

    let result = match action {
        CliAction::InspectConfig => composition
            .inspect_config_usecase()
            .execute()
            .map(|json| println!("{json}")),
        CliAction::InspectSnapshot {
            overrides,
            base_dir,
        } => composition
            .inspect_snapshot_usecase()
            .execute(overrides, base_dir)
            .map(|json| println!("{json}")),
        CliAction::Run(options) => composition
            .compare_usecase()
            .execute(options)
            .await
            .map(|_| ()),
    };

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
