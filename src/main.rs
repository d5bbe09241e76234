use azure_vm_nics::azure::{ArmClient, ManagementApi};
use azure_vm_nics::error::{ProvisionError, ResultExt};
use azure_vm_nics::prompt::LinePause;
use colored::Colorize;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    if let Err(e) = log4rs::init_file("log4rs.yml", Default::default()) {
        eprintln!("Logging disabled, cannot load log4rs.yml: {e}");
    }
    dotenv::dotenv().ok();

    let start = chrono::Utc::now();
    log::info!("#Start main() at {start}");

    let result = azure_vm_nics::run(
        |key| std::env::var(key).ok(),
        |settings| async move {
            let client = ArmClient::connect(&settings)
                .await
                .context("GetAuthorizer failed")?;
            Ok::<_, ProvisionError>(Arc::new(client) as Arc<dyn ManagementApi>)
        },
        &mut LinePause::stdin(),
    )
    .await;

    let elapsed = chrono::Utc::now() - start;
    log::info!("#End main() after {}s", elapsed.num_seconds());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "ERROR".on_red());
            log::error!("exit with error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
// cargo watch -x 'fmt' -x 'run'
