use api::App;
use log::{error, info, warn};
use service::SyncOutcome;

#[rocket::main]
async fn main() -> Result<(), rocket::Error> {
    let app = match App::from_env().await {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Unable to start: {e}");
            std::process::exit(1);
        }
    };

    if let Some(period) = app.syncer.config.sync_interval {
        let syncer = app.syncer.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                match syncer.run().await {
                    Ok(SyncOutcome::Updated(summary)) => info!(
                        "Scheduled sync updated {} players for {}",
                        summary.players_updated, summary.tournament
                    ),
                    Ok(SyncOutcome::NoData(report)) => warn!(
                        "Scheduled sync found no usable players for {}",
                        report.tournament
                    ),
                    Err(e) if e.is_retryable() => {
                        warn!("Scheduled sync failed, retrying next tick: {}", e)
                    }
                    Err(e) => error!("Scheduled sync failed: {}", e),
                }
            }
        });
    }

    let _rocket = app.rocket().launch().await?;
    Ok(())
}
