use crate::error::SimulatorError;
use crate::generator::generate;
use configuration::SimulationSettings;
use core_types::{SensorKind, SensorRecord};
use database::SensorStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Owns the running simulator tasks, one per sensor category.
///
/// Dropping the handle without calling [`stop`](Self::stop) also ends the
/// tasks, since they exit once the shutdown sender is gone.
pub struct SimulatorHandle {
    shutdown: watch::Sender<bool>,
    tasks: Vec<(SensorKind, JoinHandle<()>)>,
}

impl SimulatorHandle {
    /// Starts a simulator for every category using the configured interval.
    pub fn start<S: SensorStore>(store: S, settings: &SimulationSettings) -> Self {
        Self::start_with(
            store,
            &SensorKind::ALL,
            Duration::from_secs(settings.interval_secs),
            &settings.system_id,
        )
    }

    pub fn start_with<S: SensorStore>(
        store: S,
        kinds: &[SensorKind],
        interval: Duration,
        system_id: &str,
    ) -> Self {
        let (shutdown, shutdown_rx) = watch::channel(false);
        let tasks = kinds
            .iter()
            .map(|&kind| {
                let task = tokio::spawn(simulate(
                    store.clone(),
                    kind,
                    interval,
                    system_id.to_string(),
                    shutdown_rx.clone(),
                ));
                (kind, task)
            })
            .collect();

        tracing::info!(
            sensors = kinds.len(),
            interval_ms = interval.as_millis() as u64,
            "Simulators started."
        );
        Self { shutdown, tasks }
    }

    pub fn sensors(&self) -> Vec<SensorKind> {
        self.tasks.iter().map(|(kind, _)| *kind).collect()
    }

    /// Signals every task to finish and waits for them.
    pub async fn stop(self) -> Result<(), SimulatorError> {
        // Receivers may already be gone if every task ended on its own.
        let _ = self.shutdown.send(true);

        for (kind, task) in self.tasks {
            task.await
                .map_err(|e| SimulatorError::TaskFailed(kind.to_string(), e.to_string()))?;
        }
        tracing::info!("Simulators stopped.");
        Ok(())
    }
}

async fn simulate<S: SensorStore>(
    store: S,
    kind: SensorKind,
    interval: Duration,
    system_id: String,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut rng = StdRng::from_os_rng();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match emit(&store, kind, &system_id, &mut rng).await {
                    Ok(Some(record)) => {
                        tracing::debug!(sensor = %kind, id = %record.id(), "Simulated reading stored.");
                    }
                    Ok(None) => {
                        tracing::debug!(sensor = %kind, "No motion reading to reference yet.");
                    }
                    Err(e) => {
                        tracing::warn!(sensor = %kind, error = %e, "Simulated reading not stored.");
                    }
                }
            }
            _ = shutdown.changed() => {
                tracing::debug!(sensor = %kind, "Simulator shutting down.");
                break;
            }
        }
    }
}

async fn emit<S: SensorStore>(
    store: &S,
    kind: SensorKind,
    system_id: &str,
    rng: &mut StdRng,
) -> Result<Option<SensorRecord>, SimulatorError> {
    let motion_id = match kind {
        SensorKind::Camera => store.latest_motion_id().await?,
        _ => None,
    };
    let timestamp = chrono::Local::now().naive_local();

    let Some(reading) = generate(kind, timestamp, system_id, motion_id, rng) else {
        return Ok(None);
    };
    Ok(Some(store.insert(reading).await?))
}
