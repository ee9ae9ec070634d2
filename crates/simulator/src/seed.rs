use crate::error::SimulatorError;
use crate::generator::image_path;
use chrono::{Datelike, Duration, NaiveDateTime};
use core_types::{
    NewCameraReading, NewGasReading, NewMotionReading, NewParticleReading, NewReading, SensorKind,
    SensorRecord,
};
use database::SensorStore;
use rust_decimal::Decimal;

/// How far back, in days, each batch of seed readings is placed.
pub const SEED_OFFSETS_DAYS: [i64; 4] = [0, 3, 10, 30];

/// Inserts one deterministic reading per category at `now - days_back`.
///
/// Values derive from the day of month so that repeated seeds are easy to
/// recognise. The camera capture references the motion reading inserted in
/// the same batch. Returns the stored records.
pub async fn seed_offset<S: SensorStore>(
    store: &S,
    now: NaiveDateTime,
    days_back: i64,
    system_id: &str,
) -> Result<Vec<SensorRecord>, SimulatorError> {
    let timestamp = now - Duration::days(days_back);
    let day = i64::from(timestamp.day());
    let system_id = system_id.to_string();

    let gas = store
        .insert(NewReading::Gas(NewGasReading {
            timestamp,
            lpg: Decimal::from(500 + day),
            co: Decimal::new(2000 + day * 50, 2),
            smoke: Decimal::from(100 + day * 3),
            system_id: system_id.clone(),
        }))
        .await?;

    let particle = store
        .insert(NewReading::Particle(NewParticleReading {
            timestamp,
            pm1_0: Decimal::from(day + 1),
            pm2_5: Decimal::from(day * 2),
            pm10: Decimal::from(day * 3),
            system_id: system_id.clone(),
        }))
        .await?;

    let motion = store
        .insert(NewReading::Motion(NewMotionReading {
            timestamp,
            motion_detected: day % 2 == 0,
            intensity: Decimal::from(day % 10 + 1),
            system_id: system_id.clone(),
        }))
        .await?;

    let camera = store
        .insert(NewReading::Camera(NewCameraReading {
            timestamp,
            image_path: image_path(),
            motion_id: motion.id(),
            latency_ms: 100 + day as i32,
            system_id,
        }))
        .await?;

    tracing::debug!(%timestamp, days_back, "Seeded one reading per sensor.");
    Ok(vec![gas, particle, motion, camera])
}

/// Seeds every offset in [`SEED_OFFSETS_DAYS`].
pub async fn seed_history<S: SensorStore>(
    store: &S,
    now: NaiveDateTime,
    system_id: &str,
) -> Result<Vec<SensorRecord>, SimulatorError> {
    let mut stored = Vec::with_capacity(SEED_OFFSETS_DAYS.len() * SensorKind::ALL.len());
    for days_back in SEED_OFFSETS_DAYS {
        stored.extend(seed_offset(store, now, days_back, system_id).await?);
    }
    tracing::info!(records = stored.len(), "Seeding complete.");
    Ok(stored)
}

/// Adds a camera capture for each of the oldest `limit` motion readings,
/// stamped with the motion reading's own timestamp.
pub async fn backfill_camera_captures<S: SensorStore>(
    store: &S,
    limit: usize,
    system_id: &str,
) -> Result<usize, SimulatorError> {
    let motions = store.all_records(SensorKind::Motion).await?;
    let mut inserted = 0;

    for motion in motions.into_iter().take(limit) {
        let timestamp = motion.timestamp();
        store
            .insert(NewReading::Camera(NewCameraReading {
                timestamp,
                image_path: image_path(),
                motion_id: motion.id(),
                latency_ms: 100 + timestamp.day() as i32,
                system_id: system_id.to_string(),
            }))
            .await?;
        inserted += 1;
    }

    tracing::info!(inserted, "Camera captures back-filled from motion readings.");
    Ok(inserted)
}
