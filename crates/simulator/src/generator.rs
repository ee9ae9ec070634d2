use chrono::NaiveDateTime;
use core_types::{
    NewCameraReading, NewGasReading, NewMotionReading, NewParticleReading, NewReading, SensorKind,
};
use rand::Rng;
use rust_decimal::Decimal;
use uuid::Uuid;

/// A uniformly drawn value in `[low, high]`, with two decimals.
fn hundredths<R: Rng + ?Sized>(rng: &mut R, low: i64, high: i64) -> Decimal {
    Decimal::new(rng.random_range(low * 100..=high * 100), 2)
}

/// Draws one synthetic reading of `kind` stamped with `timestamp`.
///
/// Camera captures must reference a motion reading, so `None` is returned for
/// `SensorKind::Camera` when `motion_id` is absent.
pub fn generate<R: Rng + ?Sized>(
    kind: SensorKind,
    timestamp: NaiveDateTime,
    system_id: &str,
    motion_id: Option<Uuid>,
    rng: &mut R,
) -> Option<NewReading> {
    let system_id = system_id.to_string();
    let reading = match kind {
        SensorKind::Gas => NewReading::Gas(NewGasReading {
            timestamp,
            lpg: hundredths(rng, 0, 1000),
            co: hundredths(rng, 0, 50),
            smoke: hundredths(rng, 0, 300),
            system_id,
        }),
        SensorKind::Motion => NewReading::Motion(NewMotionReading {
            timestamp,
            motion_detected: rng.random_bool(0.5),
            intensity: hundredths(rng, 0, 10),
            system_id,
        }),
        SensorKind::Particle => NewReading::Particle(NewParticleReading {
            timestamp,
            pm1_0: hundredths(rng, 0, 50),
            pm2_5: hundredths(rng, 0, 100),
            pm10: hundredths(rng, 0, 200),
            system_id,
        }),
        SensorKind::Camera => NewReading::Camera(NewCameraReading {
            timestamp,
            image_path: image_path(),
            motion_id: motion_id?,
            latency_ms: rng.random_range(50..=300),
            system_id,
        }),
    };
    Some(reading)
}

pub(crate) fn image_path() -> String {
    format!("/uploads/img_{}.jpg", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::Field;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn within(value: Option<f64>, low: f64, high: f64) -> bool {
        value.is_some_and(|v| (low..=high).contains(&v))
    }

    #[test]
    fn values_stay_inside_their_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let motion_id = Some(Uuid::new_v4());

        for _ in 0..200 {
            for kind in SensorKind::ALL {
                let reading = generate(kind, now(), "1", motion_id, &mut rng)
                    .unwrap()
                    .into_record(Uuid::new_v4())
                    .to_reading();
                let ok = match kind {
                    SensorKind::Gas => {
                        within(reading.value(Field::Lpg), 0.0, 1000.0)
                            && within(reading.value(Field::Co), 0.0, 50.0)
                            && within(reading.value(Field::Smoke), 0.0, 300.0)
                    }
                    SensorKind::Motion => within(reading.value(Field::Intensity), 0.0, 10.0),
                    SensorKind::Particle => {
                        within(reading.value(Field::Pm1), 0.0, 50.0)
                            && within(reading.value(Field::Pm25), 0.0, 100.0)
                            && within(reading.value(Field::Pm10), 0.0, 200.0)
                    }
                    SensorKind::Camera => within(reading.value(Field::LatencyMs), 50.0, 300.0),
                };
                assert!(ok, "{kind} reading out of range: {reading:?}");
                assert!(reading.values.values().all(|v| v.scale() <= 2));
            }
        }
    }

    #[test]
    fn camera_needs_a_motion_reading() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate(SensorKind::Camera, now(), "1", None, &mut rng).is_none());

        let motion_id = Uuid::new_v4();
        match generate(SensorKind::Camera, now(), "7", Some(motion_id), &mut rng) {
            Some(NewReading::Camera(capture)) => {
                assert_eq!(capture.motion_id, motion_id);
                assert_eq!(capture.system_id, "7");
                assert!(capture.image_path.starts_with("/uploads/img_"));
            }
            other => panic!("expected a camera capture, got {other:?}"),
        }
    }
}
