//! Integration tests for the qibla needle and heading normalization.

use futures::StreamExt;

use noor::error::NoorError;
use noor::qibla::sensor::{LineSensor, ManualSensor, OrientationSensor, begin_orientation_tracking};
use noor::qibla::{QiblaEngine, compute_needle_angle};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
/// What: Needle angle is `(bearing − heading) mod 360`.
///
/// Inputs:
/// - (200, 50), (10, 350), (0, 0), (359.5, 0.5).
///
/// Output:
/// - 150, 20, 0, 359.
fn needle_angle_examples() {
    assert!(close(compute_needle_angle(200.0, 50.0), 150.0));
    assert!(close(compute_needle_angle(10.0, 350.0), 20.0));
    assert!(close(compute_needle_angle(0.0, 0.0), 0.0));
    assert!(close(compute_needle_angle(359.5, 0.5), 359.0));
}

#[tokio::test]
/// What: A JSON-lines source yields normalized headings and skips bad lines.
///
/// Inputs:
/// - Lines `{"webkitCompassHeading": 90}`, `not json`, `{"alpha": 90, "absolute": true}`.
///
/// Output:
/// - 90 then 270.
async fn line_sensor_reads_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("orientation.jsonl");
    std::fs::write(
        &path,
        "{\"webkitCompassHeading\": 90}\nnot json\n{\"alpha\": 90, \"absolute\": true}\n",
    )
    .expect("write");
    let sensor = LineSensor::new(&path);
    assert!(sensor.requires_permission());
    let mut sub = begin_orientation_tracking(&sensor).await.expect("subscribed");
    assert_eq!(sub.next().await, Some(90.0));
    assert_eq!(sub.next().await, Some(270.0));
    sub.unsubscribe();
}

#[tokio::test]
/// What: A missing source is reported as a refused permission.
///
/// Inputs:
/// - Path that does not exist.
///
/// Output:
/// - `NoorError::PermissionDenied`.
async fn line_sensor_missing_source() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sensor = LineSensor::new(dir.path().join("absent"));
    let err = begin_orientation_tracking(&sensor).await.expect_err("denied");
    assert!(matches!(err, NoorError::PermissionDenied(_)));
}

#[test]
/// What: The engine combines bearing and the last heading; unknowns count as 0.
///
/// Inputs:
/// - No data; bearing 200; heading 50 then 380.
///
/// Output:
/// - 0, 200, 150, 180.
fn engine_needle_follows_readings() {
    let mut engine = QiblaEngine::default();
    assert!(close(engine.needle_angle(), 0.0));
    engine.apply_bearing(200.0);
    assert!(close(engine.needle_angle(), 200.0));
    engine.apply_heading(50.0);
    assert!(close(engine.needle_angle(), 150.0));
    engine.apply_heading(380.0);
    assert!(close(engine.needle_angle(), 180.0));
}

#[tokio::test]
/// What: The keyboard sensor needs no permission, delivers headings, and can only be
/// subscribed once.
///
/// Inputs:
/// - Manual sensor; 45.0 sent; second subscription attempt.
///
/// Output:
/// - First reading 45.0; second tracking attempt fails.
async fn manual_sensor_subscription() {
    let (sensor, tx) = ManualSensor::new();
    assert!(!sensor.requires_permission());
    let mut sub = begin_orientation_tracking(&sensor).await.expect("subscribed");
    tx.send(45.0).expect("send");
    assert_eq!(sub.next().await, Some(45.0));
    assert!(begin_orientation_tracking(&sensor).await.is_err());
    sub.unsubscribe();
}
