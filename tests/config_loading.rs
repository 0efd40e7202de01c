//! Loading TOML configuration from disk and driving replay ticks with it.

use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use dhvani::{DhvaniConfig, Error, Locator, Point2D, ReplayBearings, SolverType, StaticPoses, TickRunner};
use tempfile::TempDir;

const SOURCE: Point2D = Point2D { x: 4.0, y: 3.0 };
const SENSORS: [(f64, f64); 3] = [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)];

fn write_config(dir: &Path, algorithm: &str) -> std::path::PathBuf {
    let angles = dir.join("angles.txt");
    let mut toml = format!(
        r#"
[detection]
power_threshold = 1000.0

[solver]
algorithm = "{}"
window_size = 1.0
step_size = 0.05

[frames]
world = "map"
solution = "speaker"
ray_length = 5.0

[replay]
enabled = true
angles_file = "{}"
"#,
        algorithm,
        angles.display()
    );
    for (i, (x, y)) in SENSORS.iter().enumerate() {
        toml.push_str(&format!(
            "\n[[sensors]]\npose_frame = \"kinect_{i}\"\nbearing_topic = \"doa_{i}\"\npose = {{ x = {x:?}, y = {y:?} }}\n"
        ));
    }
    let path = dir.join("dhvani.toml");
    fs::write(&path, toml).unwrap();
    path
}

/// One azimuth per line, in degrees, pointing every sensor at `target`.
fn write_angles(dir: &Path, target: Point2D) {
    let lines: Vec<String> = SENSORS
        .iter()
        .map(|&(x, y)| format!("{}", (target.y - y).atan2(target.x - x).to_degrees()))
        .collect();
    fs::write(dir.join("angles.txt"), lines.join("\n")).unwrap();
}

fn runner(config: &DhvaniConfig) -> TickRunner<StaticPoses, ReplayBearings> {
    let locator = Locator::new(config.sensor_count(), config.to_locator_config().unwrap()).unwrap();
    TickRunner::new(
        locator,
        StaticPoses::new(config.static_poses().unwrap()),
        ReplayBearings::from_file(&config.replay.angles_file),
    )
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let config = DhvaniConfig::load(&write_config(dir.path(), "fast_grid")).unwrap();

    assert_eq!(config.sensor_count(), 3);
    assert_eq!(config.solver.algorithm, SolverType::FastGrid);
    assert_eq!(config.frames.world, "map");
    assert_eq!(config.frames.solution, "speaker");
    assert_eq!(config.sensors[2].pose_frame, "kinect_2");

    let poses = config.static_poses().unwrap();
    assert_relative_eq!(poses[1].position().x, 10.0);
    assert_relative_eq!(poses[2].position().y, 10.0);

    let locator = config.to_locator_config().unwrap();
    assert_relative_eq!(locator.ray_length, 5.0);
    assert_relative_eq!(locator.window.step_size(), 0.05);
    // Replay overrides the configured threshold
    assert_eq!(locator.power_threshold, f64::NEG_INFINITY);
}

#[test]
fn test_missing_config_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = DhvaniConfig::load(&dir.path().join("nope.toml"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_malformed_config_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[solver\nalgorithm = 3").unwrap();
    assert!(matches!(DhvaniConfig::load(&path), Err(Error::Configuration(_))));
}

#[test]
fn test_replay_end_to_end() {
    let dir = TempDir::new().unwrap();
    let config = DhvaniConfig::load(&write_config(dir.path(), "slow_grid")).unwrap();
    write_angles(dir.path(), SOURCE);

    let mut runner = runner(&config);
    let output = runner.tick().unwrap();
    let solution = output.solution.unwrap();

    assert_eq!(solution.solver, SolverType::SlowGrid);
    assert_eq!(solution.detected, 3);
    assert_eq!(solution.evaluations, 21 * 21);
    assert!(solution.wls_estimate.distance(&SOURCE) < 1e-6);
    // Nearest lattice point to an exact intersection
    assert!(solution.point.distance(&SOURCE) < 0.05);
    assert_eq!(output.rays.len(), 3);
    assert_relative_eq!(output.rays[0].origin.distance(&output.rays[0].end), 5.0, epsilon = 1e-12);
}

#[test]
fn test_angle_file_is_reread_every_tick() {
    let dir = TempDir::new().unwrap();
    let config = DhvaniConfig::load(&write_config(dir.path(), "wls_only")).unwrap();
    let mut runner = runner(&config);

    write_angles(dir.path(), SOURCE);
    let first = runner.tick().unwrap().solution.unwrap();
    assert_relative_eq!(first.point.x, SOURCE.x, epsilon = 1e-6);
    assert_relative_eq!(first.point.y, SOURCE.y, epsilon = 1e-6);

    let moved = Point2D::new(2.0, 6.0);
    write_angles(dir.path(), moved);
    let second = runner.tick().unwrap().solution.unwrap();
    assert_relative_eq!(second.point.x, moved.x, epsilon = 1e-6);
    assert_relative_eq!(second.point.y, moved.y, epsilon = 1e-6);
    assert_eq!(runner.ticks(), 2);
}

#[test]
fn test_replay_failures_skip_the_tick() {
    let dir = TempDir::new().unwrap();
    let config = DhvaniConfig::load(&write_config(dir.path(), "fast_grid")).unwrap();
    let mut runner = runner(&config);

    // No angle file yet
    assert!(matches!(runner.tick(), Err(Error::Io(_))));

    // Fewer angles than sensors
    fs::write(dir.path().join("angles.txt"), "10.0\n20.0\n").unwrap();
    assert!(matches!(runner.tick(), Err(Error::InvalidInput(_))));

    // Recovers once the file is complete
    write_angles(dir.path(), SOURCE);
    let solution = runner.tick().unwrap().solution.unwrap();
    assert!(solution.point.distance(&SOURCE) < 0.05);
    assert_eq!(runner.ticks(), 3);
}
