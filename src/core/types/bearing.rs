//! Direction-of-arrival report types.

use serde::{Deserialize, Serialize};

use super::Point2D;

/// One candidate direction-of-arrival from a microphone array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Azimuth in degrees, relative to the sensor heading
    pub azimuth_deg: f64,
    /// Beamformer power (confidence) of this detection
    pub power: f64,
}

impl Detection {
    /// Create a new detection.
    #[inline]
    pub fn new(azimuth_deg: f64, power: f64) -> Self {
        Self { azimuth_deg, power }
    }

    /// Detection that passes any finite power threshold.
    ///
    /// Used for replayed azimuths, which carry no power measurement.
    #[inline]
    pub fn always_detected(azimuth_deg: f64) -> Self {
        Self {
            azimuth_deg,
            power: f64::MAX,
        }
    }

    /// Relative azimuth in radians.
    #[inline]
    pub fn azimuth_rad(&self) -> f64 {
        self.azimuth_deg.to_radians()
    }
}

/// All candidate detections reported by one sensor during one tick.
///
/// Order is preserved: on equal power the first-listed detection wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BearingReport {
    detections: Vec<Detection>,
}

impl BearingReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a report from a list of detections.
    pub fn from_detections(detections: Vec<Detection>) -> Self {
        Self { detections }
    }

    /// Report holding a single always-detected azimuth.
    pub fn single(azimuth_deg: f64) -> Self {
        Self {
            detections: vec![Detection::always_detected(azimuth_deg)],
        }
    }

    /// Append a detection.
    #[inline]
    pub fn push(&mut self, detection: Detection) {
        self.detections.push(detection);
    }

    /// Drop all detections (report slots are overwritten every tick).
    #[inline]
    pub fn clear(&mut self) {
        self.detections.clear();
    }

    /// Number of detections.
    #[inline]
    pub fn len(&self) -> usize {
        self.detections.len()
    }

    /// True if the sensor reported nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    /// Detections in reported order.
    #[inline]
    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    /// Detection with the strictly highest power; first-listed on ties.
    ///
    /// Detections with NaN power are skipped. If every power is NaN the
    /// first-listed detection is returned; it never passes a threshold.
    pub fn strongest(&self) -> Option<&Detection> {
        let mut comparable = self.detections.iter().filter(|d| !d.power.is_nan());
        match comparable.next() {
            Some(first) => {
                Some(comparable.fold(first, |best, d| if d.power > best.power { d } else { best }))
            }
            None => self.detections.first(),
        }
    }
}

/// Per-sensor flags: true iff the strongest detection exceeds the power threshold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionMask(Vec<bool>);

impl DetectionMask {
    /// Build a mask over `reports` for the given power threshold.
    ///
    /// A sensor with an empty report is never detected, whatever the threshold.
    pub fn from_reports(reports: &[BearingReport], power_threshold: f64) -> Self {
        Self(
            reports
                .iter()
                .map(|r| r.strongest().is_some_and(|d| d.power > power_threshold))
                .collect(),
        )
    }

    /// Create from explicit flags.
    pub fn from_flags(flags: Vec<bool>) -> Self {
        Self(flags)
    }

    /// Number of sensor slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no sensor slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether sensor `index` detected the source.
    #[inline]
    pub fn is_detected(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Number of detecting sensors.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&d| d).count()
    }

    /// Indices of detecting sensors.
    pub fn detected_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, &d)| d.then_some(i))
    }

    /// Flags as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

/// Fixed-length visualization segment along a sensor's absolute bearing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BearingRay {
    /// Sensor slot index
    pub sensor: usize,
    /// Sensor position
    pub origin: Point2D,
    /// Absolute bearing in radians (world frame)
    pub bearing: f64,
    /// Far end of the ray
    pub end: Point2D,
}

impl BearingRay {
    /// Ray of `length` meters from `origin` along `bearing`.
    pub fn new(sensor: usize, origin: Point2D, bearing: f64, length: f64) -> Self {
        Self {
            sensor,
            origin,
            bearing,
            end: origin.advance(bearing, length),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_strongest_picks_max_power() {
        let report = BearingReport::from_detections(vec![
            Detection::new(10.0, 0.5),
            Detection::new(20.0, 2.0),
            Detection::new(30.0, 1.0),
        ]);
        assert_eq!(report.strongest().unwrap().azimuth_deg, 20.0);
    }

    #[test]
    fn test_strongest_tie_first_wins() {
        let report = BearingReport::from_detections(vec![
            Detection::new(10.0, 1.0),
            Detection::new(20.0, 3.0),
            Detection::new(30.0, 3.0),
        ]);
        assert_eq!(report.strongest().unwrap().azimuth_deg, 20.0);
    }

    #[test]
    fn test_strongest_negative_powers() {
        let report = BearingReport::from_detections(vec![
            Detection::new(10.0, -5.0),
            Detection::new(20.0, -2.0),
        ]);
        assert_eq!(report.strongest().unwrap().azimuth_deg, 20.0);
    }

    #[test]
    fn test_strongest_empty() {
        assert!(BearingReport::new().strongest().is_none());
    }

    #[test]
    fn test_mask_threshold() {
        let reports = vec![
            BearingReport::from_detections(vec![Detection::new(0.0, 0.2)]),
            BearingReport::from_detections(vec![
                Detection::new(0.0, 0.1),
                Detection::new(5.0, 0.9),
            ]),
            BearingReport::new(),
        ];
        let mask = DetectionMask::from_reports(&reports, 0.5);
        assert_eq!(mask.as_slice(), &[false, true, false]);
        assert_eq!(mask.count(), 1);
        assert_eq!(mask.detected_indices().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_mask_threshold_is_strict() {
        let reports = vec![BearingReport::from_detections(vec![Detection::new(0.0, 0.5)])];
        assert!(!DetectionMask::from_reports(&reports, 0.5).is_detected(0));
    }

    #[test]
    fn test_mask_empty_report_never_detected() {
        let reports = vec![BearingReport::new()];
        for threshold in [-1e9, -1.0, 0.0, 1.0] {
            assert!(!DetectionMask::from_reports(&reports, threshold).is_detected(0));
        }
    }

    #[test]
    fn test_nan_power_skipped_in_any_order() {
        let nan_first = BearingReport::from_detections(vec![
            Detection::new(10.0, f64::NAN),
            Detection::new(80.0, 5.0),
        ]);
        let nan_last = BearingReport::from_detections(vec![
            Detection::new(80.0, 5.0),
            Detection::new(10.0, f64::NAN),
        ]);
        assert_eq!(nan_first.strongest().unwrap().azimuth_deg, 80.0);
        assert_eq!(nan_last.strongest().unwrap().azimuth_deg, 80.0);

        let mask = DetectionMask::from_reports(&[nan_first, nan_last], 0.0);
        assert_eq!(mask.as_slice(), &[true, true]);
    }

    #[test]
    fn test_all_nan_powers_keep_first_but_never_detect() {
        let report = BearingReport::from_detections(vec![
            Detection::new(10.0, f64::NAN),
            Detection::new(80.0, f64::NAN),
        ]);
        assert_eq!(report.strongest().unwrap().azimuth_deg, 10.0);
        for threshold in [f64::NEG_INFINITY, -1.0, 0.0] {
            let mask = DetectionMask::from_reports(std::slice::from_ref(&report), threshold);
            assert!(!mask.is_detected(0));
        }
    }

    #[test]
    fn test_mask_out_of_range_index() {
        let mask = DetectionMask::from_flags(vec![true]);
        assert!(!mask.is_detected(3));
    }

    #[test]
    fn test_always_detected_passes_threshold() {
        let reports = vec![BearingReport::single(45.0)];
        assert!(DetectionMask::from_reports(&reports, 1e12).is_detected(0));
    }

    #[test]
    fn test_bearing_ray_end() {
        let ray = BearingRay::new(0, Point2D::new(1.0, 0.0), std::f64::consts::PI, 20.0);
        assert_relative_eq!(ray.end.x, -19.0, epsilon = 1e-12);
        assert_relative_eq!(ray.end.y, 0.0, epsilon = 1e-12);
    }
}
