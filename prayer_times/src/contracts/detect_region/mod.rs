use crate::notifications::{Notification, Notifier};
use crate::regions::{Coordinate, Region, RegionTable};
use std::sync::Arc;

/// Maps a best-effort device position onto the closest catalogue region.
pub struct RegionDetector {
    regions: Arc<RegionTable>,
    notifier: Arc<dyn Notifier>,
}

impl RegionDetector {
    pub fn new(regions: Arc<RegionTable>, notifier: Arc<dyn Notifier>) -> Self {
        Self { regions, notifier }
    }

    #[tracing::instrument(skip(self), level = "debug")]
    pub fn detect(&self, position: Option<Coordinate>) -> Option<Region> {
        let detected = position.and_then(|position| self.regions.nearest(&position).cloned());
        match &detected {
            Some(region) => self
                .notifier
                .notify(Notification::LocationDetected(region.name())),
            None => self.notifier.notify(Notification::LocationUnavailable),
        }
        detected
    }
}

#[cfg(test)]
mod tests {
    use super::RegionDetector;
    use crate::notifications::{MockNotifier, Notification};
    use crate::regions::{Coordinate, RegionTable, DEFAULT_COORDINATE};
    use std::sync::Arc;

    #[test]
    fn test_position_resolves_to_the_nearest_region() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|notification| {
                *notification == Notification::LocationDetected("Kota Salatiga".to_string())
            })
            .times(1)
            .return_const(());
        let detector =
            RegionDetector::new(Arc::new(RegionTable::central_java()), Arc::new(notifier));

        let region = detector.detect(Some(Coordinate::new(-7.33, 110.51))).unwrap();

        assert_eq!(region.name(), "Kota Salatiga");
    }

    #[test]
    fn test_missing_position_is_reported() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|notification| *notification == Notification::LocationUnavailable)
            .times(1)
            .return_const(());
        let detector =
            RegionDetector::new(Arc::new(RegionTable::central_java()), Arc::new(notifier));

        assert_eq!(detector.detect(None), None);
    }

    #[test]
    fn test_empty_catalogue_detects_nothing() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|notification| *notification == Notification::LocationUnavailable)
            .times(1)
            .return_const(());
        let empty = RegionTable::new(Vec::new(), DEFAULT_COORDINATE);
        let detector = RegionDetector::new(Arc::new(empty), Arc::new(notifier));

        assert_eq!(detector.detect(Some(DEFAULT_COORDINATE)), None);
    }
}
