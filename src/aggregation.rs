use crate::journal::Journal;
use crate::model::{Category, Measurement, Site, SiteId};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Latest total for a site, to be shown on the map
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerUpdate {
    pub site: Site,
    pub total: u64,
}

/// Latest measurement per reporting plant and the figures derived from them
pub struct Aggregation {
    reports: BTreeMap<SiteId, Measurement>,
    journal: Box<dyn Journal>,
}

impl Aggregation {
    pub fn new(journal: Box<dyn Journal>) -> Self {
        Self {
            reports: BTreeMap::new(),
            journal,
        }
    }

    /// Store `measurement` (replacing the plant's previous one), log it, and
    /// hand back the plant's new total for its map marker.
    pub fn receive(&mut self, measurement: Measurement) -> MarkerUpdate {
        let line = measurement.log_line();
        let update = MarkerUpdate {
            site: measurement.site.clone(),
            total: measurement.total(),
        };
        info!(site = %update.site.name, total = update.total, "measurement received");
        self.reports.insert(update.site.id, measurement);

        // Log failures never block delivery
        if let Err(e) = self.journal.append(&line) {
            warn!(error = %e, "failed to append measurement log");
        }
        update
    }

    /// Sum of populations of plants that reported at least once
    pub fn total_population(&self) -> u64 {
        self.reports.values().map(|m| m.site.population).sum()
    }

    /// Mean over reporting plants (not population weighted); 0 with no reports
    pub fn average(&self, category: Category) -> f64 {
        if self.reports.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.reports.values().map(|m| m.value(category) as u64).sum();
        sum as f64 / self.reports.len() as f64
    }

    pub fn averages(&self) -> Vec<(Category, f64)> {
        Category::ALL.iter().map(|&c| (c, self.average(c))).collect()
    }

    pub fn reported(&self) -> usize {
        self.reports.len()
    }

    pub fn latest(&self, site: SiteId) -> Option<&Measurement> {
        self.reports.get(&site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::MemoryJournal;
    use std::io;

    struct BrokenJournal;

    impl Journal for BrokenJournal {
        fn append(&mut self, _line: &str) -> io::Result<()> {
            Err(io::Error::other("disk full"))
        }
    }

    fn site(id: usize, population: u64) -> Site {
        Site::new(SiteId(id), &format!("Plant {id}"), population, 8.0, 48.0).unwrap()
    }

    fn measurement(site: Site, values: &[(Category, u32)]) -> Measurement {
        Measurement::new(site, values.iter().copied().collect())
    }

    #[test]
    fn test_empty_averages_are_zero() {
        let agg = Aggregation::new(Box::new(MemoryJournal::default()));
        assert_eq!(agg.total_population(), 0);
        assert!(agg.averages().iter().all(|&(_, avg)| avg == 0.0));
    }

    #[test]
    fn test_single_report() {
        let mut agg = Aggregation::new(Box::new(MemoryJournal::default()));
        let update = agg.receive(measurement(
            site(0, 1000),
            &[(Category::Alpha, 10), (Category::Beta, 20)],
        ));

        assert_eq!(update.total, 30);
        assert_eq!(agg.total_population(), 1000);
        assert_eq!(agg.average(Category::Alpha), 10.0);
        assert_eq!(agg.average(Category::Beta), 20.0);
        assert_eq!(agg.average(Category::Delta), 0.0);
    }

    #[test]
    fn test_report_overwrites_previous() {
        let mut agg = Aggregation::new(Box::new(MemoryJournal::default()));
        agg.receive(measurement(site(0, 1000), &[(Category::Alpha, 10), (Category::Beta, 4)]));
        agg.receive(measurement(site(0, 1000), &[(Category::Alpha, 30)]));

        assert_eq!(agg.reported(), 1);
        assert_eq!(agg.total_population(), 1000);
        assert_eq!(agg.average(Category::Alpha), 30.0);
        assert_eq!(agg.average(Category::Beta), 0.0);
    }

    #[test]
    fn test_mean_is_count_based_population_is_summed() {
        let mut agg = Aggregation::new(Box::new(MemoryJournal::default()));
        agg.receive(measurement(site(0, 1000), &[(Category::Gamma, 10)]));
        agg.receive(measurement(site(1, 9000), &[(Category::Gamma, 20)]));

        assert_eq!(agg.total_population(), 10_000);
        assert_eq!(agg.average(Category::Gamma), 15.0);
    }

    #[test]
    fn test_receive_logs_each_measurement() {
        let journal = MemoryJournal::default();
        let mut agg = Aggregation::new(Box::new(journal.clone()));
        agg.receive(measurement(site(3, 10), &[(Category::Alpha, 7)]));

        let lines = journal.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Plant 3 ("));
        assert!(lines[0].ends_with("): {ALPHA (B.1.1.7)=7}"));
    }

    #[test]
    fn test_log_failure_still_delivers() {
        let mut agg = Aggregation::new(Box::new(BrokenJournal));
        let update = agg.receive(measurement(site(0, 500), &[(Category::Lambda, 3)]));
        assert_eq!(update.total, 3);
        assert_eq!(agg.reported(), 1);
    }
}
