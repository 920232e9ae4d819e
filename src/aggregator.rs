//! Temperature aggregation
//!
//! Runs every source independently and packages the per-vendor results.
//! A failing source only affects its own entry in the report.

use crate::arena::ScratchArena;
use crate::domain::{Temperature, TemperatureReport, Vendor};
use crate::error::VendorError;
use crate::vendor::TemperatureSource;

/// How the sources are driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    /// One after another, in the order given
    #[default]
    Sequential,
    /// Each source on its own scoped thread
    Parallel,
}

/// Outcome of one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOutcome {
    pub vendor: Vendor,
    pub result: Result<Temperature, VendorError>,
}

/// Query every source and collect the report
pub fn collect_report<S: TemperatureSource>(
    sources: &mut [S],
    arena: &ScratchArena,
    schedule: Schedule,
) -> TemperatureReport {
    let outcomes = match schedule {
        Schedule::Sequential => query_sequential(sources, arena),
        Schedule::Parallel => query_parallel(sources, arena),
    };
    build_report(&outcomes)
}

/// Fold outcomes into a report; failures become absent readings
pub fn build_report(outcomes: &[SourceOutcome]) -> TemperatureReport {
    let mut report = TemperatureReport::default();
    for outcome in outcomes {
        report.record(outcome.vendor, outcome.result.as_ref().ok().copied());
    }
    report
}

pub fn query_sequential<S: TemperatureSource>(
    sources: &mut [S],
    arena: &ScratchArena,
) -> Vec<SourceOutcome> {
    sources
        .iter_mut()
        .map(|source| query_one(source, arena))
        .collect()
}

pub fn query_parallel<S: TemperatureSource>(
    sources: &mut [S],
    arena: &ScratchArena,
) -> Vec<SourceOutcome> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter_mut()
            .map(|source| {
                let vendor = source.vendor();
                let handle = scope.spawn(move || query_one(source, arena));
                (vendor, handle)
            })
            .collect();

        handles
            .into_iter()
            .map(|(vendor, handle)| {
                handle.join().unwrap_or_else(|_| {
                    log::error!("{} pipeline panicked", vendor);
                    SourceOutcome {
                        vendor,
                        result: Err(VendorError::NoReadings { vendor }),
                    }
                })
            })
            .collect()
    })
}

fn query_one<S: TemperatureSource>(source: &mut S, arena: &ScratchArena) -> SourceOutcome {
    let vendor = source.vendor();
    log::debug!("Querying {} temperature", vendor);

    let result = source.query(arena);
    match &result {
        Ok(temp) => log::info!("{} hottest sensor: {}", vendor, temp),
        Err(e) => log::debug!("{} pipeline finished without a reading: {}", vendor, e),
    }

    SourceOutcome { vendor, result }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockAdlLoader, MockNvApiLoader, MockSource};
    use crate::status::StatusCode;
    use crate::vendor::{AdlSource, NvidiaSource};
    use std::sync::atomic::Ordering;

    fn arena() -> ScratchArena {
        ScratchArena::with_capacity(64 * 1024)
    }

    #[test]
    fn test_both_vendors_reported_separately() {
        let mut sources = vec![
            MockSource::reading(Vendor::Nvidia, 72),
            MockSource::reading(Vendor::Amd, 61),
        ];
        let report = collect_report(&mut sources, &arena(), Schedule::Sequential);
        assert_eq!(report.as_pair(), (72, 61));
    }

    #[test]
    fn test_both_vendors_failing_is_zero_pair() {
        let mut sources = vec![
            MockSource::failing(Vendor::Nvidia),
            MockSource::failing(Vendor::Amd),
        ];
        let report = collect_report(&mut sources, &arena(), Schedule::Sequential);
        assert_eq!(report, TemperatureReport::default());
        assert_eq!(report.as_pair(), (0, 0));
    }

    #[test]
    fn test_nvidia_failure_does_not_stop_amd() {
        let nvidia = MockSource::failing(Vendor::Nvidia);
        let amd = MockSource::reading(Vendor::Amd, 58);
        let amd_queries = amd.queries();

        let mut sources = vec![nvidia, amd];
        let report = collect_report(&mut sources, &arena(), Schedule::Sequential);

        assert_eq!(amd_queries.load(Ordering::SeqCst), 1);
        assert_eq!(report.nvidia, None);
        assert_eq!(report.amd, Some(Temperature::new(58)));
    }

    #[test]
    fn test_isolation_with_real_pipelines() {
        let amd_reading = || MockAdlLoader::new().with_adapter(Ok(61000));

        for nvidia_fails in [false, true] {
            let nvidia_loader = if nvidia_fails {
                MockNvApiLoader::new().fail_initialize(StatusCode(-1))
            } else {
                MockNvApiLoader::new().with_gpu(Ok(vec![50, 72]))
            };

            let mut sources: Vec<Box<dyn TemperatureSource>> = vec![
                Box::new(NvidiaSource::new(nvidia_loader)),
                Box::new(AdlSource::new(amd_reading())),
            ];
            let report = collect_report(&mut sources, &arena(), Schedule::Sequential);

            assert_eq!(report.amd, Some(Temperature::new(61)));
            let expected_nvidia = (!nvidia_fails).then_some(Temperature::new(72));
            assert_eq!(report.nvidia, expected_nvidia);
        }
    }

    #[test]
    fn test_amd_failure_does_not_alter_nvidia() {
        let mut sources: Vec<Box<dyn TemperatureSource>> = vec![
            Box::new(NvidiaSource::new(
                MockNvApiLoader::new().with_gpu(Ok(vec![66])),
            )),
            Box::new(AdlSource::new(
                MockAdlLoader::new().fail_context(StatusCode(-1)),
            )),
        ];
        let report = collect_report(&mut sources, &arena(), Schedule::Sequential);
        assert_eq!(report.as_pair(), (66, 0));
    }

    #[test]
    fn test_parallel_schedule_matches_sequential() {
        let build = || -> Vec<Box<dyn TemperatureSource>> {
            vec![
                Box::new(NvidiaSource::new(
                    MockNvApiLoader::new()
                        .with_gpu(Ok(vec![50, 72]))
                        .with_gpu(Ok(vec![68])),
                )),
                Box::new(AdlSource::new(
                    MockAdlLoader::new()
                        .with_adapter(Ok(58000))
                        .with_adapter(Err(StatusCode(-8)))
                        .with_adapter(Ok(61000)),
                )),
            ]
        };

        let arena = arena();
        let sequential = collect_report(&mut build(), &arena, Schedule::Sequential);
        let parallel = collect_report(&mut build(), &arena, Schedule::Parallel);

        assert_eq!(sequential, parallel);
        assert_eq!(parallel.as_pair(), (72, 61));
    }

    #[test]
    fn test_outcomes_keep_source_order() {
        let mut sources = vec![
            MockSource::reading(Vendor::Amd, 40),
            MockSource::failing(Vendor::Nvidia),
        ];
        let outcomes = query_parallel(&mut sources, &arena());

        assert_eq!(outcomes[0].vendor, Vendor::Amd);
        assert_eq!(outcomes[1].vendor, Vendor::Nvidia);
        assert!(outcomes[1].result.is_err());
    }

    #[test]
    fn test_no_sources_gives_empty_report() {
        let mut sources: Vec<MockSource> = Vec::new();
        let report = collect_report(&mut sources, &arena(), Schedule::Parallel);
        assert_eq!(report, TemperatureReport::default());
    }

    struct PanickingSource;

    impl TemperatureSource for PanickingSource {
        fn vendor(&self) -> Vendor {
            Vendor::Nvidia
        }

        fn query(&mut self, _arena: &ScratchArena) -> Result<Temperature, VendorError> {
            panic!("driver crashed");
        }
    }

    #[test]
    fn test_parallel_panic_becomes_missing_reading() {
        let mut sources: Vec<Box<dyn TemperatureSource>> = vec![
            Box::new(PanickingSource),
            Box::new(MockSource::reading(Vendor::Amd, 61)),
        ];
        let outcomes = query_parallel(&mut sources, &arena());

        assert_eq!(
            outcomes[0].result,
            Err(VendorError::NoReadings {
                vendor: Vendor::Nvidia
            })
        );
        assert_eq!(build_report(&outcomes).as_pair(), (0, 61));
    }
}
