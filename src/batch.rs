//! Batch runner: many independent signal pairs through one pipeline
//!
//! Every run owns its own sequences, so the pairs are spread over a small
//! pool of scoped worker threads pulling from a shared job queue. Results
//! come back in submission order regardless of which worker finished first.

use std::thread;

use crossbeam_channel::unbounded;

use crate::domain::{QamError, QamResult, Signal};
use crate::qam::{PipelineOutput, QamPipeline};

/// One pair of inputs to modulate together
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub first: Signal,
    pub second: Signal,
}

impl BatchJob {
    pub fn new(first: Signal, second: Signal) -> Self {
        Self { first, second }
    }
}

/// Run every job through `pipeline` on up to `workers` threads.
///
/// A failing job does not stop the others; its error takes its slot in the
/// returned vector.
pub fn run_batch(
    pipeline: &QamPipeline,
    jobs: Vec<BatchJob>,
    workers: usize,
) -> Vec<QamResult<PipelineOutput>> {
    let total = jobs.len();
    if total == 0 {
        return Vec::new();
    }
    let workers = workers.clamp(1, total);
    log::debug!("running {total} pipeline job(s) on {workers} worker(s)");

    let (job_tx, job_rx) = unbounded::<(usize, BatchJob)>();
    let (result_tx, result_rx) = unbounded::<(usize, QamResult<PipelineOutput>)>();

    for item in jobs.into_iter().enumerate() {
        if job_tx.send(item).is_err() {
            break;
        }
    }
    // Closing the queue lets the workers' receive loops end
    drop(job_tx);

    thread::scope(|scope| {
        for worker in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                for (index, job) in job_rx.iter() {
                    let result = pipeline.run(&job.first, &job.second);
                    if let Err(e) = &result {
                        log::warn!("job {index} failed on worker {worker}: {e}");
                    }
                    if result_tx.send((index, result)).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(result_tx);

    let mut slots: Vec<Option<QamResult<PipelineOutput>>> = (0..total).map(|_| None).collect();
    for (index, result) in result_rx.iter() {
        slots[index] = Some(result);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.unwrap_or_else(|| {
                Err(QamError::InvalidInput(format!("job {index} produced no result")))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CarrierSpec;

    fn signal(len: usize, value: f64) -> Signal {
        Signal::new(vec![value; len], 8000).unwrap()
    }

    #[test]
    fn results_keep_submission_order() {
        let pipeline = QamPipeline::new(CarrierSpec::khz(1.0).unwrap());
        let jobs: Vec<BatchJob> = (1..=6)
            .map(|n| BatchJob::new(signal(n * 10, 0.1), signal(5, 0.2)))
            .collect();

        let results = run_batch(&pipeline, jobs, 3);
        assert_eq!(results.len(), 6);
        for (i, result) in results.iter().enumerate() {
            let output = result.as_ref().unwrap();
            assert_eq!(output.modulated.len(), (i + 1) * 10);
        }
    }

    #[test]
    fn failing_job_does_not_poison_the_batch() {
        let pipeline = QamPipeline::new(CarrierSpec::khz(1.0).unwrap()).with_max_input_len(Some(20));
        let jobs = vec![
            BatchJob::new(signal(10, 0.1), signal(10, 0.1)),
            BatchJob::new(signal(30, 0.1), signal(10, 0.1)),
            BatchJob::new(signal(15, 0.1), signal(10, 0.1)),
        ];

        let results = run_batch(&pipeline, jobs, 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(QamError::InvalidInput(_))));
        assert!(results[2].is_ok());
    }

    #[test]
    fn parallel_matches_sequential() {
        let pipeline = QamPipeline::new(CarrierSpec::khz(2.0).unwrap());
        let first: Vec<f64> = (0..400).map(|i| (i as f64 * 0.01).sin()).collect();
        let second: Vec<f64> = (0..400).map(|i| (i as f64 * 0.02).cos()).collect();
        let a = Signal::new(first, 8000).unwrap();
        let b = Signal::new(second, 8000).unwrap();

        let expected = pipeline.run(&a, &b).unwrap();
        let jobs = vec![BatchJob::new(a.clone(), b.clone()); 4];
        for result in run_batch(&pipeline, jobs, 4) {
            assert_eq!(result.unwrap().demodulated, expected.demodulated);
        }
    }

    #[test]
    fn empty_batch_and_zero_workers() {
        let pipeline = QamPipeline::new(CarrierSpec::khz(1.0).unwrap());
        assert!(run_batch(&pipeline, Vec::new(), 4).is_empty());

        let results = run_batch(&pipeline, vec![BatchJob::new(signal(4, 0.1), signal(4, 0.1))], 0);
        assert!(results[0].is_ok());
    }
}
