// ToolFusion - app/jobs.rs
//
// Background job lifecycle management. Long-running operations (batch
// image conversion, PDF merge/split, OCR) run on a background thread,
// sending progress messages to the UI thread via an mpsc channel.
//
// Architecture:
//   - `JobManager` lives on the UI thread; `run_job` runs on a background thread.
//   - An `Arc<AtomicBool>` cancel flag allows the UI to stop a batch cooperatively.
//   - All cross-thread communication is via `JobProgress` channel messages.
//   - Exactly one job runs at a time; the UI disables job buttons while one
//     is in progress.
//
// Failure policy:
//   - Batch image conversion: a per-file failure is reported and the batch
//     continues with the next file (skip-and-report).
//   - PDF and OCR jobs: any failure aborts the whole job with `Failed`.
//   - Cancel is checked between files; PDF and OCR jobs run to completion
//     once started.

use crate::core::model::{ImageJob, JobProgress, JobReport, PdfJob};
use crate::core::ocr::ModelPaths;
use crate::core::{image_convert, ocr, pdf_ops};
use crate::util::constants::MAX_JOB_MESSAGES_PER_FRAME;
use image::RgbaImage;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Instant;

/// A user-triggered background operation.
pub enum JobRequest {
    /// Convert every input image, skipping failures.
    ImageBatch(ImageJob),

    /// Merge or split PDFs.
    Pdf(PdfJob),

    /// Run text recognition over a captured screenshot.
    Ocr {
        image: RgbaImage,
        models: ModelPaths,
    },
}

impl JobRequest {
    /// Short label for status messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ImageBatch(_) => "image conversion",
            Self::Pdf(PdfJob::Merge { .. }) => "PDF merge",
            Self::Pdf(PdfJob::Split { .. }) => "PDF split",
            Self::Ocr { .. } => "OCR",
        }
    }
}

/// Manages one background job at a time.
pub struct JobManager {
    /// Channel receiver for the UI to poll progress messages.
    progress_rx: Option<mpsc::Receiver<JobProgress>>,

    /// Cancel flag shared with the background thread.
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl JobManager {
    pub fn new() -> Self {
        Self {
            progress_rx: None,
            cancel_flag: None,
        }
    }

    /// Start a job on a background thread; progress is sent over the channel.
    /// Any previous job is cancelled first (the UI prevents this in practice
    /// by disabling job buttons while one runs).
    pub fn start(&mut self, request: JobRequest) {
        self.cancel();

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        self.progress_rx = Some(rx);
        self.cancel_flag = Some(Arc::clone(&cancel));

        let label = request.label();
        std::thread::spawn(move || {
            run_job(request, tx, cancel);
        });

        tracing::info!(job = label, "Job started");
    }

    /// Request cancellation of the running job.
    /// The background thread will send `JobProgress::Cancelled` and exit.
    pub fn cancel(&mut self) {
        if let Some(flag) = &self.cancel_flag {
            flag.store(true, Ordering::SeqCst);
        }
        self.cancel_flag = None;
    }

    /// Poll for progress messages without blocking.
    ///
    /// Returns at most `MAX_JOB_MESSAGES_PER_FRAME` messages; the rest stay
    /// queued for the next frame so a burst cannot stall the render loop.
    pub fn poll_progress(&self) -> Vec<JobProgress> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while messages.len() < MAX_JOB_MESSAGES_PER_FRAME {
                match rx.try_recv() {
                    Ok(msg) => messages.push(msg),
                    Err(_) => break,
                }
            }
        }
        messages
    }
}

impl Default for JobManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Background job dispatch
// =============================================================================

/// Runs on a background thread. Sends `JobProgress` messages to `tx`.
fn run_job(request: JobRequest, tx: mpsc::Sender<JobProgress>, cancel: Arc<AtomicBool>) {
    match request {
        JobRequest::ImageBatch(job) => run_image_batch(job, tx, cancel),
        JobRequest::Pdf(job) => run_pdf_job(job, tx, cancel),
        JobRequest::Ocr { image, models } => run_ocr_job(image, models, tx, cancel),
    }
}

/// Batch image conversion: per-file skip-and-report, cancel between files.
fn run_image_batch(job: ImageJob, tx: mpsc::Sender<JobProgress>, cancel: Arc<AtomicBool>) {
    macro_rules! send {
        ($msg:expr) => {
            if tx.send($msg).is_err() {
                return; // Receiver dropped (UI closed); exit quietly.
            }
        };
    }

    let total = job.inputs.len();
    let start = Instant::now();
    send!(JobProgress::Started { total });

    let mut report = JobReport::default();

    for (idx, input) in job.inputs.iter().enumerate() {
        if cancel.load(Ordering::SeqCst) {
            send!(JobProgress::Cancelled);
            return;
        }

        let detail = match image_convert::convert_one(input, &job.params) {
            Ok((output, width, height)) => {
                report.succeeded += 1;
                let line = format!(
                    "Processed: {} -> {} ({width}x{height})",
                    input.display(),
                    output.display()
                );
                report.outputs.push(output);
                line
            }
            Err(e) => {
                report.failed += 1;
                tracing::warn!(file = %input.display(), error = %e, "Image conversion failed");
                send!(JobProgress::FileFailed {
                    path: input.clone(),
                    message: e.to_string(),
                });
                format!("Skipped: {}", input.display())
            }
        };

        send!(JobProgress::Step {
            completed: idx + 1,
            total,
            detail,
        });
    }

    report.duration = start.elapsed();
    tracing::info!(
        succeeded = report.succeeded,
        failed = report.failed,
        "Image batch complete"
    );
    send!(JobProgress::Finished { report });
}

/// PDF merge/split: any failure aborts the whole job.
fn run_pdf_job(job: PdfJob, tx: mpsc::Sender<JobProgress>, cancel: Arc<AtomicBool>) {
    macro_rules! send {
        ($msg:expr) => {
            if tx.send($msg).is_err() {
                return;
            }
        };
    }

    if cancel.load(Ordering::SeqCst) {
        send!(JobProgress::Cancelled);
        return;
    }

    let start = Instant::now();
    let tx_progress = tx.clone();

    let result = match job {
        PdfJob::Merge {
            ref inputs,
            ref output,
        } => {
            send!(JobProgress::Started {
                total: inputs.len()
            });
            let total = inputs.len();
            pdf_ops::merge(inputs, output, |completed, _| {
                let _ = tx_progress.send(JobProgress::Step {
                    completed,
                    total,
                    detail: format!("Loaded {completed}/{total} documents"),
                });
            })
            .map(|pages| {
                let mut report = JobReport {
                    succeeded: total,
                    outputs: vec![output.clone()],
                    ..Default::default()
                };
                report.duration = start.elapsed();
                (report, format!("Merged {pages} pages"))
            })
        }
        PdfJob::Split {
            ref input,
            mode,
            ref output_dir,
        } => pdf_ops::split(input, mode, output_dir, |completed, total| {
            let _ = tx_progress.send(JobProgress::Step {
                completed,
                total,
                detail: format!("Wrote {completed}/{total} files"),
            });
        })
        .map(|outputs| {
            let count = outputs.len();
            let report = JobReport {
                succeeded: count,
                outputs,
                duration: start.elapsed(),
                ..Default::default()
            };
            (report, format!("Split into {count} file(s)"))
        }),
    };

    match result {
        Ok((report, summary)) => {
            tracing::info!(summary = %summary, "PDF job complete");
            send!(JobProgress::Finished { report });
        }
        Err(e) => {
            tracing::warn!(error = %e, "PDF job failed");
            send!(JobProgress::Failed {
                error: e.to_string(),
            });
        }
    }
}

/// OCR: load models, then recognise. Two coarse progress steps -- model
/// loading dominates the runtime.
fn run_ocr_job(
    image: RgbaImage,
    models: ModelPaths,
    tx: mpsc::Sender<JobProgress>,
    cancel: Arc<AtomicBool>,
) {
    macro_rules! send {
        ($msg:expr) => {
            if tx.send($msg).is_err() {
                return;
            }
        };
    }

    if cancel.load(Ordering::SeqCst) {
        send!(JobProgress::Cancelled);
        return;
    }

    let start = Instant::now();
    send!(JobProgress::Started { total: 2 });

    let recognizer = match ocr::TextRecognizer::load(&models) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "OCR engine load failed");
            send!(JobProgress::Failed {
                error: e.to_string(),
            });
            return;
        }
    };
    send!(JobProgress::Step {
        completed: 1,
        total: 2,
        detail: "OCR models loaded".to_string(),
    });

    if cancel.load(Ordering::SeqCst) {
        send!(JobProgress::Cancelled);
        return;
    }

    match recognizer.recognize(&image) {
        Ok(text) => {
            send!(JobProgress::Step {
                completed: 2,
                total: 2,
                detail: "Text recognition complete".to_string(),
            });
            let report = JobReport {
                succeeded: 1,
                duration: start.elapsed(),
                extracted_text: Some(text),
                ..Default::default()
            };
            send!(JobProgress::Finished { report });
        }
        Err(e) => {
            tracing::warn!(error = %e, "OCR recognition failed");
            send!(JobProgress::Failed {
                error: e.to_string(),
            });
        }
    }
}
