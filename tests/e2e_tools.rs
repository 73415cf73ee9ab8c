// ToolFusion - tests/e2e_tools.rs
//
// End-to-end tests for the tool pipelines.
//
// These tests exercise the real filesystem, real image encoding/decoding,
// real lopdf document construction, and the real background-job thread and
// channel plumbing. No mocks, no stubs: every assertion is made against
// files a user would actually get.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use toolfusion::app::jobs::{JobManager, JobRequest};
use toolfusion::core::model::{
    ImageJob, ImageParams, JobProgress, JobReport, OutputFormat, PdfJob, ResizeSpec, SplitMode,
};
use toolfusion::core::tasks::TaskList;
use toolfusion::core::{image_convert, password, pdf_ops};
use toolfusion::platform::config;

// =============================================================================
// Helpers
// =============================================================================

/// Write a small PNG with a distinctive pixel pattern.
fn make_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    img.save(path).unwrap();
}

/// Write a minimal real PDF with the given number of pages. Each page
/// carries the text `<label> <n>` so page provenance survives a merge.
fn make_pdf(path: &Path, label: &str, pages: usize) {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for i in 0..pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::string_literal(format!("{label} {}", i + 1))],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages as u32,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();
    doc.save(path).unwrap();
}

/// Drive a `JobManager` to completion, collecting every progress message.
/// Panics if the job does not terminate within ten seconds.
fn run_to_completion(request: JobRequest) -> (Vec<JobProgress>, Option<JobReport>) {
    let mut manager = JobManager::new();
    manager.start(request);

    let deadline = Instant::now() + Duration::from_secs(10);
    let mut messages: Vec<JobProgress> = Vec::new();

    loop {
        let batch = manager.poll_progress();
        let done = batch.iter().any(|m| {
            matches!(
                m,
                JobProgress::Finished { .. } | JobProgress::Failed { .. } | JobProgress::Cancelled
            )
        });
        messages.extend(batch);
        if done {
            break;
        }
        assert!(Instant::now() < deadline, "job did not finish in time");
        std::thread::sleep(Duration::from_millis(10));
    }

    let report = take_report(&mut messages);
    (messages, report)
}

/// Pull the final report out of a message stream, if the job finished.
fn take_report(messages: &mut Vec<JobProgress>) -> Option<JobReport> {
    let idx = messages
        .iter()
        .position(|m| matches!(m, JobProgress::Finished { .. }))?;
    match messages.remove(idx) {
        JobProgress::Finished { report } => Some(report),
        _ => unreachable!(),
    }
}

// =============================================================================
// Image conversion E2E
// =============================================================================

/// PNG -> BMP without resizing preserves every pixel.
#[test]
fn e2e_png_to_bmp_preserves_pixels() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("pattern.png");
    make_png(&input, 40, 30);

    let params = ImageParams {
        format: OutputFormat::Bmp,
        resize: None,
        output_dir: dir.path().to_path_buf(),
    };
    let (output, w, h) = image_convert::convert_one(&input, &params).unwrap();

    assert_eq!(output, dir.path().join("pattern.bmp"));
    assert_eq!((w, h), (40, 30));

    let original = image::open(&input).unwrap().into_rgb8();
    let converted = image::open(&output).unwrap().into_rgb8();
    assert_eq!(original.as_raw(), converted.as_raw());
}

/// Exact resize produces precisely the requested dimensions.
#[test]
fn e2e_exact_resize_ignores_aspect_ratio() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("wide.png");
    make_png(&input, 200, 100);

    let params = ImageParams {
        format: OutputFormat::Png,
        resize: Some(ResizeSpec {
            width: 50,
            height: 50,
            preserve_aspect: false,
        }),
        output_dir: dir.path().join("out"),
    };
    std::fs::create_dir_all(dir.path().join("out")).unwrap();
    let (output, w, h) = image_convert::convert_one(&input, &params).unwrap();

    assert_eq!((w, h), (50, 50));
    let decoded = image::open(&output).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (50, 50));
}

/// JPEG -> PNG at unchanged dimensions is lossless past the decode step:
/// the PNG decodes to exactly the pixels the JPEG source decoded to.
#[test]
fn e2e_jpeg_to_png_preserves_decoded_pixels() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.jpg");
    let img = image::RgbImage::from_fn(64, 48, |x, y| {
        image::Rgb([(x * 4) as u8, (y * 5) as u8, 128])
    });
    img.save(&input).unwrap();
    // The JPEG encode is lossy; the reference is what the JPEG decodes to.
    let expected = image::open(&input).unwrap().into_rgb8();

    let params = ImageParams {
        format: OutputFormat::Png,
        resize: None,
        output_dir: dir.path().to_path_buf(),
    };
    let (output, w, h) = image_convert::convert_one(&input, &params).unwrap();

    assert_eq!(output, dir.path().join("photo.png"));
    assert_eq!((w, h), (64, 48));
    let converted = image::open(&output).unwrap().into_rgb8();
    assert_eq!(expected.as_raw(), converted.as_raw());
}

/// A full batch job over the job thread: one good file, one corrupt file.
/// The good file converts, the bad one is reported, and the batch finishes.
#[test]
fn e2e_image_batch_skips_corrupt_file_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.png");
    let bad = dir.path().join("bad.png");
    make_png(&good, 20, 20);
    std::fs::write(&bad, b"this is not an image").unwrap();

    let out_dir = dir.path().join("converted");
    std::fs::create_dir_all(&out_dir).unwrap();

    let request = JobRequest::ImageBatch(ImageJob {
        inputs: vec![bad.clone(), good.clone()],
        params: ImageParams {
            format: OutputFormat::Jpeg,
            resize: None,
            output_dir: out_dir.clone(),
        },
    });
    let (messages, report) = run_to_completion(request);

    let report = report.expect("batch should finish with a report");
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.outputs, vec![out_dir.join("good.jpeg")]);
    assert!(out_dir.join("good.jpeg").exists());

    // The corrupt file was reported individually.
    assert!(messages
        .iter()
        .any(|m| matches!(m, JobProgress::FileFailed { path, .. } if *path == bad)));
}

// =============================================================================
// PDF E2E
// =============================================================================

/// Merging real documents concatenates all pages in input order.
#[test]
fn e2e_merge_sums_page_counts() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.pdf");
    let b = dir.path().join("b.pdf");
    let c = dir.path().join("c.pdf");
    make_pdf(&a, "alpha", 1);
    make_pdf(&b, "beta", 2);
    make_pdf(&c, "gamma", 3);

    let output = dir.path().join("merged.pdf");
    let pages = pdf_ops::merge(&[a, b, c], &output, |_, _| {}).unwrap();

    assert_eq!(pages, 6);
    assert_eq!(pdf_ops::page_count(&output).unwrap(), 6);
}

/// Merged page order is input order: every page of the first document
/// precedes every page of the second, verified by the page content itself.
#[test]
fn e2e_merge_keeps_first_inputs_pages_first() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.pdf");
    let b = dir.path().join("b.pdf");
    make_pdf(&a, "alpha", 2);
    make_pdf(&b, "beta", 1);

    let output = dir.path().join("merged.pdf");
    pdf_ops::merge(&[a, b], &output, |_, _| {}).unwrap();

    let doc = lopdf::Document::load(&output).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 3);

    let contains = |haystack: &[u8], needle: &[u8]| {
        haystack.windows(needle.len()).any(|w| w == needle)
    };
    let expected: &[&[u8]] = &[b"alpha 1", b"alpha 2", b"beta 1"];
    for (page_no, text) in (1u32..).zip(expected) {
        let content = doc.get_page_content(pages[&page_no]).unwrap();
        assert!(
            contains(&content, text),
            "page {page_no} does not contain {:?}",
            String::from_utf8_lossy(text)
        );
    }
}

/// Splitting into all pages writes one valid single-page file per page.
#[test]
fn e2e_split_all_pages_writes_single_page_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.pdf");
    make_pdf(&input, "report", 4);

    let out_dir = dir.path().join("split");
    std::fs::create_dir_all(&out_dir).unwrap();
    let outputs = pdf_ops::split(&input, SplitMode::AllPages, &out_dir, |_, _| {}).unwrap();

    assert_eq!(outputs.len(), 4);
    for (i, path) in outputs.iter().enumerate() {
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!("report_page_{}.pdf", i + 1)
        );
        assert_eq!(pdf_ops::page_count(path).unwrap(), 1);
    }
}

/// A range split run over the job thread produces one file with the
/// requested pages and a Finished report listing it.
#[test]
fn e2e_pdf_range_split_job() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("book.pdf");
    make_pdf(&input, "book", 6);

    let out_dir = dir.path().join("out");
    std::fs::create_dir_all(&out_dir).unwrap();

    let request = JobRequest::Pdf(PdfJob::Split {
        input: input.clone(),
        mode: SplitMode::Range { start: 2, end: 4 },
        output_dir: out_dir.clone(),
    });
    let (_, report) = run_to_completion(request);

    let report = report.expect("split should finish with a report");
    let expected = out_dir.join("book_pages_2-4.pdf");
    assert_eq!(report.outputs, vec![expected.clone()]);
    assert_eq!(pdf_ops::page_count(&expected).unwrap(), 3);
}

/// A merge containing an unreadable file fails as a whole: the job reports
/// Failed and no partial output is written.
#[test]
fn e2e_merge_with_bad_input_fails_without_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.pdf");
    let bad = dir.path().join("bad.pdf");
    make_pdf(&good, "good", 2);
    std::fs::write(&bad, b"%PDF-garbage").unwrap();

    let output = dir.path().join("merged.pdf");
    let request = JobRequest::Pdf(PdfJob::Merge {
        inputs: vec![good, bad],
        output: output.clone(),
    });
    let (messages, report) = run_to_completion(request);

    assert!(report.is_none());
    assert!(messages
        .iter()
        .any(|m| matches!(m, JobProgress::Failed { .. })));
    assert!(!output.exists(), "failed merge must not leave an output file");
}

// =============================================================================
// Task persistence E2E
// =============================================================================

/// Saving into a directory that does not exist yet creates it, and the
/// reloaded list matches exactly including completion flags.
#[test]
fn e2e_tasks_round_trip_through_new_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("tasks.txt");

    let mut list = TaskList::new();
    list.add("water the plants");
    list.add("renew passport");
    list.add("back up photos");
    list.toggle(0);
    list.toggle(2);
    list.save(&path).unwrap();

    let mut reloaded = TaskList::new();
    let count = reloaded.load(&path).unwrap();
    assert_eq!(count, 3);
    assert_eq!(reloaded.tasks(), list.tasks());
    assert!(reloaded.tasks()[0].completed);
    assert!(!reloaded.tasks()[1].completed);
}

// =============================================================================
// Configuration E2E
// =============================================================================

/// A real config.toml on disk overrides defaults; invalid values produce
/// warnings and fall back instead of failing.
#[test]
fn e2e_config_file_overrides_and_warns() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        r#"
[tasks]
file = "/tmp/my-tasks.txt"

[password]
default_length = 500

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let (config, warnings) = config::load_config(dir.path());

    assert_eq!(config.tasks_file, Some(PathBuf::from("/tmp/my-tasks.txt")));
    assert_eq!(config.log_level.as_deref(), Some("debug"));
    // 500 is above the password length cap: warn and keep the default.
    assert!(!warnings.is_empty());
    assert_eq!(
        config.default_password_length,
        toolfusion::util::constants::DEFAULT_PASSWORD_LENGTH
    );
}

// =============================================================================
// Password E2E
// =============================================================================

/// Generated passwords honour the requested length and draw only from the
/// selected classes.
#[test]
fn e2e_password_generation_respects_policy() {
    use toolfusion::core::model::PasswordPolicy;

    let policy = PasswordPolicy {
        length: 64,
        include_upper: true,
        include_lower: true,
        include_digits: true,
        include_symbols: false,
    };
    let generated = password::generate(&policy).unwrap();

    assert_eq!(generated.chars().count(), 64);
    assert!(generated.chars().all(|c| c.is_ascii_alphanumeric()));
}
