// ToolFusion - core/pdf_ops.rs
//
// PDF merge and split via lopdf object-level manipulation.
//
// Merge rebuilds a single page tree from the renumbered objects of every
// input document, keeping pages in input order. Split clones the source
// document and deletes the pages outside the requested selection, which
// keeps every resource the remaining pages reference.
//
// An unreadable or encrypted input aborts the whole operation; the output
// file is only written after all inputs have loaded successfully.

use crate::core::model::SplitMode;
use crate::util::error::PdfError;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::{Path, PathBuf};

/// Number of pages in `input`. Used by the UI to clamp the range spinners.
pub fn page_count(input: &Path) -> Result<usize, PdfError> {
    let doc = load_document(input)?;
    Ok(doc.get_pages().len())
}

/// Load a document, refusing encrypted or page-less files up front.
fn load_document(path: &Path) -> Result<Document, PdfError> {
    let doc = Document::load(path).map_err(|e| PdfError::Load {
        path: path.to_path_buf(),
        source: e,
    })?;
    if doc.is_encrypted() {
        return Err(PdfError::Encrypted {
            path: path.to_path_buf(),
        });
    }
    if doc.get_pages().is_empty() {
        return Err(PdfError::NoPages {
            path: path.to_path_buf(),
        });
    }
    Ok(doc)
}

/// The PDF `/Type` name of an object, or empty when it has none.
fn type_name(object: &Object) -> &[u8] {
    object
        .as_dict()
        .ok()
        .and_then(|d| d.get(b"Type").ok())
        .and_then(|t| t.as_name().ok())
        .unwrap_or(b"")
}

/// Merge `inputs` in list order into a single document saved at `output`.
///
/// `progress(completed, total)` is invoked after each input loads.
/// Returns the total page count of the merged document.
pub fn merge<F>(inputs: &[PathBuf], output: &Path, mut progress: F) -> Result<usize, PdfError>
where
    F: FnMut(usize, usize),
{
    if inputs.is_empty() {
        return Err(PdfError::NoInputs);
    }
    let total = inputs.len();

    // Phase 1: load every input and renumber its objects into one id space.
    // Pages are collected as a Vec so the merged page order is exactly
    // input order, page order.
    let mut max_id: u32 = 1;
    let mut pages: Vec<(ObjectId, Object)> = Vec::new();
    let mut objects: std::collections::BTreeMap<ObjectId, Object> = Default::default();

    for (idx, input) in inputs.iter().enumerate() {
        let mut doc = load_document(input)?;
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        for (_, page_id) in doc.get_pages() {
            let object = doc
                .get_object(page_id)
                .map_err(|e| PdfError::Load {
                    path: input.clone(),
                    source: e,
                })?
                .to_owned();
            pages.push((page_id, object));
        }
        objects.extend(doc.objects);
        progress(idx + 1, total);
    }

    // Phase 2: rebuild a single catalog + page tree over the pooled objects.
    let mut document = Document::with_version("1.5");
    let mut catalog: Option<(ObjectId, Object)> = None;
    let mut pages_root: Option<(ObjectId, Dictionary)> = None;

    for (object_id, object) in objects {
        match type_name(&object) {
            b"Catalog" => {
                // Keep the first catalog id; later ones are discarded.
                let id = catalog.as_ref().map(|(id, _)| *id).unwrap_or(object_id);
                catalog = Some((id, object));
            }
            b"Pages" => {
                // Fold every Pages dictionary into one root node so inherited
                // attributes (Resources, MediaBox) survive the merge.
                if let Ok(dict) = object.as_dict() {
                    let mut dict = dict.clone();
                    if let Some((_, ref existing)) = pages_root {
                        dict.extend(existing);
                    }
                    let id = pages_root.as_ref().map(|(id, _)| *id).unwrap_or(object_id);
                    pages_root = Some((id, dict));
                }
            }
            // Page objects are re-inserted below with a fixed Parent;
            // outline objects are dropped (their targets may span documents).
            b"Page" | b"Outlines" | b"Outline" => {}
            _ => {
                document.objects.insert(object_id, object);
            }
        }
    }

    let (pages_root_id, mut pages_root_dict) = pages_root.ok_or(PdfError::MissingPageTree)?;
    let (catalog_id, catalog_object) = catalog.ok_or(PdfError::MissingPageTree)?;

    for (page_id, object) in &pages {
        if let Ok(dict) = object.as_dict() {
            let mut dict = dict.clone();
            dict.set("Parent", pages_root_id);
            document
                .objects
                .insert(*page_id, Object::Dictionary(dict));
        }
    }

    pages_root_dict.set("Count", pages.len() as u32);
    pages_root_dict.set(
        "Kids",
        pages
            .iter()
            .map(|(id, _)| Object::Reference(*id))
            .collect::<Vec<_>>(),
    );
    document
        .objects
        .insert(pages_root_id, Object::Dictionary(pages_root_dict));

    if let Ok(dict) = catalog_object.as_dict() {
        let mut dict = dict.clone();
        dict.set("Pages", pages_root_id);
        dict.remove(b"Outlines");
        document
            .objects
            .insert(catalog_id, Object::Dictionary(dict));
    }

    document.trailer.set("Root", catalog_id);
    document.max_id = document.objects.len() as u32;
    document.renumber_objects();
    document.compress();
    document.save(output).map_err(|e| PdfError::Save {
        path: output.to_path_buf(),
        source: lopdf::Error::IO(e),
    })?;

    let page_total = pages.len();
    tracing::info!(
        inputs = total,
        pages = page_total,
        output = %output.display(),
        "PDFs merged"
    );
    Ok(page_total)
}

/// Split `input` into `output_dir` per `mode`.
///
/// AllPages writes one single-page file per page named `<stem>_page_<n>.pdf`;
/// Range writes one file for the inclusive 1-based range named
/// `<stem>_pages_<start>-<end>.pdf`. The range is validated against the real
/// page count before any output is written.
///
/// `progress(completed, total)` is invoked after each output file.
pub fn split<F>(
    input: &Path,
    mode: SplitMode,
    output_dir: &Path,
    mut progress: F,
) -> Result<Vec<PathBuf>, PdfError>
where
    F: FnMut(usize, usize),
{
    let doc = load_document(input)?;
    let total_pages = doc.get_pages().len() as u32;
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("split");

    let mut outputs = Vec::new();

    match mode {
        SplitMode::AllPages => {
            for page in 1..=total_pages {
                let out = output_dir.join(format!("{stem}_page_{page}.pdf"));
                extract_pages(&doc, page, page, total_pages, &out)?;
                outputs.push(out);
                progress(page as usize, total_pages as usize);
            }
        }
        SplitMode::Range { start, end } => {
            if start < 1 || start > end || end > total_pages {
                return Err(PdfError::InvalidRange {
                    start,
                    end,
                    page_count: total_pages,
                });
            }
            let out = output_dir.join(format!("{stem}_pages_{start}-{end}.pdf"));
            extract_pages(&doc, start, end, total_pages, &out)?;
            outputs.push(out);
            progress(1, 1);
        }
    }

    tracing::info!(
        input = %input.display(),
        outputs = outputs.len(),
        "PDF split"
    );
    Ok(outputs)
}

/// Write pages `start..=end` (1-based, inclusive) of `doc` to `out` by
/// cloning the document and deleting everything outside the range.
fn extract_pages(
    doc: &Document,
    start: u32,
    end: u32,
    total_pages: u32,
    out: &Path,
) -> Result<(), PdfError> {
    let mut single = doc.clone();
    let delete: Vec<u32> = (1..=total_pages)
        .filter(|p| *p < start || *p > end)
        .collect();
    if !delete.is_empty() {
        single.delete_pages(&delete);
    }
    single.prune_objects();
    single.renumber_objects();
    single.compress();
    single.save(out).map_err(|e| PdfError::Save {
        path: out.to_path_buf(),
        source: lopdf::Error::IO(e),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Fixture PDFs are built with lopdf itself; see tests/e2e_tools.rs for
    // the shared builder. A minimal inline copy keeps these unit tests
    // self-contained.
    fn make_pdf(path: &Path, pages: usize) {
        use lopdf::content::{Content, Operation};
        use lopdf::{dictionary, Stream};

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
                        vec![Object::string_literal(format!("Page {}", i + 1))],
                    ),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().unwrap(),
            ));
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

    #[test]
    fn page_count_reads_real_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("three.pdf");
        make_pdf(&path, 3);
        assert_eq!(page_count(&path).unwrap(), 3);
    }

    #[test]
    fn merge_concatenates_in_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.pdf");
        let b = dir.path().join("b.pdf");
        make_pdf(&a, 2);
        make_pdf(&b, 3);

        let out = dir.path().join("merged.pdf");
        let mut steps = Vec::new();
        let pages = merge(&[a, b], &out, |done, total| steps.push((done, total))).unwrap();

        assert_eq!(pages, 5);
        assert_eq!(steps, vec![(1, 2), (2, 2)]);
        assert_eq!(page_count(&out).unwrap(), 5);
    }

    #[test]
    fn merge_with_no_inputs_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = merge(&[], &dir.path().join("out.pdf"), |_, _| {});
        assert!(matches!(result, Err(PdfError::NoInputs)));
    }

    #[test]
    fn merge_aborts_on_unreadable_input_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.pdf");
        make_pdf(&good, 1);
        let bad = dir.path().join("bad.pdf");
        std::fs::write(&bad, b"definitely not a pdf").unwrap();

        let out = dir.path().join("merged.pdf");
        let result = merge(&[good, bad], &out, |_, _| {});
        assert!(matches!(result, Err(PdfError::Load { .. })));
        assert!(!out.exists(), "partial output must not be written");
    }

    #[test]
    fn split_all_pages_produces_one_file_per_page() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("five.pdf");
        make_pdf(&input, 5);

        let outputs = split(&input, SplitMode::AllPages, dir.path(), |_, _| {}).unwrap();
        assert_eq!(outputs.len(), 5);
        for (i, out) in outputs.iter().enumerate() {
            assert_eq!(
                out.file_name().unwrap().to_str().unwrap(),
                format!("five_page_{}.pdf", i + 1)
            );
            assert_eq!(page_count(out).unwrap(), 1);
        }
    }

    #[test]
    fn split_range_produces_one_file_for_the_range() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("five.pdf");
        make_pdf(&input, 5);

        let outputs = split(
            &input,
            SplitMode::Range { start: 2, end: 4 },
            dir.path(),
            |_, _| {},
        )
        .unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(
            outputs[0].file_name().unwrap().to_str().unwrap(),
            "five_pages_2-4.pdf"
        );
        assert_eq!(page_count(&outputs[0]).unwrap(), 3);
    }

    #[test]
    fn split_rejects_invalid_ranges_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("two.pdf");
        make_pdf(&input, 2);
        let out_dir = dir.path().join("out");
        std::fs::create_dir(&out_dir).unwrap();

        for (start, end) in [(0, 1), (2, 1), (1, 3)] {
            let result = split(
                &input,
                SplitMode::Range { start, end },
                &out_dir,
                |_, _| {},
            );
            assert!(
                matches!(result, Err(PdfError::InvalidRange { .. })),
                "range {start}-{end} should be invalid"
            );
        }
        assert_eq!(std::fs::read_dir(&out_dir).unwrap().count(), 0);
    }
}
