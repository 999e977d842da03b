//! Integration tests for PDF quick-text library

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use pdf_quicktext::{Error, TextSession};
use std::path::PathBuf;
use tempfile::TempDir;

/// Build a PDF with one page per entry of `pages`
///
/// Each entry is the page's content stream and optional media box.
fn build_pdf(pages: &[(&str, Option<[i64; 4]>)]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::new();
    for (content, media_box) in pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.as_bytes().to_vec()));
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        };
        if let Some(mb) = media_box {
            page.set("MediaBox", mb.iter().map(|v| Object::Integer(*v)).collect::<Vec<_>>());
        }
        kids.push(doc.add_object(page).into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Save a document into a temp directory and return its path
fn write_fixture(dir: &TempDir, name: &str, mut doc: Document) -> PathBuf {
    let path = dir.path().join(name);
    doc.save(&path).expect("Failed to write fixture PDF");
    path
}

fn page_operations(doc: &Document, index: usize) -> Vec<Operation> {
    let page_id: ObjectId = *doc.get_pages().values().nth(index).expect("page exists");
    let content = doc.get_page_content(page_id).expect("page content");
    Content::decode(&content).expect("decodable content").operations
}

fn operators(ops: &[Operation]) -> Vec<&str> {
    ops.iter().map(|op| op.operator.as_str()).collect()
}

const LETTER: Option<[i64; 4]> = Some([0, 0, 612, 792]);

#[test]
fn test_add_text_round_trip_through_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = write_fixture(&temp_dir, "input.pdf", build_pdf(&[("", LETTER)]));
    let output = temp_dir.path().join("output.pdf");

    let mut session = TextSession::load(&input).expect("Failed to load PDF");
    session.open_page(0).unwrap();
    session.add_text("Hello", 1.0, 1.0, 11.0, "timesroman").unwrap();
    session.close_page().unwrap();
    session.save(&output).expect("Failed to save PDF");

    assert!(output.exists(), "Output PDF was not created");

    let doc = Document::load(&output).expect("Failed to reload output");
    let ops = page_operations(&doc, 0);
    assert_eq!(operators(&ops), vec!["BT", "Tf", "Tm", "Tj", "ET"]);

    let font_name = ops[1].operands[0].as_name().unwrap();
    assert_eq!(font_name, b"Times-Roman");
    assert_eq!(ops[1].operands[1].as_float().unwrap(), 11.0);

    let matrix: Vec<f32> = ops[2].operands.iter().map(|o| o.as_float().unwrap()).collect();
    assert_eq!(matrix, vec![1.0, 0.0, 0.0, 1.0, 72.0, 720.0]);
    assert_eq!(ops[3].operands[0].as_str().unwrap(), b"Hello");

    // The font the stream selects is declared in the page resources
    let page_id = *doc.get_pages().values().next().unwrap();
    let resources = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"Resources")
        .unwrap()
        .as_dict()
        .unwrap();
    let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();
    let font_id = fonts.get(font_name).unwrap().as_reference().unwrap();
    let font = doc.get_dictionary(font_id).unwrap();
    assert_eq!(font.get(b"BaseFont").unwrap().as_name().unwrap(), b"Times-Roman");
    assert_eq!(font.get(b"Subtype").unwrap().as_name().unwrap(), b"Type1");
}

#[test]
fn test_round_trip_through_bytes() {
    let mut doc = build_pdf(&[("", LETTER)]);
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();

    let mut session = TextSession::from_bytes(&bytes).unwrap();
    session
        .edit_page(0, |s| s.add_text_cm("Signed", 2.54, 2.54, 10.0, "courieroblique"))
        .unwrap();
    let out = session.to_bytes().unwrap();

    let doc = Document::load_mem(&out).unwrap();
    let ops = page_operations(&doc, 0);
    assert_eq!(ops[1].operands[0].as_name().unwrap(), b"Courier-Oblique");
    let matrix: Vec<f32> = ops[2].operands.iter().map(|o| o.as_float().unwrap()).collect();
    assert!((matrix[4] - 72.0).abs() < 1e-3);
    assert!((matrix[5] - 720.0).abs() < 1e-3);
}

#[test]
fn test_existing_content_is_preserved_in_order() {
    let original = "q 1 0 0 1 0 0 cm\nBT /F1 12 Tf 100 700 Td (Title) Tj ET\nQ\n0.5 g 50 50 100 20 re f\n";
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = write_fixture(&temp_dir, "existing.pdf", build_pdf(&[(original, LETTER)]));
    let output = temp_dir.path().join("annotated.pdf");

    let mut session = TextSession::load(&input).unwrap();
    session
        .edit_page(0, |s| {
            s.add_text("first", 1.0, 2.0, 11.0, "helvetica")?;
            s.add_text("second", 1.0, 3.0, 11.0, "helvetica")
        })
        .unwrap();
    session.save(&output).unwrap();

    let doc = Document::load(&output).unwrap();
    let ops = page_operations(&doc, 0);
    assert_eq!(
        operators(&ops),
        vec![
            "q", "cm", "BT", "Tf", "Td", "Tj", "ET",
            "BT", "Tf", "Tm", "Tj", "ET",
            "BT", "Tf", "Tm", "Tj", "ET",
            "Q", "g", "re", "f",
        ]
    );
    assert_eq!(ops[10].operands[0].as_str().unwrap(), b"first");
    assert_eq!(ops[15].operands[0].as_str().unwrap(), b"second");
}

#[test]
fn test_only_the_edited_page_changes() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = write_fixture(
        &temp_dir,
        "two-pages.pdf",
        build_pdf(&[("0 0 10 10 re f", LETTER), ("0 0 20 20 re S", LETTER)]),
    );
    let output = temp_dir.path().join("edited.pdf");

    let mut session = TextSession::load(&input).unwrap();
    assert_eq!(session.page_count(), 2);
    session
        .edit_page(1, |s| s.add_text("page two", 0.5, 0.5, 9.0, "timesitalic"))
        .unwrap();
    session.save(&output).unwrap();

    let doc = Document::load(&output).unwrap();
    assert_eq!(operators(&page_operations(&doc, 0)), vec!["re", "f"]);
    assert_eq!(
        operators(&page_operations(&doc, 1)),
        vec!["BT", "Tf", "Tm", "Tj", "ET", "re", "S"]
    );
}

#[test]
fn test_page_dimensions_fallback_and_literal() {
    let mut session = TextSession::new(build_pdf(&[("", None), ("", Some([0, 0, 595, 842]))]));

    let first = session.edit_page(0, |s| s.page_dimensions()).unwrap();
    assert_eq!(first.as_tuple(), (0.0, 0.0, 612.0, 792.0));

    let second = session.edit_page(1, |s| s.page_dimensions()).unwrap();
    assert_eq!(second.as_tuple(), (0.0, 0.0, 595.0, 842.0));
}

#[test]
fn test_a4_page_measures_from_its_own_top() {
    let mut session = TextSession::new(build_pdf(&[("", Some([0, 0, 595, 842]))]));
    session.open_page(0).unwrap();
    session.add_text("A4", 1.0, 1.0, 11.0, "timesroman").unwrap();

    let ops = session.operations().unwrap();
    assert_eq!(ops[2].operands[5].as_float().unwrap(), 770.0);
}

#[test]
fn test_lifecycle_errors() {
    let mut session = TextSession::new(build_pdf(&[("", LETTER), ("", LETTER)]));

    assert!(matches!(
        session.add_text("x", 1.0, 1.0, 11.0, "timesroman"),
        Err(Error::NoPageOpen)
    ));

    session.open_page(0).unwrap();
    assert!(matches!(session.open_page(1), Err(Error::PageAlreadyOpen { index: 0 })));
    assert!(matches!(
        session.add_text("x", 1.0, 1.0, 11.0, "comicsans"),
        Err(Error::UnknownFont(_))
    ));

    session.close_page().unwrap();
    assert!(matches!(session.close_page(), Err(Error::NoPageOpen)));
    session.open_page(1).unwrap();
    assert_eq!(session.current_page(), Some(1));
}

#[test]
fn test_load_nonexistent_file() {
    let result = TextSession::load(&PathBuf::from("nonexistent.pdf"));
    assert!(matches!(result, Err(Error::FileNotFound(_))));
}

fn position(haystack: &[u8], needle: &[u8]) -> usize {
    haystack
        .windows(needle.len())
        .position(|w| w == needle)
        .unwrap_or_else(|| panic!("{:?} not found", String::from_utf8_lossy(needle)))
}

fn page_bytes(doc: &Document, index: usize) -> Vec<u8> {
    let page_id: ObjectId = *doc.get_pages().values().nth(index).expect("page exists");
    doc.get_page_content(page_id).expect("page content")
}

#[test]
fn test_content_after_unparsable_token_is_kept() {
    let original = "BT (a) Tj ET\n} 0 0 5 5 re f\n";
    let mut session = TextSession::new(build_pdf(&[(original, LETTER)]));
    session
        .edit_page(0, |s| s.add_text("X", 1.0, 1.0, 11.0, "timesroman"))
        .unwrap();
    let out = session.to_bytes().unwrap();

    let content = page_bytes(&Document::load_mem(&out).unwrap(), 0);
    assert!(content.starts_with(b"BT (a) Tj ET\n"));
    assert!(content.ends_with(b"} 0 0 5 5 re f\n"));
    let added = position(&content, b"(X)");
    assert!(position(&content, b"Times-Roman") < added);
    assert!(added < position(&content, b"re f"));
}

#[test]
fn test_page_with_inline_image_round_trip() {
    let image = "q BI /W 1 /H 1 /CS /G /BPC 8 ID \u{80} EI Q\n";
    let original = format!("BT /F1 12 Tf (a) Tj ET\n{}", image);
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = write_fixture(&temp_dir, "image.pdf", build_pdf(&[(original.as_str(), LETTER)]));
    let output = temp_dir.path().join("captioned.pdf");

    let mut session = TextSession::load(&input).unwrap();
    session
        .edit_page(0, |s| s.add_text("caption", 1.0, 1.0, 11.0, "helvetica"))
        .unwrap();
    session.save(&output).unwrap();

    let content = page_bytes(&Document::load(&output).unwrap(), 0);
    assert!(content.ends_with(image.as_bytes()));
    assert!(position(&content, b"(a) Tj ET") < position(&content, b"(caption)"));
    assert!(position(&content, b"(caption)") < position(&content, b"BI"));
}

#[test]
fn test_shared_content_stream_edits_one_page() {
    let mut doc = build_pdf(&[("0 0 10 10 re f", LETTER), ("", LETTER)]);
    let pages: Vec<ObjectId> = doc.get_pages().values().copied().collect();
    let shared = doc.get_dictionary(pages[0]).unwrap().get(b"Contents").unwrap().clone();
    doc.get_dictionary_mut(pages[1]).unwrap().set("Contents", shared);

    let mut session = TextSession::new(doc);
    session
        .edit_page(0, |s| s.add_text("first only", 1.0, 1.0, 11.0, "courier"))
        .unwrap();
    let out = session.to_bytes().unwrap();

    let doc = Document::load_mem(&out).unwrap();
    assert_eq!(
        operators(&page_operations(&doc, 0)),
        vec!["BT", "Tf", "Tm", "Tj", "ET", "re", "f"]
    );
    assert_eq!(operators(&page_operations(&doc, 1)), vec!["re", "f"]);
}
