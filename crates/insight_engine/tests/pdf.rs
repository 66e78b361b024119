use insight_core::FailureKind;
use insight_engine::PdfExtractor;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Builds a PDF whose page `i` draws the literal text `Page i`.
fn pdf_with_pages(count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for i in 1..=count {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(format!("Page {i}"))]),
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

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count as i64,
        "Resources" => resources_id,
        "MediaBox" => Object::Array(vec![0.into(), 0.into(), 612.into(), 792.into()]),
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

#[test]
fn pages_are_concatenated_in_order() {
    let bytes = pdf_with_pages(3);
    let text = PdfExtractor::new().extract("report.pdf", &bytes).unwrap();

    // The text layer ends each text object with a line break of its own;
    // nothing else may sit between pages.
    assert_eq!(text.raw_text, "Page 1\nPage 2\nPage 3\n");
    assert_eq!(text.source.as_str(), "upload:report.pdf");
    assert_eq!(text.length, text.raw_text.chars().count());
}

#[test]
fn single_page_document() {
    let bytes = pdf_with_pages(1);
    let text = PdfExtractor::new().extract("one.pdf", &bytes).unwrap();
    assert_eq!(text.raw_text.trim_end(), "Page 1");
}

#[test]
fn document_without_pages_fails_closed() {
    let bytes = pdf_with_pages(0);
    let err = PdfExtractor::new().extract("empty.pdf", &bytes).unwrap_err();
    assert_eq!(err.kind, FailureKind::Extraction);
    assert!(err.message.contains("no pages"));
}

#[test]
fn corrupt_bytes_are_an_extraction_failure() {
    let err = PdfExtractor::new()
        .extract("broken.pdf", b"%PDF-1.5 this is not really a pdf")
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Extraction);
    assert!(err.message.contains("broken.pdf"));
}

#[test]
fn minimum_length_applies_to_pdfs() {
    let bytes = pdf_with_pages(1);
    let err = PdfExtractor::new()
        .with_min_text_chars(300)
        .extract("short.pdf", &bytes)
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::ExtractionTooShort);
}
