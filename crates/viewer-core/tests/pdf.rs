use lopdf::{
    content::{Content, Operation},
    dictionary, Object, Stream,
};
use viewer_core::lease::ObjectUrls;
use viewer_core::pdf::{Block, PdfBackendKind, PdfError, PdfLoader, PdfRenderer};
use viewer_core::render::{DocumentRenderer, RenderError, RenderEvent, RenderRequest, RenderWorker};
use viewer_core::types::DocumentFormat;

fn build_test_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.new_object_id();
    doc.objects.insert(
        font_id,
        Object::Dictionary(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        }),
    );

    let mut page_ids = Vec::new();
    for text in pages {
        let mut content = Content {
            operations: Vec::new(),
        };
        content.operations.push(Operation::new("BT", vec![]));
        content.operations.push(Operation::new(
            "Tf",
            vec![Object::Name(b"F1".to_vec()), 12.into()],
        ));
        content
            .operations
            .push(Operation::new("Td", vec![50.into(), 150.into()]));
        content.operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(text.to_string())],
        ));
        content.operations.push(Operation::new("ET", vec![]));
        let content_bytes = content.encode().unwrap_or_default();
        let content_id = doc.new_object_id();
        doc.objects.insert(
            content_id,
            Object::Stream(Stream::new(dictionary! {}, content_bytes)),
        );

        let resources_id = doc.new_object_id();
        doc.objects.insert(
            resources_id,
            Object::Dictionary(dictionary! {
                "Font" => dictionary! { "F1" => Object::Reference(font_id) }
            }),
        );

        let page_id = doc.new_object_id();
        doc.objects.insert(
            page_id,
            Object::Dictionary(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "MediaBox" => vec![0.into(), 0.into(), 200.into(), 200.into()],
                "Contents" => Object::Reference(content_id),
                "Resources" => Object::Reference(resources_id),
            }),
        );
        page_ids.push(page_id);
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => Object::Integer(page_ids.len() as i64),
            "Kids" => page_ids.iter().cloned().map(Object::Reference).collect::<Vec<_>>(),
        }),
    );

    let catalog_id = doc.new_object_id();
    doc.objects.insert(
        catalog_id,
        Object::Dictionary(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        }),
    );

    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.trailer.set(
        "Info",
        dictionary! {
            "Title" => Object::string_literal("Test Title"),
            "Author" => Object::string_literal("Test Author"),
        },
    );
    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("save pdf");
    buf
}

#[test]
fn loader_reads_page_count_title_and_page_text() {
    let bytes = build_test_pdf(&["Hello PDF page 1", "Page 2 body", "Third page"]);
    let mut loader = PdfLoader::open(&bytes, PdfBackendKind::PdfRs).expect("open pdf");
    assert_eq!(loader.page_count(), 3);
    assert_eq!(loader.summary().title.as_deref(), Some("Test Title"));

    let text: String = loader
        .load_page(2)
        .expect("page 2")
        .iter()
        .map(|b| match b {
            Block::Paragraph(t) | Block::Preformatted(t) => t.clone(),
        })
        .collect();
    assert!(text.contains("Page 2 body"));
    for page in [0, 4] {
        let err = loader.load_page(page).expect_err("out of range");
        assert!(matches!(err, PdfError::PageOutOfRange(p) if p == page));
        assert_eq!(err.page_number(), Some(page));
    }
}

#[test]
fn lopdf_backend_reports_the_same_structure() {
    let bytes = build_test_pdf(&["one", "two"]);
    let mut loader = PdfLoader::open(&bytes, PdfBackendKind::Lopdf).expect("open pdf");
    assert_eq!(loader.page_count(), 2);
    assert_eq!(loader.summary().title.as_deref(), Some("Test Title"));
    assert!(loader.load_page(2).is_ok());
    assert!(matches!(
        loader.load_page(3),
        Err(PdfError::PageOutOfRange(3))
    ));
}

#[test]
fn garbage_bytes_fail_to_open() {
    for backend in [PdfBackendKind::PdfRs, PdfBackendKind::Lopdf] {
        let err = PdfLoader::open(b"not a pdf", backend).err().expect("rejected");
        assert!(matches!(err, PdfError::Parse(_)), "{err:?}");
        assert_eq!(err.page_number(), None);
    }
}

#[test]
fn renderer_wraps_pages_and_rejects_out_of_range() {
    let bytes = build_test_pdf(&["alpha beta gamma delta"]);
    let mut renderer = PdfRenderer::with_backend(PdfBackendKind::PdfRs);
    assert_eq!(renderer.render_page(1, 40), Err(RenderError::NoDocument));
    let summary = renderer.open(&bytes, DocumentFormat::Pdf).expect("open");
    assert_eq!(summary.page_count, 1);
    assert_eq!(summary.title.as_deref(), Some("Test Title"));
    let lines = renderer.render_page(1, 11).expect("page 1");
    assert!(lines.iter().all(|l| l.chars().count() <= 11));
    assert_eq!(lines.join(" "), "alpha beta gamma delta");
    assert_eq!(renderer.render_page(2, 40), Err(RenderError::PageOutOfRange(2)));
    assert_eq!(renderer.render_page(0, 40), Err(RenderError::PageOutOfRange(0)));
}

#[test]
fn renderer_refuses_epub() {
    let mut renderer = PdfRenderer::with_backend(PdfBackendKind::PdfRs);
    assert_eq!(
        renderer.open(b"PK", DocumentFormat::Epub),
        Err(RenderError::UnsupportedFormat("EPUB"))
    );
}

#[test]
fn worker_renders_a_registered_file_end_to_end() {
    let urls = ObjectUrls::new();
    let url = urls.create(build_test_pdf(&["first", "second"]));
    let renderer = PdfRenderer::with_backend(PdfBackendKind::PdfRs);
    let mut worker = RenderWorker::inline(Box::new(renderer), urls.clone());
    worker.request(RenderRequest::Open {
        generation: 1,
        url: url.as_str().to_string(),
        format: DocumentFormat::Pdf,
    });
    worker.request(RenderRequest::Page {
        generation: 1,
        page_number: 2,
        width: 60,
    });
    let events = worker.poll();
    match events.as_slice() {
        [RenderEvent::DocumentLoaded { summary, .. }, RenderEvent::PageLoaded { page, .. }] => {
            assert_eq!(summary.page_count, 2);
            assert_eq!(page.page_number, 2);
            assert!(page.lines.join(" ").contains("second"));
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn page_errors_keep_their_page_number_through_the_renderer() {
    assert_eq!(
        RenderError::from(PdfError::PageOutOfRange(4)),
        RenderError::PageOutOfRange(4)
    );
    let unreadable = PdfError::Page {
        page: 2,
        reason: "bad content stream".into(),
    };
    assert_eq!(unreadable.page_number(), Some(2));
    assert_eq!(
        RenderError::from(unreadable),
        RenderError::Pdf("page 2 could not be read: bad content stream".into())
    );
}
