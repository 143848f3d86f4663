//! Paginator-driven fetch loop over a simulated 250-document collection.

use epoch_appwrite::{snapshot_from_pages, DocumentPage, EventDocument};
use epoch_core::{Era, Paginator};

fn document(index: usize) -> EventDocument {
    // Interleaved years so the merge actually has to sort.
    let year = 1800 + ((index * 37) % 230) as i32;
    EventDocument {
        id: format!("doc-{index:04}"),
        title: format!("archive item {index}"),
        description: String::new(),
        year,
        era: Era::from_year(year).label().to_string(),
        image_url: format!("https://archive.example/iiif/{index}.jpg"),
    }
}

#[test]
fn a_250_document_collection_pages_in_three_requests_and_sorts() {
    let total = 250;
    let mut paginator = Paginator::new();
    let mut pages: Vec<DocumentPage> = Vec::new();
    let mut fetches = 0;

    while let Some(request) = paginator.next_request() {
        fetches += 1;
        let start = request.offset;
        let end = (start + request.limit).min(total);
        let documents: Vec<EventDocument> = (start..end).map(document).collect();
        paginator.record_page(documents.len(), total);
        pages.push(DocumentPage { total, documents });
    }

    assert_eq!(fetches, 3);

    let snapshot = snapshot_from_pages(pages);
    assert_eq!(snapshot.event_count(), 250);

    let years: Vec<i32> = snapshot.events().iter().map(|event| event.year).collect();
    assert!(years.windows(2).all(|pair| pair[0] <= pair[1]));
}
