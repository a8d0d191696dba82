use scholarmeta_core::DocumentType;

/// Classify a document by vocabulary in its text.
///
/// Thesis markers win over book markers; everything else, including
/// journal and conference papers, is a paper.
pub fn classify_document(text: &str) -> DocumentType {
    let lower = text.to_lowercase();
    if ["thesis", "disertasi"].iter().any(|m| lower.contains(m)) {
        DocumentType::Thesis
    } else if ["book", "buku"].iter().any(|m| lower.contains(m)) {
        DocumentType::Book
    } else {
        DocumentType::Paper
    }
}
