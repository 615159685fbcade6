//! Append-only sink for extracted documents

use parking_lot::Mutex;

use super::crawl_types::Document;

#[derive(Debug, Default)]
pub struct ResultCollector {
    documents: Mutex<Vec<Document>>,
}

impl ResultCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, document: Document) {
        self.documents.lock().push(document);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Documents in the order workers finished them.
    #[must_use]
    pub fn into_documents(self) -> Vec<Document> {
        self.documents.into_inner()
    }

    /// Copy of the documents collected so far
    #[must_use]
    pub fn snapshot(&self) -> Vec<Document> {
        self.documents.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_push_order() {
        let collector = ResultCollector::new();
        collector.push(Document {
            url: "https://a.test/1".into(),
            content: "one".into(),
        });
        collector.push(Document {
            url: "https://a.test/2".into(),
            content: "two".into(),
        });
        assert_eq!(collector.len(), 2);
        let urls: Vec<_> = collector.into_documents().into_iter().map(|d| d.url).collect();
        assert_eq!(urls, vec!["https://a.test/1", "https://a.test/2"]);
    }
}
