//! Crawl-wide visited set with a hard page budget

use parking_lot::Mutex;
use std::collections::HashSet;

/// URLs that have been claimed for fetching.
///
/// Admission is check-and-insert under one lock, so two workers racing on the
/// same URL can never both fetch it, and the set can never grow past
/// `max_pages`.
#[derive(Debug)]
pub struct VisitedSet {
    urls: Mutex<HashSet<String>>,
    max_pages: usize,
}

impl VisitedSet {
    #[must_use]
    pub fn new(max_pages: usize) -> Self {
        Self {
            urls: Mutex::new(HashSet::new()),
            max_pages,
        }
    }

    /// Claim `url` for fetching.
    ///
    /// Returns `false` if the URL was already claimed or the budget is spent.
    pub fn try_admit(&self, url: &str) -> bool {
        let mut urls = self.urls.lock();
        if urls.len() >= self.max_pages || urls.contains(url) {
            return false;
        }
        urls.insert(url.to_owned())
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.urls.lock().contains(url)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn admits_each_url_once() {
        let visited = VisitedSet::new(10);
        assert!(visited.try_admit("https://a.test/"));
        assert!(!visited.try_admit("https://a.test/"));
        assert!(visited.contains("https://a.test/"));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn stops_at_budget() {
        let visited = VisitedSet::new(2);
        assert!(visited.try_admit("https://a.test/1"));
        assert!(visited.try_admit("https://a.test/2"));
        assert_eq!(visited.len(), 2);
        assert!(!visited.try_admit("https://a.test/3"));
        assert!(!visited.contains("https://a.test/3"));
    }

    #[test]
    fn zero_budget_admits_nothing() {
        let visited = VisitedSet::new(0);
        assert!(!visited.try_admit("https://a.test/"));
        assert!(visited.is_empty());
    }

    #[test]
    fn concurrent_admission_never_exceeds_budget() {
        let visited = Arc::new(VisitedSet::new(50));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let visited = Arc::clone(&visited);
                std::thread::spawn(move || {
                    (0..100)
                        .filter(|i| visited.try_admit(&format!("https://a.test/{}", (i * 7 + t) % 120)))
                        .count()
                })
            })
            .collect();
        let admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(admitted, visited.len());
        assert_eq!(visited.len(), 50);
    }
}
