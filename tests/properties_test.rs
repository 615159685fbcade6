//! Property tests for tokenization, link gatekeeping and the page budget

use proptest::prelude::*;
use sitesift::crawl_engine::{VisitedSet, should_visit};
use sitesift::tokenize_and_clean;
use sitesift::utils::constants::STOP_WORDS;
use url::Url;

fn path_segment() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,12}"
}

proptest! {
    #[test]
    fn tokenizing_tokens_is_stable(text in "[A-Za-z0-9 .,!?'-]{0,200}") {
        let tokens = tokenize_and_clean(&text);
        let joined: Vec<String> = tokens.iter().cloned().collect();
        prop_assert_eq!(tokenize_and_clean(&joined.join(" ")), tokens);
    }

    #[test]
    fn tokens_are_lowercase_and_never_stop_words(text in "[A-Za-z ]{0,200}") {
        for token in tokenize_and_clean(&text) {
            prop_assert_eq!(token.to_lowercase(), token.clone());
            prop_assert!(!STOP_WORDS.contains(&token.as_str()));
        }
    }

    #[test]
    fn foreign_hosts_are_never_visited(
        host in "[a-z]{1,10}\\.(org|net|io)",
        segments in prop::collection::vec(path_segment(), 0..4),
    ) {
        let url = Url::parse(&format!("https://{host}/{}", segments.join("/"))).unwrap();
        prop_assert!(!should_visit(&url, "example.com"));
    }

    #[test]
    fn should_visit_is_deterministic_and_case_blind_on_host(
        segments in prop::collection::vec(path_segment(), 0..4),
    ) {
        let path = segments.join("/");
        let lower = Url::parse(&format!("https://example.com/{path}")).unwrap();
        let upper = Url::parse(&format!("https://EXAMPLE.com/{path}")).unwrap();
        let first = should_visit(&lower, "example.com");
        prop_assert_eq!(first, should_visit(&lower, "example.com"));
        prop_assert_eq!(first, should_visit(&upper, "Example.COM"));
    }

    #[test]
    fn visited_set_never_exceeds_budget(
        max_pages in 1usize..20,
        urls in prop::collection::vec("/[a-z]{1,3}", 0..60),
    ) {
        let visited = VisitedSet::new(max_pages);
        let mut admitted = 0;
        for path in &urls {
            if visited.try_admit(&format!("https://example.com{path}")) {
                admitted += 1;
            }
        }
        prop_assert!(visited.len() <= max_pages);
        prop_assert_eq!(visited.len(), admitted);
    }
}
