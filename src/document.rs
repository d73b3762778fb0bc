use scraper::{ElementRef, Html};

const HEADING: &str = "h1";

/// A parsed post. `id` is its position in the most recent refresh and is
/// not stable across refreshes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: usize,
    pub title: String,
    pub body: String,
}

impl Document {
    /// Parse `body` as HTML and take the title from its first `<h1>`.
    /// A missing heading leaves the title empty; `body` is kept verbatim.
    pub fn parse(id: usize, body: String) -> Self {
        let title = extract_title(body.as_str()).unwrap_or_else(|| {
            log::info!("post {}: no <{}> found, title left empty", id, HEADING);
            String::new()
        });

        Self { id, title, body }
    }
}

/// Text of the first `<h1>` in document order, or `None` if there is none.
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    first_heading(&document).map(|heading| heading.text().collect())
}

// `descendants` walks the tree pre-order: a node before its children,
// children before the next sibling.
fn first_heading(document: &Html) -> Option<ElementRef<'_>> {
    document
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == HEADING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_first_heading() {
        let body = "<html><body><h1>One</h1><h1>Two</h1></body></html>".to_string();
        let doc = Document::parse(3, body.clone());

        assert_eq!(doc.id, 3);
        assert_eq!(doc.title, "One");
        assert_eq!(doc.body, body);
    }

    #[test]
    fn test_missing_heading_keeps_body() {
        let body = "<html><body><p>no title here</p></body></html>".to_string();
        let doc = Document::parse(0, body.clone());

        assert_eq!(doc.title, "");
        assert_eq!(doc.body, body);
    }

    #[test]
    fn test_fragment_without_html_wrapper() {
        assert_eq!(extract_title("<h1>Bare</h1>").as_deref(), Some("Bare"));
    }

    #[test]
    fn test_nested_text_is_concatenated_in_order() {
        let html = "<h1>Hello <em>big <b>bold</b></em> world</h1>";
        assert_eq!(
            extract_title(html).as_deref(),
            Some("Hello big bold world")
        );
    }

    #[test]
    fn test_nested_heading_found_before_later_sibling() {
        let html = "<div><section><h1>Deep</h1></section></div><h1>Shallow</h1>";
        assert_eq!(extract_title(html).as_deref(), Some("Deep"));
    }

    #[test]
    fn test_other_heading_levels_are_ignored() {
        let html = "<h2>Subtitle</h2><p>text</p>";
        assert_eq!(extract_title(html), None);
    }

    #[test]
    fn test_empty_heading_yields_empty_title() {
        assert_eq!(extract_title("<h1></h1>").as_deref(), Some(""));
    }
}
