// src/core/html.rs
//
// Typed tree queries over a parsed page:
//   1. find the first element with tag T and id X (the anchor);
//   2. from there, find the first element with tag Y that follows it in
//      document order (anchor descendants included).

use scraper::{ElementRef, Html, Selector};

use super::sanitize::normalize_ws;

/// First `<tag id="id">` in the document.
pub fn find_anchor<'a>(doc: &'a Html, tag: &str, id: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(tag).ok()?;
    doc.select(&sel).find(|el| el.value().id() == Some(id))
}

/// First element named `tag` after `anchor` in pre-order traversal.
pub fn find_next<'a>(doc: &'a Html, anchor: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    doc.tree
        .root()
        .descendants()
        .skip_while(|node| node.id() != anchor.id())
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name().eq_ignore_ascii_case(tag))
}

/// `find_anchor` then `find_next`; absent when either step finds nothing.
pub fn find_after<'a>(doc: &'a Html, anchor_tag: &str, id: &str, tag: &str) -> Option<ElementRef<'a>> {
    let anchor = find_anchor(doc, anchor_tag, id)?;
    find_next(doc, anchor, tag)
}

/// Direct and nested children of `el` named `tag`, in order.
pub fn descendants_named<'a>(el: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(tag) {
        Ok(sel) => el.select(&sel).collect(),
        Err(_) => Vec::new(),
    }
}

/// Visible text with whitespace collapsed; `None` when nothing is left.
pub fn text_of(el: ElementRef<'_>) -> Option<String> {
    let txt = normalize_ws(&el.text().collect::<String>());
    if txt.is_empty() { None } else { Some(txt) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
        <html><body>
          <p>before</p>
          <h2 id="uses">What is it?</h2>
          <div><p>First <b>para</b>.</p></div>
          <p>Second.</p>
          <h2 id="other">Other</h2>
        </body></html>
    "#;

    #[test]
    fn anchor_by_tag_and_id() {
        let doc = Html::parse_document(DOC);
        let h = find_anchor(&doc, "h2", "uses").unwrap();
        assert_eq!(text_of(h).as_deref(), Some("What is it?"));
        assert!(find_anchor(&doc, "h3", "uses").is_none());
        assert!(find_anchor(&doc, "h2", "missing").is_none());
    }

    #[test]
    fn next_follows_document_order_into_nested_nodes() {
        let doc = Html::parse_document(DOC);
        let p = find_after(&doc, "h2", "uses", "p").unwrap();
        assert_eq!(text_of(p).as_deref(), Some("First para."));
    }

    #[test]
    fn next_never_looks_backwards() {
        let doc = Html::parse_document(DOC);
        assert!(find_after(&doc, "h2", "other", "p").is_none());
    }

    #[test]
    fn empty_text_is_none() {
        let doc = Html::parse_document("<p>   </p>");
        let sel = Selector::parse("p").unwrap();
        let p = doc.select(&sel).next().unwrap();
        assert!(text_of(p).is_none());
    }
}
