// src/core/html.rs
// DOM navigation helpers on top of `scraper`.
// Tag names are matched on the parsed local name (html5ever lowercases them);
// class matching is exact per class token, like a CSS `.class` selector.

use scraper::ElementRef;

/// Does `el` have tag `tag` and (optionally) the class token `class`?
pub fn is_tag(el: &ElementRef<'_>, tag: &str, class: Option<&str>) -> bool {
    let v = el.value();
    if !v.name().eq_ignore_ascii_case(tag) { return false; }
    match class {
        Some(c) => v.classes().any(|k| k == c),
        None => true,
    }
}

/// All descendant elements named `tag`, in document order (excluding `el`).
pub fn descendants_named<'a>(el: ElementRef<'a>, tag: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |e| is_tag(e, tag, None))
}

/// First descendant element named `tag`.
pub fn first_descendant_named<'a>(el: ElementRef<'a>, tag: &'a str) -> Option<ElementRef<'a>> {
    descendants_named(el, tag).next()
}

/// First later sibling element matching `tag`/`class`.
/// Text nodes and non-matching elements in between are skipped.
pub fn next_sibling_matching<'a>(el: ElementRef<'a>, tag: &str, class: Option<&str>) -> Option<ElementRef<'a>> {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|e| is_tag(e, tag, class))
}

/// Concatenated text of all descendant text nodes, trimmed at both ends.
/// Inner whitespace is kept as-is.
pub fn text_trimmed(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first<'a>(doc: &'a Html, tag: &'a str) -> ElementRef<'a> {
        descendants_named(doc.root_element(), tag).next().unwrap()
    }

    #[test]
    fn sibling_skips_text_and_other_tags() {
        let doc = Html::parse_document(r#"<h4>H</h4> text <p>x</p><div class="a list">L</div>"#);
        let h4 = first(&doc, "h4");
        let div = next_sibling_matching(h4, "div", Some("list")).unwrap();
        assert_eq!(text_trimmed(div), "L");
        assert!(next_sibling_matching(h4, "div", Some("other")).is_none());
    }

    #[test]
    fn text_keeps_inner_spacing() {
        let doc = Html::parse_document("<b>  09101  Carbohydrate <i>metabolism</i> </b>");
        assert_eq!(text_trimmed(first(&doc, "b")), "09101  Carbohydrate metabolism");
    }

    #[test]
    fn descendants_are_in_document_order() {
        let doc = Html::parse_document("<div><a>1</a><span><a>2</a></span><a>3</a></div>");
        let div = first(&doc, "div");
        let texts: Vec<String> = descendants_named(div, "a").map(text_trimmed).collect();
        assert_eq!(texts, vec!["1", "2", "3"]);
        assert_eq!(first_descendant_named(div, "a").map(text_trimmed).as_deref(), Some("1"));
    }
}
