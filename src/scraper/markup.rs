//! Tree-walk abstraction the extraction rules are written against.
//!
//! Extraction code only ever asks a node for descendants carrying a class, the
//! first element with a tag, an attribute, or its text. Everything the page
//! layout decides (class names, tags) lives in [`Markers`].

use scraper::ElementRef;

use crate::models::GroupKey;

pub trait MarkupNode: Copy {
    /// All descendants (not the node itself) carrying `class`, in document order.
    fn descendants_with_class(&self, class: &str) -> Vec<Self>;

    fn first_with_class(&self, class: &str) -> Option<Self>;

    fn first_with_tag(&self, tag: &str) -> Option<Self>;

    fn attribute(&self, name: &str) -> Option<&str>;

    /// Concatenated text of the subtree, whitespace untouched.
    fn text_content(&self) -> String;

    fn trimmed_text(&self) -> String {
        self.text_content().trim().to_string()
    }
}

impl<'a> MarkupNode for ElementRef<'a> {
    fn descendants_with_class(&self, class: &str) -> Vec<Self> {
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().classes().any(|c| c == class))
            .collect()
    }

    fn first_with_class(&self, class: &str) -> Option<Self> {
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().classes().any(|c| c == class))
    }

    fn first_with_tag(&self, tag: &str) -> Option<Self> {
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name().eq_ignore_ascii_case(tag))
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn text_content(&self) -> String {
        self.text().collect::<String>()
    }
}

// ── Markers ───────────────────────────────────────────────────────────────────

/// Class and tag names of the schedule page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    pub group_prefix: &'static str,
    pub entry: &'static str,
    pub title_link: &'static str,
    pub title_fallback: &'static str,
    pub score: &'static str,
    pub score_fallback: &'static str,
    pub audience: &'static str,
    pub image_tag: &'static str,
    pub info: &'static str,
}

pub const MAL_MARKERS: Markers = Markers {
    group_prefix: "js-seasonal-anime-list-key-",
    entry: "seasonal-anime",
    title_link: "link-title",
    title_fallback: "h2_anime_title",
    score: "js-score",
    score_fallback: "score",
    audience: "js-members",
    image_tag: "img",
    info: "info",
};

impl Default for Markers {
    fn default() -> Self {
        MAL_MARKERS
    }
}

impl Markers {
    /// Container class for a day bucket, e.g. `js-seasonal-anime-list-key-monday`.
    pub fn group_class(&self, key: GroupKey) -> String {
        format!("{}{}", self.group_prefix, key.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const SNIPPET: &str = r#"
        <div class="outer">
            <p class="a b">  first  </p>
            <section>
                <p class="b">second</p>
                <img data-src="/x.jpg" src="">
            </section>
        </div>
    "#;

    #[test]
    fn test_descendants_with_class_in_document_order() {
        let doc = Html::parse_fragment(SNIPPET);
        let root = doc.root_element();

        let found: Vec<String> = root
            .descendants_with_class("b")
            .iter()
            .map(|n| n.trimmed_text())
            .collect();
        assert_eq!(found, vec!["first", "second"]);

        assert!(root.first_with_class("missing").is_none());
    }

    #[test]
    fn test_first_with_class_excludes_self() {
        let doc = Html::parse_fragment(SNIPPET);
        let outer = doc.root_element().first_with_class("outer").unwrap();
        assert!(outer.first_with_class("outer").is_none());
        assert_eq!(outer.first_with_class("a").unwrap().text_content(), "  first  ");
    }

    #[test]
    fn test_tag_and_attribute_lookup() {
        let doc = Html::parse_fragment(SNIPPET);
        let img = doc.root_element().first_with_tag("img").unwrap();
        assert_eq!(img.attribute("data-src"), Some("/x.jpg"));
        assert_eq!(img.attribute("src"), Some(""));
        assert_eq!(img.attribute("data-lazy-src"), None);
    }

    #[test]
    fn test_group_class() {
        assert_eq!(
            MAL_MARKERS.group_class(GroupKey::Sunday),
            "js-seasonal-anime-list-key-sunday"
        );
    }
}
