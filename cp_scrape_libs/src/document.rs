use crate::fetch::{Result, ScrapeError};
use ego_tree::NodeRef;
use scraper::{ElementRef, Node, Selector};

/// Parse a selector literal. Only ever called with fixed strings, so a parse
/// failure is a programming error.
pub fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

/// First descendant of `scope` matching `sel`.
pub fn first_match<'a>(scope: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    scope.select(sel).next()
}

/// Next element in document order matching `sel`: the descendants of `from`
/// first, then the subtrees of each following sibling, walking up through
/// the ancestors until the document is exhausted.
pub fn find_next<'a>(from: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    for node in from.descendants().skip(1) {
        if let Some(el) = matching_element(node, sel) {
            return Some(el);
        }
    }

    let mut cur = *from;
    loop {
        let mut sibling = cur.next_sibling();
        while let Some(node) = sibling {
            for descendant in node.descendants() {
                if let Some(el) = matching_element(descendant, sel) {
                    return Some(el);
                }
            }
            sibling = node.next_sibling();
        }
        match cur.parent() {
            Some(parent) => cur = parent,
            None => return None,
        }
    }
}

/// Next sibling that is an element, skipping text and comment nodes.
pub fn next_sibling_element<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Concatenated text of the subtree rooted at `el`.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

pub fn attribute<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

/// Promote a missing structural piece into a `Parse` error naming it.
pub fn require<T>(value: Option<T>, what: &str) -> Result<T> {
    value.ok_or_else(|| ScrapeError::Parse(String::from(what)))
}

fn matching_element<'a>(node: NodeRef<'a, Node>, sel: &Selector) -> Option<ElementRef<'a>> {
    ElementRef::wrap(node).filter(|el| sel.matches(el))
}
