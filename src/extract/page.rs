/*! Navigable view over a fetched document.

Wraps the parsed html tree and exposes the few traversals the extraction
rules need: selector lookups, text-node search, document-order stepping and
visible text collection.
!*/
use std::borrow::Cow;

use regex::Regex;
use scraper::{node::Node, ElementRef, Html, Selector};

/// Elements whose text is never displayed.
const HIDDEN: [&str; 4] = ["script", "style", "noscript", "template"];

/// Position of a node in document order, counting elements and text nodes only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodePosition(usize);

pub struct Page {
    html: Html,
}

impl Page {
    /// Parse raw bytes. Non UTF-8 content is read as Latin-1, which is what the
    /// legacy federal portals serve.
    pub fn parse(raw: &[u8]) -> Self {
        let text = match std::str::from_utf8(raw) {
            Ok(s) => Cow::Borrowed(s),
            Err(_) => Cow::Owned(raw.iter().map(|&b| b as char).collect::<String>()),
        };
        Self {
            html: Html::parse_document(&text),
        }
    }

    /// Text content of the first element matching `selector`.
    pub fn select_text(&self, selector: &Selector) -> Option<String> {
        self.html
            .select(selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }

    /// Text of every element matching `selector`, in document order.
    ///
    /// Each element's runs are trimmed and newline-joined; elements without text are skipped.
    pub fn select_all_text(&self, selector: &Selector) -> Vec<String> {
        self.html
            .select(selector)
            .map(|el| {
                el.text()
                    .map(str::trim)
                    .filter(|run| !run.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .filter(|text| !text.is_empty())
            .collect()
    }

    /// First text node matching `pattern`, with its position.
    pub fn find_text(&self, pattern: &Regex) -> Option<(NodePosition, String)> {
        self.html
            .tree
            .root()
            .descendants()
            .filter(|n| matches!(n.value(), Node::Text(_) | Node::Element(_)))
            .enumerate()
            .find_map(|(idx, n)| match n.value() {
                Node::Text(t) if pattern.is_match(t) => {
                    Some((NodePosition(idx), String::from(&**t)))
                }
                _ => None,
            })
    }

    /// Text of the node `steps` positions before `from` in document order.
    ///
    /// Elements yield their full text content. `None` if the walk leaves the document.
    pub fn text_before(&self, from: NodePosition, steps: usize) -> Option<String> {
        let target = from.0.checked_sub(steps)?;
        let node = self
            .html
            .tree
            .root()
            .descendants()
            .filter(|n| matches!(n.value(), Node::Text(_) | Node::Element(_)))
            .nth(target)?;
        match node.value() {
            Node::Text(t) => Some(String::from(&**t)),
            Node::Element(_) => ElementRef::wrap(node).map(|el| el.text().collect()),
            _ => None,
        }
    }

    /// Visible text runs, trimmed, empty runs dropped, joined by newlines.
    pub fn visible_text(&self) -> String {
        let mut runs = Vec::new();
        for node in self.html.tree.root().descendants() {
            let Node::Text(t) = node.value() else {
                continue;
            };
            let hidden = node.ancestors().any(|a| match a.value() {
                Node::Element(el) => HIDDEN.contains(&el.name()),
                _ => false,
            });
            let run = t.trim();
            if !hidden && !run.is_empty() {
                runs.push(run);
            }
        }
        runs.join("\n")
    }
}
