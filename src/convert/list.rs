//! Nested list reconstruction.
//!
//! Google Docs stores a list as a run of flat paragraphs, each carrying a
//! list id and a nesting level. [`ListReconstructor`] folds such a run back
//! into one [`Element::Ul`] / [`Element::Ol`] holding a [`ListNode`] tree.

use crate::model::{Element, List, ListKind, ListNode};

/// One list paragraph, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    /// Item text
    pub text: String,

    /// Declared nesting level (0 = top level)
    pub level: u32,

    /// Kind of a sublist opened for this item
    pub kind: ListKind,
}

/// Tracks which list the previous body node belonged to.
#[derive(Debug, Clone, Default)]
pub struct ListReconstructor {
    current_list_id: Option<String>,
}

impl ListReconstructor {
    /// Create a reconstructor with no open list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the open list: the next item starts a new list element.
    pub fn interrupt(&mut self) {
        self.current_list_id = None;
    }

    /// Add one list paragraph to the element sequence.
    ///
    /// The item continues the last element when the previous node was an
    /// item of the same list and the last element is still a list.
    /// Otherwise a new top-level list of `top_kind` is opened.
    pub fn push(
        &mut self,
        elements: &mut Vec<Element>,
        list_id: &str,
        top_kind: ListKind,
        item: ListItem,
    ) {
        let continues = self.current_list_id.as_deref() == Some(list_id);
        self.current_list_id = Some(list_id.to_string());

        if continues {
            if let Some(items) = elements.last_mut().and_then(Element::list_items_mut) {
                append_to_list(items, item, 0);
                return;
            }
        }

        elements.push(Element::list(top_kind, vec![ListNode::Item(item.text)]));
    }
}

/// Insert an item into a list tree, starting at nesting `level`.
///
/// A deeper item descends into the trailing sublist one level per step;
/// when there is no sublist to descend into, a new one is opened holding
/// the item. Items at or above the current level become siblings.
pub fn append_to_list(list: &mut Vec<ListNode>, item: ListItem, level: u32) {
    if item.level > level {
        if let Some(ListNode::List(sublist)) = list.last_mut() {
            return append_to_list(&mut sublist.items, item, level + 1);
        }
        list.push(ListNode::List(List::with_item(item.kind, item.text)));
    } else {
        list.push(ListNode::Item(item.text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(text: &str, level: u32) -> ListItem {
        ListItem {
            text: text.to_string(),
            level,
            kind: ListKind::Ul,
        }
    }

    fn leaf(text: &str) -> ListNode {
        ListNode::Item(text.to_string())
    }

    fn sublist(items: Vec<ListNode>) -> ListNode {
        ListNode::List(List {
            kind: ListKind::Ul,
            items,
        })
    }

    #[test]
    fn test_flat_list() {
        let mut elements = Vec::new();
        let mut lists = ListReconstructor::new();
        for text in ["a", "b", "c"] {
            lists.push(&mut elements, "l1", ListKind::Ul, item(text, 0));
        }

        assert_eq!(elements, vec![Element::Ul(vec![leaf("a"), leaf("b"), leaf("c")])]);
    }

    #[test]
    fn test_nested_levels() {
        let mut elements = Vec::new();
        let mut lists = ListReconstructor::new();
        let levels = [0, 0, 1, 1, 0, 1, 2, 1];
        let texts = ["a", "b", "c", "d", "e", "f", "g", "h"];
        for (text, level) in texts.iter().zip(levels) {
            lists.push(&mut elements, "l1", ListKind::Ol, item(text, level));
        }

        assert_eq!(
            elements,
            vec![Element::Ol(vec![
                leaf("a"),
                leaf("b"),
                sublist(vec![leaf("c"), leaf("d")]),
                leaf("e"),
                sublist(vec![leaf("f"), sublist(vec![leaf("g")]), leaf("h")]),
            ])]
        );
    }

    #[test]
    fn test_level_jump_descends_one_step() {
        let mut list = vec![leaf("a")];
        append_to_list(&mut list, item("b", 3), 0);
        assert_eq!(list, vec![leaf("a"), sublist(vec![leaf("b")])]);

        append_to_list(&mut list, item("c", 3), 0);
        assert_eq!(
            list,
            vec![leaf("a"), sublist(vec![leaf("b"), sublist(vec![leaf("c")])])]
        );
    }

    #[test]
    fn test_sublist_kind_from_item() {
        let mut list = vec![leaf("a")];
        append_to_list(
            &mut list,
            ListItem {
                text: "b".to_string(),
                level: 1,
                kind: ListKind::Ol,
            },
            0,
        );
        assert_eq!(list[1], ListNode::List(List::with_item(ListKind::Ol, "b")));
    }

    #[test]
    fn test_interrupt_starts_new_list() {
        let mut elements = Vec::new();
        let mut lists = ListReconstructor::new();
        lists.push(&mut elements, "l1", ListKind::Ul, item("a", 0));
        lists.interrupt();
        lists.push(&mut elements, "l1", ListKind::Ul, item("b", 1));

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[1], Element::Ul(vec![leaf("b")]));
    }

    #[test]
    fn test_new_list_id_starts_new_list() {
        let mut elements = Vec::new();
        let mut lists = ListReconstructor::new();
        lists.push(&mut elements, "l1", ListKind::Ul, item("a", 0));
        lists.push(&mut elements, "l2", ListKind::Ol, item("b", 0));

        assert_eq!(
            elements,
            vec![Element::Ul(vec![leaf("a")]), Element::Ol(vec![leaf("b")])]
        );
    }

    #[test]
    fn test_continuation_needs_trailing_list() {
        let mut elements = Vec::new();
        let mut lists = ListReconstructor::new();
        lists.push(&mut elements, "l1", ListKind::Ul, item("a", 0));
        elements.push(Element::P("between".to_string()));
        lists.push(&mut elements, "l1", ListKind::Ul, item("b", 0));

        assert_eq!(elements.len(), 3);
    }
}
