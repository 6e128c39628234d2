//! View tree produced by the transaction list and its item renderer.

use crate::domain::TransactionGroup;
use crate::ports::{ListItemRenderer, Translator};

pub const LIST_CLASS: &str = "transaction-list";
pub const TRANSACTIONS_CLASS: &str = "transaction-list__transactions";
pub const PENDING_CLASS: &str = "transaction-list__pending-transactions";
pub const COMPLETED_CLASS: &str = "transaction-list__completed-transactions";
pub const HEADER_CLASS: &str = "transaction-list__header";
pub const EMPTY_CLASS: &str = "transaction-list__empty";
pub const EMPTY_TEXT_CLASS: &str = "transaction-list__empty-text";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
    Element {
        class: &'static str,
        children: Vec<ViewNode>,
    },
    Text(String),
    Link {
        text: String,
        href: String,
    },
    /// Stable identity of a list entry across renders.
    Keyed {
        key: String,
        node: Box<ViewNode>,
    },
}

impl ViewNode {
    pub fn element(class: &'static str, children: Vec<ViewNode>) -> Self {
        ViewNode::Element { class, children }
    }

    pub fn text(text: impl Into<String>) -> Self {
        ViewNode::Text(text.into())
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        ViewNode::Link {
            text: text.into(),
            href: href.into(),
        }
    }

    pub fn keyed(key: impl Into<String>, node: ViewNode) -> Self {
        ViewNode::Keyed {
            key: key.into(),
            node: Box::new(node),
        }
    }

    pub fn class(&self) -> Option<&'static str> {
        match self {
            ViewNode::Element { class, .. } => Some(class),
            ViewNode::Keyed { node, .. } => node.class(),
            ViewNode::Text(_) | ViewNode::Link { .. } => None,
        }
    }

    pub fn children(&self) -> &[ViewNode] {
        match self {
            ViewNode::Element { children, .. } => children,
            ViewNode::Keyed { node, .. } => node.children(),
            ViewNode::Text(_) | ViewNode::Link { .. } => &[],
        }
    }

    /// Depth-first search for the first element with `class`.
    pub fn find(&self, class: &str) -> Option<&ViewNode> {
        if let ViewNode::Element { class: own, .. } = self {
            if *own == class {
                return Some(self);
            }
        }
        if let ViewNode::Keyed { node, .. } = self {
            return node.find(class);
        }
        self.children().iter().find_map(|child| child.find(class))
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            ViewNode::Text(text) => text.clone(),
            ViewNode::Link { text, .. } => text.clone(),
            ViewNode::Keyed { node, .. } => node.text_content(),
            ViewNode::Element { children, .. } => children
                .iter()
                .map(ViewNode::text_content)
                .collect::<Vec<_>>()
                .join(""),
        }
    }

    /// Keys of the keyed entries directly below this node.
    pub fn child_keys(&self) -> Vec<&str> {
        self.children()
            .iter()
            .filter_map(|child| match child {
                ViewNode::Keyed { key, .. } => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }
}

pub fn list_key(group: &TransactionGroup, index: usize) -> String {
    format!("{}:{}", group.nonce, index)
}

/// Projects the nonce-sorted pending and completed groups into the list view.
pub fn render_transaction_list<T, R>(
    pending: &[TransactionGroup],
    completed: &[TransactionGroup],
    is_wide_viewport: bool,
    translator: &T,
    items: &R,
) -> ViewNode
where
    T: Translator + ?Sized,
    R: ListItemRenderer + ?Sized,
{
    let pending_len = pending.len();
    let mut sections = Vec::with_capacity(2);

    if pending_len > 0 {
        let mut children = Vec::with_capacity(pending_len + 1);
        children.push(ViewNode::element(
            HEADER_CLASS,
            vec![ViewNode::text(format!(
                "{} ({})",
                translator.translate("queue"),
                pending_len
            ))],
        ));
        children.extend(pending.iter().enumerate().map(|(index, group)| {
            ViewNode::keyed(list_key(group, index), items.render_item(group, index == 0))
        }));
        sections.push(ViewNode::element(PENDING_CLASS, children));
    }

    let mut completed_children = Vec::with_capacity(completed.len() + 1);
    if is_wide_viewport || pending_len > 0 {
        completed_children.push(ViewNode::element(
            HEADER_CLASS,
            vec![ViewNode::text(translator.translate("history"))],
        ));
    }
    if completed.is_empty() {
        completed_children.push(ViewNode::element(
            EMPTY_CLASS,
            vec![ViewNode::element(
                EMPTY_TEXT_CLASS,
                vec![ViewNode::text(translator.translate("noTransactions"))],
            )],
        ));
    } else {
        completed_children.extend(completed.iter().enumerate().map(|(index, group)| {
            ViewNode::keyed(list_key(group, index), items.render_item(group, false))
        }));
    }
    sections.push(ViewNode::element(COMPLETED_CLASS, completed_children));

    ViewNode::element(
        LIST_CLASS,
        vec![ViewNode::element(TRANSACTIONS_CLASS, sections)],
    )
}
