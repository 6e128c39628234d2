use alloy::primitives::B256;

use rusty_txlist_core::{
    ListItemRenderer, TransactionGroup, TransactionKind, Translator, ViewNode,
};

pub const ITEM_CLASS: &str = "transaction-list-item";
pub const EARLIEST_ITEM_CLASS: &str = "transaction-list-item transaction-list-item--earliest";
pub const TITLE_CLASS: &str = "transaction-list-item__title";
pub const NONCE_CLASS: &str = "transaction-list-item__nonce";
pub const STATUS_CLASS: &str = "transaction-list-item__status";
pub const BADGE_CLASS: &str = "transaction-list-item__badge";
pub const EARLIEST_CLASS: &str = "transaction-list-item__earliest";
pub const HASH_CLASS: &str = "transaction-list-item__hash";

/// Renders one nonce group as a summary row.
#[derive(Debug, Clone)]
pub struct DefaultItemRenderer<T: Translator> {
    translator: T,
    explorer_base_url: String,
}

impl<T: Translator> DefaultItemRenderer<T> {
    pub fn new(translator: T, explorer_base_url: impl Into<String>) -> Self {
        Self {
            translator,
            explorer_base_url: explorer_base_url.into(),
        }
    }

    fn labeled(&self, class: &'static str, key: &str) -> ViewNode {
        ViewNode::element(class, vec![ViewNode::text(self.translator.translate(key))])
    }
}

impl<T: Translator> ListItemRenderer for DefaultItemRenderer<T> {
    fn render_item(&self, group: &TransactionGroup, is_earliest_nonce: bool) -> ViewNode {
        let primary = &group.primary_transaction;
        let title_key = match primary.kind {
            TransactionKind::Cancel => "cancelled",
            TransactionKind::Standard | TransactionKind::Retry => "send",
        };

        let mut children = vec![
            self.labeled(TITLE_CLASS, title_key),
            ViewNode::element(
                NONCE_CLASS,
                vec![ViewNode::text(format!(
                    "{} #{}",
                    self.translator.translate("nonce"),
                    group.nonce
                ))],
            ),
            self.labeled(STATUS_CLASS, primary.status.i18n_key()),
        ];
        if group.has_retried {
            children.push(self.labeled(BADGE_CLASS, "speedUp"));
        }
        if group.has_cancelled && primary.kind != TransactionKind::Cancel {
            children.push(self.labeled(BADGE_CLASS, "cancelled"));
        }
        if is_earliest_nonce {
            children.push(self.labeled(EARLIEST_CLASS, "nextInQueue"));
        }
        if let Some(hash) = primary.hash {
            children.push(ViewNode::element(
                HASH_CLASS,
                vec![ViewNode::link(
                    short_hash(&hash),
                    format!("{}/tx/{hash}", self.explorer_base_url),
                )],
            ));
        }

        let class = if is_earliest_nonce {
            EARLIEST_ITEM_CLASS
        } else {
            ITEM_CLASS
        };
        ViewNode::element(class, children)
    }
}

fn short_hash(hash: &B256) -> String {
    let full = hash.to_string();
    format!("{}…{}", &full[..8], &full[full.len() - 6..])
}
