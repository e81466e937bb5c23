//! Sale line classification.
//!
//! Precedence, first match wins:
//!
//! ```text
//! Payout > Refund > Misc > Service > Promotion > Discount > Separate > Net
//! ```
//!
//! A refunded misc item is a refund; a payout flagged as refund is a payout.

use std::collections::HashMap;

use super::model::{Department, ItemKind, SaleItem};

/// The report bucket a sale line falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Payout,
    Refund,
    Misc,
    Service,
    Promotion,
    Discount,
    /// Sold in a department printed as its own section
    Separate(u32),
    Net,
}

pub fn classify(item: &SaleItem, departments: &HashMap<u32, &Department>) -> Category {
    match item.kind {
        ItemKind::Payout => Category::Payout,
        _ if item.is_refund => Category::Refund,
        ItemKind::Misc => Category::Misc,
        ItemKind::Service => Category::Service,
        ItemKind::Promotion => Category::Promotion,
        ItemKind::Discount => Category::Discount,
        ItemKind::Product => match departments.get(&item.department_id) {
            Some(dept) if dept.separate_in_reports => Category::Separate(dept.id),
            _ => Category::Net,
        },
    }
}
