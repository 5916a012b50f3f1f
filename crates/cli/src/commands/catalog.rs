//! Read-only catalogs: gift categories and personality traits.

use giftwise_core::gifts::GIFT_CATEGORIES;
use giftwise_core::persona::traits::trait_catalog;

use crate::commands::CommandResult;

pub fn categories() -> CommandResult {
    CommandResult::document("categories", &GIFT_CATEGORIES, 0)
}

pub fn traits() -> CommandResult {
    CommandResult::document("traits", &trait_catalog(), 0)
}
