//! Static shop catalogue.
//!
//! Items are listed for display only; purchasing is not modelled.

use serde::Serialize;

/// One purchasable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub cost: i64,
    pub item_type: &'static str,
    pub effect: &'static str,
}

pub const ITEM_TYPE_CONSUMABLE: &str = "consumable";
pub const ITEM_TYPE_BOOST: &str = "boost";
pub const ITEM_TYPE_PROTECTION: &str = "protection";

/// Every item offered by the shop, cheapest first.
pub const CATALOGUE: &[ShopItem] = &[
    ShopItem {
        id: "health-potion",
        name: "Health Potion",
        description: "Restore 50 HP",
        cost: 50,
        item_type: ITEM_TYPE_CONSUMABLE,
        effect: "hp+50",
    },
    ShopItem {
        id: "xp-boost",
        name: "XP Boost",
        description: "2x XP for next quest",
        cost: 100,
        item_type: ITEM_TYPE_BOOST,
        effect: "xp_x2",
    },
    ShopItem {
        id: "gold-multiplier",
        name: "Gold Multiplier",
        description: "2x Gold for next quest",
        cost: 150,
        item_type: ITEM_TYPE_BOOST,
        effect: "gold_x2",
    },
    ShopItem {
        id: "streak-shield",
        name: "Streak Shield",
        description: "Protect streak for 1 day",
        cost: 200,
        item_type: ITEM_TYPE_PROTECTION,
        effect: "streak_shield",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_sorted_by_cost() {
        assert!(CATALOGUE.windows(2).all(|w| w[0].cost <= w[1].cost));
    }

    #[test]
    fn catalogue_ids_unique() {
        let mut ids: Vec<_> = CATALOGUE.iter().map(|i| i.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), CATALOGUE.len());
    }
}
