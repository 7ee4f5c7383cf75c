//! Gift catalog store: the authoritative local copy of the registry.
//!
//! Readers only ever see a whole list: `replace` swaps the contents
//! atomically, and a failed refresh leaves the previous list untouched
//! (the `use_gifts` hook reports the error instead of surfacing a broken
//! list).

use shared::GiftItem;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GiftCatalog {
    gifts: Vec<GiftItem>,
}

impl GiftCatalog {
    pub fn gifts(&self) -> &[GiftItem] {
        &self.gifts
    }

    pub fn len(&self) -> usize {
        self.gifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gifts.is_empty()
    }

    pub fn find(&self, gift_id: &str) -> Option<&GiftItem> {
        self.gifts.iter().find(|g| g.id == gift_id)
    }

    /// Swap in a freshly fetched list wholesale.
    pub fn replace(&mut self, gifts: Vec<GiftItem>) {
        self.gifts = gifts;
    }

    /// Fold a confirmed contribution into exactly one entry.
    ///
    /// Not idempotent: a second call for the same contribution double
    /// counts, so the workflow applies each confirmation once. Returns
    /// false when the gift is no longer in the list (e.g. a refresh
    /// landed in between).
    pub fn apply_contribution(&mut self, gift_id: &str, amount_minor: i64) -> bool {
        match self.gifts.iter_mut().find(|g| g.id == gift_id) {
            Some(gift) => {
                gift.apply_contribution(amount_minor);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::GiftType;

    fn gift(id: &str, amount: i64, raised: i64) -> GiftItem {
        GiftItem {
            id: id.to_string(),
            title: format!("Gift {id}"),
            description: String::new(),
            amount,
            image_url: String::new(),
            gift_type: GiftType::Contributory,
            raised_amount: raised,
            max_per_guest: None,
            min_per_guest: None,
            is_taken: false,
            is_completed: raised >= amount,
            created_at: "2026-01-01T00:00:00Z".to_string(),
            progress: 0.0,
            selections: Vec::new(),
            contributors: Vec::new(),
        }
    }

    #[test]
    fn test_replace_swaps_contents_wholesale() {
        let mut catalog = GiftCatalog::default();
        catalog.replace(vec![gift("a", 100, 0), gift("b", 200, 0)]);
        assert_eq!(catalog.len(), 2);

        catalog.replace(vec![gift("c", 300, 0)]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("a").is_none());
        assert!(catalog.find("c").is_some());
    }

    #[test]
    fn test_apply_contribution_patches_exactly_one_entry() {
        let mut catalog = GiftCatalog::default();
        catalog.replace(vec![gift("a", 1_000_000, 0), gift("b", 1_000_000, 0)]);

        assert!(catalog.apply_contribution("a", 500_000));
        let patched = catalog.find("a").unwrap();
        assert_eq!(patched.raised_amount, 500_000);
        assert_eq!(patched.progress, 50.0);
        assert!(!patched.is_completed);

        let untouched = catalog.find("b").unwrap();
        assert_eq!(untouched.raised_amount, 0);
    }

    #[test]
    fn test_apply_contribution_to_missing_gift_reports_failure() {
        let mut catalog = GiftCatalog::default();
        catalog.replace(vec![gift("a", 100, 0)]);
        assert!(!catalog.apply_contribution("gone", 50));
    }

    #[test]
    fn test_contribution_reaching_goal_completes_gift() {
        let mut catalog = GiftCatalog::default();
        catalog.replace(vec![gift("a", 1_000_000, 600_000)]);
        catalog.apply_contribution("a", 400_000);
        let done = catalog.find("a").unwrap();
        assert_eq!(done.progress, 100.0);
        assert!(done.is_completed);
    }
}
