//! Best-Seller Merge
//!
//! Combines the two ledgers' per-ledger rankings into the summary ranking.
//! Pure function so the ordering rules stay testable without a database.

use std::collections::HashMap;

use crate::orders::money;
use shared::models::BestSeller;

/// Merge per-ledger best-seller lists by exact product name.
///
/// Quantities and revenues are summed per name. The representative image is
/// the first non-empty one in iteration order; callers pass the online list
/// first, which gives it precedence over the physical ledger. Ordering:
/// quantity descending, then revenue descending, then name ascending.
pub fn merge_best_sellers(
    online: &[BestSeller],
    physical: &[BestSeller],
    limit: usize,
) -> Vec<BestSeller> {
    let mut merged: Vec<BestSeller> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in online.iter().chain(physical.iter()) {
        match index.get(entry.name.as_str()) {
            Some(&i) => {
                merged[i].quantity += entry.quantity;
                merged[i].revenue = money::add(merged[i].revenue, entry.revenue);
                if merged[i].image.is_none() {
                    merged[i].image = non_empty(&entry.image);
                }
            }
            None => {
                index.insert(entry.name.clone(), merged.len());
                merged.push(BestSeller {
                    name: entry.name.clone(),
                    image: non_empty(&entry.image),
                    quantity: entry.quantity,
                    revenue: entry.revenue,
                });
            }
        }
    }

    merged.sort_by(|a, b| {
        b.quantity
            .cmp(&a.quantity)
            .then(b.revenue.total_cmp(&a.revenue))
            .then(a.name.cmp(&b.name))
    });
    merged.truncate(limit);
    merged
}

fn non_empty(image: &Option<String>) -> Option<String> {
    image.as_deref().filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seller(name: &str, image: Option<&str>, quantity: i64, revenue: f64) -> BestSeller {
        BestSeller {
            name: name.into(),
            image: image.map(str::to_string),
            quantity,
            revenue,
        }
    }

    #[test]
    fn merges_by_name_and_backfills_the_image() {
        let online = vec![seller("Shirt", None, 5, 100.0)];
        let physical = vec![
            seller("Shirt", Some("u.png"), 3, 60.0),
            seller("Hat", Some("h.png"), 10, 200.0),
        ];

        let merged = merge_best_sellers(&online, &physical, 3);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], seller("Hat", Some("h.png"), 10, 200.0));
        // Online's image was missing, so the physical entry supplies it
        assert_eq!(merged[1], seller("Shirt", Some("u.png"), 8, 160.0));
    }

    #[test]
    fn online_image_takes_precedence_when_present() {
        let online = vec![seller("Shirt", Some("online.png"), 1, 10.0)];
        let physical = vec![seller("Shirt", Some("physical.png"), 1, 10.0)];

        let merged = merge_best_sellers(&online, &physical, 3);
        assert_eq!(merged[0].image.as_deref(), Some("online.png"));
    }

    #[test]
    fn name_matching_is_exact() {
        let online = vec![seller("Shirt", None, 1, 10.0)];
        let physical = vec![seller("shirt ", None, 1, 10.0)];

        let merged = merge_best_sellers(&online, &physical, 3);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn quantity_ties_break_by_revenue_then_name() {
        let online = vec![
            seller("Belt", None, 2, 30.0),
            seller("Cap", None, 2, 30.0),
        ];
        let physical = vec![seller("Scarf", None, 2, 40.0)];

        let merged = merge_best_sellers(&online, &physical, 3);
        let names: Vec<&str> = merged.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Scarf", "Belt", "Cap"]);
    }

    #[test]
    fn result_is_truncated_to_the_limit() {
        let online = vec![
            seller("A", None, 4, 1.0),
            seller("B", None, 3, 1.0),
            seller("C", None, 2, 1.0),
        ];
        let physical = vec![seller("D", None, 1, 1.0)];

        let merged = merge_best_sellers(&online, &physical, 3);
        assert_eq!(merged.len(), 3);
        assert!(merged.iter().all(|b| b.name != "D"));
    }

    #[test]
    fn empty_inputs_merge_to_empty() {
        assert!(merge_best_sellers(&[], &[], 3).is_empty());
    }
}
