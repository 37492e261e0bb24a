use std::collections::HashMap;

use crate::schemas::{ExpenseEntry, SettlementResult, UserNick};

#[derive(Default)]
struct Share {
    drinking: f64,
    food: f64,
}

/// Splits every entry equally among its non-blank participants and sums the
/// shares per person, keeping drinking and food apart. Results come out in the
/// order names are first seen.
pub fn compute_settlement(entries: &[ExpenseEntry]) -> Vec<SettlementResult> {
    let mut order: Vec<UserNick> = Vec::new();
    let mut shares: HashMap<UserNick, Share> = HashMap::new();

    for entry in entries {
        let amount = entry.amount.value();
        if amount <= 0.0 {
            continue;
        }
        let names: Vec<&UserNick> = entry
            .participants
            .iter()
            .filter(|name| !name.trim().is_empty())
            .collect();
        if names.is_empty() {
            continue;
        }

        // Repeated names in one entry each take a full share.
        let amount_per_person = amount / names.len() as f64;
        for name in names {
            let share = shares.entry(name.clone()).or_insert_with(|| {
                order.push(name.clone());
                Share::default()
            });
            if entry.is_drinking {
                share.drinking += amount_per_person;
            } else {
                share.food += amount_per_person;
            }
        }
    }

    order
        .into_iter()
        .map(|name| {
            let share = shares.remove(&name).unwrap_or_default();
            SettlementResult {
                total: share.drinking + share.food,
                drinking_total: share.drinking,
                food_total: share.food,
                name,
            }
        })
        .collect()
}
