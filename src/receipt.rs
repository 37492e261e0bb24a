use serde::Serialize;

use crate::schemas::SettlementResult;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub name: String,
    pub total: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drinking: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_owner: Option<String>,
    pub lines: Vec<ReceiptLine>,
}

// Whole won, half away from zero. Sign is dropped on display.
fn format_won(amount: f64) -> String {
    format!("{} won", amount.abs().round())
}

pub fn render_receipt(card_owner: &str, results: &[SettlementResult]) -> Receipt {
    let card_owner = match card_owner.trim() {
        "" => None,
        owner => Some(owner.to_string()),
    };
    let lines = results
        .iter()
        .map(|result| {
            let mut total = format_won(result.total);
            if result.total > 0.0 {
                total.push_str(" (to settle)");
            }
            ReceiptLine {
                name: result.name.clone(),
                total,
                drinking: (result.drinking_total != 0.0).then(|| format_won(result.drinking_total)),
                food: (result.food_total != 0.0).then(|| format_won(result.food_total)),
            }
        })
        .collect();
    Receipt { card_owner, lines }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, drinking: f64, food: f64) -> SettlementResult {
        SettlementResult {
            name: name.to_string(),
            total: drinking + food,
            drinking_total: drinking,
            food_total: food,
        }
    }

    #[test]
    fn rounds_to_whole_won() {
        assert_eq!(format_won(333.333), "333 won");
        assert_eq!(format_won(333.5), "334 won");
        assert_eq!(format_won(0.4), "0 won");
        assert_eq!(format_won(-12.0), "12 won");
    }

    #[test]
    fn zero_subtotals_are_hidden() {
        let receipt = render_receipt("", &[result("Bob", 0.0, 500.0)]);
        assert_eq!(receipt.card_owner, None);
        assert_eq!(
            receipt.lines,
            vec![ReceiptLine {
                name: "Bob".to_string(),
                total: "500 won (to settle)".to_string(),
                drinking: None,
                food: Some("500 won".to_string()),
            }]
        );
    }

    #[test]
    fn shows_both_subtotals_and_owner() {
        let receipt = render_receipt(" Alice ", &[result("Alice", 200.0, 1000.0 / 3.0)]);
        assert_eq!(receipt.card_owner.as_deref(), Some("Alice"));
        let line = &receipt.lines[0];
        assert_eq!(line.total, "533 won (to settle)");
        assert_eq!(line.drinking.as_deref(), Some("200 won"));
        assert_eq!(line.food.as_deref(), Some("333 won"));
    }

    #[test]
    fn serialized_receipt_omits_hidden_fields() {
        let receipt = render_receipt("", &[result("Bob", 300.0, 0.0)]);
        let json = serde_json::to_value(&receipt).unwrap();
        assert!(json.get("cardOwner").is_none());
        assert!(json["lines"][0].get("food").is_none());
        assert_eq!(json["lines"][0]["drinking"], "300 won");
    }
}
