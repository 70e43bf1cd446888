use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A product resolved against its category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Drink {
    pub name: String,
    pub category: String,
    pub price: i64,
}

impl Drink {
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: i64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
        }
    }
}

/// Collapse repeated drinks and order the rest by price ascending.
///
/// The first occurrence of each drink wins, and the sort is stable, so
/// equally priced drinks stay in the order they were fetched.
pub fn unique_by_price(drinks: Vec<Drink>) -> Vec<Drink> {
    let mut seen = HashSet::with_capacity(drinks.len());
    let mut unique: Vec<Drink> = drinks
        .into_iter()
        .filter(|drink| seen.insert(drink.clone()))
        .collect();
    unique.sort_by_key(|drink| drink.price);
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse_to_first() {
        let drinks = vec![
            Drink::new("Espresso", "COFFEE", 790),
            Drink::new("Americano", "COFFEE", 1290),
            Drink::new("Espresso", "COFFEE", 790),
        ];

        let unique = unique_by_price(drinks);
        assert_eq!(
            unique,
            vec![
                Drink::new("Espresso", "COFFEE", 790),
                Drink::new("Americano", "COFFEE", 1290),
            ]
        );
    }

    #[test]
    fn test_same_name_different_price_is_kept() {
        let drinks = vec![
            Drink::new("Espresso", "COFFEE", 890),
            Drink::new("Espresso", "COFFEE", 790),
        ];

        let unique = unique_by_price(drinks);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].price, 790);
    }

    #[test]
    fn test_ties_keep_fetch_order() {
        let drinks = vec![
            Drink::new("Cappuccino", "COFFEE", 1450),
            Drink::new("Americano", "COFFEE", 1290),
            Drink::new("Caffe Latte", "COFFEE", 1450),
        ];

        let names: Vec<_> = unique_by_price(drinks)
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, ["Americano", "Cappuccino", "Caffe Latte"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(unique_by_price(Vec::new()).is_empty());
    }
}
