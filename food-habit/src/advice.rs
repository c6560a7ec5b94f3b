use derive_more::Display;
use serde::Serialize;

use crate::category::Category;

/// Per-category record counts for one board. `unknown` is reported but never
/// participates in the advice computation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryTally {
    pub yellow: u64,
    pub red: u64,
    pub green: u64,
    pub unknown: u64,
}

impl CategoryTally {
    pub fn add(&mut self, category: Category) {
        match category {
            Category::Yellow => self.yellow += 1,
            Category::Red => self.red += 1,
            Category::Green => self.green += 1,
            Category::Unknown => self.unknown += 1,
        }
    }

    fn classified(&self) -> [(Category, u64); 3] {
        [
            (Category::Yellow, self.yellow),
            (Category::Red, self.red),
            (Category::Green, self.green),
        ]
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Advice {
    #[display("Your diet is balanced. Keep it up.")]
    Balanced,
    #[display("Your diet is imbalanced. Eat more {_0} foods.")]
    EatMore(Category),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceReport {
    pub tally: CategoryTally,
    pub advice: Advice,
}

/// Tally categories and derive the balance advice.
///
/// The diet counts as imbalanced when the largest of the yellow/red/green
/// counts exceeds 1.5 times the smallest; the advice then names the scarcest
/// category. Ties on the minimum resolve to the first category in
/// yellow → red → green order. A board with no classifiable records reads as
/// balanced: there is nothing to correct yet.
pub fn analyze<I>(categories: I) -> BalanceReport
where
    I: IntoIterator<Item = Category>,
{
    let mut tally = CategoryTally::default();
    for category in categories {
        tally.add(category);
    }

    BalanceReport {
        tally,
        advice: advise(&tally),
    }
}

fn advise(tally: &CategoryTally) -> Advice {
    let classified = tally.classified();

    let mut min = classified[0];
    let mut max_count = classified[0].1;
    for &(category, count) in &classified[1..] {
        if count < min.1 {
            min = (category, count);
        }
        if count > max_count {
            max_count = count;
        }
    }

    // Multiplication form: a zero minimum never divides, and any non-zero
    // maximum trips the threshold against it.
    if max_count as f64 > 1.5 * min.1 as f64 {
        Advice::EatMore(min.0)
    } else {
        Advice::Balanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(yellow: u64, red: u64, green: u64) -> Vec<Category> {
        let mut out = Vec::new();
        out.extend(std::iter::repeat_n(Category::Yellow, yellow as usize));
        out.extend(std::iter::repeat_n(Category::Red, red as usize));
        out.extend(std::iter::repeat_n(Category::Green, green as usize));
        out
    }

    #[test]
    fn test_even_tally_is_balanced() {
        let report = analyze(categories(10, 10, 10));
        assert_eq!(report.advice, Advice::Balanced);
        assert_eq!(report.tally.yellow, 10);
        assert_eq!(report.tally.red, 10);
        assert_eq!(report.tally.green, 10);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // 15 == 1.5 * 10 exactly: not yet imbalanced.
        assert_eq!(analyze(categories(15, 10, 10)).advice, Advice::Balanced);
        assert_eq!(
            analyze(categories(16, 10, 10)).advice,
            Advice::EatMore(Category::Red)
        );
    }

    #[test]
    fn test_minimum_tie_resolves_in_declaration_order() {
        // Red and green tie at the minimum; red comes first in
        // yellow → red → green order.
        let report = analyze(categories(16, 10, 10));
        assert_eq!(report.advice, Advice::EatMore(Category::Red));

        // Yellow and red tie; yellow wins.
        let report = analyze(categories(10, 10, 16));
        assert_eq!(report.advice, Advice::EatMore(Category::Yellow));
    }

    #[test]
    fn test_zero_minimum_trips_on_any_nonzero_maximum() {
        let report = analyze(categories(1, 0, 0));
        assert_eq!(report.advice, Advice::EatMore(Category::Red));
    }

    #[test]
    fn test_empty_tally_is_balanced() {
        let report = analyze(std::iter::empty());
        assert_eq!(report.advice, Advice::Balanced);
        assert_eq!(report.tally, CategoryTally::default());
    }

    #[test]
    fn test_unknown_is_counted_but_excluded_from_advice() {
        let mut input = categories(2, 2, 2);
        input.extend(std::iter::repeat_n(Category::Unknown, 20));

        let report = analyze(input);
        assert_eq!(report.tally.unknown, 20);
        assert_eq!(report.advice, Advice::Balanced);
    }

    #[test]
    fn test_advice_messages() {
        assert_eq!(Advice::Balanced.to_string(), "Your diet is balanced. Keep it up.");
        assert_eq!(
            Advice::EatMore(Category::Green).to_string(),
            "Your diet is imbalanced. Eat more green foods."
        );
    }
}
