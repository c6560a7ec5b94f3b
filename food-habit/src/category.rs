use derive_more::Display;
use serde::Serialize;

/// Traffic-light nutrition category of a food item.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, sqlx::Type)]
#[sqlx(type_name = "food_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[display("yellow")]
    Yellow,
    #[display("red")]
    Red,
    #[display("green")]
    Green,
    #[display("unknown")]
    Unknown,
}

/// Substring rule table mapping food names to categories.
///
/// Rules are checked in declaration order and the first trigger contained in
/// the food name wins. The default table carries the food names the uploaded
/// records actually use, so matching stays byte-exact against real data.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<(Category, Vec<&'static str>)>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(vec![
            (Category::Red, vec!["焼肉", "ハンバーグ", "焼き魚"]),
            (
                Category::Green,
                vec!["ピーマン炒め", "ほうれん草のおひたし", "切り干し大根"],
            ),
            (
                Category::Yellow,
                vec!["うどん", "チャーハン", "フライドポテト", "カップヌードル"],
            ),
        ])
    }
}

impl Classifier {
    pub fn new(rules: Vec<(Category, Vec<&'static str>)>) -> Self {
        Self { rules }
    }

    /// Matching is case-sensitive substring containment; unmatched names
    /// degrade to [`Category::Unknown`] rather than failing the batch.
    pub fn classify(&self, food_name: &str) -> Category {
        for (category, triggers) in &self.rules {
            if triggers.iter().any(|trigger| food_name.contains(trigger)) {
                return *category;
            }
        }

        Category::Unknown
    }
}
