//! Keyword-based categorization of free-text transaction descriptions.
//!
//! Rules are an ordered list of `(category, keywords)` pairs. A description
//! is lowercased and checked against each rule in turn; the first rule with
//! a keyword contained in the description wins. Nothing matching means
//! [`Category::Other`].

use std::{fmt, str::FromStr, sync::LazyLock};

use serde::{Deserialize, Serialize};

use crate::errors::{TrackerError, TrackerResult};

/// Fixed set of category labels. Declaration order is the default rule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Transport,
    Food,
    Entertainment,
    Shopping,
    Education,
    #[serde(rename = "Digital Services")]
    DigitalServices,
    #[serde(rename = "Bank Fees")]
    BankFees,
    Health,
    #[serde(rename = "Household Services")]
    HouseholdServices,
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Transport,
        Category::Food,
        Category::Entertainment,
        Category::Shopping,
        Category::Education,
        Category::DigitalServices,
        Category::BankFees,
        Category::Health,
        Category::HouseholdServices,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Transport => "Transport",
            Category::Food => "Food",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Education => "Education",
            Category::DigitalServices => "Digital Services",
            Category::BankFees => "Bank Fees",
            Category::Health => "Health",
            Category::HouseholdServices => "Household Services",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TrackerError::InvalidCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new<I, K>(category: Category, keywords: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        CategoryRule {
            category,
            keywords: keywords
                .into_iter()
                .filter_map(|k| normalize_keyword(k.as_ref()))
                .collect(),
        }
    }

    /// `lowered` must already be lowercase.
    fn matches(&self, lowered: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| !k.is_empty() && lowered.contains(k.as_str()))
    }
}

fn normalize_keyword(keyword: &str) -> Option<String> {
    let keyword = keyword.trim();
    (!keyword.is_empty()).then(|| keyword.to_lowercase())
}

/// Ordered categorization rules. Earlier rules take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryRules {
    rules: Vec<CategoryRule>,
}

impl CategoryRules {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| CategoryRule::new(rule.category, rule.keywords))
            .collect();
        CategoryRules { rules }
    }

    /// Loads a rule list from JSON: `[{"category": "Food", "keywords": ["pizza"]}, ...]`
    pub fn from_json(json: &str) -> TrackerResult<Self> {
        let rules: Vec<CategoryRule> = serde_json::from_str(json)?;
        Ok(CategoryRules::new(rules))
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Appends `keyword` to the rule for `category`, or adds a new rule at the
    /// end when the category has none. Existing rules never move.
    pub fn add_keyword(&mut self, category: Category, keyword: &str) {
        let Some(keyword) = normalize_keyword(keyword) else {
            return;
        };

        match self.rules.iter_mut().find(|r| r.category == category) {
            Some(rule) => {
                if !rule.keywords.contains(&keyword) {
                    rule.keywords.push(keyword);
                }
            }
            None => self.rules.push(CategoryRule {
                category,
                keywords: vec![keyword],
            }),
        }
    }

    pub fn categorize(&self, description: &str) -> Category {
        let lowered = description.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.category)
            .unwrap_or(Category::Other)
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        CategoryRules::new(vec![
            CategoryRule::new(
                Category::Transport,
                [
                    "uber", "didi", "rides", "taxi", "cabify", "transporte", "transport",
                    "gasolina", "fuel", "estacionamiento", "parking",
                ],
            ),
            CategoryRule::new(
                Category::Food,
                [
                    "mcdonald", "dunkin", "donut", "xochimilco", "pycca", "eats", "kfc", "pizza",
                    "burger", "restaurant", "comida", "food", "almuerzo", "lunch", "cena",
                    "dinner", "desayuno", "breakfast", "supermercado", "supermarket", "mercado",
                    "grocery",
                ],
            ),
            CategoryRule::new(
                Category::Entertainment,
                [
                    "cine", "multicine", "supercine", "steam", "netflix", "disney", "spotify",
                    "youtube", "musica", "music", "pelicula", "movie", "video", "juego", "game",
                    "entretenimiento", "entertainment",
                ],
            ),
            CategoryRule::new(
                Category::Shopping,
                [
                    "miniso", "el español", "xtrim", "tienda", "shop", "store", "ropa",
                    "clothing", "zapatos", "shoes", "compras", "market", "mall",
                    "centro comercial",
                ],
            ),
            CategoryRule::new(
                Category::Education,
                [
                    "instituto", "institute", "educa", "flywire", "universidad", "university",
                    "colegio", "escuela", "school", "curso", "course", "libro", "textbook",
                    "bookstore", "material", "tuition", "estudio",
                ],
            ),
            CategoryRule::new(
                Category::DigitalServices,
                [
                    "servicio digital", "iva servicio", "app store", "google play", "software",
                    "app", "hosting", "dominio", "domain", "vpn",
                ],
            ),
            CategoryRule::new(
                Category::BankFees,
                [
                    "transferencia", "transfer", "comision", "comisión", "commission",
                    "cargo serv", "interbanc", "pago directo", "banred", "banco", "bank",
                    "tarjeta", "credit card", "debit card", "intereses", "interest", "seguro", "insurance",
                ],
            ),
            CategoryRule::new(
                Category::Health,
                [
                    "farmacia", "farma", "pharmacy", "medicina", "medico", "medical", "hospital",
                    "doctor", "clinica", "clinic", "salud", "health",
                ],
            ),
            CategoryRule::new(
                Category::HouseholdServices,
                [
                    "luz", "electricidad", "electricity", "agua", "water", "telefono", "phone",
                    "internet", "cable", "gas", "mantenimiento", "maintenance", "hogar", "casa",
                ],
            ),
        ])
    }
}

static DEFAULT_RULES: LazyLock<CategoryRules> = LazyLock::new(CategoryRules::default);

/// Categorizes `description` with the built-in rule list.
pub fn categorize(description: &str) -> Category {
    DEFAULT_RULES.categorize(description)
}
