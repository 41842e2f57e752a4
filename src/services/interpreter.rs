//! Invoice text interpreter
//!
//! Turns OCR text of a photographed invoice into a draft expense: the most
//! plausible invoice total and a guessed benefit category.
//!
//! Two named token types drive the parse:
//! - [`CURRENCY_LITERAL`]: an optional `CHF` marker, a digit group (optionally
//!   grouped with `'`, `’` or `` ` ``) and an optional two-digit fraction.
//! - [`KEYWORD_RULES`]: keyword families per category, evaluated in table order.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::models::{CategoryId, ExpenseDraft, Money};

/// Description given to drafts created from a scan
pub const SCAN_DESCRIPTION: &str = "Scan: Rechnung";

/// Category guessed when no keyword family matches and none is configured
pub const FALLBACK_CATEGORY: &str = "alternativmedizin";

/// Monetary-looking token
pub static CURRENCY_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:chf\s*)?([0-9]{1,3}(?:['’`][0-9]{3})+|[0-9]+)(?:[.,]([0-9]{2}))?")
        .expect("currency literal pattern is valid")
});

/// One keyword family pointing at a category
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub category: &'static str,
    pub keywords: &'static [&'static str],
}

impl KeywordRule {
    fn matches(&self, lowercase_text: &str) -> bool {
        self.keywords.iter().any(|k| lowercase_text.contains(k))
    }
}

/// Keyword families in evaluation order.
///
/// Every matching rule overrides the ones before it, so the LAST matching rule
/// wins. Text mentioning both glasses and a hospital is filed under
/// household help. This ordering is kept for compatibility with existing data
/// even though it is probably not what a reader would expect.
pub const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        category: "gesundheitsfoerderung",
        keywords: &[
            "fitness", "yoga", "abo", "studio", "mitglied", "kurs", "ernährung", "mental",
        ],
    },
    KeywordRule {
        category: "sehhilfen",
        keywords: &["optik", "brille", "kontaktlin", "seh"],
    },
    KeywordRule {
        category: "vorsorge",
        keywords: &["check-up", "checkup", "prävention", "vorsorge", "screening"],
    },
    KeywordRule {
        category: "haushalthilfe",
        keywords: &["haushalt", "pflege", "spital"],
    },
];

/// Best guess for a scanned invoice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceGuess {
    /// Largest amount found, zero when none was found
    pub amount: Money,
    /// Guessed category
    pub category: CategoryId,
}

impl InvoiceGuess {
    /// Guess used when no text could be recognized
    pub fn fallback(default_category: CategoryId) -> Self {
        Self {
            amount: Money::zero(),
            category: default_category,
        }
    }

    /// Turn the guess into a draft dated `today` for the user to confirm
    pub fn into_draft(self, today: NaiveDate) -> ExpenseDraft {
        ExpenseDraft::new(today, self.category, SCAN_DESCRIPTION, self.amount)
    }
}

/// Interpreter configured with a default category
#[derive(Debug, Clone)]
pub struct Interpreter {
    default_category: CategoryId,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(CategoryId::from(FALLBACK_CATEGORY))
    }
}

impl Interpreter {
    pub fn new(default_category: CategoryId) -> Self {
        Self { default_category }
    }

    pub fn default_category(&self) -> &CategoryId {
        &self.default_category
    }

    /// Interpret recognized invoice text
    pub fn interpret(&self, raw_text: &str) -> InvoiceGuess {
        let amount = extract_amount(raw_text);
        let category = guess_category(raw_text).unwrap_or_else(|| self.default_category.clone());
        debug!(amount = %amount, category = %category, "interpreted invoice text");

        InvoiceGuess { amount, category }
    }

    /// Guess used when OCR produced nothing
    pub fn fallback(&self) -> InvoiceGuess {
        InvoiceGuess::fallback(self.default_category.clone())
    }
}

/// Interpret text with the built-in default category
pub fn interpret(raw_text: &str) -> InvoiceGuess {
    Interpreter::default().interpret(raw_text)
}

/// All currency literals in the text that parse to an amount
pub fn currency_literals(text: &str) -> Vec<Money> {
    CURRENCY_LITERAL
        .captures_iter(text)
        .filter_map(|caps| {
            let units: String = caps
                .get(1)?
                .as_str()
                .chars()
                .filter(char::is_ascii_digit)
                .collect();
            let cents = caps.get(2).map_or("00", |m| m.as_str());
            Money::parse(&format!("{}.{}", units, cents)).ok()
        })
        .collect()
}

/// Largest currency literal in the text, or zero
///
/// On an invoice the total due is almost always the largest figure.
pub fn extract_amount(text: &str) -> Money {
    currency_literals(text).into_iter().max().unwrap_or_default()
}

/// Category of the last matching keyword rule, if any
pub fn guess_category(text: &str) -> Option<CategoryId> {
    let lower = text.to_lowercase();
    KEYWORD_RULES
        .iter()
        .filter(|rule| rule.matches(&lower))
        .last()
        .map(|rule| CategoryId::from(rule.category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_largest_amount_beats_tax_rate() {
        let guess = interpret("Rechnung total CHF 1'234.50 inkl. 7.7% MwSt");
        assert_eq!(guess.amount, Money::from_cents(123450));
    }

    #[test]
    fn test_fitness_text_guesses_wellness() {
        let guess = interpret("Fitness Studio Jahresabo");
        assert_eq!(guess.category.as_str(), "gesundheitsfoerderung");
    }

    #[test]
    fn test_comma_fraction_and_plain_digits() {
        assert_eq!(extract_amount("Betrag 89,90"), Money::from_cents(8990));
        assert_eq!(extract_amount("Total 1500.00 CHF"), Money::from_units(1500));
        assert_eq!(extract_amount("Summe CHF1’050.25"), Money::from_cents(105025));
        assert_eq!(extract_amount("Total 2`400"), Money::from_units(2400));
    }

    #[test]
    fn test_no_amount_is_zero() {
        assert_eq!(extract_amount("Vielen Dank für Ihren Besuch"), Money::zero());
        assert_eq!(interpret("").amount, Money::zero());
    }

    #[test]
    fn test_overflowing_tokens_are_discarded() {
        let text = "Ref 99999999999999999999999 Total 45.00";
        assert_eq!(extract_amount(text), Money::from_units(45));
    }

    #[test]
    fn test_currency_literals_lists_every_figure() {
        let figures = currency_literals("2 x 12.50 = 25.00");
        assert_eq!(
            figures,
            vec![Money::from_units(2), Money::from_cents(1250), Money::from_units(25)]
        );
    }

    #[test]
    fn test_each_keyword_family() {
        assert_eq!(guess_category("Optiker Müller: Brille").unwrap().as_str(), "sehhilfen");
        assert_eq!(guess_category("Jährlicher Check-up").unwrap().as_str(), "vorsorge");
        assert_eq!(guess_category("Spitex Pflege zuhause").unwrap().as_str(), "haushalthilfe");
        assert_eq!(guess_category("YOGA Kurs").unwrap().as_str(), "gesundheitsfoerderung");
    }

    #[test]
    fn test_last_matching_rule_wins() {
        // "brille" (vision) and "spital" (household help) both match
        let guess = interpret("Brille nach Spital-Aufenthalt");
        assert_eq!(guess.category.as_str(), "haushalthilfe");

        // "abo" (wellness) then "vorsorge" (prevention)
        let guess = interpret("Vorsorge-Abo");
        assert_eq!(guess.category.as_str(), "vorsorge");
    }

    #[test]
    fn test_no_keyword_uses_configured_default() {
        let interpreter = Interpreter::new(CategoryId::from("vorsorge"));
        let guess = interpreter.interpret("Akupunktur Sitzung CHF 120.00");
        assert_eq!(guess.category.as_str(), "vorsorge");
        assert_eq!(guess.amount, Money::from_units(120));

        assert_eq!(interpret("Akupunktur").category.as_str(), FALLBACK_CATEGORY);
    }

    #[test]
    fn test_into_draft() {
        let today = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
        let draft = interpret("Optik CHF 250.00").into_draft(today);

        assert_eq!(draft.date, today);
        assert_eq!(draft.category_id.as_str(), "sehhilfen");
        assert_eq!(draft.description, SCAN_DESCRIPTION);
        assert_eq!(draft.amount, Money::from_units(250));
    }
}
