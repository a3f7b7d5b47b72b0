//! Line items as typed-in text, plus the coercions applied at submit time.
//!
//! Inputs stay raw strings until validation so a half-typed value never
//! loses what the user entered. Coercion follows one rule set everywhere:
//! surrounding whitespace is ignored, empty means absent, and non-finite
//! numbers are rejected.

use serde::{Serialize, Serializer};

/// Decimal parsed from user input.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Whole count parsed from user input. `2.0` is accepted; `2.5` is not.
pub fn parse_count(raw: &str) -> Option<i64> {
    parse_amount(raw)
        .filter(|v| v.fract() == 0.0 && v.abs() < i64::MAX as f64)
        .map(|v| v as i64)
}

/// Identifier chosen from a dropdown.
pub fn parse_id(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}

/// A money amount that serializes integral values as JSON integers,
/// so `1000` goes out as `1000` rather than `1000.0`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Amount(pub f64);

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0.abs() < 9_007_199_254_740_992.0 {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

/// One editable row of an invoice draft.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineItem {
    /// Product id (import) or stock item id (export).
    pub reference: String,
    pub quantity: String,
    pub unit_price: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineField {
    Reference,
    Quantity,
    UnitPrice,
}

/// A line that passed validation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CheckedLine {
    pub reference: i64,
    pub quantity: i64,
    pub unit_price: Amount,
}

impl LineItem {
    pub fn set(&mut self, field: LineField, value: impl Into<String>) {
        let slot = match field {
            LineField::Reference => &mut self.reference,
            LineField::Quantity => &mut self.quantity,
            LineField::UnitPrice => &mut self.unit_price,
        };
        *slot = value.into();
    }

    /// `None` when the reference is missing or either number is not positive.
    pub fn check(&self) -> Option<CheckedLine> {
        let reference = parse_id(&self.reference)?;
        let quantity = parse_count(&self.quantity).filter(|q| *q > 0)?;
        let unit_price = parse_amount(&self.unit_price).filter(|p| *p > 0.0)?;
        Some(CheckedLine {
            reference,
            quantity,
            unit_price: Amount(unit_price),
        })
    }
}

/// Ordered, never-empty sequence of line items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lines(Vec<LineItem>);

impl Default for Lines {
    fn default() -> Self {
        Self(vec![LineItem::default()])
    }
}

impl Lines {
    pub fn items(&self) -> &[LineItem] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn add(&mut self) {
        self.0.push(LineItem::default());
    }

    /// Remove the line at `index`. The last remaining line, or an index
    /// out of range, is left alone and `false` returned.
    pub fn remove(&mut self, index: usize) -> bool {
        if self.0.len() <= 1 || index >= self.0.len() {
            return false;
        }
        self.0.remove(index);
        true
    }

    pub fn set_field(&mut self, index: usize, field: LineField, value: impl Into<String>) -> bool {
        match self.0.get_mut(index) {
            Some(line) => {
                line.set(field, value);
                true
            }
            None => false,
        }
    }

    /// Every line checked, or `None` if any one fails.
    pub fn check_all(&self) -> Option<Vec<CheckedLine>> {
        self.0.iter().map(LineItem::check).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(reference: &str, quantity: &str, unit_price: &str) -> LineItem {
        LineItem {
            reference: reference.to_string(),
            quantity: quantity.to_string(),
            unit_price: unit_price.to_string(),
        }
    }

    #[test]
    fn test_coercion() {
        assert_eq!(parse_amount(" 12.5 "), Some(12.5));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_count("3"), Some(3));
        assert_eq!(parse_count("3.0"), Some(3));
        assert_eq!(parse_count("3.5"), None);
        assert_eq!(parse_id("10"), Some(10));
        assert_eq!(parse_id("  "), None);
        assert_eq!(parse_id("x"), None);
    }

    #[test]
    fn test_amount_serializes_integral_as_integer() {
        assert_eq!(serde_json::to_string(&Amount(1000.0)).unwrap(), "1000");
        assert_eq!(serde_json::to_string(&Amount(12.5)).unwrap(), "12.5");
    }

    #[test]
    fn test_check_line() {
        let ok = line("10", "2", "1000").check().unwrap();
        assert_eq!(ok.reference, 10);
        assert_eq!(ok.quantity, 2);
        assert_eq!(ok.unit_price, Amount(1000.0));

        assert!(line("", "2", "1000").check().is_none());
        assert!(line("10", "0", "1000").check().is_none());
        assert!(line("10", "-1", "1000").check().is_none());
        assert!(line("10", "2", "0").check().is_none());
        assert!(line("10", "2", "-5").check().is_none());
        assert!(line("10", "", "5").check().is_none());
    }

    #[test]
    fn test_new_lines_have_one_empty_row() {
        let lines = Lines::default();
        assert_eq!(lines.items(), &[LineItem::default()]);
    }

    #[test]
    fn test_remove_keeps_last_line() {
        let mut lines = Lines::default();
        assert!(!lines.remove(0));
        assert_eq!(lines.len(), 1);
        lines.add();
        assert!(!lines.remove(5));
        assert!(lines.remove(0));
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_add_then_remove_last_restores() {
        let mut lines = Lines::default();
        lines.set_field(0, LineField::Reference, "4");
        lines.add();
        lines.set_field(1, LineField::Quantity, "9");
        let before = lines.clone();

        lines.add();
        assert!(lines.remove(lines.len() - 1));
        assert_eq!(lines, before);
    }

    #[test]
    fn test_set_field_out_of_range() {
        let mut lines = Lines::default();
        assert!(!lines.set_field(3, LineField::UnitPrice, "1"));
        assert!(lines.set_field(0, LineField::UnitPrice, "1"));
        assert_eq!(lines.items()[0].unit_price, "1");
    }

    #[test]
    fn test_check_all_fails_on_any_bad_line() {
        let mut lines = Lines::default();
        lines.set_field(0, LineField::Reference, "1");
        lines.set_field(0, LineField::Quantity, "1");
        lines.set_field(0, LineField::UnitPrice, "1");
        assert_eq!(lines.check_all().map(|l| l.len()), Some(1));
        lines.add();
        assert!(lines.check_all().is_none());
    }
}
