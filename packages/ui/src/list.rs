use api::ListState;
use dioxus::prelude::*;

/// The row shown instead of a table body while a list is not `Loaded`.
pub fn list_notice<T>(state: &ListState<T>) -> Element {
    match state {
        ListState::Loading => rsx! {
            p { class: "list-notice", "Loading..." }
        },
        ListState::Empty(message) => {
            let text = if message.is_empty() {
                "Nothing here yet."
            } else {
                message.as_str()
            };
            rsx! {
                p { class: "list-notice", "{text}" }
            }
        }
        ListState::Failed(message) => rsx! {
            p { class: "list-notice error", "{message}" }
        },
        ListState::Loaded(_) => rsx! {},
    }
}

/// Money formatted with thousands separators, no decimals for whole values.
pub fn money(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let digits = (cents.unsigned_abs() / 100).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let sign = if cents < 0 { "-" } else { "" };
    let fraction = cents.unsigned_abs() % 100;
    if fraction == 0 {
        format!("{sign}{grouped}₫")
    } else {
        format!("{sign}{grouped},{fraction:02}₫")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money() {
        assert_eq!(money(0.0), "0₫");
        assert_eq!(money(1000.0), "1.000₫");
        assert_eq!(money(1234567.0), "1.234.567₫");
        assert_eq!(money(99.5), "99,50₫");
        assert_eq!(money(-2500.0), "-2.500₫");
    }

    #[test]
    fn test_money_rounds_before_splitting() {
        assert_eq!(money(0.999), "1₫");
        assert_eq!(money(1.996), "2₫");
        assert_eq!(money(999.999), "1.000₫");
        assert_eq!(money(-0.5), "-0,50₫");
        assert_eq!(money(-0.001), "0₫");
    }
}
