//! Converter screen rendering.

use crate::converter::ConversionView;
use crate::currency::Currency;
use crate::store::ConversionHistory;

/// Render a conversion result.
///
/// ```text
/// From: 🇺🇸 USD - United States Dollar
///       10 $
/// To:   🇭🇳 HNL - Honduran Lempira
///       246.50 L
///
/// 1 USD = 24.6500 HNL
/// ```
pub fn render_conversion(view: &ConversionView) -> String {
    [
        format!("From: {}", view.from.label()),
        format!("      {} {}", view.amount, view.from.symbol),
        format!("To:   {}", view.to.label()),
        format!("      {} {}", view.converted_amount, view.to.symbol),
        String::new(),
        view.rate_line(),
    ]
    .join("\n")
}

/// One currency per line, as in the picker.
pub fn render_currency_list(currencies: &[&Currency]) -> String {
    if currencies.is_empty() {
        return "No currency found.".to_string();
    }
    currencies
        .iter()
        .map(|c| format!("{}  ({})", c.label(), c.symbol))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_last_conversion(last: Option<&ConversionHistory>) -> String {
    match last {
        Some(c) => format!(
            "{} {} = {} {} (rate {:.4})",
            c.amount, c.from_currency, c.converted_amount, c.to_currency, c.conversion_rate
        ),
        None => "No conversions yet.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::find;

    #[test]
    fn test_render_conversion() {
        let view = ConversionView {
            from: find("USD").unwrap(),
            to: find("EUR").unwrap(),
            amount: "10".to_string(),
            converted_amount: "9.20".to_string(),
            rate: 0.92,
        };
        let rendered = render_conversion(&view);
        assert!(rendered.contains("USD - United States Dollar"));
        assert!(rendered.contains("9.20 €"));
        assert!(rendered.ends_with("1 USD = 0.9200 EUR"));
    }

    #[test]
    fn test_render_empty_currency_list() {
        assert_eq!(render_currency_list(&[]), "No currency found.");
    }

    #[test]
    fn test_render_last_conversion() {
        assert_eq!(render_last_conversion(None), "No conversions yet.");

        let last = ConversionHistory {
            from_currency: "USD".into(),
            to_currency: "EUR".into(),
            amount: "10".into(),
            converted_amount: "9.20".into(),
            conversion_rate: 0.92,
            timestamp: 0,
        };
        assert_eq!(
            render_last_conversion(Some(&last)),
            "10 USD = 9.20 EUR (rate 0.9200)"
        );
    }
}
