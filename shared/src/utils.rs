// Number formatting shared by the engine and the GUI.

// Italian notation: '.' groups thousands, ',' separates decimals.
pub mod italian_format {
    use std::str::FromStr;
    use anyhow::{Result, anyhow};

    // Parses decimals like "1.234,56" or "123,45" into f64
    pub fn parse_decimal(s: &str) -> Result<f64> {
        let normalized = s.trim()
            .replace('.', "")  // Remove thousand separators
            .replace(',', "."); // Replace decimal separator

        f64::from_str(&normalized)
            .map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))
    }

    // 1234.5 -> "1.234,50"
    pub fn format_decimal(value: f64, decimals: usize) -> String {
        let formatted = format!("{:.decimals$}", value.abs(), decimals = decimals);
        let (int_part, frac_part) = match formatted.split_once('.') {
            Some((i, f)) => (i.to_string(), Some(f.to_string())),
            None => (formatted.clone(), None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') { "-" } else { "" };
        match frac_part {
            Some(frac) => format!("{}{},{}", sign, grouped, frac),
            None => format!("{}{}", sign, grouped),
        }
    }

    /// Two-decimal euro price, e.g. "€ 1.234,50".
    pub fn format_price(value: f64) -> String {
        format!("€ {}", format_decimal(value, 2))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_decimal_simple() {
            assert_eq!(parse_decimal("123,45").unwrap(), 123.45);
        }

        #[test]
        fn test_parse_decimal_with_thousands() {
            assert_eq!(parse_decimal("1.234,56").unwrap(), 1234.56);
        }

        #[test]
        fn test_parse_decimal_invalid() {
            assert!(parse_decimal("n/d").is_err());
        }

        #[test]
        fn test_format_decimal() {
            assert_eq!(format_decimal(85.5, 2), "85,50");
            assert_eq!(format_decimal(1234.5, 2), "1.234,50");
            assert_eq!(format_decimal(1234567.0, 0), "1.234.567");
            assert_eq!(format_decimal(-12.0, 2), "-12,00");
            assert_eq!(format_decimal(-0.001, 2), "0,00");
        }

        #[test]
        fn test_format_price() {
            assert_eq!(format_price(41.5), "€ 41,50");
        }
    }
}
