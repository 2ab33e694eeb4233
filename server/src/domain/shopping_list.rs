//! Plain-text rendering of the aggregated shopping list
//!
//! Fixed-width columns, a header row, and a dash separator. Columns pad
//! to their width but never truncate, so an overlong name just pushes
//! its row wider.

use crate::data::types::IngredientTotal;

/// File name offered in the download's Content-Disposition
pub const DOWNLOAD_FILE_NAME: &str = "shopping_list.txt";

const NAME_WIDTH: usize = 30;
const UNIT_WIDTH: usize = 20;
const AMOUNT_WIDTH: usize = 10;

/// Render totals as the downloadable text document
pub fn render(totals: &[IngredientTotal]) -> String {
    let header = format!(
        "{:<NAME_WIDTH$} {:<UNIT_WIDTH$} {:<AMOUNT_WIDTH$}",
        "Ingredient", "Unit", "Amount"
    );
    let separator = "-".repeat(header.len());

    let mut lines = vec![header, separator];
    for total in totals {
        lines.push(format!(
            "{:<NAME_WIDTH$} {:<UNIT_WIDTH$} {:<AMOUNT_WIDTH$}",
            total.name, total.measurement_unit, total.total
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(name: &str, unit: &str, amount: i64) -> IngredientTotal {
        IngredientTotal {
            name: name.to_string(),
            measurement_unit: unit.to_string(),
            total: amount,
        }
    }

    #[test]
    fn test_render_empty_list() {
        let text = render(&[]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Ingredient"));
        assert_eq!(lines[1].len(), lines[0].len());
        assert!(lines[1].chars().all(|c| c == '-'));
    }

    #[test]
    fn test_render_columns_are_fixed_width() {
        let text = render(&[total("Flour", "g", 700), total("Milk", "ml", 250)]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);

        let row = lines[2];
        assert!(row.starts_with("Flour"));
        // Unit column starts after the padded name, amount after the unit
        assert_eq!(&row[31..32], "g");
        assert_eq!(&row[52..55], "700");
    }

    #[test]
    fn test_render_does_not_truncate_long_names() {
        let long = "A".repeat(40);
        let text = render(&[total(&long, "g", 1)]);
        let row = text.lines().nth(2).unwrap();
        assert!(row.starts_with(&long));
    }
}
