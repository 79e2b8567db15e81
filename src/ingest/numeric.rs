/// Parses a numeric score cell.
///
/// Surrounding whitespace and `,` thousands separators are tolerated.
/// Blank, textual and non-finite cells yield `None`, never zero.
pub fn parse_numeric(cell: &str) -> Option<f64> {
    let cleaned: String = cell.trim().chars().filter(|&c| c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
