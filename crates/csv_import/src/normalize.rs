use chrono::Utc;

/// Parse a price cell like `Rp240,000`: strip the currency marker, thousands
/// commas and whitespace, then parse the rest as a decimal. Total function;
/// empty or unparseable input yields 0.0.
pub fn parse_price(raw: &str) -> f64 {
    let cleaned: String = raw
        .replace("Rp", "")
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

/// Parse a `DD-MMM-YYYY` date cell (e.g. `25-Nov-2024`) into `YYYY-MM-DD`.
///
/// The day is zero-padded, the month mapped through a fixed English
/// abbreviation table (unknown abbreviations fall back to `01`), and the
/// year is copied verbatim. Empty input or a wrong token count yields
/// today's date; callers and historical imports rely on that fallback, so it
/// is kept as documented behavior rather than an error.
pub fn parse_date(raw: &str) -> String {
    let raw = raw.trim();
    if !raw.is_empty() {
        let parts: Vec<&str> = raw.split('-').collect();
        if parts.len() == 3 {
            let day = format!("{:0>2}", parts[0]);
            return format!("{}-{}-{}", parts[2], month_number(parts[1]), day);
        }
    }
    Utc::now().format("%Y-%m-%d").to_string()
}

fn month_number(abbrev: &str) -> &'static str {
    match abbrev {
        "Jan" => "01",
        "Feb" => "02",
        "Mar" => "03",
        "Apr" => "04",
        "May" => "05",
        "Jun" => "06",
        "Jul" => "07",
        "Aug" => "08",
        "Sep" => "09",
        "Oct" => "10",
        "Nov" => "11",
        "Dec" => "12",
        _ => "01",
    }
}

/// Keywords that mark a product as a standard cake; checked in order against
/// the lowercased name.
const CAKE_KEYWORDS: &[&str] = &[
    "bento",
    "basque",
    "choco",
    "chocolate",
    "pomisu",
    "tiramisu",
    "cookies",
    "cream",
    "matcha",
    "pistachio",
    "passionfruit",
    "ubi",
];

/// Map a cake name to its keyword-derived category label.
pub fn categorize(cake_name: &str) -> &'static str {
    if cake_name.is_empty() {
        return "Other";
    }
    let name = cake_name.to_lowercase();
    if CAKE_KEYWORDS.iter().any(|k| name.contains(k)) {
        "Cakes"
    } else {
        "Custom Orders"
    }
}
