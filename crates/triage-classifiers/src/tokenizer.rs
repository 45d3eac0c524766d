//! Text normalization shared between training and inference
//!
//! Training and scoring must tokenize identically; any mismatch silently
//! degrades accuracy, so both go through this module and nothing else.

/// Fixed stopword list. An implementation parameter, not configurable:
/// changing it invalidates every trained artifact.
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "of", "at", "by", "for", "with", "about", "to",
    "from", "in", "on", "is", "are", "was", "were", "be", "been", "being", "has", "have", "had",
    "do", "does", "did", "will", "would", "can", "could", "should", "it", "its", "this", "that",
    "these", "those", "as", "not", "no", "we", "our", "there", "near",
];

/// Convert raw free text into normalized feature tokens.
///
/// Lowercases, splits on every character outside `[a-z0-9]`, drops
/// stopwords, then applies light suffix stripping. Pure and deterministic;
/// empty input yields an empty sequence.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty() && !is_stopword(t))
        .map(stem)
        .collect()
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Light stemming: ordered, mutually exclusive rules; first match wins and
/// at most one suffix is stripped per token. Length thresholds test the
/// token before stripping.
fn stem(token: &str) -> String {
    let n = token.len();
    if n > 5 && token.ends_with("ing") {
        return token[..n - 3].to_string();
    }
    if n > 4 && token.ends_with("ed") {
        return token[..n - 2].to_string();
    }
    if n > 4 && token.ends_with("es") {
        return token[..n - 2].to_string();
    }
    if n > 3 && token.ends_with('s') {
        return token[..n - 1].to_string();
    }
    token.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n").is_empty());
        assert!(tokenize("!!! ---").is_empty());
    }

    #[test]
    fn test_stopwords_only_yields_empty() {
        assert!(tokenize("the and of a an is was").is_empty());
        assert!(tokenize("The AND Of").is_empty());
    }

    #[test]
    fn test_lowercase_and_separators() {
        assert_eq!(
            tokenize("Hydrant #42 DAMAGED, Main St."),
            vec!["hydrant", "42", "damag", "main", "st"]
        );
    }

    #[test]
    fn test_inspections_strips_single_s() {
        // No earlier rule matches, so only the trailing "s" is stripped.
        assert_eq!(tokenize("inspections"), vec!["inspection"]);
    }

    #[test]
    fn test_stemming_rules_in_order() {
        // "ing" fires only for tokens longer than 5 chars
        assert_eq!(tokenize("flooding"), vec!["flood"]);
        assert_eq!(tokenize("ring"), vec!["ring"]);
        // "ed" fires for tokens longer than 4 chars
        assert_eq!(tokenize("burst ruptured"), vec!["burst", "ruptur"]);
        assert_eq!(tokenize("bed"), vec!["bed"]);
        // "es" before "s"; the threshold tests the token length pre-strip,
        // so a 5-char token ending in "es" loses both characters
        assert_eq!(tokenize("leakages"), vec!["leakag"]);
        assert_eq!(tokenize("pipes"), vec!["pip"]);
        // plain "s" for tokens longer than 3 chars
        assert_eq!(tokenize("pumps"), vec!["pump"]);
        assert_eq!(tokenize("gas"), vec!["gas"]);
    }

    #[test]
    fn test_only_one_suffix_stripped() {
        // "classes" matches "es" first; the result keeps its trailing "s"
        assert_eq!(tokenize("classes"), vec!["class"]);
    }

    #[test]
    fn test_non_ascii_is_separator() {
        assert_eq!(tokenize("café rupture"), vec!["caf", "rupture"]);
    }

    #[test]
    fn test_deterministic() {
        let text = "Sewage overflow reported near pump station 3";
        assert_eq!(tokenize(text), tokenize(text));
    }
}
