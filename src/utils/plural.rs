//! Pluralization utilities.

/// Return "s" suffix for plural counts
///
/// # Examples
///
/// - `plural_s(0)` -> `"s"` (0 elements)
/// - `plural_s(1)` -> `""` (1 element)
/// - `plural_s(5)` -> `"s"` (5 elements)
#[inline]
fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization
///
/// # Examples
///
/// - `plural_count(0, "element")` -> `"0 elements"`
/// - `plural_count(1, "element")` -> `"1 element"`
/// - `plural_count(2, "background element")` -> `"2 background elements"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{count} {noun}{}", plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "element"), "0 elements");
        assert_eq!(plural_count(1, "element"), "1 element");
        assert_eq!(plural_count(3, "background element"), "3 background elements");
    }
}
