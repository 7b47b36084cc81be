use credmais_api::{ApiError, ApiResult};
use credmais_db::char_limit;
use heapless::String as HeaplessString;

/// Trims `value` and fits it into a bounded string, rejecting values that are too long.
///
/// `N` is a byte capacity from `credmais_db::text_limits`; the limit enforced is in characters.
pub fn bounded<const N: usize>(value: &str, field: &str) -> ApiResult<HeaplessString<N>> {
    let value = value.trim();
    let limit = char_limit(N);
    let too_long =
        || ApiError::ValidationError(format!("{field} must be at most {limit} characters"));
    if value.chars().count() > limit {
        return Err(too_long());
    }
    HeaplessString::try_from(value).map_err(|_| too_long())
}

/// Like [`bounded`], but blank or absent input becomes `None`.
pub fn bounded_opt<const N: usize>(
    value: Option<&str>,
    field: &str,
) -> ApiResult<Option<HeaplessString<N>>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => bounded(v, field).map(Some),
        None => Ok(None),
    }
}

/// First `max_chars` characters of `value`.
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use credmais_db::{utf8_capacity, NAME_CAPACITY};

    #[test]
    fn test_bounded_trims_and_checks_capacity() {
        let name: HeaplessString<{ utf8_capacity(8) }> = bounded("  Maria ", "Name").unwrap();
        assert_eq!(name.as_str(), "Maria");
        assert!(matches!(
            bounded::<{ utf8_capacity(4) }>("Mariana", "Name"),
            Err(ApiError::ValidationError(_))
        ));
    }

    #[test]
    fn test_bounded_counts_characters_not_bytes() {
        let accented = "ã".repeat(150);
        let name: HeaplessString<NAME_CAPACITY> = bounded(&accented, "Client name").unwrap();
        assert_eq!(name.chars().count(), 150);

        let err = bounded::<NAME_CAPACITY>(&"ã".repeat(151), "Client name").unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(m) if m == "Client name must be at most 150 characters"));
    }

    #[test]
    fn test_blank_optional_is_none() {
        assert!(bounded_opt::<{ utf8_capacity(8) }>(Some("   "), "Phone").unwrap().is_none());
        assert!(bounded_opt::<{ utf8_capacity(8) }>(None, "Phone").unwrap().is_none());
        assert_eq!(
            bounded_opt::<{ utf8_capacity(8) }>(Some("9999"), "Phone").unwrap().unwrap().as_str(),
            "9999"
        );
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate_chars("Cartão Benefício", 6), "Cartão");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
