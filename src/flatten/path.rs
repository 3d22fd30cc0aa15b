//! Parsing of the resource path argument
//!
//! A path like `Reservations:Instances` names the object keys to descend
//! through before record extraction begins.

/// Delimiter between path segments on the command line
pub const PATH_DELIMITER: char = ':';

/// Split a raw path argument into its segments.
///
/// A missing or empty path yields no segments, meaning "flatten the whole
/// document from the root".
pub fn parse_path(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(raw) if !raw.is_empty() => {
            raw.split(PATH_DELIMITER).map(str::to_string).collect()
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_segments() {
        assert_eq!(
            parse_path(Some("Reservations:Instances")),
            vec!["Reservations".to_string(), "Instances".to_string()]
        );
    }

    #[test]
    fn test_single_segment() {
        assert_eq!(parse_path(Some("Volumes")), vec!["Volumes".to_string()]);
    }

    #[test]
    fn test_missing_path() {
        assert!(parse_path(None).is_empty());
    }

    #[test]
    fn test_empty_path() {
        assert!(parse_path(Some("")).is_empty());
    }
}
