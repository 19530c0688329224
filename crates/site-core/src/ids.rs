//! ID prefix constants and format checks.
//!
//! Issue IDs are minted by the document store (`site-db`) as
//! `{prefix}-{16 lowercase hex chars}`.

/// Prefix for issue IDs.
pub const PREFIX_ISSUE: &str = "iss";

/// Number of random hex characters following the prefix.
pub const ID_HEX_LEN: usize = 16;

/// Check whether `id` has the shape of a store-minted ID with `prefix`.
#[must_use]
pub fn is_valid_id(id: &str, prefix: &str) -> bool {
    let Some(rest) = id.strip_prefix(prefix).and_then(|r| r.strip_prefix('-')) else {
        return false;
    };
    rest.len() == ID_HEX_LEN
        && rest
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_minted_shape() {
        assert!(is_valid_id("iss-0123456789abcdef", PREFIX_ISSUE));
    }

    #[test]
    fn rejects_wrong_prefix_or_length() {
        assert!(!is_valid_id("tsk-0123456789abcdef", PREFIX_ISSUE));
        assert!(!is_valid_id("iss-0123", PREFIX_ISSUE));
        assert!(!is_valid_id("iss0123456789abcdef0", PREFIX_ISSUE));
    }

    #[test]
    fn rejects_uppercase_hex() {
        assert!(!is_valid_id("iss-0123456789ABCDEF", PREFIX_ISSUE));
    }
}
