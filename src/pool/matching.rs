//! Name normalization and anchor/exclude matching.
//!
//! Anchors and excludes arrive as free-typed name fragments. Matching is
//! deliberately forgiving: names are ASCII-folded and lowercased, and
//! anchor keys are reduced to alphanumerics so `"jamarr"` matches
//! `"Ja'Marr Chase"`.

use unicode_normalization::UnicodeNormalization;

use super::Pool;

/// NFKD-folds to ASCII, lowercases, and collapses whitespace.
pub fn normalize_name(s: &str) -> String {
    let folded: String = s.nfkd().filter(|c| c.is_ascii()).collect();
    folded
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strips everything but ASCII alphanumerics from the lowercased input.
pub fn simplify_key(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// One raw anchor name resolved to the pool indices it matches.
///
/// An empty `indices` set means the anchor matched nothing; the exact
/// engine treats that as a hard failure.
#[derive(Debug, Clone)]
pub struct AnchorGroup {
    pub name: String,
    pub indices: Vec<usize>,
}

/// Resolves raw anchor names to index groups over the working pool.
///
/// Each anchor's simplified key must appear as a substring of an item's
/// simplified name key. Blank anchor strings are skipped.
pub fn anchor_groups(pool: &Pool, anchors: &[String]) -> Vec<AnchorGroup> {
    anchors
        .iter()
        .filter_map(|raw| {
            let key = simplify_key(&normalize_name(raw.trim()));
            if key.is_empty() {
                return None;
            }
            let indices = pool
                .items()
                .iter()
                .enumerate()
                .filter(|(_, item)| item.simple_key.contains(&key))
                .map(|(i, _)| i)
                .collect();
            Some(AnchorGroup {
                name: raw.trim().to_string(),
                indices,
            })
        })
        .collect()
}

/// Removes items whose name matches any exclude term.
///
/// Multi-word terms match as case-insensitive substrings; single words
/// only match on whole-word boundaries, so `"Smith"` does not remove
/// `"Smithson"`.
pub fn apply_excludes(pool: &Pool, excludes: &[String]) -> Pool {
    let terms: Vec<&str> = excludes
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if terms.is_empty() {
        return pool.clone();
    }

    pool.retain(|item| {
        !terms.iter().any(|term| {
            if term.contains(' ') {
                item.name.to_lowercase().contains(&term.to_lowercase())
            } else {
                contains_word(&item.name, term)
            }
        })
    })
}

/// Case-insensitive whole-word containment.
fn contains_word(haystack: &str, needle: &str) -> bool {
    let haystack = haystack.to_lowercase();
    let needle = needle.to_lowercase();
    if needle.is_empty() {
        return false;
    }

    let mut from = 0;
    while let Some(pos) = haystack[from..].find(&needle) {
        let start = from + pos;
        let end = start + needle.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        // Step to the next char boundary, not the next byte.
        from = match haystack[start..].chars().next() {
            Some(c) => start + c.len_utf8(),
            None => break,
        };
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::RawItem;

    fn pool() -> Pool {
        Pool::prepare(&[
            RawItem::new("Ja'Marr Chase", "WR", 40.0, 21.0),
            RawItem::new("Trey McBride", "TE", 18.0, 13.0),
            RawItem::new("Josh Allen", "QB", 35.0, 24.0),
            RawItem::new("Keon Johnson", "WR", 3.0, 4.0),
            RawItem::new("D'Andre Johnsonville", "RB", 2.0, 3.0),
        ])
    }

    #[test]
    fn test_normalize_name_folds_and_collapses() {
        assert_eq!(normalize_name("  José   Ramírez "), "jose ramirez");
        assert_eq!(normalize_name("JA'MARR CHASE"), "ja'marr chase");
    }

    #[test]
    fn test_simplify_key_strips_punctuation() {
        assert_eq!(simplify_key("Ja'Marr Chase"), "jamarrchase");
        assert_eq!(simplify_key("D/ST - 49ers"), "dst49ers");
        assert_eq!(simplify_key("..."), "");
    }

    #[test]
    fn test_anchor_groups_substring_match() {
        let pool = pool();
        let groups = anchor_groups(&pool, &["jamarr".into(), "mcbride".into()]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].indices.len(), 1);
        assert_eq!(pool.items()[groups[0].indices[0]].name, "Ja'Marr Chase");
        assert_eq!(groups[1].indices.len(), 1);
    }

    #[test]
    fn test_anchor_groups_unmatched_is_empty() {
        let pool = pool();
        let groups = anchor_groups(&pool, &["Patrick Mahomes".into()]);

        assert_eq!(groups.len(), 1);
        assert!(groups[0].indices.is_empty());
    }

    #[test]
    fn test_anchor_groups_skips_blank() {
        let pool = pool();
        let groups = anchor_groups(&pool, &["   ".into(), "...".into(), "allen".into()]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "allen");
    }

    #[test]
    fn test_anchor_can_match_multiple_items() {
        let pool = pool();
        let groups = anchor_groups(&pool, &["johnson".into()]);

        // Both Keon Johnson and D'Andre Johnsonville contain "johnson".
        assert_eq!(groups[0].indices.len(), 2);
    }

    #[test]
    fn test_apply_excludes_whole_word() {
        let pool = pool();
        let filtered = apply_excludes(&pool, &["Johnson".into()]);

        // Whole-word: removes "Keon Johnson" but not "Johnsonville".
        let names: Vec<&str> = filtered.items().iter().map(|i| i.name.as_str()).collect();
        assert!(!names.contains(&"Keon Johnson"));
        assert!(names.contains(&"D'Andre Johnsonville"));
    }

    #[test]
    fn test_apply_excludes_multiword_substring() {
        let pool = pool();
        let filtered = apply_excludes(&pool, &["josh allen".into()]);

        assert!(filtered.items().iter().all(|i| i.name != "Josh Allen"));
        assert_eq!(filtered.len(), pool.len() - 1);
    }

    #[test]
    fn test_apply_excludes_empty_terms_is_identity() {
        let pool = pool();
        let filtered = apply_excludes(&pool, &["  ".into()]);
        assert_eq!(filtered.len(), pool.len());
    }

    #[test]
    fn test_contains_word_boundaries() {
        assert!(contains_word("Keon Johnson", "johnson"));
        assert!(!contains_word("Johnsonville", "johnson"));
        assert!(contains_word("A.J. Brown", "brown"));
    }

    #[test]
    fn test_contains_word_accented_names() {
        assert!(contains_word("José Ramírez", "josé"));
        // A term starting mid-word at a multi-byte char must not match
        // (and must not slice mid-codepoint while scanning past it).
        assert!(!contains_word("Axé", "é"));
        // A char preceding the match can be non-ASCII alphanumeric.
        assert!(!contains_word("Beyoncéx", "x"));
    }

    #[test]
    fn test_apply_excludes_accented_terms() {
        let pool = Pool::prepare(&[
            RawItem::new("José Ramírez", "RB", 12.0, 9.0),
            RawItem::new("Axé", "WR", 5.0, 6.0),
        ]);
        let filtered = apply_excludes(&pool, &["josé".to_string(), "é".to_string()]);
        let names: Vec<&str> = filtered.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Axé"], "whole-word é must not remove Axé");
    }
}
