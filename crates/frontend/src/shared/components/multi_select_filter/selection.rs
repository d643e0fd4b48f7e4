use std::collections::BTreeSet;

/// Adds or removes `option`; values outside `options` are ignored.
pub fn toggle_option(selected: &BTreeSet<String>, options: &[String], option: &str) -> BTreeSet<String> {
    let mut next = retain_known(selected, options);
    if !options.iter().any(|o| o == option) {
        return next;
    }
    if !next.remove(option) {
        next.insert(option.to_string());
    }
    next
}

/// Everything selected → nothing, otherwise → everything.
pub fn toggle_select_all(selected: &BTreeSet<String>, options: &[String]) -> BTreeSet<String> {
    if is_all_selected(selected, options) {
        BTreeSet::new()
    } else {
        options.iter().cloned().collect()
    }
}

pub fn is_all_selected(selected: &BTreeSet<String>, options: &[String]) -> bool {
    !options.is_empty() && options.iter().all(|o| selected.contains(o))
}

/// Selection without values that are no longer offered
pub fn retain_known(selected: &BTreeSet<String>, options: &[String]) -> BTreeSet<String> {
    selected
        .iter()
        .filter(|s| options.contains(s))
        .cloned()
        .collect()
}

/// Sorted distinct non-empty values, for dropdowns without a fixed option list
pub fn distinct_values<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    let set: BTreeSet<String> = values
        .into_iter()
        .flatten()
        .filter(|v| !v.is_empty())
        .collect();
    set.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["Admin".to_string(), "User".to_string(), "Guest".to_string()]
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_toggle_option() {
        let opts = options();
        let s = toggle_option(&BTreeSet::new(), &opts, "Admin");
        assert_eq!(s, set(&["Admin"]));
        let s = toggle_option(&s, &opts, "User");
        assert_eq!(s, set(&["Admin", "User"]));
        let s = toggle_option(&s, &opts, "Admin");
        assert_eq!(s, set(&["User"]));
    }

    #[test]
    fn test_toggle_unknown_option_is_ignored() {
        let opts = options();
        let s = toggle_option(&set(&["User"]), &opts, "Root");
        assert_eq!(s, set(&["User"]));
    }

    #[test]
    fn test_stale_selection_is_dropped() {
        let opts = options();
        let s = toggle_option(&set(&["Removed", "User"]), &opts, "Guest");
        assert_eq!(s, set(&["Guest", "User"]));
    }

    #[test]
    fn test_toggle_select_all() {
        let opts = options();
        let all = toggle_select_all(&set(&["User"]), &opts);
        assert!(is_all_selected(&all, &opts));
        let none = toggle_select_all(&all, &opts);
        assert!(none.is_empty());
    }

    #[test]
    fn test_is_all_selected_needs_options() {
        assert!(!is_all_selected(&BTreeSet::new(), &[]));
    }

    #[test]
    fn test_distinct_values() {
        let vals = distinct_values(vec![
            Some("User".to_string()),
            None,
            Some("Admin".to_string()),
            Some(String::new()),
            Some("User".to_string()),
        ]);
        assert_eq!(vals, vec!["Admin".to_string(), "User".to_string()]);
    }
}
