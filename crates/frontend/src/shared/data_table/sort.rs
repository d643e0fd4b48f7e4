use contracts::shared::data_table::{Row, SortDirection, SortState};
use feruca::Collator;
use serde_json::Value;
use std::cmp::Ordering;

/// Orders rows by the active sort; no sort leaves the input untouched.
///
/// `sort_by` is stable, so rows that compare equal keep their input order.
pub fn apply<'r>(mut rows: Vec<&'r Row>, sort: Option<&SortState>) -> Vec<&'r Row> {
    let Some(sort) = sort else {
        return rows;
    };
    let mut collator = Collator::default();
    rows.sort_by(|a, b| compare_rows(&mut collator, a, b, &sort.key, sort.direction));
    log::trace!("sort: {} rows by '{}' {:?}", rows.len(), sort.key, sort.direction);
    rows
}

pub fn compare_rows(
    collator: &mut Collator,
    a: &Row,
    b: &Row,
    key: &str,
    direction: SortDirection,
) -> Ordering {
    match (a.get(key), b.get(key)) {
        (None, None) => Ordering::Equal,
        // empty values go last in both directions
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(va), Some(vb)) => {
            let ord = compare_values(collator, va, vb, || a.text(key), || b.text(key));
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        }
    }
}

/// Numbers compare numerically, anything else by its string form.
fn compare_values(
    collator: &mut Collator,
    a: &Value,
    b: &Value,
    a_text: impl FnOnce() -> Option<String>,
    b_text: impl FnOnce() -> Option<String>,
) -> Ordering {
    if let (Value::Number(na), Value::Number(nb)) = (a, b) {
        if let (Some(x), Some(y)) = (na.as_f64(), nb.as_f64()) {
            return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
        }
    }
    locale_compare(
        collator,
        &a_text().unwrap_or_default(),
        &b_text().unwrap_or_default(),
    )
}

/// Unicode collation (CLDR root order), exact code points as tiebreak.
///
/// Root order keeps `ё` next to `е` and is case-insensitive at the
/// primary level, so "Фёдор" sorts before "Фома" and "apple" next to "Apple".
pub fn locale_compare(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b).then_with(|| a.cmp(b))
}
