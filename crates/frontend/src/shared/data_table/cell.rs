use contracts::shared::data_table::{parse_date_input, ColumnDecl, Row, ValueKind};

/// Text shown in a body cell.
///
/// Dates are shown as DD.MM.YYYY when they parse, anything else as stored.
/// Missing values render as an empty cell.
pub fn format_cell(row: &Row, column: &ColumnDecl) -> String {
    let Some(text) = row.text(&column.key) else {
        return String::new();
    };
    match column.kind {
        ValueKind::Date => parse_date_input(&text)
            .map(|d| d.format("%d.%m.%Y").to_string())
            .unwrap_or(text),
        ValueKind::String | ValueKind::Integer | ValueKind::Markup => text,
    }
}

pub fn column_by_key<'a>(columns: &'a [ColumnDecl], key: &str) -> Option<&'a ColumnDecl> {
    columns.iter().find(|c| c.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_format_date_cell() {
        let col = ColumnDecl::new("joined", "Дата").kind(ValueKind::Date);
        let row = Row::new().with("joined", "2024-03-15T14:02:26Z");
        assert_eq!(format_cell(&row, &col), "15.03.2024");

        let row = Row::new().with("joined", "скоро");
        assert_eq!(format_cell(&row, &col), "скоро");
    }

    #[test]
    fn test_format_missing_and_null() {
        let col = ColumnDecl::new("age", "Возраст").kind(ValueKind::Integer);
        assert_eq!(format_cell(&Row::new(), &col), "");
        assert_eq!(format_cell(&Row::new().with("age", Value::Null), &col), "");
        assert_eq!(format_cell(&Row::new().with("age", 42), &col), "42");
    }

    #[test]
    fn test_column_by_key() {
        let cols = vec![ColumnDecl::new("a", "A"), ColumnDecl::new("b", "B")];
        assert_eq!(column_by_key(&cols, "b").map(|c| c.header.as_str()), Some("B"));
        assert!(column_by_key(&cols, "c").is_none());
    }
}
