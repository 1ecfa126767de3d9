#[cfg(test)]
mod tests {
    use indoc::indoc;
    use sqlpeek_core::{FilteredSql, MASK};

    #[test]
    fn no_placeholders() {
        let filtered = FilteredSql::new("SELECT 1 FROM DUAL");
        assert_eq!(filtered.placeholder_count(), 0);
        assert_eq!(filtered.segments().collect::<Vec<_>>(), ["SELECT 1 FROM DUAL"]);
        assert_eq!(filtered.masked(), "SELECT 1 FROM DUAL");
    }

    #[test]
    fn placeholders() {
        let filtered = FilteredSql::new("?,?");
        assert_eq!(filtered.placeholder_count(), 2);
        assert_eq!(filtered.segments().collect::<Vec<_>>(), ["", ",", ""]);

        let filtered = FilteredSql::new("");
        assert_eq!(filtered.placeholder_count(), 0);
        assert_eq!(filtered.segments().count(), 1);
    }

    #[test]
    fn literals() {
        let filtered = FilteredSql::new("SELECT '?' FROM DUAL WHERE X = ?");
        assert_eq!(filtered.placeholder_count(), 1);
        assert_eq!(
            filtered.masked(),
            format!("SELECT '{}' FROM DUAL WHERE X = ?", MASK)
        );
        let segments = filtered.segments().collect::<Vec<_>>();
        assert_eq!(segments.len(), 2);
        assert_eq!(
            FilteredSql::unmask(segments[0]),
            "SELECT '?' FROM DUAL WHERE X = "
        );

        // Doubled quotes toggle twice
        let filtered = FilteredSql::new("SELECT 'it''s ?', ?");
        assert_eq!(filtered.placeholder_count(), 1);

        let filtered = FilteredSql::new(indoc! {"
            SELECT *
            FROM T
            WHERE A = ? AND B = 'why?'
              AND C IN (?, ?)
        "});
        assert_eq!(filtered.placeholder_count(), 3);
        assert_eq!(filtered.segments().count(), 4);
    }

    #[test]
    fn unbalanced_quote() {
        // Everything after the stray quote counts as literal
        let filtered = FilteredSql::new("SELECT 'it's' ? FROM T WHERE A = ?");
        assert_eq!(filtered.placeholder_count(), 0);
        assert_eq!(
            FilteredSql::unmask(filtered.masked()),
            "SELECT 'it's' ? FROM T WHERE A = ?"
        );
    }
}
