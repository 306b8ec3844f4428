#[cfg(test)]
mod tests {
    use crate::dialect::Dialect;
    use crate::term::{self, BuildError, Term};
    use crate::value::SqlValue;
    use crate::{Flavor, InsertBuilder};
    use pretty_assertions::assert_eq;

    fn mysql() -> InsertBuilder {
        InsertBuilder::with_flavor(Flavor::MySQL)
    }

    #[test]
    fn two_row_map_insert() {
        let mut ib = mysql();
        ib.insert_into("foo");
        ib.row([("bar", "baz"), ("john", "man")]).unwrap();
        ib.row([("bar", "bee"), ("john", "row")]).unwrap();
        let (sql, binds) = ib.build().unwrap();
        assert_eq!(
            sql,
            "INSERT INTO `foo`\n(`bar`, `john`)\nVALUES (?, ?), (?, ?)"
        );
        assert_eq!(
            binds,
            vec![
                SqlValue::String("baz".into()),
                SqlValue::String("man".into()),
                SqlValue::String("bee".into()),
                SqlValue::String("row".into()),
            ]
        );
    }

    #[test]
    fn later_rows_may_reorder_keys() {
        let mut ib = mysql();
        ib.insert_into("foo");
        ib.row([("bar", "baz"), ("john", "man")]).unwrap();
        // 后续行的键顺序无关紧要，总是投影到首行固定的列顺序上
        ib.row([("john", "row"), ("bar", "bee")]).unwrap();
        let (sql, binds) = ib.build().unwrap();
        assert_eq!(
            sql,
            "INSERT INTO `foo`\n(`bar`, `john`)\nVALUES (?, ?), (?, ?)"
        );
        assert_eq!(
            binds,
            vec![
                SqlValue::String("baz".into()),
                SqlValue::String("man".into()),
                SqlValue::String("bee".into()),
                SqlValue::String("row".into()),
            ]
        );
    }

    #[test]
    fn prefix_replaces_leading_phrase() {
        let mut ib = mysql();
        ib.insert_into("foo").prefix("INSERT IGNORE INTO");
        ib.row([("bar", "baz")]).unwrap();
        let (sql, binds) = ib.build().unwrap();
        assert_eq!(sql, "INSERT IGNORE INTO `foo`\n(`bar`)\nVALUES (?)");
        assert_eq!(binds, vec![SqlValue::String("baz".into())]);
    }

    #[test]
    fn upsert_appends_update_clause_on_mysql() {
        let mut ib = mysql();
        ib.insert_into("foo");
        ib.row([("bar", "baz"), ("john", "man")]).unwrap();
        ib.on_duplicate_key_update([("bar", "updated")]);
        let (sql, binds) = ib.build().unwrap();
        assert_eq!(
            sql,
            "INSERT INTO `foo`\n(`bar`, `john`)\nVALUES (?, ?)\nON DUPLICATE KEY UPDATE `bar` = ?"
        );
        assert_eq!(
            binds,
            vec![
                SqlValue::String("baz".into()),
                SqlValue::String("man".into()),
                SqlValue::String("updated".into()),
            ]
        );
    }

    #[test]
    fn upsert_update_cell_may_be_raw_sql() {
        let mut ib = mysql();
        ib.insert_into("foo");
        ib.row([("bar", "baz")]).unwrap();
        ib.on_duplicate_key_update([("touched_at", term::sql("NOW()"))]);
        let (sql, binds) = ib.build().unwrap();
        assert_eq!(
            sql,
            "INSERT INTO `foo`\n(`bar`)\nVALUES (?)\nON DUPLICATE KEY UPDATE `touched_at` = NOW()"
        );
        assert_eq!(binds, vec![SqlValue::String("baz".into())]);
    }

    #[test]
    fn upsert_is_rejected_on_other_dialects() {
        let mut ib = InsertBuilder::with_flavor(Flavor::PostgreSQL);
        ib.insert_into("foo");
        ib.row([("bar", "baz")]).unwrap();
        ib.on_duplicate_key_update([("bar", "updated")]);
        let err = ib.build().unwrap_err();
        assert_eq!(
            err,
            BuildError::UpsertUnsupported("PostgreSQL".to_string())
        );
    }

    #[test]
    fn cells_interleave_raw_and_bound_values() {
        let mut ib = mysql();
        ib.insert_into("t");
        ib.row([
            ("a", Term::from(1_i64)),
            ("b", term::sql("NOW()")),
            ("c", term::sql_with("COALESCE(?, 0)", [7_i64])),
            ("d", Term::from("x")),
        ])
        .unwrap();
        let (sql, binds) = ib.build().unwrap();
        assert_eq!(
            sql,
            "INSERT INTO `t`\n(`a`, `b`, `c`, `d`)\nVALUES (?, NOW(), COALESCE(?, 0), ?)"
        );
        assert_eq!(
            binds,
            vec![
                SqlValue::I64(1),
                SqlValue::I64(7),
                SqlValue::String("x".into()),
            ]
        );
    }

    #[test]
    fn null_cell_binds_sql_null() {
        let mut ib = mysql();
        ib.insert_into("t").cols(["a", "b"]);
        ib.values([Term::from(None::<i64>), Term::from(2_i64)]);
        let (sql, binds) = ib.build().unwrap();
        // 单元格是位置化的值槽，Null 照常占一个 `?`，由驱动绑定为 NULL
        assert_eq!(sql, "INSERT INTO `t`\n(`a`, `b`)\nVALUES (?, ?)");
        assert_eq!(binds, vec![SqlValue::Null, SqlValue::I64(2)]);
    }

    #[test]
    fn parallel_cols_values_form() {
        let mut ib = mysql();
        ib.insert_into("t").cols(["a", "b"]);
        ib.values([1_i64, 2]).values([3_i64, 4]);
        let (sql, binds) = ib.build().unwrap();
        assert_eq!(sql, "INSERT INTO `t`\n(`a`, `b`)\nVALUES (?, ?), (?, ?)");
        assert_eq!(
            binds,
            vec![
                SqlValue::I64(1),
                SqlValue::I64(2),
                SqlValue::I64(3),
                SqlValue::I64(4),
            ]
        );
    }

    #[test]
    fn row_missing_column_fails_fast() {
        let mut ib = mysql();
        ib.insert_into("foo");
        ib.row([("bar", "baz"), ("john", "man")]).unwrap();
        let err = ib.row([("bar", "bee")]).unwrap_err();
        assert_eq!(
            err,
            BuildError::MissingRowColumn {
                row: 1,
                column: "john".to_string(),
            }
        );
    }

    #[test]
    fn row_unknown_column_fails_fast() {
        let mut ib = mysql();
        ib.insert_into("foo");
        ib.row([("bar", "baz")]).unwrap();
        let err = ib.row([("bar", "bee"), ("extra", "x")]).unwrap_err();
        assert_eq!(
            err,
            BuildError::UnknownRowColumn {
                row: 1,
                column: "extra".to_string(),
            }
        );
    }

    #[test]
    fn empty_row_set_is_an_error() {
        let mut ib = mysql();
        ib.insert_into("foo").cols(["bar"]);
        assert_eq!(ib.build().unwrap_err(), BuildError::EmptyRows);
    }

    #[test]
    fn missing_table_is_an_error() {
        let mut ib = mysql();
        ib.cols(["bar"]).values(["baz"]);
        assert_eq!(ib.build().unwrap_err(), BuildError::MissingTable);
    }

    #[test]
    fn values_without_cols_is_an_error() {
        let mut ib = mysql();
        ib.insert_into("foo").values(["baz"]);
        assert_eq!(ib.build().unwrap_err(), BuildError::MissingCols);
    }

    #[test]
    fn row_arity_mismatch_is_an_error() {
        let mut ib = mysql();
        ib.insert_into("foo").cols(["a", "b"]);
        ib.values([1_i64]);
        assert_eq!(
            ib.build().unwrap_err(),
            BuildError::RowArity {
                row: 0,
                got: 1,
                expected: 2,
            }
        );
    }

    #[test]
    fn condition_term_is_not_a_valid_cell() {
        let mut ib = mysql();
        ib.insert_into("foo").cols(["a"]);
        ib.values([term::in_list([1_i64, 2])]);
        assert_eq!(ib.build().unwrap_err(), BuildError::InvalidCellTerm);
    }

    #[derive(Debug, Clone)]
    struct SingleLine;

    impl Dialect for SingleLine {
        fn quote(&self, ident: &str) -> String {
            format!("`{ident}`")
        }

        fn line_separator(&self) -> &str {
            " "
        }

        fn supports_on_duplicate_key(&self) -> bool {
            true
        }
    }

    #[test]
    fn line_separator_is_cosmetic_only() {
        let mut ib = InsertBuilder::with_dialect(Box::new(SingleLine));
        ib.insert_into("foo");
        ib.row([("bar", "baz")]).unwrap();
        ib.on_duplicate_key_update([("bar", "updated")]);
        let (sql, binds) = ib.build().unwrap();
        assert_eq!(
            sql,
            "INSERT INTO `foo` (`bar`) VALUES (?) ON DUPLICATE KEY UPDATE `bar` = ?"
        );
        assert_eq!(binds.len(), 2);
        assert_eq!(sql.matches('?').count(), binds.len());
    }
}
