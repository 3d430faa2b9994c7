#[cfg(test)]
mod tests {
    use crate::{
        Condition, FnConverter, MyBatis3Strategy, PositionalStrategy, SelectBuilder,
        SpringNamedParameterStrategy, SqlTable, SqlType, SqlValue, StatementProvider,
        WhereBuilder, WhereSupport, is_between, is_between_when_present, is_equal_to,
        is_equal_to_column, is_equal_to_when_present, is_greater_than, is_in,
        is_in_case_insensitive, is_in_select, is_in_when_present, is_less_than_or_equal_to,
        is_like_case_insensitive, is_not_in, is_not_like, is_not_null, is_null,
    };
    use pretty_assertions::assert_eq;

    fn render(wb: &WhereBuilder) -> Option<StatementProvider> {
        wb.build()
            .render(&SpringNamedParameterStrategy::new())
            .unwrap()
    }

    fn values(p: &StatementProvider) -> Vec<SqlValue> {
        p.parameters().values().cloned().collect()
    }

    #[test]
    fn no_value_conditions_bind_nothing() {
        let foo = SqlTable::new("foo");
        let mut wb = WhereBuilder::new();
        wb.where_(foo.column("name"), is_null())
            .and(foo.column("id"), is_not_null());
        let p = render(&wb).unwrap();
        assert_eq!(p.sql(), "where name is null and id is not null");
        assert!(p.parameters().is_empty());
    }

    #[test]
    fn two_value_condition_allocates_keys_left_to_right() {
        let foo = SqlTable::new("foo");
        let mut wb = WhereBuilder::new();
        wb.where_(foo.column("id"), is_between(1, 10));
        let p = render(&wb).unwrap();
        assert_eq!(p.sql(), "where id between :p1 and :p2");
        assert_eq!(values(&p), vec![SqlValue::I64(1), SqlValue::I64(10)]);
    }

    #[test]
    fn list_condition_renders_without_spaces() {
        let foo = SqlTable::new("foo");
        let mut wb = WhereBuilder::new();
        wb.where_(foo.column("id"), is_in([4, 5, 6]))
            .and(foo.column("name"), is_not_in(["a", "b"]));
        let p = render(&wb).unwrap();
        assert_eq!(
            p.sql(),
            "where id in (:p1,:p2,:p3) and name not in (:p4,:p5)"
        );
        assert_eq!(
            p.parameters().keys().collect::<Vec<_>>(),
            vec!["p1", "p2", "p3", "p4", "p5"]
        );
    }

    #[test]
    fn explicit_empty_in_list_is_rendered() {
        let foo = SqlTable::new("foo");
        let mut wb = WhereBuilder::new();
        wb.where_(foo.column("id"), is_in(Vec::<i64>::new()));
        assert_eq!(render(&wb).unwrap().sql(), "where id in ()");
    }

    #[test]
    fn in_when_present_drops_absent_entries() {
        let foo = SqlTable::new("foo");
        let mut wb = WhereBuilder::new();
        wb.where_(foo.column("id"), is_in_when_present([Some(1), None, Some(3)]));
        let p = render(&wb).unwrap();
        assert_eq!(p.sql(), "where id in (:p1,:p2)");
        assert_eq!(values(&p), vec![SqlValue::I64(1), SqlValue::I64(3)]);

        let mut wb = WhereBuilder::new();
        wb.where_(foo.column("id"), is_in_when_present([None::<i64>, None]));
        assert_eq!(render(&wb), None);
    }

    #[test]
    fn when_present_variants_resolve_to_empty() {
        assert!(!is_equal_to_when_present(None::<i64>).should_render());
        assert!(is_equal_to_when_present(Some(3)).should_render());
        assert!(!is_between_when_present(Some(1), None::<i64>).should_render());
        assert!(is_between_when_present(Some(1), Some(2)).should_render());
        assert!(matches!(
            is_equal_to_when_present(None::<&'static str>),
            Condition::Empty
        ));
    }

    #[test]
    fn case_insensitive_like_upper_cases_column_and_value() {
        let foo = SqlTable::new("foo");
        let mut wb = WhereBuilder::new();
        wb.where_(foo.column("name"), is_like_case_insensitive("fr%"))
            .or(foo.column("name"), is_in_case_insensitive(["wilma", "Betty"]));
        let p = render(&wb).unwrap();
        assert_eq!(
            p.sql(),
            "where upper(name) like :p1 or upper(name) in (:p2,:p3)"
        );
        assert_eq!(
            values(&p),
            vec![
                SqlValue::from("FR%"),
                SqlValue::from("WILMA"),
                SqlValue::from("BETTY")
            ]
        );
    }

    #[test]
    fn map_filter_and_when_return_new_conditions() {
        let doubled = is_equal_to(3).map(|v| SqlValue::I64(v.as_i64().unwrap_or_default() * 2));
        match doubled {
            Condition::SingleValue { value, .. } => assert_eq!(value, SqlValue::I64(6)),
            other => panic!("unexpected condition {other:?}"),
        }

        assert!(!is_equal_to(3).filter(|v| v.as_i64() == Some(4)).should_render());
        assert!(is_equal_to(4).filter(|v| v.as_i64() == Some(4)).should_render());
        assert!(!is_greater_than(1).when(false).should_render());
        assert!(is_null().map(|v| v).should_render());

        match is_in([1, 2, 3, 4]).filter(|v| v.as_i64().is_some_and(|n| n % 2 == 0)) {
            Condition::ListValue { values, .. } => {
                assert_eq!(values, vec![SqlValue::I64(2), SqlValue::I64(4)])
            }
            other => panic!("unexpected condition {other:?}"),
        }
        assert!(!is_in([1, 3]).filter(|v| v.as_i64() == Some(2)).should_render());
    }

    #[test]
    fn column_comparison_binds_nothing() {
        let foo = SqlTable::new("foo");
        let mut wb = WhereBuilder::new();
        wb.where_(foo.column("low"), is_less_than_or_equal_to(5))
            .and(foo.column("low"), is_equal_to_column(foo.column("high")));
        let p = render(&wb).unwrap();
        assert_eq!(p.sql(), "where low <= :p1 and low = high");
        assert_eq!(p.parameters().len(), 1);
    }

    #[test]
    fn mybatis_placeholder_carries_column_metadata() {
        let foo = SqlTable::new("foo");
        let id = foo.column("id").with_sql_type(SqlType::Integer);
        let name = foo
            .column("name")
            .with_sql_type(SqlType::Varchar)
            .with_type_handler("example.NameHandler");
        let mut wb = WhereBuilder::new();
        wb.where_(&id, is_equal_to(3)).and(&name, is_not_like("x%"));
        let p = wb.build().render(&MyBatis3Strategy::new()).unwrap().unwrap();
        assert_eq!(
            p.sql(),
            "where id = #{parameters.p1,jdbcType=INTEGER} and name not like #{parameters.p2,jdbcType=VARCHAR,typeHandler=example.NameHandler}"
        );
    }

    #[test]
    fn column_converter_applies_to_bound_values() {
        let foo = SqlTable::new("foo");
        let active = foo.column("active").with_converter(FnConverter::new(
            "yes_no",
            |v: SqlValue| match v {
                SqlValue::Bool(true) => "Y".into(),
                SqlValue::Bool(false) => "N".into(),
                other => other,
            },
        ));
        let mut wb = WhereBuilder::new();
        wb.where_(&active, is_in([true, false]));
        let p = render(&wb).unwrap();
        assert_eq!(values(&p), vec![SqlValue::from("Y"), SqlValue::from("N")]);
    }

    #[test]
    fn subselect_shares_the_sequence() {
        let foo = SqlTable::new("foo");
        let bar = SqlTable::new("bar");
        let foo_id = foo.column("id");
        let bar_foo_id = bar.column("foo_id");
        let bar_kind = bar.column("kind");

        let mut inner = SelectBuilder::new();
        inner
            .select([&bar_foo_id])
            .from(&bar)
            .where_(&bar_kind, is_equal_to("x"));

        let mut sb = SelectBuilder::new();
        sb.select([&foo_id])
            .from(&foo)
            .where_(&foo_id, is_greater_than(2))
            .and(&foo_id, is_in_select(inner.build()))
            .and(&foo_id, is_less_than_or_equal_to(100));
        let p = sb.build().render(&SpringNamedParameterStrategy::new()).unwrap();
        assert_eq!(
            p.sql(),
            "select id from foo where id > :p1 and id in (select foo_id from bar where kind = :p2) and id <= :p3"
        );
        assert_eq!(
            values(&p),
            vec![SqlValue::I64(2), SqlValue::from("x"), SqlValue::I64(100)]
        );
    }

    #[test]
    fn large_in_list_binds_every_value() {
        let t = SqlTable::new("foo");
        let id = t.column("id");
        let mut sb = SelectBuilder::new();
        sb.select([&id]).from(&t).where_(&id, is_in(0..10_000i64));
        let p = sb.build().render(&PositionalStrategy::new()).unwrap();
        assert_eq!(p.parameters().len(), 10_000);
        assert_eq!(p.parameters().get("p1"), Some(&SqlValue::I64(0)));
        assert_eq!(p.parameters().get("p10000"), Some(&SqlValue::I64(9_999)));
        assert_eq!(p.sql().matches('?').count(), 10_000);
        assert!(p.sql().starts_with("select id from foo where id in (?,?,"));
    }
}
