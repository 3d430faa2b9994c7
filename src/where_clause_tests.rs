#[cfg(test)]
mod tests {
    use crate::{
        Criterion, PositionalStrategy, SelectBuilder, SpringNamedParameterStrategy, SqlColumn,
        SqlTable, SqlValue, StatementProvider, TableAliases, WhereBuilder, WhereSupport,
        criterion, is_equal_to, is_equal_to_when_present, is_greater_than, is_less_than, is_null,
    };
    use pretty_assertions::assert_eq;

    struct Fixture {
        table: SqlTable,
        column1: SqlColumn,
        column2: SqlColumn,
    }

    fn fixture() -> Fixture {
        let table = SqlTable::new("foo");
        Fixture {
            column1: table.column("column1"),
            column2: table.column("column2"),
            table,
        }
    }

    fn render(wb: &WhereBuilder) -> Option<StatementProvider> {
        wb.build()
            .render(&SpringNamedParameterStrategy::new())
            .unwrap()
    }

    #[test]
    fn flat_or_and_chain_has_no_implicit_grouping() {
        let f = fixture();
        let mut wb = WhereBuilder::new();
        wb.where_(&f.column1, is_equal_to("d"))
            .or(&f.column2, is_equal_to(4))
            .and(&f.column2, is_less_than(3));
        let p = render(&wb).unwrap();
        assert_eq!(
            p.sql(),
            "where column1 = :p1 or column2 = :p2 and column2 < :p3"
        );
        assert_eq!(p.parameters().get("p1"), Some(&SqlValue::from("d")));
        assert_eq!(p.parameters().get("p2"), Some(&SqlValue::I64(4)));
        assert_eq!(p.parameters().get("p3"), Some(&SqlValue::I64(3)));
    }

    #[test]
    fn declared_group_is_parenthesized_after_its_connector() {
        let f = fixture();
        let mut wb = WhereBuilder::new();
        wb.where_(&f.column1, is_equal_to("d"))
            .or(&f.column2, is_equal_to(4))
            .and_criterion(
                criterion(&f.column2, is_equal_to(6)).or(criterion(&f.column2, is_equal_to(7))),
            );
        let p = render(&wb).unwrap();
        assert_eq!(
            p.sql(),
            "where column1 = :p1 or column2 = :p2 and (column2 = :p3 or column2 = :p4)"
        );
        assert_eq!(p.parameters().len(), 4);
    }

    #[test]
    fn first_rendered_criterion_never_carries_a_connector() {
        let f = fixture();
        let mut wb = WhereBuilder::new();
        wb.where_(&f.column1, is_equal_to_when_present(None::<i64>))
            .or(&f.column1, is_equal_to_when_present(None::<i64>))
            .or(&f.column2, is_equal_to(4))
            .and(&f.column1, is_null());
        let p = render(&wb).unwrap();
        assert_eq!(p.sql(), "where column2 = :p1 and column1 is null");
    }

    #[test]
    fn where_is_omitted_when_nothing_renders() {
        let f = fixture();
        let mut wb = WhereBuilder::new();
        wb.where_(&f.column1, is_equal_to_when_present(None::<i64>))
            .and_criterion(
                Criterion::group()
                    .and(criterion(&f.column2, is_equal_to_when_present(None::<i64>))),
            );
        assert_eq!(render(&wb), None);

        let mut sb = SelectBuilder::new();
        sb.select([&f.column1])
            .from(&f.table)
            .where_(&f.column2, is_equal_to_when_present(None::<i64>));
        let p = sb.build().render(&SpringNamedParameterStrategy::new()).unwrap();
        assert_eq!(p.sql(), "select column1 from foo");
    }

    #[test]
    fn lone_fragment_is_never_parenthesized() {
        let f = fixture();
        let mut wb = WhereBuilder::new();
        wb.where_(&f.column1, is_equal_to(1)).and_criterion(
            criterion(&f.column2, is_equal_to_when_present(None::<i64>))
                .or(criterion(&f.column2, is_equal_to(7))),
        );
        let p = render(&wb).unwrap();
        assert_eq!(p.sql(), "where column1 = :p1 and column2 = :p2");
    }

    #[test]
    fn group_without_predicate_drops_first_connector() {
        let f = fixture();
        let mut wb = WhereBuilder::new();
        wb.where_(&f.column1, is_equal_to(1)).or_criterion(
            Criterion::group()
                .and(criterion(&f.column2, is_greater_than(5)))
                .or(criterion(&f.column2, is_null())),
        );
        let p = render(&wb).unwrap();
        assert_eq!(
            p.sql(),
            "where column1 = :p1 or (column2 > :p2 or column2 is null)"
        );
    }

    #[test]
    fn nested_groups_keep_their_own_parentheses() {
        let f = fixture();
        let inner =
            criterion(&f.column2, is_equal_to(2)).and(criterion(&f.column2, is_less_than(9)));
        let mut wb = WhereBuilder::new();
        wb.where_criterion(criterion(&f.column1, is_equal_to(1)).or(inner));
        let p = render(&wb).unwrap();
        assert_eq!(
            p.sql(),
            "where (column1 = :p1 or (column2 = :p2 and column2 < :p3))"
        );
    }

    #[test]
    fn not_wraps_its_criterion_once() {
        let f = fixture();
        let mut wb = WhereBuilder::new();
        wb.where_criterion(Criterion::not(
            criterion(&f.column1, is_equal_to(3)).or(criterion(&f.column1, is_equal_to(4))),
        ))
        .and_criterion(Criterion::not(criterion(&f.column2, is_null())));
        let p = render(&wb).unwrap();
        assert_eq!(
            p.sql(),
            "where not (column1 = :p1 or column1 = :p2) and not (column2 is null)"
        );
    }

    #[test]
    fn exists_renders_sub_select_with_shared_sequence() {
        let f = fixture();
        let bar = SqlTable::new("bar");
        let bar_id = bar.column("id");
        let mut sub = SelectBuilder::new();
        sub.select([&bar_id]).from(&bar).where_(&bar_id, is_equal_to(9));

        let mut wb = WhereBuilder::new();
        wb.where_(&f.column1, is_equal_to(1))
            .and_criterion(Criterion::exists(sub.build()))
            .or_criterion(Criterion::not_exists(sub.build()));
        let p = render(&wb).unwrap();
        assert_eq!(
            p.sql(),
            "where column1 = :p1 and exists (select id from bar where id = :p2) or not exists (select id from bar where id = :p3)"
        );
    }

    #[test]
    fn standalone_where_with_table_aliases() {
        let f = fixture();
        let mut aliases = TableAliases::new();
        aliases.insert(f.table.id(), "a".to_string());
        let mut wb = WhereBuilder::new();
        wb.where_(&f.column1, is_equal_to(5));
        let p = wb
            .build()
            .render_with_aliases(&SpringNamedParameterStrategy::new(), aliases)
            .unwrap()
            .unwrap();
        assert_eq!(p.sql(), "where a.column1 = :p1");
    }

    #[test]
    fn positional_strategy_keeps_keys_in_text_order() {
        let f = fixture();
        let mut wb = WhereBuilder::new();
        wb.where_(&f.column1, is_equal_to("x"))
            .and(&f.column2, is_greater_than(2));
        let p = wb.build().render(&PositionalStrategy::new()).unwrap().unwrap();
        assert_eq!(p.sql(), "where column1 = ? and column2 > ?");
        assert_eq!(
            p.parameters().values().cloned().collect::<Vec<_>>(),
            vec![SqlValue::from("x"), SqlValue::I64(2)]
        );
    }
}
