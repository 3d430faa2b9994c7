#[cfg(test)]
mod tests {
    use crate::{
        BasicColumn, CaseValue, Criterion, MultiRowInsertBuilder, SearchedCaseBuilder,
        SelectBuilder, SelectModel, SpringNamedParameterStrategy, SqlTable, StatementProvider,
        UnionBuilder, WhereSupport, count_all, criterion, is_between, is_equal_to,
        is_equal_to_column, is_greater_than, is_in, is_in_select, is_like, on,
    };
    use pretty_assertions::assert_eq;

    /// 按出现顺序取出 SQL 中的 `:pN` 占位符。
    fn placeholders(sql: &str) -> Vec<String> {
        let mut found = Vec::new();
        let bytes = sql.as_bytes();
        let mut i = 0;
        while i + 1 < bytes.len() {
            if bytes[i] == b':' && bytes[i + 1] == b'p' {
                let start = i + 1;
                let mut end = i + 2;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
                if end > i + 2 {
                    found.push(sql[start..end].to_string());
                }
                i = end;
            } else {
                i += 1;
            }
        }
        found
    }

    fn complex_select() -> SelectModel {
        let orders = SqlTable::new("orders");
        let items = SqlTable::new("items");
        let audit = SqlTable::new("audit");
        let o_id = orders.column("id");
        let o_status = orders.column("status");
        let i_order = items.column("order_id");
        let i_sku = items.column("sku");
        let a_order = audit.column("order_id");

        let mut exists_sub = SelectBuilder::new();
        exists_sub
            .select([&a_order])
            .from(&audit)
            .where_(&a_order, is_greater_than(10));

        let mut in_sub = SelectBuilder::new();
        in_sub
            .select([&i_order])
            .from(&items)
            .where_(&i_sku, is_like("A%"))
            .limit(50);

        let mut case = SearchedCaseBuilder::new();
        case.when([criterion(&o_status, is_equal_to("new"))], CaseValue::value(1))
            .else_(CaseValue::value(0));

        let mut sb = SelectBuilder::new();
        sb.select([
            BasicColumn::from(&o_id),
            BasicColumn::from(case.build()).as_("fresh"),
            count_all(),
        ])
        .from_as(&orders, "o")
        .left_join(&items, Some("i"), [on(&i_order, is_equal_to_column(&o_id))])
        .where_(&o_id, is_in_select(in_sub.build()))
        .and(&o_status, is_in(["a", "b", "c"]))
        .where_criterion(Criterion::exists(exists_sub.build()))
        .or_criterion(criterion(&o_id, is_between(1, 9)).or(criterion(&o_id, is_equal_to(99))))
        .group_by([&o_id])
        .having(count_all(), is_greater_than(2))
        .union_all()
        .select([&i_order])
        .from(&items)
        .where_(&i_sku, is_equal_to("B"));
        sb.limit(20).offset(40);
        sb.build()
    }

    fn assert_keys_match_text(p: &StatementProvider) {
        let in_text = placeholders(p.sql());
        let keys: Vec<String> = p.parameters().keys().map(str::to_string).collect();
        assert_eq!(in_text, keys);
        let mut unique = in_text.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), in_text.len());
    }

    #[test]
    fn every_key_appears_exactly_once_in_text_and_map() {
        let p = complex_select()
            .render(&SpringNamedParameterStrategy::new())
            .unwrap();
        assert_keys_match_text(&p);
        assert_eq!(p.parameters().len(), 16);
    }

    #[test]
    fn keys_stay_unique_across_multi_select() {
        let model = complex_select();
        let mut ub = UnionBuilder::new(model.clone());
        ub.union(model).limit(5);
        let p = ub
            .build()
            .render(&SpringNamedParameterStrategy::new())
            .unwrap();
        assert_keys_match_text(&p);
        assert_eq!(p.parameters().len(), 33);
    }

    #[test]
    fn rendering_twice_gives_the_same_output() {
        let model = complex_select();
        let strategy = SpringNamedParameterStrategy::new();
        let first = model.render(&strategy).unwrap();
        let second = model.render(&strategy).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn multi_row_values_clause_is_rectangular() {
        #[derive(Debug, Clone)]
        struct Row;

        let t = SqlTable::new("t");
        let a = t.column("a");
        let b = t.column("b");
        let c = t.column("c");
        let d = t.column("d");
        let mut ib = MultiRowInsertBuilder::new(vec![Row; 4]);
        ib.into_table(&t)
            .map_property(&a, "a")
            .map_null(&b)
            .map_constant(&c, "0")
            .map_property(&d, "d");
        let p = ib
            .build()
            .render(&SpringNamedParameterStrategy::new())
            .unwrap();

        let values = p.sql().split(" values ").nth(1).unwrap();
        let groups: Vec<&str> = values
            .trim_start_matches('(')
            .trim_end_matches(')')
            .split("), (")
            .collect();
        assert_eq!(groups.len(), 4);
        for (i, g) in groups.iter().enumerate() {
            let phrases: Vec<&str> = g.split(", ").collect();
            assert_eq!(phrases.len(), 4);
            assert_eq!(phrases[0], format!(":records[{i}].a"));
        }
    }
}
