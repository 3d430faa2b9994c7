#[cfg(test)]
mod tests {
    use crate::{
        BasicColumn, CaseValue, RenderError, SearchedCaseBuilder, SelectBuilder,
        SimpleCaseBuilder, SpringNamedParameterStrategy, SqlTable, SqlValue, WhereSupport,
        criterion, is_equal_to, is_equal_to_when_present, is_greater_than,
        is_greater_than_when_present, is_null, or,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn searched_case_in_select_list() {
        let animals = SqlTable::new("animal_data");
        let id = animals.column("id");
        let name = animals.column("animal_name");

        let mut cb = SearchedCaseBuilder::new();
        cb.when(
            [
                criterion(&name, is_equal_to("Artic fox")),
                or(&name, is_equal_to("Red fox")),
            ],
            CaseValue::string("Fox"),
        )
        .when([criterion(&id, is_greater_than(50))], CaseValue::value(1))
        .else_(CaseValue::string("Other"));

        let mut sb = SelectBuilder::new();
        sb.select([
            BasicColumn::from(&id),
            BasicColumn::from(cb.build()).as_("kind"),
        ])
        .from(&animals)
        .where_(&id, is_null());
        let p = sb.build().render(&SpringNamedParameterStrategy::new()).unwrap();
        assert_eq!(
            p.sql(),
            "select id, case when animal_name = :p1 or animal_name = :p2 then 'Fox' when id > :p3 then :p4 else 'Other' end as kind from animal_data where id is null"
        );
        assert_eq!(p.parameters().get("p4"), Some(&SqlValue::I64(1)));
    }

    #[test]
    fn simple_case_with_values_and_conditions() {
        let t = SqlTable::new("t");
        let status = t.column("status");
        let score = t.column("score");

        let mut cb = SimpleCaseBuilder::new(&status);
        cb.when([1, 2], CaseValue::string("open"))
            .when_condition(is_greater_than(8), CaseValue::column(&score))
            .else_(CaseValue::constant("null"));

        let mut sb = SelectBuilder::new();
        sb.select([BasicColumn::from(cb.build()).as_("label")])
            .from(&t);
        let p = sb.build().render(&SpringNamedParameterStrategy::new()).unwrap();
        assert_eq!(
            p.sql(),
            "select case status when :p1, :p2 then 'open' when > :p3 then score else null end as label from t"
        );
    }

    #[test]
    fn case_without_when_is_an_error() {
        let t = SqlTable::new("t");
        let mut sb = SelectBuilder::new();
        sb.select([BasicColumn::from(SearchedCaseBuilder::new().build())])
            .from(&t);
        assert_eq!(
            sb.build().render(&SpringNamedParameterStrategy::new()),
            Err(RenderError::EmptyCase)
        );
    }

    #[test]
    fn searched_case_with_no_rendered_branch_is_an_error() {
        let t = SqlTable::new("foo");
        let id = t.column("id");

        let mut cb = SearchedCaseBuilder::new();
        cb.when(
            [criterion(&id, is_equal_to_when_present(None::<i32>))],
            CaseValue::string("one"),
        )
        .else_(CaseValue::value(0));

        let mut sb = SelectBuilder::new();
        sb.select([BasicColumn::from(cb.build()).as_("x")]).from(&t);
        assert_eq!(
            sb.build().render(&SpringNamedParameterStrategy::new()),
            Err(RenderError::EmptyCase)
        );
    }

    #[test]
    fn simple_case_with_no_rendered_branch_is_an_error() {
        let t = SqlTable::new("t");
        let status = t.column("status");

        let mut cb = SimpleCaseBuilder::new(&status);
        cb.when(Vec::<i32>::new(), CaseValue::string("none"))
            .when_condition(is_greater_than_when_present(None::<i32>), CaseValue::string("big"))
            .else_(CaseValue::string("other"));

        let mut sb = SelectBuilder::new();
        sb.select([BasicColumn::from(cb.build())]).from(&t);
        assert_eq!(
            sb.build().render(&SpringNamedParameterStrategy::new()),
            Err(RenderError::EmptyCase)
        );
    }

    #[test]
    fn skipped_branches_leave_the_rendered_ones() {
        let t = SqlTable::new("t");
        let status = t.column("status");

        let mut cb = SearchedCaseBuilder::new();
        cb.when(
            [criterion(&status, is_equal_to_when_present(None::<i32>))],
            CaseValue::string("skipped"),
        )
        .when([criterion(&status, is_equal_to(2))], CaseValue::string("two"));

        let mut sb = SelectBuilder::new();
        sb.select([BasicColumn::from(cb.build()).as_("label")]).from(&t);
        let p = sb.build().render(&SpringNamedParameterStrategy::new()).unwrap();
        assert_eq!(
            p.sql(),
            "select case when status = :p1 then 'two' end as label from t"
        );
        assert_eq!(p.parameters().len(), 1);
    }
}
