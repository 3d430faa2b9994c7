//! 宏集合：把不同类型的列表达式收集成同一类型的列表，免去逐个 `.into()`。

/// 收集选择列表：`columns![&id, &name, count_all().as_("total")]`。
#[macro_export]
macro_rules! columns {
    () => {
        Vec::<$crate::BasicColumn>::new()
    };
    ($($column:expr),+ $(,)?) => {
        vec![$($crate::BasicColumn::from($column)),+]
    };
}

/// 收集排序列：`sort_specs![&name, id.descending()]`。
#[macro_export]
macro_rules! sort_specs {
    () => {
        Vec::<$crate::SortSpecification>::new()
    };
    ($($spec:expr),+ $(,)?) => {
        vec![$($crate::SortSpecification::from($spec)),+]
    };
}
