//! 排序：`order by a.id, name DESC`。

use crate::context::RenderingContext;
use crate::table::SqlColumn;

#[derive(Debug, Clone)]
enum SortTarget {
    Column(SqlColumn),
    /// 按名称排序（通常是选择列表里的别名）。
    Name(String),
}

#[derive(Debug, Clone)]
pub struct SortSpecification {
    target: SortTarget,
    descending: bool,
}

impl SortSpecification {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            target: SortTarget::Name(name.into()),
            descending: false,
        }
    }

    pub fn descending(mut self) -> Self {
        self.descending = true;
        self
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }

    fn render(&self, ctx: &RenderingContext<'_>) -> String {
        let name = match &self.target {
            SortTarget::Column(c) => match c.alias() {
                Some(a) => a.to_string(),
                None => ctx.column_name(c),
            },
            SortTarget::Name(n) => n.clone(),
        };
        if self.descending {
            format!("{name} DESC")
        } else {
            name
        }
    }
}

impl From<SqlColumn> for SortSpecification {
    fn from(c: SqlColumn) -> Self {
        Self {
            target: SortTarget::Column(c),
            descending: false,
        }
    }
}

impl From<&SqlColumn> for SortSpecification {
    fn from(c: &SqlColumn) -> Self {
        c.clone().into()
    }
}

impl SqlColumn {
    pub fn descending(&self) -> SortSpecification {
        SortSpecification::from(self).descending()
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderByModel {
    columns: Vec<SortSpecification>,
}

impl OrderByModel {
    pub fn new(columns: Vec<SortSpecification>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[SortSpecification] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// 排序列不绑定参数，因此直接返回文本；无排序列时返回 `None`。
    pub(crate) fn render(&self, ctx: &RenderingContext<'_>) -> Option<String> {
        if self.columns.is_empty() {
            return None;
        }
        let cols: Vec<String> = self.columns.iter().map(|c| c.render(ctx)).collect();
        Some(format!("order by {}", cols.join(", ")))
    }
}
