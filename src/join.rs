//! 连接：`join bar b on a.id = b.foo_id and ...`。

use crate::context::RenderingContext;
use crate::criterion::{Criterion, render_criteria};
use crate::error::Result;
use crate::fragment::{FragmentAndParameters, FragmentCollector};
use crate::select::TableSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinType {
    #[default]
    Inner,
    Left,
    Right,
    Full,
}

impl JoinType {
    pub fn as_str(self) -> &'static str {
        match self {
            JoinType::Inner => "join",
            JoinType::Left => "left join",
            JoinType::Right => "right join",
            JoinType::Full => "full join",
        }
    }
}

#[derive(Debug, Clone)]
pub struct JoinSpecification {
    join_type: JoinType,
    table: TableSource,
    criteria: Vec<Criterion>,
}

impl JoinSpecification {
    pub fn new(join_type: JoinType, table: TableSource, criteria: Vec<Criterion>) -> Self {
        Self {
            join_type,
            table,
            criteria,
        }
    }

    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    pub fn table(&self) -> &TableSource {
        &self.table
    }

    fn render(&self, ctx: &RenderingContext<'_>) -> Result<FragmentAndParameters> {
        let mut fc = FragmentCollector::new();
        fc.add_text(self.join_type.as_str());
        fc.add(self.table.render(ctx)?);
        if let Some(on) = render_criteria(&self.criteria, ctx)? {
            fc.add(on.prepend("on "));
        }
        Ok(fc.join(" "))
    }
}

#[derive(Debug, Clone, Default)]
pub struct JoinModel {
    specifications: Vec<JoinSpecification>,
}

impl JoinModel {
    pub fn new(specifications: Vec<JoinSpecification>) -> Self {
        Self { specifications }
    }

    pub fn specifications(&self) -> &[JoinSpecification] {
        &self.specifications
    }

    pub fn is_empty(&self) -> bool {
        self.specifications.is_empty()
    }

    /// 按声明顺序渲染，参数编号沿用同一个 Sequence。
    pub(crate) fn render(&self, ctx: &RenderingContext<'_>) -> Result<FragmentAndParameters> {
        let mut fc = FragmentCollector::new();
        for spec in &self.specifications {
            fc.add(spec.render(ctx)?);
        }
        Ok(fc.join(" "))
    }
}
