//! Criterion：条件树。
//!
//! 一个 criterion 由可选的初始谓词和若干带连接词的子 criterion 组成。
//! 渲染时跳过不渲染的部分；第一个渲染出来的部分丢弃连接词；
//! 多于一个部分时整体加括号，只有一个部分时不加。

use crate::column::BasicColumn;
use crate::condition::Condition;
use crate::context::RenderingContext;
use crate::error::Result;
use crate::fragment::{FragmentAndParameters, FragmentCollector};
use crate::select::SelectModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    And,
    Or,
}

impl Connector {
    pub fn as_str(self) -> &'static str {
        match self {
            Connector::And => "and",
            Connector::Or => "or",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Predicate {
    Column {
        column: BasicColumn,
        condition: Condition,
    },
    Exists {
        select: Box<SelectModel>,
        negated: bool,
    },
    /// `not (...)`
    Not(Box<Criterion>),
}

impl Predicate {
    fn render(&self, ctx: &RenderingContext<'_>) -> Result<Option<FragmentAndParameters>> {
        match self {
            Self::Column { column, condition } => condition.render(column, ctx),
            Self::Exists { select, negated } => {
                let keyword = if *negated { "not exists" } else { "exists" };
                Ok(Some(
                    select
                        .render_fragment(ctx)?
                        .map_fragment(|s| format!("{keyword} ({s})")),
                ))
            }
            Self::Not(inner) => Ok(inner
                .render_parts(ctx)?
                .map(|(f, _)| f.map_fragment(|s| format!("not ({s})")))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Criterion {
    connector: Option<Connector>,
    predicate: Option<Predicate>,
    sub_criteria: Vec<Criterion>,
}

impl Criterion {
    pub fn new(column: impl Into<BasicColumn>, condition: Condition) -> Self {
        Self::from_predicate(Predicate::Column {
            column: column.into(),
            condition,
        })
    }

    pub fn from_predicate(predicate: Predicate) -> Self {
        Self {
            connector: None,
            predicate: Some(predicate),
            sub_criteria: Vec::new(),
        }
    }

    pub fn exists(select: SelectModel) -> Self {
        Self::from_predicate(Predicate::Exists {
            select: Box::new(select),
            negated: false,
        })
    }

    pub fn not_exists(select: SelectModel) -> Self {
        Self::from_predicate(Predicate::Exists {
            select: Box::new(select),
            negated: true,
        })
    }

    pub fn not(criterion: Criterion) -> Self {
        Self::from_predicate(Predicate::Not(Box::new(criterion)))
    }

    /// 没有初始谓词的分组，只由子 criterion 组成。
    pub fn group() -> Self {
        Self {
            connector: None,
            predicate: None,
            sub_criteria: Vec::new(),
        }
    }

    pub fn with_connector(mut self, connector: Connector) -> Self {
        self.connector = Some(connector);
        self
    }

    pub fn and(self, sub: Criterion) -> Self {
        self.with_sub(Connector::And, sub)
    }

    pub fn or(self, sub: Criterion) -> Self {
        self.with_sub(Connector::Or, sub)
    }

    fn with_sub(mut self, connector: Connector, sub: Criterion) -> Self {
        self.sub_criteria.push(sub.with_connector(connector));
        self
    }

    pub fn connector(&self) -> Option<Connector> {
        self.connector
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    pub fn sub_criteria(&self) -> &[Criterion] {
        &self.sub_criteria
    }

    /// 渲染出的各部分用连接词串起来，不加括号；返回片段及部分个数。
    fn render_parts(
        &self,
        ctx: &RenderingContext<'_>,
    ) -> Result<Option<(FragmentAndParameters, usize)>> {
        let mut parts = Vec::new();
        if let Some(p) = &self.predicate
            && let Some(f) = p.render(ctx)?
        {
            parts.push((None, f));
        }
        for sub in &self.sub_criteria {
            if let Some(f) = sub.render(ctx)? {
                parts.push((sub.connector, f));
            }
        }
        let count = parts.len();
        Ok(connect(parts).map(|f| (f, count)))
    }

    /// 渲染为一个片段（不含自身连接词）；什么都不渲染时返回 `None`。
    pub(crate) fn render(
        &self,
        ctx: &RenderingContext<'_>,
    ) -> Result<Option<FragmentAndParameters>> {
        Ok(self.render_parts(ctx)?.map(|(f, count)| {
            if count > 1 {
                f.map_fragment(|s| format!("({s})"))
            } else {
                f
            }
        }))
    }
}

/// `where` / `having` / `on` / `when` 后的顶层条件列表：各 criterion 按连接词拼接，不加外层括号。
pub(crate) fn render_criteria(
    criteria: &[Criterion],
    ctx: &RenderingContext<'_>,
) -> Result<Option<FragmentAndParameters>> {
    let mut parts = Vec::new();
    for c in criteria {
        if let Some(f) = c.render(ctx)? {
            parts.push((c.connector, f));
        }
    }
    Ok(connect(parts))
}

fn connect(
    parts: Vec<(Option<Connector>, FragmentAndParameters)>,
) -> Option<FragmentAndParameters> {
    if parts.is_empty() {
        return None;
    }
    let mut fc = FragmentCollector::new();
    for (i, (connector, f)) in parts.into_iter().enumerate() {
        if i == 0 {
            fc.add(f);
        } else {
            let connector = connector.unwrap_or(Connector::And);
            fc.add(f.prepend(&format!("{} ", connector.as_str())));
        }
    }
    Some(fc.join(" "))
}

/// 顶层条件的简写：`criterion(col, cond)`。
pub fn criterion(column: impl Into<BasicColumn>, condition: Condition) -> Criterion {
    Criterion::new(column, condition)
}

/// 带 `and` 连接词的 criterion，用于 `on` / `when` 等条件列表。
pub fn and(column: impl Into<BasicColumn>, condition: Condition) -> Criterion {
    Criterion::new(column, condition).with_connector(Connector::And)
}

pub fn or(column: impl Into<BasicColumn>, condition: Condition) -> Criterion {
    Criterion::new(column, condition).with_connector(Connector::Or)
}

/// join 的第一个 `on` 条件。
pub fn on(column: impl Into<BasicColumn>, condition: Condition) -> Criterion {
    Criterion::new(column, condition)
}
