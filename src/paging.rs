//! 分页：`limit/offset` 与 `offset ... rows fetch first ... rows only` 两种互斥风格。
//!
//! 分页值与普通值一样通过 Sequence 绑定为参数，不内联到 SQL 中。

use crate::context::RenderingContext;
use crate::error::{RenderError, Result};
use crate::fragment::{FragmentAndParameters, FragmentCollector};
use crate::strategy::PagingStyle;
use crate::value::SqlValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingModel {
    LimitOffset {
        limit: Option<u64>,
        offset: Option<u64>,
    },
    FetchFirst {
        fetch_first_rows: Option<u64>,
        offset: Option<u64>,
    },
}

impl PagingModel {
    pub fn style(&self) -> PagingStyle {
        match self {
            Self::LimitOffset { .. } => PagingStyle::LimitOffset,
            Self::FetchFirst { .. } => PagingStyle::FetchFirst,
        }
    }

    pub(crate) fn render(
        &self,
        ctx: &RenderingContext<'_>,
    ) -> Result<Option<FragmentAndParameters>> {
        let strategy = ctx.strategy();
        let style = self.style();
        if !strategy.supports_paging(style) {
            tracing::warn!(
                strategy = strategy.name(),
                style = %style,
                "paging style rejected by rendering strategy"
            );
            return Err(RenderError::UnsupportedPaging {
                strategy: strategy.name(),
                style,
            });
        }

        let bind = |n: u64| ctx.bind(None, SqlValue::U64(n));
        let mut fc = FragmentCollector::new();
        match *self {
            Self::LimitOffset { limit, offset } => {
                if let Some(n) = limit {
                    fc.add(bind(n).prepend("limit "));
                }
                if let Some(n) = offset {
                    fc.add(bind(n).prepend("offset "));
                }
            }
            Self::FetchFirst {
                fetch_first_rows,
                offset,
            } => {
                if let Some(n) = offset {
                    fc.add(bind(n).prepend("offset ").map_fragment(|s| format!("{s} rows")));
                }
                if let Some(n) = fetch_first_rows {
                    fc.add(
                        bind(n)
                            .prepend("fetch first ")
                            .map_fragment(|s| format!("{s} rows only")),
                    );
                }
            }
        }
        if fc.is_empty() {
            return Ok(None);
        }
        Ok(Some(fc.join(" ")))
    }
}

/// builder 内部使用：记录最近一次选择的分页风格，`offset` 对两种风格通用。
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PagingBuilder {
    style: Option<PagingStyle>,
    rows: Option<u64>,
    offset: Option<u64>,
}

/// `limit` 与 `fetch_first` 共用同一个行数：后调用的一个同时决定行数与语法。
impl PagingBuilder {
    pub(crate) fn limit(&mut self, n: u64) {
        self.rows = Some(n);
        self.style = Some(PagingStyle::LimitOffset);
    }

    pub(crate) fn fetch_first(&mut self, n: u64) {
        self.rows = Some(n);
        self.style = Some(PagingStyle::FetchFirst);
    }

    pub(crate) fn offset(&mut self, n: u64) {
        self.offset = Some(n);
    }

    pub(crate) fn build(&self) -> Option<PagingModel> {
        match self.style {
            Some(PagingStyle::FetchFirst) => Some(PagingModel::FetchFirst {
                fetch_first_rows: self.rows,
                offset: self.offset,
            }),
            Some(PagingStyle::LimitOffset) => Some(PagingModel::LimitOffset {
                limit: self.rows,
                offset: self.offset,
            }),
            None if self.offset.is_some() => Some(PagingModel::LimitOffset {
                limit: None,
                offset: self.offset,
            }),
            None => None,
        }
    }
}
