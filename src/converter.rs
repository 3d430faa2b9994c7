//! ParameterConverter：值在放入参数表之前的转换钩子（例如把领域类型转成存储表示）。

use crate::value::SqlValue;

/// 列上可选的值转换器；渲染时对该列绑定的每个值调用一次。
pub trait ParameterConverter: dyn_clone::DynClone + std::fmt::Debug + Send + Sync {
    fn convert(&self, value: SqlValue) -> SqlValue;
}

dyn_clone::clone_trait_object!(ParameterConverter);

/// 用闭包实现的转换器。
#[derive(Clone)]
pub struct FnConverter<F> {
    name: &'static str,
    f: F,
}

impl<F> FnConverter<F>
where
    F: Fn(SqlValue) -> SqlValue + Clone + Send + Sync + 'static,
{
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> std::fmt::Debug for FnConverter<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("FnConverter").field(&self.name).finish()
    }
}

impl<F> ParameterConverter for FnConverter<F>
where
    F: Fn(SqlValue) -> SqlValue + Clone + Send + Sync + 'static,
{
    fn convert(&self, value: SqlValue) -> SqlValue {
        (self.f)(value)
    }
}
