//! 渲染结果的最小单元：SQL 片段 + 命名参数。

use crate::value::SqlValue;
use std::collections::HashMap;

/// 按插入顺序保存的参数表；插入顺序与占位符在 SQL 中出现的顺序一致。
///
/// `index` 记录 key 在 `entries` 中的位置，查找与合并都不需要扫描。
#[derive(Debug, Clone, Default)]
pub struct ParameterMap {
    entries: Vec<(String, SqlValue)>,
    index: HashMap<String, usize>,
}

impl PartialEq for ParameterMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已存在的 key 原位覆盖。
    pub fn insert(&mut self, key: impl Into<String>, value: SqlValue) {
        let key = key.into();
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn extend(&mut self, other: ParameterMap) {
        if self.entries.is_empty() {
            *self = other;
            return;
        }
        self.entries.reserve(other.entries.len());
        for (k, v) in other.entries {
            self.insert(k, v);
        }
    }

    pub fn get(&self, key: &str) -> Option<&SqlValue> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// 按占位符顺序给出值，供位置参数执行器绑定。
    pub fn values(&self) -> impl Iterator<Item = &SqlValue> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn to_hash_map(&self) -> HashMap<String, SqlValue> {
        self.entries.iter().cloned().collect()
    }
}

impl IntoIterator for ParameterMap {
    type Item = (String, SqlValue);
    type IntoIter = std::vec::IntoIter<(String, SqlValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, SqlValue)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (K, SqlValue)>>(iter: I) -> Self {
        let mut m = Self::new();
        for (k, v) in iter {
            m.insert(k, v);
        }
        m
    }
}

/// 不可变的 SQL 片段；所有组合操作都返回新值。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FragmentAndParameters {
    fragment: String,
    parameters: ParameterMap,
}

impl FragmentAndParameters {
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            parameters: ParameterMap::new(),
        }
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn parameters(&self) -> &ParameterMap {
        &self.parameters
    }

    pub fn into_parts(self) -> (String, ParameterMap) {
        (self.fragment, self.parameters)
    }

    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = fragment.into();
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: SqlValue) -> Self {
        self.parameters.insert(key, value);
        self
    }

    pub fn with_parameters(mut self, parameters: ParameterMap) -> Self {
        self.parameters.extend(parameters);
        self
    }

    pub fn map_fragment(mut self, f: impl FnOnce(String) -> String) -> Self {
        self.fragment = f(self.fragment);
        self
    }

    pub fn prepend(self, prefix: &str) -> Self {
        self.map_fragment(|s| format!("{prefix}{s}"))
    }

    /// 文本直接拼接（分隔符由调用方决定），参数表取并集。
    pub fn concat(mut self, other: FragmentAndParameters) -> Self {
        self.fragment.push_str(&other.fragment);
        self.parameters.extend(other.parameters);
        self
    }
}

/// 收集若干片段，最后按分隔符合并成一个片段。
#[derive(Debug, Default)]
pub(crate) struct FragmentCollector {
    fragments: Vec<FragmentAndParameters>,
}

impl FragmentCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, f: FragmentAndParameters) {
        self.fragments.push(f);
    }

    pub(crate) fn add_text(&mut self, s: impl Into<String>) {
        self.fragments.push(FragmentAndParameters::new(s));
    }

    pub(crate) fn add_opt(&mut self, f: Option<FragmentAndParameters>) {
        if let Some(f) = f {
            self.add(f);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// 空片段会被跳过，不产生多余的分隔符。
    pub(crate) fn join(self, sep: &str) -> FragmentAndParameters {
        let mut text = String::new();
        let mut parameters = ParameterMap::new();
        for f in self.fragments {
            let (s, p) = f.into_parts();
            if !s.is_empty() {
                if !text.is_empty() {
                    text.push_str(sep);
                }
                text.push_str(&s);
            }
            parameters.extend(p);
        }
        FragmentAndParameters {
            fragment: text,
            parameters,
        }
    }

    pub(crate) fn join_wrapped(self, sep: &str, open: &str, close: &str) -> FragmentAndParameters {
        self.join(sep).map_fragment(|s| format!("{open}{s}{close}"))
    }
}

impl FromIterator<FragmentAndParameters> for FragmentCollector {
    fn from_iter<I: IntoIterator<Item = FragmentAndParameters>>(iter: I) -> Self {
        Self {
            fragments: iter.into_iter().collect(),
        }
    }
}
