//! 表与列的元数据。

use crate::converter::ParameterConverter;
use crate::value::SqlValue;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// 表的身份标识；同一个 `SqlTable` 的克隆共享身份，两次 `SqlTable::new` 得到不同身份。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(u64);

#[derive(Debug, Clone)]
pub struct SqlTable {
    id: TableId,
    name: Arc<str>,
}

impl SqlTable {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            id: TableId(NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed)),
            name: Arc::from(name.as_ref()),
        }
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column(&self, name: impl Into<String>) -> SqlColumn {
        SqlColumn::new(self.clone(), name)
    }

    /// `*`，在有别名时渲染为 `a.*`。
    pub fn all_columns(&self) -> SqlColumn {
        self.column("*")
    }
}

impl PartialEq for SqlTable {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SqlTable {}

/// 列的 JDBC 类型，MyBatis 占位符中的 `jdbcType=`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    Bit,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Float,
    Real,
    Double,
    Numeric,
    Decimal,
    Char,
    Varchar,
    LongVarchar,
    Date,
    Time,
    Timestamp,
    TimestampWithTimezone,
    Binary,
    VarBinary,
    Blob,
    Clob,
    Boolean,
    Other,
}

impl SqlType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bit => "BIT",
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Float => "FLOAT",
            Self::Real => "REAL",
            Self::Double => "DOUBLE",
            Self::Numeric => "NUMERIC",
            Self::Decimal => "DECIMAL",
            Self::Char => "CHAR",
            Self::Varchar => "VARCHAR",
            Self::LongVarchar => "LONGVARCHAR",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::TimestampWithTimezone => "TIMESTAMP_WITH_TIMEZONE",
            Self::Binary => "BINARY",
            Self::VarBinary => "VARBINARY",
            Self::Blob => "BLOB",
            Self::Clob => "CLOB",
            Self::Boolean => "BOOLEAN",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 表中的一列。构造后不可变，所有 `with_*` 方法都返回新值。
#[derive(Debug, Clone)]
pub struct SqlColumn {
    name: String,
    table: SqlTable,
    sql_type: Option<SqlType>,
    type_handler: Option<String>,
    converter: Option<Box<dyn ParameterConverter>>,
    alias: Option<String>,
    qualifier: Option<String>,
}

impl SqlColumn {
    pub fn new(table: SqlTable, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table,
            sql_type: None,
            type_handler: None,
            converter: None,
            alias: None,
            qualifier: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &SqlTable {
        &self.table
    }

    pub fn sql_type(&self) -> Option<SqlType> {
        self.sql_type
    }

    pub fn type_handler(&self) -> Option<&str> {
        self.type_handler.as_deref()
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    pub fn with_sql_type(mut self, sql_type: SqlType) -> Self {
        self.sql_type = Some(sql_type);
        self
    }

    pub fn with_type_handler(mut self, handler: impl Into<String>) -> Self {
        self.type_handler = Some(handler.into());
        self
    }

    pub fn with_converter(mut self, converter: impl ParameterConverter + 'static) -> Self {
        self.converter = Some(Box::new(converter));
        self
    }

    /// 选择列表中的别名：`a.first_name as fname`。
    pub fn as_(&self, alias: impl Into<String>) -> Self {
        let mut c = self.clone();
        c.alias = Some(alias.into());
        c
    }

    /// 显式指定限定名，优先于表别名计算结果。
    pub fn qualified_with(&self, qualifier: impl Into<String>) -> Self {
        let mut c = self.clone();
        c.qualifier = Some(qualifier.into());
        c
    }

    /// 绑定到该列的值在进入参数表之前经过转换器。
    pub fn convert(&self, value: SqlValue) -> SqlValue {
        match &self.converter {
            Some(c) => c.convert(value),
            None => value,
        }
    }
}
