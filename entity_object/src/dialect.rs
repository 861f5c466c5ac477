//! SQL dialects
//!
//! Statement templates are written once with a generic `?` placeholder and
//! backend-neutral clauses. The [`Dialect`] turns them into what a given
//! server accepts: identifier quoting, native positional parameters and the
//! shape of the `limit` clause.

use crate::repository::Limit;
use config::Backend;
use std::borrow::Cow;
use type_mapping::SqlValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    MySql,
    Postgres,
    Sqlite,
}

impl From<Backend> for Dialect {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::MySql => Dialect::MySql,
            Backend::Postgres => Dialect::Postgres,
            Backend::Sqlite => Dialect::Sqlite,
        }
    }
}

impl Dialect {
    pub fn identifier_quote(&self) -> char {
        match self {
            Dialect::MySql => '`',
            Dialect::Postgres | Dialect::Sqlite => '"',
        }
    }

    /// Quote an identifier, doubling any embedded quote character
    pub fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(quote);
        for c in name.chars() {
            if c == quote {
                quoted.push(quote);
            }
            quoted.push(c);
        }
        quoted.push(quote);
        quoted
    }

    /// MySQL treats backslash as an escape inside string literals
    fn backslash_escapes(&self) -> bool {
        matches!(self, Dialect::MySql)
    }

    /// Byte offsets of every generic `?` placeholder, skipping quoted text and comments
    pub fn placeholder_offsets(&self, sql: &str) -> Vec<usize> {
        let bytes = sql.as_bytes();
        let mut offsets = Vec::new();
        let mut quote: Option<u8> = None;
        let mut i = 0;

        while i < bytes.len() {
            let b = bytes[i];
            match quote {
                Some(q) => {
                    if b == b'\\' && q != b'`' && self.backslash_escapes() {
                        i += 2;
                        continue;
                    }
                    if b == q {
                        quote = None;
                    }
                }
                None => match b {
                    b'\'' | b'"' | b'`' => quote = Some(b),
                    b'?' => offsets.push(i),
                    b'-' if bytes.get(i + 1) == Some(&b'-') => {
                        while i < bytes.len() && bytes[i] != b'\n' {
                            i += 1;
                        }
                        continue;
                    }
                    b'/' if bytes.get(i + 1) == Some(&b'*') => {
                        i = sql[i + 2..]
                            .find("*/")
                            .map_or(bytes.len(), |end| i + 2 + end + 2);
                        continue;
                    }
                    _ => {}
                },
            }
            i += 1;
        }

        offsets
    }

    pub fn count_placeholders(&self, sql: &str) -> usize {
        self.placeholder_offsets(sql).len()
    }

    /// Rewrite generic placeholders into the server's positional parameter syntax
    pub fn translate_placeholders<'a>(&self, sql: &'a str) -> Cow<'a, str> {
        match self {
            Dialect::MySql | Dialect::Sqlite => Cow::Borrowed(sql),
            Dialect::Postgres => {
                let offsets = self.placeholder_offsets(sql);
                if offsets.is_empty() {
                    return Cow::Borrowed(sql);
                }
                let mut native = String::with_capacity(sql.len() + offsets.len() * 2);
                let mut last = 0;
                for (index, offset) in offsets.iter().enumerate() {
                    native.push_str(&sql[last..*offset]);
                    native.push('$');
                    native.push_str(&(index + 1).to_string());
                    last = offset + 1;
                }
                native.push_str(&sql[last..]);
                Cow::Owned(native)
            }
        }
    }

    /// Column type as written in DDL
    ///
    /// The Any driver cannot decode SQLite columns declared `boolean`, so those
    /// are stored as `integer` and read back through `SqlValue::as_bool`.
    pub fn column_type<'a>(&self, sql_type: &'a str) -> &'a str {
        match self {
            Dialect::Sqlite
                if sql_type.eq_ignore_ascii_case("boolean") || sql_type.eq_ignore_ascii_case("bool") =>
            {
                "integer"
            }
            _ => sql_type,
        }
    }

    /// `limit` clause text and the arguments it binds, in binding order
    pub fn limit_clause(&self, limit: Limit) -> (&'static str, Vec<SqlValue>) {
        match (self, limit) {
            (_, Limit::Count(count)) => ("limit ?", vec![SqlValue::Int(count)]),
            (Dialect::MySql, Limit::Range { offset, count }) => (
                "limit ?, ?",
                vec![SqlValue::Int(offset), SqlValue::Int(count)],
            ),
            (Dialect::Postgres | Dialect::Sqlite, Limit::Range { offset, count }) => (
                "limit ? offset ?",
                vec![SqlValue::Int(count), SqlValue::Int(offset)],
            ),
        }
    }
}
