/// Type definitions of a low-level literal SQL string representation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SQL {
    pub sql: String,
    /// for logging and tests only
    pub literal_count: usize,
}

impl SQL {
    pub fn new() -> SQL {
        SQL {
            sql: String::new(),
            literal_count: 0,
        }
    }
    pub fn append_syntax(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }
    /// Splice in a literal as a bare token.
    pub fn append_literal(&mut self, literal: &str) {
        self.literal_count += 1;
        self.sql.push_str(literal);
    }
    /// Splice in a literal delimited as `$$literal$$`.
    pub fn append_dollar_quoted(&mut self, literal: &str) {
        self.literal_count += 1;
        self.sql.push_str("$$");
        self.sql.push_str(literal);
        self.sql.push_str("$$");
    }
    pub fn as_str(&self) -> &str {
        &self.sql
    }
    /// True when there is nothing worth sending.
    pub fn is_blank(&self) -> bool {
        self.sql.trim().is_empty()
    }
}

impl From<&str> for SQL {
    fn from(sql: &str) -> Self {
        SQL {
            sql: sql.to_string(),
            literal_count: 0,
        }
    }
}

impl std::fmt::Display for SQL {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.sql)
    }
}
