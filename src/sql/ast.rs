use std::time::Duration;

/// A single-statement continuous query:
/// `SELECT <emitter> [EVERY ...] <projection> FROM <inputs> [WHERE <predicate>]`
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub emitter: Emitter,
    pub projection: Vec<ProjectionItem>,
    pub from: Vec<RelationInput>,
    pub where_clause: Option<Expr>,
}

/// Emitter discipline plus its emission cadence
#[derive(Debug, Clone, PartialEq)]
pub struct Emitter {
    pub kind: EmitterKind,
    /// Empty means "emit on every admission"
    pub cadence: Vec<CadenceSpec>,
}

/// How a cycle's row set is converted into an output stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitterKind {
    /// Emit the full row set of every cycle
    RStream,
    /// Emit rows new relative to the previous cycle
    IStream,
    /// Emit rows dropped relative to the previous cycle
    DStream,
}

impl EmitterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmitterKind::RStream => "RSTREAM",
            EmitterKind::IStream => "ISTREAM",
            EmitterKind::DStream => "DSTREAM",
        }
    }
}

/// One `k TUPLES [IN <relation>]` element of an EVERY clause
#[derive(Debug, Clone, PartialEq)]
pub struct CadenceSpec {
    pub count: u64,
    /// None counts arrivals on every FROM input
    pub input: Option<String>,
}

/// One item of the SELECT list
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionItem {
    /// `expr [AS name]`
    Expression { expr: Expr, alias: Option<String> },
    /// `*`: merge every side of the row binding into the output
    Wildcard,
    /// `* AS name`: nest the merged sides under one key
    AliasedWildcard(String),
}

/// One windowed input of the FROM clause
#[derive(Debug, Clone, PartialEq)]
pub struct RelationInput {
    pub name: String,
    pub alias: Option<String>,
    pub range: WindowSpec,
}

/// Retention rule for an input window
#[derive(Debug, Clone, PartialEq)]
pub enum WindowSpec {
    /// `RANGE n TUPLES`: keep the n most recently admitted tuples
    Tuples(u64),
    /// `RANGE n SECONDS`: keep tuples within the duration of the newest
    /// admitted tuple's event timestamp
    Time(Duration),
}

/// Scalar expressions for projection lists and WHERE predicates
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value
    Literal(LiteralValue),
    /// Column reference, optionally qualified by a relation alias
    Column {
        relation: Option<String>,
        name: String,
    },
    /// Binary operation: expr op expr
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    /// Unary operation: op expr
    UnaryOp { op: UnaryOperator, expr: Box<Expr> },
    /// Call into the user-defined function registry
    Function { name: String, args: Vec<Expr> },
}

/// Literal values in query text
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,

    // Comparison
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,

    // Logical
    And,
    Or,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Minus,
}
