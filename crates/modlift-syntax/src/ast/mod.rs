// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Abstract Syntax Tree (AST) definitions for JavaScript modules.
//!
//! These structures are designed to be ESTree-compatible where possible.
//! Module declarations carry a [`Span`] so later passes can point
//! diagnostics at the offending source.

/// AST traversal
pub mod visit;

pub use crate::lexer::Span;

/// A complete JavaScript program.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// The statements in the program
    pub body: Vec<Statement>,
}

/// An identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// The name of the identifier
    pub name: String,
}

impl Identifier {
    /// Creates an identifier with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A JavaScript statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Variable declaration (var, let, const)
    VariableDeclaration(VariableDeclaration),
    /// Function declaration (the id is always present)
    FunctionDeclaration(Function),
    /// Class declaration (the id is always present)
    ClassDeclaration(Class),
    /// Expression statement
    Expression(ExpressionStatement),
    /// Block statement { ... }
    Block(BlockStatement),
    /// If statement
    If(IfStatement),
    /// Switch statement
    Switch(SwitchStatement),
    /// While statement
    While(WhileStatement),
    /// Do-while statement
    DoWhile(DoWhileStatement),
    /// For statement
    For(ForStatement),
    /// For-in statement
    ForIn(ForInStatement),
    /// For-of statement
    ForOf(ForOfStatement),
    /// Return statement
    Return(ReturnStatement),
    /// Break statement with optional label
    Break(Option<Identifier>),
    /// Continue statement with optional label
    Continue(Option<Identifier>),
    /// Throw statement
    Throw(ThrowStatement),
    /// Try statement
    Try(TryStatement),
    /// With statement
    With(WithStatement),
    /// Labeled statement
    Labeled(LabeledStatement),
    /// Debugger statement
    Debugger,
    /// Empty statement (;)
    Empty,
    /// `import ... from "m"` or `import "m"`
    Import(ImportDeclaration),
    /// `export { ... }`, `export { ... } from "m"` or `export <declaration>`
    ExportNamed(ExportNamedDeclaration),
    /// `export default ...`
    ExportDefault(ExportDefaultDeclaration),
    /// `export * from "m"` or `export * as ns from "m"`
    ExportAll(ExportAllDeclaration),
}

impl Statement {
    /// Returns true for the four module declaration forms.
    pub fn is_module_declaration(&self) -> bool {
        matches!(
            self,
            Statement::Import(_)
                | Statement::ExportNamed(_)
                | Statement::ExportDefault(_)
                | Statement::ExportAll(_)
        )
    }
}

/// Variable declaration kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// var declaration
    Var,
    /// let declaration
    Let,
    /// const declaration
    Const,
}

impl VariableKind {
    /// The keyword introducing this declaration.
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

/// A variable declaration statement.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    /// The kind of declaration
    pub kind: VariableKind,
    /// The declarators
    pub declarations: Vec<VariableDeclarator>,
}

/// A single variable declarator.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    /// The binding target
    pub id: Pattern,
    /// Optional initializer expression
    pub init: Option<Expression>,
}

/// A function, shared by declarations, expressions and methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// The function name
    pub id: Option<Identifier>,
    /// The parameters (the last may be a rest pattern)
    pub params: Vec<Pattern>,
    /// The function body
    pub body: Vec<Statement>,
    /// Whether this is an async function
    pub is_async: bool,
    /// Whether this is a generator function
    pub is_generator: bool,
}

/// A class, shared by declarations and expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    /// The class name
    pub id: Option<Identifier>,
    /// The `extends` clause
    pub super_class: Option<Box<Expression>>,
    /// Class body members
    pub body: Vec<ClassMember>,
}

/// A member of a class body.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    /// Method, getter, setter or constructor
    Method(MethodDefinition),
    /// Field declaration
    Property(PropertyDefinition),
    /// `static { ... }`
    StaticBlock(Vec<Statement>),
}

/// A class method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDefinition {
    /// The method key
    pub key: PropertyKey,
    /// The method function (never named)
    pub value: Function,
    /// Method, getter, setter or constructor
    pub kind: MethodKind,
    /// Whether declared `static`
    pub is_static: bool,
}

/// Kinds of class methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// `constructor(...) {}`
    Constructor,
    /// Plain method
    Method,
    /// `get name() {}`
    Get,
    /// `set name(v) {}`
    Set,
}

/// A class field.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDefinition {
    /// The field key
    pub key: PropertyKey,
    /// Optional initializer
    pub value: Option<Expression>,
    /// Whether declared `static`
    pub is_static: bool,
}

/// An expression statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    /// The expression
    pub expression: Expression,
}

/// A block statement.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    /// The statements in the block
    pub body: Vec<Statement>,
}

/// An if statement.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    /// The condition
    pub test: Expression,
    /// The then branch
    pub consequent: Box<Statement>,
    /// The optional else branch
    pub alternate: Option<Box<Statement>>,
}

/// A while statement.
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    /// The condition
    pub test: Expression,
    /// The loop body
    pub body: Box<Statement>,
}

/// A for statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    /// The initializer
    pub init: Option<ForInit>,
    /// The condition
    pub test: Option<Expression>,
    /// The update expression
    pub update: Option<Expression>,
    /// The loop body
    pub body: Box<Statement>,
}

/// For loop initializer.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    /// Variable declaration
    Declaration(VariableDeclaration),
    /// Expression
    Expression(Expression),
}

/// A switch statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatement {
    /// The discriminant expression
    pub discriminant: Expression,
    /// The case clauses
    pub cases: Vec<SwitchCase>,
}

/// A switch case clause.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// The test expression (None for default)
    pub test: Option<Expression>,
    /// The consequent statements
    pub consequent: Vec<Statement>,
}

/// A do-while statement.
#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileStatement {
    /// The loop body
    pub body: Box<Statement>,
    /// The condition
    pub test: Expression,
}

/// A for-in statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ForInStatement {
    /// The left-hand side
    pub left: ForInLeft,
    /// The object to iterate over
    pub right: Expression,
    /// The loop body
    pub body: Box<Statement>,
}

/// A for-of statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ForOfStatement {
    /// The left-hand side
    pub left: ForInLeft,
    /// The iterable
    pub right: Expression,
    /// The loop body
    pub body: Box<Statement>,
    /// Whether this is `for await`
    pub is_await: bool,
}

/// Left-hand side of for-in/for-of.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInLeft {
    /// Variable declaration
    Declaration(VariableDeclaration),
    /// Assignment target expression
    Expression(Expression),
}

/// A return statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    /// The return value
    pub argument: Option<Expression>,
}

/// A throw statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrowStatement {
    /// The thrown expression
    pub argument: Expression,
}

/// A try statement.
#[derive(Debug, Clone, PartialEq)]
pub struct TryStatement {
    /// The try block
    pub block: BlockStatement,
    /// The catch clause
    pub handler: Option<CatchClause>,
    /// The finally block
    pub finalizer: Option<BlockStatement>,
}

/// A catch clause.
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    /// The error binding, absent for `catch { }`
    pub param: Option<Pattern>,
    /// The catch body
    pub body: BlockStatement,
}

/// A with statement.
#[derive(Debug, Clone, PartialEq)]
pub struct WithStatement {
    /// The object expression
    pub object: Expression,
    /// The body statement
    pub body: Box<Statement>,
}

/// A labeled statement.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledStatement {
    /// The label identifier
    pub label: Identifier,
    /// The labeled body
    pub body: Box<Statement>,
}

// ==================== Patterns ====================

/// A binding pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// `x`
    Identifier(Identifier),
    /// `{ a, b: c, ...rest }`
    Object(ObjectPattern),
    /// `[a, , b, ...rest]`
    Array(ArrayPattern),
    /// `x = default`
    Assignment(AssignmentPattern),
    /// `...x`
    Rest(Box<Pattern>),
}

impl Pattern {
    /// Appends every name this pattern binds, in source order.
    pub fn bound_names<'a>(&'a self, names: &mut Vec<&'a Identifier>) {
        match self {
            Pattern::Identifier(id) => names.push(id),
            Pattern::Object(object) => {
                for property in &object.properties {
                    property.value.bound_names(names);
                }
                if let Some(rest) = &object.rest {
                    rest.bound_names(names);
                }
            }
            Pattern::Array(array) => {
                for element in array.elements.iter().flatten() {
                    element.bound_names(names);
                }
            }
            Pattern::Assignment(assign) => assign.left.bound_names(names),
            Pattern::Rest(inner) => inner.bound_names(names),
        }
    }
}

/// An object destructuring pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPattern {
    /// The destructured properties
    pub properties: Vec<PatternProperty>,
    /// The `...rest` binding
    pub rest: Option<Box<Pattern>>,
}

/// One property of an object pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternProperty {
    /// The property key
    pub key: PropertyKey,
    /// The binding target
    pub value: Pattern,
    /// Whether written as `{ a }` or `{ a = 1 }`
    pub shorthand: bool,
}

/// An array destructuring pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPattern {
    /// The elements (None represents a hole)
    pub elements: Vec<Option<Pattern>>,
}

/// A pattern with a default value.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentPattern {
    /// The binding target
    pub left: Box<Pattern>,
    /// The default value
    pub right: Box<Expression>,
}

// ==================== Expressions ====================

/// A JavaScript expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Literal value
    Literal(Literal),
    /// Identifier reference
    Identifier(Identifier),
    /// this keyword
    This,
    /// super keyword (only valid as a callee or member object)
    Super,
    /// Array literal
    Array(ArrayExpression),
    /// Object literal
    Object(ObjectExpression),
    /// Template literal
    Template(TemplateLiteral),
    /// Tagged template
    TaggedTemplate(TaggedTemplateExpression),
    /// Binary or logical expression
    Binary(BinaryExpression),
    /// Unary expression
    Unary(UnaryExpression),
    /// Assignment expression
    Assignment(AssignmentExpression),
    /// Call expression
    Call(CallExpression),
    /// Member access expression
    Member(MemberExpression),
    /// Conditional (ternary) expression
    Conditional(ConditionalExpression),
    /// Function expression
    Function(Box<Function>),
    /// Arrow function expression
    Arrow(ArrowFunctionExpression),
    /// Class expression
    Class(Box<Class>),
    /// new expression
    New(NewExpression),
    /// Update expression (++/--)
    Update(UpdateExpression),
    /// Sequence expression (comma operator)
    Sequence(SequenceExpression),
    /// Spread element `...x` in arrays and argument lists
    Spread(Box<Expression>),
    /// await expression
    Await(Box<Expression>),
    /// yield expression
    Yield(YieldExpression),
    /// Dynamic `import(specifier)`
    Import(Box<Expression>),
    /// `new.target` or `import.meta`
    MetaProperty(MetaProperty),
}

impl Expression {
    /// Shorthand for an identifier reference.
    pub fn ident(name: impl Into<String>) -> Self {
        Expression::Identifier(Identifier::new(name))
    }

    /// Shorthand for a string literal.
    pub fn string(value: impl Into<String>) -> Self {
        Expression::Literal(Literal::String(value.into()))
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Numeric literal
    Number(f64),
    /// String literal
    String(String),
    /// Boolean literal
    Boolean(bool),
    /// null literal
    Null,
    /// BigInt literal
    BigInt(String),
    /// Regular expression literal
    RegExp { pattern: String, flags: String },
}

/// A template literal. `quasis` holds the raw text and always has exactly
/// one more entry than `expressions`.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLiteral {
    /// Raw text pieces
    pub quasis: Vec<String>,
    /// Substitutions
    pub expressions: Vec<Expression>,
}

/// A tagged template.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedTemplateExpression {
    /// The tag function
    pub tag: Box<Expression>,
    /// The template
    pub quasi: TemplateLiteral,
}

/// An array expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpression {
    /// The elements (None represents a hole)
    pub elements: Vec<Option<Expression>>,
}

/// An object expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectExpression {
    /// The properties
    pub properties: Vec<ObjectProperty>,
}

/// An entry in an object literal.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectProperty {
    /// `key: value`, shorthand, method or accessor
    Property(Property),
    /// `...source`
    Spread(Expression),
}

/// An object property.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// The property key
    pub key: PropertyKey,
    /// The property value (a function for methods and accessors)
    pub value: Expression,
    /// Plain value, method or accessor
    pub kind: PropertyKind,
    /// Whether this is shorthand syntax
    pub shorthand: bool,
}

/// Kinds of object literal properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// `key: value` or shorthand
    Init,
    /// `key() {}`
    Method,
    /// `get key() {}`
    Get,
    /// `set key(v) {}`
    Set,
}

/// A property key.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    /// Identifier key (keywords allowed)
    Identifier(Identifier),
    /// Computed key
    Computed(Box<Expression>),
    /// Literal key (e.g., numeric or string)
    Literal(Literal),
    /// Private class member `#name`
    Private(String),
}

/// A binary expression.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    /// The operator
    pub operator: BinaryOperator,
    /// The left operand
    pub left: Box<Expression>,
    /// The right operand
    pub right: Box<Expression>,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Arithmetic
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Modulo,
    /// `**`
    Exponent,
    // Comparison
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `===`
    StrictEqual,
    /// `!==`
    StrictNotEqual,
    /// `<`
    LessThan,
    /// `<=`
    LessThanEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanEqual,
    // Logical
    /// `&&`
    LogicalAnd,
    /// `||`
    LogicalOr,
    /// `??`
    NullishCoalescing,
    // Bitwise
    /// `&`
    BitwiseAnd,
    /// `|`
    BitwiseOr,
    /// `^`
    BitwiseXor,
    /// `<<`
    LeftShift,
    /// `>>`
    RightShift,
    /// `>>>`
    UnsignedRightShift,
    // Other
    /// `in`
    In,
    /// `instanceof`
    InstanceOf,
}

impl BinaryOperator {
    /// The operator's source text.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Exponent => "**",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::StrictEqual => "===",
            BinaryOperator::StrictNotEqual => "!==",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanEqual => ">=",
            BinaryOperator::LogicalAnd => "&&",
            BinaryOperator::LogicalOr => "||",
            BinaryOperator::NullishCoalescing => "??",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::LeftShift => "<<",
            BinaryOperator::RightShift => ">>",
            BinaryOperator::UnsignedRightShift => ">>>",
            BinaryOperator::In => "in",
            BinaryOperator::InstanceOf => "instanceof",
        }
    }

    /// Binding power used by both the parser and the printer.
    /// Higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOperator::NullishCoalescing => 1,
            BinaryOperator::LogicalOr => 2,
            BinaryOperator::LogicalAnd => 3,
            BinaryOperator::BitwiseOr => 4,
            BinaryOperator::BitwiseXor => 5,
            BinaryOperator::BitwiseAnd => 6,
            BinaryOperator::Equal
            | BinaryOperator::NotEqual
            | BinaryOperator::StrictEqual
            | BinaryOperator::StrictNotEqual => 7,
            BinaryOperator::LessThan
            | BinaryOperator::LessThanEqual
            | BinaryOperator::GreaterThan
            | BinaryOperator::GreaterThanEqual
            | BinaryOperator::In
            | BinaryOperator::InstanceOf => 8,
            BinaryOperator::LeftShift
            | BinaryOperator::RightShift
            | BinaryOperator::UnsignedRightShift => 9,
            BinaryOperator::Add | BinaryOperator::Subtract => 10,
            BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Modulo => 11,
            BinaryOperator::Exponent => 12,
        }
    }

    /// Returns true for `&&`, `||` and `??`.
    pub fn is_logical(self) -> bool {
        matches!(
            self,
            BinaryOperator::LogicalAnd
                | BinaryOperator::LogicalOr
                | BinaryOperator::NullishCoalescing
        )
    }
}

/// A unary expression.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    /// The operator
    pub operator: UnaryOperator,
    /// The operand
    pub argument: Box<Expression>,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// -
    Minus,
    /// +
    Plus,
    /// !
    LogicalNot,
    /// ~
    BitwiseNot,
    /// typeof
    Typeof,
    /// void
    Void,
    /// delete
    Delete,
}

impl UnaryOperator {
    /// The operator's source text.
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Minus => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::LogicalNot => "!",
            UnaryOperator::BitwiseNot => "~",
            UnaryOperator::Typeof => "typeof",
            UnaryOperator::Void => "void",
            UnaryOperator::Delete => "delete",
        }
    }
}

/// An assignment expression.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    /// The operator
    pub operator: AssignmentOperator,
    /// The left-hand side (identifier, member, or array/object literal
    /// used as a destructuring target)
    pub left: Box<Expression>,
    /// The right-hand side
    pub right: Box<Expression>,
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOperator {
    /// `=`
    Assign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubtractAssign,
    /// `*=`
    MultiplyAssign,
    /// `/=`
    DivideAssign,
    /// `%=`
    ModuloAssign,
    /// `**=`
    ExponentAssign,
    /// `<<=`
    LeftShiftAssign,
    /// `>>=`
    RightShiftAssign,
    /// `>>>=`
    UnsignedRightShiftAssign,
    /// `&=`
    BitwiseAndAssign,
    /// `|=`
    BitwiseOrAssign,
    /// `^=`
    BitwiseXorAssign,
    /// `&&=`
    LogicalAndAssign,
    /// `||=`
    LogicalOrAssign,
    /// `??=`
    NullishCoalescingAssign,
}

impl AssignmentOperator {
    /// The operator's source text.
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::AddAssign => "+=",
            AssignmentOperator::SubtractAssign => "-=",
            AssignmentOperator::MultiplyAssign => "*=",
            AssignmentOperator::DivideAssign => "/=",
            AssignmentOperator::ModuloAssign => "%=",
            AssignmentOperator::ExponentAssign => "**=",
            AssignmentOperator::LeftShiftAssign => "<<=",
            AssignmentOperator::RightShiftAssign => ">>=",
            AssignmentOperator::UnsignedRightShiftAssign => ">>>=",
            AssignmentOperator::BitwiseAndAssign => "&=",
            AssignmentOperator::BitwiseOrAssign => "|=",
            AssignmentOperator::BitwiseXorAssign => "^=",
            AssignmentOperator::LogicalAndAssign => "&&=",
            AssignmentOperator::LogicalOrAssign => "||=",
            AssignmentOperator::NullishCoalescingAssign => "??=",
        }
    }
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    /// The function being called
    pub callee: Box<Expression>,
    /// The arguments
    pub arguments: Vec<Expression>,
    /// Whether called with `?.()`
    pub optional: bool,
}

/// A member access expression.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    /// The object
    pub object: Box<Expression>,
    /// The property
    pub property: MemberProperty,
    /// Whether accessed with `?.`
    pub optional: bool,
}

/// Member property.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberProperty {
    /// Identifier property (`a.b`)
    Identifier(Identifier),
    /// Computed property expression (`a[b]`)
    Expression(Box<Expression>),
    /// Private name (`a.#b`)
    Private(String),
}

/// A conditional (ternary) expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpression {
    /// The condition
    pub test: Box<Expression>,
    /// The consequent (if true)
    pub consequent: Box<Expression>,
    /// The alternate (if false)
    pub alternate: Box<Expression>,
}

/// An arrow function expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunctionExpression {
    /// Parameters
    pub params: Vec<Pattern>,
    /// Body (expression or block)
    pub body: ArrowBody,
    /// Whether async
    pub is_async: bool,
}

/// Arrow function body.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    /// Expression body
    Expression(Box<Expression>),
    /// Block body
    Block(Vec<Statement>),
}

/// A new expression.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpression {
    /// The constructor
    pub callee: Box<Expression>,
    /// The arguments
    pub arguments: Vec<Expression>,
}

/// An update expression (++/--)
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    /// The operator
    pub operator: UpdateOperator,
    /// The operand
    pub argument: Box<Expression>,
    /// Whether prefix (++x) or postfix (x++)
    pub prefix: bool,
}

/// Update operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOperator {
    /// ++
    Increment,
    /// --
    Decrement,
}

impl UpdateOperator {
    /// The operator's source text.
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateOperator::Increment => "++",
            UpdateOperator::Decrement => "--",
        }
    }
}

/// A sequence expression (comma operator).
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceExpression {
    /// The expressions
    pub expressions: Vec<Expression>,
}

/// A yield expression.
#[derive(Debug, Clone, PartialEq)]
pub struct YieldExpression {
    /// The yielded value
    pub argument: Option<Box<Expression>>,
    /// Whether `yield*`
    pub delegate: bool,
}

/// `new.target` / `import.meta`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaProperty {
    /// `new` or `import`
    pub meta: String,
    /// `target` or `meta`
    pub property: String,
}

// ==================== Module declarations ====================

/// The name of an imported or exported binding as it appears in the
/// module interface. ES2022 allows arbitrary strings here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModuleExportName {
    /// `foo`
    Identifier(Identifier),
    /// `"foo bar"`
    String(String),
}

impl ModuleExportName {
    /// The exported name itself.
    pub fn as_str(&self) -> &str {
        match self {
            ModuleExportName::Identifier(id) => &id.name,
            ModuleExportName::String(value) => value,
        }
    }
}

/// `import ... from "source"`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDeclaration {
    /// The imported bindings, in source order (empty for `import "m"`)
    pub specifiers: Vec<ImportSpecifier>,
    /// The module specifier
    pub source: String,
    /// Location of the whole declaration
    pub span: Span,
}

/// A single import binding.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportSpecifier {
    /// `import foo from "m"`
    Default(Identifier),
    /// `import * as foo from "m"`
    Namespace(Identifier),
    /// `import { foo }` or `import { foo as bar }`
    Named {
        imported: ModuleExportName,
        local: Identifier,
    },
}

impl ImportSpecifier {
    /// The local binding introduced by this specifier.
    pub fn local(&self) -> &Identifier {
        match self {
            ImportSpecifier::Default(local)
            | ImportSpecifier::Namespace(local)
            | ImportSpecifier::Named { local, .. } => local,
        }
    }
}

/// A declaration that may follow `export`.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// `export const x = 1`
    Variable(VariableDeclaration),
    /// `export function f() {}`
    Function(Function),
    /// `export class C {}`
    Class(Class),
}

impl Declaration {
    /// Converts the declaration back into the statement it stands for.
    pub fn into_statement(self) -> Statement {
        match self {
            Declaration::Variable(decl) => Statement::VariableDeclaration(decl),
            Declaration::Function(func) => Statement::FunctionDeclaration(func),
            Declaration::Class(class) => Statement::ClassDeclaration(class),
        }
    }

    /// Every name the declaration binds, in source order.
    pub fn bound_names(&self) -> Vec<&Identifier> {
        let mut names = Vec::new();
        match self {
            Declaration::Variable(decl) => {
                for declarator in &decl.declarations {
                    declarator.id.bound_names(&mut names);
                }
            }
            Declaration::Function(func) => names.extend(func.id.as_ref()),
            Declaration::Class(class) => names.extend(class.id.as_ref()),
        }
        names
    }
}

/// `export { a, b as c }`, `export { a } from "m"` or `export <declaration>`
#[derive(Debug, Clone, PartialEq)]
pub struct ExportNamedDeclaration {
    /// The exported declaration, if any
    pub declaration: Option<Declaration>,
    /// The export list (empty when `declaration` is set)
    pub specifiers: Vec<ExportSpecifier>,
    /// Source module for re-exports
    pub source: Option<String>,
    /// Location of the whole declaration
    pub span: Span,
}

/// One entry of an export list.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSpecifier {
    /// The local (or, for re-exports, the imported) name
    pub local: ModuleExportName,
    /// The name visible to importers
    pub exported: ModuleExportName,
    /// Location of this specifier
    pub span: Span,
}

/// `export default ...`
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDefaultDeclaration {
    /// What is exported
    pub declaration: ExportDefaultKind,
    /// Location of the whole declaration
    pub span: Span,
}

/// The three shapes of a default export.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportDefaultKind {
    /// `export default function [name]() {}`
    Function(Function),
    /// `export default class [Name] {}`
    Class(Class),
    /// `export default <expression>;`
    Expression(Expression),
}

/// `export * from "m"` / `export * as ns from "m"`
#[derive(Debug, Clone, PartialEq)]
pub struct ExportAllDeclaration {
    /// The namespace name for `export * as ns`
    pub exported: Option<ModuleExportName>,
    /// The module specifier
    pub source: String,
    /// Location of the whole declaration
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident_pattern(name: &str) -> Pattern {
        Pattern::Identifier(Identifier::new(name))
    }

    #[test]
    fn test_bound_names_destructuring() {
        // { a, b: [c, ...d], e = 1, ...f }
        let pattern = Pattern::Object(ObjectPattern {
            properties: vec![
                PatternProperty {
                    key: PropertyKey::Identifier(Identifier::new("a")),
                    value: ident_pattern("a"),
                    shorthand: true,
                },
                PatternProperty {
                    key: PropertyKey::Identifier(Identifier::new("b")),
                    value: Pattern::Array(ArrayPattern {
                        elements: vec![
                            Some(ident_pattern("c")),
                            None,
                            Some(Pattern::Rest(Box::new(ident_pattern("d")))),
                        ],
                    }),
                    shorthand: false,
                },
                PatternProperty {
                    key: PropertyKey::Identifier(Identifier::new("e")),
                    value: Pattern::Assignment(AssignmentPattern {
                        left: Box::new(ident_pattern("e")),
                        right: Box::new(Expression::Literal(Literal::Number(1.0))),
                    }),
                    shorthand: true,
                },
            ],
            rest: Some(Box::new(ident_pattern("f"))),
        });

        let mut names = Vec::new();
        pattern.bound_names(&mut names);
        let names: Vec<_> = names.iter().map(|id| id.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c", "d", "e", "f"]);
    }

    #[test]
    fn test_declaration_bound_names() {
        let decl = Declaration::Function(Function {
            id: Some(Identifier::new("f")),
            params: vec![ident_pattern("x")],
            body: vec![],
            is_async: false,
            is_generator: false,
        });
        let names: Vec<_> = decl.bound_names().iter().map(|id| id.name.clone()).collect();
        assert_eq!(names, vec!["f".to_string()]);
        assert!(matches!(decl.into_statement(), Statement::FunctionDeclaration(_)));
    }

    #[test]
    fn test_binary_precedence_order() {
        assert!(BinaryOperator::Multiply.precedence() > BinaryOperator::Add.precedence());
        assert!(BinaryOperator::LogicalAnd.precedence() > BinaryOperator::LogicalOr.precedence());
        assert!(BinaryOperator::Exponent.precedence() > BinaryOperator::Multiply.precedence());
        assert!(BinaryOperator::NullishCoalescing.is_logical());
        assert!(!BinaryOperator::BitwiseOr.is_logical());
    }

    #[test]
    fn test_module_export_name() {
        let ident = ModuleExportName::Identifier(Identifier::new("x"));
        let string = ModuleExportName::String("a b".into());
        assert_eq!(ident.as_str(), "x");
        assert_eq!(string.as_str(), "a b");
    }

    #[test]
    fn test_import_specifier_local() {
        let spec = ImportSpecifier::Named {
            imported: ModuleExportName::Identifier(Identifier::new("a")),
            local: Identifier::new("b"),
        };
        assert_eq!(spec.local().name, "b");
        assert!(Statement::Import(ImportDeclaration {
            specifiers: vec![spec],
            source: "m".into(),
            span: Span::DUMMY,
        })
        .is_module_declaration());
    }
}
