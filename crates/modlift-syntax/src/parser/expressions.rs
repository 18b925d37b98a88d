// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Expression parsing.
//!
//! Binary operators are parsed by precedence climbing over
//! [`BinaryOperator::precedence`]; everything above them (assignment,
//! conditional, arrows, `yield`) and below them (unary, postfix, calls,
//! members, primaries) is plain recursive descent.

use super::Parser;
use crate::ast::*;
use crate::error::{Error, Result};
use crate::lexer::{TokenKind, cook_template};

impl<'a> Parser<'a> {
    /// Parses an expression, including the comma operator.
    pub fn parse_expression(&mut self) -> Result<Expression> {
        let first = self.parse_assignment()?;
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }

        let mut expressions = vec![first];
        while self.eat(&TokenKind::Comma) {
            expressions.push(self.parse_assignment()?);
        }
        Ok(Expression::Sequence(SequenceExpression { expressions }))
    }

    /// Parses an AssignmentExpression: arrows, `yield`, conditionals and
    /// assignments.
    pub(super) fn parse_assignment(&mut self) -> Result<Expression> {
        self.nested(Self::parse_assignment_unbounded)
    }

    fn parse_assignment_unbounded(&mut self) -> Result<Expression> {
        if let Some(arrow) = self.try_parse_arrow()? {
            return Ok(arrow);
        }
        if self.in_generator && self.check(&TokenKind::Yield) {
            return self.parse_yield();
        }

        let left = self.parse_conditional()?;

        let Some(operator) = assignment_operator(&self.current.kind) else {
            return Ok(left);
        };
        if !is_assignment_target(&left, operator) {
            return Err(Error::syntax(
                "Invalid left-hand side in assignment",
                self.current.span,
            ));
        }
        self.advance();
        let right = self.parse_assignment()?;

        Ok(Expression::Assignment(AssignmentExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    /// Recognizes arrow function heads. On a miss nothing is consumed.
    fn try_parse_arrow(&mut self) -> Result<Option<Expression>> {
        match &self.current.kind {
            TokenKind::LeftParen => {
                let mut attempt = self.clone();
                match attempt.parse_formal_parameters() {
                    Ok(params) if attempt.arrow_follows() => {
                        *self = attempt;
                        self.parse_arrow_body(params, false).map(Some)
                    }
                    _ => Ok(None),
                }
            }
            TokenKind::Async => {
                let next = self.peek();
                if next.newline_before {
                    return Ok(None);
                }
                let mut attempt = self.clone();
                attempt.advance(); // consume 'async'
                let params = match next.kind {
                    TokenKind::LeftParen => attempt.parse_formal_parameters().ok(),
                    _ if attempt.current_identifier_name().is_some() => attempt
                        .expect_identifier()
                        .ok()
                        .map(|id| vec![Pattern::Identifier(id)]),
                    _ => None,
                };
                match params {
                    Some(params) if attempt.arrow_follows() => {
                        *self = attempt;
                        self.parse_arrow_body(params, true).map(Some)
                    }
                    _ => Ok(None),
                }
            }
            _ if self.current_identifier_name().is_some() => {
                let next = self.peek();
                if !matches!(next.kind, TokenKind::Arrow) || next.newline_before {
                    return Ok(None);
                }
                let id = self.expect_identifier()?;
                self.parse_arrow_body(vec![Pattern::Identifier(id)], false)
                    .map(Some)
            }
            _ => Ok(None),
        }
    }

    fn arrow_follows(&self) -> bool {
        self.check(&TokenKind::Arrow) && !self.current.newline_before
    }

    fn parse_arrow_body(&mut self, params: Vec<Pattern>, is_async: bool) -> Result<Expression> {
        self.expect(&TokenKind::Arrow)?;

        let saved_generator = std::mem::replace(&mut self.in_generator, false);
        let body = if self.check(&TokenKind::LeftBrace) {
            self.parse_function_body().map(ArrowBody::Block)
        } else {
            self.parse_assignment()
                .map(|expr| ArrowBody::Expression(Box::new(expr)))
        };
        self.in_generator = saved_generator;

        Ok(Expression::Arrow(ArrowFunctionExpression {
            params,
            body: body?,
            is_async,
        }))
    }

    fn parse_yield(&mut self) -> Result<Expression> {
        self.advance(); // consume 'yield'

        let delegate = !self.current.newline_before && self.eat(&TokenKind::Star);
        let has_argument = delegate
            || !(self.current.newline_before
                || matches!(
                    self.current.kind,
                    TokenKind::RightParen
                        | TokenKind::RightBracket
                        | TokenKind::RightBrace
                        | TokenKind::Comma
                        | TokenKind::Semicolon
                        | TokenKind::Colon
                        | TokenKind::Eof
                ));

        let argument = if has_argument {
            Some(Box::new(self.parse_assignment()?))
        } else {
            None
        };

        Ok(Expression::Yield(YieldExpression { argument, delegate }))
    }

    /// Parse conditional (ternary) expression: test ? consequent : alternate
    fn parse_conditional(&mut self) -> Result<Expression> {
        let test = self.parse_binary(1)?;

        if !self.eat(&TokenKind::Question) {
            return Ok(test);
        }

        let consequent = self.with_in(|p| p.parse_assignment())?;
        self.expect(&TokenKind::Colon)?;
        let alternate = self.parse_assignment()?;

        Ok(Expression::Conditional(ConditionalExpression {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        }))
    }

    /// Precedence climbing over binary and logical operators.
    fn parse_binary(&mut self, min_precedence: u8) -> Result<Expression> {
        let mut left = self.parse_unary()?;

        loop {
            let Some(operator) = binary_operator(&self.current.kind) else {
                break;
            };
            if operator == BinaryOperator::In && self.no_in {
                break;
            }
            let precedence = operator.precedence();
            if precedence < min_precedence {
                break;
            }
            self.advance();

            // `**` is right-associative
            let next_min = if operator == BinaryOperator::Exponent {
                precedence
            } else {
                precedence + 1
            };
            let right = self.nested(|p| p.parse_binary(next_min))?;

            left = Expression::Binary(BinaryExpression {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expression> {
        let update = match self.current.kind {
            TokenKind::PlusPlus => Some(UpdateOperator::Increment),
            TokenKind::MinusMinus => Some(UpdateOperator::Decrement),
            _ => None,
        };
        if let Some(operator) = update {
            let span = self.current.span;
            self.advance();
            let argument = self.nested(Self::parse_unary)?;
            if !is_simple_target(&argument) {
                return Err(Error::syntax(
                    "Invalid left-hand side expression in prefix operation",
                    span,
                ));
            }
            return Ok(Expression::Update(UpdateExpression {
                operator,
                argument: Box::new(argument),
                prefix: true,
            }));
        }

        let operator = match self.current.kind {
            TokenKind::Bang => Some(UnaryOperator::LogicalNot),
            TokenKind::Minus => Some(UnaryOperator::Minus),
            TokenKind::Plus => Some(UnaryOperator::Plus),
            TokenKind::Typeof => Some(UnaryOperator::Typeof),
            TokenKind::Void => Some(UnaryOperator::Void),
            TokenKind::Delete => Some(UnaryOperator::Delete),
            TokenKind::Tilde => Some(UnaryOperator::BitwiseNot),
            _ => None,
        };

        if let Some(operator) = operator {
            self.advance();
            let argument = self.nested(Self::parse_unary)?;
            return Ok(Expression::Unary(UnaryExpression {
                operator,
                argument: Box::new(argument),
            }));
        }

        if self.eat(&TokenKind::Await) {
            let argument = self.nested(Self::parse_unary)?;
            return Ok(Expression::Await(Box::new(argument)));
        }

        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expression> {
        let expr = self.parse_lhs()?;

        if self.current.newline_before {
            return Ok(expr);
        }
        let operator = match self.current.kind {
            TokenKind::PlusPlus => UpdateOperator::Increment,
            TokenKind::MinusMinus => UpdateOperator::Decrement,
            _ => return Ok(expr),
        };
        if !is_simple_target(&expr) {
            return Err(Error::syntax(
                "Invalid left-hand side expression in postfix operation",
                self.current.span,
            ));
        }
        self.advance();

        Ok(Expression::Update(UpdateExpression {
            operator,
            argument: Box::new(expr),
            prefix: false,
        }))
    }

    /// LeftHandSideExpression: `new`, calls, member accesses and tagged
    /// templates on top of a primary expression.
    pub(super) fn parse_lhs(&mut self) -> Result<Expression> {
        let expr = if self.check(&TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        self.parse_member_chain(expr, true)
    }

    fn parse_new(&mut self) -> Result<Expression> {
        self.advance(); // consume 'new'

        if self.eat(&TokenKind::Dot) {
            self.expect_contextual("target")?;
            return Ok(Expression::MetaProperty(MetaProperty {
                meta: "new".to_string(),
                property: "target".to_string(),
            }));
        }

        let callee = if self.check(&TokenKind::New) {
            self.nested(Self::parse_new)?
        } else {
            self.parse_primary()?
        };
        let callee = self.parse_member_chain(callee, false)?;
        let arguments = if self.check(&TokenKind::LeftParen) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };

        Ok(Expression::New(NewExpression {
            callee: Box::new(callee),
            arguments,
        }))
    }

    fn parse_member_chain(&mut self, mut expr: Expression, allow_call: bool) -> Result<Expression> {
        loop {
            match &self.current.kind {
                TokenKind::Dot => {
                    self.advance();
                    let property = self.parse_member_name()?;
                    expr = Expression::Member(MemberExpression {
                        object: Box::new(expr),
                        property,
                        optional: false,
                    });
                }
                TokenKind::QuestionDot if allow_call => {
                    self.advance();
                    expr = if self.check(&TokenKind::LeftParen) {
                        Expression::Call(CallExpression {
                            callee: Box::new(expr),
                            arguments: self.parse_arguments()?,
                            optional: true,
                        })
                    } else if self.eat(&TokenKind::LeftBracket) {
                        let property = self.with_in(|p| p.parse_expression())?;
                        self.expect(&TokenKind::RightBracket)?;
                        Expression::Member(MemberExpression {
                            object: Box::new(expr),
                            property: MemberProperty::Expression(Box::new(property)),
                            optional: true,
                        })
                    } else {
                        Expression::Member(MemberExpression {
                            object: Box::new(expr),
                            property: self.parse_member_name()?,
                            optional: true,
                        })
                    };
                }
                TokenKind::LeftBracket => {
                    self.advance();
                    let property = self.with_in(|p| p.parse_expression())?;
                    self.expect(&TokenKind::RightBracket)?;
                    expr = Expression::Member(MemberExpression {
                        object: Box::new(expr),
                        property: MemberProperty::Expression(Box::new(property)),
                        optional: false,
                    });
                }
                TokenKind::LeftParen if allow_call => {
                    let arguments = self.parse_arguments()?;
                    expr = Expression::Call(CallExpression {
                        callee: Box::new(expr),
                        arguments,
                        optional: false,
                    });
                }
                TokenKind::NoSubstitutionTemplate(_) | TokenKind::TemplateHead(_) => {
                    let quasi = self.parse_template(true)?;
                    expr = Expression::TaggedTemplate(TaggedTemplateExpression {
                        tag: Box::new(expr),
                        quasi,
                    });
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    /// The name after `.` or `?.`: any identifier name, keywords included.
    fn parse_member_name(&mut self) -> Result<MemberProperty> {
        if let TokenKind::PrivateIdentifier(name) = &self.current.kind {
            let property = MemberProperty::Private(name.clone());
            self.advance();
            return Ok(property);
        }
        match self.current_property_name() {
            Some(name) => {
                self.advance();
                Ok(MemberProperty::Identifier(Identifier { name }))
            }
            None => Err(self.unexpected_with("Expected property name")),
        }
    }

    /// Parses `( args )`, including spread arguments and a trailing comma.
    fn parse_arguments(&mut self) -> Result<Vec<Expression>> {
        self.expect(&TokenKind::LeftParen)?;
        let args = self.with_in(|p| {
            let mut args = Vec::new();
            while !p.check(&TokenKind::RightParen) {
                if p.eat(&TokenKind::Ellipsis) {
                    args.push(Expression::Spread(Box::new(p.parse_assignment()?)));
                } else {
                    args.push(p.parse_assignment()?);
                }
                if !p.eat(&TokenKind::Comma) {
                    break;
                }
            }
            Ok(args)
        })?;
        self.expect(&TokenKind::RightParen)?;
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        match &self.current.kind {
            TokenKind::Number(n) => {
                let value = *n;
                self.advance();
                Ok(Expression::Literal(Literal::Number(value)))
            }
            TokenKind::String(s) => {
                let value = s.clone();
                self.advance();
                Ok(Expression::Literal(Literal::String(value)))
            }
            TokenKind::BigInt(digits) => {
                let value = digits.clone();
                self.advance();
                Ok(Expression::Literal(Literal::BigInt(value)))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expression::Literal(Literal::Boolean(true)))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expression::Literal(Literal::Boolean(false)))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Expression::Literal(Literal::Null))
            }
            TokenKind::Slash | TokenKind::SlashEqual => {
                self.current = self.scanner.rescan_regex(&self.current);
                match &self.current.kind {
                    TokenKind::RegExp { pattern, flags } => {
                        let literal = Literal::RegExp {
                            pattern: pattern.clone(),
                            flags: flags.clone(),
                        };
                        self.advance();
                        Ok(Expression::Literal(literal))
                    }
                    _ => Err(self.unexpected()),
                }
            }
            TokenKind::NoSubstitutionTemplate(_) | TokenKind::TemplateHead(_) => {
                Ok(Expression::Template(self.parse_template(false)?))
            }
            TokenKind::This => {
                self.advance();
                Ok(Expression::This)
            }
            TokenKind::Super => {
                self.advance();
                if !matches!(
                    self.current.kind,
                    TokenKind::Dot | TokenKind::LeftBracket | TokenKind::LeftParen
                ) {
                    return Err(self.unexpected_with("'super' keyword unexpected here"));
                }
                Ok(Expression::Super)
            }
            TokenKind::Async if self.async_starts_function() => {
                self.advance(); // consume 'async'
                Ok(Expression::Function(Box::new(self.parse_function(true, false)?)))
            }
            TokenKind::Function => Ok(Expression::Function(Box::new(self.parse_function(false, false)?))),
            TokenKind::Class => Ok(Expression::Class(Box::new(self.parse_class(false)?))),
            TokenKind::Import => self.parse_import_expression(),
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.with_in(|p| p.parse_expression())?;
                self.expect(&TokenKind::RightParen)?;
                Ok(expr)
            }
            TokenKind::LeftBracket => self.parse_array_literal(),
            TokenKind::LeftBrace => self.parse_object_literal(),
            _ => match self.current_identifier_name() {
                Some(name) => {
                    self.advance();
                    Ok(Expression::Identifier(Identifier { name }))
                }
                None => Err(self.unexpected()),
            },
        }
    }

    /// `import(specifier)` or `import.meta`.
    fn parse_import_expression(&mut self) -> Result<Expression> {
        self.advance(); // consume 'import'

        if self.eat(&TokenKind::Dot) {
            self.expect_contextual("meta")?;
            return Ok(Expression::MetaProperty(MetaProperty {
                meta: "import".to_string(),
                property: "meta".to_string(),
            }));
        }

        self.expect(&TokenKind::LeftParen)?;
        let specifier = self.with_in(|p| p.parse_assignment())?;
        self.eat(&TokenKind::Comma);
        self.expect(&TokenKind::RightParen)?;
        Ok(Expression::Import(Box::new(specifier)))
    }

    /// Parses a template starting at a no-substitution or head token,
    /// rescanning each `}` as the next template part.
    ///
    /// Only a tagged template may contain escapes that do not cook.
    fn parse_template(&mut self, tagged: bool) -> Result<TemplateLiteral> {
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();

        match &self.current.kind {
            TokenKind::NoSubstitutionTemplate(raw) => {
                quasis.push(self.template_quasi(raw, tagged)?);
                self.advance();
                return Ok(TemplateLiteral {
                    quasis,
                    expressions,
                });
            }
            TokenKind::TemplateHead(raw) => {
                quasis.push(self.template_quasi(raw, tagged)?);
                self.advance();
            }
            _ => return Err(self.unexpected_with("Expected template literal")),
        }

        loop {
            expressions.push(self.with_in(|p| p.parse_expression())?);
            if !self.check(&TokenKind::RightBrace) {
                return Err(self.unexpected_with("Expected '}' after template expression"));
            }
            self.current = self.scanner.rescan_template_continuation(&self.current);
            match &self.current.kind {
                TokenKind::TemplateMiddle(raw) => {
                    quasis.push(self.template_quasi(raw, tagged)?);
                    self.advance();
                }
                TokenKind::TemplateTail(raw) => {
                    quasis.push(self.template_quasi(raw, tagged)?);
                    self.advance();
                    break;
                }
                _ => return Err(self.unexpected()),
            }
        }

        Ok(TemplateLiteral {
            quasis,
            expressions,
        })
    }

    fn template_quasi(&self, raw: &str, tagged: bool) -> Result<String> {
        if !tagged {
            cook_template(raw).map_err(|reason| Error::syntax(reason, self.current.span))?;
        }
        Ok(raw.to_string())
    }

    fn parse_array_literal(&mut self) -> Result<Expression> {
        self.advance(); // consume '['

        let elements = self.with_in(|p| {
            let mut elements = Vec::new();
            while !p.check(&TokenKind::RightBracket) {
                if p.eat(&TokenKind::Comma) {
                    elements.push(None);
                    continue;
                }
                let element = if p.eat(&TokenKind::Ellipsis) {
                    Expression::Spread(Box::new(p.parse_assignment()?))
                } else {
                    p.parse_assignment()?
                };
                elements.push(Some(element));
                if !p.check(&TokenKind::RightBracket) {
                    p.expect(&TokenKind::Comma)?;
                }
            }
            Ok(elements)
        })?;

        self.expect(&TokenKind::RightBracket)?;
        Ok(Expression::Array(ArrayExpression { elements }))
    }

    fn parse_object_literal(&mut self) -> Result<Expression> {
        self.advance(); // consume '{'

        let properties = self.with_in(|p| {
            let mut properties = Vec::new();
            while !p.check(&TokenKind::RightBrace) {
                properties.push(p.parse_object_property()?);
                if !p.check(&TokenKind::RightBrace) {
                    p.expect(&TokenKind::Comma)?;
                }
            }
            Ok(properties)
        })?;

        self.expect(&TokenKind::RightBrace)?;
        Ok(Expression::Object(ObjectExpression { properties }))
    }

    fn parse_object_property(&mut self) -> Result<ObjectProperty> {
        if self.eat(&TokenKind::Ellipsis) {
            return Ok(ObjectProperty::Spread(self.parse_assignment()?));
        }

        let modifiers = self.parse_method_modifiers();
        let shorthand_name = if modifiers.is_plain() {
            self.current_identifier_name()
        } else {
            None
        };
        let key = self.parse_property_key()?;

        if !modifiers.is_plain() || self.check(&TokenKind::LeftParen) {
            let function = self.parse_method(&modifiers)?;
            let kind = match modifiers.accessor {
                Some(MethodKind::Get) => PropertyKind::Get,
                Some(MethodKind::Set) => PropertyKind::Set,
                _ => PropertyKind::Method,
            };
            return Ok(ObjectProperty::Property(Property {
                key,
                value: Expression::Function(Box::new(function)),
                kind,
                shorthand: false,
            }));
        }

        if self.eat(&TokenKind::Colon) {
            let value = self.parse_assignment()?;
            return Ok(ObjectProperty::Property(Property {
                key,
                value,
                kind: PropertyKind::Init,
                shorthand: false,
            }));
        }

        let Some(name) = shorthand_name else {
            return Err(self.unexpected_with("Expected ':'"));
        };

        // `{ a = 1 }` is only meaningful as a destructuring target; it is
        // kept as a shorthand whose value is the default assignment.
        let value = if self.eat(&TokenKind::Equal) {
            Expression::Assignment(AssignmentExpression {
                operator: AssignmentOperator::Assign,
                left: Box::new(Expression::ident(name)),
                right: Box::new(self.parse_assignment()?),
            })
        } else {
            Expression::ident(name)
        };

        Ok(ObjectProperty::Property(Property {
            key,
            value,
            kind: PropertyKind::Init,
            shorthand: true,
        }))
    }
}

fn binary_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    let operator = match kind {
        TokenKind::Plus => BinaryOperator::Add,
        TokenKind::Minus => BinaryOperator::Subtract,
        TokenKind::Star => BinaryOperator::Multiply,
        TokenKind::Slash => BinaryOperator::Divide,
        TokenKind::Percent => BinaryOperator::Modulo,
        TokenKind::StarStar => BinaryOperator::Exponent,
        TokenKind::EqualEqual => BinaryOperator::Equal,
        TokenKind::NotEqual => BinaryOperator::NotEqual,
        TokenKind::StrictEqual => BinaryOperator::StrictEqual,
        TokenKind::StrictNotEqual => BinaryOperator::StrictNotEqual,
        TokenKind::LessThan => BinaryOperator::LessThan,
        TokenKind::LessThanEqual => BinaryOperator::LessThanEqual,
        TokenKind::GreaterThan => BinaryOperator::GreaterThan,
        TokenKind::GreaterThanEqual => BinaryOperator::GreaterThanEqual,
        TokenKind::AmpersandAmpersand => BinaryOperator::LogicalAnd,
        TokenKind::PipePipe => BinaryOperator::LogicalOr,
        TokenKind::QuestionQuestion => BinaryOperator::NullishCoalescing,
        TokenKind::Ampersand => BinaryOperator::BitwiseAnd,
        TokenKind::Pipe => BinaryOperator::BitwiseOr,
        TokenKind::Caret => BinaryOperator::BitwiseXor,
        TokenKind::LeftShift => BinaryOperator::LeftShift,
        TokenKind::RightShift => BinaryOperator::RightShift,
        TokenKind::UnsignedRightShift => BinaryOperator::UnsignedRightShift,
        TokenKind::In => BinaryOperator::In,
        TokenKind::Instanceof => BinaryOperator::InstanceOf,
        _ => return None,
    };
    Some(operator)
}

fn assignment_operator(kind: &TokenKind) -> Option<AssignmentOperator> {
    let operator = match kind {
        TokenKind::Equal => AssignmentOperator::Assign,
        TokenKind::PlusEqual => AssignmentOperator::AddAssign,
        TokenKind::MinusEqual => AssignmentOperator::SubtractAssign,
        TokenKind::StarEqual => AssignmentOperator::MultiplyAssign,
        TokenKind::SlashEqual => AssignmentOperator::DivideAssign,
        TokenKind::PercentEqual => AssignmentOperator::ModuloAssign,
        TokenKind::StarStarEqual => AssignmentOperator::ExponentAssign,
        TokenKind::LeftShiftEqual => AssignmentOperator::LeftShiftAssign,
        TokenKind::RightShiftEqual => AssignmentOperator::RightShiftAssign,
        TokenKind::UnsignedRightShiftEqual => AssignmentOperator::UnsignedRightShiftAssign,
        TokenKind::AmpersandEqual => AssignmentOperator::BitwiseAndAssign,
        TokenKind::PipeEqual => AssignmentOperator::BitwiseOrAssign,
        TokenKind::CaretEqual => AssignmentOperator::BitwiseXorAssign,
        TokenKind::AmpersandAmpersandEqual => AssignmentOperator::LogicalAndAssign,
        TokenKind::PipePipeEqual => AssignmentOperator::LogicalOrAssign,
        TokenKind::QuestionQuestionEqual => AssignmentOperator::NullishCoalescingAssign,
        _ => return None,
    };
    Some(operator)
}

/// Identifiers and non-optional member accesses.
fn is_simple_target(expr: &Expression) -> bool {
    match expr {
        Expression::Identifier(_) => true,
        Expression::Member(member) => !member.optional,
        _ => false,
    }
}

fn is_assignment_target(expr: &Expression, operator: AssignmentOperator) -> bool {
    is_simple_target(expr)
        || (operator == AssignmentOperator::Assign
            && matches!(expr, Expression::Array(_) | Expression::Object(_)))
}
