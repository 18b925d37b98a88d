// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Functions, classes and binding patterns.

use super::Parser;
use crate::ast::*;
use crate::error::{Error, Result};
use crate::lexer::TokenKind;

/// Prefixes that turn an object or class key into a method.
#[derive(Debug, Default)]
pub(super) struct MethodModifiers {
    pub is_async: bool,
    pub is_generator: bool,
    /// `get` or `set`
    pub accessor: Option<MethodKind>,
}

impl MethodModifiers {
    pub fn is_plain(&self) -> bool {
        !self.is_async && !self.is_generator && self.accessor.is_none()
    }
}

impl<'a> Parser<'a> {
    /// Parses `function [*] name(params) { body }`. The caller consumes a
    /// leading `async`.
    pub(super) fn parse_function(&mut self, is_async: bool, require_name: bool) -> Result<Function> {
        self.expect(&TokenKind::Function)?;
        let is_generator = self.eat(&TokenKind::Star);

        let id = if require_name || self.current_identifier_name().is_some() {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let (params, body) = self.parse_function_rest(is_generator)?;

        Ok(Function {
            id,
            params,
            body,
            is_async,
            is_generator,
        })
    }

    /// Parameters and body, with `yield` scoped to the function.
    fn parse_function_rest(&mut self, is_generator: bool) -> Result<(Vec<Pattern>, Vec<Statement>)> {
        self.with_generator(is_generator, |p| {
            let params = p.parse_formal_parameters()?;
            let body = p.parse_function_body()?;
            Ok((params, body))
        })
    }

    fn with_generator<T>(
        &mut self,
        in_generator: bool,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let saved = std::mem::replace(&mut self.in_generator, in_generator);
        let result = f(self);
        self.in_generator = saved;
        result
    }

    /// Parses `( a, b = 1, { c }, ...rest )`.
    pub(super) fn parse_formal_parameters(&mut self) -> Result<Vec<Pattern>> {
        self.expect(&TokenKind::LeftParen)?;

        let params = self.with_in(|p| {
            let mut params = Vec::new();
            while !p.check(&TokenKind::RightParen) {
                if p.eat(&TokenKind::Ellipsis) {
                    params.push(Pattern::Rest(Box::new(p.parse_binding_target()?)));
                    // rest must be last
                    break;
                }
                params.push(p.parse_binding_element()?);
                if !p.eat(&TokenKind::Comma) {
                    break;
                }
            }
            Ok(params)
        })?;

        self.expect(&TokenKind::RightParen)?;
        Ok(params)
    }

    /// Parses `{ statements }` as a function body.
    pub(super) fn parse_function_body(&mut self) -> Result<Vec<Statement>> {
        self.with_in(|p| p.parse_block()).map(|block| block.body)
    }

    /// A binding target with an optional default value.
    fn parse_binding_element(&mut self) -> Result<Pattern> {
        let target = self.parse_binding_target()?;
        if !self.eat(&TokenKind::Equal) {
            return Ok(target);
        }
        let default = self.parse_assignment()?;
        Ok(Pattern::Assignment(AssignmentPattern {
            left: Box::new(target),
            right: Box::new(default),
        }))
    }

    /// An identifier, object pattern or array pattern.
    pub(super) fn parse_binding_target(&mut self) -> Result<Pattern> {
        match self.current.kind {
            TokenKind::LeftBrace => self.nested(Self::parse_object_pattern),
            TokenKind::LeftBracket => self.nested(Self::parse_array_pattern),
            _ => match self.current_identifier_name() {
                Some(_) => Ok(Pattern::Identifier(self.expect_identifier()?)),
                None => Err(self.unexpected_with("Expected binding name or pattern")),
            },
        }
    }

    fn parse_object_pattern(&mut self) -> Result<Pattern> {
        self.advance(); // consume '{'

        let mut properties = Vec::new();
        let mut rest = None;

        while !self.check(&TokenKind::RightBrace) {
            if self.eat(&TokenKind::Ellipsis) {
                rest = Some(Box::new(self.parse_binding_target()?));
                break;
            }

            let shorthand_name = self.current_identifier_name();
            let key = self.parse_property_key()?;

            let property = if self.eat(&TokenKind::Colon) {
                PatternProperty {
                    key,
                    value: self.parse_binding_element()?,
                    shorthand: false,
                }
            } else if let Some(name) = shorthand_name {
                let mut value = Pattern::Identifier(Identifier { name });
                if self.eat(&TokenKind::Equal) {
                    value = Pattern::Assignment(AssignmentPattern {
                        left: Box::new(value),
                        right: Box::new(self.parse_assignment()?),
                    });
                }
                PatternProperty {
                    key,
                    value,
                    shorthand: true,
                }
            } else {
                return Err(self.unexpected_with("Expected ':' in object pattern"));
            };
            properties.push(property);

            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        self.expect(&TokenKind::RightBrace)?;
        Ok(Pattern::Object(ObjectPattern { properties, rest }))
    }

    fn parse_array_pattern(&mut self) -> Result<Pattern> {
        self.advance(); // consume '['

        let mut elements = Vec::new();
        while !self.check(&TokenKind::RightBracket) {
            if self.eat(&TokenKind::Comma) {
                elements.push(None);
                continue;
            }
            if self.eat(&TokenKind::Ellipsis) {
                elements.push(Some(Pattern::Rest(Box::new(self.parse_binding_target()?))));
                break;
            }
            elements.push(Some(self.parse_binding_element()?));
            if !self.check(&TokenKind::RightBracket) {
                self.expect(&TokenKind::Comma)?;
            }
        }

        self.expect(&TokenKind::RightBracket)?;
        Ok(Pattern::Array(ArrayPattern { elements }))
    }

    /// A property name in an object literal, pattern or class body.
    pub(super) fn parse_property_key(&mut self) -> Result<PropertyKey> {
        let key = match &self.current.kind {
            TokenKind::String(value) => PropertyKey::Literal(Literal::String(value.clone())),
            TokenKind::Number(value) => PropertyKey::Literal(Literal::Number(*value)),
            TokenKind::BigInt(digits) => PropertyKey::Literal(Literal::BigInt(digits.clone())),
            TokenKind::PrivateIdentifier(name) => PropertyKey::Private(name.clone()),
            TokenKind::LeftBracket => {
                self.advance();
                let expr = self.with_in(|p| p.parse_assignment())?;
                self.expect(&TokenKind::RightBracket)?;
                return Ok(PropertyKey::Computed(Box::new(expr)));
            }
            _ => match self.current_property_name() {
                Some(name) => PropertyKey::Identifier(Identifier { name }),
                None => return Err(self.unexpected_with("Expected property name")),
            },
        };
        self.advance();
        Ok(key)
    }

    /// Reads `async`, `*`, `get` and `set` ahead of a method key. Each
    /// is only a modifier when a key follows it; `{ get: 1 }` and
    /// `{ async() {} }` use them as plain names.
    pub(super) fn parse_method_modifiers(&mut self) -> MethodModifiers {
        let mut modifiers = MethodModifiers::default();

        if self.check(&TokenKind::Async) && self.modifier_applies(false) {
            self.advance();
            modifiers.is_async = true;
        }
        if self.eat(&TokenKind::Star) {
            modifiers.is_generator = true;
        }
        if modifiers.is_plain() {
            let accessor = if self.check_identifier("get") {
                Some(MethodKind::Get)
            } else if self.check_identifier("set") {
                Some(MethodKind::Set)
            } else {
                None
            };
            if accessor.is_some() && self.modifier_applies(true) {
                self.advance();
                modifiers.accessor = accessor;
            }
        }

        modifiers
    }

    fn modifier_applies(&self, newline_allowed: bool) -> bool {
        let next = self.peek();
        if next.newline_before && !newline_allowed {
            return false;
        }
        !matches!(
            next.kind,
            TokenKind::LeftParen
                | TokenKind::Colon
                | TokenKind::Comma
                | TokenKind::RightBrace
                | TokenKind::Equal
                | TokenKind::Semicolon
                | TokenKind::Eof
        )
    }

    /// The parameters and body of a method whose key was just parsed.
    pub(super) fn parse_method(&mut self, modifiers: &MethodModifiers) -> Result<Function> {
        let (params, body) = self.parse_function_rest(modifiers.is_generator)?;
        match modifiers.accessor {
            Some(MethodKind::Get) if !params.is_empty() => {
                return Err(Error::syntax(
                    "Getter must not have any formal parameters",
                    self.previous.span,
                ));
            }
            Some(MethodKind::Set) if params.len() != 1 => {
                return Err(Error::syntax(
                    "Setter must have exactly one formal parameter",
                    self.previous.span,
                ));
            }
            _ => {}
        }
        Ok(Function {
            id: None,
            params,
            body,
            is_async: modifiers.is_async,
            is_generator: modifiers.is_generator,
        })
    }

    /// Parses `class [Name] [extends Base] { members }`.
    pub(super) fn parse_class(&mut self, require_name: bool) -> Result<Class> {
        self.expect(&TokenKind::Class)?;

        let id = if require_name || self.current_identifier_name().is_some() {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let super_class = if self.eat(&TokenKind::Extends) {
            Some(Box::new(self.parse_lhs()?))
        } else {
            None
        };

        self.expect(&TokenKind::LeftBrace)?;
        let body = self.with_in(|p| {
            let mut body = Vec::new();
            while !p.check(&TokenKind::RightBrace) && !p.is_at_end() {
                if let Some(member) = p.parse_class_member()? {
                    body.push(member);
                }
            }
            Ok(body)
        })?;
        self.expect(&TokenKind::RightBrace)?;

        Ok(Class {
            id,
            super_class,
            body,
        })
    }

    fn parse_class_member(&mut self) -> Result<Option<ClassMember>> {
        if self.eat(&TokenKind::Semicolon) {
            return Ok(None);
        }

        let mut is_static = false;
        if self.check(&TokenKind::Static) && self.modifier_applies(true) {
            self.advance(); // consume 'static'
            if self.check(&TokenKind::LeftBrace) {
                let body = self.with_generator(false, |p| p.parse_function_body())?;
                return Ok(Some(ClassMember::StaticBlock(body)));
            }
            is_static = true;
        }

        let modifiers = self.parse_method_modifiers();
        let key = self.parse_property_key()?;

        if !modifiers.is_plain() || self.check(&TokenKind::LeftParen) {
            let value = self.parse_method(&modifiers)?;
            let is_constructor = !is_static
                && matches!(&key, PropertyKey::Identifier(id) if id.name == "constructor");
            let kind = match modifiers.accessor {
                Some(accessor) => accessor,
                None if is_constructor => MethodKind::Constructor,
                None => MethodKind::Method,
            };
            return Ok(Some(ClassMember::Method(MethodDefinition {
                key,
                value,
                kind,
                is_static,
            })));
        }

        let value = if self.eat(&TokenKind::Equal) {
            Some(self.with_generator(false, |p| p.parse_assignment())?)
        } else {
            None
        };
        self.consume_semicolon()?;

        Ok(Some(ClassMember::Property(PropertyDefinition {
            key,
            value,
            is_static,
        })))
    }
}
