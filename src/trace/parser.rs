//! Parser for input traces.

use super::ast::*;
use super::lexer::{Lexer, Token, TokenKind};
use crate::control::{ElementEvent, Key};
use crate::error::{PartsError, Result};
use crate::geometry::Point;
use crate::viewport::ViewportEvent;

/// Parser for input traces.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire trace.
    pub fn parse(&mut self) -> Result<TraceAst> {
        let mut ast = TraceAst::new();

        while self.current.kind != TokenKind::Eof {
            // Skip empty lines
            if self.current.kind == TokenKind::Newline {
                self.advance()?;
                continue;
            }

            let line = self.current.line;
            let command = match self.current.kind {
                TokenKind::Directive => self.parse_directive(&mut ast)?,
                TokenKind::Identifier => Some(self.parse_command()?),
                _ => {
                    return Err(PartsError::parse(
                        line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            };
            if let Some(command) = command {
                ast.steps.push(Step { command, line });
            }

            // Each command owns exactly one line
            match self.current.kind {
                TokenKind::Newline => self.advance()?,
                TokenKind::Eof => {}
                _ => {
                    return Err(PartsError::parse(
                        self.current.line,
                        format!("unexpected trailing token: {:?}", self.current.text),
                    ));
                }
            }
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(PartsError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn number(&mut self) -> Result<f64> {
        let tok = self.expect(TokenKind::Number)?;
        tok.text
            .parse::<f64>()
            .map_err(|_| PartsError::parse(tok.line, format!("invalid number: {}", tok.text)))
    }

    fn optional_number(&mut self) -> Result<Option<f64>> {
        if self.current.kind == TokenKind::Number {
            self.number().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Returns `None` for directives that only fill the trace header.
    fn parse_directive(&mut self, ast: &mut TraceAst) -> Result<Option<Command>> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        let command = match directive.to_lowercase().as_str() {
            ".part" => {
                let name = self.expect(TokenKind::Identifier)?.text;
                if ast.part.is_some() {
                    return Err(PartsError::parse(line, "part already selected"));
                }
                ast.part = Some(name);
                return Ok(None);
            }
            ".range" => {
                let min = self.number()?;
                let max = self.number()?;
                let step = self.optional_number()?;
                Command::Range { min, max, step }
            }
            ".layout" => {
                let mut ctm = [0.0; 6];
                for slot in ctm.iter_mut() {
                    *slot = self.number()?;
                }
                Command::Layout(ctm)
            }
            ".zoom" => {
                if self.current.kind == TokenKind::Identifier
                    && self.current.text.eq_ignore_ascii_case("none")
                {
                    self.advance()?;
                    Command::Zoom(None)
                } else {
                    Command::Zoom(Some(self.number()?))
                }
            }
            ".detach-layout" => Command::DetachLayout,
            ".mount" => Command::Mount,
            ".unmount" => Command::Unmount,
            _ => {
                return Err(PartsError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        };

        Ok(Some(command))
    }

    fn parse_command(&mut self) -> Result<Command> {
        let name = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        let command = match name.to_lowercase().as_str() {
            "mousedown" => Command::Element(ElementEvent::MouseDown),
            "touchstart" => Command::Element(ElementEvent::TouchStart),
            "touchend" => Command::Element(ElementEvent::TouchEnd),
            "keyup" => Command::Element(ElementEvent::KeyUp),
            "keydown" => {
                let key = if self.current.kind == TokenKind::Identifier {
                    let key_name = self.current.text.clone();
                    self.advance()?;
                    Key::from_name(&key_name).ok_or(PartsError::UnknownKey {
                        key: key_name,
                        line,
                    })?
                } else {
                    Key::Other
                };
                Command::Element(ElementEvent::KeyDown(key))
            }
            "touchmove" => {
                let mut touches = Vec::new();
                while let Some(x) = self.optional_number()? {
                    let y = self.number()?;
                    touches.push(Point::new(x, y));
                }
                Command::Element(ElementEvent::TouchMove { touches })
            }
            "move" | "mousemove" => {
                let x = self.number()?;
                let y = self.number()?;
                Command::Viewport(ViewportEvent::PointerMove(Point::new(x, y)))
            }
            "mouseup" | "up" => Command::Viewport(ViewportEvent::PointerUp),
            "leave" | "mouseleave" => Command::Viewport(ViewportEvent::PointerLeave),
            "input" => Command::Input(self.number()?),
            "set" => Command::Set(self.number()?),
            "min" => Command::Min(self.number()?),
            "max" => Command::Max(self.number()?),
            "step" => Command::Step(self.number()?),
            "expect" => Command::Expect(self.number()?),
            _ => {
                return Err(PartsError::UnknownCommand {
                    command: name,
                    line,
                });
            }
        };

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::parse;

    #[test]
    fn test_parse_header_and_steps() {
        let input = ".part slide-potentiometer\n.range 0 50 5\n.mount\nmousedown\nmove 10 20\nmouseup\n";
        let ast = parse(input).unwrap();
        assert_eq!(ast.part.as_deref(), Some("slide-potentiometer"));
        assert_eq!(ast.steps.len(), 5);
        assert_eq!(
            ast.steps[0].command,
            Command::Range {
                min: 0.0,
                max: 50.0,
                step: Some(5.0)
            }
        );
        assert_eq!(
            ast.steps[3].command,
            Command::Viewport(ViewportEvent::PointerMove(Point::new(10.0, 20.0)))
        );
        assert_eq!(ast.steps[3].line, 5);
    }

    #[test]
    fn test_parse_touchmove_pairs() {
        let ast = parse("touchmove 1 2 3 4").unwrap();
        assert_eq!(
            ast.steps[0].command,
            Command::Element(ElementEvent::TouchMove {
                touches: vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]
            })
        );
        assert!(parse("touchmove 1 2 3").is_err());
    }

    #[test]
    fn test_parse_keys_and_zoom() {
        let ast = parse("keydown ArrowRight\nkeydown\n.zoom none\n.zoom 1.25").unwrap();
        let commands: Vec<_> = ast.steps.into_iter().map(|s| s.command).collect();
        assert_eq!(
            commands,
            vec![
                Command::Element(ElementEvent::KeyDown(Key::ArrowRight)),
                Command::Element(ElementEvent::KeyDown(Key::Other)),
                Command::Zoom(None),
                Command::Zoom(Some(1.25)),
            ]
        );
        assert!(matches!(
            parse("keydown Banana"),
            Err(PartsError::UnknownKey { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_errors_report_line() {
        assert!(matches!(
            parse("mousedown\nwiggle 3"),
            Err(PartsError::UnknownCommand { line: 2, .. })
        ));
        assert!(matches!(
            parse("set 1 2"),
            Err(PartsError::ParseError { line: 1, .. })
        ));
        assert!(matches!(
            parse(".layout 1 0 0 1"),
            Err(PartsError::ParseError { .. })
        ));
    }
}
