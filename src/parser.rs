//! The parser (component C): byte stream -> value tree.
//!
//! Grammar: optional whitespace, one value, optional whitespace,
//! end-of-input. A value is one of `null`, `true`, `false`, a number, a
//! string, an array, or an object. See [`ParseError`] for the 13 ways a
//! parse can fail.
//!
//! There is no explicit "free partially built values on error" step the
//! way a manual-memory implementation needs: every intermediate `Vec`/
//! `ParseBuffer` this parser builds is owned by a local variable that
//! simply drops, recursively, the moment an inner call returns `Err` and
//! the error propagates past it. Nothing is ever installed into the
//! caller-visible result until the whole parse has succeeded.

use crate::{
    buffer::ParseBuffer,
    error::ParseError,
    options::ParserOptions,
    value::{Member, Value},
};

/// Parses a byte slice into a [`Value`] using the default [`ParserOptions`].
pub fn parse(input: &[u8]) -> Result<Value, ParseError> {
    Parser::new(input).parse()
}

/// Parses a NUL-terminated C string into a [`Value`] using the default
/// [`ParserOptions`].
///
/// This mirrors the input contract spec.md §6 describes (a caller-owned,
/// NUL-terminated byte sequence); the primary, idiomatic entry point is
/// [`parse`], which takes an ordinary byte slice and does not require a
/// terminator at all.
pub fn parse_cstr(input: &std::ffi::CStr) -> Result<Value, ParseError> {
    parse(input.to_bytes())
}

/// A one-shot recursive-descent JSON parser over a byte slice.
pub struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    options: ParserOptions,
}

impl<'a> Parser<'a> {
    /// Create a parser over `input` with default options.
    pub fn new(input: &'a [u8]) -> Self {
        Parser {
            input,
            pos: 0,
            options: ParserOptions::default(),
        }
    }

    /// Create a parser over `input` with the given options.
    pub fn with_options(input: &'a [u8], options: ParserOptions) -> Self {
        Parser {
            input,
            pos: 0,
            options,
        }
    }

    /// Parse the whole input as a single JSON value.
    pub fn parse(&mut self) -> Result<Value, ParseError> {
        self.skip_whitespace();
        if self.peek().is_none() {
            return Err(ParseError::ExpectValue(self.pos));
        }
        let value = self.parse_value(0)?;
        self.skip_whitespace();
        if self.pos != self.input.len() {
            return Err(ParseError::RootNotSingular(self.pos));
        }
        Ok(value)
    }

    /// How many bytes have been consumed so far.
    pub fn parsed_bytes(&self) -> usize {
        self.pos
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value, ParseError> {
        match self.peek() {
            None => Err(ParseError::ExpectValue(self.pos)),
            Some(b'n') => self.parse_literal(b"null", Value::Null),
            Some(b't') => self.parse_literal(b"true", Value::Bool(true)),
            Some(b'f') => self.parse_literal(b"false", Value::Bool(false)),
            Some(b'"') => Ok(Value::String(self.parse_string_bytes()?)),
            Some(b'[') => self.parse_array(depth),
            Some(b'{') => self.parse_object(depth),
            Some(b'-') | Some(b'0'..=b'9') => self.parse_number(),
            Some(_) => Err(ParseError::InvalidValue(self.pos)),
        }
    }

    fn parse_literal(&mut self, literal: &'static [u8], value: Value) -> Result<Value, ParseError> {
        let start = self.pos;
        if self.input[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            Ok(value)
        } else {
            Err(ParseError::InvalidValue(start))
        }
    }

    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;

        if self.peek() == Some(b'-') {
            self.pos += 1;
        }

        match self.peek() {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => {
                self.pos += 1;
                while matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.pos += 1;
                }
            }
            _ => return Err(ParseError::InvalidValue(start)),
        }

        if self.peek() == Some(b'.') {
            self.pos += 1;
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(ParseError::InvalidValue(start));
            }
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
        }

        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                self.pos += 1;
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(ParseError::InvalidValue(start));
            }
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
        }

        // Every byte consumed above is ASCII, so this is always valid UTF-8.
        let text = std::str::from_utf8(&self.input[start..self.pos]).unwrap();
        let n: f64 = text
            .parse()
            .expect("number grammar already validated the text");
        if n.is_infinite() {
            return Err(ParseError::NumberTooBig(start));
        }
        Ok(Value::Number(n))
    }

    fn parse_string_bytes(&mut self) -> Result<Vec<u8>, ParseError> {
        debug_assert_eq!(self.peek(), Some(b'"'));
        self.pos += 1;

        let mut buffer = ParseBuffer::new();
        loop {
            match self.peek() {
                None => return Err(ParseError::MissQuotationMark(self.pos)),
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => self.parse_escape(&mut buffer)?,
                Some(b) if b < 0x20 => return Err(ParseError::InvalidStringChar(self.pos)),
                Some(b) => {
                    buffer.push(b);
                    self.pos += 1;
                }
            }
        }
        Ok(buffer.take())
    }

    fn parse_escape(&mut self, buffer: &mut ParseBuffer) -> Result<(), ParseError> {
        let escape_pos = self.pos;
        self.pos += 1; // consume '\'
        match self.peek() {
            Some(b'"') => {
                buffer.push(b'"');
                self.pos += 1;
            }
            Some(b'\\') => {
                buffer.push(b'\\');
                self.pos += 1;
            }
            Some(b'/') => {
                buffer.push(b'/');
                self.pos += 1;
            }
            Some(b'b') => {
                buffer.push(0x08);
                self.pos += 1;
            }
            Some(b'f') => {
                buffer.push(0x0C);
                self.pos += 1;
            }
            Some(b'n') => {
                buffer.push(0x0A);
                self.pos += 1;
            }
            Some(b'r') => {
                buffer.push(0x0D);
                self.pos += 1;
            }
            Some(b't') => {
                buffer.push(0x09);
                self.pos += 1;
            }
            Some(b'u') => {
                self.pos += 1;
                self.parse_unicode_escape(escape_pos, buffer)?;
            }
            Some(_) => return Err(ParseError::InvalidStringEscape(escape_pos)),
            None => return Err(ParseError::MissQuotationMark(self.pos)),
        }
        Ok(())
    }

    fn parse_unicode_escape(
        &mut self,
        escape_pos: usize,
        buffer: &mut ParseBuffer,
    ) -> Result<(), ParseError> {
        let code = self.parse_hex4()?;

        let scalar = if (0xD800..=0xDBFF).contains(&code) {
            if self.peek() != Some(b'\\') {
                return Err(ParseError::InvalidUnicodeSurrogate(escape_pos));
            }
            self.pos += 1;
            if self.peek() != Some(b'u') {
                return Err(ParseError::InvalidUnicodeSurrogate(escape_pos));
            }
            self.pos += 1;
            let low = self.parse_hex4()?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(ParseError::InvalidUnicodeSurrogate(escape_pos));
            }
            0x10000 + (code - 0xD800) * 0x400 + (low - 0xDC00)
        } else if (0xDC00..=0xDFFF).contains(&code) {
            return Err(ParseError::InvalidUnicodeSurrogate(escape_pos));
        } else {
            code
        };

        let ch =
            char::from_u32(scalar).expect("a combined surrogate pair always yields a valid scalar");
        let mut tmp = [0u8; 4];
        buffer.push_slice(ch.encode_utf8(&mut tmp).as_bytes());
        Ok(())
    }

    fn parse_hex4(&mut self) -> Result<u32, ParseError> {
        let start = self.pos;
        if start + 4 > self.input.len() {
            return Err(ParseError::InvalidUnicodeHex(start));
        }
        let text = std::str::from_utf8(&self.input[start..start + 4])
            .map_err(|_| ParseError::InvalidUnicodeHex(start))?;
        let value =
            u32::from_str_radix(text, 16).map_err(|_| ParseError::InvalidUnicodeHex(start))?;
        self.pos += 4;
        Ok(value)
    }

    fn parse_array(&mut self, depth: usize) -> Result<Value, ParseError> {
        debug_assert_eq!(self.peek(), Some(b'['));
        self.pos += 1;
        if depth >= self.options.max_depth {
            return Err(ParseError::MaxDepthExceeded(self.pos));
        }

        let mut elements = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(Value::Array(elements));
        }

        loop {
            elements.push(self.parse_value(depth + 1)?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                    self.skip_whitespace();
                }
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(ParseError::MissCommaOrSquareBracket(self.pos)),
            }
        }
        Ok(Value::Array(elements))
    }

    fn parse_object(&mut self, depth: usize) -> Result<Value, ParseError> {
        debug_assert_eq!(self.peek(), Some(b'{'));
        self.pos += 1;
        if depth >= self.options.max_depth {
            return Err(ParseError::MaxDepthExceeded(self.pos));
        }

        let mut members = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(Value::Object(members));
        }

        loop {
            if self.peek() != Some(b'"') {
                return Err(ParseError::MissKey(self.pos));
            }
            let key = self.parse_string_bytes()?;

            self.skip_whitespace();
            if self.peek() != Some(b':') {
                return Err(ParseError::MissColon(self.pos));
            }
            self.pos += 1;
            self.skip_whitespace();

            let value = self.parse_value(depth + 1)?;
            members.push(Member::new(key, value));

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                    self.skip_whitespace();
                }
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(ParseError::MissCommaOrCurlyBracket(self.pos)),
            }
        }
        Ok(Value::Object(members))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::options::ParserOptionsBuilder;

    fn parse_ok(json: &str) -> Value {
        parse(json.as_bytes()).unwrap_or_else(|e| panic!("unexpected parse error: {e} ({json:?})"))
    }

    fn parse_err(json: &str) -> ParseError {
        parse(json.as_bytes()).expect_err("expected a parse error")
    }

    #[test]
    fn null_literal() {
        assert_eq!(parse_ok("null"), Value::Null);
    }

    #[test]
    fn nested_array() {
        let v = parse_ok("[ 1 , 2 , [ 3 , 4 ] , \"five\" ]");
        let elements = v.as_array().unwrap();
        assert_eq!(elements.len(), 4);
        assert_eq!(
            elements[2].as_array().unwrap(),
            &[Value::Number(3.0), Value::Number(4.0)]
        );
        assert_eq!(elements[3], Value::String(b"five".to_vec()));
    }

    #[test]
    fn object_preserves_insertion_order() {
        let v = parse_ok(
            r#"{"n":null,"f":false,"t":true,"i":123,"s":"abc","a":[1,2,3],"o":{"1":1,"2":2,"3":3}}"#,
        );
        let members = v.as_object().unwrap();
        assert_eq!(members.len(), 7);
        let keys: Vec<&[u8]> = members.iter().map(|m| m.key.as_slice()).collect();
        assert_eq!(
            keys,
            vec![
                &b"n"[..],
                &b"f"[..],
                &b"t"[..],
                &b"i"[..],
                &b"s"[..],
                &b"a"[..],
                &b"o"[..]
            ]
        );
    }

    #[test]
    fn string_escape_newline() {
        let v = parse_ok(r#""Hello\nWorld""#);
        assert_eq!(v, Value::String(b"Hello\nWorld".to_vec()));
    }

    #[test]
    fn surrogate_pair_decodes_to_utf8() {
        let v = parse_ok(r#""𝄞""#);
        assert_eq!(v, Value::String(vec![0xF0, 0x9D, 0x84, 0x9E]));
    }

    #[test]
    fn bare_high_surrogate_is_invalid() {
        assert_eq!(parse_err(r#""\uD800""#), ParseError::InvalidUnicodeSurrogate(1));
    }

    #[test]
    fn unterminated_string() {
        assert!(matches!(parse_err("\""), ParseError::MissQuotationMark(_)));
    }

    #[test]
    fn array_missing_bracket() {
        assert!(matches!(
            parse_err("[1,2"),
            ParseError::MissCommaOrSquareBracket(_)
        ));
    }

    #[test]
    fn object_missing_colon() {
        assert!(matches!(parse_err(r#"{"k""#), ParseError::MissColon(_)));
    }

    #[test]
    fn embedded_nul_via_escape() {
        let v = parse_ok(r#""\u0000""#);
        assert_eq!(v, Value::String(vec![0]));
    }

    #[test]
    fn empty_input_expects_a_value() {
        assert!(matches!(parse_err(""), ParseError::ExpectValue(_)));
        assert!(matches!(parse_err("   "), ParseError::ExpectValue(_)));
    }

    #[test]
    fn trailing_garbage_is_root_not_singular() {
        assert!(matches!(parse_err("null null"), ParseError::RootNotSingular(_)));
    }

    #[test]
    fn leading_zero_is_rejected() {
        // The number grammar stops after the single leading `0`; the
        // trailing `1` is then extra root content, not an invalid number.
        assert!(matches!(parse_err("01"), ParseError::RootNotSingular(_)));
    }

    #[test]
    fn very_small_exponent_underflows_to_zero() {
        assert_eq!(parse_ok("1e-10000"), Value::Number(0.0));
    }

    #[test]
    fn huge_exponent_is_number_too_big() {
        assert!(matches!(parse_err("1e10000"), ParseError::NumberTooBig(_)));
    }

    #[test]
    fn negative_and_positive_zero_are_equal() {
        assert_eq!(parse_ok("-0"), parse_ok("0"));
    }

    #[test]
    fn empty_containers() {
        assert_eq!(parse_ok("[]"), Value::Array(vec![]));
        assert_eq!(parse_ok("{}"), Value::Object(vec![]));
    }

    #[test]
    fn duplicate_keys_are_kept_on_parse() {
        let v = parse_ok(r#"{"a":1,"a":2}"#);
        assert_eq!(v.object_len(), 2);
    }

    #[test]
    fn max_depth_is_enforced() {
        let deeply_nested = "[".repeat(10) + &"]".repeat(10);
        let options = ParserOptionsBuilder::default().with_max_depth(5).build();
        let err = Parser::with_options(deeply_nested.as_bytes(), options)
            .parse()
            .unwrap_err();
        assert!(matches!(err, ParseError::MaxDepthExceeded(_)));
    }

    #[test]
    fn illegal_control_byte_in_string() {
        let raw = b"\"\x01\"";
        assert!(matches!(
            parse(raw).unwrap_err(),
            ParseError::InvalidStringChar(_)
        ));
    }

    #[test]
    fn unknown_token_is_invalid_value() {
        assert!(matches!(parse_err("nul"), ParseError::InvalidValue(_)));
        assert!(matches!(parse_err("truth"), ParseError::InvalidValue(_)));
    }

    #[test]
    fn parse_cstr_strips_the_terminator() {
        let cstr = std::ffi::CString::new("[1,2,3]").unwrap();
        let v = parse_cstr(&cstr).unwrap();
        assert_eq!(v, parse_ok("[1,2,3]"));
    }
}
