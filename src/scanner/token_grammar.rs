//! PEG grammar splitting a single input line into raw tokens.
//!
//! This module is an internal implementation detail, but [`RawToken`] may
//! surface through low-level APIs such as `TokenStream` internals in tests.

/// A single raw token recognized by the line grammar, before the scanner
/// validates it.
///
/// The grammar is total over a line: any non-whitespace run that is not a
/// recognized token is captured as [`RawToken::Word`] and rejected later by
/// the scanner, so the precise position of the offending text is known.
#[derive(Debug, PartialEq, Clone)]
pub enum RawToken {
    /// `[`
    StartArray,
    /// `]`
    EndArray,
    /// `{`
    StartObject,
    /// `}`
    EndObject,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// A double-quoted string, unescaped.
    Str(String),
    /// A numeric literal.
    Number(f64),
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// Any other run of non-structural characters. Not a valid token.
    Word(String),
}

peg::parser!{pub grammar grammar() for str {

rule space() = [' '|'\t']+

rule line_break()
	= "\r\n" / ['\n'|'\r']

rule string_char() -> char
	= "\\\"" { '"' }
	/ "\\\\" { '\\' }
	/ "\\/" { '/' }
	/ "\\n" { '\n' }
	/ "\\r" { '\r' }
	/ "\\t" { '\t' }
	/ c:[^'"'|'\\'|'\n'|'\r'] { c }

rule string() -> String
	= "\"" cs:string_char()* "\"" { cs.into_iter().collect() }

rule number() -> f64
	= n:$(['-'|'+']? ['0'..='9']+("."['0'..='9']+)?(['e'|'E']['-'|'+']?['0'..='9']+)?) {?
		n.parse::<f64>().or(Err("number"))
	}

rule word() -> &'input str
	= s:$([^' '|'\t'|'\r'|'\n'|'['|']'|'{'|'}'|','|':']+) { s }

pub rule token() -> RawToken
	= "[" { RawToken::StartArray }
	/ "]" { RawToken::EndArray }
	/ "{" { RawToken::StartObject }
	/ "}" { RawToken::EndObject }
	/ "," { RawToken::Comma }
	/ ":" { RawToken::Colon }
	/ s:string() { RawToken::Str(s) }
	/ n:number() { RawToken::Number(n) }
	/ w:word() {
		match w {
			"true" => RawToken::True,
			"false" => RawToken::False,
			"null" => RawToken::Null,
			_ => RawToken::Word(w.to_string()),
		}
	}

rule located_token() -> (usize, RawToken)
	= p:position!() t:token() { (p, t) }

/// All tokens on one line, each with its byte offset within the line.
pub rule tokens() -> Vec<(usize, RawToken)>
	= space()? ts:(located_token() ** (space()?)) space()? line_break()? { ts }

}}
