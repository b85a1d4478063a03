//! Parameter rules
//!
//! Kept for grammar completeness. No production of `program` reaches them,
//! so they only run when invoked directly.

use super::declarations::type_specifier;
use super::{peek_in, within, GrammarParser};
use crate::grammar::rule::Rule;
use crate::grammar::terminals::*;
use crate::syntax::SyntaxResult;

/// params ::= "void" | param_list
pub fn params(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::Params, |p| match peek_in(p, &PARAMS_FIRST) {
        Some(VOID) => p.match_token(&[VOID]).map(|_| ()),
        Some(_) => param_list(p),
        None => Err(p.unexpected(&PARAMS_FIRST)),
    })
}

/// param_list ::= param param_list'
pub fn param_list(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::ParamList, |p| {
        param(p)?;
        param_list_prime(p)
    })
}

/// param_list' ::= "," param param_list' | ε
pub fn param_list_prime(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::ParamListPrime, |p| {
        while peek_in(p, &[COMMA]).is_some() {
            p.match_token(&[COMMA])?;
            param(p)?;
        }
        Ok(())
    })
}

/// param ::= type_specifier ID param'
pub fn param(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::Param, |p| {
        type_specifier(p)?;
        p.match_token(&[ID])?;
        param_prime(p)
    })
}

/// param' ::= "[" "]" | ε
pub fn param_prime(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::ParamPrime, |p| {
        if peek_in(p, &[LBRACKET]).is_some() {
            p.match_token(&[LBRACKET])?;
            p.match_token(&[RBRACKET])?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::DescentParser;
    use crate::tokens::Token;

    fn parser_for(source: &str) -> DescentParser {
        DescentParser::new(source.split_whitespace().map(|t| Token::new(t, 1)).collect())
    }

    #[test]
    fn test_void_params() {
        let mut parser = parser_for("void");
        params(&mut parser).unwrap();
        assert!(parser.cursor().is_at_end());
    }

    #[test]
    fn test_param_list_with_array() {
        let mut parser = parser_for("int ID , float ID [ ] , int ID");
        params(&mut parser).unwrap();
        assert!(parser.cursor().is_at_end());
    }

    #[test]
    fn test_params_dispatch_failure() {
        let mut parser = parser_for("ID");
        let error = params(&mut parser).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Line: 1 Expected: void, int, float But got: ID"
        );
    }

    #[test]
    fn test_trailing_comma_needs_param() {
        let mut parser = parser_for("int ID ,");
        let error = param_list(&mut parser).unwrap_err();
        assert!(error.is_end_of_input());
    }
}
