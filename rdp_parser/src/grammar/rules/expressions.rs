//! Expression rules
//!
//! Operators at one precedence level are folded by the prime rules' loops, so
//! `a - b - c` groups left to right without left recursion.

use super::{peek_in, within, GrammarParser};
use crate::grammar::rule::Rule;
use crate::grammar::terminals::*;
use crate::syntax::SyntaxResult;

/// var ::= ID var'
pub fn var(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::Var, |p| {
        p.match_token(&[ID])?;
        var_prime(p)
    })
}

/// var' ::= "[" expression "]" | ε
pub fn var_prime(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::VarPrime, |p| {
        if peek_in(p, &[LBRACKET]).is_some() {
            p.match_token(&[LBRACKET])?;
            expression(p)?;
            p.match_token(&[RBRACKET])?;
        }
        Ok(())
    })
}

/// expression ::= additive_expression expression'
pub fn expression(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::Expression, |p| {
        additive_expression(p)?;
        expression_prime(p)
    })
}

/// expression' ::= relop additive_expression | ε
pub fn expression_prime(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::ExpressionPrime, |p| {
        if peek_in(p, &RELOPS).is_some() {
            relop(p)?;
            additive_expression(p)?;
        }
        Ok(())
    })
}

pub fn relop(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::Relop, |p| {
        p.match_token(&RELOPS)?;
        Ok(())
    })
}

/// additive_expression ::= term additive_expression'
pub fn additive_expression(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::AdditiveExpression, |p| {
        term(p)?;
        additive_expression_prime(p)
    })
}

/// additive_expression' ::= addop term additive_expression' | ε
pub fn additive_expression_prime(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::AdditiveExpressionPrime, |p| {
        while peek_in(p, &ADDOPS).is_some() {
            addop(p)?;
            term(p)?;
        }
        Ok(())
    })
}

pub fn addop(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::Addop, |p| {
        p.match_token(&ADDOPS)?;
        Ok(())
    })
}

/// term ::= factor term'
pub fn term(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::Term, |p| {
        factor(p)?;
        term_prime(p)
    })
}

/// term' ::= mulop factor term' | ε
pub fn term_prime(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::TermPrime, |p| {
        while peek_in(p, &MULOPS).is_some() {
            mulop(p)?;
            factor(p)?;
        }
        Ok(())
    })
}

pub fn mulop(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::Mulop, |p| {
        p.match_token(&MULOPS)?;
        Ok(())
    })
}

/// factor ::= "(" expression ")" | var | NUM
pub fn factor(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::Factor, |p| {
        match peek_in(p, &FACTOR_FIRST) {
            Some(LPAREN) => {
                p.match_token(&[LPAREN])?;
                expression(p)?;
                p.match_token(&[RPAREN])?;
            }
            Some(ID) => var(p)?,
            Some(NUM) => {
                p.match_token(&[NUM])?;
            }
            _ => return Err(p.unexpected(&FACTOR_FIRST)),
        }
        Ok(())
    })
}
