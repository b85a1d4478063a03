use super::expressions::{expression, var};
use super::{peek_in, within, GrammarParser};
use crate::grammar::rule::Rule;
use crate::grammar::terminals::*;
use crate::syntax::SyntaxResult;

/// statement_list ::= statement statement_list | ε
pub fn statement_list(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::StatementList, |p| {
        while peek_in(p, &STATEMENT_FIRST).is_some() {
            statement(p)?;
        }
        Ok(())
    })
}

/// statement ::= selection_stmt | iteration_stmt | assignment_stmt | compound_stmt
pub fn statement(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::Statement, |p| match peek_in(p, &STATEMENT_FIRST) {
        Some(IF) => selection_stmt(p),
        Some(WHILE) => iteration_stmt(p),
        Some(ID) => assignment_stmt(p),
        Some(LBRACE) => compound_stmt(p),
        _ => Err(p.unexpected(&STATEMENT_FIRST)),
    })
}

/// compound_stmt ::= "{" statement_list "}"
pub fn compound_stmt(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::CompoundStmt, |p| {
        p.match_token(&[LBRACE])?;
        statement_list(p)?;
        p.match_token(&[RBRACE])?;
        Ok(())
    })
}

/// selection_stmt ::= "if" "(" expression ")" statement selection_stmt'
pub fn selection_stmt(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::SelectionStmt, |p| {
        p.match_token(&[IF])?;
        p.match_token(&[LPAREN])?;
        expression(p)?;
        p.match_token(&[RPAREN])?;
        statement(p)?;
        selection_stmt_prime(p)
    })
}

/// selection_stmt' ::= "else" statement | ε
///
/// A dangling `else` binds to the innermost `if`.
pub fn selection_stmt_prime(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::SelectionStmtPrime, |p| {
        if peek_in(p, &[ELSE]).is_some() {
            p.match_token(&[ELSE])?;
            statement(p)?;
        }
        Ok(())
    })
}

/// iteration_stmt ::= "while" "(" expression ")" statement
pub fn iteration_stmt(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::IterationStmt, |p| {
        p.match_token(&[WHILE])?;
        p.match_token(&[LPAREN])?;
        expression(p)?;
        p.match_token(&[RPAREN])?;
        statement(p)
    })
}

/// assignment_stmt ::= var "=" expression ";"
pub fn assignment_stmt(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::AssignmentStmt, |p| {
        var(p)?;
        p.match_token(&[ASSIGN])?;
        expression(p)?;
        p.match_token(&[SEMICOLON])?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{DescentParser, Found, SyntaxError};
    use crate::tokens::Token;
    use assert_matches::assert_matches;

    fn parser_for(source: &str) -> DescentParser {
        DescentParser::new(source.split_whitespace().map(|t| Token::new(t, 1)).collect())
    }

    #[test]
    fn test_if_else_chain() {
        let mut parser = parser_for("if ( ID < NUM ) ID = NUM ; else if ( ID ) { } else ID = ID ;");
        statement(&mut parser).unwrap();
        assert!(parser.cursor().is_at_end());
    }

    #[test]
    fn test_dangling_else_binds_inner_if() {
        // The inner selection consumes the else, the outer one sees nothing left
        let mut parser = parser_for("if ( ID ) if ( ID ) ID = NUM ; else ID = NUM ;");
        selection_stmt(&mut parser).unwrap();
        assert!(parser.cursor().is_at_end());
    }

    #[test]
    fn test_while_with_compound_body() {
        let mut parser = parser_for("while ( ID != NUM ) { ID = ID + NUM ; ID [ NUM ] = ID ; }");
        iteration_stmt(&mut parser).unwrap();
        assert!(parser.cursor().is_at_end());
    }

    #[test]
    fn test_statement_list_epsilon_leaves_closing_brace() {
        let mut parser = parser_for("}");
        statement_list(&mut parser).unwrap();
        assert_eq!(parser.cursor().position(), 0);
    }

    #[test]
    fn test_statement_dispatch_failure() {
        let mut parser = parser_for("return ;");
        let error = statement(&mut parser).unwrap_err();
        assert_matches!(
            error,
            SyntaxError::UnexpectedToken { ref expected, found: Found::Token(ref text), line: 1 }
                if expected == &["if", "while", "ID", "{"] && text == "return"
        );
    }

    #[test]
    fn test_assignment_requires_semicolon() {
        let mut parser = parser_for("ID = NUM }");
        let error = assignment_stmt(&mut parser).unwrap_err();
        assert_eq!(error.to_string(), "Line: 1 Expected: ; But got: }");
    }
}
