use super::statements::statement_list;
use super::{peek_in, within, GrammarParser};
use crate::grammar::rule::Rule;
use crate::grammar::terminals::*;
use crate::syntax::SyntaxResult;

/// program ::= "Program" ID "{" declaration_list statement_list "}"
pub fn program(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::Program, |p| {
        p.match_token(&[PROGRAM])?;
        p.match_token(&[ID])?;
        p.match_token(&[LBRACE])?;
        declaration_list(p)?;
        statement_list(p)?;
        p.match_token(&[RBRACE])?;
        Ok(())
    })
}

/// declaration_list ::= declaration declaration_list'
pub fn declaration_list(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::DeclarationList, |p| {
        declaration(p)?;
        declaration_list_prime(p)
    })
}

/// declaration_list' ::= declaration declaration_list' | ε
pub fn declaration_list_prime(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::DeclarationListPrime, |p| {
        while peek_in(p, &TYPE_SPECIFIERS).is_some() {
            declaration(p)?;
        }
        Ok(())
    })
}

/// declaration ::= var_declaration
pub fn declaration(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::Declaration, var_declaration)
}

/// var_declaration ::= type_specifier ID var_declaration'
pub fn var_declaration(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::VarDeclaration, |p| {
        type_specifier(p)?;
        p.match_token(&[ID])?;
        var_declaration_prime(p)
    })
}

/// var_declaration' ::= ";" | "[" NUM "]" ";"
pub fn var_declaration_prime(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::VarDeclarationPrime, |p| {
        match peek_in(p, &VAR_DECLARATION_TAIL) {
            Some(SEMICOLON) => {
                p.match_token(&[SEMICOLON])?;
            }
            Some(LBRACKET) => {
                p.match_token(&[LBRACKET])?;
                p.match_token(&[NUM])?;
                p.match_token(&[RBRACKET])?;
                p.match_token(&[SEMICOLON])?;
            }
            _ => return Err(p.unexpected(&VAR_DECLARATION_TAIL)),
        }
        Ok(())
    })
}

/// type_specifier ::= "int" | "float"
pub fn type_specifier(parser: &mut dyn GrammarParser) -> SyntaxResult<()> {
    within(parser, Rule::TypeSpecifier, |p| {
        p.match_token(&TYPE_SPECIFIERS)?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{DescentParser, Found, SyntaxError};
    use crate::tokens::Token;
    use assert_matches::assert_matches;

    fn parser_for(texts: &[&str]) -> DescentParser {
        DescentParser::new(texts.iter().map(|t| Token::new(*t, 1)).collect())
    }

    #[test]
    fn test_scalar_and_array_declarations() {
        let mut parser = parser_for(&["int", "ID", ";", "float", "ID", "[", "NUM", "]", ";"]);
        declaration_list(&mut parser).unwrap();
        assert!(parser.cursor().is_at_end());
    }

    #[test]
    fn test_declaration_list_prime_stops_before_statements() {
        let mut parser = parser_for(&["int", "ID", ";", "ID", "=", "NUM", ";"]);
        declaration_list(&mut parser).unwrap();
        assert_eq!(parser.cursor().position(), 3);
    }

    #[test]
    fn test_declaration_list_prime_epsilon_consumes_nothing() {
        let mut parser = parser_for(&["}"]);
        declaration_list_prime(&mut parser).unwrap();
        assert_eq!(parser.cursor().position(), 0);
    }

    #[test]
    fn test_bad_declaration_tail() {
        let mut parser = parser_for(&["int", "ID", "="]);
        let error = declaration(&mut parser).unwrap_err();
        assert_matches!(
            error,
            SyntaxError::UnexpectedToken { ref expected, found: Found::Token(ref text), .. }
                if expected == &[";", "["] && text == "="
        );
    }

    #[test]
    fn test_void_is_not_a_variable_type() {
        let mut parser = parser_for(&["void", "ID", ";"]);
        let error = type_specifier(&mut parser).unwrap_err();
        assert_eq!(error.expected(), &["int".to_string(), "float".to_string()]);
    }

    #[test]
    fn test_array_size_must_be_number() {
        let mut parser = parser_for(&["int", "ID", "[", "ID", "]", ";"]);
        let error = var_declaration(&mut parser).unwrap_err();
        assert_eq!(error.expected(), &["NUM".to_string()]);
    }
}
