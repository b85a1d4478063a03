//! Descent procedures, one per non-terminal
//!
//! Rules only look at the current token to choose an alternative. Tokens are
//! consumed exclusively through [`GrammarParser::match_token`], so an ε
//! alternative leaves the cursor untouched.

pub mod declarations;
pub mod expressions;
pub mod params;
pub mod statements;

use crate::grammar::rule::Rule;
use crate::syntax::{SyntaxError, SyntaxResult};
use crate::tokens::Token;

pub use declarations::{
    declaration, declaration_list, declaration_list_prime, program, type_specifier,
    var_declaration, var_declaration_prime,
};
pub use expressions::{
    additive_expression, additive_expression_prime, addop, expression, expression_prime, factor,
    mulop, relop, term, term_prime, var, var_prime,
};
pub use params::{param, param_list, param_list_prime, param_prime, params};
pub use statements::{
    assignment_stmt, compound_stmt, iteration_stmt, selection_stmt, selection_stmt_prime,
    statement, statement_list,
};

/// Parser interface the rules are written against
pub trait GrammarParser {
    /// Token under the cursor, `None` once input is exhausted
    fn current_token(&self) -> Option<&Token>;

    /// Consume the current token if its grammar symbol is one of `expected`
    fn match_token(&mut self, expected: &[&str]) -> SyntaxResult<Token>;

    /// Build the error for a failed dispatch at the current position
    fn unexpected(&mut self, expected: &[&str]) -> SyntaxError;

    fn enter(&mut self, rule: Rule) -> SyntaxResult<()>;
    fn leave(&mut self, rule: Rule);
}

/// Run `body` as the expansion of `rule`
pub fn within<F>(parser: &mut dyn GrammarParser, rule: Rule, body: F) -> SyntaxResult<()>
where
    F: FnOnce(&mut dyn GrammarParser) -> SyntaxResult<()>,
{
    parser.enter(rule)?;
    let result = body(&mut *parser);
    parser.leave(rule);
    result
}

/// The member of `set` the current token stands for, if any
pub fn peek_in(parser: &dyn GrammarParser, set: &[&'static str]) -> Option<&'static str> {
    let symbol = parser.current_token()?.grammar_symbol();
    set.iter().copied().find(|candidate| *candidate == symbol)
}
