//! Grammar for the analyzed language
//!
//! ```text
//! program               ::= "Program" ID "{" declaration_list statement_list "}"
//! declaration_list      ::= declaration declaration_list'
//! declaration           ::= var_declaration
//! var_declaration       ::= type_specifier ID var_declaration'
//! var_declaration'      ::= ";" | "[" NUM "]" ";"
//! type_specifier        ::= "int" | "float"
//! statement             ::= selection_stmt | iteration_stmt | assignment_stmt | compound_stmt
//! expression            ::= additive_expression expression'
//! additive_expression   ::= term additive_expression'
//! term                  ::= factor term'
//! factor                ::= "(" expression ")" | var | NUM
//! ```
//!
//! The full rule set, including the parameter rules, lives in [`rules`].

pub mod rule;
pub mod rules;
pub mod terminals;

pub use rule::Rule;
pub use rules::{peek_in, within, GrammarParser};
pub use terminals::END_OF_INPUT;
