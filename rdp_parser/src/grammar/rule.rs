use std::fmt;

/// Grammar non-terminals, one per descent procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Program,
    DeclarationList,
    DeclarationListPrime,
    Declaration,
    VarDeclaration,
    VarDeclarationPrime,
    TypeSpecifier,
    StatementList,
    Statement,
    CompoundStmt,
    SelectionStmt,
    SelectionStmtPrime,
    IterationStmt,
    AssignmentStmt,
    Var,
    VarPrime,
    Expression,
    ExpressionPrime,
    Relop,
    AdditiveExpression,
    AdditiveExpressionPrime,
    Addop,
    Term,
    TermPrime,
    Mulop,
    Factor,
    Params,
    ParamList,
    ParamListPrime,
    Param,
    ParamPrime,
}

impl Rule {
    /// Name as written in the grammar
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Program => "program",
            Rule::DeclarationList => "declaration_list",
            Rule::DeclarationListPrime => "declaration_list'",
            Rule::Declaration => "declaration",
            Rule::VarDeclaration => "var_declaration",
            Rule::VarDeclarationPrime => "var_declaration'",
            Rule::TypeSpecifier => "type_specifier",
            Rule::StatementList => "statement_list",
            Rule::Statement => "statement",
            Rule::CompoundStmt => "compound_stmt",
            Rule::SelectionStmt => "selection_stmt",
            Rule::SelectionStmtPrime => "selection_stmt'",
            Rule::IterationStmt => "iteration_stmt",
            Rule::AssignmentStmt => "assignment_stmt",
            Rule::Var => "var",
            Rule::VarPrime => "var'",
            Rule::Expression => "expression",
            Rule::ExpressionPrime => "expression'",
            Rule::Relop => "relop",
            Rule::AdditiveExpression => "additive_expression",
            Rule::AdditiveExpressionPrime => "additive_expression'",
            Rule::Addop => "addop",
            Rule::Term => "term",
            Rule::TermPrime => "term'",
            Rule::Mulop => "mulop",
            Rule::Factor => "factor",
            Rule::Params => "params",
            Rule::ParamList => "param_list",
            Rule::ParamListPrime => "param_list'",
            Rule::Param => "param",
            Rule::ParamPrime => "param'",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_grammar_name() {
        assert_eq!(Rule::AdditiveExpressionPrime.to_string(), "additive_expression'");
        assert_eq!(Rule::Program.to_string(), "program");
    }
}
