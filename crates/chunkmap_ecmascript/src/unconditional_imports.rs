use chunkmap_error::BuildResult;
use oxc::{
  ast::ast::{
    ArrowFunctionExpression, AssignmentExpression, ChainExpression, ConditionalExpression,
    Expression, ForInStatement, ForOfStatement, ForStatement, Function, IfStatement,
    ImportExpression, LogicalExpression, MethodDefinition, ObjectProperty, Program,
    PropertyDefinition, SequenceExpression, SwitchCase, SwitchStatement, TryStatement,
    WhileStatement,
  },
  ast_visit::Visit,
  span::SourceType,
  syntax::{operator::AssignmentOperator, scope::ScopeFlags},
};

use crate::EcmaCompiler;

/// Returns the specifiers of `import('...')` expressions that run whenever `code` is evaluated.
///
/// Anything behind a function boundary, a branch, a loop body or a deferred expression is left
/// out, so a specifier missing from the result may still be imported later.
pub fn discover_unconditional_imports(code: &str) -> BuildResult<Vec<String>> {
  EcmaCompiler::with_program(code, SourceType::mjs(), UnconditionalImportCollector::collect)
}

#[derive(Default)]
struct UnconditionalImportCollector {
  imports: Vec<String>,
}

impl UnconditionalImportCollector {
  fn collect(program: &Program<'_>) -> Vec<String> {
    let mut collector = Self::default();
    collector.visit_program(program);
    collector.imports
  }
}

impl<'a> Visit<'a> for UnconditionalImportCollector {
  fn visit_import_expression(&mut self, it: &ImportExpression<'a>) {
    if let Expression::StringLiteral(request) = &it.source {
      self.imports.push(request.value.to_string());
    }
    self.visit_expression(&it.source);
  }

  // Only the id and parameters are part of the enclosing scope, and none of them can import.
  fn visit_function(&mut self, _it: &Function<'a>, _flags: ScopeFlags) {}

  fn visit_arrow_function_expression(&mut self, _it: &ArrowFunctionExpression<'a>) {}

  fn visit_method_definition(&mut self, it: &MethodDefinition<'a>) {
    if it.computed {
      self.visit_property_key(&it.key);
    }
  }

  fn visit_property_definition(&mut self, it: &PropertyDefinition<'a>) {
    if it.computed {
      self.visit_property_key(&it.key);
    }
  }

  fn visit_object_property(&mut self, it: &ObjectProperty<'a>) {
    if it.computed {
      self.visit_property_key(&it.key);
    }
  }

  fn visit_sequence_expression(&mut self, _it: &SequenceExpression<'a>) {}

  fn visit_chain_expression(&mut self, _it: &ChainExpression<'a>) {}

  fn visit_if_statement(&mut self, it: &IfStatement<'a>) {
    self.visit_expression(&it.test);
  }

  fn visit_conditional_expression(&mut self, it: &ConditionalExpression<'a>) {
    self.visit_expression(&it.test);
  }

  fn visit_logical_expression(&mut self, it: &LogicalExpression<'a>) {
    self.visit_expression(&it.left);
  }

  fn visit_assignment_expression(&mut self, it: &AssignmentExpression<'a>) {
    self.visit_assignment_target(&it.left);
    if !matches!(
      it.operator,
      AssignmentOperator::LogicalAnd
        | AssignmentOperator::LogicalOr
        | AssignmentOperator::LogicalNullish
    ) {
      self.visit_expression(&it.right);
    }
  }

  fn visit_switch_statement(&mut self, it: &SwitchStatement<'a>) {
    self.visit_expression(&it.discriminant);
    for case in &it.cases {
      self.visit_switch_case(case);
    }
  }

  fn visit_switch_case(&mut self, it: &SwitchCase<'a>) {
    if let Some(test) = &it.test {
      self.visit_expression(test);
    }
  }

  fn visit_while_statement(&mut self, it: &WhileStatement<'a>) {
    self.visit_expression(&it.test);
  }

  fn visit_for_statement(&mut self, it: &ForStatement<'a>) {
    if let Some(init) = &it.init {
      self.visit_for_statement_init(init);
    }
    if let Some(test) = &it.test {
      self.visit_expression(test);
    }
  }

  fn visit_for_in_statement(&mut self, it: &ForInStatement<'a>) {
    self.visit_expression(&it.right);
  }

  fn visit_for_of_statement(&mut self, it: &ForOfStatement<'a>) {
    self.visit_expression(&it.right);
  }

  fn visit_try_statement(&mut self, it: &TryStatement<'a>) {
    self.visit_block_statement(&it.block);
    if let Some(finalizer) = &it.finalizer {
      self.visit_block_statement(finalizer);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::discover_unconditional_imports;

  fn discover(code: &str) -> Vec<String> {
    discover_unconditional_imports(code).unwrap()
  }

  #[test]
  fn top_level_imports_are_unconditional() {
    assert_eq!(
      discover("import('./a.js');\nconst b = import('./b.js');\nawait import('./c.js');"),
      ["./a.js", "./b.js", "./c.js"]
    );
  }

  #[test]
  fn branches_are_conditional() {
    assert!(discover("if (window.x) { import('./a.js') } else import('./b.js')").is_empty());
    assert!(discover("const m = flag ? import('./a.js') : import('./b.js')").is_empty());
    assert!(discover("flag && import('./a.js'); flag ?? import('./b.js')").is_empty());
    assert!(discover("let m; m ||= import('./a.js')").is_empty());
    assert!(discover("a?.b(import('./a.js'))").is_empty());
  }

  #[test]
  fn branch_tests_are_unconditional() {
    assert_eq!(discover("if (import('./a.js')) {}"), ["./a.js"]);
    assert_eq!(
      discover("switch (import('./a.js')) { case import('./b.js'): import('./c.js') }"),
      ["./a.js", "./b.js"]
    );
  }

  #[test]
  fn functions_are_deferred() {
    assert!(discover("function load() { return import('./a.js') }").is_empty());
    assert!(discover("const load = () => import('./a.js')").is_empty());
    assert!(discover("const routes = [function () { return import('./a.js') }]").is_empty());
    assert!(discover("class A { load() { import('./a.js') } field = import('./b.js') }").is_empty());
    assert!(discover("const o = { a: import('./a.js'), b() { import('./b.js') } }").is_empty());
  }

  #[test]
  fn computed_keys_are_evaluated() {
    assert_eq!(discover("const o = { [import('./a.js')]: 1 }"), ["./a.js"]);
  }

  #[test]
  fn loops_only_evaluate_their_head() {
    assert!(discover("while (x) import('./a.js')").is_empty());
    assert_eq!(discover("for (const m of [import('./a.js')]) import('./b.js')"), ["./a.js"]);
    assert!(discover("for (let i = 0; i < n; i++) import('./a.js')").is_empty());
  }

  #[test]
  fn try_block_is_unconditional_but_handler_is_not() {
    assert_eq!(
      discover("try { import('./a.js') } catch { import('./b.js') } finally { import('./c.js') }"),
      ["./a.js", "./c.js"]
    );
  }

  #[test]
  fn non_literal_specifiers_are_ignored() {
    assert!(discover("import(`./${page}.js`); import(name)").is_empty());
  }

  #[test]
  fn parse_errors_are_reported() {
    assert!(discover_unconditional_imports("import(").is_err());
  }
}
