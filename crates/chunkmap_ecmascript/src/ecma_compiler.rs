use chunkmap_error::BuildResult;
use oxc::{allocator::Allocator, ast::ast::Program, parser::Parser, span::SourceType};

pub struct EcmaCompiler;

impl EcmaCompiler {
  /// Parses `source` and hands the program to `func`. The AST lives in an arena that is dropped
  /// when `func` returns.
  pub fn with_program<Ret>(
    source: &str,
    source_type: SourceType,
    func: impl for<'ast> FnOnce(&Program<'ast>) -> Ret,
  ) -> BuildResult<Ret> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if ret.panicked || !ret.errors.is_empty() {
      Err(anyhow::anyhow!("Failed to parse, got: {:?}", ret.errors))?;
    }

    Ok(func(&ret.program))
  }
}

#[test]
fn basic_test() {
  let count = EcmaCompiler::with_program("const a = 1; a;", SourceType::mjs(), |program| {
    program.body.len()
  })
  .unwrap();
  assert_eq!(count, 2);
}

#[test]
fn parse_error_test() {
  assert!(EcmaCompiler::with_program("const = ;", SourceType::mjs(), |_| ()).is_err());
}
