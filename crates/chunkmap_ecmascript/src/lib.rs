mod ecma_compiler;
mod unconditional_imports;

pub use crate::{
  ecma_compiler::EcmaCompiler, unconditional_imports::discover_unconditional_imports,
};
