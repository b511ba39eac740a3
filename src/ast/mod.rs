/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the tree the parser produces
///
/// Submodules:
/// - ast: The node sum type and structural helpers
/// - render: Canonical textual rendering used by tests and the console
/// - value: Literal and folded values
pub mod ast;
pub mod render;
pub mod value;
