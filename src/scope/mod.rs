/// Scope module
/// Flat name table filled while parsing, and the constant folding pass
/// that evaluates it afterwards
///
/// Submodules:
/// - scope: Bindings and the name table
/// - fold: The `Evaluator` trait and the default constant folder
pub mod fold;
pub mod scope;
