//! Code generation: lowers a [Node] tree into three-address statements in C notation.
//!
//! Literals are used directly as operands. Every call gets a fresh temporary `v<n>` that holds
//! its result, and the statement computing it is emitted after the statements of its arguments,
//! so a statement only reads temporaries that were assigned before it.

use std::fmt;

use thiserror::Error;

use crate::syntax::Node;

#[derive(Error, miette::Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    #[error("invalid node: {0}")]
    #[diagnostic(code(tiny::codegen::node))]
    InvalidNode(String),
}

pub type Result<T, E = CodegenError> = std::result::Result<T, E>;

/// The temporaries allocated while compiling one tree, in allocation order. The amount of names
/// already allocated gives the name of the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Temporaries {
    names: Vec<String>,
}

impl Temporaries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next temporary, `v0`, `v1`, and so on.
    pub fn allocate(&mut self) -> String {
        let name = format!("v{}", self.names.len());
        self.names.push(name.clone());
        name
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The `int v0, v1;` line declaring every temporary, if any was allocated.
    pub fn declaration(&self) -> Option<String> {
        if self.names.is_empty() {
            None
        } else {
            Some(format!("int {};", self.names.join(", ")))
        }
    }
}

enum Task<'n, 'a> {
    /// Compiles a node, pushing its result reference once it's done.
    Visit(&'n Node<'a>),

    /// Emits the call statement once all of its arguments are on the result stack.
    Emit { name: &'a str, arity: usize },
}

fn is_name(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|c| c.is_ascii_alphabetic())
}

fn is_number(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|c| c.is_ascii_digit())
}

/// Compiles a tree into the reference of its result and the statements that compute it. The
/// temporaries are allocated in `used_vars`, which is shared by the whole compilation.
pub fn compile(node: &Node, used_vars: &mut Temporaries) -> Result<(String, Vec<String>)> {
    let mut tasks = vec![Task::Visit(node)];
    let mut results: Vec<String> = Vec::new();
    let mut statements = Vec::new();

    while let Some(task) = tasks.pop() {
        match task {
            Task::Visit(node) => match node {
                Node::NumberLiteral { value } if is_number(value) => {
                    results.push(value.to_string());
                }
                Node::CallExpression { name, params } if is_name(name) => {
                    tasks.push(Task::Emit {
                        name: *name,
                        arity: params.len(),
                    });
                    tasks.extend(params.iter().rev().map(Task::Visit));
                }
                _ => return Err(CodegenError::InvalidNode(node.to_string())),
            },
            Task::Emit { name, arity } => {
                let args = results.split_off(results.len().saturating_sub(arity));
                let target = used_vars.allocate();
                statements.push(format!("{target} = {name}({});", args.join(", ")));
                results.push(target);
            }
        }
    }

    let result = results
        .pop()
        .ok_or_else(|| CodegenError::InvalidNode(node.to_string()))?;

    Ok((result, statements))
}

/// The output of a whole compilation: the temporaries to declare and the statements that use
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub temporaries: Temporaries,
    pub statements: Vec<String>,
}

impl Program {
    /// Every line of the program, starting with the declaration.
    pub fn lines(&self) -> Vec<String> {
        self.temporaries
            .declaration()
            .into_iter()
            .chain(self.statements.iter().cloned())
            .collect()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// Compiles the root of a tree with fresh temporaries.
pub fn generate(root: &Node) -> Result<Program> {
    let mut temporaries = Temporaries::new();
    let (_, statements) = compile(root, &mut temporaries)?;

    Ok(Program {
        temporaries,
        statements,
    })
}
