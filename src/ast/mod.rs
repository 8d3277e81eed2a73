//! # Parse-time memory
//!
//! The `graphql_type_graph::ast` module contains the [`ASTContext`], an arena that defines the
//! lifetime of everything the SDL parser and the schema builder allocate. Once the simplified
//! schema has been produced the arena isn't needed anymore and is dropped all at once, while the
//! final [`TypeGraph`](crate::graph::TypeGraph) owns its data outright.
//!
//! ```
//! use graphql_type_graph::ast::*;
//!
//! let ctx = ASTContext::new();
//! let name = ctx.alloc_str("Query");
//! assert_eq!(name, "Query");
//! ```

/// A context for a set of SDL documents which holds an arena allocator.
///
/// For the duration of loading, parsing, and building a schema it's performant and convenient to
/// allocate memory in one chunk. This context represents the lifetime of the parsed documents and
/// of the intermediate type system built from them. It's inadvisable to reuse the context across
/// pipeline runs since nothing allocated into it is freed before the context itself is dropped.
pub struct ASTContext {
    /// An arena allocator that holds the memory allocated for the AST Context's lifetime
    pub arena: bumpalo::Bump,
}

impl ASTContext {
    /// Create a new AST context with a preallocated arena.
    pub fn new() -> Self {
        let arena = bumpalo::Bump::new();
        ASTContext { arena }
    }

    /// Put the value of `item` onto the arena and return a reference to it.
    #[inline]
    pub fn alloc<T>(&self, item: T) -> &T {
        self.arena.alloc(item)
    }

    /// Allocate an `&str` slice onto the arena and return a reference to it.
    ///
    /// This is useful when the original slice has an undefined lifetime.
    #[inline]
    pub fn alloc_str(&self, str: &str) -> &str {
        self.arena.alloc_str(str)
    }

    /// Puts a `String` onto the arena and returns a reference to it to tie the `String`'s lifetime
    /// to this AST context without reallocating or copying it.
    #[inline]
    pub fn alloc_string(&self, str: String) -> &str {
        self.arena.alloc(str)
    }
}

impl Default for ASTContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for creating an empty, arena-backed default value, analogous to [Default].
pub trait DefaultIn<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self;
}
