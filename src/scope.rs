//! Scope resolution: which item types a deployment run is asked to manage.

/// The set of item types in scope for one run.
///
/// `All` is a sentinel meaning "every supported type" and is only produced by
/// the literal expression `all` (case-insensitive, surrounding whitespace
/// ignored). Any other expression is a comma list of type names, compared
/// case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    All,
    Types(Vec<String>),
}

impl Scope {
    /// Parse a scope expression.
    ///
    /// Tokens are trimmed; empty tokens are dropped; duplicates collapse to
    /// the first occurrence. An expression of only empty tokens yields an
    /// empty set, which is a valid no-op scope, not `All`.
    pub fn parse(scope_text: &str) -> Scope {
        if scope_text.trim().eq_ignore_ascii_case("all") {
            return Scope::All;
        }
        let mut types: Vec<String> = Vec::new();
        for token in scope_text.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            if !types.iter().any(|t| t == token) {
                types.push(token.to_string());
            }
        }
        Scope::Types(types)
    }

    /// Whether an item type is managed by this scope.
    pub fn contains(&self, type_name: &str) -> bool {
        match self {
            Scope::All => true,
            Scope::Types(types) => types.iter().any(|t| t == type_name),
        }
    }

    /// The concrete type names this scope covers, with `All` expanded to the
    /// supplied defaults verbatim.
    pub fn item_types(&self, default_types: &[&str]) -> Vec<String> {
        match self {
            Scope::All => default_types.iter().map(|t| (*t).to_string()).collect(),
            Scope::Types(types) => types.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Scope::Types(types) if types.is_empty())
    }
}

/// Resolve a scope expression directly to concrete type names.
pub fn resolve(scope_text: &str, default_types: &[&str]) -> Vec<String> {
    Scope::parse(scope_text).item_types(default_types)
}
